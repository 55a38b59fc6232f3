use actix_web::{web, HttpResponse, Responder};
use tracing::instrument;

use crate::{
    entities::experience::{DataResponse, PublicQueryParams},
    errors::AppError,
    AppState,
};

#[instrument(skip(state))]
pub async fn list_public_experiences(
    state: web::Data<AppState>,
    query: web::Query<PublicQueryParams>,
) -> Result<impl Responder, AppError> {
    let experiences = state.experience_handler
        .search_approved(query.keyword.as_deref(), query.company.as_deref())
        .await?;

    Ok(HttpResponse::Ok().json(DataResponse { data: experiences }))
}
