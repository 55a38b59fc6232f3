use actix_web::{web, HttpResponse, Responder};
use tracing::instrument;

use crate::{entities::experience::NewSubmission, errors::AppError, AppState};

#[instrument(skip(state, data))]
pub async fn create_submission(
    state: web::Data<AppState>,
    data: web::Json<NewSubmission>,
) -> Result<impl Responder, AppError> {
    let submission_handler = &state.submission_handler;

    let response = submission_handler
        .submit(data.into_inner())
        .await?;

    Ok(HttpResponse::Created().json(response))
}
