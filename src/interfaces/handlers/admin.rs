use actix_web::{http::header::ContentDisposition, web, HttpResponse, Responder};
use chrono::Utc;
use tracing::instrument;

use crate::{
    domain::moderation::ModerationDecision,
    entities::experience::{AdminListParams, DataResponse, DeleteParams, UpdateSubmissionRequest},
    errors::AppError,
    use_cases::extractors::AdminAccess,
    AppState,
};

#[instrument(skip(_admin, state))]
pub async fn list_submissions(
    _admin: AdminAccess,
    state: web::Data<AppState>,
    query: web::Query<AdminListParams>,
) -> Result<impl Responder, AppError> {
    let submissions = state.moderation_handler
        .list_submissions(query.status.as_deref())
        .await?;

    Ok(HttpResponse::Ok().json(DataResponse { data: submissions }))
}

#[instrument(skip(_admin, state, data))]
pub async fn update_submission(
    _admin: AdminAccess,
    state: web::Data<AppState>,
    data: web::Json<UpdateSubmissionRequest>,
) -> Result<impl Responder, AppError> {
    let UpdateSubmissionRequest { id, changes } = data.into_inner();

    let response = state.moderation_handler
        .update_submission(id.as_deref(), changes)
        .await?;

    Ok(HttpResponse::Ok().json(response))
}

#[instrument(skip(_admin, state))]
pub async fn delete_submission(
    _admin: AdminAccess,
    state: web::Data<AppState>,
    query: web::Query<DeleteParams>,
) -> Result<impl Responder, AppError> {
    state.moderation_handler
        .delete_submission(query.id.as_deref())
        .await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Deleted successfully"
    })))
}

#[instrument(skip(_admin, state))]
pub async fn approve_submission(
    _admin: AdminAccess,
    state: web::Data<AppState>,
    submission_id: web::Path<String>,
) -> Result<impl Responder, AppError> {
    let response = state.moderation_handler
        .decide(&submission_id, ModerationDecision::Approve)
        .await?;

    Ok(HttpResponse::Ok().json(response))
}

#[instrument(skip(_admin, state))]
pub async fn reject_submission(
    _admin: AdminAccess,
    state: web::Data<AppState>,
    submission_id: web::Path<String>,
) -> Result<impl Responder, AppError> {
    let response = state.moderation_handler
        .decide(&submission_id, ModerationDecision::Reject)
        .await?;

    Ok(HttpResponse::Ok().json(response))
}

#[instrument(skip(_admin, state))]
pub async fn submission_stats(
    _admin: AdminAccess,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let counts = state.moderation_handler.status_counts().await?;
    Ok(HttpResponse::Ok().json(counts))
}

#[instrument(skip(_admin, state))]
pub async fn export_approved(
    _admin: AdminAccess,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let export = state.moderation_handler
        .export_approved(Utc::now().date_naive())
        .await?;

    Ok(HttpResponse::Ok()
        .content_type("text/csv; charset=utf-8")
        .insert_header(ContentDisposition::attachment(export.filename))
        .body(export.body))
}
