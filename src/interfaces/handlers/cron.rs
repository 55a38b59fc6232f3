use actix_web::{web, HttpResponse, Responder};
use chrono::Utc;
use tracing::instrument;

use crate::{use_cases::extractors::CronAccess, AppState};

/// Scheduled integrity check. Probe failures are reported in the body with
/// a 200; only authorization failures change the status code.
#[instrument(skip(_cron, state))]
pub async fn check_database(
    _cron: CronAccess,
    state: web::Data<AppState>,
) -> impl Responder {
    let report = state.health_handler.run_checks(Utc::now()).await;
    HttpResponse::Ok().json(report)
}
