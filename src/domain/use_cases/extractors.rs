use actix_web::{web, FromRequest, HttpRequest};
use futures_util::future::{ready, Ready};

use crate::{
    auth::secret::{extract_bearer_token, SharedSecret},
    errors::AppError,
    AppState,
};

fn admin_secret(state: &AppState) -> &SharedSecret {
    &state.admin_secret
}

fn cron_secret(state: &AppState) -> &SharedSecret {
    &state.cron_secret
}

fn authorize(req: &HttpRequest, select: fn(&AppState) -> &SharedSecret, scope: &str) -> Result<(), AppError> {
    let Some(state) = req.app_data::<web::Data<AppState>>() else {
        tracing::error!("AppState is not registered; refusing {} access", scope);
        return Err(AppError::UnauthorizedAccess);
    };

    let secret = select(state.get_ref());
    match extract_bearer_token(req) {
        Some(token) if secret.verify(&token) => Ok(()),
        Some(_) => {
            tracing::warn!(path = %req.path(), "Rejected {} request with wrong credentials", scope);
            Err(AppError::UnauthorizedAccess)
        }
        None => {
            tracing::warn!(path = %req.path(), "Rejected {} request without bearer token", scope);
            Err(AppError::UnauthorizedAccess)
        }
    }
}

/// Moderator access, proven with the admin shared secret as a bearer token.
/// Returns 401 before the handler (and the store) is reached otherwise.
/// Usage: add `_admin: AdminAccess` as a handler parameter.
#[derive(Debug)]
pub struct AdminAccess;

impl FromRequest for AdminAccess {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        ready(authorize(req, admin_secret, "admin").map(|_| AdminAccess))
    }
}

/// Scheduler access for the health-check trigger, proven with the cron secret.
#[derive(Debug)]
pub struct CronAccess;

impl FromRequest for CronAccess {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        ready(authorize(req, cron_secret, "cron").map(|_| CronAccess))
    }
}
