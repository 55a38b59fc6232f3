use actix_web::{
    error::ResponseError,
    http::{header::ContentType, StatusCode},
    HttpResponse
};
use derive_more::Display;
use serde::Serialize;
use validator::ValidationErrors;

use crate::domain::moderation::ModerationError;

const GENERIC_STORE_MESSAGE: &str = "Failed to complete the database operation";
const GENERIC_INTERNAL_MESSAGE: &str = "An unexpected error occurred";

#[derive(Debug, Display)]
pub enum AppError {
    #[display("Validation failed")]
    ValidationError(Vec<FieldError>),
    #[display("{_0}")]
    BadRequest(String),
    #[display("{_0}")]
    NotFound(String),
    #[display("{_0}")]
    NoData(String),
    #[display("{_0}")]
    Conflict(String),
    #[display("Unauthorized")]
    UnauthorizedAccess,
    #[display("Database error: {_0}")]
    StoreError(String),
    #[display("Internal server error: {_0}")]
    InternalError(String),
}

impl AppError {
    /// The underlying message without any display prefix.
    pub fn detail(&self) -> String {
        match self {
            AppError::StoreError(msg) | AppError::InternalError(msg) => msg.clone(),
            _ => self.to_string(),
        }
    }
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        let body = match self {
            AppError::ValidationError(errors) => {
                serde_json::json!({
                    "error": "Validation failed",
                    "details": errors
                })
            }
            // Details stay in the logs; callers get a generic message.
            AppError::StoreError(detail) => {
                tracing::error!(error = %detail, "Store operation failed");
                serde_json::json!({"error": GENERIC_STORE_MESSAGE})
            }
            AppError::InternalError(detail) => {
                tracing::error!(error = %detail, "Unexpected failure");
                serde_json::json!({"error": GENERIC_INTERNAL_MESSAGE})
            }
            _ => {
                serde_json::json!({"error": self.to_string()})
            }
        };
        HttpResponse::build(self.status_code())
            .insert_header(ContentType::json())
            .json(body)
    }

    fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::NoData(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::UnauthorizedAccess => StatusCode::UNAUTHORIZED,
            AppError::StoreError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        let mut field_errors: Vec<FieldError> = errors
            .field_errors()
            .iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(|e| FieldError {
                    field: field.to_string(),
                    message: e
                        .message
                        .as_ref()
                        .map(|s| s.to_string())
                        .unwrap_or_else(|| "Invalid value".to_string()),
                })
            })
            .collect();

        // HashMap iteration order is not stable
        field_errors.sort_by(|a, b| a.field.cmp(&b.field).then_with(|| a.message.cmp(&b.message)));

        AppError::ValidationError(field_errors)
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => AppError::NotFound("Record not found".into()),
            _ => AppError::StoreError(err.to_string())
        }
    }
}

impl From<csv::Error> for AppError {
    fn from(err: csv::Error) -> Self {
        AppError::InternalError(format!("CSV serialization failed: {}", err))
    }
}

impl From<ModerationError> for AppError {
    fn from(err: ModerationError) -> Self {
        AppError::Conflict(err.to_string())
    }
}

#[derive(Debug, Serialize, PartialEq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;

    async fn body_json(err: AppError) -> serde_json::Value {
        let body = to_bytes(err.error_response().into_body()).await.unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[actix_rt::test]
    async fn store_errors_hide_details_from_caller() {
        let err = AppError::StoreError("connection refused on 10.0.0.3".into());
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(err).await;
        assert_eq!(body["error"], GENERIC_STORE_MESSAGE);
    }

    #[actix_rt::test]
    async fn validation_errors_list_details() {
        let err = AppError::ValidationError(vec![FieldError {
            field: "company".into(),
            message: "Company name is required".into(),
        }]);
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);

        let body = body_json(err).await;
        assert_eq!(body["error"], "Validation failed");
        assert_eq!(body["details"][0]["field"], "company");
    }

    #[test]
    fn row_not_found_maps_to_not_found() {
        let err = AppError::from(sqlx::Error::RowNotFound);
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn no_data_is_not_found() {
        let err = AppError::NoData("No data to export".into());
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(err.to_string(), "No data to export");
    }
}
