use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

/// Error type for service operations.
///
/// Every failure a service can produce falls into one of three categories,
/// mapped to HTTP status codes at the boundary: `Validation` -> 400,
/// `NotFound` -> 404, `Database` -> 500. The underlying database error is
/// logged server-side only; callers get a generic message.
#[derive(Debug)]
pub enum ServiceError {
    Validation(String),
    NotFound(&'static str),
    Database(String),
}

impl From<sea_orm::DbErr> for ServiceError {
    fn from(e: sea_orm::DbErr) -> Self {
        ServiceError::Database(e.to_string())
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        match self {
            ServiceError::Validation(msg) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "error": msg }))).into_response()
            }
            ServiceError::NotFound(what) => {
                (StatusCode::NOT_FOUND, Json(json!({ "error": what }))).into_response()
            }
            ServiceError::Database(err) => {
                tracing::error!("Database error: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Internal server error" })),
                )
                    .into_response()
            }
        }
    }
}

/// A 400 naming the first missing required field, matching the ordered
/// short-circuit validation on the creation endpoints.
pub fn missing_field(field: &str) -> ServiceError {
    ServiceError::Validation(format!("Missing required field: {field}"))
}

/// Require a non-empty text field, else fail with the field's name.
pub fn require_text(field: &'static str, value: Option<String>) -> Result<String, ServiceError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(missing_field(field)),
    }
}
