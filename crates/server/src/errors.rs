use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use common::types::ErrorBody;
use service::errors::ServiceError;
use thiserror::Error;
use tracing::error;

pub const VALIDATION_ERROR: &str = "Validation error";

/// JSON error response: `{ "error": <category>, "message": <detail> }`.
#[derive(Debug, Error)]
#[error("{error}: {message}")]
pub struct JsonApiError {
    pub status: StatusCode,
    pub error: String,
    pub message: String,
}

impl JsonApiError {
    pub fn new(status: StatusCode, error: impl Into<String>, message: impl Into<String>) -> Self {
        Self { status, error: error.into(), message: message.into() }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, VALIDATION_ERROR, message)
    }

    /// Map a service failure to a status by its kind: validation → 400,
    /// not found → 404, anything else → 500 under `category`.
    pub fn from_service(category: &str, e: &ServiceError) -> Self {
        if e.is_validation() {
            Self::validation(e.to_string())
        } else if e.is_not_found() {
            Self::new(StatusCode::NOT_FOUND, category, e.to_string())
        } else {
            Self::new(StatusCode::INTERNAL_SERVER_ERROR, category, e.to_string())
        }
    }
}

impl IntoResponse for JsonApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            error!(status = %self.status, error = %self.error, message = %self.message, "request failed");
        }
        let body = ErrorBody { error: self.error, message: self.message };
        (self.status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use models::errors::ModelError;

    #[test]
    fn service_errors_map_by_kind() {
        let nf = JsonApiError::from_service("Failed to get item", &ServiceError::not_found("Item"));
        assert_eq!(nf.status, StatusCode::NOT_FOUND);
        assert_eq!(nf.error, "Failed to get item");
        assert_eq!(nf.message, "Item not found");

        let v = JsonApiError::from_service("Failed to update item", &ModelError::Validation("name is required".into()).into());
        assert_eq!(v.status, StatusCode::BAD_REQUEST);
        assert_eq!(v.error, VALIDATION_ERROR);

        let db = JsonApiError::from_service("Failed to get items", &ServiceError::Db("pool timed out".into()));
        assert_eq!(db.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(db.message, "database error: pool timed out");
    }

    #[test]
    fn message_text_does_not_drive_status() {
        // a storage error that happens to say "not found" is still a 500
        let e = ServiceError::Db("Item not found".into());
        assert_eq!(JsonApiError::from_service("Failed to get item", &e).status, StatusCode::INTERNAL_SERVER_ERROR);
    }
}
