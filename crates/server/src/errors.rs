use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::error;

use models::errors::ModelError;
use service::errors::ServiceError;

/// JSON error envelope carrying the HTTP status to respond with.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
    pub detail: Option<String>,
}

impl ApiError {
    pub fn new(status: StatusCode, message: &str, detail: Option<String>) -> Self {
        Self { status, message: message.to_string(), detail }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({ "error": self.message, "detail": self.detail });
        (self.status, Json(body)).into_response()
    }
}

impl From<ServiceError> for ApiError {
    fn from(e: ServiceError) -> Self {
        match &e {
            ServiceError::NotFound(_) => {
                ApiError::new(StatusCode::NOT_FOUND, "Not Found", Some(e.to_string()))
            }
            ServiceError::DuplicateEmail(_) => {
                ApiError::new(StatusCode::CONFLICT, "Conflict", Some(e.to_string()))
            }
            ServiceError::Validation(_) | ServiceError::Model(ModelError::Validation(_)) => {
                ApiError::new(StatusCode::BAD_REQUEST, "Validation Error", Some(e.to_string()))
            }
            ServiceError::Db(_) | ServiceError::Model(ModelError::Db(_)) => {
                error!(err = %e, "storage backend failure");
                ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal Error", Some(e.to_string()))
            }
        }
    }
}
