use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use freight_shared::PageError;
use freight_shipment::{ErrorKind, ShipmentError};
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    ValidationError(String),
    #[error("{0}")]
    NotFoundError(String),
    #[error("method not allowed")]
    MethodNotAllowed,
    #[error("request timed out")]
    TimeoutError,
    #[error("{0}")]
    InternalServerError(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::ValidationError(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFoundError(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::MethodNotAllowed => {
                (StatusCode::METHOD_NOT_ALLOWED, "method not allowed".to_string())
            }
            AppError::TimeoutError => {
                tracing::warn!("Request deadline exceeded");
                (StatusCode::SERVICE_UNAVAILABLE, "request timed out".to_string())
            }
            AppError::InternalServerError(msg) => {
                tracing::error!("Internal Server Error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "internal server error".to_string())
            }
        };

        let body = Json(json!({
            "error": { "message": error_message },
        }));

        (status, body).into_response()
    }
}

impl From<ShipmentError> for AppError {
    fn from(err: ShipmentError) -> Self {
        match err.kind() {
            ErrorKind::InvalidInput => AppError::ValidationError(err.to_string()),
            ErrorKind::NotFound => AppError::NotFoundError(err.to_string()),
            ErrorKind::Internal => AppError::InternalServerError(err.to_string()),
        }
    }
}

impl From<PageError> for AppError {
    fn from(err: PageError) -> Self {
        AppError::ValidationError(format!("could not parse pagination: {}", err))
    }
}
