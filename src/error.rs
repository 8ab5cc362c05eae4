use crate::services::oracle::OracleError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Could not resolve address: {0}")]
    AddressUnresolvable(String),

    #[error("Routing provider error: {0}")]
    Oracle(#[from] OracleError),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Configuration missing: {0}")]
    ConfigurationMissing(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

// Convert AppError into HTTP responses
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::AddressUnresolvable(ref e) => {
                tracing::info!("Address unresolvable: {}", e);
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "Could not resolve your address",
                )
            }
            AppError::Oracle(ref e) => {
                tracing::error!("Routing provider error: {}", e);
                (StatusCode::BAD_GATEWAY, "Routing service error")
            }
            AppError::InvalidRequest(ref e) => (StatusCode::BAD_REQUEST, e.as_str()),
            AppError::ConfigurationMissing(ref e) => {
                tracing::error!("Configuration missing: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Service not configured")
            }
            AppError::Internal(ref e) => {
                tracing::error!("Internal error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        };

        let body = Json(json!({
            "error": status.canonical_reason().unwrap_or("Unknown error"),
            "message": error_message,
        }));

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
