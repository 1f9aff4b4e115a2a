//! Error handling for the webhook server.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::fmt;

use talkbridge_core::DeliveryError;

/// API error type, rendered as `{"status":"error","message":...}`.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.status, self.message)
    }
}

impl std::error::Error for ApiError {}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub status: String,
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            status: "error".to_string(),
            message: self.message,
        };

        (self.status, Json(body)).into_response()
    }
}

// Delivery failures surface to the webhook caller as a 500 with the detail;
// nothing out of talkbridge-core crosses this boundary as a panic.
impl From<DeliveryError> for ApiError {
    fn from(err: DeliveryError) -> Self {
        ApiError::internal(err.to_string())
    }
}

/// Result type alias for API handlers.
pub type ApiResult<T> = Result<T, ApiError>;
