use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use qrlink_core::{CoreError, ShortenerError};
use thiserror::Error;
use tracing::{debug, error};

use crate::model::ErrorResponse;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),
    #[error(transparent)]
    Shortener(#[from] ShortenerError),
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<CoreError> for AppError {
    fn from(error: CoreError) -> Self {
        AppError::Shortener(error.into())
    }
}

impl AppError {
    fn status_and_message(&self) -> (StatusCode, String) {
        match self {
            AppError::BadRequest(message) => (StatusCode::BAD_REQUEST, message.clone()),
            AppError::Shortener(ShortenerError::InvalidUrl(message)) => {
                (StatusCode::BAD_REQUEST, message.clone())
            }
            AppError::Shortener(ShortenerError::NotFound(_)) => {
                (StatusCode::NOT_FOUND, "short code not found".to_string())
            }
            AppError::Shortener(ShortenerError::Encoding(_)) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "failed to generate QR code".to_string(),
            ),
            AppError::Shortener(ShortenerError::UnusableTarget(_)) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "target url cannot be used for a redirect".to_string(),
            ),
            AppError::Shortener(ShortenerError::CodeSpaceExhausted(_)) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "failed to allocate a short code".to_string(),
            ),
            AppError::Shortener(ShortenerError::Storage(_)) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "storage unavailable".to_string(),
            ),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();

        if status.is_server_error() {
            error!(error = %self, "request failed");
        } else {
            debug!(status = status.as_u16(), error = %self, "request rejected");
        }

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}
