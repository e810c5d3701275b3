/// Error types for the notification dispatcher
///
/// Every failure is rendered as `{"error": ...}` at the HTTP boundary. Only
/// the fixed public messages below ever leave the process; the detail carried
/// by each variant is for server-side logs.
use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use fcm_shared::FCMError;
use serde_json::json;
use thiserror::Error;

use crate::services::token_store::StoreError;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    /// Malformed or incomplete request; never retried
    #[error("{0}")]
    Validation(String),

    #[error("device token lookup failed: {0}")]
    Lookup(String),

    #[error("no valid delivery target")]
    NotFound,

    #[error("firebase service account not configured")]
    Config,

    #[error("push backend rejected message with status {status}")]
    Backend {
        status: u16,
        details: serde_json::Value,
    },

    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn missing_content() -> Self {
        AppError::Validation("Title and body are required".to_string())
    }

    pub fn missing_target() -> Self {
        AppError::Validation("Either userId or topic is required".to_string())
    }

    fn public_message(&self) -> &str {
        match self {
            AppError::Validation(msg) => msg.as_str(),
            AppError::Lookup(_) => "Failed to fetch FCM token",
            AppError::NotFound => "No valid FCM tokens found",
            AppError::Config => "Firebase service account not configured",
            AppError::Backend { .. } => "FCM request failed",
            AppError::Internal(_) => "Internal server error",
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Backend { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            AppError::Lookup(_) | AppError::Config | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            AppError::Backend { details, .. } => json!({
                "error": self.public_message(),
                "details": details,
            }),
            _ => json!({ "error": self.public_message() }),
        };

        HttpResponse::build(self.status_code()).json(body)
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        AppError::Lookup(err.to_string())
    }
}

/// Key parsing, signing and transport failures all mean the request cannot
/// be completed; none of them are the caller's fault.
impl From<FCMError> for AppError {
    fn from(err: FCMError) -> Self {
        AppError::Internal(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}
