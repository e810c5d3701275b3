use thiserror::Error;

/// FCM Client Error Types
#[derive(Error, Debug)]
pub enum FCMError {
    #[error("Failed to parse service account key: {0}")]
    KeyParseError(String),

    #[error("Failed to encode JWT: {0}")]
    JwtEncodeError(String),

    #[error("FCM send request failed: {0}")]
    SendRequestError(String),

    #[error("Failed to read FCM response: {0}")]
    ResponseParseError(String),
}
