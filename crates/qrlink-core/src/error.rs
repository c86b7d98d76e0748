use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum CoreError {
    #[error("invalid short code: {0}")]
    InvalidShortCode(String),
}

#[derive(Debug, Clone, Error)]
pub enum StorageError {
    #[error("storage backend unavailable: {0}")]
    Unavailable(String),
    #[error("stored data is invalid: {0}")]
    InvalidData(String),
    #[error("storage serialization failed: {0}")]
    Serialization(String),
    #[error("storage operation failed: {0}")]
    Operation(String),
}

/// Errors produced while rendering a QR image.
#[derive(Debug, Clone, Error)]
pub enum EncodeError {
    #[error("data does not fit in a QR code: {0}")]
    DataTooLong(String),
    #[error("failed to render QR image: {0}")]
    Render(String),
}

#[derive(Debug, Clone, Error)]
pub enum ShortenerError {
    #[error("invalid url: {0}")]
    InvalidUrl(String),
    #[error("short code not found: {0}")]
    NotFound(String),
    #[error("qr encoding failed: {0}")]
    Encoding(#[from] EncodeError),
    #[error("stored target url of {0} cannot be used for a redirect")]
    UnusableTarget(String),
    #[error("no unused short code after {0} attempts")]
    CodeSpaceExhausted(usize),
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

impl From<CoreError> for ShortenerError {
    fn from(value: CoreError) -> Self {
        match value {
            CoreError::InvalidShortCode(message) => Self::NotFound(message),
        }
    }
}
