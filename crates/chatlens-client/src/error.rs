use thiserror::Error;

/// Errors surfaced by the dashboard client.
///
/// Every backend failure, whether the server was unreachable or answered
/// with an error status, collapses into [`ClientError::RequestFailed`]. Its
/// display text is the bare human-readable message so it can be shown to
/// the user as-is.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClientError {
    #[error("{0}")]
    RequestFailed(String),

    #[error("Failed to read sample data: {0}")]
    SampleData(String),
}

impl ClientError {
    pub fn request_failed(message: impl Into<String>) -> Self {
        Self::RequestFailed(message.into())
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ClientError>;
