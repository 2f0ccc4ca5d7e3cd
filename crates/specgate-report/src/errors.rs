use thiserror::Error;

/// Errors emitted while rendering or persisting reports.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid output path: {0}")]
    InvalidPath(String),
}

/// Result type for report operations.
pub type Result<T> = std::result::Result<T, ReportError>;
