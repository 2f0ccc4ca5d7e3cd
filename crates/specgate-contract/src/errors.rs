use std::path::PathBuf;

use thiserror::Error;

/// Errors raised before any rule block is evaluated.
#[derive(Debug, Error)]
pub enum ContractError {
    #[error("contract not found: {}", .0.display())]
    ContractNotFound(PathBuf),
    #[error("target not found: {}", .0.display())]
    TargetNotFound(PathBuf),
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for contract operations.
pub type Result<T> = std::result::Result<T, ContractError>;
