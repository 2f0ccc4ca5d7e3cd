use std::path::PathBuf;

use thiserror::Error;

/// Fatal errors raised before or while loading fixtures.
///
/// Per-artifact schema violations are not errors; they become entries in the
/// result set.
#[derive(Debug, Error)]
pub enum FixtureError {
    #[error("schema not found: {}", .0.display())]
    SchemaNotFound(PathBuf),
    #[error("schema {} is not valid JSON: {source}", path.display())]
    SchemaJson {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid schema: {0}")]
    InvalidSchema(String),
    #[error("base directory not found: {}", .0.display())]
    BaseNotFound(PathBuf),
    #[error("artifact not found: {}", .0.display())]
    ArtifactNotFound(PathBuf),
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for fixture operations.
pub type Result<T> = std::result::Result<T, FixtureError>;
