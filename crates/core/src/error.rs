use std::io;

/// Errors that can occur outside the ranking path (setup, config, snapshots)
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("IO error: {0}")]
    IoError(#[from] io::Error),

    #[error("Tree-sitter error: {0}")]
    TreeSitterError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Runtime snapshot error: {0}")]
    SnapshotError(String),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

/// Result type alias for scopehint operations
pub type Result<T> = std::result::Result<T, Error>;
