//! Error types shared across the workspace

use thiserror::Error;

/// Result type alias for I/O-facing operations
pub type Result<T> = std::result::Result<T, IrefError>;

/// Failures outside the record transformation itself
#[derive(Error, Debug)]
pub enum IrefError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Archive error: {0}")]
    Archive(String),

    #[error("Member '{member}' not found in archive {archive} (contains: {available})")]
    MissingMember {
        archive: String,
        member: String,
        /// Comma-separated member names actually present
        available: String,
    },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Output error: {0}")]
    Output(String),
}

impl IrefError {
    /// Whether retrying the operation could succeed
    pub fn is_transient(&self) -> bool {
        matches!(self, IrefError::Network(_))
    }
}
