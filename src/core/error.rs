//! Error types for tactical AI operations

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TacticsError {
    #[error("Battle simulation cancelled")]
    Cancelled,

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Invalid unit template: {0}")]
    InvalidTemplate(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

impl TacticsError {
    /// True when the error is the cooperative cancellation signal rather than a failure
    pub fn is_cancelled(&self) -> bool {
        matches!(self, TacticsError::Cancelled)
    }
}

pub type Result<T> = std::result::Result<T, TacticsError>;
