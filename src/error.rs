use thiserror::Error;

/// Errors produced by the grid core
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GridError {
    #[error("Invalid grid size {size}: must be between 1 and {max}")]
    InvalidSize { size: usize, max: usize },

    #[error("Invalid color format: {0:?} (expected #RRGGBB)")]
    InvalidFormat(String),

    #[error("Cell ({row}, {col}) is outside a {size}x{size} grid")]
    OutOfBounds { row: usize, col: usize, size: usize },

    #[error("Failed to decode image: {0}")]
    DecodeFailed(String),

    #[error("Failed to encode image: {0}")]
    EncodeFailed(String),

    #[error("{0}")]
    InvalidConfig(String),
}

/// Result type for grid operations
pub type GridResult<T> = Result<T, GridError>;

/// Errors that can occur while loading a [`crate::GridConfig`]
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}
