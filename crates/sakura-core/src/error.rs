//! Error types for Sakura

use thiserror::Error;

/// The main error type for Sakura operations
#[derive(Debug, Error)]
pub enum SakuraError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParseError(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Surface allocation failed: {width}x{height} pixels")]
    SurfaceAllocation { width: u32, height: u32 },

    #[error("Image error: {0}")]
    ImageError(String),

    #[error("Runtime error: {0}")]
    RuntimeError(String),
}

/// Result type alias for Sakura operations
pub type Result<T> = std::result::Result<T, SakuraError>;

impl From<toml::de::Error> for SakuraError {
    fn from(err: toml::de::Error) -> Self {
        SakuraError::TomlParseError(err.to_string())
    }
}
