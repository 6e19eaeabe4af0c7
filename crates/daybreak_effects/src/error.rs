//! # Effects Error Types
//!
//! The frame path is infallible; these only come out of name parsing
//! and configuration loading.

use thiserror::Error;

/// Errors that can occur outside the frame path.
#[derive(Error, Debug)]
pub enum EffectsError {
    /// An effect name that is not one of the six kinds.
    #[error("unknown effect kind: {0:?}")]
    UnknownEffect(String),

    /// Configuration parsed but holds an unusable value.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Configuration text is not valid TOML for `EngineConfig`.
    #[error("config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Configuration file could not be read.
    #[error("config file {path}: {source}")]
    ConfigIo {
        /// Path that failed.
        path: String,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
}

/// Result type for effects operations.
pub type EffectsResult<T> = Result<T, EffectsError>;
