//! # Host Error Types

use thiserror::Error;

use daybreak_effects::EffectsError;

/// Errors surfaced by the host.
#[derive(Error, Debug)]
pub enum HostError {
    /// The frame loop was shut down; no more frames will run.
    #[error("frame loop has been shut down")]
    ShutDown,

    /// Engine configuration or effect-name failure.
    #[error(transparent)]
    Effects(#[from] EffectsError),

    /// Host config text is not valid TOML for `HostConfig`.
    #[error("host config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Host config parsed but holds an unusable value.
    #[error("invalid host configuration: {0}")]
    InvalidConfig(String),

    /// Host config file could not be read.
    #[error("host config file {path}: {source}")]
    ConfigIo {
        /// Path that failed.
        path: String,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
}

/// Result type for host operations.
pub type HostResult<T> = Result<T, HostError>;
