//! Session-level errors.

use std::path::PathBuf;

use thiserror::Error;

use adventure_rules::LoadError;

/// Errors that stop a session from starting or continuing.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid session configuration: {0}")]
    Config(#[from] toml::de::Error),

    #[error("cannot start: {0}")]
    Load(#[from] LoadError),

    #[error("failed to install logging: {0}")]
    Logging(#[from] tracing_subscriber::util::TryInitError),

    /// Input was submitted after an ending was reached.
    #[error("the game is over")]
    GameOver,
}
