//! Error types for focusbot.

use thiserror::Error;

use crate::engine::{MAX_ROUNDS, MIN_ROUNDS};

/// Main error type for focusbot operations.
#[derive(Error, Debug)]
pub enum FocusError {
    /// Round-count input did not parse to an integer in the accepted range.
    #[error("round count must be a number between {MIN_ROUNDS} and {MAX_ROUNDS}, got {0:?}")]
    InvalidRoundCount(String),

    /// No bot token was provided via flag, environment, or config file.
    #[error("bot token is not set (use --token or FOCUSBOT_TOKEN)")]
    MissingToken,

    /// Configuration loading failed.
    #[error("configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience Result type for focusbot operations.
pub type Result<T> = std::result::Result<T, FocusError>;
