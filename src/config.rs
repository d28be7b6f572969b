//! Configuration management for focusbot.
//!
//! Configuration is loaded with the following priority (highest to lowest):
//! 1. Command-line arguments
//! 2. Environment variables
//! 3. Configuration file (JSON)
//! 4. Default values

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::cli::Args;
use crate::engine::PhaseTiming;

/// Application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Telegram configuration.
    pub telegram: TelegramSection,
    /// Phase timing configuration.
    pub timing: TimingSection,
    /// Logging configuration.
    pub logging: LoggingSection,
}

/// Telegram configuration section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TelegramSection {
    /// Bot token from BotFather.
    pub token: String,
}

/// Phase timing configuration section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingSection {
    /// Work phase length in minutes.
    pub work_minutes: u64,
    /// Break phase length in minutes.
    pub break_minutes: u64,
}

impl Default for TimingSection {
    fn default() -> Self {
        Self {
            work_minutes: 25,
            break_minutes: 5,
        }
    }
}

/// Logging configuration section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Log level (error, warn, info, debug, trace).
    pub level: String,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::Io)?;
        serde_json::from_str(&content).map_err(ConfigError::Json)
    }

    /// Apply environment variable overrides.
    pub fn apply_env(&mut self) {
        if let Ok(token) = std::env::var("FOCUSBOT_TOKEN") {
            if !token.is_empty() {
                self.telegram.token = token;
            }
        }

        if let Ok(minutes) = std::env::var("FOCUSBOT_WORK_MINUTES") {
            if let Ok(minutes) = minutes.parse() {
                self.timing.work_minutes = minutes;
            }
        }

        if let Ok(minutes) = std::env::var("FOCUSBOT_BREAK_MINUTES") {
            if let Ok(minutes) = minutes.parse() {
                self.timing.break_minutes = minutes;
            }
        }

        if let Ok(level) = std::env::var("FOCUSBOT_LOG_LEVEL") {
            self.logging.level = level;
        } else if let Ok(level) = std::env::var("RUST_LOG") {
            self.logging.level = level;
        }
    }

    /// Apply CLI argument overrides.
    pub fn apply_args(&mut self, args: &Args) {
        if let Some(ref token) = args.token {
            self.telegram.token = token.clone();
        }

        if let Some(minutes) = args.work_minutes {
            self.timing.work_minutes = minutes;
        }

        if let Some(minutes) = args.break_minutes {
            self.timing.break_minutes = minutes;
        }

        if let Some(ref level) = args.log_level {
            self.logging.level = level.clone();
        }
    }

    /// Load configuration with full priority chain.
    ///
    /// Priority: CLI args > env vars > config file > defaults
    pub fn load(args: &Args) -> Result<Self, ConfigError> {
        // Start with defaults
        let mut config = Config::default();

        // Load from config file if specified
        if let Some(ref path) = args.config {
            config = Config::from_file(path)?;
        }

        // Apply environment variable overrides
        config.apply_env();

        // Apply CLI argument overrides (highest priority)
        config.apply_args(args);

        Ok(config)
    }

    /// Convert to PhaseTiming for the engine.
    pub fn phase_timing(&self) -> Result<PhaseTiming, ConfigError> {
        if self.timing.work_minutes == 0 {
            return Err(ConfigError::InvalidTiming("work_minutes"));
        }
        if self.timing.break_minutes == 0 {
            return Err(ConfigError::InvalidTiming("break_minutes"));
        }

        Ok(PhaseTiming {
            work: Duration::from_secs(self.timing.work_minutes * 60),
            rest: Duration::from_secs(self.timing.break_minutes * 60),
        })
    }

    /// Get the log level filter string.
    pub fn log_filter(&self) -> &str {
        &self.logging.level
    }
}

/// Configuration errors.
#[derive(Debug)]
pub enum ConfigError {
    /// IO error reading config file.
    Io(std::io::Error),
    /// JSON parsing error.
    Json(serde_json::Error),
    /// A phase duration is zero.
    InvalidTiming(&'static str),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "failed to read config file: {}", e),
            Self::Json(e) => write!(f, "failed to parse config file: {}", e),
            Self::InvalidTiming(field) => write!(f, "{} must be greater than zero", field),
        }
    }
}

impl std::error::Error for ConfigError {}
