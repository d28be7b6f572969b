//! Command-line interface for focusbot.
//!
//! Uses lexopt for minimal binary size overhead.

use std::ffi::OsString;
use std::path::PathBuf;

/// Command-line arguments.
#[derive(Debug, Clone, Default)]
pub struct Args {
    /// Path to configuration file.
    pub config: Option<PathBuf>,
    /// Bot token (overrides config file and environment).
    pub token: Option<String>,
    /// Work phase length in minutes.
    pub work_minutes: Option<u64>,
    /// Break phase length in minutes.
    pub break_minutes: Option<u64>,
    /// Log level (error, warn, info, debug, trace).
    pub log_level: Option<String>,
    /// Show version and exit.
    pub version: bool,
    /// Show help and exit.
    pub help: bool,
}

/// Parse command-line arguments.
pub fn parse_args() -> Result<Args, ArgsError> {
    parse_args_from(std::env::args_os())
}

/// Parse arguments from an iterator (for testing).
pub fn parse_args_from<I>(args: I) -> Result<Args, ArgsError>
where
    I: IntoIterator<Item = OsString>,
{
    use lexopt::prelude::*;

    let mut result = Args::default();
    let mut parser = lexopt::Parser::from_iter(args);

    while let Some(arg) = parser.next()? {
        match arg {
            Short('h') | Long("help") => {
                result.help = true;
            }
            Short('V') | Long("version") => {
                result.version = true;
            }
            Short('c') | Long("config") => {
                result.config = Some(parser.value()?.parse()?);
            }
            Short('t') | Long("token") => {
                result.token = Some(parser.value()?.parse()?);
            }
            Long("work-minutes") => {
                let value: String = parser.value()?.parse()?;
                result.work_minutes = Some(
                    value
                        .parse()
                        .map_err(|_| ArgsError::InvalidValue("work-minutes", value))?,
                );
            }
            Long("break-minutes") => {
                let value: String = parser.value()?.parse()?;
                result.break_minutes = Some(
                    value
                        .parse()
                        .map_err(|_| ArgsError::InvalidValue("break-minutes", value))?,
                );
            }
            Short('l') | Long("log-level") => {
                result.log_level = Some(parser.value()?.parse()?);
            }
            Value(val) => {
                return Err(ArgsError::UnexpectedArgument(val.to_string_lossy().into()));
            }
            _ => return Err(arg.unexpected().into()),
        }
    }

    Ok(result)
}

/// Print help message.
pub fn print_help() {
    let version = env!("CARGO_PKG_VERSION");
    println!(
        r#"focusbot {version}
Telegram bot that runs timed focus/break cycles per chat

USAGE:
    focusbot [OPTIONS]

OPTIONS:
    -c, --config <FILE>        Path to configuration file (JSON)
    -t, --token <TOKEN>        Telegram bot token
        --work-minutes <MIN>   Work phase length in minutes [default: 25]
        --break-minutes <MIN>  Break phase length in minutes [default: 5]
    -l, --log-level <LVL>      Log level (error, warn, info, debug, trace)
    -h, --help                 Print help
    -V, --version              Print version

ENVIRONMENT VARIABLES:
    FOCUSBOT_TOKEN           Bot token (overrides config)
    FOCUSBOT_WORK_MINUTES    Work phase length (overrides config)
    FOCUSBOT_BREAK_MINUTES   Break phase length (overrides config)
    FOCUSBOT_LOG_LEVEL       Log level (overrides config)
    RUST_LOG                 Alternative log level setting

EXAMPLES:
    # Start with a token from the environment
    FOCUSBOT_TOKEN=123:abc focusbot

    # Start with config file
    focusbot -c /etc/focusbot/config.json

    # Short cycles for trying the bot out
    focusbot -t 123:abc --work-minutes 1 --break-minutes 1
"#
    );
}

/// Print version.
pub fn print_version() {
    println!("focusbot {}", env!("CARGO_PKG_VERSION"));
}

/// Argument parsing errors.
#[derive(Debug)]
pub enum ArgsError {
    /// Lexopt parsing error.
    Lexopt(lexopt::Error),
    /// Invalid argument value.
    InvalidValue(&'static str, String),
    /// Unexpected positional argument.
    UnexpectedArgument(String),
}

impl std::fmt::Display for ArgsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Lexopt(e) => write!(f, "{}", e),
            Self::InvalidValue(name, value) => {
                write!(f, "invalid value for --{}: '{}'", name, value)
            }
            Self::UnexpectedArgument(arg) => {
                write!(f, "unexpected argument: '{}'", arg)
            }
        }
    }
}

impl std::error::Error for ArgsError {}

impl From<lexopt::Error> for ArgsError {
    fn from(e: lexopt::Error) -> Self {
        Self::Lexopt(e)
    }
}
