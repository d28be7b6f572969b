//! Focusbot binary entry point.

use std::sync::Arc;

use teloxide::prelude::*;
use tracing::{error, info};

use focusbot::config::Config;
use focusbot::{cli, logging, telegram};
use focusbot::{FocusError, SessionEngine, SessionStore, TelegramNotifier};

#[tokio::main]
async fn main() -> focusbot::Result<()> {
    let args = match cli::parse_args() {
        Ok(args) => args,
        Err(e) => {
            eprintln!("focusbot: {e}");
            std::process::exit(2);
        }
    };

    if args.help {
        cli::print_help();
        return Ok(());
    }
    if args.version {
        cli::print_version();
        return Ok(());
    }

    let config = Config::load(&args)?;
    logging::init(config.log_filter());

    info!("focusbot v{}", env!("CARGO_PKG_VERSION"));

    if config.telegram.token.is_empty() {
        return Err(FocusError::MissingToken);
    }
    let timing = config.phase_timing()?;

    let bot = Bot::new(config.telegram.token.clone());
    match bot.get_me().await {
        Ok(me) => info!(account = me.username(), "authorized"),
        Err(e) => {
            error!(error = %e, "failed to authorize with Telegram");
            std::process::exit(1);
        }
    }

    let store = Arc::new(SessionStore::new());
    let notifier = Arc::new(TelegramNotifier::new(bot.clone()));
    let engine = SessionEngine::with_timing(store, notifier, timing);
    info!(work = ?timing.work, rest = ?timing.rest, "session engine ready");

    telegram::run(bot, engine).await;

    Ok(())
}
