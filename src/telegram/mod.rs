//! Telegram transport.
//!
//! The collaborator the core notifies through: it parses inbound chat
//! updates into dispatch calls on the [`SessionEngine`], renders engine
//! events back into chat messages, and owns every user-facing text template
//! (including the static music list, which never reaches the core).

mod handler;
mod notifier;
pub mod texts;

pub use notifier::TelegramNotifier;
pub use texts::MessageFormat;

use std::time::Duration;

use teloxide::prelude::*;
use tracing::info;

use crate::engine::SessionEngine;

/// Run the long-polling update loop until shutdown.
pub async fn run(bot: Bot, engine: SessionEngine) {
    let message_handler = Update::filter_message().endpoint({
        let engine = engine.clone();
        move |bot: Bot, msg: Message| {
            let engine = engine.clone();
            async move {
                handler::handle_message(&engine, &bot, &msg).await;
                respond(())
            }
        }
    });

    let mut dispatcher = Dispatcher::builder(bot.clone(), message_handler).build();

    // Long polling timeout stays below the HTTP client's own timeout
    let polling = teloxide::update_listeners::Polling::builder(bot)
        .timeout(Duration::from_secs(30))
        .build();

    info!("telegram transport started");
    dispatcher
        .dispatch_with_listener(
            polling,
            teloxide::error_handlers::LoggingErrorHandler::with_custom_text(
                "Telegram polling error (will retry)",
            ),
        )
        .await;
    info!("telegram transport stopped");
}
