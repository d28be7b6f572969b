//! Inbound message handling and command routing.

use teloxide::prelude::*;
use tracing::debug;

use crate::engine::SessionEngine;
use crate::session::UserId;

use super::notifier::send;
use super::texts::{self, MessageFormat};

/// Route one inbound message.
///
/// Commands either get a canned reply here or become engine dispatch calls;
/// any other text is offered to the engine as round-count input, which
/// ignores it unless a session is waiting for a number.
pub(super) async fn handle_message(engine: &SessionEngine, bot: &Bot, msg: &Message) {
    let Some(text) = msg.text() else {
        debug!("ignoring message without text");
        return;
    };
    let user = UserId::new(msg.chat.id.0);

    let Some(command) = parse_command(text) else {
        engine.on_round_input(user, text).await;
        return;
    };

    match command {
        "start" => send(bot, user, texts::START_TEXT, MessageFormat::Plain).await,
        "help" => send(bot, user, texts::HELP_TEXT, MessageFormat::Plain).await,
        "music" => send(bot, user, texts::MUSIC_HTML, MessageFormat::Html).await,
        "runpomodoro" => engine.on_start_request(user).await,
        "stop" => engine.on_stop_request(user).await,
        "status" => engine.on_status_request(user).await,
        _ => send(bot, user, texts::UNKNOWN_COMMAND, MessageFormat::Plain).await,
    }
}

/// Extract the command name from a message, if it is a command.
///
/// Accepts the `/cmd@botname` form Telegram sends in group chats; arguments
/// after the command are ignored.
fn parse_command(text: &str) -> Option<&str> {
    let first = text.split_whitespace().next()?;
    let command = first.strip_prefix('/')?;
    if command.is_empty() {
        return None;
    }
    Some(command.split('@').next().unwrap_or(command))
}
