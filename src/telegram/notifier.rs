//! Engine-to-Telegram notification delivery.

use async_trait::async_trait;
use teloxide::prelude::*;
use teloxide::types::ParseMode;
use tracing::warn;

use crate::notify::{Notifier, SessionEvent};
use crate::session::UserId;

use super::texts::{self, MessageFormat};

/// Delivers engine events to the user's Telegram chat.
pub struct TelegramNotifier {
    bot: Bot,
}

impl TelegramNotifier {
    /// Create a notifier sending through the given bot.
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    async fn notify(&self, user: UserId, event: SessionEvent) {
        let (text, format) = texts::render(&event);
        send(&self.bot, user, &text, format).await;
    }
}

/// Send a message, logging delivery failures instead of surfacing them.
///
/// The state transition that produced the message has already committed;
/// a failed send must not block or revert it.
pub(super) async fn send(bot: &Bot, user: UserId, text: &str, format: MessageFormat) {
    let mut request = bot.send_message(ChatId(user.as_i64()), text);
    if format == MessageFormat::Html {
        request = request.parse_mode(ParseMode::Html);
    }

    if let Err(e) = request.await {
        warn!(user = %user, error = %e, "failed to deliver notification");
    }
}
