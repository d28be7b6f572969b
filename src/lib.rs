//! # focusbot
//!
//! Telegram bot that runs timed focus/break cycles per chat.
//!
//! Each user gets an independent session: pick a round count, work for 25
//! minutes, rest for 5, repeat. The state machine lives in this crate's
//! core; Telegram is just the transport bolted onto its notification seam.
//!
//! ## Features
//!
//! - **Concurrent sessions**: One lock-guarded registry, any number of users
//! - **Timer-driven phases**: Fire-once deferred tasks advance each session
//! - **Transport-agnostic core**: The engine emits typed events through the
//!   [`Notifier`] trait and never renders text itself
//! - **Drift-free status**: Remaining time is computed from the phase start,
//!   not counted down
//!
//! ## Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use focusbot::{Notifier, SessionEngine, SessionEvent, SessionStore, UserId};
//!
//! struct Stdout;
//!
//! #[async_trait::async_trait]
//! impl Notifier for Stdout {
//!     async fn notify(&self, user: UserId, event: SessionEvent) {
//!         println!("{user}: {event:?}");
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let store = Arc::new(SessionStore::new());
//!     let engine = SessionEngine::new(store, Arc::new(Stdout));
//!     let user = UserId::new(1);
//!
//!     engine.on_start_request(user).await;
//!     engine.on_round_input(user, "4").await;
//! }
//! ```

pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod logging;
pub mod notify;
pub mod session;
pub mod telegram;

// Re-export commonly used types
pub use engine::{PhaseTiming, SessionEngine, DEFAULT_BREAK, DEFAULT_WORK, MAX_ROUNDS, MIN_ROUNDS};
pub use error::{FocusError, Result};
pub use notify::{Notifier, SessionEvent};
pub use session::{Phase, Session, SessionStore, UserId};
pub use telegram::TelegramNotifier;
