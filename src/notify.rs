//! Outbound notification sink.
//!
//! The engine never talks to a chat platform directly. Every user-facing
//! outcome is emitted as a [`SessionEvent`] through the [`Notifier`] trait;
//! the transport renders events to text and owns delivery. A failed delivery
//! is the transport's problem to log — by the time an event is emitted the
//! state transition that produced it has already committed.

use std::time::Duration;

use async_trait::async_trait;

use crate::session::{Phase, UserId};

/// Events the engine emits toward the user.
///
/// Timed-phase events carry their duration so renderers never need to know
/// the engine's configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// A new session wants its round count.
    RoundPrompt,
    /// Start was requested while a timer is already armed.
    AlreadyRunning,
    /// Round-count input did not parse to an integer in range.
    InvalidRoundCount { input: String },
    /// A work round began.
    WorkStarted { round: u32, duration: Duration },
    /// A work round ended; the break began.
    BreakStarted { duration: Duration },
    /// A break ended and the next round is starting.
    RoundResumed { round: u32 },
    /// The last break ended; the session is complete.
    AllRoundsComplete,
    /// Status of a session in a timed phase.
    Status {
        phase: Phase,
        round: u32,
        total: u32,
        remaining: Duration,
    },
    /// Status of a session still waiting for its round count.
    StatusAwaitingInput,
    /// Status or stop was requested with no session present.
    NoActiveSession,
    /// The session was stopped on request.
    Stopped,
}

/// One-way notification sink the engine emits through.
///
/// Implementations must not surface delivery failures to the caller; log and
/// move on.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, user: UserId, event: SessionEvent);
}
