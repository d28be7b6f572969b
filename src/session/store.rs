//! Session storage and management.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Instant;

use tokio::task::AbortHandle;

use super::{Phase, UserId};

/// A focus session.
///
/// `current_round` and `total_rounds` are meaningful only once the round
/// count has been supplied; while the phase is `AwaitingInput` both are zero
/// and no timer is armed.
#[derive(Debug)]
pub struct Session {
    /// Current phase.
    pub phase: Phase,
    /// 1-indexed round currently running.
    pub current_round: u32,
    /// Number of rounds this session runs, fixed at start.
    pub total_rounds: u32,
    /// Start of the current timed phase.
    pub started_at: Instant,
    /// Handle to the pending phase timer, if one is armed.
    pub timer: Option<AbortHandle>,
}

impl Session {
    /// Create a session that is waiting for its round count.
    pub fn awaiting_input() -> Self {
        Self {
            phase: Phase::AwaitingInput,
            current_round: 0,
            total_rounds: 0,
            started_at: Instant::now(),
            timer: None,
        }
    }
}

impl Clone for Session {
    fn clone(&self) -> Self {
        Self {
            phase: self.phase,
            current_round: self.current_round,
            total_rounds: self.total_rounds,
            started_at: self.started_at,
            // Clones refer to the same spawned timer task
            timer: self.timer.clone(),
        }
    }
}

/// Thread-safe storage for sessions, keyed by user.
///
/// A single lock guards the whole mapping; per-user operations are linearized
/// by it. Multi-step transitions (get, mutate, set) are NOT atomic across
/// calls, see the engine docs.
pub struct SessionStore {
    sessions: Mutex<HashMap<UserId, Session>>,
}

impl SessionStore {
    /// Create a new empty session store.
    pub fn new() -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
        }
    }

    fn locked(&self) -> MutexGuard<'_, HashMap<UserId, Session>> {
        // Sessions are plain data; a panic mid-update cannot leave an entry
        // torn, so a poisoned lock is still safe to reuse.
        self.sessions.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Get a clone of the user's session, if one exists.
    pub fn get(&self, user: UserId) -> Option<Session> {
        self.locked().get(&user).cloned()
    }

    /// Insert or replace the user's session. Last writer wins.
    pub fn set(&self, user: UserId, session: Session) {
        self.locked().insert(user, session);
    }

    /// Remove the user's session. No-op if absent.
    pub fn delete(&self, user: UserId) {
        self.locked().remove(&user);
    }

    /// Check if a session exists for the user.
    pub fn contains(&self, user: UserId) -> bool {
        self.locked().contains_key(&user)
    }

    /// Get the number of sessions in the store.
    pub fn count(&self) -> usize {
        self.locked().len()
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}
