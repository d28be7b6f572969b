//! The session engine: per-user focus/break state machine.
//!
//! Inbound chat events and timer firings are two producers of the same kind
//! of transition. Both go through the [`SessionStore`]: read the session,
//! mutate the copy, write it back. That sequence is not atomic across store
//! calls — a stop request can race a timer that has already fired, in which
//! case the last writer wins at the store. The pending timer is cancelled
//! best-effort on stop; cancellation only prevents a firing that has not
//! started yet.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::debug;

use crate::error::FocusError;
use crate::notify::{Notifier, SessionEvent};
use crate::session::{Phase, Session, SessionStore, UserId};

/// Smallest accepted round count.
pub const MIN_ROUNDS: u32 = 1;
/// Largest accepted round count.
pub const MAX_ROUNDS: u32 = 10;
/// Default work phase duration.
pub const DEFAULT_WORK: Duration = Duration::from_secs(25 * 60);
/// Default break phase duration.
pub const DEFAULT_BREAK: Duration = Duration::from_secs(5 * 60);

/// Phase durations the engine runs with.
///
/// Process-wide, never per-session.
#[derive(Debug, Clone, Copy)]
pub struct PhaseTiming {
    /// Work phase duration.
    pub work: Duration,
    /// Break phase duration.
    pub rest: Duration,
}

impl Default for PhaseTiming {
    fn default() -> Self {
        Self {
            work: DEFAULT_WORK,
            rest: DEFAULT_BREAK,
        }
    }
}

/// Drives every user's session through its phases.
///
/// Cheap to clone; clones share the same store and sink. Timer callbacks
/// capture a clone and re-enter the engine when they fire.
#[derive(Clone)]
pub struct SessionEngine {
    store: Arc<SessionStore>,
    notifier: Arc<dyn Notifier>,
    timing: PhaseTiming,
}

impl SessionEngine {
    /// Create an engine with the default 25/5 minute timing.
    pub fn new(store: Arc<SessionStore>, notifier: Arc<dyn Notifier>) -> Self {
        Self::with_timing(store, notifier, PhaseTiming::default())
    }

    /// Create an engine with custom phase durations.
    pub fn with_timing(
        store: Arc<SessionStore>,
        notifier: Arc<dyn Notifier>,
        timing: PhaseTiming,
    ) -> Self {
        Self {
            store,
            notifier,
            timing,
        }
    }

    /// Handle a start request.
    ///
    /// Rejected while a timer is armed; otherwise any leftover session is
    /// replaced and the user is prompted for a round count.
    pub async fn on_start_request(&self, user: UserId) {
        if let Some(session) = self.store.get(user) {
            if session.timer.is_some() {
                self.notifier.notify(user, SessionEvent::AlreadyRunning).await;
                return;
            }
        }

        debug!(user = %user, "session created, awaiting round count");
        self.store.set(user, Session::awaiting_input());
        self.notifier.notify(user, SessionEvent::RoundPrompt).await;
    }

    /// Handle free-form text while a session awaits its round count.
    ///
    /// Ignored silently unless the user's session is in `AwaitingInput`; the
    /// engine only listens for numbers in that one phase.
    pub async fn on_round_input(&self, user: UserId, text: &str) {
        let Some(mut session) = self.store.get(user) else {
            return;
        };
        if !session.phase.is_awaiting_input() {
            return;
        }

        let rounds = match parse_round_count(text) {
            Ok(n) => n,
            Err(_) => {
                self.notifier
                    .notify(user, SessionEvent::InvalidRoundCount { input: text.to_string() })
                    .await;
                return;
            }
        };

        session.total_rounds = rounds;
        session.current_round = 1;
        self.store.set(user, session);

        debug!(user = %user, rounds, "round count accepted");
        self.start_work_phase(user).await;
    }

    /// Handle a status request.
    pub async fn on_status_request(&self, user: UserId) {
        let Some(session) = self.store.get(user) else {
            self.notifier.notify(user, SessionEvent::NoActiveSession).await;
            return;
        };

        let event = match session.phase {
            Phase::AwaitingInput => SessionEvent::StatusAwaitingInput,
            phase => SessionEvent::Status {
                phase,
                round: session.current_round,
                total: session.total_rounds,
                remaining: remaining(self.phase_duration(phase), session.started_at.elapsed()),
            },
        };
        self.notifier.notify(user, event).await;
    }

    /// Handle a stop request.
    ///
    /// Cancels the pending timer best-effort and removes the session. A timer
    /// firing that is already in flight is not undone.
    pub async fn on_stop_request(&self, user: UserId) {
        let Some(session) = self.store.get(user) else {
            self.notifier.notify(user, SessionEvent::NoActiveSession).await;
            return;
        };

        if let Some(timer) = &session.timer {
            timer.abort();
        }
        self.store.delete(user);

        debug!(user = %user, "session stopped");
        self.notifier.notify(user, SessionEvent::Stopped).await;
    }

    /// Enter the work phase for the session's current round.
    async fn start_work_phase(&self, user: UserId) {
        let Some(mut session) = self.store.get(user) else {
            return;
        };
        debug_assert!(session.phase.can_transition_to(Phase::Working));

        session.phase = Phase::Working;
        session.started_at = Instant::now();

        self.notifier
            .notify(
                user,
                SessionEvent::WorkStarted {
                    round: session.current_round,
                    duration: self.timing.work,
                },
            )
            .await;

        let engine = self.clone();
        let timer = tokio::spawn(async move {
            tokio::time::sleep(engine.timing.work).await;
            engine.on_work_elapsed(user).await;
        });
        session.timer = Some(timer.abort_handle());
        self.store.set(user, session);
    }

    /// The work timer fired: announce the break and enter it.
    ///
    /// Boxed to erase the opaque future type; the work/break handlers form an
    /// async cycle whose `Send`-ness the compiler cannot otherwise resolve.
    fn on_work_elapsed(&self, user: UserId) -> Pin<Box<dyn Future<Output = ()> + Send + '_>> {
        Box::pin(async move {
            self.notifier
                .notify(user, SessionEvent::BreakStarted { duration: self.timing.rest })
                .await;
            self.start_break_phase(user).await;
        })
    }

    /// Enter the break phase.
    async fn start_break_phase(&self, user: UserId) {
        let Some(mut session) = self.store.get(user) else {
            return;
        };
        debug_assert!(session.phase.can_transition_to(Phase::OnBreak));

        session.phase = Phase::OnBreak;
        session.started_at = Instant::now();

        let engine = self.clone();
        let timer = tokio::spawn(async move {
            tokio::time::sleep(engine.timing.rest).await;
            engine.on_break_elapsed(user).await;
        });
        session.timer = Some(timer.abort_handle());
        self.store.set(user, session);
    }

    /// The break timer fired: advance the round counter, loop or finish.
    ///
    /// Boxed to erase the opaque future type; the work/break handlers form an
    /// async cycle whose `Send`-ness the compiler cannot otherwise resolve.
    fn on_break_elapsed(&self, user: UserId) -> Pin<Box<dyn Future<Output = ()> + Send + '_>> {
        Box::pin(async move {
            let Some(mut session) = self.store.get(user) else {
                return;
            };

            session.current_round += 1;

            if session.current_round > session.total_rounds {
                debug!(user = %user, rounds = session.total_rounds, "session complete");
                self.notifier.notify(user, SessionEvent::AllRoundsComplete).await;
                self.store.delete(user);
                return;
            }

            let round = session.current_round;
            self.store.set(user, session);

            self.notifier.notify(user, SessionEvent::RoundResumed { round }).await;
            self.start_work_phase(user).await;
        })
    }

    fn phase_duration(&self, phase: Phase) -> Duration {
        match phase {
            Phase::OnBreak => self.timing.rest,
            // AwaitingInput never reaches here; status handles it separately
            _ => self.timing.work,
        }
    }
}

/// Parse a round-count reply.
fn parse_round_count(text: &str) -> Result<u32, FocusError> {
    let n: u32 = text
        .trim()
        .parse()
        .map_err(|_| FocusError::InvalidRoundCount(text.to_string()))?;

    if !(MIN_ROUNDS..=MAX_ROUNDS).contains(&n) {
        return Err(FocusError::InvalidRoundCount(text.to_string()));
    }
    Ok(n)
}

/// Time left in the current phase, clamped to zero.
///
/// Elapsed time can exceed the phase duration when a callback is delivered
/// late; the user must never see a negative remainder.
fn remaining(duration: Duration, elapsed: Duration) -> Duration {
    duration.saturating_sub(elapsed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Notifier that records every event for later assertions.
    #[derive(Default)]
    struct Recorder {
        events: Mutex<Vec<(UserId, SessionEvent)>>,
    }

    impl Recorder {
        fn events_for(&self, user: UserId) -> Vec<SessionEvent> {
            self.events
                .lock()
                .unwrap()
                .iter()
                .filter(|(u, _)| *u == user)
                .map(|(_, e)| e.clone())
                .collect()
        }

        fn last(&self, user: UserId) -> Option<SessionEvent> {
            self.events_for(user).pop()
        }
    }

    #[async_trait]
    impl Notifier for Recorder {
        async fn notify(&self, user: UserId, event: SessionEvent) {
            self.events.lock().unwrap().push((user, event));
        }
    }

    /// Timing long enough that no timer fires during a unit test.
    fn slow_timing() -> PhaseTiming {
        PhaseTiming {
            work: Duration::from_secs(600),
            rest: Duration::from_secs(600),
        }
    }

    fn engine() -> (SessionEngine, Arc<SessionStore>, Arc<Recorder>) {
        let store = Arc::new(SessionStore::new());
        let recorder = Arc::new(Recorder::default());
        let engine = SessionEngine::with_timing(
            Arc::clone(&store),
            Arc::clone(&recorder) as Arc<dyn Notifier>,
            slow_timing(),
        );
        (engine, store, recorder)
    }

    const USER: UserId = UserId::new(100);

    #[test]
    fn test_parse_round_count_accepts_range() {
        for n in MIN_ROUNDS..=MAX_ROUNDS {
            assert_eq!(parse_round_count(&n.to_string()).unwrap(), n);
        }
        // Surrounding whitespace is fine
        assert_eq!(parse_round_count(" 3 ").unwrap(), 3);
    }

    #[test]
    fn test_parse_round_count_rejects() {
        for input in ["0", "11", "abc", "", "2.5", "-1", "1e1"] {
            assert!(
                parse_round_count(input).is_err(),
                "expected rejection for {input:?}"
            );
        }
    }

    #[test]
    fn test_remaining_clamps_to_zero() {
        let total = Duration::from_secs(60);
        assert_eq!(
            remaining(total, Duration::from_secs(10)),
            Duration::from_secs(50)
        );
        assert_eq!(remaining(total, Duration::from_secs(60)), Duration::ZERO);
        assert_eq!(remaining(total, Duration::from_secs(90)), Duration::ZERO);
    }

    #[tokio::test]
    async fn test_start_creates_awaiting_session() {
        let (engine, store, recorder) = engine();

        engine.on_start_request(USER).await;

        let session = store.get(USER).unwrap();
        assert_eq!(session.phase, Phase::AwaitingInput);
        assert!(session.timer.is_none());
        assert_eq!(recorder.last(USER), Some(SessionEvent::RoundPrompt));
    }

    #[tokio::test]
    async fn test_start_rejected_while_timer_armed() {
        let (engine, store, recorder) = engine();

        engine.on_start_request(USER).await;
        engine.on_round_input(USER, "3").await;

        engine.on_start_request(USER).await;

        assert_eq!(recorder.last(USER), Some(SessionEvent::AlreadyRunning));
        // State untouched
        let session = store.get(USER).unwrap();
        assert_eq!(session.phase, Phase::Working);
        assert_eq!(session.total_rounds, 3);
    }

    #[tokio::test]
    async fn test_start_replaces_awaiting_session() {
        let (engine, store, recorder) = engine();

        engine.on_start_request(USER).await;
        engine.on_start_request(USER).await;

        assert_eq!(store.count(), 1);
        assert_eq!(
            recorder.events_for(USER),
            vec![SessionEvent::RoundPrompt, SessionEvent::RoundPrompt]
        );
    }

    #[tokio::test]
    async fn test_valid_round_input_starts_work() {
        for n in MIN_ROUNDS..=MAX_ROUNDS {
            let (engine, store, recorder) = engine();

            engine.on_start_request(USER).await;
            engine.on_round_input(USER, &n.to_string()).await;

            let session = store.get(USER).unwrap();
            assert_eq!(session.phase, Phase::Working);
            assert_eq!(session.current_round, 1);
            assert_eq!(session.total_rounds, n);
            assert!(session.timer.is_some());
            assert_eq!(
                recorder.last(USER),
                Some(SessionEvent::WorkStarted {
                    round: 1,
                    duration: slow_timing().work
                })
            );
        }
    }

    #[tokio::test]
    async fn test_invalid_round_input_keeps_state() {
        let (engine, store, recorder) = engine();

        engine.on_start_request(USER).await;

        for input in ["0", "11", "abc", ""] {
            engine.on_round_input(USER, input).await;

            let session = store.get(USER).unwrap();
            assert_eq!(session.phase, Phase::AwaitingInput);
            assert!(session.timer.is_none());
            assert_eq!(
                recorder.last(USER),
                Some(SessionEvent::InvalidRoundCount {
                    input: input.to_string()
                })
            );
        }
    }

    #[tokio::test]
    async fn test_round_input_ignored_outside_awaiting() {
        let (engine, store, recorder) = engine();

        engine.on_start_request(USER).await;
        engine.on_round_input(USER, "2").await;
        let before = recorder.events_for(USER).len();

        engine.on_round_input(USER, "5").await;

        let session = store.get(USER).unwrap();
        assert_eq!(session.total_rounds, 2);
        assert!(session.timer.is_some());
        assert_eq!(recorder.events_for(USER).len(), before);
    }

    #[tokio::test]
    async fn test_round_input_without_session_ignored() {
        let (engine, _store, recorder) = engine();

        engine.on_round_input(USER, "3").await;

        assert!(recorder.events_for(USER).is_empty());
    }

    #[tokio::test]
    async fn test_status_without_session() {
        let (engine, _store, recorder) = engine();

        engine.on_status_request(USER).await;

        assert_eq!(recorder.last(USER), Some(SessionEvent::NoActiveSession));
    }

    #[tokio::test]
    async fn test_status_while_awaiting_input() {
        let (engine, _store, recorder) = engine();

        engine.on_start_request(USER).await;
        engine.on_status_request(USER).await;

        assert_eq!(recorder.last(USER), Some(SessionEvent::StatusAwaitingInput));
    }

    #[tokio::test]
    async fn test_status_reports_remaining_work_time() {
        let (engine, _store, recorder) = engine();

        engine.on_start_request(USER).await;
        engine.on_round_input(USER, "4").await;
        engine.on_status_request(USER).await;

        match recorder.last(USER) {
            Some(SessionEvent::Status {
                phase,
                round,
                total,
                remaining,
            }) => {
                assert_eq!(phase, Phase::Working);
                assert_eq!(round, 1);
                assert_eq!(total, 4);
                assert!(remaining <= slow_timing().work);
                assert!(remaining > Duration::ZERO);
            }
            other => panic!("expected status event, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_stop_awaiting_session() {
        let (engine, store, recorder) = engine();

        engine.on_start_request(USER).await;
        engine.on_stop_request(USER).await;

        assert!(!store.contains(USER));
        assert_eq!(recorder.last(USER), Some(SessionEvent::Stopped));
    }

    #[tokio::test]
    async fn test_stop_twice_reports_missing() {
        let (engine, _store, recorder) = engine();

        engine.on_start_request(USER).await;
        engine.on_round_input(USER, "1").await;
        engine.on_stop_request(USER).await;
        engine.on_stop_request(USER).await;

        assert_eq!(recorder.last(USER), Some(SessionEvent::NoActiveSession));
    }

    #[tokio::test]
    async fn test_users_are_isolated() {
        let (engine, store, recorder) = engine();
        let other = UserId::new(200);

        engine.on_start_request(USER).await;
        engine.on_round_input(USER, "3").await;
        engine.on_start_request(other).await;
        engine.on_stop_request(other).await;

        let session = store.get(USER).unwrap();
        assert_eq!(session.phase, Phase::Working);
        assert_eq!(recorder.last(other), Some(SessionEvent::Stopped));
    }
}
