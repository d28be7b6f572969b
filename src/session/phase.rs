//! Session phase state machine.

use std::fmt;

/// The activity segment a session is currently in.
///
/// There is no terminal variant: a session that finished its last round is
/// simply removed from the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// Session has been created and is waiting for a round count.
    #[default]
    AwaitingInput,
    /// A work round is running.
    Working,
    /// A break between rounds is running.
    OnBreak,
}

impl Phase {
    /// Check if transition to target phase is valid.
    ///
    /// Valid transitions:
    /// - AwaitingInput -> Working
    /// - Working -> OnBreak
    /// - OnBreak -> Working
    pub fn can_transition_to(&self, target: Phase) -> bool {
        use Phase::*;
        matches!(
            (*self, target),
            (AwaitingInput, Working) | (Working, OnBreak) | (OnBreak, Working)
        )
    }

    /// Check if the session is waiting for a round count.
    pub fn is_awaiting_input(&self) -> bool {
        matches!(self, Phase::AwaitingInput)
    }

    /// Check if the phase runs on a timer.
    pub fn is_timed(&self) -> bool {
        matches!(self, Phase::Working | Phase::OnBreak)
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::AwaitingInput => "waiting for input",
            Phase::Working => "work",
            Phase::OnBreak => "break",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_transitions() {
        assert!(Phase::AwaitingInput.can_transition_to(Phase::Working));
        assert!(Phase::Working.can_transition_to(Phase::OnBreak));
        assert!(Phase::OnBreak.can_transition_to(Phase::Working));
    }

    #[test]
    fn test_invalid_transitions() {
        // A break never starts before the first work round
        assert!(!Phase::AwaitingInput.can_transition_to(Phase::OnBreak));
        // Phases never loop back to input collection
        assert!(!Phase::Working.can_transition_to(Phase::AwaitingInput));
        assert!(!Phase::OnBreak.can_transition_to(Phase::AwaitingInput));
        // No self transitions
        assert!(!Phase::Working.can_transition_to(Phase::Working));
    }

    #[test]
    fn test_is_timed() {
        assert!(!Phase::AwaitingInput.is_timed());
        assert!(Phase::Working.is_timed());
        assert!(Phase::OnBreak.is_timed());
    }

    #[test]
    fn test_display() {
        assert_eq!(Phase::Working.to_string(), "work");
        assert_eq!(Phase::OnBreak.to_string(), "break");
        assert_eq!(Phase::AwaitingInput.to_string(), "waiting for input");
    }

    #[test]
    fn test_default() {
        assert_eq!(Phase::default(), Phase::AwaitingInput);
    }
}
