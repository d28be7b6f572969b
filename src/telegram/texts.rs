//! User-facing message templates.
//!
//! Everything the bot ever says lives here, including the rendering of
//! engine events. The core never sees these strings.

use std::time::Duration;

use crate::engine::{MAX_ROUNDS, MIN_ROUNDS};
use crate::notify::SessionEvent;

/// How a message should be delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageFormat {
    /// Plain text.
    Plain,
    /// HTML markup (links in the music list).
    Html,
}

/// Greeting for /start.
pub const START_TEXT: &str = "Hi! I'm here to help you focus 🍅\n\n\
Send /runpomodoro to start a series of focus timers. After each 25-minute \
work round, you'll get a 5-minute break.\n\n\
If you need help, type /help.";

/// Command list for /help.
pub const HELP_TEXT: &str = "What I can do:\n\n\
/runpomodoro — start a focus timer session\n\
/stop — stop the current session\n\
/status — check the status of the current session\n\
/music — get background music suggestions";

/// Static link list for /music.
pub const MUSIC_HTML: &str = "Here's a list of background music recommendations:\n\n\
<a href=\"https://youtu.be/t3LCXpKI9K0?si=27yfd61dEv82lgVj\">Redwood Resonance</a>\n\
<a href=\"https://youtu.be/wIBnaNuhuCQ?si=dTYX0vD-3ZLqUi7e\">ASMR New York Library</a>\n\
<a href=\"https://youtu.be/ecechHEtkYU?si=uzsf6K7IV7WKvtVl\">quiet mornings, slowly waking up to the smell of fresh coffee</a>\n\
<a href=\"https://youtu.be/tFAjJsqdO_A?si=cpy3BS__3J9-6Fjz\">Harry Potter Chill Music ~ Hogwarts Library</a>";

/// Reply for unrecognized commands.
pub const UNKNOWN_COMMAND: &str = "Unknown command.";

/// Render an engine event to message text and format.
pub fn render(event: &SessionEvent) -> (String, MessageFormat) {
    let text = match event {
        SessionEvent::RoundPrompt => format!(
            "How many rounds would you like to do? Enter a number from {MIN_ROUNDS} to {MAX_ROUNDS}:"
        ),
        SessionEvent::AlreadyRunning => {
            "You already have an active session. Send /stop if you want to start over.".to_string()
        }
        SessionEvent::InvalidRoundCount { .. } => {
            format!("Please enter a number between {MIN_ROUNDS} and {MAX_ROUNDS}.")
        }
        SessionEvent::WorkStarted { round, duration } => {
            format!("Round {round}: time to focus for {}!", phase_length(*duration))
        }
        SessionEvent::BreakStarted { duration } => {
            format!("⏰ Break time! Take {} to rest.", phase_length(*duration))
        }
        SessionEvent::RoundResumed { round } => {
            format!("🔔 Break is over. Starting round {round}!")
        }
        SessionEvent::AllRoundsComplete => "🎉 All rounds are complete! Great job!".to_string(),
        SessionEvent::Status {
            phase,
            round,
            total,
            remaining,
        } => format!(
            "📊 Round {round} of {total}\nPhase: {phase}\nTime remaining: {}",
            format_duration(*remaining)
        ),
        SessionEvent::StatusAwaitingInput => format!(
            "No rounds chosen yet. Enter a number from {MIN_ROUNDS} to {MAX_ROUNDS} to begin."
        ),
        SessionEvent::NoActiveSession => "No active session.".to_string(),
        SessionEvent::Stopped => "⏹ Session stopped.".to_string(),
    };

    (text, MessageFormat::Plain)
}

/// Describe a phase length, e.g. "25 minutes" or "90 seconds".
fn phase_length(duration: Duration) -> String {
    let secs = duration.as_secs();
    if secs >= 60 && secs % 60 == 0 {
        let minutes = secs / 60;
        if minutes == 1 {
            "1 minute".to_string()
        } else {
            format!("{minutes} minutes")
        }
    } else {
        format!("{secs} seconds")
    }
}

/// Format a remaining duration as "24m 59s" / "45s", rounded to seconds.
fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();
    let minutes = secs / 60;
    let seconds = secs % 60;
    if minutes > 0 {
        format!("{minutes}m {seconds:02}s")
    } else {
        format!("{seconds}s")
    }
}
