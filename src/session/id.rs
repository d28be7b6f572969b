//! User identifier type.

use std::fmt;

/// Identifies the user a session belongs to.
///
/// The value is the transport's 64-bit chat identifier; focusbot never
/// generates these itself, it only keys sessions by them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserId(i64);

impl UserId {
    /// Wrap a raw chat identifier.
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// Get the raw i64 value.
    pub const fn as_i64(&self) -> i64 {
        self.0
    }
}

impl From<i64> for UserId {
    fn from(raw: i64) -> Self {
        Self(raw)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
