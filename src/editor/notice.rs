//! Transient status notices.

use std::time::{Duration, Instant};

use crate::constants::NOTICE_TTL_MS;

/// Severity of a notice, used for styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    /// Confirmation of a completed action
    Info,
    /// A rejected action
    Error,
}

/// A short message that clears itself after [`NOTICE_TTL_MS`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// Message text
    pub text: String,
    /// Severity
    pub kind: NoticeKind,
    expires_at: Instant,
}

impl Notice {
    /// Creates a notice that expires one TTL after `now`.
    pub fn new(text: impl Into<String>, kind: NoticeKind, now: Instant) -> Self {
        Self {
            text: text.into(),
            kind,
            expires_at: now + Duration::from_millis(NOTICE_TTL_MS),
        }
    }

    /// Whether the notice should still be shown at `now`.
    #[must_use]
    pub fn is_active(&self, now: Instant) -> bool {
        now < self.expires_at
    }
}
