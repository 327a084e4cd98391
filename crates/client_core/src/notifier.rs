//! Transient success/error banner shown after an action completes.

use std::time::{Duration, Instant};

pub const DEFAULT_MESSAGE_DISPLAY: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusSeverity {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub severity: StatusSeverity,
}

impl StatusMessage {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            severity: StatusSeverity::Success,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            severity: StatusSeverity::Error,
        }
    }
}

#[derive(Debug, Clone)]
struct ShownMessage {
    message: StatusMessage,
    /// `None` when the display window does not fit in an `Instant`; such a
    /// message stays until replaced or dismissed.
    hide_at: Option<Instant>,
}

impl ShownMessage {
    fn expired(&self, now: Instant) -> bool {
        self.hide_at.is_some_and(|hide_at| now >= hide_at)
    }
}

/// Holds at most one message and one hide deadline. Showing a message
/// replaces both, so an older message can never hide a newer one.
#[derive(Debug, Clone)]
pub struct StatusNotifier {
    display_for: Duration,
    shown: Option<ShownMessage>,
}

impl Default for StatusNotifier {
    fn default() -> Self {
        Self::new(DEFAULT_MESSAGE_DISPLAY)
    }
}

impl StatusNotifier {
    pub fn new(display_for: Duration) -> Self {
        Self {
            display_for,
            shown: None,
        }
    }

    pub fn show(&mut self, message: StatusMessage, now: Instant) {
        self.shown = Some(ShownMessage {
            message,
            hide_at: now.checked_add(self.display_for),
        });
    }

    /// The message still inside its display window at `now`.
    pub fn visible(&self, now: Instant) -> Option<&StatusMessage> {
        self.shown
            .as_ref()
            .filter(|shown| !shown.expired(now))
            .map(|shown| &shown.message)
    }

    /// The most recent message regardless of its display window.
    pub fn last(&self) -> Option<&StatusMessage> {
        self.shown.as_ref().map(|shown| &shown.message)
    }

    /// Drops the message once its deadline has passed. Returns true when a
    /// message was hidden by this call.
    pub fn expire(&mut self, now: Instant) -> bool {
        match &self.shown {
            Some(shown) if shown.expired(now) => {
                self.shown = None;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_is_visible_until_display_window_elapses() {
        let start = Instant::now();
        let mut notifier = StatusNotifier::default();
        notifier.show(StatusMessage::success("Signed up a@x.com for Chess Club"), start);

        let later = start + Duration::from_millis(4_999);
        assert_eq!(
            notifier.visible(later).map(|m| m.text.as_str()),
            Some("Signed up a@x.com for Chess Club")
        );
        assert!(!notifier.expire(later));

        let deadline = start + Duration::from_secs(5);
        assert!(notifier.visible(deadline).is_none());
        assert!(notifier.expire(deadline));
        assert!(notifier.last().is_none());
    }

    #[test]
    fn newer_message_restarts_the_window() {
        let start = Instant::now();
        let mut notifier = StatusNotifier::default();
        notifier.show(StatusMessage::success("first"), start);

        let second_at = start + Duration::from_secs(3);
        notifier.show(StatusMessage::error("second"), second_at);

        // The first message's deadline passes without hiding the second one.
        let first_deadline = start + Duration::from_secs(5);
        assert!(!notifier.expire(first_deadline));
        let visible = notifier.visible(first_deadline).expect("still visible");
        assert_eq!(visible.text, "second");
        assert_eq!(visible.severity, StatusSeverity::Error);

        assert!(notifier.expire(second_at + Duration::from_secs(5)));
    }

    #[test]
    fn oversized_display_window_keeps_message_until_replaced() {
        let start = Instant::now();
        let mut notifier = StatusNotifier::new(Duration::from_secs(u64::MAX));
        notifier.show(StatusMessage::error("Failed to sign up. Please try again."), start);

        let much_later = start + Duration::from_secs(365 * 24 * 60 * 60);
        assert!(!notifier.expire(much_later));
        assert_eq!(
            notifier.visible(much_later).map(|m| m.text.as_str()),
            Some("Failed to sign up. Please try again.")
        );

        notifier.show(StatusMessage::success("replaced"), much_later);
        assert_eq!(notifier.last().map(|m| m.text.as_str()), Some("replaced"));
    }

    #[test]
    fn last_ignores_the_display_window() {
        let start = Instant::now();
        let mut notifier = StatusNotifier::new(Duration::ZERO);
        notifier.show(StatusMessage::error("Student already signed up"), start);

        assert!(notifier.visible(start).is_none());
        let last = notifier.last().expect("last message");
        assert_eq!(last.text, "Student already signed up");
        assert_eq!(last.severity, StatusSeverity::Error);
    }
}
