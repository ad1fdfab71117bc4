//! Outcome banner shown under the form.

use std::time::{Duration, Instant};

/// How long a banner stays up.
pub const FEEDBACK_TTL: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feedback {
    pub text: String,
    pub tone: Tone,
}

impl Feedback {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tone: Tone::Success,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tone: Tone::Error,
        }
    }
}

/// Holds the latest banner and when it was shown.
///
/// A newer banner replaces the old one and restarts the timer.
#[derive(Debug, Default)]
pub struct FeedbackDisplay {
    current: Option<(Feedback, Instant)>,
}

impl FeedbackDisplay {
    pub fn show(&mut self, feedback: Feedback) {
        self.show_at(feedback, Instant::now());
    }

    pub fn show_at(&mut self, feedback: Feedback, at: Instant) {
        self.current = Some((feedback, at));
    }

    /// The banner visible at `now`, if it has not yet expired.
    pub fn visible_at(&self, now: Instant) -> Option<&Feedback> {
        self.current
            .as_ref()
            .filter(|(_, shown)| now.saturating_duration_since(*shown) < FEEDBACK_TTL)
            .map(|(feedback, _)| feedback)
    }

    pub fn is_visible_at(&self, now: Instant) -> bool {
        self.visible_at(now).is_some()
    }

    /// Last banner shown, expired or not.
    pub fn last(&self) -> Option<&Feedback> {
        self.current.as_ref().map(|(feedback, _)| feedback)
    }
}
