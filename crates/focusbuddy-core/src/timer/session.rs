use serde::{Deserialize, Serialize};

/// Default focus session length in seconds (25 minutes).
pub const DEFAULT_FOCUS_SECS: u64 = 25 * 60;
/// Default break length in seconds (5 minutes).
pub const DEFAULT_BREAK_SECS: u64 = 5 * 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionKind {
    Focus,
    Break,
}

impl SessionKind {
    /// The kind that follows this one when it expires.
    pub fn next(self) -> Self {
        match self {
            SessionKind::Focus => SessionKind::Break,
            SessionKind::Break => SessionKind::Focus,
        }
    }

    /// Label shown above the countdown.
    pub fn label(self) -> &'static str {
        match self {
            SessionKind::Focus => "Focus Session",
            SessionKind::Break => "Break Time",
        }
    }
}

/// Full length of each session kind, in whole seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionDurations {
    pub focus_secs: u64,
    pub break_secs: u64,
}

impl SessionDurations {
    pub fn new(focus_secs: u64, break_secs: u64) -> Self {
        Self {
            focus_secs,
            break_secs,
        }
    }

    pub fn of(&self, kind: SessionKind) -> u64 {
        match kind {
            SessionKind::Focus => self.focus_secs,
            SessionKind::Break => self.break_secs,
        }
    }

    /// Upper bound for any remaining-time value the clock can hold.
    pub fn longest(&self) -> u64 {
        self.focus_secs.max(self.break_secs)
    }
}

impl Default for SessionDurations {
    fn default() -> Self {
        Self::new(DEFAULT_FOCUS_SECS, DEFAULT_BREAK_SECS)
    }
}
