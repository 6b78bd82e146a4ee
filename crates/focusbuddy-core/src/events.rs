use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::app::AppPhase;
use crate::timer::SessionKind;

/// Every state change in the system produces an Event.
/// The presentation layer renders them; nothing else subscribes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    SessionStarted {
        kind: SessionKind,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    SessionPaused {
        kind: SessionKind,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    SessionReset {
        kind: SessionKind,
        duration_secs: u64,
        at: DateTime<Utc>,
    },
    /// One second elapsed and the session is still going.
    Ticked {
        kind: SessionKind,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    /// The countdown reached zero. `kind` is the session that just ended.
    SessionExpired {
        kind: SessionKind,
        next: SessionKind,
        at: DateTime<Utc>,
    },
    /// A focus session was credited to the progress ledger.
    FocusCompleted {
        xp: u64,
        level: u32,
        streak: u32,
        /// False when the record could not be written back.
        persisted: bool,
        at: DateTime<Utc>,
    },
    LevelUp {
        level: u32,
        at: DateTime<Utc>,
    },
    StreakMilestone {
        streak: u32,
        at: DateTime<Utc>,
    },
    /// Everything the presentation layer needs to draw one frame.
    StateSnapshot {
        phase: AppPhase,
        kind: SessionKind,
        label: String,
        remaining_secs: u64,
        total_secs: u64,
        formatted: String,
        running: bool,
        button_label: String,
        xp: u64,
        xp_into_level: u64,
        xp_per_level: u64,
        level: u32,
        streak: u32,
        last_session: String,
        at: DateTime<Utc>,
    },
}
