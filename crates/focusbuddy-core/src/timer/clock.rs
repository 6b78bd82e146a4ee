//! Session clock implementation.
//!
//! The clock is a countdown over whole seconds. It does not use internal
//! threads or read the wall clock - the caller delivers one `tick()` per
//! elapsed second while the clock is running.
//!
//! ## State Transitions
//!
//! ```text
//! Focus(paused) <-> Focus(running) --0--> Break(paused) <-> Break(running) --0--> Focus(paused)
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! let mut clock = SessionClock::new(SessionDurations::default());
//! clock.start();
//! // Once per second:
//! if let Some(Event::SessionExpired { kind, .. }) = clock.tick() { /* ... */ }
//! ```

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::session::{SessionDurations, SessionKind};
use crate::events::Event;

/// Countdown state for the current session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClock {
    durations: SessionDurations,
    kind: SessionKind,
    remaining_secs: u64,
    running: bool,
}

impl SessionClock {
    /// Create a paused clock at the start of a focus session.
    pub fn new(durations: SessionDurations) -> Self {
        Self {
            durations,
            kind: SessionKind::Focus,
            remaining_secs: durations.of(SessionKind::Focus),
            running: false,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn kind(&self) -> SessionKind {
        self.kind
    }

    pub fn remaining_secs(&self) -> u64 {
        self.remaining_secs
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn durations(&self) -> SessionDurations {
        self.durations
    }

    /// Full length of the current session.
    pub fn total_secs(&self) -> u64 {
        self.durations.of(self.kind)
    }

    /// 0.0 .. 1.0 elapsed fraction of the current session.
    pub fn progress(&self) -> f64 {
        let total = self.total_secs();
        if total == 0 {
            return 0.0;
        }
        1.0 - (self.remaining_secs as f64 / total as f64)
    }

    /// Remaining time as `MM:SS`.
    pub fn formatted(&self) -> String {
        format_remaining(self.remaining_secs)
    }

    pub fn label(&self) -> &'static str {
        self.kind.label()
    }

    /// Text for the start/pause control.
    pub fn button_label(&self) -> &'static str {
        if self.running {
            "Pause"
        } else if self.remaining_secs == self.total_secs() {
            "Start"
        } else {
            "Resume"
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    pub fn start(&mut self) -> Option<Event> {
        if self.running {
            return None;
        }
        self.running = true;
        debug!(kind = ?self.kind, remaining = self.remaining_secs, "clock started");
        Some(Event::SessionStarted {
            kind: self.kind,
            remaining_secs: self.remaining_secs,
            at: Utc::now(),
        })
    }

    pub fn pause(&mut self) -> Option<Event> {
        if !self.running {
            return None;
        }
        self.running = false;
        debug!(kind = ?self.kind, remaining = self.remaining_secs, "clock paused");
        Some(Event::SessionPaused {
            kind: self.kind,
            remaining_secs: self.remaining_secs,
            at: Utc::now(),
        })
    }

    /// Start when stopped, pause when running.
    pub fn toggle(&mut self) -> Option<Event> {
        if self.running {
            self.pause()
        } else {
            self.start()
        }
    }

    pub fn reset(&mut self) -> Event {
        self.running = false;
        self.remaining_secs = self.total_secs();
        debug!(kind = ?self.kind, "clock reset");
        Event::SessionReset {
            kind: self.kind,
            duration_secs: self.remaining_secs,
            at: Utc::now(),
        }
    }

    /// Call once per elapsed second. Returns `None` while stopped,
    /// `Event::SessionExpired` when the countdown hits zero, and
    /// `Event::Ticked` otherwise.
    ///
    /// Expiry happens on the same tick that reaches zero, so `00:00` is
    /// never shown for a full second before the session flips.
    pub fn tick(&mut self) -> Option<Event> {
        if !self.running {
            return None;
        }
        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        if self.remaining_secs == 0 {
            return Some(self.expire());
        }
        Some(Event::Ticked {
            kind: self.kind,
            remaining_secs: self.remaining_secs,
            at: Utc::now(),
        })
    }

    /// Force the current session to expire now, running or not.
    pub fn skip(&mut self) -> Event {
        self.remaining_secs = 0;
        self.expire()
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn expire(&mut self) -> Event {
        let elapsed = self.kind;
        self.running = false;
        self.kind = elapsed.next();
        self.remaining_secs = self.total_secs();
        debug!(elapsed = ?elapsed, next = ?self.kind, "session expired");
        Event::SessionExpired {
            kind: elapsed,
            next: self.kind,
            at: Utc::now(),
        }
    }
}

impl Default for SessionClock {
    fn default() -> Self {
        Self::new(SessionDurations::default())
    }
}

/// Render whole seconds as zero-padded `MM:SS`.
pub fn format_remaining(secs: u64) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}
