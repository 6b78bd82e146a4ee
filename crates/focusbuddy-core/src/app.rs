//! Application context tying the clock to the progress ledger.
//!
//! `FocusApp` is owned by the presentation layer and is the only way state
//! changes. Each clock expiry is routed here: a finished focus session
//! credits the ledger and writes the record back, a finished break only
//! flips the clock.

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::error::{Result, StorageError};
use crate::events::Event;
use crate::progress::{LedgerRules, ProgressLedger};
use crate::storage::{Config, RecordStore};
use crate::timer::{SessionClock, SessionDurations, SessionKind};

/// Combined timer state as the user sees it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppPhase {
    FocusRunning,
    FocusPaused,
    BreakRunning,
    BreakPaused,
}

impl AppPhase {
    pub fn of(clock: &SessionClock) -> Self {
        match (clock.kind(), clock.is_running()) {
            (SessionKind::Focus, true) => AppPhase::FocusRunning,
            (SessionKind::Focus, false) => AppPhase::FocusPaused,
            (SessionKind::Break, true) => AppPhase::BreakRunning,
            (SessionKind::Break, false) => AppPhase::BreakPaused,
        }
    }
}

pub struct FocusApp {
    clock: SessionClock,
    ledger: ProgressLedger,
    store: RecordStore,
}

impl FocusApp {
    pub fn new(clock: SessionClock, ledger: ProgressLedger, store: RecordStore) -> Self {
        Self {
            clock,
            ledger,
            store,
        }
    }

    /// Load progress from `store` and start a fresh, paused focus session.
    pub fn open(
        store: RecordStore,
        today: NaiveDate,
        durations: SessionDurations,
        rules: LedgerRules,
    ) -> Self {
        let ledger = ProgressLedger::load(&store, today, rules);
        Self::new(SessionClock::new(durations), ledger, store)
    }

    /// Build the app from user configuration.
    ///
    /// # Errors
    /// Returns an error if the record location cannot be resolved.
    pub fn from_config(config: &Config, today: NaiveDate) -> Result<Self, StorageError> {
        let store = config.record_store()?;
        Ok(Self::open(
            store,
            today,
            config.durations(),
            config.ledger_rules(),
        ))
    }

    /// Load the user's config from disk and open the app it describes.
    ///
    /// # Errors
    /// Returns an error if the config file is invalid or the record location
    /// cannot be resolved.
    pub fn open_configured(today: NaiveDate) -> Result<Self> {
        let config = Config::load()?;
        Ok(Self::from_config(&config, today)?)
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn clock(&self) -> &SessionClock {
        &self.clock
    }

    pub fn ledger(&self) -> &ProgressLedger {
        &self.ledger
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    pub fn phase(&self) -> AppPhase {
        AppPhase::of(&self.clock)
    }

    pub fn snapshot(&self) -> Event {
        let rec = self.ledger.record();
        Event::StateSnapshot {
            phase: self.phase(),
            kind: self.clock.kind(),
            label: self.clock.label().to_string(),
            remaining_secs: self.clock.remaining_secs(),
            total_secs: self.clock.total_secs(),
            formatted: self.clock.formatted(),
            running: self.clock.is_running(),
            button_label: self.clock.button_label().to_string(),
            xp: rec.xp,
            xp_into_level: self.ledger.xp_into_level(),
            xp_per_level: self.ledger.xp_per_level(),
            level: rec.level,
            streak: rec.streak,
            last_session: rec.last_session.clone(),
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    pub fn start(&mut self) -> Option<Event> {
        self.clock.start()
    }

    pub fn pause(&mut self) -> Option<Event> {
        self.clock.pause()
    }

    pub fn toggle(&mut self) -> Option<Event> {
        self.clock.toggle()
    }

    pub fn reset(&mut self) -> Event {
        self.clock.reset()
    }

    /// Deliver one elapsed second. `today` dates a focus completion if this
    /// tick finishes one.
    pub fn tick(&mut self, today: NaiveDate) -> Vec<Event> {
        match self.clock.tick() {
            Some(event) => self.route(event, today),
            None => Vec::new(),
        }
    }

    /// Diagnostic: end the current session immediately, with the same
    /// consequences as the countdown reaching zero.
    pub fn debug_skip(&mut self, today: NaiveDate) -> Vec<Event> {
        info!(kind = ?self.clock.kind(), "debug skip");
        let event = self.clock.skip();
        self.route(event, today)
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn route(&mut self, event: Event, today: NaiveDate) -> Vec<Event> {
        let completed_focus = matches!(
            event,
            Event::SessionExpired {
                kind: SessionKind::Focus,
                ..
            }
        );
        let mut events = vec![event];
        if !completed_focus {
            return events;
        }

        let outcome = self.ledger.complete_focus_session(today);
        let persisted = self.persist();
        let at = Utc::now();
        events.push(Event::FocusCompleted {
            xp: outcome.xp,
            level: outcome.level,
            streak: outcome.streak,
            persisted,
            at,
        });
        if outcome.leveled_up {
            events.push(Event::LevelUp {
                level: outcome.level,
                at,
            });
        }
        if outcome.streak_milestone {
            events.push(Event::StreakMilestone {
                streak: outcome.streak,
                at,
            });
        }
        events
    }

    /// Write the record back. A failed write is logged and the in-memory
    /// record stays authoritative for the rest of the process.
    fn persist(&self) -> bool {
        match self.store.save(self.ledger.record()) {
            Ok(()) => true,
            Err(e) => {
                error!(error = %e, "failed to save progress record");
                false
            }
        }
    }
}
