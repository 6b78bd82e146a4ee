//! Progress ledger: XP, level and daily streak accounting.
//!
//! The ledger is mutated by exactly one thing, a completed focus session.
//! Persisting the record afterwards is the caller's job so the rules stay
//! free of I/O.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::record::{format_date, ProgressRecord, XP_PER_LEVEL};
use crate::storage::RecordStore;

/// Tunable parts of the accounting rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerRules {
    /// XP granted per completed focus session.
    pub xp_per_session: u64,
    /// A streak that is a positive multiple of this is a milestone.
    pub milestone_interval: u32,
}

impl Default for LedgerRules {
    fn default() -> Self {
        Self {
            xp_per_session: 25,
            milestone_interval: 5,
        }
    }
}

/// What a single completion changed, for user-facing notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionOutcome {
    pub xp: u64,
    pub level: u32,
    pub streak: u32,
    pub leveled_up: bool,
    pub streak_milestone: bool,
}

/// Owns the progress record for the lifetime of the app.
#[derive(Debug, Clone)]
pub struct ProgressLedger {
    record: ProgressRecord,
    rules: LedgerRules,
}

impl ProgressLedger {
    pub fn new(record: ProgressRecord, rules: LedgerRules) -> Self {
        Self { record, rules }
    }

    /// Read the stored record, falling back to fresh progress dated `today`
    /// when nothing is stored or the stored record is unreadable.
    pub fn load(store: &RecordStore, today: NaiveDate, rules: LedgerRules) -> Self {
        let record = match store.load() {
            Ok(Some(record)) => record,
            Ok(None) => {
                info!(path = %store.path().display(), "no progress record yet, starting fresh");
                ProgressRecord::new(today)
            }
            Err(e) => {
                warn!(error = %e, "progress record unusable, resetting progress");
                ProgressRecord::new(today)
            }
        };
        Self::new(record, rules)
    }

    pub fn record(&self) -> &ProgressRecord {
        &self.record
    }

    pub fn xp_per_level(&self) -> u64 {
        XP_PER_LEVEL
    }

    pub fn xp_into_level(&self) -> u64 {
        self.record.xp_into_level()
    }

    /// Apply one completed focus session finished on `today`.
    pub fn complete_focus_session(&mut self, today: NaiveDate) -> CompletionOutcome {
        let rec = &mut self.record;

        rec.xp = rec.xp.saturating_add(self.rules.xp_per_session);

        // One level per completion; the award is capped below a full band.
        let leveled_up = rec.xp >= u64::from(rec.level) * XP_PER_LEVEL;
        if leveled_up {
            rec.level = rec.level.saturating_add(1);
        }

        let previous_streak = rec.streak;
        rec.streak = next_streak(rec.streak, rec.last_session_date(), today);
        rec.last_session = format_date(today);

        // Only a streak that grew today can land on a milestone.
        let streak_milestone = rec.streak > previous_streak
            && rec.streak % self.rules.milestone_interval.max(1) == 0;

        info!(
            xp = rec.xp,
            level = rec.level,
            streak = rec.streak,
            leveled_up,
            streak_milestone,
            "focus session recorded"
        );

        CompletionOutcome {
            xp: rec.xp,
            level: rec.level,
            streak: rec.streak,
            leveled_up,
            streak_milestone,
        }
    }
}

/// Streak after a completion on `today`, given the previous session date.
///
/// Consecutive days extend the streak, a second session on the same day
/// leaves it alone, and anything else (a gap, a date in the future, or no
/// readable date) starts over at 1.
pub fn next_streak(streak: u32, last: Option<NaiveDate>, today: NaiveDate) -> u32 {
    match last {
        Some(last) if last.checked_add_days(Days::new(1)) == Some(today) => streak.saturating_add(1),
        Some(last) if last == today => streak,
        _ => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn ledger(xp: u64, level: u32, streak: u32, last: &str) -> ProgressLedger {
        ProgressLedger::new(
            ProgressRecord {
                xp,
                level,
                streak,
                last_session: last.into(),
            },
            LedgerRules::default(),
        )
    }

    #[test]
    fn consecutive_day_extends_streak() {
        let mut l = ledger(0, 1, 2, "2024-06-09");
        let out = l.complete_focus_session(date(2024, 6, 10));
        assert_eq!(out.streak, 3);
        assert_eq!(l.record().last_session, "2024-06-10");
    }

    #[test]
    fn same_day_keeps_streak() {
        let mut l = ledger(0, 1, 2, "2024-06-10");
        let out = l.complete_focus_session(date(2024, 6, 10));
        assert_eq!(out.streak, 2);
    }

    #[test]
    fn gap_restarts_streak() {
        let mut l = ledger(0, 1, 7, "2024-06-07");
        let out = l.complete_focus_session(date(2024, 6, 10));
        assert_eq!(out.streak, 1);
    }

    #[test]
    fn date_before_last_session_restarts_streak() {
        let mut l = ledger(0, 1, 7, "2024-06-12");
        let out = l.complete_focus_session(date(2024, 6, 10));
        assert_eq!(out.streak, 1);
        assert_eq!(l.record().last_session, "2024-06-10");
    }

    #[test]
    fn unparsable_date_restarts_streak() {
        let mut l = ledger(0, 1, 9, "yesterday-ish");
        let out = l.complete_focus_session(date(2024, 6, 10));
        assert_eq!(out.streak, 1);
    }

    #[test]
    fn streak_crosses_month_and_year_boundaries() {
        assert_eq!(next_streak(3, Some(date(2024, 2, 29)), date(2024, 3, 1)), 4);
        assert_eq!(next_streak(3, Some(date(2023, 12, 31)), date(2024, 1, 1)), 4);
    }

    #[test]
    fn level_up_at_threshold() {
        let mut l = ledger(90, 1, 0, "2024-06-10");
        let out = l.complete_focus_session(date(2024, 6, 10));
        assert_eq!(out.xp, 115);
        assert_eq!(out.level, 2);
        assert!(out.leveled_up);
        assert_eq!(l.xp_into_level(), 15);
    }

    #[test]
    fn no_level_up_below_threshold() {
        let mut l = ledger(50, 1, 0, "2024-06-10");
        let out = l.complete_focus_session(date(2024, 6, 10));
        assert_eq!(out.xp, 75);
        assert_eq!(out.level, 1);
        assert!(!out.leveled_up);
    }

    #[test]
    fn at_most_one_level_per_completion() {
        let mut l = ledger(480, 1, 0, "2024-06-10");
        let out = l.complete_focus_session(date(2024, 6, 10));
        assert_eq!(out.level, 2);
    }

    #[test]
    fn fifth_day_is_a_milestone() {
        let mut l = ledger(0, 1, 4, "2024-06-09");
        let out = l.complete_focus_session(date(2024, 6, 10));
        assert_eq!(out.streak, 5);
        assert!(out.streak_milestone);
        assert!(!out.leveled_up);
    }

    #[test]
    fn later_sessions_on_a_milestone_day_do_not_signal_again() {
        let mut l = ledger(0, 1, 4, "2024-06-09");
        assert!(l.complete_focus_session(date(2024, 6, 10)).streak_milestone);

        let second = l.complete_focus_session(date(2024, 6, 10));
        let third = l.complete_focus_session(date(2024, 6, 10));
        assert_eq!(second.streak, 5);
        assert!(!second.streak_milestone);
        assert!(!third.streak_milestone);
        assert_eq!(l.record().xp, 75);
    }

    #[test]
    fn non_multiple_is_not_a_milestone() {
        let mut l = ledger(0, 1, 5, "2024-06-09");
        let out = l.complete_focus_session(date(2024, 6, 10));
        assert_eq!(out.streak, 6);
        assert!(!out.streak_milestone);
    }

    #[test]
    fn zero_streak_is_not_a_milestone() {
        // Fresh progress is dated today, so the first session keeps streak 0.
        let mut l = ProgressLedger::new(ProgressRecord::new(date(2024, 6, 10)), LedgerRules::default());
        let out = l.complete_focus_session(date(2024, 6, 10));
        assert_eq!(out.streak, 0);
        assert!(!out.streak_milestone);
        assert_eq!(out.xp, 25);
    }

    #[test]
    fn custom_rules_apply() {
        let mut l = ProgressLedger::new(
            ProgressRecord::new(date(2024, 6, 9)),
            LedgerRules {
                xp_per_session: 100,
                milestone_interval: 1,
            },
        );
        let out = l.complete_focus_session(date(2024, 6, 10));
        assert_eq!(out.xp, 100);
        assert!(out.leveled_up);
        assert_eq!(out.streak, 1);
        assert!(out.streak_milestone);
    }
}
