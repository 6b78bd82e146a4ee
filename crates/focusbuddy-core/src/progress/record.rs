use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// XP needed per level band.
pub const XP_PER_LEVEL: u64 = 100;

/// Date format of `last_session`.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Persisted player progress.
///
/// `last_session` is kept as text so that a value that no longer parses
/// still loads; the streak rule treats it as a broken streak.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressRecord {
    pub xp: u64,
    pub level: u32,
    pub streak: u32,
    #[serde(alias = "lastSessionDate")]
    pub last_session: String,
}

impl ProgressRecord {
    /// Fresh progress dated `today`.
    pub fn new(today: NaiveDate) -> Self {
        Self {
            xp: 0,
            level: 1,
            streak: 0,
            last_session: format_date(today),
        }
    }

    pub fn last_session_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.last_session, DATE_FORMAT).ok()
    }

    /// XP earned inside the current 100-point band.
    pub fn xp_into_level(&self) -> u64 {
        self.xp % XP_PER_LEVEL
    }

    /// Describes why this record cannot be used, if it can't.
    pub fn validate(&self) -> Result<(), String> {
        if self.level == 0 {
            return Err("level must be at least 1".into());
        }
        Ok(())
    }
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}
