pub mod completions;
pub mod config;
pub mod debug;
pub mod run;
pub mod status;

use chrono::{Local, NaiveDate};

/// Calendar date in the user's local time zone.
pub(crate) fn today() -> NaiveDate {
    Local::now().date_naive()
}
