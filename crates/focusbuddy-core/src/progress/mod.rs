mod ledger;
mod record;

pub use ledger::{next_streak, CompletionOutcome, LedgerRules, ProgressLedger};
pub use record::{format_date, ProgressRecord, DATE_FORMAT, XP_PER_LEVEL};
