mod clock;
mod session;

pub use clock::{format_remaining, SessionClock};
pub use session::{SessionDurations, SessionKind, DEFAULT_BREAK_SECS, DEFAULT_FOCUS_SECS};
