//! # FocusBuddy Core Library
//!
//! This library provides the core logic for the FocusBuddy focus timer.
//! Presentation layers (the bundled CLI, or any GUI) hold a [`FocusApp`]
//! and route every user action and timer tick through it.
//!
//! ## Architecture
//!
//! - **Session Clock**: A whole-second countdown that alternates focus and
//!   break sessions. The caller invokes `tick()` once per second.
//! - **Progress Ledger**: XP, level and daily streak, updated only when a
//!   focus session completes
//! - **Storage**: JSON progress record and TOML-based configuration
//!
//! ## Key Components
//!
//! - [`SessionClock`]: Countdown state machine
//! - [`ProgressLedger`]: Progress accounting rules
//! - [`RecordStore`]: Progress record persistence
//! - [`Config`]: Application configuration management
//! - [`FocusApp`]: Owned context wiring the above together

pub mod app;
pub mod debug;
pub mod error;
pub mod events;
pub mod progress;
pub mod storage;
pub mod timer;

pub use app::{AppPhase, FocusApp};
pub use debug::DebugUnlock;
pub use error::{ConfigError, CoreError, StorageError};
pub use events::Event;
pub use progress::{CompletionOutcome, LedgerRules, ProgressLedger, ProgressRecord};
pub use storage::{Config, RecordStore};
pub use timer::{format_remaining, SessionClock, SessionDurations, SessionKind};
