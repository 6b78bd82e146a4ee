mod config;
mod record_store;

pub use config::{Config, ProgressConfig, StorageConfig, TimerConfig};
pub use record_store::{RecordStore, RECORD_FILE_NAME};

use std::path::PathBuf;

use crate::error::StorageError;

/// Returns the FocusBuddy data directory, creating it if needed.
///
/// `FOCUSBUDDY_DATA_DIR` overrides the location outright. Otherwise this is
/// `~/.config/focusbuddy[-dev]/`, with the `-dev` suffix when
/// `FOCUSBUDDY_ENV=dev`.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, StorageError> {
    let dir = match std::env::var_os("FOCUSBUDDY_DATA_DIR") {
        Some(custom) => PathBuf::from(custom),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");

            let env = std::env::var("FOCUSBUDDY_ENV").unwrap_or_else(|_| "production".to_string());

            if env == "dev" {
                base_dir.join("focusbuddy-dev")
            } else {
                base_dir.join("focusbuddy")
            }
        }
    };

    std::fs::create_dir_all(&dir)
        .map_err(|e| StorageError::DataDir(format!("{}: {e}", dir.display())))?;
    Ok(dir)
}
