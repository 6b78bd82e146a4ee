//! JSON file storage for the progress record.
//!
//! The whole record is read and written as one unit. Writes go to a sibling
//! temp file that is then renamed over the target, so a reader never sees a
//! half-written record.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::StorageError;
use crate::progress::ProgressRecord;

/// File name of the progress record inside the data directory.
pub const RECORD_FILE_NAME: &str = "focus_data.json";

#[derive(Debug, Clone)]
pub struct RecordStore {
    path: PathBuf,
}

impl RecordStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the stored record. `Ok(None)` means nothing has been saved yet.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or does not hold a valid
    /// record.
    pub fn load(&self) -> Result<Option<ProgressRecord>, StorageError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(StorageError::ReadFailed {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        let record: ProgressRecord =
            serde_json::from_str(&content).map_err(|e| self.malformed(e.to_string()))?;
        record.validate().map_err(|message| self.malformed(message))?;
        Ok(Some(record))
    }

    /// Write the full record, replacing any previous one.
    ///
    /// # Errors
    /// Returns an error if the temp file cannot be written or renamed.
    pub fn save(&self, record: &ProgressRecord) -> Result<(), StorageError> {
        let content = serde_json::to_string_pretty(record)
            .map_err(|e| self.write_failed(std::io::Error::other(e)))?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| self.write_failed(e))?;
        }

        let tmp = self.temp_path();
        std::fs::write(&tmp, content).map_err(|e| self.write_failed(e))?;
        std::fs::rename(&tmp, &self.path).map_err(|e| {
            let _ = std::fs::remove_file(&tmp);
            self.write_failed(e)
        })?;
        debug!(path = %self.path.display(), "progress record saved");
        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| RECORD_FILE_NAME.into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn malformed(&self, message: String) -> StorageError {
        StorageError::Malformed {
            path: self.path.clone(),
            message,
        }
    }

    fn write_failed(&self, source: std::io::Error) -> StorageError {
        StorageError::WriteFailed {
            path: self.path.clone(),
            source,
        }
    }
}
