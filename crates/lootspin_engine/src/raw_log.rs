use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use serde_json::Value;
use thiserror::Error;

pub const DEFAULT_RAW_LOG: &str = "raw_spin_results.json";
const RECORD_SEPARATOR: &str = ",\n";

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("log directory missing or not writable: {0}")]
    OutputDir(String),
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// Ensure the directory holding `path` exists; create if missing.
pub fn ensure_parent_dir(path: &Path) -> Result<(), PersistError> {
    let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) else {
        return Ok(());
    };
    if dir.exists() {
        let meta = fs::metadata(dir).map_err(|e| PersistError::OutputDir(e.to_string()))?;
        if !meta.is_dir() {
            return Err(PersistError::OutputDir("path is not a directory".into()));
        }
    } else {
        fs::create_dir_all(dir).map_err(|e| PersistError::OutputDir(e.to_string()))?;
    }
    Ok(())
}

/// Side-effect sink for raw successful response bodies.
pub trait ResultLogger: Send + Sync {
    fn append(&self, body: &Value) -> Result<(), PersistError>;
}

/// Append-only file of pretty-printed response bodies, each followed by
/// `,\n`.
///
/// One instance is shared by all sessions; a record is written in a single
/// call while holding the lock, so records never interleave.
#[derive(Debug)]
pub struct RawResultLog {
    path: PathBuf,
    lock: Mutex<()>,
}

impl RawResultLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ResultLogger for RawResultLog {
    fn append(&self, body: &Value) -> Result<(), PersistError> {
        let mut record = serde_json::to_string_pretty(body)?;
        record.push_str(RECORD_SEPARATOR);

        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        ensure_parent_dir(&self.path)?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(record.as_bytes())?;
        file.flush()?;
        Ok(())
    }
}
