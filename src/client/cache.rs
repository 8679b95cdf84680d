//! Local end-time cache surviving restarts

use std::{
    fs, io,
    path::{Path, PathBuf},
};
use tracing::warn;

/// A single file holding the cached end time as decimal text.
/// A missing file means no cached countdown.
#[derive(Debug, Clone)]
pub struct EndTimeCache {
    path: PathBuf,
}

impl EndTimeCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The cached text, if any. Unreadable files count as absent.
    pub fn read(&self) -> Option<String> {
        match fs::read_to_string(&self.path) {
            Ok(text) => Some(text),
            Err(e) if e.kind() == io::ErrorKind::NotFound => None,
            Err(e) => {
                warn!("Failed to read cache {}: {}", self.path.display(), e);
                None
            }
        }
    }

    pub fn write(&self, end_time: i64) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, end_time.to_string())
    }

    pub fn clear(&self) -> io::Result<()> {
        match fs::remove_file(&self.path) {
            Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e),
            _ => Ok(()),
        }
    }
}
