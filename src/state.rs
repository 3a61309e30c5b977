//! Persisted synchronization marker (`update.rev`).
//!
//! The file holds a single record `<start>:<end>`: the revision the last run
//! started from and the upstream HEAD it reached.

use std::fmt;
use std::fs;
use std::path::Path;

use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncState {
    pub last_synced_revision: u64,
    pub head_revision: u64,
}

impl SyncState {
    pub fn new(last_synced_revision: u64, head_revision: u64) -> Self {
        Self {
            last_synced_revision,
            head_revision,
        }
    }

    /// Parse a `<start>:<end>` record.
    pub fn parse(record: &str) -> Option<Self> {
        let (start, end) = record.trim().split_once(':')?;
        let start = start.trim().parse().ok()?;
        let end = end.trim().parse().ok()?;
        Some(Self::new(start, end))
    }

    /// Load the state file, `Ok(None)` when it does not exist.
    pub fn load(path: &Path) -> Result<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(path)?;
        Self::parse(&content).map(Some).ok_or_else(|| Error::State {
            path: path.display().to_string(),
            message: format!("expected '<start>:<end>', found '{}'", content.trim()),
        })
    }

    /// Overwrite the state file with this record.
    pub fn save(&self, path: &Path) -> Result<()> {
        if self.head_revision < self.last_synced_revision {
            return Err(Error::State {
                path: path.display().to_string(),
                message: format!(
                    "head revision {} is older than start revision {}",
                    self.head_revision, self.last_synced_revision
                ),
            });
        }
        fs::write(path, self.to_string()).map_err(|e| Error::State {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }
}

impl fmt::Display for SyncState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.last_synced_revision, self.head_revision)
    }
}
