//! Snapshot store
//!
//! One JSON file holding the latest observed Pillar set. Read once at run
//! start, overwritten once after a successful run; the store never keeps
//! history. Writes go to a temp file first and are renamed into place so a
//! crashed run cannot leave a truncated snapshot behind.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::types::PillarSnapshot;

pub struct SnapshotStore {
    path: PathBuf,
}

impl SnapshotStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Load the previous snapshot. A missing or empty file means first run.
    pub fn load(&self) -> Result<Option<PillarSnapshot>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(None);
        }

        let snapshot: PillarSnapshot = serde_json::from_str(&content)?;
        Ok(Some(snapshot))
    }

    /// Replace the stored snapshot wholesale.
    pub fn save(&self, snapshot: &PillarSnapshot) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let json = serde_json::to_string_pretty(snapshot)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}
