//! Checkpoint files of a verification run
//!
//! - `not_found.txt`: coordinates confirmed absent so far
//! - `existing.txt`: coordinates confirmed to exist so far
//! - `existing_shuffled.txt`: the final existing list in random order
//!
//! Both running lists only ever grow and are rewritten in full after each pass.

use crate::domain::CheckResult;
use crate::error::CheckpointError;
use crate::lists::{read_set_if_exists, write_lines, write_shuffled};
use std::path::{Path, PathBuf};
use tracing::debug;

pub const NOT_FOUND_FILE: &str = "not_found.txt";
pub const EXISTING_FILE: &str = "existing.txt";
pub const EXISTING_SHUFFLED_FILE: &str = "existing_shuffled.txt";

/// Checkpoint files below one directory
#[derive(Debug, Clone)]
pub struct CheckpointStore {
    dir: PathBuf,
}

impl CheckpointStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn not_found_path(&self) -> PathBuf {
        self.dir.join(NOT_FOUND_FILE)
    }

    pub fn existing_path(&self) -> PathBuf {
        self.dir.join(EXISTING_FILE)
    }

    pub fn shuffled_path(&self) -> PathBuf {
        self.dir.join(EXISTING_SHUFFLED_FILE)
    }

    /// Load previously checkpointed results; missing files count as empty
    pub fn load(&self) -> Result<CheckResult, CheckpointError> {
        let mut result = CheckResult {
            existing: read_set_if_exists(&self.existing_path())?,
            not_found: read_set_if_exists(&self.not_found_path())?,
        };
        // An entry in both lists can only come from a hand-edited file; trust `existing`
        let overlap: Vec<String> = result
            .not_found
            .intersection(&result.existing)
            .cloned()
            .collect();
        for coordinate in overlap {
            result.not_found.remove(&coordinate);
        }

        debug!(
            dir = %self.dir.display(),
            existing = result.existing.len(),
            not_found = result.not_found.len(),
            "loaded checkpoint"
        );
        Ok(result)
    }

    /// Overwrite both running lists
    pub fn save(&self, result: &CheckResult) -> Result<(), CheckpointError> {
        write_lines(&self.not_found_path(), &result.not_found)?;
        write_lines(&self.existing_path(), &result.existing)?;
        Ok(())
    }

    /// Write the existing list in random order
    pub fn save_shuffled(&self, result: &CheckResult) -> Result<(), CheckpointError> {
        write_shuffled(&self.shuffled_path(), &result.existing)
    }
}
