//! Run summary types
//!
//! Provides structures for reporting harvest and verification runs at file and
//! overall levels.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Harvest result for a single manifest file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestHarvest {
    /// Path to the manifest file
    pub path: PathBuf,
    /// Coordinates declared in the file, before resolution
    pub declared: usize,
}

impl ManifestHarvest {
    /// Creates a new ManifestHarvest
    pub fn new(path: impl Into<PathBuf>, declared: usize) -> Self {
        Self {
            path: path.into(),
            declared,
        }
    }
}

/// Overall summary of a harvest run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HarvestSummary {
    /// Parsed manifests that declared at least one dependency
    pub manifests: Vec<ManifestHarvest>,
    /// Files in the corpus, parsed or not
    pub corpus_files: usize,
    /// Coordinates discarded for a blank or malformed group/name
    pub discarded: usize,
    /// Coordinates that carried a version placeholder
    pub placeholders: usize,
    /// Placeholders resolved to a concrete version
    pub resolved: usize,
    /// Placeholders that could not be resolved
    pub unresolved: usize,
    /// Coordinates dropped for lacking a version altogether
    pub unversioned: usize,
    /// Unique coordinates after deduplication
    pub unique: usize,
}

impl HarvestSummary {
    /// Total coordinates declared across all manifests
    pub fn total_declared(&self) -> usize {
        self.manifests.iter().map(|m| m.declared).sum()
    }
}

/// Overall summary of a verification run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifySummary {
    /// Unique coordinates after deduplicating the input
    pub input: usize,
    /// Input coordinates already classified by an earlier run
    pub resumed: usize,
    /// Passes run
    pub passes: u32,
    /// Passes cut short by the circuit breaker
    pub breaker_trips: u32,
    /// Coordinates confirmed to exist
    pub existing: usize,
    /// Coordinates confirmed absent
    pub not_found: usize,
    /// Coordinates left unclassified
    pub remaining: usize,
    /// Directory holding the checkpoint files
    pub checkpoint_dir: PathBuf,
}

impl VerifySummary {
    /// Returns true if every input coordinate was classified
    pub fn is_complete(&self) -> bool {
        self.remaining == 0
    }
}
