//! Existence check outcomes and their partition

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Outcome of probing the remote repository for one coordinate
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// The artifact exists (HTTP 200)
    Found,
    /// The artifact is confirmed absent (HTTP 404)
    NotFound,
    /// Any other status; treated as absent but reported separately
    UnexpectedStatus(u16),
    /// The request never produced a status (DNS, timeout, reset, ...)
    TransportFailure(String),
}

impl ProbeOutcome {
    /// Map an HTTP status code to an outcome
    pub fn from_status(status: u16) -> Self {
        match status {
            200 => ProbeOutcome::Found,
            404 => ProbeOutcome::NotFound,
            other => ProbeOutcome::UnexpectedStatus(other),
        }
    }

    /// Returns true only when the artifact was found
    pub fn is_found(&self) -> bool {
        matches!(self, ProbeOutcome::Found)
    }

    /// Returns true if the remote answered, whatever the answer was
    pub fn is_definitive(&self) -> bool {
        !matches!(self, ProbeOutcome::TransportFailure(_))
    }
}

impl fmt::Display for ProbeOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProbeOutcome::Found => write!(f, "found"),
            ProbeOutcome::NotFound => write!(f, "not found"),
            ProbeOutcome::UnexpectedStatus(status) => write!(f, "unexpected status {}", status),
            ProbeOutcome::TransportFailure(msg) => write!(f, "transport failure: {}", msg),
        }
    }
}

/// Partition of checked coordinates
///
/// Coordinates whose probe failed in transport are kept out of both sets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckResult {
    /// Coordinates confirmed to exist
    pub existing: BTreeSet<String>,
    /// Coordinates confirmed absent (or answered with an unexpected status)
    pub not_found: BTreeSet<String>,
}

impl CheckResult {
    /// Creates an empty result
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a probe outcome; returns false for transport failures,
    /// which are not recorded
    pub fn record(&mut self, coordinate: &str, outcome: &ProbeOutcome) -> bool {
        match outcome {
            ProbeOutcome::Found => {
                self.not_found.remove(coordinate);
                self.existing.insert(coordinate.to_string());
                true
            }
            ProbeOutcome::NotFound | ProbeOutcome::UnexpectedStatus(_) => {
                if self.existing.contains(coordinate) {
                    return true;
                }
                self.not_found.insert(coordinate.to_string());
                true
            }
            ProbeOutcome::TransportFailure(_) => false,
        }
    }

    /// Merge another result into this one, keeping the sets disjoint
    pub fn merge(&mut self, other: &CheckResult) {
        for coordinate in &other.existing {
            self.not_found.remove(coordinate);
            self.existing.insert(coordinate.clone());
        }
        for coordinate in &other.not_found {
            if !self.existing.contains(coordinate) {
                self.not_found.insert(coordinate.clone());
            }
        }
    }

    /// Returns true if the coordinate was classified either way
    pub fn contains(&self, coordinate: &str) -> bool {
        self.existing.contains(coordinate) || self.not_found.contains(coordinate)
    }

    /// Total number of classified coordinates
    pub fn len(&self) -> usize {
        self.existing.len() + self.not_found.len()
    }

    /// Returns true if nothing was classified
    pub fn is_empty(&self) -> bool {
        self.existing.is_empty() && self.not_found.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_status() {
        assert_eq!(ProbeOutcome::from_status(200), ProbeOutcome::Found);
        assert_eq!(ProbeOutcome::from_status(404), ProbeOutcome::NotFound);
        assert_eq!(ProbeOutcome::from_status(403), ProbeOutcome::UnexpectedStatus(403));
        assert_eq!(ProbeOutcome::from_status(301), ProbeOutcome::UnexpectedStatus(301));
    }

    #[test]
    fn test_is_definitive() {
        assert!(ProbeOutcome::Found.is_definitive());
        assert!(ProbeOutcome::UnexpectedStatus(500).is_definitive());
        assert!(!ProbeOutcome::TransportFailure("reset".into()).is_definitive());
    }

    #[test]
    fn test_record_partitions() {
        let mut result = CheckResult::new();
        assert!(result.record("a:a:1", &ProbeOutcome::Found));
        assert!(result.record("b:b:1", &ProbeOutcome::NotFound));
        assert!(result.record("c:c:1", &ProbeOutcome::UnexpectedStatus(503)));
        assert!(!result.record("d:d:1", &ProbeOutcome::TransportFailure("timeout".into())));

        assert_eq!(result.existing.len(), 1);
        assert_eq!(result.not_found.len(), 2);
        assert!(!result.contains("d:d:1"));
    }

    #[test]
    fn test_merge_keeps_sets_disjoint() {
        let mut total = CheckResult::new();
        total.record("a:a:1", &ProbeOutcome::NotFound);

        let mut pass = CheckResult::new();
        pass.record("a:a:1", &ProbeOutcome::Found);
        pass.record("b:b:1", &ProbeOutcome::NotFound);
        total.merge(&pass);

        assert!(total.existing.contains("a:a:1"));
        assert!(!total.not_found.contains("a:a:1"));
        assert!(total.existing.is_disjoint(&total.not_found));
        assert_eq!(total.len(), 2);
    }
}
