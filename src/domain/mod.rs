//! Core domain models for dep-harvest
//!
//! This module contains the fundamental types used throughout the application:
//! - Dependency scopes folded from Maven scopes and Gradle configurations
//! - The canonical coordinate model
//! - Version ordering used for deduplication
//! - Existence check outcomes
//! - Harvest and verification summaries

mod check_result;
mod coordinate;
mod scope;
mod summary;
mod version;

pub use check_result::{CheckResult, ProbeOutcome};
pub use coordinate::{Coordinate, PLACEHOLDER_MARKER};
pub use scope::DependencyScope;
pub use summary::{HarvestSummary, ManifestHarvest, VerifySummary};
pub use version::{compare_versions, max_version};
