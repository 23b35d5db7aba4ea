//! Remote repository and search API clients
//!
//! This module provides:
//! - HTTP client shared foundation with retry logic
//! - Maven repository existence checker
//! - Maven Central search harvester
//! - GitHub code search harvester

mod client;
mod github;
mod maven_central;
mod maven_repository;

pub use client::{HttpClient, DEFAULT_TIMEOUT, DEFAULT_USER_AGENT};
pub use github::{
    github_headers, CodeSearchQuery, GithubCodeSearch, GithubContent, SearchKind,
    DEFAULT_RATE_LIMIT_WAIT, GITHUB_API_URL,
};
pub use maven_central::{letter_queries, MavenCentralSearch, MAVEN_CENTRAL_SEARCH_URL};
pub use maven_repository::{MavenRepository, DEFAULT_REPOSITORY_URL};

use crate::domain::ProbeOutcome;
use async_trait::async_trait;

/// Trait for checking whether an artifact exists remotely
#[async_trait]
pub trait ArtifactProbe: Send + Sync {
    /// Probe a `group:name:version` coordinate
    ///
    /// Never fails: transport problems come back as
    /// [`ProbeOutcome::TransportFailure`].
    async fn probe(&self, coordinate: &str) -> ProbeOutcome;
}
