//! Maven repository existence checker
//!
//! Maps a coordinate to the URL of its main jar and probes it with HEAD:
//! `<base>/<group with . as />/<name>/<version>/<name>-<version>.jar`

use crate::domain::{Coordinate, ProbeOutcome};
use crate::error::CoordinateError;
use crate::registry::{ArtifactProbe, HttpClient};
use async_trait::async_trait;
use tracing::warn;

/// Default Maven repository base URL
pub const DEFAULT_REPOSITORY_URL: &str = "https://repo.maven.apache.org/maven2";

/// Existence checker backed by a Maven 2 layout repository
pub struct MavenRepository {
    client: HttpClient,
    base_url: String,
}

impl MavenRepository {
    /// Create a checker against the default repository
    pub fn new(client: HttpClient) -> Self {
        Self::with_base_url(client, DEFAULT_REPOSITORY_URL)
    }

    /// Create a checker against a custom repository
    pub fn with_base_url(client: HttpClient, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    /// Returns the repository base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build the jar URL for a coordinate
    pub fn artifact_url(&self, coordinate: &Coordinate) -> String {
        format!(
            "{}/{}/{}/{}/{}-{}.jar",
            self.base_url,
            coordinate.group.replace('.', "/"),
            coordinate.name,
            coordinate.version,
            coordinate.name,
            coordinate.version
        )
    }

    /// Build the jar URL for a `group:name:version` string
    pub fn url_for(&self, coordinate: &str) -> Result<String, CoordinateError> {
        Coordinate::parse_gav(coordinate).map(|c| self.artifact_url(&c))
    }

    /// Returns true only if the artifact was found
    pub async fn is_available(&self, coordinate: &str) -> bool {
        self.probe(coordinate).await.is_found()
    }

    fn registry_name(&self) -> &'static str {
        "Maven repository"
    }
}

#[async_trait]
impl ArtifactProbe for MavenRepository {
    async fn probe(&self, coordinate: &str) -> ProbeOutcome {
        let url = match self.url_for(coordinate) {
            Ok(url) => url,
            Err(e) => {
                warn!(error = %e, "invalid coordinate");
                return ProbeOutcome::NotFound;
            }
        };

        match self
            .client
            .head_status(&url, coordinate, self.registry_name())
            .await
        {
            Ok(status) => {
                let outcome = ProbeOutcome::from_status(status);
                if let ProbeOutcome::UnexpectedStatus(status) = outcome {
                    warn!(coordinate, status, url = %url, "unexpected status");
                }
                outcome
            }
            Err(e) => {
                warn!(coordinate, error = %e, "probe failed");
                ProbeOutcome::TransportFailure(e.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DependencyScope;

    fn repository() -> MavenRepository {
        MavenRepository::new(HttpClient::new().unwrap())
    }

    #[test]
    fn test_artifact_url() {
        let coord = Coordinate::new(DependencyScope::Main, "org.apache.commons", "commons-lang3", "3.13.0");
        assert_eq!(
            repository().artifact_url(&coord),
            "https://repo.maven.apache.org/maven2/org/apache/commons/commons-lang3/3.13.0/commons-lang3-3.13.0.jar"
        );
    }

    #[test]
    fn test_url_for_uses_last_segment_as_version() {
        let url = repository()
            .url_for("io.netty:netty-transport-native-epoll:linux-x86_64:4.1.100")
            .unwrap();
        assert!(url.ends_with("/io/netty/netty-transport-native-epoll/4.1.100/netty-transport-native-epoll-4.1.100.jar"));
    }

    #[test]
    fn test_url_for_too_few_segments() {
        let err = repository().url_for("junit:junit").unwrap_err();
        assert!(matches!(err, CoordinateError::TooFewSegments { found: 2, .. }));
    }

    #[test]
    fn test_custom_base_url_trailing_slash() {
        let repo = MavenRepository::with_base_url(HttpClient::new().unwrap(), "http://localhost:8081/repo/");
        assert_eq!(repo.base_url(), "http://localhost:8081/repo");
        assert_eq!(
            repo.url_for("a.b:c:1").unwrap(),
            "http://localhost:8081/repo/a/b/c/1/c-1.jar"
        );
    }

    #[tokio::test]
    async fn test_probe_invalid_coordinate_is_not_found() {
        assert_eq!(repository().probe("junit").await, ProbeOutcome::NotFound);
    }

    #[tokio::test]
    async fn test_probe_unreachable_repository_is_transport_failure() {
        let client = HttpClient::with_config(std::time::Duration::from_secs(2), "test").unwrap();
        let repo = MavenRepository::with_base_url(client, "http://127.0.0.1:9");
        assert!(matches!(
            repo.probe("a:b:1").await,
            ProbeOutcome::TransportFailure(_)
        ));
    }

    #[tokio::test]
    #[ignore = "requires network access"]
    async fn test_is_available_missing_artifact() {
        assert!(
            !repository()
                .is_available("fr.mastah.maven.plugin.m2e.jsdoc3:jsdoc3-m2e-site:1.0.1")
                .await
        );
    }

    #[tokio::test]
    #[ignore = "requires network access"]
    async fn test_is_available_existing_artifact() {
        assert!(repository().is_available("junit:junit:4.13.2").await);
    }
}
