//! Maven Central Search API harvester
//!
//! Enumerates artifacts by firing every one- and two-letter lowercase query at
//! the Solr search endpoint and keeping the latest version of each hit.
//! API endpoint: https://search.maven.org/solrsearch/select
//!
//! Query format: q={query}&rows=10000&wt=json

use crate::error::RegistryError;
use crate::registry::HttpClient;
use serde::Deserialize;
use std::collections::BTreeSet;
use tracing::{debug, info, warn};

/// Maven Central Search API base URL
pub const MAVEN_CENTRAL_SEARCH_URL: &str = "https://search.maven.org/solrsearch/select";

/// Rows requested per query
const MAX_ROWS: u32 = 10_000;

/// Only hits from this repository are kept
const CENTRAL_REPOSITORY_ID: &str = "central";

const LETTERS: &str = "abcdefghijklmnopqrstuvwxyz";

/// Maven Central search harvester
pub struct MavenCentralSearch {
    client: HttpClient,
    base_url: String,
}

/// Maven Central search response
#[derive(Debug, Deserialize)]
struct MavenSearchResponse {
    response: MavenResponseBody,
}

/// Maven Central response body
#[derive(Debug, Deserialize)]
struct MavenResponseBody {
    docs: Vec<MavenArtifactDoc>,
}

/// One artifact hit
#[derive(Debug, Deserialize)]
struct MavenArtifactDoc {
    /// `group:artifact`
    id: String,
    #[serde(rename = "latestVersion")]
    latest_version: String,
    #[serde(rename = "repositoryId")]
    repository_id: String,
}

impl MavenArtifactDoc {
    fn coordinate(&self) -> Option<String> {
        (self.repository_id == CENTRAL_REPOSITORY_ID)
            .then(|| format!("{}:{}", self.id, self.latest_version))
    }
}

/// Every one-letter query followed by every two-letter query
pub fn letter_queries() -> Vec<String> {
    let singles = LETTERS.chars().map(String::from);
    let pairs = LETTERS
        .chars()
        .flat_map(|first| LETTERS.chars().map(move |second| format!("{}{}", first, second)));
    singles.chain(pairs).collect()
}

impl MavenCentralSearch {
    /// Create a harvester against the default endpoint
    pub fn new(client: HttpClient) -> Self {
        Self::with_base_url(client, MAVEN_CENTRAL_SEARCH_URL)
    }

    /// Create a harvester against a custom endpoint
    pub fn with_base_url(client: HttpClient, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    fn registry_name(&self) -> &'static str {
        "Maven Central"
    }

    /// Build search URL for a query
    fn build_url(&self, query: &str) -> String {
        format!("{}?q={}&rows={}&wt=json", self.base_url, query, MAX_ROWS)
    }

    /// Run one query, returning `group:artifact:latestVersion` of central hits
    pub async fn search(&self, query: &str) -> Result<BTreeSet<String>, RegistryError> {
        let url = self.build_url(query);
        let response: MavenSearchResponse = self
            .client
            .get_json(&url, query, self.registry_name())
            .await?;

        Ok(response
            .response
            .docs
            .iter()
            .filter_map(MavenArtifactDoc::coordinate)
            .collect())
    }

    /// Run every letter query and merge the results
    ///
    /// A failing query is logged and skipped; its error is returned alongside.
    pub async fn harvest(&self) -> (BTreeSet<String>, Vec<RegistryError>) {
        let queries = letter_queries();
        let mut coordinates = BTreeSet::new();
        let mut errors = Vec::new();

        for (index, query) in queries.iter().enumerate() {
            if index % 10 == 0 {
                info!(
                    progress = %format!("{:.1}%", index as f64 * 100.0 / queries.len() as f64),
                    "searching Maven Central"
                );
            }

            match self.search(query).await {
                Ok(found) => {
                    debug!(query = %query, hits = found.len(), "query done");
                    coordinates.extend(found);
                }
                Err(e) => {
                    warn!(query = %query, error = %e, "query failed");
                    errors.push(e);
                }
            }
        }

        (coordinates, errors)
    }
}
