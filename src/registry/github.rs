//! GitHub code search harvester
//!
//! Finds build files with the code search API and downloads each hit through
//! the contents API, which returns the file base64-encoded.
//! API endpoints:
//! - `GET {api}/search/code?q=...&per_page=50&page=N`
//! - `GET {item.url}` (contents API)
//!
//! Search quota runs out quickly; an exhausted limit is waited out and the
//! request retried, without bound.

use crate::error::RegistryError;
use crate::registry::HttpClient;
use base64::Engine;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::Url;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info, warn};

/// GitHub REST API base URL
pub const GITHUB_API_URL: &str = "https://api.github.com";

/// Results requested per search page
const PAGE_SIZE: u32 = 50;

/// Default wait when the rate limit is exhausted (5 minutes)
pub const DEFAULT_RATE_LIMIT_WAIT: Duration = Duration::from_secs(300);

/// Kind of build file to search for
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum SearchKind {
    /// Maven `pom.xml`
    Pom,
    /// Gradle `build.gradle`
    Gradle,
}

impl SearchKind {
    /// GitHub linguist language name
    pub fn language(&self) -> &'static str {
        match self {
            SearchKind::Pom => "Maven POM",
            SearchKind::Gradle => "Gradle",
        }
    }

    /// File name given to downloaded content, so it parses as the right kind
    pub fn file_name(&self) -> &'static str {
        match self {
            SearchKind::Pom => "pom.xml",
            SearchKind::Gradle => "build.gradle",
        }
    }
}

/// A code search request
#[derive(Debug, Clone)]
pub struct CodeSearchQuery {
    pub kind: SearchKind,
    pub filename: Option<String>,
    pub term: Option<String>,
    /// Stop after this many files
    pub limit: usize,
}

impl CodeSearchQuery {
    /// Build the `q` parameter
    pub fn query_string(&self) -> String {
        let mut parts = Vec::new();
        if let Some(term) = self.term.as_deref().filter(|t| !t.trim().is_empty()) {
            parts.push(term.trim().to_string());
        }
        if let Some(filename) = self.filename.as_deref().filter(|f| !f.trim().is_empty()) {
            parts.push(format!("filename:{}", filename.trim()));
        }
        parts.push(format!("language:\"{}\"", self.kind.language()));
        parts.join(" ")
    }
}

#[derive(Debug, Deserialize)]
struct CodeSearchResponse {
    #[serde(default)]
    items: Vec<CodeSearchItem>,
}

#[derive(Debug, Deserialize)]
struct CodeSearchItem {
    path: String,
    /// Contents API URL of the file
    url: String,
}

/// A file downloaded through the contents API
#[derive(Debug, Clone, Deserialize)]
pub struct GithubContent {
    /// File name, e.g. `build.gradle`
    pub name: String,
    pub path: String,
    pub sha: String,
    pub url: String,
    pub download_url: Option<String>,
    /// Base64 content, wrapped at 60 columns
    pub content: String,
}

impl GithubContent {
    /// Decode the base64 content to text
    pub fn decode_content(&self) -> Result<String, RegistryError> {
        let compact: String = self
            .content
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect();
        let bytes = base64::engine::general_purpose::STANDARD
            .decode(compact)
            .map_err(|e| RegistryError::InvalidResponse {
                resource: self.path.clone(),
                registry: "GitHub".to_string(),
                message: format!("invalid base64 content: {}", e),
            })?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

/// GitHub code search client
pub struct GithubCodeSearch {
    client: HttpClient,
    api_url: String,
    rate_limit_wait: Duration,
}

/// Default headers for the GitHub API, with an optional token
pub fn github_headers(token: Option<&str>) -> Result<HeaderMap, RegistryError> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("application/vnd.github+json"));

    if let Some(token) = token.filter(|t| !t.is_empty()) {
        let value = HeaderValue::from_str(&format!("Bearer {}", token)).map_err(|e| {
            RegistryError::AuthenticationError {
                registry: "GitHub".to_string(),
                message: format!("invalid token: {}", e),
            }
        })?;
        headers.insert(AUTHORIZATION, value);
    }

    Ok(headers)
}

impl GithubCodeSearch {
    /// Create a client; `client` should carry [`github_headers`]
    pub fn new(client: HttpClient, api_url: impl Into<String>, rate_limit_wait: Duration) -> Self {
        Self {
            client,
            api_url: api_url.into().trim_end_matches('/').to_string(),
            rate_limit_wait,
        }
    }

    fn registry_name(&self) -> &'static str {
        "GitHub"
    }

    fn search_url(&self, query: &CodeSearchQuery, page: u32) -> Result<Url, RegistryError> {
        Url::parse_with_params(
            &format!("{}/search/code", self.api_url),
            &[
                ("q", query.query_string()),
                ("per_page", PAGE_SIZE.to_string()),
                ("page", page.to_string()),
            ],
        )
        .map_err(|e| RegistryError::network_error("search", self.registry_name(), e.to_string()))
    }

    /// GET JSON, waiting out exhausted rate limits
    async fn get_json_patiently<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
        resource: &str,
    ) -> Result<T, RegistryError> {
        loop {
            match self.client.get_json(url, resource, self.registry_name()).await {
                Err(e) if e.is_rate_limited() => {
                    warn!(
                        wait_secs = self.rate_limit_wait.as_secs(),
                        "GitHub rate limit exhausted, waiting"
                    );
                    tokio::time::sleep(self.rate_limit_wait).await;
                }
                other => return other,
            }
        }
    }

    /// Search for build files and download up to `query.limit` of them
    ///
    /// A file that fails to download is logged and skipped.
    pub async fn search(&self, query: &CodeSearchQuery) -> Result<Vec<GithubContent>, RegistryError> {
        let mut files = Vec::new();
        let mut page = 1;

        info!(q = %query.query_string(), limit = query.limit, "searching GitHub");

        while files.len() < query.limit {
            let url = self.search_url(query, page)?;
            let response: CodeSearchResponse = self
                .get_json_patiently(url.as_str(), "search")
                .await?;
            if response.items.is_empty() {
                break;
            }

            for item in response.items {
                if files.len() >= query.limit {
                    break;
                }
                match self.get_json_patiently::<GithubContent>(&item.url, &item.path).await {
                    Ok(content) => files.push(content),
                    Err(e) => warn!(path = %item.path, error = %e, "failed to fetch content"),
                }
            }

            debug!(page, files = files.len(), "search page done");
            page += 1;
        }

        info!(files = files.len(), "GitHub search finished");
        Ok(files)
    }
}
