//! Layered run configuration
//!
//! Values come from, in increasing precedence:
//! 1. built-in defaults
//! 2. a TOML file (`--config <file>`, or `dep-harvest.toml` in the working directory)
//! 3. environment (`GITHUB_TOKEN`)
//! 4. command-line flags, applied by the caller
//!
//! ```toml
//! repository_url = "https://repo.maven.apache.org/maven2"
//!
//! [verify]
//! cooldown_secs = 60
//! exception_threshold = 3
//! checkpoint_dir = "checkpoints"
//!
//! [github]
//! files_limit = 1000
//! ```

use crate::error::{ConfigError, RegistryError};
use crate::registry::{
    github_headers, HttpClient, DEFAULT_RATE_LIMIT_WAIT, DEFAULT_REPOSITORY_URL,
    DEFAULT_TIMEOUT, DEFAULT_USER_AGENT, GITHUB_API_URL, MAVEN_CENTRAL_SEARCH_URL,
};
use crate::verify::{VerifyOptions, DEFAULT_COOLDOWN, DEFAULT_EXCEPTION_THRESHOLD};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Configuration file looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "dep-harvest.toml";

/// Environment variable holding the GitHub token
pub const GITHUB_TOKEN_ENV: &str = "GITHUB_TOKEN";

/// Complete run configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HarvestConfig {
    /// Maven 2 layout repository probed by `verify` and `check`
    pub repository_url: String,
    /// Maven Central Solr search endpoint
    pub search_url: String,
    pub verify: VerifyConfig,
    pub http: HttpConfig,
    pub github: GithubConfig,
}

/// `[verify]` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct VerifyConfig {
    pub cooldown_secs: u64,
    pub exception_threshold: u32,
    pub max_passes: Option<u32>,
    pub checkpoint_dir: PathBuf,
}

/// `[http]` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HttpConfig {
    pub timeout_secs: u64,
    pub user_agent: String,
}

/// `[github]` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GithubConfig {
    pub token: Option<String>,
    pub api_url: String,
    pub rate_limit_wait_secs: u64,
    pub files_limit: usize,
}

impl Default for HarvestConfig {
    fn default() -> Self {
        Self {
            repository_url: DEFAULT_REPOSITORY_URL.to_string(),
            search_url: MAVEN_CENTRAL_SEARCH_URL.to_string(),
            verify: VerifyConfig::default(),
            http: HttpConfig::default(),
            github: GithubConfig::default(),
        }
    }
}

impl Default for VerifyConfig {
    fn default() -> Self {
        Self {
            cooldown_secs: DEFAULT_COOLDOWN.as_secs(),
            exception_threshold: DEFAULT_EXCEPTION_THRESHOLD,
            max_passes: None,
            checkpoint_dir: PathBuf::from("."),
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_TIMEOUT.as_secs(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl Default for GithubConfig {
    fn default() -> Self {
        Self {
            token: None,
            api_url: GITHUB_API_URL.to_string(),
            rate_limit_wait_secs: DEFAULT_RATE_LIMIT_WAIT.as_secs(),
            files_limit: 100,
        }
    }
}

impl HarvestConfig {
    /// Parse configuration from TOML text; `path` is only used in errors
    pub fn from_toml_str(content: &str, path: &Path) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::TomlParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Load configuration from a TOML file
    pub fn load_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_toml_str(&content, path)
    }

    /// Load the explicit file if given, else `dep-harvest.toml` in `dir` if present,
    /// else defaults
    pub fn discover(explicit: Option<&Path>, dir: &Path) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::load_file(path);
        }

        let candidate = dir.join(CONFIG_FILE_NAME);
        if candidate.is_file() {
            Self::load_file(&candidate)
        } else {
            Ok(Self::default())
        }
    }

    /// Apply environment overrides
    pub fn apply_env(&mut self) {
        self.apply_env_with(|key| std::env::var(key).ok());
    }

    /// Apply environment overrides read through `lookup`
    pub fn apply_env_with<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(token) = lookup(GITHUB_TOKEN_ENV).filter(|t| !t.trim().is_empty()) {
            self.github.token = Some(token.trim().to_string());
        }
    }

    /// Check value ranges
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.verify.exception_threshold == 0 {
            return Err(invalid("verify.exception_threshold", "must be at least 1"));
        }
        if self.verify.max_passes == Some(0) {
            return Err(invalid("verify.max_passes", "must be at least 1"));
        }
        if self.http.timeout_secs == 0 {
            return Err(invalid("http.timeout_secs", "must be at least 1"));
        }
        for (key, url) in [
            ("repository_url", &self.repository_url),
            ("search_url", &self.search_url),
            ("github.api_url", &self.github.api_url),
        ] {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(invalid(key, format!("'{}' is not an http(s) URL", url)));
            }
        }
        Ok(())
    }

    /// Batch runner settings
    pub fn verify_options(&self) -> VerifyOptions {
        VerifyOptions {
            cooldown: Duration::from_secs(self.verify.cooldown_secs),
            exception_threshold: self.verify.exception_threshold,
            max_passes: self.verify.max_passes,
        }
    }

    /// HTTP client for the Maven repository and Maven Central
    pub fn http_client(&self) -> Result<HttpClient, RegistryError> {
        HttpClient::with_config(Duration::from_secs(self.http.timeout_secs), &self.http.user_agent)
    }

    /// HTTP client carrying GitHub API headers
    pub fn github_client(&self) -> Result<HttpClient, RegistryError> {
        HttpClient::with_default_headers(
            Duration::from_secs(self.http.timeout_secs),
            &self.http.user_agent,
            github_headers(self.github.token.as_deref())?,
        )
    }
}

fn invalid(key: &str, message: impl Into<String>) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.to_string(),
        message: message.into(),
    }
}
