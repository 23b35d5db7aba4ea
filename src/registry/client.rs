//! HTTP client shared foundation
//!
//! This module provides a shared HTTP client with:
//! - Configurable timeout, User-Agent and default headers
//! - Exponential backoff retry logic (max 3 retries) for GET requests
//! - Rate limit error handling
//! - A single-shot HEAD probe that only reports the status code

use crate::error::RegistryError;
use reqwest::header::HeaderMap;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use tracing::debug;

/// Default timeout for HTTP requests (30 seconds)
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default User-Agent header
pub const DEFAULT_USER_AGENT: &str = concat!("dep-harvest/", env!("CARGO_PKG_VERSION"));

/// Maximum number of retry attempts
const MAX_RETRIES: u32 = 3;

/// Base delay for exponential backoff (in milliseconds)
const BASE_DELAY_MS: u64 = 100;

/// HTTP client wrapper with retry logic
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    /// Create a new HTTP client with default settings
    pub fn new() -> Result<Self, RegistryError> {
        Self::with_config(DEFAULT_TIMEOUT, DEFAULT_USER_AGENT)
    }

    /// Create a new HTTP client with custom configuration
    pub fn with_config(timeout: Duration, user_agent: &str) -> Result<Self, RegistryError> {
        Self::with_default_headers(timeout, user_agent, HeaderMap::new())
    }

    /// Create a new HTTP client sending `headers` with every request
    pub fn with_default_headers(
        timeout: Duration,
        user_agent: &str,
        headers: HeaderMap,
    ) -> Result<Self, RegistryError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .default_headers(headers)
            .build()
            .map_err(|e| {
                RegistryError::network_error(
                    "",
                    "HTTP client",
                    format!("failed to create HTTP client: {}", e),
                )
            })?;

        Ok(Self { client })
    }

    /// Send a single HEAD request and return the status code
    ///
    /// No retries: the caller decides what a failed probe means.
    pub async fn head_status(
        &self,
        url: &str,
        resource: &str,
        registry: &str,
    ) -> Result<u16, RegistryError> {
        match self.client.head(url).send().await {
            Ok(response) => Ok(response.status().as_u16()),
            Err(e) if e.is_timeout() => Err(RegistryError::timeout(resource, registry)),
            Err(e) => Err(RegistryError::network_error(resource, registry, e.to_string())),
        }
    }

    /// Perform a GET request with retry logic and error context
    pub async fn get_with_context(
        &self,
        url: &str,
        resource: &str,
        registry: &str,
    ) -> Result<reqwest::Response, RegistryError> {
        let mut last_error = None;
        let mut delay = BASE_DELAY_MS;

        for attempt in 0..=MAX_RETRIES {
            match self.client.get(url).send().await {
                Ok(response) => {
                    // Check for rate limiting
                    if is_rate_limited(&response) {
                        last_error = Some(RegistryError::rate_limit_exceeded(registry));

                        if attempt < MAX_RETRIES {
                            debug!(url, attempt, "rate limited, backing off");
                            tokio::time::sleep(Duration::from_millis(delay)).await;
                            delay *= 2;
                            continue;
                        }
                        break;
                    }

                    if response.status() == StatusCode::NOT_FOUND {
                        return Err(RegistryError::not_found(resource, registry));
                    }

                    if response.status() == StatusCode::UNAUTHORIZED {
                        return Err(RegistryError::AuthenticationError {
                            registry: registry.to_string(),
                            message: format!("HTTP {}", response.status()),
                        });
                    }

                    if !response.status().is_success() {
                        let status = response.status();
                        return Err(RegistryError::network_error(
                            resource,
                            registry,
                            format!("HTTP {}", status),
                        ));
                    }

                    return Ok(response);
                }
                Err(e) => {
                    if e.is_timeout() {
                        last_error = Some(RegistryError::timeout(resource, registry));
                    } else {
                        last_error = Some(RegistryError::network_error(
                            resource,
                            registry,
                            e.to_string(),
                        ));
                    }

                    if attempt < MAX_RETRIES {
                        debug!(url, attempt, "request failed, retrying");
                        tokio::time::sleep(Duration::from_millis(delay)).await;
                        delay *= 2;
                    }
                }
            }
        }

        Err(last_error
            .unwrap_or_else(|| RegistryError::network_error(resource, registry, "unknown error")))
    }

    /// Perform a GET request and parse JSON response with retry on parse errors
    pub async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
        resource: &str,
        registry: &str,
    ) -> Result<T, RegistryError> {
        let mut last_error = None;
        let mut delay = BASE_DELAY_MS;

        for attempt in 0..=MAX_RETRIES {
            // Network errors are already retried in get_with_context
            let response = self.get_with_context(url, resource, registry).await?;

            match response.json::<T>().await {
                Ok(parsed) => return Ok(parsed),
                Err(e) => {
                    last_error = Some(RegistryError::InvalidResponse {
                        resource: resource.to_string(),
                        registry: registry.to_string(),
                        message: format!("failed to parse JSON: {}", e),
                    });

                    if attempt < MAX_RETRIES {
                        tokio::time::sleep(Duration::from_millis(delay)).await;
                        delay *= 2;
                    }
                }
            }
        }

        Err(last_error.unwrap_or_else(|| RegistryError::InvalidResponse {
            resource: resource.to_string(),
            registry: registry.to_string(),
            message: "unknown JSON parse error".to_string(),
        }))
    }
}

/// 429, or a 403 carrying an exhausted `x-ratelimit-remaining` header
fn is_rate_limited(response: &reqwest::Response) -> bool {
    match response.status() {
        StatusCode::TOO_MANY_REQUESTS => true,
        StatusCode::FORBIDDEN => response
            .headers()
            .get("x-ratelimit-remaining")
            .and_then(|v| v.to_str().ok())
            .map(|v| v.trim() == "0")
            .unwrap_or(false),
        _ => false,
    }
}
