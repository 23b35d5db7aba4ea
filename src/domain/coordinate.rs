//! Canonical dependency coordinate

use super::DependencyScope;
use crate::error::CoordinateError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Marker that starts an unresolved version placeholder (`${name}`)
pub const PLACEHOLDER_MARKER: char = '$';

/// A Maven/Gradle dependency coordinate
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coordinate {
    /// Declaration scope
    #[serde(rename = "type")]
    pub scope: DependencyScope,
    /// Group id (e.g. `org.apache.commons`)
    pub group: String,
    /// Artifact id
    #[serde(alias = "module")]
    pub name: String,
    /// Version, possibly a `${name}` placeholder before resolution
    pub version: String,
}

impl Coordinate {
    /// Creates a new coordinate
    pub fn new(
        scope: DependencyScope,
        group: impl Into<String>,
        name: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            scope,
            group: group.into(),
            name: name.into(),
            version: version.into(),
        }
    }

    /// Parse a `group:name:version` string.
    ///
    /// The artifact name is always the second segment and the version the last
    /// one, so `group:name:classifier:version` keeps `name` and `version`.
    pub fn parse_gav(s: &str) -> Result<Self, CoordinateError> {
        let parts: Vec<&str> = s.trim().split(':').map(str::trim).collect();
        if parts.len() < 3 {
            return Err(CoordinateError::TooFewSegments {
                coordinate: s.to_string(),
                found: parts.len(),
            });
        }

        let group = parts[0];
        let name = parts[1];
        let version = parts[parts.len() - 1];
        if group.is_empty() || name.is_empty() || version.is_empty() {
            return Err(CoordinateError::EmptySegment {
                coordinate: s.to_string(),
            });
        }

        Ok(Self::new(DependencyScope::Main, group, name, version))
    }

    /// Returns the deduplication key `group:name`
    pub fn key(&self) -> String {
        format!("{}:{}", self.group, self.name)
    }

    /// Returns true if the version is still an unresolved placeholder
    pub fn is_placeholder(&self) -> bool {
        self.version.starts_with(PLACEHOLDER_MARKER)
    }

    /// Returns true if group and name are usable identifiers
    pub fn has_clean_identity(&self) -> bool {
        is_clean_identifier(&self.group) && is_clean_identifier(&self.name)
    }

    /// Returns a copy of this coordinate with another version
    pub fn with_version(&self, version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            ..self.clone()
        }
    }
}

fn is_clean_identifier(s: &str) -> bool {
    !s.trim().is_empty() && !s.contains(char::is_whitespace) && !s.contains(PLACEHOLDER_MARKER)
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.group, self.name, self.version)
    }
}
