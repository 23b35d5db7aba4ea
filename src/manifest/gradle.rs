//! Gradle dependency declaration parser
//!
//! Handles the Groovy declaration styles used with the harvested configurations
//! (`implementation`, `testImplementation`, `runtimeOnly`):
//! - String notation: `implementation 'group:name:version'`, `implementation("group:name:version")`
//! - Map notation: `implementation group: 'x', name: 'y', version: 'z'`
//! - Variable references in versions (`${junitVersion}`, `version: junitVersion`),
//!   left as placeholders for the variable resolver
//!
//! Anything else (plugins, repositories, other configurations, malformed lines)
//! is dropped without error.

use crate::domain::{Coordinate, DependencyScope, PLACEHOLDER_MARKER};
use crate::error::ManifestError;
use crate::manifest::{ManifestFile, ManifestKind, ManifestParser};
use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;

/// Parser for `*.gradle` build scripts
pub struct GradleParser;

/// Substring that marks a map-notation declaration
const NAMED_FORM_MARKER: &str = " group:";

// One `key: value` attribute of a map-notation declaration.
// Value is single-quoted, double-quoted or a bare identifier reference.
static NAMED_ATTRIBUTE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(\w+)\s*:\s*(?:'([^']*)'|"([^"]*)"|([A-Za-z_$][\w.${}]*))"#).unwrap()
});

/// A recognised declaration line, dispatched on its notation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GradleDeclaration<'a> {
    /// `keyword 'group:name:version'` and its parenthesised forms
    Positional {
        scope: DependencyScope,
        body: &'a str,
    },
    /// `keyword group: 'g', name: 'n', version: 'v'`
    Named {
        scope: DependencyScope,
        body: &'a str,
    },
}

impl<'a> GradleDeclaration<'a> {
    /// Classify a raw line; `None` if it does not start with a harvested keyword
    fn classify(line: &'a str) -> Option<Self> {
        let trimmed = line.trim();
        let keyword_len = trimmed
            .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
            .unwrap_or(trimmed.len());
        let (keyword, body) = trimmed.split_at(keyword_len);
        let scope = DependencyScope::from_gradle_keyword(keyword)?;

        if line.contains(NAMED_FORM_MARKER) {
            Some(GradleDeclaration::Named { scope, body })
        } else {
            Some(GradleDeclaration::Positional { scope, body })
        }
    }

    fn into_coordinate(self) -> Option<Coordinate> {
        match self {
            GradleDeclaration::Positional { scope, body } => parse_positional(scope, body),
            GradleDeclaration::Named { scope, body } => parse_named(scope, body),
        }
    }
}

/// Split a leading quoted literal off `s`, returning its content and the rest
pub(crate) fn quoted_literal(s: &str) -> Option<(&str, &str)> {
    let quote = s.chars().next().filter(|c| *c == '\'' || *c == '"')?;
    let inner = &s[1..];
    let end = inner.find(quote)?;
    Some((&inner[..end], &inner[end + 1..]))
}

fn parse_positional(scope: DependencyScope, body: &str) -> Option<Coordinate> {
    let rest = body.trim_start();
    let rest = rest.strip_prefix('(').unwrap_or(rest).trim_start();
    let (literal, _) = quoted_literal(rest)?;

    let pieces: Vec<&str> = literal.split(':').map(str::trim).collect();
    match pieces.as_slice() {
        [group, name, version]
            if !group.is_empty() && !name.is_empty() && !version.is_empty() =>
        {
            Some(Coordinate::new(scope, *group, *name, *version))
        }
        _ => None,
    }
}

fn parse_named(scope: DependencyScope, body: &str) -> Option<Coordinate> {
    let mut attributes: HashMap<&str, String> = HashMap::new();

    for caps in NAMED_ATTRIBUTE.captures_iter(body) {
        let key = caps.get(1).map(|m| m.as_str())?;
        let value = if let Some(quoted) = caps.get(2).or_else(|| caps.get(3)) {
            quoted.as_str().trim().to_string()
        } else {
            let reference = caps.get(4).map(|m| m.as_str())?.trim();
            as_placeholder(reference)
        };
        attributes.entry(key).or_insert(value);
    }

    let group = attributes.get("group").filter(|v| !v.is_empty())?;
    let name = attributes.get("name").filter(|v| !v.is_empty())?;
    let version = attributes.get("version").filter(|v| !v.is_empty())?;
    Some(Coordinate::new(scope, group, name, version))
}

/// Turn a bare identifier reference into a `${name}` placeholder
fn as_placeholder(reference: &str) -> String {
    if reference.starts_with(PLACEHOLDER_MARKER) {
        reference.to_string()
    } else {
        format!("${{{}}}", reference)
    }
}

impl GradleParser {
    /// Parse a single line; `None` if it is not a well-formed declaration
    pub fn parse_line(&self, line: &str) -> Option<Coordinate> {
        GradleDeclaration::classify(line)?.into_coordinate()
    }

    /// Parse a sequence of lines
    pub fn parse_lines<'a, I>(&self, lines: I) -> Vec<Coordinate>
    where
        I: IntoIterator<Item = &'a str>,
    {
        lines
            .into_iter()
            .filter_map(|line| self.parse_line(line))
            .collect()
    }
}

impl ManifestParser for GradleParser {
    fn parse(&self, file: &ManifestFile) -> Result<Vec<Coordinate>, ManifestError> {
        Ok(self.parse_lines(file.lines.iter().map(String::as_str)))
    }

    fn kind(&self) -> ManifestKind {
        ManifestKind::Gradle
    }
}
