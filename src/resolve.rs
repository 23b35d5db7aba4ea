//! Version placeholder resolution
//!
//! A coordinate whose version is `${name}` (or `$name`) is resolved by scanning
//! the manifest corpus, in path order, for the first line that defines `name`.
//! Lines that merely mention the name are not definitions: lines using it as
//! `${name}` or `$name`, and dependency declaration lines, are skipped instead
//! of taking the first line that contains the name at all.
//! The value is cut out of that line with a small tokenizer:
//! - XML files: `<name>value</name>`
//! - everything else: `name = 'value'`, `name: "value"`, `name=value`,
//!   with a looser fallback for `ext['name'] = 'value'` style lines
//!
//! Coordinates whose variable cannot be found, or whose value does not look
//! like a version, are dropped.

use crate::domain::{Coordinate, DependencyScope, PLACEHOLDER_MARKER};
use crate::manifest::{quoted_literal, ManifestCorpus, ManifestFile};
use serde::Serialize;
use std::collections::HashMap;
use tracing::debug;

/// Delimiters used to cut a value out of an XML property line
const XML_DELIMITERS: [&str; 2] = ["<", ">"];

/// Delimiters used by the fallback cut for Gradle/properties lines
const PROPERTY_DELIMITERS: [&str; 6] = ["ext", "[", "]", "'", "\"", "="];

/// Characters a resolved version may never contain
const REJECTED_CHARS: [char; 5] = [' ', '$', '{', '}', '@'];

/// Counters of one resolution run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ResolveStats {
    /// Coordinates that carried a placeholder version
    pub placeholders: usize,
    /// Placeholders replaced by a concrete version
    pub resolved: usize,
    /// Placeholders dropped (undefined variable or unusable value)
    pub dropped: usize,
}

/// Returns the bare variable name of a placeholder version
///
/// `${junitVersion}` and `$junitVersion` both give `junitVersion`.
pub fn variable_name(placeholder: &str) -> &str {
    let name = placeholder
        .strip_prefix("${")
        .or_else(|| placeholder.strip_prefix(PLACEHOLDER_MARKER))
        .unwrap_or(placeholder);
    name.strip_suffix('}').unwrap_or(name)
}

/// Resolves placeholder versions against a manifest corpus
pub struct VariableResolver<'c> {
    corpus: &'c ManifestCorpus,
    cache: HashMap<String, Option<String>>,
}

impl<'c> VariableResolver<'c> {
    /// Create a resolver over the given corpus
    pub fn new(corpus: &'c ManifestCorpus) -> Self {
        Self {
            corpus,
            cache: HashMap::new(),
        }
    }

    /// Resolve a single placeholder to a concrete version
    ///
    /// Results are memoised per variable name.
    pub fn resolve(&mut self, placeholder: &str) -> Option<String> {
        let name = variable_name(placeholder);
        if name.trim().is_empty() {
            return None;
        }

        if let Some(cached) = self.cache.get(name) {
            return cached.clone();
        }

        let value = self.lookup(name);
        self.cache.insert(name.to_string(), value.clone());
        value
    }

    fn lookup(&self, name: &str) -> Option<String> {
        let Some((file, line)) = find_definition(self.corpus, name) else {
            debug!(variable = name, "no definition found");
            return None;
        };

        let raw = if file.is_xml() {
            xml_value(line, name)
        } else {
            property_value(line, name)
        };

        match clean_value(&raw) {
            Some(value) => {
                debug!(variable = name, value = %value, file = %file.path.display(), "resolved variable");
                Some(value)
            }
            None => {
                debug!(variable = name, raw = %raw, file = %file.path.display(), "rejected variable value");
                None
            }
        }
    }

    /// Resolve every placeholder version in `coordinates`
    ///
    /// Coordinates with a concrete version pass through untouched.
    pub fn resolve_all<I>(&mut self, coordinates: I) -> (Vec<Coordinate>, ResolveStats)
    where
        I: IntoIterator<Item = Coordinate>,
    {
        let mut stats = ResolveStats::default();
        let mut result = Vec::new();

        for coordinate in coordinates {
            if !coordinate.is_placeholder() {
                result.push(coordinate);
                continue;
            }

            stats.placeholders += 1;
            match self.resolve(&coordinate.version) {
                Some(version) => {
                    stats.resolved += 1;
                    result.push(coordinate.with_version(version));
                }
                None => {
                    stats.dropped += 1;
                    debug!(coordinate = %coordinate, "dropping unresolved coordinate");
                }
            }
        }

        (result, stats)
    }
}

/// Resolve placeholder versions of `coordinates` against `corpus`
pub fn resolve_placeholders(
    coordinates: Vec<Coordinate>,
    corpus: &ManifestCorpus,
) -> (Vec<Coordinate>, ResolveStats) {
    VariableResolver::new(corpus).resolve_all(coordinates)
}

/// First line of the corpus that defines `name`
fn find_definition<'a>(corpus: &'a ManifestCorpus, name: &str) -> Option<(&'a ManifestFile, &'a str)> {
    corpus.files().iter().find_map(|file| {
        file.lines
            .iter()
            .find(|line| line.contains(name) && !is_usage(line, name))
            .map(|line| (file, line.as_str()))
    })
}

/// A line that references `name` rather than defining it
fn is_usage(line: &str, name: &str) -> bool {
    line.contains(&format!("${{{}}}", name))
        || line.contains(&format!("{}{}", PLACEHOLDER_MARKER, name))
        || is_declaration(line)
}

fn is_declaration(line: &str) -> bool {
    let trimmed = line.trim_start();
    let keyword_len = trimmed
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
        .unwrap_or(trimmed.len());
    DependencyScope::from_gradle_keyword(&trimmed[..keyword_len]).is_some()
}

fn xml_value(line: &str, name: &str) -> String {
    let mut delimiters = XML_DELIMITERS.to_vec();
    delimiters.push(name);
    split_concat(line, &delimiters)
}

/// Value of `name = value` / `name: value` on a Gradle or properties line
fn property_value(line: &str, name: &str) -> String {
    tokenize_assignment(line, name).unwrap_or_else(|| {
        let mut delimiters = PROPERTY_DELIMITERS.to_vec();
        delimiters.push(name);
        split_concat(line, &delimiters)
    })
}

fn tokenize_assignment(line: &str, name: &str) -> Option<String> {
    let start = line.find(name)? + name.len();
    let rest = line[start..].trim_start_matches(|c: char| c.is_whitespace() || matches!(c, '\'' | '"' | ']'));
    let rest = rest.strip_prefix(['=', ':'])?.trim_start();

    if let Some((literal, _)) = quoted_literal(rest) {
        return Some(literal.to_string());
    }

    let token: String = rest
        .chars()
        .take_while(|c| !c.is_whitespace() && !matches!(c, ',' | ';' | ')' | '}' | ']' | '\'' | '"'))
        .collect();
    (!token.is_empty()).then_some(token)
}

/// Split `line` on any of `delimiters` and concatenate the non-blank fragments
fn split_concat(line: &str, delimiters: &[&str]) -> String {
    let mut fragments = Vec::new();
    let mut start = 0;
    let mut i = 0;

    while i < line.len() {
        let rest = &line[i..];
        if let Some(delimiter) = delimiters
            .iter()
            .find(|d| !d.is_empty() && rest.starts_with(**d))
        {
            fragments.push(&line[start..i]);
            i += delimiter.len();
            start = i;
        } else {
            i += rest.chars().next().map_or(1, char::len_utf8);
        }
    }
    fragments.push(&line[start..]);

    fragments
        .into_iter()
        .filter(|fragment| !fragment.trim().is_empty())
        .collect()
}

fn clean_value(raw: &str) -> Option<String> {
    let value = raw.replace('/', "");
    let value = value.trim();
    if value.is_empty() || value.contains(REJECTED_CHARS) {
        None
    } else {
        Some(value.to_string())
    }
}
