//! Coordinate deduplication
//!
//! Coordinates sharing `group:name` collapse to the one with the greatest
//! version (plain string order). Three input shapes are supported:
//! - parsed [`Coordinate`]s
//! - raw `group:name:...:version` lines, optionally carrying an IDE library-list
//!   prefix such as `Maven: `
//! - a flattened dependency tree exported as JSON
//!   (`[{"type": ..., "group": ..., "name"|"module": ..., "version": ...}]`)

use crate::domain::{max_version, Coordinate, DependencyScope};
use serde::Deserialize;
use std::collections::{BTreeMap, BTreeSet};

/// Prefixes written by IDE library-list exports, longest first
const LIST_PREFIXES: [&str; 4] = [
    "implementation Maven:",
    "Maven:",
    "implementation Gradle:",
    "Gradle:",
];

/// Collapse `(key, version)` pairs to `key:max_version`
fn collapse<'a, I>(entries: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = (String, &'a str)>,
{
    let mut best: BTreeMap<String, &'a str> = BTreeMap::new();
    for (key, version) in entries {
        best.entry(key)
            .and_modify(|current| *current = max_version(*current, version))
            .or_insert(version);
    }

    best.into_iter()
        .map(|(key, version)| format!("{}:{}", key, version))
        .collect()
}

/// Deduplicate parsed coordinates
pub fn dedupe_coordinates(coordinates: &[Coordinate]) -> BTreeSet<String> {
    collapse(coordinates.iter().map(|c| (c.key(), c.version.as_str())))
}

/// Remove a known IDE export prefix from a list line
pub fn strip_list_prefix(line: &str) -> &str {
    let line = line.trim();
    LIST_PREFIXES
        .iter()
        .find_map(|prefix| line.strip_prefix(*prefix))
        .unwrap_or(line)
        .trim()
}

/// Deduplicate raw coordinate lines
///
/// The key is the first two segments and the version the last one. Blank lines
/// and lines with fewer than three segments are skipped.
pub fn dedupe_lines<'a, I>(lines: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = &'a str>,
{
    collapse(lines.into_iter().filter_map(|line| {
        let line = strip_list_prefix(line);
        let segments: Vec<&str> = line.split(':').collect();
        if segments.len() < 3 {
            return None;
        }
        let version = segments[segments.len() - 1];
        Some((format!("{}:{}", segments[0], segments[1]), version))
    }))
}

/// One entry of a flattened dependency tree export
#[derive(Debug, Clone, Deserialize)]
struct FlatDependency {
    #[serde(rename = "type", default)]
    kind: Option<String>,
    group: String,
    #[serde(alias = "module")]
    name: String,
    version: String,
}

impl From<FlatDependency> for Coordinate {
    fn from(dep: FlatDependency) -> Self {
        let scope = dep
            .kind
            .as_deref()
            .and_then(DependencyScope::from_gradle_keyword)
            .unwrap_or(DependencyScope::Main);
        Coordinate::new(scope, dep.group, dep.name, dep.version)
    }
}

/// Parse a flattened dependency tree export
pub fn parse_flattened_tree(json: &str) -> Result<Vec<Coordinate>, serde_json::Error> {
    let entries: Vec<FlatDependency> = serde_json::from_str(json)?;
    Ok(entries.into_iter().map(Coordinate::from).collect())
}

/// Deduplicate a flattened dependency tree export
pub fn dedupe_flattened_tree(json: &str) -> Result<BTreeSet<String>, serde_json::Error> {
    let coordinates = parse_flattened_tree(json)?;
    Ok(dedupe_coordinates(&coordinates))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_dedupe_coordinates_keeps_max() {
        let coords = vec![
            Coordinate::new(DependencyScope::Main, "g", "n", "1.0"),
            Coordinate::new(DependencyScope::Test, "g", "n", "1.2"),
            Coordinate::new(DependencyScope::Main, "g", "other", "3"),
        ];
        assert_eq!(dedupe_coordinates(&coords), set(&["g:n:1.2", "g:other:3"]));
    }

    #[test]
    fn test_dedupe_uses_string_order() {
        let coords = vec![
            Coordinate::new(DependencyScope::Main, "g", "n", "1.10"),
            Coordinate::new(DependencyScope::Main, "g", "n", "1.9"),
        ];
        assert_eq!(dedupe_coordinates(&coords), set(&["g:n:1.9"]));
    }

    #[test]
    fn test_dedupe_is_idempotent() {
        let once = dedupe_lines(["a:b:1", "a:b:2", "c:d:1"]);
        let twice = dedupe_lines(once.iter().map(String::as_str));
        assert_eq!(once, twice);
    }

    #[test]
    fn test_dedupe_lines_skips_short_and_blank() {
        let lines = ["", "   ", "junit:junit", "junit:junit:4.12", "junit:junit:4.13.2"];
        assert_eq!(dedupe_lines(lines), set(&["junit:junit:4.13.2"]));
    }

    #[test]
    fn test_dedupe_lines_uses_last_segment_as_version() {
        let lines = ["io.netty:netty-transport-native-epoll:linux-x86_64:4.1.100"];
        assert_eq!(
            dedupe_lines(lines),
            set(&["io.netty:netty-transport-native-epoll:4.1.100"])
        );
    }

    #[test]
    fn test_strip_list_prefix() {
        assert_eq!(strip_list_prefix("Maven: junit:junit:4.13.2"), "junit:junit:4.13.2");
        assert_eq!(
            strip_list_prefix("implementation Gradle: org.slf4j:slf4j-api:2.0.9"),
            "org.slf4j:slf4j-api:2.0.9"
        );
        assert_eq!(strip_list_prefix("  a:b:1  "), "a:b:1");
    }

    #[test]
    fn test_dedupe_lines_with_prefixes() {
        let lines = [
            "Maven: junit:junit:4.12",
            "implementation Maven: junit:junit:4.13.2",
            "Gradle: org.slf4j:slf4j-api:2.0.9",
        ];
        assert_eq!(
            dedupe_lines(lines),
            set(&["junit:junit:4.13.2", "org.slf4j:slf4j-api:2.0.9"])
        );
    }

    #[test]
    fn test_dedupe_flattened_tree() {
        let json = r#"[
            {"type": "implementation", "group": "org.slf4j", "name": "slf4j-api", "version": "2.0.7"},
            {"type": "testImplementation", "group": "org.slf4j", "module": "slf4j-api", "version": "2.0.9"},
            {"type": "compileOnly", "group": "org.projectlombok", "name": "lombok", "version": "1.18.30"}
        ]"#;
        assert_eq!(
            dedupe_flattened_tree(json).unwrap(),
            set(&["org.projectlombok:lombok:1.18.30", "org.slf4j:slf4j-api:2.0.9"])
        );
    }

    #[test]
    fn test_parse_flattened_tree_scope() {
        let json = r#"[{"type": "runtimeOnly", "group": "g", "name": "n", "version": "1"}]"#;
        let coords = parse_flattened_tree(json).unwrap();
        assert_eq!(coords[0].scope, DependencyScope::Runtime);
    }

    #[test]
    fn test_dedupe_flattened_tree_invalid_json() {
        assert!(dedupe_flattened_tree("{not json").is_err());
    }
}
