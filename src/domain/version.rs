//! Version ordering used when collapsing duplicate coordinates
//!
//! Versions are compared as plain strings. `"1.10"` sorts below `"1.9"`;
//! generated fixtures depend on this tie-break, so it is kept as is.

use std::cmp::Ordering;

/// Compare two version strings lexicographically
pub fn compare_versions(a: &str, b: &str) -> Ordering {
    a.cmp(b)
}

/// Pick the greater of two versions
pub fn max_version<'a>(a: &'a str, b: &'a str) -> &'a str {
    match compare_versions(a, b) {
        Ordering::Less => b,
        _ => a,
    }
}
