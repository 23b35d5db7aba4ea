//! Dependency scope (declaration type) definitions

use serde::{Deserialize, Serialize};
use std::fmt;

/// Scope a dependency was declared with
///
/// Maven scopes and Gradle configurations are both folded into this
/// closed set. The serialized form uses the Gradle configuration keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DependencyScope {
    /// Main/compile classpath (`implementation`, Maven `compile`)
    #[serde(rename = "implementation")]
    Main,
    /// Test-only classpath (`testImplementation`, Maven `test`)
    #[serde(rename = "testImplementation")]
    Test,
    /// Runtime-only classpath (`runtimeOnly`, Maven `runtime`)
    #[serde(rename = "runtimeOnly")]
    Runtime,
}

impl DependencyScope {
    /// Map a Maven `<scope>` value; unknown or missing scopes are main scope
    pub fn from_maven_scope(scope: &str) -> Self {
        match scope.trim() {
            "test" => DependencyScope::Test,
            "compile" => DependencyScope::Main,
            "runtime" => DependencyScope::Runtime,
            _ => DependencyScope::Main,
        }
    }

    /// Map a Gradle configuration keyword, if it is one we harvest
    pub fn from_gradle_keyword(keyword: &str) -> Option<Self> {
        Self::all()
            .iter()
            .copied()
            .find(|scope| scope.gradle_keyword() == keyword)
    }

    /// Returns the Gradle configuration keyword for this scope
    pub fn gradle_keyword(&self) -> &'static str {
        match self {
            DependencyScope::Main => "implementation",
            DependencyScope::Test => "testImplementation",
            DependencyScope::Runtime => "runtimeOnly",
        }
    }

    /// Returns all scopes
    pub fn all() -> &'static [DependencyScope] {
        &[
            DependencyScope::Main,
            DependencyScope::Test,
            DependencyScope::Runtime,
        ]
    }
}

impl fmt::Display for DependencyScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.gradle_keyword())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_maven_scope() {
        assert_eq!(DependencyScope::from_maven_scope("test"), DependencyScope::Test);
        assert_eq!(DependencyScope::from_maven_scope("compile"), DependencyScope::Main);
        assert_eq!(
            DependencyScope::from_maven_scope("runtime"),
            DependencyScope::Runtime
        );
    }

    #[test]
    fn test_from_maven_scope_fallback() {
        assert_eq!(DependencyScope::from_maven_scope(""), DependencyScope::Main);
        assert_eq!(DependencyScope::from_maven_scope("provided"), DependencyScope::Main);
        assert_eq!(DependencyScope::from_maven_scope("import"), DependencyScope::Main);
    }

    #[test]
    fn test_from_gradle_keyword() {
        assert_eq!(
            DependencyScope::from_gradle_keyword("implementation"),
            Some(DependencyScope::Main)
        );
        assert_eq!(
            DependencyScope::from_gradle_keyword("testImplementation"),
            Some(DependencyScope::Test)
        );
        assert_eq!(
            DependencyScope::from_gradle_keyword("runtimeOnly"),
            Some(DependencyScope::Runtime)
        );
        assert_eq!(DependencyScope::from_gradle_keyword("api"), None);
        assert_eq!(DependencyScope::from_gradle_keyword("compileOnly"), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(DependencyScope::Test.to_string(), "testImplementation");
    }

    #[test]
    fn test_serde_uses_gradle_keyword() {
        let json = serde_json::to_string(&DependencyScope::Runtime).unwrap();
        assert_eq!(json, "\"runtimeOnly\"");
        let parsed: DependencyScope = serde_json::from_str("\"testImplementation\"").unwrap();
        assert_eq!(parsed, DependencyScope::Test);
    }
}
