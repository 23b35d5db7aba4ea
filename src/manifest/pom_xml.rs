//! Maven POM dependency parser
//!
//! Reads `<dependency>` entries from both `<project><dependencies>` and
//! `<project><dependencyManagement><dependencies>`. Dependencies of plugins and
//! profiles are ignored.

use crate::domain::{Coordinate, DependencyScope};
use crate::error::ManifestError;
use crate::manifest::{ManifestFile, ManifestKind, ManifestParser};
use roxmltree::{Document, Node};

/// Parser for `pom.xml` files
pub struct PomParser;

/// Text of the first direct child element with the given tag name
///
/// All text nodes are joined, so comments inside the element are skipped.
fn child_text(node: Node<'_, '_>, tag: &str) -> Option<String> {
    let element = child_element(node, tag)?;
    let text: String = element
        .children()
        .filter(Node::is_text)
        .filter_map(|child| child.text())
        .collect();
    Some(text.trim().to_string())
}

fn child_element<'a, 'input>(node: Node<'a, 'input>, tag: &str) -> Option<Node<'a, 'input>> {
    node.children().find(|child| child.has_tag_name(tag))
}

/// Coordinates of every `<dependency>` directly below a `<dependencies>` node
fn dependencies_of(dependencies: Node<'_, '_>) -> Vec<Coordinate> {
    dependencies
        .children()
        .filter(|child| child.has_tag_name("dependency"))
        .filter_map(|dependency| {
            let group = child_text(dependency, "groupId").filter(|g| !g.is_empty())?;
            let name = child_text(dependency, "artifactId").filter(|a| !a.is_empty())?;
            let version = child_text(dependency, "version").unwrap_or_default();
            let scope = DependencyScope::from_maven_scope(
                &child_text(dependency, "scope").unwrap_or_default(),
            );
            Some(Coordinate::new(scope, group, name, version))
        })
        .collect()
}

impl PomParser {
    /// Parse POM content
    pub fn parse_str(&self, content: &str) -> Result<Vec<Coordinate>, roxmltree::Error> {
        let doc = Document::parse(content)?;
        let project = doc.root_element();
        if !project.has_tag_name("project") {
            return Ok(Vec::new());
        }

        let mut coordinates = Vec::new();

        if let Some(dependencies) = child_element(project, "dependencies") {
            coordinates.extend(dependencies_of(dependencies));
        }

        if let Some(dependencies) = child_element(project, "dependencyManagement")
            .and_then(|management| child_element(management, "dependencies"))
        {
            coordinates.extend(dependencies_of(dependencies));
        }

        Ok(coordinates)
    }
}

impl ManifestParser for PomParser {
    fn parse(&self, file: &ManifestFile) -> Result<Vec<Coordinate>, ManifestError> {
        self.parse_str(&file.content())
            .map_err(|e| ManifestError::xml_parse(&file.path, e.to_string()))
    }

    fn kind(&self) -> ManifestKind {
        ManifestKind::Maven
    }
}
