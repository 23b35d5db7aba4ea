//! Manifest corpus detection and dependency parsing
//!
//! This module provides functionality to:
//! - Detect build-tool files below one or more source trees
//! - Parse dependency declarations from Maven POMs and Gradle build scripts

mod detector;
mod gradle;
mod pom_xml;

pub use detector::{
    detect_manifests, is_corpus_file, load_corpus, ManifestCorpus, ManifestFile, ManifestKind,
    CORPUS_EXTENSIONS,
};
pub use gradle::GradleParser;
pub(crate) use gradle::quoted_literal;
pub use pom_xml::PomParser;

use crate::domain::Coordinate;
use crate::error::ManifestError;

/// Trait for parsing dependency declarations out of a manifest
pub trait ManifestParser {
    /// Parse dependencies from a manifest file
    fn parse(&self, file: &ManifestFile) -> Result<Vec<Coordinate>, ManifestError>;

    /// Returns the manifest kind this parser handles
    fn kind(&self) -> ManifestKind;
}

/// Get a parser for the specified manifest kind
pub fn get_parser(kind: ManifestKind) -> Option<Box<dyn ManifestParser>> {
    match kind {
        ManifestKind::Maven => Some(Box::new(PomParser)),
        ManifestKind::Gradle => Some(Box::new(GradleParser)),
        ManifestKind::Other => None,
    }
}

/// Parse dependencies from a manifest; files without a parser contribute nothing
pub fn parse_manifest(file: &ManifestFile) -> Result<Vec<Coordinate>, ManifestError> {
    match get_parser(file.kind) {
        Some(parser) => parser.parse(file),
        None => Ok(Vec::new()),
    }
}
