//! Orchestrator for the harvest and verification workflows
//!
//! This module provides:
//! - Harvest coordination: detect → parse → filter → resolve → dedupe
//! - Remote harvesting through Maven Central and GitHub code search
//! - List merging for raw lists and flattened dependency trees
//! - Batch verification and single probes against the Maven repository
//! - Error handling with partial continuation

use crate::config::HarvestConfig;
use crate::dedup::{dedupe_coordinates, dedupe_flattened_tree, dedupe_lines};
use crate::domain::{
    CheckResult, Coordinate, HarvestSummary, ManifestHarvest, ProbeOutcome, VerifySummary,
};
use crate::error::{AppError, CheckpointError, ManifestError, RegistryError};
use crate::lists::read_lines;
use crate::manifest::{load_corpus, parse_manifest, ManifestCorpus, ManifestFile};
use crate::progress::Progress;
use crate::registry::{
    ArtifactProbe, CodeSearchQuery, GithubCodeSearch, MavenCentralSearch, MavenRepository,
};
use crate::resolve::resolve_placeholders;
use crate::verify::{BatchRunner, CheckpointStore};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Result of a harvest
#[derive(Debug, Default)]
pub struct HarvestResult {
    /// Unique `group:name:version` coordinates
    pub coordinates: BTreeSet<String>,
    /// Counters of the run
    pub summary: HarvestSummary,
    /// Files that could not be read or parsed
    pub errors: Vec<ManifestError>,
}

/// Parse, filter and resolve every manifest of `corpus`
///
/// Coordinates come back with concrete versions only.
fn collect_coordinates(
    corpus: &ManifestCorpus,
    summary: &mut HarvestSummary,
    errors: &mut Vec<ManifestError>,
) -> Vec<Coordinate> {
    let mut declared = Vec::new();

    for file in corpus.files() {
        match parse_manifest(file) {
            Ok(coordinates) => {
                if !coordinates.is_empty() {
                    debug!(path = %file.path.display(), count = coordinates.len(), "parsed manifest");
                    summary
                        .manifests
                        .push(ManifestHarvest::new(&file.path, coordinates.len()));
                }
                declared.extend(coordinates);
            }
            Err(e) => {
                warn!(error = %e, "skipping manifest");
                errors.push(e);
            }
        }
    }
    summary.corpus_files += corpus.len();

    let before = declared.len();
    declared.retain(Coordinate::has_clean_identity);
    summary.discarded += before - declared.len();

    let (resolved, stats) = resolve_placeholders(declared, corpus);
    summary.placeholders += stats.placeholders;
    summary.resolved += stats.resolved;
    summary.unresolved += stats.dropped;

    let before = resolved.len();
    let versioned: Vec<Coordinate> = resolved
        .into_iter()
        .filter(|c| !c.version.trim().is_empty())
        .collect();
    summary.unversioned += before - versioned.len();

    versioned
}

/// Harvest an in-memory corpus
pub fn harvest_corpus(corpus: &ManifestCorpus) -> HarvestResult {
    let mut result = HarvestResult::default();
    let coordinates = collect_coordinates(corpus, &mut result.summary, &mut result.errors);
    result.coordinates = dedupe_coordinates(&coordinates);
    result.summary.unique = result.coordinates.len();
    result
}

/// Merge coordinate lists into one deduplicated set
///
/// Files ending in `.json` are read as flattened dependency trees, anything else
/// as line lists (IDE export prefixes are stripped).
pub fn merge_lists(paths: &[PathBuf]) -> Result<BTreeSet<String>, CheckpointError> {
    let mut lines: Vec<String> = Vec::new();

    for path in paths {
        if path.extension().and_then(|e| e.to_str()) == Some("json") {
            let content = std::fs::read_to_string(path)
                .map_err(|e| CheckpointError::read_error(path, e))?;
            let tree = dedupe_flattened_tree(&content).map_err(|e| CheckpointError::JsonParse {
                path: path.clone(),
                message: e.to_string(),
            })?;
            lines.extend(tree);
        } else {
            lines.extend(read_lines(path)?);
        }
    }

    Ok(dedupe_lines(lines.iter().map(String::as_str)))
}

/// Orchestrator for the command workflows
pub struct Orchestrator {
    /// Run configuration
    config: HarvestConfig,
    /// Whether progress bars and spinners are shown
    show_progress: bool,
}

impl Orchestrator {
    /// Create a new orchestrator
    pub fn new(config: HarvestConfig, show_progress: bool) -> Self {
        Self {
            config,
            show_progress,
        }
    }

    /// Returns the configuration in use
    pub fn config(&self) -> &HarvestConfig {
        &self.config
    }

    /// Harvest coordinates from the build files below `roots`
    pub fn harvest(&self, roots: &[PathBuf]) -> Result<HarvestResult, ManifestError> {
        let mut progress = Progress::new(self.show_progress);

        progress.phase("Reading build files...");
        let (corpus, read_errors) = load_corpus(roots)?;
        progress.clear();
        info!(files = corpus.len(), "loaded corpus");

        progress.phase("Parsing and resolving dependencies...");
        let mut result = harvest_corpus(&corpus);
        progress.clear();

        let mut errors = read_errors;
        errors.append(&mut result.errors);
        result.errors = errors;
        info!(
            unique = result.summary.unique,
            errors = result.errors.len(),
            "harvest finished"
        );
        Ok(result)
    }

    /// Harvest coordinates from build files found by GitHub code search
    ///
    /// Each downloaded file is resolved against itself only.
    pub async fn harvest_github(&self, query: &CodeSearchQuery) -> Result<HarvestResult, AppError> {
        let search = GithubCodeSearch::new(
            self.config.github_client()?,
            self.config.github.api_url.clone(),
            Duration::from_secs(self.config.github.rate_limit_wait_secs),
        );
        let files = search.search(query).await?;

        let mut result = HarvestResult::default();
        let mut coordinates = Vec::new();
        let mut progress = Progress::new(self.show_progress);
        progress.counted("Parsing downloaded files", files.len());

        for content in &files {
            progress.item(&content.path);
            let text = match content.decode_content() {
                Ok(text) => text,
                Err(e) => {
                    warn!(path = %content.path, error = %e, "skipping undecodable file");
                    progress.advance();
                    continue;
                }
            };
            let path = Path::new(&content.path).with_file_name(query.kind.file_name());
            let corpus = ManifestCorpus::new(vec![ManifestFile::from_content(path, &text)]);
            coordinates.extend(collect_coordinates(
                &corpus,
                &mut result.summary,
                &mut result.errors,
            ));
            progress.advance();
        }
        progress.clear();

        result.coordinates = dedupe_coordinates(&coordinates);
        result.summary.unique = result.coordinates.len();
        Ok(result)
    }

    /// Harvest `group:name:latestVersion` of every artifact reachable by letter queries
    pub async fn harvest_maven_central(
        &self,
    ) -> Result<(BTreeSet<String>, Vec<RegistryError>), AppError> {
        let search = MavenCentralSearch::with_base_url(
            self.config.http_client()?,
            self.config.search_url.clone(),
        );
        Ok(search.harvest().await)
    }

    fn repository(&self) -> Result<MavenRepository, RegistryError> {
        Ok(MavenRepository::with_base_url(
            self.config.http_client()?,
            self.config.repository_url.clone(),
        ))
    }

    /// Verify coordinates with checkpointed batch passes
    pub async fn verify(&self, input: &[String]) -> Result<(CheckResult, VerifySummary), AppError> {
        let repository = self.repository()?;
        self.verify_with(&repository, input).await
    }

    /// Verify coordinates against a custom probe
    pub async fn verify_with<P>(
        &self,
        probe: &P,
        input: &[String],
    ) -> Result<(CheckResult, VerifySummary), AppError>
    where
        P: ArtifactProbe + ?Sized,
    {
        let store = CheckpointStore::new(&self.config.verify.checkpoint_dir);
        let mut runner = BatchRunner::new(probe, store, self.config.verify_options())
            .with_progress(self.show_progress);
        Ok(runner.run(input).await?)
    }

    /// Probe each coordinate once
    pub async fn check(&self, coordinates: &[String]) -> Result<Vec<(String, ProbeOutcome)>, AppError> {
        let repository = self.repository()?;
        let mut outcomes = Vec::with_capacity(coordinates.len());
        for coordinate in coordinates {
            let outcome = repository.probe(coordinate).await;
            outcomes.push((coordinate.clone(), outcome));
        }
        Ok(outcomes)
    }
}
