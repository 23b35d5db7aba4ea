//! Output formatting for run summaries
//!
//! This module provides:
//! - Text output for human-readable display
//! - JSON output for machine processing
//!
//! Coordinate lists themselves go to files; formatters only report on them.

mod json;
mod text;

pub use json::JsonFormatter;
pub use text::TextFormatter;

use crate::domain::{ProbeOutcome, VerifySummary};
use crate::orchestrator::HarvestResult;
use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable text output
    #[default]
    Text,
    /// JSON output for machine processing
    Json,
}

/// Output verbosity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    /// Minimal output
    Quiet,
    /// Normal output
    #[default]
    Normal,
    /// Detailed output with additional information
    Verbose,
}

/// Configuration for output formatting
#[derive(Debug, Clone)]
pub struct OutputConfig {
    /// Output format (text, json)
    pub format: OutputFormat,
    /// Verbosity level
    pub verbosity: Verbosity,
    /// Whether to use colors (when supported)
    pub color: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            verbosity: Verbosity::default(),
            color: true,
        }
    }
}

impl OutputConfig {
    /// Create a new output configuration
    pub fn new(format: OutputFormat, verbosity: Verbosity) -> Self {
        Self {
            format,
            verbosity,
            color: true,
        }
    }

    /// Create configuration from CLI arguments
    pub fn from_cli(json: bool, verbose: bool, quiet: bool) -> Self {
        let format = if json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        };

        let verbosity = if quiet {
            Verbosity::Quiet
        } else if verbose {
            Verbosity::Verbose
        } else {
            Verbosity::Normal
        };

        Self::new(format, verbosity)
    }
}

/// Report on a coordinate list written by `dedupe` or `search maven`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListReport {
    /// Where the coordinates came from
    pub source: String,
    /// Unique coordinates written
    pub unique: usize,
    /// File the list was written to
    pub output: PathBuf,
    /// Non-fatal errors met while collecting
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
}

impl ListReport {
    /// Create a report without errors
    pub fn new(source: impl Into<String>, unique: usize, output: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            unique,
            output: output.into(),
            errors: Vec::new(),
        }
    }

    /// Attach non-fatal errors
    pub fn with_errors<I, E>(mut self, errors: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: ToString,
    {
        self.errors = errors.into_iter().map(|e| e.to_string()).collect();
        self
    }
}

/// Trait for output formatters
pub trait OutputFormatter {
    /// Format a harvest whose list was written to `output`
    fn format_harvest(
        &self,
        result: &HarvestResult,
        output: &Path,
        writer: &mut dyn Write,
    ) -> std::io::Result<()>;

    /// Format a written coordinate list
    fn format_list(&self, report: &ListReport, writer: &mut dyn Write) -> std::io::Result<()>;

    /// Format a verification run
    fn format_verify(&self, summary: &VerifySummary, writer: &mut dyn Write)
        -> std::io::Result<()>;

    /// Format single probe outcomes
    fn format_check(
        &self,
        outcomes: &[(String, ProbeOutcome)],
        writer: &mut dyn Write,
    ) -> std::io::Result<()>;
}

/// Create an output formatter based on configuration
pub fn create_formatter(config: OutputConfig) -> Box<dyn OutputFormatter> {
    match config.format {
        OutputFormat::Text => Box::new(TextFormatter::with_color(config.verbosity, config.color)),
        OutputFormat::Json => Box::new(JsonFormatter::new(config.verbosity)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_config_default() {
        let config = OutputConfig::default();
        assert_eq!(config.format, OutputFormat::Text);
        assert_eq!(config.verbosity, Verbosity::Normal);
        assert!(config.color);
    }

    #[test]
    fn test_output_config_from_cli_json() {
        let config = OutputConfig::from_cli(true, false, false);
        assert_eq!(config.format, OutputFormat::Json);
        assert_eq!(config.verbosity, Verbosity::Normal);
    }

    #[test]
    fn test_output_config_from_cli_quiet_wins() {
        let config = OutputConfig::from_cli(false, true, true);
        assert_eq!(config.verbosity, Verbosity::Quiet);
    }

    #[test]
    fn test_output_config_from_cli_verbose() {
        let config = OutputConfig::from_cli(false, true, false);
        assert_eq!(config.verbosity, Verbosity::Verbose);
    }

    #[test]
    fn test_list_report_with_errors() {
        let report = ListReport::new("maven-central", 2, "out.txt").with_errors(["boom"]);
        assert_eq!(report.errors, vec!["boom".to_string()]);

        let json = serde_json::to_string(&ListReport::new("dedupe", 1, "out.txt")).unwrap();
        assert!(!json.contains("errors"));
    }
}
