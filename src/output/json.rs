//! JSON output formatter for machine processing

use crate::domain::{HarvestSummary, ProbeOutcome, VerifySummary};
use crate::orchestrator::HarvestResult;
use crate::output::{ListReport, OutputFormatter, Verbosity};
use serde::Serialize;
use std::io::Write;
use std::path::Path;

/// JSON formatter for machine-readable output
pub struct JsonFormatter {
    /// Verbosity level affects detail in output
    verbosity: Verbosity,
}

impl JsonFormatter {
    /// Create a new JSON formatter
    pub fn new(verbosity: Verbosity) -> Self {
        Self { verbosity }
    }
}

/// JSON representation of a harvest
#[derive(Serialize)]
struct JsonHarvest<'a> {
    output: String,
    #[serde(flatten)]
    summary: JsonHarvestSummary<'a>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    errors: Vec<String>,
}

/// Harvest counters; per-manifest detail only in verbose mode
#[derive(Serialize)]
#[serde(untagged)]
enum JsonHarvestSummary<'a> {
    Full(&'a HarvestSummary),
    Counters {
        manifests: usize,
        corpus_files: usize,
        discarded: usize,
        placeholders: usize,
        resolved: usize,
        unresolved: usize,
        unversioned: usize,
        unique: usize,
    },
}

/// JSON representation of one probe
#[derive(Serialize)]
struct JsonCheck<'a> {
    coordinate: &'a str,
    outcome: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    status: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<&'a str>,
}

impl<'a> JsonCheck<'a> {
    fn new(coordinate: &'a str, outcome: &'a ProbeOutcome) -> Self {
        let (label, status, message) = match outcome {
            ProbeOutcome::Found => ("found", None, None),
            ProbeOutcome::NotFound => ("not_found", None, None),
            ProbeOutcome::UnexpectedStatus(status) => ("unexpected_status", Some(*status), None),
            ProbeOutcome::TransportFailure(msg) => ("transport_failure", None, Some(msg.as_str())),
        };
        Self {
            coordinate,
            outcome: label,
            status,
            message,
        }
    }
}

fn write_json<T: Serialize>(value: &T, writer: &mut dyn Write) -> std::io::Result<()> {
    let json = serde_json::to_string_pretty(value).map_err(std::io::Error::other)?;
    writeln!(writer, "{}", json)
}

impl OutputFormatter for JsonFormatter {
    fn format_harvest(
        &self,
        result: &HarvestResult,
        output: &Path,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        let s = &result.summary;
        let summary = if self.verbosity == Verbosity::Verbose {
            JsonHarvestSummary::Full(s)
        } else {
            JsonHarvestSummary::Counters {
                manifests: s.manifests.len(),
                corpus_files: s.corpus_files,
                discarded: s.discarded,
                placeholders: s.placeholders,
                resolved: s.resolved,
                unresolved: s.unresolved,
                unversioned: s.unversioned,
                unique: s.unique,
            }
        };

        write_json(
            &JsonHarvest {
                output: output.display().to_string(),
                summary,
                errors: result.errors.iter().map(|e| e.to_string()).collect(),
            },
            writer,
        )
    }

    fn format_list(&self, report: &ListReport, writer: &mut dyn Write) -> std::io::Result<()> {
        write_json(report, writer)
    }

    fn format_verify(
        &self,
        summary: &VerifySummary,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        write_json(summary, writer)
    }

    fn format_check(
        &self,
        outcomes: &[(String, ProbeOutcome)],
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        let checks: Vec<JsonCheck> = outcomes
            .iter()
            .map(|(coordinate, outcome)| JsonCheck::new(coordinate, outcome))
            .collect();
        write_json(&checks, writer)
    }
}
