//! Text output formatter for human-readable display
//!
//! This module provides:
//! - Harvest counters with a per-manifest breakdown in verbose mode
//! - Verification partition sizes and pass statistics
//! - Colored single-probe outcomes

use crate::domain::{ProbeOutcome, VerifySummary};
use crate::orchestrator::HarvestResult;
use crate::output::{ListReport, OutputFormatter, Verbosity};
use colored::Colorize;
use std::io::Write;
use std::path::Path;

/// Text formatter for human-readable output
pub struct TextFormatter {
    /// Verbosity level
    verbosity: Verbosity,
    /// Whether to use colors
    color: bool,
}

impl TextFormatter {
    /// Create a new text formatter
    pub fn new(verbosity: Verbosity) -> Self {
        Self {
            verbosity,
            color: true,
        }
    }

    /// Create a new text formatter with color option
    pub fn with_color(verbosity: Verbosity, color: bool) -> Self {
        Self { verbosity, color }
    }

    fn heading(&self, text: &str) -> String {
        if self.color {
            text.bold().to_string()
        } else {
            text.to_string()
        }
    }

    fn count(&self, n: usize) -> String {
        if self.color {
            n.to_string().green().to_string()
        } else {
            n.to_string()
        }
    }

    fn warn_count(&self, n: usize) -> String {
        if self.color && n > 0 {
            n.to_string().yellow().to_string()
        } else {
            n.to_string()
        }
    }

    /// Write one `label: value` line aligned on the colon
    fn row(&self, label: &str, value: String, writer: &mut dyn Write) -> std::io::Result<()> {
        writeln!(writer, "  {:<22} {}", format!("{}:", label), value)
    }

    fn outcome_label(&self, outcome: &ProbeOutcome) -> String {
        let label = outcome.to_string();
        if !self.color {
            return label;
        }
        match outcome {
            ProbeOutcome::Found => label.green().to_string(),
            ProbeOutcome::NotFound => label.red().to_string(),
            ProbeOutcome::UnexpectedStatus(_) => label.yellow().to_string(),
            ProbeOutcome::TransportFailure(_) => label.dimmed().to_string(),
        }
    }

    fn write_errors(&self, errors: &[String], writer: &mut dyn Write) -> std::io::Result<()> {
        if errors.is_empty() {
            return Ok(());
        }
        writeln!(writer)?;
        writeln!(writer, "{}", self.heading(&format!("Errors ({}):", errors.len())))?;
        for error in errors {
            if self.color {
                writeln!(writer, "  {}", error.red())?;
            } else {
                writeln!(writer, "  {}", error)?;
            }
        }
        Ok(())
    }
}

impl OutputFormatter for TextFormatter {
    fn format_harvest(
        &self,
        result: &HarvestResult,
        output: &Path,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        let summary = &result.summary;
        let errors: Vec<String> = result.errors.iter().map(|e| e.to_string()).collect();

        if self.verbosity == Verbosity::Quiet {
            writeln!(
                writer,
                "{} coordinates written to {}",
                summary.unique,
                output.display()
            )?;
            return self.write_errors(&errors, writer);
        }

        if self.verbosity == Verbosity::Verbose && !summary.manifests.is_empty() {
            writeln!(writer, "{}", self.heading("Manifests:"))?;
            let width = summary
                .manifests
                .iter()
                .map(|m| m.path.display().to_string().len())
                .max()
                .unwrap_or(0);
            for manifest in &summary.manifests {
                let path = manifest.path.display().to_string();
                if self.color {
                    writeln!(
                        writer,
                        "  {:width$} {}",
                        path,
                        manifest.declared.to_string().dimmed(),
                        width = width
                    )?;
                } else {
                    writeln!(writer, "  {:width$} {}", path, manifest.declared, width = width)?;
                }
            }
            writeln!(writer)?;
        }

        writeln!(writer, "{}", self.heading("Harvest summary:"))?;
        self.row("corpus files", summary.corpus_files.to_string(), writer)?;
        self.row("manifests", summary.manifests.len().to_string(), writer)?;
        self.row("declared", summary.total_declared().to_string(), writer)?;
        self.row("discarded", self.warn_count(summary.discarded), writer)?;
        self.row(
            "placeholders",
            format!(
                "{} ({} resolved, {} unresolved)",
                summary.placeholders,
                summary.resolved,
                self.warn_count(summary.unresolved)
            ),
            writer,
        )?;
        self.row("without version", self.warn_count(summary.unversioned), writer)?;
        self.row("unique coordinates", self.count(summary.unique), writer)?;
        self.row("written to", output.display().to_string(), writer)?;

        self.write_errors(&errors, writer)
    }

    fn format_list(&self, report: &ListReport, writer: &mut dyn Write) -> std::io::Result<()> {
        writeln!(
            writer,
            "{}: {} unique coordinates written to {}",
            report.source,
            self.count(report.unique),
            report.output.display()
        )?;
        if self.verbosity != Verbosity::Quiet {
            self.write_errors(&report.errors, writer)?;
        }
        Ok(())
    }

    fn format_verify(
        &self,
        summary: &VerifySummary,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        if self.verbosity == Verbosity::Quiet {
            return writeln!(
                writer,
                "{} existing, {} not found, {} remaining",
                summary.existing, summary.not_found, summary.remaining
            );
        }

        writeln!(writer, "{}", self.heading("Verification summary:"))?;
        self.row("input coordinates", summary.input.to_string(), writer)?;
        if summary.resumed > 0 {
            self.row("resumed", summary.resumed.to_string(), writer)?;
        }
        self.row("passes", summary.passes.to_string(), writer)?;
        self.row(
            "breaker trips",
            self.warn_count(summary.breaker_trips as usize),
            writer,
        )?;
        self.row("existing", self.count(summary.existing), writer)?;
        self.row("not found", summary.not_found.to_string(), writer)?;
        self.row("remaining", self.warn_count(summary.remaining), writer)?;
        self.row(
            "checkpoints",
            summary.checkpoint_dir.display().to_string(),
            writer,
        )
    }

    fn format_check(
        &self,
        outcomes: &[(String, ProbeOutcome)],
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        let width = outcomes.iter().map(|(c, _)| c.len()).max().unwrap_or(0);
        for (coordinate, outcome) in outcomes {
            if self.verbosity == Verbosity::Quiet && outcome.is_found() {
                continue;
            }
            writeln!(
                writer,
                "{:width$} {}",
                coordinate,
                self.outcome_label(outcome),
                width = width
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{HarvestSummary, ManifestHarvest};
    use crate::error::ManifestError;
    use std::path::PathBuf;

    fn render<F>(f: F) -> String
    where
        F: FnOnce(&mut Vec<u8>) -> std::io::Result<()>,
    {
        let mut out = Vec::new();
        f(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn sample_harvest() -> HarvestResult {
        HarvestResult {
            coordinates: ["junit:junit:4.13.2".to_string()].into_iter().collect(),
            summary: HarvestSummary {
                manifests: vec![ManifestHarvest::new("app/build.gradle", 2)],
                corpus_files: 3,
                placeholders: 1,
                resolved: 1,
                unique: 1,
                ..Default::default()
            },
            errors: vec![ManifestError::xml_parse("bad/pom.xml", "unexpected end")],
        }
    }

    #[test]
    fn test_format_harvest_normal() {
        let formatter = TextFormatter::with_color(Verbosity::Normal, false);
        let out = render(|w| formatter.format_harvest(&sample_harvest(), Path::new("deps.txt"), w));
        assert!(out.contains("Harvest summary:"));
        assert!(out.contains("unique coordinates:"));
        assert!(out.contains("1 (1 resolved, 0 unresolved)"));
        assert!(out.contains("deps.txt"));
        assert!(out.contains("Errors (1):"));
        assert!(out.contains("bad/pom.xml"));
        assert!(!out.contains("Manifests:"));
    }

    #[test]
    fn test_format_harvest_verbose_lists_manifests() {
        let formatter = TextFormatter::with_color(Verbosity::Verbose, false);
        let out = render(|w| formatter.format_harvest(&sample_harvest(), Path::new("deps.txt"), w));
        assert!(out.contains("Manifests:"));
        assert!(out.contains("app/build.gradle 2"));
    }

    #[test]
    fn test_format_harvest_quiet() {
        let formatter = TextFormatter::with_color(Verbosity::Quiet, false);
        let out = render(|w| formatter.format_harvest(&sample_harvest(), Path::new("deps.txt"), w));
        assert!(out.starts_with("1 coordinates written to deps.txt"));
    }

    #[test]
    fn test_format_list() {
        let formatter = TextFormatter::with_color(Verbosity::Normal, false);
        let report = ListReport::new("dedupe", 42, "all.txt");
        let out = render(|w| formatter.format_list(&report, w));
        assert_eq!(out, "dedupe: 42 unique coordinates written to all.txt\n");
    }

    #[test]
    fn test_format_verify() {
        let formatter = TextFormatter::with_color(Verbosity::Normal, false);
        let summary = VerifySummary {
            input: 3,
            passes: 2,
            breaker_trips: 1,
            existing: 2,
            not_found: 1,
            checkpoint_dir: PathBuf::from("checkpoints"),
            ..Default::default()
        };
        let out = render(|w| formatter.format_verify(&summary, w));
        assert!(out.contains("Verification summary:"));
        assert!(out.contains("breaker trips:"));
        assert!(out.contains("checkpoints"));
        assert!(!out.contains("resumed"));
    }

    #[test]
    fn test_format_check() {
        let formatter = TextFormatter::with_color(Verbosity::Normal, false);
        let outcomes = vec![
            ("junit:junit:4.13.2".to_string(), ProbeOutcome::Found),
            ("a:b:1".to_string(), ProbeOutcome::NotFound),
        ];
        let out = render(|w| formatter.format_check(&outcomes, w));
        assert!(out.contains("junit:junit:4.13.2 found"));
        assert!(out.contains("a:b:1"));
        assert!(out.contains("not found"));

        let quiet = TextFormatter::with_color(Verbosity::Quiet, false);
        let out = render(|w| quiet.format_check(&outcomes, w));
        assert!(!out.contains("junit"));
    }
}
