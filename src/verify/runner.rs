//! Batch existence verification
//!
//! Coordinates are probed one at a time in sorted order. A pass ends early when
//! the circuit breaker trips; whatever was classified is checkpointed and the
//! unclassified remainder is retried after a cooldown, until nothing remains.

use crate::dedup::dedupe_lines;
use crate::domain::{CheckResult, VerifySummary};
use crate::error::VerifyError;
use crate::progress::Progress;
use crate::registry::ArtifactProbe;
use crate::verify::{CheckpointStore, CircuitBreaker, DEFAULT_EXCEPTION_THRESHOLD};
use std::collections::BTreeSet;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Default pause between passes (60 seconds)
pub const DEFAULT_COOLDOWN: Duration = Duration::from_secs(60);

/// Outcome of a single pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PassOutcome {
    /// Coordinates classified during the pass
    pub result: CheckResult,
    /// Probes sent
    pub probed: usize,
    /// Whether the breaker ended the pass early
    pub tripped: bool,
}

/// Probe every coordinate of `remaining` in order, stopping once the breaker trips
pub async fn run_pass<P>(
    remaining: &BTreeSet<String>,
    probe: &P,
    breaker: &mut CircuitBreaker,
) -> PassOutcome
where
    P: ArtifactProbe + ?Sized,
{
    run_pass_with_progress(remaining, probe, breaker, &Progress::disabled()).await
}

async fn run_pass_with_progress<P>(
    remaining: &BTreeSet<String>,
    probe: &P,
    breaker: &mut CircuitBreaker,
    progress: &Progress,
) -> PassOutcome
where
    P: ArtifactProbe + ?Sized,
{
    let mut outcome = PassOutcome::default();
    breaker.reset();

    for coordinate in remaining {
        if breaker.is_tripped() {
            break;
        }

        progress.item(coordinate);
        let probe_outcome = probe.probe(coordinate).await;
        outcome.probed += 1;
        breaker.record(&probe_outcome);
        if !outcome.result.record(coordinate, &probe_outcome) {
            debug!(coordinate = %coordinate, outcome = %probe_outcome, "left for next pass");
        }
        progress.advance();
    }

    outcome.tripped = breaker.is_tripped();
    if outcome.tripped {
        warn!(
            threshold = breaker.threshold(),
            probed = outcome.probed,
            "too many consecutive failures, ending pass early"
        );
    }
    outcome
}

/// Settings of a verification run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifyOptions {
    /// Pause between passes
    pub cooldown: Duration,
    /// Consecutive transport failures that end a pass
    pub exception_threshold: u32,
    /// Give up after this many passes; `None` retries until done
    pub max_passes: Option<u32>,
}

impl Default for VerifyOptions {
    fn default() -> Self {
        Self {
            cooldown: DEFAULT_COOLDOWN,
            exception_threshold: DEFAULT_EXCEPTION_THRESHOLD,
            max_passes: None,
        }
    }
}

/// Drives passes until every coordinate is classified
pub struct BatchRunner<'p, P: ?Sized> {
    probe: &'p P,
    store: CheckpointStore,
    options: VerifyOptions,
    progress: Progress,
}

impl<'p, P> BatchRunner<'p, P>
where
    P: ArtifactProbe + ?Sized,
{
    /// Create a runner checkpointing into `store`
    pub fn new(probe: &'p P, store: CheckpointStore, options: VerifyOptions) -> Self {
        Self {
            probe,
            store,
            options,
            progress: Progress::disabled(),
        }
    }

    /// Show per-pass progress bars
    pub fn with_progress(mut self, enabled: bool) -> Self {
        self.progress = Progress::new(enabled);
        self
    }

    /// Verify `input` coordinates
    ///
    /// Results of an earlier run found in the checkpoint directory are picked up
    /// first. Returns the accumulated partition once nothing remains.
    pub async fn run<I, S>(&mut self, input: I) -> Result<(CheckResult, VerifySummary), VerifyError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let input: Vec<String> = input.into_iter().map(|s| s.as_ref().to_string()).collect();
        let unique = dedupe_lines(input.iter().map(String::as_str));

        let mut accumulated = self.store.load()?;
        let mut remaining: BTreeSet<String> = unique
            .iter()
            .filter(|c| !accumulated.contains(c))
            .cloned()
            .collect();

        let mut summary = VerifySummary {
            input: unique.len(),
            resumed: unique.len() - remaining.len(),
            checkpoint_dir: self.store.dir().to_path_buf(),
            ..Default::default()
        };
        if summary.resumed > 0 {
            info!(resumed = summary.resumed, "resuming from checkpoint");
        }

        let mut breaker = CircuitBreaker::new(self.options.exception_threshold);

        while !remaining.is_empty() {
            if let Some(max) = self.options.max_passes {
                if summary.passes >= max {
                    self.finish(&accumulated, &mut summary, remaining.len())?;
                    return Err(VerifyError::PassLimitReached {
                        passes: summary.passes,
                        remaining: remaining.len(),
                    });
                }
            }

            if summary.passes > 0 {
                info!(
                    cooldown_secs = self.options.cooldown.as_secs(),
                    remaining = remaining.len(),
                    "cooling down before next pass"
                );
                tokio::time::sleep(self.options.cooldown).await;
            }

            summary.passes += 1;
            remaining = dedupe_lines(remaining.iter().map(String::as_str));
            info!(pass = summary.passes, remaining = remaining.len(), "starting pass");

            self.progress
                .counted(&format!("Pass {}", summary.passes), remaining.len());
            let pass = run_pass_with_progress(&remaining, self.probe, &mut breaker, &self.progress).await;
            self.progress.clear();

            if pass.tripped {
                summary.breaker_trips += 1;
            }

            accumulated.merge(&pass.result);
            self.store.save(&accumulated)?;
            remaining.retain(|c| !accumulated.contains(c));

            info!(
                pass = summary.passes,
                existing = pass.result.existing.len(),
                not_found = pass.result.not_found.len(),
                remaining = remaining.len(),
                "pass finished"
            );
        }

        self.finish(&accumulated, &mut summary, 0)?;
        Ok((accumulated, summary))
    }

    fn finish(
        &self,
        accumulated: &CheckResult,
        summary: &mut VerifySummary,
        remaining: usize,
    ) -> Result<(), VerifyError> {
        self.store.save(accumulated)?;
        self.store.save_shuffled(accumulated)?;
        summary.existing = accumulated.existing.len();
        summary.not_found = accumulated.not_found.len();
        summary.remaining = remaining;
        Ok(())
    }
}
