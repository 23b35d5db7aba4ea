//! Existence verification of harvested coordinates
//!
//! This module provides:
//! - A consecutive-failure circuit breaker
//! - Single-pass probing and the multi-pass batch runner
//! - Checkpoint files for partial results

mod breaker;
mod checkpoint;
mod runner;

pub use breaker::{CircuitBreaker, DEFAULT_EXCEPTION_THRESHOLD};
pub use checkpoint::{CheckpointStore, EXISTING_FILE, EXISTING_SHUFFLED_FILE, NOT_FOUND_FILE};
pub use runner::{run_pass, BatchRunner, PassOutcome, VerifyOptions, DEFAULT_COOLDOWN};
