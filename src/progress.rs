//! Terminal feedback for long-running commands
//!
//! Harvest phases get a spinner; verification passes and GitHub downloads get
//! a counted bar whose message follows the coordinate or file being handled.
//! Everything draws on stderr through indicatif and is a no-op when disabled.

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

const PHASE_TEMPLATE: &str = "{spinner:.cyan} {msg}";
const COUNTED_TEMPLATE: &str = "{spinner:.cyan} {prefix:.bold} [{bar:30.cyan/blue}] {pos}/{len} {wide_msg:.dim}";

/// Spinner or counted bar, owned by one workflow at a time
pub struct Progress {
    enabled: bool,
    bar: Option<ProgressBar>,
}

impl Progress {
    pub fn new(enabled: bool) -> Self {
        Self { enabled, bar: None }
    }

    pub fn disabled() -> Self {
        Self::new(false)
    }

    /// Show a spinner for a phase of unknown length, replacing any current bar
    pub fn phase(&mut self, message: &str) {
        self.replace(ProgressBar::new_spinner(), PHASE_TEMPLATE, |bar| {
            bar.set_message(message.to_string());
        });
    }

    /// Show a counted bar labelled `label` for `total` items
    pub fn counted(&mut self, label: &str, total: usize) {
        self.replace(ProgressBar::new(total as u64), COUNTED_TEMPLATE, |bar| {
            bar.set_prefix(label.to_string());
        });
    }

    /// Name the item about to be handled
    pub fn item(&self, name: &str) {
        if let Some(bar) = &self.bar {
            bar.set_message(name.to_string());
        }
    }

    /// Count one item as done
    pub fn advance(&self) {
        if let Some(bar) = &self.bar {
            bar.inc(1);
        }
    }

    /// Remove the current spinner or bar from the terminal
    pub fn clear(&mut self) {
        if let Some(bar) = self.bar.take() {
            bar.finish_and_clear();
        }
    }

    fn replace(&mut self, bar: ProgressBar, template: &str, init: impl FnOnce(&ProgressBar)) {
        self.clear();
        if !self.enabled {
            return;
        }

        let style = ProgressStyle::with_template(template)
            .expect("Invalid template")
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ ")
            .progress_chars("█▓░");
        bar.set_style(style);
        init(&bar);
        bar.enable_steady_tick(Duration::from_millis(100));
        self.bar = Some(bar);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_never_draws() {
        let mut progress = Progress::disabled();
        progress.phase("Reading build files");
        assert!(progress.bar.is_none());
        progress.counted("Pass 1", 2);
        progress.item("junit:junit:4.13.2");
        progress.advance();
        assert!(progress.bar.is_none());
    }

    #[test]
    fn test_counted_tracks_items() {
        let mut progress = Progress::new(true);
        progress.counted("Pass 1", 3);
        progress.item("junit:junit:4.13.2");
        progress.advance();
        progress.advance();

        let bar = progress.bar.as_ref().unwrap();
        assert_eq!(bar.position(), 2);
        assert_eq!(bar.length(), Some(3));
        assert_eq!(bar.message(), "junit:junit:4.13.2");
        assert_eq!(bar.prefix(), "Pass 1");

        progress.clear();
        assert!(progress.bar.is_none());
    }

    #[test]
    fn test_phase_replaces_counted_bar() {
        let mut progress = Progress::new(true);
        progress.counted("Parsing downloaded files", 5);
        progress.phase("Resolving");
        let bar = progress.bar.as_ref().unwrap();
        assert_eq!(bar.length(), None);
        assert_eq!(bar.message(), "Resolving");
    }
}
