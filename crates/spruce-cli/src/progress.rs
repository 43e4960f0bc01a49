use indicatif::{ProgressBar, ProgressStyle};
use spruce_core::ProgressReporter;
use std::sync::Mutex;

/// CLI progress reporter using indicatif spinners. Totals are unknown
/// before each phase finishes, so every phase gets a spinner rather than
/// a bar.
pub struct CliReporter {
    bar: Mutex<Option<ProgressBar>>,
}

impl CliReporter {
    pub fn new() -> Self {
        Self {
            bar: Mutex::new(None),
        }
    }

    fn start_spinner(&self, message: &'static str) {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {msg}")
                .unwrap()
                .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
        );
        pb.set_message(message);
        pb.enable_steady_tick(std::time::Duration::from_millis(80));

        let mut guard = self.bar.lock().unwrap();
        if let Some(old) = guard.take() {
            old.finish_and_clear();
        }
        *guard = Some(pb);
    }

    fn finish_spinner(&self) {
        let mut guard = self.bar.lock().unwrap();
        if let Some(pb) = guard.take() {
            pb.finish_and_clear();
        }
    }
}

impl ProgressReporter for CliReporter {
    fn on_walk_start(&self) {
        self.start_spinner("Scanning project tree...");
    }

    fn on_walk_complete(&self, entries: usize, duration_secs: f64) {
        self.finish_spinner();
        eprintln!(
            "  \x1b[32m✓\x1b[0m Walk complete: {} entries in {:.2}s",
            entries, duration_secs
        );
    }

    fn on_detect_start(&self) {
        self.start_spinner("Running health checks...");
    }

    fn on_detect_complete(&self, issues: usize, duration_secs: f64) {
        self.finish_spinner();
        eprintln!(
            "  \x1b[32m✓\x1b[0m Health checks complete: {} issues in {:.2}s",
            issues, duration_secs
        );
    }

    fn on_pattern_start(&self) {
        self.start_spinner("Mining automation patterns...");
    }

    fn on_pattern_complete(&self, patterns: usize, duration_secs: f64) {
        self.finish_spinner();
        eprintln!(
            "  \x1b[32m✓\x1b[0m Pattern scan complete: {} matches in {:.2}s",
            patterns, duration_secs
        );
    }
}
