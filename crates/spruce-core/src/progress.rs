/// Trait for reporting scan progress.
///
/// The CLI implements this with indicatif spinners; tests use
/// [`SilentReporter`]. All methods have default no-op implementations.
pub trait ProgressReporter: Send + Sync {
    fn on_walk_start(&self) {}
    fn on_walk_complete(&self, _entries: usize, _duration_secs: f64) {}
    fn on_detect_start(&self) {}
    fn on_detect_complete(&self, _issues: usize, _duration_secs: f64) {}
    fn on_pattern_start(&self) {}
    fn on_pattern_complete(&self, _patterns: usize, _duration_secs: f64) {}
}

/// No-op progress reporter for silent operation.
pub struct SilentReporter;

impl ProgressReporter for SilentReporter {}
