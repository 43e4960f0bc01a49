pub mod config;
pub mod engine;
pub mod error;
pub mod hasher;
pub mod patterns;
pub mod progress;
pub mod scanner;
pub mod state;

pub use config::AppConfig;
pub use engine::ScanEngine;
pub use error::Error;
pub use patterns::{scan_patterns, PatternKind, PatternMatch, PatternScanResult};
pub use progress::{ProgressReporter, SilentReporter};
pub use scanner::{ActionChoice, HealthIssue, ScanOptions, ScanResult, Severity};
pub use state::StateStore;
