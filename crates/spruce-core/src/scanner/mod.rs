pub mod duplicates;
pub mod fingerprint;
pub mod freshness;
pub mod naming;
pub mod references;
pub mod structure;
pub mod walk;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// One filesystem node captured by the walker. Snapshots are immutable for
/// the duration of a scan and never persisted.
#[derive(Debug, Clone)]
pub struct FileEntry {
    pub path: PathBuf,
    pub rel_path: PathBuf,
    pub size: u64,
    pub modified_at: DateTime<Utc>,
    pub is_directory: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Critical,
    Warning,
    Info,
}

impl Severity {
    /// Sort rank: critical issues surface first.
    pub fn rank(self) -> u8 {
        match self {
            Severity::Critical => 0,
            Severity::Warning => 1,
            Severity::Info => 2,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Critical => "critical",
            Severity::Warning => "warning",
            Severity::Info => "info",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CheckKind {
    DuplicateFiles,
    MissingReferences,
    DocFreshness,
    DirectorySprawl,
    NamingInconsistency,
}

/// A user's verdict on a health issue, recorded by the state store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionChoice {
    Accept,
    Skip,
    Defer,
}

/// A structural or content problem found by one of the health detectors.
///
/// `id` is a pure function of the detection inputs (see each detector for
/// its exact input format), so re-scans of unchanged content reproduce the
/// same id and decisions can be matched across scans.
#[derive(Debug, Clone, Serialize)]
pub struct HealthIssue {
    pub id: String,
    pub check: CheckKind,
    pub severity: Severity,
    pub title: String,
    pub description: String,
    pub file_paths: Vec<String>,
    pub suggested_action: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_choice: Option<ActionChoice>,
}

#[derive(Debug, Clone)]
pub struct ScanOptions {
    pub root: PathBuf,
    pub full_scan: bool,
    pub previous_fingerprint: Option<String>,
    /// Overrides the built-in ignore list when set.
    pub ignore: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScanResult {
    pub issues: Vec<HealthIssue>,
    pub scanned_at: String,
    pub scan_duration_ms: u64,
    /// Non-directory entries only.
    pub file_count: usize,
    pub fingerprint: String,
}

/// Display form of an entry's parent directory, `"."` for the root level.
pub(crate) fn parent_display(rel_path: &Path) -> String {
    match rel_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.display().to_string(),
        _ => ".".to_string(),
    }
}
