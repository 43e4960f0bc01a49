use crate::scanner::ActionChoice;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const STATE_VERSION: &str = "0.1.0";

/// A health issue the user chose to postpone. Resurfaces on every report
/// until it is accepted or skipped.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeferredItem {
    pub issue_id: String,
    pub deferred_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanHistoryEntry {
    pub scanned_at: String,
    pub file_count: usize,
    pub issue_count: usize,
    pub fingerprint: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkillStatus {
    Suggested,
    Created,
    Dismissed,
}

/// Tracks the lifecycle of one suggested automation, from suggestion
/// through creation or dismissal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillSuggestion {
    pub id: String,
    pub name: String,
    pub description: String,
    /// The pattern kind that produced the suggestion.
    pub pattern: String,
    pub suggested_at: String,
    pub status: SkillStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScanDepth {
    Full,
    Light,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    pub auto_scan_on_startup: bool,
    pub scan_depth: ScanDepth,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            auto_scan_on_startup: true,
            scan_depth: ScanDepth::Light,
        }
    }
}

/// The persisted record for one project root. Every field defaults so a
/// record written by an older version still loads (missing fields are
/// merged with defaults rather than rejected).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectState {
    pub version: String,
    pub project_root: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_full_scan: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fingerprint: Option<String>,
    pub deferred: Vec<DeferredItem>,
    pub scan_history: Vec<ScanHistoryEntry>,
    pub skill_suggestions: Vec<SkillSuggestion>,
    pub preferences: Preferences,
    pub decisions: BTreeMap<String, ActionChoice>,
}

impl Default for ProjectState {
    fn default() -> Self {
        Self {
            version: STATE_VERSION.to_string(),
            project_root: String::new(),
            last_full_scan: None,
            fingerprint: None,
            deferred: Vec::new(),
            scan_history: Vec::new(),
            skill_suggestions: Vec::new(),
            preferences: Preferences::default(),
            decisions: BTreeMap::new(),
        }
    }
}
