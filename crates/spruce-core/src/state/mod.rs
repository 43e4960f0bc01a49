pub mod models;

pub use models::{
    DeferredItem, Preferences, ProjectState, ScanDepth, ScanHistoryEntry, SkillStatus,
    SkillSuggestion,
};

use crate::error::Error;
use crate::scanner::{ActionChoice, ScanResult};
use chrono::Utc;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Dot-prefixed so the health walker never feeds the store's own file
/// back into the fingerprint.
pub const STATE_FILENAME: &str = ".spruce-state.json";

const SCAN_HISTORY_LIMIT: usize = 20;

/// Owns the on-disk record for one project root. Every mutating operation
/// synchronously rewrites the whole file; a crash mid-write at worst loses
/// the last mutation, which the next scan recomputes.
pub struct StateStore {
    state_path: PathBuf,
    state: ProjectState,
}

impl StateStore {
    /// Load the persisted record for `project_root`. A missing or corrupt
    /// file falls back to defaults; the requested root is always stamped
    /// onto the result. Never fails.
    pub fn open(project_root: &Path) -> Self {
        let state_path = project_root.join(STATE_FILENAME);
        let state = load_state(&state_path, project_root);
        Self { state_path, state }
    }

    pub fn state(&self) -> &ProjectState {
        &self.state
    }

    pub fn fingerprint(&self) -> Option<&str> {
        self.state.fingerprint.as_deref()
    }

    /// Record a completed scan: update the fingerprint and timestamp and
    /// append a history entry, evicting the oldest beyond the cap of 20.
    pub fn record_scan(&mut self, result: &ScanResult) -> Result<(), Error> {
        self.state.fingerprint = Some(result.fingerprint.clone());
        self.state.last_full_scan = Some(result.scanned_at.clone());

        self.state.scan_history.push(ScanHistoryEntry {
            scanned_at: result.scanned_at.clone(),
            file_count: result.file_count,
            issue_count: result.issues.len(),
            fingerprint: result.fingerprint.clone(),
        });
        if self.state.scan_history.len() > SCAN_HISTORY_LIMIT {
            let excess = self.state.scan_history.len() - SCAN_HISTORY_LIMIT;
            self.state.scan_history.drain(..excess);
        }

        self.save()
    }

    /// Record the user's verdict on an issue. Deferring additionally
    /// appends a timestamped entry to the deferred list.
    pub fn record_decision(&mut self, issue_id: &str, choice: ActionChoice) -> Result<(), Error> {
        self.state.decisions.insert(issue_id.to_string(), choice);
        if choice == ActionChoice::Defer {
            self.state.deferred.push(DeferredItem {
                issue_id: issue_id.to_string(),
                deferred_at: Utc::now().to_rfc3339(),
                reason: None,
            });
        }
        self.save()
    }

    pub fn is_already_decided(&self, issue_id: &str) -> bool {
        self.state.decisions.contains_key(issue_id)
    }

    pub fn deferred_items(&self) -> &[DeferredItem] {
        &self.state.deferred
    }

    /// Idempotent insert: a suggestion whose id is already present is left
    /// untouched and nothing is written.
    pub fn add_skill_suggestion(
        &mut self,
        id: &str,
        name: &str,
        description: &str,
        pattern: &str,
    ) -> Result<(), Error> {
        if self.state.skill_suggestions.iter().any(|s| s.id == id) {
            return Ok(());
        }
        self.state.skill_suggestions.push(SkillSuggestion {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            pattern: pattern.to_string(),
            suggested_at: Utc::now().to_rfc3339(),
            status: SkillStatus::Suggested,
        });
        self.save()
    }

    /// Silent no-op when the id is unknown.
    pub fn update_skill_status(&mut self, id: &str, status: SkillStatus) -> Result<(), Error> {
        if let Some(suggestion) = self.state.skill_suggestions.iter_mut().find(|s| s.id == id) {
            suggestion.status = status;
            return self.save();
        }
        Ok(())
    }

    fn save(&self) -> Result<(), Error> {
        let data = serde_json::to_string_pretty(&self.state)?;
        fs::write(&self.state_path, data)?;
        Ok(())
    }
}

fn load_state(state_path: &Path, project_root: &Path) -> ProjectState {
    let mut state = match fs::read_to_string(state_path) {
        Ok(raw) => match serde_json::from_str::<ProjectState>(&raw) {
            Ok(parsed) => parsed,
            Err(err) => {
                warn!(
                    "Corrupt state file {}, starting from defaults: {}",
                    state_path.display(),
                    err
                );
                ProjectState::default()
            }
        },
        Err(_) => ProjectState::default(),
    };
    state.project_root = project_root.display().to_string();
    state
}
