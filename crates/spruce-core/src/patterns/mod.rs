pub mod colocated;
pub mod instructions;
pub mod manifest;
pub mod processes;

use crate::progress::ProgressReporter;
use chrono::Utc;
use serde::Serialize;
use std::cmp::Ordering;
use std::path::Path;
use std::time::Instant;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PatternKind {
    RepetitiveInstruction,
    ManualProcess,
    FileTypePattern,
    ConfigPattern,
}

impl PatternKind {
    pub fn as_str(self) -> &'static str {
        match self {
            PatternKind::RepetitiveInstruction => "repetitive-instruction",
            PatternKind::ManualProcess => "manual-process",
            PatternKind::FileTypePattern => "file-type-pattern",
            PatternKind::ConfigPattern => "config-pattern",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PatternEvidence {
    pub file_path: String,
    pub excerpt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_number: Option<usize>,
}

/// A reusable skill proposed for a detected pattern.
#[derive(Debug, Clone, Serialize)]
pub struct SkillTemplate {
    /// Lowercase, hyphens only.
    pub name: String,
    pub description: String,
    /// Markdown body of the generated skill file.
    pub instructions: String,
    /// Set when the skill should only ever be invoked by the user.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disable_model_invocation: Option<bool>,
}

/// A recurring textual or file-layout signal that hints at an automatable
/// workflow. Confidence grows with corroborating evidence and is capped
/// per detector below 1.0.
#[derive(Debug, Clone, Serialize)]
pub struct PatternMatch {
    pub id: String,
    pub kind: PatternKind,
    pub name: String,
    pub description: String,
    pub evidence: Vec<PatternEvidence>,
    pub confidence: f64,
    pub suggested_skill: SkillTemplate,
}

#[derive(Debug, Clone, Serialize)]
pub struct PatternScanResult {
    pub patterns: Vec<PatternMatch>,
    pub scanned_at: String,
    pub scan_duration_ms: u64,
}

/// Runs the four pattern detectors over the project root and merges their
/// matches, highest confidence first (stable: ties keep emission order).
/// Each detector re-reads text directly; none of them share state.
pub fn scan_patterns(root: &Path, reporter: &dyn ProgressReporter) -> PatternScanResult {
    let start = Instant::now();
    reporter.on_pattern_start();

    let mut patterns = Vec::new();
    patterns.extend(instructions::detect_repetitive_instructions(root));
    patterns.extend(processes::detect_manual_processes(root));
    patterns.extend(colocated::detect_colocated_types(root));
    patterns.extend(manifest::detect_config_patterns(root));

    patterns.sort_by(|a, b| {
        b.confidence
            .partial_cmp(&a.confidence)
            .unwrap_or(Ordering::Equal)
    });

    debug!(
        "Pattern scan complete — {} matches in {:.2}s",
        patterns.len(),
        start.elapsed().as_secs_f64(),
    );
    reporter.on_pattern_complete(patterns.len(), start.elapsed().as_secs_f64());

    PatternScanResult {
        patterns,
        scanned_at: Utc::now().to_rfc3339(),
        scan_duration_ms: start.elapsed().as_millis() as u64,
    }
}

/// UTF-8-safe prefix of at most `limit` chars.
pub(crate) fn truncate_chars(text: &str, limit: usize) -> String {
    text.chars().take(limit).collect()
}
