use crate::hasher;
use crate::patterns::{truncate_chars, PatternEvidence, PatternKind, PatternMatch, SkillTemplate};
use ahash::AHashMap;
use lazy_static::lazy_static;
use regex::Regex;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Documents whose prose is treated as standing instructions.
const INSTRUCTION_FILES: &[&str] = &[
    "AGENTS.md",
    "README.md",
    "CONTRIBUTING.md",
    "ARCHITECTURE.md",
    ".cursorrules",
    ".github/copilot-instructions.md",
];

const EXCERPT_LIMIT: usize = 200;
const MIN_OCCURRENCES: usize = 2;

lazy_static! {
    /// Intent categories. A line can land in more than one.
    static ref INSTRUCTION_PATTERNS: Vec<(Regex, &'static str)> = vec![
        (
            Regex::new(r"(?i)always\s+(?:use|run|do|make|ensure|check)").unwrap(),
            "always-do",
        ),
        (
            Regex::new(r"(?i)never\s+(?:use|run|do|make|commit|push)").unwrap(),
            "never-do",
        ),
        (
            Regex::new(r"(?i)before\s+(?:committing|pushing|deploying|merging)").unwrap(),
            "before-action",
        ),
        (
            Regex::new(r"(?i)after\s+(?:committing|pushing|deploying|merging)").unwrap(),
            "after-action",
        ),
        (Regex::new(r"(?i)make\s+sure\s+(?:to|that)").unwrap(), "ensure"),
        (Regex::new(r"(?i)don'?t\s+forget\s+to").unwrap(), "reminder"),
        (
            Regex::new(r#"(?i)run\s+[`"]([^`"]+)[`"]\s+before"#).unwrap(),
            "pre-command",
        ),
    ];
}

/// Instruction lines matching the same intent category across two or more
/// occurrences (possibly spanning files) become one pattern, suggesting a
/// skill that captures the repeated guidance.
pub fn detect_repetitive_instructions(root: &Path) -> Vec<PatternMatch> {
    let mut groups: AHashMap<&'static str, Vec<PatternEvidence>> = AHashMap::new();

    for name in INSTRUCTION_FILES {
        let full_path = root.join(name);
        let content = match fs::read_to_string(&full_path) {
            Ok(content) => content,
            Err(err) => {
                debug!("Skipping instruction file {}: {}", full_path.display(), err);
                continue;
            }
        };

        for (line_index, raw_line) in content.lines().enumerate() {
            let line = raw_line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            for (pattern, label) in INSTRUCTION_PATTERNS.iter() {
                if pattern.is_match(line) {
                    groups.entry(*label).or_default().push(PatternEvidence {
                        file_path: name.to_string(),
                        excerpt: truncate_chars(line, EXCERPT_LIMIT),
                        line_number: Some(line_index + 1),
                    });
                }
            }
        }
    }

    let mut matches = Vec::new();
    // emit in battery order so output is deterministic
    for (_, label) in INSTRUCTION_PATTERNS.iter() {
        let Some(evidence) = groups.remove(label) else {
            continue;
        };
        if evidence.len() < MIN_OCCURRENCES {
            continue;
        }

        let excerpts: Vec<String> = evidence.iter().map(|e| e.excerpt.clone()).collect();
        let confidence = (0.5 + evidence.len() as f64 * 0.1).min(0.9);
        matches.push(PatternMatch {
            // id input: label + concatenated excerpts
            id: format!(
                "instr-{}",
                hasher::short_hash(&format!("{}{}", label, excerpts.concat()))
            ),
            kind: PatternKind::RepetitiveInstruction,
            name: format!("Repeated \"{}\" instructions", label),
            description: format!(
                "Found {} similar instructions that could be captured as a reusable skill",
                evidence.len()
            ),
            evidence,
            confidence,
            suggested_skill: SkillTemplate {
                name: format!("auto-{}", label),
                description: format!(
                    "Automates the \"{}\" pattern found in project instructions",
                    label
                ),
                instructions: excerpts.join("\n"),
                disable_model_invocation: None,
            },
        });
    }

    matches
}
