use crate::hasher;
use crate::patterns::{truncate_chars, PatternEvidence, PatternKind, PatternMatch, SkillTemplate};
use lazy_static::lazy_static;
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

struct ProcessIndicator {
    pattern: Regex,
    tool_equivalent: &'static str,
    skill_name: &'static str,
    description: &'static str,
}

lazy_static! {
    /// Manual workflows with a known automatable equivalent, each
    /// pre-bound to a target skill.
    static ref PROCESS_INDICATORS: Vec<ProcessIndicator> = vec![
        ProcessIndicator {
            pattern: Regex::new(r"(?i)(?:manually|by hand)\s+(?:copy|move|rename|delete|create)")
                .unwrap(),
            tool_equivalent: "filesystem tooling",
            skill_name: "file-operations",
            description: "Automate file operations with filesystem tools",
        },
        ProcessIndicator {
            pattern: Regex::new(r"(?i)(?:open|check|visit)\s+(?:the\s+)?(?:browser|URL|website|page)")
                .unwrap(),
            tool_equivalent: "web-fetch tooling",
            skill_name: "web-check",
            description: "Automate web checks with fetch tools",
        },
        ProcessIndicator {
            pattern: Regex::new(
                r"(?i)(?:search|look|find)\s+(?:for|through|in)\s+(?:the\s+)?(?:docs|documentation)",
            )
            .unwrap(),
            tool_equivalent: "web-search tooling",
            skill_name: "doc-search",
            description: "Search documentation automatically",
        },
        ProcessIndicator {
            pattern: Regex::new(r"(?i)(?:format|lint|prettify|beautify)\s+(?:the\s+)?(?:code|files?)")
                .unwrap(),
            tool_equivalent: "a pre-commit hook",
            skill_name: "auto-format",
            description: "Set up automatic code formatting",
        },
        ProcessIndicator {
            pattern: Regex::new(r"(?i)(?:deploy|push|upload)\s+(?:to|the)\s+(?:server|production|staging)")
                .unwrap(),
            tool_equivalent: "a deployment skill",
            skill_name: "auto-deploy",
            description: "Create a deployment skill",
        },
        ProcessIndicator {
            pattern: Regex::new(r"(?i)(?:run|execute)\s+(?:the\s+)?(?:tests?|test suite|specs?)")
                .unwrap(),
            tool_equivalent: "a test-runner skill",
            skill_name: "run-tests",
            description: "Create a test-running skill",
        },
    ];
}

/// Docs, build scripts and the manifest are scanned for these.
const CANDIDATE_FILES: &[&str] = &[
    "AGENTS.md",
    "README.md",
    "CONTRIBUTING.md",
    "Makefile",
    "justfile",
    "package.json",
];

const EXCERPT_LIMIT: usize = 200;

/// Detects descriptions of manual workflows. Matches targeting the same
/// skill accumulate evidence across files instead of duplicating: the
/// first file sets confidence at `0.4 + 0.15 * occurrences` (cap 0.9) and
/// each additional file adds 0.1 (cap 0.95).
pub fn detect_manual_processes(root: &Path) -> Vec<PatternMatch> {
    let mut matches: Vec<PatternMatch> = Vec::new();

    for file_path in candidate_files(root) {
        let content = match fs::read_to_string(&file_path) {
            Ok(content) => content,
            Err(err) => {
                debug!("Skipping candidate file {}: {}", file_path.display(), err);
                continue;
            }
        };

        let rel = file_path
            .strip_prefix(root)
            .unwrap_or(&file_path)
            .display()
            .to_string();

        for indicator in PROCESS_INDICATORS.iter() {
            let evidence: Vec<PatternEvidence> = content
                .lines()
                .enumerate()
                .filter(|(_, line)| indicator.pattern.is_match(line))
                .map(|(index, line)| PatternEvidence {
                    file_path: rel.clone(),
                    excerpt: truncate_chars(line.trim(), EXCERPT_LIMIT),
                    line_number: Some(index + 1),
                })
                .collect();

            if evidence.is_empty() {
                continue;
            }

            if let Some(existing) = matches
                .iter_mut()
                .find(|m| m.suggested_skill.name == indicator.skill_name)
            {
                existing.evidence.extend(evidence);
                existing.confidence = (existing.confidence + 0.1).min(0.95);
                continue;
            }

            let confidence = (0.4 + evidence.len() as f64 * 0.15).min(0.9);
            matches.push(PatternMatch {
                // id input: skill name + first corroborating file path
                id: format!(
                    "proc-{}",
                    hasher::short_hash(&format!("{}{}", indicator.skill_name, rel))
                ),
                kind: PatternKind::ManualProcess,
                name: format!("Manual process: {}", indicator.description),
                description: format!(
                    "Found references to manual processes that could be automated with {}",
                    indicator.tool_equivalent
                ),
                evidence,
                confidence,
                suggested_skill: SkillTemplate {
                    name: indicator.skill_name.to_string(),
                    description: indicator.description.to_string(),
                    instructions: format!(
                        "# {}\n\n{}\n\nThis skill automates the manual process detected in your project files.",
                        indicator.skill_name, indicator.description
                    ),
                    disable_model_invocation: None,
                },
            });
        }
    }

    matches
}

/// The fixed candidate list plus any shell scripts under `scripts/`.
fn candidate_files(root: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = CANDIDATE_FILES
        .iter()
        .map(|name| root.join(name))
        .filter(|path| path.is_file())
        .collect();

    if let Ok(entries) = fs::read_dir(root.join("scripts")) {
        let mut scripts: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.extension().and_then(|e| e.to_str()) == Some("sh"))
            .collect();
        scripts.sort();
        files.extend(scripts);
    }

    files
}
