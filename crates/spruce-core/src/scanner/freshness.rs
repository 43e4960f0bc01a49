use crate::hasher;
use crate::scanner::{CheckKind, FileEntry, HealthIssue, Severity};
use chrono::{DateTime, Utc};
use lazy_static::lazy_static;
use regex::Regex;
use std::fs;
use std::path::{Component, Path, PathBuf};

/// Designated documentation files, checked wherever they appear; anything
/// under `docs/` is also treated as documentation.
const DOC_FILES: &[&str] = &[
    "README.md",
    "AGENTS.md",
    "CONTRIBUTING.md",
    "ARCHITECTURE.md",
    "TODO.md",
    "CHANGELOG.md",
];

/// Staleness of this file is critical; its absence is flagged too.
const PRIMARY_DOC: &str = "README.md";

/// Extensions that drive the project's "activity clock".
const SOURCE_EXTENSIONS: &[&str] = &["ts", "tsx", "js", "jsx", "py", "rb", "go", "rs"];

const PLACEHOLDER_TOKENS: &[&str] = &["TODO", "FIXME", "TBD", "placeholder", "lorem ipsum"];

const STALE_DOC_DAYS: i64 = 30;
const RECENT_SOURCE_DAYS: i64 = 7;
const STUB_CONTENT_LENGTH: usize = 50;
const MAX_CHECKED_DOC_REFS: usize = 20;

lazy_static! {
    static ref BACKTICK_FILE_REF: Regex = Regex::new(r"`([^`]+\.\w+)`").unwrap();
}

/// Compares documentation age against the most recent source change and
/// scans doc content for stubs, placeholder text and dead file references.
///
/// The activity clock is the single most-recently-modified source file
/// project-wide. An unrelated recent touch therefore skews it; that is a
/// known heuristic weakness, kept as-is.
pub fn check_freshness(files: &[FileEntry]) -> Vec<HealthIssue> {
    let mut issues = Vec::new();

    let latest_source_mod: Option<DateTime<Utc>> = files
        .iter()
        .filter(|file| !file.is_directory && is_source_file(&file.rel_path))
        .map(|file| file.modified_at)
        .max();

    for file in files {
        if file.is_directory || !is_doc(&file.rel_path) {
            continue;
        }

        let rel = file.rel_path.display().to_string();
        let basename = file_basename(&file.rel_path);

        if let Some(source_mod) = latest_source_mod {
            let doc_days = days_since(file.modified_at);
            let source_days = days_since(source_mod);
            if doc_days > STALE_DOC_DAYS && source_days < RECENT_SOURCE_DAYS {
                let severity = if basename == PRIMARY_DOC {
                    Severity::Critical
                } else {
                    Severity::Warning
                };
                issues.push(HealthIssue {
                    // id input: doc path
                    id: format!("fresh-stale-{}", hasher::short_hash(&rel)),
                    check: CheckKind::DocFreshness,
                    severity,
                    title: format!("{} may be outdated", basename),
                    description: format!(
                        "{} was last modified {} days ago, but source code was modified {} days ago",
                        rel, doc_days, source_days
                    ),
                    file_paths: vec![rel.clone()],
                    suggested_action: format!(
                        "Review and update {} to reflect current project state",
                        basename
                    ),
                    user_choice: None,
                });
            }
        }

        for warning in doc_content_warnings(&file.path) {
            issues.push(HealthIssue {
                // id input: doc path + warning text
                id: format!(
                    "fresh-content-{}",
                    hasher::short_hash(&format!("{}{}", rel, warning))
                ),
                check: CheckKind::DocFreshness,
                severity: Severity::Info,
                title: format!("Content issue in {}", basename),
                description: warning.clone(),
                file_paths: vec![rel.clone()],
                suggested_action: format!("Update {}: {}", basename, warning),
                user_choice: None,
            });
        }
    }

    let has_primary_doc = files
        .iter()
        .any(|file| file_basename(&file.rel_path) == PRIMARY_DOC);
    if !has_primary_doc {
        issues.push(HealthIssue {
            id: "fresh-missing-readme".to_string(),
            check: CheckKind::DocFreshness,
            severity: Severity::Warning,
            title: "No README.md found".to_string(),
            description:
                "A README.md gives contributors and tooling a reliable overview of the project"
                    .to_string(),
            file_paths: vec![],
            suggested_action:
                "Create a README.md with project overview, structure, and conventions".to_string(),
            user_choice: None,
        });
    }

    issues
}

fn is_source_file(rel_path: &Path) -> bool {
    rel_path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| SOURCE_EXTENSIONS.contains(&ext))
        .unwrap_or(false)
}

fn is_doc(rel_path: &Path) -> bool {
    let basename = file_basename(rel_path);
    DOC_FILES.contains(&basename.as_str()) || rel_path.starts_with("docs")
}

fn file_basename(rel_path: &Path) -> String {
    rel_path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn days_since(moment: DateTime<Utc>) -> i64 {
    (Utc::now() - moment).num_days()
}

/// Content-quality findings for one doc file: stub length, placeholder
/// tokens (first hit only), and backtick file references that no longer
/// resolve. Unreadable files contribute nothing.
fn doc_content_warnings(path: &Path) -> Vec<String> {
    let mut warnings = Vec::new();
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(_) => return warnings,
    };

    if content.trim().len() < STUB_CONTENT_LENGTH {
        warnings.push("File appears to be a stub with minimal content".to_string());
    }

    let lowered = content.to_lowercase();
    for token in PLACEHOLDER_TOKENS {
        if lowered.contains(&token.to_lowercase()) {
            warnings.push(format!("Contains placeholder text: \"{}\"", token));
            break;
        }
    }

    let dir = path.parent().unwrap_or(Path::new("."));
    for capture in BACKTICK_FILE_REF
        .captures_iter(&content)
        .take(MAX_CHECKED_DOC_REFS)
    {
        let reference = &capture[1];
        if reference.starts_with("./")
            || reference.starts_with("src/")
            || reference.starts_with("lib/")
        {
            if !resolve_against(dir, reference).exists() {
                warnings.push(format!("References non-existent file: {}", reference));
            }
        }
    }

    warnings
}

fn resolve_against(base_dir: &Path, reference: &str) -> PathBuf {
    let mut resolved = base_dir.to_path_buf();
    for component in Path::new(reference).components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                resolved.pop();
            }
            Component::Normal(segment) => resolved.push(segment),
            _ => {}
        }
    }
    resolved
}
