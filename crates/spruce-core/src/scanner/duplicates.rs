use crate::hasher;
use crate::scanner::{CheckKind, FileEntry, HealthIssue, Severity};
use ahash::AHashMap;
use lazy_static::lazy_static;
use regex::Regex;
use tracing::debug;

/// Files above this size are never hashed for exact-duplicate detection.
const MAX_HASHABLE_SIZE: u64 = 10 * 1024 * 1024;

lazy_static! {
    static ref SEPARATORS: Regex = Regex::new(r"[-_\s]").unwrap();
    static ref DIGIT_RUN: Regex = Regex::new(r"\(?\d+\)?").unwrap();
    static ref COPY_MARKER: Regex = Regex::new(r"(?i)copy").unwrap();
}

/// Two-pronged duplicate detection over the snapshot:
///
/// 1. Exact: group files (1 byte ..= 10MB) by full-content BLAKE3 digest;
///    groups of 2+ are flagged, 3+ identical copies escalate to critical.
/// 2. Name variants: group by normalized name (separators stripped, first
///    digit run and any "copy" marker removed, lowercased); groups of 2+
///    are flagged as warnings regardless of content.
pub fn check_duplicates(files: &[FileEntry]) -> Vec<HealthIssue> {
    let mut issues = Vec::new();
    let mut hash_groups: AHashMap<String, Vec<String>> = AHashMap::new();

    for file in files {
        if file.is_directory || file.size == 0 || file.size > MAX_HASHABLE_SIZE {
            continue;
        }
        match hasher::hash_file_content(&file.path) {
            Ok(hash) => hash_groups
                .entry(hash)
                .or_default()
                .push(file.rel_path.display().to_string()),
            Err(err) => debug!("Skipping unreadable file {}: {}", file.path.display(), err),
        }
    }

    let mut groups: Vec<(String, Vec<String>)> = hash_groups
        .into_iter()
        .filter(|(_, paths)| paths.len() >= 2)
        .collect();
    groups.sort_by(|a, b| a.1.cmp(&b.1));

    for (hash, paths) in groups {
        let severity = if paths.len() > 2 {
            Severity::Critical
        } else {
            Severity::Warning
        };
        issues.push(HealthIssue {
            // id input: content digest (first 8 hex chars)
            id: format!("dup-hash-{}", &hash[..8]),
            check: CheckKind::DuplicateFiles,
            severity,
            title: format!("{} identical files found", paths.len()),
            description: format!("These files have identical content: {}", paths.join(", ")),
            file_paths: paths,
            suggested_action: "Keep one copy and remove the rest".to_string(),
            user_choice: None,
        });
    }

    issues.extend(detect_name_variants(files));
    issues
}

fn detect_name_variants(files: &[FileEntry]) -> Vec<HealthIssue> {
    let mut issues = Vec::new();
    let mut name_groups: AHashMap<String, Vec<String>> = AHashMap::new();

    for file in files {
        if file.is_directory {
            continue;
        }
        let rel = file.rel_path.display().to_string();
        name_groups.entry(normalized_name(&rel)).or_default().push(rel);
    }

    let mut groups: Vec<Vec<String>> = name_groups
        .into_values()
        .filter(|paths| paths.len() >= 2)
        .collect();
    groups.sort();

    for paths in groups {
        issues.push(HealthIssue {
            // id input: comma-joined member paths
            id: format!("dup-name-{}", hasher::short_hash(&paths.join(","))),
            check: CheckKind::DuplicateFiles,
            severity: Severity::Warning,
            title: "Possible duplicate files by name".to_string(),
            description: format!(
                "These files have similar names and may be duplicates: {}",
                paths.join(", ")
            ),
            file_paths: paths,
            suggested_action: "Review and remove redundant copies".to_string(),
            user_choice: None,
        });
    }

    issues
}

/// `notes copy (2).txt` and `notes.txt` collapse to the same key. Generic
/// short names can collide across unrelated files; that false-positive
/// rate is accepted, the check only ever warns.
fn normalized_name(rel_path: &str) -> String {
    let stripped = SEPARATORS.replace_all(rel_path, "");
    let stripped = DIGIT_RUN.replace(&stripped, "");
    let stripped = COPY_MARKER.replace(&stripped, "");
    stripped.to_lowercase()
}
