use crate::hasher;
use crate::scanner::{parent_display, CheckKind, FileEntry, HealthIssue, Severity};
use ahash::AHashSet;
use std::collections::BTreeMap;
use std::path::PathBuf;

const MAX_RECOMMENDED_DEPTH: usize = 6;
const CRITICAL_DEPTH: usize = 8;
const MAX_RECOMMENDED_FILES_IN_DIR: usize = 30;
const CRITICAL_FILES_IN_DIR: usize = 50;

/// Flags deep nesting (one issue for the deepest path), overcrowded
/// directories, and leaf directories with no files in themselves or any
/// descendant.
pub fn check_structure(files: &[FileEntry]) -> Vec<HealthIssue> {
    let mut issues = Vec::new();
    let mut dir_file_count: BTreeMap<String, usize> = BTreeMap::new();
    let mut max_depth = 0;
    let mut deepest_path = String::new();

    for file in files {
        let depth = file.rel_path.components().count();
        if depth > max_depth {
            max_depth = depth;
            deepest_path = file.rel_path.display().to_string();
        }

        if !file.is_directory {
            let dir = parent_display(&file.rel_path);
            if dir != "." {
                *dir_file_count.entry(dir).or_insert(0) += 1;
            }
        }
    }

    if max_depth > MAX_RECOMMENDED_DEPTH {
        let severity = if max_depth > CRITICAL_DEPTH {
            Severity::Critical
        } else {
            Severity::Warning
        };
        issues.push(HealthIssue {
            // id input: the max depth itself
            id: format!("struct-depth-{}", max_depth),
            check: CheckKind::DirectorySprawl,
            severity,
            title: format!("Deep directory nesting ({} levels)", max_depth),
            description: format!(
                "Deepest path: {}. Deep nesting makes navigation harder and often indicates over-organization.",
                deepest_path
            ),
            file_paths: vec![deepest_path.clone()],
            suggested_action: format!(
                "Consider flattening directories deeper than {} levels",
                MAX_RECOMMENDED_DEPTH
            ),
            user_choice: None,
        });
    }

    for (dir, count) in &dir_file_count {
        if *count > MAX_RECOMMENDED_FILES_IN_DIR {
            let severity = if *count > CRITICAL_FILES_IN_DIR {
                Severity::Critical
            } else {
                Severity::Warning
            };
            issues.push(HealthIssue {
                // id input: directory path
                id: format!("struct-crowded-{}", hasher::short_hash(dir)),
                check: CheckKind::DirectorySprawl,
                severity,
                title: format!("{}/ has {} files", dir, count),
                description: format!(
                    "Directory \"{}\" contains {} files. Large directories are hard to navigate and may benefit from sub-grouping.",
                    dir, count
                ),
                file_paths: vec![dir.clone()],
                suggested_action: format!(
                    "Consider organizing files in \"{}\" into subdirectories by function or domain",
                    dir
                ),
                user_choice: None,
            });
        }
    }

    // Parents of every file, for the empty-directory sweep below
    let dirs_with_files: AHashSet<PathBuf> = files
        .iter()
        .filter(|file| !file.is_directory)
        .map(|file| {
            file.rel_path
                .parent()
                .map(|parent| parent.to_path_buf())
                .unwrap_or_default()
        })
        .collect();

    for file in files {
        if !file.is_directory {
            continue;
        }
        let populated = dirs_with_files
            .iter()
            .any(|dir| dir.starts_with(&file.rel_path));
        if !populated {
            let rel = file.rel_path.display().to_string();
            issues.push(HealthIssue {
                // id input: directory path
                id: format!("struct-empty-{}", hasher::short_hash(&rel)),
                check: CheckKind::DirectorySprawl,
                severity: Severity::Info,
                title: format!("Empty directory: {}", rel),
                description: format!("Directory \"{}\" contains no files", rel),
                file_paths: vec![rel],
                suggested_action: "Remove empty directory or add intended files".to_string(),
                user_choice: None,
            });
        }
    }

    issues
}
