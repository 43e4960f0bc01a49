use crate::hasher;
use crate::scanner::{parent_display, CheckKind, FileEntry, HealthIssue, Severity};
use ahash::AHashMap;
use lazy_static::lazy_static;
use regex::Regex;
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum NamingConvention {
    KebabCase,
    SnakeCase,
    PascalCase,
    CamelCase,
}

/// Checked in this order when picking the dominant convention, so ties
/// resolve deterministically.
const ALL_CONVENTIONS: [NamingConvention; 4] = [
    NamingConvention::KebabCase,
    NamingConvention::SnakeCase,
    NamingConvention::PascalCase,
    NamingConvention::CamelCase,
];

impl fmt::Display for NamingConvention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NamingConvention::KebabCase => "kebab-case",
            NamingConvention::SnakeCase => "snake_case",
            NamingConvention::PascalCase => "PascalCase",
            NamingConvention::CamelCase => "camelCase",
        };
        write!(f, "{}", name)
    }
}

lazy_static! {
    static ref TRAILING_EXTENSION: Regex = Regex::new(r"\.\w+$").unwrap();
}

fn detect_convention(name: &str) -> NamingConvention {
    let stem = TRAILING_EXTENSION.replace(name, "");
    if stem.contains('-') {
        return NamingConvention::KebabCase;
    }
    if stem.contains('_') {
        return NamingConvention::SnakeCase;
    }
    let mut chars = stem.chars();
    if let Some(first) = chars.next() {
        if first.is_uppercase() && chars.next().is_some() {
            return NamingConvention::PascalCase;
        }
    }
    // plain lowercase names default to camelCase
    NamingConvention::CamelCase
}

/// Groups files by (parent directory, extension); groups of 3+ members
/// that mix conventions produce one issue per minority convention, listing
/// only the outliers.
pub fn check_naming(files: &[FileEntry]) -> Vec<HealthIssue> {
    let mut issues = Vec::new();

    let mut groups: BTreeMap<(String, String), Vec<String>> = BTreeMap::new();
    for file in files {
        if file.is_directory {
            continue;
        }
        let ext = match file.rel_path.extension().and_then(|e| e.to_str()) {
            Some(ext) => format!(".{}", ext),
            None => continue, // skip extensionless files
        };
        let dir = parent_display(&file.rel_path);
        groups
            .entry((dir, ext))
            .or_default()
            .push(file.rel_path.display().to_string());
    }

    for ((dir, ext), members) in &groups {
        if members.len() < 3 {
            continue; // not enough files to call it a pattern
        }

        let mut by_convention: AHashMap<NamingConvention, Vec<String>> = AHashMap::new();
        for rel in members {
            by_convention
                .entry(detect_convention(basename_of(rel)))
                .or_default()
                .push(rel.clone());
        }

        if by_convention.len() < 2 {
            continue;
        }

        let mut dominant = NamingConvention::CamelCase;
        let mut dominant_count = 0;
        for convention in ALL_CONVENTIONS {
            if let Some(paths) = by_convention.get(&convention) {
                if paths.len() > dominant_count {
                    dominant = convention;
                    dominant_count = paths.len();
                }
            }
        }

        for convention in ALL_CONVENTIONS {
            if convention == dominant {
                continue;
            }
            let Some(outliers) = by_convention.get(&convention) else {
                continue;
            };
            let shown: Vec<&str> = outliers.iter().take(3).map(|rel| basename_of(rel)).collect();
            let ellipsis = if outliers.len() > 3 { "..." } else { "" };
            let group_label = if dir == "." { "root" } else { dir.as_str() };
            issues.push(HealthIssue {
                // id input: dir + "::" + extension
                id: format!(
                    "name-{}-{}",
                    convention,
                    hasher::short_hash(&format!("{}::{}", dir, ext))
                ),
                check: CheckKind::NamingInconsistency,
                severity: Severity::Info,
                title: format!("Mixed naming conventions in {}/", group_label),
                description: format!(
                    "{} {} files use {}, but {} use {}: {}{}",
                    dominant_count,
                    ext,
                    dominant,
                    outliers.len(),
                    convention,
                    shown.join(", "),
                    ellipsis
                ),
                file_paths: outliers.clone(),
                suggested_action: format!("Rename to match the dominant {} convention", dominant),
                user_choice: None,
            });
        }
    }

    issues
}

fn basename_of(rel: &str) -> &str {
    std::path::Path::new(rel)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(rel)
}
