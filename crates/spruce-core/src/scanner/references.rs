use crate::hasher;
use crate::scanner::{CheckKind, FileEntry, HealthIssue, Severity};
use ahash::AHashSet;
use lazy_static::lazy_static;
use regex::Regex;
use std::fs;
use std::path::{Component, Path, PathBuf};
use tracing::debug;

lazy_static! {
    /// Four classes of relative references extracted from text files:
    /// import/require targets, markdown link targets, src/href attribute
    /// targets, and quoted `./` or `../` path literals. URL and package
    /// targets are filtered out after capture.
    static ref REFERENCE_PATTERNS: Vec<Regex> = vec![
        Regex::new(r#"(?:import|require)\s*\(?['"]([^'"]+)['"]\)?"#).unwrap(),
        Regex::new(r"\[[^\]]*\]\(([^)]+)\)").unwrap(),
        Regex::new(r#"(?:src|href)=["']([^"']+)["']"#).unwrap(),
        Regex::new(r#"['"](\./[^'"]+|\.\./[^'"]+)['"]"#).unwrap(),
    ];
}

const TEXT_EXTENSIONS: &[&str] = &[
    "ts", "tsx", "js", "jsx", "mjs", "cjs", "md", "mdx", "txt", "html", "htm", "css", "scss",
    "json", "yaml", "yml", "toml", "py", "rb", "go", "rs", "vue", "svelte",
];

/// Suffixes tried when the literal target does not exist.
const RESOLUTION_SUFFIXES: &[&str] = &[".ts", ".tsx", ".js", ".jsx"];
const INDEX_VARIANTS: &[&str] = &["index.ts", "index.js"];

/// Flags relative references whose target exists neither in the snapshot
/// nor on disk. One issue per unresolved reference.
pub fn check_references(files: &[FileEntry], root: &Path) -> Vec<HealthIssue> {
    let mut issues = Vec::new();
    let existing: AHashSet<PathBuf> = files.iter().map(|f| f.rel_path.clone()).collect();

    for file in files {
        if file.is_directory || !is_text_file(&file.path) {
            continue;
        }

        let content = match fs::read_to_string(&file.path) {
            Ok(content) => content,
            Err(err) => {
                debug!("Skipping unreadable file {}: {}", file.path.display(), err);
                continue;
            }
        };

        let rel = file.rel_path.display().to_string();
        for reference in extract_references(&content) {
            if resolves(file, &reference, root, &existing) {
                continue;
            }
            issues.push(HealthIssue {
                // id input: referencing path + "|" + reference literal
                id: format!(
                    "ref-missing-{}",
                    hasher::short_hash(&format!("{}|{}", rel, reference))
                ),
                check: CheckKind::MissingReferences,
                severity: Severity::Critical,
                title: format!("Broken reference in {}", rel),
                description: format!(
                    "\"{}\" is referenced but the target file does not exist",
                    reference
                ),
                file_paths: vec![rel.clone()],
                suggested_action: format!("Fix or remove the reference to \"{}\"", reference),
                user_choice: None,
            });
        }
    }

    issues
}

fn is_text_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| TEXT_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

/// Capture relative references, dropping URLs, anchors and package
/// imports. Deduplicated per file so one broken target yields one issue.
fn extract_references(content: &str) -> Vec<String> {
    let mut refs = Vec::new();
    let mut seen = AHashSet::new();
    for pattern in REFERENCE_PATTERNS.iter() {
        for capture in pattern.captures_iter(content) {
            let reference = &capture[1];
            if reference.starts_with("http")
                || reference.starts_with('#')
                || !reference.starts_with('.')
                || reference.contains("node_modules")
            {
                continue;
            }
            if seen.insert(reference.to_string()) {
                refs.push(reference.to_string());
            }
        }
    }
    refs
}

fn resolves(file: &FileEntry, reference: &str, root: &Path, existing: &AHashSet<PathBuf>) -> bool {
    let base_dir = file.path.parent().unwrap_or(root);
    let resolved = resolve_relative(base_dir, reference);

    let mut candidates = vec![resolved.clone()];
    for suffix in RESOLUTION_SUFFIXES {
        candidates.push(PathBuf::from(format!("{}{}", resolved.display(), suffix)));
    }
    for index in INDEX_VARIANTS {
        candidates.push(resolved.join(index));
    }

    candidates.iter().any(|candidate| {
        if let Ok(rel) = candidate.strip_prefix(root) {
            if existing.contains(rel) {
                return true;
            }
        }
        candidate.exists()
    })
}

/// Lexical resolution of `reference` against `base_dir`. The target may
/// not exist, so `..` segments are collapsed without touching the
/// filesystem.
fn resolve_relative(base_dir: &Path, reference: &str) -> PathBuf {
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
