use crate::hasher;
use crate::patterns::{PatternEvidence, PatternKind, PatternMatch, SkillTemplate};
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use tracing::debug;
use walkdir::WalkDir;

/// This detector walks on its own with a tighter filter than the health
/// walker: every dot-prefixed entry is skipped, no exceptions.
const COLOCATED_IGNORE: &[&str] = &[
    "node_modules",
    ".git",
    "dist",
    "build",
    ".next",
    "__pycache__",
    ".venv",
    "coverage",
];

const MIN_RECURRING_DIRS: usize = 3;
const MAX_EVIDENCE_DIRS: usize = 5;

/// Finds extension-set signatures recurring across directories: when the
/// same combination of file types appears in 3+ distinct directories
/// (say `.tsx` + `.test.tsx` + `.css` per component), the layout is a
/// candidate for a scaffolding skill.
pub fn detect_colocated_types(root: &Path) -> Vec<PatternMatch> {
    // directory → set of extensions present in it
    let mut dir_extensions: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();

    let walker = WalkDir::new(root)
        .min_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| {
            if entry.depth() == 0 {
                return true;
            }
            let name = entry.file_name().to_string_lossy();
            !name.starts_with('.') && !COLOCATED_IGNORE.contains(&name.as_ref())
        });

    for item in walker {
        let item = match item {
            Ok(item) => item,
            Err(err) => {
                debug!("Skipping unreadable entry: {}", err);
                continue;
            }
        };
        if item.file_type().is_dir() {
            continue;
        }
        let Some(ext) = item.path().extension().and_then(|e| e.to_str()) else {
            continue;
        };
        let rel = item.path().strip_prefix(root).unwrap_or(item.path());
        let dir = match rel.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.display().to_string(),
            _ => ".".to_string(),
        };
        dir_extensions.entry(dir).or_default().insert(format!(".{}", ext));
    }

    // signature → directories exhibiting it
    let mut combos: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for (dir, extensions) in &dir_extensions {
        if extensions.len() < 2 {
            continue;
        }
        let signature = extensions.iter().cloned().collect::<Vec<_>>().join("+");
        combos.entry(signature).or_default().push(dir.clone());
    }

    let mut matches = Vec::new();
    for (signature, dirs) in &combos {
        if dirs.len() < MIN_RECURRING_DIRS {
            continue;
        }

        let extensions: Vec<&str> = signature.split('+').collect();
        let listed = extensions.join(", ");
        let scaffold_lines: Vec<String> = extensions
            .iter()
            .map(|ext| format!("- <name>{}", ext))
            .collect();

        matches.push(PatternMatch {
            // id input: the sorted "+"-joined extension signature
            id: format!("ftype-{}", hasher::short_hash(signature)),
            kind: PatternKind::FileTypePattern,
            name: format!("Co-located file pattern: {}", extensions.join(" + ")),
            description: format!(
                "Found {} directories where {} files always appear together. This could be captured as a component/module template skill.",
                dirs.len(),
                listed
            ),
            evidence: dirs
                .iter()
                .take(MAX_EVIDENCE_DIRS)
                .map(|dir| PatternEvidence {
                    file_path: dir.clone(),
                    excerpt: format!("Directory contains: {}", listed),
                    line_number: None,
                })
                .collect(),
            confidence: (0.4 + dirs.len() as f64 * 0.1).min(0.85),
            suggested_skill: SkillTemplate {
                name: format!("create-{}-module", extensions[0].trim_start_matches('.')),
                description: format!("Scaffold a new module with {} files", listed),
                instructions: format!(
                    "Create a new module with the following files:\n{}\n\nFollow the existing patterns in the project.",
                    scaffold_lines.join("\n")
                ),
                disable_model_invocation: None,
            },
        });
    }

    matches
}
