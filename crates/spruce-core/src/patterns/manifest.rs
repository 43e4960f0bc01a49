use crate::hasher;
use crate::patterns::{truncate_chars, PatternEvidence, PatternKind, PatternMatch, SkillTemplate};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::debug;

const MANIFEST_NAME: &str = "package.json";
const COMPLEX_SCRIPT_LENGTH: usize = 80;
const EXCERPT_LIMIT: usize = 150;

/// The manifest is untyped JSON in the wild; missing fields are a modeled
/// case, not a runtime surprise.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct PackageManifest {
    scripts: BTreeMap<String, String>,
    dependencies: BTreeMap<String, String>,
    dev_dependencies: BTreeMap<String, String>,
}

impl PackageManifest {
    fn load(root: &Path) -> Option<Self> {
        let raw = fs::read_to_string(root.join(MANIFEST_NAME)).ok()?;
        match serde_json::from_str(&raw) {
            Ok(manifest) => Some(manifest),
            Err(err) => {
                debug!("Malformed {}: {}", MANIFEST_NAME, err);
                None
            }
        }
    }
}

/// Mines the manifest's script map: chained or overlong commands become
/// wrap-as-skill suggestions; a typed-language project without a lint
/// script, or any project without a test script, gets a lower-confidence
/// improvement suggestion. A missing or malformed manifest contributes
/// nothing.
pub fn detect_config_patterns(root: &Path) -> Vec<PatternMatch> {
    let Some(manifest) = PackageManifest::load(root) else {
        return Vec::new();
    };

    // capability flags, computed once
    let has_typescript = manifest.dependencies.contains_key("typescript")
        || manifest.dev_dependencies.contains_key("typescript");
    let has_lint_script =
        manifest.scripts.contains_key("lint") || manifest.scripts.contains_key("eslint");
    let has_test_script = manifest.scripts.contains_key("test")
        || manifest.scripts.contains_key("jest")
        || manifest.scripts.contains_key("vitest");

    let mut matches = Vec::new();

    for (name, command) in &manifest.scripts {
        let complex = command.contains("&&")
            || command.contains('|')
            || command.chars().count() > COMPLEX_SCRIPT_LENGTH;
        if !complex {
            continue;
        }
        matches.push(PatternMatch {
            // id input: the script name
            id: format!("cfg-script-{}", hasher::short_hash(name)),
            kind: PatternKind::ConfigPattern,
            name: format!("Complex script: \"{}\"", name),
            description: format!(
                "The \"{}\" script is complex and could be wrapped as a reusable skill for easier invocation",
                name
            ),
            evidence: vec![PatternEvidence {
                file_path: MANIFEST_NAME.to_string(),
                excerpt: format!("\"{}\": \"{}\"", name, truncate_chars(command, EXCERPT_LIMIT)),
                line_number: None,
            }],
            confidence: 0.6,
            suggested_skill: SkillTemplate {
                name: format!("run-{}", name),
                description: format!("Run the \"{}\" script with proper context", name),
                instructions: format!(
                    "Run the project's \"{}\" script:\n```bash\nnpm run {}\n```\n\nIf it fails, analyze the error and suggest fixes.",
                    name, name
                ),
                disable_model_invocation: None,
            },
        });
    }

    if !has_lint_script && has_typescript {
        matches.push(PatternMatch {
            id: "cfg-missing-lint".to_string(),
            kind: PatternKind::ConfigPattern,
            name: "No linting configured".to_string(),
            description:
                "TypeScript project without a lint script. Consider adding ESLint for code quality."
                    .to_string(),
            evidence: vec![PatternEvidence {
                file_path: MANIFEST_NAME.to_string(),
                excerpt: "No lint script found".to_string(),
                line_number: None,
            }],
            confidence: 0.5,
            suggested_skill: SkillTemplate {
                name: "setup-linting".to_string(),
                description: "Set up ESLint for the project".to_string(),
                instructions:
                    "Set up ESLint with TypeScript support for this project. Install necessary dependencies and create a configuration file."
                        .to_string(),
                disable_model_invocation: None,
            },
        });
    }

    if !has_test_script {
        matches.push(PatternMatch {
            id: "cfg-missing-test".to_string(),
            kind: PatternKind::ConfigPattern,
            name: "No testing configured".to_string(),
            description: "Project without a test script. Consider adding a test framework."
                .to_string(),
            evidence: vec![PatternEvidence {
                file_path: MANIFEST_NAME.to_string(),
                excerpt: "No test script found".to_string(),
                line_number: None,
            }],
            confidence: 0.4,
            suggested_skill: SkillTemplate {
                name: "setup-testing".to_string(),
                description: "Set up a test framework for the project".to_string(),
                instructions:
                    "Set up a test runner for this project. Install dependencies, configure it, and create a sample test file."
                        .to_string(),
                disable_model_invocation: None,
            },
        });
    }

    matches
}
