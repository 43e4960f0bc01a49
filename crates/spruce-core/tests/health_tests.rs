use chrono::{Duration, Utc};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

use spruce_core::scanner::duplicates::check_duplicates;
use spruce_core::scanner::freshness::check_freshness;
use spruce_core::scanner::naming::check_naming;
use spruce_core::scanner::references::check_references;
use spruce_core::scanner::structure::check_structure;
use spruce_core::scanner::walk::walk_directory;
use spruce_core::scanner::FileEntry;
use spruce_core::Severity;

/// Build a FileEntry from a relative path. Pure-logic detectors
/// (structure, naming) never touch the filesystem, so the path does not
/// need to exist.
fn make_entry(base: &Path, rel: &str, is_dir: bool) -> FileEntry {
    FileEntry {
        path: base.join(rel),
        rel_path: PathBuf::from(rel),
        size: 100,
        modified_at: Utc::now(),
        is_directory: is_dir,
    }
}

fn entries_for_path(base: &Path, deep_path: &str) -> Vec<FileEntry> {
    let parts: Vec<&str> = deep_path.split('/').collect();
    let mut entries = Vec::new();
    for i in 1..parts.len() {
        entries.push(make_entry(base, &parts[..i].join("/"), true));
    }
    entries.push(make_entry(base, deep_path, false));
    entries
}

// ---------------------------------------------------------------------------
// check_structure
// ---------------------------------------------------------------------------

#[test]
fn test_structure_clean_project_has_no_issues() {
    let base = Path::new("/proj");
    let files = vec![
        make_entry(base, "src", true),
        make_entry(base, "src/index.ts", false),
        make_entry(base, "src/utils.ts", false),
        make_entry(base, "package.json", false),
    ];
    assert!(check_structure(&files).is_empty());
}

#[test]
fn test_structure_moderate_nesting_is_warning() {
    let files = entries_for_path(Path::new("/proj"), "a/b/c/d/e/f/g/deep.ts");
    let issues = check_structure(&files);
    let depth: Vec<_> = issues
        .iter()
        .filter(|i| i.id.starts_with("struct-depth"))
        .collect();
    assert_eq!(depth.len(), 1);
    assert_eq!(depth[0].severity, Severity::Warning);
    assert!(depth[0].title.contains("levels"));
}

#[test]
fn test_structure_very_deep_nesting_is_critical() {
    let files = entries_for_path(Path::new("/proj"), "a/b/c/d/e/f/g/h/i/verydeep.ts");
    let issues = check_structure(&files);
    let depth: Vec<_> = issues
        .iter()
        .filter(|i| i.id.starts_with("struct-depth"))
        .collect();
    assert_eq!(depth.len(), 1);
    assert_eq!(depth[0].severity, Severity::Critical);
}

#[test]
fn test_structure_crowded_directory() {
    let base = Path::new("/proj");
    let mut files = vec![make_entry(base, "big-dir", true)];
    for i in 0..35 {
        files.push(make_entry(base, &format!("big-dir/file{}.ts", i), false));
    }
    let issues = check_structure(&files);
    let crowded: Vec<_> = issues
        .iter()
        .filter(|i| i.id.starts_with("struct-crowded"))
        .collect();
    assert_eq!(crowded.len(), 1);
    assert_eq!(crowded[0].severity, Severity::Warning);
    assert!(crowded[0].title.contains("big-dir"));
}

#[test]
fn test_structure_very_crowded_directory_is_critical() {
    let base = Path::new("/proj");
    let mut files = vec![make_entry(base, "huge-dir", true)];
    for i in 0..55 {
        files.push(make_entry(base, &format!("huge-dir/f{}.ts", i), false));
    }
    let issues = check_structure(&files);
    let crowded: Vec<_> = issues
        .iter()
        .filter(|i| i.id.starts_with("struct-crowded"))
        .collect();
    assert_eq!(crowded.len(), 1);
    assert_eq!(crowded[0].severity, Severity::Critical);
}

#[test]
fn test_structure_empty_directory_is_info() {
    let base = Path::new("/proj");
    let files = vec![
        make_entry(base, "empty-dir", true),
        make_entry(base, "has-files", true),
        make_entry(base, "has-files/a.ts", false),
    ];
    let issues = check_structure(&files);
    let empty: Vec<_> = issues
        .iter()
        .filter(|i| i.id.starts_with("struct-empty"))
        .collect();
    assert_eq!(empty.len(), 1);
    assert!(empty[0].title.contains("empty-dir"));
    assert_eq!(empty[0].severity, Severity::Info);
}

#[test]
fn test_structure_directory_with_populated_subdirectory_is_not_empty() {
    let base = Path::new("/proj");
    let files = vec![
        make_entry(base, "parent", true),
        make_entry(base, "parent/child", true),
        make_entry(base, "parent/child/real.ts", false),
    ];
    let issues = check_structure(&files);
    assert!(issues.iter().all(|i| !i.id.starts_with("struct-empty")));
}

// ---------------------------------------------------------------------------
// check_naming
// ---------------------------------------------------------------------------

#[test]
fn test_naming_consistent_convention_is_clean() {
    let base = Path::new("/proj");
    let files = vec![
        make_entry(base, "src/myFile.ts", false),
        make_entry(base, "src/otherFile.ts", false),
        make_entry(base, "src/anotherFile.ts", false),
        make_entry(base, "src/yetAnother.ts", false),
    ];
    assert!(check_naming(&files).is_empty());
}

#[test]
fn test_naming_dominant_convention_reports_only_outliers() {
    let base = Path::new("/proj");
    let files = vec![
        make_entry(base, "src/my-module.ts", false),
        make_entry(base, "src/other-module.ts", false),
        make_entry(base, "src/third-module.ts", false),
        make_entry(base, "src/MyComponent.ts", false),
    ];
    let issues = check_naming(&files);
    assert_eq!(issues.len(), 1);
    assert!(issues[0].title.contains("src"));
    assert!(issues[0].description.contains("kebab-case"));
    assert!(issues[0].description.contains("PascalCase"));
    assert_eq!(issues[0].file_paths, vec!["src/MyComponent.ts".to_string()]);
    assert_eq!(issues[0].severity, Severity::Info);
}

#[test]
fn test_naming_small_groups_are_skipped() {
    let base = Path::new("/proj");
    let files = vec![
        make_entry(base, "lib/MyFile.ts", false),
        make_entry(base, "lib/other-file.ts", false),
    ];
    assert!(check_naming(&files).is_empty());
}

#[test]
fn test_naming_groups_by_extension_separately() {
    let base = Path::new("/proj");
    let files = vec![
        make_entry(base, "components/MyWidget.ts", false),
        make_entry(base, "components/BigPanel.ts", false),
        make_entry(base, "components/SmallBtn.ts", false),
        make_entry(base, "components/my-widget.css", false),
        make_entry(base, "components/big-panel.css", false),
        make_entry(base, "components/small-btn.css", false),
    ];
    assert!(check_naming(&files).is_empty());
}

#[test]
fn test_naming_skips_extensionless_files() {
    let base = Path::new("/proj");
    let files = vec![
        make_entry(base, "src/Makefile", false),
        make_entry(base, "src/Dockerfile", false),
        make_entry(base, "src/README", false),
        make_entry(base, "src/myModule.ts", false),
        make_entry(base, "src/otherModule.ts", false),
        make_entry(base, "src/anotherModule.ts", false),
    ];
    assert!(check_naming(&files).is_empty());
}

// ---------------------------------------------------------------------------
// check_duplicates
// ---------------------------------------------------------------------------

fn snapshot(root: &Path) -> Vec<FileEntry> {
    walk_directory(root, &[])
}

#[test]
fn test_duplicates_copy_variant_pair() {
    let tmp = tempdir().unwrap();
    fs::write(tmp.path().join("a.ts"), "export const a = 1;").unwrap();
    fs::write(tmp.path().join("a (1).ts"), "export const a = 1;").unwrap();

    let issues = check_duplicates(&snapshot(tmp.path()));

    let by_hash: Vec<_> = issues.iter().filter(|i| i.id.starts_with("dup-hash-")).collect();
    assert_eq!(by_hash.len(), 1);
    assert_eq!(by_hash[0].severity, Severity::Warning, "2 copies stay a warning");
    assert_eq!(by_hash[0].file_paths.len(), 2);
    assert!(by_hash[0].file_paths.contains(&"a.ts".to_string()));
    assert!(by_hash[0].file_paths.contains(&"a (1).ts".to_string()));

    // the names also collapse under normalization
    let by_name: Vec<_> = issues.iter().filter(|i| i.id.starts_with("dup-name-")).collect();
    assert_eq!(by_name.len(), 1);
    assert_eq!(by_name[0].severity, Severity::Warning);
}

#[test]
fn test_duplicates_three_copies_escalate_to_critical() {
    let tmp = tempdir().unwrap();
    fs::write(tmp.path().join("one.txt"), "same bytes").unwrap();
    fs::write(tmp.path().join("two.txt"), "same bytes").unwrap();
    fs::write(tmp.path().join("three.txt"), "same bytes").unwrap();

    let issues = check_duplicates(&snapshot(tmp.path()));
    let by_hash: Vec<_> = issues.iter().filter(|i| i.id.starts_with("dup-hash-")).collect();
    assert_eq!(by_hash.len(), 1);
    assert_eq!(by_hash[0].severity, Severity::Critical);
    assert_eq!(by_hash[0].file_paths.len(), 3);
}

#[test]
fn test_duplicates_empty_files_are_not_grouped() {
    let tmp = tempdir().unwrap();
    fs::write(tmp.path().join("a.txt"), "").unwrap();
    fs::write(tmp.path().join("b.txt"), "").unwrap();

    let issues = check_duplicates(&snapshot(tmp.path()));
    assert!(issues.iter().all(|i| !i.id.starts_with("dup-hash-")));
}

// ---------------------------------------------------------------------------
// check_freshness
// ---------------------------------------------------------------------------

#[test]
fn test_freshness_stale_primary_doc_is_critical() {
    let base = Path::new("/proj");
    let mut readme = make_entry(base, "README.md", false);
    readme.modified_at = Utc::now() - Duration::days(60);
    let mut source = make_entry(base, "src/main.ts", false);
    source.modified_at = Utc::now() - Duration::days(1);

    let issues = check_freshness(&[readme, source]);
    let stale: Vec<_> = issues.iter().filter(|i| i.id.starts_with("fresh-stale")).collect();
    assert_eq!(stale.len(), 1);
    assert_eq!(stale[0].severity, Severity::Critical);
    assert!(stale[0].title.contains("README.md"));
}

#[test]
fn test_freshness_stale_secondary_doc_is_warning() {
    let base = Path::new("/proj");
    let readme = make_entry(base, "README.md", false);
    let mut contributing = make_entry(base, "CONTRIBUTING.md", false);
    contributing.modified_at = Utc::now() - Duration::days(90);
    let mut source = make_entry(base, "src/main.rs", false);
    source.modified_at = Utc::now() - Duration::days(2);

    let issues = check_freshness(&[readme, contributing, source]);
    let stale: Vec<_> = issues.iter().filter(|i| i.id.starts_with("fresh-stale")).collect();
    assert_eq!(stale.len(), 1);
    assert_eq!(stale[0].severity, Severity::Warning);
    assert!(stale[0].title.contains("CONTRIBUTING.md"));
}

#[test]
fn test_freshness_quiet_project_is_not_stale() {
    let base = Path::new("/proj");
    let mut readme = make_entry(base, "README.md", false);
    readme.modified_at = Utc::now() - Duration::days(60);
    let mut source = make_entry(base, "src/main.ts", false);
    source.modified_at = Utc::now() - Duration::days(45);

    let issues = check_freshness(&[readme, source]);
    assert!(issues.iter().all(|i| !i.id.starts_with("fresh-stale")));
}

#[test]
fn test_freshness_missing_primary_doc_is_flagged() {
    let base = Path::new("/proj");
    let files = vec![make_entry(base, "src/main.ts", false)];
    let issues = check_freshness(&files);
    assert!(issues.iter().any(|i| i.id == "fresh-missing-readme"));
}

#[test]
fn test_freshness_stub_and_placeholder_content() {
    let tmp = tempdir().unwrap();
    fs::write(tmp.path().join("README.md"), "WIP").unwrap();

    let issues = check_freshness(&snapshot(tmp.path()));
    let content: Vec<_> = issues
        .iter()
        .filter(|i| i.id.starts_with("fresh-content"))
        .collect();
    assert_eq!(content.len(), 1);
    assert_eq!(content[0].severity, Severity::Info);
    assert!(content[0].description.contains("stub"));

    fs::write(
        tmp.path().join("README.md"),
        "This overview is long enough to not be a stub, but it still says TODO somewhere.",
    )
    .unwrap();
    let issues = check_freshness(&snapshot(tmp.path()));
    assert!(issues
        .iter()
        .any(|i| i.id.starts_with("fresh-content") && i.description.contains("placeholder text")));
}

#[test]
fn test_freshness_dead_backtick_reference() {
    let tmp = tempdir().unwrap();
    fs::write(
        tmp.path().join("README.md"),
        "The entry point lives in `src/nothing.rs` according to this stale overview text.",
    )
    .unwrap();

    let issues = check_freshness(&snapshot(tmp.path()));
    assert!(issues
        .iter()
        .any(|i| i.id.starts_with("fresh-content") && i.description.contains("src/nothing.rs")));
}

// ---------------------------------------------------------------------------
// check_references
// ---------------------------------------------------------------------------

#[test]
fn test_references_broken_markdown_link_is_critical() {
    let tmp = tempdir().unwrap();
    fs::write(tmp.path().join("notes.md"), "See [the guide](./missing.md) first.").unwrap();

    let files = snapshot(tmp.path());
    let issues = check_references(&files, tmp.path());
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].severity, Severity::Critical);
    assert!(issues[0].description.contains("./missing.md"));
    assert_eq!(issues[0].file_paths, vec!["notes.md".to_string()]);
}

#[test]
fn test_references_resolve_through_source_suffixes() {
    let tmp = tempdir().unwrap();
    fs::write(tmp.path().join("main.ts"), "import \"./util\";\n").unwrap();
    fs::write(tmp.path().join("util.ts"), "export {};\n").unwrap();

    let files = snapshot(tmp.path());
    assert!(check_references(&files, tmp.path()).is_empty());
}

#[test]
fn test_references_resolve_through_index_variants() {
    let tmp = tempdir().unwrap();
    fs::create_dir_all(tmp.path().join("lib")).unwrap();
    fs::write(tmp.path().join("main.ts"), "import \"./lib\";\n").unwrap();
    fs::write(tmp.path().join("lib/index.ts"), "export {};\n").unwrap();

    let files = snapshot(tmp.path());
    assert!(check_references(&files, tmp.path()).is_empty());
}

#[test]
fn test_references_ignore_urls_and_package_imports() {
    let tmp = tempdir().unwrap();
    fs::write(
        tmp.path().join("main.ts"),
        "import \"lodash\";\n// [site](https://example.com)\n",
    )
    .unwrap();

    let files = snapshot(tmp.path());
    assert!(check_references(&files, tmp.path()).is_empty());
}
