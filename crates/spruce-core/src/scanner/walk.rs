use crate::config::ALLOWED_DOT_ENTRY;
use crate::scanner::FileEntry;
use chrono::{DateTime, Utc};
use std::path::Path;
use std::time::UNIX_EPOCH;
use tracing::debug;
use walkdir::WalkDir;

/// Recursive snapshot of every file and directory under `root`.
///
/// Entries whose name is in `ignore` are skipped along with everything
/// below them, as is every dot-prefixed entry other than `.github`.
/// Unreadable directories degrade to an empty listing instead of aborting
/// the walk. Entries are visited in file-name order so two walks of an
/// unchanged tree produce identical snapshots.
pub fn walk_directory(root: &Path, ignore: &[String]) -> Vec<FileEntry> {
    let mut entries = Vec::new();

    let walker = WalkDir::new(root)
        .min_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| {
            // never filter the root itself, only what hangs off it
            entry.depth() == 0 || !is_ignored(&entry.file_name().to_string_lossy(), ignore)
        });

    for item in walker {
        let item = match item {
            Ok(item) => item,
            Err(err) => {
                debug!("Skipping unreadable entry: {}", err);
                continue;
            }
        };

        let metadata = match item.metadata() {
            Ok(metadata) => metadata,
            Err(err) => {
                debug!("Skipping {}: {}", item.path().display(), err);
                continue;
            }
        };

        let rel_path = match item.path().strip_prefix(root) {
            Ok(rel) => rel.to_path_buf(),
            Err(_) => continue,
        };

        let modified_at = metadata
            .modified()
            .map(DateTime::<Utc>::from)
            .unwrap_or_else(|_| DateTime::<Utc>::from(UNIX_EPOCH));

        entries.push(FileEntry {
            path: item.path().to_path_buf(),
            rel_path,
            size: metadata.len(),
            modified_at,
            is_directory: metadata.is_dir(),
        });
    }

    entries
}

fn is_ignored(name: &str, ignore: &[String]) -> bool {
    if ignore.iter().any(|ignored| ignored == name) {
        return true;
    }
    name.starts_with('.') && name != ALLOWED_DOT_ENTRY
}
