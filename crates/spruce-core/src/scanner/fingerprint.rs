use crate::hasher;
use crate::scanner::FileEntry;

/// Digest over the `(relative path, size, mtime)` triple of every file.
///
/// Triples are serialized as `path:size:epochMillis`, sorted
/// lexicographically, joined with newlines and hashed with BLAKE3.
/// Content is deliberately not read: a content-preserving touch changes
/// the fingerprint, while an in-place edit that keeps size and mtime
/// does not. Directories do not participate.
pub fn compute_fingerprint(files: &[FileEntry]) -> String {
    let mut lines: Vec<String> = files
        .iter()
        .filter(|file| !file.is_directory)
        .map(|file| {
            format!(
                "{}:{}:{}",
                file.rel_path.display(),
                file.size,
                file.modified_at.timestamp_millis()
            )
        })
        .collect();
    lines.sort();
    hasher::hash_data(lines.join("\n").as_bytes())
}
