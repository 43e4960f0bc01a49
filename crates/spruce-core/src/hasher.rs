use std::fs::File;
use std::hash::Hasher as _;
use std::io::{self, Read};
use std::path::Path;
use twox_hash::XxHash64;

/// First 8 hex chars of the XxHash64 digest of `input`.
///
/// Issue and pattern ids embed this digest so that identical detection
/// inputs reproduce the same id on every scan. Decision tracking across
/// scans depends on that stability, so the input string format for each
/// id is documented at its construction site and must not drift.
pub fn short_hash(input: &str) -> String {
    let mut hasher = XxHash64::with_seed(0);
    hasher.write(input.as_bytes());
    format!("{:016x}", hasher.finish())[..8].to_string()
}

/// BLAKE3 hex digest of a file's full content, read in 64KB chunks.
pub fn hash_file_content(path: &Path) -> io::Result<String> {
    let mut file = File::open(path)?;
    let mut hasher = blake3::Hasher::new();
    let mut buffer = [0u8; 65536];
    loop {
        let bytes_read = file.read(&mut buffer)?;
        if bytes_read == 0 {
            break;
        }
        hasher.update(&buffer[..bytes_read]);
    }
    Ok(hasher.finalize().to_hex().to_string())
}

/// BLAKE3 hex digest of an in-memory byte string.
pub fn hash_data(data: &[u8]) -> String {
    blake3::hash(data).to_hex().to_string()
}
