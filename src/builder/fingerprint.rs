//! Content fingerprints of compiled module output
//!
//! A module's fingerprint covers the relative path, size and modification time
//! of every file below its output directory. Same tree = same fingerprint.

use crate::error::{DevBuildError, DevBuildResult};
use sha2::{Digest, Sha256};
use std::path::Path;
use std::time::UNIX_EPOCH;
use walkdir::WalkDir;

/// Fingerprint a module output directory, `None` if it does not exist
pub fn fingerprint_dir(dir: &Path) -> DevBuildResult<Option<String>> {
    if !dir.is_dir() {
        return Ok(None);
    }

    let mut hasher = Sha256::new();
    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry.map_err(|e| {
            DevBuildError::io(format!("walking {}", dir.display()), e.into())
        })?;
        if !entry.file_type().is_file() {
            continue;
        }

        let metadata = entry.metadata().map_err(|e| {
            DevBuildError::io(
                format!("reading metadata of {}", entry.path().display()),
                e.into(),
            )
        })?;
        let modified = metadata
            .modified()
            .ok()
            .and_then(|t| t.duration_since(UNIX_EPOCH).ok())
            .map(|d| d.as_nanos())
            .unwrap_or_default();

        let relative = entry.path().strip_prefix(dir).unwrap_or(entry.path());
        hasher.update(relative.to_string_lossy().as_bytes());
        hasher.update([0u8]);
        hasher.update(metadata.len().to_le_bytes());
        hasher.update(modified.to_le_bytes());
    }

    // First 16 hex characters (8 bytes)
    let digest = hasher.finalize();
    Ok(Some(hex::encode(&digest[..8])))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn missing_dir_has_no_fingerprint() {
        let temp = TempDir::new().unwrap();
        assert_eq!(fingerprint_dir(&temp.path().join("absent")).unwrap(), None);
    }

    #[test]
    fn fingerprint_deterministic() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("com/example")).unwrap();
        fs::write(temp.path().join("com/example/Main.class"), b"cafebabe").unwrap();

        let first = fingerprint_dir(temp.path()).unwrap().unwrap();
        let second = fingerprint_dir(temp.path()).unwrap().unwrap();
        assert_eq!(first, second);
        assert_eq!(first.len(), 16);
    }

    #[test]
    fn fingerprint_tracks_changes() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("A.class"), b"one").unwrap();
        let before = fingerprint_dir(temp.path()).unwrap();

        fs::write(temp.path().join("B.class"), b"two").unwrap();
        let added = fingerprint_dir(temp.path()).unwrap();
        assert_ne!(before, added);

        fs::write(temp.path().join("B.class"), b"two, longer").unwrap();
        let resized = fingerprint_dir(temp.path()).unwrap();
        assert_ne!(added, resized);
    }

    #[test]
    fn empty_dir_has_fingerprint() {
        let temp = TempDir::new().unwrap();
        assert!(fingerprint_dir(temp.path()).unwrap().is_some());
    }
}
