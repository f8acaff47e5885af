#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! File-backed implementation of the best-score persistence port.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::Context;
use twenty48_system_scoring::BestScoreStore;

/// Best-score store that keeps the record as a decimal number in a flat file.
///
/// A missing file reads as zero, so the first session on a fresh machine
/// starts without an error. Anything else that goes wrong surfaces as an
/// error for the caller to interpret.
#[derive(Clone, Debug)]
pub struct FileBestScoreStore {
    path: PathBuf,
}

impl FileBestScoreStore {
    /// Creates a store persisting to the provided path.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path the record is persisted at.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl BestScoreStore for FileBestScoreStore {
    fn load(&self) -> anyhow::Result<u32> {
        if !self.path.exists() {
            return Ok(0);
        }
        let contents = fs::read_to_string(&self.path)
            .with_context(|| format!("failed to read best score from {}", self.path.display()))?;
        contents
            .trim()
            .parse()
            .with_context(|| format!("malformed best score in {}", self.path.display()))
    }

    fn save(&mut self, best: u32) -> anyhow::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).with_context(|| {
                    format!("failed to create best score directory {}", parent.display())
                })?;
            }
        }
        fs::write(&self.path, best.to_string())
            .with_context(|| format!("failed to write best score to {}", self.path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn scratch_path(name: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system clock before epoch")
            .as_nanos();
        std::env::temp_dir().join(format!("twenty48-{name}-{nanos}"))
    }

    #[test]
    fn missing_file_reads_as_zero() {
        let store = FileBestScoreStore::new(scratch_path("missing"));
        assert_eq!(store.load().expect("load should succeed"), 0);
    }

    #[test]
    fn saved_record_survives_a_reload() {
        let path = scratch_path("roundtrip");
        let mut store = FileBestScoreStore::new(&path);
        store.save(4_096).expect("save should succeed");

        let reloaded = FileBestScoreStore::new(&path);
        assert_eq!(reloaded.load().expect("load should succeed"), 4_096);

        fs::remove_file(&path).expect("cleanup should succeed");
    }

    #[test]
    fn save_creates_missing_parent_directories() {
        let path = scratch_path("nested").join("scores").join("best");
        let mut store = FileBestScoreStore::new(&path);
        store.save(16).expect("save should succeed");
        assert_eq!(store.load().expect("load should succeed"), 16);

        fs::remove_file(&path).expect("cleanup should succeed");
    }

    #[test]
    fn malformed_contents_surface_an_error() {
        let path = scratch_path("garbage");
        fs::write(&path, "not a number").expect("setup write should succeed");

        let store = FileBestScoreStore::new(&path);
        assert!(store.load().is_err());

        fs::remove_file(&path).expect("cleanup should succeed");
    }

    #[test]
    fn trailing_whitespace_is_tolerated() {
        let path = scratch_path("whitespace");
        fs::write(&path, "128\n").expect("setup write should succeed");

        let store = FileBestScoreStore::new(&path);
        assert_eq!(store.load().expect("load should succeed"), 128);

        fs::remove_file(&path).expect("cleanup should succeed");
    }
}
