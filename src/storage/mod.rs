//! File-backed key-value storage for terminal state.
//!
//! Goal: keep command history, the toaster visit counter, and the optional
//! profile across program restarts without pulling in a database. Each key
//! is one file under a single state directory (default `~/.folio-term`),
//! written atomically (temp file + rename).
//!
//! Storage is best-effort everywhere: callers catch and log failures, then
//! carry on with in-memory state. A missing HOME, a read-only disk, or a
//! corrupt payload must never take the UI down.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context as _;

/// Key for the persisted command history (JSON array of strings).
pub const HISTORY_KEY: &str = "terminal-history";

/// Key for the toaster visit counter (decimal integer string).
pub const TOASTER_VISITS_KEY: &str = "toaster-visits";

/// Key for the optional portfolio profile (JSON object).
pub const PROFILE_KEY: &str = "profile";

#[derive(Debug, Clone)]
pub struct Storage {
    dir: PathBuf,
}

impl Storage {
    /// Storage rooted at `~/.folio-term`, falling back to the current
    /// directory when HOME is unset.
    pub fn open_default() -> Self {
        let home = std::env::var_os("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));
        Self {
            dir: home.join(".folio-term"),
        }
    }

    pub fn with_dir(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.dir.join(key)
    }

    /// Read the raw value stored under `key`.
    ///
    /// Returns `Ok(None)` when the key has never been written.
    pub fn read(&self, key: &str) -> anyhow::Result<Option<String>> {
        let path = self.key_path(key);
        if !path.exists() {
            return Ok(None);
        }
        let raw = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Ok(Some(raw))
    }

    /// Atomically replace the value stored under `key`.
    pub fn write(&self, key: &str, value: &str) -> anyhow::Result<()> {
        fs::create_dir_all(&self.dir).with_context(|| {
            format!("Failed to create storage directory: {}", self.dir.display())
        })?;
        let path = self.key_path(key);
        let tmp = path.with_extension("tmp");
        fs::write(&tmp, value)
            .with_context(|| format!("Failed to write temp file: {}", tmp.display()))?;
        fs::rename(&tmp, &path).with_context(|| {
            format!("Failed to replace {} with {}", path.display(), tmp.display())
        })?;
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::Storage;
    use std::sync::atomic::{AtomicU32, Ordering};

    static NEXT_ID: AtomicU32 = AtomicU32::new(0);

    /// A storage instance rooted in a unique temp subdirectory.
    pub(crate) fn temp_storage(label: &str) -> Storage {
        let id = NEXT_ID.fetch_add(1, Ordering::Relaxed);
        let dir = std::env::temp_dir().join(format!(
            "folio-term-test-{}-{}-{}",
            label,
            std::process::id(),
            id
        ));
        Storage::with_dir(dir)
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::temp_storage;

    #[test]
    fn missing_key_reads_as_none() {
        let storage = temp_storage("missing");
        assert!(matches!(storage.read("nope"), Ok(None)));
    }

    #[test]
    fn write_then_read_round_trips() {
        let storage = temp_storage("roundtrip");
        storage.write("greeting", "hello").ok();
        assert_eq!(storage.read("greeting").ok().flatten().as_deref(), Some("hello"));
    }

    #[test]
    fn write_overwrites_previous_value() {
        let storage = temp_storage("overwrite");
        storage.write("counter", "1").ok();
        storage.write("counter", "2").ok();
        assert_eq!(storage.read("counter").ok().flatten().as_deref(), Some("2"));
    }
}
