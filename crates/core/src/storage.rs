//! Key-value blob persistence.

use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::{Context, Result};
use parking_lot::Mutex;

#[cfg(test)]
use std::sync::atomic::{AtomicBool, Ordering};

/// Storage addressed by a fixed key, holding one text blob per key.
///
/// Every write replaces the whole blob; there are no partial updates.
pub trait KeyValueStore {
    /// Read the blob stored under `key`, if any.
    fn get(&self, key: &str) -> Result<Option<String>>;
    /// Replace the blob stored under `key`.
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

/// Store writing each key to `<root>/<key>.json`.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Create a store rooted at the provided directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Directory holding the stored blobs.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the file backing `key`.
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!("{}.json", sanitize_key(key)))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Ok(Some(content))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        fs::create_dir_all(&self.root)
            .with_context(|| format!("failed to create {}", self.root.display()))?;
        let path = self.path_for(key);
        fs::write(&path, value).with_context(|| format!("failed to write {}", path.display()))
    }
}

/// In-process store, shared between clones.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.inner.lock().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.inner.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Memory store whose writes can be switched off, for exercising write failures.
#[cfg(test)]
#[derive(Debug, Clone, Default)]
pub(crate) struct FailingStore {
    inner: MemoryStore,
    fail_writes: Arc<AtomicBool>,
}

#[cfg(test)]
impl FailingStore {
    pub(crate) fn set_failing(&self, failing: bool) {
        self.fail_writes.store(failing, Ordering::SeqCst);
    }
}

#[cfg(test)]
impl KeyValueStore for FailingStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            anyhow::bail!("disk full");
        }
        self.inner.set(key, value)
    }
}

fn sanitize_key(input: &str) -> String {
    let result: String = input
        .chars()
        .filter(|ch| ch.is_ascii_alphanumeric() || matches!(ch, '-' | '_'))
        .collect();
    if result.is_empty() {
        "blob".to_string()
    } else {
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn file_store_round_trip() -> Result<()> {
        let dir = tempdir()?;
        let store = FileStore::new(dir.path().join("data"));
        assert_eq!(store.root(), dir.path().join("data"));

        assert_eq!(store.get("players")?, None);
        store.set("players", "[]")?;
        assert!(store.path_for("players").exists());
        assert_eq!(store.get("players")?.as_deref(), Some("[]"));

        store.set("players", "[1]")?;
        assert_eq!(store.get("players")?.as_deref(), Some("[1]"));
        Ok(())
    }

    #[test]
    fn memory_store_is_shared_between_clones() -> Result<()> {
        let store = MemoryStore::new();
        let other = store.clone();
        store.set("players", "x")?;
        assert_eq!(other.get("players")?.as_deref(), Some("x"));
        Ok(())
    }

    #[test]
    fn failing_store_rejects_writes_until_switched_back() -> Result<()> {
        let store = FailingStore::default();
        store.set_failing(true);
        assert!(store.set("players", "[]").is_err());
        assert_eq!(store.get("players")?, None);

        store.set_failing(false);
        store.set("players", "[]")?;
        assert_eq!(store.get("players")?.as_deref(), Some("[]"));
        Ok(())
    }

    #[test]
    fn sanitize_creates_safe_filenames() {
        assert_eq!(sanitize_key("../play ers!"), "players");
        assert_eq!(sanitize_key("//"), "blob");
    }
}
