//! Durable file-backed storage.
//!
//! One JSON file per key under a root directory. This is the durable
//! scope: it survives restarts and is never cleared by the application,
//! only overwritten key by key.

use async_trait::async_trait;
use staffdeck_core::storage::KeyValueStore;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::warn;

/// Durable key/value store writing `<root>/<key>.json`.
///
/// Upholds the storage degradation contract: unreadable files read as
/// absent, failed writes are logged and swallowed. The in-memory
/// collection stays authoritative either way.
#[derive(Clone)]
pub struct JsonFileStore {
    root: PathBuf,
}

impl JsonFileStore {
    /// Creates a store rooted at an explicit directory.
    ///
    /// The directory is created lazily on first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Creates a store under the platform data directory
    /// (`<data_dir>/staffdeck`), falling back to the current directory
    /// when no data directory is available.
    pub fn new_default() -> Self {
        let root = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("staffdeck");
        Self::new(root)
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.json"))
    }

    /// The root directory this store writes under.
    pub fn root(&self) -> &Path {
        &self.root
    }
}

#[async_trait]
impl KeyValueStore for JsonFileStore {
    async fn read(&self, key: &str) -> Option<String> {
        let path = self.path_for(key);
        match fs::read_to_string(&path).await {
            Ok(content) => Some(content),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => None,
            Err(err) => {
                warn!(key, path = %path.display(), %err, "failed to read stored value");
                None
            }
        }
    }

    async fn write(&self, key: &str, value: &str) {
        if let Err(err) = fs::create_dir_all(&self.root).await {
            warn!(root = %self.root.display(), %err, "failed to create storage directory");
            return;
        }
        let path = self.path_for(key);
        if let Err(err) = fs::write(&path, value).await {
            warn!(key, path = %path.display(), %err, "failed to persist value");
        }
    }

    async fn clear(&self) {
        let mut entries = match fs::read_dir(&self.root).await {
            Ok(entries) => entries,
            Err(_) => return,
        };
        while let Ok(Some(entry)) = entries.next_entry().await {
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "json")
                && let Err(err) = fs::remove_file(&path).await
            {
                warn!(path = %path.display(), %err, "failed to remove stored value");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use staffdeck_core::storage::{KEY_EMPLOYEES, read_json, write_json};
    use tempfile::TempDir;

    fn store() -> (TempDir, JsonFileStore) {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path());
        (dir, store)
    }

    #[tokio::test]
    async fn test_read_missing_key_is_absent() {
        let (_dir, store) = store();
        assert_eq!(store.read(KEY_EMPLOYEES).await, None);
    }

    #[tokio::test]
    async fn test_write_then_read_round_trip() {
        let (_dir, store) = store();
        store.write(KEY_EMPLOYEES, "[]").await;
        assert_eq!(store.read(KEY_EMPLOYEES).await, Some("[]".to_string()));
    }

    #[tokio::test]
    async fn test_write_creates_root_directory() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path().join("nested/deep"));
        store.write("k", "v").await;
        assert_eq!(store.read("k").await, Some("v".to_string()));
    }

    #[tokio::test]
    async fn test_corrupt_payload_degrades_to_absent() {
        let (_dir, store) = store();
        store.write(KEY_EMPLOYEES, "{definitely not json").await;
        let parsed: Option<Vec<i32>> = read_json(&store, KEY_EMPLOYEES).await;
        assert!(parsed.is_none());
    }

    #[tokio::test]
    async fn test_write_failure_is_swallowed() {
        // Root path collides with an existing file, so create_dir_all fails.
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "x").unwrap();
        let store = JsonFileStore::new(&blocker);
        store.write("k", "v").await; // must not panic
        assert_eq!(store.read("k").await, None);
    }

    #[tokio::test]
    async fn test_clear_removes_json_files() {
        let (_dir, store) = store();
        store.write("a", "1").await;
        store.write("b", "2").await;
        store.clear().await;
        assert_eq!(store.read("a").await, None);
        assert_eq!(store.read("b").await, None);
    }

    #[tokio::test]
    async fn test_typed_round_trip_survives_reopen() {
        let dir = TempDir::new().unwrap();
        {
            let store = JsonFileStore::new(dir.path());
            write_json(&store, KEY_EMPLOYEES, &vec!["alice", "bob"])
                .await
                .unwrap();
        }
        let reopened = JsonFileStore::new(dir.path());
        let names: Option<Vec<String>> = read_json(&reopened, KEY_EMPLOYEES).await;
        assert_eq!(names, Some(vec!["alice".to_string(), "bob".to_string()]));
    }
}
