//! File-backed key-value store for the cart.
//!
//! The file holds a single JSON object mapping keys to string values. Writes
//! go to a sibling temp file first and are renamed into place, so a crash
//! mid-write leaves the previous contents intact.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use gameverse_core::{KeyValueStore, StorageError};

#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the whole map. A missing file is an empty map.
    fn read_map(&self) -> Result<BTreeMap<String, String>, StorageError> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => return Err(backend(&self.path, &e)),
        };
        serde_json::from_str(&raw).map_err(|e| backend(&self.path, &e))
    }

    fn write_map(&self, map: &BTreeMap<String, String>) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| backend(parent, &e))?;
        }

        let json = serde_json::to_string_pretty(map)
            .map_err(|e| StorageError::Encode(e.to_string()))?;
        let tmp = self.path.with_extension("tmp");
        std::fs::write(&tmp, json).map_err(|e| backend(&tmp, &e))?;
        std::fs::rename(&tmp, &self.path).map_err(|e| backend(&self.path, &e))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.read_map()?.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        // An unreadable file is replaced rather than blocking every write.
        let mut map = self.read_map().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Overwriting unreadable store file");
            BTreeMap::new()
        });
        map.insert(key.to_string(), value.to_string());
        self.write_map(&map)
    }
}

fn backend(path: &Path, err: &dyn std::fmt::Display) -> StorageError {
    StorageError::Backend(format!("{}: {err}", path.display()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use gameverse_core::{CartManager, Catalog, ItemId};

    use super::*;

    #[test]
    fn test_missing_file_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("cart.json"));
        assert_eq!(store.get("anything").unwrap(), None);
    }

    #[test]
    fn test_set_then_get() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(dir.path().join("nested").join("cart.json"));

        store.set("a", "1").unwrap();
        store.set("b", "2").unwrap();
        store.set("a", "3").unwrap();

        assert_eq!(store.get("a").unwrap().as_deref(), Some("3"));
        assert_eq!(store.get("b").unwrap().as_deref(), Some("2"));
        assert!(!store.path().with_extension("tmp").exists());
    }

    #[test]
    fn test_garbage_file_is_backend_error_and_gets_replaced() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cart.json");
        std::fs::write(&path, "not json at all").unwrap();
        let mut store = FileStore::new(&path);

        assert!(matches!(store.get("k"), Err(StorageError::Backend(_))));

        store.set("k", "v").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v"));
    }

    #[test]
    fn test_cart_survives_restart() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cart.json");
        let catalog = Catalog::builtin().unwrap();

        {
            let mut cart = CartManager::load(FileStore::new(&path));
            cart.add_item(&catalog, ItemId::new(3)).unwrap();
            cart.add_item(&catalog, ItemId::new(3)).unwrap();
            cart.add_item(&catalog, ItemId::new(8)).unwrap();
        }

        let cart = CartManager::load(FileStore::new(&path));
        assert_eq!(cart.line_count(), 2);
        assert_eq!(cart.total_item_count(), 3);
        assert_eq!(cart.lines().first().unwrap().id, ItemId::new(3));
    }

    #[test]
    fn test_corrupt_cart_entry_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cart.json");
        std::fs::write(&path, r#"{"gameversecart": "[{\"id\": \"oops\"}]"}"#).unwrap();

        let cart = CartManager::load(FileStore::new(&path));
        assert!(cart.is_empty());
    }
}
