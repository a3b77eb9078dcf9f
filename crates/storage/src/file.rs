//! File Store
//!
//! All entries are kept in a single JSON object. Every modification rewrites the whole file by
//! writing a temporary file next to it and renaming it over the original, so a crash never leaves
//! a partially written store behind.

use std::{
    collections::BTreeMap,
    fs::{self, File},
    io::{self, Write},
    path::{Path, PathBuf},
};

use log::{debug, warn};

use super::{BlockingKeyValueStore, KeyValueStore, StoreError};

#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<BTreeMap<String, String>, StoreError> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }

        let content = fs::read_to_string(&self.path)?;

        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        Ok(serde_json::from_str(&content)?)
    }

    fn save(&self, entries: &BTreeMap<String, String>) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let content = serde_json::to_string_pretty(entries)?;

        let tmp_path = self.temp_path()?;
        let result = File::create(&tmp_path).and_then(|mut tmp_file| {
            tmp_file.write_all(content.as_bytes())?;
            tmp_file.sync_all()?;
            drop(tmp_file);
            fs::rename(&tmp_path, &self.path)
        });

        if let Err(err) = result {
            match fs::remove_file(&tmp_path) {
                Err(remove_err) if remove_err.kind() != io::ErrorKind::NotFound => {
                    warn!("failed to remove {}: {remove_err}", tmp_path.display());
                }
                _ => {}
            }
            return Err(err.into());
        }

        debug!("wrote {} entries to {}", entries.len(), self.path.display());

        Ok(())
    }

    fn update<F>(&self, f: F) -> Result<(), StoreError>
    where
        F: FnOnce(&mut BTreeMap<String, String>) -> bool,
    {
        let mut entries = self.load()?;
        if f(&mut entries) {
            self.save(&entries)?;
        }
        Ok(())
    }

    fn temp_path(&self) -> Result<PathBuf, StoreError> {
        let file_name = self.path.file_name().ok_or_else(|| {
            io::Error::new(io::ErrorKind::InvalidInput, "path has no file name")
        })?;
        Ok(self
            .path
            .with_file_name(format!(".{}.tmp", file_name.to_string_lossy())))
    }
}

impl BlockingKeyValueStore for FileStore {
    fn get_blocking(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.load()?.remove(key))
    }

    fn set_blocking(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.update(|entries| {
            entries.insert(key.to_string(), value.to_string());
            true
        })
    }
}

impl KeyValueStore for FileStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.get_blocking(key)
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.set_blocking(key, value)
    }

    async fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.update(|entries| entries.remove(key).is_some())
    }

    async fn get_all_keys(&self) -> Result<Vec<String>, StoreError> {
        Ok(self.load()?.into_keys().collect())
    }

    async fn multi_get(
        &self,
        keys: &[String],
    ) -> Result<Vec<(String, Option<String>)>, StoreError> {
        let entries = self.load()?;
        Ok(keys
            .iter()
            .map(|key| (key.clone(), entries.get(key).cloned()))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    use super::*;

    fn store() -> (TempDir, FileStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("data").join("store.json"));
        (dir, store)
    }

    #[test]
    fn test_file_store_missing_file() {
        let (_dir, store) = store();

        assert_eq!(block_on(store.get("a")).unwrap(), None);
        assert!(block_on(store.get_all_keys()).unwrap().is_empty());
        assert!(!store.path().exists());

        block_on(store.remove("a")).unwrap();

        assert!(!store.path().exists());
    }

    #[test]
    fn test_file_store_persistence() {
        let (_dir, store) = store();

        block_on(store.set("@fav_1", r#"{"id":"1"}"#)).unwrap();
        block_on(store.set("settings", "{}")).unwrap();

        let reopened = FileStore::new(store.path());

        assert_eq!(
            block_on(reopened.get("@fav_1")).unwrap(),
            Some(String::from(r#"{"id":"1"}"#))
        );
        assert_eq!(
            block_on(reopened.get_all_keys()).unwrap(),
            vec![String::from("@fav_1"), String::from("settings")]
        );
        assert_eq!(
            block_on(reopened.multi_get(&[String::from("settings"), String::from("b")])).unwrap(),
            vec![
                (String::from("settings"), Some(String::from("{}"))),
                (String::from("b"), None)
            ]
        );

        block_on(reopened.remove("@fav_1")).unwrap();

        assert_eq!(block_on(store.get("@fav_1")).unwrap(), None);
    }

    #[test]
    fn test_file_store_no_temporary_file_left() {
        let (_dir, store) = store();

        block_on(store.set("a", "1")).unwrap();

        let parent = store.path().parent().unwrap();
        let files = fs::read_dir(parent)
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().to_string())
            .collect::<Vec<_>>();

        assert_eq!(files, vec![String::from("store.json")]);
    }

    #[test]
    fn test_file_store_failed_save_removes_temporary_file() {
        let (_dir, store) = store();
        fs::create_dir_all(store.path().join("occupied")).unwrap();

        let result = store.save(&BTreeMap::from([(String::from("a"), String::from("1"))]));

        assert!(matches!(result, Err(StoreError::Io(_))));
        assert!(!store.temp_path().unwrap().exists());
        assert!(store.path().is_dir());
    }

    #[test]
    fn test_file_store_empty_file() {
        let (_dir, store) = store();
        fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        fs::write(store.path(), "  \n").unwrap();

        assert_eq!(block_on(store.get("a")).unwrap(), None);
    }

    #[test]
    fn test_file_store_corrupt_file() {
        let (_dir, store) = store();
        fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        fs::write(store.path(), "[1, 2").unwrap();

        assert!(matches!(
            block_on(store.get("a")),
            Err(StoreError::Serialization(_))
        ));
        assert!(matches!(
            block_on(store.set("a", "1")),
            Err(StoreError::Serialization(_))
        ));
    }
}
