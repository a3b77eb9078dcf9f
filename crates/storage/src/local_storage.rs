use gloo_storage::Storage as GlooStorage;

use super::{BlockingKeyValueStore, KeyValueStore, StoreError};

/// Browser local storage. Values are stored as given, without another layer of JSON encoding.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalStorage;

impl BlockingKeyValueStore for LocalStorage {
    fn get_blocking(&self, key: &str) -> Result<Option<String>, StoreError> {
        gloo_storage::LocalStorage::raw()
            .get_item(key)
            .map_err(|err| StoreError::Unavailable(format!("{err:?}")))
    }

    fn set_blocking(&self, key: &str, value: &str) -> Result<(), StoreError> {
        gloo_storage::LocalStorage::raw()
            .set_item(key, value)
            .map_err(|err| StoreError::Unavailable(format!("{err:?}")))
    }
}

impl KeyValueStore for LocalStorage {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.get_blocking(key)
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.set_blocking(key, value)
    }

    async fn remove(&self, key: &str) -> Result<(), StoreError> {
        gloo_storage::LocalStorage::raw()
            .remove_item(key)
            .map_err(|err| StoreError::Unavailable(format!("{err:?}")))
    }

    async fn get_all_keys(&self) -> Result<Vec<String>, StoreError> {
        let storage = gloo_storage::LocalStorage::raw();
        let mut keys = vec![];
        for index in 0..gloo_storage::LocalStorage::length() {
            if let Some(key) = storage
                .key(index)
                .map_err(|err| StoreError::Unavailable(format!("{err:?}")))?
            {
                keys.push(key);
            }
        }
        Ok(keys)
    }
}
