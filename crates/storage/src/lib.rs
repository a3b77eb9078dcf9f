#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

use fitdex_domain as domain;

pub mod file;
pub mod key_value;
#[allow(clippy::module_name_repetitions)]
pub mod local_storage;
pub mod memory;
pub mod rest;

/// String-keyed store holding serialized values.
#[allow(async_fn_in_trait)]
pub trait KeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
    async fn remove(&self, key: &str) -> Result<(), StoreError>;
    async fn get_all_keys(&self) -> Result<Vec<String>, StoreError>;

    async fn multi_get(
        &self,
        keys: &[String],
    ) -> Result<Vec<(String, Option<String>)>, StoreError> {
        let mut entries = Vec::with_capacity(keys.len());
        for key in keys {
            entries.push((key.clone(), self.get(key).await?));
        }
        Ok(entries)
    }
}

/// Store whose operations complete without waiting, usable where no executor is at hand.
pub trait BlockingKeyValueStore {
    fn get_blocking(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set_blocking(&self, key: &str, value: &str) -> Result<(), StoreError>;
}

#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
}

impl From<StoreError> for domain::StorageError {
    fn from(value: StoreError) -> Self {
        match value {
            StoreError::Unavailable(_) => domain::StorageError::Unavailable,
            err => domain::StorageError::Other(Box::new(err)),
        }
    }
}

macro_rules! impl_from_store_error {
    ($($error: ident),*) => {
        $(
            impl From<StoreError> for domain::$error {
                fn from(value: StoreError) -> Self {
                    domain::$error::Storage(value.into())
                }
            }
        )*
    };
}

impl_from_store_error!(ReadError, UpdateError, DeleteError);
