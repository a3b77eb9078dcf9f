use std::{cell::RefCell, collections::BTreeMap, rc::Rc};

use super::{KeyValueStore, StoreError};

/// Store kept in memory. Clones share the same entries.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: Rc<RefCell<BTreeMap<String, String>>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }

    async fn get_all_keys(&self) -> Result<Vec<String>, StoreError> {
        Ok(self.entries.borrow().keys().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_memory_store() {
        let store = MemoryStore::new();

        assert!(store.is_empty());
        assert_eq!(block_on(store.get("a")).unwrap(), None);

        block_on(store.set("a", "1")).unwrap();
        block_on(store.set("b", "2")).unwrap();
        block_on(store.set("a", "3")).unwrap();

        assert_eq!(store.len(), 2);
        assert_eq!(block_on(store.get("a")).unwrap(), Some(String::from("3")));
        assert_eq!(
            block_on(store.get_all_keys()).unwrap(),
            vec![String::from("a"), String::from("b")]
        );

        block_on(store.remove("a")).unwrap();
        block_on(store.remove("a")).unwrap();

        assert_eq!(block_on(store.get("a")).unwrap(), None);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_memory_store_multi_get() {
        let store = MemoryStore::new();
        block_on(store.set("a", "1")).unwrap();

        assert_eq!(
            block_on(store.multi_get(&[String::from("a"), String::from("b")])).unwrap(),
            vec![
                (String::from("a"), Some(String::from("1"))),
                (String::from("b"), None)
            ]
        );
    }

    #[test]
    fn test_memory_store_shared_between_clones() {
        let store = MemoryStore::new();
        let clone = store.clone();

        block_on(clone.set("a", "1")).unwrap();

        assert_eq!(block_on(store.get("a")).unwrap(), Some(String::from("1")));
    }
}
