//! In-process list store
//!
//! Used by tests and by `storage.backend = "memory"` deployments where
//! losing stories on restart is acceptable.

use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;

use super::{ListRange, ListStore, StoreError};

#[derive(Debug, Default)]
pub struct MemoryListStore {
    lists: RwLock<HashMap<String, VecDeque<String>>>,
    unavailable: AtomicBool,
}

impl MemoryListStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent operation fail as if the backend were down
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Number of entries in a collection
    pub async fn len(&self, collection: &str) -> usize {
        self.lists
            .read()
            .await
            .get(collection)
            .map(VecDeque::len)
            .unwrap_or(0)
    }

    pub async fn is_empty(&self, collection: &str) -> bool {
        self.len(collection).await == 0
    }

    fn check_available(&self) -> Result<(), StoreError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StoreError::Rejected("memory store marked unavailable".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl ListStore for MemoryListStore {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn push_front(&self, collection: &str, entry: String) -> Result<(), StoreError> {
        self.check_available()?;
        self.lists
            .write()
            .await
            .entry(collection.to_string())
            .or_default()
            .push_front(entry);
        Ok(())
    }

    async fn range(&self, collection: &str, range: ListRange) -> Result<Vec<String>, StoreError> {
        self.check_available()?;
        let lists = self.lists.read().await;
        let Some(list) = lists.get(collection) else {
            return Ok(Vec::new());
        };

        let take = range.len().unwrap_or(usize::MAX);
        Ok(list.iter().skip(range.start).take(take).cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_push_front_orders_newest_first() {
        let store = MemoryListStore::new();
        store.push_front("list", "first".to_string()).await.unwrap();
        store.push_front("list", "second".to_string()).await.unwrap();
        store.push_front("list", "third".to_string()).await.unwrap();

        let all = store.range("list", ListRange::ALL).await.unwrap();
        assert_eq!(all, vec!["third", "second", "first"]);

        let head = store.range("list", ListRange::new(0, Some(1))).await.unwrap();
        assert_eq!(head, vec!["third", "second"]);

        let tail = store.range("list", ListRange::new(2, None)).await.unwrap();
        assert_eq!(tail, vec!["first"]);
    }

    #[tokio::test]
    async fn test_collections_are_independent() {
        let store = MemoryListStore::new();
        store.push_front("a", "one".to_string()).await.unwrap();

        assert_eq!(store.len("a").await, 1);
        assert!(store.is_empty("b").await);
        assert!(store.range("b", ListRange::ALL).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unavailable_rejects_operations() {
        let store = MemoryListStore::new();
        store.set_unavailable(true);

        assert!(store.push_front("list", "x".to_string()).await.is_err());
        assert!(store.range("list", ListRange::ALL).await.is_err());

        store.set_unavailable(false);
        assert!(store.push_front("list", "x".to_string()).await.is_ok());
        assert_eq!(store.len("list").await, 1);
    }
}
