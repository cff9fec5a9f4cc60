//! Story persistence
//!
//! Stories live in a single named list, newest first. The list itself is
//! behind the [`ListStore`] trait so the backend can be SQLite in
//! production and an in-process map in tests.
//!
//! Reads tolerate corruption: each entry is decoded on its own and entries
//! that fail to decode are dropped and counted in [`StoryReadout`].

use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, warn};

use crate::config::{StorageBackend, StorageConfig};
use crate::models::StoryRecord;

mod memory;
mod sqlite;

pub use memory::MemoryListStore;
pub use sqlite::SqliteListStore;

/// Collection holding every submitted story
pub const STORIES_COLLECTION: &str = "student_stories";

/// Failures of the underlying list store
#[derive(Error, Debug)]
pub enum StoreError {
    /// Database unreachable or write rejected
    #[error("Store unavailable: {0}")]
    Unavailable(#[from] sqlx::Error),

    /// Backend refused the operation for a non-database reason
    #[error("Store rejected operation: {0}")]
    Rejected(String),

    /// Record could not be encoded for storage
    #[error("Encode error: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Inclusive index range over a list, 0 being the newest entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListRange {
    pub start: usize,
    /// Last index to include; `None` reads to the end of the list
    pub stop: Option<usize>,
}

impl ListRange {
    pub const ALL: ListRange = ListRange { start: 0, stop: None };

    pub fn new(start: usize, stop: Option<usize>) -> Self {
        Self { start, stop }
    }

    /// Number of entries covered, `None` when unbounded
    pub fn len(&self) -> Option<usize> {
        self.stop.map(|stop| (stop + 1).saturating_sub(self.start))
    }

    pub fn is_empty(&self) -> bool {
        self.len() == Some(0)
    }
}

/// Push-to-head list storage keyed by collection name
#[async_trait]
pub trait ListStore: Send + Sync {
    /// Short backend identifier for logs
    fn backend_name(&self) -> &'static str;

    /// Insert an entry at the head of the collection
    ///
    /// The entry must not be visible to readers until this returns `Ok`.
    async fn push_front(&self, collection: &str, entry: String) -> Result<(), StoreError>;

    /// Read raw entries in `range`, newest first
    async fn range(&self, collection: &str, range: ListRange) -> Result<Vec<String>, StoreError>;
}

/// Open the list store selected by configuration
pub async fn open_list_store(config: &StorageConfig) -> crate::Result<Arc<dyn ListStore>> {
    let store: Arc<dyn ListStore> = match config.backend {
        StorageBackend::Sqlite => Arc::new(SqliteListStore::open(&config.database_path()).await?),
        StorageBackend::Memory => {
            warn!("Using in-memory story store; submissions are lost on restart");
            Arc::new(MemoryListStore::new())
        }
    };
    Ok(store)
}

/// Result of a full read of the story list
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StoryReadout {
    /// Records that decoded successfully, newest first
    pub stories: Vec<StoryRecord>,
    /// Entries dropped because they failed to decode
    pub skipped: usize,
}

/// Story list on top of a [`ListStore`]
#[derive(Clone)]
pub struct StoryStore {
    list: Arc<dyn ListStore>,
    collection: String,
}

impl StoryStore {
    /// Store over the standard `student_stories` collection
    pub fn new(list: Arc<dyn ListStore>) -> Self {
        Self::with_collection(list, STORIES_COLLECTION)
    }

    pub fn with_collection(list: Arc<dyn ListStore>, collection: impl Into<String>) -> Self {
        Self {
            list,
            collection: collection.into(),
        }
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    pub fn backend_name(&self) -> &'static str {
        self.list.backend_name()
    }

    /// Append a record to the head of the list
    pub async fn append(&self, record: &StoryRecord) -> Result<(), StoreError> {
        let entry = serde_json::to_string(record)?;
        self.list.push_front(&self.collection, entry).await
    }

    /// Read every record, skipping entries that fail to decode
    pub async fn read_all(&self) -> Result<StoryReadout, StoreError> {
        let entries = self.list.range(&self.collection, ListRange::ALL).await?;
        Ok(decode_entries(&self.collection, entries))
    }

    /// Every submitted story, or an empty list if the store cannot be read
    ///
    /// Presentation-facing read path: a storage fault is logged, never
    /// surfaced to the page.
    pub async fn all_submitted_stories(&self) -> Vec<StoryRecord> {
        match self.read_all().await {
            Ok(readout) => readout.stories,
            Err(e) => {
                error!("Error fetching submitted stories from '{}': {}", self.collection, e);
                Vec::new()
            }
        }
    }
}

fn decode_entries(collection: &str, entries: Vec<String>) -> StoryReadout {
    let mut readout = StoryReadout::default();

    for (index, entry) in entries.iter().enumerate() {
        match serde_json::from_str::<StoryRecord>(entry) {
            Ok(record) => readout.stories.push(record),
            Err(e) => {
                warn!("Skipping unreadable entry {} in '{}': {}", index, collection, e);
                readout.skipped += 1;
            }
        }
    }

    readout
}
