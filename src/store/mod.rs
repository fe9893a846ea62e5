// 🗄️ Record Store - the key-value contract the directory reads through
//
// Keys are SWIFT codes, values are flat `BankRecord`s. There is no native
// prefix query: relationship lookups go through `scan(pattern)`, so a backend
// with a real secondary index can replace the pattern scan without touching
// the resolver or the aggregator.

pub mod memory;
pub mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use crate::pattern::KeyPattern;
use crate::record::BankRecord;
use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Point lookup. Must be safe to call concurrently.
    async fn get(&self, swift_code: &str) -> Result<Option<BankRecord>>;

    /// Keys matching a fixed-length wildcard pattern
    async fn scan(&self, pattern: &KeyPattern) -> Result<Vec<String>>;

    /// Insert or overwrite the record stored under its SWIFT code
    async fn put(&self, record: &BankRecord) -> Result<()>;

    /// Returns the number of records removed (0 or 1)
    async fn delete(&self, swift_code: &str) -> Result<u64>;

    /// Returns the number of records stored under the key (0 or 1)
    async fn exists(&self, swift_code: &str) -> Result<u64>;

    /// Backend liveness
    async fn ping(&self) -> Result<()>;
}

/// Shared handle used by the directory and its fetch tasks
pub type SharedStore = Arc<dyn RecordStore>;
