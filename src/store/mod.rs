//! Record store abstraction.
//!
//! The service treats persistence as a key-value store with three
//! operations: point lookup, conditional insert, and atomic counter
//! increment. Everything the service guarantees under concurrency
//! (exactly one winner per id, no lost hit counts) is delegated to the
//! backend implementing this trait.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::config::AppConfig;
use crate::errors::Result;

pub mod memory;
pub mod redis;

/// The persisted mapping from a short identifier to its target URL.
///
/// `id` and `long_url` are immutable after creation; `hit_count` only ever
/// moves upward, and only through [`RecordStore::increment_field`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Record {
    pub id: String,
    pub long_url: String,
    pub hit_count: u64,
}

impl Record {
    pub fn new(id: impl Into<String>, long_url: impl Into<String>) -> Self {
        Record {
            id: id.into(),
            long_url: long_url.into(),
            hit_count: 0,
        }
    }
}

/// Numeric fields a backend may increment. Only the hit counter exists
/// today; the enum keeps backends from taking arbitrary field names.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RecordField {
    HitCount,
}

impl RecordField {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordField::HitCount => "hit_count",
        }
    }
}

#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Point lookup by primary key. Never returns a partial record.
    async fn get(&self, id: &str) -> Result<Option<Record>>;

    /// Atomic conditional insert. Fails with `IdentifierCollision` if a
    /// record with the same id already exists; an existing record is never
    /// overwritten.
    async fn put_if_absent(&self, record: Record) -> Result<()>;

    /// Atomic server-side increment of a numeric field, returning the new
    /// value. Fails with `NotFound` if no record exists under `id`. The
    /// read-modify-write happens inside the store, so concurrent callers
    /// never lose updates to each other.
    async fn increment_field(&self, id: &str, field: RecordField, delta: u64) -> Result<u64>;

    fn backend_name(&self) -> &'static str;
}

pub struct StoreFactory;

impl StoreFactory {
    pub async fn create(config: &AppConfig) -> Result<Arc<dyn RecordStore>> {
        let store: Arc<dyn RecordStore> = match config.store_backend.as_str() {
            "redis" => Arc::new(redis::RedisStore::connect(config).await?),
            _ => Arc::new(memory::MemoryStore::new()),
        };

        info!("Using record store backend: {}", store.backend_name());
        Ok(store)
    }
}
