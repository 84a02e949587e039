use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

use super::{Record, RecordField, RecordStore};
use crate::errors::{Result, SnipError};

/// In-memory backend over a `DashMap`. The entry API gives the conditional
/// insert, and increments run while holding the shard lock, so both
/// operations are atomic with respect to concurrent callers.
///
/// Used by tests and local runs; state lives only as long as the process.
#[derive(Default)]
pub struct MemoryStore {
    records: DashMap<String, Record>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records. Test-facing; the service itself never
    /// enumerates the store.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn get(&self, id: &str) -> Result<Option<Record>> {
        Ok(self.records.get(id).map(|r| r.clone()))
    }

    async fn put_if_absent(&self, record: Record) -> Result<()> {
        match self.records.entry(record.id.clone()) {
            Entry::Occupied(_) => Err(SnipError::identifier_collision(format!(
                "record already exists for id '{}'",
                record.id
            ))),
            Entry::Vacant(slot) => {
                slot.insert(record);
                Ok(())
            }
        }
    }

    async fn increment_field(&self, id: &str, field: RecordField, delta: u64) -> Result<u64> {
        match self.records.get_mut(id) {
            Some(mut record) => match field {
                RecordField::HitCount => {
                    record.hit_count += delta;
                    Ok(record.hit_count)
                }
            },
            None => Err(SnipError::not_found(format!(
                "no record found for id '{id}'"
            ))),
        }
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
