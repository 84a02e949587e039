use std::sync::Arc;

use tracing::debug;

use crate::errors::{Result, SnipError};
use crate::store::{RecordField, RecordStore};

/// What a successful resolution hands back to the HTTP layer: the redirect
/// target and the hit count after this visit was counted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RedirectOutcome {
    pub long_url: String,
    pub hit_count: u64,
}

/// Resolves a short identifier back to its target URL and counts the visit.
pub struct Redirector {
    store: Arc<dyn RecordStore>,
}

impl Redirector {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Redirector { store }
    }

    /// Looks up `short_id` and increments its hit counter by exactly 1.
    ///
    /// The increment is the store's atomic operation, never a client-side
    /// read-then-write; concurrent redirects to the same id each count.
    pub async fn redirect(&self, short_id: &str) -> Result<RedirectOutcome> {
        if short_id.trim().is_empty() {
            return Err(SnipError::invalid_input("missing short URL identifier"));
        }

        let record = match self.store.get(short_id).await? {
            Some(record) => record,
            None => {
                debug!("Redirect id not found: {}", short_id);
                return Err(SnipError::not_found(format!(
                    "no long URL registered for '{short_id}'"
                )));
            }
        };

        let hit_count = self
            .store
            .increment_field(short_id, RecordField::HitCount, 1)
            .await?;

        Ok(RedirectOutcome {
            long_url: record.long_url,
            hit_count,
        })
    }
}
