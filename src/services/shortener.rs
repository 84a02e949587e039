use std::sync::Arc;

use tracing::{debug, info};

use crate::config::AppConfig;
use crate::errors::{Result, SnipError};
use crate::ids::{IdGenerator, RandomId};
use crate::store::{Record, RecordStore};

/// Upper bound on generate-and-recheck attempts per `shorten` call.
/// A collision is surfaced to the caller only after every attempt landed on
/// a taken identifier.
const MAX_GENERATE_ATTEMPTS: usize = 3;

/// Maps a long URL to a fresh short identifier and persists the record.
///
/// Stateless: every call is an independent unit of work, and uniqueness
/// under concurrent calls is delegated entirely to the store's conditional
/// insert. Losing that race is a normal outcome, answered by regenerating.
pub struct Shortener {
    store: Arc<dyn RecordStore>,
    ids: Arc<dyn IdGenerator>,
    base_url: String,
}

impl Shortener {
    pub fn new(store: Arc<dyn RecordStore>, config: &AppConfig) -> Self {
        Self::with_generator(store, Arc::new(RandomId), config)
    }

    pub fn with_generator(
        store: Arc<dyn RecordStore>,
        ids: Arc<dyn IdGenerator>,
        config: &AppConfig,
    ) -> Self {
        Shortener {
            store,
            ids,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Shortens `long_url`, returning the full short URL.
    ///
    /// Exactly one record is created on success; no store write happens on
    /// any failure path.
    pub async fn shorten(&self, long_url: &str) -> Result<String> {
        if long_url.trim().is_empty() {
            return Err(SnipError::invalid_input("missing or empty 'url' field"));
        }

        let mut last_collision = None;
        for attempt in 1..=MAX_GENERATE_ATTEMPTS {
            let candidate = self.ids.generate();

            // Cheap pre-check; the put_if_absent below is what actually
            // guarantees uniqueness under concurrent shortens.
            if self.store.get(&candidate).await?.is_some() {
                debug!(
                    "Generated id '{}' already taken (attempt {}/{})",
                    candidate, attempt, MAX_GENERATE_ATTEMPTS
                );
                last_collision = Some(SnipError::identifier_collision(format!(
                    "generated id '{candidate}' already exists"
                )));
                continue;
            }

            match self
                .store
                .put_if_absent(Record::new(candidate.clone(), long_url))
                .await
            {
                Ok(()) => {
                    info!("Shortened URL under id '{}'", candidate);
                    return Ok(format!("{}/{}", self.base_url, candidate));
                }
                // Lost the race against a concurrent shorten that picked the
                // same candidate between the get and the insert.
                Err(SnipError::IdentifierCollision(msg)) => {
                    debug!(
                        "Conditional insert lost for id '{}' (attempt {}/{})",
                        candidate, attempt, MAX_GENERATE_ATTEMPTS
                    );
                    last_collision = Some(SnipError::IdentifierCollision(msg));
                }
                Err(e) => return Err(e),
            }
        }

        Err(last_collision
            .unwrap_or_else(|| SnipError::identifier_collision("identifier generation exhausted")))
    }
}
