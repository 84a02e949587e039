use std::collections::HashMap;

use async_trait::async_trait;
use once_cell::sync::Lazy;
use redis::AsyncCommands;
use redis::aio::ConnectionManager;
use tracing::{debug, error};

use super::{Record, RecordField, RecordStore};
use crate::config::AppConfig;
use crate::errors::{Result, SnipError};

/// Conditional insert: refuses to touch an existing record, otherwise
/// writes both fields in one server-side step.
static PUT_IF_ABSENT: Lazy<redis::Script> = Lazy::new(|| {
    redis::Script::new(
        r#"
        if redis.call('EXISTS', KEYS[1]) == 1 then
            return 0
        end
        redis.call('HSET', KEYS[1], 'long_url', ARGV[1], 'hit_count', ARGV[2])
        return 1
        "#,
    )
});

/// Existence-checked HINCRBY. Returns -1 when the record is missing, so the
/// increment never creates a key on its own (HINCRBY alone would).
static INCREMENT_FIELD: Lazy<redis::Script> = Lazy::new(|| {
    redis::Script::new(
        r#"
        if redis.call('EXISTS', KEYS[1]) == 0 then
            return -1
        end
        return redis.call('HINCRBY', KEYS[1], ARGV[1], ARGV[2])
        "#,
    )
});

/// Redis-backed record store. Each record is a hash (`long_url`,
/// `hit_count`) under `{key_prefix}{id}`; both mutating operations run as a
/// single Lua script so the conditional semantics hold under concurrency.
pub struct RedisStore {
    connection: ConnectionManager,
    key_prefix: String,
}

impl RedisStore {
    pub async fn connect(config: &AppConfig) -> Result<Self> {
        let client = redis::Client::open(config.redis_url.as_str())
            .map_err(|e| SnipError::store_unavailable(format!("invalid Redis URL: {e}")))?;

        let mut connection = client.get_connection_manager().await.map_err(|e| {
            error!("Failed to connect to Redis at {}: {}", config.redis_url, e);
            SnipError::store_unavailable(format!("Redis connection failed: {e}"))
        })?;

        let pong: String = redis::cmd("PING").query_async(&mut connection).await?;
        debug!("Redis connection established (PING -> {})", pong);

        Ok(Self {
            connection,
            key_prefix: config.key_prefix.clone(),
        })
    }

    fn make_key(&self, id: &str) -> String {
        format!("{}{}", self.key_prefix, id)
    }

    fn parse_record(id: &str, fields: HashMap<String, String>) -> Result<Record> {
        let long_url = fields
            .get("long_url")
            .cloned()
            .ok_or_else(|| SnipError::store_unavailable(format!("record '{id}' has no long_url")))?;
        let hit_count = fields
            .get("hit_count")
            .and_then(|v| v.parse().ok())
            .unwrap_or(0);

        Ok(Record {
            id: id.to_string(),
            long_url,
            hit_count,
        })
    }
}

#[async_trait]
impl RecordStore for RedisStore {
    async fn get(&self, id: &str) -> Result<Option<Record>> {
        let mut conn = self.connection.clone();
        let fields: HashMap<String, String> = conn.hgetall(self.make_key(id)).await?;

        if fields.is_empty() {
            return Ok(None);
        }
        Self::parse_record(id, fields).map(Some)
    }

    async fn put_if_absent(&self, record: Record) -> Result<()> {
        let mut conn = self.connection.clone();
        let created: i64 = PUT_IF_ABSENT
            .key(self.make_key(&record.id))
            .arg(&record.long_url)
            .arg(record.hit_count)
            .invoke_async(&mut conn)
            .await?;

        if created == 0 {
            return Err(SnipError::identifier_collision(format!(
                "record already exists for id '{}'",
                record.id
            )));
        }
        Ok(())
    }

    async fn increment_field(&self, id: &str, field: RecordField, delta: u64) -> Result<u64> {
        let mut conn = self.connection.clone();
        let new_value: i64 = INCREMENT_FIELD
            .key(self.make_key(id))
            .arg(field.as_str())
            .arg(delta)
            .invoke_async(&mut conn)
            .await?;

        if new_value < 0 {
            return Err(SnipError::not_found(format!(
                "no record found for id '{id}'"
            )));
        }
        Ok(new_value as u64)
    }

    fn backend_name(&self) -> &'static str {
        "redis"
    }
}
