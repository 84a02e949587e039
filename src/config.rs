use std::env;

/// Runtime configuration, loaded once at startup and passed into the
/// services at construction. Nothing here is read from env again later.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub server_host: String,
    pub server_port: u16,
    /// Prefix used when building shortened links, e.g. `https://snip.example`.
    pub base_url: String,
    /// Record store backend: `memory` or `redis`.
    pub store_backend: String,
    pub redis_url: String,
    /// Key prefix acting as the table identity inside Redis.
    pub key_prefix: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        AppConfig {
            server_host: env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(8080),
            base_url: env::var("BASE_URL").unwrap_or_else(|_| "http://127.0.0.1:8080".to_string()),
            store_backend: env::var("STORE_BACKEND").unwrap_or_else(|_| "memory".to_string()),
            redis_url: env::var("REDIS_URL")
                .unwrap_or_else(|_| "redis://127.0.0.1:6379".to_string()),
            key_prefix: env::var("KEY_PREFIX").unwrap_or_else(|_| "snipurl:".to_string()),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_env()
    }
}
