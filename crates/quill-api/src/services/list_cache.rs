//! Redis-backed note list cache.
//!
//! Holds one serialized entry per owner under `notes:{owner}`. Failures are
//! logged and reported as `Unavailable`/`false`, never surfaced — list reads
//! fall back to the store and mutations proceed regardless.
//!
//! ## Configuration
//!
//! Environment variables:
//! - `REDIS_ENABLED`: Set to "false" to disable caching (default: true)
//! - `REDIS_URL`: Redis connection URL (default: redis://localhost:6379)
//! - `NOTE_CACHE_TTL`: Entry TTL in seconds (default: 1800). Correctness
//!   never depends on expiry — invalidation is explicit on every write.

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::AsyncCommands;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, error, info, warn};

use quill_core::{CacheLookup, ListCache};

/// Note list cache backed by Redis.
#[derive(Clone)]
pub struct RedisListCache {
    inner: Arc<RedisListCacheInner>,
}

struct RedisListCacheInner {
    /// Redis connection manager (None if disabled or unreachable).
    connection: RwLock<Option<ConnectionManager>>,
    /// Entry TTL in seconds.
    ttl_seconds: u64,
    /// Whether caching is enabled.
    enabled: bool,
}

impl RedisListCache {
    /// Create a new list cache from environment configuration.
    ///
    /// Reads:
    /// - `REDIS_ENABLED` (default: true)
    /// - `REDIS_URL` (default: redis://localhost:6379)
    /// - `NOTE_CACHE_TTL` (default: 1800 seconds)
    pub async fn from_env() -> Self {
        let enabled = std::env::var("REDIS_ENABLED")
            .map(|v| v != "false" && v != "0")
            .unwrap_or(true);

        let redis_url =
            std::env::var("REDIS_URL").unwrap_or_else(|_| "redis://localhost:6379".to_string());

        let ttl_seconds: u64 = std::env::var("NOTE_CACHE_TTL")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(1800);

        let connection = if enabled {
            match redis::Client::open(redis_url.as_str()) {
                Ok(client) => match ConnectionManager::new(client).await {
                    Ok(conn) => {
                        info!(
                            subsystem = "cache",
                            component = "list_cache",
                            ttl_seconds,
                            "Redis note list cache enabled"
                        );
                        Some(conn)
                    }
                    Err(e) => {
                        warn!("Failed to connect to Redis, cache disabled: {}", e);
                        None
                    }
                },
                Err(e) => {
                    warn!("Invalid Redis URL, cache disabled: {}", e);
                    None
                }
            }
        } else {
            info!("Redis note list cache disabled via REDIS_ENABLED=false");
            None
        };

        Self {
            inner: Arc::new(RedisListCacheInner {
                connection: RwLock::new(connection),
                ttl_seconds,
                enabled,
            }),
        }
    }

    /// Create a disabled cache (for testing or when Redis is unavailable).
    pub fn disabled() -> Self {
        Self {
            inner: Arc::new(RedisListCacheInner {
                connection: RwLock::new(None),
                ttl_seconds: 1800,
                enabled: false,
            }),
        }
    }

    /// Check if caching is enabled and connected.
    pub async fn is_connected(&self) -> bool {
        self.inner.enabled && self.inner.connection.read().await.is_some()
    }
}

#[async_trait]
impl ListCache for RedisListCache {
    async fn get(&self, key: &str) -> CacheLookup {
        let mut conn_guard = self.inner.connection.write().await;
        let conn = match conn_guard.as_mut() {
            Some(c) => c,
            None => return CacheLookup::Unavailable,
        };

        match conn.get::<_, Option<String>>(key).await {
            Ok(Some(data)) => {
                debug!("Cache HIT: {}", key);
                CacheLookup::Hit(data)
            }
            Ok(None) => {
                debug!("Cache MISS: {}", key);
                CacheLookup::Miss
            }
            Err(e) => {
                error!("Redis GET error: {}", e);
                CacheLookup::Unavailable
            }
        }
    }

    async fn set(&self, key: &str, value: &str) -> bool {
        let mut conn_guard = self.inner.connection.write().await;
        let conn = match conn_guard.as_mut() {
            Some(c) => c,
            None => return false,
        };

        match conn
            .set_ex::<_, _, ()>(key, value, self.inner.ttl_seconds)
            .await
        {
            Ok(_) => {
                debug!("Cache SET: {} (TTL: {}s)", key, self.inner.ttl_seconds);
                true
            }
            Err(e) => {
                error!("Redis SET error: {}", e);
                false
            }
        }
    }

    async fn delete(&self, key: &str) -> bool {
        let mut conn_guard = self.inner.connection.write().await;
        let conn = match conn_guard.as_mut() {
            Some(c) => c,
            None => return false,
        };

        match conn.del::<_, ()>(key).await {
            Ok(_) => {
                debug!("Cache INVALIDATE: {}", key);
                true
            }
            Err(e) => {
                error!("Redis DEL error: {}", e);
                false
            }
        }
    }
}
