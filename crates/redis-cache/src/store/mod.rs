//! # Store Module
//!
//! The key-value store the facade delegates to. Implementations can be
//! swapped (Redis, in-memory, etc.) without touching the facade.

pub mod memory;
#[cfg(feature = "redis")]
pub mod redis_store;

use async_trait::async_trait;
use std::collections::HashSet;

use crate::error::Result;
use crate::expiry::Expiry;

pub use memory::MemoryStore;
#[cfg(feature = "redis")]
pub use redis_store::RedisStore;

/// Minimal string key-value contract: one call, one round-trip.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Get the value at `key`, `None` if absent or expired
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` at `key`, replacing any existing value and TTL
    async fn set(&self, key: &str, value: String, expiry: Expiry) -> Result<()>;

    /// Get several values; the result is aligned with `keys`
    async fn multi_get(&self, keys: &[String]) -> Result<Vec<Option<String>>>;

    /// All live keys matching a glob-style `pattern`
    async fn keys(&self, pattern: &str) -> Result<HashSet<String>>;

    /// Delete one key, returning whether it existed
    async fn delete(&self, key: &str) -> Result<bool>;

    /// Delete several keys, returning how many existed
    async fn delete_many(&self, keys: &[String]) -> Result<u64>;
}
