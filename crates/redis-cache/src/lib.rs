//! # Redis Cache
//!
//! Typed cache facade over a Redis-compatible key-value store.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     Application Layer                       │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                       CacheFacade                           │
//! │     (raw vs JSON values, TTL forms, typed reads)            │
//! └─────────────────────────────────────────────────────────────┘
//!                              │  Arc<dyn KeyValueStore>
//!                    ┌─────────┴─────────┐
//!                    ▼                   ▼
//! ┌─────────────────────────┐   ┌──────────────────────────────┐
//! │       RedisStore        │   │         MemoryStore          │
//! │   (ConnectionManager)   │   │   (tests, dry runs)          │
//! └─────────────────────────┘   └──────────────────────────────┘
//! ```
//!
//! ## Features
//!
//! - `redis`: Enable the Redis-backed store (default)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use redis_cache::{CacheConfig, CacheFacade, Expiry, TimeUnit};
//! use std::time::Duration;
//!
//! let cache = CacheFacade::connect(&CacheConfig::from_env()?).await?;
//!
//! cache.set_raw("greeting", "hello", Expiry::Never).await?;
//! cache.set_json("user:1", &user, Duration::from_secs(300)).await?;
//! cache.set_for("session:abc", token, 30, TimeUnit::Minutes).await?;
//!
//! let user: Option<User> = cache.get_as("user:1").await?;
//! let removed = cache.delete_many(cache.keys("session:*").await?).await?;
//! ```

#![forbid(unsafe_code)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]

pub mod config;
pub mod error;
pub mod expiry;
pub mod facade;
pub mod pattern;
pub mod store;
pub mod value;

// Re-export commonly used types
pub use config::CacheConfig;
pub use error::{CacheError, Result};
pub use expiry::{Expiry, ParseTimeUnitError, TimeUnit};
pub use facade::CacheFacade;
pub use pattern::KeyPattern;
#[cfg(feature = "redis")]
pub use store::RedisStore;
pub use store::{KeyValueStore, MemoryStore};
pub use value::CacheValue;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Connect a facade to Redis using configuration from the environment
///
/// # Errors
///
/// Returns an error if the configuration is invalid or Redis is unreachable.
#[cfg(feature = "redis")]
pub async fn init_default() -> Result<CacheFacade> {
    let config = CacheConfig::from_env()?;
    CacheFacade::connect(&config).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
