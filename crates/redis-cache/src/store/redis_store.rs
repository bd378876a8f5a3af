//! # Redis Store
//!
//! [`KeyValueStore`] backed by a multiplexed Redis connection.

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, Client, SetExpiry, SetOptions};
use std::collections::HashSet;

use super::KeyValueStore;
use crate::config::CacheConfig;
use crate::error::{CacheError, Result};
use crate::expiry::Expiry;

/// Redis store over a [`ConnectionManager`], which reconnects on its own
#[derive(Clone)]
pub struct RedisStore {
    conn: ConnectionManager,
}

impl RedisStore {
    /// Connect to the server at `config.url`
    pub async fn connect(config: &CacheConfig) -> Result<Self> {
        let client = Client::open(config.url.as_str())?;
        let conn = ConnectionManager::new(client).await?;

        tracing::info!(url = %config.redacted_url(), "Connected to Redis");
        Ok(Self { conn })
    }
}

/// Expiry argument of a `SET` command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ExpiryArg {
    /// `PX <milliseconds>`
    Px(u64),
    /// `PXAT <unix milliseconds>`
    PxAt(u64),
}

fn expiry_arg(expiry: Expiry) -> Result<Option<ExpiryArg>> {
    if let Some(millis) = expiry.ttl_millis() {
        return Ok(Some(ExpiryArg::Px(millis)));
    }

    match expiry.deadline_millis() {
        Some(deadline) => u64::try_from(deadline).map(|ms| Some(ExpiryArg::PxAt(ms))).map_err(|_| {
            CacheError::InvalidExpiry(format!("deadline {deadline}ms is before the Unix epoch"))
        }),
        None => Ok(None),
    }
}

fn set_options(expiry: Expiry) -> Result<Option<SetOptions>> {
    let expiry = match expiry_arg(expiry)? {
        None => return Ok(None),
        Some(ExpiryArg::Px(millis)) => SetExpiry::PX(millis),
        Some(ExpiryArg::PxAt(millis)) => SetExpiry::PXAT(millis),
    };

    Ok(Some(SetOptions::default().with_expiration(expiry)))
}

#[async_trait]
impl KeyValueStore for RedisStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let mut conn = self.conn.clone();
        let value: Option<String> = conn.get(key).await?;
        Ok(value)
    }

    async fn set(&self, key: &str, value: String, expiry: Expiry) -> Result<()> {
        let mut conn = self.conn.clone();

        match set_options(expiry)? {
            Some(options) => {
                let _: () = conn.set_options(key, value, options).await?;
            }
            None => {
                let _: () = conn.set(key, value).await?;
            }
        }

        Ok(())
    }

    async fn multi_get(&self, keys: &[String]) -> Result<Vec<Option<String>>> {
        if keys.is_empty() {
            return Ok(Vec::new());
        }
        let mut conn = self.conn.clone();

        // Explicit MGET: a single-key call must still reply with an array
        let values: Vec<Option<String>> = redis::cmd("MGET")
            .arg(keys)
            .query_async(&mut conn)
            .await?;

        Ok(values)
    }

    async fn keys(&self, pattern: &str) -> Result<HashSet<String>> {
        let mut conn = self.conn.clone();
        let keys: Vec<String> = conn.keys(pattern).await?;
        Ok(keys.into_iter().collect())
    }

    async fn delete(&self, key: &str) -> Result<bool> {
        let mut conn = self.conn.clone();
        let deleted: i64 = conn.del(key).await?;
        Ok(deleted > 0)
    }

    async fn delete_many(&self, keys: &[String]) -> Result<u64> {
        if keys.is_empty() {
            return Ok(0);
        }
        let mut conn = self.conn.clone();
        let deleted: u64 = conn.del(keys).await?;
        Ok(deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;
    use std::time::Duration;

    #[test]
    fn test_never_uses_plain_set() {
        assert_eq!(expiry_arg(Expiry::Never).unwrap(), None);
        assert!(set_options(Expiry::Never).unwrap().is_none());
    }

    #[test]
    fn test_relative_expiry_is_px_millis() {
        assert_eq!(
            expiry_arg(Expiry::After(Duration::from_secs(5))).unwrap(),
            Some(ExpiryArg::Px(5_000))
        );
        assert_eq!(
            expiry_arg(Expiry::after(90, crate::TimeUnit::Minutes)).unwrap(),
            Some(ExpiryArg::Px(5_400_000))
        );
    }

    #[test]
    fn test_sub_millisecond_ttl_rounds_up() {
        assert_eq!(
            expiry_arg(Expiry::After(Duration::from_micros(1))).unwrap(),
            Some(ExpiryArg::Px(1))
        );
        assert_eq!(
            expiry_arg(Expiry::After(Duration::from_micros(1_500))).unwrap(),
            Some(ExpiryArg::Px(2))
        );
    }

    #[test]
    fn test_absolute_expiry_is_pxat_unix_millis() {
        let at = DateTime::from_timestamp_millis(1_900_000_000_123).unwrap();
        assert_eq!(
            expiry_arg(Expiry::At(at)).unwrap(),
            Some(ExpiryArg::PxAt(1_900_000_000_123))
        );
        assert!(set_options(Expiry::At(at)).unwrap().is_some());
    }

    #[test]
    fn test_pre_epoch_instant_is_rejected() {
        let at = DateTime::from_timestamp_millis(-1_000).unwrap();
        let err = expiry_arg(Expiry::At(at)).unwrap_err();
        assert!(matches!(err, CacheError::InvalidExpiry(_)));
    }
}
