//! # Cache Facade
//!
//! Typed get/set/delete operations over an injected [`KeyValueStore`].
//! The facade keeps no state of its own: every call is forwarded to the
//! store exactly once and every failure is returned to the caller.

use chrono::Utc;
use serde::de::value::StrDeserializer;
use serde::de::{DeserializeOwned, IntoDeserializer};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;

use crate::error::{CacheError, Result};
use crate::expiry::{Expiry, TimeUnit};
use crate::store::KeyValueStore;
use crate::value::CacheValue;

/// Cache facade over a shared store handle
#[derive(Clone)]
pub struct CacheFacade {
    store: Arc<dyn KeyValueStore>,
}

/// `dyn KeyValueStore` carries no `Debug` bound (the Redis connection has no
/// useful one), so the store handle is left out.
impl std::fmt::Debug for CacheFacade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CacheFacade").finish_non_exhaustive()
    }
}

impl CacheFacade {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Connect to Redis and wrap the connection in a facade
    #[cfg(feature = "redis")]
    pub async fn connect(config: &crate::CacheConfig) -> Result<Self> {
        let store = crate::store::RedisStore::connect(config).await?;
        Ok(Self::new(Arc::new(store)))
    }

    // =========================================================================
    // WRITES
    // =========================================================================

    /// Store `value` at `key`, replacing any current value.
    ///
    /// `expiry` accepts a [`Duration`](std::time::Duration), an absolute
    /// `DateTime<Utc>` or an [`Expiry`]; pass [`Expiry::Never`] for no TTL.
    pub async fn set(
        &self,
        key: &str,
        value: impl Into<CacheValue>,
        expiry: impl Into<Expiry>,
    ) -> Result<()> {
        let expiry = expiry.into();
        if let Err(e) = expiry.validate(Utc::now()) {
            tracing::warn!(key, error = %e, "Rejected cache write");
            return Err(e);
        }

        let stored = value.into().into_stored()?;
        self.store.set(key, stored, expiry).await?;

        tracing::debug!(key, ?expiry, "Cache set");
        Ok(())
    }

    /// Store with a TTL given as an amount of `unit`
    pub async fn set_for(
        &self,
        key: &str,
        value: impl Into<CacheValue>,
        amount: u64,
        unit: TimeUnit,
    ) -> Result<()> {
        self.set(key, value, Expiry::after(amount, unit)).await
    }

    /// Store a string verbatim
    pub async fn set_raw(&self, key: &str, value: &str, expiry: impl Into<Expiry>) -> Result<()> {
        self.set(key, CacheValue::raw(value), expiry).await
    }

    /// Store any serializable value as JSON
    pub async fn set_json<T: Serialize + ?Sized>(
        &self,
        key: &str,
        value: &T,
        expiry: impl Into<Expiry>,
    ) -> Result<()> {
        self.set(key, CacheValue::json(value)?, expiry).await
    }

    // =========================================================================
    // READS
    // =========================================================================

    /// Get the raw stored string
    pub async fn get(&self, key: &str) -> Result<Option<String>> {
        let value = self.store.get(key).await?;

        if value.is_some() {
            tracing::debug!(key, "Cache hit");
        } else {
            tracing::debug!(key, "Cache miss");
        }
        Ok(value)
    }

    /// Get the stored value and deserialize it as `T`.
    ///
    /// Content is read as JSON first. Text that is not JSON (a value stored
    /// with `set_raw`) is offered to `T` as a plain string, so raw strings
    /// read back as `String` and string-like types.
    pub async fn get_as<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        let Some(raw) = self.get(key).await? else {
            return Ok(None);
        };

        match serde_json::from_str(&raw) {
            Ok(value) => Ok(Some(value)),
            Err(json_err) => {
                let de: StrDeserializer<'_, serde::de::value::Error> =
                    raw.as_str().into_deserializer();
                T::deserialize(de).map(Some).map_err(|_| CacheError::Deserialization {
                    key: key.to_string(),
                    message: json_err.to_string(),
                })
            }
        }
    }

    /// Get several raw values, aligned with `keys`
    pub async fn multi_get<I>(&self, keys: I) -> Result<Vec<Option<String>>>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let keys = collect_keys(keys);
        let values = self.store.multi_get(&keys).await?;

        tracing::debug!(
            requested = keys.len(),
            hits = values.iter().filter(|v| v.is_some()).count(),
            "Cache multi-get"
        );
        Ok(values)
    }

    /// Keys matching a glob-style pattern, e.g. `user:*`
    pub async fn keys(&self, pattern: &str) -> Result<HashSet<String>> {
        self.store.keys(pattern).await
    }

    // =========================================================================
    // DELETES
    // =========================================================================

    /// Delete a key, returning whether it existed
    pub async fn delete(&self, key: &str) -> Result<bool> {
        let existed = self.store.delete(key).await?;
        tracing::debug!(key, existed, "Cache delete");
        Ok(existed)
    }

    /// Delete several keys, returning how many existed
    pub async fn delete_many<I>(&self, keys: I) -> Result<u64>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let keys = collect_keys(keys);
        let deleted = self.store.delete_many(&keys).await?;
        tracing::debug!(requested = keys.len(), deleted, "Cache delete-many");
        Ok(deleted)
    }
}

fn collect_keys<I>(keys: I) -> Vec<String>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    keys.into_iter().map(|k| k.as_ref().to_string()).collect()
}
