//! # In-Memory Store
//!
//! Process-local [`KeyValueStore`] with the same observable behaviour as the
//! Redis store: overwrite clears the previous TTL, expired keys read as
//! absent, `keys` takes Redis glob patterns. Expiry is lazy: an entry is
//! dropped the next time it is touched or listed.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio::time::{Duration, Instant};

use super::KeyValueStore;
use crate::error::Result;
use crate::expiry::Expiry;
use crate::pattern::KeyPattern;

#[derive(Debug, Clone)]
struct Entry {
    value: String,
    expires_at: Option<Instant>,
}

impl Entry {
    fn is_live(&self, now: Instant) -> bool {
        self.expires_at.is_none_or(|deadline| deadline > now)
    }
}

/// In-memory store; clones share the same map
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<RwLock<HashMap<String, Entry>>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live entries
    pub async fn len(&self) -> usize {
        let now = Instant::now();
        self.entries
            .read()
            .await
            .values()
            .filter(|e| e.is_live(now))
            .count()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

/// Deadline for `expiry`, `Err(())` if it has already passed.
fn deadline(expiry: Expiry, now: Instant) -> std::result::Result<Option<Instant>, ()> {
    match expiry {
        Expiry::Never => Ok(None),
        Expiry::After(_) => {
            let millis = expiry.ttl_millis().unwrap_or(u64::MAX);
            if millis == 0 {
                return Err(());
            }
            Ok(now.checked_add(Duration::from_millis(millis)))
        }
        Expiry::At(at) => match (at - Utc::now()).to_std() {
            Ok(remaining) if !remaining.is_zero() => Ok(now.checked_add(remaining)),
            _ => Err(()),
        },
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let now = Instant::now();
        {
            let entries = self.entries.read().await;
            match entries.get(key) {
                Some(entry) if entry.is_live(now) => return Ok(Some(entry.value.clone())),
                Some(_) => {}
                None => return Ok(None),
            }
        }

        // Expired: evict under the write lock unless it was replaced meanwhile
        let mut entries = self.entries.write().await;
        if entries.get(key).is_some_and(|e| !e.is_live(now)) {
            entries.remove(key);
        }
        Ok(None)
    }

    async fn set(&self, key: &str, value: String, expiry: Expiry) -> Result<()> {
        let now = Instant::now();
        let mut entries = self.entries.write().await;

        match deadline(expiry, now) {
            Ok(expires_at) => {
                entries.insert(key.to_string(), Entry { value, expires_at });
            }
            // Redis drops a key whose expiry is already in the past
            Err(()) => {
                entries.remove(key);
            }
        }

        Ok(())
    }

    async fn multi_get(&self, keys: &[String]) -> Result<Vec<Option<String>>> {
        let now = Instant::now();
        let entries = self.entries.read().await;

        Ok(keys
            .iter()
            .map(|key| {
                entries
                    .get(key)
                    .filter(|e| e.is_live(now))
                    .map(|e| e.value.clone())
            })
            .collect())
    }

    async fn keys(&self, pattern: &str) -> Result<HashSet<String>> {
        let pattern = KeyPattern::new(pattern)?;
        let now = Instant::now();
        let mut entries = self.entries.write().await;

        entries.retain(|_, e| e.is_live(now));

        Ok(entries
            .keys()
            .filter(|key| pattern.matches(key))
            .cloned()
            .collect())
    }

    async fn delete(&self, key: &str) -> Result<bool> {
        let now = Instant::now();
        let mut entries = self.entries.write().await;
        Ok(entries.remove(key).is_some_and(|e| e.is_live(now)))
    }

    async fn delete_many(&self, keys: &[String]) -> Result<u64> {
        let now = Instant::now();
        let mut entries = self.entries.write().await;

        let mut deleted = 0;
        for key in keys {
            if entries.remove(key).is_some_and(|e| e.is_live(now)) {
                deleted += 1;
            }
        }
        Ok(deleted)
    }
}
