//! # Cache Configuration
//!
//! Environment-based connection settings.

use std::env;

use crate::error::{CacheError, Result};

pub const DEFAULT_REDIS_URL: &str = "redis://127.0.0.1:6379";

/// Redis connection configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheConfig {
    /// Connection URL, e.g. `redis://:password@host:6379/0`
    pub url: String,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_REDIS_URL.to_string(),
        }
    }
}

impl CacheConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }

    /// Load configuration from the environment, reading `.env` first if present
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::Config`] if `REDIS_URL` is set but not a
    /// `redis://`, `rediss://` or `redis+unix://` URL.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build configuration from an arbitrary variable source
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let url = lookup("REDIS_URL")
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_REDIS_URL.to_string());

        if !["redis://", "rediss://", "redis+unix://", "unix://"]
            .iter()
            .any(|scheme| url.starts_with(scheme))
        {
            return Err(CacheError::Config(format!(
                "REDIS_URL must be a redis:// URL, got '{url}'"
            )));
        }

        Ok(Self { url })
    }

    /// URL with any password replaced, safe for logs
    #[must_use]
    pub fn redacted_url(&self) -> String {
        let Some((scheme, rest)) = self.url.split_once("://") else {
            return self.url.clone();
        };
        let Some((userinfo, host)) = rest.rsplit_once('@') else {
            return self.url.clone();
        };

        match userinfo.split_once(':') {
            Some((user, _)) => format!("{scheme}://{user}:***@{host}"),
            None => self.url.clone(),
        }
    }
}
