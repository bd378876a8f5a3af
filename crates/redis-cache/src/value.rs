//! Values as they are written to the store.

use serde::Serialize;

use crate::error::Result;

/// A value chosen at the call site: stored verbatim, or as JSON text.
#[derive(Debug, Clone, PartialEq)]
pub enum CacheValue {
    /// Stored exactly as given, without JSON quoting.
    Raw(String),
    /// Stored as compact JSON.
    Json(serde_json::Value),
}

impl CacheValue {
    pub fn raw(value: impl Into<String>) -> Self {
        Self::Raw(value.into())
    }

    /// Serialize any value into the JSON variant.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::Serialization`](crate::CacheError::Serialization)
    /// if `T`'s `Serialize` impl fails (e.g. a map with non-string keys).
    pub fn json<T: Serialize + ?Sized>(value: &T) -> Result<Self> {
        Ok(Self::Json(serde_json::to_value(value)?))
    }

    /// The text written to the store.
    pub fn into_stored(self) -> Result<String> {
        match self {
            Self::Raw(s) => Ok(s),
            Self::Json(v) => Ok(serde_json::to_string(&v)?),
        }
    }
}

impl From<String> for CacheValue {
    fn from(s: String) -> Self {
        Self::Raw(s)
    }
}

impl From<&str> for CacheValue {
    fn from(s: &str) -> Self {
        Self::Raw(s.to_string())
    }
}

impl From<serde_json::Value> for CacheValue {
    fn from(v: serde_json::Value) -> Self {
        Self::Json(v)
    }
}
