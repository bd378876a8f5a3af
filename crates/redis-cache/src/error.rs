//! Cache error types

use thiserror::Error;

/// Cache facade errors
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Store error: {0}")]
    Store(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Cannot deserialize value at key '{key}': {message}")]
    Deserialization { key: String, message: String },

    #[error("Invalid expiry: {0}")]
    InvalidExpiry(String),

    #[error("Invalid key pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl CacheError {
    /// Whether the error came from the store rather than from local input
    #[must_use]
    pub const fn is_store(&self) -> bool {
        matches!(self, Self::Store(_))
    }
}

impl From<serde_json::Error> for CacheError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

#[cfg(feature = "redis")]
impl From<redis::RedisError> for CacheError {
    fn from(err: redis::RedisError) -> Self {
        Self::Store(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, CacheError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_error_maps_to_serialization() {
        let err = serde_json::from_str::<u32>("nope").unwrap_err();
        let err = CacheError::from(err);

        assert!(matches!(err, CacheError::Serialization(_)));
        assert!(!err.is_store());
    }

    #[test]
    fn test_deserialization_message_names_key() {
        let err = CacheError::Deserialization {
            key: "user:1".to_string(),
            message: "expected struct".to_string(),
        };

        assert_eq!(
            err.to_string(),
            "Cannot deserialize value at key 'user:1': expected struct"
        );
    }
}
