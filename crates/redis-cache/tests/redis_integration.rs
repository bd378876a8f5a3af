//! Live Redis tests.
//!
//! Run with a server available at `REDIS_URL` (default `redis://127.0.0.1:6379`):
//!
//! ```sh
//! cargo test -p redis-cache --test redis_integration -- --ignored
//! ```

#![cfg(feature = "redis")]

use redis_cache::{CacheConfig, CacheFacade, Expiry, TimeUnit};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::time::Duration;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Session {
    user_id: u64,
    scopes: Vec<String>,
}

async fn connect() -> (CacheFacade, String) {
    let config = CacheConfig::from_env().expect("valid REDIS_URL");
    let cache = CacheFacade::connect(&config)
        .await
        .expect("Redis reachable at REDIS_URL");
    // Unique namespace per test so runs don't collide
    let ns = format!("redis-cache-test:{}", Uuid::new_v4());
    (cache, ns)
}

#[tokio::test]
#[ignore = "requires a running Redis"]
async fn json_and_raw_round_trip() {
    let (cache, ns) = connect().await;
    let session = Session {
        user_id: 42,
        scopes: vec!["read".to_string()],
    };

    cache
        .set_json(&format!("{ns}:session"), &session, Duration::from_secs(30))
        .await
        .unwrap();
    cache
        .set_raw(&format!("{ns}:greeting"), "hello", Expiry::Never)
        .await
        .unwrap();

    let cached: Option<Session> = cache.get_as(&format!("{ns}:session")).await.unwrap();
    assert_eq!(cached, Some(session));
    assert_eq!(
        cache.get(&format!("{ns}:greeting")).await.unwrap(),
        Some("hello".to_string())
    );

    cache.delete_many(cache.keys(&format!("{ns}:*")).await.unwrap()).await.unwrap();
}

#[tokio::test]
#[ignore = "requires a running Redis"]
async fn multi_get_single_missing_key_keeps_placeholder() {
    let (cache, ns) = connect().await;

    let values = cache.multi_get([format!("{ns}:missing")]).await.unwrap();
    assert_eq!(values, vec![None]);
}

#[tokio::test]
#[ignore = "requires a running Redis"]
async fn keys_delete_and_expiry() {
    let (cache, ns) = connect().await;

    cache.set_raw(&format!("{ns}:user:1"), "a", Expiry::Never).await.unwrap();
    cache.set_raw(&format!("{ns}:user:2"), "b", Expiry::Never).await.unwrap();
    cache
        .set_for(&format!("{ns}:user:3"), "c", 50, TimeUnit::Milliseconds)
        .await
        .unwrap();
    cache.set_raw(&format!("{ns}:other"), "d", Expiry::Never).await.unwrap();

    tokio::time::sleep(Duration::from_millis(200)).await;

    let keys = cache.keys(&format!("{ns}:user:*")).await.unwrap();
    assert_eq!(
        keys,
        HashSet::from([format!("{ns}:user:1"), format!("{ns}:user:2")])
    );

    assert!(cache.delete(&format!("{ns}:user:1")).await.unwrap());
    assert!(!cache.delete(&format!("{ns}:user:1")).await.unwrap());
    assert_eq!(
        cache
            .delete_many([format!("{ns}:user:2"), format!("{ns}:other"), format!("{ns}:nope")])
            .await
            .unwrap(),
        2
    );
}
