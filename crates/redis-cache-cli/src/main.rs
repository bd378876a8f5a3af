//! rcache CLI
//!
//! Reads and writes cache entries through the cache facade.

use anyhow::Result;
use clap::Parser;
use redis_cache::{CacheConfig, CacheFacade, MemoryStore};
use redis_cache_cli::{Cli, run};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr; stdout carries command output only
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("rcache=info,redis_cache_cli=info,redis_cache=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    // .env feeds clap's REDIS_URL fallback
    dotenvy::dotenv().ok();
    let args = Cli::parse();

    let cache = if args.memory {
        info!("Using in-memory store");
        CacheFacade::new(Arc::new(MemoryStore::new()))
    } else {
        let url = args.url;
        let config = CacheConfig::from_lookup(|_| Some(url.clone()))?;
        CacheFacade::connect(&config).await?
    };

    let mut stdout = std::io::stdout().lock();
    run(&cache, args.command, &mut stdout).await
}
