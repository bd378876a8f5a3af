//! Argument definitions.

use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use redis_cache::config::DEFAULT_REDIS_URL;
use redis_cache::{Expiry, TimeUnit};

#[derive(Parser, Debug)]
#[command(name = "rcache")]
#[command(about = "Read and write cache entries through the cache facade")]
pub struct Cli {
    /// Redis URL
    #[arg(long, env = "REDIS_URL", default_value = DEFAULT_REDIS_URL)]
    pub url: String,

    /// Use a throwaway in-memory store instead of Redis
    #[arg(long)]
    pub memory: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Print the value stored at a key
    Get {
        key: String,

        /// Pretty-print the value if it is JSON
        #[arg(long)]
        pretty: bool,
    },

    /// Store a value
    Set {
        key: String,
        value: String,

        /// Parse the value as JSON and store it in compact form
        #[arg(long)]
        json: bool,

        /// Time-to-live, in --unit
        #[arg(long, conflicts_with = "expire_at")]
        ttl: Option<u64>,

        /// Unit for --ttl (ns, us, ms, s, m, h, d)
        #[arg(long, default_value = "s")]
        unit: TimeUnit,

        /// Absolute expiry instant (RFC 3339)
        #[arg(long)]
        expire_at: Option<DateTime<Utc>>,
    },

    /// List keys matching a glob pattern
    Keys { pattern: String },

    /// Print several values, one per line
    Mget {
        #[arg(required = true)]
        keys: Vec<String>,
    },

    /// Delete keys and print how many existed
    Del {
        #[arg(required = true)]
        keys: Vec<String>,
    },
}

impl Command {
    /// Expiry requested by a `set`, [`Expiry::Never`] for other commands
    #[must_use]
    pub fn expiry(&self) -> Expiry {
        match self {
            Self::Set {
                ttl: Some(amount),
                unit,
                ..
            } => Expiry::after(*amount, *unit),
            Self::Set {
                expire_at: Some(at),
                ..
            } => Expiry::At(*at),
            _ => Expiry::Never,
        }
    }
}
