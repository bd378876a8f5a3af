//! Command execution against a [`CacheFacade`].

use anyhow::{Context, Result};
use redis_cache::{CacheFacade, CacheValue};
use std::io::Write;

use crate::cli::Command;

const NIL: &str = "(nil)";

/// Execute `command`, writing human-readable output to `out`
pub async fn run(cache: &CacheFacade, command: Command, out: &mut impl Write) -> Result<()> {
    let expiry = command.expiry();

    match command {
        Command::Get { key, pretty } => {
            let value = cache.get(&key).await?;
            match value {
                Some(raw) if pretty => writeln!(out, "{}", render_pretty(&raw))?,
                Some(raw) => writeln!(out, "{raw}")?,
                None => writeln!(out, "{NIL}")?,
            }
        }

        Command::Set {
            key, value, json, ..
        } => {
            let value = if json {
                let parsed: serde_json::Value = serde_json::from_str(&value)
                    .with_context(|| format!("--json value for '{key}' is not valid JSON"))?;
                CacheValue::Json(parsed)
            } else {
                CacheValue::Raw(value)
            };

            cache.set(&key, value, expiry).await?;
            writeln!(out, "OK")?;
        }

        Command::Keys { pattern } => {
            let mut keys: Vec<String> = cache.keys(&pattern).await?.into_iter().collect();
            keys.sort_unstable();

            if keys.is_empty() {
                tracing::info!(%pattern, "No keys matched");
            }
            for key in keys {
                writeln!(out, "{key}")?;
            }
        }

        Command::Mget { keys } => {
            for value in cache.multi_get(&keys).await? {
                writeln!(out, "{}", value.as_deref().unwrap_or(NIL))?;
            }
        }

        Command::Del { keys } => {
            let deleted = match keys.as_slice() {
                [key] => u64::from(cache.delete(key).await?),
                _ => cache.delete_many(&keys).await?,
            };
            writeln!(out, "{deleted}")?;
        }
    }

    Ok(())
}

fn render_pretty(raw: &str) -> String {
    serde_json::from_str::<serde_json::Value>(raw)
        .and_then(|v| serde_json::to_string_pretty(&v))
        .unwrap_or_else(|_| raw.to_string())
}
