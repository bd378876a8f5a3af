//! # rcache
//!
//! Command-line client for the cache facade: inspect and edit cache entries
//! the same way application code reads and writes them.

#![forbid(unsafe_code)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]

pub mod cli;
pub mod commands;

pub use cli::{Cli, Command};
pub use commands::run;
