#![warn(clippy::perf)]
#![warn(clippy::unwrap_used)]

pub mod cli;

pub mod config;
pub use config::Config;

/// Word-list client.
pub mod datamuse;

/// Definition lookups for the revealed word.
pub mod dictionary;

mod errors;
pub use errors::{Error, Result};

pub mod games;

pub mod logging;

pub mod play;

pub mod server;

pub mod words;
