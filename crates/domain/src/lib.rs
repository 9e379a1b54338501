//! Shared building blocks for the mediatoken crates: the common error type,
//! structured trace events, and TOML configuration.

pub mod config;
pub mod error;
pub mod trace;

pub use error::{Error, Result};
