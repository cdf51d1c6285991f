// src/errors.rs

//! Crate-wide error aliases.
//!
//! A thin wrapper around `anyhow` for now; a single place to grow more
//! structured error types if the tool ever needs them.

pub use anyhow::{Error, Result};
