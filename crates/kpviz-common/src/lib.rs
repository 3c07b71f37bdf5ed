//! Partition visualizer common types and utilities
//!
//! This crate provides the identifiers, placement request, error
//! definitions and file configuration shared by the placement engine
//! and the command-line front end.

pub mod config;
pub mod error;
pub mod types;

pub use config::Config;
pub use error::{Error, Result};
pub use types::*;
