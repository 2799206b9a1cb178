//! Explorer Core Module
//!
//! This module contains the core pieces shared by the query converter:
//! - Canonical query defaults
//! - Error types
//! - The unified query data model

pub mod config;
pub mod error;
pub mod types;

// Re-export commonly used items
pub use config::*;
pub use error::{ConfigError, ExplorerError, QueryError, Result};
