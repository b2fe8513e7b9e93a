//! Application configuration and constants.
//!
//! This module provides:
//! - Configuration constants (timeouts, limits, service URLs)
//! - Library configuration (`Config`)
//! - CLI definition and option types

mod cli;
mod constants;
mod types;

// Re-export all constants
pub use cli::{Cli, Command, DiscoverHostnamesArgs, NameserversArgs, TestHostnamesArgs};
pub use constants::*;
pub use types::{Config, LogFormat, LogLevel, OutputFormat};
