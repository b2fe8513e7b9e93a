//! Error handling and scan statistics.
//!
//! This module provides:
//! - Error type definitions (initialization, DNS taxonomy, HTTP probes, checks, discovery)
//! - Scan statistics tracking (findings per reason code, failed hostnames)
//! - Retry strategy configuration for discovery fetches

mod categorization;
mod stats;
mod types;

// Re-export public API
pub use categorization::get_retry_strategy;
pub use stats::FindingStats;
pub use types::{
    DiscoveryError, DnsError, InitializationError, ProbeError, SafeListError, ScanError,
};
