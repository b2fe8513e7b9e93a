//! Application initialization and resource setup.
//!
//! This module provides functions to initialize all shared resources:
//! - Logger
//! - HTTP client used for service probes and discovery fetches
//! - DNS resolver factory (main and directed resolver contexts)
//! - Concurrency semaphore

mod client;
mod logger;
mod resolver;

use std::sync::Arc;

use tokio::sync::Semaphore;

// Re-export public API
pub use client::init_client;
pub use logger::init_logger_with;
pub use resolver::{init_resolver_factory, resolver_config};

/// Initializes a semaphore for controlling concurrency.
///
/// The semaphore limits the number of hostnames checked at once. A count of
/// zero is raised to one so a scan always makes progress.
pub fn init_semaphore(count: usize) -> Arc<Semaphore> {
    Arc::new(Semaphore::new(count.max(1)))
}
