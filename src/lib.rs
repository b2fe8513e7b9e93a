//! subdomain_scanner library: subdomain discovery and takeover detection
//!
//! This library discovers the host names of an organisation and tests each of
//! them for two classes of subdomain takeover:
//!
//! - **Orphaned delegations**: a host name delegated (NS) to nameservers that
//!   no longer resolve or no longer serve its zone.
//! - **Dangling CNAMEs**: a host name aliased to a third-party service
//!   resource (storage bucket, CDN distribution, hosted page) that is
//!   unclaimed or no longer exists.
//!
//! Every check result is a [`Finding`] with a stable [`ReasonCode`].
//!
//! # Example
//!
//! ```no_run
//! use subdomain_scanner::{Config, run_scan};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config {
//!     hostnames_file: std::path::PathBuf::from("hostnames.txt"),
//!     max_concurrency: 50,
//!     ..Default::default()
//! };
//!
//! let report = run_scan(config).await?;
//! for (hostname, findings) in report.iter() {
//!     for finding in findings {
//!         println!("{hostname}: {finding}");
//!     }
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Use `#[tokio::main]` in your application
//! or ensure you're calling library functions within an async context.

#![warn(missing_docs)]

pub mod config;
pub mod discovery;
pub mod dns;
mod error_handling;
pub mod export;
pub mod http;
pub mod initialization;
mod run;
pub mod safe_list;
pub mod takeover;

// Re-export public API
pub use config::{Config, LogFormat, LogLevel, OutputFormat};
pub use error_handling::{
    DiscoveryError, DnsError, FindingStats, InitializationError, ProbeError, SafeListError,
    ScanError,
};
pub use export::ScanReport;
pub use run::{run_checks, run_scan, ScanContext};
pub use safe_list::SafeNameserverList;
pub use takeover::{
    check_cname_takeover, check_orphaned_delegation, Finding, ReasonCode, Severity,
};
