//! Configuration constants.
//!
//! This module defines the constants used throughout the application,
//! including timeouts, size limits and external service URLs.

/// Default number of hostnames checked concurrently (semaphore limit)
pub const DEFAULT_MAX_CONCURRENCY: usize = 20;

// Network operation timeouts
/// DNS query timeout in seconds.
/// A query that does not answer within this bound is classified like SERVFAIL.
pub const DNS_TIMEOUT_SECS: u64 = 3;
/// Resolver attempts per query (hickory retries within the timeout budget)
pub const DNS_ATTEMPTS: usize = 2;
/// HTTP probe timeout in seconds
pub const HTTP_PROBE_TIMEOUT_SECS: u64 = 10;
// Per-check time budget, see `Config::check_timeout`
/// Sequential DNS queries one check is budgeted for (nameserver A/AAAA/SOA
/// lookups for a few nameservers, or a full CNAME chain)
pub const CHECK_DNS_QUERY_BUDGET: u32 = 12;
/// Sequential HTTP probes one check is budgeted for
pub const CHECK_HTTP_PROBE_BUDGET: u32 = 2;

/// Port used when querying a candidate nameserver directly
pub const DNS_PORT: u16 = 53;

/// Maximum number of CNAME hops followed from a hostname
pub const MAX_CNAME_CHAIN_DEPTH: usize = 8;

/// Maximum response body size in bytes read from an HTTP probe (2MB).
/// Bodies are truncated beyond this; signature markers appear early in error pages.
pub const MAX_RESPONSE_BODY_SIZE: usize = 2 * 1024 * 1024;

/// Default User-Agent string for HTTP requests.
pub const DEFAULT_USER_AGENT: &str = concat!("subdomain_scanner/", env!("CARGO_PKG_VERSION"));

// Discovery sources
/// Prefix of the crt.sh feed URL; the percent-encoded hostname is appended.
pub const CRTSH_RSS_URL_PREFIX: &str = "https://crt.sh/atom?q=";
/// Prefix of the shared-nameserver lookup API; the nameserver is appended.
pub const SHARED_DNS_API_URL_PREFIX: &str = "https://api.hackertarget.com/findshareddns/?q=";
/// Body returned by the shared-nameserver API for an unknown nameserver
pub const SHARED_DNS_NO_RESULTS_BODY: &str = "error check your search parameter";

// Retry strategy (discovery fetches only)
/// Initial delay in milliseconds before first retry
pub const RETRY_INITIAL_DELAY_MS: u64 = 500;
/// Factor by which retry delay is multiplied on each attempt
pub const RETRY_FACTOR: u64 = 2;
/// Maximum delay between retries in seconds
pub const RETRY_MAX_DELAY_SECS: u64 = 10;
/// Maximum number of retries
pub const RETRY_MAX_ATTEMPTS: usize = 3;
