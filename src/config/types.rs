//! Configuration types.
//!
//! This module defines the enums and structs used for configuration. `Config`
//! is the library-level configuration and can be built without the CLI.

use std::net::IpAddr;
use std::path::PathBuf;
use std::time::Duration;

use clap::ValueEnum;

use crate::config::constants::{
    CHECK_DNS_QUERY_BUDGET, CHECK_HTTP_PROBE_BUDGET, DEFAULT_MAX_CONCURRENCY, DEFAULT_USER_AGENT,
    DNS_TIMEOUT_SECS, HTTP_PROBE_TIMEOUT_SECS,
};

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Serialization format of the vulnerability report.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON (default)
    Json,
    /// YAML
    Yaml,
}

/// Library configuration for a `test-hostnames` run (no CLI dependencies).
///
/// # Examples
///
/// ```no_run
/// use subdomain_scanner::Config;
/// use std::path::PathBuf;
///
/// let config = Config {
///     hostnames_file: PathBuf::from("hostnames.txt"),
///     max_concurrency: 10,
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// File to read hostnames from (`-` reads stdin)
    pub hostnames_file: PathBuf,

    /// Optional YAML/JSON file with the safe-nameserver allow-list
    pub safe_nameservers: Option<PathBuf>,

    /// Report serialization format
    pub output_format: OutputFormat,

    /// Include non-vulnerable findings and hostnames without findings in the report
    pub verbose: bool,

    /// Maximum number of hostnames checked concurrently
    pub max_concurrency: usize,

    /// Per HTTP probe timeout in seconds
    pub timeout_seconds: u64,

    /// Per DNS query timeout in seconds
    pub dns_timeout_seconds: u64,

    /// Upstream resolvers for the main resolver context (empty = built-in default)
    pub resolvers: Vec<IpAddr>,

    /// HTTP User-Agent header value
    pub user_agent: String,
}

impl Config {
    /// Time limit for one takeover check on one hostname.
    ///
    /// Each DNS query may take up to twice `dns_timeout_seconds` (the
    /// resolver's own attempts plus the outer bound), so the budget scales
    /// with both configured timeouts.
    pub fn check_timeout(&self) -> Duration {
        let dns = Duration::from_secs(self.dns_timeout_seconds)
            .saturating_mul(2)
            .saturating_mul(CHECK_DNS_QUERY_BUDGET);
        let http = Duration::from_secs(self.timeout_seconds).saturating_mul(CHECK_HTTP_PROBE_BUDGET);
        dns.saturating_add(http)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            hostnames_file: PathBuf::from("-"),
            safe_nameservers: None,
            output_format: OutputFormat::Json,
            verbose: false,
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
            timeout_seconds: HTTP_PROBE_TIMEOUT_SECS,
            dns_timeout_seconds: DNS_TIMEOUT_SECS,
            resolvers: Vec::new(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}
