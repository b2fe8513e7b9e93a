//! Error type definitions.
//!
//! This module defines all error types used throughout the application. DNS
//! failure codes are modelled as values because the takeover checks classify
//! them; only transport-level problems surface as hard errors.

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),
}

/// Outcome of a failed DNS query.
///
/// The first five variants are the DNS error taxonomy the checks branch on.
/// `Transport` covers everything else (socket errors, malformed responses,
/// no usable upstream) and is never treated as a DNS answer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DnsError {
    /// The name does not exist (NXDOMAIN).
    #[error("NXDOMAIN")]
    NxDomain,

    /// The authoritative chain is broken or unreachable (SERVFAIL).
    #[error("SERVFAIL")]
    ServFail,

    /// The name exists but has no records of the requested type.
    #[error("NODATA")]
    NoData,

    /// The server declined to answer.
    #[error("REFUSED")]
    Refused,

    /// No answer within the query timeout.
    #[error("query timed out")]
    Timeout,

    /// A failure unrelated to DNS semantics.
    #[error("DNS transport error: {0}")]
    Transport(String),
}

impl DnsError {
    /// Returns `true` for the DNS taxonomy (including timeouts), `false` for
    /// transport failures.
    pub fn is_dns_semantic(&self) -> bool {
        !matches!(self, DnsError::Transport(_))
    }
}

/// Failure of an HTTP probe (the status code of a response is never an error).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProbeError {
    /// The probed host name does not resolve.
    #[error("DNS resolution failed for probe target: {0}")]
    DnsResolution(String),

    /// The request did not complete within the probe timeout.
    #[error("HTTP probe timed out")]
    Timeout,

    /// Any other connection, TLS or protocol failure.
    #[error("HTTP probe failed: {0}")]
    Transport(String),
}

/// Hard failures of a takeover check.
///
/// Absence of a vulnerability is never an error: it is a `Finding` with
/// `vulnerable == false`.
#[derive(Error, Debug)]
pub enum ScanError {
    /// The input is not a syntactically valid host name.
    #[error("Invalid hostname '{hostname}': {reason}")]
    InvalidHostname {
        /// The rejected input
        hostname: String,
        /// Why it was rejected
        reason: String,
    },

    /// A DNS lookup failed for reasons unrelated to DNS semantics.
    #[error("DNS lookup for {name} failed: {source}")]
    Dns {
        /// The name being queried
        name: String,
        /// The underlying transport failure
        #[source]
        source: DnsError,
    },
}

/// Error types for hostname discovery (CT logs, shared-nameserver lookup, input files).
#[derive(Error, Debug)]
pub enum DiscoveryError {
    /// The HTTP request could not be completed.
    #[error("Request to {url} failed: {source}")]
    Request {
        /// Requested URL
        url: String,
        /// Underlying probe error
        #[source]
        source: ProbeError,
    },

    /// The service answered with an unexpected status code.
    #[error("Unexpected HTTP status {status} from {url}")]
    UnexpectedStatus {
        /// Requested URL
        url: String,
        /// Returned status code
        status: u16,
    },

    /// Reading the hostname list failed.
    #[error("Failed to read hostnames from {path}: {source}")]
    Io {
        /// Path (or `-` for stdin)
        path: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

impl DiscoveryError {
    /// Whether a retry might succeed (timeouts, connection failures, 429 and 5xx).
    pub fn is_retriable(&self) -> bool {
        match self {
            DiscoveryError::Request { source, .. } => {
                matches!(source, ProbeError::Timeout | ProbeError::Transport(_))
            }
            DiscoveryError::UnexpectedStatus { status, .. } => {
                *status == 429 || (500..600).contains(status)
            }
            DiscoveryError::Io { .. } => false,
        }
    }
}

/// Error types for the safe-nameserver allow-list.
#[derive(Error, Debug)]
pub enum SafeListError {
    /// An entry is neither an IP address nor a CIDR range.
    #[error("Invalid safe-list entry '{entry}': {reason}")]
    InvalidEntry {
        /// The rejected entry
        entry: String,
        /// Parser message
        reason: String,
    },

    /// An entry belongs to the other address family than its list.
    #[error("Safe-list entry '{entry}' is not an {expected} address or range")]
    WrongFamily {
        /// The rejected entry
        entry: String,
        /// Family of the list the entry was found in
        expected: &'static str,
    },

    /// The allow-list file could not be read.
    #[error("Failed to read safe-list file {path}: {source}")]
    Io {
        /// File path
        path: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The allow-list file is not valid YAML/JSON of the expected shape.
    #[error("Failed to parse safe-list file {path}: {source}")]
    Parse {
        /// File path
        path: String,
        /// Underlying parse error
        #[source]
        source: serde_yaml::Error,
    },
}
