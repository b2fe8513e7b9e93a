//! Shared resources of a scan.

use std::time::Duration;

use crate::config::Config;
use crate::error_handling::FindingStats;
use crate::safe_list::SafeNameserverList;

/// Everything a hostname task needs, shared across tasks through an `Arc`.
pub struct ScanContext<F, H> {
    /// Resolver factory (main and directed contexts)
    pub dns: F,
    /// HTTP client for service probes
    pub http: H,
    /// Nameservers whose unresolvable IP literals are not reported
    pub safe_nameservers: Option<SafeNameserverList>,
    /// Per reason code counters
    pub stats: FindingStats,
    /// Time limit applied to each check separately
    pub check_timeout: Duration,
}

impl<F, H> ScanContext<F, H> {
    /// Creates a context with fresh statistics and the default check timeout.
    pub fn new(dns: F, http: H, safe_nameservers: Option<SafeNameserverList>) -> Self {
        Self {
            dns,
            http,
            safe_nameservers,
            stats: FindingStats::new(),
            check_timeout: Config::default().check_timeout(),
        }
    }

    /// Replaces the per-check time limit.
    pub fn with_check_timeout(mut self, check_timeout: Duration) -> Self {
        self.check_timeout = check_timeout;
        self
    }
}
