//! Scan statistics tracking.
//!
//! This module provides thread-safe counters for findings (per reason code)
//! and for hostnames that could not be checked.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use strum::IntoEnumIterator;

use crate::takeover::ReasonCode;

/// Thread-safe scan statistics tracker.
///
/// Every `ReasonCode` is initialized to zero on creation so the counters can
/// be shared across tasks via `Arc` without locking.
pub struct FindingStats {
    findings: HashMap<ReasonCode, AtomicUsize>,
    checked_hostnames: AtomicUsize,
    failed_hostnames: AtomicUsize,
}

impl FindingStats {
    /// Creates a tracker with every counter at zero.
    pub fn new() -> Self {
        let mut findings = HashMap::new();
        for code in ReasonCode::iter() {
            findings.insert(code, AtomicUsize::new(0));
        }

        FindingStats {
            findings,
            checked_hostnames: AtomicUsize::new(0),
            failed_hostnames: AtomicUsize::new(0),
        }
    }

    /// Increment the counter for a reason code.
    pub fn record_finding(&self, code: ReasonCode) {
        if let Some(counter) = self.findings.get(&code) {
            counter.fetch_add(1, Ordering::Relaxed);
        } else {
            log::error!(
                "Attempted to increment finding counter for {:?} which is not in the map. \
                 This indicates a bug in FindingStats initialization.",
                code
            );
        }
    }

    /// Count a hostname whose checks completed.
    pub fn record_checked(&self) {
        self.checked_hostnames.fetch_add(1, Ordering::Relaxed);
    }

    /// Count a hostname whose checks failed or timed out.
    pub fn record_failed(&self) {
        self.failed_hostnames.fetch_add(1, Ordering::Relaxed);
    }

    /// Get the count for a reason code.
    pub fn get_finding_count(&self, code: ReasonCode) -> usize {
        self.findings
            .get(&code)
            .map(|c| c.load(Ordering::SeqCst))
            .unwrap_or(0)
    }

    /// Number of hostnames checked without a hard failure.
    pub fn checked(&self) -> usize {
        self.checked_hostnames.load(Ordering::SeqCst)
    }

    /// Number of hostnames that failed.
    pub fn failed(&self) -> usize {
        self.failed_hostnames.load(Ordering::SeqCst)
    }

    /// Total number of vulnerable findings.
    pub fn total_vulnerable(&self) -> usize {
        ReasonCode::iter()
            .filter(ReasonCode::is_vulnerable)
            .map(|c| self.get_finding_count(c))
            .sum()
    }

    /// Logs a summary of the run (one line per non-zero reason code).
    pub fn log_summary(&self) {
        log::info!(
            "Checked {} hostname(s), {} failed, {} vulnerable finding(s)",
            self.checked(),
            self.failed(),
            self.total_vulnerable()
        );
        for code in ReasonCode::iter() {
            let count = self.get_finding_count(code);
            if count > 0 {
                log::info!("   {}: {}", code, count);
            }
        }
    }
}

impl Default for FindingStats {
    fn default() -> Self {
        Self::new()
    }
}
