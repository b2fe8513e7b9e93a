//! The batch report: host name to findings.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::takeover::Finding;

/// Findings of a batch scan keyed by host name.
///
/// Without `verbose`, only vulnerable findings are kept and host names that
/// end up with none are left out of the report.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ScanReport {
    findings: BTreeMap<String, Vec<Finding>>,
    #[serde(skip)]
    verbose: bool,
}

impl ScanReport {
    /// Creates an empty report.
    pub fn new(verbose: bool) -> Self {
        Self {
            findings: BTreeMap::new(),
            verbose,
        }
    }

    /// Records the findings of one host name.
    ///
    /// Findings for a host name that is already present are appended.
    pub fn insert(&mut self, hostname: impl Into<String>, findings: Vec<Finding>) {
        let kept: Vec<Finding> = if self.verbose {
            findings
        } else {
            findings.into_iter().filter(Finding::vulnerable).collect()
        };
        if kept.is_empty() && !self.verbose {
            return;
        }
        self.findings.entry(hostname.into()).or_default().extend(kept);
    }

    /// Findings recorded for `hostname`, if any.
    pub fn get(&self, hostname: &str) -> Option<&[Finding]> {
        self.findings.get(hostname).map(Vec::as_slice)
    }

    /// Iterates host names and their findings in host name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Finding])> {
        self.findings
            .iter()
            .map(|(hostname, findings)| (hostname.as_str(), findings.as_slice()))
    }

    /// Number of host names in the report.
    pub fn len(&self) -> usize {
        self.findings.len()
    }

    /// Whether the report has no host names.
    pub fn is_empty(&self) -> bool {
        self.findings.is_empty()
    }

    /// Total number of vulnerable findings across all host names.
    pub fn vulnerable_count(&self) -> usize {
        self.findings
            .values()
            .flatten()
            .filter(|finding| finding.vulnerable())
            .count()
    }
}
