//! DNS query capability.
//!
//! This module provides the DNS operations the takeover checks rely on:
//! - NS, SOA, A, AAAA, CNAME and ANY lookups
//! - Independent resolver contexts, including contexts directed at a single
//!   nameserver address
//! - A `hickory-resolver` backed implementation
//!
//! Failures are reported through [`DnsError`] so the checks can branch on
//! NXDOMAIN, SERVFAIL, NODATA, REFUSED and timeouts.

mod hickory;
mod records;

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

use async_trait::async_trait;

use crate::error_handling::DnsError;

// Re-export public API
pub use hickory::{HickoryDnsContext, HickoryDnsFactory};
pub use records::{DnsRecord, SoaRecord};

/// Lookups against one resolver context.
#[async_trait]
pub trait DnsQuery: Send + Sync {
    /// Nameserver host names delegated for `name`.
    async fn resolve_ns(&self, name: &str) -> Result<Vec<String>, DnsError>;

    /// SOA record of the zone at `name`.
    async fn resolve_soa(&self, name: &str) -> Result<SoaRecord, DnsError>;

    /// IPv4 addresses of `name`.
    async fn resolve_a(&self, name: &str) -> Result<Vec<Ipv4Addr>, DnsError>;

    /// IPv6 addresses of `name`.
    async fn resolve_aaaa(&self, name: &str) -> Result<Vec<Ipv6Addr>, DnsError>;

    /// Canonical-name targets of `name`.
    async fn resolve_cname(&self, name: &str) -> Result<Vec<String>, DnsError>;

    /// All records of `name`. Many servers answer REFUSED.
    async fn resolve_any(&self, name: &str) -> Result<Vec<DnsRecord>, DnsError>;
}

/// Hands out independent resolver contexts.
///
/// A directed context sends every query to one nameserver and shares no
/// configuration with any other context.
pub trait DnsContextFactory: Send + Sync {
    /// Context type produced by this factory.
    type Context: DnsQuery;

    /// Context using the configured upstream resolvers.
    fn main_context(&self) -> Self::Context;

    /// Fresh context that queries only `nameserver`.
    fn directed_context(&self, nameserver: IpAddr) -> Self::Context;
}
