//! DNS resolver initialization.
//!
//! This module builds the resolver factory that hands out the main resolver
//! context and per-nameserver directed contexts.

use std::net::IpAddr;
use std::time::Duration;

use hickory_resolver::config::{NameServerConfigGroup, ResolverConfig};
use log::debug;

use crate::config::{Config, DNS_ATTEMPTS, DNS_PORT};
use crate::dns::HickoryDnsFactory;

/// Upstream configuration for the main resolver context.
///
/// An empty list selects hickory's built-in default upstreams; otherwise the
/// given resolvers are queried over UDP and TCP on port 53.
pub fn resolver_config(resolvers: &[IpAddr]) -> ResolverConfig {
    if resolvers.is_empty() {
        ResolverConfig::default()
    } else {
        ResolverConfig::from_parts(
            None,
            vec![],
            NameServerConfigGroup::from_ips_clear(resolvers, DNS_PORT, true),
        )
    }
}

/// Initializes the resolver factory used by the takeover checks.
///
/// The main context uses the configured upstreams with the configured query
/// timeout and `ndots = 0`, so host names are never suffixed with a local
/// search domain.
pub fn init_resolver_factory(config: &Config) -> HickoryDnsFactory {
    debug!(
        "Initializing resolver factory (upstreams: {:?}, timeout: {}s)",
        config.resolvers, config.dns_timeout_seconds
    );
    HickoryDnsFactory::new(
        resolver_config(&config.resolvers),
        Duration::from_secs(config.dns_timeout_seconds),
        DNS_ATTEMPTS,
    )
}
