//! Host name discovery.
//!
//! This module provides the inputs of a scan:
//! - Certificate-transparency feed fetch, certificate extraction and SAN parsing
//! - Wildcard expansion with a static list of common subdomain prefixes
//! - Regular-expression scope filtering
//! - Shared-nameserver domain lookup
//! - Host name lists from files or stdin

mod certificates;
mod filter;
mod input;
mod sources;
mod wordlist;

// Re-export public API
pub use certificates::{certificates_from_feed, rss_url_from_hostname, sans_from_certificates};
pub use filter::{expand_wildcards, filter_hostnames};
pub use input::{expand_stdin_values, read_hostnames, split_hostnames};
pub use sources::{
    discover_hostnames, discover_shared_domains, domain_names_from_nameserver,
    hostnames_from_ct_logs,
};
pub use wordlist::SUBDOMAIN_PREFIXES;
