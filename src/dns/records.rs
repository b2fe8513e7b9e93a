//! DNS record value types returned by the query adapter.

use std::fmt;
use std::net::{Ipv4Addr, Ipv6Addr};

use serde::Serialize;

/// Start-of-Authority record.
///
/// Equality is field-by-field; two nameservers serving the same zone data
/// produce equal values.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SoaRecord {
    /// Primary nameserver of the zone
    pub mname: String,
    /// Mailbox of the zone administrator
    pub rname: String,
    /// Zone serial number
    pub serial: u32,
    /// Refresh interval (seconds)
    pub refresh: i32,
    /// Retry interval (seconds)
    pub retry: i32,
    /// Expire limit (seconds)
    pub expire: i32,
    /// Negative-caching TTL (seconds)
    pub minimum: u32,
}

impl fmt::Display for SoaRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {} {} {} {}",
            self.mname, self.rname, self.serial, self.refresh, self.retry, self.expire, self.minimum
        )
    }
}

/// A single record from an ANY lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "UPPERCASE")]
pub enum DnsRecord {
    /// IPv4 address
    A(Ipv4Addr),
    /// IPv6 address
    Aaaa(Ipv6Addr),
    /// Nameserver host name
    Ns(String),
    /// Canonical name
    Cname(String),
    /// Start of authority
    Soa(SoaRecord),
    /// Mail exchanger (preference, host)
    Mx(u16, String),
    /// Text record (chunks joined)
    Txt(String),
    /// Any other record type, by mnemonic
    Other(String),
}

/// Strips the root label dot from a name returned by the resolver.
pub(crate) fn trim_root(name: &str) -> String {
    name.strip_suffix('.').unwrap_or(name).to_string()
}

/// Turns a host name into a fully-qualified query name so the resolver never
/// appends search domains.
pub(crate) fn to_fqdn(name: &str) -> String {
    if name.ends_with('.') {
        name.to_string()
    } else {
        format!("{name}.")
    }
}
