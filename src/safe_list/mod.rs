//! Safe-nameserver allow-list.
//!
//! Operators list IP ranges of nameservers they own. When a delegation points
//! at an IP-literal nameserver that does not resolve, membership in this list
//! turns the finding into a not-vulnerable one.
//!
//! The file format is YAML (or JSON, which YAML accepts):
//!
//! ```yaml
//! ipv4:
//!   - 192.0.2.0/24
//!   - 198.51.100.7
//! ipv6:
//!   - 2001:db8::/32
//! ```

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::path::Path;

use ipnet::{IpNet, Ipv4Net, Ipv6Net};
use serde::Deserialize;

use crate::error_handling::SafeListError;

/// Raw file contents before validation.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct SafeListFile {
    #[serde(default)]
    ipv4: Vec<String>,
    #[serde(default)]
    ipv6: Vec<String>,
}

/// Validated allow-list of IPv4 and IPv6 ranges.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SafeNameserverList {
    ipv4: Vec<Ipv4Net>,
    ipv6: Vec<Ipv6Net>,
}

/// Parses a bare IP address or a CIDR range.
///
/// A bare address becomes a single-host range (`/32` or `/128`).
pub fn parse_entry(entry: &str) -> Result<IpNet, SafeListError> {
    let trimmed = entry.trim();
    if let Ok(ip) = trimmed.parse::<IpAddr>() {
        return Ok(IpNet::from(ip));
    }
    trimmed
        .parse::<IpNet>()
        .map_err(|e| SafeListError::InvalidEntry {
            entry: entry.to_string(),
            reason: e.to_string(),
        })
}

/// Returns whether `ip` is covered by `entry` (bare IP or CIDR).
///
/// An address never matches an entry of the other family.
pub fn ip_in_range(ip: IpAddr, entry: &str) -> Result<bool, SafeListError> {
    let net = parse_entry(entry)?;
    Ok(match (ip, net) {
        (IpAddr::V4(addr), IpNet::V4(net)) => net.contains(&addr),
        (IpAddr::V6(addr), IpNet::V6(net)) => net.contains(&addr),
        _ => false,
    })
}

impl SafeNameserverList {
    /// Builds a list from textual entries, rejecting malformed entries and
    /// entries of the wrong family.
    pub fn from_entries<S: AsRef<str>>(ipv4: &[S], ipv6: &[S]) -> Result<Self, SafeListError> {
        let mut list = SafeNameserverList::default();
        for entry in ipv4 {
            match parse_entry(entry.as_ref())? {
                IpNet::V4(net) => list.ipv4.push(net),
                IpNet::V6(_) => {
                    return Err(SafeListError::WrongFamily {
                        entry: entry.as_ref().to_string(),
                        expected: "IPv4",
                    })
                }
            }
        }
        for entry in ipv6 {
            match parse_entry(entry.as_ref())? {
                IpNet::V6(net) => list.ipv6.push(net),
                IpNet::V4(_) => {
                    return Err(SafeListError::WrongFamily {
                        entry: entry.as_ref().to_string(),
                        expected: "IPv6",
                    })
                }
            }
        }
        Ok(list)
    }

    /// Parses YAML or JSON text.
    pub fn from_yaml_str(text: &str, origin: &str) -> Result<Self, SafeListError> {
        let raw: SafeListFile =
            serde_yaml::from_str(text).map_err(|source| SafeListError::Parse {
                path: origin.to_string(),
                source,
            })?;
        Self::from_entries(&raw.ipv4, &raw.ipv6)
    }

    /// Loads and validates an allow-list file.
    pub fn load(path: &Path) -> Result<Self, SafeListError> {
        let display = path.display().to_string();
        let text = std::fs::read_to_string(path).map_err(|source| SafeListError::Io {
            path: display.clone(),
            source,
        })?;
        let list = Self::from_yaml_str(&text, &display)?;
        log::info!(
            "Loaded safe-nameserver list from {}: {} IPv4 and {} IPv6 entries",
            display,
            list.ipv4.len(),
            list.ipv6.len()
        );
        Ok(list)
    }

    /// Whether an IPv4 address is covered by the IPv4 list.
    pub fn covers_v4(&self, addr: Ipv4Addr) -> bool {
        self.ipv4.iter().any(|net| net.contains(&addr))
    }

    /// Whether an IPv6 address is covered by the IPv6 list.
    pub fn covers_v6(&self, addr: Ipv6Addr) -> bool {
        self.ipv6.iter().any(|net| net.contains(&addr))
    }

    /// Family-aware membership test.
    pub fn covers(&self, ip: IpAddr) -> bool {
        match ip {
            IpAddr::V4(addr) => self.covers_v4(addr),
            IpAddr::V6(addr) => self.covers_v6(addr),
        }
    }

    /// True when both lists are empty.
    pub fn is_empty(&self) -> bool {
        self.ipv4.is_empty() && self.ipv6.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn ip(s: &str) -> IpAddr {
        s.parse().unwrap()
    }

    #[test]
    fn test_bare_ip_matches_exactly() {
        assert!(ip_in_range(ip("192.0.2.10"), "192.0.2.10").unwrap());
        assert!(!ip_in_range(ip("192.0.2.11"), "192.0.2.10").unwrap());
    }

    #[test]
    fn test_cidr_membership() {
        assert!(ip_in_range(ip("10.1.2.3"), "10.0.0.0/8").unwrap());
        assert!(!ip_in_range(ip("11.0.0.1"), "10.0.0.0/8").unwrap());
        assert!(ip_in_range(ip("2001:db8::53"), "2001:db8::/32").unwrap());
        assert!(!ip_in_range(ip("2001:db9::53"), "2001:db8::/32").unwrap());
    }

    #[test]
    fn test_families_never_cross() {
        assert!(!ip_in_range(ip("192.0.2.1"), "::/0").unwrap());
        assert!(!ip_in_range(ip("::ffff:192.0.2.1"), "0.0.0.0/0").unwrap());
    }

    #[test]
    fn test_malformed_entry_rejected() {
        assert!(matches!(
            ip_in_range(ip("192.0.2.1"), "not-an-ip"),
            Err(SafeListError::InvalidEntry { .. })
        ));
        assert!(parse_entry("10.0.0.0/33").is_err());
    }

    #[test]
    fn test_wrong_family_entry_rejected() {
        let result = SafeNameserverList::from_entries(&["2001:db8::/32"], &[]);
        assert!(matches!(result, Err(SafeListError::WrongFamily { .. })));
    }

    #[test]
    fn test_list_covers() {
        let list =
            SafeNameserverList::from_entries(&["192.0.2.0/24", "198.51.100.7"], &["2001:db8::/32"])
                .unwrap();
        assert!(list.covers(ip("192.0.2.200")));
        assert!(list.covers(ip("198.51.100.7")));
        assert!(!list.covers(ip("198.51.100.8")));
        assert!(list.covers(ip("2001:db8:1::1")));
        assert!(!list.covers(ip("2001:db9::1")));
        assert!(!list.is_empty());
        assert!(SafeNameserverList::default().is_empty());
    }

    #[test]
    fn test_load_yaml_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "ipv4:\n  - 192.0.2.0/24\nipv6:\n  - 2001:db8::/32").unwrap();
        let list = SafeNameserverList::load(file.path()).unwrap();
        assert!(list.covers_v4("192.0.2.1".parse().unwrap()));
        assert!(list.covers_v6("2001:db8::1".parse().unwrap()));
    }

    #[test]
    fn test_load_json_file_with_missing_family() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"ipv4": ["203.0.113.0/24"]}}"#).unwrap();
        let list = SafeNameserverList::load(file.path()).unwrap();
        assert!(list.covers_v4("203.0.113.9".parse().unwrap()));
        assert!(!list.covers_v6("2001:db8::1".parse().unwrap()));
    }

    #[test]
    fn test_load_rejects_unknown_keys_and_missing_files() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "ipv5:\n  - 1.2.3.4").unwrap();
        assert!(matches!(
            SafeNameserverList::load(file.path()),
            Err(SafeListError::Parse { .. })
        ));
        assert!(matches!(
            SafeNameserverList::load(Path::new("/nonexistent/safe.yaml")),
            Err(SafeListError::Io { .. })
        ));
    }
}
