//! Orphaned-delegation check.
//!
//! Walks a host name's NS delegation and asks every delegated nameserver
//! directly for the zone's SOA. The first decisive nameserver outcome ends
//! the check.

use std::net::IpAddr;
use std::ops::ControlFlow;

use log::debug;

use super::finding::{Finding, ReasonCode};
use super::hostname::normalize_hostname;
use crate::dns::{DnsContextFactory, DnsQuery, SoaRecord};
use crate::error_handling::{DnsError, ScanError};
use crate::safe_list::SafeNameserverList;

/// Classifies the NS delegation of `hostname`.
///
/// Only transport failures (see [`DnsError::is_dns_semantic`]) and invalid
/// host names are returned as errors; every DNS answer maps to a finding.
pub async fn check_orphaned_delegation<F>(
    hostname: &str,
    dns: &F,
    safe_nameservers: Option<&SafeNameserverList>,
) -> Result<Finding, ScanError>
where
    F: DnsContextFactory,
{
    let hostname = normalize_hostname(hostname)?;
    let mut check = DelegationCheck {
        main: dns.main_context(),
        dns,
        safe_nameservers,
        main_soa: None,
        hostname,
    };
    check.run().await
}

struct DelegationCheck<'a, F: DnsContextFactory> {
    hostname: String,
    dns: &'a F,
    main: F::Context,
    safe_nameservers: Option<&'a SafeNameserverList>,
    // Fetched from the main context on first need
    main_soa: Option<SoaRecord>,
}

impl<F: DnsContextFactory> DelegationCheck<'_, F> {
    async fn run(&mut self) -> Result<Finding, ScanError> {
        let nameservers = match self.main.resolve_ns(&self.hostname).await {
            Ok(nameservers) => nameservers,
            Err(e) => return self.ns_lookup_failure(e),
        };
        if nameservers.is_empty() {
            return Ok(self.not_delegated());
        }
        debug!(
            "{} is delegated to {} nameserver(s): {}",
            self.hostname,
            nameservers.len(),
            nameservers.join(", ")
        );

        for nameserver in &nameservers {
            if let ControlFlow::Break(finding) = self.check_nameserver(nameserver).await? {
                return Ok(finding);
            }
        }

        Ok(Finding::new(
            ReasonCode::HostnameNotVulnerable,
            format!(
                "All nameservers for {} serve a matching SOA record",
                self.hostname
            ),
        ))
    }

    fn not_delegated(&self) -> Finding {
        Finding::new(
            ReasonCode::HostnameNotDelegated,
            format!("{} is not delegated", self.hostname),
        )
    }

    fn ns_lookup_failure(&self, error: DnsError) -> Result<Finding, ScanError> {
        let finding = match error {
            DnsError::NxDomain => self.not_delegated(),
            DnsError::ServFail | DnsError::Refused | DnsError::Timeout => Finding::new(
                ReasonCode::HostnameNsServfail,
                format!("No nameservers found in DNS for {}", self.hostname),
            ),
            DnsError::NoData => self.no_ns_records(),
            DnsError::Transport(_) => return Err(self.hard_error(error)),
        };
        Ok(finding)
    }

    fn no_ns_records(&self) -> Finding {
        Finding::new(
            ReasonCode::HostnameHasNoNs,
            format!("{} has no NS records", self.hostname),
        )
    }

    fn hard_error(&self, source: DnsError) -> ScanError {
        ScanError::Dns {
            name: self.hostname.clone(),
            source,
        }
    }

    async fn check_nameserver(&mut self, nameserver: &str) -> Result<ControlFlow<Finding>, ScanError> {
        let Some(address) = self.nameserver_address(nameserver).await? else {
            return Ok(ControlFlow::Break(self.unresolvable_nameserver(nameserver)));
        };
        debug!("Querying {nameserver} ({address}) for the SOA of {}", self.hostname);

        // Fresh context per nameserver; the main context is never repointed
        let directed = self.dns.directed_context(address);
        let candidate = match directed.resolve_soa(&self.hostname).await {
            Ok(soa) => soa,
            Err(DnsError::NxDomain) => {
                return Ok(ControlFlow::Break(Finding::new(
                    ReasonCode::NsHasNoSoa,
                    format!(
                        "Nameserver {nameserver} has no SOA record for {}",
                        self.hostname
                    ),
                )))
            }
            Err(DnsError::ServFail | DnsError::Timeout) => {
                return Ok(ControlFlow::Break(Finding::new(
                    ReasonCode::NsHasNoRecords,
                    format!(
                        "Nameserver {nameserver} has no records for {}",
                        self.hostname
                    ),
                )))
            }
            Err(e @ (DnsError::Refused | DnsError::NoData)) => {
                debug!(
                    "Nameserver {nameserver} answered {e} for the SOA of {}, not decisive",
                    self.hostname
                );
                return Ok(ControlFlow::Continue(()));
            }
            Err(e @ DnsError::Transport(_)) => return Err(self.hard_error(e)),
        };

        let expected = match self.expected_soa().await? {
            ControlFlow::Continue(soa) => soa,
            ControlFlow::Break(finding) => return Ok(ControlFlow::Break(finding)),
        };
        if candidate != expected {
            debug!(
                "SOA mismatch for {} at {nameserver}: expected [{expected}], got [{candidate}]",
                self.hostname
            );
            return Ok(ControlFlow::Break(Finding::new(
                ReasonCode::NsHasMismatchedSoa,
                format!(
                    "Nameserver {nameserver} has a mismatched (versus other nameservers) SOA record for {}",
                    self.hostname
                ),
            )));
        }
        Ok(ControlFlow::Continue(()))
    }

    /// First address of a nameserver host name via the main context; AAAA is
    /// tried when there is no A record. `None` means it does not resolve.
    async fn nameserver_address(&self, nameserver: &str) -> Result<Option<IpAddr>, ScanError> {
        match self.main.resolve_a(nameserver).await {
            Ok(addrs) if !addrs.is_empty() => return Ok(Some(IpAddr::V4(addrs[0]))),
            Ok(_) | Err(DnsError::NoData) => {}
            Err(e @ DnsError::Transport(_)) => return Err(self.hard_error(e)),
            Err(e) => {
                debug!("Nameserver {nameserver} does not resolve: {e}");
                return Ok(None);
            }
        }
        match self.main.resolve_aaaa(nameserver).await {
            Ok(addrs) => Ok(addrs.first().map(|addr| IpAddr::V6(*addr))),
            Err(e @ DnsError::Transport(_)) => Err(self.hard_error(e)),
            Err(e) => {
                debug!("Nameserver {nameserver} has no IPv6 address either: {e}");
                Ok(None)
            }
        }
    }

    fn unresolvable_nameserver(&self, nameserver: &str) -> Finding {
        let literal = nameserver.strip_suffix('.').unwrap_or(nameserver);
        match literal.parse::<IpAddr>() {
            Ok(IpAddr::V4(addr)) if self.safe_nameservers.is_some_and(|l| l.covers_v4(addr)) => {
                Finding::new(
                    ReasonCode::IpNsOnV4SafeList,
                    format!(
                        "{} is delegated to IP-based nameserver but it's on the IPv4 safe list",
                        self.hostname
                    ),
                )
            }
            Ok(IpAddr::V6(addr)) if self.safe_nameservers.is_some_and(|l| l.covers_v6(addr)) => {
                Finding::new(
                    ReasonCode::IpNsOnV6SafeList,
                    format!(
                        "{} is delegated to IP-based nameserver but it's on the IPv6 safe list",
                        self.hostname
                    ),
                )
            }
            Ok(_) => Finding::new(
                ReasonCode::IpNsDoesntResolve,
                format!("Nameserver {nameserver} (IP address) does not resolve"),
            ),
            Err(_) => Finding::new(
                ReasonCode::NsDoesntResolve,
                format!("Nameserver {nameserver} does not resolve"),
            ),
        }
    }

    /// SOA from the main context. A failed lookup ends the check with the
    /// top-level finding for that failure.
    async fn expected_soa(&mut self) -> Result<ControlFlow<Finding, SoaRecord>, ScanError> {
        if let Some(soa) = &self.main_soa {
            return Ok(ControlFlow::Continue(soa.clone()));
        }
        match self.main.resolve_soa(&self.hostname).await {
            Ok(soa) => {
                self.main_soa = Some(soa.clone());
                Ok(ControlFlow::Continue(soa))
            }
            Err(DnsError::NxDomain) => Ok(ControlFlow::Break(Finding::new(
                ReasonCode::HostnameIsNxdomain,
                format!("{} has no DNS records (NXDOMAIN)", self.hostname),
            ))),
            Err(DnsError::NoData) => Ok(ControlFlow::Break(self.no_ns_records())),
            Err(DnsError::ServFail | DnsError::Refused | DnsError::Timeout) => {
                Ok(ControlFlow::Break(Finding::new(
                    ReasonCode::HostnameNsServfail,
                    format!("No nameservers found in DNS for {}", self.hostname),
                )))
            }
            Err(e @ DnsError::Transport(_)) => Err(self.hard_error(e)),
        }
    }
}
