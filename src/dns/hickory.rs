//! `hickory-resolver` backed implementation of the DNS capability.
//!
//! The main context wraps one shared resolver (its configuration is never
//! changed after construction). Every directed context builds a fresh
//! resolver pointed at a single nameserver address, so redirecting queries
//! for one check cannot leak into another check running concurrently.

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::time::Duration;

use async_trait::async_trait;
use hickory_resolver::config::{NameServerConfigGroup, ResolverConfig, ResolverOpts};
use hickory_resolver::error::{ResolveError, ResolveErrorKind};
use hickory_resolver::lookup::Lookup;
use hickory_resolver::proto::error::ProtoErrorKind;
use hickory_resolver::proto::op::ResponseCode;
use hickory_resolver::proto::rr::{RData, RecordType};
use hickory_resolver::TokioAsyncResolver;

use super::records::{to_fqdn, trim_root, DnsRecord, SoaRecord};
use super::{DnsContextFactory, DnsQuery};
use crate::config::DNS_PORT;
use crate::error_handling::DnsError;

/// Resolver options shared by the main and directed contexts.
pub(crate) fn resolver_opts(query_timeout: Duration, attempts: usize) -> ResolverOpts {
    let mut opts = ResolverOpts::default();
    opts.timeout = query_timeout;
    opts.attempts = attempts;
    // No search-domain appending; every query name is fully qualified anyway
    opts.ndots = 0;
    opts
}

/// Maps a response code carried by a "no records" answer onto the DNS taxonomy.
pub(crate) fn classify_response_code(code: ResponseCode) -> DnsError {
    match code {
        ResponseCode::NXDomain => DnsError::NxDomain,
        ResponseCode::NoError | ResponseCode::NXRRSet => DnsError::NoData,
        ResponseCode::ServFail => DnsError::ServFail,
        ResponseCode::Refused => DnsError::Refused,
        other => DnsError::Transport(format!("unexpected response code {other:?}")),
    }
}

/// Maps a hickory resolver error onto the DNS taxonomy.
///
/// Anything that is not an answer from a server (sockets, malformed
/// messages, no usable upstream) becomes `DnsError::Transport`.
pub(crate) fn classify_resolve_error(error: &ResolveError) -> DnsError {
    match error.kind() {
        ResolveErrorKind::NoRecordsFound { response_code, .. } => {
            classify_response_code(*response_code)
        }
        ResolveErrorKind::Timeout => DnsError::Timeout,
        ResolveErrorKind::Proto(proto) if matches!(proto.kind(), ProtoErrorKind::Timeout) => {
            DnsError::Timeout
        }
        _ => DnsError::Transport(error.to_string()),
    }
}

/// Builds resolver contexts backed by `hickory-resolver`.
#[derive(Clone)]
pub struct HickoryDnsFactory {
    main: TokioAsyncResolver,
    query_timeout: Duration,
    attempts: usize,
}

impl HickoryDnsFactory {
    /// Creates a factory whose main context uses `config`.
    pub fn new(config: ResolverConfig, query_timeout: Duration, attempts: usize) -> Self {
        let main = TokioAsyncResolver::tokio(config, resolver_opts(query_timeout, attempts));
        Self {
            main,
            query_timeout,
            attempts,
        }
    }
}

impl DnsContextFactory for HickoryDnsFactory {
    type Context = HickoryDnsContext;

    fn main_context(&self) -> HickoryDnsContext {
        HickoryDnsContext {
            resolver: self.main.clone(),
            query_timeout: self.query_timeout,
        }
    }

    fn directed_context(&self, nameserver: IpAddr) -> HickoryDnsContext {
        let group = NameServerConfigGroup::from_ips_clear(&[nameserver], DNS_PORT, true);
        let config = ResolverConfig::from_parts(None, vec![], group);
        let mut opts = resolver_opts(self.query_timeout, self.attempts);
        // Answers from one nameserver must not be mixed with cached answers
        opts.cache_size = 0;
        HickoryDnsContext {
            resolver: TokioAsyncResolver::tokio(config, opts),
            query_timeout: self.query_timeout,
        }
    }
}

/// One resolver context. Cheap to clone; clones share the same upstreams.
#[derive(Clone)]
pub struct HickoryDnsContext {
    resolver: TokioAsyncResolver,
    query_timeout: Duration,
}

impl HickoryDnsContext {
    async fn lookup(&self, name: &str, record_type: RecordType) -> Result<Lookup, DnsError> {
        let fqdn = to_fqdn(name);
        // Outer bound in case the resolver's own retries exceed the budget
        let budget = self.query_timeout.saturating_mul(2);
        match tokio::time::timeout(budget, self.resolver.lookup(fqdn.as_str(), record_type)).await
        {
            Ok(Ok(lookup)) => Ok(lookup),
            Ok(Err(e)) => {
                let classified = classify_resolve_error(&e);
                log::debug!("{record_type} lookup for {name} failed: {classified} ({e})");
                Err(classified)
            }
            Err(_) => {
                log::debug!("{record_type} lookup for {name} timed out");
                Err(DnsError::Timeout)
            }
        }
    }
}

fn convert_soa(soa: &hickory_resolver::proto::rr::rdata::SOA) -> SoaRecord {
    SoaRecord {
        mname: trim_root(&soa.mname().to_utf8()),
        rname: trim_root(&soa.rname().to_utf8()),
        serial: soa.serial(),
        refresh: soa.refresh(),
        retry: soa.retry(),
        expire: soa.expire(),
        minimum: soa.minimum(),
    }
}

fn convert_any(rdata: &RData) -> DnsRecord {
    match rdata {
        RData::A(a) => DnsRecord::A(a.0),
        RData::AAAA(aaaa) => DnsRecord::Aaaa(aaaa.0),
        RData::NS(ns) => DnsRecord::Ns(trim_root(&ns.to_utf8())),
        RData::CNAME(cname) => DnsRecord::Cname(trim_root(&cname.to_utf8())),
        RData::SOA(soa) => DnsRecord::Soa(convert_soa(soa)),
        RData::MX(mx) => DnsRecord::Mx(mx.preference(), trim_root(&mx.exchange().to_utf8())),
        RData::TXT(txt) => DnsRecord::Txt(
            txt.iter()
                .map(|bytes| String::from_utf8_lossy(bytes).to_string())
                .collect::<Vec<String>>()
                .join(""),
        ),
        other => DnsRecord::Other(other.record_type().to_string()),
    }
}

#[async_trait]
impl DnsQuery for HickoryDnsContext {
    async fn resolve_ns(&self, name: &str) -> Result<Vec<String>, DnsError> {
        let lookup = self.lookup(name, RecordType::NS).await?;
        Ok(lookup
            .iter()
            .filter_map(|rdata| match rdata {
                RData::NS(ns) => Some(trim_root(&ns.to_utf8())),
                _ => None,
            })
            .collect())
    }

    async fn resolve_soa(&self, name: &str) -> Result<SoaRecord, DnsError> {
        let lookup = self.lookup(name, RecordType::SOA).await?;
        lookup
            .iter()
            .find_map(|rdata| match rdata {
                RData::SOA(soa) => Some(convert_soa(soa)),
                _ => None,
            })
            .ok_or(DnsError::NoData)
    }

    async fn resolve_a(&self, name: &str) -> Result<Vec<Ipv4Addr>, DnsError> {
        let lookup = self.lookup(name, RecordType::A).await?;
        Ok(lookup
            .iter()
            .filter_map(|rdata| match rdata {
                RData::A(a) => Some(a.0),
                _ => None,
            })
            .collect())
    }

    async fn resolve_aaaa(&self, name: &str) -> Result<Vec<Ipv6Addr>, DnsError> {
        let lookup = self.lookup(name, RecordType::AAAA).await?;
        Ok(lookup
            .iter()
            .filter_map(|rdata| match rdata {
                RData::AAAA(aaaa) => Some(aaaa.0),
                _ => None,
            })
            .collect())
    }

    async fn resolve_cname(&self, name: &str) -> Result<Vec<String>, DnsError> {
        let lookup = self.lookup(name, RecordType::CNAME).await?;
        Ok(lookup
            .iter()
            .filter_map(|rdata| match rdata {
                RData::CNAME(cname) => Some(trim_root(&cname.to_utf8())),
                _ => None,
            })
            .collect())
    }

    async fn resolve_any(&self, name: &str) -> Result<Vec<DnsRecord>, DnsError> {
        let lookup = self.lookup(name, RecordType::ANY).await?;
        Ok(lookup.iter().map(convert_any).collect())
    }
}
