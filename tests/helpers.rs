// Shared test helpers: an in-memory DNS and HTTP oracle.
//
// Tests describe a zone with the builder methods below and hand the fakes to
// the checks in place of the hickory and reqwest implementations.

#![allow(dead_code)] // Not every test file uses every helper

use async_trait::async_trait;
use std::collections::HashMap;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use subdomain_scanner::dns::{DnsContextFactory, DnsQuery, DnsRecord, SoaRecord};
use subdomain_scanner::http::{HttpGet, HttpResponse};
use subdomain_scanner::{DnsError, ProbeError};

/// Builds an SOA record with the given primary nameserver and serial.
pub fn soa(mname: &str, serial: u32) -> SoaRecord {
    SoaRecord {
        mname: mname.to_string(),
        rname: format!("hostmaster.{mname}"),
        serial,
        refresh: 7200,
        retry: 3600,
        expire: 1_209_600,
        minimum: 300,
    }
}

/// DNS answers. SOA answers are keyed by the upstream they come from; `None`
/// is the main resolver context. Names without an entry answer NXDOMAIN.
#[derive(Default, Clone)]
pub struct Zone {
    ns: HashMap<String, Result<Vec<String>, DnsError>>,
    soa: HashMap<(Option<IpAddr>, String), Result<SoaRecord, DnsError>>,
    a: HashMap<String, Result<Vec<Ipv4Addr>, DnsError>>,
    aaaa: HashMap<String, Result<Vec<Ipv6Addr>, DnsError>>,
    cname: HashMap<String, Result<Vec<String>, DnsError>>,
}

impl Zone {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ns(mut self, name: &str, nameservers: &[&str]) -> Self {
        self.ns.insert(
            name.to_string(),
            Ok(nameservers.iter().map(|ns| ns.to_string()).collect()),
        );
        self
    }

    pub fn ns_error(mut self, name: &str, error: DnsError) -> Self {
        self.ns.insert(name.to_string(), Err(error));
        self
    }

    pub fn a(mut self, name: &str, address: Ipv4Addr) -> Self {
        self.a.insert(name.to_string(), Ok(vec![address]));
        self
    }

    pub fn a_error(mut self, name: &str, error: DnsError) -> Self {
        self.a.insert(name.to_string(), Err(error));
        self
    }

    pub fn aaaa(mut self, name: &str, address: Ipv6Addr) -> Self {
        self.aaaa.insert(name.to_string(), Ok(vec![address]));
        self
    }

    /// SOA served by the main resolver context.
    pub fn soa(mut self, name: &str, record: SoaRecord) -> Self {
        self.soa.insert((None, name.to_string()), Ok(record));
        self
    }

    /// Error answered by the main resolver context for an SOA query.
    pub fn soa_error(mut self, name: &str, error: DnsError) -> Self {
        self.soa.insert((None, name.to_string()), Err(error));
        self
    }

    /// SOA served by the nameserver at `upstream` when queried directly.
    pub fn soa_at(mut self, upstream: IpAddr, name: &str, record: SoaRecord) -> Self {
        self.soa.insert((Some(upstream), name.to_string()), Ok(record));
        self
    }

    pub fn soa_error_at(mut self, upstream: IpAddr, name: &str, error: DnsError) -> Self {
        self.soa.insert((Some(upstream), name.to_string()), Err(error));
        self
    }

    pub fn cname(mut self, name: &str, target: &str) -> Self {
        self.cname
            .insert(name.to_string(), Ok(vec![target.to_string()]));
        self
    }

    pub fn cname_error(mut self, name: &str, error: DnsError) -> Self {
        self.cname.insert(name.to_string(), Err(error));
        self
    }
}

fn answer<T: Clone>(map: &HashMap<String, Result<T, DnsError>>, name: &str) -> Result<T, DnsError> {
    map.get(name).cloned().unwrap_or(Err(DnsError::NxDomain))
}

/// Resolver factory over a [`Zone`].
///
/// Records every directed context it hands out and, with a delay, the peak
/// number of NS lookups in flight.
#[derive(Clone)]
pub struct FakeDns {
    zone: Arc<Zone>,
    delay: Option<Duration>,
    pub directed: Arc<Mutex<Vec<IpAddr>>>,
    in_flight: Arc<AtomicUsize>,
    pub max_in_flight: Arc<AtomicUsize>,
}

impl FakeDns {
    pub fn new(zone: Zone) -> Self {
        Self {
            zone: Arc::new(zone),
            delay: None,
            directed: Arc::new(Mutex::new(Vec::new())),
            in_flight: Arc::new(AtomicUsize::new(0)),
            max_in_flight: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Makes every NS lookup take `delay`.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn directed_upstreams(&self) -> Vec<IpAddr> {
        self.directed.lock().unwrap().clone()
    }

    fn context(&self, upstream: Option<IpAddr>) -> FakeContext {
        FakeContext {
            zone: Arc::clone(&self.zone),
            upstream,
            delay: self.delay,
            in_flight: Arc::clone(&self.in_flight),
            max_in_flight: Arc::clone(&self.max_in_flight),
        }
    }
}

impl DnsContextFactory for FakeDns {
    type Context = FakeContext;

    fn main_context(&self) -> FakeContext {
        self.context(None)
    }

    fn directed_context(&self, nameserver: IpAddr) -> FakeContext {
        self.directed.lock().unwrap().push(nameserver);
        self.context(Some(nameserver))
    }
}

pub struct FakeContext {
    zone: Arc<Zone>,
    upstream: Option<IpAddr>,
    delay: Option<Duration>,
    in_flight: Arc<AtomicUsize>,
    max_in_flight: Arc<AtomicUsize>,
}

#[async_trait]
impl DnsQuery for FakeContext {
    async fn resolve_ns(&self, name: &str) -> Result<Vec<String>, DnsError> {
        if let Some(delay) = self.delay {
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.max_in_flight.fetch_max(now, Ordering::SeqCst);
            tokio::time::sleep(delay).await;
            self.in_flight.fetch_sub(1, Ordering::SeqCst);
        }
        answer(&self.zone.ns, name)
    }

    async fn resolve_soa(&self, name: &str) -> Result<SoaRecord, DnsError> {
        self.zone
            .soa
            .get(&(self.upstream, name.to_string()))
            .cloned()
            .unwrap_or(Err(DnsError::NxDomain))
    }

    async fn resolve_a(&self, name: &str) -> Result<Vec<Ipv4Addr>, DnsError> {
        answer(&self.zone.a, name)
    }

    async fn resolve_aaaa(&self, name: &str) -> Result<Vec<Ipv6Addr>, DnsError> {
        answer(&self.zone.aaaa, name)
    }

    async fn resolve_cname(&self, name: &str) -> Result<Vec<String>, DnsError> {
        answer(&self.zone.cname, name)
    }

    async fn resolve_any(&self, _name: &str) -> Result<Vec<DnsRecord>, DnsError> {
        Err(DnsError::Refused)
    }
}

/// HTTP oracle keyed by URL. Unknown URLs fail with a transport error.
#[derive(Default, Clone)]
pub struct FakeHttp {
    responses: HashMap<String, Result<HttpResponse, ProbeError>>,
    pub requested: Arc<Mutex<Vec<String>>>,
}

impl FakeHttp {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(mut self, url: &str, status: u16, body: &str) -> Self {
        self.responses.insert(
            url.to_string(),
            Ok(HttpResponse {
                status,
                body: body.to_string(),
            }),
        );
        self
    }

    pub fn fail(mut self, url: &str, error: ProbeError) -> Self {
        self.responses.insert(url.to_string(), Err(error));
        self
    }

    pub fn requested_urls(&self) -> Vec<String> {
        self.requested.lock().unwrap().clone()
    }
}

#[async_trait]
impl HttpGet for FakeHttp {
    async fn get(&self, url: &str) -> Result<HttpResponse, ProbeError> {
        self.requested.lock().unwrap().push(url.to_string());
        self.responses
            .get(url)
            .cloned()
            .unwrap_or_else(|| Err(ProbeError::Transport(format!("no route to {url}"))))
    }
}

/// A zone where `hostname` is delegated to one healthy nameserver.
pub fn healthy_delegation(hostname: &str, nameserver: &str, address: Ipv4Addr) -> Zone {
    let record = soa(nameserver, 2024010101);
    Zone::new()
        .ns(hostname, &[nameserver])
        .a(nameserver, address)
        .soa(hostname, record.clone())
        .soa_at(IpAddr::V4(address), hostname, record)
}
