//! CNAME third-party takeover check.

use log::{debug, warn};

use super::finding::{Finding, ReasonCode};
use super::hostname::normalize_hostname;
use super::signatures::signatures;
use crate::config::MAX_CNAME_CHAIN_DEPTH;
use crate::dns::{DnsContextFactory, DnsQuery};
use crate::error_handling::{DnsError, ProbeError, ScanError};
use crate::http::HttpGet;

/// Resolves the CNAME chain of `hostname`, hop by hop.
///
/// Stops at the first name without a CNAME, after `MAX_CNAME_CHAIN_DEPTH`
/// hops, or when a target repeats. A failure of the first lookup is
/// returned; later hops only end the chain unless the failure is a
/// transport error.
pub async fn resolve_cname_chain<C>(ctx: &C, hostname: &str) -> Result<Vec<String>, DnsError>
where
    C: DnsQuery + ?Sized,
{
    let mut chain: Vec<String> = Vec::new();
    let mut current = hostname.to_string();

    for depth in 0..MAX_CNAME_CHAIN_DEPTH {
        let targets = match ctx.resolve_cname(&current).await {
            Ok(targets) => targets,
            Err(e) if depth == 0 || !e.is_dns_semantic() => return Err(e),
            Err(e) => {
                debug!("CNAME chain of {hostname} ends at {current}: {e}");
                break;
            }
        };

        let mut next = None;
        for target in targets {
            let target = target.to_lowercase();
            if target == hostname || chain.contains(&target) {
                debug!("CNAME loop detected for {hostname} at {target}");
                continue;
            }
            chain.push(target.clone());
            next = Some(target);
        }
        match next {
            Some(target) => current = target,
            None => break,
        }
    }

    Ok(chain)
}

/// Probes every CNAME target that matches a service signature.
///
/// The first target reporting an unclaimed resource, or whose probe fails
/// because the target no longer resolves, decides the finding. Timeouts and
/// other transport failures are not decisive.
pub async fn check_cname_targets<H>(hostname: &str, targets: &[String], http: &H) -> Finding
where
    H: HttpGet + ?Sized,
{
    for target in targets {
        for signature in signatures().iter().filter(|s| s.matches_hostname(target)) {
            let url = signature.probe_url(target);
            debug!("Probing {url} for {} ({hostname})", signature.name);

            match http.get(&url).await {
                Ok(response) if signature.is_unconfigured_response(response.status, &response.body) => {
                    return Finding::new(
                        ReasonCode::CnamedToUnconfigured3rdPartySvc,
                        format!(
                            "{hostname} is a CNAME to {target} (unconfigured {})",
                            signature.name
                        ),
                    );
                }
                Ok(response) => {
                    debug!(
                        "{url} answered {} without the {} marker",
                        response.status, signature.name
                    );
                }
                Err(ProbeError::DnsResolution(detail)) => {
                    debug!("{url} does not resolve: {detail}");
                    return Finding::new(
                        ReasonCode::CnamedToNonExistDns3rdPartySvc,
                        format!(
                            "{hostname} is a CNAME to {target} (non-existant DNS for {})",
                            signature.name
                        ),
                    );
                }
                Err(e) => {
                    warn!("Probe of {url} for {hostname} was inconclusive: {e}");
                }
            }
        }
    }

    Finding::new(
        ReasonCode::CnameNotVulnerable,
        format!(
            "{hostname} is a CNAME to {} (no unclaimed third-party service found)",
            targets.join(", ")
        ),
    )
}

/// Resolves the CNAME chain of `hostname` and checks its targets against the
/// service signatures.
///
/// A host name without a CNAME (NXDOMAIN, NODATA, SERVFAIL, REFUSED or a
/// timeout on the lookup) is not vulnerable; only transport failures and
/// invalid host names are errors.
pub async fn check_cname_takeover<F, H>(
    hostname: &str,
    dns: &F,
    http: &H,
) -> Result<Finding, ScanError>
where
    F: DnsContextFactory,
    H: HttpGet + ?Sized,
{
    let hostname = normalize_hostname(hostname)?;
    let main = dns.main_context();

    let chain = match resolve_cname_chain(&main, &hostname).await {
        Ok(chain) => chain,
        Err(e @ DnsError::Transport(_)) => {
            return Err(ScanError::Dns {
                name: hostname,
                source: e,
            })
        }
        Err(e) => {
            debug!("CNAME lookup for {hostname} failed: {e}");
            Vec::new()
        }
    };

    if chain.is_empty() {
        return Ok(Finding::new(
            ReasonCode::HostnameHasNoCname,
            format!("{hostname} has no CNAME records"),
        ));
    }

    Ok(check_cname_targets(&hostname, &chain, http).await)
}
