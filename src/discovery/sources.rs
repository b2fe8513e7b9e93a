//! Remote discovery sources: certificate transparency and shared nameservers.

use std::collections::HashSet;

use log::{debug, info, warn};
use regex::Regex;
use tokio_retry::RetryIf;

use super::certificates::{certificates_from_feed, rss_url_from_hostname, sans_from_certificates};
use super::filter::{expand_wildcards, filter_hostnames};
use crate::config::SHARED_DNS_NO_RESULTS_BODY;
use crate::error_handling::{get_retry_strategy, DiscoveryError};
use crate::http::{HttpGet, HttpResponse};

/// GET `url` expecting a 200, retrying transient failures with backoff.
async fn fetch_ok<H>(http: &H, url: &str) -> Result<String, DiscoveryError>
where
    H: HttpGet + ?Sized,
{
    let response: HttpResponse = RetryIf::start(
        get_retry_strategy(),
        move || async move {
            let response = http
                .get(url)
                .await
                .map_err(|source| DiscoveryError::Request {
                    url: url.to_string(),
                    source,
                })?;
            if response.status != 200 {
                return Err(DiscoveryError::UnexpectedStatus {
                    url: url.to_string(),
                    status: response.status,
                });
            }
            Ok(response)
        },
        |e: &DiscoveryError| {
            let retry = e.is_retriable();
            if retry {
                debug!("Retrying after: {e}");
            }
            retry
        },
    )
    .await?;
    Ok(response.body)
}

/// Host names found in certificate-transparency logs for `domain`.
///
/// Fetches the feed, extracts the SANs of every certificate and expands
/// wildcard names with the common prefix list.
pub async fn hostnames_from_ct_logs<H>(
    http: &H,
    url_prefix: &str,
    domain: &str,
    bruteforce: bool,
) -> Result<Vec<String>, DiscoveryError>
where
    H: HttpGet + ?Sized,
{
    let url = rss_url_from_hostname(url_prefix, domain);
    let feed = fetch_ok(http, &url).await?;
    let certificates = certificates_from_feed(&feed);
    let sans = sans_from_certificates(&certificates);
    let hostnames = expand_wildcards(&sans, bruteforce);
    info!(
        "CT logs for {domain}: {} certificate(s), {} SAN(s), {} host name(s)",
        certificates.len(),
        sans.len(),
        hostnames.len()
    );
    Ok(hostnames)
}

/// Domain names served by `nameserver`, via the shared-nameserver API.
///
/// An unknown nameserver yields an empty list; any status other than 200 is
/// an error.
pub async fn domain_names_from_nameserver<H>(
    http: &H,
    api_prefix: &str,
    nameserver: &str,
) -> Result<Vec<String>, DiscoveryError>
where
    H: HttpGet + ?Sized,
{
    let url = format!("{api_prefix}{}", urlencoding::encode(nameserver.trim()));
    let body = fetch_ok(http, &url).await?;
    let body = body.trim();
    if body == SHARED_DNS_NO_RESULTS_BODY {
        debug!("No domains found for nameserver {nameserver}");
        return Ok(Vec::new());
    }
    Ok(body
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}

/// Host names for every seed domain, deduplicated and scope-filtered.
///
/// A domain whose feed cannot be fetched is logged and skipped.
pub async fn discover_hostnames<H>(
    http: &H,
    url_prefix: &str,
    domains: &[String],
    bruteforce: bool,
    must_match: &Regex,
    must_not_match: &Regex,
) -> Vec<String>
where
    H: HttpGet + ?Sized,
{
    let mut seen = HashSet::new();
    let mut hostnames = Vec::new();
    for domain in domains {
        match hostnames_from_ct_logs(http, url_prefix, domain, bruteforce).await {
            Ok(found) => hostnames.extend(found.into_iter().filter(|h| seen.insert(h.clone()))),
            Err(e) => warn!("Skipping {domain}: {e}"),
        }
    }
    filter_hostnames(&hostnames, must_match, must_not_match)
}

/// Domain names served by any of `nameservers`, in first-seen order.
///
/// A nameserver whose lookup fails is logged and skipped.
pub async fn discover_shared_domains<H>(
    http: &H,
    api_prefix: &str,
    nameservers: &[String],
) -> Vec<String>
where
    H: HttpGet + ?Sized,
{
    let mut seen = HashSet::new();
    let mut domains = Vec::new();
    for nameserver in nameservers {
        match domain_names_from_nameserver(http, api_prefix, nameserver).await {
            Ok(found) => domains.extend(found.into_iter().filter(|d| seen.insert(d.clone()))),
            Err(e) => warn!("Skipping nameserver {nameserver}: {e}"),
        }
    }
    info!(
        "{} domain(s) share the {} given nameserver(s)",
        domains.len(),
        nameservers.len()
    );
    domains
}
