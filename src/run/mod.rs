//! Batch scan orchestration.
//!
//! `run_scan` wires the configured resources together and checks every host
//! name of the input list; `run_checks` is the generic concurrent loop behind
//! it and can be driven with any DNS and HTTP implementation.

mod resources;
mod task;

use std::collections::HashSet;
use std::sync::Arc;

use anyhow::{Context, Result};
use futures::stream::FuturesUnordered;
use futures::StreamExt;
use log::{info, warn};

use crate::config::Config;
use crate::discovery::read_hostnames;
use crate::dns::DnsContextFactory;
use crate::export::ScanReport;
use crate::http::{HttpGet, ReqwestHttpClient};
use crate::initialization::{init_client, init_resolver_factory, init_semaphore};
use crate::safe_list::SafeNameserverList;
use crate::takeover::normalize_hostname;

pub use resources::ScanContext;
use task::check_hostname_task;

/// Runs a takeover scan with the provided configuration.
///
/// This is the main entry point for the library. It reads host names from
/// the input file (or stdin), runs the orphaned-delegation and CNAME checks
/// on each of them concurrently, and returns the aggregated report.
///
/// # Errors
///
/// This function will return an error if:
/// - The input file cannot be read
/// - The safe-nameserver list cannot be loaded
/// - The HTTP client cannot be initialized
///
/// Failures of individual host names are logged and counted, never fatal.
///
/// # Example
///
/// ```no_run
/// use subdomain_scanner::{Config, run_scan};
/// use std::path::PathBuf;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = Config {
///     hostnames_file: PathBuf::from("hostnames.txt"),
///     ..Default::default()
/// };
/// let report = run_scan(config).await?;
/// println!("{} vulnerable finding(s)", report.vulnerable_count());
/// # Ok(())
/// # }
/// ```
pub async fn run_scan(config: Config) -> Result<ScanReport> {
    let start_time = std::time::Instant::now();

    let safe_nameservers = match config.safe_nameservers.as_deref() {
        Some(path) => Some(
            SafeNameserverList::load(path).context("Failed to load safe nameserver list")?,
        ),
        None => None,
    };

    let client = init_client(&config).context("Failed to initialize HTTP client")?;
    let http = ReqwestHttpClient::new(client);
    let dns = init_resolver_factory(&config);

    let hostnames = read_hostnames(&config.hostnames_file)
        .await
        .context("Failed to read hostnames")?;
    info!("Read {} hostname(s)", hostnames.len());

    let ctx = Arc::new(
        ScanContext::new(dns, http, safe_nameservers).with_check_timeout(config.check_timeout()),
    );
    let report = run_checks(
        hostnames,
        Arc::clone(&ctx),
        config.max_concurrency,
        config.verbose,
    )
    .await;

    ctx.stats.log_summary();
    info!("Scan finished in {:.1}s", start_time.elapsed().as_secs_f64());
    Ok(report)
}

/// Checks every host name with at most `max_concurrency` in flight.
///
/// Host names are normalized and deduplicated first; invalid ones are logged
/// and counted as failed. Each remaining host name gets both takeover checks,
/// each bounded by `ScanContext::check_timeout`.
pub async fn run_checks<F, H>(
    hostnames: Vec<String>,
    ctx: Arc<ScanContext<F, H>>,
    max_concurrency: usize,
    verbose: bool,
) -> ScanReport
where
    F: DnsContextFactory + 'static,
    H: HttpGet + 'static,
{
    let semaphore = init_semaphore(max_concurrency);
    let mut tasks = FuturesUnordered::new();
    let mut seen = HashSet::new();

    for raw in hostnames {
        let hostname = match normalize_hostname(&raw) {
            Ok(hostname) => hostname,
            Err(e) => {
                warn!("Skipping {raw}: {e}");
                ctx.stats.record_failed();
                continue;
            }
        };
        if !seen.insert(hostname.clone()) {
            continue;
        }

        let permit = match Arc::clone(&semaphore).acquire_owned().await {
            Ok(permit) => permit,
            Err(_) => {
                warn!("Semaphore closed, skipping hostname: {hostname}");
                continue;
            }
        };

        let ctx = Arc::clone(&ctx);
        tasks.push(tokio::spawn(async move {
            let _permit = permit;
            check_hostname_task(hostname, ctx).await
        }));
    }

    let mut report = ScanReport::new(verbose);
    while let Some(result) = tasks.next().await {
        match result {
            Ok((hostname, Some(findings))) => report.insert(hostname, findings),
            Ok((_, None)) => {}
            Err(join_error) => {
                warn!("Hostname task panicked: {join_error:?}");
                ctx.stats.record_failed();
            }
        }
    }

    report
}
