//! Per-hostname task processing.

use std::sync::Arc;

use log::{debug, warn};
use tokio::time::timeout;

use crate::dns::DnsContextFactory;
use crate::http::HttpGet;
use crate::takeover::{check_cname_takeover, check_orphaned_delegation, Finding};

use super::resources::ScanContext;

/// Runs both takeover checks on one host name, each under its own time limit.
///
/// A check that errors or runs out of time is logged and left out, so a
/// finished check keeps its finding even when the other one stalls.
async fn check_hostname<F, H>(hostname: &str, ctx: &ScanContext<F, H>) -> Vec<Finding>
where
    F: DnsContextFactory,
    H: HttpGet,
{
    let limit = ctx.check_timeout;
    let (delegation, cname) = tokio::join!(
        timeout(
            limit,
            check_orphaned_delegation(hostname, &ctx.dns, ctx.safe_nameservers.as_ref()),
        ),
        timeout(limit, check_cname_takeover(hostname, &ctx.dns, &ctx.http)),
    );

    let mut findings = Vec::with_capacity(2);
    for (check, result) in [("Delegation", delegation), ("CNAME", cname)] {
        match result {
            Ok(Ok(finding)) => {
                debug!("{hostname}: {finding}");
                ctx.stats.record_finding(finding.reason_code());
                findings.push(finding);
            }
            Ok(Err(e)) => {
                warn!("{check} check failed for {hostname}: {e}");
            }
            Err(_) => {
                warn!(
                    "{check} check for {hostname} timed out after {:.1}s",
                    limit.as_secs_f64()
                );
            }
        }
    }
    findings
}

/// Process a single hostname task.
///
/// Returns the host name with its findings, or `None` when neither check
/// produced one.
pub(super) async fn check_hostname_task<F, H>(
    hostname: String,
    ctx: Arc<ScanContext<F, H>>,
) -> (String, Option<Vec<Finding>>)
where
    F: DnsContextFactory,
    H: HttpGet,
{
    let findings = check_hostname(&hostname, &ctx).await;
    if findings.is_empty() {
        ctx.stats.record_failed();
        (hostname, None)
    } else {
        ctx.stats.record_checked();
        (hostname, Some(findings))
    }
}
