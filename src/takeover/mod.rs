//! Subdomain takeover detection.
//!
//! This module provides the two checks run for every host name:
//! - Orphaned delegation: NS records pointing at nameservers that do not
//!   resolve or do not serve the zone
//! - CNAME takeover: CNAME targets at third-party services whose backing
//!   resource no longer exists
//!
//! Each check yields exactly one [`Finding`].

mod cname;
mod delegation;
mod finding;
mod hostname;
mod signatures;

// Re-export public API
pub use cname::{check_cname_takeover, check_cname_targets, resolve_cname_chain};
pub use delegation::check_orphaned_delegation;
pub use finding::{Finding, ReasonCode, Severity};
pub use hostname::normalize_hostname;
pub use signatures::{find_signature, signatures, BodyMarker, ProbeScheme, ServiceSignature};

