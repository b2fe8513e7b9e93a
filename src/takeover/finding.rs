//! Vulnerability findings and their reason codes.

use serde::{Deserialize, Serialize};
use strum_macros::EnumIter as EnumIterMacro;

/// Severity of a vulnerable finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    /// Low risk
    Low,
    /// Medium risk
    Medium,
    /// High risk
    High,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Severity::Low => "LOW",
            Severity::Medium => "MEDIUM",
            Severity::High => "HIGH",
        })
    }
}

/// Stable, machine-readable classification of a check outcome.
///
/// Each code fixes whether the finding is vulnerable and at which severity.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, EnumIterMacro,
)]
pub enum ReasonCode {
    /// NS lookup returned NXDOMAIN, or no nameservers at all.
    #[serde(rename = "HOSTNAME_NOT_DELEGATED")]
    HostnameNotDelegated,
    /// NS lookup returned SERVFAIL (delegation cannot be confirmed).
    #[serde(rename = "HOSTNAME_NS_SERVFAIL")]
    HostnameNsServfail,
    /// The name exists but has no NS records.
    #[serde(rename = "HOSTNAME_HAS_NO_NS")]
    HostnameHasNoNs,
    /// The name vanished (NXDOMAIN) after its delegation was found.
    #[serde(rename = "HOSTNAME_IS_NXDOMAIN")]
    HostnameIsNxdomain,
    /// Every delegated nameserver resolved and served a matching SOA.
    #[serde(rename = "HOSTNAME_NOT_VULNERABLE")]
    HostnameNotVulnerable,
    /// Unresolvable IPv4-literal nameserver covered by the safe list.
    #[serde(rename = "IP_NS_ON_V4_SAFE_LIST")]
    IpNsOnV4SafeList,
    /// Unresolvable IPv6-literal nameserver covered by the safe list.
    #[serde(rename = "IP_NS_ON_V6_SAFE_LIST")]
    IpNsOnV6SafeList,
    /// IP-literal nameserver that does not resolve and is not safe-listed.
    #[serde(rename = "IP_NS_DOESNT_RESOLVE")]
    IpNsDoesntResolve,
    /// Delegated nameserver host name does not resolve.
    #[serde(rename = "NS_DOESNT_RESOLVE")]
    NsDoesntResolve,
    /// Delegated nameserver answers NXDOMAIN for the zone's SOA.
    #[serde(rename = "NS_HAS_NO_SOA")]
    NsHasNoSoa,
    /// Delegated nameserver answers SERVFAIL for the zone's SOA.
    #[serde(rename = "NS_HAS_NO_RECORDS")]
    NsHasNoRecords,
    /// Delegated nameserver serves a different SOA than the resolver chain.
    #[serde(rename = "NS_HAS_MISMATCHED_SOA")]
    NsHasMismatchedSoa,
    /// The host name has no CNAME records, so the CNAME check does not apply.
    #[serde(rename = "HOSTNAME_HAS_NO_CNAME")]
    HostnameHasNoCname,
    /// CNAME targets exist but none is an unclaimed third-party resource.
    #[serde(rename = "CNAME_NOT_VULNERABLE")]
    CnameNotVulnerable,
    /// CNAME target is a recognised service reporting a missing resource.
    #[serde(rename = "CNAMED_TO_UNCONFIGURED_3RD_PARTY_SVC")]
    CnamedToUnconfigured3rdPartySvc,
    /// CNAME target of a recognised service no longer resolves.
    #[serde(rename = "CNAMED_TO_NON_EXIST_DNS_3RD_PARTY_SVC")]
    CnamedToNonExistDns3rdPartySvc,
}

impl ReasonCode {
    /// Returns the serialized tag, e.g. `NS_DOESNT_RESOLVE`.
    pub fn as_str(&self) -> &'static str {
        match self {
            ReasonCode::HostnameNotDelegated => "HOSTNAME_NOT_DELEGATED",
            ReasonCode::HostnameNsServfail => "HOSTNAME_NS_SERVFAIL",
            ReasonCode::HostnameHasNoNs => "HOSTNAME_HAS_NO_NS",
            ReasonCode::HostnameIsNxdomain => "HOSTNAME_IS_NXDOMAIN",
            ReasonCode::HostnameNotVulnerable => "HOSTNAME_NOT_VULNERABLE",
            ReasonCode::IpNsOnV4SafeList => "IP_NS_ON_V4_SAFE_LIST",
            ReasonCode::IpNsOnV6SafeList => "IP_NS_ON_V6_SAFE_LIST",
            ReasonCode::IpNsDoesntResolve => "IP_NS_DOESNT_RESOLVE",
            ReasonCode::NsDoesntResolve => "NS_DOESNT_RESOLVE",
            ReasonCode::NsHasNoSoa => "NS_HAS_NO_SOA",
            ReasonCode::NsHasNoRecords => "NS_HAS_NO_RECORDS",
            ReasonCode::NsHasMismatchedSoa => "NS_HAS_MISMATCHED_SOA",
            ReasonCode::HostnameHasNoCname => "HOSTNAME_HAS_NO_CNAME",
            ReasonCode::CnameNotVulnerable => "CNAME_NOT_VULNERABLE",
            ReasonCode::CnamedToUnconfigured3rdPartySvc => "CNAMED_TO_UNCONFIGURED_3RD_PARTY_SVC",
            ReasonCode::CnamedToNonExistDns3rdPartySvc => "CNAMED_TO_NON_EXIST_DNS_3RD_PARTY_SVC",
        }
    }

    /// Severity attached to this code; `None` for non-vulnerable outcomes.
    pub fn severity(&self) -> Option<Severity> {
        match self {
            ReasonCode::IpNsDoesntResolve
            | ReasonCode::NsDoesntResolve
            | ReasonCode::NsHasNoRecords
            | ReasonCode::CnamedToUnconfigured3rdPartySvc => Some(Severity::High),
            ReasonCode::NsHasNoSoa
            | ReasonCode::NsHasMismatchedSoa
            | ReasonCode::CnamedToNonExistDns3rdPartySvc => Some(Severity::Medium),
            ReasonCode::HostnameNotDelegated
            | ReasonCode::HostnameNsServfail
            | ReasonCode::HostnameHasNoNs
            | ReasonCode::HostnameIsNxdomain
            | ReasonCode::HostnameNotVulnerable
            | ReasonCode::IpNsOnV4SafeList
            | ReasonCode::IpNsOnV6SafeList
            | ReasonCode::HostnameHasNoCname
            | ReasonCode::CnameNotVulnerable => None,
        }
    }

    /// Whether findings with this code report a vulnerability.
    pub fn is_vulnerable(&self) -> bool {
        self.severity().is_some()
    }
}

impl std::fmt::Display for ReasonCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The result of one check invocation on one host name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Finding {
    vulnerable: bool,
    reason_code: ReasonCode,
    reason: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    severity: Option<Severity>,
}

impl Finding {
    /// Builds a finding; `vulnerable` and `severity` are derived from `code`.
    pub fn new(code: ReasonCode, reason: impl Into<String>) -> Self {
        Self {
            vulnerable: code.is_vulnerable(),
            reason_code: code,
            reason: reason.into(),
            severity: code.severity(),
        }
    }

    /// Whether this finding reports a takeover risk.
    pub fn vulnerable(&self) -> bool {
        self.vulnerable
    }

    /// The classification tag.
    pub fn reason_code(&self) -> ReasonCode {
        self.reason_code
    }

    /// Human-readable explanation naming the host name / nameserver involved.
    pub fn reason(&self) -> &str {
        &self.reason
    }

    /// Severity, present only for vulnerable findings.
    pub fn severity(&self) -> Option<Severity> {
        self.severity
    }
}

impl std::fmt::Display for Finding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.severity {
            Some(severity) => write!(f, "[{severity}] {}: {}", self.reason_code, self.reason),
            None => write!(f, "{}: {}", self.reason_code, self.reason),
        }
    }
}
