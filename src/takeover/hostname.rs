//! Host name validation and normalization.

use url::Host;

use crate::error_handling::ScanError;

/// Maximum length of a DNS name in presentation format (without the root dot).
const MAX_NAME_LEN: usize = 253;
/// Maximum length of one DNS label.
const MAX_LABEL_LEN: usize = 63;

fn invalid(hostname: &str, reason: impl Into<String>) -> ScanError {
    ScanError::InvalidHostname {
        hostname: hostname.to_string(),
        reason: reason.into(),
    }
}

/// Validates `input` as a DNS host name and returns its normalized form:
/// trimmed, lowercased (IDNA-encoded for non-ASCII input) and without the
/// trailing root dot.
///
/// IP addresses, wildcards, empty labels and over-long names or labels are
/// rejected with `ScanError::InvalidHostname`.
pub fn normalize_hostname(input: &str) -> Result<String, ScanError> {
    let trimmed = input.trim();
    let name = trimmed.strip_suffix('.').unwrap_or(trimmed);
    if name.is_empty() {
        return Err(invalid(input, "empty host name"));
    }

    let domain = match Host::parse(name) {
        Ok(Host::Domain(domain)) => domain,
        Ok(Host::Ipv4(_)) | Ok(Host::Ipv6(_)) => {
            return Err(invalid(input, "IP address, not a host name"))
        }
        Err(e) => return Err(invalid(input, e.to_string())),
    };

    if domain.len() > MAX_NAME_LEN {
        return Err(invalid(
            input,
            format!("longer than {MAX_NAME_LEN} characters"),
        ));
    }
    for label in domain.split('.') {
        if label.is_empty() {
            return Err(invalid(input, "empty label"));
        }
        if label.len() > MAX_LABEL_LEN {
            return Err(invalid(
                input,
                format!("label '{label}' longer than {MAX_LABEL_LEN} characters"),
            ));
        }
        if !label
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(invalid(input, format!("label '{label}' has invalid characters")));
        }
        if label.starts_with('-') || label.ends_with('-') {
            return Err(invalid(
                input,
                format!("label '{label}' starts or ends with a hyphen"),
            ));
        }
    }

    Ok(domain)
}
