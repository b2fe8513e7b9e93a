//! Wildcard expansion and scope filtering of discovered host names.

use std::collections::HashSet;

use regex::Regex;

use super::wordlist::SUBDOMAIN_PREFIXES;

/// Keeps host names that match `must_match` and do not match `must_not_match`.
///
/// Order-preserving; filtering an already filtered list is a no-op.
pub fn filter_hostnames<S: AsRef<str>>(
    hostnames: &[S],
    must_match: &Regex,
    must_not_match: &Regex,
) -> Vec<String> {
    hostnames
        .iter()
        .map(AsRef::as_ref)
        .filter(|hostname| must_match.is_match(hostname) && !must_not_match.is_match(hostname))
        .map(str::to_string)
        .collect()
}

/// Replaces every `*.domain` with `prefix.domain` for each common prefix.
///
/// With `bruteforce`, every other name is kept and also expanded with the
/// prefixes. The result keeps first-seen order and has no duplicates or
/// empty names.
pub fn expand_wildcards<S: AsRef<str>>(names: &[S], bruteforce: bool) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut expanded = Vec::new();
    let mut push = |name: String| {
        if seen.insert(name.clone()) {
            expanded.push(name);
        }
    };

    for name in names.iter().map(AsRef::as_ref) {
        if let Some(domain) = name.strip_prefix("*.") {
            for prefix in SUBDOMAIN_PREFIXES {
                push(format!("{prefix}.{domain}"));
            }
        } else if !name.is_empty() {
            push(name.to_string());
            if bruteforce {
                for prefix in SUBDOMAIN_PREFIXES {
                    push(format!("{prefix}.{name}"));
                }
            }
        }
    }

    expanded
}
