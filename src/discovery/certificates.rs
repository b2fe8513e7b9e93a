//! Certificate-transparency feed parsing and SAN extraction.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;
use x509_parser::extensions::{GeneralName, ParsedExtension};
use x509_parser::pem::parse_x509_pem;

const SUMMARY_PATTERN: &str = r"(?s)<summary[^>]*>(.*?)</summary>";
const CERTIFICATE_PATTERN: &str =
    r"(?s)-----BEGIN CERTIFICATE-----(.+?)-----END CERTIFICATE-----";
const LINE_BREAK_PATTERN: &str = r"(?i)<br\s*/?>";

/// Compiles a constant feed pattern, panicking with the pattern text if it
/// is malformed.
fn compile_feed_regex(pattern: &str, context: &str) -> Regex {
    Regex::new(pattern).unwrap_or_else(|e| {
        panic!("Failed to compile regex pattern '{pattern}' in {context}: {e}")
    })
}

static SUMMARY_RE: LazyLock<Regex> =
    LazyLock::new(|| compile_feed_regex(SUMMARY_PATTERN, "SUMMARY_RE"));
static CERTIFICATE_RE: LazyLock<Regex> =
    LazyLock::new(|| compile_feed_regex(CERTIFICATE_PATTERN, "CERTIFICATE_RE"));
static LINE_BREAK_RE: LazyLock<Regex> =
    LazyLock::new(|| compile_feed_regex(LINE_BREAK_PATTERN, "LINE_BREAK_RE"));

/// Builds the feed URL for `hostname`.
///
/// A leading `*` becomes the SQL wildcard `%` before percent-encoding, so
/// `*.example.com` yields `{prefix}%25.example.com`.
pub fn rss_url_from_hostname(prefix: &str, hostname: &str) -> String {
    let query = match hostname.strip_prefix('*') {
        Some(rest) => format!("%{rest}"),
        None => hostname.to_string(),
    };
    format!("{prefix}{}", urlencoding::encode(&query))
}

/// Undoes the XML escaping of an Atom `<summary>` element.
fn unescape_xml(text: &str) -> String {
    let text = text
        .trim()
        .trim_start_matches("<![CDATA[")
        .trim_end_matches("]]>");
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

/// Extracts one PEM certificate per feed entry.
///
/// Entries whose summary carries no certificate block are skipped. HTML line
/// breaks inside the block become newlines.
pub fn certificates_from_feed(feed: &str) -> Vec<String> {
    SUMMARY_RE
        .captures_iter(feed)
        .filter_map(|caps| {
            let summary = unescape_xml(caps.get(1)?.as_str());
            let block = CERTIFICATE_RE.find(&summary)?.as_str();
            Some(LINE_BREAK_RE.replace_all(block, "\n").into_owned())
        })
        .collect()
}

/// Returns the DNS names from the SAN extension of a PEM certificate, or
/// `None` when the certificate cannot be parsed.
fn certificate_sans(pem_text: &str) -> Option<Vec<String>> {
    let (_, pem) = parse_x509_pem(pem_text.as_bytes()).ok()?;
    let cert = pem.parse_x509().ok()?;

    let mut sans = Vec::new();
    for ext in cert.extensions() {
        if let ParsedExtension::SubjectAlternativeName(san) = ext.parsed_extension() {
            for general_name in &san.general_names {
                // IP addresses and e-mail names are not host names
                if let GeneralName::DNSName(dns_name) = general_name {
                    sans.push(dns_name.to_string());
                }
            }
        }
    }
    Some(sans)
}

/// Collects the SAN host names of all certificates: lowercased,
/// deduplicated and sorted. Malformed certificates are skipped.
pub fn sans_from_certificates<S: AsRef<str>>(certificates: &[S]) -> Vec<String> {
    let mut hostnames = BTreeSet::new();
    for certificate in certificates {
        match certificate_sans(certificate.as_ref()) {
            Some(sans) => {
                hostnames.extend(sans.into_iter().map(|san| san.to_lowercase()));
            }
            None => log::debug!("Skipping malformed certificate"),
        }
    }
    hostnames.into_iter().collect()
}
