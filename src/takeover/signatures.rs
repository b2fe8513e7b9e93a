//! Third-party service signatures.
//!
//! Each entry describes how a hosted service answers for a resource that
//! does not exist (a deleted bucket, an unclaimed page, a removed app). The
//! table is compiled once and shared read-only by all checks.

use std::fmt;
use std::sync::LazyLock;

use regex::{Regex, RegexBuilder};

/// Scheme used to probe a CNAME target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeScheme {
    /// Plain HTTP
    Http,
    /// HTTP over TLS
    Https,
}

impl ProbeScheme {
    /// URL scheme string.
    pub fn as_str(&self) -> &'static str {
        match self {
            ProbeScheme::Http => "http",
            ProbeScheme::Https => "https",
        }
    }
}

impl fmt::Display for ProbeScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a "does not exist" response body contains.
#[derive(Debug)]
pub enum BodyMarker {
    /// Plain substring
    Literal(&'static str),
    /// Regular expression searched anywhere in the body
    Pattern(Regex),
}

impl BodyMarker {
    /// Whether `body` carries the marker.
    pub fn is_match(&self, body: &str) -> bool {
        match self {
            BodyMarker::Literal(needle) => body.contains(needle),
            BodyMarker::Pattern(re) => re.is_match(body),
        }
    }
}

/// A compiled service signature.
#[derive(Debug)]
pub struct ServiceSignature {
    /// Human-readable service name, used in finding reasons
    pub name: &'static str,
    hostname_pattern: Regex,
    /// Scheme of the probe request
    pub scheme: ProbeScheme,
    /// Status of a "does not exist" response; `None` accepts any status
    pub expected_status: Option<u16>,
    /// Body marker of a "does not exist" response
    pub marker: BodyMarker,
}

impl ServiceSignature {
    /// Whether a CNAME target belongs to this service.
    pub fn matches_hostname(&self, hostname: &str) -> bool {
        self.hostname_pattern.is_match(hostname)
    }

    /// Probe URL for a CNAME target: `{scheme}://{target}/`.
    pub fn probe_url(&self, target: &str) -> String {
        format!("{}://{}/", self.scheme, target)
    }

    /// Whether a probe response shows the resource is unclaimed.
    pub fn is_unconfigured_response(&self, status: u16, body: &str) -> bool {
        let status_matches = match self.expected_status {
            Some(expected) => expected == status,
            None => true,
        };
        status_matches && self.marker.is_match(body)
    }
}

enum MarkerDef {
    Literal(&'static str),
    Regex(&'static str),
}

struct SignatureDef {
    name: &'static str,
    hostname_pattern: &'static str,
    scheme: ProbeScheme,
    expected_status: Option<u16>,
    marker: MarkerDef,
}

const SIGNATURE_DEFS: &[SignatureDef] = &[
    SignatureDef {
        name: "AWS S3 bucket",
        hostname_pattern: r"s3[.\-](.+\.)?amazonaws\.com$",
        scheme: ProbeScheme::Https,
        expected_status: Some(404),
        marker: MarkerDef::Literal("NoSuchBucket"),
    },
    SignatureDef {
        name: "Google Cloud Storage bucket",
        hostname_pattern: r"^c\.storage\.googleapis\.com$",
        scheme: ProbeScheme::Https,
        expected_status: Some(404),
        marker: MarkerDef::Literal("InvalidBucketName"),
    },
    SignatureDef {
        name: "Cloudfront distribution",
        hostname_pattern: r".+\.cloudfront\.net$",
        scheme: ProbeScheme::Https,
        expected_status: Some(404),
        marker: MarkerDef::Literal("The request could not be satisfied"),
    },
    SignatureDef {
        name: "Fastly configuration",
        hostname_pattern: r".+\.fastly\.net$",
        scheme: ProbeScheme::Http,
        expected_status: None,
        marker: MarkerDef::Literal("Fastly error: unknown domain"),
    },
    SignatureDef {
        name: "github.io account",
        hostname_pattern: r".+\.github\.io$",
        scheme: ProbeScheme::Https,
        expected_status: Some(404),
        marker: MarkerDef::Literal("There isn't a GitHub Pages site here."),
    },
    SignatureDef {
        name: "Zendesk account",
        hostname_pattern: r".+\.zendesk\.com$",
        scheme: ProbeScheme::Http,
        // Served after a redirect
        expected_status: Some(200),
        marker: MarkerDef::Literal(
            "Bummer. It looks like the help center that you are trying to reach no longer exists.",
        ),
    },
    SignatureDef {
        name: "Wordpress.com hosting account",
        hostname_pattern: r".+\.wordpress\.com$",
        scheme: ProbeScheme::Https,
        expected_status: Some(200),
        marker: MarkerDef::Regex(r".+wordpress\.com</em> doesn&#8217;t&nbsp;exist"),
    },
    SignatureDef {
        name: "Heroku app",
        hostname_pattern: r".+herokuapp\.com$",
        scheme: ProbeScheme::Http,
        expected_status: Some(404),
        marker: MarkerDef::Literal(
            r#"<iframe src="//www.herokucdn.com/error-pages/no-such-app.html"></iframe>"#,
        ),
    },
    SignatureDef {
        name: "Bitbucket repository",
        hostname_pattern: r".+\.bitbucket\.io$",
        scheme: ProbeScheme::Https,
        expected_status: Some(404),
        marker: MarkerDef::Literal("Repository not found"),
    },
    SignatureDef {
        name: "Surge.sh project",
        hostname_pattern: r".+\.surge\.sh$",
        scheme: ProbeScheme::Https,
        expected_status: Some(404),
        marker: MarkerDef::Literal("project not found"),
    },
    SignatureDef {
        name: "Pantheon site",
        hostname_pattern: r".+\.pantheonsite\.io$",
        scheme: ProbeScheme::Https,
        expected_status: Some(404),
        marker: MarkerDef::Literal("The gods are wise"),
    },
];

fn compile(def: &SignatureDef) -> Result<ServiceSignature, regex::Error> {
    let hostname_pattern = RegexBuilder::new(def.hostname_pattern)
        .case_insensitive(true)
        .build()?;
    let marker = match def.marker {
        MarkerDef::Literal(needle) => BodyMarker::Literal(needle),
        MarkerDef::Regex(pattern) => BodyMarker::Pattern(Regex::new(pattern)?),
    };
    Ok(ServiceSignature {
        name: def.name,
        hostname_pattern,
        scheme: def.scheme,
        expected_status: def.expected_status,
        marker,
    })
}

static SIGNATURES: LazyLock<Vec<ServiceSignature>> = LazyLock::new(|| {
    SIGNATURE_DEFS
        .iter()
        .filter_map(|def| match compile(def) {
            Ok(signature) => Some(signature),
            Err(e) => {
                log::error!("Skipping signature '{}': {}", def.name, e);
                None
            }
        })
        .collect()
});

/// The full signature table, in matching order.
pub fn signatures() -> &'static [ServiceSignature] {
    &SIGNATURES
}

/// First signature whose hostname pattern matches `target`.
pub fn find_signature(target: &str) -> Option<&'static ServiceSignature> {
    signatures().iter().find(|sig| sig.matches_hostname(target))
}
