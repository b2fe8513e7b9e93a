//! Command-line interface definition.

use std::net::IpAddr;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::constants::{
    DEFAULT_MAX_CONCURRENCY, DEFAULT_USER_AGENT, DNS_TIMEOUT_SECS, HTTP_PROBE_TIMEOUT_SECS,
};
use crate::config::types::{Config, LogFormat, LogLevel, OutputFormat};

/// Discovers subdomains and tests them for takeover vulnerabilities.
#[derive(Debug, Parser)]
#[command(name = "subdomain_scanner", version, about)]
pub struct Cli {
    /// Log level
    #[arg(long, value_enum, default_value_t = LogLevel::Info, global = true)]
    pub log_level: LogLevel,

    /// Log format
    #[arg(long, value_enum, default_value_t = LogFormat::Plain, global = true)]
    pub log_format: LogFormat,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Discover hostnames from certificate transparency logs
    DiscoverHostnames(DiscoverHostnamesArgs),
    /// Discover domain names served by the given nameservers
    DiscoverDomains(NameserversArgs),
    /// Print `*.domain` seeds for discover-hostnames from the given nameservers
    SeedDiscovery(NameserversArgs),
    /// Test hostnames for takeover vulnerabilities
    TestHostnames(TestHostnamesArgs),
}

/// Options of `discover-hostnames`.
#[derive(Debug, Args)]
pub struct DiscoverHostnamesArgs {
    /// Domain names to use as the seed (comma or space separated; `-` reads stdin)
    #[arg(long = "domain-names", visible_aliases = ["domains", "dn"], num_args = 1.., value_delimiter = ',', required = true)]
    pub domain_names: Vec<String>,

    /// Regular expression hostnames must match to be included
    #[arg(long = "must-match", visible_alias = "mm", default_value = ".*")]
    pub must_match: String,

    /// Regular expression hostnames must not match to be included
    #[arg(long = "must-not-match", visible_alias = "mnm", default_value = "^$")]
    pub must_not_match: String,

    /// Expand every hostname with a list of common subdomain prefixes
    #[arg(long, visible_alias = "bf", short = 'b')]
    pub bruteforce: bool,

    /// Certificate transparency feed URL prefix
    #[arg(long, default_value = crate::config::CRTSH_RSS_URL_PREFIX)]
    pub ct_url_prefix: String,
}

/// Options shared by `discover-domains` and `seed-discovery`.
#[derive(Debug, Args)]
pub struct NameserversArgs {
    /// Nameservers to look up shared domains for (`-` reads stdin)
    #[arg(long, visible_alias = "ns", num_args = 1.., value_delimiter = ',', required = true)]
    pub nameservers: Vec<String>,
}

/// Options of `test-hostnames`.
#[derive(Debug, Args)]
pub struct TestHostnamesArgs {
    /// File with hostnames to test (whitespace separated; `-` reads stdin)
    #[arg(long = "hostnames-file", short = 'f', visible_aliases = ["hosts-file", "hf"])]
    pub hostnames_file: PathBuf,

    /// YAML or JSON file with `ipv4`/`ipv6` lists of safe nameserver CIDRs
    #[arg(long)]
    pub safe_nameservers: Option<PathBuf>,

    /// Report format
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    pub output: OutputFormat,

    /// Include non-vulnerable findings in the report
    #[arg(long, short = 'v')]
    pub verbose: bool,

    /// Maximum number of hostnames checked concurrently
    #[arg(long, default_value_t = DEFAULT_MAX_CONCURRENCY)]
    pub max_concurrency: usize,

    /// Per HTTP probe timeout in seconds
    #[arg(long, default_value_t = HTTP_PROBE_TIMEOUT_SECS)]
    pub timeout_seconds: u64,

    /// Per DNS query timeout in seconds
    #[arg(long, default_value_t = DNS_TIMEOUT_SECS)]
    pub dns_timeout_seconds: u64,

    /// Upstream resolver IP for the main resolver context (repeatable)
    #[arg(long = "resolver")]
    pub resolvers: Vec<IpAddr>,

    /// HTTP User-Agent header value
    #[arg(long, default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,
}

impl From<TestHostnamesArgs> for Config {
    fn from(args: TestHostnamesArgs) -> Self {
        Config {
            hostnames_file: args.hostnames_file,
            safe_nameservers: args.safe_nameservers,
            output_format: args.output,
            verbose: args.verbose,
            max_concurrency: args.max_concurrency.max(1),
            timeout_seconds: args.timeout_seconds,
            dns_timeout_seconds: args.dns_timeout_seconds,
            resolvers: args.resolvers,
            user_agent: args.user_agent,
        }
    }
}
