//! Tests for CLI subcommand parsing.

use clap::{CommandFactory, Parser};
use std::net::{IpAddr, Ipv4Addr};
use std::path::PathBuf;
use subdomain_scanner::config::{
    Cli, Command, CRTSH_RSS_URL_PREFIX, DEFAULT_MAX_CONCURRENCY, DNS_TIMEOUT_SECS,
};
use subdomain_scanner::{Config, LogFormat, LogLevel, OutputFormat};

#[test]
fn test_discover_hostnames_defaults() {
    let cli = Cli::try_parse_from([
        "subdomain_scanner",
        "discover-hostnames",
        "--domain-names",
        "*.example.com,example.org",
    ])
    .unwrap();

    assert!(matches!(cli.log_level, LogLevel::Info));
    assert!(matches!(cli.log_format, LogFormat::Plain));
    let Command::DiscoverHostnames(args) = cli.command else {
        panic!("expected discover-hostnames");
    };
    assert_eq!(args.domain_names, vec!["*.example.com", "example.org"]);
    assert_eq!(args.must_match, ".*");
    assert_eq!(args.must_not_match, "^$");
    assert!(!args.bruteforce);
    assert_eq!(args.ct_url_prefix, CRTSH_RSS_URL_PREFIX);
}

#[test]
fn test_discover_hostnames_aliases() {
    let cli = Cli::try_parse_from([
        "subdomain_scanner",
        "discover-hostnames",
        "--dn",
        "example.com",
        "--mm",
        r"\.example\.com$",
        "--mnm",
        "^dev",
        "-b",
    ])
    .unwrap();

    let Command::DiscoverHostnames(args) = cli.command else {
        panic!("expected discover-hostnames");
    };
    assert_eq!(args.must_match, r"\.example\.com$");
    assert_eq!(args.must_not_match, "^dev");
    assert!(args.bruteforce);
}

#[test]
fn test_discover_hostnames_requires_domains() {
    assert!(Cli::try_parse_from(["subdomain_scanner", "discover-hostnames"]).is_err());
}

#[test]
fn test_nameserver_subcommands() {
    let cli = Cli::try_parse_from([
        "subdomain_scanner",
        "discover-domains",
        "--nameservers",
        "ns1.example.net,ns2.example.net",
    ])
    .unwrap();
    let Command::DiscoverDomains(args) = cli.command else {
        panic!("expected discover-domains");
    };
    assert_eq!(args.nameservers, vec!["ns1.example.net", "ns2.example.net"]);

    let cli = Cli::try_parse_from(["subdomain_scanner", "seed-discovery", "--ns", "-"]).unwrap();
    let Command::SeedDiscovery(args) = cli.command else {
        panic!("expected seed-discovery");
    };
    assert_eq!(args.nameservers, vec!["-"]);
}

#[test]
fn test_test_hostnames_into_config() {
    let cli = Cli::try_parse_from([
        "subdomain_scanner",
        "--log-level",
        "debug",
        "test-hostnames",
        "--hostnames-file",
        "hosts.txt",
        "--safe-nameservers",
        "safe.yaml",
        "--output",
        "yaml",
        "--verbose",
        "--max-concurrency",
        "5",
        "--resolver",
        "192.0.2.53",
        "--resolver",
        "192.0.2.54",
    ])
    .unwrap();

    assert!(matches!(cli.log_level, LogLevel::Debug));
    let Command::TestHostnames(args) = cli.command else {
        panic!("expected test-hostnames");
    };
    let config = Config::from(args);
    assert_eq!(config.hostnames_file, PathBuf::from("hosts.txt"));
    assert_eq!(config.safe_nameservers, Some(PathBuf::from("safe.yaml")));
    assert_eq!(config.output_format, OutputFormat::Yaml);
    assert!(config.verbose);
    assert_eq!(config.max_concurrency, 5);
    assert_eq!(config.dns_timeout_seconds, DNS_TIMEOUT_SECS);
    assert_eq!(
        config.resolvers,
        vec![
            IpAddr::V4(Ipv4Addr::new(192, 0, 2, 53)),
            IpAddr::V4(Ipv4Addr::new(192, 0, 2, 54))
        ]
    );
}

#[test]
fn test_test_hostnames_defaults() {
    let cli =
        Cli::try_parse_from(["subdomain_scanner", "test-hostnames", "-f", "-"]).unwrap();
    let Command::TestHostnames(args) = cli.command else {
        panic!("expected test-hostnames");
    };
    let config = Config::from(args);
    assert_eq!(config.hostnames_file, PathBuf::from("-"));
    assert_eq!(config.output_format, OutputFormat::Json);
    assert!(!config.verbose);
    assert_eq!(config.max_concurrency, DEFAULT_MAX_CONCURRENCY);
    assert!(config.resolvers.is_empty());
    assert!(config.safe_nameservers.is_none());
}

#[test]
fn test_invalid_values_rejected() {
    assert!(Cli::try_parse_from([
        "subdomain_scanner",
        "test-hostnames",
        "-f",
        "hosts.txt",
        "--output",
        "xml",
    ])
    .is_err());
    assert!(Cli::try_parse_from([
        "subdomain_scanner",
        "test-hostnames",
        "-f",
        "hosts.txt",
        "--resolver",
        "not-an-ip",
    ])
    .is_err());
    assert!(Cli::try_parse_from(["subdomain_scanner", "export"]).is_err());
}

#[test]
fn test_cli_definition_is_consistent() {
    Cli::command().debug_assert();
}
