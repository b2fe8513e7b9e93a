//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `subdomain_scanner` library that handles:
//! - Command-line argument parsing
//! - Logger initialization
//! - User-facing output formatting
//!
//! All core functionality is implemented in the library crate.

use anyhow::{Context, Result};
use clap::Parser;
use regex::Regex;
use std::process;

use subdomain_scanner::config::{
    Cli, Command, DiscoverHostnamesArgs, NameserversArgs, SHARED_DNS_API_URL_PREFIX,
};
use subdomain_scanner::discovery::{discover_hostnames, discover_shared_domains, expand_stdin_values};
use subdomain_scanner::export::print_report;
use subdomain_scanner::http::ReqwestHttpClient;
use subdomain_scanner::initialization::{init_client, init_logger_with};
use subdomain_scanner::{run_scan, Config};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logger_with(cli.log_level.into(), cli.log_format)
        .context("Failed to initialize logger")?;

    if let Err(e) = run_command(cli.command).await {
        eprintln!("subdomain_scanner error: {:#}", e);
        process::exit(1);
    }
    Ok(())
}

async fn run_command(command: Command) -> Result<()> {
    match command {
        Command::DiscoverHostnames(args) => {
            for hostname in hostnames(args).await? {
                println!("{hostname}");
            }
        }
        Command::DiscoverDomains(args) => {
            let seeds: Vec<String> = shared_domains(args)
                .await?
                .iter()
                .map(|domain| format!("{domain},*.{domain}"))
                .collect();
            println!("{}", seeds.join(","));
        }
        Command::SeedDiscovery(args) => {
            let seeds: Vec<String> = shared_domains(args)
                .await?
                .iter()
                .map(|domain| format!("*.{domain}"))
                .collect();
            println!("{}", seeds.join(","));
        }
        Command::TestHostnames(args) => {
            let config = Config::from(args);
            let format = config.output_format;
            let report = run_scan(config).await?;
            print_report(&report, format)?;
        }
    }
    Ok(())
}

fn discovery_client() -> Result<ReqwestHttpClient> {
    let client = init_client(&Config::default()).context("Failed to initialize HTTP client")?;
    Ok(ReqwestHttpClient::new(client))
}

async fn hostnames(args: DiscoverHostnamesArgs) -> Result<Vec<String>> {
    let must_match = Regex::new(&args.must_match).context("Invalid --must-match expression")?;
    let must_not_match =
        Regex::new(&args.must_not_match).context("Invalid --must-not-match expression")?;
    let domains = expand_stdin_values(&args.domain_names)
        .await
        .context("Failed to read domain names")?;

    let http = discovery_client()?;
    Ok(discover_hostnames(
        &http,
        &args.ct_url_prefix,
        &domains,
        args.bruteforce,
        &must_match,
        &must_not_match,
    )
    .await)
}

async fn shared_domains(args: NameserversArgs) -> Result<Vec<String>> {
    let nameservers = expand_stdin_values(&args.nameservers)
        .await
        .context("Failed to read nameservers")?;

    let http = discovery_client()?;
    Ok(discover_shared_domains(&http, SHARED_DNS_API_URL_PREFIX, &nameservers).await)
}
