use anyhow::Context;
use clap::Parser;
use futures::future::join_all;
use rdns_domain::CliOverrides;
use std::net::IpAddr;
use tracing::info;

mod bootstrap;

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[derive(Parser)]
#[command(name = "rdns")]
#[command(version)]
#[command(about = "rdns - Cached reverse DNS (PTR) lookups")]
struct Cli {
    /// Addresses to resolve (IPv4 or IPv6)
    #[arg(value_name = "IP", required = true)]
    addresses: Vec<String>,

    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<String>,

    /// Nameserver to query (ip or ip:port)
    #[arg(short = 's', long)]
    server: Option<String>,

    /// Per-query timeout in milliseconds
    #[arg(long)]
    timeout_ms: Option<u64>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Disable the hostname cache
    #[arg(long)]
    no_cache: bool,

    /// Empty responses needed before an address is cached as having no
    /// PTR record; negative disables negative caching
    #[arg(long, allow_negative_numbers = true)]
    threshold: Option<i64>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let addresses = parse_addresses(&cli.addresses)?;

    let cli_overrides = CliOverrides {
        server: cli.server.clone(),
        timeout_ms: cli.timeout_ms,
        no_cache: cli.no_cache,
        empty_response_threshold: cli.threshold,
        log_level: cli.log_level.clone(),
    };

    let config = bootstrap::load_config(cli.config.as_deref(), cli_overrides)?;

    bootstrap::init_logging(&config.logging);

    info!("Starting rdns v{}", env!("CARGO_PKG_VERSION"));

    let service = bootstrap::build_lookup_service(&config)?;

    let handles: Vec<_> = addresses.iter().map(|ip| service.lookup(*ip)).collect();
    let results = join_all(handles).await;

    for (ip, hostname) in addresses.iter().zip(results) {
        println!("{}\t{}", ip, hostname.as_deref().unwrap_or("-"));
    }

    service.shutdown(config.lookup.shutdown_grace()).await;

    info!("Shutdown complete");
    Ok(())
}

fn parse_addresses(raw: &[String]) -> anyhow::Result<Vec<IpAddr>> {
    raw.iter()
        .map(|value| {
            value
                .trim()
                .parse::<IpAddr>()
                .with_context(|| format!("Invalid IP address '{}'", value))
        })
        .collect()
}
