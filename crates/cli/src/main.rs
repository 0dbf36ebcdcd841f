use clap::Parser;
use ferrous_ptr_domain::CliOverrides;
use tokio::io::BufReader;
use tracing::info;

mod bootstrap;
mod di;

#[derive(Parser)]
#[command(name = "ferrous-ptr")]
#[command(version)]
#[command(about = "Ferrous PTR - Bulk reverse DNS lookups, one address per line on stdin")]
struct Cli {
    /// IP of the DNS resolver to use for lookups [default: system resolver]
    #[arg(short = 'r', long, value_name = "IP")]
    resolver: Option<String>,

    /// Protocol to use for lookups [default: udp]
    #[arg(short = 'P', long, value_parser = ["tcp", "udp"])]
    protocol: Option<String>,

    /// Port to query on the specified DNS resolver [default: 53]
    #[arg(short = 'p', long, value_parser = clap::value_parser!(u16).range(1..))]
    port: Option<u16>,

    /// Wait n milliseconds between lookups
    #[arg(short = 'w', long, value_name = "MS")]
    wait: Option<u64>,

    /// Per-lookup timeout against the specified resolver [default: 5000]
    #[arg(short = 't', long, value_name = "MS")]
    timeout: Option<u64>,

    /// Cap on concurrent lookups [default: unbounded]
    #[arg(long, value_name = "N")]
    max_in_flight: Option<usize>,

    /// Configuration file path (TOML)
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<String>,

    /// Log level for stderr (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let cli_overrides = CliOverrides {
        resolver: cli.resolver,
        protocol: cli.protocol,
        port: cli.port,
        timeout_ms: cli.timeout,
        wait_ms: cli.wait,
        max_in_flight: cli.max_in_flight,
        log_level: cli.log_level,
    };

    let config = bootstrap::load_config(cli.config.as_deref(), cli_overrides)?;

    // Initialize logging
    bootstrap::init_logging(&config);

    info!("Starting Ferrous PTR v{}", env!("CARGO_PKG_VERSION"));

    let services = di::LookupServices::new(&config);

    let input = BufReader::new(tokio::io::stdin());
    let mut output = tokio::io::stdout();

    let summary = services.bulk_lookup.execute(input, &mut output).await?;

    info!(
        resolver = %services.resolver.describe(),
        names = summary.names_emitted,
        "Done"
    );
    Ok(())
}
