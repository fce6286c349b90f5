use clap::Parser;
use ferrous_doh_domain::{CliOverrides, DohProtocol};
use ferrous_doh_infrastructure::dns::forwarding::QueryBuilder;
use futures::StreamExt;
use presenter::{OutputFormat, Presenter};
use std::sync::Arc;
use tracing::info;

mod bootstrap;
mod di;
mod presenter;

#[derive(Parser)]
#[command(name = "ferrous-doh")]
#[command(version)]
#[command(about = "Ferrous DoH - ask many DNS-over-HTTPS resolvers the same question at once")]
struct Cli {
    /// Name to resolve
    name: String,

    /// Record type (A, AAAA, MX, TXT, TYPE65, ...)
    record_type: Option<String>,

    /// DoH encoding (wire or json)
    #[arg(short = 'p', long)]
    protocol: Option<DohProtocol>,

    /// Query a single resolver instead of the resolver list
    #[arg(short = 's', long, value_name = "HOST")]
    server: Option<String>,

    /// Resolver list file
    #[arg(short = 'f', long, value_name = "PATH")]
    servers_file: Option<String>,

    /// EDNS client subnet hint, e.g. 198.51.100.0/24
    #[arg(long, value_name = "PREFIX")]
    ecs: Option<String>,

    /// HTTP proxy for resolvers without their own
    #[arg(long, value_name = "URL")]
    proxy: Option<String>,

    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<String>,

    /// Connect timeout in milliseconds
    #[arg(long, value_name = "MS")]
    connect_timeout: Option<u64>,

    /// Read timeout in milliseconds, 0 disables it
    #[arg(long, value_name = "MS")]
    read_timeout: Option<u64>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cli_overrides = CliOverrides {
        protocol: cli.protocol,
        record_type: cli.record_type.clone(),
        ecs: cli.ecs.clone(),
        connect_timeout_ms: cli.connect_timeout,
        read_timeout_ms: cli.read_timeout,
        proxy: cli.proxy.clone(),
        server: cli.server.clone(),
        servers_file: cli.servers_file.clone(),
        log_level: cli.log_level.clone(),
    };

    let config = bootstrap::load_config(cli.config.as_deref(), cli_overrides)?;

    bootstrap::init_logging(&config);
    bootstrap::log_config(cli.config.as_deref(), &config);

    info!("Starting Ferrous DoH v{}", env!("CARGO_PKG_VERSION"));

    let query = QueryBuilder::build(
        &cli.name,
        &config.query.record_type,
        config.query.protocol,
        config.query.ecs.as_deref(),
    )?;

    let services = di::DohServices::new(&config);
    let resolvers = services.resolvers(&config).await?;
    let coordinator = services.fan_out(&config, resolvers)?;

    let mut presenter = Presenter::new(cli.format, std::io::stdout().lock());
    let mut results = coordinator.dispatch(Arc::new(query));

    while let Some(result) = results.next().await {
        presenter.render(&result?)?;
    }

    info!(resolvers = results.delivered(), "Done");
    Ok(())
}
