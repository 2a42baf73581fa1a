use clap::Parser;
use equity_valuator::cli::{Cli, Commands};
use equity_valuator::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = Config::load(&cli.config).unwrap_or_else(|e| {
        eprintln!("Warning: Could not load config from {}: {}", cli.config, e);
        eprintln!("Using default configuration");
        Config::default()
    });

    // Initialize telemetry
    equity_valuator::telemetry::init_telemetry(&config.telemetry)?;

    match cli.command {
        Commands::Option(args) => {
            args.execute()?;
        }
        Commands::Dcf(args) => {
            tracing::info!("Running Monte Carlo DCF");
            args.execute(&config.simulation)?;
        }
        Commands::Ticker(args) => {
            tracing::info!(symbol = %args.symbol, "Running Monte Carlo DCF for ticker");
            args.execute(&config).await?;
        }
        Commands::Config => {
            println!("Current configuration:");
            println!(
                "  Simulation: n={}, seed={:?}",
                config.simulation.simulations, config.simulation.seed
            );
            println!(
                "  WACC: mean={}, std={}",
                config.simulation.wacc.mean, config.simulation.wacc.std_dev
            );
            println!(
                "  Terminal growth: mean={}, std={}",
                config.simulation.terminal_growth.mean, config.simulation.terminal_growth.std_dev
            );
            println!("  Growth std: {}", config.simulation.growth_std);
            println!(
                "  Provider: {} (key from ${})",
                config.provider.base_url, config.provider.api_key_env
            );
            println!(
                "  Cache TTL: fcf={}s, quote={}s, balance_sheet={}s",
                config.cache.fcf_ttl_secs,
                config.cache.quote_ttl_secs,
                config.cache.balance_sheet_ttl_secs
            );
            println!(
                "  Telemetry: level={}, format={:?}, metrics_port={:?}",
                config.telemetry.log_level,
                config.telemetry.log_format,
                config.telemetry.metrics_port
            );
        }
    }

    Ok(())
}
