use anyhow::Context;
use bet_adviser::cli::{Cli, Commands};
use bet_adviser::config::Config;
use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = match Config::load(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Warning: Could not load config from {}: {:#}", cli.config, e);
            eprintln!("Using default configuration");
            toml::from_str(include_str!("../config.toml.example"))
                .context("parsing bundled default config")?
        }
    };

    // Initialize telemetry
    let _telemetry = bet_adviser::telemetry::init_telemetry(&config.telemetry)?;

    match cli.command {
        Commands::Advise(args) => {
            args.execute(&config).await?;
        }
        Commands::Fixtures(args) => {
            tracing::info!("Listing fixtures");
            args.execute(&config).await?;
        }
        Commands::Config => {
            println!("Current configuration:");
            print!("{}", toml::to_string_pretty(&config)?);
        }
    }

    Ok(())
}
