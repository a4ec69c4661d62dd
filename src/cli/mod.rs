//! CLI interface for bet-adviser
//!
//! Provides subcommands for:
//! - `advise`: Recommendation for one match
//! - `fixtures`: List fixtures and quotes from an odds feed snapshot
//! - `config`: Show effective configuration

mod advise;
mod fixtures;

pub use advise::AdviseArgs;
pub use fixtures::FixturesArgs;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "bet-adviser")]
#[command(about = "Poisson 1X2 model with fractional-Kelly stake advice")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    pub config: String,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Advise on one match
    Advise(AdviseArgs),
    /// List fixtures from an odds feed snapshot
    Fixtures(FixturesArgs),
    /// Show configuration
    Config,
}

/// Output format for command results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}
