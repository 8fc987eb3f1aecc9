use clap::Parser;
use evf_optimizer::{
    PortfolioOptimizer,
    io::{RawScenario, Scenario},
};
use std::path::PathBuf;
use tracing::{Level, event};

mod io;
pub use io::*;

mod commands;
pub use commands::*;

pub mod config;
use config::AppConfig;

// The top-level arguments: where the configuration lives, and which subcommand to execute
#[derive(Parser)]
#[command(version, about, long_about = None)]
pub struct BaseArgs {
    /// Path to a TOML configuration file
    #[arg(short, long, env = "EVF_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

impl BaseArgs {
    pub fn evaluate(self) -> anyhow::Result<()> {
        let config = AppConfig::load(self.config.as_deref())?;
        let optimizer = PortfolioOptimizer::new(config.optimizer.settings());

        match self.command {
            Commands::Curve { io } => {
                let scenario = read_scenario(&io, &config)?;
                let curve = scenario.aggregate(&optimizer)?;
                serde_json::to_writer_pretty(io.write()?, &curve)?;
            }
            Commands::Optimum { io } => {
                let scenario = read_scenario(&io, &config)?;
                let curve = scenario.aggregate(&optimizer)?;
                let optimum = optimizer.find_optimum(&curve)?;
                event!(
                    Level::INFO,
                    thresholds = ?optimum.thresholds,
                    profit = optimum.profit,
                    "optimal threshold"
                );
                serde_json::to_writer_pretty(io.write()?, &optimum)?;
            }
            Commands::Compare {
                io,
                threshold_a,
                threshold_b,
                target,
            } => {
                let scenario = read_scenario(&io, &config)?;
                let curve = scenario.aggregate(&optimizer)?;
                let comparison = optimizer.compare(&curve, threshold_a, threshold_b)?;
                event!(
                    Level::INFO,
                    threshold_a,
                    threshold_b,
                    delta = comparison.delta,
                    "compared thresholds"
                );
                let report = CompareReport::new(comparison, target);
                serde_json::to_writer_pretty(io.write()?, &report)?;
            }
            Commands::Schema { output } => {
                let schema = schemars::schema_for!(RawScenario);
                serde_json::to_writer_pretty(output.writer()?, &schema)?;
            }
        }

        Ok(())
    }
}

fn read_scenario(io: &IOArgs, config: &AppConfig) -> anyhow::Result<Scenario> {
    let input = io.read()?;
    let raw = serde_json::from_reader::<_, RawScenario>(input)?;
    Ok(raw.prepare(&config.fallback_policy(), config.optimizer.tolerance)?)
}
