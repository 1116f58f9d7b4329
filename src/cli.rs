use std::io::Write;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::{info, warn};

use crate::cloud::{ClientFactory, RegionalClientFactory};
use crate::config::{Config, Loaded};
use crate::error::Result;
use crate::logging::setup_logging;
use crate::model::ExampleRecord;
use crate::ServiceRegistry;

/// Registry name of the data-catalog client registered by `example-cli-function`.
pub const GLUE_CLIENT: &str = "glue_client";

#[derive(Parser, Debug)]
#[command(name = "svc-registry")]
#[command(about = "Command-line scaffold built around a service registry")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Minimum log level (TRACE, DEBUG, INFO, WARNING, ERROR)")]
    pub log_level: Option<String>,

    #[arg(long, global = true, help = "Project config file (default: ./svc-registry.toml)")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    #[command(about = "Register the glue client and print the example record's name")]
    ExampleCliFunction {
        #[arg(long, help = "Provide the name please.")]
        name: String,
    },
}

/// Loads configuration, sets up logging and runs the command.
pub fn run(cli: Cli) -> Result<()> {
    let Loaded {
        mut config,
        warnings,
    } = Config::load(cli.config.as_deref())?;
    if let Some(level) = cli.log_level {
        config.log_level = level;
    }
    setup_logging(&config.log_level)?;
    report_warnings(&warnings);

    let registry = crate::global::registry();
    let stdout = std::io::stdout();
    execute(
        &cli.command,
        &config,
        registry,
        &RegionalClientFactory,
        &mut stdout.lock(),
    )
}

/// Logs the problems collected while loading configuration.
pub fn report_warnings(warnings: &[String]) {
    for warning in warnings {
        warn!("{warning}");
    }
}

pub fn execute(
    command: &Commands,
    config: &Config,
    registry: &ServiceRegistry,
    clients: &dyn ClientFactory,
    out: &mut dyn Write,
) -> Result<()> {
    match command {
        Commands::ExampleCliFunction { name } => {
            let glue = clients.client("glue", &config.region)?;
            registry.register_named(GLUE_CLIENT, glue);
            info!(region = %config.region, "registered {GLUE_CLIENT}");

            let record = ExampleRecord::new(name.as_str())?;
            writeln!(out, "{}", record.name)?;
        }
    }
    Ok(())
}
