//! address-metadata command line tool

use std::path::PathBuf;
use std::process::ExitCode;

use address_metadata::cli::{CliError, commands};
use address_metadata::{AddressConfig, ApiAddressSource, MetadataResolver};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "address-metadata", version, about = "Inspect country address form metadata")]
struct Cli {
    /// TOML config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Address-format service base URL (overrides the config file)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Use the static table only, without network access
    #[arg(long, global = true)]
    offline: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the resolved metadata for a country
    Resolve {
        country: String,
        /// Print JSON instead of a summary
        #[arg(long)]
        json: bool,
    },
    /// Validate one field value for a country
    Validate {
        country: String,
        field: String,
        value: String,
    },
    /// Print the ISO code for a country name
    Lookup { name: String },
}

fn load_config(cli: &Cli) -> Result<AddressConfig, CliError> {
    let mut config = match &cli.config {
        Some(path) => AddressConfig::from_file(path)?,
        None => AddressConfig::default(),
    };
    if let Some(url) = &cli.api_url {
        config.service_url = url.clone();
    }
    Ok(config)
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let config = load_config(&cli)?;
    let resolver = MetadataResolver::with_config(ApiAddressSource::from_config(&config), &config);

    match &cli.command {
        Command::Resolve { country, json } => {
            commands::handle_resolve(&resolver, country, cli.offline, *json).await
        }
        Command::Validate {
            country,
            field,
            value,
        } => commands::handle_validate(&resolver, country, field, value, cli.offline).await,
        Command::Lookup { name } => commands::handle_lookup(name),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(Cli::parse()).await {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(CliError::ValidationFailed(message)) => {
            println!("Invalid: {}", message);
            Ok(ExitCode::FAILURE)
        }
        Err(e) => Err(e.into()),
    }
}
