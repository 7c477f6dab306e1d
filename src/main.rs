mod chain;
mod config;
mod lookup;
mod report;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use thiserror::Error;

use crate::chain::{ChainFailure, PassChain};
use crate::config::Config;
use crate::lookup::{Coordinates, HttpGet, LookupError, ReqwestTransport};

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Chain(#[from] ChainFailure),
    #[error("Failed to render passes: {0}")]
    Render(#[from] serde_json::Error),
}

impl From<LookupError> for CliError {
    fn from(e: LookupError) -> Self {
        CliError::Chain(e.into())
    }
}

#[derive(Parser)]
#[command(name = "iss-flyover")]
#[command(about = "Upcoming ISS overhead passes for this machine's location")]
struct Cli {
    /// YAML config file overriding endpoints and HTTP settings
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
    /// Log requests and chain progress
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the next passes over this machine's location (default)
    Next {
        #[arg(long)]
        json: bool,
    },
    /// Print this machine's public IP address
    Ip,
    /// Print coordinates of an IP address (defaults to this machine's)
    Coords { ip: Option<String> },
    /// Print the next passes over the given coordinates
    Passes {
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,
        #[arg(long, allow_negative_numbers = true)]
        lon: f64,
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let config = match &cli.config {
        Some(path) => match Config::from_file(path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Error loading config {}: {}", path.display(), e);
                return ExitCode::FAILURE;
            }
        },
        None => Config::default(),
    };

    let transport = match ReqwestTransport::new(&config.http) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("Error creating HTTP client: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let result = match cli.command.unwrap_or(Commands::Next { json: false }) {
        Commands::Next { json } => next(&transport, &config, json).await,
        Commands::Ip => ip(&transport, &config).await,
        Commands::Coords { ip } => coords(&transport, &config, ip).await,
        Commands::Passes { lat, lon, json } => {
            let coords = Coordinates {
                latitude: lat,
                longitude: lon,
            };
            passes(&transport, &config, coords, json).await
        }
    };

    let (lines, status) = outcome(&result);
    for line in lines {
        eprintln!("{}", line);
    }
    ExitCode::from(status)
}

/// Lines for stderr and the process exit status of a finished command
fn outcome(result: &Result<(), CliError>) -> (Vec<String>, u8) {
    match result {
        Ok(()) => (Vec::new(), 0),
        Err(CliError::Chain(failure)) => (
            vec![failure.message.to_string(), failure.source.to_string()],
            1,
        ),
        Err(e @ CliError::Render(_)) => (vec![e.to_string()], 1),
    }
}

async fn next(http: &dyn HttpGet, config: &Config, json: bool) -> Result<(), CliError> {
    let passes = PassChain::new(http, &config.endpoints)
        .next_passes_for_caller()
        .await?;
    print_passes(&passes, json)
}

async fn ip(http: &dyn HttpGet, config: &Config) -> Result<(), CliError> {
    let ip = lookup::resolve_my_ip(http, &config.endpoints.ip_url).await?;
    println!("{}", ip);
    Ok(())
}

async fn coords(
    http: &dyn HttpGet,
    config: &Config,
    ip: Option<String>,
) -> Result<(), CliError> {
    let ip = match ip {
        Some(ip) => ip,
        None => lookup::resolve_my_ip(http, &config.endpoints.ip_url).await?,
    };
    let coords = lookup::resolve_coordinates(http, &config.endpoints.geo_url, &ip).await?;
    println!("{}, {}", coords.latitude, coords.longitude);
    Ok(())
}

async fn passes(
    http: &dyn HttpGet,
    config: &Config,
    coords: Coordinates,
    json: bool,
) -> Result<(), CliError> {
    let passes = lookup::resolve_pass_times(http, &config.endpoints.passes_url, coords).await?;
    print_passes(&passes, json)
}

fn print_passes(passes: &lookup::PassList, json: bool) -> Result<(), CliError> {
    println!("{}", report::render(passes, json)?);
    Ok(())
}
