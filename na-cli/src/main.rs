//! naapi - command-line client for the NetActuate cloud API.
//!
//! Reads the API key from `NETACTUATE_API_KEY` or the config file and
//! prints API results as tables or JSON.

mod commands;

use std::path::Path;

use clap::{Parser, Subcommand};
use tracing::info;

use na_core::config::{AppConfig, ApiVersion};
use na_core::constants;
use na_core::error::NaResult;
use na_core::logging::{self, LogOptions};

/// NetActuate cloud API client.
#[derive(Parser)]
#[command(
    name = "naapi",
    version,
    about = "NetActuate cloud API client",
    long_about = "A command-line client for the NetActuate cloud server API.\n\
                  Manage servers, packages, jobs and BGP sessions from the terminal."
)]
struct Cli {
    /// Path to the configuration file.
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Enable verbose logging (debug level).
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format (text, json).
    #[arg(short = 'f', long, global = true, default_value = "text")]
    format: OutputFormat,

    /// API version to talk (v1, v2). Overrides config.
    #[arg(long = "api-version", global = true)]
    api_version: Option<ApiVersion>,

    /// API host override, with or without scheme.
    #[arg(long, global = true)]
    host: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

/// Output format for CLI responses.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// JSON output for scripting.
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage servers and their packages.
    Servers {
        #[command(subcommand)]
        action: commands::servers::ServersAction,
    },
    /// List datacenter locations.
    Locations,
    /// List VM plans.
    Plans {
        /// Only plans available at this location.
        #[arg(short, long)]
        location: Option<String>,
    },
    /// List installable OS images.
    Images,
    /// Show the state of one server job.
    Job {
        /// Package id of the server.
        mbpkgid: u64,
        /// Job id returned by the action.
        job_id: u64,
        /// Poll until the job leaves the working state.
        #[arg(short, long)]
        wait: bool,
        /// Seconds between polls when waiting.
        #[arg(long, default_value = "5")]
        interval: u64,
    },
    /// List the jobs of a server.
    Jobs {
        /// Package id of the server.
        mbpkgid: u64,
    },
    /// BGP sessions, groups and prefixes.
    Bgp {
        #[command(subcommand)]
        action: commands::bgp::BgpAction,
    },
}

#[tokio::main]
async fn main() -> NaResult<()> {
    let cli = Cli::parse();

    let mut config = match cli.config.as_deref() {
        Some(path) => AppConfig::load_from_file(Path::new(path))?,
        None => AppConfig::load_default()?,
    };

    // No resolvable data dir means no log file; stderr still works.
    let log_dir = config.effective_log_dir().ok();
    let log_options = LogOptions::from_config(&config.logging, log_dir, cli.verbose);
    let _guard = logging::init_logging(&log_options)?;

    if let Ok(key) = std::env::var(constants::API_KEY_ENV) {
        if !key.trim().is_empty() {
            config.api.key = key;
        }
    }
    if let Some(version) = cli.api_version {
        config.api.version = version;
    }
    if let Some(host) = cli.host {
        config.api.host = Some(host);
    }

    info!("naapi v{} (api {})", constants::APP_VERSION, config.api.version);

    match cli.command {
        Commands::Servers { action } => {
            commands::servers::run(&config.api, action, cli.format).await
        }
        Commands::Locations => commands::catalog::locations(&config.api, cli.format).await,
        Commands::Plans { location } => {
            commands::catalog::plans(&config.api, location.as_deref(), cli.format).await
        }
        Commands::Images => commands::catalog::images(&config.api, cli.format).await,
        Commands::Job {
            mbpkgid,
            job_id,
            wait,
            interval,
        } => commands::jobs::job(&config.api, mbpkgid, job_id, wait, interval, cli.format).await,
        Commands::Jobs { mbpkgid } => commands::jobs::jobs(&config.api, mbpkgid, cli.format).await,
        Commands::Bgp { action } => commands::bgp::run(&config.api, action, cli.format).await,
    }
}
