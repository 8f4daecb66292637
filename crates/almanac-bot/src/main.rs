//! Almanac: deterministic campaign weather for Discord.
//!
//! Every region gets the same weather for the same date no matter when or
//! how often it is asked. This binary loads the region configuration and
//! either posts once (`daily`, `weekly`), prints (`preview`, `validate`),
//! or runs the posting schedule (`schedule`).
//!
//! # Startup Sequence
//!
//! 1. Parse the command line
//! 2. Initialize structured logging (tracing), `RUST_LOG` or `info`
//! 3. Load `almanac-config.yaml` and apply environment overrides
//! 4. Switch to the configured log level unless `RUST_LOG` is set
//! 5. Validate regions and build the registry
//! 6. Run the subcommand

mod commands;
mod error;
mod scheduler;

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Registry, fmt, reload};

use crate::commands::Context;

#[derive(Parser)]
#[command(
    name = "almanac",
    about = "Deterministic campaign weather for Discord webhooks",
    version,
    propagate_version = true
)]
struct Cli {
    /// Path to the YAML configuration (default: $ALMANAC_CONFIG, then
    /// ./almanac-config.yaml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Post today's weather to each region's webhook
    Daily {
        /// Only this region
        #[arg(short, long)]
        region: Option<String>,

        /// Date to post instead of today (YYYY-MM-DD)
        #[arg(short, long)]
        date: Option<NaiveDate>,
    },

    /// Post the consolidated seven-day forecast for all regions
    Weekly {
        /// First day of the forecast instead of today (YYYY-MM-DD)
        #[arg(short, long)]
        date: Option<NaiveDate>,
    },

    /// Print the messages that would be posted
    Preview {
        /// Only this region
        #[arg(short, long)]
        region: Option<String>,

        /// Date instead of today (YYYY-MM-DD)
        #[arg(short, long)]
        date: Option<NaiveDate>,

        /// Preview the weekly forecast instead of the daily update
        #[arg(short, long)]
        weekly: bool,
    },

    /// Check the configuration and list every problem
    Validate,

    /// Post on schedule until interrupted
    Schedule,
}

/// Application entry point.
///
/// # Errors
///
/// Returns an error if configuration is invalid or the command fails; the
/// process then exits non-zero.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // 1. Initialize structured logging.
    let from_env = EnvFilter::try_from_default_env().ok();
    let level_from_env = from_env.is_some();
    let (filter, filter_handle) = startup_filter(from_env);
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true))
        .init();

    // 2. Load configuration.
    let config = commands::load_config(cli.config.as_deref())?;
    if !level_from_env {
        filter_handle.reload(EnvFilter::new(&config.logging.level))?;
    }

    info!(
        regions = config.regions.len(),
        utc_offset_minutes = config.schedule.utc_offset_minutes,
        log_level = %config.logging.level,
        "almanac starting"
    );

    // 3. Run the subcommand.
    match cli.command {
        Commands::Validate => commands::validate(&config)?,
        Commands::Daily { region, date } => {
            let ctx = Context::new(config)?;
            commands::daily(&ctx, region.as_deref(), date).await?;
        }
        Commands::Weekly { date } => commands::weekly(&Context::new(config)?, date).await?,
        Commands::Preview {
            region,
            date,
            weekly,
        } => commands::preview(&Context::new(config)?, region.as_deref(), date, weekly)?,
        Commands::Schedule => scheduler::run(&Context::new(config)?).await?,
    }

    Ok(())
}

type FilterLayer = reload::Layer<EnvFilter, Registry>;
type FilterHandle = reload::Handle<EnvFilter, Registry>;

/// Log filter used until the configuration is loaded: `RUST_LOG` when set,
/// otherwise `info`. The handle swaps in the configured level afterwards.
fn startup_filter(from_env: Option<EnvFilter>) -> (FilterLayer, FilterHandle) {
    reload::Layer::new(from_env.unwrap_or_else(|| EnvFilter::new("info")))
}
