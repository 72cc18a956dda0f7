//! `portcall` CLI -- scrape when2meet availabilities and report the windows
//! where each port's directors overlap with the media team.
//!
//! ## Usage
//!
//! ```sh
//! # Compute schedules, scraping only groups with no stored table
//! portcall --config portcall.toml
//!
//! # Force re-scraping of every group
//! portcall --refresh
//!
//! # Stored tables only; a missing table fails that group
//! portcall --offline
//!
//! # Machine-readable output
//! portcall --json
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use portcall_cli::config::Config;
use portcall_cli::report;
use portcall_cli::when2meet::When2MeetSource;
use portcall_core::consolidate::SingleSlotPolicy;
use portcall_core::schedule::{RunOptions, Scheduler, TableSource};
use portcall_core::store::CsvStore;

#[derive(Parser)]
#[command(
    name = "portcall",
    version,
    about = "Find overlap windows between port directors and the media team"
)]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long, default_value = "portcall.toml")]
    config: PathBuf,

    /// Re-acquire every table even when a stored copy exists
    #[arg(long)]
    refresh: bool,

    /// Never touch the network; a group without a stored table is skipped
    #[arg(long, conflicts_with = "refresh")]
    offline: bool,

    /// Override the stored-table directory from the config
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Override the minimum number of available media directors per slot
    #[arg(long)]
    min_media: Option<usize>,

    /// Emit single-slot runs as ranges instead of dropping them
    #[arg(long)]
    keep_single_slots: bool,

    /// Print the result as JSON instead of the text report
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let config = Config::load(&cli.config)?;
    let store = CsvStore::new(cli.data_dir.unwrap_or_else(|| config.data_dir.clone()));

    let options = RunOptions {
        refresh: cli.refresh,
        min_coordinators: cli.min_media.unwrap_or(config.min_coordinators),
        single_slot: if cli.keep_single_slots {
            SingleSlotPolicy::Emit
        } else {
            SingleSlotPolicy::Drop
        },
    };

    let source = if cli.offline {
        None
    } else {
        Some(When2MeetSource::new(config.timeout()).context("Failed to build the HTTP client")?)
    };
    let source_ref = source.as_ref().map(|s| s as &dyn TableSource);

    let registry = config.registry();
    let result = Scheduler::new(&store, source_ref)
        .run(&registry, &options)
        .context("Scheduling run failed")?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print!("{}", report::render(&result));
    }

    Ok(())
}
