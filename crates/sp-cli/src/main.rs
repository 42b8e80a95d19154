//! SeatPlan command line
//!
//! Usage:
//!   seatplan generate --config seating.yaml          - Print a seating plan
//!   seatplan generate --config seating.yaml --lock 4 --shuffles 2
//!   seatplan roster --config seating.yaml            - Print the built roster

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use sp_engine::{SeatingConfig, SeatingSession};

#[derive(Parser)]
#[command(name = "seatplan", about = "Seat assignment for rosters of people")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a seating plan and print it as JSON
    Generate {
        /// Config file (.json, .yaml, .yml)
        #[arg(short, long)]
        config: PathBuf,
        /// Seed for reproducible output
        #[arg(short, long)]
        seed: Option<u64>,
        /// Extra re-shuffles after the first generation
        #[arg(long, default_value_t = 0)]
        shuffles: u32,
        /// Lock a person to the slot they hold in the first generation; repeatable
        #[arg(short, long = "lock")]
        locks: Vec<u32>,
        /// Pretty-print JSON
        #[arg(short, long)]
        pretty: bool,
    },
    /// Print the roster built from a config
    Roster {
        /// Config file (.json, .yaml, .yml)
        #[arg(short, long)]
        config: PathBuf,
        /// Seed for reproducible number randomization
        #[arg(short, long)]
        seed: Option<u64>,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            config,
            seed,
            shuffles,
            locks,
            pretty,
        } => generate(&config, seed, shuffles, &locks, pretty),
        Commands::Roster { config, seed } => print_roster(&config, seed),
    }
}

fn open_session(path: &Path, seed: Option<u64>) -> Result<SeatingSession> {
    let config = SeatingConfig::load(path)
        .with_context(|| format!("Failed to load config {}", path.display()))?;

    let session = match seed {
        Some(seed) => SeatingSession::with_seed(config, seed),
        None => SeatingSession::new(config),
    };
    session.context("Failed to build seating session")
}

fn generate(
    path: &Path,
    seed: Option<u64>,
    shuffles: u32,
    locks: &[u32],
    pretty: bool,
) -> Result<()> {
    let mut session = open_session(path, seed)?;

    for id in session.lock_all(locks) {
        log::warn!("person {} is not seated; lock ignored", id);
    }
    for _ in 0..shuffles {
        session.shuffle();
    }

    let plan = session.plan();
    let json = if pretty {
        plan.to_json()?
    } else {
        serde_json::to_string(&plan).context("Failed to serialize plan")?
    };
    println!("{}", json);
    Ok(())
}

fn print_roster(path: &Path, seed: Option<u64>) -> Result<()> {
    let session = open_session(path, seed)?;
    let roster = session.roster();
    let json = serde_json::to_string_pretty(roster).context("Failed to serialize roster")?;
    println!("{}", json);
    Ok(())
}
