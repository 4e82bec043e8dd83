//! Cellbits CLI - play the token merging game from a terminal.
//!
//! Every invocation is one discrete game event: the saved session is loaded,
//! the event is applied, and the result is persisted before exiting.

// Allow print in the CLI binary
#![allow(clippy::print_stdout, clippy::print_stderr)]

mod cli;

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{EnvFilter, fmt};

/// Cellbits - collect and merge tokens on an infinite map grid
#[derive(Parser, Debug)]
#[command(name = "cellbits")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Directory holding the saved session (default: ~/.cellbits)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// TOML file overriding game settings
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Show position, inventory and victory state
    Status {
        /// Print machine-readable JSON
        #[arg(long)]
        json: bool,
    },

    /// Draw the cells around the player
    Look {
        /// Cells to show on each side of the player (default: config view radius)
        #[arg(short, long)]
        radius: Option<u32>,
    },

    /// Move the player by a relative number of cells
    Move {
        /// Rows to move (positive is north)
        #[arg(allow_negative_numbers = true)]
        di: i64,
        /// Columns to move (positive is east)
        #[arg(allow_negative_numbers = true)]
        dj: i64,
    },

    /// Move the player one or more cells in a compass direction
    Step {
        /// Direction to move
        direction: cli::Direction,
        /// Number of cells
        #[arg(default_value = "1")]
        count: u32,
    },

    /// Jump to the cell containing a latitude/longitude
    Goto {
        /// Latitude in degrees
        #[arg(allow_negative_numbers = true)]
        lat: f64,
        /// Longitude in degrees
        #[arg(allow_negative_numbers = true)]
        lng: f64,
    },

    /// Pick up from, or merge into, a cell
    Interact {
        /// Cell row
        #[arg(allow_negative_numbers = true)]
        i: i64,
        /// Cell column
        #[arg(allow_negative_numbers = true)]
        j: i64,
    },

    /// Print the saved session snapshot as JSON
    Export,

    /// Discard the saved session and start over
    Reset,
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);

    let result = cli::open_session(args.data_dir, args.config.as_deref()).and_then(|mut session| {
        match args.command {
            Commands::Status { json } => cli::inspect::status(&session, json),
            Commands::Look { radius } => cli::inspect::look(&mut session, radius),
            Commands::Move { di, dj } => cli::play::move_by(&mut session, di, dj),
            Commands::Step { direction, count } => cli::play::step(&mut session, direction, count),
            Commands::Goto { lat, lng } => cli::play::goto(&mut session, lat, lng),
            Commands::Interact { i, j } => cli::play::interact(&mut session, i, j),
            Commands::Export => cli::inspect::export(&session),
            Commands::Reset => cli::play::reset(&mut session),
        }
    });

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    // Ignore error if already set.
    let _ = fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .try_init();
}
