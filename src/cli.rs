//! CLI command implementations for Cellbits.

pub(crate) mod inspect;
pub(crate) mod play;

mod output;

use cellbits::{FileStore, GameConfig, GameSession, LoadOutcome};
use clap::ValueEnum;
use std::error::Error;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

/// Session backed by the on-disk store.
pub(crate) type Session = GameSession<FileStore>;

/// Compass direction for the `step` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum Direction {
    /// Increasing latitude.
    North,
    /// Decreasing latitude.
    South,
    /// Increasing longitude.
    East,
    /// Decreasing longitude.
    West,
}

impl Direction {
    /// Unit offset `(di, dj)` for this direction.
    pub(crate) const fn delta(self) -> (i64, i64) {
        match self {
            Self::North => (1, 0),
            Self::South => (-1, 0),
            Self::East => (0, 1),
            Self::West => (0, -1),
        }
    }
}

/// CLI error type.
#[derive(Debug)]
pub(crate) struct CliError {
    message: String,
}

impl CliError {
    /// Create a new CLI error.
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for CliError {}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        Self::new(e.to_string())
    }
}

impl From<cellbits::GameError> for CliError {
    fn from(e: cellbits::GameError) -> Self {
        Self::new(e.to_string())
    }
}

impl From<cellbits::ConfigError> for CliError {
    fn from(e: cellbits::ConfigError) -> Self {
        Self::new(e.to_string())
    }
}

/// Subdirectory of the home directory holding saved sessions.
const DATA_SUBDIR: &str = ".cellbits";

/// Get the default data directory (~/.cellbits).
fn default_data_dir() -> Result<PathBuf, CliError> {
    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .map_err(|_| CliError::new("cannot determine home directory; pass --data-dir"))?;
    Ok(Path::new(&home).join(DATA_SUBDIR))
}

/// Load configuration and the saved session.
///
/// A corrupt save is reported on stderr and replaced by a fresh session.
pub(crate) fn open_session(
    data_dir: Option<PathBuf>,
    config: Option<&Path>,
) -> Result<Session, CliError> {
    let config = match config {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };
    let dir = match data_dir {
        Some(dir) => dir,
        None => default_data_dir()?,
    };
    let store = FileStore::open(&dir)
        .map_err(|e| CliError::new(format!("Failed to open {}: {e}", dir.display())))?;

    let (mut session, outcome) = GameSession::start(config, store);
    if outcome == LoadOutcome::Discarded {
        eprintln!("Saved session was unreadable and has been discarded; starting over.");
    }
    // Startup notifications are not interesting on the command line.
    session.take_events();
    Ok(session)
}
