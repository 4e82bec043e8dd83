//! Error types for the game engine.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::game::CellCoord;

/// Failure of the durable key/value store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Underlying I/O failed while accessing a key.
    #[error("store I/O failed for key {key:?}: {source}")]
    Io {
        /// Key being accessed.
        key: String,
        /// The I/O error.
        #[source]
        source: io::Error,
    },
    /// Key contains characters the backend cannot represent.
    #[error("invalid store key: {0:?}")]
    InvalidKey(String),
}

/// A saved snapshot that cannot be restored.
///
/// Every variant is treated as corruption: the artifact is discarded and a
/// fresh session starts.
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// The text is not a well-formed snapshot document.
    #[error("malformed snapshot: {0}")]
    Json(#[from] serde_json::Error),
    /// A cell key is not of the form `"i,j"`.
    #[error("bad cell key: {0:?}")]
    BadKey(String),
    /// A stored token value is zero or not a power of two.
    #[error("invalid token value {value} in {location}")]
    InvalidToken {
        /// Where the value was found (`"heldToken"` or a cell key).
        location: String,
        /// The offending value.
        value: u64,
    },
}

/// Invalid game configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file could not be read.
    #[error("failed to read config {path}: {source}")]
    Io {
        /// Path of the config file.
        path: PathBuf,
        /// The I/O error.
        #[source]
        source: io::Error,
    },
    /// Config text is not valid TOML for [`crate::GameConfig`].
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    /// Values parse but violate a constraint.
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Umbrella error for game operations.
#[derive(Debug, Error)]
pub enum GameError {
    /// Durable store failed.
    #[error(transparent)]
    Store(#[from] StoreError),
    /// Snapshot could not be decoded.
    #[error(transparent)]
    Snapshot(#[from] SnapshotError),
    /// A cell was written before it was ever materialized.
    #[error("cell {0} has never been materialized")]
    Unmaterialized(CellCoord),
}

/// Result type for game operations.
pub type GameResult<T> = Result<T, GameError>;
