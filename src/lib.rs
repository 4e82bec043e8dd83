// Allow unwrap and unreadable literals in tests (test code is not production)
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::unreadable_literal))]
//! Cellbits: the state engine for an infinite, map-anchored token merging game.
//!
//! The world is an unbounded grid of cells laid over latitude/longitude space.
//! Each cell may hold a power-of-two token. The player carries at most one
//! token, picks tokens up from nearby cells and merges equal tokens into their
//! double. Everything the player has touched survives restarts.
//!
//! This crate provides:
//! - Deterministic per-cell token generation
//! - A world store that materializes cells on first sight and never forgets them
//! - Viewport streaming (load/unload events as the visible region moves)
//! - Range-gated pickup/merge rules with a sticky victory flag
//! - Snapshot persistence through a minimal key/value store
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │     View layer / CLI (adapters)     │
//! ├─────────────────────────────────────┤
//! │   GameSession (events in, out)      │
//! ├──────────────┬──────────────────────┤
//! │ Viewport     │ Interaction rules    │
//! ├──────────────┴──────────────────────┤
//! │ WorldStore  ◄── Generator           │
//! ├─────────────────────────────────────┤
//! │ Snapshot codec + DurableStore       │
//! └─────────────────────────────────────┘
//! ```

pub mod config;
pub mod error;
pub mod game;
pub mod persistence;
pub mod view;

pub use config::{GameConfig, GeoPoint, SpawnTable};
pub use error::{ConfigError, GameError, GameResult, SnapshotError, StoreError};

// Re-export key game types at crate root for convenience
pub use game::{
    CellCoord, CellRecord, GameEvent, GameSession, Generator, InteractionOutcome, LoadOutcome,
    PlayerState, Token, ViewBounds, WorldStore,
};
pub use persistence::{DurableStore, FileStore, MemoryStore, SAVE_KEY, Snapshot};
