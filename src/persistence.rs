//! Session persistence.
//!
//! A session is saved as one JSON document under a single key of a minimal
//! key/value store. The document format is stable:
//!
//! ```json
//! {
//!   "playerCell": { "i": 369979, "j": -1220571 },
//!   "heldToken": 2,
//!   "hasWon": false,
//!   "cells": { "369979,-1220570": { "value": null } }
//! }
//! ```

mod snapshot;
mod store;

pub use snapshot::{CellEntry, PlayerCell, Snapshot};
pub use store::{DurableStore, FileStore, MemoryStore};

/// Store key holding the session snapshot.
pub const SAVE_KEY: &str = "gameState";
