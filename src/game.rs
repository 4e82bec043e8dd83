//! Game layer for Cellbits.
//!
//! Implements the game rules on an unbounded grid:
//! - Deterministic token generation per cell
//! - World store with one-shot materialization
//! - Viewport streaming
//! - Pickup/merge interaction rules
//! - Session facade tying them to persistence

mod coord;
mod events;
mod generator;
mod interaction;
mod invariants;
mod player;
mod session;
mod token;
mod viewport;
mod world;

pub use coord::CellCoord;
pub use events::GameEvent;
pub use generator::{Generator, luck};
pub use interaction::{InteractionOutcome, Transition, resolve};
pub use invariants::{InvariantViolation, assert_invariants, check_invariants};
pub use player::PlayerState;
pub use session::{GameSession, LoadOutcome};
pub use token::Token;
pub use viewport::{CellRect, ViewBounds, ViewDiff, ViewportStreamer};
pub use world::{CellRecord, WorldStore};
