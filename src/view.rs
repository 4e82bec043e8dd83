//! Presentation-side helpers.
//!
//! The core never holds view handles. A view keeps its own coordinate-keyed
//! state ([`TokenLayer`]) updated only from [`crate::GameEvent`]s, and may
//! draw the world around the player as text ([`render_ascii`]).

mod layer;
mod render;

pub use layer::TokenLayer;
pub use render::render_ascii;
