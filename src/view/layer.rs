//! View-owned mapping from cell to displayed token.

use std::collections::HashMap;

use crate::game::{CellCoord, GameEvent, Token};

/// The token markers a view currently shows.
///
/// Holds one entry per visible cell that has a token, and nothing else.
#[derive(Debug, Clone, Default)]
pub struct TokenLayer {
    markers: HashMap<CellCoord, Token>,
    held: Option<Token>,
    won: bool,
}

impl TokenLayer {
    /// Create an empty layer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one notification.
    pub fn apply(&mut self, event: &GameEvent) {
        match *event {
            GameEvent::CellRendered {
                coord,
                value: Some(token),
            } => {
                self.markers.insert(coord, token);
            }
            GameEvent::CellRendered { coord, value: None } | GameEvent::CellUnrendered { coord } => {
                self.markers.remove(&coord);
            }
            GameEvent::InventoryChanged { held } => self.held = held,
            GameEvent::Victory => self.won = true,
            GameEvent::PlayerMoved { .. } => {}
        }
    }

    /// Apply a batch of notifications in order.
    pub fn apply_all<'a>(&mut self, events: impl IntoIterator<Item = &'a GameEvent>) {
        for event in events {
            self.apply(event);
        }
    }

    /// Token shown at a cell, if any.
    #[must_use]
    pub fn marker(&self, coord: CellCoord) -> Option<Token> {
        self.markers.get(&coord).copied()
    }

    /// Number of markers shown.
    #[must_use]
    pub fn len(&self) -> usize {
        self.markers.len()
    }

    /// Check if no markers are shown.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    /// Token shown in the inventory panel.
    #[must_use]
    pub const fn held(&self) -> Option<Token> {
        self.held
    }

    /// Check if the victory banner has been shown.
    #[must_use]
    pub const fn won(&self) -> bool {
        self.won
    }
}
