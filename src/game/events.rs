//! Notifications emitted by the core for the view layer.

use crate::game::{CellCoord, Token};

/// A notification produced while handling one external event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// A cell entered the view, or an active cell's value changed.
    ///
    /// `value: None` means the cell has no token and any token element for it
    /// must be removed.
    CellRendered {
        /// The cell.
        coord: CellCoord,
        /// Its current token.
        value: Option<Token>,
    },
    /// A cell left the view. Its record is untouched.
    CellUnrendered {
        /// The cell.
        coord: CellCoord,
    },
    /// The player's inventory changed.
    InventoryChanged {
        /// The token now in hand.
        held: Option<Token>,
    },
    /// The player's grid position changed.
    PlayerMoved {
        /// New position.
        position: CellCoord,
    },
    /// The victory threshold was reached (or a won session was restored).
    Victory,
}
