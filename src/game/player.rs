//! Player state management.

use crate::game::{CellCoord, Token};

/// The player's grid position and single-slot inventory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerState {
    /// Cell the player stands in.
    pub position: CellCoord,
    /// Token in hand (None = empty-handed).
    pub held: Option<Token>,
}

impl PlayerState {
    /// Create an empty-handed player at the given cell.
    #[must_use]
    pub const fn new(position: CellCoord) -> Self {
        Self {
            position,
            held: None,
        }
    }

    /// Move by a relative offset. There are no walls.
    pub fn move_by(&mut self, di: i64, dj: i64) {
        self.position = self.position.offset(di, dj);
    }

    /// Check if a cell is within `radius` (Chebyshev) of the player.
    #[must_use]
    pub fn can_reach(&self, coord: CellCoord, radius: u32) -> bool {
        self.position.chebyshev(coord) <= u64::from(radius)
    }
}
