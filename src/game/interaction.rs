//! Pickup and merge rules.
//!
//! | held    | cell            | effect                        |
//! |---------|-----------------|-------------------------------|
//! | empty   | token           | pickup: held ← cell, cell ← ∅ |
//! | token   | empty           | nothing                       |
//! | token h | token v, v = h  | merge: cell ← 2h, held ← ∅    |
//! | token h | token v, v ≠ h  | blocked                       |
//! | empty   | empty           | nothing                       |

use crate::game::Token;

/// State change implied by a (held, cell) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Move the cell's token into the player's hand.
    Pickup(Token),
    /// Replace the cell's token with this merged token and empty the hand.
    Merge(Token),
    /// Both sides hold tokens that cannot combine.
    Blocked,
    /// Nothing to do.
    Nothing,
}

/// Apply the transition table. Pure.
#[must_use]
pub fn resolve(held: Option<Token>, cell: Option<Token>) -> Transition {
    match (held, cell) {
        (None, Some(v)) => Transition::Pickup(v),
        (Some(h), Some(v)) if h == v => h.doubled().map_or(Transition::Blocked, Transition::Merge),
        (Some(_), Some(_)) => Transition::Blocked,
        (Some(_) | None, None) => Transition::Nothing,
    }
}

/// Result of an interaction request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionOutcome {
    /// The player picked up this token.
    PickedUp(Token),
    /// The cell now holds this merged token.
    Merged(Token),
    /// Held and cell tokens differ; nothing changed.
    Blocked,
    /// Nothing to pick up or merge, or the cell was never seen; nothing changed.
    Nothing,
    /// The cell is farther than the interaction radius; nothing changed.
    OutOfRange,
}

impl InteractionOutcome {
    /// Check if the interaction changed any state.
    #[must_use]
    pub const fn changed_state(self) -> bool {
        matches!(self, Self::PickedUp(_) | Self::Merged(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(v: u64) -> Option<Token> {
        Token::new(v)
    }

    #[test]
    fn test_pickup() {
        assert_eq!(resolve(None, t(4)), Transition::Pickup(Token::new(4).unwrap()));
    }

    #[test]
    fn test_drop_onto_empty_is_nothing() {
        assert_eq!(resolve(t(2), None), Transition::Nothing);
    }

    #[test]
    fn test_merge_equal() {
        assert_eq!(resolve(t(2), t(2)), Transition::Merge(Token::new(4).unwrap()));
    }

    #[test]
    fn test_unequal_blocked() {
        assert_eq!(resolve(t(2), t(4)), Transition::Blocked);
        assert_eq!(resolve(t(8), t(1)), Transition::Blocked);
    }

    #[test]
    fn test_both_empty() {
        assert_eq!(resolve(None, None), Transition::Nothing);
    }

    #[test]
    fn test_overflowing_merge_blocked() {
        let top = t(1 << 63);
        assert_eq!(resolve(top, top), Transition::Blocked);
    }
}
