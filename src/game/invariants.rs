//! Session invariants - sanity checks that detect bugs.
//!
//! These should NEVER trigger. Token values are power-of-two by construction,
//! so the checks here cover the bookkeeping between the world store and the
//! viewport that the type system cannot see.

use crate::game::GameSession;
use crate::persistence::DurableStore;

/// Invariant violation error.
#[derive(Debug, Clone)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub message: String,
}

impl std::fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Invariant violation: {}", self.message)
    }
}

impl std::error::Error for InvariantViolation {}

/// Check all session invariants.
///
/// Returns a list of violations found, or empty if all invariants hold.
#[must_use]
pub fn check_invariants<S: DurableStore>(session: &GameSession<S>) -> Vec<InvariantViolation> {
    let mut violations = Vec::new();
    let world = session.world();
    let viewport = session.viewport();

    // Records are filed under their own coordinate
    for (key, record) in world.entries() {
        if *key != record.coord {
            violations.push(InvariantViolation {
                message: format!("Record for {} filed under {}", record.coord, key),
            });
        }
    }

    // Everything on screen exists in the world and inside the view rectangle
    for coord in viewport.active() {
        if world.peek(coord).is_none() {
            violations.push(InvariantViolation {
                message: format!("Active cell {coord} was never materialized"),
            });
        }
        match viewport.rect() {
            Some(rect) if rect.contains(coord) => {}
            _ => violations.push(InvariantViolation {
                message: format!("Active cell {coord} lies outside the view rectangle"),
            }),
        }
    }

    // The active set covers the whole rectangle
    if let Some(rect) = viewport.rect() {
        let active = viewport.active_len() as u128;
        if active != rect.cell_count() {
            violations.push(InvariantViolation {
                message: format!(
                    "View rectangle covers {} cells but {} are active",
                    rect.cell_count(),
                    active
                ),
            });
        }
    }

    violations
}

/// Assert all session invariants hold, panicking if any are violated.
///
/// Only active in debug builds. No-op in release builds.
///
/// # Panics
///
/// Panics with detailed message if any invariant is violated.
#[cfg(debug_assertions)]
pub fn assert_invariants<S: DurableStore>(session: &GameSession<S>) {
    let violations = check_invariants(session);
    if !violations.is_empty() {
        let messages: Vec<_> = violations.iter().map(|v| v.message.as_str()).collect();
        panic!("Session invariant violations:\n  - {}", messages.join("\n  - "));
    }
}

/// No-op in release builds.
#[cfg(not(debug_assertions))]
pub fn assert_invariants<S: DurableStore>(_session: &GameSession<S>) {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::game::{CellCoord, ViewBounds};
    use crate::persistence::MemoryStore;

    #[test]
    fn test_fresh_session_valid() {
        let (session, _) = GameSession::start(GameConfig::default(), MemoryStore::new());
        let violations = check_invariants(&session);
        assert!(violations.is_empty(), "Unexpected violations: {violations:?}");
    }

    #[test]
    fn test_valid_after_view_changes() {
        let (mut session, _) = GameSession::start(GameConfig::default(), MemoryStore::new());
        let center = session.player().position;
        let cell = session.config().cell_size;
        session.update_view(ViewBounds::around(center, 3, cell)).unwrap();
        session.move_by(5, -2).unwrap();
        session
            .update_view(ViewBounds::around(CellCoord::new(0, 0), 1, cell))
            .unwrap();
        let violations = check_invariants(&session);
        assert!(violations.is_empty(), "Unexpected violations: {violations:?}");
    }

    #[test]
    fn test_violation_display() {
        let v = InvariantViolation {
            message: "test".to_string(),
        };
        assert_eq!(v.to_string(), "Invariant violation: test");
    }
}
