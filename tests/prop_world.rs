//! Property-based tests for world generation and the interaction rules.
//!
//! Run with: cargo test --release prop_world

#![allow(missing_docs)]
#![allow(clippy::unwrap_used)]

use proptest::prelude::*;

use cellbits::game::{Generator, ViewBounds, ViewportStreamer, WorldStore, check_invariants};
use cellbits::{
    CellCoord, DurableStore, GameConfig, GameSession, GeoPoint, InteractionOutcome, MemoryStore,
    PlayerState, SAVE_KEY, Snapshot, Token,
};

const CELL_SIZE: f64 = 1e-4;

fn session_with(held: Option<Token>, cells: Vec<(CellCoord, Option<Token>)>) -> GameSession<MemoryStore> {
    let mut player = PlayerState::new(CellCoord::new(0, 0));
    player.held = held;
    let snapshot = Snapshot::capture(&player, false, cells);
    let mut store = MemoryStore::new();
    store.set(SAVE_KEY, &snapshot.encode().unwrap()).unwrap();

    let config = GameConfig {
        spawn_origin: GeoPoint { lat: 0.0, lng: 0.0 },
        view_radius: 2,
        ..GameConfig::default()
    };
    GameSession::start(config, store).0
}

/// Total token value on the board plus the one in hand.
fn token_sum(session: &GameSession<MemoryStore>) -> u128 {
    let board: u128 = session
        .world()
        .iter()
        .filter_map(|r| r.value)
        .map(|t| u128::from(t.value()))
        .sum();
    board + session.player().held.map_or(0, |t| u128::from(t.value()))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(1000))]

    /// Generation is a pure function of the coordinate.
    #[test]
    fn prop_generate_deterministic(i in any::<i64>(), j in any::<i64>()) {
        let coord = CellCoord::new(i, j);
        let first = Generator::default().generate(coord);
        let second = Generator::default().generate(coord);
        prop_assert_eq!(first, second);
        if let Some(token) = first {
            prop_assert!([1, 2, 4].contains(&token.value()));
        }
    }

    /// Generation order never changes what a cell holds.
    #[test]
    fn prop_materialize_order_independent(coords in prop::collection::vec((-50i64..50, -50i64..50), 1..40)) {
        let mut forward = WorldStore::new(Generator::default());
        let mut backward = WorldStore::new(Generator::default());
        for &(i, j) in &coords {
            forward.get(CellCoord::new(i, j));
        }
        for &(i, j) in coords.iter().rev() {
            backward.get(CellCoord::new(i, j));
        }
        prop_assert_eq!(forward.export_snapshot(), backward.export_snapshot());
    }

    /// Interactions beyond the radius change nothing.
    #[test]
    fn prop_out_of_range_is_inert(di in -20i64..20, dj in -20i64..20) {
        prop_assume!(di.abs().max(dj.abs()) > 3);
        let target = CellCoord::new(di, dj);
        let mut session = session_with(None, vec![(target, Token::new(1))]);
        let before = session.snapshot();

        let outcome = session.interact(target).unwrap();
        prop_assert_eq!(outcome, InteractionOutcome::OutOfRange);
        prop_assert_eq!(session.snapshot(), before);
    }

    /// Equal tokens merge into their double, with the hand emptied.
    #[test]
    fn prop_merge_doubles(k in 0u32..63, di in -3i64..=3, dj in -3i64..=3) {
        let value = Token::new(1u64 << k).unwrap();
        let target = CellCoord::new(di, dj);
        let mut session = session_with(Some(value), vec![(target, Some(value))]);

        let outcome = session.interact(target).unwrap();
        let doubled = Token::new(1u64 << (k + 1)).unwrap();
        prop_assert_eq!(outcome, InteractionOutcome::Merged(doubled));
        prop_assert_eq!(session.player().held, None);
        prop_assert_eq!(session.world().peek(target).unwrap().value, Some(doubled));
        prop_assert_eq!(session.has_won(), doubled.value() >= 8);
    }

    /// Differing tokens block the interaction.
    #[test]
    fn prop_mismatch_blocks(a in 0u32..64, b in 0u32..64) {
        prop_assume!(a != b);
        let held = Token::new(1u64 << a);
        let target = CellCoord::new(1, 0);
        let mut session = session_with(held, vec![(target, Token::new(1u64 << b))]);
        let before = session.snapshot();

        prop_assert_eq!(session.interact(target).unwrap(), InteractionOutcome::Blocked);
        prop_assert_eq!(session.snapshot(), before);
    }

    /// Interactions only move token value around; they never create or destroy it.
    #[test]
    fn prop_interactions_conserve_tokens(
        seeds in prop::collection::vec((-3i64..=3, -3i64..=3, 0u32..3), 0..20),
        targets in prop::collection::vec((-3i64..=3, -3i64..=3), 1..60),
    ) {
        let cells = seeds
            .iter()
            .map(|&(i, j, k)| (CellCoord::new(i, j), Token::new(1u64 << k)))
            .collect();
        let mut session = session_with(None, cells);
        let total = token_sum(&session);

        for &(i, j) in &targets {
            session.interact(CellCoord::new(i, j)).unwrap();
            prop_assert_eq!(token_sum(&session), total);
        }
        prop_assert!(check_invariants(&session).is_empty());
    }

    /// Recomputing with the same bounds is a no-op.
    #[test]
    fn prop_viewport_idempotent(i in -1000i64..1000, j in -1000i64..1000, radius in 0u32..6) {
        let mut world = WorldStore::new(Generator::default());
        let mut viewport = ViewportStreamer::new(CELL_SIZE);
        let mut events = Vec::new();
        let bounds = ViewBounds::around(CellCoord::new(i, j), radius, CELL_SIZE);

        viewport.recompute(bounds, &mut world, &mut events).unwrap();
        let side = usize::try_from(2 * radius + 1).unwrap();
        prop_assert_eq!(viewport.active_len(), side * side);

        events.clear();
        let diff = viewport.recompute(bounds, &mut world, &mut events).unwrap();
        prop_assert!(diff.is_empty());
        prop_assert!(events.is_empty());
    }

    /// Shifting the view one cell swaps exactly one edge.
    #[test]
    fn prop_viewport_one_cell_shift(i in -1000i64..1000, j in -1000i64..1000, radius in 0u32..6) {
        let mut world = WorldStore::new(Generator::default());
        let mut viewport = ViewportStreamer::new(CELL_SIZE);
        let mut events = Vec::new();
        let center = CellCoord::new(i, j);

        viewport
            .recompute(ViewBounds::around(center, radius, CELL_SIZE), &mut world, &mut events)
            .unwrap();
        let shifted = ViewBounds::around(center.offset(0, 1), radius, CELL_SIZE);
        let diff = viewport.recompute(shifted, &mut world, &mut events).unwrap();

        let side = usize::try_from(2 * radius + 1).unwrap();
        prop_assert_eq!(diff.loaded, side);
        prop_assert_eq!(diff.unloaded, side);
    }
}
