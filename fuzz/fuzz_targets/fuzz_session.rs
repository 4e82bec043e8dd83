#![no_main]

//! Session event fuzzer.
//!
//! Drives a session with arbitrary moves, view changes, interactions and
//! reloads, checking the bookkeeping invariants after every step and that
//! interactions never change the total token value.

use arbitrary::Arbitrary;
use cellbits::game::check_invariants;
use cellbits::{GameConfig, GameSession, GeoPoint, LoadOutcome, MemoryStore, ViewBounds};
use libfuzzer_sys::fuzz_target;

/// One discrete event a front end could send.
#[derive(Arbitrary, Debug)]
enum Action {
    /// Relative move (small to keep the world bounded).
    Move { di: i8, dj: i8 },
    /// Absolute position in degrees.
    SetPosition { lat: f64, lng: f64 },
    /// Interact relative to the player.
    Interact { di: i8, dj: i8 },
    /// New visible bounds, relative to the player in cells.
    View { north: i8, south: i8, east: i8, west: i8 },
    /// Save and reload.
    Reload,
    /// Start over.
    Reset,
}

#[derive(Arbitrary, Debug)]
struct SessionInput {
    follow_player: bool,
    actions: Vec<Action>,
}

fn token_sum(session: &GameSession<MemoryStore>) -> u128 {
    let board: u128 = session
        .world()
        .iter()
        .filter_map(|r| r.value)
        .map(|t| u128::from(t.value()))
        .sum();
    board + session.player().held.map_or(0, |t| u128::from(t.value()))
}

fuzz_target!(|input: SessionInput| {
    let config = GameConfig {
        spawn_origin: GeoPoint { lat: 0.0, lng: 0.0 },
        follow_player: input.follow_player,
        view_radius: 3,
        ..GameConfig::default()
    };
    let cell_size = config.cell_size;
    let (mut session, _) = GameSession::start(config, MemoryStore::new());

    for action in input.actions.into_iter().take(64) {
        let position = session.player().position;
        match action {
            Action::Move { di, dj } => {
                session.move_by(i64::from(di), i64::from(dj)).unwrap();
            }
            Action::SetPosition { lat, lng } => {
                // Keep the player near the origin so views stay small.
                if (lat.abs() < 0.01 && lng.abs() < 0.01) || !lat.is_finite() || !lng.is_finite() {
                    session.set_position(lat, lng).unwrap();
                }
            }
            Action::Interact { di, dj } => {
                let before = token_sum(&session);
                let target = position.offset(i64::from(di % 5), i64::from(dj % 5));
                session.interact(target).unwrap();
                assert_eq!(token_sum(&session), before, "interaction changed token total");
            }
            Action::View { north, south, east, west } => {
                let base_i = position.i as f64 + 0.5;
                let base_j = position.j as f64 + 0.5;
                let bounds = ViewBounds::new(
                    (base_i + f64::from(north % 8)) * cell_size,
                    (base_i - f64::from(south % 8)) * cell_size,
                    (base_j + f64::from(east % 8)) * cell_size,
                    (base_j - f64::from(west % 8)) * cell_size,
                );
                session.update_view(bounds).unwrap();
            }
            Action::Reload => {
                session.save().unwrap();
                let before = session.snapshot();
                assert_eq!(session.load(), LoadOutcome::Restored);
                assert_eq!(session.snapshot().player_cell, before.player_cell);
                assert_eq!(session.snapshot().held_token, before.held_token);
            }
            Action::Reset => session.new_session().unwrap(),
        }
        session.take_events();

        let violations = check_invariants(&session);
        assert!(violations.is_empty(), "invariants violated: {violations:?}");
    }
});
