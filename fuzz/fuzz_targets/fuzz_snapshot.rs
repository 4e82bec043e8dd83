#![no_main]

//! Saved-session fuzzer.
//!
//! Whatever bytes are found under the save key, starting a session must
//! either restore them or discard them, then persist what it is running.
//! It must never panic.

use cellbits::game::check_invariants;
use cellbits::{
    DurableStore, GameConfig, GameSession, GeoPoint, LoadOutcome, MemoryStore, SAVE_KEY, Snapshot,
};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    // Skip snapshots that would place the player far from any sane view.
    if let Ok(snapshot) = Snapshot::decode(text)
        && (snapshot.player_cell.i.unsigned_abs() > 1_000_000
            || snapshot.player_cell.j.unsigned_abs() > 1_000_000)
    {
        return;
    }

    let mut store = MemoryStore::new();
    store.set(SAVE_KEY, text).unwrap();

    let config = GameConfig {
        spawn_origin: GeoPoint { lat: 0.0, lng: 0.0 },
        view_radius: 2,
        ..GameConfig::default()
    };
    let (session, outcome) = GameSession::start(config, store);
    assert_ne!(outcome, LoadOutcome::Missing, "stored snapshot reported missing");
    // Either way the store now holds the running session.
    let saved = session.store().get(SAVE_KEY).unwrap().unwrap();
    assert_eq!(Snapshot::decode(&saved).unwrap(), session.snapshot());
    assert!(check_invariants(&session).is_empty());
});
