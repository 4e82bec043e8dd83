//! Game session: the event-driven facade over the core.
//!
//! Every external stimulus (view change, movement, interaction, startup) is a
//! single method call that runs to completion: mutate state, recompute the
//! viewport, persist. Notifications accumulate in an internal queue and are
//! drained with [`GameSession::take_events`].

use tracing::{debug, info, warn};

use crate::config::GameConfig;
use crate::error::GameResult;
use crate::game::{
    CellCoord, CellRect, GameEvent, Generator, InteractionOutcome, PlayerState, Transition, ViewBounds,
    ViewportStreamer, WorldStore, assert_invariants, resolve,
};
use crate::persistence::{DurableStore, SAVE_KEY, Snapshot};

/// What [`GameSession::load`] found in the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// A snapshot was restored.
    Restored,
    /// No snapshot exists.
    Missing,
    /// A snapshot existed but could not be read or decoded; it was discarded.
    Discarded,
}

/// Complete game state plus its durable store.
#[derive(Debug)]
pub struct GameSession<S: DurableStore> {
    config: GameConfig,
    world: WorldStore,
    player: PlayerState,
    viewport: ViewportStreamer,
    bounds: Option<ViewBounds>,
    has_won: bool,
    store: S,
    events: Vec<GameEvent>,
}

impl<S: DurableStore> GameSession<S> {
    /// Start a session: restore the saved one, or begin fresh if there is
    /// none or it is corrupt.
    ///
    /// The resulting state is persisted. A failed write is logged and does not
    /// stop the session; the next mutation retries it.
    #[must_use]
    pub fn start(config: GameConfig, store: S) -> (Self, LoadOutcome) {
        let mut session = Self::fresh(config, store);
        let outcome = session.load();
        if outcome != LoadOutcome::Restored {
            info!(position = %session.player.position, "starting new session");
            session.events.push(GameEvent::PlayerMoved {
                position: session.player.position,
            });
            session.events.push(GameEvent::InventoryChanged { held: None });
            session.refresh_view();
        }
        if let Err(e) = session.save() {
            warn!(error = %e, "could not persist session at startup");
        }
        (session, outcome)
    }

    fn fresh(config: GameConfig, store: S) -> Self {
        let generator = Generator::new(config.world_seed.clone(), config.spawn_table);
        let player = PlayerState::new(spawn_cell(&config));
        Self {
            viewport: ViewportStreamer::new(config.cell_size),
            world: WorldStore::new(generator),
            player,
            bounds: None,
            has_won: false,
            store,
            events: Vec::new(),
            config,
        }
    }

    /// Session configuration.
    #[must_use]
    pub const fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Read-only view of the world store.
    #[must_use]
    pub const fn world(&self) -> &WorldStore {
        &self.world
    }

    /// Current player state.
    #[must_use]
    pub const fn player(&self) -> &PlayerState {
        &self.player
    }

    /// Viewport state.
    #[must_use]
    pub const fn viewport(&self) -> &ViewportStreamer {
        &self.viewport
    }

    /// Check if the victory threshold has ever been reached in this session.
    #[must_use]
    pub const fn has_won(&self) -> bool {
        self.has_won
    }

    /// The durable store.
    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Consume the session, returning its store.
    #[must_use]
    pub fn into_store(self) -> S {
        self.store
    }

    /// Drain pending notifications in emission order.
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// The visible region changed.
    ///
    /// Non-finite bounds are dropped without touching any state.
    ///
    /// # Errors
    ///
    /// Returns an error if newly materialized cells could not be persisted.
    pub fn update_view(&mut self, bounds: ViewBounds) -> GameResult<()> {
        if !bounds.is_finite() {
            warn!(?bounds, "dropping non-finite view bounds");
            return Ok(());
        }
        self.bounds = Some(bounds);
        if self.refresh_view() {
            self.save()?;
        }
        Ok(())
    }

    /// Move the player by a relative offset.
    ///
    /// # Errors
    ///
    /// Returns an error if the new state could not be persisted.
    pub fn move_by(&mut self, di: i64, dj: i64) -> GameResult<()> {
        let before = self.player.position;
        self.player.move_by(di, dj);
        let after = self.player.position;
        self.after_move(after.i.saturating_sub(before.i), after.j.saturating_sub(before.j))
    }

    /// Place the player at the cell containing a geographic point.
    ///
    /// Returns `false` (and changes nothing) if either input is not finite.
    ///
    /// # Errors
    ///
    /// Returns an error if the new state could not be persisted.
    pub fn set_position(&mut self, lat: f64, lng: f64) -> GameResult<bool> {
        let Some(target) = CellCoord::from_lat_lng(lat, lng, self.config.cell_size) else {
            warn!(lat, lng, "dropping out-of-domain position update");
            return Ok(false);
        };
        let before = self.player.position;
        self.player.position = target;
        self.after_move(target.i.saturating_sub(before.i), target.j.saturating_sub(before.j))?;
        Ok(true)
    }

    fn after_move(&mut self, di: i64, dj: i64) -> GameResult<()> {
        debug!(position = %self.player.position, di, dj, "player moved");
        self.events.push(GameEvent::PlayerMoved {
            position: self.player.position,
        });
        if self.config.follow_player {
            self.bounds = self
                .bounds
                .map(|b| b.translated(di, dj, self.config.cell_size));
        }
        self.refresh_view();
        self.save()
    }

    /// Try to pick up from, or merge into, the cell at `coord`.
    ///
    /// Requests outside the interaction radius, or aimed at cells that have
    /// never been seen, change nothing.
    ///
    /// # Errors
    ///
    /// Returns an error if a state change could not be persisted.
    pub fn interact(&mut self, coord: CellCoord) -> GameResult<InteractionOutcome> {
        if !self.player.can_reach(coord, self.config.interaction_radius) {
            debug!(%coord, position = %self.player.position, "interaction out of range");
            return Ok(InteractionOutcome::OutOfRange);
        }
        let Some(record) = self.world.peek(coord) else {
            debug!(%coord, "interaction with unseen cell");
            return Ok(InteractionOutcome::Nothing);
        };

        let outcome = match resolve(self.player.held, record.value) {
            Transition::Pickup(token) => {
                self.world.set_value(coord, None)?;
                self.player.held = Some(token);
                info!(%coord, %token, "picked up token");
                InteractionOutcome::PickedUp(token)
            }
            Transition::Merge(token) => {
                self.world.set_value(coord, Some(token))?;
                self.player.held = None;
                info!(%coord, %token, "merged tokens");
                InteractionOutcome::Merged(token)
            }
            Transition::Blocked => return Ok(InteractionOutcome::Blocked),
            Transition::Nothing => return Ok(InteractionOutcome::Nothing),
        };

        self.viewport.refresh(coord, &self.world, &mut self.events);
        self.events.push(GameEvent::InventoryChanged {
            held: self.player.held,
        });
        if let InteractionOutcome::Merged(token) = outcome
            && token.value() >= self.config.victory_threshold
            && !self.has_won
        {
            self.has_won = true;
            info!(%coord, %token, "victory");
            self.events.push(GameEvent::Victory);
        }
        assert_invariants(self);
        self.save()?;
        Ok(outcome)
    }

    /// Capture the full session.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(&self.player, self.has_won, self.world.export_snapshot())
    }

    /// Write a fresh snapshot to the store.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding or the store write fails.
    pub fn save(&mut self) -> GameResult<()> {
        let text = self.snapshot().encode()?;
        self.store.set(SAVE_KEY, &text)?;
        debug!(cells = self.world.len(), bytes = text.len(), "session saved");
        Ok(())
    }

    /// Replace the in-memory session with the stored snapshot.
    ///
    /// A missing snapshot leaves state alone. An unreadable or corrupt one is
    /// removed from the store and state is left alone; the caller continues
    /// with whatever session it had (fresh, at startup).
    pub fn load(&mut self) -> LoadOutcome {
        let text = match self.store.get(SAVE_KEY) {
            Ok(Some(text)) => text,
            Ok(None) => return LoadOutcome::Missing,
            Err(e) => {
                warn!(error = %e, "could not read saved session");
                self.discard_artifact();
                return LoadOutcome::Discarded;
            }
        };
        let decoded = Snapshot::decode(&text).and_then(|snapshot| {
            let player = snapshot.player()?;
            let cells = snapshot.cell_entries()?;
            Ok((player, snapshot.has_won, cells))
        });
        let (player, has_won, cells) = match decoded {
            Ok(parts) => parts,
            Err(e) => {
                warn!(error = %e, "discarding corrupt saved session");
                self.discard_artifact();
                return LoadOutcome::Discarded;
            }
        };

        self.viewport.clear(&mut self.events);
        self.world.clear();
        self.world.import_snapshot(cells);
        self.player = player;
        self.has_won = has_won;
        info!(
            position = %self.player.position,
            cells = self.world.len(),
            has_won,
            "restored saved session"
        );

        self.events.push(GameEvent::PlayerMoved {
            position: self.player.position,
        });
        self.events.push(GameEvent::InventoryChanged {
            held: self.player.held,
        });
        if self.has_won {
            self.events.push(GameEvent::Victory);
        }
        self.refresh_view();
        LoadOutcome::Restored
    }

    /// Throw everything away and start over at the spawn point.
    ///
    /// # Errors
    ///
    /// Returns an error if the store could not be updated.
    pub fn new_session(&mut self) -> GameResult<()> {
        self.store.remove(SAVE_KEY)?;
        self.viewport.clear(&mut self.events);
        self.world.clear();
        self.player = PlayerState::new(spawn_cell(&self.config));
        self.has_won = false;
        info!(position = %self.player.position, "starting new session");

        self.events.push(GameEvent::PlayerMoved {
            position: self.player.position,
        });
        self.events.push(GameEvent::InventoryChanged { held: None });
        self.refresh_view();
        self.save()
    }

    /// Recompute the viewport from the current bounds (or the default square
    /// around the player). Returns true if any cell was newly materialized.
    fn refresh_view(&mut self) -> bool {
        let known = self.world.len();
        match self.bounds {
            Some(bounds) => {
                self.viewport
                    .recompute(bounds, &mut self.world, &mut self.events);
            }
            None => {
                let rect = CellRect::around(self.player.position, self.config.view_radius);
                self.viewport
                    .recompute_rect(rect, &mut self.world, &mut self.events);
            }
        }
        assert_invariants(self);
        self.world.len() != known
    }

    fn discard_artifact(&mut self) {
        if let Err(e) = self.store.remove(SAVE_KEY) {
            warn!(error = %e, "could not remove saved session");
        }
    }
}

fn spawn_cell(config: &GameConfig) -> CellCoord {
    CellCoord::from_lat_lng(config.spawn_origin.lat, config.spawn_origin.lng, config.cell_size)
        .unwrap_or_default()
}
