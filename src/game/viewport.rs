//! Viewport streaming.
//!
//! Converts the visible region into an inclusive rectangle of cells and diffs
//! it against the previously active set. Cells entering the rectangle are
//! materialized and rendered, cells leaving it are unrendered. The world
//! store is never shrunk: unloading only drops the view's interest.

// Degree/cell conversions use intentional casts
#![allow(clippy::cast_precision_loss, clippy::cast_lossless)]

use std::collections::HashSet;

use tracing::debug;

use crate::game::coord::degrees_to_cell;
use crate::game::{CellCoord, GameEvent, WorldStore};

/// Visible region edges, in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewBounds {
    /// Northern edge (latitude).
    pub north: f64,
    /// Southern edge (latitude).
    pub south: f64,
    /// Eastern edge (longitude).
    pub east: f64,
    /// Western edge (longitude).
    pub west: f64,
}

impl ViewBounds {
    /// Create bounds from four edges.
    #[must_use]
    pub const fn new(north: f64, south: f64, east: f64, west: f64) -> Self {
        Self {
            north,
            south,
            east,
            west,
        }
    }

    /// Square of `radius` cells on each side of `center`.
    ///
    /// Edges sit at cell centres so floor division recovers the exact range.
    #[must_use]
    pub fn around(center: CellCoord, radius: u32, cell_size: f64) -> Self {
        let r = f64::from(radius);
        let ci = center.i as f64 + 0.5;
        let cj = center.j as f64 + 0.5;
        Self {
            north: (ci + r) * cell_size,
            south: (ci - r) * cell_size,
            east: (cj + r) * cell_size,
            west: (cj - r) * cell_size,
        }
    }

    /// Shift by whole cells.
    #[must_use]
    pub fn translated(self, di: i64, dj: i64, cell_size: f64) -> Self {
        let dlat = di as f64 * cell_size;
        let dlng = dj as f64 * cell_size;
        Self {
            north: self.north + dlat,
            south: self.south + dlat,
            east: self.east + dlng,
            west: self.west + dlng,
        }
    }

    /// Check that every edge is a finite number.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.north.is_finite() && self.south.is_finite() && self.east.is_finite() && self.west.is_finite()
    }
}

/// Inclusive rectangle of cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRect {
    /// Southernmost row.
    pub i_min: i64,
    /// Northernmost row.
    pub i_max: i64,
    /// Westernmost column.
    pub j_min: i64,
    /// Easternmost column.
    pub j_max: i64,
}

impl CellRect {
    /// Cells covered by `bounds`, or `None` if any edge is not finite.
    ///
    /// Swapped edges are normalized rather than rejected.
    #[must_use]
    pub fn from_bounds(bounds: ViewBounds, cell_size: f64) -> Option<Self> {
        if !bounds.is_finite() {
            return None;
        }
        let south = degrees_to_cell(bounds.south.min(bounds.north), cell_size);
        let north = degrees_to_cell(bounds.south.max(bounds.north), cell_size);
        let west = degrees_to_cell(bounds.west.min(bounds.east), cell_size);
        let east = degrees_to_cell(bounds.west.max(bounds.east), cell_size);
        Some(Self {
            i_min: south,
            i_max: north,
            j_min: west,
            j_max: east,
        })
    }

    /// Square of `radius` cells on each side of `center`, clamped at the
    /// edges of the coordinate space.
    #[must_use]
    pub const fn around(center: CellCoord, radius: u32) -> Self {
        let r = radius as i64;
        Self {
            i_min: center.i.saturating_sub(r),
            i_max: center.i.saturating_add(r),
            j_min: center.j.saturating_sub(r),
            j_max: center.j.saturating_add(r),
        }
    }

    /// Check if a cell lies inside the rectangle.
    #[must_use]
    pub const fn contains(&self, coord: CellCoord) -> bool {
        coord.i >= self.i_min && coord.i <= self.i_max && coord.j >= self.j_min && coord.j <= self.j_max
    }

    /// Number of cells covered.
    #[must_use]
    pub const fn cell_count(&self) -> u128 {
        let rows = self.i_max.abs_diff(self.i_min) as u128 + 1;
        let cols = self.j_max.abs_diff(self.j_min) as u128 + 1;
        rows * cols
    }

    /// Iterate cells row by row, south to north, west to east.
    pub fn cells(self) -> impl Iterator<Item = CellCoord> {
        (self.i_min..=self.i_max)
            .flat_map(move |i| (self.j_min..=self.j_max).map(move |j| CellCoord::new(i, j)))
    }
}

/// Counts of cells loaded and unloaded by one recomputation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ViewDiff {
    /// Cells that entered the view.
    pub loaded: usize,
    /// Cells that left the view.
    pub unloaded: usize,
}

impl ViewDiff {
    /// Check if nothing changed.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.loaded == 0 && self.unloaded == 0
    }
}

/// Tracks which cells are currently visible.
#[derive(Debug, Clone)]
pub struct ViewportStreamer {
    cell_size: f64,
    rect: Option<CellRect>,
    active: HashSet<CellCoord>,
}

impl ViewportStreamer {
    /// Create a streamer with no active cells.
    #[must_use]
    pub fn new(cell_size: f64) -> Self {
        Self {
            cell_size,
            rect: None,
            active: HashSet::new(),
        }
    }

    /// The rectangle from the last successful recomputation.
    #[must_use]
    pub const fn rect(&self) -> Option<CellRect> {
        self.rect
    }

    /// Check if a cell is currently visible.
    #[must_use]
    pub fn is_active(&self, coord: CellCoord) -> bool {
        self.active.contains(&coord)
    }

    /// Iterate visible cells in arbitrary order.
    pub fn active(&self) -> impl Iterator<Item = CellCoord> + '_ {
        self.active.iter().copied()
    }

    /// Number of visible cells.
    #[must_use]
    pub fn active_len(&self) -> usize {
        self.active.len()
    }

    /// Recompute the active set for new bounds, pushing load/unload events.
    ///
    /// Returns `None` (and changes nothing) if the bounds are not finite.
    /// Unloads are emitted first, in coordinate order, then loads in
    /// rectangle order.
    pub fn recompute(
        &mut self,
        bounds: ViewBounds,
        world: &mut WorldStore,
        events: &mut Vec<GameEvent>,
    ) -> Option<ViewDiff> {
        let rect = CellRect::from_bounds(bounds, self.cell_size)?;
        Some(self.recompute_rect(rect, world, events))
    }

    /// Make `rect` the active rectangle, pushing load/unload events.
    pub fn recompute_rect(
        &mut self,
        rect: CellRect,
        world: &mut WorldStore,
        events: &mut Vec<GameEvent>,
    ) -> ViewDiff {
        if self.rect == Some(rect) {
            return ViewDiff::default();
        }

        let mut leaving: Vec<CellCoord> = self
            .active
            .iter()
            .copied()
            .filter(|&coord| !rect.contains(coord))
            .collect();
        leaving.sort_unstable();
        for &coord in &leaving {
            self.active.remove(&coord);
            events.push(GameEvent::CellUnrendered { coord });
        }

        let mut loaded = 0;
        for coord in rect.cells() {
            if self.active.insert(coord) {
                let record = world.get(coord);
                events.push(GameEvent::CellRendered {
                    coord,
                    value: record.value,
                });
                loaded += 1;
            }
        }

        self.rect = Some(rect);
        let diff = ViewDiff {
            loaded,
            unloaded: leaving.len(),
        };
        debug!(?rect, loaded = diff.loaded, unloaded = diff.unloaded, "viewport recomputed");
        diff
    }

    /// Re-announce an active cell's current value. No-op for invisible cells.
    pub fn refresh(&self, coord: CellCoord, world: &WorldStore, events: &mut Vec<GameEvent>) {
        if !self.is_active(coord) {
            return;
        }
        if let Some(record) = world.peek(coord) {
            events.push(GameEvent::CellRendered {
                coord,
                value: record.value,
            });
        }
    }

    /// Unrender every active cell and forget the rectangle.
    pub fn clear(&mut self, events: &mut Vec<GameEvent>) {
        let mut leaving: Vec<CellCoord> = self.active.drain().collect();
        leaving.sort_unstable();
        events.extend(leaving.into_iter().map(|coord| GameEvent::CellUnrendered { coord }));
        self.rect = None;
    }
}
