//! World state store.
//!
//! The single owner of every cell record ever materialized. Records are
//! created on first sight (through the [`Generator`]) or from a restored
//! snapshot, mutated only by interactions, and never deleted.

use std::collections::HashMap;

use tracing::debug;

use crate::error::GameError;
use crate::game::{CellCoord, Generator, Token};

/// Logical state of one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRecord {
    /// Coordinate of this cell.
    pub coord: CellCoord,
    /// Token currently in the cell (None = empty).
    pub value: Option<Token>,
    /// True if the record came from the generator in this process, false if it
    /// was restored from a snapshot.
    pub generated: bool,
}

/// Mapping from coordinate to cell record.
#[derive(Debug, Clone, Default)]
pub struct WorldStore {
    generator: Generator,
    cells: HashMap<CellCoord, CellRecord>,
}

impl WorldStore {
    /// Create an empty store backed by the given generator.
    #[must_use]
    pub fn new(generator: Generator) -> Self {
        Self {
            generator,
            cells: HashMap::new(),
        }
    }

    /// The generator used for first-sight materialization.
    #[must_use]
    pub const fn generator(&self) -> &Generator {
        &self.generator
    }

    /// Get a cell, materializing it through the generator on first sight.
    pub fn get(&mut self, coord: CellCoord) -> CellRecord {
        let generator = &self.generator;
        *self.cells.entry(coord).or_insert_with(|| {
            let value = generator.generate(coord);
            debug!(%coord, ?value, "materialized cell");
            CellRecord {
                coord,
                value,
                generated: true,
            }
        })
    }

    /// Look at a cell without materializing it.
    #[must_use]
    pub fn peek(&self, coord: CellCoord) -> Option<&CellRecord> {
        self.cells.get(&coord)
    }

    /// Overwrite a cell's value.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::Unmaterialized`] if the cell has never been seen.
    pub fn set_value(&mut self, coord: CellCoord, value: Option<Token>) -> Result<(), GameError> {
        let record = self
            .cells
            .get_mut(&coord)
            .ok_or(GameError::Unmaterialized(coord))?;
        record.value = value;
        Ok(())
    }

    /// Install restored records, bypassing the generator for every entry.
    pub fn import_snapshot(&mut self, entries: impl IntoIterator<Item = (CellCoord, Option<Token>)>) {
        for (coord, value) in entries {
            self.cells.insert(
                coord,
                CellRecord {
                    coord,
                    value,
                    generated: false,
                },
            );
        }
    }

    /// Every materialized cell with its current value, sorted by coordinate.
    ///
    /// Emptied cells are included so they are never regenerated.
    #[must_use]
    pub fn export_snapshot(&self) -> Vec<(CellCoord, Option<Token>)> {
        let mut entries: Vec<_> = self
            .cells
            .values()
            .map(|record| (record.coord, record.value))
            .collect();
        entries.sort_unstable_by_key(|(coord, _)| *coord);
        entries
    }

    /// Iterate over all records in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = &CellRecord> {
        self.cells.values()
    }

    /// Iterate over `(key, record)` pairs as stored.
    pub(crate) fn entries(&self) -> impl Iterator<Item = (&CellCoord, &CellRecord)> {
        self.cells.iter()
    }

    /// Number of materialized cells.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Check if no cell has been materialized.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Forget every record. Only used when starting a new session.
    pub(crate) fn clear(&mut self) {
        self.cells.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_materializes_once() {
        let mut world = WorldStore::default();
        let coord = CellCoord::new(4, 7);
        assert!(world.peek(coord).is_none());

        let first = world.get(coord);
        assert!(first.generated);
        assert_eq!(first.value, Generator::default().generate(coord));
        assert_eq!(world.len(), 1);

        let second = world.get(coord);
        assert_eq!(first, second);
        assert_eq!(world.len(), 1);
    }

    #[test]
    fn test_set_value_requires_materialization() {
        let mut world = WorldStore::default();
        let coord = CellCoord::new(1, 1);
        assert!(matches!(
            world.set_value(coord, None),
            Err(GameError::Unmaterialized(c)) if c == coord
        ));

        world.get(coord);
        world.set_value(coord, Token::new(16)).unwrap();
        assert_eq!(world.get(coord).value, Token::new(16));
    }

    #[test]
    fn test_emptied_cell_stays_empty() {
        let mut world = WorldStore::default();
        // Find a cell the generator fills.
        let coord = (0..1000)
            .map(|j| CellCoord::new(0, j))
            .find(|&c| world.generator().generate(c).is_some())
            .unwrap();
        world.get(coord);
        world.set_value(coord, None).unwrap();
        assert_eq!(world.get(coord).value, None);
    }

    #[test]
    fn test_import_bypasses_generator() {
        let mut world = WorldStore::default();
        let coord = CellCoord::new(-3, 9);
        world.import_snapshot([(coord, Token::new(64))]);

        let record = world.get(coord);
        assert_eq!(record.value, Token::new(64));
        assert!(!record.generated);
    }

    #[test]
    fn test_export_includes_empty_cells() {
        let mut world = WorldStore::default();
        world.import_snapshot([
            (CellCoord::new(2, 0), None),
            (CellCoord::new(-1, 5), Token::new(2)),
        ]);
        let exported = world.export_snapshot();
        assert_eq!(
            exported,
            vec![
                (CellCoord::new(-1, 5), Token::new(2)),
                (CellCoord::new(2, 0), None),
            ]
        );
    }
}
