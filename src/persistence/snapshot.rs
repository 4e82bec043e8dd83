//! Snapshot document and its conversion to and from game types.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::SnapshotError;
use crate::game::{CellCoord, PlayerState, Token};

/// Player position as stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerCell {
    /// Row.
    pub i: i64,
    /// Column.
    pub j: i64,
}

/// One stored cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellEntry {
    /// Token value, or null for an emptied cell.
    pub value: Option<u64>,
}

/// Complete saved session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    /// Player position.
    pub player_cell: PlayerCell,
    /// Token in hand.
    pub held_token: Option<u64>,
    /// Sticky victory flag.
    pub has_won: bool,
    /// Every materialized cell keyed by `"i,j"`.
    pub cells: BTreeMap<String, CellEntry>,
}

impl Snapshot {
    /// Build a snapshot from in-memory state.
    #[must_use]
    pub fn capture(
        player: &PlayerState,
        has_won: bool,
        cells: impl IntoIterator<Item = (CellCoord, Option<Token>)>,
    ) -> Self {
        Self {
            player_cell: PlayerCell {
                i: player.position.i,
                j: player.position.j,
            },
            held_token: player.held.map(Token::value),
            has_won,
            cells: cells
                .into_iter()
                .map(|(coord, value)| {
                    (
                        coord.key(),
                        CellEntry {
                            value: value.map(Token::value),
                        },
                    )
                })
                .collect(),
        }
    }

    /// Serialize to JSON text.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn encode(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parse JSON text. Values are not validated until [`Self::player`] or
    /// [`Self::cell_entries`] is called.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a snapshot document.
    pub fn decode(text: &str) -> Result<Self, SnapshotError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Restored player state.
    ///
    /// # Errors
    ///
    /// Returns an error if the held token is not a power of two.
    pub fn player(&self) -> Result<PlayerState, SnapshotError> {
        let held = to_token(self.held_token, "heldToken")?;
        Ok(PlayerState {
            position: CellCoord::new(self.player_cell.i, self.player_cell.j),
            held,
        })
    }

    /// Restored cells, validated.
    ///
    /// # Errors
    ///
    /// Returns an error on the first bad key or token value.
    pub fn cell_entries(&self) -> Result<Vec<(CellCoord, Option<Token>)>, SnapshotError> {
        self.cells
            .iter()
            .map(|(key, entry)| {
                let coord = key
                    .parse::<CellCoord>()
                    .map_err(|()| SnapshotError::BadKey(key.clone()))?;
                Ok((coord, to_token(entry.value, key)?))
            })
            .collect()
    }
}

fn to_token(value: Option<u64>, location: &str) -> Result<Option<Token>, SnapshotError> {
    value
        .map(|v| {
            Token::new(v).ok_or_else(|| SnapshotError::InvalidToken {
                location: location.to_string(),
                value: v,
            })
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_uses_stable_field_names() {
        let mut player = PlayerState::new(CellCoord::new(1, -2));
        player.held = Token::new(4);
        let snapshot = Snapshot::capture(&player, true, [(CellCoord::new(0, 5), None)]);
        let json: serde_json::Value = serde_json::from_str(&snapshot.encode().unwrap()).unwrap();

        assert_eq!(json["playerCell"]["i"], 1);
        assert_eq!(json["playerCell"]["j"], -2);
        assert_eq!(json["heldToken"], 4);
        assert_eq!(json["hasWon"], true);
        assert!(json["cells"]["0,5"]["value"].is_null());
    }

    #[test]
    fn test_decode_document() {
        let text = r#"{
            "playerCell": {"i": 3, "j": 4},
            "heldToken": null,
            "hasWon": false,
            "cells": {"3,5": {"value": 2}, "-1,0": {"value": null}}
        }"#;
        let snapshot = Snapshot::decode(text).unwrap();
        let player = snapshot.player().unwrap();
        assert_eq!(player.position, CellCoord::new(3, 4));
        assert!(player.held.is_none());

        let mut cells = snapshot.cell_entries().unwrap();
        cells.sort_unstable_by_key(|(coord, _)| *coord);
        assert_eq!(
            cells,
            vec![(CellCoord::new(-1, 0), None), (CellCoord::new(3, 5), Token::new(2))]
        );
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(matches!(Snapshot::decode("not json"), Err(SnapshotError::Json(_))));
        assert!(matches!(Snapshot::decode("{}"), Err(SnapshotError::Json(_))));
    }

    #[test]
    fn test_rejects_bad_key() {
        let text = r#"{"playerCell":{"i":0,"j":0},"heldToken":null,"hasWon":false,
                       "cells":{"zero,zero":{"value":1}}}"#;
        let snapshot = Snapshot::decode(text).unwrap();
        assert!(matches!(snapshot.cell_entries(), Err(SnapshotError::BadKey(k)) if k == "zero,zero"));
    }

    #[test]
    fn test_rejects_non_power_of_two() {
        let text = r#"{"playerCell":{"i":0,"j":0},"heldToken":3,"hasWon":false,"cells":{}}"#;
        let snapshot = Snapshot::decode(text).unwrap();
        assert!(matches!(
            snapshot.player(),
            Err(SnapshotError::InvalidToken { value: 3, .. })
        ));
    }
}
