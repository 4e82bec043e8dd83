//! Output formatting utilities for CLI.

use cellbits::{GameEvent, InteractionOutcome};
use serde::Serialize;

use super::Session;

/// JSON-serializable session status.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct JsonStatus {
    /// Player row.
    pub(super) i: i64,
    /// Player column.
    pub(super) j: i64,
    /// Token in hand (null if empty).
    pub(super) held_token: Option<u64>,
    /// Sticky victory flag.
    pub(super) has_won: bool,
    /// Number of materialized cells.
    pub(super) cells: usize,
    /// Number of cells in the current view.
    pub(super) visible: usize,
}

impl JsonStatus {
    /// Create from a running session.
    pub(super) fn from_session(session: &Session) -> Self {
        let player = session.player();
        Self {
            i: player.position.i,
            j: player.position.j,
            held_token: player.held.map(cellbits::Token::value),
            has_won: session.has_won(),
            cells: session.world().len(),
            visible: session.viewport().active_len(),
        }
    }
}

/// Format a session status as human-readable text.
pub(super) fn format_status(session: &Session) -> String {
    let player = session.player();
    let mut output = String::new();
    output.push_str(&format!("Position: cell {}\n", player.position));
    match player.held {
        Some(token) => output.push_str(&format!("Holding:  {token}\n")),
        None => output.push_str("Holding:  nothing\n"),
    }
    output.push_str(&format!(
        "Known:    {} cells ({} in view)\n",
        session.world().len(),
        session.viewport().active_len()
    ));
    if session.has_won() {
        output.push_str(&format!(
            "Victory:  reached {}\n",
            session.config().victory_threshold
        ));
    }
    output
}

/// Summarize the notifications produced by one command.
///
/// Cell render churn is folded into counts; everything else gets a line.
pub(super) fn format_events(events: &[GameEvent]) -> String {
    let mut output = String::new();
    let mut rendered = 0usize;
    let mut unrendered = 0usize;

    for event in events {
        match event {
            GameEvent::CellRendered { .. } => rendered += 1,
            GameEvent::CellUnrendered { .. } => unrendered += 1,
            GameEvent::PlayerMoved { position } => {
                output.push_str(&format!("Moved to cell {position}\n"));
            }
            GameEvent::InventoryChanged { held: Some(token) } => {
                output.push_str(&format!("Now holding {token}\n"));
            }
            GameEvent::InventoryChanged { held: None } => {
                output.push_str("Hands empty\n");
            }
            GameEvent::Victory => output.push_str("*** VICTORY ***\n"),
        }
    }
    if rendered > 0 || unrendered > 0 {
        output.push_str(&format!("View: {rendered} cells drawn, {unrendered} removed\n"));
    }
    output
}

/// Describe an interaction result.
pub(super) fn format_outcome(outcome: InteractionOutcome) -> String {
    match outcome {
        InteractionOutcome::PickedUp(token) => format!("Picked up {token}"),
        InteractionOutcome::Merged(token) => format!("Merged into {token}"),
        InteractionOutcome::Blocked => "Tokens differ; nothing happened".to_string(),
        InteractionOutcome::Nothing => "Nothing to pick up or merge".to_string(),
        InteractionOutcome::OutOfRange => "That cell is out of reach".to_string(),
    }
}
