//! ASCII renderer for terminal viewing with ANSI colors.

use std::fmt::Write as _;

use crate::game::{CellCoord, GameSession};
use crate::persistence::DurableStore;

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const YELLOW: &str = "\x1b[33m";
const GRAY: &str = "\x1b[90m";

/// Width of one rendered cell, including its trailing space.
const CELL_WIDTH: usize = 5;

/// Render the cells within `radius` of the player.
///
/// North is up. Cells outside the interaction radius are dimmed, cells never
/// materialized show as `?`.
///
/// Output format:
/// ```text
/// Cell (369979, -1220571)   Holding: 2
/// ┌───────────────────────────┐
/// │    .    1    .    .    . │
/// │    .    2   @.    .    4 │
/// └───────────────────────────┘
/// Legend: @=You  .=Empty  ?=Unseen  dim=Out of reach
/// ```
#[must_use]
pub fn render_ascii<S: DurableStore>(session: &GameSession<S>, radius: u32) -> String {
    let mut output = String::new();
    render_header(&mut output, session);
    render_grid(&mut output, session, i64::from(radius));
    output.push_str("Legend: @=You  .=Empty  ?=Unseen  dim=Out of reach\n");
    output
}

fn render_header<S: DurableStore>(output: &mut String, session: &GameSession<S>) {
    let player = session.player();
    let _ = write!(output, "Cell {}   Holding: ", player.position);
    match player.held {
        Some(token) => {
            let _ = write!(output, "{BOLD}{token}{RESET}");
        }
        None => output.push_str("nothing"),
    }
    if session.has_won() {
        let _ = write!(output, "   {YELLOW}{BOLD}*** VICTORY ***{RESET}");
    }
    output.push('\n');
}

fn render_grid<S: DurableStore>(output: &mut String, session: &GameSession<S>, radius: i64) {
    let center = session.player().position;
    let (i_min, i_max) = (center.i.saturating_sub(radius), center.i.saturating_add(radius));
    let (j_min, j_max) = (center.j.saturating_sub(radius), center.j.saturating_add(radius));
    let side = usize::try_from(j_max.abs_diff(j_min).saturating_add(1)).unwrap_or(0);
    let border = "─".repeat(side * CELL_WIDTH + 1);

    let _ = writeln!(output, "┌{border}┐");
    for i in (i_min..=i_max).rev() {
        output.push_str("│ ");
        for j in j_min..=j_max {
            render_cell(output, session, CellCoord::new(i, j));
        }
        output.push_str("│\n");
    }
    let _ = writeln!(output, "└{border}┘");
}

fn render_cell<S: DurableStore>(output: &mut String, session: &GameSession<S>, coord: CellCoord) {
    let player = session.player();
    let text = match session.world().peek(coord) {
        Some(record) => record
            .value
            .map_or_else(|| ".".to_string(), |token| token.to_string()),
        None => "?".to_string(),
    };
    let text = if coord == player.position {
        format!("@{text}")
    } else {
        text
    };

    let in_reach = player.can_reach(coord, session.config().interaction_radius);
    let style = if coord == player.position {
        BOLD
    } else if !in_reach {
        DIM
    } else if text == "." || text == "?" {
        GRAY
    } else {
        ""
    };
    let _ = write!(output, "{style}{text:>width$}{RESET} ", width = CELL_WIDTH - 1);
}
