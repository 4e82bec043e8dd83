//! Read-mostly commands: status, look and export.

use super::output::{JsonStatus, format_status};
use super::{CliError, Session};
use cellbits::ViewBounds;
use cellbits::view::render_ascii;

/// Execute the status command.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub(crate) fn status(session: &Session, json: bool) -> Result<(), CliError> {
    if json {
        let status = JsonStatus::from_session(session);
        let text = serde_json::to_string_pretty(&status)
            .map_err(|e| CliError::new(format!("JSON serialization failed: {e}")))?;
        println!("{text}");
    } else {
        print!("{}", format_status(session));
    }
    Ok(())
}

/// Execute the look command.
///
/// Looking farther than the configured view widens the view first, so every
/// drawn cell is materialized.
///
/// # Errors
///
/// Returns an error if newly seen cells could not be saved.
pub(crate) fn look(session: &mut Session, radius: Option<u32>) -> Result<(), CliError> {
    let radius = radius.unwrap_or(session.config().view_radius);
    if radius > session.config().view_radius {
        let bounds = ViewBounds::around(
            session.player().position,
            radius,
            session.config().cell_size,
        );
        session.update_view(bounds)?;
    }
    session.take_events();
    print!("{}", render_ascii(session, radius));
    Ok(())
}

/// Execute the export command.
///
/// # Errors
///
/// Returns an error if the snapshot cannot be encoded.
pub(crate) fn export(session: &Session) -> Result<(), CliError> {
    let text = session
        .snapshot()
        .encode()
        .map_err(|e| CliError::new(format!("Failed to encode session: {e}")))?;
    println!("{text}");
    Ok(())
}
