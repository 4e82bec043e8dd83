//! State-changing commands: movement, interaction and reset.

use super::output::{format_events, format_outcome};
use super::{CliError, Direction, Session};
use cellbits::CellCoord;

/// Execute the move command.
///
/// # Errors
///
/// Returns an error if the new state could not be saved.
pub(crate) fn move_by(session: &mut Session, di: i64, dj: i64) -> Result<(), CliError> {
    session.move_by(di, dj)?;
    print_events(session);
    Ok(())
}

/// Execute the step command.
///
/// # Errors
///
/// Returns an error if the new state could not be saved.
pub(crate) fn step(session: &mut Session, direction: Direction, count: u32) -> Result<(), CliError> {
    let (di, dj) = direction.delta();
    let count = i64::from(count);
    move_by(session, di.saturating_mul(count), dj.saturating_mul(count))
}

/// Execute the goto command.
///
/// # Errors
///
/// Returns an error if the coordinates are not finite or the new state could
/// not be saved.
pub(crate) fn goto(session: &mut Session, lat: f64, lng: f64) -> Result<(), CliError> {
    if !session.set_position(lat, lng)? {
        return Err(CliError::new(format!("Invalid coordinates: {lat}, {lng}")));
    }
    print_events(session);
    Ok(())
}

/// Execute the interact command.
///
/// # Errors
///
/// Returns an error if the new state could not be saved.
pub(crate) fn interact(session: &mut Session, i: i64, j: i64) -> Result<(), CliError> {
    let outcome = session.interact(CellCoord::new(i, j))?;
    println!("{}", format_outcome(outcome));
    print_events(session);
    Ok(())
}

/// Execute the reset command.
///
/// # Errors
///
/// Returns an error if the saved session could not be replaced.
pub(crate) fn reset(session: &mut Session) -> Result<(), CliError> {
    session.new_session()?;
    session.take_events();
    println!("Started a new session at cell {}", session.player().position);
    Ok(())
}

fn print_events(session: &mut Session) {
    print!("{}", format_events(&session.take_events()));
}
