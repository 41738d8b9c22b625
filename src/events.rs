//! Event handling functions for user input and race updates.

use color_eyre::eyre::Result;
use ratatui::crossterm::event::{self, Event, KeyCode};

use crate::App;

/// Handles input events and advances the race accordingly.
///
/// This function polls for keyboard events and dispatches them to [`handle_key`]. The poll waits no
/// longer than the time left before the next tick, then gives the race the chance to tick.
///
/// # Errors
///
/// - [`std::io::Error`] if reading terminal events fails.
/// - Maze generation errors raised by a restart.
pub(crate) fn handle_events(app: &mut App) -> Result<()> {
    if event::poll(app.poll_timeout())? {
        if let Event::Key(key) = event::read()? {
            handle_key(app, key.code)?;
        }
    }

    app.advance();

    Ok(())
}

/// Applies one key press to the application state.
///
/// - `q` and `Esc` quit.
/// - `r` starts a new round once the current one is over.
/// - `a` abandons the current round.
/// - `Space` pauses or resumes the race.
/// - `v` cycles the searches drawn.
///
/// # Errors
///
/// - Maze generation errors raised by a restart.
pub(crate) fn handle_key(app: &mut App, code: KeyCode) -> Result<()> {
    match code {
        KeyCode::Char('q') | KeyCode::Esc => app.exit = true,
        KeyCode::Char('r') => app.restart()?,
        KeyCode::Char('a') => app.race.abandon(),
        KeyCode::Char(' ') => app.clock.toggle_pause(),
        KeyCode::Char('v') => app.view = app.view.next(),
        _ => {}
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{app::tests::create_test_app, types::View};

    #[test]
    fn test_quit_keys() {
        let mut app = create_test_app();
        handle_key(&mut app, KeyCode::Char('q')).expect("quitting cannot fail");
        assert!(app.exit, "q quits");

        let mut app = create_test_app();
        handle_key(&mut app, KeyCode::Esc).expect("quitting cannot fail");
        assert!(app.exit, "escape quits");
    }

    #[test]
    fn test_view_key_cycles() {
        let mut app = create_test_app();
        handle_key(&mut app, KeyCode::Char('v')).expect("cycling cannot fail");

        assert_eq!(app.view, View::DepthFirst, "v moves to the next view");
    }

    #[test]
    fn test_space_pauses() {
        let mut app = create_test_app();
        handle_key(&mut app, KeyCode::Char(' ')).expect("pausing cannot fail");

        assert!(app.clock.is_paused(), "space pauses");
        app.advance();
        assert_eq!(app.race.ticks(), 0, "nothing moves while paused");
    }

    #[test]
    fn test_abandon_then_restart() {
        let mut app = create_test_app();
        app.advance();

        handle_key(&mut app, KeyCode::Char('r')).expect("a premature restart is not fatal");
        assert_eq!(app.race.round(), 1, "the race was still on");

        handle_key(&mut app, KeyCode::Char('a')).expect("abandoning cannot fail");
        handle_key(&mut app, KeyCode::Char('r')).expect("an abandoned round restarts");
        assert_eq!(app.race.round(), 2, "a new round started");
    }

    #[test]
    fn test_other_keys_are_ignored() {
        let mut app = create_test_app();
        handle_key(&mut app, KeyCode::Char('x')).expect("unknown keys cannot fail");

        assert!(!app.exit, "still running");
        assert_eq!(app.view, View::Both, "view unchanged");
    }
}
