//! Core application state and logic for the maze race.

use std::time::{Duration, Instant};

use color_eyre::eyre::Result;
use ratatui::DefaultTerminal;
use tracing::info;

use crate::{
    config::Config, errors::MazeError, events, pacing::TickClock, race::Race, types::View, ui,
};

/// Longest wait for input before the loop redraws.
pub(crate) const MAX_POLL_WAIT: Duration = Duration::from_millis(100);

/// Message shown when a restart is requested while a search is still running.
pub(crate) const PREMATURE_RESTART_NOTICE: &str =
    "the race is still on: wait for both searches or abandon it with (a)";

/// Application state container for the maze race.
///
/// This structure holds the state of the application, which is to say the structure from which
/// Ratatui will render the race and Crossterm events will help writing to.
pub struct App {
    /// Application exit flag.
    ///
    /// This field indicates whether the application should exit. It is set to `true` when the user
    /// wants to quit but it starts off `false`.
    pub(crate) exit: bool,
    /// The race being shown.
    ///
    /// This field owns the current maze and both searches walking it. It is stepped by the
    /// application loop whenever the tick clock says so.
    pub(crate) race: Race,
    /// Searches currently drawn.
    pub(crate) view: View,
    /// Pacing of race ticks.
    ///
    /// This field decides when the next tick is due and holds the pause state.
    pub(crate) clock: TickClock,
    /// One-line message for the user, cleared when a new round starts.
    pub(crate) notice: Option<&'static str>,
}

impl App {
    /// Creates the application for the given configuration.
    ///
    /// A random seed is drawn when the configuration does not carry one.
    ///
    /// # Errors
    ///
    /// - [`MazeError::InvalidDimensions`] if the configured maze sides are out of range.
    pub fn new(config: &Config) -> Result<Self> {
        let spec = config.maze_spec(rand::random());
        info!(
            width = spec.width,
            height = spec.height,
            seed = spec.seed,
            "starting race"
        );

        Ok(Self {
            exit: false,
            race: Race::new(spec)?,
            view: View::default(),
            clock: TickClock::new(config.tick_interval()),
            notice: None,
        })
    }

    /// Runs the main loop of the application.
    ///
    /// This function draws the race, handles user input and advances the race. The loop continues
    /// until the exit condition is `true`, after which the function returns to the call site.
    ///
    /// # Errors
    ///
    /// - [`std::io::Error`] if drawing or reading terminal events fails.
    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> Result<()> {
        while !self.exit {
            let _ = terminal.try_draw(|frame| {
                ui::draw(self, frame)
                    .map_err(|err| std::io::Error::new(std::io::ErrorKind::Other, err))
            })?;
            events::handle_events(self)?;
        }

        Ok(())
    }

    /// Steps the race once if a tick is due and the race is still on.
    pub(crate) fn advance(&mut self) {
        if !self.race.both_done() && self.clock.due(Instant::now()) {
            let _ = self.race.tick();
        }
    }

    /// How long the loop may wait for input before the next tick falls due.
    pub(crate) fn poll_timeout(&self) -> Duration {
        if self.race.both_done() {
            return MAX_POLL_WAIT;
        }

        self.clock
            .until_due(Instant::now())
            .map_or(MAX_POLL_WAIT, |wait| wait.min(MAX_POLL_WAIT))
    }

    /// Starts a new round if the current one is over.
    ///
    /// A premature request is not an error for the user: it only leaves a notice behind.
    ///
    /// # Errors
    ///
    /// - [`MazeError::InvalidDimensions`] or [`MazeError::DisconnectedTerminal`] if the next maze
    ///   cannot be produced.
    pub(crate) fn restart(&mut self) -> Result<()> {
        match self.race.reset(true) {
            Ok(_) => {
                self.notice = None;
                self.clock.restart(Instant::now());
            }
            Err(MazeError::PrematureReset) => self.notice = Some(PREMATURE_RESTART_NOTICE),
            Err(err) => return Err(err.into()),
        }

        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::traversal::{Status, Strategy};

    /// Creates a small seeded application whose clock ticks on every check.
    pub(crate) fn create_test_app() -> App {
        let config = Config {
            size: 7,
            seed: Some(42),
            ..Config::default()
        };
        let mut app = App::new(&config).expect("7x7 is a valid maze");
        app.clock = TickClock::new(Duration::ZERO);
        app
    }

    #[test]
    fn test_new_app_is_idle() {
        let app = create_test_app();

        assert!(!app.exit, "the app starts running");
        assert_eq!(app.view, View::Both, "both searches are shown");
        assert_eq!(app.race.ticks(), 0, "nothing has been stepped");
        assert_eq!(app.race.grid().rows(), 7, "the configured size is used");
    }

    #[test]
    fn test_advance_steps_the_race() {
        let mut app = create_test_app();
        app.advance();
        app.advance();

        assert_eq!(app.race.ticks(), 2, "one tick per due check");
    }

    #[test]
    fn test_paused_app_does_not_advance() {
        let mut app = create_test_app();
        app.clock.toggle_pause();
        app.advance();

        assert_eq!(app.race.ticks(), 0, "a paused race stays put");
    }

    #[test]
    fn test_poll_timeout_follows_the_tick_rate() {
        let mut app = create_test_app();
        assert_eq!(app.poll_timeout(), Duration::ZERO, "a zero interval never waits");

        app.clock = TickClock::new(Duration::from_millis(10));
        assert!(
            app.poll_timeout() <= Duration::from_millis(10),
            "fast rates wait less than the input timeout"
        );

        app.clock = TickClock::new(Duration::from_secs(1));
        assert_eq!(app.poll_timeout(), MAX_POLL_WAIT, "slow rates still redraw regularly");

        app.clock.toggle_pause();
        assert_eq!(app.poll_timeout(), MAX_POLL_WAIT, "a paused race waits for input");
    }

    #[test]
    fn test_finished_race_waits_for_input() {
        let mut app = create_test_app();
        while !app.race.both_done() {
            app.advance();
        }

        assert_eq!(app.poll_timeout(), MAX_POLL_WAIT, "nothing left to tick");
    }

    #[test]
    fn test_premature_restart_leaves_a_notice() {
        let mut app = create_test_app();
        app.advance();
        app.restart().expect("a premature restart is not fatal");

        assert_eq!(app.notice, Some(PREMATURE_RESTART_NOTICE), "the user is told why");
        assert_eq!(app.race.round(), 1, "the round goes on");
        assert_eq!(app.race.ticks(), 1, "the round is untouched");
    }

    #[test]
    fn test_restart_after_the_race() {
        let mut app = create_test_app();
        while !app.race.both_done() {
            app.advance();
        }
        app.notice = Some(PREMATURE_RESTART_NOTICE);
        app.restart().expect("a finished race can restart");

        assert_eq!(app.race.round(), 2, "a new round started");
        assert_eq!(app.notice, None, "the notice is cleared");
        assert_eq!(
            app.race.status(Strategy::DepthFirst),
            Status::Active,
            "the searches start over"
        );
    }
}
