use std::io;
use std::sync::mpsc::{Receiver, RecvTimeoutError};
use std::time::{Duration, Instant};

use log::{debug, info};

use crate::config::{Config, Glyphs};
use crate::input::Control;
use crate::render::{self, Canvas};
use crate::state::{GameState, TickOutcome};

/// How a game session ended.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// The player quit, or input went away, while the game was running.
    Quit { score: u32 },
    /// Game over or a full grid.
    Finished { score: u32, won: bool },
}

impl Outcome {
    pub fn score(self) -> u32 {
        match self {
            Outcome::Quit { score } | Outcome::Finished { score, .. } => score,
        }
    }
}

/// Fixed-tick simulation loop. Owns the state and the canvas; the input
/// thread reaches it only through the steering slot and `controls`.
pub struct SnakeGame<C: Canvas> {
    state: GameState,
    canvas: C,
    glyphs: Glyphs,
    tick: Duration,
}

impl<C: Canvas> SnakeGame<C> {
    pub fn new(config: &Config, canvas: C) -> Self {
        Self::with_state(GameState::new(config), config, canvas)
    }

    pub fn with_state(state: GameState, config: &Config, canvas: C) -> Self {
        SnakeGame { state, canvas, glyphs: config.glyphs, tick: config.tick }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn canvas(&self) -> &C {
        &self.canvas
    }

    pub fn into_canvas(self) -> C {
        self.canvas
    }

    /// Runs until the game ends and is acknowledged, or until quit.
    pub fn play(&mut self, controls: &Receiver<Control>) -> io::Result<Outcome> {
        let grid = self.state.grid();
        info!("[Game] Starting on {}x{} grid, tick {:?}", grid.width(), grid.height(), self.tick);
        render::draw(&self.state, &self.glyphs, &mut self.canvas)?;

        let mut next_tick = Instant::now() + self.tick;

        loop {
            let wait = next_tick.saturating_duration_since(Instant::now());

            match controls.recv_timeout(wait) {
                Ok(Control::Quit) | Err(RecvTimeoutError::Disconnected) => {
                    info!("[Game] Quit with score {}", self.state.score());
                    return Ok(Outcome::Quit { score: self.state.score() });
                }
                Ok(Control::Confirm) => continue,
                Err(RecvTimeoutError::Timeout) => {}
            }

            match self.state.advance() {
                TickOutcome::GameOver { score } => return self.finish(controls, score, false),
                TickOutcome::Won { score } => return self.finish(controls, score, true),
                TickOutcome::Moved | TickOutcome::Ate { .. } => {
                    render::draw(&self.state, &self.glyphs, &mut self.canvas)?;
                }
            }

            // Ticks missed while a frame stalled are dropped, not replayed.
            next_tick += self.tick;
            let now = Instant::now();
            if next_tick <= now {
                debug!("[Game] Fell behind by {:?}, skipping missed ticks", now - next_tick);
                next_tick = now + self.tick;
            }
        }
    }

    /// Shows the end banner and blocks until the player confirms. Quitting
    /// here still counts as a finished game.
    fn finish(
        &mut self,
        controls: &Receiver<Control>,
        score: u32,
        won: bool,
    ) -> io::Result<Outcome> {
        let headline = if won {"You won!"} else {"Game over!"};
        let score_line = render::status_line(score);
        let lines = [headline, score_line.as_str(), "", "Press Enter to exit"];

        render::draw(&self.state, &self.glyphs, &mut self.canvas)?;
        render::draw_banner(&self.state, &lines, &mut self.canvas)?;
        debug!("[Game] Waiting for confirmation");

        if let Ok(control) = controls.recv() {
            debug!("[Game] End acknowledged with {:?}", control);
        }
        Ok(Outcome::Finished { score, won })
    }
}
