pub mod config;
pub mod error;
pub mod game;
pub mod grid;
pub mod input;
pub mod render;
pub mod snake;
pub mod state;
pub mod steering;
pub mod term;

pub use config::Config;
pub use error::{Error, Result};
pub use game::{Outcome, SnakeGame};
pub use grid::{Grid, Position};
pub use snake::{Direction, Snake};
pub use state::{GameState, Status, TickOutcome};
