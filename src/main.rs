use std::sync::mpsc;

use anyhow::{Context, Result};
use log::info;

use snake::input::spawn_input_controller;
use snake::term::TermManager;
use snake::{Config, Outcome, SnakeGame};

fn main() -> Result<()> {
    // Off unless RUST_LOG is set; stderr shares the screen with the game.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("off")).init();

    let config = Config::from_env().context("Invalid configuration")?;
    info!("[Main] {:?}", config);

    let mut term = TermManager::new(&config.grid()).context("Could not acquire the terminal")?;
    term.setup().context("Could not set up the terminal")?;

    let mut game = SnakeGame::new(&config, term);
    let (tx, rx) = mpsc::channel();
    spawn_input_controller(game.state().steering(), tx)
        .context("Could not start the input thread")?;

    // The input thread is never joined; it goes away with the process.
    let outcome = game.play(&rx);
    game.into_canvas().restore().context("Could not restore the terminal")?;

    let outcome = outcome.context("Terminal error during the game")?;
    info!("[Main] {:?}, score {}", outcome, outcome.score());

    match outcome {
        Outcome::Finished { score, won: true } => println!("You won! Your score is: {}", score),
        Outcome::Finished { score, won: false } => println!("Game Over! Your score is: {}", score),
        Outcome::Quit { .. } => {}
    }

    Ok(())
}
