//! Keyboard side of the game. Runs on its own thread for the life of the
//! process, blocking on the next terminal event.
//!
//! Directions go straight into the [`Steering`] slot; quit and confirm are
//! sent to the simulation loop over a channel.

use std::sync::{Arc, mpsc::Sender};
use std::thread::{self, JoinHandle};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use log::{debug, error, trace};

use crate::snake::Direction;
use crate::steering::Steering;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Turn(Direction),
    Quit,
    Confirm,
}

/// Messages from the input thread to the simulation loop.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Control {
    Quit,
    Confirm,
}

pub fn command_for(ev: &KeyEvent) -> Option<Command> {
    if ev.kind == KeyEventKind::Release {
        return None;
    }
    if is_ctrl_c(ev) {
        return Some(Command::Quit);
    }

    match ev.code {
        KeyCode::Char('w') | KeyCode::Up => Some(Command::Turn(Direction::Up)),
        KeyCode::Char('a') | KeyCode::Left => Some(Command::Turn(Direction::Left)),
        KeyCode::Char('s') | KeyCode::Down => Some(Command::Turn(Direction::Down)),
        KeyCode::Char('d') | KeyCode::Right => Some(Command::Turn(Direction::Right)),
        KeyCode::Esc | KeyCode::Char('q') => Some(Command::Quit),
        KeyCode::Enter => Some(Command::Confirm),
        _ => None,
    }
}

/// Applies one command. Returns `false` once the loop is gone and the
/// controller should stop.
pub fn dispatch(command: Command, steering: &Steering, controls: &Sender<Control>) -> bool {
    let control = match command {
        Command::Turn(direction) => {
            steering.request(direction);
            return true;
        }
        Command::Quit => Control::Quit,
        Command::Confirm => Control::Confirm,
    };

    controls.send(control).is_ok()
}

/// Starts the input controller thread.
pub fn spawn_input_controller(
    steering: Arc<Steering>,
    controls: Sender<Control>,
) -> std::io::Result<JoinHandle<()>> {
    thread::Builder::new().name("input".into()).spawn(move || {
        loop {
            let ev = match event::read() {
                Ok(Event::Key(ev)) => ev,
                Ok(other) => {
                    trace!("[Input] Ignoring {:?}", other);
                    continue;
                }
                Err(e) => {
                    // Dropping `controls` tells the loop we are gone.
                    error!("[Input] Reading terminal events failed: {}", e);
                    return;
                }
            };

            let Some(command) = command_for(&ev) else {
                trace!("[Input] Unmapped key {:?}", ev.code);
                continue;
            };

            debug!("[Input] {:?}", command);
            if !dispatch(command, &steering, &controls) {
                return;
            }
        }
    })
}

fn is_ctrl_c(ev: &KeyEvent) -> bool {
    matches!(ev, KeyEvent { code: KeyCode::Char('c'), modifiers: KeyModifiers::CONTROL, .. })
}
