use std::io;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("terminal error: {0}")]
    Terminal(#[from] io::Error),

    #[error("terminal is {actual:?} but the game needs at least {needed:?} (columns, rows)")]
    TerminalTooSmall { needed: (u16, u16), actual: (u16, u16) },

    #[error("invalid value {value:?} for {key}: {reason}")]
    InvalidConfig { key: &'static str, value: String, reason: String },
}
