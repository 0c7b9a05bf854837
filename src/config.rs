//! Startup configuration.
//!
//! Built once in `main` and handed to the constructors that need it. The
//! binary takes no flags; a few `SNAKE_*` environment variables override the
//! defaults.

use std::{env, fmt::Display, ops::RangeInclusive, str::FromStr, time::Duration};

use crate::error::{Error, Result};
use crate::grid::Grid;

pub const DEFAULT_WIDTH: i16 = 20;
pub const DEFAULT_HEIGHT: i16 = 10;
/// Two ticks per second.
pub const DEFAULT_TICK_MS: u64 = 500;

pub const SNAKE_BODY_CHAR: char = '■';
pub const FOOD_CHAR: char = '●';
pub const EMPTY_CHAR: char = ' ';

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Glyphs {
    pub body: char,
    pub food: char,
    pub empty: char,
}

impl Default for Glyphs {
    fn default() -> Self {
        Glyphs { body: SNAKE_BODY_CHAR, food: FOOD_CHAR, empty: EMPTY_CHAR }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub width: i16,
    pub height: i16,
    pub tick: Duration,
    /// `None` seeds the generator from system entropy.
    pub seed: Option<u64>,
    pub glyphs: Glyphs,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            tick: Duration::from_millis(DEFAULT_TICK_MS),
            seed: None,
            glyphs: Glyphs::default(),
        }
    }
}

impl Config {
    pub fn grid(&self) -> Grid {
        Grid::new(self.width, self.height)
    }

    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Applies overrides from `lookup` on top of the defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();

        if let Some(raw) = lookup("SNAKE_WIDTH") {
            config.width = parse_in("SNAKE_WIDTH", &raw, 2..=200)?;
        }
        if let Some(raw) = lookup("SNAKE_HEIGHT") {
            config.height = parse_in("SNAKE_HEIGHT", &raw, 2..=100)?;
        }
        if let Some(raw) = lookup("SNAKE_TICK_MS") {
            config.tick = Duration::from_millis(parse_in("SNAKE_TICK_MS", &raw, 1..=60_000)?);
        }
        if let Some(raw) = lookup("SNAKE_SEED") {
            config.seed = Some(parse("SNAKE_SEED", &raw)?);
        }

        Ok(config)
    }
}

fn parse<T>(key: &'static str, raw: &str) -> Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    raw.trim().parse().map_err(|e: T::Err| Error::InvalidConfig {
        key,
        value: raw.to_string(),
        reason: e.to_string(),
    })
}

fn parse_in<T>(key: &'static str, raw: &str, range: RangeInclusive<T>) -> Result<T>
where
    T: FromStr + PartialOrd + Display,
    T::Err: Display,
{
    let value = parse(key, raw)?;
    if !range.contains(&value) {
        return Err(Error::InvalidConfig {
            key,
            value: raw.to_string(),
            reason: format!("must be between {} and {}", range.start(), range.end()),
        });
    }
    Ok(value)
}
