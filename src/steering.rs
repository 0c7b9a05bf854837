//! Single-slot hand-off of the next direction between the input thread and
//! the simulation loop.
//!
//! The input side only ever writes `pending`; the loop only ever writes
//! `active`. Both are plain atomics, so neither side takes a lock. A newer
//! request overwrites an older one that has not been applied yet.

use std::sync::atomic::{AtomicU8, Ordering};

use log::debug;

use crate::snake::Direction;

const NONE: u8 = 0;

fn encode(direction: Direction) -> u8 {
    match direction {
        Direction::Up => 1,
        Direction::Down => 2,
        Direction::Left => 3,
        Direction::Right => 4,
    }
}

fn decode(raw: u8) -> Option<Direction> {
    match raw {
        1 => Some(Direction::Up),
        2 => Some(Direction::Down),
        3 => Some(Direction::Left),
        4 => Some(Direction::Right),
        _ => None,
    }
}

#[derive(Debug)]
pub struct Steering {
    active: AtomicU8,
    pending: AtomicU8,
}

impl Steering {
    pub fn new(initial: Direction) -> Self {
        Steering { active: AtomicU8::new(encode(initial)), pending: AtomicU8::new(NONE) }
    }

    /// Records `direction` for the next tick unless it would reverse the
    /// snake onto itself. Returns whether the request was kept.
    pub fn request(&self, direction: Direction) -> bool {
        let active = self.active();
        if direction.is_opposite(active) {
            debug!("[Steering] Ignoring {:?}, snake is heading {:?}", direction, active);
            return false;
        }

        self.pending.store(encode(direction), Ordering::Release);
        true
    }

    pub fn active(&self) -> Direction {
        decode(self.active.load(Ordering::Acquire)).unwrap_or(Direction::Right)
    }

    pub fn pending(&self) -> Option<Direction> {
        decode(self.pending.load(Ordering::Acquire))
    }

    /// Reads and clears the pending slot.
    pub fn take(&self) -> Option<Direction> {
        decode(self.pending.swap(NONE, Ordering::AcqRel))
    }

    /// Moves the pending direction (if any) into the active one and returns
    /// the direction to apply this tick. A request that raced with the
    /// previous commit is checked again here.
    pub fn commit(&self) -> Direction {
        let active = self.active();

        match self.take() {
            Some(next) if !next.is_opposite(active) => {
                self.active.store(encode(next), Ordering::Release);
                next
            }
            _ => active,
        }
    }
}
