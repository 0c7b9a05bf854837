use std::collections::VecDeque;

use crate::grid::{Grid, Position};
use Direction::*;
use MoveResult::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right
}

impl Direction {
    pub const ALL: [Direction; 4] = [Up, Down, Left, Right];

    pub fn delta(self) -> (i16, i16) {
        match self {
            Up => (0, -1),
            Down => (0, 1),
            Left => (-1, 0),
            Right => (1, 0),
        }
    }

    pub fn opposite(self) -> Direction {
        match self {
            Up => Down,
            Down => Up,
            Left => Right,
            Right => Left,
        }
    }

    pub fn is_opposite(self, other: Direction) -> bool {
        matches!((self, other), (Up, Down) | (Down, Up) | (Right, Left) | (Left, Right))
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum MoveResult {
    Moved { new_head: Position, old_tail: Option<Position> },
    Crashed
}

/// Ordered body, head first. No position appears twice while the snake is alive.
#[derive(Clone, Debug)]
pub struct Snake {
    body: VecDeque<Position>,
}

impl Snake {
    pub fn new(head: Position) -> Self {
        Snake { body: VecDeque::from(vec![head]) }
    }

    /// Builds a snake from explicit segments, head first.
    pub fn from_segments<I>(segments: I) -> Self
    where
        I: IntoIterator<Item = Position>,
    {
        let body: VecDeque<Position> = segments.into_iter().collect();
        assert!(!body.is_empty(), "a snake needs at least a head");
        Snake { body }
    }

    pub fn body(&self) -> impl Iterator<Item = &Position> + '_ {
        self.body.iter()
    }

    pub fn segments(&self) -> Vec<Position> {
        self.body.iter().copied().collect()
    }

    pub fn head(&self) -> Position {
        self.body[0]
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn contains(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    pub fn next_head(&self, direction: Direction) -> Position {
        self.head().offset(direction.delta())
    }

    /// Moves one cell in `direction`. The tail is kept when `grow` is set.
    /// Leaving the grid or running into any current segment (the tail
    /// included) is a crash and leaves the body untouched.
    pub fn move_step(
        &mut self,
        direction: Direction,
        grid: &Grid,
        grow: impl FnOnce(Position) -> bool,
    ) -> MoveResult {
        let new_head = self.next_head(direction);

        if !grid.contains(new_head) || self.contains(new_head) {
            return Crashed;
        }

        self.body.push_front(new_head);

        if grow(new_head) {
            Moved { new_head, old_tail: None }
        } else {
            let old_tail = self.body.pop_back();
            Moved { new_head, old_tail }
        }
    }
}
