//! Turns a `GameState` into cell writes on a [`Canvas`].

use std::io;

use crate::config::Glyphs;
use crate::grid::Position;
use crate::state::GameState;

/// The drawing surface the game needs. Coordinates are playfield cells;
/// `y == grid height` is the status line just below the playfield.
pub trait Canvas {
    fn clear(&mut self) -> io::Result<()>;
    fn set_cell(&mut self, x: u16, y: u16, glyph: char) -> io::Result<()>;
    fn flush(&mut self) -> io::Result<()>;
}

pub fn glyph_at(state: &GameState, pos: Position, glyphs: &Glyphs) -> char {
    if state.food() == Some(pos) {
        glyphs.food
    } else if state.snake().contains(pos) {
        glyphs.body
    } else {
        glyphs.empty
    }
}

pub fn status_line(score: u32) -> String {
    format!("Score: {}", score)
}

/// Redraws the whole frame: every cell, then the status line.
pub fn draw<C: Canvas + ?Sized>(
    state: &GameState,
    glyphs: &Glyphs,
    canvas: &mut C,
) -> io::Result<()> {
    canvas.clear()?;

    for pos in state.grid().cells() {
        canvas.set_cell(pos.x as u16, pos.y as u16, glyph_at(state, pos, glyphs))?;
    }

    write_text(canvas, 0, state.grid().height() as u16, &status_line(state.score()))?;
    canvas.flush()
}

/// Writes `lines` centered over the playfield, one blank row above and below.
pub fn draw_banner<C: Canvas + ?Sized>(
    state: &GameState,
    lines: &[&str],
    canvas: &mut C,
) -> io::Result<()> {
    let width = state.grid().width() as usize;
    let height = state.grid().height() as usize;

    let banner_width = (lines.iter().map(|l| l.chars().count()).max().unwrap_or(0) + 2).min(width);
    let banner_height = (lines.len() + 2).min(height);
    let left = (width - banner_width) / 2;
    let top = (height - banner_height) / 2;

    let mut rows = vec![""];
    rows.extend_from_slice(lines);
    rows.push("");

    for (i, line) in rows.iter().take(banner_height).enumerate() {
        let row = format!("{line: ^width$}", line = line, width = banner_width);
        let clipped: String = row.chars().take(banner_width).collect();
        write_text(canvas, left as u16, (top + i) as u16, &clipped)?;
    }

    canvas.flush()
}

fn write_text<C: Canvas + ?Sized>(canvas: &mut C, x: u16, y: u16, text: &str) -> io::Result<()> {
    for (i, ch) in text.chars().enumerate() {
        canvas.set_cell(x + i as u16, y, ch)?;
    }
    Ok(())
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::grid::Grid;
    use crate::snake::{Direction, Snake};
    use rand::{rngs::StdRng, SeedableRng};
    use std::collections::HashMap;

    /// In-memory canvas that remembers the last frame.
    #[derive(Default)]
    pub struct MemoryCanvas {
        pub cells: HashMap<(u16, u16), char>,
        pub clears: usize,
        pub flushes: usize,
    }

    impl MemoryCanvas {
        pub fn row(&self, y: u16, width: u16) -> String {
            (0..width).map(|x| self.cells.get(&(x, y)).copied().unwrap_or(' ')).collect()
        }
    }

    impl Canvas for MemoryCanvas {
        fn clear(&mut self) -> io::Result<()> {
            self.cells.clear();
            self.clears += 1;
            Ok(())
        }

        fn set_cell(&mut self, x: u16, y: u16, glyph: char) -> io::Result<()> {
            self.cells.insert((x, y), glyph);
            Ok(())
        }

        fn flush(&mut self) -> io::Result<()> {
            self.flushes += 1;
            Ok(())
        }
    }

    fn sample() -> GameState {
        let snake = Snake::from_segments([(1, 1), (0, 1)].map(Position::from));
        let food = Some(Position::new(3, 2));
        GameState::with_parts(Grid::new(4, 3), snake, Direction::Right, food, StdRng::seed_from_u64(1))
    }

    #[test]
    fn frame_has_glyph_for_every_cell() {
        let glyphs = Glyphs { body: '#', food: '*', empty: '.' };
        let mut canvas = MemoryCanvas::default();

        draw(&sample(), &glyphs, &mut canvas).unwrap();

        assert_eq!(canvas.row(0, 4), "....");
        assert_eq!(canvas.row(1, 4), "##..");
        assert_eq!(canvas.row(2, 4), "...*");
        assert_eq!(canvas.row(3, 8), "Score: 0");
        assert_eq!((canvas.clears, canvas.flushes), (1, 1));
    }

    #[test]
    fn banner_is_centered_on_the_playfield() {
        let snake = Snake::new(Position::new(0, 0));
        let rng = StdRng::seed_from_u64(1);
        let state = GameState::with_parts(Grid::new(20, 10), snake, Direction::Right, None, rng);
        let mut canvas = MemoryCanvas::default();

        draw_banner(&state, &["Game over!", "Score: 3"], &mut canvas).unwrap();

        // 12 wide, 4 tall: columns 4..16, rows 3..7
        assert_eq!(canvas.row(4, 20), "     Game over!     ");
        assert_eq!(canvas.row(5, 20), "      Score: 3      ");
        assert_eq!(canvas.cells.get(&(4, 3)), Some(&' '));
        assert_eq!(canvas.cells.get(&(3, 3)), None);
    }
}
