use std::io::{self, Stdout, Write, stdout};

use crossterm::{cursor, execute, queue, style, terminal};
use crossterm::terminal::{ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use log::{debug, warn};

use crate::error::{Error, Result};
use crate::grid::Grid;
use crate::render::{self, Canvas};

pub type TermInt = u16;
pub type Coords = (TermInt, TermInt);

/// crossterm-backed canvas. The playfield sits inside a one-cell border, so
/// canvas cell (x, y) lands on terminal cell (x + 1, y + 1); the status line
/// (y == grid height) goes on the row right under the bottom border.
pub struct TermManager {
    stdout: Stdout,
    field: Coords,
    active: bool,
}

impl TermManager {
    /// Checks that the terminal can hold the bordered grid plus the status
    /// line. Does not touch the terminal state yet.
    pub fn new(grid: &Grid) -> Result<Self> {
        let field = (grid.width() as TermInt, grid.height() as TermInt);
        let needed = min_terminal_size(field);
        let actual = terminal::size()?;

        if actual.0 < needed.0 || actual.1 < needed.1 {
            return Err(Error::TerminalTooSmall { needed, actual });
        }

        Ok(TermManager { stdout: stdout(), field, active: false })
    }

    pub fn setup(&mut self) -> io::Result<()> {
        execute!(self.stdout, EnterAlternateScreen)?;
        self.active = true;
        terminal::enable_raw_mode()?;
        execute!(self.stdout, cursor::Hide, cursor::DisableBlinking)?;
        debug!("[Term] Entered alternate screen, playfield {:?}", self.field);
        Ok(())
    }

    /// Undoes `setup`. Safe to call more than once. Every step is tried
    /// even if an earlier one fails; the first error is returned.
    pub fn restore(&mut self) -> io::Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;

        let raw = terminal::disable_raw_mode();
        let shown = execute!(self.stdout, cursor::Show, cursor::EnableBlinking);
        let screen = execute!(self.stdout, LeaveAlternateScreen);
        debug!("[Term] Restored terminal");

        raw.and(shown).and(screen)
    }

    fn draw_borders(&mut self) -> io::Result<()> {
        let (width, height) = (self.field.0 + 2, self.field.1 + 2);
        let end_x = width - 1;
        let end_y = height - 1;

        for x in 0..width {
            let ch = if x == 0 || x == end_x {'+'} else {'-'};
            self.print_at((x, 0), ch)?;
            self.print_at((x, end_y), ch)?;
        }

        for y in 1..end_y {
            self.print_at((0, y), '|')?;
            self.print_at((end_x, y), '|')?;
        }

        Ok(())
    }

    fn print_at(&mut self, pos: Coords, ch: char) -> io::Result<()> {
        queue!(self.stdout, cursor::MoveTo(pos.0, pos.1), style::Print(ch))
    }
}

/// Bordered playfield plus the status line under it, which may be wider
/// than the field on narrow grids.
pub fn min_terminal_size(field: Coords) -> Coords {
    let status_width = render::status_line(u32::MAX).chars().count() as TermInt;
    ((field.0 + 2).max(status_width), field.1 + 3)
}

impl Canvas for TermManager {
    fn clear(&mut self) -> io::Result<()> {
        queue!(self.stdout, terminal::Clear(ClearType::All))?;
        self.draw_borders()
    }

    fn set_cell(&mut self, x: u16, y: u16, glyph: char) -> io::Result<()> {
        // Status line starts at the left edge, under the border.
        if y >= self.field.1 {
            return self.print_at((x, y + 2), glyph);
        }
        self.print_at((x + 1, y + 1), glyph)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.stdout.flush()
    }
}

impl Drop for TermManager {
    fn drop(&mut self) {
        if let Err(e) = self.restore() {
            warn!("[Term] Could not restore terminal: {}", e);
        }
    }
}
