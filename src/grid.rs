/// A cell on the playfield. Signed so that a head stepping off the grid
/// (x = -1, y = height, ...) is still representable.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i16,
    pub y: i16,
}

impl Position {
    pub const fn new(x: i16, y: i16) -> Self {
        Position { x, y }
    }

    pub fn offset(self, (dx, dy): (i16, i16)) -> Self {
        Position { x: self.x + dx, y: self.y + dy }
    }
}

impl From<(i16, i16)> for Position {
    fn from((x, y): (i16, i16)) -> Self {
        Position { x, y }
    }
}

/// Fixed-size playfield: `[0, width) x [0, height)`. Everything outside is wall.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    width: i16,
    height: i16,
}

impl Grid {
    pub fn new(width: i16, height: i16) -> Self {
        assert!(width > 0 && height > 0, "grid must have at least one cell");
        Grid { width, height }
    }

    pub fn width(&self) -> i16 {
        self.width
    }

    pub fn height(&self) -> i16 {
        self.height
    }

    pub fn contains(&self, pos: Position) -> bool {
        (0..self.width).contains(&pos.x) && (0..self.height).contains(&pos.y)
    }

    pub fn center(&self) -> Position {
        Position::new(self.width / 2, self.height / 2)
    }

    pub fn cell_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Row-major iteration over every cell.
    pub fn cells(&self) -> impl Iterator<Item = Position> {
        let (w, h) = (self.width, self.height);
        (0..h).flat_map(move |y| (0..w).map(move |x| Position::new(x, y)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_excludes_walls() {
        let grid = Grid::new(20, 10);

        assert!(grid.contains(Position::new(0, 0)));
        assert!(grid.contains(Position::new(19, 9)));
        assert!(!grid.contains(Position::new(-1, 5)));
        assert!(!grid.contains(Position::new(20, 5)));
        assert!(!grid.contains(Position::new(5, -1)));
        assert!(!grid.contains(Position::new(5, 10)));
    }

    #[test]
    fn cells_are_row_major_and_complete() {
        let grid = Grid::new(3, 2);
        let cells: Vec<_> = grid.cells().collect();

        assert_eq!(cells.len(), grid.cell_count());
        assert_eq!(cells[0], Position::new(0, 0));
        assert_eq!(cells[1], Position::new(1, 0));
        assert_eq!(cells[3], Position::new(0, 1));
        assert_eq!(cells[5], Position::new(2, 1));
    }

    #[test]
    fn center_of_default_grid() {
        assert_eq!(Grid::new(20, 10).center(), Position::new(10, 5));
    }
}
