//! Game state and the per-tick rules.
//!
//! `GameState` owns the snake, the food, the score and the random source.
//! The one field shared with the input thread is the [`Steering`] slot.

use std::sync::Arc;

use log::{debug, info};
use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};

use crate::config::Config;
use crate::grid::{Grid, Position};
use crate::snake::{Direction, MoveResult, Snake};
use crate::steering::Steering;

/// Rejection sampling gives up after this many draws per grid cell and
/// falls back to picking among the free cells directly.
const PLACEMENT_ATTEMPTS_PER_CELL: usize = 4;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Status {
    Running,
    GameOver,
    /// The snake covers every cell, so no food can be placed.
    Won,
}

impl Status {
    pub fn is_finished(self) -> bool {
        self != Status::Running
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    Moved,
    Ate { score: u32 },
    GameOver { score: u32 },
    Won { score: u32 },
}

pub struct GameState {
    grid: Grid,
    snake: Snake,
    food: Option<Position>,
    steering: Arc<Steering>,
    score: u32,
    status: Status,
    rng: StdRng,
}

impl GameState {
    /// Fresh game: a one-segment snake in the middle of the grid heading
    /// right, food on a random free cell.
    pub fn new(config: &Config) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let grid = config.grid();
        let snake = Snake::new(grid.center());
        let mut state = GameState::with_parts(grid, snake, Direction::Right, None, rng);
        state.place_food();
        state
    }

    /// Builds a state from explicit pieces. `food` is taken as-is; pass
    /// `None` and call [`GameState::place_food`] to pick one.
    pub fn with_parts(
        grid: Grid,
        snake: Snake,
        direction: Direction,
        food: Option<Position>,
        rng: StdRng,
    ) -> Self {
        GameState {
            grid,
            snake,
            food,
            steering: Arc::new(Steering::new(direction)),
            score: 0,
            status: Status::Running,
            rng,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> Option<Position> {
        self.food
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn direction(&self) -> Direction {
        self.steering.active()
    }

    /// Handle for the input thread.
    pub fn steering(&self) -> Arc<Steering> {
        Arc::clone(&self.steering)
    }

    pub fn request_direction(&self, direction: Direction) -> bool {
        self.steering.request(direction)
    }

    /// Runs one tick. Once the game has finished this is a no-op that keeps
    /// reporting the same terminal outcome.
    pub fn advance(&mut self) -> TickOutcome {
        match self.status {
            Status::GameOver => return TickOutcome::GameOver { score: self.score },
            Status::Won => return TickOutcome::Won { score: self.score },
            Status::Running => {}
        }

        let direction = self.steering.commit();
        let food = self.food;

        match self.snake.move_step(direction, &self.grid, |head| Some(head) == food) {
            MoveResult::Crashed => {
                self.status = Status::GameOver;
                info!(
                    "[Game] Crashed heading {:?} at {:?}, final score {}",
                    direction,
                    self.snake.head(),
                    self.score
                );
                TickOutcome::GameOver { score: self.score }
            }
            MoveResult::Moved { old_tail: Some(_), .. } => TickOutcome::Moved,
            MoveResult::Moved { new_head, old_tail: None } => {
                self.score += 1;
                info!("[Game] Ate food at {:?}, score {}", new_head, self.score);

                if self.place_food().is_some() {
                    TickOutcome::Ate { score: self.score }
                } else {
                    self.status = Status::Won;
                    info!("[Game] Grid is full, final score {}", self.score);
                    TickOutcome::Won { score: self.score }
                }
            }
        }
    }

    /// Moves the food to a uniformly random cell not covered by the snake.
    /// Returns `None`, and clears the food, when the snake fills the grid.
    pub fn place_food(&mut self) -> Option<Position> {
        let attempts = self.grid.cell_count() * PLACEMENT_ATTEMPTS_PER_CELL;

        let found = (0..attempts)
            .map(|_| {
                Position::new(
                    self.rng.gen_range(0..self.grid.width()),
                    self.rng.gen_range(0..self.grid.height()),
                )
            })
            .find(|candidate| !self.snake.contains(*candidate));

        self.food = found.or_else(|| {
            debug!("[Game] Rejection sampling gave up after {} draws", attempts);
            let free: Vec<Position> =
                self.grid.cells().filter(|pos| !self.snake.contains(*pos)).collect();
            free.choose(&mut self.rng).copied()
        });

        self.food
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snake::Direction::*;

    fn seeded() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    fn state(
        width: i16,
        height: i16,
        body: &[(i16, i16)],
        direction: Direction,
        food: (i16, i16),
    ) -> GameState {
        let snake = Snake::from_segments(body.iter().copied().map(Position::from));
        let grid = Grid::new(width, height);
        GameState::with_parts(grid, snake, direction, Some(food.into()), seeded())
    }

    #[test]
    fn new_game_starts_centered_and_running() {
        let config = Config { seed: Some(1), ..Config::default() };
        let game = GameState::new(&config);

        assert_eq!(game.snake().segments(), vec![Position::new(10, 5)]);
        assert_eq!(game.direction(), Right);
        assert_eq!(game.score(), 0);
        assert_eq!(game.status(), Status::Running);

        let food = game.food().unwrap();
        assert!(game.grid().contains(food));
        assert!(!game.snake().contains(food));
    }

    #[test]
    fn same_seed_same_food() {
        let config = Config { seed: Some(99), ..Config::default() };

        assert_eq!(GameState::new(&config).food(), GameState::new(&config).food());
    }

    #[test]
    fn plain_tick_keeps_length() {
        let mut game = state(20, 10, &[(5, 5), (4, 5), (3, 5)], Right, (0, 0));

        assert_eq!(game.advance(), TickOutcome::Moved);
        assert_eq!(game.snake().len(), 3);
        assert_eq!(game.snake().head(), Position::new(6, 5));
        assert_eq!(game.score(), 0);
    }

    #[test]
    fn eating_grows_and_relocates_food() {
        let mut game = state(20, 10, &[(5, 5), (4, 5)], Right, (6, 5));

        assert_eq!(game.advance(), TickOutcome::Ate { score: 1 });
        assert_eq!(game.snake().len(), 3);

        let food = game.food().unwrap();
        assert_ne!(food, Position::new(6, 5));
        assert!(!game.snake().contains(food));
    }

    #[test]
    fn requested_turn_applies_on_next_tick() {
        let mut game = state(20, 10, &[(5, 5)], Right, (0, 0));

        assert!(game.request_direction(Down));
        assert_eq!(game.direction(), Right);
        game.advance();
        assert_eq!(game.direction(), Down);
        assert_eq!(game.snake().head(), Position::new(5, 6));
    }

    #[test]
    fn every_reversal_is_ignored() {
        for active in Direction::ALL {
            let mut game = state(20, 10, &[(10, 5)], active, (0, 0));

            assert!(!game.request_direction(active.opposite()));
            game.advance();
            assert_eq!(game.direction(), active);
        }
    }

    #[test]
    fn each_wall_ends_the_game() {
        let cases = [((0, 5), Left), ((19, 5), Right), ((5, 0), Up), ((5, 9), Down)];

        for (head, direction) in cases {
            let mut game = state(20, 10, &[head], direction, (10, 5));

            assert_eq!(game.advance(), TickOutcome::GameOver { score: 0 });
            assert_eq!(game.status(), Status::GameOver);
        }
    }

    #[test]
    fn game_over_is_terminal() {
        let mut game = state(20, 10, &[(19, 5)], Right, (0, 0));

        game.advance();
        game.request_direction(Up);
        assert_eq!(game.advance(), TickOutcome::GameOver { score: 0 });
        assert_eq!(game.snake().segments(), vec![Position::new(19, 5)]);
    }

    #[test]
    fn biting_the_body_ends_the_game() {
        // Head at (5,5), turning down hits (5,6) which is not the tail.
        let mut game = state(20, 10, &[(5, 5), (6, 5), (6, 6), (5, 6), (4, 6)], Left, (0, 0));

        game.request_direction(Down);
        assert_eq!(game.advance(), TickOutcome::GameOver { score: 0 });
    }

    #[test]
    fn filling_the_grid_wins() {
        // 2x2 grid, three segments, food on the last free cell.
        let mut game = state(2, 2, &[(0, 1), (0, 0), (1, 0)], Right, (1, 1));

        assert_eq!(game.advance(), TickOutcome::Won { score: 1 });
        assert_eq!(game.status(), Status::Won);
        assert_eq!(game.food(), None);
        assert_eq!(game.advance(), TickOutcome::Won { score: 1 });
    }

    #[test]
    fn placement_finds_the_only_free_cell() {
        let body = [(0, 0), (1, 0), (2, 0), (2, 1), (1, 1)];
        let snake = Snake::from_segments(body.map(Position::from));
        let mut game = GameState::with_parts(Grid::new(3, 2), snake, Up, None, seeded());

        for _ in 0..20 {
            assert_eq!(game.place_food(), Some(Position::new(0, 1)));
        }
    }

    #[test]
    fn placement_on_full_grid_gives_up() {
        let snake = Snake::from_segments([(0, 0), (1, 0), (1, 1), (0, 1)].map(Position::from));
        let food = Some(Position::new(0, 0));
        let mut game = GameState::with_parts(Grid::new(2, 2), snake, Up, food, seeded());

        assert_eq!(game.place_food(), None);
        assert_eq!(game.food(), None);
    }
}
