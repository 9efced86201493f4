use crate::games::SessionRng;
use crate::log;
use super::error::EngineError;
use super::snake::Snake;
use super::types::{Direction, GameState, GridSize, Point};

pub const FOOD_REWARD: u32 = 10;
pub const INITIAL_SNAKE_LENGTH: usize = 3;
pub const INITIAL_DIRECTION: Direction = Direction::Right;

const FOOD_SAMPLE_ATTEMPTS: usize = 256;

/// Owned copy of everything a front end needs to draw one frame.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameSnapshot {
    pub snake: Vec<Point>,
    pub food: Option<Point>,
    pub score: u32,
    pub state: GameState,
}

/// Single-player snake on a fixed grid.
///
/// A tick is `move_snake()` followed by `update()`. `move_snake()` does not look at
/// the game state, so callers that keep ticking after `GameOver` keep mutating the
/// board. Hosts are expected to stop ticking once the game is over.
pub struct SnakeGame {
    grid: GridSize,
    snake: Snake,
    food: Option<Point>,
    score: u32,
    state: GameState,
    rng: SessionRng,
}

impl SnakeGame {
    pub fn new(width: i32, height: i32) -> Result<Self, EngineError> {
        Self::with_rng(width, height, SessionRng::from_random())
    }

    pub fn with_seed(width: i32, height: i32, seed: u64) -> Result<Self, EngineError> {
        Self::with_rng(width, height, SessionRng::new(seed))
    }

    fn with_rng(width: i32, height: i32, rng: SessionRng) -> Result<Self, EngineError> {
        if width <= 0 || height <= 0 {
            return Err(EngineError::InvalidConfiguration { width, height });
        }

        let grid = GridSize { width, height };
        let mut game = Self {
            grid,
            snake: Snake::new(grid.center(), INITIAL_DIRECTION, INITIAL_SNAKE_LENGTH),
            food: None,
            score: 0,
            state: GameState::Ready,
            rng,
        };
        game.reset();
        Ok(game)
    }

    fn reset(&mut self) {
        self.snake = Snake::new(self.grid.center(), INITIAL_DIRECTION, INITIAL_SNAKE_LENGTH);
        self.score = 0;
        self.state = GameState::Ready;
        self.food = self.generate_food();
    }

    pub fn start(&mut self) {
        match self.state {
            GameState::GameOver => {
                log!("Ignoring start on a finished game, restart it first");
            }
            _ => self.state = GameState::Playing,
        }
    }

    pub fn restart(&mut self) {
        self.reset();
    }

    /// Reversing straight into the neck is ignored.
    pub fn change_direction(&mut self, direction: Direction) {
        if !direction.is_opposite(&self.snake.direction) {
            self.snake.direction = direction;
        }
    }

    pub fn move_snake(&mut self) {
        let new_head = self.snake.push_head();

        if self.food == Some(new_head) {
            self.eat_food();
        } else {
            self.snake.drop_tail();
        }
    }

    fn eat_food(&mut self) {
        self.score += FOOD_REWARD;
        self.food = self.generate_food();
        log!(
            "Food eaten, score: {}, length: {}",
            self.score,
            self.snake.len()
        );
    }

    pub fn update(&mut self) {
        if self.state == GameState::Playing && self.check_collision() {
            let head = self.snake.head();
            log!(
                "Collision at ({}, {}), game over with score {}",
                head.x,
                head.y,
                self.score
            );
            self.state = GameState::GameOver;
        }
    }

    pub fn check_collision(&self) -> bool {
        !self.grid.contains(self.snake.head()) || self.snake.head_hits_body()
    }

    fn generate_food(&mut self) -> Option<Point> {
        self.generate_food_with_attempts(FOOD_SAMPLE_ATTEMPTS)
    }

    fn generate_food_with_attempts(&mut self, attempts: usize) -> Option<Point> {
        for _ in 0..attempts {
            let candidate = Point::new(
                self.rng.random_range(0..self.grid.width),
                self.rng.random_range(0..self.grid.height),
            );
            if !self.snake.occupies(&candidate) {
                return Some(candidate);
            }
        }

        // Crowded board: pick uniformly from what is actually left.
        let free: Vec<Point> = (0..self.grid.height)
            .flat_map(|y| (0..self.grid.width).map(move |x| Point::new(x, y)))
            .filter(|cell| !self.snake.occupies(cell))
            .collect();

        if free.is_empty() {
            log!("No free cell left for food");
            return None;
        }

        Some(free[self.rng.random_range(0..free.len())])
    }

    pub fn grid(&self) -> GridSize {
        self.grid
    }

    pub fn body(&self) -> impl Iterator<Item = &Point> {
        self.snake.body.iter()
    }

    pub fn head(&self) -> Point {
        self.snake.head()
    }

    pub fn snake_len(&self) -> usize {
        self.snake.len()
    }

    pub fn direction(&self) -> Direction {
        self.snake.direction
    }

    pub fn food(&self) -> Option<Point> {
        self.food
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            snake: self.snake.body.iter().copied().collect(),
            food: self.food,
            score: self.score,
            state: self.state,
        }
    }

    #[cfg(test)]
    fn set_body(&mut self, body: Vec<Point>) {
        self.snake.body = body.into();
    }

    #[cfg(test)]
    fn set_food(&mut self, food: Point) {
        self.food = Some(food);
    }

    #[cfg(test)]
    fn set_direction_unchecked(&mut self, direction: Direction) {
        self.snake.direction = direction;
    }
}
