mod error;
mod game_state;
mod snake;
mod types;

pub use error::EngineError;
pub use game_state::{GameSnapshot, SnakeGame, FOOD_REWARD, INITIAL_DIRECTION, INITIAL_SNAKE_LENGTH};
pub use snake::Snake;
pub use types::{Direction, GameState, GridSize, Point};
