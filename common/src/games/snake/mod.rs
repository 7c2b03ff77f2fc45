mod board;
mod enemy;
mod entity;
mod food;
mod occupancy;
mod search;
mod settings;
mod types;

pub use board::{Board, BoardError, RoundState};
pub use enemy::{Enemy, EnemyController};
pub use entity::Snake;
pub use food::{FoodError, FoodService};
pub use occupancy::OccupancyGrid;
pub use search::{BreadthFirstSearch, shortest_path};
pub use settings::SnakeGameSettings;
pub use types::{
    BOARD_HEIGHT, BOARD_WIDTH, DeathReason, Direction, FieldSize, GameEvent, INITIAL_SNAKE_LENGTH,
    MAX_SNAKE_COUNT, Point, SnakeType, starting_point,
};
