use serde::{Deserialize, Serialize};

pub const BOARD_WIDTH: usize = 50;
pub const BOARD_HEIGHT: usize = 25;
pub const INITIAL_SNAKE_LENGTH: usize = 5;
pub const MAX_SNAKE_COUNT: usize = 5;

/// Grid cell address. Signed so a head one step past the edge is representable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn step(self, direction: Direction) -> Point {
        let (dx, dy) = direction.delta();
        Point::new(self.x + dx, self.y + dy)
    }

    pub fn manhattan_distance(self, other: Point) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Neighbour order used everywhere a deterministic tie-break is needed.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    pub fn opposite(&self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    pub fn is_opposite(&self, other: &Direction) -> bool {
        self.opposite() == *other
    }

    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeathReason {
    HitWall,
    HitSelf,
    HitEnemy,
    BoardFull,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldSize {
    pub width: usize,
    pub height: usize,
}

impl FieldSize {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    pub fn contains(&self, point: Point) -> bool {
        point.x >= 0
            && point.y >= 0
            && (point.x as usize) < self.width
            && (point.y as usize) < self.height
    }

    pub fn cell_count(&self) -> usize {
        self.width * self.height
    }

    /// Row-major iteration over every cell.
    pub fn cells(&self) -> impl Iterator<Item = Point> + '_ {
        (0..self.height).flat_map(move |y| (0..self.width).map(move |x| Point::new(x as i32, y as i32)))
    }
}

/// Cosmetic body pattern picked in the menu; the renderer owns the colours.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SnakeType {
    #[default]
    Viper,
    Mamba,
    Dispholidus,
    Anaconda,
    Python,
    Anilius,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameEvent {
    Fed { snake: usize, red: bool },
    EnemyFed,
    RedFoodSpawned(Point),
    EnemyStopped,
    UnifiedControlStarted,
    UnifiedControlEnded,
    Hit(DeathReason),
    GameOver(DeathReason),
}

/// Spreads snakes along the board diagonal.
pub fn starting_point(field_size: FieldSize, snake_count: usize, index: usize) -> Point {
    let slots = snake_count + 1;
    Point::new(
        (field_size.width * (index + 1) / slots) as i32,
        (field_size.height * (index + 1) / slots) as i32,
    )
}
