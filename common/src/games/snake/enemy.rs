use std::collections::VecDeque;

use super::entity::Snake;
use super::occupancy::OccupancyGrid;
use super::search::BreadthFirstSearch;
use super::types::{Direction, Point};

/// Autonomous steering state attached to the enemy snake.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EnemyController {
    alive: bool,
    directions_to_exhaust: VecDeque<Direction>,
    target_food: Option<Point>,
}

impl Default for EnemyController {
    fn default() -> Self {
        Self {
            alive: true,
            directions_to_exhaust: VecDeque::new(),
            target_food: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Enemy {
    snake: Snake,
    controller: EnemyController,
}

impl Enemy {
    pub fn new(start: Point, direction: Direction, length: usize) -> Self {
        Self {
            snake: Snake::new(start, direction, length),
            controller: EnemyController::default(),
        }
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn head(&self) -> Point {
        self.snake.head()
    }

    pub fn is_alive(&self) -> bool {
        self.controller.alive
    }

    pub fn target_food(&self) -> Option<Point> {
        self.controller.target_food
    }

    pub fn queued_directions(&self) -> usize {
        self.controller.directions_to_exhaust.len()
    }

    /// Targets the closest food by Manhattan distance; the first of several
    /// equally close items wins.
    pub fn set_target_food(&mut self, food: &[Point]) -> Option<Point> {
        let head = self.snake.head();
        self.controller.target_food = food
            .iter()
            .min_by_key(|item| head.manhattan_distance(**item))
            .copied();
        self.controller.target_food
    }

    pub fn set_directions_to_exhaust(&mut self, directions: Vec<Direction>) {
        self.controller.directions_to_exhaust = directions.into();
    }

    /// Picks a target and installs the path to it. Returns the path length.
    pub fn plan(&mut self, grid: &OccupancyGrid, food: &[Point]) -> usize {
        let path = match self.set_target_food(food) {
            Some(goal) => {
                BreadthFirstSearch::new(grid, self.snake.head()).solve(goal, self.snake.direction())
            }
            None => Vec::new(),
        };
        let length = path.len();
        self.set_directions_to_exhaust(path);
        length
    }

    /// Follows the next queued direction. An empty queue stops the enemy for
    /// good and yields no move.
    pub fn step(&mut self) -> Option<Point> {
        if !self.controller.alive {
            return None;
        }
        match self.controller.directions_to_exhaust.pop_front() {
            Some(direction) => {
                self.snake.face(direction);
                Some(self.snake.step())
            }
            None => {
                self.controller.alive = false;
                None
            }
        }
    }

    pub fn grow(&mut self) -> Point {
        self.snake.grow()
    }

    pub fn grow_within(&mut self, is_free: impl Fn(Point) -> bool) -> Point {
        self.snake.grow_within(is_free)
    }

    pub fn kill(&mut self) {
        self.controller.alive = false;
        self.controller.directions_to_exhaust.clear();
    }
}
