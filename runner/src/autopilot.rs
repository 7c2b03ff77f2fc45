use common::games::SessionRng;
use common::games::snake::{Board, Direction, Point};

/// Greedy steering for unattended rounds: head for the nearest food through
/// any free neighbouring cell.
pub struct Autopilot;

impl Autopilot {
    /// Returns how many snakes changed direction.
    pub fn steer_all(board: &mut Board, rng: &mut SessionRng) -> usize {
        let mut turned = 0;
        for index in 0..board.snakes().len() {
            if let Some(direction) = Self::calculate_move(board, index, rng)
                && board.snake(index).is_some_and(|snake| snake.direction() != direction)
                && matches!(board.set_direction(index, direction), Ok(true))
            {
                turned += 1;
            }
        }
        turned
    }

    /// `None` when every reachable neighbour is blocked; the snake keeps its
    /// heading and the next collision check ends the round.
    pub fn calculate_move(board: &Board, index: usize, rng: &mut SessionRng) -> Option<Direction> {
        let snake = board.snake(index)?;
        let head = snake.head();

        let safe_directions: Vec<Direction> = Self::get_valid_directions(snake.direction())
            .filter(|direction| board.occupancy().is_passable(head.step(*direction)))
            .collect();

        match Self::find_nearest_food(head, board) {
            Some(food) => safe_directions
                .iter()
                .copied()
                .min_by_key(|direction| head.step(*direction).manhattan_distance(food)),
            None => rng.choose(&safe_directions),
        }
    }

    fn get_valid_directions(current: Direction) -> impl Iterator<Item = Direction> {
        Direction::ALL
            .into_iter()
            .filter(move |direction| !direction.is_opposite(&current))
    }

    fn find_nearest_food(from: Point, board: &Board) -> Option<Point> {
        let food = board.food();
        food.food
            .iter()
            .chain(food.red_food.iter())
            .min_by_key(|item| from.manhattan_distance(**item))
            .copied()
    }
}
