use std::collections::VecDeque;

use super::types::{Direction, Point};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Snake {
    body: VecDeque<Point>,
    direction: Direction,
}

impl Snake {
    /// Builds a snake whose body trails behind `start`, opposite to `direction`.
    pub fn new(start: Point, direction: Direction, length: usize) -> Self {
        let length = length.max(1);
        let trailing = direction.opposite();

        let mut body = VecDeque::with_capacity(length);
        let mut segment = start;
        body.push_back(segment);
        for _ in 1..length {
            segment = segment.step(trailing);
            body.push_back(segment);
        }

        Self { body, direction }
    }

    pub fn head(&self) -> Point {
        *self.body.front().expect("Snake body should never be empty")
    }

    pub fn tail(&self) -> Point {
        *self.body.back().expect("Snake body should never be empty")
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn segments(&self) -> impl Iterator<Item = &Point> {
        self.body.iter()
    }

    pub fn contains(&self, point: Point) -> bool {
        self.body.contains(&point)
    }

    pub fn new_head(&self, direction: Direction) -> Point {
        self.head().step(direction)
    }

    pub fn next_head(&self) -> Point {
        self.new_head(self.direction)
    }

    /// Returns false when `direction` would turn the head back into the neck.
    pub fn set_direction(&mut self, direction: Direction) -> bool {
        if direction.is_opposite(&self.direction) {
            return false;
        }
        self.direction = direction;
        true
    }

    /// Unconditional turn, used by planned paths that never reverse into the body.
    pub(crate) fn face(&mut self, direction: Direction) {
        self.direction = direction;
    }

    /// Moves one cell forward and returns the cell the tail vacated.
    pub fn step(&mut self) -> Point {
        let next = self.next_head();
        self.body.push_front(next);
        self.body
            .pop_back()
            .expect("Snake body should never be empty")
    }

    /// Extends the tail by one cell and returns the newly occupied cell.
    pub fn grow(&mut self) -> Point {
        self.grow_within(|_| true)
    }

    /// Like [`Snake::grow`], but never extends onto a cell `is_free` rejects.
    ///
    /// Tries the tail's own trajectory first, then the tail's other free
    /// neighbours in [`Direction::ALL`] order. With no free neighbour the new
    /// segment stacks on the tail and separates on the next step.
    pub fn grow_within(&mut self, is_free: impl Fn(Point) -> bool) -> Point {
        let tail = self.tail();
        let extension = std::iter::once(self.trailing_cell())
            .chain(Direction::ALL.into_iter().map(|direction| tail.step(direction)))
            .find(|cell| !self.body.contains(cell) && is_free(*cell))
            .unwrap_or(tail);
        self.body.push_back(extension);
        extension
    }

    fn trailing_cell(&self) -> Point {
        let tail = self.tail();
        match self.body.iter().rev().nth(1) {
            Some(&before_tail) if before_tail != tail => {
                Point::new(2 * tail.x - before_tail.x, 2 * tail.y - before_tail.y)
            }
            _ => tail.step(self.direction.opposite()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snake_at(x: i32, y: i32, direction: Direction) -> Snake {
        Snake::new(Point::new(x, y), direction, 5)
    }

    #[test]
    fn test_new_back_fills_opposite_to_direction() {
        let snake = snake_at(10, 10, Direction::Right);
        let body: Vec<Point> = snake.segments().copied().collect();
        assert_eq!(
            body,
            vec![
                Point::new(10, 10),
                Point::new(9, 10),
                Point::new(8, 10),
                Point::new(7, 10),
                Point::new(6, 10),
            ]
        );

        let snake = snake_at(10, 10, Direction::Up);
        assert_eq!(snake.tail(), Point::new(10, 14));
    }

    #[test]
    fn test_set_direction_rejects_only_opposite() {
        for current in Direction::ALL {
            for requested in Direction::ALL {
                let mut snake = snake_at(10, 10, current);
                let accepted = snake.set_direction(requested);
                if requested.is_opposite(&current) {
                    assert!(!accepted);
                    assert_eq!(snake.direction(), current);
                } else {
                    assert!(accepted);
                    assert_eq!(snake.direction(), requested);
                }
            }
        }
    }

    #[test]
    fn test_step_keeps_length_and_returns_old_tail() {
        let mut snake = snake_at(10, 10, Direction::Right);
        let old_head = snake.head();
        let old_tail = snake.tail();

        let freed = snake.step();

        assert_eq!(freed, old_tail);
        assert_eq!(snake.len(), 5);
        assert_eq!(snake.head(), old_head.step(Direction::Right));
        assert!(!snake.contains(old_tail));
    }

    #[test]
    fn test_step_after_turn_moves_new_way() {
        let mut snake = snake_at(10, 10, Direction::Right);
        snake.set_direction(Direction::Down);
        snake.step();
        assert_eq!(snake.head(), Point::new(10, 11));
    }

    #[test]
    fn test_new_head_is_pure() {
        let snake = snake_at(10, 10, Direction::Right);
        assert_eq!(snake.new_head(Direction::Up), Point::new(10, 9));
        assert_eq!(snake.head(), Point::new(10, 10));
        assert_eq!(snake.next_head(), Point::new(11, 10));
    }

    #[test]
    fn test_grow_adds_one_segment_beyond_tail() {
        let mut snake = snake_at(10, 10, Direction::Right);
        let head = snake.head();

        let added = snake.grow();

        assert_eq!(added, Point::new(5, 10));
        assert_eq!(snake.len(), 6);
        assert_eq!(snake.head(), head);
        assert_eq!(snake.tail(), added);
    }

    #[test]
    fn test_grow_follows_bent_tail() {
        let mut snake = Snake::new(Point::new(5, 5), Direction::Right, 2);
        snake.set_direction(Direction::Down);
        snake.step();
        // body is now (5,6), (5,5)
        let added = snake.grow();
        assert_eq!(added, Point::new(5, 4));
    }

    #[test]
    fn test_grow_within_skips_blocked_trajectory() {
        let mut snake = Snake::new(Point::new(5, 5), Direction::Right, 2);
        snake.set_direction(Direction::Down);
        snake.step();
        // body is now (5,6), (5,5); the trajectory cell (5,4) is a wall
        let added = snake.grow_within(|cell| cell != Point::new(5, 4));
        assert_eq!(added, Point::new(4, 5));
        assert_eq!(snake.len(), 3);
    }

    #[test]
    fn test_grow_within_stays_on_the_field() {
        let mut snake = snake_at(4, 3, Direction::Right);
        let on_field = |cell: Point| cell.x >= 0 && cell.y >= 0;

        let added = snake.grow_within(on_field);

        assert_eq!(added, Point::new(0, 2));
        assert!(snake.segments().all(|segment| on_field(*segment)));
    }

    #[test]
    fn test_grow_within_stacks_on_tail_when_boxed_in() {
        let mut snake = snake_at(4, 3, Direction::Right);
        let tail = snake.tail();

        let added = snake.grow_within(|_| false);

        assert_eq!(added, tail);
        assert_eq!(snake.len(), 6);
        let freed = snake.step();
        assert_eq!(freed, tail);
        assert!(snake.contains(tail));
    }

    #[test]
    fn test_single_segment_snake_grows_behind_head() {
        let mut snake = Snake::new(Point::new(3, 3), Direction::Left, 1);
        assert_eq!(snake.grow(), Point::new(4, 3));
    }
}
