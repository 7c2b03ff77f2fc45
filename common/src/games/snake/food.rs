use std::collections::HashSet;

use crate::games::SessionRng;
use super::types::{FieldSize, Point};

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum FoodError {
    #[error("no free cell left for food on a {width}x{height} board")]
    Saturated { width: usize, height: usize },
    #[error("food index {index} is out of range for a pool of {len}")]
    IndexOutOfRange { index: usize, len: usize },
}

/// Ordinary and red food pools plus the eat counters that drive red spawns.
#[derive(Clone, Debug)]
pub struct FoodService {
    field_size: FieldSize,
    pub food: Vec<Point>,
    pub red_food: Vec<Point>,
    eat_count: u32,
    eats_since_red: u32,
    pub multiply_by: u32,
    pub is_red_food_enabled: bool,
}

impl FoodService {
    pub fn new(field_size: FieldSize) -> Self {
        Self {
            field_size,
            food: Vec::new(),
            red_food: Vec::new(),
            eat_count: 0,
            eats_since_red: 0,
            multiply_by: 1,
            is_red_food_enabled: false,
        }
    }

    pub fn eat_count(&self) -> u32 {
        self.eat_count
    }

    pub fn increase_food_count(&mut self) {
        self.eat_count += 1;
    }

    pub fn is_food_available(&self, point: Point) -> bool {
        self.food.contains(&point)
    }

    pub fn food_index_at(&self, point: Point) -> Option<usize> {
        self.food.iter().position(|item| *item == point)
    }

    pub fn red_food_index_at(&self, point: Point) -> Option<usize> {
        self.red_food.iter().position(|item| *item == point)
    }

    /// `exclude` must hold every wall and snake segment; existing food is
    /// always excluded.
    pub fn add_food(
        &mut self,
        exclude: &[Point],
        is_red_food: bool,
        rng: &mut SessionRng,
    ) -> Result<(), FoodError> {
        if is_red_food {
            let point = self.random_free_point(exclude, rng)?;
            self.red_food.push(point);
        } else {
            for _ in 0..self.multiply_by.max(1) {
                let point = self.random_free_point(exclude, rng)?;
                self.food.push(point);
            }
        }
        Ok(())
    }

    /// Consumes the item at `index` and spawns its replacement. Ordinary food
    /// also counts towards the red cadence: once `snake_count` ordinary items
    /// have been eaten since the last red spawn, one red item appears.
    pub fn replenish_food(
        &mut self,
        index: usize,
        snake_count: usize,
        exclude: &[Point],
        is_red_food: bool,
        rng: &mut SessionRng,
    ) -> Result<Option<Point>, FoodError> {
        self.take(index, is_red_food)?;

        let mut red_spawned = None;
        if !is_red_food {
            self.increase_food_count();
            if self.is_red_food_enabled && snake_count > 0 {
                self.eats_since_red += 1;
                if self.eats_since_red as usize >= snake_count {
                    self.eats_since_red = 0;
                    let point = self.random_free_point(exclude, rng)?;
                    self.red_food.push(point);
                    red_spawned = Some(point);
                }
            }
        }

        self.add_food(exclude, is_red_food, rng)?;
        Ok(red_spawned)
    }

    /// Consumption without score or red cadence, used for the enemy.
    pub fn replace_food(
        &mut self,
        index: usize,
        exclude: &[Point],
        rng: &mut SessionRng,
    ) -> Result<(), FoodError> {
        self.take(index, false)?;
        self.add_food(exclude, false, rng)
    }

    /// Clears pools and counters. Feature toggles stay as configured.
    pub fn reset(&mut self) {
        self.food.clear();
        self.red_food.clear();
        self.eat_count = 0;
        self.eats_since_red = 0;
    }

    fn take(&mut self, index: usize, is_red_food: bool) -> Result<Point, FoodError> {
        let pool = if is_red_food {
            &mut self.red_food
        } else {
            &mut self.food
        };
        if index >= pool.len() {
            return Err(FoodError::IndexOutOfRange {
                index,
                len: pool.len(),
            });
        }
        Ok(pool.remove(index))
    }

    fn random_free_point(&self, exclude: &[Point], rng: &mut SessionRng) -> Result<Point, FoodError> {
        let taken: HashSet<Point> = exclude
            .iter()
            .chain(self.food.iter())
            .chain(self.red_food.iter())
            .copied()
            .collect();
        let free: Vec<Point> = self
            .field_size
            .cells()
            .filter(|point| !taken.contains(point))
            .collect();

        rng.choose(&free).ok_or(FoodError::Saturated {
            width: self.field_size.width,
            height: self.field_size.height,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service(width: usize, height: usize) -> (FoodService, SessionRng) {
        (FoodService::new(FieldSize::new(width, height)), SessionRng::new(42))
    }

    #[test]
    fn test_add_food_avoids_excluded_cells() {
        let (mut food, mut rng) = service(3, 3);
        let exclude: Vec<Point> = FieldSize::new(3, 3)
            .cells()
            .filter(|p| *p != Point::new(2, 1))
            .collect();

        food.add_food(&exclude, false, &mut rng).unwrap();

        assert_eq!(food.food, vec![Point::new(2, 1)]);
    }

    #[test]
    fn test_add_food_never_stacks_on_food() {
        let (mut food, mut rng) = service(2, 1);
        food.add_food(&[], false, &mut rng).unwrap();
        food.add_food(&[], false, &mut rng).unwrap();
        assert_ne!(food.food[0], food.food[1]);
        assert_eq!(
            food.add_food(&[], true, &mut rng),
            Err(FoodError::Saturated { width: 2, height: 1 })
        );
    }

    #[test]
    fn test_multiplier_adds_several_items() {
        let (mut food, mut rng) = service(10, 10);
        food.multiply_by = 3;
        food.add_food(&[], false, &mut rng).unwrap();
        assert_eq!(food.food.len(), 3);

        food.add_food(&[], true, &mut rng).unwrap();
        assert_eq!(food.red_food.len(), 1);
    }

    #[test]
    fn test_replenish_replaces_consumed_item() {
        let (mut food, mut rng) = service(10, 10);
        food.food = vec![Point::new(1, 1), Point::new(2, 2)];

        let red = food.replenish_food(0, 1, &[], false, &mut rng).unwrap();

        assert_eq!(red, None);
        assert_eq!(food.food.len(), 2);
        assert!(!food.is_food_available(Point::new(1, 1)));
        assert!(food.is_food_available(Point::new(2, 2)));
        assert_eq!(food.eat_count(), 1);
    }

    #[test]
    fn test_red_food_spawns_once_every_snake_has_eaten() {
        let (mut food, mut rng) = service(20, 20);
        food.is_red_food_enabled = true;
        food.food = vec![Point::new(1, 1), Point::new(2, 2), Point::new(3, 3)];
        let snake_count = 3;

        food.replenish_food(0, snake_count, &[], false, &mut rng).unwrap();
        assert!(food.red_food.is_empty());
        food.replenish_food(0, snake_count, &[], false, &mut rng).unwrap();
        assert!(food.red_food.is_empty());

        let red = food.replenish_food(0, snake_count, &[], false, &mut rng).unwrap();
        assert!(red.is_some());
        assert_eq!(food.red_food.len(), 1);
        assert_eq!(food.red_food[0], red.unwrap());

        food.replenish_food(0, snake_count, &[], false, &mut rng).unwrap();
        assert_eq!(food.red_food.len(), 1);
    }

    #[test]
    fn test_red_food_disabled_never_spawns() {
        let (mut food, mut rng) = service(20, 20);
        food.food = vec![Point::new(1, 1)];
        for _ in 0..5 {
            food.replenish_food(0, 1, &[], false, &mut rng).unwrap();
        }
        assert!(food.red_food.is_empty());
        assert_eq!(food.eat_count(), 5);
    }

    #[test]
    fn test_eating_red_food_replaces_it_without_counting() {
        let (mut food, mut rng) = service(20, 20);
        food.is_red_food_enabled = true;
        food.red_food = vec![Point::new(4, 4)];

        let red = food.replenish_food(0, 1, &[], true, &mut rng).unwrap();

        assert_eq!(red, None);
        assert_eq!(food.red_food.len(), 1);
        assert_ne!(food.red_food[0], Point::new(4, 4));
        assert_eq!(food.eat_count(), 0);
    }

    #[test]
    fn test_replace_food_skips_counters() {
        let (mut food, mut rng) = service(20, 20);
        food.is_red_food_enabled = true;
        food.food = vec![Point::new(4, 4)];

        food.replace_food(0, &[], &mut rng).unwrap();

        assert_eq!(food.food.len(), 1);
        assert_eq!(food.eat_count(), 0);
        assert!(food.red_food.is_empty());
    }

    #[test]
    fn test_bad_index_is_rejected() {
        let (mut food, mut rng) = service(5, 5);
        assert_eq!(
            food.replenish_food(2, 1, &[], false, &mut rng),
            Err(FoodError::IndexOutOfRange { index: 2, len: 0 })
        );
    }

    #[test]
    fn test_reset_keeps_toggles() {
        let (mut food, mut rng) = service(5, 5);
        food.is_red_food_enabled = true;
        food.multiply_by = 2;
        food.add_food(&[], false, &mut rng).unwrap();
        food.reset();
        assert!(food.food.is_empty());
        assert!(food.is_red_food_enabled);
        assert_eq!(food.multiply_by, 2);
    }
}
