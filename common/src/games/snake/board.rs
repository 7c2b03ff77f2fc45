use crate::games::SessionRng;
use crate::{debug_log, log};
use super::enemy::Enemy;
use super::entity::Snake;
use super::food::{FoodError, FoodService};
use super::occupancy::OccupancyGrid;
use super::settings::SnakeGameSettings;
use super::types::{
    DeathReason, Direction, FieldSize, GameEvent, INITIAL_SNAKE_LENGTH, MAX_SNAKE_COUNT, Point,
    SnakeType, starting_point,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RoundState {
    Idle,
    Active,
    Over,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error("round is not active ({0:?})")]
    RoundNotActive(RoundState),
    #[error("no snake with index {0}")]
    UnknownSnake(usize),
    #[error("snake count must be between 1 and {max}, got {count}")]
    InvalidSnakeCount { count: usize, max: usize },
    #[error(transparent)]
    Food(#[from] FoodError),
}

/// Owns every piece of round state and advances it one tick at a time.
///
/// A driver calls [`Board::can_proceed`] and then [`Board::tick`] once per
/// interval. Renderers read snakes, food, walls and the death reason back out;
/// discrete events are collected with [`Board::take_events`].
pub struct Board {
    field_size: FieldSize,
    snakes: Vec<Snake>,
    enemy: Option<Enemy>,
    walls: Vec<Point>,
    food: FoodService,
    occupancy: OccupancyGrid,
    selected_snake: usize,
    snake_count: usize,
    snake_type: SnakeType,
    enemy_enabled: bool,
    unified_control_ticks: u32,
    unified_control_remaining: u32,
    death_reason: Option<DeathReason>,
    state: RoundState,
    events: Vec<GameEvent>,
}

impl Board {
    pub fn new(width: usize, height: usize) -> Self {
        let field_size = FieldSize::new(width, height);
        let defaults = SnakeGameSettings::default();
        Self {
            field_size,
            snakes: Vec::new(),
            enemy: None,
            walls: Vec::new(),
            food: FoodService::new(field_size),
            occupancy: OccupancyGrid::open(field_size),
            selected_snake: 0,
            snake_count: defaults.snake_count as usize,
            snake_type: defaults.snake_type,
            enemy_enabled: defaults.enemy_enabled,
            unified_control_ticks: defaults.unified_control_ticks,
            unified_control_remaining: 0,
            death_reason: None,
            state: RoundState::Idle,
            events: Vec::new(),
        }
    }

    pub fn from_settings(settings: &SnakeGameSettings) -> Result<Self, BoardError> {
        let mut board = Self::new(settings.field_width as usize, settings.field_height as usize);
        board.apply_settings(settings)?;
        Ok(board)
    }

    /// Applies the per-round toggles. The field size is fixed at construction.
    pub fn apply_settings(&mut self, settings: &SnakeGameSettings) -> Result<(), BoardError> {
        self.set_snake_count(settings.snake_count as usize)?;
        self.set_snake_type(settings.snake_type);
        self.set_enemy_enabled(settings.enemy_enabled);
        self.set_red_food_enabled(settings.red_food_enabled);
        self.set_food_multiplier(settings.food_multiplier);
        self.set_unified_control_ticks(settings.unified_control_ticks);
        Ok(())
    }

    pub fn width(&self) -> usize {
        self.field_size.width
    }

    pub fn height(&self) -> usize {
        self.field_size.height
    }

    pub fn field_size(&self) -> FieldSize {
        self.field_size
    }

    pub fn snakes(&self) -> &[Snake] {
        &self.snakes
    }

    pub fn snake(&self, index: usize) -> Option<&Snake> {
        self.snakes.get(index)
    }

    pub fn enemy(&self) -> Option<&Enemy> {
        self.enemy.as_ref()
    }

    pub fn walls(&self) -> &[Point] {
        &self.walls
    }

    pub fn food(&self) -> &FoodService {
        &self.food
    }

    pub fn food_mut(&mut self) -> &mut FoodService {
        &mut self.food
    }

    pub fn occupancy(&self) -> &OccupancyGrid {
        &self.occupancy
    }

    pub fn eat_count(&self) -> u32 {
        self.food.eat_count()
    }

    pub fn state(&self) -> RoundState {
        self.state
    }

    pub fn death_reason(&self) -> Option<DeathReason> {
        self.death_reason
    }

    pub fn selected_snake(&self) -> usize {
        self.selected_snake
    }

    pub fn set_selected_snake(&mut self, index: usize) -> Result<(), BoardError> {
        if index >= self.snakes.len() {
            return Err(BoardError::UnknownSnake(index));
        }
        self.selected_snake = index;
        Ok(())
    }

    pub fn snake_count(&self) -> usize {
        self.snake_count
    }

    pub fn set_snake_count(&mut self, snake_count: usize) -> Result<(), BoardError> {
        if !(1..=MAX_SNAKE_COUNT).contains(&snake_count) {
            return Err(BoardError::InvalidSnakeCount {
                count: snake_count,
                max: MAX_SNAKE_COUNT,
            });
        }
        self.snake_count = snake_count;
        Ok(())
    }

    pub fn snake_type(&self) -> SnakeType {
        self.snake_type
    }

    pub fn set_snake_type(&mut self, snake_type: SnakeType) {
        self.snake_type = snake_type;
    }

    pub fn set_enemy_enabled(&mut self, enabled: bool) {
        self.enemy_enabled = enabled;
    }

    pub fn set_red_food_enabled(&mut self, enabled: bool) {
        self.food.is_red_food_enabled = enabled;
    }

    pub fn set_food_multiplier(&mut self, multiply_by: u32) {
        self.food.multiply_by = multiply_by.max(1);
    }

    pub fn set_unified_control_ticks(&mut self, ticks: u32) {
        self.unified_control_ticks = ticks;
    }

    pub fn unified_control_active(&self) -> bool {
        self.unified_control_remaining > 0
    }

    pub fn unified_control_remaining(&self) -> u32 {
        self.unified_control_remaining
    }

    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Back to an empty idle board, ready for the next round.
    pub fn reset_board(&mut self) {
        self.walls.clear();
        self.snakes.clear();
        self.enemy = None;
        self.food.reset();
        self.selected_snake = 0;
        self.unified_control_remaining = 0;
        self.death_reason = None;
        self.state = RoundState::Idle;
        self.events.clear();
        self.occupancy = OccupancyGrid::open(self.field_size);
    }

    /// Resets the board, lays out `snake_count` snakes along the diagonal,
    /// the enemy in the bottom-right corner when enabled, one food per snake,
    /// and activates the round.
    pub fn start_round(&mut self, rng: &mut SessionRng) -> Result<(), BoardError> {
        self.reset_board();

        for index in 0..self.snake_count {
            let start = starting_point(self.field_size, self.snake_count, index);
            self.add_snake(start, Direction::Right);
        }

        if self.enemy_enabled {
            let start = Point::new(
                self.field_size.width.saturating_sub(INITIAL_SNAKE_LENGTH) as i32,
                self.field_size.height as i32 - 2,
            );
            if !self.spawn_enemy(start, Direction::Left) {
                log!("Enemy start ({}, {}) is blocked, playing without enemy", start.x, start.y);
            }
        }

        for _ in 0..self.snake_count {
            let exclude = self.occupied_points();
            self.food.add_food(&exclude, false, rng)?;
        }

        self.activate();
        log!(
            "Round started on {}x{} with {} snake(s){}",
            self.field_size.width,
            self.field_size.height,
            self.snakes.len(),
            if self.enemy.is_some() { " and an enemy" } else { "" }
        );
        Ok(())
    }

    pub fn activate(&mut self) {
        self.state = RoundState::Active;
        self.death_reason = None;
    }

    pub fn add_snake(&mut self, start: Point, direction: Direction) -> usize {
        let snake = Snake::new(start, direction, INITIAL_SNAKE_LENGTH);
        for segment in snake.segments() {
            self.occupancy.block(*segment);
        }
        self.snakes.push(snake);
        self.snakes.len() - 1
    }

    /// Places the enemy unless any of its cells is off the board or taken.
    pub fn spawn_enemy(&mut self, start: Point, direction: Direction) -> bool {
        let enemy = Enemy::new(start, direction, INITIAL_SNAKE_LENGTH);
        if !enemy.snake().segments().all(|segment| self.occupancy.is_passable(*segment)) {
            return false;
        }
        for segment in enemy.snake().segments() {
            self.occupancy.block(*segment);
        }
        self.enemy = Some(enemy);
        true
    }

    /// Walls plus every snake segment, enemy included.
    pub fn occupied_points(&self) -> Vec<Point> {
        self.walls
            .iter()
            .chain(self.bodies().flat_map(Snake::segments))
            .copied()
            .collect()
    }

    pub fn refresh_occupancy(&mut self) {
        self.occupancy = OccupancyGrid::build(
            self.field_size,
            &self.walls,
            self.snakes.iter().chain(self.enemy.as_ref().map(Enemy::snake)),
        );
    }

    pub fn set_direction(&mut self, index: usize, direction: Direction) -> Result<bool, BoardError> {
        let snake = self
            .snakes
            .get_mut(index)
            .ok_or(BoardError::UnknownSnake(index))?;
        Ok(snake.set_direction(direction))
    }

    /// Turns the selected snake, or every snake while unified control is on.
    /// Returns how many snakes accepted the turn.
    pub fn steer_selected(&mut self, direction: Direction) -> usize {
        if self.unified_control_active() {
            return self
                .snakes
                .iter_mut()
                .map(|snake| snake.set_direction(direction))
                .filter(|&accepted| accepted)
                .count();
        }
        self.snakes
            .get_mut(self.selected_snake)
            .map_or(0, |snake| usize::from(snake.set_direction(direction)))
    }

    pub fn set_walls(&mut self, point: Point) -> bool {
        let on_snake = self.bodies().any(|snake| snake.contains(point));
        let on_food = self.food.is_food_available(point) || self.food.red_food.contains(&point);
        if !self.field_size.contains(point) || self.walls.contains(&point) || on_snake || on_food {
            return false;
        }
        self.walls.push(point);
        self.occupancy.block(point);
        debug_log!("Wall added at ({}, {}), {} total", point.x, point.y, self.walls.len());
        true
    }

    pub fn remove_walls(&mut self, point: Point) -> bool {
        let Some(index) = self.walls.iter().position(|wall| *wall == point) else {
            return false;
        };
        self.walls.remove(index);
        self.occupancy.release(point);
        debug_log!("Wall removed at ({}, {}), {} total", point.x, point.y, self.walls.len());
        true
    }

    /// First collision any player snake would run into on its next step.
    /// Checked per snake as wall, then snake bodies, then the enemy.
    pub fn check_collision(&self) -> Option<DeathReason> {
        for snake in &self.snakes {
            let next = snake.next_head();
            if !self.field_size.contains(next) || self.walls.contains(&next) {
                return Some(DeathReason::HitWall);
            }
            if self.snakes.iter().any(|other| other.contains(next)) {
                return Some(DeathReason::HitSelf);
            }
            if self
                .enemy
                .as_ref()
                .is_some_and(|enemy| enemy.snake().contains(next))
            {
                return Some(DeathReason::HitEnemy);
            }
        }
        None
    }

    /// One death ends the round for every snake.
    pub fn can_proceed(&mut self) -> bool {
        if self.state == RoundState::Over {
            return false;
        }
        match self.check_collision() {
            Some(reason) => {
                self.events.push(GameEvent::Hit(reason));
                self.end_round(reason);
                false
            }
            None => true,
        }
    }

    /// Advances every snake by one cell. Returns whether a player snake ate.
    pub fn tick(&mut self, rng: &mut SessionRng) -> Result<bool, BoardError> {
        if self.state != RoundState::Active {
            return Err(BoardError::RoundNotActive(self.state));
        }
        self.count_down_unified_control();

        let mut fed = false;
        for index in 0..self.snakes.len() {
            let freed = self.snakes[index].step();
            self.release_if_vacant(freed);
            let head = self.snakes[index].head();
            self.occupancy.block(head);

            match self.feed_player(index, head, rng) {
                Ok(ate) => fed |= ate,
                Err(FoodError::Saturated { .. }) => {
                    self.end_round(DeathReason::BoardFull);
                    return Ok(true);
                }
                Err(err) => return Err(err.into()),
            }
        }

        match self.advance_enemy(rng) {
            Ok(()) => {}
            Err(FoodError::Saturated { .. }) => self.end_round(DeathReason::BoardFull),
            Err(err) => return Err(err.into()),
        }

        Ok(fed)
    }

    fn bodies(&self) -> impl Iterator<Item = &Snake> {
        self.snakes
            .iter()
            .chain(self.enemy.as_ref().map(Enemy::snake))
    }

    fn feed_player(
        &mut self,
        index: usize,
        head: Point,
        rng: &mut SessionRng,
    ) -> Result<bool, FoodError> {
        let (food_index, is_red) = if let Some(food_index) = self.food.food_index_at(head) {
            (food_index, false)
        } else if let Some(food_index) = self.food.red_food_index_at(head) {
            (food_index, true)
        } else {
            return Ok(false);
        };

        let occupancy = &self.occupancy;
        let grown = self.snakes[index].grow_within(|cell| occupancy.is_passable(cell));
        self.occupancy.block(grown);
        self.events.push(GameEvent::Fed { snake: index, red: is_red });
        debug_log!(
            "Snake {} ate {} food at ({}, {}), length {}",
            index + 1,
            if is_red { "red" } else { "ordinary" },
            head.x,
            head.y,
            self.snakes[index].len()
        );

        let exclude = self.occupied_points();
        let snake_count = self.snakes.len();
        let red_spawned =
            self.food
                .replenish_food(food_index, snake_count, &exclude, is_red, rng)?;

        if let Some(point) = red_spawned {
            self.events.push(GameEvent::RedFoodSpawned(point));
            debug_log!("Red food spawned at ({}, {})", point.x, point.y);
        }
        if is_red {
            self.start_unified_control();
        }
        Ok(true)
    }

    fn advance_enemy(&mut self, rng: &mut SessionRng) -> Result<(), FoodError> {
        if !self.enemy.as_ref().is_some_and(Enemy::is_alive) {
            return Ok(());
        }
        self.refresh_occupancy();

        let Some(enemy) = self.enemy.as_mut() else {
            return Ok(());
        };
        let path_length = enemy.plan(&self.occupancy, &self.food.food);
        debug_log!(
            "Enemy targets {:?} over {} step(s)",
            enemy.target_food(),
            path_length
        );

        let Some(freed) = enemy.step() else {
            self.events.push(GameEvent::EnemyStopped);
            log!("Enemy found no path to food and stopped");
            return Ok(());
        };

        let head = enemy.head();
        if !self.occupancy.is_passable(head) {
            enemy.kill();
            self.events.push(GameEvent::EnemyStopped);
            log!("Enemy ran into ({}, {}) and stopped", head.x, head.y);
            self.refresh_occupancy();
            return Ok(());
        }
        self.release_if_vacant(freed);
        self.occupancy.block(head);

        let Some(food_index) = self.food.food_index_at(head) else {
            return Ok(());
        };
        if let Some(enemy) = self.enemy.as_mut() {
            let occupancy = &self.occupancy;
            let grown = enemy.grow_within(|cell| occupancy.is_passable(cell));
            self.occupancy.block(grown);
        }
        self.events.push(GameEvent::EnemyFed);
        debug_log!("Enemy ate food at ({}, {})", head.x, head.y);

        let exclude = self.occupied_points();
        self.food.replace_food(food_index, &exclude, rng)
    }

    /// A freed tail cell stays blocked while a wall or any other segment
    /// still sits on it.
    fn release_if_vacant(&mut self, cell: Point) {
        let still_taken =
            self.walls.contains(&cell) || self.bodies().any(|snake| snake.contains(cell));
        if !still_taken {
            self.occupancy.release(cell);
        }
    }

    fn start_unified_control(&mut self) {
        if self.unified_control_ticks == 0 {
            return;
        }
        if !self.unified_control_active() {
            self.events.push(GameEvent::UnifiedControlStarted);
        }
        self.unified_control_remaining = self.unified_control_ticks;
        log!("Unified control on for {} tick(s)", self.unified_control_ticks);
    }

    fn count_down_unified_control(&mut self) {
        if self.unified_control_remaining == 0 {
            return;
        }
        self.unified_control_remaining -= 1;
        if self.unified_control_remaining == 0 {
            self.events.push(GameEvent::UnifiedControlEnded);
            log!("Unified control off");
        }
    }

    fn end_round(&mut self, reason: DeathReason) {
        self.state = RoundState::Over;
        self.death_reason = Some(reason);
        self.events.push(GameEvent::GameOver(reason));
        log!(
            "Round over: {:?}, {} food eaten",
            reason,
            self.food.eat_count()
        );
    }
}
