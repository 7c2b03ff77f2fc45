use serde::{Deserialize, Serialize};

use crate::config::Validate;
use super::types::{BOARD_HEIGHT, BOARD_WIDTH, MAX_SNAKE_COUNT, SnakeType};

/// Round setup chosen in the menu and applied once before a round starts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnakeGameSettings {
    pub field_width: u32,
    pub field_height: u32,
    pub snake_count: u32,
    pub snake_type: SnakeType,
    pub enemy_enabled: bool,
    pub red_food_enabled: bool,
    pub food_multiplier: u32,
    pub unified_control_ticks: u32,
}

impl Default for SnakeGameSettings {
    fn default() -> Self {
        Self {
            field_width: BOARD_WIDTH as u32,
            field_height: BOARD_HEIGHT as u32,
            snake_count: 2,
            snake_type: SnakeType::Viper,
            enemy_enabled: false,
            red_food_enabled: false,
            food_multiplier: 1,
            unified_control_ticks: 40,
        }
    }
}

impl Validate for SnakeGameSettings {
    fn validate(&self) -> Result<(), String> {
        if self.field_width < 25 || self.field_width > 100 {
            return Err("field_width must be between 25 and 100".to_string());
        }
        if self.field_height < 15 || self.field_height > 100 {
            return Err("field_height must be between 15 and 100".to_string());
        }
        if self.snake_count < 1 || self.snake_count as usize > MAX_SNAKE_COUNT {
            return Err(format!("snake_count must be between 1 and {}", MAX_SNAKE_COUNT));
        }
        if self.food_multiplier < 1 || self.food_multiplier > 5 {
            return Err("food_multiplier must be between 1 and 5".to_string());
        }
        if self.unified_control_ticks > 1000 {
            return Err("unified_control_ticks must not exceed 1000".to_string());
        }
        Ok(())
    }
}
