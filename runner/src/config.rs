use common::config::{ConfigManager, FileContentConfigProvider, Validate, YamlConfigSerializer};
use common::games::snake::{Point, SnakeGameSettings};
use serde::{Deserialize, Serialize};

pub const DEFAULT_CONFIG_FILE_NAME: &str = "snake_arena.yaml";

pub fn get_config_manager(path: &str) -> ConfigManager<FileContentConfigProvider, Config, YamlConfigSerializer> {
    ConfigManager::from_yaml_file(path)
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct Config {
    pub game: SnakeGameSettings,
    pub tick_interval_ms: u64,
    pub max_ticks: Option<u64>,
    pub autopilot: bool,
    pub walls: Vec<Point>,
}

impl Validate for Config {
    fn validate(&self) -> Result<(), String> {
        self.game.validate()?;
        if self.tick_interval_ms < 10 {
            return Err("tick_interval_ms must be at least 10".to_string());
        }
        if self.tick_interval_ms > 1000 {
            return Err("tick_interval_ms must not exceed 1000".to_string());
        }
        if self.max_ticks == Some(0) {
            return Err("max_ticks must be greater than 0".to_string());
        }
        let (width, height) = (self.game.field_width as i32, self.game.field_height as i32);
        if let Some(wall) = self
            .walls
            .iter()
            .find(|wall| wall.x < 0 || wall.y < 0 || wall.x >= width || wall.y >= height)
        {
            return Err(format!("wall ({}, {}) is outside the field", wall.x, wall.y));
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            game: SnakeGameSettings::default(),
            tick_interval_ms: 100,
            max_ticks: None,
            autopilot: true,
            walls: Vec::new(),
        }
    }
}
