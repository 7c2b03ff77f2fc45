use serde::Deserialize;

pub trait ConfigSerializer<TConfig> {
    fn deserialize(&self, content: &str) -> Result<TConfig, String>;
}

#[derive(Default)]
pub struct YamlConfigSerializer;

impl YamlConfigSerializer {
    pub fn new() -> Self {
        Self {}
    }
}

impl<TConfig> ConfigSerializer<TConfig> for YamlConfigSerializer
where
    TConfig: for<'de> Deserialize<'de>,
{
    fn deserialize(&self, content: &str) -> Result<TConfig, String> {
        serde_yaml_ng::from_str(content).map_err(|e| format!("Failed to deserialize config: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::snake::{SnakeGameSettings, SnakeType};

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let settings: SnakeGameSettings = YamlConfigSerializer::new()
            .deserialize("snake_count: 3\nsnake_type: Python\nenemy_enabled: true\n")
            .unwrap();

        assert_eq!(settings.snake_count, 3);
        assert_eq!(settings.snake_type, SnakeType::Python);
        assert!(settings.enemy_enabled);
        assert_eq!(settings.field_width, 50);
        assert_eq!(settings.food_multiplier, 1);
    }

    #[test]
    fn test_malformed_yaml_is_error() {
        let result: Result<SnakeGameSettings, String> =
            YamlConfigSerializer::new().deserialize("snake_count: [not a number");
        assert!(result.unwrap_err().starts_with("Failed to deserialize config"));
    }
}
