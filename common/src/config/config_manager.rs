use serde::Deserialize;
use std::sync::{Arc, Mutex};

use super::{
    ConfigContentProvider, ConfigSerializer, FileContentConfigProvider, Validate,
    YamlConfigSerializer,
};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("{0}")]
    Read(String),
    #[error("{0}")]
    Parse(String),
    #[error("Config validation error: {0}")]
    Invalid(String),
}

pub struct ConfigManager<TConfigContentProvider, TConfig, TConfigSerializer = YamlConfigSerializer>
where
    TConfigContentProvider: ConfigContentProvider,
    TConfig: Clone + for<'de> Deserialize<'de> + Validate + Default,
    TConfigSerializer: ConfigSerializer<TConfig>,
{
    config_serializer: TConfigSerializer,
    config_content_provider: TConfigContentProvider,
    config: Arc<Mutex<Option<TConfig>>>,
}

impl<TConfig> ConfigManager<FileContentConfigProvider, TConfig, YamlConfigSerializer>
where
    TConfig: Clone + for<'de> Deserialize<'de> + Validate + Default,
{
    pub fn from_yaml_file(file_path: &str) -> Self {
        Self::new(
            FileContentConfigProvider::new(file_path),
            YamlConfigSerializer::new(),
        )
    }
}

impl<TConfigContentProvider, TConfig, TConfigSerializer>
    ConfigManager<TConfigContentProvider, TConfig, TConfigSerializer>
where
    TConfigContentProvider: ConfigContentProvider,
    TConfig: Clone + for<'de> Deserialize<'de> + Validate + Default,
    TConfigSerializer: ConfigSerializer<TConfig>,
{
    pub fn new(
        config_content_provider: TConfigContentProvider,
        config_serializer: TConfigSerializer,
    ) -> Self {
        Self {
            config: Arc::new(Mutex::new(None)),
            config_content_provider,
            config_serializer,
        }
    }

    /// Loads, validates and caches the config. A missing source yields
    /// `TConfig::default()`, which is not cached.
    pub fn get_config(&self) -> Result<TConfig, ConfigError> {
        let mut current = self
            .config
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        if let Some(config) = current.as_ref() {
            return Ok(config.clone());
        }

        let content = self
            .config_content_provider
            .get_config_content()
            .map_err(ConfigError::Read)?;
        let Some(content) = content else {
            return Ok(TConfig::default());
        };

        let config = self
            .config_serializer
            .deserialize(&content)
            .map_err(ConfigError::Parse)?;
        config.validate().map_err(ConfigError::Invalid)?;

        *current = Some(config.clone());
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::snake::SnakeGameSettings;
    use std::cell::Cell;

    struct InMemoryProvider {
        content: Result<Option<String>, String>,
        reads: Cell<u32>,
    }

    impl InMemoryProvider {
        fn new(content: Result<Option<String>, String>) -> Self {
            Self {
                content,
                reads: Cell::new(0),
            }
        }
    }

    impl ConfigContentProvider for &InMemoryProvider {
        fn get_config_content(&self) -> Result<Option<String>, String> {
            self.reads.set(self.reads.get() + 1);
            self.content.clone()
        }
    }

    fn manager(
        provider: &InMemoryProvider,
    ) -> ConfigManager<&InMemoryProvider, SnakeGameSettings> {
        ConfigManager::new(provider, YamlConfigSerializer::new())
    }

    #[test]
    fn test_missing_config_gives_defaults() {
        let provider = InMemoryProvider::new(Ok(None));
        let config = manager(&provider).get_config().unwrap();
        assert_eq!(config, SnakeGameSettings::default());
    }

    #[test]
    fn test_config_is_cached_after_first_read() {
        let provider = InMemoryProvider::new(Ok(Some("snake_count: 4\n".to_string())));
        let manager = manager(&provider);

        assert_eq!(manager.get_config().unwrap().snake_count, 4);
        assert_eq!(manager.get_config().unwrap().snake_count, 4);
        assert_eq!(provider.reads.get(), 1);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let provider = InMemoryProvider::new(Ok(Some("snake_count: 9\n".to_string())));
        let result = manager(&provider).get_config();
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_parse_and_read_errors_are_distinguished() {
        let broken = InMemoryProvider::new(Ok(Some("snake_count: [".to_string())));
        assert!(matches!(manager(&broken).get_config(), Err(ConfigError::Parse(_))));

        let unreadable = InMemoryProvider::new(Err("permission denied".to_string()));
        assert_eq!(
            manager(&unreadable).get_config(),
            Err(ConfigError::Read("permission denied".to_string()))
        );
    }
}
