use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use super::{
    ConfigContentProvider, ConfigSerializer, FileContentConfigProvider, Validate,
    YamlConfigSerializer,
};

/// Loads a config once, validates it and hands out clones.
/// A missing backing file yields `TConfig::default()`.
pub struct ConfigManager<TConfigContentProvider, TConfig, TConfigSerializer = YamlConfigSerializer>
where
    TConfigContentProvider: ConfigContentProvider,
    TConfig: Clone + for<'de> Deserialize<'de> + Serialize + Validate + Default,
    TConfigSerializer: ConfigSerializer<TConfig>,
{
    config_serializer: TConfigSerializer,
    config_content_provider: TConfigContentProvider,
    config: Arc<Mutex<Option<TConfig>>>,
}

impl<TConfig> ConfigManager<FileContentConfigProvider, TConfig, YamlConfigSerializer>
where
    TConfig: Clone + for<'de> Deserialize<'de> + Serialize + Validate + Default,
{
    pub fn from_yaml_file(file_path: impl Into<PathBuf>) -> Self {
        Self::new(FileContentConfigProvider::new(file_path), YamlConfigSerializer)
    }
}

impl<TConfigContentProvider, TConfig, TConfigSerializer>
    ConfigManager<TConfigContentProvider, TConfig, TConfigSerializer>
where
    TConfigContentProvider: ConfigContentProvider,
    TConfig: Clone + for<'de> Deserialize<'de> + Serialize + Validate + Default,
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

    pub fn get_config(&self) -> Result<TConfig, String> {
        let mut current = self
            .config
            .lock()
            .map_err(|_| "Config lock poisoned".to_string())?;

        if let Some(config) = current.as_ref() {
            return Ok(config.clone());
        }

        let config = match self.config_content_provider.get_config_content()? {
            Some(config_data) => self.config_serializer.deserialize(&config_data)?,
            None => TConfig::default(),
        };

        config
            .validate()
            .map_err(|e| format!("Config validation error: {}", e))?;

        *current = Some(config.clone());
        Ok(config)
    }

    pub fn set_config(&self, config: &TConfig) -> Result<(), String> {
        config
            .validate()
            .map_err(|e| format!("Config validation error: {}", e))?;

        let serialized_config = self.config_serializer.serialize(config)?;

        self.config_content_provider
            .set_config_content(&serialized_config)?;

        let mut current = self
            .config
            .lock()
            .map_err(|_| "Config lock poisoned".to_string())?;
        *current = Some(config.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(default)]
    struct GridConfig {
        width: i32,
        height: i32,
    }

    impl Default for GridConfig {
        fn default() -> Self {
            Self { width: 20, height: 20 }
        }
    }

    impl Validate for GridConfig {
        fn validate(&self) -> Result<(), String> {
            if self.width <= 0 || self.height <= 0 {
                return Err("Grid dimensions must be positive".to_string());
            }
            Ok(())
        }
    }

    #[test]
    fn test_missing_file_gives_default() {
        let dir = tempfile::tempdir().unwrap();
        let manager: ConfigManager<_, GridConfig> =
            ConfigManager::from_yaml_file(dir.path().join("missing.yaml"));
        assert_eq!(manager.get_config().unwrap(), GridConfig::default());
    }

    #[test]
    fn test_reads_partial_yaml_with_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("grid.yaml");
        std::fs::write(&path, "width: 32\n").unwrap();

        let manager: ConfigManager<_, GridConfig> = ConfigManager::from_yaml_file(&path);
        let config = manager.get_config().unwrap();
        assert_eq!(config, GridConfig { width: 32, height: 20 });
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("grid.yaml");
        std::fs::write(&path, "width: 0\nheight: 10\n").unwrap();

        let manager: ConfigManager<_, GridConfig> = ConfigManager::from_yaml_file(&path);
        let err = manager.get_config().unwrap_err();
        assert!(err.starts_with("Config validation error"));
    }

    #[test]
    fn test_malformed_yaml_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("grid.yaml");
        std::fs::write(&path, "width: [not, a, number]\n").unwrap();

        let manager: ConfigManager<_, GridConfig> = ConfigManager::from_yaml_file(&path);
        assert!(manager.get_config().unwrap_err().starts_with("Failed to deserialize config"));
    }

    #[test]
    fn test_set_config_persists_and_caches() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("grid.yaml");

        let manager: ConfigManager<_, GridConfig> = ConfigManager::from_yaml_file(&path);
        let config = GridConfig { width: 40, height: 30 };
        manager.set_config(&config).unwrap();
        assert_eq!(manager.get_config().unwrap(), config);

        let reloaded: ConfigManager<_, GridConfig> = ConfigManager::from_yaml_file(&path);
        assert_eq!(reloaded.get_config().unwrap(), config);
    }

    #[test]
    fn test_set_config_validates_first() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("grid.yaml");

        let manager: ConfigManager<_, GridConfig> = ConfigManager::from_yaml_file(&path);
        assert!(manager.set_config(&GridConfig { width: -1, height: 5 }).is_err());
        assert!(!path.exists());
    }
}
