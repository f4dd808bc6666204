use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment, File, FileFormat, Map};
use serde::{Deserialize, Serialize};

use crate::{containers::DEFAULT_CAPACITY, logging::LoggingConfig, SequenceKind};

/// Префикс переменных окружения (`RINGLIST_CONTAINER`, ...).
pub const ENV_PREFIX: &str = "RINGLIST";

/// Настройки оболочки.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Контейнер, с которым стартует оболочка.
    pub container: SequenceKind,
    /// Начальная ёмкость буфера.
    pub default_capacity: usize,
    pub log_level: String,
    /// Файл истории rustyline. `None` - история не сохраняется.
    pub history_file: Option<PathBuf>,
}

impl Settings {
    /// Загружает настройки: значения по умолчанию, затем TOML-файл `path`
    /// (если задан), затем переменные окружения с префиксом `RINGLIST_`.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        Self::load_with_env(path, None)
    }

    /// То же, что [`Settings::load`], но окружение можно подменить.
    pub fn load_with_env(
        path: Option<&Path>,
        env: Option<Map<String, String>>,
    ) -> Result<Self, ConfigError> {
        let mut builder = Config::builder()
            .set_default("container", "buffer")?
            .set_default("default_capacity", DEFAULT_CAPACITY as u64)?
            .set_default("log_level", "warn")?;

        if let Some(path) = path {
            builder = builder.add_source(File::from(path).format(FileFormat::Toml).required(true));
        }

        let cfg = builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .try_parsing(true)
                    .source(env),
            )
            .build()?;

        let settings: Settings = cfg.try_deserialize()?;
        settings.validate()?;

        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.default_capacity == 0 {
            return Err(ConfigError::Message(
                "default_capacity must be greater than 0".to_string(),
            ));
        }

        LoggingConfig::with_level(self.log_level.clone())
            .validate()
            .map_err(|e| ConfigError::Message(e.to_string()))
    }

    /// Настройки логирования, соответствующие этим настройкам.
    pub fn logging(&self) -> LoggingConfig {
        LoggingConfig::with_level(self.log_level.clone())
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            container: SequenceKind::Buffer,
            default_capacity: DEFAULT_CAPACITY,
            log_level: "warn".to_string(),
            history_file: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn no_env() -> Option<Map<String, String>> {
        Some(Map::new())
    }

    fn env_of(pairs: &[(&str, &str)]) -> Option<Map<String, String>> {
        Some(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    #[test]
    fn test_defaults() {
        let settings = Settings::load_with_env(None, no_env()).unwrap();

        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_env_overrides_defaults() {
        let env = env_of(&[
            ("RINGLIST_CONTAINER", "list"),
            ("RINGLIST_DEFAULT_CAPACITY", "4"),
            ("RINGLIST_LOG_LEVEL", "debug"),
        ]);

        let settings = Settings::load_with_env(None, env).unwrap();

        assert_eq!(settings.container, SequenceKind::List);
        assert_eq!(settings.default_capacity, 4);
        assert_eq!(settings.log_level, "debug");
    }

    #[test]
    fn test_zero_capacity_rejected() {
        let env = env_of(&[("RINGLIST_DEFAULT_CAPACITY", "0")]);

        let err = Settings::load_with_env(None, env).unwrap_err();

        assert!(err.to_string().contains("default_capacity"));
    }

    #[test]
    fn test_unknown_log_level_rejected() {
        let settings = Settings {
            log_level: "shout".to_string(),
            ..Settings::default()
        };

        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_toml_file_then_env() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "container = \"list\"\ndefault_capacity = 32\nhistory_file = \"/tmp/ringlist_history\""
        )
        .unwrap();

        let env = env_of(&[("RINGLIST_DEFAULT_CAPACITY", "64")]);
        let settings = Settings::load_with_env(Some(file.path()), env).unwrap();

        assert_eq!(settings.container, SequenceKind::List);
        assert_eq!(settings.default_capacity, 64);
        assert_eq!(
            settings.history_file,
            Some(PathBuf::from("/tmp/ringlist_history"))
        );
    }

    #[test]
    fn test_missing_file_is_error() {
        let path = Path::new("/definitely/not/here/ringlist.toml");

        assert!(Settings::load_with_env(Some(path), no_env()).is_err());
    }
}
