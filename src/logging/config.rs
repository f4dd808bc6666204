use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Переменная окружения, переопределяющая уровень логирования.
pub const LOG_LEVEL_ENV: &str = "RINGLIST_LOG_LEVEL";
/// Переменная окружения, включающая/выключающая ANSI-цвета в логах.
pub const LOG_ANSI_ENV: &str = "RINGLIST_LOG_ANSI";

const LEVELS: [&str; 6] = ["trace", "debug", "info", "warn", "error", "off"];

/// Настройки логирования.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Уровень: trace, debug, info, warn, error или off.
    pub level: String,
    /// Цветной вывод.
    pub ansi: bool,
    /// Печатать target события (модуль-источник).
    pub with_target: bool,
}

/// Ошибка проверки настроек логирования.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoggingConfigError {
    #[error("unknown log level '{0}', expected one of: trace, debug, info, warn, error, off")]
    UnknownLevel(String),
}

////////////////////////////////////////////////////////////////////////////////
// Собственные методы
////////////////////////////////////////////////////////////////////////////////

impl LoggingConfig {
    /// Конфигурация с заданным уровнем и остальными полями по умолчанию.
    pub fn with_level(level: impl Into<String>) -> Self {
        Self {
            level: level.into(),
            ..Self::default()
        }
    }

    /// Применяет переменные окружения ([`LOG_LEVEL_ENV`], [`LOG_ANSI_ENV`])
    /// поверх текущих значений. Значения берутся через `lookup`.
    pub fn apply_overrides_from<F>(
        &mut self,
        lookup: F,
    ) where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(level) = lookup(LOG_LEVEL_ENV) {
            if !level.trim().is_empty() {
                self.level = level.trim().to_lowercase();
            }
        }

        if let Some(ansi) = lookup(LOG_ANSI_ENV) {
            match ansi.trim().to_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => self.ansi = true,
                "0" | "false" | "no" | "off" => self.ansi = false,
                _ => {}
            }
        }
    }

    pub fn validate(&self) -> Result<(), LoggingConfigError> {
        let level = self.level.to_lowercase();

        if LEVELS.contains(&level.as_str()) {
            Ok(())
        } else {
            Err(LoggingConfigError::UnknownLevel(self.level.clone()))
        }
    }

    /// Директива для `EnvFilter`: уровень применяется к обоим крейтам
    /// проекта, чужие крейты ограничены уровнем warn.
    pub fn build_filter_directive(&self) -> String {
        let level = self.level.to_lowercase();
        format!("warn,ringlist={level},ringlist_error={level}")
    }
}

////////////////////////////////////////////////////////////////////////////////
// Общие реализации трейтов
////////////////////////////////////////////////////////////////////////////////

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            ansi: true,
            with_target: false,
        }
    }
}

////////////////////////////////////////////////////////////////////////////////
// Тесты
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let cfg = LoggingConfig::default();

        assert_eq!(cfg.level, "warn");
        assert!(cfg.ansi);
        assert!(!cfg.with_target);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_validate_accepts_any_case() {
        assert!(LoggingConfig::with_level("DEBUG").validate().is_ok());
        assert!(LoggingConfig::with_level("off").validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_unknown_level() {
        let err = LoggingConfig::with_level("loud").validate().unwrap_err();

        assert_eq!(err, LoggingConfigError::UnknownLevel("loud".to_string()));
        assert_eq!(
            err.to_string(),
            "unknown log level 'loud', expected one of: trace, debug, info, warn, error, off"
        );
    }

    #[test]
    fn test_filter_directive() {
        let cfg = LoggingConfig::with_level("Trace");

        assert_eq!(
            cfg.build_filter_directive(),
            "warn,ringlist=trace,ringlist_error=trace"
        );
    }

    #[test]
    fn test_overrides() {
        let mut cfg = LoggingConfig::default();
        cfg.apply_overrides_from(|key| match key {
            LOG_LEVEL_ENV => Some(" INFO ".to_string()),
            LOG_ANSI_ENV => Some("off".to_string()),
            _ => None,
        });

        assert_eq!(cfg.level, "info");
        assert!(!cfg.ansi);
    }

    #[test]
    fn test_overrides_ignore_garbage() {
        let mut cfg = LoggingConfig::default();
        cfg.apply_overrides_from(|key| match key {
            LOG_LEVEL_ENV => Some("   ".to_string()),
            LOG_ANSI_ENV => Some("maybe".to_string()),
            _ => None,
        });

        assert_eq!(cfg, LoggingConfig::default());
    }

    #[test]
    fn test_deserialize_partial() {
        let cfg: LoggingConfig = serde_json::from_str(r#"{"level":"debug"}"#).unwrap();

        assert_eq!(cfg.level, "debug");
        assert!(cfg.ansi);
    }
}
