pub mod config;
mod filters;
pub mod sinks;

pub use config::{LoggingConfig, LoggingConfigError};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Инициализация логирования с конфигурацией.
///
/// `config` используется как есть: переменные окружения и флаги командной
/// строки должны быть уже применены. Возвращает ошибку при неизвестном
/// уровне или если глобальный subscriber уже установлен.
pub fn init_logging(config: LoggingConfig) -> Result<(), Box<dyn std::error::Error>> {
    config.validate()?;

    let env_filter = filters::build_filter_from_config(&config);
    let console_layer = sinks::console::layer_with_config(&config);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .try_init()?;

    tracing::debug!(
        version = env!("CARGO_PKG_VERSION"),
        log_level = %config.level,
        ansi = config.ansi,
        "Logging system initialized"
    );

    Ok(())
}
