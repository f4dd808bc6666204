use std::io::{self, Stderr};

use tracing_subscriber::{layer::Layer as LayerTrait, registry::LookupSpan};

use crate::logging::config::LoggingConfig;

/// Консольный layer с настройками из конфигурации.
///
/// Пишет в stderr, чтобы не смешиваться с ответами оболочки в stdout.
pub fn layer_with_config<S>(config: &LoggingConfig) -> Box<dyn LayerTrait<S> + Send + Sync>
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
{
    let writer: fn() -> Stderr = io::stderr;

    let layer = tracing_subscriber::fmt::layer()
        .compact()
        .with_writer(writer)
        .with_ansi(config.ansi)
        .with_target(config.with_target);

    Box::new(layer)
}

#[cfg(test)]
mod tests {
    use tracing::info;
    use tracing_subscriber::{prelude::*, registry::Registry};

    use super::*;

    /// Layer можно зарегистрировать и писать через него без паники.
    #[test]
    fn test_layer_with_config_registers() {
        for ansi in [true, false] {
            let cfg = LoggingConfig {
                ansi,
                with_target: true,
                ..Default::default()
            };

            let subscriber = Registry::default().with(layer_with_config::<Registry>(&cfg));

            tracing::subscriber::with_default(subscriber, || {
                info!(ansi, "console layer smoke test");
            });
        }
    }
}
