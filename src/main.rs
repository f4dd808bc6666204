//! Оболочка ringlist
//!
//! Интерактивный режим (REPL) и одиночное выполнение команд над кольцевым
//! буфером или односвязным списком целых чисел.

use std::{
    io::IsTerminal,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use owo_colors::OwoColorize;
use ringlist::{
    logging::{self, LoggingConfig},
    ErrorExt, Reply, SequenceKind, Session, Settings, ShellError,
};
use rustyline::{error::ReadlineError, DefaultEditor};
use tracing::debug;

/// Аргументы командной строки.
///
/// Флаги имеют приоритет над файлом настроек и переменными окружения.
#[derive(Parser)]
#[command(name = "ringlist")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "ringlist - shell for a circular buffer and a singly linked list", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Вид контейнера
    #[arg(short, long, value_enum, help = "Container to work with")]
    container: Option<SequenceKind>,
    /// Начальная ёмкость буфера
    #[arg(long, help = "Initial buffer capacity (must be > 0)")]
    capacity: Option<usize>,
    /// Путь к TOML-файлу настроек
    #[arg(long, help = "Path to a TOML settings file")]
    config: Option<PathBuf>,
    /// Файл истории команд
    #[arg(long, help = "File to keep the command history in")]
    history: Option<PathBuf>,
    /// Включить подробный вывод (debug)
    #[arg(short, long, help = "Enable debug logging")]
    verbose: bool,
    /// Подавить логирование
    #[arg(short = 'q', long, conflicts_with = "verbose", help = "Disable logging")]
    quiet: bool,
    /// Подкоманда
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Интерактивный режим (REPL)
    #[command(alias = "i")]
    Interactive,
    /// Выполнить команды по очереди и выйти
    #[command(alias = "e")]
    Exec {
        #[arg(required = true, help = "Commands to run, e.g. 'push_back 1' 'show'")]
        commands: Vec<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let settings = resolve_settings(&cli)?;
    init_logging(&cli, &settings)?;

    debug!(?settings, "settings resolved");

    let mut session = Session::new(settings.container, settings.default_capacity)
        .context("Failed to create container")?;

    let outcome = match &cli.command {
        Some(Commands::Exec { commands }) => exec_mode(&mut session, commands),
        Some(Commands::Interactive) | None => {
            interactive_mode(&mut session, settings.history_file.as_deref())
        }
    };

    if let Err(e) = outcome {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }

    Ok(())
}

/// Настройки из файла и окружения с наложенными флагами CLI.
fn resolve_settings(cli: &Cli) -> Result<Settings> {
    let mut settings = Settings::load(cli.config.as_deref()).context("Failed to load settings")?;

    if let Some(kind) = cli.container {
        settings.container = kind;
    }
    if let Some(capacity) = cli.capacity {
        settings.default_capacity = capacity;
    }
    if let Some(history) = &cli.history {
        settings.history_file = Some(history.clone());
    }

    settings.validate().context("Invalid settings")?;

    Ok(settings)
}

fn init_logging(
    cli: &Cli,
    settings: &Settings,
) -> Result<()> {
    let config = logging_config(cli, settings, |key| std::env::var(key).ok());

    logging::init_logging(config).map_err(|e| anyhow::anyhow!("Failed to initialize logging: {e}"))
}

/// Собирает настройки логирования: настройки, затем окружение, затем флаги.
fn logging_config<F>(
    cli: &Cli,
    settings: &Settings,
    lookup: F,
) -> LoggingConfig
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = settings.logging();
    config.ansi = std::io::stderr().is_terminal();
    config.apply_overrides_from(lookup);

    if cli.quiet {
        config.level = "off".to_string();
    } else if cli.verbose {
        config.level = "debug".to_string();
    }

    config
}

/// Выполняет команды по порядку. Первая ошибка прерывает выполнение.
fn exec_mode(
    session: &mut Session,
    commands: &[String],
) -> Result<()> {
    for line in commands {
        match session.handle_line(line) {
            Ok(Reply::Quit) => break,
            Ok(reply) => println!("{reply}"),
            Err(e) => anyhow::bail!("{line}: {}", describe_error(&e)),
        }
    }

    Ok(())
}

/// Интерактивный режим (REPL).
fn interactive_mode(
    session: &mut Session,
    history: Option<&Path>,
) -> Result<()> {
    print_banner(session);

    let mut editor = DefaultEditor::new().context("Failed to initialize line editor")?;

    if let Some(path) = history {
        if editor.load_history(path).is_err() {
            debug!(path = %path.display(), "no previous history");
        }
    }

    loop {
        let prompt = format!("{}> ", session.kind());

        match editor.readline(&prompt) {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                editor.add_history_entry(line)?;

                match session.handle_line(line) {
                    Ok(Reply::Quit) => break,
                    Ok(reply) => print_reply(&reply),
                    Err(e) => eprintln!("{}", describe_error(&e).red()),
                }
            }
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => break,
            Err(e) => return Err(e).context("Failed to read input"),
        }
    }

    if let Some(path) = history {
        editor
            .save_history(path)
            .with_context(|| format!("Failed to save history to {}", path.display()))?;
    }

    debug!(executed = session.executed(), "session finished");
    Ok(())
}

fn describe_error(e: &ShellError) -> String {
    format!("(error {}) {}", e.status_code().code(), e.client_message())
}

fn print_reply(reply: &Reply) {
    match reply {
        Reply::Ok => println!("{}", "OK".green()),
        Reply::Text(text) => println!("{text}"),
        other => println!("{}", other.cyan()),
    }
}

fn print_banner(session: &Session) {
    println!(
        "{} {} ({}), type 'help' for commands",
        "ringlist".bold(),
        env!("CARGO_PKG_VERSION"),
        session.kind()
    );
}

#[cfg(test)]
mod tests {
    use ringlist::logging::config::{LOG_ANSI_ENV, LOG_LEVEL_ENV};

    use super::*;

    #[test]
    fn test_cli_parsing_defaults() {
        let cli = Cli::parse_from(["ringlist"]);

        assert!(cli.command.is_none());
        assert!(cli.container.is_none());
        assert!(!cli.verbose);
    }

    #[test]
    fn test_cli_parsing_flags_and_exec() {
        let cli = Cli::parse_from([
            "ringlist",
            "--container",
            "list",
            "--capacity",
            "3",
            "exec",
            "push_back 1",
            "show",
        ]);

        assert_eq!(cli.container, Some(SequenceKind::List));
        assert_eq!(cli.capacity, Some(3));
        match cli.command {
            Some(Commands::Exec { commands }) => assert_eq!(commands, ["push_back 1", "show"]),
            _ => panic!("expected exec subcommand"),
        }
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        assert!(Cli::try_parse_from(["ringlist", "-q", "-v"]).is_err());
    }

    #[test]
    fn test_flags_override_log_level_env() {
        let settings = Settings::default();
        let env = |key: &str| (key == LOG_LEVEL_ENV).then(|| "debug".to_string());

        let quiet = Cli::parse_from(["ringlist", "-q"]);
        assert_eq!(logging_config(&quiet, &settings, env).level, "off");

        let plain = Cli::parse_from(["ringlist"]);
        assert_eq!(logging_config(&plain, &settings, env).level, "debug");

        let verbose = Cli::parse_from(["ringlist", "-v"]);
        let trace_env = |key: &str| (key == LOG_LEVEL_ENV).then(|| "trace".to_string());
        assert_eq!(logging_config(&verbose, &settings, trace_env).level, "debug");
    }

    #[test]
    fn test_ansi_env_override() {
        let settings = Settings::default();
        let cli = Cli::parse_from(["ringlist"]);
        let env = |key: &str| (key == LOG_ANSI_ENV).then(|| "false".to_string());

        assert!(!logging_config(&cli, &settings, env).ansi);
    }

    #[test]
    fn test_exec_mode_stops_on_error() {
        let mut session = Session::new(SequenceKind::Buffer, 4).unwrap();
        let commands = vec![
            "push_back 1".to_string(),
            "at 5".to_string(),
            "push_back 2".to_string(),
        ];

        let err = exec_mode(&mut session, &commands).unwrap_err();

        assert!(err.to_string().contains("at 5"));
        assert!(err.to_string().contains("2006"));
        assert_eq!(session.executed(), 1);
    }

    #[test]
    fn test_exec_mode_quit_stops() {
        let mut session = Session::new(SequenceKind::List, 4).unwrap();
        let commands = vec!["push_back 1".to_string(), "quit".to_string(), "bogus".to_string()];

        assert!(exec_mode(&mut session, &commands).is_ok());
    }
}
