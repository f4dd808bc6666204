//! Команды оболочки и их ответы.
//!
//! Строка ввода разбирается в [`Command`] через `FromStr`, результат
//! выполнения описывается [`Reply`], который печатается через `Display`.

use std::{fmt, str::FromStr};

use super::ShellError;

/// Справка по командам.
pub const HELP: &str = "\
push_front <v>        add v to the front
push_back <v>         add v to the back
pop_front             remove and print the first element
pop_back              remove and print the last element
at <i>                print the element at index i
set <i> <v>           overwrite the element at index i
find <v>              index of the first v, or -1
remove_at <i>         remove the element at index i
insert_after <i> <v>  insert v right after index i
remove_evens          drop elements at positions 0, 2, 4, ...
clear                 remove everything
size                  number of elements
empty                 whether the container is empty
show                  print all elements
capacity              storage capacity (buffer only)
check                 verify structural invariants
help                  this text
quit                  leave the shell";

/// Разобранная команда.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    PushFront(i64),
    PushBack(i64),
    PopFront,
    PopBack,
    At(usize),
    Set(usize, i64),
    Find(i64),
    RemoveAt(usize),
    InsertAfter(usize, i64),
    RemoveEvens,
    Clear,
    Size,
    Empty,
    Show,
    Capacity,
    Check,
    Help,
    Quit,
}

/// Результат выполнения команды.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    Ok,
    Value(i64),
    /// Ответ `find`: индекс или отсутствие.
    Position(Option<usize>),
    Size(usize),
    Bool(bool),
    /// Содержимое контейнера в виде `[a, b, ...]`.
    Contents(String),
    /// Ёмкость, если у контейнера она есть.
    Capacity(Option<usize>),
    /// Многострочный текст (отчёт `check`, справка).
    Text(String),
    Quit,
}

////////////////////////////////////////////////////////////////////////////////
// Собственные методы
////////////////////////////////////////////////////////////////////////////////

impl Command {
    /// Имя команды, как его вводит пользователь.
    pub fn name(&self) -> &'static str {
        match self {
            Command::PushFront(_) => "push_front",
            Command::PushBack(_) => "push_back",
            Command::PopFront => "pop_front",
            Command::PopBack => "pop_back",
            Command::At(_) => "at",
            Command::Set(..) => "set",
            Command::Find(_) => "find",
            Command::RemoveAt(_) => "remove_at",
            Command::InsertAfter(..) => "insert_after",
            Command::RemoveEvens => "remove_evens",
            Command::Clear => "clear",
            Command::Size => "size",
            Command::Empty => "empty",
            Command::Show => "show",
            Command::Capacity => "capacity",
            Command::Check => "check",
            Command::Help => "help",
            Command::Quit => "quit",
        }
    }

    /// Изменяет ли команда содержимое контейнера.
    pub fn is_mutating(&self) -> bool {
        matches!(
            self,
            Command::PushFront(_)
                | Command::PushBack(_)
                | Command::PopFront
                | Command::PopBack
                | Command::Set(..)
                | Command::RemoveAt(_)
                | Command::InsertAfter(..)
                | Command::RemoveEvens
                | Command::Clear
        )
    }
}

fn parse_value(arg: &str) -> Result<i64, ShellError> {
    arg.parse().map_err(|_| ShellError::InvalidNumber {
        value: arg.to_string(),
        expected: "integer",
    })
}

fn parse_index(arg: &str) -> Result<usize, ShellError> {
    arg.parse().map_err(|_| ShellError::InvalidNumber {
        value: arg.to_string(),
        expected: "index",
    })
}

////////////////////////////////////////////////////////////////////////////////
// Общие реализации трейтов
////////////////////////////////////////////////////////////////////////////////

impl FromStr for Command {
    type Err = ShellError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut parts = line.split_whitespace();
        let name = parts.next().ok_or(ShellError::EmptyInput)?.to_lowercase();
        let args: Vec<&str> = parts.collect();

        let arity = |command: &'static str, usage: &'static str, expected: usize| {
            if args.len() == expected {
                Ok(())
            } else {
                Err(ShellError::WrongArity { command, usage })
            }
        };

        let command = match name.as_str() {
            "push_front" => {
                arity("push_front", "push_front <v>", 1)?;
                Command::PushFront(parse_value(args[0])?)
            }
            "push_back" => {
                arity("push_back", "push_back <v>", 1)?;
                Command::PushBack(parse_value(args[0])?)
            }
            "pop_front" => {
                arity("pop_front", "pop_front", 0)?;
                Command::PopFront
            }
            "pop_back" => {
                arity("pop_back", "pop_back", 0)?;
                Command::PopBack
            }
            "at" => {
                arity("at", "at <i>", 1)?;
                Command::At(parse_index(args[0])?)
            }
            "set" => {
                arity("set", "set <i> <v>", 2)?;
                Command::Set(parse_index(args[0])?, parse_value(args[1])?)
            }
            "find" => {
                arity("find", "find <v>", 1)?;
                Command::Find(parse_value(args[0])?)
            }
            "remove_at" => {
                arity("remove_at", "remove_at <i>", 1)?;
                Command::RemoveAt(parse_index(args[0])?)
            }
            "insert_after" => {
                arity("insert_after", "insert_after <i> <v>", 2)?;
                Command::InsertAfter(parse_index(args[0])?, parse_value(args[1])?)
            }
            "remove_evens" => {
                arity("remove_evens", "remove_evens", 0)?;
                Command::RemoveEvens
            }
            "clear" => {
                arity("clear", "clear", 0)?;
                Command::Clear
            }
            "size" => {
                arity("size", "size", 0)?;
                Command::Size
            }
            "empty" => {
                arity("empty", "empty", 0)?;
                Command::Empty
            }
            "show" => {
                arity("show", "show", 0)?;
                Command::Show
            }
            "capacity" => {
                arity("capacity", "capacity", 0)?;
                Command::Capacity
            }
            "check" => {
                arity("check", "check", 0)?;
                Command::Check
            }
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            other => return Err(ShellError::UnknownCommand(other.to_string())),
        };

        Ok(command)
    }
}

impl fmt::Display for Reply {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            Reply::Ok => write!(f, "OK"),
            Reply::Value(v) => write!(f, "{v}"),
            Reply::Position(Some(index)) => write!(f, "{index}"),
            Reply::Position(None) => write!(f, "-1"),
            Reply::Size(n) => write!(f, "{n}"),
            Reply::Bool(b) => write!(f, "{b}"),
            Reply::Contents(s) | Reply::Text(s) => write!(f, "{s}"),
            Reply::Capacity(Some(c)) => write!(f, "{c}"),
            Reply::Capacity(None) => write!(f, "(n/a)"),
            Reply::Quit => write!(f, "bye"),
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
    fn test_parse_all_commands() {
        let cases = [
            ("push_front 5", Command::PushFront(5)),
            ("push_back -3", Command::PushBack(-3)),
            ("pop_front", Command::PopFront),
            ("pop_back", Command::PopBack),
            ("at 2", Command::At(2)),
            ("set 1 42", Command::Set(1, 42)),
            ("find 7", Command::Find(7)),
            ("remove_at 0", Command::RemoveAt(0)),
            ("insert_after 3 9", Command::InsertAfter(3, 9)),
            ("remove_evens", Command::RemoveEvens),
            ("clear", Command::Clear),
            ("size", Command::Size),
            ("empty", Command::Empty),
            ("show", Command::Show),
            ("capacity", Command::Capacity),
            ("check", Command::Check),
            ("help", Command::Help),
            ("quit", Command::Quit),
        ];

        for (line, expected) in cases {
            assert_eq!(line.parse::<Command>(), Ok(expected), "line: {line}");
        }
    }

    #[test]
    fn test_parse_is_case_insensitive_and_trims() {
        assert_eq!("  PUSH_BACK   10 ".parse::<Command>(), Ok(Command::PushBack(10)));
        assert_eq!("Exit".parse::<Command>(), Ok(Command::Quit));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!("".parse::<Command>(), Err(ShellError::EmptyInput));
        assert_eq!(
            "jump 3".parse::<Command>(),
            Err(ShellError::UnknownCommand("jump".into()))
        );
        assert_eq!(
            "set 1".parse::<Command>(),
            Err(ShellError::WrongArity {
                command: "set",
                usage: "set <i> <v>"
            })
        );
        assert_eq!(
            "at -1".parse::<Command>(),
            Err(ShellError::InvalidNumber {
                value: "-1".into(),
                expected: "index"
            })
        );
        assert_eq!(
            "push_back ten".parse::<Command>(),
            Err(ShellError::InvalidNumber {
                value: "ten".into(),
                expected: "integer"
            })
        );
    }

    #[test]
    fn test_name_roundtrips_through_parser() {
        let commands = [Command::PopBack, Command::RemoveEvens, Command::Capacity];

        for command in commands {
            assert_eq!(command.name().parse::<Command>(), Ok(command));
        }
    }

    #[test]
    fn test_reply_display() {
        assert_eq!(Reply::Ok.to_string(), "OK");
        assert_eq!(Reply::Position(None).to_string(), "-1");
        assert_eq!(Reply::Position(Some(4)).to_string(), "4");
        assert_eq!(Reply::Capacity(None).to_string(), "(n/a)");
        assert_eq!(Reply::Contents("[1, 2]".into()).to_string(), "[1, 2]");
    }

    #[test]
    fn test_is_mutating() {
        assert!(Command::Clear.is_mutating());
        assert!(Command::Set(0, 1).is_mutating());
        assert!(!Command::Show.is_mutating());
        assert!(!Command::Find(1).is_mutating());
    }
}
