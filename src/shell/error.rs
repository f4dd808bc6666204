use std::any::Any;

use ringlist_error::{ContainerError, ErrorExt, StatusCode};
use thiserror::Error;

use crate::containers::ValidationError;

/// Ошибки разбора и выполнения команд оболочки.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShellError {
    #[error("empty command")]
    EmptyInput,
    #[error("unknown command '{0}', type 'help' for the list")]
    UnknownCommand(String),
    #[error("wrong number of arguments for '{command}', usage: {usage}")]
    WrongArity {
        command: &'static str,
        usage: &'static str,
    },
    #[error("'{value}' is not a valid {expected}")]
    InvalidNumber {
        value: String,
        expected: &'static str,
    },
    #[error(transparent)]
    Container(#[from] ContainerError),
    #[error("invariant violated: {0}")]
    Corrupted(#[from] ValidationError),
}

impl ErrorExt for ShellError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::EmptyInput => StatusCode::ParseError,
            Self::UnknownCommand(_) => StatusCode::InvalidCommand,
            Self::WrongArity { .. } => StatusCode::InvalidArgs,
            Self::InvalidNumber { .. } => StatusCode::InvalidInteger,
            Self::Container(e) => e.status_code(),
            Self::Corrupted(_) => StatusCode::Internal,
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn client_message(&self) -> String {
        match self {
            Self::Container(e) => e.client_message(),
            Self::Corrupted(_) => "Internal error".to_string(),
            other => other.to_string(),
        }
    }
}
