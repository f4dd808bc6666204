use std::any::Any;

use thiserror::Error;

use crate::{ErrorExt, StatusCode};

/// Ошибки операций над контейнерами (`CircularBuffer`, `SinglyLinkedList`).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContainerError {
    /// Извлечение элемента из пустого контейнера.
    #[error("{operation} on an empty container")]
    EmptyContainer { operation: &'static str },
    /// Индекс не указывает на существующий элемент.
    #[error("index {index} out of range for size {size}")]
    IndexOutOfRange { index: usize, size: usize },
    /// Запрошена нулевая ёмкость буфера.
    #[error("capacity must be greater than 0, got {requested}")]
    InvalidCapacity { requested: usize },
}

impl ContainerError {
    pub fn empty(operation: &'static str) -> Self {
        Self::EmptyContainer { operation }
    }

    pub fn out_of_range(
        index: usize,
        size: usize,
    ) -> Self {
        Self::IndexOutOfRange { index, size }
    }
}

impl ErrorExt for ContainerError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::EmptyContainer { .. } => StatusCode::EmptyContainer,
            Self::IndexOutOfRange { .. } => StatusCode::IndexOutOfBounds,
            Self::InvalidCapacity { .. } => StatusCode::InvalidCapacity,
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn client_message(&self) -> String {
        match self {
            Self::EmptyContainer { .. } => "Container is empty".to_string(),
            Self::IndexOutOfRange { .. } => "Index is out of range".to_string(),
            Self::InvalidCapacity { .. } => "Capacity must be > 0".to_string(),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////
// Тесты
////////////////////////////////////////////////////////////////////////////////
