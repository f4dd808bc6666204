//! Общий контракт последовательностей.
//!
//! `CircularBuffer` и `SinglyLinkedList` реализуют одинаковый набор операций
//! с одинаковой семантикой и ошибками. Трейт [`Sequence`] позволяет работать с
//! ними через `dyn Sequence<T>` (см. модуль `shell`) и писать обобщённые
//! тесты.

use std::fmt;

use ringlist_error::ContainerResult;
use serde::{Deserialize, Serialize};

use super::ValidationError;

/// Значение, которое `find_index` возвращает при отсутствии элемента.
///
/// Не совпадает ни с одним допустимым индексом.
pub const NOT_FOUND: usize = usize::MAX;

/// Вид контейнера.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SequenceKind {
    /// Кольцевой буфер на массиве.
    Buffer,
    /// Односвязный список.
    List,
}

pub trait Sequence<T> {
    /// Вид контейнера.
    fn kind(&self) -> SequenceKind;

    /// Кол-во элементов.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Ёмкость хранилища, если у контейнера она есть.
    fn capacity(&self) -> Option<usize> {
        None
    }

    fn push_front(
        &mut self,
        value: T,
    );

    fn push_back(
        &mut self,
        value: T,
    );

    /// Удаляет и возвращает первый элемент.
    ///
    /// `EmptyContainer`, если контейнер пуст.
    fn pop_front(&mut self) -> ContainerResult<T>;

    /// Удаляет и возвращает последний элемент.
    ///
    /// `EmptyContainer`, если контейнер пуст.
    fn pop_back(&mut self) -> ContainerResult<T>;

    /// Ссылка на элемент с логическим индексом `index`.
    fn at(
        &self,
        index: usize,
    ) -> ContainerResult<&T>;

    /// Изменяемая ссылка на элемент с логическим индексом `index`.
    fn at_mut(
        &mut self,
        index: usize,
    ) -> ContainerResult<&mut T>;

    fn clear(&mut self);

    /// Индекс первого элемента, равного `value`.
    fn find(
        &self,
        value: &T,
    ) -> Option<usize>;

    /// То же, что [`Sequence::find`], но отсутствие кодируется [`NOT_FOUND`].
    fn find_index(
        &self,
        value: &T,
    ) -> usize {
        self.find(value).unwrap_or(NOT_FOUND)
    }

    /// Удаляет элемент `index`, сдвигая последующие влево.
    fn remove_at(
        &mut self,
        index: usize,
    ) -> ContainerResult<T>;

    /// Вставляет `value` сразу после элемента `index`.
    fn insert_after(
        &mut self,
        index: usize,
        value: T,
    ) -> ContainerResult<()>;

    /// Удаляет элементы на чётных позициях (0, 2, 4, ...).
    fn remove_evens(&mut self);

    /// Строковое представление вида `[e0, e1, ...]`.
    fn render(&self) -> String;

    /// Проверка структурных инвариантов.
    fn check(&self) -> Result<(), ValidationError>;

    /// Текстовый отчёт о состоянии контейнера для команды `check`.
    fn report(&self) -> String {
        format!("{} Statistics:\n  Elements: {}\n", self.kind().type_name(), self.len())
    }
}

impl SequenceKind {
    /// Имя типа контейнера.
    pub fn type_name(&self) -> &'static str {
        match self {
            SequenceKind::Buffer => "CircularBuffer",
            SequenceKind::List => "SinglyLinkedList",
        }
    }
}

impl fmt::Display for SequenceKind {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            SequenceKind::Buffer => write!(f, "buffer"),
            SequenceKind::List => write!(f, "list"),
        }
    }
}
