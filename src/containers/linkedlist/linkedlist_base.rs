use std::{fmt, marker::PhantomData};

use ringlist_error::{ContainerError, ContainerResult};
use serde::{
    de::{SeqAccess, Visitor},
    ser::SerializeSeq,
    Deserialize, Deserializer, Serialize, Serializer,
};
use tracing::trace;

use crate::{
    containers::{Sequence, SequenceKind, ValidationError},
    validate,
};

type Link<T> = Option<Box<Node<T>>>;

/// Узел списка.
struct Node<T> {
    data: T,
    next: Link<T>,
}

/// Односвязный список.
///
/// Операции в начале списка выполняются за O(1), операции в конце и по
/// индексу за O(n). Каждый узел владеет следующим, поэтому освобождение
/// цепочки выполняется итеративно в [`SinglyLinkedList::clear`].
pub struct SinglyLinkedList<T> {
    head: Link<T>,
    len: usize,
}

////////////////////////////////////////////////////////////////////////////////
// Собственные методы
////////////////////////////////////////////////////////////////////////////////

impl<T> Node<T> {
    fn new(data: T) -> Box<Self> {
        Box::new(Node { data, next: None })
    }
}

impl<T> SinglyLinkedList<T> {
    /// Создаёт пустой список.
    pub fn new() -> Self {
        Self { head: None, len: 0 }
    }

    /// Возвращает кол-во элементов в списке.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Проверяет на пустоту.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    fn ensure_index(
        &self,
        index: usize,
    ) -> ContainerResult<()> {
        if index >= self.len {
            return Err(ContainerError::out_of_range(index, self.len));
        }
        Ok(())
    }

    /// Возвращает ссылку на связь, ведущую к узлу `index`.
    ///
    /// `link_mut(0)` - это голова, `link_mut(len)` - пустая связь за
    /// последним узлом. Обход останавливается на конце цепочки.
    fn link_mut(
        &mut self,
        index: usize,
    ) -> &mut Link<T> {
        let mut link = &mut self.head;

        for _ in 0..index {
            match link {
                Some(node) => link = &mut node.next,
                None => break,
            }
        }

        link
    }

    /// Добавляет элемент в начало списка.
    pub fn push_front(
        &mut self,
        data: T,
    ) {
        let mut node = Node::new(data);
        node.next = self.head.take();
        self.head = Some(node);
        self.len += 1;
    }

    /// Добавляет элемент в конец списка.
    pub fn push_back(
        &mut self,
        data: T,
    ) {
        let len = self.len;
        *self.link_mut(len) = Some(Node::new(data));
        self.len += 1;
    }

    /// Удаляет и возвращает первый элемент.
    pub fn pop_front(&mut self) -> ContainerResult<T> {
        let mut node = self
            .head
            .take()
            .ok_or(ContainerError::empty("pop_front"))?;

        self.head = node.next.take();
        self.len -= 1;

        Ok(node.data)
    }

    /// Удаляет и возвращает последний элемент.
    pub fn pop_back(&mut self) -> ContainerResult<T> {
        if self.len == 0 {
            return Err(ContainerError::empty("pop_back"));
        }

        let last = self.len - 1;
        let node = self
            .link_mut(last)
            .take()
            .ok_or(ContainerError::empty("pop_back"))?;
        self.len -= 1;

        Ok(node.data)
    }

    /// Возвращает ссылку на элемент по индексу.
    pub fn at(
        &self,
        index: usize,
    ) -> ContainerResult<&T> {
        self.ensure_index(index)?;

        self.values()
            .nth(index)
            .ok_or(ContainerError::out_of_range(index, self.len))
    }

    /// Возвращает изменяемую ссылку на элемент по индексу.
    pub fn at_mut(
        &mut self,
        index: usize,
    ) -> ContainerResult<&mut T> {
        self.ensure_index(index)?;

        let len = self.len;
        self.link_mut(index)
            .as_deref_mut()
            .map(|node| &mut node.data)
            .ok_or(ContainerError::out_of_range(index, len))
    }

    /// Освобождает все узлы.
    pub fn clear(&mut self) {
        let mut current = self.head.take();
        let released = self.len;

        while let Some(mut node) = current {
            current = node.next.take();
        }

        self.len = 0;

        if released > 0 {
            trace!(released, "linked list cleared");
        }
    }

    /// Линейный поиск. Возвращает индекс первого совпадения.
    pub fn find(
        &self,
        data: &T,
    ) -> Option<usize>
    where
        T: PartialEq,
    {
        self.values().position(|item| item == data)
    }

    /// Удаляет узел `index` и связывает предшественника с последователем.
    ///
    /// Границы проверяются до обхода для любого индекса, включая 0.
    pub fn remove_at(
        &mut self,
        index: usize,
    ) -> ContainerResult<T> {
        self.ensure_index(index)?;

        let len = self.len;
        let link = self.link_mut(index);
        let mut node = link
            .take()
            .ok_or(ContainerError::out_of_range(index, len))?;
        *link = node.next.take();
        self.len -= 1;

        Ok(node.data)
    }

    /// Вставляет новый узел сразу после узла `index`.
    pub fn insert_after(
        &mut self,
        index: usize,
        data: T,
    ) -> ContainerResult<()> {
        self.ensure_index(index)?;

        let link = self.link_mut(index + 1);
        let mut node = Node::new(data);
        node.next = link.take();
        *link = Some(node);
        self.len += 1;

        Ok(())
    }

    /// Удаляет узлы на чётных позициях за один проход.
    ///
    /// Счётчик позиции увеличивается и для удалённых узлов, поэтому решение
    /// принимается по исходной нумерации.
    pub fn remove_evens(&mut self) {
        let mut link = &mut self.head;
        let mut position = 0usize;
        let mut removed = 0usize;

        while let Some(mut node) = link.take() {
            if position % 2 == 0 {
                *link = node.next.take();
                removed += 1;
            } else {
                link = &mut link.insert(node).next;
            }
            position += 1;
        }

        self.len -= removed;
    }

    pub fn validate_invariants(&self) -> Result<(), ValidationError> {
        let reachable = self.values().count();

        validate!(
            reachable == self.len,
            ValidationError::LengthMismatch {
                expected: self.len,
                actual: reachable
            }
        );

        Ok(())
    }

    /// Элементы от головы к хвосту.
    fn values(&self) -> impl Iterator<Item = &T> + '_ {
        std::iter::successors(self.head.as_deref(), |node| node.next.as_deref())
            .map(|node| &node.data)
    }
}

////////////////////////////////////////////////////////////////////////////////
// Общие реализации трейтов для SinglyLinkedList
////////////////////////////////////////////////////////////////////////////////

impl<T> Default for SinglyLinkedList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for SinglyLinkedList<T> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<T> FromIterator<T> for SinglyLinkedList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = SinglyLinkedList::new();
        let mut len = 0;
        let mut tail = &mut list.head;

        for data in iter {
            tail = &mut tail.insert(Node::new(data)).next;
            len += 1;
        }

        list.len = len;
        list
    }
}

impl<T: Clone> Clone for SinglyLinkedList<T> {
    /// Глубокая копия каждого узла с сохранением порядка.
    fn clone(&self) -> Self {
        self.values().cloned().collect()
    }
}

impl<T: PartialEq> PartialEq for SinglyLinkedList<T> {
    fn eq(
        &self,
        other: &Self,
    ) -> bool {
        self.len == other.len && self.values().eq(other.values())
    }
}

impl<T: Eq> Eq for SinglyLinkedList<T> {}

impl<T: fmt::Debug> fmt::Debug for SinglyLinkedList<T> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.debug_list().entries(self.values()).finish()
    }
}

impl<T: fmt::Display> fmt::Display for SinglyLinkedList<T> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "[")?;
        for (index, value) in self.values().enumerate() {
            if index > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{value}")?;
        }
        write!(f, "]")
    }
}

impl<T> Sequence<T> for SinglyLinkedList<T>
where
    T: PartialEq + fmt::Display,
{
    fn kind(&self) -> SequenceKind {
        SequenceKind::List
    }

    fn len(&self) -> usize {
        SinglyLinkedList::len(self)
    }

    fn push_front(
        &mut self,
        value: T,
    ) {
        SinglyLinkedList::push_front(self, value)
    }

    fn push_back(
        &mut self,
        value: T,
    ) {
        SinglyLinkedList::push_back(self, value)
    }

    fn pop_front(&mut self) -> ContainerResult<T> {
        SinglyLinkedList::pop_front(self)
    }

    fn pop_back(&mut self) -> ContainerResult<T> {
        SinglyLinkedList::pop_back(self)
    }

    fn at(
        &self,
        index: usize,
    ) -> ContainerResult<&T> {
        SinglyLinkedList::at(self, index)
    }

    fn at_mut(
        &mut self,
        index: usize,
    ) -> ContainerResult<&mut T> {
        SinglyLinkedList::at_mut(self, index)
    }

    fn clear(&mut self) {
        SinglyLinkedList::clear(self)
    }

    fn find(
        &self,
        value: &T,
    ) -> Option<usize> {
        SinglyLinkedList::find(self, value)
    }

    fn remove_at(
        &mut self,
        index: usize,
    ) -> ContainerResult<T> {
        SinglyLinkedList::remove_at(self, index)
    }

    fn insert_after(
        &mut self,
        index: usize,
        value: T,
    ) -> ContainerResult<()> {
        SinglyLinkedList::insert_after(self, index, value)
    }

    fn remove_evens(&mut self) {
        SinglyLinkedList::remove_evens(self)
    }

    fn render(&self) -> String {
        self.to_string()
    }

    fn check(&self) -> Result<(), ValidationError> {
        self.validate_invariants()
    }
}

impl<T: Serialize> Serialize for SinglyLinkedList<T> {
    fn serialize<S>(
        &self,
        serializer: S,
    ) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(self.len))?;
        for value in self.values() {
            seq.serialize_element(value)?;
        }
        seq.end()
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for SinglyLinkedList<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct ListVisitor<T>(PhantomData<T>);

        impl<'de, T: Deserialize<'de>> Visitor<'de> for ListVisitor<T> {
            type Value = SinglyLinkedList<T>;

            fn expecting(
                &self,
                f: &mut fmt::Formatter,
            ) -> fmt::Result {
                write!(f, "a sequence of list elements")
            }

            fn visit_seq<A>(
                self,
                mut seq: A,
            ) -> Result<Self::Value, A::Error>
            where
                A: SeqAccess<'de>,
            {
                let mut values = Vec::with_capacity(seq.size_hint().unwrap_or(0));
                while let Some(value) = seq.next_element()? {
                    values.push(value);
                }
                Ok(values.into_iter().collect())
            }
        }

        deserializer.deserialize_seq(ListVisitor(PhantomData))
    }
}

////////////////////////////////////////////////////////////////////////////////
// Тесты
////////////////////////////////////////////////////////////////////////////////
