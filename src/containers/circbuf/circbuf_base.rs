use std::{fmt, marker::PhantomData};

use ringlist_error::{ContainerError, ContainerResult};
use serde::{
    de::{SeqAccess, Visitor},
    ser::SerializeSeq,
    Deserialize, Deserializer, Serialize, Serializer,
};
use tracing::{debug, trace};

use crate::{
    containers::{BufferStatistics, Sequence, SequenceKind, ValidationError},
    validate,
};

/// Ёмкость буфера, создаваемого через [`CircularBuffer::new`].
pub const DEFAULT_CAPACITY: usize = 10;

/// Кольцевой буфер с автоматическим расширением.
///
/// Логический элемент `i` хранится в слоте `(front + i) % capacity`. Слоты вне
/// логического диапазона всегда пусты (`None`), поэтому `T` не обязан
/// реализовывать `Default`.
///
/// Когда вставка превышает ёмкость, хранилище удваивается, а элементы
/// переносятся в логическом порядке начиная со слота 0.
#[derive(Debug)]
pub struct CircularBuffer<T> {
    storage: Box<[Option<T>]>,
    len: usize,
    front: usize,
}

////////////////////////////////////////////////////////////////////////////////
// Собственные методы
////////////////////////////////////////////////////////////////////////////////

impl<T> CircularBuffer<T> {
    /// Создаёт пустой буфер ёмкостью [`DEFAULT_CAPACITY`].
    pub fn new() -> Self {
        Self {
            storage: Self::allocate(DEFAULT_CAPACITY),
            len: 0,
            front: 0,
        }
    }

    /// Создаёт пустой буфер заданной ёмкости.
    ///
    /// Нулевая ёмкость недопустима и возвращает
    /// [`ContainerError::InvalidCapacity`].
    pub fn with_capacity(capacity: usize) -> ContainerResult<Self> {
        if capacity == 0 {
            debug!(capacity, "rejected circular buffer capacity");
            return Err(ContainerError::InvalidCapacity {
                requested: capacity,
            });
        }

        Ok(Self {
            storage: Self::allocate(capacity),
            len: 0,
            front: 0,
        })
    }

    fn allocate(capacity: usize) -> Box<[Option<T>]> {
        std::iter::repeat_with(|| None).take(capacity).collect()
    }

    /// Возвращает кол-во элементов.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Кол-во выделенных слотов.
    ///
    /// Диагностический метод для white-box тестов.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.storage.len()
    }

    /// Адрес текущего хранилища.
    ///
    /// Диагностический метод: позволяет тестам убедиться, что копия не
    /// разделяет память с оригиналом и что `remove_evens` не переаллоцирует.
    #[inline]
    pub fn storage_ptr(&self) -> *const Option<T> {
        self.storage.as_ptr()
    }

    /// Физический слот логического индекса.
    #[inline(always)]
    fn slot(
        &self,
        index: usize,
    ) -> usize {
        (self.front + index) % self.capacity()
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

    /// Удваивает ёмкость, если свободных слотов не осталось.
    #[inline]
    fn reserve_one(&mut self) {
        if self.len == self.capacity() {
            self.grow();
        }
    }

    fn grow(&mut self) {
        let old_capacity = self.capacity();
        let new_capacity = old_capacity * 2;
        let mut storage = Self::allocate(new_capacity);

        for (index, target) in storage.iter_mut().take(self.len).enumerate() {
            let slot = self.slot(index);
            *target = self.storage[slot].take();
        }

        self.storage = storage;
        self.front = 0;

        trace!(
            old_capacity,
            new_capacity,
            len = self.len,
            "circular buffer grown"
        );
    }

    /// Добавляет элемент в начало.
    pub fn push_front(
        &mut self,
        value: T,
    ) {
        self.reserve_one();

        let capacity = self.capacity();
        self.front = (self.front + capacity - 1) % capacity;
        self.storage[self.front] = Some(value);
        self.len += 1;
    }

    /// Добавляет элемент в конец.
    pub fn push_back(
        &mut self,
        value: T,
    ) {
        self.reserve_one();

        let slot = self.slot(self.len);
        self.storage[slot] = Some(value);
        self.len += 1;
    }

    /// Удаляет и возвращает первый элемент.
    pub fn pop_front(&mut self) -> ContainerResult<T> {
        if self.len == 0 {
            return Err(ContainerError::empty("pop_front"));
        }

        let value = self.storage[self.front]
            .take()
            .ok_or(ContainerError::empty("pop_front"))?;
        self.front = (self.front + 1) % self.capacity();
        self.len -= 1;

        Ok(value)
    }

    /// Удаляет и возвращает последний элемент.
    pub fn pop_back(&mut self) -> ContainerResult<T> {
        if self.len == 0 {
            return Err(ContainerError::empty("pop_back"));
        }

        let slot = self.slot(self.len - 1);
        let value = self.storage[slot]
            .take()
            .ok_or(ContainerError::empty("pop_back"))?;
        self.len -= 1;

        Ok(value)
    }

    /// Возвращает ссылку на элемент по логическому индексу.
    pub fn at(
        &self,
        index: usize,
    ) -> ContainerResult<&T> {
        self.ensure_index(index)?;

        let slot = self.slot(index);
        self.storage[slot]
            .as_ref()
            .ok_or(ContainerError::out_of_range(index, self.len))
    }

    /// Возвращает изменяемую ссылку на элемент по логическому индексу.
    pub fn at_mut(
        &mut self,
        index: usize,
    ) -> ContainerResult<&mut T> {
        self.ensure_index(index)?;

        let len = self.len;
        let slot = self.slot(index);
        self.storage[slot]
            .as_mut()
            .ok_or(ContainerError::out_of_range(index, len))
    }

    /// Удаляет все элементы. Ёмкость сохраняется.
    pub fn clear(&mut self) {
        for index in 0..self.len {
            let slot = self.slot(index);
            self.storage[slot] = None;
        }

        self.len = 0;
        self.front = 0;
    }

    /// Линейный поиск в логическом порядке. Первое совпадение выигрывает.
    pub fn find(
        &self,
        value: &T,
    ) -> Option<usize>
    where
        T: PartialEq,
    {
        self.values().position(|item| item == value)
    }

    /// Удаляет элемент `index` и сдвигает последующие элементы влево.
    pub fn remove_at(
        &mut self,
        index: usize,
    ) -> ContainerResult<T> {
        self.ensure_index(index)?;

        let len = self.len;
        let slot = self.slot(index);
        let removed = self.storage[slot].take();

        for i in index..len - 1 {
            let (dst, src) = (self.slot(i), self.slot(i + 1));
            self.storage[dst] = self.storage[src].take();
        }

        self.len -= 1;

        removed.ok_or(ContainerError::out_of_range(index, len))
    }

    /// Вставляет `value` сразу после элемента `index`, сдвигая последующие
    /// элементы вправо.
    ///
    /// Индекс должен указывать на существующий элемент, поэтому вставка в
    /// пустой буфер всегда завершается `IndexOutOfRange`.
    pub fn insert_after(
        &mut self,
        index: usize,
        value: T,
    ) -> ContainerResult<()> {
        self.ensure_index(index)?;
        self.reserve_one();

        for i in (index + 2..=self.len).rev() {
            let (dst, src) = (self.slot(i), self.slot(i - 1));
            self.storage[dst] = self.storage[src].take();
        }

        let slot = self.slot(index + 1);
        self.storage[slot] = Some(value);
        self.len += 1;

        Ok(())
    }

    /// Удаляет элементы на чётных логических позициях (по индексации до
    /// вызова) и уплотняет оставшиеся. Хранилище не переаллоцируется.
    pub fn remove_evens(&mut self) {
        let mut kept = 0;

        for index in 0..self.len {
            let slot = self.slot(index);
            let value = self.storage[slot].take();

            if index % 2 == 1 {
                let target = self.slot(kept);
                self.storage[target] = value;
                kept += 1;
            }
        }

        self.len = kept;
    }

    /// Статистика заполнения.
    pub fn statistics(&self) -> BufferStatistics {
        BufferStatistics::new(self.len, self.capacity(), self.front)
    }

    pub fn validate_invariants(&self) -> Result<(), ValidationError> {
        let capacity = self.capacity();

        validate!(capacity > 0, ValidationError::ZeroCapacity);
        validate!(
            self.len <= capacity,
            ValidationError::CapacityExceeded {
                len: self.len,
                capacity
            }
        );
        validate!(
            self.front < capacity,
            ValidationError::FrontOutOfBounds {
                front: self.front,
                capacity
            }
        );

        for index in 0..self.len {
            let slot = self.slot(index);
            validate!(
                self.storage[slot].is_some(),
                ValidationError::VacantSlot { index, slot }
            );
        }

        let occupied = self.storage.iter().filter(|slot| slot.is_some()).count();
        validate!(
            occupied == self.len,
            ValidationError::LengthMismatch {
                expected: self.len,
                actual: occupied
            }
        );

        Ok(())
    }

    /// Элементы в логическом порядке.
    fn values(&self) -> impl Iterator<Item = &T> + '_ {
        (0..self.len).filter_map(move |index| self.storage[self.slot(index)].as_ref())
    }
}

////////////////////////////////////////////////////////////////////////////////
// Общие реализации трейтов для CircularBuffer
////////////////////////////////////////////////////////////////////////////////

impl<T> Default for CircularBuffer<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for CircularBuffer<T> {
    /// Глубокая копия той же ёмкости; элементы раскладываются с нулевого
    /// слота.
    fn clone(&self) -> Self {
        let mut storage = Self::allocate(self.capacity());

        for (target, value) in storage.iter_mut().zip(self.values()) {
            *target = Some(value.clone());
        }

        Self {
            storage,
            len: self.len,
            front: 0,
        }
    }
}

impl<T: PartialEq> PartialEq for CircularBuffer<T> {
    fn eq(
        &self,
        other: &Self,
    ) -> bool {
        self.len == other.len && self.values().eq(other.values())
    }
}

impl<T: Eq> Eq for CircularBuffer<T> {}

impl<T: fmt::Display> fmt::Display for CircularBuffer<T> {
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

impl<T> FromIterator<T> for CircularBuffer<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let values: Vec<T> = iter.into_iter().collect();
        let len = values.len();
        let mut storage = Self::allocate(len.max(DEFAULT_CAPACITY));

        for (target, value) in storage.iter_mut().zip(values) {
            *target = Some(value);
        }

        Self {
            storage,
            len,
            front: 0,
        }
    }
}

impl<T> Sequence<T> for CircularBuffer<T>
where
    T: PartialEq + fmt::Display,
{
    fn kind(&self) -> SequenceKind {
        SequenceKind::Buffer
    }

    fn len(&self) -> usize {
        CircularBuffer::len(self)
    }

    fn capacity(&self) -> Option<usize> {
        Some(CircularBuffer::capacity(self))
    }

    fn report(&self) -> String {
        self.statistics().format_report()
    }

    fn push_front(
        &mut self,
        value: T,
    ) {
        CircularBuffer::push_front(self, value)
    }

    fn push_back(
        &mut self,
        value: T,
    ) {
        CircularBuffer::push_back(self, value)
    }

    fn pop_front(&mut self) -> ContainerResult<T> {
        CircularBuffer::pop_front(self)
    }

    fn pop_back(&mut self) -> ContainerResult<T> {
        CircularBuffer::pop_back(self)
    }

    fn at(
        &self,
        index: usize,
    ) -> ContainerResult<&T> {
        CircularBuffer::at(self, index)
    }

    fn at_mut(
        &mut self,
        index: usize,
    ) -> ContainerResult<&mut T> {
        CircularBuffer::at_mut(self, index)
    }

    fn clear(&mut self) {
        CircularBuffer::clear(self)
    }

    fn find(
        &self,
        value: &T,
    ) -> Option<usize> {
        CircularBuffer::find(self, value)
    }

    fn remove_at(
        &mut self,
        index: usize,
    ) -> ContainerResult<T> {
        CircularBuffer::remove_at(self, index)
    }

    fn insert_after(
        &mut self,
        index: usize,
        value: T,
    ) -> ContainerResult<()> {
        CircularBuffer::insert_after(self, index, value)
    }

    fn remove_evens(&mut self) {
        CircularBuffer::remove_evens(self)
    }

    fn render(&self) -> String {
        self.to_string()
    }

    fn check(&self) -> Result<(), ValidationError> {
        self.validate_invariants()
    }
}

impl<T: Serialize> Serialize for CircularBuffer<T> {
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

impl<'de, T: Deserialize<'de>> Deserialize<'de> for CircularBuffer<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct BufferVisitor<T>(PhantomData<T>);

        impl<'de, T: Deserialize<'de>> Visitor<'de> for BufferVisitor<T> {
            type Value = CircularBuffer<T>;

            fn expecting(
                &self,
                f: &mut fmt::Formatter,
            ) -> fmt::Result {
                write!(f, "a sequence of buffer elements")
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

        deserializer.deserialize_seq(BufferVisitor(PhantomData))
    }
}

////////////////////////////////////////////////////////////////////////////////
// Тесты
////////////////////////////////////////////////////////////////////////////////
