/// Макрос для валидации условий с возвратом ошибки.
#[macro_export]
macro_rules! validate {
    ($cond:expr, $err:expr) => {
        if !$cond {
            return Err($err);
        }
    };
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Ёмкость буфера равна нулю
    ZeroCapacity,
    /// Кол-во элементов превышает ёмкость буфера
    CapacityExceeded { len: usize, capacity: usize },
    /// Смещение начала указывает за пределы хранилища
    FrontOutOfBounds { front: usize, capacity: usize },
    /// Логическая позиция ссылается на пустой слот
    VacantSlot { index: usize, slot: usize },
    /// Длина не соответствует реальному кол-ву элементов
    LengthMismatch { expected: usize, actual: usize },
}

/// Статистика заполнения `CircularBuffer`.
#[derive(Debug, Clone, PartialEq)]
pub struct BufferStatistics {
    /// Кол-во элементов
    pub len: usize,
    /// Выделенное кол-во слотов
    pub capacity: usize,
    /// Физический слот логического элемента 0
    pub front_offset: usize,
    /// Переходят ли элементы через конец хранилища
    pub wrapped: bool,
    /// Доля занятых слотов
    pub load_factor: f64,
}

impl BufferStatistics {
    /// Вычисляет статистику по состоянию буфера.
    pub fn new(
        len: usize,
        capacity: usize,
        front_offset: usize,
    ) -> Self {
        let load_factor = if capacity == 0 {
            0.0
        } else {
            len as f64 / capacity as f64
        };

        Self {
            len,
            capacity,
            front_offset,
            wrapped: front_offset + len > capacity,
            load_factor,
        }
    }

    /// Форматирует статистику для вывода.
    pub fn format_report(&self) -> String {
        let mut report = String::new();
        report.push_str("CircularBuffer Statistics:\n");
        report.push_str(&format!("  Elements: {}\n", self.len));
        report.push_str(&format!("  Capacity: {}\n", self.capacity));
        report.push_str(&format!("  Front offset: {}\n", self.front_offset));
        report.push_str(&format!("  Wrapped: {}\n", self.wrapped));
        report.push_str(&format!(
            "  Load factor: {:.1}%\n",
            self.load_factor * 100.0
        ));
        report
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        match self {
            ValidationError::ZeroCapacity => write!(f, "Buffer capacity is zero"),
            ValidationError::CapacityExceeded { len, capacity } => {
                write!(f, "Length {len} exceeds capacity {capacity}")
            }
            ValidationError::FrontOutOfBounds { front, capacity } => {
                write!(f, "Front offset {front} out of bounds for capacity {capacity}")
            }
            ValidationError::VacantSlot { index, slot } => {
                write!(f, "Logical index {index} maps to vacant slot {slot}")
            }
            ValidationError::LengthMismatch { expected, actual } => {
                write!(f, "Length mismatch: expected {expected}, got {actual}")
            }
        }
    }
}

impl std::error::Error for ValidationError {}
