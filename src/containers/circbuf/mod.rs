//! CircularBuffer - кольцевой буфер с удвоением ёмкости.
//!
//! # Модули
//!
//! - `circbuf_base`: реализация буфера и его трейтов.

pub mod circbuf_base;

pub use circbuf_base::*;
