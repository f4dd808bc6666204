//! SinglyLinkedList - односвязный список на цепочке `Box`-узлов.
//!
//! # Модули
//!
//! - `linkedlist_base`: реализация списка и его трейтов.

pub mod linkedlist_base;

pub use linkedlist_base::*;
