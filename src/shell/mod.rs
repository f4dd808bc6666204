//! Интерактивная оболочка для ручной работы с контейнерами.
//!
//! - `command`: разбор строки ввода в [`Command`] и ответы [`Reply`].
//! - `error`: ошибки оболочки [`ShellError`].
//! - `session`: состояние сессии и выполнение команд.

pub mod command;
pub mod error;
pub mod session;

pub use command::*;
pub use error::*;
pub use session::*;
