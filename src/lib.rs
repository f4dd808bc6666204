/// Containers: CircularBuffer, SinglyLinkedList and their shared contract.
pub mod containers;
/// Shell settings loading.
pub mod config;
/// Logging setup (filters, console sink).
pub mod logging;
/// Interactive shell: command parsing and execution.
pub mod shell;

// -----------------------------------------------------------------------------
//  Frequently used public types
// -----------------------------------------------------------------------------

/// Containers and the contract they share.
pub use containers::{
    BufferStatistics, CircularBuffer, Sequence, SequenceKind, SinglyLinkedList, ValidationError,
    DEFAULT_CAPACITY, NOT_FOUND,
};
/// Settings.
pub use self::config::Settings;
/// Container errors and status codes.
pub use ringlist_error::{ContainerError, ContainerResult, ErrorExt, StatusCode};
/// Shell API.
pub use shell::{Command, Reply, Session, ShellError};
