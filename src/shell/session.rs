use ringlist_error::{ContainerResult, ErrorExt, LogLevel};
use tracing::{debug, error, info, trace, warn};

use super::{Command, Reply, ShellError, HELP};
use crate::{CircularBuffer, Sequence, SequenceKind, SinglyLinkedList};

/// Контейнер, с которым работает сессия.
#[derive(Debug)]
pub enum Container {
    Buffer(CircularBuffer<i64>),
    List(SinglyLinkedList<i64>),
}

/// Состояние интерактивной сессии: один контейнер `i64` и счётчики
/// выполненных команд.
#[derive(Debug)]
pub struct Session {
    container: Container,
    executed: usize,
    mutations: usize,
}

////////////////////////////////////////////////////////////////////////////////
// Собственные методы
////////////////////////////////////////////////////////////////////////////////

impl Container {
    /// Создаёт пустой контейнер вида `kind`. Ёмкость учитывается только
    /// буфером.
    pub fn new(
        kind: SequenceKind,
        capacity: usize,
    ) -> ContainerResult<Self> {
        Ok(match kind {
            SequenceKind::Buffer => Container::Buffer(CircularBuffer::with_capacity(capacity)?),
            SequenceKind::List => Container::List(SinglyLinkedList::new()),
        })
    }

    pub fn as_sequence(&self) -> &dyn Sequence<i64> {
        match self {
            Container::Buffer(buf) => buf,
            Container::List(list) => list,
        }
    }

    pub fn as_sequence_mut(&mut self) -> &mut dyn Sequence<i64> {
        match self {
            Container::Buffer(buf) => buf,
            Container::List(list) => list,
        }
    }
}

impl Session {
    pub fn new(
        kind: SequenceKind,
        capacity: usize,
    ) -> ContainerResult<Self> {
        Ok(Self {
            container: Container::new(kind, capacity)?,
            executed: 0,
            mutations: 0,
        })
    }

    pub fn kind(&self) -> SequenceKind {
        self.container.as_sequence().kind()
    }

    pub fn container(&self) -> &Container {
        &self.container
    }

    /// Кол-во успешно выполненных команд.
    pub fn executed(&self) -> usize {
        self.executed
    }

    /// Кол-во успешно выполненных команд, изменивших контейнер.
    pub fn mutations(&self) -> usize {
        self.mutations
    }

    /// Разбирает и выполняет одну строку ввода.
    pub fn handle_line(
        &mut self,
        line: &str,
    ) -> Result<Reply, ShellError> {
        let command: Command = line.parse()?;
        self.execute(command)
    }

    pub fn execute(
        &mut self,
        command: Command,
    ) -> Result<Reply, ShellError> {
        let mutating = command.is_mutating();
        if mutating {
            debug!(command = command.name(), kind = %self.kind(), "executing");
        } else {
            trace!(command = command.name(), kind = %self.kind(), "executing");
        }

        let result = apply(self.container.as_sequence_mut(), command);

        match &result {
            Ok(_) => {
                self.executed += 1;
                if mutating {
                    self.mutations += 1;
                    trace!(len = self.container.as_sequence().len(), "container changed");
                }
            }
            Err(e) => {
                let code = e.status_code().code();
                match e.status_code().log_level() {
                    LogLevel::Error => error!(code, error = %e, "command failed"),
                    LogLevel::Warn => warn!(code, error = %e, "command failed"),
                    LogLevel::Info => info!(code, error = %e, "command failed"),
                    LogLevel::Debug => debug!(code, error = %e, "command failed"),
                    LogLevel::Trace => trace!(code, error = %e, "command failed"),
                }
            }
        }

        result
    }
}

/// Выполняет команду над любым контейнером через общий контракт.
fn apply(
    seq: &mut dyn Sequence<i64>,
    command: Command,
) -> Result<Reply, ShellError> {
    let reply = match command {
        Command::PushFront(v) => {
            seq.push_front(v);
            Reply::Ok
        }
        Command::PushBack(v) => {
            seq.push_back(v);
            Reply::Ok
        }
        Command::PopFront => Reply::Value(seq.pop_front()?),
        Command::PopBack => Reply::Value(seq.pop_back()?),
        Command::At(i) => Reply::Value(*seq.at(i)?),
        Command::Set(i, v) => {
            *seq.at_mut(i)? = v;
            Reply::Ok
        }
        Command::Find(v) => Reply::Position(seq.find(&v)),
        Command::RemoveAt(i) => Reply::Value(seq.remove_at(i)?),
        Command::InsertAfter(i, v) => {
            seq.insert_after(i, v)?;
            Reply::Ok
        }
        Command::RemoveEvens => {
            seq.remove_evens();
            Reply::Ok
        }
        Command::Clear => {
            seq.clear();
            Reply::Ok
        }
        Command::Size => Reply::Size(seq.len()),
        Command::Empty => Reply::Bool(seq.is_empty()),
        Command::Show => Reply::Contents(seq.render()),
        Command::Capacity => Reply::Capacity(seq.capacity()),
        Command::Check => {
            seq.check()?;
            Reply::Text(seq.report())
        }
        Command::Help => Reply::Text(HELP.to_string()),
        Command::Quit => Reply::Quit,
    };

    Ok(reply)
}

////////////////////////////////////////////////////////////////////////////////
// Тесты
////////////////////////////////////////////////////////////////////////////////
