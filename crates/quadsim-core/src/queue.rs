//! Pending command storage.

use crate::parser::ParsedCommand;

/// Holds parsed commands until the copter is ready for the next one.
///
/// Dispatch order is last-in-first-out: the newest command expresses the
/// client's latest intent and preempts any backlog built up while the
/// copter was mid-flight. Stale commands linger at the bottom and are only
/// reached once the newer ones have run. Unbounded, no backpressure.
#[derive(Debug, Default)]
pub struct CommandQueue {
    pending: Vec<ParsedCommand>,
}

impl CommandQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a command. Never rejects.
    pub fn push(&mut self, cmd: ParsedCommand) {
        self.pending.push(cmd);
    }

    /// Remove and return the most recently pushed command.
    pub fn pop(&mut self) -> Option<ParsedCommand> {
        self.pending.pop()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
