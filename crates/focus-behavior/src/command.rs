//! Stack mutations requested from inside a hook.

use std::collections::VecDeque;

use crate::EntryRef;

/// A deferred stack mutation.
///
/// Recorded by [`StackContext`][crate::StackContext] and applied by the
/// stack, in FIFO order, right after the hook that produced it returns.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StackCommand {
    /// Push (or promote) an entry to the top.
    Push { entry: EntryRef, reinitialize: bool },

    /// Pop whatever entry is on top when the command is applied.
    Pop,

    /// Remove a specific entry from any position.
    PopEntry(EntryRef),

    /// Finish and remove every entry.
    Clear,

    /// Drop the entry from the initialization ledger so its next
    /// activation runs `on_initialize` again.
    ForgetInitialization(EntryRef),
}

/// FIFO queue of pending [`StackCommand`]s.
#[derive(Debug, Default)]
pub struct CommandQueue {
    inner: VecDeque<StackCommand>,
}

impl CommandQueue {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn push(&mut self, command: StackCommand) {
        self.inner.push_back(command);
    }

    #[inline]
    pub fn pop_front(&mut self) -> Option<StackCommand> {
        self.inner.pop_front()
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Iterate pending commands in application order.
    pub fn iter(&self) -> impl Iterator<Item = &StackCommand> {
        self.inner.iter()
    }
}
