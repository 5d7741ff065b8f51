//! The view of the stack passed to every behavior hook.

use focus_core::TickPhase;

use crate::{CommandQueue, EntryRef, StackCommand};

/// A read-only snapshot of the stack plus a queue for stack mutations.
///
/// Built by the stack for a single hook invocation.  The view reflects the
/// stack as it was when the hook was called: mutations requested through
/// [`push`][Self::push], [`pop`][Self::pop], … are queued and only applied
/// once the hook returns.
///
/// # Example: open a dialog from gameplay
///
/// ```rust,ignore
/// fn on_update(&mut self, ctx: &mut StackContext<'_>) {
///     if self.pause_requested {
///         ctx.push(self.pause_menu.clone());
///     }
/// }
/// ```
pub struct StackContext<'a> {
    entries:  &'a [EntryRef],
    current:  Option<&'a EntryRef>,
    phase:    Option<TickPhase>,
    commands: &'a mut CommandQueue,
}

impl<'a> StackContext<'a> {
    /// Build a context for one hook invocation.
    #[inline]
    pub fn new(
        entries:  &'a [EntryRef],
        current:  Option<&'a EntryRef>,
        phase:    Option<TickPhase>,
        commands: &'a mut CommandQueue,
    ) -> Self {
        Self { entries, current, phase, commands }
    }

    // ── Read-only view ────────────────────────────────────────────────────

    /// Stacked entries, top first.
    ///
    /// The entry whose hook is running is mutably borrowed: calling
    /// [`EntryRef::borrow`] or [`EntryRef::is_done`] on it panics.
    pub fn entries(&self) -> &[EntryRef] {
        self.entries
    }

    pub fn top(&self) -> Option<&EntryRef> {
        self.entries.first()
    }

    /// The entry currently receiving ticks, if any.
    ///
    /// When the running hook belongs to the current entry, that entry is
    /// mutably borrowed: [`EntryRef::borrow`] and [`EntryRef::is_done`] on
    /// the returned handle panic.  Use [`EntryRef::try_is_done`] instead.
    pub fn current(&self) -> Option<&EntryRef> {
        self.current
    }

    /// The tick phase being processed, or `None` when the hook was
    /// triggered by a direct stack call outside of a tick.
    pub fn phase(&self) -> Option<TickPhase> {
        self.phase
    }

    pub fn contains(&self, entry: &EntryRef) -> bool {
        self.entries.contains(entry)
    }

    /// Number of commands queued so far by this and earlier hooks.
    pub fn pending(&self) -> usize {
        self.commands.len()
    }

    // ── Mutations (queued) ────────────────────────────────────────────────

    /// Push `entry`, forgetting any earlier initialization.
    pub fn push(&mut self, entry: EntryRef) {
        self.push_with(entry, true);
    }

    pub fn push_with(&mut self, entry: EntryRef, reinitialize: bool) {
        self.commands.push(StackCommand::Push { entry, reinitialize });
    }

    /// Pop the entry that is on top when the command is applied.
    pub fn pop(&mut self) {
        self.commands.push(StackCommand::Pop);
    }

    pub fn pop_entry(&mut self, entry: &EntryRef) {
        self.commands.push(StackCommand::PopEntry(entry.clone()));
    }

    pub fn clear(&mut self) {
        self.commands.push(StackCommand::Clear);
    }

    pub fn forget_initialization(&mut self, entry: &EntryRef) {
        self.commands.push(StackCommand::ForgetInitialization(entry.clone()));
    }
}
