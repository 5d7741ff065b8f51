//! The `BehaviorStack` container and its push / pop / clear API.

use focus_behavior::{CommandQueue, EntryRef, StackCommand, StackContext};
use focus_core::{ObserverId, StackConfig, TickPhase};

use crate::inspect::StackSnapshot;
use crate::ledger::InitLedger;
use crate::observer::{ObserverSet, StackEventKind, StackObserver};
use crate::{StackError, StackResult};

// ── Outcomes and counters ─────────────────────────────────────────────────────

/// What a push did to the stack.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum PushOutcome {
    /// The entry was not stacked and is now on top.
    Inserted,
    /// The entry was buried and has been moved to the top.
    Promoted,
    /// The entry was already on top; nothing happened.
    AlreadyTop,
}

/// Cumulative event counters since the stack was created.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub struct StackStats {
    pub pushed:      u64,
    pub popped:      u64,
    pub begun:       u64,
    pub interrupted: u64,
    /// `on_initialize` calls.
    pub initialized: u64,
    /// Calls to `tick`, idle ones included.
    pub ticks:       u64,
}

/// Which entry hook to run.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub(crate) enum Hook {
    Initialize,
    Begin,
    Interrupt,
    Finish,
    Update,
    LateUpdate,
}

// ── BehaviorStack ─────────────────────────────────────────────────────────────

/// An ordered stack of behavior entries where only the top one is live.
///
/// Index 0 is the top.  Pushing suspends whatever was running (it receives
/// `on_interrupt`) and the pushed entry takes over on the next tick; when the
/// top finishes, the entry below resumes with a fresh `on_begin` in the same
/// tick.  Ticking is driven through [`TickTarget`][crate::TickTarget].
///
/// The stack holds shared handles to its entries only while they are stacked
/// and never drops an entry on purpose; which instances were already
/// initialized is tracked separately in a non-owning [`InitLedger`].
///
/// Every mutating call returns `StackResult` because the hooks it triggers
/// may queue further mutations, which are applied before the call returns
/// (see [`StackConfig::max_pending_commands`]).
pub struct BehaviorStack {
    pub(crate) config:    StackConfig,
    pub(crate) entries:   Vec<EntryRef>,
    pub(crate) current:   Option<EntryRef>,
    pub(crate) ledger:    InitLedger,
    pub(crate) observers: ObserverSet,
    pub(crate) stats:     StackStats,
}

impl Default for BehaviorStack {
    fn default() -> Self {
        Self::from_valid(StackConfig::default())
    }
}

impl BehaviorStack {
    /// Create an empty stack.  Fails if `config` does not validate.
    pub fn new(config: StackConfig) -> StackResult<Self> {
        config.validate()?;
        Ok(Self::from_valid(config))
    }

    /// Create an empty stack with default limits.  Cannot fail.
    pub fn named(name: impl Into<String>) -> Self {
        Self::from_valid(StackConfig::named(name))
    }

    pub(crate) fn from_valid(config: StackConfig) -> Self {
        Self {
            config,
            entries:   Vec::new(),
            current:   None,
            ledger:    InitLedger::new(),
            observers: ObserverSet::new(),
            stats:     StackStats::default(),
        }
    }

    // ── Read-only view ────────────────────────────────────────────────────

    pub fn name(&self) -> &str {
        &self.config.name
    }

    pub fn config(&self) -> &StackConfig {
        &self.config
    }

    /// Stacked entries, top first.
    pub fn entries(&self) -> &[EntryRef] {
        &self.entries
    }

    /// The entry currently receiving ticks.
    ///
    /// `None` between a change of top and the next tick, which is when the
    /// new top gets activated.
    pub fn current(&self) -> Option<&EntryRef> {
        self.current.as_ref()
    }

    pub fn top(&self) -> Option<&EntryRef> {
        self.entries.first()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// `true` when nothing is stacked and nothing is current.
    pub fn is_empty(&self) -> bool {
        self.current.is_none() && self.entries.is_empty()
    }

    pub fn contains(&self, entry: &EntryRef) -> bool {
        self.position(entry).is_some()
    }

    /// Index of `entry` (0 = top).
    pub fn position(&self, entry: &EntryRef) -> Option<usize> {
        self.entries.iter().position(|e| e == entry)
    }

    /// Whether `entry` has run `on_initialize` and not been forgotten since.
    pub fn is_initialized(&self, entry: &EntryRef) -> bool {
        self.ledger.contains(entry)
    }

    pub fn ledger(&self) -> &InitLedger {
        &self.ledger
    }

    pub fn stats(&self) -> StackStats {
        self.stats
    }

    pub fn snapshot(&self) -> StackSnapshot {
        StackSnapshot::capture(&self.config.name, &self.entries, self.current.as_ref())
    }

    // ── Observers ─────────────────────────────────────────────────────────

    pub fn subscribe<O: StackObserver + 'static>(&mut self, observer: O) -> ObserverId {
        self.observers.subscribe(Box::new(observer))
    }

    /// Returns `false` if `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        self.observers.unsubscribe(id)
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    // ── Mutations ─────────────────────────────────────────────────────────

    /// Push `entry` and forget any earlier initialization of it.
    pub fn push(&mut self, entry: EntryRef) -> StackResult<PushOutcome> {
        self.push_with(entry, true)
    }

    /// Push `entry` to the top, or promote it if it is already stacked.
    ///
    /// Pushing the current top is a no-op.  With `reinitialize` the entry's
    /// next activation runs `on_initialize` again; without it, an entry that
    /// was initialized before (even if it finished since) only gets
    /// `on_begin`.  A different current entry is interrupted.
    pub fn push_with(&mut self, entry: EntryRef, reinitialize: bool) -> StackResult<PushOutcome> {
        let mut queue = CommandQueue::new();
        let outcome = self.push_inner(entry, reinitialize, &mut queue, None);
        self.drain(queue, None)?;
        Ok(outcome)
    }

    /// Finish and remove the top entry.  Returns it, or `None` if empty.
    pub fn pop(&mut self) -> StackResult<Option<EntryRef>> {
        let Some(top) = self.entries.first().cloned() else {
            return Ok(None);
        };
        let mut queue = CommandQueue::new();
        self.pop_inner(&top, &mut queue, None);
        self.drain(queue, None)?;
        Ok(Some(top))
    }

    /// Finish and remove `entry` wherever it sits.  `on_finish` runs even if
    /// the entry is not done.  Returns `false` if it was not stacked.
    pub fn pop_entry(&mut self, entry: &EntryRef) -> StackResult<bool> {
        let mut queue = CommandQueue::new();
        let removed = self.pop_inner(entry, &mut queue, None);
        self.drain(queue, None)?;
        Ok(removed)
    }

    /// Finish every entry top to bottom, empty the stack, then notify.
    /// Returns how many entries were removed.
    pub fn clear(&mut self) -> StackResult<usize> {
        let mut queue = CommandQueue::new();
        let removed = self.clear_inner(&mut queue, None);
        self.drain(queue, None)?;
        Ok(removed)
    }

    /// Apply one command as if a hook had queued it.
    pub fn apply(&mut self, command: StackCommand) -> StackResult<()> {
        let mut queue = CommandQueue::new();
        queue.push(command);
        self.drain(queue, None)
    }

    /// Make the next activation of `entry` run `on_initialize` again.
    /// Returns `false` if it was not initialized.
    pub fn forget_initialization(&mut self, entry: &EntryRef) -> bool {
        self.ledger.remove(entry)
    }

    /// Drop ledger handles of entries that no longer exist.
    pub fn prune_ledger(&mut self) -> usize {
        self.ledger.prune()
    }

    // ── Internals shared with the scheduler ───────────────────────────────

    pub(crate) fn is_current(&self, entry: &EntryRef) -> bool {
        self.current.as_ref() == Some(entry)
    }

    pub(crate) fn is_top(&self, entry: &EntryRef) -> bool {
        self.entries.first() == Some(entry)
    }

    fn push_inner(
        &mut self,
        entry:        EntryRef,
        reinitialize: bool,
        queue:        &mut CommandQueue,
        phase:        Option<TickPhase>,
    ) -> PushOutcome {
        let outcome = match self.position(&entry) {
            Some(0) => return PushOutcome::AlreadyTop,
            Some(index) => {
                self.entries.remove(index);
                PushOutcome::Promoted
            }
            None => PushOutcome::Inserted,
        };

        if reinitialize {
            self.ledger.remove(&entry);
        }
        self.entries.insert(0, entry.clone());
        self.notify(StackEventKind::Pushed, &entry);

        // The top changed: suspend whatever was running so the next tick
        // begins the new top.
        if self.current.as_ref().is_some_and(|current| *current != entry) {
            self.interrupt_current(queue, phase);
        }
        outcome
    }

    fn pop_inner(
        &mut self,
        entry: &EntryRef,
        queue: &mut CommandQueue,
        phase: Option<TickPhase>,
    ) -> bool {
        let Some(index) = self.position(entry) else {
            return false;
        };
        let popped = self.entries.remove(index);
        self.invoke(&popped, Hook::Finish, phase, queue);
        if self.is_current(&popped) {
            self.current = None;
        }
        self.notify(StackEventKind::Popped, &popped);
        true
    }

    fn clear_inner(&mut self, queue: &mut CommandQueue, phase: Option<TickPhase>) -> usize {
        let popped = self.entries.clone();
        for entry in &popped {
            self.invoke(entry, Hook::Finish, phase, queue);
        }
        self.entries.clear();
        self.current = None;
        for entry in &popped {
            self.notify(StackEventKind::Popped, entry);
        }
        popped.len()
    }

    /// Interrupt the current entry (if any) and clear it.
    pub(crate) fn interrupt_current(&mut self, queue: &mut CommandQueue, phase: Option<TickPhase>) {
        let Some(current) = self.current.clone() else {
            return;
        };
        self.invoke(&current, Hook::Interrupt, phase, queue);
        self.current = None;
        self.notify(StackEventKind::Interrupted, &current);
    }

    /// Run one hook of `entry`, collecting the commands it queues.
    pub(crate) fn invoke(
        &self,
        entry: &EntryRef,
        hook:  Hook,
        phase: Option<TickPhase>,
        queue: &mut CommandQueue,
    ) {
        log::trace!("[{}] {hook:?} -> {}", self.config.name, entry.name());
        let mut ctx = StackContext::new(&self.entries, self.current.as_ref(), phase, queue);
        let mut behavior = entry.borrow_mut();
        match hook {
            Hook::Initialize => behavior.on_initialize(&mut ctx),
            Hook::Begin      => behavior.on_begin(&mut ctx),
            Hook::Interrupt  => behavior.on_interrupt(&mut ctx),
            Hook::Finish     => behavior.on_finish(&mut ctx),
            Hook::Update     => behavior.on_update(&mut ctx),
            Hook::LateUpdate => behavior.on_late_update(&mut ctx),
        }
    }

    pub(crate) fn notify(&mut self, kind: StackEventKind, entry: &EntryRef) {
        match kind {
            StackEventKind::Pushed      => self.stats.pushed += 1,
            StackEventKind::Popped      => self.stats.popped += 1,
            StackEventKind::Begun       => self.stats.begun += 1,
            StackEventKind::Interrupted => self.stats.interrupted += 1,
        }
        log::debug!("[{}] {kind} {}", self.config.name, entry.name());
        self.observers.notify(kind, entry);
    }

    /// Apply queued commands until the queue is empty.  Hooks triggered by a
    /// command append to the same queue.
    pub(crate) fn drain(&mut self, mut queue: CommandQueue, phase: Option<TickPhase>) -> StackResult<()> {
        let limit = self.config.max_pending_commands;
        let mut applied = 0u32;
        while let Some(command) = queue.pop_front() {
            if applied == limit {
                log::error!(
                    "[{}] command queue did not drain after {limit} commands; \
                     an entry keeps rearranging the stack from its hooks",
                    self.config.name,
                );
                return Err(StackError::CommandLimitExceeded {
                    stack: self.config.name.clone(),
                    limit,
                });
            }
            applied += 1;
            self.apply_inner(command, &mut queue, phase);
        }
        Ok(())
    }

    fn apply_inner(&mut self, command: StackCommand, queue: &mut CommandQueue, phase: Option<TickPhase>) {
        match command {
            StackCommand::Push { entry, reinitialize } => {
                self.push_inner(entry, reinitialize, queue, phase);
            }
            StackCommand::Pop => {
                if let Some(top) = self.entries.first().cloned() {
                    self.pop_inner(&top, queue, phase);
                }
            }
            StackCommand::PopEntry(entry) => {
                self.pop_inner(&entry, queue, phase);
            }
            StackCommand::Clear => {
                self.clear_inner(queue, phase);
            }
            StackCommand::ForgetInitialization(entry) => {
                self.ledger.remove(&entry);
            }
        }
    }
}
