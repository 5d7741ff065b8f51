//! Fluent builder for constructing a [`BehaviorStack`].

use focus_behavior::EntryRef;
use focus_core::{Persistence, StackConfig};

use crate::{BehaviorStack, StackObserver, StackResult};

/// Fluent builder for [`BehaviorStack`].
///
/// # Optional inputs (have defaults)
///
/// | Method                  | Default                          |
/// |-------------------------|----------------------------------|
/// | `.max_iterations(n)`    | `DEFAULT_MAX_ITERATIONS` (100)   |
/// | `.max_pending_commands` | `DEFAULT_MAX_PENDING_COMMANDS`   |
/// | `.persistence(p)`       | `Persistence::SceneScoped`       |
/// | `.observer(o)`          | none                             |
/// | `.entry(e)`             | empty stack                      |
///
/// # Example
///
/// ```rust,ignore
/// let trace = TraceLog::new();
/// let mut stack = StackBuilder::named("ui")
///     .max_iterations(32)
///     .observer(TraceObserver::new(trace.clone()))
///     .entry(EntryRef::new(Idle))
///     .build()?;
/// stack.update()?;
/// ```
pub struct StackBuilder {
    config:    StackConfig,
    observers: Vec<Box<dyn StackObserver>>,
    entries:   Vec<EntryRef>,
}

impl StackBuilder {
    pub fn new(config: StackConfig) -> Self {
        Self { config, observers: Vec::new(), entries: Vec::new() }
    }

    /// Start from the default configuration with the given name.
    pub fn named(name: impl Into<String>) -> Self {
        Self::new(StackConfig::named(name))
    }

    pub fn max_iterations(mut self, max_iterations: u32) -> Self {
        self.config.max_iterations = max_iterations;
        self
    }

    pub fn max_pending_commands(mut self, max_pending_commands: u32) -> Self {
        self.config.max_pending_commands = max_pending_commands;
        self
    }

    pub fn persistence(mut self, persistence: Persistence) -> Self {
        self.config.persistence = persistence;
        self
    }

    /// Subscribe an observer before any entry is pushed.
    pub fn observer<O: StackObserver + 'static>(mut self, observer: O) -> Self {
        self.observers.push(Box::new(observer));
        self
    }

    /// Push an initial entry.  Entries are pushed in call order, so the last
    /// one added ends up on top.
    pub fn entry(mut self, entry: EntryRef) -> Self {
        self.entries.push(entry);
        self
    }

    /// Validate the configuration, subscribe observers, push the initial
    /// entries and return the stack.  No hook runs until the first tick.
    pub fn build(self) -> StackResult<BehaviorStack> {
        self.config.validate()?;
        let mut stack = BehaviorStack::from_valid(self.config);
        for observer in self.observers {
            stack.observers.subscribe(observer);
        }
        for entry in self.entries {
            stack.push(entry)?;
        }
        Ok(stack)
    }
}
