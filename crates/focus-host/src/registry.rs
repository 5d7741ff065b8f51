//! `StackRegistry`: the main stack plus named stacks, owned per host.

use std::collections::BTreeMap;

use focus_core::{Frame, FrameClock, Persistence, StackConfig, TickPhase, DEFAULT_STACK_NAME};
use focus_stack::{BehaviorStack, StackError, StackResult, TickReport, TickTarget};

use crate::Host;

/// Both phase reports of one host frame.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct FrameReport {
    /// The frame that was just run.
    pub frame:       Frame,
    pub update:      TickReport,
    pub late_update: TickReport,
}

/// Lazily created behavior stacks keyed by name.
///
/// Stacks are created on first access, and only while the host is running:
/// asking for a missing stack during start-up or shutdown yields `None`
/// rather than a stack nobody will tick.  Once created, a stack is returned
/// regardless of the host state.
///
/// Each stack's [`Persistence`] decides whether it survives
/// [`load_scene`][Self::load_scene].
pub struct StackRegistry<H: Host> {
    host:   H,
    stacks: BTreeMap<String, BehaviorStack>,
    clock:  FrameClock,
    scene:  u64,
}

impl<H: Host> StackRegistry<H> {
    pub fn new(host: H) -> Self {
        Self { host, stacks: BTreeMap::new(), clock: FrameClock::new(), scene: 0 }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn clock(&self) -> FrameClock {
        self.clock
    }

    /// Number of scenes loaded so far.
    pub fn scene(&self) -> u64 {
        self.scene
    }

    // ── Access ────────────────────────────────────────────────────────────

    /// The main stack, named [`DEFAULT_STACK_NAME`].
    pub fn main(&mut self) -> Option<&mut BehaviorStack> {
        self.named(DEFAULT_STACK_NAME)
    }

    /// The stack called `name`, created with default limits if missing.
    pub fn named(&mut self, name: &str) -> Option<&mut BehaviorStack> {
        if !self.stacks.contains_key(name) {
            if !self.can_create(name) {
                return None;
            }
            self.insert(BehaviorStack::named(name));
        }
        self.stacks.get_mut(name)
    }

    /// The stack called `name`, created from `config` if missing.
    ///
    /// `config.name` is replaced by `name`.  When the stack already exists
    /// `config` is ignored.
    pub fn named_with(
        &mut self,
        name:   &str,
        config: StackConfig,
    ) -> StackResult<Option<&mut BehaviorStack>> {
        if !self.stacks.contains_key(name) {
            if !self.can_create(name) {
                return Ok(None);
            }
            self.insert(BehaviorStack::new(config.with_name(name))?);
        } else {
            log::debug!("stack '{name}' already exists; ignoring the supplied config");
        }
        Ok(self.stacks.get_mut(name))
    }

    /// An existing stack, never creating one.
    pub fn get(&self, name: &str) -> Option<&BehaviorStack> {
        self.stacks.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut BehaviorStack> {
        self.stacks.get_mut(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.stacks.contains_key(name)
    }

    /// Names of all live stacks, sorted.
    pub fn names(&self) -> Vec<&str> {
        self.stacks.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.stacks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stacks.is_empty()
    }

    /// Detach a stack from the registry.  Its entries are left untouched;
    /// call [`BehaviorStack::clear`] on it to finish them.
    pub fn remove(&mut self, name: &str) -> Option<BehaviorStack> {
        self.stacks.remove(name)
    }

    // ── Host events ───────────────────────────────────────────────────────

    /// The host is replacing its scene: clear and drop every scene-scoped
    /// stack.  Persistent stacks are kept as they are.
    ///
    /// Every scoped stack is cleared even if one of them fails; the first
    /// error is returned.  Returns how many stacks were dropped.
    pub fn load_scene(&mut self) -> StackResult<usize> {
        let scoped: Vec<String> = self
            .stacks
            .iter()
            .filter(|(_, stack)| stack.config().persistence == Persistence::SceneScoped)
            .map(|(name, _)| name.clone())
            .collect();

        let mut first_error: Option<StackError> = None;
        for name in &scoped {
            let Some(mut stack) = self.stacks.remove(name) else { continue };
            match stack.clear() {
                Ok(finished) => log::debug!("stack '{name}' unloaded, {finished} entry(ies) finished"),
                Err(err) => {
                    log::error!("stack '{name}' failed to unload cleanly: {err}");
                    first_error.get_or_insert(err);
                }
            }
        }

        self.scene += 1;
        log::info!(
            "scene {} loaded: dropped {} scene-scoped stack(s), {} persistent kept",
            self.scene,
            scoped.len(),
            self.stacks.len(),
        );
        match first_error {
            Some(err) => Err(err),
            None      => Ok(scoped.len()),
        }
    }

    /// Run one host frame: Update then LateUpdate on every stack, then
    /// advance the frame clock.
    ///
    /// An error aborts the frame without advancing the clock.
    pub fn run_frame(&mut self) -> StackResult<FrameReport> {
        let frame = self.clock.current_frame;
        let update = self.update()?;
        let late_update = self.late_update()?;
        self.clock.advance();
        Ok(FrameReport { frame, update, late_update })
    }

    // ── Internals ─────────────────────────────────────────────────────────

    fn can_create(&self, name: &str) -> bool {
        if self.host.is_running() {
            return true;
        }
        log::debug!("stack '{name}' requested while the host is not running; not created");
        false
    }

    fn insert(&mut self, stack: BehaviorStack) {
        log::info!(
            "created stack '{}' ({})",
            stack.name(),
            stack.config().persistence,
        );
        self.stacks.insert(stack.name().to_owned(), stack);
    }
}

impl<H: Host> TickTarget for StackRegistry<H> {
    /// Tick every stack in name order and merge their reports.
    fn tick(&mut self, phase: TickPhase) -> StackResult<TickReport> {
        self.clock.enter(phase);
        let mut report = TickReport::idle(phase);
        for stack in self.stacks.values_mut() {
            report.merge(&stack.tick(phase)?);
        }
        Ok(report)
    }
}
