//! The per-tick scheduler loop.
//!
//! # Loop
//!
//! ```text
//! repeat (at most config.max_iterations times):
//!   ① Activate: if nothing is current, the top becomes current:
//!                on_initialize (first time only), on_begin, Begun.
//!                If the hooks moved the top away, interrupt and restart.
//!   ② Tick:     on_update or on_late_update depending on the phase.
//!                If a hook displaced the entry, restart.
//!   ③ Settle:   Update phase only: if is_done(), pop + on_finish and
//!                restart so the entry below resumes this same tick.
//!                Otherwise the stack is in steady state: stop.
//! ```
//!
//! Commands queued by any hook are applied right after that hook (and its
//! notification) returns, so every decision above reads the stack as the
//! hooks left it.

use focus_behavior::CommandQueue;
use focus_core::TickPhase;

use crate::observer::StackEventKind;
use crate::stack::{Hook, StackStats};
use crate::{BehaviorStack, StackError, StackResult};

// ── TickTarget ────────────────────────────────────────────────────────────────

/// Anything the host drives once per tick phase.
///
/// The host calls `tick(Update)` then `tick(LateUpdate)` once per frame.
pub trait TickTarget {
    fn tick(&mut self, phase: TickPhase) -> StackResult<TickReport>;

    fn update(&mut self) -> StackResult<TickReport> {
        self.tick(TickPhase::Update)
    }

    fn late_update(&mut self) -> StackResult<TickReport> {
        self.tick(TickPhase::LateUpdate)
    }
}

// ── TickReport ────────────────────────────────────────────────────────────────

/// What happened during one tick.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct TickReport {
    pub phase:       TickPhase,
    /// Scheduler loop passes; 0 when the stack was empty.
    pub iterations:  u32,
    pub pushed:      u64,
    pub popped:      u64,
    pub begun:       u64,
    pub interrupted: u64,
}

impl TickReport {
    /// A report with nothing in it.
    pub fn idle(phase: TickPhase) -> Self {
        Self { phase, iterations: 0, pushed: 0, popped: 0, begun: 0, interrupted: 0 }
    }

    fn between(phase: TickPhase, iterations: u32, before: &StackStats, after: &StackStats) -> Self {
        Self {
            phase,
            iterations,
            pushed:      after.pushed - before.pushed,
            popped:      after.popped - before.popped,
            begun:       after.begun - before.begun,
            interrupted: after.interrupted - before.interrupted,
        }
    }

    /// Add `other`'s counts into `self` (used when ticking several stacks).
    pub fn merge(&mut self, other: &TickReport) {
        self.iterations  += other.iterations;
        self.pushed      += other.pushed;
        self.popped      += other.popped;
        self.begun       += other.begun;
        self.interrupted += other.interrupted;
    }

    /// `true` if no entry changed state during the tick.
    pub fn is_quiet(&self) -> bool {
        self.pushed == 0 && self.popped == 0 && self.begun == 0 && self.interrupted == 0
    }
}

// ── Loop ──────────────────────────────────────────────────────────────────────

impl TickTarget for BehaviorStack {
    fn tick(&mut self, phase: TickPhase) -> StackResult<TickReport> {
        self.run_phase(phase)
    }
}

impl BehaviorStack {
    fn run_phase(&mut self, phase: TickPhase) -> StackResult<TickReport> {
        let before = self.stats;
        self.stats.ticks += 1;
        if self.is_empty() {
            return Ok(TickReport::idle(phase));
        }

        let during = Some(phase);
        let limit = self.config.max_iterations;

        for pass in 1..=limit {
            // ── ① Activate ────────────────────────────────────────────────
            let current = match self.current.clone() {
                Some(current) => current,
                None => {
                    let Some(top) = self.entries.first().cloned() else {
                        return Ok(TickReport::between(phase, pass, &before, &self.stats));
                    };
                    self.current = Some(top.clone());

                    let mut queue = CommandQueue::new();
                    if self.ledger.insert(&top) {
                        self.stats.initialized += 1;
                        self.invoke(&top, Hook::Initialize, during, &mut queue);
                    }
                    self.invoke(&top, Hook::Begin, during, &mut queue);
                    self.notify(StackEventKind::Begun, &top);
                    self.drain(queue, during)?;

                    if !self.is_current(&top) {
                        // A queued push already interrupted it, or it was popped.
                        continue;
                    }
                    if !self.entries.is_empty() && !self.is_top(&top) {
                        self.interrupt_and_drain(during)?;
                        continue;
                    }
                    top
                }
            };

            // ── ② Tick ────────────────────────────────────────────────────
            let hook = if phase.is_late() { Hook::LateUpdate } else { Hook::Update };
            let mut queue = CommandQueue::new();
            self.invoke(&current, hook, during, &mut queue);
            self.drain(queue, during)?;

            if !self.is_current(&current) {
                continue;
            }

            // ── ③ Settle ──────────────────────────────────────────────────
            if self.is_top(&current) {
                if phase == TickPhase::Update && current.is_done() {
                    let mut queue = CommandQueue::new();
                    self.entries.remove(0);
                    self.invoke(&current, Hook::Finish, during, &mut queue);
                    self.current = None;
                    self.notify(StackEventKind::Popped, &current);
                    self.drain(queue, during)?;
                    continue;
                }
                log::trace!("[{}] {phase} settled after {pass} pass(es)", self.config.name);
                return Ok(TickReport::between(phase, pass, &before, &self.stats));
            }

            self.interrupt_and_drain(during)?;
        }

        // The last allowed pass may have emptied the stack.
        if self.is_empty() {
            log::trace!("[{}] {phase} drained the stack after {limit} pass(es)", self.config.name);
            return Ok(TickReport::between(phase, limit, &before, &self.stats));
        }

        log::error!(
            "[{}] scheduler did not settle within {limit} iterations during {phase}; \
             current entry: {}",
            self.config.name,
            self.current.as_ref().map_or_else(|| "<none>".to_owned(), |e| e.name()),
        );
        Err(StackError::IterationLimitExceeded {
            stack: self.config.name.clone(),
            phase,
            limit,
        })
    }

    fn interrupt_and_drain(&mut self, phase: Option<TickPhase>) -> StackResult<()> {
        let mut queue = CommandQueue::new();
        self.interrupt_current(&mut queue, phase);
        self.drain(queue, phase)
    }
}
