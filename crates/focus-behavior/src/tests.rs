//! Unit tests for focus-behavior.

use std::cell::RefCell;
use std::rc::Rc;

use focus_core::TickPhase;

use crate::{Behavior, CommandQueue, EntryRef, Idle, StackCommand, StackContext};

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Counts updates; done once `remaining` hits zero.
struct Countdown {
    remaining: u32,
}

impl Behavior for Countdown {
    fn on_update(&mut self, _ctx: &mut StackContext<'_>) {
        self.remaining = self.remaining.saturating_sub(1);
    }

    fn is_done(&self) -> bool {
        self.remaining == 0
    }
}

struct Named;

impl Behavior for Named {
    fn name(&self) -> &str {
        "custom"
    }

    fn is_done(&self) -> bool {
        true
    }
}

// ── Behavior trait ────────────────────────────────────────────────────────────

#[cfg(test)]
mod model_tests {
    use super::*;
    use crate::short_type_name;

    #[test]
    fn default_name_is_short_type_name() {
        assert_eq!(Idle.name(), "Idle");
        assert_eq!(Countdown { remaining: 1 }.name(), "Countdown");
    }

    #[test]
    fn name_can_be_overridden() {
        assert_eq!(EntryRef::new(Named).name(), "custom");
    }

    #[test]
    fn short_name_keeps_generics() {
        assert_eq!(short_type_name("a::b::Menu<x::Y>"), "Menu<x::Y>");
        assert_eq!(short_type_name("Plain"), "Plain");
        assert_eq!(short_type_name("core::option::Option<u8>"), "Option<u8>");
    }

    #[test]
    fn idle_never_finishes() {
        assert!(!Idle.is_done());
    }

    #[test]
    fn default_hooks_are_noops() {
        let mut queue = CommandQueue::new();
        let mut ctx = StackContext::new(&[], None, None, &mut queue);
        let mut idle = Idle;
        idle.on_initialize(&mut ctx);
        idle.on_begin(&mut ctx);
        idle.on_update(&mut ctx);
        idle.on_late_update(&mut ctx);
        idle.on_interrupt(&mut ctx);
        idle.on_finish(&mut ctx);
        assert!(queue.is_empty());
    }
}

// ── EntryRef / WeakEntry ──────────────────────────────────────────────────────

#[cfg(test)]
mod entry_tests {
    use super::*;

    #[test]
    fn equality_is_identity() {
        let a = EntryRef::new(Idle);
        let b = EntryRef::new(Idle);
        assert_eq!(a, a.clone());
        assert_ne!(a, b);
        assert_eq!(a.id(), a.clone().id());
    }

    #[test]
    fn typed_rc_converts_and_shares_state() {
        let typed = Rc::new(RefCell::new(Countdown { remaining: 2 }));
        let entry = EntryRef::from(typed.clone());
        assert!(!entry.is_done());

        typed.borrow_mut().remaining = 0;
        assert!(entry.is_done());
        assert_eq!(entry.strong_count(), 2);
    }

    #[test]
    fn weak_handle_does_not_keep_entry_alive() {
        let entry = EntryRef::new(Idle);
        let weak = entry.downgrade();
        assert!(weak.is_alive());
        assert_eq!(weak.id(), entry.id());
        assert_eq!(weak.upgrade(), Some(entry.clone()));

        drop(entry);
        assert!(!weak.is_alive());
        assert!(weak.upgrade().is_none());
    }

    #[test]
    fn name_while_borrowed_is_busy() {
        let entry = EntryRef::new(Idle);
        let _guard = entry.borrow_mut();
        assert_eq!(entry.name(), "<busy>");
    }

    #[test]
    fn try_is_done_reports_busy_as_none() {
        let entry = EntryRef::new(Countdown { remaining: 0 });
        assert_eq!(entry.try_is_done(), Some(true));

        let _guard = entry.borrow_mut();
        assert_eq!(entry.try_is_done(), None);
    }

    #[test]
    #[should_panic]
    fn is_done_while_borrowed_panics() {
        let entry = EntryRef::new(Idle);
        let _guard = entry.borrow_mut();
        entry.is_done();
    }
}

// ── StackContext ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod context_tests {
    use super::*;

    #[test]
    fn view_reflects_inputs() {
        let a = EntryRef::new(Idle);
        let b = EntryRef::new(Idle);
        let entries = vec![a.clone(), b.clone()];
        let mut queue = CommandQueue::new();
        let ctx = StackContext::new(&entries, Some(&a), Some(TickPhase::Update), &mut queue);

        assert_eq!(ctx.top(), Some(&a));
        assert_eq!(ctx.current(), Some(&a));
        assert_eq!(ctx.entries().len(), 2);
        assert!(ctx.contains(&b));
        assert_eq!(ctx.phase(), Some(TickPhase::Update));
    }

    #[test]
    fn mutations_are_queued_in_order() {
        let a = EntryRef::new(Idle);
        let mut queue = CommandQueue::new();
        {
            let mut ctx = StackContext::new(&[], None, None, &mut queue);
            ctx.push(a.clone());
            ctx.push_with(a.clone(), false);
            ctx.pop();
            ctx.pop_entry(&a);
            ctx.forget_initialization(&a);
            ctx.clear();
            assert_eq!(ctx.pending(), 6);
        }

        let drained: Vec<StackCommand> = std::iter::from_fn(|| queue.pop_front()).collect();
        assert_eq!(drained, vec![
            StackCommand::Push { entry: a.clone(), reinitialize: true },
            StackCommand::Push { entry: a.clone(), reinitialize: false },
            StackCommand::Pop,
            StackCommand::PopEntry(a.clone()),
            StackCommand::ForgetInitialization(a.clone()),
            StackCommand::Clear,
        ]);
    }
}
