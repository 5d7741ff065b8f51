//! The `Behavior` trait: the main extension point for user code.

use crate::StackContext;

/// A schedulable unit with an initialize / begin / update / finish lifecycle.
///
/// Every hook except [`is_done`][Self::is_done] has an empty default body,
/// so simple entries only implement what they need.  Hooks are invoked by
/// the stack alone; the call order guarantees are:
///
/// - `on_initialize` runs once per initialization-ledger membership, right
///   before the first `on_begin` after the entry was first tracked (or after
///   a re-initialize request).
/// - `on_begin` runs on every not-current → current transition, including
///   resumption after an interrupt.
/// - `on_interrupt` runs when the entry is current and gets displaced
///   without finishing.  It must leave the entry resumable.
/// - `on_update` / `on_late_update` run once per matching tick phase while
///   the entry is current.
/// - `is_done` is polled only right after `on_update`.
/// - `on_finish` runs exactly once per removal, whether the entry completed
///   on its own or was popped.
///
/// Panics raised inside a hook are not caught by the stack.
///
/// # Example
///
/// ```rust,ignore
/// struct Countdown { left: u32 }
///
/// impl Behavior for Countdown {
///     fn on_update(&mut self, _ctx: &mut StackContext<'_>) {
///         self.left = self.left.saturating_sub(1);
///     }
///     fn is_done(&self) -> bool { self.left == 0 }
/// }
/// ```
pub trait Behavior: 'static {
    /// Diagnostic name shown in logs and snapshots.
    ///
    /// Default: the implementing type's name without its module path.
    fn name(&self) -> &str {
        short_type_name(std::any::type_name::<Self>())
    }

    fn on_initialize(&mut self, _ctx: &mut StackContext<'_>) {}

    fn on_begin(&mut self, _ctx: &mut StackContext<'_>) {}

    fn on_interrupt(&mut self, _ctx: &mut StackContext<'_>) {}

    fn on_finish(&mut self, _ctx: &mut StackContext<'_>) {}

    fn on_update(&mut self, _ctx: &mut StackContext<'_>) {}

    fn on_late_update(&mut self, _ctx: &mut StackContext<'_>) {}

    /// Whether the entry has completed.  Must not have side effects.
    fn is_done(&self) -> bool;
}

/// Strip the module path from a `std::any::type_name` string, keeping any
/// generic arguments intact (`a::b::Menu<x::Y>` → `Menu<x::Y>`).
pub fn short_type_name(full: &'static str) -> &'static str {
    let base_end = full.find('<').unwrap_or(full.len());
    match full[..base_end].rfind("::") {
        Some(idx) => &full[idx + 2..],
        None      => full,
    }
}
