//! `focus-behavior`: the behavior contract and the handles the stack uses.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                         |
//! |-------------|------------------------------------------------------------------|
//! | [`model`]   | `Behavior` trait, the lifecycle every stack entry implements     |
//! | [`entry`]   | `EntryRef` (shared handle), `WeakEntry` (non-owning handle)      |
//! | [`command`] | `StackCommand` enum and the FIFO `CommandQueue`                  |
//! | [`context`] | `StackContext<'a>`, the view + mutation API handed to every hook |
//! | [`idle`]    | `Idle`, a placeholder entry that never finishes                  |
//!
//! # Design notes
//!
//! Hooks may rearrange the stack that is driving them (push a dialog from
//! `on_update`, pop themselves from `on_begin`, …).  Rather than re-entering
//! the stack while one of its entries is mutably borrowed, hooks record
//! [`StackCommand`]s through their [`StackContext`].  The stack applies the
//! queue as soon as the hook returns and then re-reads its top, so the
//! effect is visible within the same tick.

pub mod command;
pub mod context;
pub mod entry;
pub mod idle;
pub mod model;

#[cfg(test)]
mod tests;

pub use command::{CommandQueue, StackCommand};
pub use context::StackContext;
pub use entry::{EntryRef, WeakEntry};
pub use idle::Idle;
pub use model::{short_type_name, Behavior};
