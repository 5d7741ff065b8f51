//! `focus-stack`: the behavior stack and its two-phase scheduler.
//!
//! # Model
//!
//! A [`BehaviorStack`] is an ordered list of entries (index 0 = top).  Only
//! the top entry is live: it gets `on_update` during the host's Update tick
//! and `on_late_update` during LateUpdate.  Everything below it is paused,
//! not ticked.  Pushing a dialog over gameplay interrupts gameplay; when the
//! dialog reports `is_done()` it is popped and gameplay resumes with a fresh
//! `on_begin`, within the same tick.
//!
//! ```text
//! host frame:  tick(Update)  →  tick(LateUpdate)
//!
//! stack:   [0] PauseMenu   ← current, ticked
//!          [1] Gameplay    ← paused
//! ```
//!
//! # Crate layout
//!
//! | Module        | Contents                                                   |
//! |---------------|------------------------------------------------------------|
//! | [`stack`]     | `BehaviorStack`, push / pop / clear, `PushOutcome`         |
//! | [`scheduler`] | `TickTarget`, `TickReport`, the fixed-point tick loop      |
//! | [`ledger`]    | `InitLedger`, non-owning record of initialized entries     |
//! | [`observer`]  | `StackObserver`, `LogObserver`, `TraceObserver`            |
//! | [`inspect`]   | `StackSnapshot` for debug overlays                         |
//! | [`builder`]   | `StackBuilder`                                             |
//! | [`error`]     | `StackError`, `StackResult<T>`                             |
//!
//! # Cargo features
//!
//! | Feature   | Effect                                              |
//! |-----------|-----------------------------------------------------|
//! | `fx-hash` | Uses FxHash for the initialization ledger.          |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use focus_behavior::{EntryRef, Idle};
//! use focus_stack::{StackBuilder, TickTarget};
//!
//! let mut stack = StackBuilder::named("main").build()?;
//! stack.push(EntryRef::new(Idle))?;
//! stack.update()?;
//! stack.late_update()?;
//! ```

pub mod builder;
pub mod error;
pub mod inspect;
pub mod ledger;
pub mod observer;
pub mod scheduler;
pub mod stack;


pub use builder::StackBuilder;
pub use error::{StackError, StackResult};
pub use inspect::{EntryStatus, EntrySummary, StackSnapshot};
pub use ledger::InitLedger;
pub use observer::{
    LogObserver, NoopObserver, StackEventKind, StackObserver, TraceLog, TraceObserver, TraceRecord,
};
pub use scheduler::{TickReport, TickTarget};
pub use stack::{BehaviorStack, PushOutcome, StackStats};
