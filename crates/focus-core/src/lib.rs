//! `focus-core`: foundational types for the `focus` behavior-stack framework.
//!
//! This crate is a dependency of every other `focus-*` crate.  It has no
//! `focus-*` dependencies and minimal external ones (only `thiserror`, plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module      | Contents                                                  |
//! |-------------|-----------------------------------------------------------|
//! | [`ids`]     | `EntryId`, `ObserverId`                                   |
//! | [`phase`]   | `TickPhase`, `Frame`, `FrameClock`                        |
//! | [`config`]  | `StackConfig`, `Persistence`                              |
//! | [`error`]   | `FocusError`, `FocusResult`                               |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to config and phase types.  |

pub mod config;
pub mod error;
pub mod ids;
pub mod phase;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{
    Persistence, StackConfig, DEFAULT_MAX_ITERATIONS, DEFAULT_MAX_PENDING_COMMANDS, DEFAULT_STACK_NAME,
};
pub use error::{FocusError, FocusResult};
pub use ids::{EntryId, ObserverId};
pub use phase::{Frame, FrameClock, TickPhase};
