//! `focus-host`: wiring behavior stacks into a host's frame loop.
//!
//! A game or UI host usually wants one well-known stack (the "main" stack)
//! plus a few named ones, created on demand and torn down when the host
//! changes scene.  [`StackRegistry`] owns those stacks as an explicit
//! context object; the host passes it wherever stacks are needed.
//!
//! ```text
//! host frame:
//!   registry.run_frame()
//!     ├─ tick(Update)      every stack, in name order
//!     ├─ tick(LateUpdate)  every stack, in name order
//!     └─ clock.advance()
//!
//! host scene change:
//!   registry.load_scene()  scene-scoped stacks are cleared and dropped
//! ```
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use focus_behavior::{EntryRef, Idle};
//! use focus_host::{HostState, StackRegistry};
//!
//! let mut registry = StackRegistry::new(HostState::running());
//! if let Some(main) = registry.main() {
//!     main.push(EntryRef::new(Idle))?;
//! }
//! registry.run_frame()?;
//! ```

pub mod host;
pub mod registry;


pub use host::{Host, HostState};
pub use registry::{FrameReport, StackRegistry};
