//! Frame and tick-phase model.
//!
//! # Design
//!
//! The host owns the main loop and calls into the framework twice per frame,
//! always in the same order:
//!
//! ```text
//! frame N:  Update  →  LateUpdate
//! frame N+1: Update  →  LateUpdate
//! ```
//!
//! `TickPhase` selects which of the two windows a tick belongs to.  `Frame`
//! is a plain counter advanced by `FrameClock` once both phases have run; it
//! exists for diagnostics and has no bearing on scheduling decisions.

use std::fmt;

// ── TickPhase ─────────────────────────────────────────────────────────────────

/// One of the two ordered per-frame callback windows.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TickPhase {
    /// The main per-frame window.  Completion (`is_done`) is only polled here.
    Update,
    /// The window that runs after every `Update` of the frame.
    LateUpdate,
}

impl TickPhase {
    /// Both phases in host call order.
    pub const ORDER: [TickPhase; 2] = [TickPhase::Update, TickPhase::LateUpdate];

    #[inline]
    pub fn is_late(self) -> bool {
        matches!(self, TickPhase::LateUpdate)
    }
}

impl fmt::Display for TickPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TickPhase::Update     => f.write_str("Update"),
            TickPhase::LateUpdate => f.write_str("LateUpdate"),
        }
    }
}

// ── Frame ─────────────────────────────────────────────────────────────────────

/// An absolute frame counter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Frame(pub u64);

impl Frame {
    pub const ZERO: Frame = Frame(0);

    /// Return the frame `n` steps after `self`.
    #[inline]
    pub fn offset(self, n: u64) -> Frame {
        Frame(self.0 + n)
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "F{}", self.0)
    }
}

// ── FrameClock ────────────────────────────────────────────────────────────────

/// Tracks the current frame and the phase most recently entered.
///
/// `FrameClock` is cheap to copy and holds no heap data.
#[derive(Copy, Clone, Debug, Default)]
pub struct FrameClock {
    /// The frame currently being processed.
    pub current_frame: Frame,
    /// The last phase entered during `current_frame`, if any.
    pub phase: Option<TickPhase>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record entry into `phase` for the current frame.
    #[inline]
    pub fn enter(&mut self, phase: TickPhase) {
        self.phase = Some(phase);
    }

    /// Close the current frame and move to the next one.
    #[inline]
    pub fn advance(&mut self) {
        self.current_frame = self.current_frame.offset(1);
        self.phase = None;
    }
}

impl fmt::Display for FrameClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.phase {
            Some(phase) => write!(f, "{} ({phase})", self.current_frame),
            None        => write!(f, "{}", self.current_frame),
        }
    }
}
