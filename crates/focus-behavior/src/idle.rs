//! A placeholder entry that never finishes.

use crate::Behavior;

/// A [`Behavior`] that does nothing and never reports completion.
///
/// Useful as the bottom layer of a stack (a "free roam" state that other
/// entries suspend) or as a stand-in in tests.
#[derive(Debug, Default, Clone, Copy)]
pub struct Idle;

impl Behavior for Idle {
    fn is_done(&self) -> bool {
        false
    }
}
