use focus_core::{FocusError, TickPhase};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StackError {
    #[error("stack configuration error: {0}")]
    Config(#[from] FocusError),

    /// The scheduler loop kept restarting: some entry rearranges the stack
    /// from its own hooks on every activation.
    #[error("stack '{stack}' did not settle within {limit} iterations during {phase}")]
    IterationLimitExceeded {
        stack: String,
        phase: TickPhase,
        limit: u32,
    },

    #[error("stack '{stack}' applied more than {limit} queued commands in one drain")]
    CommandLimitExceeded {
        stack: String,
        limit: u32,
    },
}

pub type StackResult<T> = Result<T, StackError>;
