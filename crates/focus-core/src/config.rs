//! Per-stack configuration.

use std::fmt;

use crate::{FocusError, FocusResult};

/// Name of the default (main) stack.
pub const DEFAULT_STACK_NAME: &str = "ActionStack";

/// Fixed-point iteration cap for a single tick.
///
/// Reaching it means an entry keeps re-arranging the stack from its own
/// callbacks (e.g. re-pushing itself in every `on_begin`).
pub const DEFAULT_MAX_ITERATIONS: u32 = 100;

/// Cap on the number of queued stack commands applied in one drain.
pub const DEFAULT_MAX_PENDING_COMMANDS: u32 = 1_024;

// ── Persistence ───────────────────────────────────────────────────────────────

/// Whether a registry-owned stack survives host scene transitions.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Persistence {
    /// Kept across scene loads until the registry is dropped.
    Persistent,
    /// Cleared and dropped when the host loads a new scene.
    #[default]
    SceneScoped,
}

impl fmt::Display for Persistence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Persistence::Persistent  => f.write_str("persistent"),
            Persistence::SceneScoped => f.write_str("scene-scoped"),
        }
    }
}

// ── StackConfig ───────────────────────────────────────────────────────────────

/// Configuration for one behavior stack.
///
/// Typically built in code via the `with_*` setters, or loaded from a
/// JSON/TOML file by the application crate with the `serde` feature.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct StackConfig {
    /// Diagnostic name, used in log lines and error messages.
    pub name: String,

    /// Maximum scheduler loop iterations per tick.  Default: 100.
    pub max_iterations: u32,

    /// Maximum commands applied by one command-queue drain.  Default: 1024.
    pub max_pending_commands: u32,

    /// Lifetime policy when the stack is owned by a registry.
    pub persistence: Persistence,
}

impl Default for StackConfig {
    fn default() -> Self {
        Self {
            name:                 DEFAULT_STACK_NAME.to_owned(),
            max_iterations:       DEFAULT_MAX_ITERATIONS,
            max_pending_commands: DEFAULT_MAX_PENDING_COMMANDS,
            persistence:          Persistence::default(),
        }
    }
}

impl StackConfig {
    /// Default configuration with the given diagnostic name.
    pub fn named(name: impl Into<String>) -> Self {
        Self { name: name.into(), ..Self::default() }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn with_max_pending_commands(mut self, max_pending_commands: u32) -> Self {
        self.max_pending_commands = max_pending_commands;
        self
    }

    pub fn with_persistence(mut self, persistence: Persistence) -> Self {
        self.persistence = persistence;
        self
    }

    /// Reject configurations the scheduler cannot run with.
    pub fn validate(&self) -> FocusResult<()> {
        if self.max_iterations == 0 {
            return Err(FocusError::Config(format!(
                "stack '{}': max_iterations must be at least 1",
                self.name
            )));
        }
        if self.max_pending_commands == 0 {
            return Err(FocusError::Config(format!(
                "stack '{}': max_pending_commands must be at least 1",
                self.name
            )));
        }
        Ok(())
    }
}
