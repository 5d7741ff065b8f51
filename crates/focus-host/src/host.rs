//! The host's side of the contract.

/// What the registry needs to know about the application hosting it.
pub trait Host {
    /// `true` while the host is in its live execution window.  Stacks are
    /// only created lazily while this holds.
    fn is_running(&self) -> bool;
}

/// A minimal concrete host: a running flag toggled by the application.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct HostState {
    running: bool,
}

impl HostState {
    /// A host that has not started yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// A host that is already running.
    pub fn running() -> Self {
        Self { running: true }
    }

    pub fn start(&mut self) {
        self.running = true;
    }

    /// Stop the host, e.g. during application quit.
    pub fn stop(&mut self) {
        self.running = false;
    }
}

impl Host for HostState {
    fn is_running(&self) -> bool {
        self.running
    }
}
