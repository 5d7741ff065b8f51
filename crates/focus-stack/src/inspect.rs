//! Read-only snapshots of a stack for debug overlays and inspectors.

use std::fmt;

use focus_behavior::EntryRef;
use focus_core::EntryId;

/// Where an entry sits relative to the scheduler's focus.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum EntryStatus {
    /// Current entry; receives ticks.
    Active,
    /// On top but not yet begun (activates on the next tick).
    Pending,
    /// Buried below the top; receives nothing until promoted again.
    Paused,
}

impl fmt::Display for EntryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryStatus::Active  => f.write_str("ACTIVE"),
            EntryStatus::Pending => f.write_str("PENDING"),
            EntryStatus::Paused  => f.write_str("PAUSED"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EntrySummary {
    pub index:  usize,
    pub id:     EntryId,
    pub name:   String,
    pub status: EntryStatus,
}

/// Ordered view of a stack at one instant, top first.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StackSnapshot {
    pub stack:   String,
    pub entries: Vec<EntrySummary>,
}

impl StackSnapshot {
    pub fn capture(stack: &str, entries: &[EntryRef], current: Option<&EntryRef>) -> Self {
        let entries = entries
            .iter()
            .enumerate()
            .map(|(index, entry)| {
                let status = if current == Some(entry) {
                    EntryStatus::Active
                } else if index == 0 {
                    EntryStatus::Pending
                } else {
                    EntryStatus::Paused
                };
                EntrySummary { index, id: entry.id(), name: entry.name(), status }
            })
            .collect();
        Self { stack: stack.to_owned(), entries }
    }

    /// The summary of the current entry, if one is active.
    pub fn active(&self) -> Option<&EntrySummary> {
        self.entries.iter().find(|e| e.status == EntryStatus::Active)
    }

    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Display for StackSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.entries.is_empty() {
            return write!(f, "{}: empty", self.stack);
        }
        writeln!(f, "{} ({} entries)", self.stack, self.entries.len())?;
        for (i, entry) in self.entries.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "  [{}] {}: {}", entry.status, entry.index, entry.name)?;
        }
        Ok(())
    }
}
