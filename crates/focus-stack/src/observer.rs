//! Stack notifications for diagnostic observers.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use focus_behavior::EntryRef;
use focus_core::{EntryId, ObserverId};

// ── Event kinds ───────────────────────────────────────────────────────────────

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum StackEventKind {
    Pushed,
    Popped,
    Begun,
    Interrupted,
}

impl fmt::Display for StackEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            StackEventKind::Pushed      => "pushed",
            StackEventKind::Popped      => "popped",
            StackEventKind::Begun       => "begun",
            StackEventKind::Interrupted => "interrupted",
        };
        f.write_str(label)
    }
}

// ── Observer trait ────────────────────────────────────────────────────────────

/// Callbacks invoked by a [`BehaviorStack`][crate::BehaviorStack] whenever
/// an entry is pushed, popped, begun or interrupted.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.  Observers run after the entry hook
/// that caused the event, and may not mutate the stack.
///
/// # Example: count activations
///
/// ```rust,ignore
/// struct Activations(u32);
///
/// impl StackObserver for Activations {
///     fn on_begun(&mut self, _entry: &EntryRef) {
///         self.0 += 1;
///     }
/// }
/// ```
pub trait StackObserver {
    fn on_pushed(&mut self, _entry: &EntryRef) {}

    /// Called once per removal, after the entry's `on_finish`.
    fn on_popped(&mut self, _entry: &EntryRef) {}

    fn on_begun(&mut self, _entry: &EntryRef) {}

    fn on_interrupted(&mut self, _entry: &EntryRef) {}
}

/// A [`StackObserver`] that does nothing.
pub struct NoopObserver;

impl StackObserver for NoopObserver {}

/// Route `kind` to the matching observer method.
pub(crate) fn dispatch(observer: &mut dyn StackObserver, kind: StackEventKind, entry: &EntryRef) {
    match kind {
        StackEventKind::Pushed      => observer.on_pushed(entry),
        StackEventKind::Popped      => observer.on_popped(entry),
        StackEventKind::Begun       => observer.on_begun(entry),
        StackEventKind::Interrupted => observer.on_interrupted(entry),
    }
}

// ── LogObserver ───────────────────────────────────────────────────────────────

/// Writes one `log` line per stack event.
pub struct LogObserver {
    label: String,
    level: log::Level,
}

impl LogObserver {
    /// Log at `Info` under `label`.
    pub fn new(label: impl Into<String>) -> Self {
        Self { label: label.into(), level: log::Level::Info }
    }

    pub fn with_level(mut self, level: log::Level) -> Self {
        self.level = level;
        self
    }

    fn emit(&self, kind: StackEventKind, entry: &EntryRef) {
        log::log!(self.level, "[{}] {} {kind}", self.label, entry.name());
    }
}

impl StackObserver for LogObserver {
    fn on_pushed(&mut self, entry: &EntryRef) {
        self.emit(StackEventKind::Pushed, entry);
    }

    fn on_popped(&mut self, entry: &EntryRef) {
        self.emit(StackEventKind::Popped, entry);
    }

    fn on_begun(&mut self, entry: &EntryRef) {
        self.emit(StackEventKind::Begun, entry);
    }

    fn on_interrupted(&mut self, entry: &EntryRef) {
        self.emit(StackEventKind::Interrupted, entry);
    }
}

// ── TraceObserver ─────────────────────────────────────────────────────────────

/// One recorded stack event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TraceRecord {
    pub kind:  StackEventKind,
    pub entry: EntryId,
    pub name:  String,
}

impl fmt::Display for TraceRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind, self.name)
    }
}

/// Shared, cloneable buffer of [`TraceRecord`]s.
///
/// Keep one clone and hand another to a [`TraceObserver`]; the stack owns the
/// observer, the caller reads the log.
#[derive(Clone, Debug, Default)]
pub struct TraceLog(Rc<RefCell<Vec<TraceRecord>>>);

impl TraceLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<TraceRecord> {
        self.0.borrow().clone()
    }

    /// `"kind:name"` strings in event order.
    pub fn labels(&self) -> Vec<String> {
        self.0.borrow().iter().map(ToString::to_string).collect()
    }

    pub fn count(&self, kind: StackEventKind) -> usize {
        self.0.borrow().iter().filter(|r| r.kind == kind).count()
    }

    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    pub fn clear(&self) {
        self.0.borrow_mut().clear();
    }

    fn record(&self, kind: StackEventKind, entry: &EntryRef) {
        self.0.borrow_mut().push(TraceRecord {
            kind,
            entry: entry.id(),
            name:  entry.name(),
        });
    }
}

/// A [`StackObserver`] that appends every event to a [`TraceLog`].
pub struct TraceObserver {
    log: TraceLog,
}

impl TraceObserver {
    pub fn new(log: TraceLog) -> Self {
        Self { log }
    }
}

impl StackObserver for TraceObserver {
    fn on_pushed(&mut self, entry: &EntryRef) {
        self.log.record(StackEventKind::Pushed, entry);
    }

    fn on_popped(&mut self, entry: &EntryRef) {
        self.log.record(StackEventKind::Popped, entry);
    }

    fn on_begun(&mut self, entry: &EntryRef) {
        self.log.record(StackEventKind::Begun, entry);
    }

    fn on_interrupted(&mut self, entry: &EntryRef) {
        self.log.record(StackEventKind::Interrupted, entry);
    }
}

// ── ObserverSet ───────────────────────────────────────────────────────────────

/// Subscribed observers, notified in subscription order.
pub(crate) struct ObserverSet {
    observers: Vec<(ObserverId, Box<dyn StackObserver>)>,
    next_id:   ObserverId,
}

impl ObserverSet {
    pub(crate) fn new() -> Self {
        Self { observers: Vec::new(), next_id: ObserverId(0) }
    }

    pub(crate) fn subscribe(&mut self, observer: Box<dyn StackObserver>) -> ObserverId {
        let id = self.next_id;
        self.next_id = id.next();
        self.observers.push((id, observer));
        id
    }

    pub(crate) fn unsubscribe(&mut self, id: ObserverId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(existing, _)| *existing != id);
        self.observers.len() != before
    }

    pub(crate) fn notify(&mut self, kind: StackEventKind, entry: &EntryRef) {
        for (_, observer) in &mut self.observers {
            dispatch(observer.as_mut(), kind, entry);
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.observers.len()
    }
}
