//! Shared and non-owning handles to stack entries.
//!
//! Entries are created and owned by application code.  The stack keeps an
//! [`EntryRef`] only while the entry is stacked; the initialization ledger
//! keeps a [`WeakEntry`] so it never extends an entry's lifetime.
//!
//! Identity is the address of the shared allocation.  Two handles are equal
//! iff they point at the same allocation, regardless of the entry's state.

use std::cell::{Ref, RefCell, RefMut};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::{Rc, Weak};

use focus_core::EntryId;

use crate::Behavior;

// ── EntryRef ──────────────────────────────────────────────────────────────────

/// A cloneable, identity-compared handle to a [`Behavior`].
///
/// Keep a typed `Rc<RefCell<T>>` alongside when you need to reach the
/// concrete type later, and convert with `EntryRef::from(rc.clone())`.
#[derive(Clone)]
pub struct EntryRef(Rc<RefCell<dyn Behavior>>);

impl EntryRef {
    /// Move `behavior` into a fresh shared allocation.
    pub fn new<B: Behavior>(behavior: B) -> Self {
        Self(Rc::new(RefCell::new(behavior)))
    }

    /// The identity of this entry.
    #[inline]
    pub fn id(&self) -> EntryId {
        EntryId(Rc::as_ptr(&self.0).cast::<()>() as usize)
    }

    /// The entry's diagnostic name.
    ///
    /// Returns `"<busy>"` if the entry is mutably borrowed at the moment,
    /// which only happens when asked from inside one of its own hooks.
    pub fn name(&self) -> String {
        match self.0.try_borrow() {
            Ok(behavior) => behavior.name().to_owned(),
            Err(_)       => "<busy>".to_owned(),
        }
    }

    /// # Panics
    ///
    /// Panics if the entry is mutably borrowed, which is the case for the
    /// entry whose hook is running.  Use [`try_is_done`][Self::try_is_done]
    /// or [`name`][Self::name] from inside hooks.
    #[inline]
    pub fn borrow(&self) -> Ref<'_, dyn Behavior> {
        self.0.borrow()
    }

    /// # Panics
    ///
    /// Panics if the entry is already borrowed.
    #[inline]
    pub fn borrow_mut(&self) -> RefMut<'_, dyn Behavior> {
        self.0.borrow_mut()
    }

    /// Shorthand for `self.borrow().is_done()`.
    ///
    /// # Panics
    ///
    /// Panics if the entry is mutably borrowed, i.e. when called on the
    /// entry whose own hook is running.
    #[inline]
    pub fn is_done(&self) -> bool {
        self.0.borrow().is_done()
    }

    /// Like [`is_done`][Self::is_done], but `None` while the entry is
    /// mutably borrowed instead of panicking.
    pub fn try_is_done(&self) -> Option<bool> {
        self.0.try_borrow().ok().map(|behavior| behavior.is_done())
    }

    pub fn downgrade(&self) -> WeakEntry {
        WeakEntry(Rc::downgrade(&self.0))
    }

    /// Number of strong handles, including this one.
    pub fn strong_count(&self) -> usize {
        Rc::strong_count(&self.0)
    }
}

impl<B: Behavior> From<Rc<RefCell<B>>> for EntryRef {
    fn from(rc: Rc<RefCell<B>>) -> Self {
        Self(rc)
    }
}

impl PartialEq for EntryRef {
    fn eq(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}

impl Eq for EntryRef {}

impl Hash for EntryRef {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id().hash(state);
    }
}

impl fmt::Debug for EntryRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntryRef")
            .field("name", &self.name())
            .field("id", &self.id().0)
            .finish()
    }
}

// ── WeakEntry ─────────────────────────────────────────────────────────────────

/// A non-owning handle to an entry.
///
/// While a `WeakEntry` exists the allocation's address cannot be reused, so
/// its [`id`][Self::id] stays unique even after the entry itself is dropped.
#[derive(Clone)]
pub struct WeakEntry(Weak<RefCell<dyn Behavior>>);

impl WeakEntry {
    #[inline]
    pub fn id(&self) -> EntryId {
        EntryId(Weak::as_ptr(&self.0).cast::<()>() as usize)
    }

    pub fn upgrade(&self) -> Option<EntryRef> {
        self.0.upgrade().map(EntryRef)
    }

    /// `false` once every strong handle has been dropped.
    #[inline]
    pub fn is_alive(&self) -> bool {
        self.0.strong_count() > 0
    }
}

impl fmt::Debug for WeakEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WeakEntry")
            .field("id", &self.id().0)
            .field("alive", &self.is_alive())
            .finish()
    }
}
