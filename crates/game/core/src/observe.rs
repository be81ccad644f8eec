//! Field-level change notification for observable domain objects.
//!
//! Every mutable domain object owns a [`ChangeNotifier`] parameterised by its
//! own closed field enumeration. Setters publish the field that changed; the
//! listener decides whether that field matters to it.
//!
//! Delivery is synchronous and single-threaded. Listeners run against a
//! snapshot of the registry taken when [`ChangeNotifier::notify`] starts, and
//! no interior borrow is held while they run, so a listener may read the
//! source, subscribe, or unsubscribe without re-entrancy panics.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

/// Handle identifying one listener registration on one notifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ListenerId(u64);

impl fmt::Display for ListenerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "listener-{}", self.0)
    }
}

type Listener<F> = Rc<dyn Fn(F)>;

/// Registry of listeners interested in changes of type `F`.
pub struct ChangeNotifier<F> {
    listeners: RefCell<Vec<(ListenerId, Listener<F>)>>,
    next_id: Cell<u64>,
}

impl<F> ChangeNotifier<F>
where
    F: Copy + fmt::Debug,
{
    pub fn new() -> Self {
        Self {
            listeners: RefCell::new(Vec::new()),
            next_id: Cell::new(0),
        }
    }

    /// Registers `listener` and returns the handle needed to remove it.
    pub fn subscribe(&self, listener: impl Fn(F) + 'static) -> ListenerId {
        let id = ListenerId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.listeners.borrow_mut().push((id, Rc::new(listener)));
        id
    }

    /// Removes the listener registered under `id`.
    ///
    /// Returns `false` when no such listener exists, which makes repeated
    /// removal harmless.
    pub fn unsubscribe(&self, id: ListenerId) -> bool {
        let mut listeners = self.listeners.borrow_mut();
        let before = listeners.len();
        listeners.retain(|(registered, _)| *registered != id);
        listeners.len() != before
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }

    /// Delivers `field` to every listener registered at call time.
    pub fn notify(&self, field: F) {
        let snapshot: Vec<Listener<F>> = self
            .listeners
            .borrow()
            .iter()
            .map(|(_, listener)| Rc::clone(listener))
            .collect();

        if snapshot.is_empty() {
            tracing::trace!("No listeners for {:?}", field);
            return;
        }

        for listener in snapshot {
            listener(field);
        }
    }
}

impl<F> Default for ChangeNotifier<F>
where
    F: Copy + fmt::Debug,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<F> fmt::Debug for ChangeNotifier<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChangeNotifier")
            .field("listeners", &self.listeners.borrow().len())
            .finish()
    }
}

/// An object that publishes field-level change notifications.
pub trait Observable {
    /// Closed enumeration of the fields this object reports on.
    type Field: Copy + fmt::Debug + 'static;

    fn changes(&self) -> &ChangeNotifier<Self::Field>;

    fn subscribe(&self, listener: impl Fn(Self::Field) + 'static) -> ListenerId
    where
        Self: Sized,
    {
        self.changes().subscribe(listener)
    }

    fn unsubscribe(&self, id: ListenerId) -> bool {
        self.changes().unsubscribe(id)
    }
}

/// Type-erased removal of a listener, usable behind `dyn`.
pub trait Detach {
    fn detach(&self, id: ListenerId) -> bool;
}

impl<T: Observable> Detach for T {
    fn detach(&self, id: ListenerId) -> bool {
        self.unsubscribe(id)
    }
}

/// Stores `value` in `cell` and reports whether it differed from the old one.
pub(crate) fn replace_if_changed<T: Copy + PartialEq>(cell: &Cell<T>, value: T) -> bool {
    if cell.get() == value {
        return false;
    }
    cell.set(value);
    true
}
