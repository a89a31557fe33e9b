//! Synchronous publish/subscribe list used for parameter change notification.
//!
//! Subscribers fire in subscription order, synchronously, on the calling
//! thread. The subscriber list is snapshotted before each emit, so a
//! subscriber may unsubscribe itself (or others) while being notified; the
//! change takes effect from the next emit.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

/// Handle returned by [`Notifier::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Slot<T> = Rc<dyn Fn(&T)>;

/// An ordered list of callbacks for one kind of change.
pub struct Notifier<T: ?Sized> {
    next_id: Cell<u64>,
    slots: RefCell<Vec<(SubscriptionId, Slot<T>)>>,
    blocked: Cell<bool>,
}

impl<T: ?Sized> Default for Notifier<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ?Sized> Notifier<T> {
    pub fn new() -> Self {
        Self {
            next_id: Cell::new(0),
            slots: RefCell::new(Vec::new()),
            blocked: Cell::new(false),
        }
    }

    /// Append a subscriber. It fires after every subscriber added before it.
    pub fn subscribe<F>(&self, slot: F) -> SubscriptionId
    where
        F: Fn(&T) + 'static,
    {
        let id = SubscriptionId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.slots.borrow_mut().push((id, Rc::new(slot)));
        id
    }

    /// Remove a subscriber. Returns `false` if it was already gone.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut slots = self.slots.borrow_mut();
        let before = slots.len();
        slots.retain(|(slot_id, _)| *slot_id != id);
        slots.len() != before
    }

    pub fn clear(&self) {
        self.slots.borrow_mut().clear();
    }

    pub fn len(&self) -> usize {
        self.slots.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.borrow().is_empty()
    }

    /// While blocked, [`emit`](Self::emit) does nothing.
    pub fn set_blocked(&self, blocked: bool) {
        self.blocked.set(blocked);
    }

    pub fn is_blocked(&self) -> bool {
        self.blocked.get()
    }

    /// Invoke every subscriber with `args`, in subscription order.
    pub fn emit(&self, args: &T) {
        if self.blocked.get() {
            return;
        }
        let snapshot: Vec<Slot<T>> = self
            .slots
            .borrow()
            .iter()
            .map(|(_, slot)| Rc::clone(slot))
            .collect();
        for slot in snapshot {
            slot(args);
        }
    }
}

impl<T: ?Sized> fmt::Debug for Notifier<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Notifier")
            .field("subscribers", &self.len())
            .field("blocked", &self.blocked.get())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emit_in_subscription_order() {
        let notifier = Notifier::<i32>::new();
        let log = Rc::new(RefCell::new(Vec::new()));

        let l1 = log.clone();
        notifier.subscribe(move |v| l1.borrow_mut().push(format!("first:{}", v)));
        let l2 = log.clone();
        notifier.subscribe(move |v| l2.borrow_mut().push(format!("second:{}", v)));

        notifier.emit(&7);
        assert_eq!(*log.borrow(), vec!["first:7", "second:7"]);
    }

    #[test]
    fn test_unsubscribe() {
        let notifier = Notifier::<()>::new();
        let count = Rc::new(Cell::new(0));

        let c = count.clone();
        let id = notifier.subscribe(move |_| c.set(c.get() + 1));
        notifier.emit(&());
        assert!(notifier.unsubscribe(id));
        assert!(!notifier.unsubscribe(id));
        notifier.emit(&());

        assert_eq!(count.get(), 1);
        assert!(notifier.is_empty());
    }

    #[test]
    fn test_blocked_emit_is_silent() {
        let notifier = Notifier::<()>::new();
        let count = Rc::new(Cell::new(0));
        let c = count.clone();
        notifier.subscribe(move |_| c.set(c.get() + 1));

        notifier.set_blocked(true);
        notifier.emit(&());
        notifier.set_blocked(false);
        notifier.emit(&());

        assert_eq!(count.get(), 1);
    }

    #[test]
    fn test_unsubscribe_during_emit() {
        let notifier = Rc::new(Notifier::<()>::new());
        let count = Rc::new(Cell::new(0));

        let own_id: Rc<Cell<Option<SubscriptionId>>> = Rc::new(Cell::new(None));
        let n = Rc::downgrade(&notifier);
        let id_cell = own_id.clone();
        let c = count.clone();
        let id = notifier.subscribe(move |_| {
            c.set(c.get() + 1);
            if let (Some(n), Some(id)) = (n.upgrade(), id_cell.get()) {
                n.unsubscribe(id);
            }
        });
        own_id.set(Some(id));

        notifier.emit(&());
        notifier.emit(&());
        assert_eq!(count.get(), 1);
    }
}
