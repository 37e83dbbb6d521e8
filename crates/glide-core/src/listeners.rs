//! Listener registries and unsubscribe tokens
//!
//! Every registration in the engine (signal listeners, driver user-scroll
//! listeners, input modules) hands back a [`Subscription`]. Dispatch always
//! iterates over a snapshot, so a listener may unsubscribe itself or register
//! new listeners while being notified.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

/// Token that removes a registration when [`Subscription::unsubscribe`] is called.
///
/// Dropping a subscription leaves the registration in place.
#[must_use = "dropping a Subscription leaves the listener registered"]
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    /// Create a subscription that runs `cancel` on unsubscribe
    pub fn new(cancel: impl FnOnce() + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    /// A subscription with nothing to undo
    pub fn noop() -> Self {
        Self { cancel: None }
    }

    /// Remove the registration
    pub fn unsubscribe(mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.cancel.is_some())
            .finish()
    }
}

struct Slots<T: ?Sized> {
    next_id: Cell<u64>,
    entries: RefCell<Vec<(u64, Rc<T>)>>,
}

/// Ordered set of callbacks of type `T` (usually a `dyn Fn(..)`).
///
/// Cloning shares the same registry.
pub struct Listeners<T: ?Sized> {
    slots: Rc<Slots<T>>,
}

impl<T: ?Sized + 'static> Listeners<T> {
    pub fn new() -> Self {
        Self {
            slots: Rc::new(Slots {
                next_id: Cell::new(0),
                entries: RefCell::new(Vec::new()),
            }),
        }
    }

    /// Register a listener, notified after every listener added before it
    pub fn add(&self, listener: Rc<T>) -> Subscription {
        let id = self.slots.next_id.get();
        self.slots.next_id.set(id + 1);
        self.slots.entries.borrow_mut().push((id, listener));

        let weak: Weak<Slots<T>> = Rc::downgrade(&self.slots);
        Subscription::new(move || {
            if let Some(slots) = weak.upgrade() {
                slots.entries.borrow_mut().retain(|(entry, _)| *entry != id);
            }
        })
    }

    /// Current listeners in registration order
    pub fn snapshot(&self) -> Vec<Rc<T>> {
        self.slots
            .entries
            .borrow()
            .iter()
            .map(|(_, listener)| Rc::clone(listener))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.slots.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T: ?Sized + 'static> Default for Listeners<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ?Sized> Clone for Listeners<T> {
    fn clone(&self) -> Self {
        Self {
            slots: Rc::clone(&self.slots),
        }
    }
}

impl<T: ?Sized> fmt::Debug for Listeners<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listeners")
            .field("len", &self.slots.entries.borrow().len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dispatch_in_registration_order() {
        let listeners: Listeners<dyn Fn(&mut Vec<u8>)> = Listeners::new();
        let _a = listeners.add(Rc::new(|out: &mut Vec<u8>| out.push(1)));
        let _b = listeners.add(Rc::new(|out: &mut Vec<u8>| out.push(2)));

        let mut out = Vec::new();
        for listener in listeners.snapshot() {
            listener(&mut out);
        }
        assert_eq!(out, vec![1, 2]);
    }

    #[test]
    fn test_unsubscribe_removes_only_its_listener() {
        let listeners: Listeners<dyn Fn()> = Listeners::new();
        let first = listeners.add(Rc::new(|| {}));
        let _second = listeners.add(Rc::new(|| {}));
        assert_eq!(listeners.len(), 2);

        first.unsubscribe();
        assert_eq!(listeners.len(), 1);
    }

    #[test]
    fn test_unsubscribe_after_registry_dropped() {
        let listeners: Listeners<dyn Fn()> = Listeners::new();
        let sub = listeners.add(Rc::new(|| {}));
        drop(listeners);
        sub.unsubscribe();
    }
}
