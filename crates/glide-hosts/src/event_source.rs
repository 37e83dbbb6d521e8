use std::fmt;
use std::rc::Rc;

use glide_core::listeners::{Listeners, Subscription};

/// Fan-out point for host events of type `E`.
///
/// The host dispatches raw events here; input adapters subscribe when the
/// engine connects them. Clones share the same listener set.
pub struct EventSource<E: 'static> {
    listeners: Listeners<dyn Fn(&E)>,
}

impl<E: 'static> EventSource<E> {
    pub fn new() -> Self {
        Self {
            listeners: Listeners::new(),
        }
    }

    pub fn subscribe(&self, listener: impl Fn(&E) + 'static) -> Subscription {
        self.listeners.add(Rc::new(listener))
    }

    /// Deliver `event` to every subscriber; returns how many saw it
    pub fn dispatch(&self, event: &E) -> usize {
        let listeners = self.listeners.snapshot();
        for listener in &listeners {
            listener(event);
        }
        listeners.len()
    }

    pub fn subscriber_count(&self) -> usize {
        self.listeners.len()
    }
}

impl<E: 'static> Default for EventSource<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: 'static> Clone for EventSource<E> {
    fn clone(&self) -> Self {
        Self {
            listeners: self.listeners.clone(),
        }
    }
}

impl<E: 'static> fmt::Debug for EventSource<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventSource")
            .field("subscribers", &self.listeners.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_dispatch_reaches_subscribers_until_unsubscribed() {
        let source: EventSource<u32> = EventSource::new();
        let total = Rc::new(Cell::new(0));
        let sink = Rc::clone(&total);
        let sub = source.subscribe(move |n| sink.set(sink.get() + n));

        assert_eq!(source.dispatch(&3), 1);
        assert_eq!(source.clone().dispatch(&4), 1);
        assert_eq!(total.get(), 7);

        sub.unsubscribe();
        assert_eq!(source.dispatch(&5), 0);
        assert_eq!(total.get(), 7);
        assert_eq!(source.subscriber_count(), 0);
    }
}
