//! Input modules
//!
//! An input module turns host events into signed deltas. It is connected
//! once, when the engine initializes, and may emit any number of deltas
//! afterwards from host event handling.

use std::fmt;
use std::rc::Rc;

use crate::listeners::Subscription;

/// Sink for impulses, handed to an input module on connect
#[derive(Clone)]
pub struct Emitter {
    sink: Rc<dyn Fn(f64)>,
}

impl Emitter {
    pub fn new(sink: impl Fn(f64) + 'static) -> Self {
        Self {
            sink: Rc::new(sink),
        }
    }

    /// Feed one delta into the engine
    #[inline]
    pub fn emit(&self, delta: f64) {
        (self.sink)(delta);
    }
}

impl fmt::Debug for Emitter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Emitter").finish_non_exhaustive()
    }
}

pub trait InputModule {
    /// Start delivering deltas to `emitter` until the returned subscription
    /// is cancelled
    fn connect(self: Box<Self>, emitter: Emitter) -> Subscription;
}

impl<F> InputModule for F
where
    F: FnOnce(Emitter) -> Subscription,
{
    fn connect(self: Box<Self>, emitter: Emitter) -> Subscription {
        (*self)(emitter)
    }
}
