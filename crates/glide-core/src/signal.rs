//! Observable scroll position
//!
//! Holds the last committed position and the origin of the change. Changes
//! smaller than the epsilon are swallowed, which is what breaks the feedback
//! loop between driver writes and driver-reported user scrolls.

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::listeners::{Listeners, Subscription};

/// Minimum position change that counts as a change
pub const DEFAULT_EPSILON: f64 = 0.01;

/// What caused a position change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Origin {
    /// Reported by the host (the user moved the viewport)
    User,
    /// Requested through `scroll_to`
    #[default]
    Program,
    /// Produced by impulse integration in the frame loop
    Momentum,
}

type SignalListener = dyn Fn(f64, Origin);

pub struct ScrollSignal {
    value: Cell<f64>,
    origin: Cell<Origin>,
    epsilon: f64,
    listeners: Listeners<SignalListener>,
}

impl ScrollSignal {
    pub fn new(epsilon: f64) -> Self {
        Self {
            value: Cell::new(0.0),
            origin: Cell::new(Origin::default()),
            epsilon,
            listeners: Listeners::new(),
        }
    }

    #[inline]
    pub fn value(&self) -> f64 {
        self.value.get()
    }

    /// Origin of the last accepted change
    #[inline]
    pub fn origin(&self) -> Origin {
        self.origin.get()
    }

    pub fn on(&self, listener: impl Fn(f64, Origin) + 'static) -> Subscription {
        self.listeners.add(Rc::new(listener))
    }

    /// Commit a new value and notify listeners.
    ///
    /// Returns `false` without notifying when the change is below epsilon.
    pub fn set(&self, value: f64, origin: Origin) -> bool {
        if (value - self.value.get()).abs() < self.epsilon {
            return false;
        }
        self.value.set(value);
        self.origin.set(origin);
        for listener in self.listeners.snapshot() {
            listener(value, origin);
        }
        true
    }
}

impl Default for ScrollSignal {
    fn default() -> Self {
        Self::new(DEFAULT_EPSILON)
    }
}

impl fmt::Debug for ScrollSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScrollSignal")
            .field("value", &self.value.get())
            .field("origin", &self.origin.get())
            .field("epsilon", &self.epsilon)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
