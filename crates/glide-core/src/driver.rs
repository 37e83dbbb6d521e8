//! Host position access
//!
//! A [`Driver`] is the engine's read/write channel to the host's copy of the
//! scroll position (a terminal viewport, a virtual list, a carousel).

use std::cell::Cell;

use crate::domain::Domain;
use crate::listeners::Subscription;

/// Callback for positions the host changed on its own
pub type UserScrollListener = Box<dyn Fn(f64)>;

pub trait Driver {
    /// Current host position
    fn read(&self) -> f64;

    /// Move the host to `position` without animation.
    ///
    /// Implementations must not report this write back through
    /// `on_user_scroll`; see [`WriteEchoGuard`].
    fn write(&mut self, position: f64);

    /// Span of motion, used when no explicit domain is reported
    fn limit(&self) -> f64;

    /// Explicit domain descriptor, if the host has one
    fn domain(&self) -> Option<Domain> {
        None
    }

    /// Register for externally caused position changes
    fn on_user_scroll(&mut self, listener: UserScrollListener) -> Subscription;
}

/// Domain for this tick: the driver's explicit descriptor, else bounded by
/// its limit
pub fn resolve_domain(driver: &dyn Driver) -> Domain {
    driver
        .domain()
        .unwrap_or_else(|| Domain::from_limit(driver.limit()))
}

/// "Ignore next event" handshake for drivers whose host echoes programmatic
/// writes back as scroll events.
///
/// Call [`mark_write`](Self::mark_write) on every write and
/// [`should_dispatch`](Self::should_dispatch) on every host scroll event; the
/// first event after a write is swallowed.
#[derive(Debug, Default)]
pub struct WriteEchoGuard {
    ignore_next: Cell<bool>,
}

impl WriteEchoGuard {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn mark_write(&self) {
        self.ignore_next.set(true);
    }

    /// `true` when the event came from the user, `false` for a write echo
    pub fn should_dispatch(&self) -> bool {
        !self.ignore_next.replace(false)
    }

    #[inline]
    pub fn is_armed(&self) -> bool {
        self.ignore_next.get()
    }
}
