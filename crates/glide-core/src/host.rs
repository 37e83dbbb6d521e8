//! In-memory host: a virtual viewport and a caller-driven frame clock
//!
//! These back headless runs (simulations, virtual lists, tests) where there
//! is no real viewport or display refresh. Both types are cheap handles:
//! clone one, hand the clone to the engine and keep the other to play the
//! host's part.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use crate::domain::Domain;
use crate::driver::{Driver, UserScrollListener, WriteEchoGuard};
use crate::listeners::{Listeners, Subscription};
use crate::scheduler::{FrameCallback, FrameHandle, Scheduler};

struct ViewportState {
    position: Cell<f64>,
    limit: Cell<f64>,
    domain: Cell<Option<Domain>>,
    writes: RefCell<Vec<f64>>,
    echo_writes: Cell<bool>,
    echo: WriteEchoGuard,
    listeners: Listeners<dyn Fn(f64)>,
}

/// Viewport position kept in memory
#[derive(Clone)]
pub struct VirtualDriver {
    state: Rc<ViewportState>,
}

impl VirtualDriver {
    /// Bounded viewport spanning `[0, limit]`
    pub fn new(limit: f64) -> Self {
        Self::build(limit, None)
    }

    /// Viewport reporting an explicit domain
    pub fn with_domain(domain: Domain) -> Self {
        Self::build(domain.limit().unwrap_or(0.0), Some(domain))
    }

    /// Model a host that reports every write back as a scroll event, as a
    /// browser viewport does. Echoes are delivered by [`scroll_event`] and
    /// the first one after a write is swallowed.
    /// Clones share the switch, so existing handles and listeners see it too.
    ///
    /// [`scroll_event`]: Self::scroll_event
    pub fn echoing(self) -> Self {
        self.state.echo_writes.set(true);
        self
    }

    fn build(limit: f64, domain: Option<Domain>) -> Self {
        Self {
            state: Rc::new(ViewportState {
                position: Cell::new(0.0),
                limit: Cell::new(limit),
                domain: Cell::new(domain),
                writes: RefCell::new(Vec::new()),
                echo_writes: Cell::new(false),
                echo: WriteEchoGuard::new(),
                listeners: Listeners::new(),
            }),
        }
    }

    pub fn set_limit(&self, limit: f64) {
        self.state.limit.set(limit);
    }

    pub fn set_domain(&self, domain: Option<Domain>) {
        self.state.domain.set(domain);
    }

    #[inline]
    pub fn position(&self) -> f64 {
        self.state.position.get()
    }

    /// Every position written by the engine, oldest first
    pub fn writes(&self) -> Vec<f64> {
        self.state.writes.borrow().clone()
    }

    pub fn write_count(&self) -> usize {
        self.state.writes.borrow().len()
    }

    pub fn clear_writes(&self) {
        self.state.writes.borrow_mut().clear();
    }

    /// The user moved the viewport to `position`
    pub fn user_scroll(&self, position: f64) -> bool {
        self.state.position.set(position);
        self.scroll_event()
    }

    /// The host fired a scroll event for the current position.
    ///
    /// Returns `false` when the event was swallowed as a write echo.
    pub fn scroll_event(&self) -> bool {
        if !self.state.echo.should_dispatch() {
            return false;
        }
        let position = self.state.position.get();
        for listener in self.state.listeners.snapshot() {
            listener(position);
        }
        true
    }
}

impl Driver for VirtualDriver {
    fn read(&self) -> f64 {
        self.state.position.get()
    }

    fn write(&mut self, position: f64) {
        if self.state.echo_writes.get() {
            self.state.echo.mark_write();
        }
        self.state.position.set(position);
        self.state.writes.borrow_mut().push(position);
    }

    fn limit(&self) -> f64 {
        self.state.limit.get()
    }

    fn domain(&self) -> Option<Domain> {
        self.state.domain.get()
    }

    fn on_user_scroll(&mut self, listener: UserScrollListener) -> Subscription {
        self.state.listeners.add(Rc::from(listener))
    }
}

impl fmt::Debug for VirtualDriver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VirtualDriver")
            .field("position", &self.state.position.get())
            .field("limit", &self.state.limit.get())
            .field("domain", &self.state.domain.get())
            .field("writes", &self.state.writes.borrow().len())
            .finish()
    }
}

#[derive(Default)]
struct ClockState {
    pending: RefCell<Option<FrameCallback>>,
    next_handle: Cell<u64>,
    now: Cell<f64>,
    frames: Cell<u64>,
}

/// Frame clock advanced explicitly by the caller
#[derive(Clone, Default)]
pub struct ManualScheduler {
    state: Rc<ClockState>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if a tick is waiting to fire
    #[inline]
    pub fn is_pending(&self) -> bool {
        self.state.pending.borrow().is_some()
    }

    /// Timestamp of the last fired tick (ms)
    #[inline]
    pub fn now(&self) -> f64 {
        self.state.now.get()
    }

    /// Number of ticks fired so far
    #[inline]
    pub fn frames(&self) -> u64 {
        self.state.frames.get()
    }

    /// Fire the pending tick with timestamp `now`.
    ///
    /// Returns `false` when nothing was pending.
    pub fn fire(&self, now: f64) -> bool {
        self.state.now.set(now);
        // released before the call: the callback schedules the next tick
        let callback = self.state.pending.borrow_mut().take();
        match callback {
            Some(callback) => {
                self.state.frames.set(self.state.frames.get() + 1);
                callback(now);
                true
            }
            None => false,
        }
    }

    /// Fire the pending tick `dt` ms after the previous one
    pub fn advance(&self, dt: f64) -> bool {
        self.fire(self.now() + dt)
    }

    /// Keep firing ticks `dt` apart until nothing is scheduled or
    /// `max_frames` ticks have fired; returns the number fired
    pub fn run_until_idle(&self, dt: f64, max_frames: usize) -> usize {
        let mut fired = 0;
        while fired < max_frames && self.advance(dt) {
            fired += 1;
        }
        fired
    }
}

impl Scheduler for ManualScheduler {
    fn start(&mut self, callback: FrameCallback) -> FrameHandle {
        let handle = self.state.next_handle.get();
        self.state.next_handle.set(handle + 1);
        *self.state.pending.borrow_mut() = Some(callback);
        FrameHandle(handle)
    }

    fn stop(&mut self) {
        self.state.pending.borrow_mut().take();
    }
}

impl fmt::Debug for ManualScheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ManualScheduler")
            .field("pending", &self.is_pending())
            .field("now", &self.now())
            .field("frames", &self.frames())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_driver_records_writes() {
        let mut driver = VirtualDriver::new(100.0);
        driver.write(10.0);
        driver.write(20.0);
        assert_eq!(driver.read(), 20.0);
        assert_eq!(driver.writes(), vec![10.0, 20.0]);
        assert_eq!(driver.domain(), None);
        assert_eq!(driver.limit(), 100.0);
    }

    #[test]
    fn test_user_scroll_reaches_listener() {
        let mut driver = VirtualDriver::new(100.0);
        let seen = Rc::new(Cell::new(0.0));
        let sink = Rc::clone(&seen);
        let sub = driver.on_user_scroll(Box::new(move |p| sink.set(p)));

        assert!(driver.user_scroll(42.0));
        assert_eq!(seen.get(), 42.0);

        sub.unsubscribe();
        driver.user_scroll(7.0);
        assert_eq!(seen.get(), 42.0);
    }

    #[test]
    fn test_echoing_driver_swallows_write_echo() {
        let mut driver = VirtualDriver::new(100.0).echoing();
        let count = Rc::new(Cell::new(0));
        let counter = Rc::clone(&count);
        let _sub = driver.on_user_scroll(Box::new(move |_| counter.set(counter.get() + 1)));

        driver.write(30.0);
        assert!(!driver.scroll_event());
        assert_eq!(count.get(), 0);

        assert!(driver.user_scroll(35.0));
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn test_echoing_keeps_earlier_clones_and_listeners() {
        let driver = VirtualDriver::new(100.0);
        let mut engine_side = driver.clone();
        let count = Rc::new(Cell::new(0));
        let counter = Rc::clone(&count);
        let _sub = engine_side.on_user_scroll(Box::new(move |_| counter.set(counter.get() + 1)));

        let driver = driver.echoing();
        engine_side.write(30.0);
        assert_eq!(driver.position(), 30.0);
        assert!(!driver.scroll_event());

        assert!(driver.user_scroll(40.0));
        assert_eq!(count.get(), 1);
        assert_eq!(engine_side.read(), 40.0);
    }

    #[test]
    fn test_scheduler_fires_once_per_start() {
        let mut scheduler = ManualScheduler::new();
        let hits = Rc::new(Cell::new(0.0));
        let sink = Rc::clone(&hits);
        scheduler.start(Box::new(move |now| sink.set(now)));

        assert!(scheduler.is_pending());
        assert!(scheduler.advance(16.0));
        assert_eq!(hits.get(), 16.0);
        assert!(!scheduler.advance(16.0));
        assert_eq!(scheduler.frames(), 1);
    }

    #[test]
    fn test_stop_cancels_pending() {
        let mut scheduler = ManualScheduler::new();
        scheduler.start(Box::new(|_| panic!("cancelled tick fired")));
        scheduler.stop();
        assert!(!scheduler.is_pending());
        assert_eq!(scheduler.run_until_idle(16.0, 10), 0);
    }
}
