//! Motion engine
//!
//! Turns impulses and `scroll_to` requests into an animated position. The
//! engine owns the motion state and the signal; driver, animator, scheduler,
//! inputs and plugins are injected through [`EngineBuilder`].
//!
//! Lifecycle: build, optionally [`Engine::seed_initial_position`], then
//! [`Engine::init`] once, and [`Engine::destroy`] to tear down.
//!
//! The engine is single-threaded. All state lives behind `RefCell`s that are
//! never borrowed across a call into a collaborator, so plugins, inputs and
//! signal listeners may call back into the engine from any notification.

mod handle;
mod motion;

pub use handle::EngineHandle;

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use tracing::{debug, trace};

use crate::animator::{Animator, AnimatorStep};
use crate::config::EngineSettings;
use crate::domain::{align_to_cycle, Domain};
use crate::driver::{resolve_domain, Driver};
use crate::input::{Emitter, InputModule};
use crate::listeners::Subscription;
use crate::plugin::{Direction, FrameInfo, Plugin, SettleInfo};
use crate::scheduler::Scheduler;
use crate::signal::{Origin, ScrollSignal, DEFAULT_EPSILON};

use motion::MotionState;

/// Collects the engine's collaborators
pub struct EngineBuilder {
    driver: Box<dyn Driver>,
    animator: Box<dyn Animator>,
    scheduler: Box<dyn Scheduler>,
    inputs: Vec<Box<dyn InputModule>>,
    plugins: Vec<Rc<dyn Plugin>>,
    signal_epsilon: f64,
}

impl EngineBuilder {
    pub fn new(
        driver: Box<dyn Driver>,
        animator: Box<dyn Animator>,
        scheduler: Box<dyn Scheduler>,
    ) -> Self {
        Self {
            driver,
            animator,
            scheduler,
            inputs: Vec::new(),
            plugins: Vec::new(),
            signal_epsilon: DEFAULT_EPSILON,
        }
    }

    /// Add an input module, connected on `init`
    pub fn input(mut self, module: impl InputModule + 'static) -> Self {
        self.inputs.push(Box::new(module));
        self
    }

    /// Add a plugin; plugins are notified in the order they were added
    pub fn plugin(self, plugin: impl Plugin + 'static) -> Self {
        self.shared_plugin(Rc::new(plugin))
    }

    /// Add a plugin the caller keeps a reference to
    pub fn shared_plugin(mut self, plugin: Rc<dyn Plugin>) -> Self {
        self.plugins.push(plugin);
        self
    }

    pub fn signal_epsilon(mut self, epsilon: f64) -> Self {
        self.signal_epsilon = epsilon;
        self
    }

    pub fn settings(self, settings: &EngineSettings) -> Self {
        self.signal_epsilon(settings.signal_epsilon)
    }

    pub fn build(self) -> Engine {
        Engine {
            inner: Rc::new(EngineInner {
                driver: RefCell::new(self.driver),
                animator: RefCell::new(self.animator),
                scheduler: RefCell::new(self.scheduler),
                inputs: RefCell::new(self.inputs),
                plugins: self.plugins,
                signal: ScrollSignal::new(self.signal_epsilon),
                motion: RefCell::new(MotionState::default()),
                destroyers: RefCell::new(Vec::new()),
            }),
        }
    }
}

/// Handle to a motion engine. Clones share the same engine.
#[derive(Clone)]
pub struct Engine {
    inner: Rc<EngineInner>,
}

impl Engine {
    /// Establish the starting position without animating. Call before `init`.
    pub fn seed_initial_position(&self, position: f64) {
        self.inner.seed_initial_position(position);
    }

    /// Adopt the driver's current position without writing it back or
    /// animating, for hosts that moved while the engine was not listening
    pub fn sync_from_driver(&self) {
        self.inner.sync_from_driver();
    }

    /// Wire driver, plugins, inputs and velocity tracking. Runs once; later
    /// calls do nothing.
    pub fn init(&self) {
        self.inner.init();
    }

    /// Stop the loop, unwire every listener and notify plugins
    pub fn destroy(&self) {
        self.inner.destroy();
    }

    /// Move to `value`, animated unless `immediate`. Non-finite values are
    /// dropped.
    pub fn scroll_to(&self, value: f64, immediate: bool) {
        self.inner.scroll_to(value, immediate);
    }

    /// Queue a delta for the next tick. Deltas queued before a tick are
    /// summed into a single target update. Non-finite deltas are dropped.
    pub fn apply_impulse(&self, delta: f64) {
        self.inner.apply_impulse(delta);
    }

    /// Domain currently reported by the driver
    pub fn domain(&self) -> Domain {
        self.inner.resolve_domain()
    }

    /// Last committed position
    pub fn position(&self) -> f64 {
        self.inner.signal.value()
    }

    /// Origin of the last committed position
    pub fn origin(&self) -> Origin {
        self.inner.signal.origin()
    }

    /// Steering target; may lie outside the canonical range on circular
    /// domains
    pub fn target(&self) -> f64 {
        self.inner.motion.borrow().target
    }

    pub fn velocity(&self) -> f64 {
        self.inner.motion.borrow().velocity
    }

    pub fn direction(&self) -> Direction {
        self.inner.motion.borrow().direction
    }

    /// Check if the frame loop is active
    pub fn is_running(&self) -> bool {
        self.inner.motion.borrow().running
    }

    pub fn is_initialized(&self) -> bool {
        self.inner.motion.borrow().initialized
    }

    pub fn is_destroyed(&self) -> bool {
        self.inner.motion.borrow().destroyed
    }

    /// Listen to committed position changes
    pub fn on_change(&self, listener: impl Fn(f64, Origin) + 'static) -> Subscription {
        self.inner.signal.on(listener)
    }

    /// Non-owning handle, as given to plugins
    pub fn handle(&self) -> EngineHandle {
        EngineHandle::new(&self.inner)
    }
}

impl fmt::Debug for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let motion = self.inner.motion.borrow();
        f.debug_struct("Engine")
            .field("position", &self.inner.signal.value())
            .field("motion", &*motion)
            .field("plugins", &self.inner.plugins.len())
            .finish()
    }
}

struct EngineInner {
    driver: RefCell<Box<dyn Driver>>,
    animator: RefCell<Box<dyn Animator>>,
    scheduler: RefCell<Box<dyn Scheduler>>,
    /// Drained by `init`
    inputs: RefCell<Vec<Box<dyn InputModule>>>,
    plugins: Vec<Rc<dyn Plugin>>,
    signal: ScrollSignal,
    motion: RefCell<MotionState>,
    /// Everything `destroy` has to unwire
    destroyers: RefCell<Vec<Subscription>>,
}

impl EngineInner {
    fn resolve_domain(&self) -> Domain {
        resolve_domain(self.driver.borrow().as_ref())
    }

    fn notify(&self, hook: impl Fn(&dyn Plugin)) {
        for plugin in &self.plugins {
            hook(plugin.as_ref());
        }
    }

    fn is_destroyed(&self) -> bool {
        self.motion.borrow().destroyed
    }

    fn seed_initial_position(&self, position: f64) {
        let domain = self.resolve_domain();
        let clamped = domain.clamp(position);

        self.driver.borrow_mut().write(clamped);
        self.signal.set(clamped, Origin::Program);
        self.motion.borrow_mut().reset_to(clamped);
        debug!(position = clamped, "seeded initial position");
    }

    fn sync_from_driver(&self) {
        if self.is_destroyed() {
            return;
        }
        let domain = self.resolve_domain();
        let position = domain.clamp(self.driver.borrow().read());

        self.signal.set(position, Origin::User);
        self.motion.borrow_mut().reset_to(position);
        debug!(position, "synced from driver");
    }

    fn init(self: &Rc<Self>) {
        {
            let mut motion = self.motion.borrow_mut();
            if motion.initialized || motion.destroyed {
                return;
            }
            motion.initialized = true;
        }

        let weak = Rc::downgrade(self);
        let user_scroll = self
            .driver
            .borrow_mut()
            .on_user_scroll(Box::new(move |position| {
                if let Some(inner) = weak.upgrade() {
                    inner.handle_user_scroll(position);
                }
            }));
        self.destroyers.borrow_mut().push(user_scroll);

        for plugin in &self.plugins {
            plugin.init(EngineHandle::new(self));
        }

        let inputs = std::mem::take(&mut *self.inputs.borrow_mut());
        let input_count = inputs.len();
        for module in inputs {
            let weak = Rc::downgrade(self);
            let emitter = Emitter::new(move |delta| {
                if let Some(inner) = weak.upgrade() {
                    inner.apply_impulse(delta);
                }
            });
            let subscription = module.connect(emitter);
            self.destroyers.borrow_mut().push(subscription);
        }

        let weak = Rc::downgrade(self);
        let velocity = self.signal.on(move |position, _| {
            if let Some(inner) = weak.upgrade() {
                inner.track_velocity(position);
            }
        });
        self.destroyers.borrow_mut().push(velocity);

        debug!(
            plugins = self.plugins.len(),
            inputs = input_count,
            "engine initialized"
        );
    }

    fn destroy(&self) {
        {
            let mut motion = self.motion.borrow_mut();
            if motion.destroyed {
                return;
            }
            motion.destroyed = true;
            motion.running = false;
            motion.impulse = 0.0;
        }

        self.scheduler.borrow_mut().stop();
        let destroyers = std::mem::take(&mut *self.destroyers.borrow_mut());
        for subscription in destroyers {
            subscription.unsubscribe();
        }
        self.notify(|plugin| plugin.destroy());
        debug!("engine destroyed");
    }

    fn handle_user_scroll(&self, position: f64) {
        self.signal.set(position, Origin::User);

        let domain = self.resolve_domain();
        {
            let mut motion = self.motion.borrow_mut();
            motion.motion_value = match domain.cycle() {
                Some(period) => align_to_cycle(position, period, motion.motion_value),
                None => position,
            };
            motion.target = motion.motion_value;
        }
        trace!(position, "user scroll");

        self.notify(|plugin| plugin.on_user_scroll(position));
    }

    fn track_velocity(&self, position: f64) {
        let domain = self.resolve_domain();
        let mut motion = self.motion.borrow_mut();
        let delta = domain.unwrap_delta(position - motion.prev);
        motion.velocity = delta;
        motion.direction = Direction::from_delta(delta);
        motion.prev = position;
    }

    fn scroll_to(self: &Rc<Self>, value: f64, immediate: bool) {
        if self.is_destroyed() {
            debug!(value, "scroll_to ignored after destroy");
            return;
        }
        if !value.is_finite() {
            debug!(value, "non-finite scroll target dropped");
            return;
        }

        let domain = self.resolve_domain();
        let reference = self.motion.borrow().motion_value;
        let projection = domain.project(value, reference);

        if immediate {
            self.motion.borrow_mut().target = projection.target;
            let written = self.apply_position(projection.canonical, &domain, Origin::Program);
            let info = {
                let mut motion = self.motion.borrow_mut();
                if domain.cycle().is_some() {
                    // keep the logical target on the cycle just written
                    motion.target = motion.motion_value;
                }
                SettleInfo {
                    position: written,
                    target: projection.canonical,
                    velocity: motion.velocity,
                    direction: motion.direction,
                    limit: domain.limit(),
                }
            };

            self.notify(|plugin| plugin.on_target_change(projection.canonical));
            self.notify(|plugin| plugin.on_settle(info));
            return;
        }

        {
            let mut motion = self.motion.borrow_mut();
            motion.target = projection.target;
            motion.cause = Origin::Program;
        }
        self.notify(|plugin| plugin.on_target_change(projection.canonical));
        self.start_loop();
    }

    fn apply_impulse(self: &Rc<Self>, delta: f64) {
        {
            let mut motion = self.motion.borrow_mut();
            if motion.destroyed {
                return;
            }
            if !delta.is_finite() {
                debug!(delta, "non-finite impulse dropped");
                return;
            }
            motion.impulse += delta;
            motion.cause = Origin::Momentum;
        }
        self.start_loop();
    }

    /// Write `next` to the driver and the signal; returns the canonical
    /// position written
    fn apply_position(&self, next: f64, domain: &Domain, origin: Origin) -> f64 {
        let reference = self.motion.borrow().motion_value;
        let raw = match domain.cycle() {
            Some(period) => align_to_cycle(next, period, reference),
            None => next,
        };
        let clamped = domain.clamp(raw);

        self.driver.borrow_mut().write(clamped);
        self.signal.set(clamped, origin);
        self.motion.borrow_mut().motion_value = if domain.cycle().is_some() {
            raw
        } else {
            clamped
        };
        clamped
    }

    fn start_loop(self: &Rc<Self>) {
        {
            let mut motion = self.motion.borrow_mut();
            if motion.running || motion.destroyed {
                return;
            }
            motion.running = true;
        }
        trace!("frame loop started");
        self.schedule_tick(None);
    }

    fn schedule_tick(self: &Rc<Self>, last: Option<f64>) {
        let weak = Rc::downgrade(self);
        self.scheduler
            .borrow_mut()
            .start(Box::new(move |now| {
                if let Some(inner) = weak.upgrade() {
                    inner.tick(last, now);
                }
            }));
    }

    fn tick(self: &Rc<Self>, last: Option<f64>, now: f64) {
        if !self.motion.borrow().running {
            return;
        }
        // the first tick only primes the clock
        let Some(last) = last else {
            self.schedule_tick(Some(now));
            return;
        };
        let dt = now - last;
        let domain = self.resolve_domain();

        let retarget = {
            let mut motion = self.motion.borrow_mut();
            if motion.impulse != 0.0 {
                let projection =
                    domain.integrate_impulse(motion.target, motion.impulse, motion.motion_value);
                motion.target = projection.target;
                motion.impulse = 0.0;
                Some(projection.canonical)
            } else {
                None
            }
        };
        if let Some(canonical) = retarget {
            self.notify(|plugin| plugin.on_target_change(canonical));
        }

        let (current, target, origin) = {
            let motion = self.motion.borrow();
            (motion.motion_value, motion.target, motion.cause)
        };
        let step = self.animator.borrow_mut().step(current, target, dt);

        match step {
            AnimatorStep::Settled => self.settle(&domain, target, origin),
            AnimatorStep::Continue(next) => {
                let written = self.apply_position(next, &domain, origin);
                let info = {
                    let motion = self.motion.borrow();
                    FrameInfo {
                        current: written,
                        target: domain.clamp(motion.target),
                        velocity: motion.velocity,
                        direction: motion.direction,
                        dt,
                        progress: domain.progress(written),
                    }
                };
                trace!(position = written, target = info.target, dt, "frame");

                self.notify(|plugin| plugin.on_frame(info));

                // a plugin may have destroyed the engine during on_frame
                if self.motion.borrow().running {
                    self.schedule_tick(Some(now));
                }
            }
        }
    }

    fn settle(&self, domain: &Domain, target: f64, origin: Origin) {
        let written = self.apply_position(target, domain, origin);
        let canonical_target = domain.clamp(target);
        {
            let mut motion = self.motion.borrow_mut();
            if domain.cycle().is_some() {
                // compose later impulses from the settled cycle
                motion.target = motion.motion_value;
            }
            motion.running = false;
        }
        self.scheduler.borrow_mut().stop();

        let info = {
            let motion = self.motion.borrow();
            SettleInfo {
                position: written,
                target: canonical_target,
                velocity: motion.velocity,
                direction: motion.direction,
                limit: domain.limit(),
            }
        };
        debug!(position = written, target = canonical_target, "motion settled");

        self.notify(|plugin| plugin.on_settle(info));
    }
}
