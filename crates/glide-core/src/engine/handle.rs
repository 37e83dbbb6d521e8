use std::fmt;
use std::rc::{Rc, Weak};

use super::{Engine, EngineInner};
use crate::domain::Domain;

/// Non-owning reference to an engine, handed to plugins.
///
/// Holding a handle never keeps the engine alive; every call is a no-op once
/// the engine has been dropped.
#[derive(Clone)]
pub struct EngineHandle {
    inner: Weak<EngineInner>,
}

impl EngineHandle {
    pub(super) fn new(inner: &Rc<EngineInner>) -> Self {
        Self {
            inner: Rc::downgrade(inner),
        }
    }

    /// The engine, if it is still alive
    pub fn upgrade(&self) -> Option<Engine> {
        self.inner.upgrade().map(|inner| Engine { inner })
    }

    pub fn is_alive(&self) -> bool {
        self.inner.strong_count() > 0
    }

    pub fn scroll_to(&self, value: f64, immediate: bool) {
        if let Some(engine) = self.upgrade() {
            engine.scroll_to(value, immediate);
        }
    }

    pub fn apply_impulse(&self, delta: f64) {
        if let Some(engine) = self.upgrade() {
            engine.apply_impulse(delta);
        }
    }

    pub fn domain(&self) -> Option<Domain> {
        self.upgrade().map(|engine| engine.domain())
    }

    pub fn position(&self) -> Option<f64> {
        self.upgrade().map(|engine| engine.position())
    }
}

impl fmt::Debug for EngineHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EngineHandle")
            .field("alive", &self.is_alive())
            .finish()
    }
}
