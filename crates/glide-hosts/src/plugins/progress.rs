use std::cell::{Cell, RefCell};
use std::fmt;

use glide_core::engine::EngineHandle;
use glide_core::plugin::{FrameInfo, Plugin, SettleInfo};

/// Forwards normalized scroll progress (`0..=1`) to a callback, for
/// scroll-linked timelines
///
/// Reports on every frame, on settle and on user scrolls, skipping repeats
/// of the last reported value. Unbounded domains always report 0.
pub struct ProgressPlugin {
    callback: Box<dyn Fn(f64)>,
    engine: RefCell<Option<EngineHandle>>,
    last: Cell<Option<f64>>,
}

impl ProgressPlugin {
    pub fn new(callback: impl Fn(f64) + 'static) -> Self {
        Self {
            callback: Box::new(callback),
            engine: RefCell::new(None),
            last: Cell::new(None),
        }
    }

    /// Last reported progress
    pub fn last(&self) -> Option<f64> {
        self.last.get()
    }

    fn report(&self, progress: f64) {
        if self.last.get() == Some(progress) {
            return;
        }
        self.last.set(Some(progress));
        (self.callback)(progress);
    }

    fn report_position(&self, position: f64) {
        let domain = self.engine.borrow().as_ref().and_then(|engine| engine.domain());
        if let Some(domain) = domain {
            self.report(domain.progress(position));
        }
    }
}

impl Plugin for ProgressPlugin {
    fn name(&self) -> &str {
        "progress"
    }

    fn init(&self, engine: EngineHandle) {
        let position = engine.position();
        *self.engine.borrow_mut() = Some(engine);
        if let Some(position) = position {
            self.report_position(position);
        }
    }

    fn on_user_scroll(&self, position: f64) {
        self.report_position(position);
    }

    fn on_frame(&self, info: FrameInfo) {
        self.report(info.progress);
    }

    fn on_settle(&self, info: SettleInfo) {
        self.report_position(info.position);
    }

    fn destroy(&self) {
        self.engine.borrow_mut().take();
    }
}

impl fmt::Debug for ProgressPlugin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProgressPlugin")
            .field("last", &self.last.get())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    use glide_core::animator::ExponentialAnimator;
    use glide_core::domain::Domain;
    use glide_core::engine::{Engine, EngineBuilder};
    use glide_core::host::{ManualScheduler, VirtualDriver};

    fn run(driver: VirtualDriver) -> (Rc<RefCell<Vec<f64>>>, VirtualDriver, Engine) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let clock = ManualScheduler::new();
        let engine = EngineBuilder::new(
            Box::new(driver.clone()),
            Box::new(ExponentialAnimator::default()),
            Box::new(clock.clone()),
        )
        .plugin(ProgressPlugin::new(move |p| sink.borrow_mut().push(p)))
        .build();
        engine.init();
        engine.scroll_to(800.0, false);
        clock.run_until_idle(1000.0 / 60.0, 2000);
        (seen, driver, engine)
    }

    #[test]
    fn test_reports_monotonic_progress_up_to_settle() {
        let (seen, _driver, _engine) = run(VirtualDriver::new(1000.0));
        let reported = seen.borrow();

        assert_eq!(reported.first(), Some(&0.0));
        assert_eq!(reported.last(), Some(&0.8));
        assert!(reported.windows(2).all(|w| w[1] > w[0]));
    }

    #[test]
    fn test_user_scroll_reports_progress() {
        let (seen, driver, _engine) = run(VirtualDriver::new(1000.0));
        driver.user_scroll(250.0);
        assert_eq!(seen.borrow().last(), Some(&0.25));
    }

    #[test]
    fn test_unbounded_domain_reports_zero_once() {
        let (seen, _driver, _engine) = run(VirtualDriver::with_domain(Domain::AllUnbounded));
        assert_eq!(*seen.borrow(), vec![0.0]);
    }
}
