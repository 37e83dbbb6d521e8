use std::cell::RefCell;

use glide_core::config::SnapConfig;
use glide_core::engine::EngineHandle;
use glide_core::plugin::{Plugin, SettleInfo};
use tracing::debug;

/// Settled positions closer than this to a snap point count as on it
const SNAP_EPSILON: f64 = 1e-6;

/// Animate to the nearest multiple of `grid` whenever motion settles within
/// `radius` of it
#[derive(Debug)]
pub struct SnapPlugin {
    grid: f64,
    radius: f64,
    engine: RefCell<Option<EngineHandle>>,
}

impl SnapPlugin {
    pub fn new(grid: f64, radius: f64) -> Self {
        Self {
            grid,
            radius,
            engine: RefCell::new(None),
        }
    }

    pub fn from_config(config: &SnapConfig) -> Self {
        Self::new(config.grid, config.radius)
    }

    /// Nearest grid point to `position`
    pub fn snap_point(&self, position: f64) -> f64 {
        (position / self.grid).round() * self.grid
    }
}

impl Plugin for SnapPlugin {
    fn name(&self) -> &str {
        "snap"
    }

    fn init(&self, engine: EngineHandle) {
        *self.engine.borrow_mut() = Some(engine);
    }

    fn on_settle(&self, info: SettleInfo) {
        if !(self.grid > 0.0) {
            return;
        }
        let Some(engine) = self.engine.borrow().clone() else {
            return;
        };
        let Some(domain) = engine.domain() else {
            return;
        };

        // looping domains keep the unwrapped point so the seam is measured
        // the short way; elsewhere points past the edge snap to the edge
        let point = match domain.cycle() {
            Some(_) => self.snap_point(info.position),
            None => domain.clamp(self.snap_point(info.position)),
        };
        let distance = (point - info.position).abs();
        if distance < SNAP_EPSILON || distance > self.radius {
            return;
        }

        debug!(from = info.position, to = point, "snapping");
        engine.scroll_to(point, false);
    }

    fn destroy(&self) {
        self.engine.borrow_mut().take();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glide_core::animator::ExponentialAnimator;
    use glide_core::domain::Domain;
    use glide_core::engine::{Engine, EngineBuilder};
    use glide_core::host::{ManualScheduler, VirtualDriver};

    const FRAME: f64 = 1000.0 / 60.0;

    fn engine(limit: f64, snap: SnapPlugin) -> (Engine, VirtualDriver, ManualScheduler) {
        let driver = VirtualDriver::new(limit);
        let clock = ManualScheduler::new();
        let engine = EngineBuilder::new(
            Box::new(driver.clone()),
            Box::new(ExponentialAnimator::default()),
            Box::new(clock.clone()),
        )
        .plugin(snap)
        .build();
        engine.init();
        (engine, driver, clock)
    }

    #[test]
    fn test_snaps_to_nearest_grid_point() {
        let (engine, driver, clock) = engine(2000.0, SnapPlugin::new(100.0, 60.0));
        engine.scroll_to(340.0, false);
        clock.run_until_idle(FRAME, 2000);

        assert_eq!(driver.position(), 300.0);
        assert!(!engine.is_running());
    }

    #[test]
    fn test_snaps_across_circular_seam() {
        let driver = VirtualDriver::with_domain(Domain::Circular {
            period: Some(1000.0),
        });
        let clock = ManualScheduler::new();
        let engine = EngineBuilder::new(
            Box::new(driver.clone()),
            Box::new(ExponentialAnimator::default()),
            Box::new(clock.clone()),
        )
        .plugin(SnapPlugin::new(100.0, 60.0))
        .build();
        engine.init();

        engine.scroll_to(980.0, true);
        clock.run_until_idle(FRAME, 2000);

        assert_eq!(driver.position(), 0.0);
        assert!(driver.writes().iter().all(|&p| p >= 980.0 || p == 0.0));
        assert!(!engine.is_running());
    }

    #[test]
    fn test_far_from_grid_stays_put() {
        let (engine, driver, clock) = engine(2000.0, SnapPlugin::new(100.0, 20.0));
        engine.scroll_to(450.0, false);
        clock.run_until_idle(FRAME, 2000);

        assert_eq!(driver.position(), 450.0);
    }

    #[test]
    fn test_domain_edge_is_not_pulled_back() {
        let (engine, driver, _clock) = engine(1000.0, SnapPlugin::new(400.0, 300.0));
        engine.scroll_to(1000.0, true);

        // nearest grid point is 1200, past the end
        assert_eq!(driver.position(), 1000.0);
        assert_eq!(driver.write_count(), 1);
    }

    #[test]
    fn test_snap_point() {
        let snap = SnapPlugin::new(50.0, 10.0);
        assert_eq!(snap.snap_point(74.0), 50.0);
        assert_eq!(snap.snap_point(76.0), 100.0);
        assert_eq!(snap.snap_point(-26.0), -50.0);
    }
}
