use std::time::Duration;

use glide_core::host::ManualScheduler;
use tokio::sync::watch;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, info};

/// Drives a [`ManualScheduler`] in real time from a tokio interval
///
/// The engine is single-threaded, so the pump runs on the thread that owns
/// it (a current-thread runtime or a `LocalSet`). Timestamps handed to the
/// scheduler continue from its current `now()`.
#[derive(Debug, Clone)]
pub struct FramePump {
    clock: ManualScheduler,
    interval: Duration,
}

impl FramePump {
    pub fn new(clock: ManualScheduler, interval: Duration) -> Self {
        Self { clock, interval }
    }

    /// Pump at `frame_rate` frames per second, 60 if zero
    pub fn with_frame_rate(clock: ManualScheduler, frame_rate: u32) -> Self {
        let rate = if frame_rate == 0 { 60 } else { frame_rate };
        Self::new(clock, Duration::from_secs_f64(1.0 / f64::from(rate)))
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    fn ticker(&self) -> time::Interval {
        let mut ticker = time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        ticker
    }

    /// Fire ticks until nothing is scheduled; returns the number fired
    pub async fn run_until_idle(&self) -> usize {
        let mut ticker = self.ticker();
        let start = Instant::now();
        let base = self.clock.now();
        let mut fired = 0;

        while self.clock.is_pending() {
            ticker.tick().await;
            let now = base + start.elapsed().as_secs_f64() * 1000.0;
            if self.clock.fire(now) {
                fired += 1;
            }
        }
        debug!(fired, "frame pump idle");
        fired
    }

    /// Fire pending ticks until `shutdown` turns true or its sender is
    /// dropped; returns the number fired
    pub async fn run(&self, mut shutdown: watch::Receiver<bool>) -> usize {
        let mut ticker = self.ticker();
        let start = Instant::now();
        let base = self.clock.now();
        let mut fired = 0;

        loop {
            tokio::select! {
                result = shutdown.changed() => {
                    if result.is_err() || *shutdown.borrow() {
                        info!(fired, "frame pump stopped");
                        break;
                    }
                }
                _ = ticker.tick() => {
                    let now = base + start.elapsed().as_secs_f64() * 1000.0;
                    if self.clock.fire(now) {
                        fired += 1;
                    }
                }
            }
        }
        fired
    }
}
