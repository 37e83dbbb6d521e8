use glide_core::engine::EngineHandle;
use glide_core::plugin::{FrameInfo, Plugin, SettleInfo};
use tracing::{debug, trace};

/// Logs every engine hook through `tracing`
#[derive(Debug, Clone)]
pub struct TracePlugin {
    label: String,
}

impl TracePlugin {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
        }
    }
}

impl Default for TracePlugin {
    fn default() -> Self {
        Self::new("engine")
    }
}

impl Plugin for TracePlugin {
    fn name(&self) -> &str {
        "trace"
    }

    fn init(&self, engine: EngineHandle) {
        debug!(label = %self.label, position = ?engine.position(), "init");
    }

    fn on_user_scroll(&self, position: f64) {
        debug!(label = %self.label, position, "user scroll");
    }

    fn on_target_change(&self, target: f64) {
        debug!(label = %self.label, target, "target");
    }

    fn on_frame(&self, info: FrameInfo) {
        trace!(
            label = %self.label,
            current = info.current,
            target = info.target,
            velocity = info.velocity,
            dt = info.dt,
            "frame"
        );
    }

    fn on_settle(&self, info: SettleInfo) {
        debug!(
            label = %self.label,
            position = info.position,
            direction = ?info.direction,
            "settle"
        );
    }

    fn destroy(&self) {
        debug!(label = %self.label, "destroy");
    }
}
