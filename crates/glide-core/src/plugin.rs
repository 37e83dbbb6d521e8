//! Engine plugins
//!
//! A plugin is a named set of optional hooks. Every hook has a no-op default,
//! so a plugin implements only what it needs. Hooks take `&self`: a plugin
//! may call back into the engine from any hook, including re-entrantly while
//! another hook of the same plugin is running, so mutable plugin state goes
//! in a `Cell` or `RefCell`.

use serde::Serialize;

use crate::engine::EngineHandle;

/// Sign of the last position change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Backward,
    #[default]
    Still,
    Forward,
}

impl Direction {
    pub fn from_delta(delta: f64) -> Self {
        if delta > 0.0 {
            Direction::Forward
        } else if delta < 0.0 {
            Direction::Backward
        } else {
            Direction::Still
        }
    }

    /// -1, 0 or 1
    #[inline]
    pub fn signum(self) -> i8 {
        match self {
            Direction::Backward => -1,
            Direction::Still => 0,
            Direction::Forward => 1,
        }
    }
}

/// Snapshot passed to [`Plugin::on_frame`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FrameInfo {
    /// Canonical position written this frame
    pub current: f64,
    /// Canonical target still being eased toward
    pub target: f64,
    /// Position change since the previous committed value
    pub velocity: f64,
    pub direction: Direction,
    /// Milliseconds since the previous frame
    pub dt: f64,
    /// Position normalized over the domain span, 0 when unbounded
    pub progress: f64,
}

/// Snapshot passed to [`Plugin::on_settle`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SettleInfo {
    /// Canonical position written when the motion stopped
    pub position: f64,
    /// Canonical target the motion stopped at
    pub target: f64,
    pub velocity: f64,
    pub direction: Direction,
    /// Domain span, `None` for unbounded domains
    pub limit: Option<f64>,
}

pub trait Plugin {
    fn name(&self) -> &str;

    /// Engine initialized. Keep the handle to call back into the engine.
    fn init(&self, _engine: EngineHandle) {}

    /// The host reported a position change the engine did not cause
    fn on_user_scroll(&self, _position: f64) {}

    /// The steering target changed; receives the canonical target
    fn on_target_change(&self, _target: f64) {}

    /// An intermediate animation frame was written
    fn on_frame(&self, _info: FrameInfo) {}

    /// Motion stopped
    fn on_settle(&self, _info: SettleInfo) {}

    /// Engine destroyed
    fn destroy(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Silent;

    impl Plugin for Silent {
        fn name(&self) -> &str {
            "silent"
        }
    }

    #[test]
    fn test_absent_hooks_are_noops() {
        let plugin = Silent;
        plugin.on_user_scroll(1.0);
        plugin.on_target_change(2.0);
        plugin.on_settle(SettleInfo {
            position: 2.0,
            target: 2.0,
            velocity: 0.0,
            direction: Direction::Still,
            limit: None,
        });
        plugin.destroy();
        assert_eq!(plugin.name(), "silent");
    }

    #[test]
    fn test_direction_from_delta() {
        assert_eq!(Direction::from_delta(3.0), Direction::Forward);
        assert_eq!(Direction::from_delta(-0.2), Direction::Backward);
        assert_eq!(Direction::from_delta(0.0), Direction::Still);
        assert_eq!(Direction::Backward.signum(), -1);
    }
}
