//! Configuration accessors for animators
//!
//! Re-exports the configuration types from [`crate::config`] and adds derived
//! values.

use std::time::Duration;

pub use crate::config::{AnimatorConfig, AnimatorKind, EasingType};

/// Extension trait for AnimatorConfig with utility methods
pub trait AnimatorConfigExt {
    /// Tween duration as Duration
    fn animation_duration(&self) -> Duration;

    /// Length of one reference frame
    fn frame_interval(&self) -> Duration;

    /// Check if smooth motion is effectively enabled
    fn is_smooth(&self) -> bool;
}

impl AnimatorConfigExt for AnimatorConfig {
    #[inline]
    fn animation_duration(&self) -> Duration {
        Duration::from_millis(self.animation_duration_ms)
    }

    #[inline]
    fn frame_interval(&self) -> Duration {
        if self.frame_rate == 0 {
            Duration::from_secs_f64(1.0 / 60.0) // ~60fps fallback
        } else {
            Duration::from_secs_f64(1.0 / self.frame_rate as f64)
        }
    }

    #[inline]
    fn is_smooth(&self) -> bool {
        match self.kind {
            AnimatorKind::Exponential => self.smooth_enabled,
            AnimatorKind::Tween => self.smooth_enabled && self.animation_duration_ms > 0,
        }
    }
}
