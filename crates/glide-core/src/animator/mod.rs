//! Animation stepping policies
//!
//! An [`Animator`] is asked once per frame to move the motion value toward
//! the target. It answers with the next position or reports that the
//! remaining distance is small enough to stop.
//!
//! # Layout
//!
//! - `easing` - pure easing curves for the tween policy
//! - `timing` - elapsed-time and interpolation helpers
//! - `config` - configuration accessors (types live in [`crate::config`])
//! - `exponential` - the reference frame-rate independent policy
//! - `tween` - fixed-duration eased policy

pub mod config;
pub mod easing;
pub mod timing;

pub mod exponential;
pub mod tween;

pub use config::AnimatorConfigExt;
pub use easing::EasingTypeExt;
pub use exponential::ExponentialAnimator;
pub use tween::TweenAnimator;

use crate::config::{AnimatorConfig, AnimatorKind};

/// Remaining distance under which the reference policies settle
pub const SETTLE_THRESHOLD: f64 = 0.5;

/// Outcome of one animation step
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnimatorStep {
    /// Write this position and keep animating
    Continue(f64),
    /// Close enough; the engine snaps to the target and stops the loop
    Settled,
}

pub trait Animator {
    /// Advance from `current` toward `target` over `dt` milliseconds
    fn step(&mut self, current: f64, target: f64, dt: f64) -> AnimatorStep;
}

impl<F> Animator for F
where
    F: FnMut(f64, f64, f64) -> AnimatorStep,
{
    fn step(&mut self, current: f64, target: f64, dt: f64) -> AnimatorStep {
        self(current, target, dt)
    }
}

/// Settles on every step, so motion lands on the target at the next tick
#[derive(Debug, Clone, Copy, Default)]
pub struct InstantAnimator;

impl Animator for InstantAnimator {
    fn step(&mut self, _current: f64, _target: f64, _dt: f64) -> AnimatorStep {
        AnimatorStep::Settled
    }
}

/// Build the animator described by `config`
pub fn from_config(config: &AnimatorConfig) -> Box<dyn Animator> {
    if !config.is_smooth() {
        return Box::new(InstantAnimator);
    }
    match config.kind {
        AnimatorKind::Exponential => Box::new(ExponentialAnimator::with_settings(
            config.lerp,
            config.frame_interval().as_secs_f64(),
            config.settle_threshold,
        )),
        AnimatorKind::Tween => Box::new(TweenAnimator::new(
            config.animation_duration().as_secs_f64() * 1000.0,
            config.easing,
            config.settle_threshold,
        )),
    }
}
