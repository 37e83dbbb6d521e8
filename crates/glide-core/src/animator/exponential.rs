//! Frame-rate independent exponential approach
//!
//! The lerp coefficient is the share of the remaining distance covered in one
//! reference frame. It is converted to a continuous decay rate so that the
//! motion looks the same whatever the real frame timing is.

use super::timing::{decay_alpha, decay_rate};
use super::{Animator, AnimatorStep, SETTLE_THRESHOLD};

/// Reference frame interval for the lerp coefficient
pub const REFERENCE_FRAME_SECS: f64 = 1.0 / 60.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExponentialAnimator {
    rate: f64,
    settle_threshold: f64,
}

impl ExponentialAnimator {
    /// `lerp` must lie in (0, 1)
    pub fn new(lerp: f64) -> Self {
        Self::with_settings(lerp, REFERENCE_FRAME_SECS, SETTLE_THRESHOLD)
    }

    pub fn with_settings(lerp: f64, frame_interval_secs: f64, settle_threshold: f64) -> Self {
        Self {
            rate: decay_rate(lerp, frame_interval_secs),
            settle_threshold,
        }
    }

    /// Continuous decay rate, per second
    #[inline]
    pub fn rate(&self) -> f64 {
        self.rate
    }
}

impl Default for ExponentialAnimator {
    fn default() -> Self {
        Self::new(0.1)
    }
}

impl Animator for ExponentialAnimator {
    fn step(&mut self, current: f64, target: f64, dt: f64) -> AnimatorStep {
        let next = current + (target - current) * decay_alpha(self.rate, dt);
        if (target - next).abs() < self.settle_threshold {
            AnimatorStep::Settled
        } else {
            AnimatorStep::Continue(next)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME_MS: f64 = 1000.0 / 60.0;

    #[test]
    fn test_one_reference_frame_covers_lerp_fraction() {
        let mut animator = ExponentialAnimator::new(0.1);
        match animator.step(0.0, 1000.0, FRAME_MS) {
            AnimatorStep::Continue(next) => assert!((next - 100.0).abs() < 1e-6, "{next}"),
            AnimatorStep::Settled => panic!("settled early"),
        }
    }

    #[test]
    fn test_two_half_frames_equal_one_frame() {
        let mut animator = ExponentialAnimator::new(0.2);
        let AnimatorStep::Continue(one) = animator.step(0.0, 500.0, FRAME_MS) else {
            panic!("settled early");
        };
        let AnimatorStep::Continue(half) = animator.step(0.0, 500.0, FRAME_MS / 2.0) else {
            panic!("settled early");
        };
        let AnimatorStep::Continue(two) = animator.step(half, 500.0, FRAME_MS / 2.0) else {
            panic!("settled early");
        };
        assert!((one - two).abs() < 1e-9);
    }

    #[test]
    fn test_settles_in_finite_steps() {
        let mut animator = ExponentialAnimator::default();
        let mut current = 0.0;
        let mut steps = 0;
        loop {
            match animator.step(current, 500.0, FRAME_MS) {
                AnimatorStep::Continue(next) => current = next,
                AnimatorStep::Settled => break,
            }
            steps += 1;
            assert!(steps < 1000, "never settled");
        }
        assert!((500.0 - current).abs() < 10.0);
    }

    #[test]
    fn test_already_at_target_settles() {
        let mut animator = ExponentialAnimator::default();
        assert_eq!(animator.step(42.0, 42.2, FRAME_MS), AnimatorStep::Settled);
    }
}
