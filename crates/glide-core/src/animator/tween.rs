//! Fixed-duration eased animator
//!
//! Interpolates from the position where the current target was first seen
//! to that target over a fixed duration. When the target moves mid-flight the
//! tween restarts from the current position, so chained inputs stay smooth.

use super::easing::{EasingType, EasingTypeExt};
use super::timing::{is_complete, lerp, progress};
use super::{Animator, AnimatorStep};

/// Active tween state
#[derive(Debug, Clone, Copy)]
struct ActiveTween {
    /// Position when the tween started
    from: f64,
    /// Target the tween runs to
    to: f64,
    /// Time spent so far (ms)
    elapsed: f64,
}

#[derive(Debug, Clone)]
pub struct TweenAnimator {
    duration_ms: f64,
    easing: EasingType,
    settle_threshold: f64,
    active: Option<ActiveTween>,
}

impl TweenAnimator {
    pub fn new(duration_ms: f64, easing: EasingType, settle_threshold: f64) -> Self {
        Self {
            duration_ms,
            easing,
            settle_threshold,
            active: None,
        }
    }

    /// Check if a tween is in flight
    #[inline]
    pub fn is_animating(&self) -> bool {
        self.active.is_some()
    }

    fn finish(&mut self) -> AnimatorStep {
        self.active = None;
        AnimatorStep::Settled
    }
}

impl Animator for TweenAnimator {
    fn step(&mut self, current: f64, target: f64, dt: f64) -> AnimatorStep {
        let mut tween = match self.active {
            Some(tween) if tween.to == target => tween,
            _ => ActiveTween {
                from: current,
                to: target,
                elapsed: 0.0,
            },
        };
        tween.elapsed += dt;

        if is_complete(tween.elapsed, self.duration_ms) {
            return self.finish();
        }

        let t = progress(tween.elapsed, self.duration_ms);
        let next = lerp(tween.from, tween.to, self.easing.apply(t));
        if (target - next).abs() < self.settle_threshold {
            return self.finish();
        }

        self.active = Some(tween);
        AnimatorStep::Continue(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn next(step: AnimatorStep) -> f64 {
        match step {
            AnimatorStep::Continue(value) => value,
            AnimatorStep::Settled => panic!("settled early"),
        }
    }

    #[test]
    fn test_linear_tween_progress() {
        let mut tween = TweenAnimator::new(100.0, EasingType::Linear, 0.5);
        assert_eq!(next(tween.step(0.0, 100.0, 25.0)), 25.0);
        assert_eq!(next(tween.step(25.0, 100.0, 25.0)), 50.0);
        assert!(tween.is_animating());
    }

    #[test]
    fn test_settles_when_duration_elapses() {
        let mut tween = TweenAnimator::new(100.0, EasingType::Cubic, 0.5);
        let pos = next(tween.step(0.0, 300.0, 60.0));
        assert_eq!(tween.step(pos, 300.0, 60.0), AnimatorStep::Settled);
        assert!(!tween.is_animating());
    }

    #[test]
    fn test_retarget_restarts_from_current() {
        let mut tween = TweenAnimator::new(100.0, EasingType::Linear, 0.5);
        let pos = next(tween.step(0.0, 100.0, 50.0));
        assert_eq!(pos, 50.0);

        // new target: starts over from 50 with a fresh clock
        assert_eq!(next(tween.step(pos, 250.0, 50.0)), 150.0);
    }

    #[test]
    fn test_none_easing_holds_then_settles() {
        let mut tween = TweenAnimator::new(100.0, EasingType::None, 0.5);
        assert_eq!(next(tween.step(10.0, 90.0, 40.0)), 10.0);
        assert_eq!(tween.step(10.0, 90.0, 60.0), AnimatorStep::Settled);
    }
}
