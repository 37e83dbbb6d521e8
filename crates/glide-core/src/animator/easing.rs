//! Easing curves for the tween animator
//!
//! Every curve except `None` is an ease-out: fast off the mark, slowing into
//! the target.

pub use crate::config::EasingType;

pub trait EasingTypeExt {
    /// Eased progress for linear progress `t`, both in `[0, 1]`
    fn apply(&self, t: f64) -> f64;
}

impl EasingTypeExt for EasingType {
    #[inline]
    fn apply(&self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            // holds the start until the tween ends
            EasingType::None => t.floor(),
            EasingType::Linear => t,
            EasingType::Cubic => ease_out_pow(t, 3),
            EasingType::Quintic => ease_out_pow(t, 5),
            EasingType::EaseOut if t >= 1.0 => 1.0,
            EasingType::EaseOut => 1.0 - (-10.0 * t).exp2(),
        }
    }
}

/// `1 - (1 - t)^n`
#[inline]
fn ease_out_pow(t: f64, n: i32) -> f64 {
    1.0 - (1.0 - t).powi(n)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CURVES: [EasingType; 4] = [
        EasingType::Linear,
        EasingType::Cubic,
        EasingType::Quintic,
        EasingType::EaseOut,
    ];

    #[test]
    fn test_curves_start_at_zero_and_end_at_one() {
        for easing in CURVES {
            assert_eq!(easing.apply(0.0), 0.0, "{easing:?}");
            assert_eq!(easing.apply(1.0), 1.0, "{easing:?}");
        }
        assert_eq!(EasingType::None.apply(0.99), 0.0);
        assert_eq!(EasingType::None.apply(1.0), 1.0);
    }

    #[test]
    fn test_midpoints() {
        assert_eq!(EasingType::Cubic.apply(0.5), 0.875);
        assert_eq!(EasingType::Quintic.apply(0.5), 0.96875);
        assert!((EasingType::EaseOut.apply(0.1) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_ease_out_curves_lead_linear() {
        for easing in [EasingType::Cubic, EasingType::Quintic, EasingType::EaseOut] {
            let mut prev = 0.0;
            for i in 1..20 {
                let t = f64::from(i) / 20.0;
                let v = easing.apply(t);
                assert!(v > t, "{easing:?} behind linear at t={t}");
                assert!(v >= prev, "{easing:?} not monotonic at t={t}");
                prev = v;
            }
        }
    }

    #[test]
    fn test_out_of_range_progress_is_clamped() {
        assert_eq!(EasingType::Linear.apply(-1.0), 0.0);
        assert_eq!(EasingType::Cubic.apply(3.0), 1.0);
    }
}
