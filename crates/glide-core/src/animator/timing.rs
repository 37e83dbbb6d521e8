//! Time calculation utilities for animators
//!
//! Times are frame timestamps in milliseconds as delivered by the scheduler.

/// Progress (0.0 to 1.0) after `elapsed_ms` of a `duration_ms` animation
#[inline]
pub fn progress(elapsed_ms: f64, duration_ms: f64) -> f64 {
    if duration_ms <= 0.0 {
        return 1.0;
    }
    (elapsed_ms / duration_ms).clamp(0.0, 1.0)
}

#[inline]
pub fn is_complete(elapsed_ms: f64, duration_ms: f64) -> bool {
    elapsed_ms >= duration_ms
}

/// Linear interpolation between two values
#[inline]
pub fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}

/// Continuous decay rate equivalent to covering `fraction` of the remaining
/// distance once per `frame_interval_secs`
#[inline]
pub fn decay_rate(fraction: f64, frame_interval_secs: f64) -> f64 {
    -(1.0 - fraction).ln() / frame_interval_secs
}

/// Share of the remaining distance covered in `dt_ms` at decay rate `rate`
#[inline]
pub fn decay_alpha(rate: f64, dt_ms: f64) -> f64 {
    1.0 - (-rate * dt_ms / 1000.0).exp()
}
