//! Domain descriptors and projection math
//!
//! A domain describes the legal range of the scroll coordinate. All functions
//! here are pure; the engine resolves a fresh domain from the driver on every
//! tick and feeds it through these helpers.
//!
//! Malformed descriptors (`max < min`, non-positive period) are a caller
//! precondition violation. Nothing here panics on them, but the results are
//! unspecified.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Legal range and topology of the motion coordinate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Domain {
    /// `[min, max]`
    Bounded { min: f64, max: f64 },
    /// `[min, +inf)`
    EndUnbounded { min: f64 },
    /// `(-inf, +inf)`
    AllUnbounded,
    /// Positions repeat every `period`. Without a period the domain behaves
    /// as unbounded.
    Circular {
        #[serde(default)]
        period: Option<f64>,
    },
}

/// Result of projecting a desired position into a domain
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    /// Steering target; may lie outside the canonical range on circular
    /// domains so that animation stays continuous across the wrap boundary
    pub target: f64,
    /// Value normalized into the domain, used for writes and notifications
    pub canonical: f64,
}

impl Domain {
    /// Bounded domain `[0, max(0, limit)]`, used when the driver supplies none
    pub fn from_limit(limit: f64) -> Self {
        Domain::Bounded {
            min: 0.0,
            max: limit.max(0.0),
        }
    }

    /// Span of motion: bounded span, circular period, `None` when unbounded
    pub fn limit(&self) -> Option<f64> {
        match *self {
            Domain::Bounded { min, max } => Some((max - min).max(0.0)),
            Domain::Circular { period } => period,
            Domain::EndUnbounded { .. } | Domain::AllUnbounded => None,
        }
    }

    /// Period to wrap around, only for circular domains with a usable period
    pub fn cycle(&self) -> Option<f64> {
        match *self {
            Domain::Circular { period: Some(p) } if p.is_finite() && p > 0.0 => Some(p),
            _ => None,
        }
    }

    #[inline]
    pub fn is_circular(&self) -> bool {
        matches!(self, Domain::Circular { .. })
    }

    /// Normalize `value` into the domain's canonical range
    pub fn clamp(&self, value: f64) -> f64 {
        match *self {
            // min/max chain instead of f64::clamp: no panic on inverted bounds
            Domain::Bounded { min, max } => value.min(max).max(min),
            Domain::EndUnbounded { min } => value.max(min),
            Domain::AllUnbounded => value,
            Domain::Circular { .. } => match self.cycle() {
                Some(period) => value.rem_euclid(period),
                None => value,
            },
        }
    }

    /// Clamp `desired`, then on circular domains move it to the cycle
    /// nearest `reference`
    pub fn project(&self, desired: f64, reference: f64) -> Projection {
        let canonical = self.clamp(desired);
        match self.cycle() {
            Some(period) => Projection {
                target: align_to_cycle(canonical, period, reference),
                canonical,
            },
            None => Projection {
                target: canonical,
                canonical,
            },
        }
    }

    /// Fold an accumulated impulse into the current steering target
    ///
    /// On circular domains the raw sum is re-aligned to the cycle of `motion`
    /// before normalizing, so repeated impulses never wind the target up.
    pub fn integrate_impulse(&self, target: f64, impulse: f64, motion: f64) -> Projection {
        match self.cycle() {
            Some(period) => {
                let target = align_to_cycle(target + impulse, period, motion);
                Projection {
                    target,
                    canonical: self.clamp(target),
                }
            }
            None => {
                let next = self.clamp(target + impulse);
                Projection {
                    target: next,
                    canonical: next,
                }
            }
        }
    }

    /// Difference between two consecutive positions, taking the short way
    /// around on circular domains
    pub fn unwrap_delta(&self, delta: f64) -> f64 {
        match self.cycle() {
            Some(period) if delta > period / 2.0 => delta - period,
            Some(period) if delta < -period / 2.0 => delta + period,
            _ => delta,
        }
    }

    /// Position normalized to `[0, 1]` over the domain span, `0` when the
    /// domain has no finite span
    pub fn progress(&self, position: f64) -> f64 {
        let origin = match *self {
            Domain::Bounded { min, .. } => min,
            _ => 0.0,
        };
        match self.limit() {
            Some(span) if span > 0.0 && span.is_finite() => {
                ((position - origin) / span).clamp(0.0, 1.0)
            }
            _ => 0.0,
        }
    }

    /// Check the descriptor preconditions.
    ///
    /// The engine never calls this; it is for descriptors coming from
    /// configuration or other untrusted sources.
    pub fn validate(&self) -> Result<()> {
        match *self {
            Domain::Bounded { min, max } if min.is_nan() || max.is_nan() => {
                Err(Error::InvalidDomain("bounds must be numbers".into()))
            }
            Domain::Bounded { min, max } if max < min => Err(Error::InvalidDomain(format!(
                "bounded max ({max}) is below min ({min})"
            ))),
            Domain::EndUnbounded { min } if min.is_nan() => {
                Err(Error::InvalidDomain("min must be a number".into()))
            }
            Domain::Circular { period: Some(p) } if !(p > 0.0 && p.is_finite()) => Err(
                Error::InvalidDomain(format!("circular period must be positive, got {p}")),
            ),
            _ => Ok(()),
        }
    }
}

/// Representative of `value` modulo `limit` nearest to `reference`.
///
/// The number of whole periods to shift is `(reference - value) / limit`
/// rounded half to even, so a value exactly half a period away lands on the
/// even multiple. A non-finite or non-positive `limit` returns `value`.
pub fn align_to_cycle(value: f64, limit: f64, reference: f64) -> f64 {
    if !limit.is_finite() || limit <= 0.0 {
        return value;
    }
    let revolutions = ((reference - value) / limit).round_ties_even();
    value + revolutions * limit
}

#[cfg(test)]
mod tests {
    use super::*;

    const CIRCLE: Domain = Domain::Circular {
        period: Some(1000.0),
    };

    #[test]
    fn test_bounded_clamp_stays_in_range() {
        let domain = Domain::Bounded {
            min: -50.0,
            max: 250.0,
        };
        for value in [
            f64::NEG_INFINITY,
            -1e12,
            -50.0,
            0.0,
            249.9,
            250.0,
            1e12,
            f64::INFINITY,
        ] {
            let clamped = domain.clamp(value);
            assert!(
                (-50.0..=250.0).contains(&clamped),
                "{value} clamped to {clamped}"
            );
        }
    }

    #[test]
    fn test_end_unbounded_and_all_unbounded() {
        let end = Domain::EndUnbounded { min: 10.0 };
        assert_eq!(end.clamp(-5.0), 10.0);
        assert_eq!(end.clamp(1e9), 1e9);
        assert_eq!(end.limit(), None);

        assert_eq!(Domain::AllUnbounded.clamp(-123.0), -123.0);
        assert_eq!(Domain::AllUnbounded.limit(), None);
    }

    #[test]
    fn test_limit_per_kind() {
        assert_eq!(
            Domain::Bounded {
                min: 100.0,
                max: 400.0
            }
            .limit(),
            Some(300.0)
        );
        assert_eq!(CIRCLE.limit(), Some(1000.0));
        assert_eq!(Domain::Circular { period: None }.limit(), None);
        assert_eq!(Domain::from_limit(-20.0).limit(), Some(0.0));
    }

    #[test]
    fn test_circular_clamp_wraps() {
        assert_eq!(CIRCLE.clamp(1010.0), 10.0);
        assert_eq!(CIRCLE.clamp(-10.0), 990.0);
        assert_eq!(CIRCLE.clamp(2000.0), 0.0);
        // without a period nothing wraps
        assert_eq!(Domain::Circular { period: None }.clamp(-10.0), -10.0);
    }

    #[test]
    fn test_align_picks_nearest_representative() {
        let period = 1000.0;
        for reference in [-2500.0, -499.0, 0.0, 10.0, 990.0, 1499.0, 7321.5] {
            for value in [0.0, 10.0, 499.0, 501.0, 990.0] {
                let aligned = align_to_cycle(value, period, reference);
                let k = (aligned - value) / period;
                assert!((k - k.round()).abs() < 1e-9, "not a whole number of periods");
                assert!(
                    (aligned - reference).abs() <= period / 2.0,
                    "align({value}, {reference}) = {aligned}"
                );
            }
        }
    }

    #[test]
    fn test_align_half_period_rounds_to_even() {
        // 0.5 periods -> 0, 1.5 periods -> 2
        assert_eq!(align_to_cycle(0.0, 1000.0, 500.0), 0.0);
        assert_eq!(align_to_cycle(0.0, 1000.0, 1500.0), 2000.0);
        assert_eq!(align_to_cycle(0.0, 1000.0, -500.0), 0.0);
    }

    #[test]
    fn test_align_without_usable_period() {
        assert_eq!(align_to_cycle(10.0, 0.0, 990.0), 10.0);
        assert_eq!(align_to_cycle(10.0, f64::INFINITY, 990.0), 10.0);
    }

    #[test]
    fn test_project_takes_short_path_across_wrap() {
        let projection = CIRCLE.project(10.0, 990.0);
        assert_eq!(projection.canonical, 10.0);
        assert_eq!(projection.target, 1010.0);

        let bounded = Domain::from_limit(1000.0).project(1200.0, 0.0);
        assert_eq!(bounded.target, 1000.0);
        assert_eq!(bounded.canonical, 1000.0);
    }

    #[test]
    fn test_integrate_impulse_circular() {
        // wound up target is pulled back near the motion value
        let projection = CIRCLE.integrate_impulse(3990.0, 30.0, 995.0);
        assert_eq!(projection.target, 1020.0);
        assert_eq!(projection.canonical, 20.0);
    }

    #[test]
    fn test_integrate_impulse_bounded() {
        let domain = Domain::from_limit(100.0);
        let projection = domain.integrate_impulse(90.0, 30.0, 90.0);
        assert_eq!(projection.target, 100.0);
        assert_eq!(projection.canonical, 100.0);
    }

    #[test]
    fn test_unwrap_delta() {
        assert_eq!(CIRCLE.unwrap_delta(-980.0), 20.0);
        assert_eq!(CIRCLE.unwrap_delta(980.0), -20.0);
        assert_eq!(CIRCLE.unwrap_delta(100.0), 100.0);
        assert_eq!(Domain::AllUnbounded.unwrap_delta(980.0), 980.0);
    }

    #[test]
    fn test_progress() {
        let domain = Domain::Bounded {
            min: 100.0,
            max: 300.0,
        };
        assert_eq!(domain.progress(200.0), 0.5);
        assert_eq!(domain.progress(400.0), 1.0);
        assert_eq!(Domain::AllUnbounded.progress(50.0), 0.0);
        assert_eq!(CIRCLE.progress(250.0), 0.25);
    }

    #[test]
    fn test_validate() {
        assert!(Domain::Bounded { min: 0.0, max: 1.0 }.validate().is_ok());
        assert!(Domain::Bounded { min: 2.0, max: 1.0 }.validate().is_err());
        assert!(Domain::Circular { period: Some(0.0) }.validate().is_err());
        assert!(Domain::Circular { period: None }.validate().is_ok());
    }
}
