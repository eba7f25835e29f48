use thiserror::Error;

/// Milliseconds of catch-up one `advance` call represents: one simulation
/// frame at the nominal 60hz pulse rate.
pub const TICK_BUDGET_MS: f32 = 16.0;

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum InterpolationError {
    /// The target was rejected, not clamped; the interpolator's value is
    /// unchanged so the caller can surface a diagnostic.
    #[error("target {value} outside declared bounds [{min}, {max}]")]
    TargetOutOfRange { value: f32, min: f32, max: f32 },
}

/// The value space an interpolator operates in.
///
/// `Scalar` carries inclusive bounds and an optional pre-smoothing
/// transform. The transform is configuration data for properties with a
/// domain-specific wire encoding (e.g. a property transmitted on an
/// inverted scale): it runs on the incoming target before smoothing, so
/// interpolation happens in the semantically linear space.
#[derive(Clone, Copy, Debug)]
pub enum ValueDomain {
    Scalar {
        min: f32,
        max: f32,
        transform: Option<fn(f32) -> f32>,
    },
    /// Degrees, wrapped into [0, 360); always interpolates the short way
    /// around the seam.
    Angular,
}

impl ValueDomain {
    pub fn scalar(min: f32, max: f32) -> Self {
        ValueDomain::Scalar {
            min,
            max,
            transform: None,
        }
    }

    pub fn scalar_with_transform(min: f32, max: f32, transform: fn(f32) -> f32) -> Self {
        ValueDomain::Scalar {
            min,
            max,
            transform: Some(transform),
        }
    }
}

/// Smoothing primitive for one remotely-driven continuous value.
///
/// `set_target` records where the value should end up and how long the gap
/// since the previous authoritative update was; `advance`, called once per
/// tick, closes a fraction of the remaining distance. A long gap between
/// updates yields a slower per-tick catch-up (no jarring corrections when
/// updates are sparse); a short gap tracks snappily; a zero/unknown gap
/// snaps outright.
#[derive(Clone, Copy, Debug)]
pub struct ValueInterpolator {
    domain: ValueDomain,
    current: f32,
    target: f32,
    rate: f32,
}

impl ValueInterpolator {
    pub fn new(domain: ValueDomain, initial: f32) -> Self {
        let initial = match domain {
            ValueDomain::Scalar { .. } => initial,
            ValueDomain::Angular => normalize_degrees(initial),
        };
        Self {
            domain,
            current: initial,
            target: initial,
            rate: 1.0,
        }
    }

    /// Record a new authoritative target. Does not move the current value;
    /// that happens on subsequent `advance` calls.
    pub fn set_target(
        &mut self,
        value: f32,
        last_interval_ms: u64,
    ) -> Result<(), InterpolationError> {
        let target = match self.domain {
            ValueDomain::Scalar {
                min,
                max,
                transform,
            } => {
                let value = match transform {
                    Some(f) => f(value),
                    None => value,
                };
                if !(min..=max).contains(&value) {
                    return Err(InterpolationError::TargetOutOfRange { value, min, max });
                }
                value
            }
            ValueDomain::Angular => normalize_degrees(value),
        };

        self.target = target;
        self.rate = if last_interval_ms == 0 {
            1.0
        } else {
            (TICK_BUDGET_MS / last_interval_ms as f32).min(1.0)
        };
        Ok(())
    }

    /// Advance one tick toward the target and return the new current value.
    /// Total over its input domain: equal current/target and rate 1.0 are
    /// both fine.
    pub fn advance(&mut self) -> f32 {
        let remaining = match self.domain {
            ValueDomain::Scalar { .. } => self.target - self.current,
            ValueDomain::Angular => shortest_arc_degrees(self.current, self.target),
        };

        self.current += remaining * self.rate;
        if let ValueDomain::Angular = self.domain {
            self.current = normalize_degrees(self.current);
        }
        self.current
    }

    /// Authoritative bypass: pin current and target to the given value with
    /// no smoothing and no lag. The value is taken as already being in
    /// applied space; no transform runs.
    pub fn snap_to(&mut self, value: f32) {
        let value = match self.domain {
            ValueDomain::Scalar { .. } => value,
            ValueDomain::Angular => normalize_degrees(value),
        };
        self.current = value;
        self.target = value;
        self.rate = 1.0;
    }

    pub fn current(&self) -> f32 {
        self.current
    }

    pub fn target(&self) -> f32 {
        self.target
    }
}

fn normalize_degrees(value: f32) -> f32 {
    value.rem_euclid(360.0)
}

/// Signed shortest arc from `from` to `to`, in (-180, 180].
fn shortest_arc_degrees(from: f32, to: f32) -> f32 {
    let mut arc = (to - from).rem_euclid(360.0);
    if arc > 180.0 {
        arc -= 360.0;
    }
    arc
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_advance_converges_monotonically_without_overshoot() {
        let mut interp = ValueInterpolator::new(ValueDomain::scalar(0.0, 100.0), 0.0);
        interp.set_target(80.0, 160).unwrap();

        let mut previous = interp.current();
        for _ in 0..200 {
            let value = interp.advance();
            assert!(value >= previous, "must move toward the target");
            assert!(value <= 80.0, "must not overshoot");
            previous = value;
        }
        assert!((interp.current() - 80.0).abs() < 1.0);
    }

    #[test]
    fn zero_interval_snaps_on_the_next_advance() {
        let mut interp = ValueInterpolator::new(ValueDomain::scalar(0.0, 100.0), 10.0);
        interp.set_target(60.0, 0).unwrap();

        assert_eq!(interp.advance(), 60.0);
    }

    #[test]
    fn short_interval_tracks_faster_than_long() {
        let mut snappy = ValueInterpolator::new(ValueDomain::scalar(0.0, 100.0), 0.0);
        let mut sluggish = ValueInterpolator::new(ValueDomain::scalar(0.0, 100.0), 0.0);

        snappy.set_target(100.0, 32).unwrap();
        sluggish.set_target(100.0, 320).unwrap();

        assert!(snappy.advance() > sluggish.advance());
    }

    #[test]
    fn out_of_range_target_is_rejected_not_clamped() {
        let mut interp = ValueInterpolator::new(ValueDomain::scalar(0.0, 100.0), 25.0);

        let result = interp.set_target(150.0, 100);

        assert_eq!(
            result,
            Err(InterpolationError::TargetOutOfRange {
                value: 150.0,
                min: 0.0,
                max: 100.0
            })
        );
        assert_eq!(interp.target(), 25.0);
        assert_eq!(interp.advance(), 25.0);
    }

    #[test]
    fn inverted_scale_transform_runs_before_smoothing() {
        fn uninvert(value: f32) -> f32 {
            5000.0 - value
        }
        let mut interp =
            ValueInterpolator::new(ValueDomain::scalar_with_transform(0.0, 5000.0, uninvert), 0.0);

        interp.set_target(1000.0, 0).unwrap();

        assert_eq!(interp.advance(), 4000.0);
    }

    #[test]
    fn angular_interpolation_takes_the_shortest_path() {
        let mut interp = ValueInterpolator::new(ValueDomain::Angular, 350.0);
        interp.set_target(10.0, 160).unwrap();

        // Crossing the 360/0 seam means passing through values near 360/0,
        // never swinging back through 180.
        let first = interp.advance();
        assert!(
            first > 350.0 || first < 10.0,
            "moved through the seam, got {first}"
        );

        for _ in 0..200 {
            interp.advance();
        }
        let arc_left = (interp.current() - 10.0).abs();
        assert!(arc_left < 1.0 || arc_left > 359.0);
    }

    #[test]
    fn angular_targets_normalize_into_range() {
        let mut interp = ValueInterpolator::new(ValueDomain::Angular, 0.0);
        interp.set_target(370.0, 0).unwrap();

        assert_eq!(interp.target(), 10.0);
    }

    #[test]
    fn snap_to_bypasses_smoothing() {
        let mut interp = ValueInterpolator::new(ValueDomain::scalar(0.0, 100.0), 0.0);
        interp.set_target(90.0, 500).unwrap();

        interp.snap_to(42.0);

        assert_eq!(interp.current(), 42.0);
        assert_eq!(interp.advance(), 42.0);
    }
}
