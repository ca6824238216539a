use crate::domain::ValueDomain;
use crate::math::{needle_angle_to_value, value_to_needle_angle};

/// The current needle position, in internal radians.
///
/// This is the single source of truth for where the control points. The
/// control value is derived on demand by clamping and snapping through the
/// [`ValueDomain`]; the raw angle itself is only constrained by whoever
/// sets it (drag updates clamp in the radian range before calling
/// [`NeedleState::set_angle_direct`]).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NeedleState {
    angle: f64,
}

impl NeedleState {
    /// A needle pointing at `value` (clamped and snapped).
    pub fn from_value(domain: &ValueDomain, value: f64) -> Self {
        let mut needle = Self { angle: 0.0 };
        needle.set_value(domain, value);
        needle
    }

    /// The internal needle angle in radians.
    pub fn angle(&self) -> f64 {
        self.angle
    }

    /// The control value derived from the needle angle: converted to
    /// degrees, clamped into the range, snapped to the nearest legal value.
    pub fn value(&self, domain: &ValueDomain) -> f64 {
        let degrees = domain.range().clamp_value(needle_angle_to_value(self.angle));
        snapped(domain, degrees)
    }

    /// Point the needle at `value`, clamping and snapping first.
    ///
    /// Snapping applies even when `value` is already legal, so assigning
    /// the current value back never moves the needle. Returns `true` if
    /// the angle changed.
    pub fn set_value(&mut self, domain: &ValueDomain, value: f64) -> bool {
        let target = snapped(domain, domain.range().clamp_value(value));
        self.set_angle_direct(value_to_needle_angle(target))
    }

    /// Store a raw needle angle, used by drag updates.
    ///
    /// The caller clamps in the radian range; no value-domain clamping
    /// happens here. Returns `true` if the angle changed.
    pub fn set_angle_direct(&mut self, angle: f64) -> bool {
        if self.angle == angle {
            false
        } else {
            self.angle = angle;
            true
        }
    }
}

fn snapped(domain: &ValueDomain, degrees: f64) -> f64 {
    match domain.nearest_legal_value(degrees) {
        Ok(value) => value,
        // The domain re-validates on every configure, so an empty table
        // here is a programming error.
        Err(err) => unreachable!("{err}"),
    }
}
