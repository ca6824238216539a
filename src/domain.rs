use smallvec::SmallVec;
use thiserror::Error;

use crate::math::value_to_needle_angle;

/// Errors surfaced when configuring the value domain.
///
/// Invalid configuration is never silently clamped; the previous
/// configuration stays in effect.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ConfigError {
    /// The angle range must satisfy `0 <= lower <= upper <= 180` (degrees).
    #[error("invalid angle range {lower}..={upper}: must satisfy 0 <= lower <= upper <= 180")]
    InvalidRange { lower: f64, upper: f64 },
    /// The step value must be a positive number of degrees.
    #[error("invalid step value {0}: must be greater than zero")]
    InvalidStep(f64),
}

/// The legal value set is empty.
///
/// Unreachable through validated configuration; callers treat it as a
/// programming error, not a recoverable condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("the legal value set is empty")]
pub struct EmptyDomainError;

/// The range between the minimum and maximum selectable value, in degrees.
///
/// A value of `0` points at the leftmost point of the arc and `180` at the
/// rightmost, sweeping clockwise over the half-circle.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AngleRange {
    lower: f64,
    upper: f64,
}

impl Default for AngleRange {
    fn default() -> Self {
        Self::FULL
    }
}

impl AngleRange {
    /// The full half-circle from `0` to `180` degrees.
    pub const FULL: Self = Self {
        lower: 0.0,
        upper: 180.0,
    };

    /// A validated range in degrees.
    ///
    /// # Errors
    ///
    /// [`ConfigError::InvalidRange`] unless `0 <= lower <= upper <= 180`.
    /// Non-finite bounds fail the same way.
    pub fn new(lower: f64, upper: f64) -> Result<Self, ConfigError> {
        if !(lower >= 0.0 && upper <= 180.0 && lower <= upper) {
            log::warn!("rejected angle range {lower}..={upper}");
            return Err(ConfigError::InvalidRange { lower, upper });
        }
        Ok(Self { lower, upper })
    }

    pub fn lower(&self) -> f64 {
        self.lower
    }

    pub fn upper(&self) -> f64 {
        self.upper
    }

    /// `upper - lower` in degrees.
    pub fn span(&self) -> f64 {
        self.upper - self.lower
    }

    /// Clamp a value in degrees into this range.
    pub fn clamp_value(&self, value: f64) -> f64 {
        value.clamp(self.lower, self.upper)
    }

    /// The smallest needle angle (radians) corresponding to this range.
    pub fn min_needle_angle(&self) -> f64 {
        value_to_needle_angle(self.lower)
    }

    /// The largest needle angle (radians) corresponding to this range.
    pub fn max_needle_angle(&self) -> f64 {
        value_to_needle_angle(self.upper)
    }

    /// Clamp a needle angle (radians) into the interval corresponding to
    /// this range.
    pub fn clamp_needle_angle(&self, angle: f64) -> f64 {
        angle.clamp(self.min_needle_angle(), self.max_needle_angle())
    }
}

/// The finite, step-quantized set of selectable values derived from an
/// [`AngleRange`] and a step value.
///
/// The table strides from `lower` to `upper` by `step`, terminating at or
/// before `upper` (`upper` itself is included only when the stride lands on
/// it exactly). It is never empty: `lower` is always a member.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueDomain {
    range: AngleRange,
    step: f64,
    values: SmallVec<[f64; 32]>,
}

impl Default for ValueDomain {
    fn default() -> Self {
        Self {
            range: AngleRange::FULL,
            step: Self::DEFAULT_STEP,
            values: stride(AngleRange::FULL, Self::DEFAULT_STEP),
        }
    }
}

impl ValueDomain {
    /// The default step of one degree per increment.
    pub const DEFAULT_STEP: f64 = 1.0;

    /// # Errors
    ///
    /// [`ConfigError::InvalidStep`] if `step` is not a positive number.
    pub fn new(range: AngleRange, step: f64) -> Result<Self, ConfigError> {
        let mut domain = Self {
            range,
            step: Self::DEFAULT_STEP,
            values: SmallVec::new(),
        };
        domain.configure(range, step)?;
        Ok(domain)
    }

    /// Replace the range and step, recomputing the legal value table.
    ///
    /// On error the previous configuration is left fully intact. (An
    /// invalid range cannot reach this point: [`AngleRange::new`] already
    /// rejects it.)
    ///
    /// # Errors
    ///
    /// [`ConfigError::InvalidStep`] if `step` is not a positive number.
    pub fn configure(&mut self, range: AngleRange, step: f64) -> Result<(), ConfigError> {
        if !(step > 0.0) {
            log::warn!("rejected step value {step}");
            return Err(ConfigError::InvalidStep(step));
        }

        self.range = range;
        self.step = step;
        self.values = stride(range, step);
        Ok(())
    }

    pub fn range(&self) -> AngleRange {
        self.range
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    /// The legal values in ascending order.
    pub fn legal_values(&self) -> &[f64] {
        &self.values
    }

    /// `true` if only a single value is selectable.
    pub fn is_single_valued(&self) -> bool {
        self.values.len() == 1
    }

    /// The legal value nearest to `candidate`.
    ///
    /// Ties resolve to the lower value (the first encountered in ascending
    /// order).
    ///
    /// # Errors
    ///
    /// [`EmptyDomainError`] if the table is empty, which validated
    /// configuration makes unreachable.
    pub fn nearest_legal_value(&self, candidate: f64) -> Result<f64, EmptyDomainError> {
        let (first, rest) = self.values.split_first().ok_or(EmptyDomainError)?;

        let mut nearest = *first;
        for &value in rest {
            if (value - candidate).abs() < (nearest - candidate).abs() {
                nearest = value;
            }
        }
        Ok(nearest)
    }

    /// The smallest legal value (always the range's lower bound).
    pub fn min_value(&self) -> f64 {
        self.values[0]
    }

    /// The largest legal value.
    pub fn max_value(&self) -> f64 {
        self.values[self.values.len() - 1]
    }
}

fn stride(range: AngleRange, step: f64) -> SmallVec<[f64; 32]> {
    let mut values = SmallVec::new();
    let mut value = range.lower();
    while value <= range.upper() {
        values.push(value);
        value += step;
    }
    values
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_domain() {
        let domain = ValueDomain::default();
        assert_eq!(domain.legal_values().len(), 181);
        assert_eq!(domain.min_value(), 0.0);
        assert_eq!(domain.max_value(), 180.0);
    }

    #[test]
    fn test_invalid_ranges_rejected() {
        assert_eq!(
            AngleRange::new(-1.0, 10.0),
            Err(ConfigError::InvalidRange {
                lower: -1.0,
                upper: 10.0
            })
        );
        assert!(AngleRange::new(0.0, 180.1).is_err());
        assert!(AngleRange::new(90.0, 10.0).is_err());
        assert!(AngleRange::new(f64::NAN, 90.0).is_err());
        assert!(AngleRange::new(0.0, f64::NAN).is_err());

        assert!(AngleRange::new(0.0, 0.0).is_ok());
        assert!(AngleRange::new(180.0, 180.0).is_ok());
    }

    #[test]
    fn test_invalid_steps_rejected() {
        for step in [0.0, -1.0] {
            assert_eq!(
                ValueDomain::new(AngleRange::FULL, step),
                Err(ConfigError::InvalidStep(step))
            );
        }

        // NaN fails closed (it compares unequal to itself, so match on the
        // variant instead).
        let result = ValueDomain::new(AngleRange::FULL, f64::NAN);
        assert!(matches!(result, Err(ConfigError::InvalidStep(_))));
    }

    #[test]
    fn test_table_shape() {
        let range = AngleRange::new(30.0, 120.0).unwrap();
        let domain = ValueDomain::new(range, 7.0).unwrap();

        let values = domain.legal_values();
        assert_eq!(values[0], range.lower());
        assert!(values.windows(2).all(|w| w[0] < w[1]));
        assert!(values
            .iter()
            .all(|&v| v >= range.lower() && v <= range.upper()));
        assert_eq!(domain.max_value(), 114.0);
    }

    #[test]
    fn test_upper_bound_included_when_reached_exactly() {
        let domain = ValueDomain::new(AngleRange::FULL, 45.0).unwrap();
        assert_eq!(domain.legal_values(), &[0.0, 45.0, 90.0, 135.0, 180.0]);
    }

    #[test]
    fn test_nearest_legal_value() {
        let domain = ValueDomain::new(AngleRange::FULL, 10.0).unwrap();

        assert_eq!(domain.nearest_legal_value(47.0), Ok(50.0));
        assert_eq!(domain.nearest_legal_value(-20.0), Ok(0.0));
        assert_eq!(domain.nearest_legal_value(500.0), Ok(180.0));

        // Equidistant candidates resolve to the lower value.
        assert_eq!(domain.nearest_legal_value(45.0), Ok(40.0));
    }

    #[test]
    fn test_single_valued_domain() {
        let range = AngleRange::new(42.0, 42.0).unwrap();
        let domain = ValueDomain::new(range, 5.0).unwrap();

        assert!(domain.is_single_valued());
        assert_eq!(domain.nearest_legal_value(0.0), Ok(42.0));
        assert_eq!(domain.min_value(), domain.max_value());
    }

    #[test]
    fn test_failed_configure_keeps_previous_configuration() {
        let mut domain = ValueDomain::new(AngleRange::FULL, 10.0).unwrap();
        let before = domain.clone();

        assert!(domain.configure(AngleRange::FULL, -3.0).is_err());
        assert_eq!(domain, before);
    }

    #[test]
    fn test_needle_angle_interval() {
        use std::f64::consts::PI;

        let range = AngleRange::FULL;
        assert!((range.min_needle_angle() + PI).abs() < 1e-9);
        assert!(range.max_needle_angle().abs() < 1e-9);

        let clamped = range.clamp_needle_angle(0.5);
        assert_eq!(clamped, range.max_needle_angle());
    }
}
