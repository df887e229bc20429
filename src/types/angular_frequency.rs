use std::fmt;

use super::InvalidParameter;

#[cfg(feature = "serde-derive")]
use serde::Serialize;

/// The oscillator's characteristic frequency ω, in radians per second.
///
/// `AngularFrequency` wraps an `f64` while enforcing that the value is
/// finite and nonzero.
/// Both the recurrence coefficient and the analytical initialization divide
/// by ω, so a zero value can never be allowed to reach them.
/// Negative frequencies are valid: they trace the same trajectory with the
/// velocity term mirrored.
///
/// # Construction
///
/// ```
/// use harmonic_stream::AngularFrequency;
///
/// let omega = AngularFrequency::new(2.0)?;
/// assert_eq!(omega.value(), 2.0);
///
/// assert!(AngularFrequency::new(0.0).is_err());
/// # Ok::<(), harmonic_stream::InvalidParameter>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde-derive", derive(Serialize))]
pub struct AngularFrequency(f64);

impl AngularFrequency {
    /// Constructs an `AngularFrequency` from a value in rad/s.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidParameter::AngularFrequency`] if the value is zero,
    /// NaN, or infinite.
    pub fn new(radians_per_second: f64) -> Result<Self, InvalidParameter> {
        if radians_per_second.is_finite() && radians_per_second != 0.0 {
            Ok(Self(radians_per_second))
        } else {
            Err(InvalidParameter::AngularFrequency(radians_per_second))
        }
    }

    /// Returns the frequency in rad/s.
    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for AngularFrequency {
    type Error = InvalidParameter;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for AngularFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} rad/s", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positive_and_negative_frequencies_are_ok() {
        assert_eq!(AngularFrequency::new(1.5).unwrap().value(), 1.5);
        assert_eq!(AngularFrequency::new(-2.0).unwrap().value(), -2.0);
    }

    #[test]
    fn zero_frequency_fails() {
        assert_eq!(
            AngularFrequency::new(0.0),
            Err(InvalidParameter::AngularFrequency(0.0))
        );
    }

    #[test]
    fn non_finite_frequency_fails() {
        assert!(AngularFrequency::new(f64::NAN).is_err(), "NaN is not ok");
        assert!(AngularFrequency::new(f64::INFINITY).is_err());
        assert!(AngularFrequency::new(f64::NEG_INFINITY).is_err());
    }

    #[test]
    fn displays_with_unit() {
        let omega = AngularFrequency::new(2.0).unwrap();
        assert_eq!(omega.to_string(), "2 rad/s");
    }
}
