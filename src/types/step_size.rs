use std::{fmt, time::Duration};

use super::InvalidParameter;

#[cfg(feature = "serde-derive")]
use serde::Serialize;

/// The strictly positive time increment ε between successive samples,
/// in seconds.
///
/// `StepSize` wraps an `f64` while enforcing that the duration is finite and
/// strictly greater than zero, so discrete time always advances forward.
/// The exact recurrence holds for *any* positive ε; no upper bound is
/// imposed.
///
/// # Construction
///
/// ```
/// use harmonic_stream::StepSize;
///
/// let epsilon = StepSize::new(0.01)?;
/// assert_eq!(epsilon.value(), 0.01);
///
/// assert!(StepSize::new(0.0).is_err());
/// assert!(StepSize::new(-0.01).is_err());
/// # Ok::<(), harmonic_stream::InvalidParameter>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde-derive", derive(Serialize))]
pub struct StepSize(f64);

impl StepSize {
    /// Constructs a `StepSize` from a duration in seconds.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidParameter::StepSize`] if the value is zero,
    /// negative, NaN, or infinite.
    pub fn new(seconds: f64) -> Result<Self, InvalidParameter> {
        if seconds.is_finite() && seconds > 0.0 {
            Ok(Self(seconds))
        } else {
            Err(InvalidParameter::StepSize(seconds))
        }
    }

    /// Returns the step size in seconds.
    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }

    /// Returns the step size as a [`Duration`] for wall-clock pacing.
    ///
    /// Saturates to `Duration::MAX` for step sizes beyond what `Duration`
    /// can represent.
    #[must_use]
    pub fn as_duration(self) -> Duration {
        Duration::try_from_secs_f64(self.0).unwrap_or(Duration::MAX)
    }
}

impl TryFrom<f64> for StepSize {
    type Error = InvalidParameter;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for StepSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} s", self.0)
    }
}
