mod angular_frequency;
mod step_size;

pub use angular_frequency::AngularFrequency;
pub use step_size::StepSize;

use thiserror::Error;

/// Error returned when a construction parameter fails validation.
///
/// Parameter validation happens once, at construction time.
/// A failed construction produces no oscillator, so an invalid value can
/// never reach the recurrence, where it would silently generate NaNs.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum InvalidParameter {
    /// The angular frequency was zero or not finite.
    ///
    /// Initialization divides by ω, so zero is never acceptable.
    #[error("angular frequency must be finite and nonzero, got {0} rad/s")]
    AngularFrequency(f64),

    /// The step size was non-positive or not finite.
    #[error("step size must be finite and strictly positive, got {0} s")]
    StepSize(f64),
}
