//! An exactly discretized harmonic oscillator sample stream.
//!
//! This crate generates the discrete-time trajectory of a simple harmonic
//! oscillator using the exact two-step recurrence
//!
//! ```text
//!   x_{n+1} = 2·cos(ω·ε)·x_n − x_{n−1}
//! ```
//!
//! which reproduces the continuous solution
//! `x(t) = x₀·cos(ω·t + φ) + (v₀/ω)·sin(ω·t + φ)` at every sample point
//! `t = n·ε` to floating-point precision, for any step size ε.
//! Unlike finite-difference schemes there is no truncation error, so the
//! sequence never drifts from the analytical trajectory.
//!
//! The core is a single stateful unit, [`HarmonicOscillator`], which owns the
//! two most recent samples and produces the next one on demand via
//! [`advance`](HarmonicOscillator::advance).
//! Every other access pattern — bounded sequences, eager batches, infinite
//! streams, wall-clock-timestamped and real-time-paced streams — is a thin
//! view over that one primitive, so the recurrence itself stays deterministic
//! and trivially testable.
//!
//! # Example
//!
//! ```
//! use harmonic_stream::HarmonicOscillator;
//!
//! let mut oscillator = HarmonicOscillator::new(1.0, 0.01)?;
//!
//! // The first advance lands exactly on the continuous solution at t = 2ε.
//! let first = oscillator.advance();
//! assert!((first - (0.02_f64).cos()).abs() < 1e-12);
//!
//! // Bounded iteration routes through the same primitive.
//! let positions: Vec<f64> = oscillator.take_positions(100).collect();
//! assert_eq!(positions.len(), 100);
//! # Ok::<(), harmonic_stream::InvalidParameter>(())
//! ```

mod oscillator;
mod stream;
mod types;

pub use oscillator::{HarmonicOscillator, InitialConditions, StateSnapshot};
pub use stream::{Paced, Positions, Sample, Samples, Timestamped};
pub use types::{AngularFrequency, InvalidParameter, StepSize};
