use std::time::{Duration, SystemTime};

use crate::{
    stream::{epoch_seconds, Paced, Positions, Samples, Timestamped},
    types::{AngularFrequency, InvalidParameter, StepSize},
};

#[cfg(feature = "serde-derive")]
use serde::{Deserialize, Serialize};

/// Continuous initial conditions for a [`HarmonicOscillator`].
///
/// The defaults describe a unit-amplitude cosine released from rest:
/// `position = 1.0`, `velocity = 0.0`, `phase = 0.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde-derive", derive(Serialize, Deserialize))]
pub struct InitialConditions {
    /// Initial position x₀.
    pub position: f64,
    /// Initial velocity v₀.
    pub velocity: f64,
    /// Constant phase offset φ, in radians.
    pub phase: f64,
}

impl Default for InitialConditions {
    fn default() -> Self {
        Self {
            position: 1.0,
            velocity: 0.0,
            phase: 0.0,
        }
    }
}

/// A read-only diagnostic snapshot of an oscillator's state.
///
/// Returned by [`HarmonicOscillator::state`].
/// Wall-clock fields are in seconds since the Unix epoch; `current_time` is
/// captured when the snapshot is taken.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde-derive", derive(Serialize))]
pub struct StateSnapshot {
    /// The older of the two retained samples, x_{n−1}.
    pub x_prev: f64,
    /// The most recent sample, x_n.
    pub x_curr: f64,
    /// Recurrence advances performed since construction or reset.
    pub step_count: u64,
    /// Angular frequency ω, rad/s.
    pub omega: f64,
    /// Step size ε, s.
    pub epsilon: f64,
    /// Phase offset φ, rad.
    pub phase: f64,
    /// When the oscillator was constructed, epoch seconds.
    pub start_time: f64,
    /// When this snapshot was taken, epoch seconds.
    pub current_time: f64,
}

/// A discrete-time sample source for a simple harmonic oscillator, driven by
/// the exact two-step recurrence `x_{n+1} = 2·cos(ω·ε)·x_n − x_{n−1}`.
///
/// The oscillator owns the two most recent samples, which together fully
/// determine every future sample.
/// They are seeded from the continuous analytical solution evaluated at
/// `t = 0` and `t = ε`, so the recurrence starts on the exact trajectory and
/// stays on it: the recurrence satisfies the oscillator's characteristic
/// equation, so there is no truncation error for any ε.
///
/// [`advance`](Self::advance) is the single primitive; bounded sequences,
/// eager batches, and the infinite, timestamped, and paced streams are all
/// derived views over it.
///
/// An oscillator is not safe for concurrent use; the stream views borrow it
/// mutably, so the borrow checker enforces one consumer at a time.
/// Concurrent consumers each need their own instance.
#[derive(Debug, Clone)]
pub struct HarmonicOscillator {
    omega: AngularFrequency,
    epsilon: StepSize,
    initial: InitialConditions,
    x_prev: f64,
    x_curr: f64,
    // Starts at 1: the analytic seeding of `x_curr` counts as the first
    // step. A zero-based count must be tracked by the caller.
    step_count: u64,
    start_time: SystemTime,
}

/// The continuous solution `x₀·cos(ω·t + φ) + (v₀/ω)·sin(ω·t + φ)`.
fn continuous_solution(t: f64, omega: f64, initial: InitialConditions) -> f64 {
    let angle = omega * t + initial.phase;
    initial.position * angle.cos() + (initial.velocity / omega) * angle.sin()
}

impl HarmonicOscillator {
    /// Creates an oscillator with default initial conditions
    /// (`x₀ = 1`, `v₀ = 0`, `φ = 0`).
    ///
    /// # Parameters
    ///
    /// - `omega`: angular frequency ω in rad/s; must be finite and nonzero.
    /// - `epsilon`: step size ε in seconds; must be finite and positive.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidParameter`] if either parameter fails validation.
    /// No partially-usable oscillator is produced on failure.
    pub fn new(omega: f64, epsilon: f64) -> Result<Self, InvalidParameter> {
        Self::with_initial_conditions(omega, epsilon, InitialConditions::default())
    }

    /// Creates an oscillator with explicit initial conditions.
    ///
    /// The two retained samples are seeded from the continuous solution at
    /// `t = 0` and `t = ε`, never from caller-supplied sample values, which
    /// guarantees the recurrence starts on the exact trajectory.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidParameter`] if `omega` is zero or non-finite, or if
    /// `epsilon` is non-positive or non-finite.
    pub fn with_initial_conditions(
        omega: f64,
        epsilon: f64,
        initial: InitialConditions,
    ) -> Result<Self, InvalidParameter> {
        let omega = AngularFrequency::new(omega)?;
        let epsilon = StepSize::new(epsilon)?;
        let (x_prev, x_curr) = Self::seed(omega, epsilon, initial);

        Ok(Self {
            omega,
            epsilon,
            initial,
            x_prev,
            x_curr,
            step_count: 1,
            start_time: SystemTime::now(),
        })
    }

    /// Evaluates the analytic seeding pair `(x(0), x(ε))`.
    fn seed(
        omega: AngularFrequency,
        epsilon: StepSize,
        initial: InitialConditions,
    ) -> (f64, f64) {
        (
            continuous_solution(0.0, omega.value(), initial),
            continuous_solution(epsilon.value(), omega.value(), initial),
        )
    }

    /// Advances the recurrence by one step and returns the new sample.
    ///
    /// Computes `x_{n+1} = 2·cos(ω·ε)·x_n − x_{n−1}`, then shifts the
    /// retained pair forward.
    /// Both old values are read before either is overwritten.
    ///
    /// Total and infallible: once construction has validated the
    /// parameters, no advance can fail.
    pub fn advance(&mut self) -> f64 {
        let x_next =
            2.0 * (self.omega.value() * self.epsilon.value()).cos() * self.x_curr - self.x_prev;
        self.x_prev = self.x_curr;
        self.x_curr = x_next;
        self.step_count += 1;
        x_next
    }

    /// Restores the oscillator to its construction-time trajectory.
    ///
    /// The retained samples are recomputed from the stored construction
    /// parameters (not from their current values) and `step_count` returns
    /// to 1.
    /// A reset instance reproduces exactly the sequence of a freshly
    /// constructed one with identical parameters.
    pub fn reset(&mut self) {
        let (x_prev, x_curr) = Self::seed(self.omega, self.epsilon, self.initial);
        self.x_prev = x_prev;
        self.x_curr = x_curr;
        self.step_count = 1;
    }

    /// Returns the angular frequency ω in rad/s.
    #[must_use]
    pub fn omega(&self) -> f64 {
        self.omega.value()
    }

    /// Returns the step size ε in seconds.
    #[must_use]
    pub fn epsilon(&self) -> f64 {
        self.epsilon.value()
    }

    /// Returns the phase offset φ in radians.
    #[must_use]
    pub fn phase(&self) -> f64 {
        self.initial.phase
    }

    /// Returns the number of recurrence advances since construction or
    /// reset, counting the analytic seeding as the first.
    #[must_use]
    pub fn step_count(&self) -> u64 {
        self.step_count
    }

    /// Takes a diagnostic snapshot of the oscillator's state.
    ///
    /// Read-only: taking a snapshot never advances the recurrence.
    #[must_use]
    pub fn state(&self) -> StateSnapshot {
        StateSnapshot {
            x_prev: self.x_prev,
            x_curr: self.x_curr,
            step_count: self.step_count,
            omega: self.omega.value(),
            epsilon: self.epsilon.value(),
            phase: self.initial.phase,
            start_time: epoch_seconds(self.start_time),
            current_time: epoch_seconds(SystemTime::now()),
        }
    }

    /// Returns the infinite lazy stream of positions.
    ///
    /// Restartable only via [`reset`](Self::reset) or a fresh instance;
    /// termination is caller-driven.
    pub fn positions(&mut self) -> Positions<'_> {
        Positions::new(self)
    }

    /// Returns a bounded sequence of exactly `count` positions.
    pub fn take_positions(&mut self, count: usize) -> impl Iterator<Item = f64> + '_ {
        self.positions().take(count)
    }

    /// Returns a bounded sequence of `(elapsed_discrete_time, position)`
    /// pairs.
    ///
    /// The k-th pair of a production call is labeled `k·ε`, with k
    /// restarting at 0 on every call.
    pub fn take_timed_positions(
        &mut self,
        count: usize,
    ) -> impl Iterator<Item = (f64, f64)> + '_ {
        let epsilon = self.epsilon();
        self.positions()
            .take(count)
            .enumerate()
            .map(move |(k, position)| (k as f64 * epsilon, position))
    }

    /// Returns the infinite stream of `(wall_clock_timestamp, position)`
    /// pairs, with timestamps in epoch seconds.
    ///
    /// Each timestamp is captured immediately before its sample is
    /// computed.
    pub fn timestamped(&mut self) -> Timestamped<'_> {
        Timestamped::new(self)
    }

    /// Returns the infinite stream of [`Sample`](crate::Sample) records
    /// (timestamp, position, and the constant frequency ω).
    pub fn samples(&mut self) -> Samples<'_> {
        Samples::new(self)
    }

    /// Returns the real-time-paced timestamped stream, sleeping ε of
    /// wall-clock time between successive samples.
    ///
    /// Discrete time and wall-clock time remain independent quantities;
    /// the sleep couples them only loosely.
    pub fn paced(&mut self) -> Paced<'_> {
        let interval = self.epsilon.as_duration();
        Paced::new(self, interval)
    }

    /// Returns the real-time-paced timestamped stream with an explicit
    /// pacing interval.
    ///
    /// A zero interval skips the sleep entirely, degenerating to the
    /// unpaced stream.
    pub fn paced_every(&mut self, interval: Duration) -> Paced<'_> {
        Paced::new(self, interval)
    }

    /// Eagerly produces a dense batch of `count` positions.
    #[must_use]
    pub fn batch(&mut self, count: usize) -> Vec<f64> {
        self.take_positions(count).collect()
    }

    /// Eagerly produces a dense batch of `count`
    /// `(wall_clock_timestamp, position)` pairs.
    #[must_use]
    pub fn timestamped_batch(&mut self, count: usize) -> Vec<(f64, f64)> {
        self.timestamped().take(count).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::f64::consts::FRAC_PI_4;

    use approx::{assert_abs_diff_eq, assert_relative_eq};

    #[test]
    fn zero_angular_frequency_fails() {
        assert_eq!(
            HarmonicOscillator::new(0.0, 0.01).unwrap_err(),
            InvalidParameter::AngularFrequency(0.0)
        );
    }

    #[test]
    fn non_positive_step_size_fails() {
        assert_eq!(
            HarmonicOscillator::new(1.0, 0.0).unwrap_err(),
            InvalidParameter::StepSize(0.0)
        );
        assert_eq!(
            HarmonicOscillator::new(1.0, -0.01).unwrap_err(),
            InvalidParameter::StepSize(-0.01)
        );
    }

    #[test]
    fn nan_parameters_fail() {
        assert!(HarmonicOscillator::new(f64::NAN, 0.01).is_err());
        assert!(HarmonicOscillator::new(1.0, f64::NAN).is_err());
    }

    #[test]
    fn seeds_from_the_continuous_solution() {
        let initial = InitialConditions {
            position: 0.5,
            velocity: 1.5,
            phase: 0.3,
        };
        let oscillator = HarmonicOscillator::with_initial_conditions(2.0, 0.1, initial).unwrap();

        let state = oscillator.state();
        assert_relative_eq!(
            state.x_prev,
            0.5 * 0.3_f64.cos() + (1.5 / 2.0) * 0.3_f64.sin()
        );
        assert_relative_eq!(
            state.x_curr,
            0.5 * 0.5_f64.cos() + (1.5 / 2.0) * 0.5_f64.sin()
        );
    }

    #[test]
    fn first_advance_matches_the_continuous_solution_at_two_steps() {
        let mut oscillator = HarmonicOscillator::new(1.0, 0.01).unwrap();

        // 2·cos(0.01)·cos(0.01) − cos(0) = cos(0.02).
        let first = oscillator.advance();
        assert_abs_diff_eq!(first, 0.02_f64.cos(), epsilon = 1e-15);
    }

    #[test]
    fn advances_track_the_continuous_solution() {
        let initial = InitialConditions {
            position: 1.0,
            velocity: 0.5,
            phase: 0.2,
        };
        let mut oscillator = HarmonicOscillator::with_initial_conditions(3.0, 0.05, initial).unwrap();

        // The n-th advance lands on the continuous solution at t = (n+1)·ε.
        for n in 1_u32..=100 {
            let t = f64::from(n + 1) * 0.05;
            let expected = continuous_solution(t, 3.0, initial);
            assert_abs_diff_eq!(oscillator.advance(), expected, epsilon = 1e-12);
        }
    }

    #[test]
    fn snapshot_after_construction_reports_the_seeding_convention() {
        let initial = InitialConditions {
            phase: FRAC_PI_4,
            ..InitialConditions::default()
        };
        let oscillator = HarmonicOscillator::with_initial_conditions(2.0, 0.01, initial).unwrap();

        let state = oscillator.state();
        assert_eq!(state.step_count, 1, "seeding counts as the first step");
        assert_relative_eq!(state.x_curr, (0.02 + FRAC_PI_4).cos());
        assert_eq!(state.omega, 2.0);
        assert_eq!(state.epsilon, 0.01);
        assert_eq!(state.phase, FRAC_PI_4);
        assert!(state.current_time >= state.start_time);
    }

    #[test]
    fn snapshot_is_read_only() {
        let mut oscillator = HarmonicOscillator::new(1.0, 0.01).unwrap();
        let before = oscillator.state();
        let _ = oscillator.state();
        let after = oscillator.state();

        assert_eq!(before.x_prev, after.x_prev);
        assert_eq!(before.x_curr, after.x_curr);
        assert_eq!(before.step_count, after.step_count);
    }

    #[test]
    fn reset_reproduces_a_fresh_instance_exactly() {
        let initial = InitialConditions {
            position: 0.8,
            velocity: -0.3,
            phase: 0.1,
        };
        let mut fresh = HarmonicOscillator::with_initial_conditions(1.7, 0.02, initial).unwrap();
        let mut reused = HarmonicOscillator::with_initial_conditions(1.7, 0.02, initial).unwrap();

        // Disturb the reused instance, then reset it.
        for _ in 0..57 {
            reused.advance();
        }
        reused.reset();
        assert_eq!(reused.step_count(), 1);

        let expected: Vec<f64> = (0..200).map(|_| fresh.advance()).collect();
        let replayed: Vec<f64> = (0..200).map(|_| reused.advance()).collect();
        assert_eq!(replayed, expected, "reset must replay the sequence bitwise");
    }

    #[test]
    fn step_count_counts_advances_from_one() {
        let mut oscillator = HarmonicOscillator::new(1.0, 0.01).unwrap();
        assert_eq!(oscillator.step_count(), 1);

        oscillator.advance();
        oscillator.advance();
        assert_eq!(oscillator.step_count(), 3);
    }

    #[test]
    fn negative_frequency_is_valid() {
        let mut oscillator = HarmonicOscillator::new(-2.0, 0.01).unwrap();

        // cos is even, so with v₀ = 0 the trajectory matches +ω.
        let first = oscillator.advance();
        assert_abs_diff_eq!(first, 0.04_f64.cos(), epsilon = 1e-15);
    }
}
