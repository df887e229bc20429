//! Lazy stream views over the oscillator's `advance` primitive.
//!
//! Wall-clock concerns (timestamping and pacing) live here, as thin
//! decorators over the pure recurrence, so the core stays deterministic.

use std::{
    thread,
    time::{Duration, Instant, SystemTime, UNIX_EPOCH},
};

use crate::HarmonicOscillator;

#[cfg(feature = "serde-derive")]
use serde::Serialize;

/// Converts a [`SystemTime`] to fractional seconds since the Unix epoch.
pub(crate) fn epoch_seconds(time: SystemTime) -> f64 {
    time.duration_since(UNIX_EPOCH)
        .expect("system clock is before the Unix epoch")
        .as_secs_f64()
}

/// One record of a timestamped sample stream.
///
/// `frequency` is the oscillator's constant ω in rad/s, repeated per record
/// for downstream consumers that expect self-describing tuples.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde-derive", derive(Serialize))]
pub struct Sample {
    /// Wall-clock capture time, epoch seconds.
    pub timestamp: f64,
    /// The sample position x_n.
    pub position: f64,
    /// The oscillator's angular frequency ω, rad/s.
    pub frequency: f64,
}

/// The infinite lazy stream of positions.
///
/// Created by [`HarmonicOscillator::positions`].
/// Never yields `None`; termination is caller-driven (a bounded `take`,
/// a loop break, or dropping the iterator).
#[derive(Debug)]
pub struct Positions<'a> {
    oscillator: &'a mut HarmonicOscillator,
}

impl<'a> Positions<'a> {
    pub(crate) fn new(oscillator: &'a mut HarmonicOscillator) -> Self {
        Self { oscillator }
    }
}

impl Iterator for Positions<'_> {
    type Item = f64;

    fn next(&mut self) -> Option<Self::Item> {
        Some(self.oscillator.advance())
    }
}

/// The infinite stream of `(wall_clock_timestamp, position)` pairs.
///
/// Created by [`HarmonicOscillator::timestamped`].
/// Each timestamp is captured immediately before its sample is computed.
#[derive(Debug)]
pub struct Timestamped<'a> {
    oscillator: &'a mut HarmonicOscillator,
}

impl<'a> Timestamped<'a> {
    pub(crate) fn new(oscillator: &'a mut HarmonicOscillator) -> Self {
        Self { oscillator }
    }
}

impl Iterator for Timestamped<'_> {
    type Item = (f64, f64);

    fn next(&mut self) -> Option<Self::Item> {
        let timestamp = epoch_seconds(SystemTime::now());
        Some((timestamp, self.oscillator.advance()))
    }
}

/// The infinite stream of [`Sample`] records.
///
/// Created by [`HarmonicOscillator::samples`].
#[derive(Debug)]
pub struct Samples<'a> {
    oscillator: &'a mut HarmonicOscillator,
}

impl<'a> Samples<'a> {
    pub(crate) fn new(oscillator: &'a mut HarmonicOscillator) -> Self {
        Self { oscillator }
    }
}

impl Iterator for Samples<'_> {
    type Item = Sample;

    fn next(&mut self) -> Option<Self::Item> {
        let timestamp = epoch_seconds(SystemTime::now());
        let position = self.oscillator.advance();
        Some(Sample {
            timestamp,
            position,
            frequency: self.oscillator.omega(),
        })
    }
}

/// The real-time-paced stream of `(wall_clock_timestamp, position)` pairs.
///
/// Created by [`HarmonicOscillator::paced`] (interval ε) or
/// [`HarmonicOscillator::paced_every`] (explicit interval).
/// After each sample the producing thread sleeps for the pacing interval
/// before the next sample can be pulled; a zero interval skips the sleep.
/// The sleep is the only suspension point and is cancelled by dropping the
/// iterator.
#[derive(Debug)]
pub struct Paced<'a> {
    oscillator: &'a mut HarmonicOscillator,
    interval: Duration,
    deadline: Option<Instant>,
    started: bool,
}

impl<'a> Paced<'a> {
    pub(crate) fn new(oscillator: &'a mut HarmonicOscillator, interval: Duration) -> Self {
        Self {
            oscillator,
            interval,
            deadline: None,
            started: false,
        }
    }

    /// Bounds the stream by elapsed wall-clock time.
    ///
    /// The clock starts when this method is called; once it has run out the
    /// stream yields `None` instead of producing further samples.
    /// A limit too large for the platform clock leaves the stream unbounded.
    #[must_use]
    pub fn for_duration(mut self, limit: Duration) -> Self {
        self.deadline = Instant::now().checked_add(limit);
        self
    }
}

impl Iterator for Paced<'_> {
    type Item = (f64, f64);

    fn next(&mut self) -> Option<Self::Item> {
        if self.started && !self.interval.is_zero() {
            thread::sleep(self.interval);
        }
        self.started = true;

        if let Some(deadline) = self.deadline {
            if Instant::now() >= deadline {
                return None;
            }
        }

        let timestamp = epoch_seconds(SystemTime::now());
        Some((timestamp, self.oscillator.advance()))
    }
}
