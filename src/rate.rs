//! # Rate estimator
//!
//! Two independent speed figures for the Moon:
//!
//! - the **range rate** (closing speed), a first-order finite difference of the
//!   Earth–Moon distance between two refresh ticks,
//! - the **orbital speed**, from the current distance alone through the
//!   vis-viva relation `v² = μ (2/r − 1/a)`.
//!
//! Both are expressed in miles per hour. A positive range rate means the Moon
//! is receding.
use hifitime::Epoch;

use crate::{
    constants::{
        Meter, Mile, MilesPerHour, GEOCENTRIC_MU, MILE_IN_METERS, MOON_SEMI_MAJOR_AXIS_M,
        SECONDS_PER_HOUR,
    },
    numeric::TrigMode,
};

/// Smallest elapsed time, in seconds, used as the finite-difference step.
pub const MIN_ELAPSED_SECONDS: f64 = 1.0;

/// Moon distance recorded at one tick, kept until the next one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EphemerisSample {
    pub distance_miles: Mile,
    pub timestamp: Epoch,
}

impl EphemerisSample {
    pub fn new(distance_miles: Mile, timestamp: Epoch) -> Self {
        EphemerisSample {
            distance_miles,
            timestamp,
        }
    }

    /// Range rate from this sample to a later one.
    ///
    /// Elapsed wall time below one second (zero, or a clock stepping back) is
    /// floored to [`MIN_ELAPSED_SECONDS`].
    pub fn range_rate_to(&self, next: &EphemerisSample) -> MilesPerHour {
        let elapsed = (next.timestamp - self.timestamp).to_seconds();
        range_rate(self.distance_miles, next.distance_miles, elapsed)
    }
}

/// Finite-difference range rate `3600 · (current − previous) / max(elapsed, 1)`.
///
/// Arguments
/// ---------
/// * `previous`: distance at the previous tick
/// * `current`: distance at this tick
/// * `elapsed_seconds`: wall time between the two ticks
///
/// Return
/// ------
/// * the distance change per hour, always finite for finite distances
pub fn range_rate(previous: Mile, current: Mile, elapsed_seconds: f64) -> MilesPerHour {
    SECONDS_PER_HOUR * (current - previous) / elapsed_seconds.max(MIN_ELAPSED_SECONDS)
}

/// Orbital speed of the Moon at `distance_miles` from the vis-viva equation.
///
/// The geocentric gravitational parameter and the mean semi-major axis of the
/// lunar orbit are fixed. The radicand is clamped at zero so a distance beyond
/// twice the semi-major axis yields zero rather than a NaN.
pub fn orbital_speed(distance_miles: Mile, trig: TrigMode) -> MilesPerHour {
    let r: Meter = distance_miles * MILE_IN_METERS;
    let v_squared = GEOCENTRIC_MU * (2.0 / r - 1.0 / MOON_SEMI_MAJOR_AXIS_M);

    // m/s -> mph
    trig.sqrt(v_squared.max(0.0)) * SECONDS_PER_HOUR / MILE_IN_METERS
}
