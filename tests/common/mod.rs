#![allow(dead_code)]

use approx::assert_abs_diff_eq;
use hifitime::Epoch;
use luna::engine::{EngineConfig, LunaEngine};
use luna::ephemeris::EphemerisResult;
use luna::numeric::TrigMode;

pub fn engine(trig_mode: TrigMode) -> LunaEngine {
    LunaEngine::new(EngineConfig::new(trig_mode))
}

pub fn utc(year: i32, month: u8, day: u8, hour: u8, minute: u8, second: u8) -> Epoch {
    Epoch::from_gregorian_utc(year, month, day, hour, minute, second, 0)
}

/// Smallest difference between two angles in degrees, in `[0, 180]`.
pub fn angle_diff(a: f64, b: f64) -> f64 {
    let d = (a - b).rem_euclid(360.0);
    d.min(360.0 - d)
}

pub fn assert_result_close(actual: &EphemerisResult, expected: &EphemerisResult, epsilon: f64) {
    assert!(
        angle_diff(actual.moon_hour_angle_deg, expected.moon_hour_angle_deg) < epsilon,
        "moon hour angle {} vs {}",
        actual.moon_hour_angle_deg,
        expected.moon_hour_angle_deg
    );
    assert!(
        angle_diff(actual.sun_hour_angle_deg, expected.sun_hour_angle_deg) < epsilon,
        "sun hour angle {} vs {}",
        actual.sun_hour_angle_deg,
        expected.sun_hour_angle_deg
    );
    assert_abs_diff_eq!(
        actual.moon_distance_miles,
        expected.moon_distance_miles,
        epsilon = epsilon * 1000.0
    );
    assert_abs_diff_eq!(
        actual.moon_orbital_speed_mph,
        expected.moon_orbital_speed_mph,
        epsilon = epsilon * 10.0
    );
}
