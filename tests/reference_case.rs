mod common;

use approx::assert_abs_diff_eq;
use luna::constants::KM_TO_MILES;
use luna::numeric::TrigMode;
use luna::observer::ObserverLocation;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::common::{assert_result_close, engine, utc};

#[test]
fn test_meeus_47a_through_the_engine() {
    // 1992 April 12, 0h: λ = 133.162655°, Δ = 368409.7 km
    let now = utc(1992, 4, 12, 0, 0, 0);

    for trig in [TrigMode::Series, TrigMode::Native] {
        let engine = engine(trig);
        let (_, result) = engine.tick(engine.initial_state(ObserverLocation::default()), now);

        assert_abs_diff_eq!(
            result.moon_distance_miles,
            368_409.7 * KM_TO_MILES,
            epsilon = 5.0 * KM_TO_MILES
        );
        assert_abs_diff_eq!(result.moon_hour_angle_deg, 64.81366, epsilon = 1e-4);
        // Greenwich midnight, the Sun is near lower transit
        assert_abs_diff_eq!(result.sun_hour_angle_deg, 179.78354, epsilon = 1e-4);
        assert_abs_diff_eq!(result.moon_orbital_speed_mph, 2374.6908, epsilon = 1e-3);
        assert_eq!(result.moon_range_rate_mph, None);
        assert_eq!(result.moon_clock().to_string(), "16:19");
    }
}

#[test]
fn test_observer_longitude_shifts_hour_angles() {
    let now = utc(1992, 4, 12, 0, 0, 0);
    let engine = engine(TrigMode::Native);

    let (_, greenwich) = engine.tick(engine.initial_state(ObserverLocation::default()), now);
    let (_, boston) = engine.tick(
        engine.initial_state(ObserverLocation::from_geographic(-71.0, 42.0)),
        now,
    );

    assert_abs_diff_eq!(boston.moon_hour_angle_deg, 353.81366, epsilon = 1e-4);
    assert_abs_diff_eq!(
        (greenwich.sun_hour_angle_deg - boston.sun_hour_angle_deg).rem_euclid(360.0),
        71.0,
        epsilon = 1e-9
    );
    assert_eq!(greenwich.moon_distance_miles, boston.moon_distance_miles);
}

#[test]
fn test_series_and_native_backends_agree() {
    let mut rng = StdRng::seed_from_u64(42);
    let series = engine(TrigMode::Series);
    let native = engine(TrigMode::Native);

    for _ in 0..200 {
        let now = utc(
            rng.random_range(1950..2050),
            rng.random_range(1..=12),
            rng.random_range(1..=28),
            rng.random_range(0..24),
            rng.random_range(0..60),
            rng.random_range(0..60),
        );
        let observer = ObserverLocation::from_geographic(
            rng.random_range(-180.0..180.0),
            rng.random_range(-90.0..90.0),
        );

        let (_, a) = series.tick(series.initial_state(observer), now);
        let (_, b) = native.tick(native.initial_state(observer), now);
        assert_result_close(&a, &b, 0.01);
    }
}

#[test]
fn test_outputs_are_normalized() {
    let mut rng = StdRng::seed_from_u64(7);
    let engine = engine(TrigMode::Series);

    for _ in 0..200 {
        let now = utc(
            rng.random_range(1900..2100),
            rng.random_range(1..=12),
            rng.random_range(1..=28),
            rng.random_range(0..24),
            rng.random_range(0..60),
            0,
        );
        let observer = ObserverLocation::from_geographic(rng.random_range(-180.0..180.0), 0.0);
        let (_, result) = engine.tick(engine.initial_state(observer), now);

        assert!((0.0..360.0).contains(&result.moon_hour_angle_deg));
        assert!((0.0..360.0).contains(&result.sun_hour_angle_deg));
        assert!((220_000.0..253_000.0).contains(&result.moon_distance_miles));
        assert!(result.moon_orbital_speed_mph.is_finite());
    }
}
