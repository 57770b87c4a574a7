use crate::{
    constants::{Degree, JulianCentury, DAYS_PER_CENTURY, SECONDS_PER_DAY, SIDEREAL_RATE},
    numeric::normalize_degrees,
    time::Instant,
};

/// Greenwich Mean Sidereal Time in degrees.
///
/// The IAU 1982 polynomial (Meeus 12.3) is evaluated at 0h UT of the
/// instant's date, then the elapsed time of day is added at the sidereal rate.
///
/// Arguments
/// ---------
/// * `t`: Julian centuries since J2000.0 at `instant`
/// * `instant`: the UTC calendar instant `t` was computed from
///
/// Return
/// ------
/// * GMST in `[0, 360)`
pub fn greenwich_sidereal_time(t: JulianCentury, instant: &Instant) -> Degree {
    // Polynomial coefficients for GMST at 0h UT (in degrees)
    const C0: f64 = 100.46061837;
    const C1: f64 = 36000.770053608;
    const C2: f64 = 0.000387933;
    const C3: f64 = 1.0 / 38_710_000.0;

    let day_seconds = instant.seconds_of_day() as f64;

    // centuries at 0h UT of the same day
    let t0 = t - day_seconds / SECONDS_PER_DAY / DAYS_PER_CENTURY;
    let gmst0 = C0 + C1 * t0 + C2 * t0 * t0 - C3 * t0 * t0 * t0;

    let day_angle = 360.0 * day_seconds / SECONDS_PER_DAY;
    normalize_degrees(gmst0 + SIDEREAL_RATE * day_angle)
}

/// Local hour angle of a body, `normalize(GST - stored_longitude - RA)`.
///
/// `stored_longitude` is the observer longitude in its stored form, see
/// [`ObserverLocation`](crate::observer::ObserverLocation).
pub fn hour_angle(gst: Degree, stored_longitude: Degree, right_ascension: Degree) -> Degree {
    normalize_degrees(gst - stored_longitude - right_ascension)
}

#[cfg(test)]
mod topocentric_test {
    use super::*;
    use crate::time::JulianTime;
    use approx::assert_abs_diff_eq;

    fn gst_at(instant: Instant) -> Degree {
        greenwich_sidereal_time(JulianTime::from_instant(&instant).t, &instant)
    }

    #[test]
    fn test_gmst_meeus_examples() {
        // Meeus example 12.a: 1987 April 10, 0h UT
        let instant = Instant::new(1987, 4, 10, 0, 0, 0).unwrap();
        assert_abs_diff_eq!(gst_at(instant), 197.693195, epsilon = 1e-6);

        // Meeus example 12.b: 1987 April 10, 19h21m00s UT
        let instant = Instant::new(1987, 4, 10, 19, 21, 0).unwrap();
        assert_abs_diff_eq!(gst_at(instant), 128.7378734, epsilon = 1e-6);
    }

    #[test]
    fn test_gmst_advances_at_sidereal_rate() {
        let a = gst_at(Instant::new(2024, 3, 20, 6, 0, 0).unwrap());
        let b = gst_at(Instant::new(2024, 3, 20, 7, 0, 0).unwrap());
        // one solar hour is 15.0411 sidereal degrees
        assert_abs_diff_eq!(normalize_degrees(b - a), 15.041069, epsilon = 1e-5);
    }

    #[test]
    fn test_hour_angle() {
        assert_eq!(hour_angle(100.0, 0.0, 0.0), 100.0);
        assert_eq!(hour_angle(10.0, 0.0, 20.0), 350.0);
        assert_eq!(hour_angle(10.0, 350.0, 20.0), 0.0);
        assert_eq!(hour_angle(720.0, 0.0, 0.0), 0.0);

        for step in 0..72 {
            let ha = hour_angle(step as f64 * 37.0, step as f64 * 11.0, step as f64 * 23.0);
            assert!((0.0..360.0).contains(&ha));
        }
    }
}
