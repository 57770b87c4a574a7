//! # Solar position
//!
//! Low-precision geometric position of the Sun (Meeus, *Astronomical Algorithms*,
//! chapter 25), accurate to about 0.01°:
//!
//! - mean longitude `L₀` and mean anomaly `M` as polynomials in `T`,
//! - equation of center `C` as a 3-term series in multiples of `M`,
//! - true ecliptic longitude `☉ = L₀ + C`,
//! - right ascension through the fixed obliquity of the ecliptic.
//!
//! The ecliptic → equatorial projection is shared with the lunar module.
use nalgebra::{Matrix3, Vector3};

use crate::{
    constants::{Degree, JulianCentury, OBLIQUITY_J2000},
    numeric::{degrees, normalize_degrees, TrigMode},
};

/// Sun's geometric mean longitude `L₀`, referred to the mean equinox of date (Meeus 25.2).
pub fn sun_mean_longitude(t: JulianCentury) -> Degree {
    normalize_degrees(280.46646 + 36000.76983 * t + 0.0003032 * t * t)
}

/// Sun's mean anomaly `M` (Meeus 47.3).
pub fn sun_mean_anomaly(t: JulianCentury) -> Degree {
    normalize_degrees(
        357.5291092 + 35999.0502909 * t - 0.0001536 * t * t + t * t * t / 24_490_000.0,
    )
}

/// Sun's equation of center `C` in degrees.
pub fn sun_equation_of_center(t: JulianCentury, trig: TrigMode) -> Degree {
    let m = sun_mean_anomaly(t);

    (1.914602 - 0.004817 * t - 0.000014 * t * t) * trig.sin_deg(m)
        + (0.019993 - 0.000101 * t) * trig.sin_deg(2.0 * m)
        + 0.000289 * trig.sin_deg(3.0 * m)
}

/// Sun's true geometric ecliptic longitude `☉ = L₀ + C`, in `[0, 360)`.
pub fn sun_true_longitude(t: JulianCentury, trig: TrigMode) -> Degree {
    normalize_degrees(sun_mean_longitude(t) + sun_equation_of_center(t, trig))
}

/// Rotation matrix about the X axis from the ecliptic frame to the equatorial
/// frame, for the fixed J2000 obliquity.
///
/// The sine and cosine of the obliquity come from the selected backend.
fn ecliptic_to_equatorial(trig: TrigMode) -> Matrix3<f64> {
    let (s, c) = (trig.sin_deg(OBLIQUITY_J2000), trig.cos_deg(OBLIQUITY_J2000));

    Matrix3::new(
        1.0, 0.0, 0.0, //
        0.0, c, -s, //
        0.0, s, c,
    )
}

/// Right ascension of a point of the ecliptic (zero latitude) at longitude
/// `longitude`, in `[0, 360)`.
///
/// The ecliptic unit vector is rotated into the equatorial frame and the
/// quadrant-aware arctangent of its Y/X components gives the right ascension.
pub fn ecliptic_right_ascension(longitude: Degree, trig: TrigMode) -> Degree {
    let ecliptic = Vector3::new(trig.cos_deg(longitude), trig.sin_deg(longitude), 0.0);
    let equatorial = ecliptic_to_equatorial(trig) * ecliptic;

    normalize_degrees(degrees(equatorial.y.atan2(equatorial.x)))
}

/// Right ascension of the Sun, in `[0, 360)`.
pub fn sun_right_ascension(t: JulianCentury, trig: TrigMode) -> Degree {
    ecliptic_right_ascension(sun_true_longitude(t, trig), trig)
}
