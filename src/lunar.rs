//! # Lunar position
//!
//! Truncated perturbation theory of the Moon (Meeus, *Astronomical Algorithms*,
//! chapter 47, after Chapront ELP-2000/82) giving the geocentric ecliptic
//! longitude and the Earth–Moon distance.
//!
//! ## Method
//!
//! 1. Five fundamental arguments are evaluated as quartic polynomials in `T`:
//!    the Moon's mean longitude `L'`, mean elongation `D`, the Sun's mean anomaly
//!    `M`, the Moon's mean anomaly `M'` and argument of latitude `F`.
//! 2. Each of the 60 [`PeriodicTerm`]s forms the argument
//!    `α = d·D + m·M + m'·M' + f·F`.
//! 3. Longitude sums `Σl = Σ sinCoeff · E^|m| · sin α` and distance sums
//!    `Σr = Σ cosCoeff · E^|m| · cos α`, where `E` is the eccentricity factor of
//!    the Earth's orbit.
//! 4. `Σl` receives three additive corrections (Venus, Jupiter and the Earth's
//!    flattening).
//! 5. `λ = L' + Σl · 10⁻⁶` and `Δ = 385000.56 + Σr · 10⁻³` km.
//!
//! The table holds the multipliers and both coefficient columns on the same row,
//! so the longitude and distance sums cannot drift out of alignment.
//!
//! ## Accuracy
//!
//! About 10" in longitude and a few kilometers in distance. Nutation and the
//! lunar latitude are not computed.
use log::trace;

use crate::{
    constants::{Degree, JulianCentury, Kilometer, Mile, KM_TO_MILES, MOON_MEAN_DISTANCE_KM},
    numeric::{integer_power, normalize_degrees, TrigMode},
    solar::{ecliptic_right_ascension, sun_mean_anomaly},
};

/// One periodic term of the lunar longitude and distance series.
///
/// `sin_coeff` is in 10⁻⁶ degrees, `cos_coeff` in 10⁻³ kilometers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeriodicTerm {
    pub d: i8,
    pub m: i8,
    pub m_prime: i8,
    pub f: i8,
    pub sin_coeff: i32,
    pub cos_coeff: i32,
}

const fn term(d: i8, m: i8, m_prime: i8, f: i8, sin_coeff: i32, cos_coeff: i32) -> PeriodicTerm {
    PeriodicTerm {
        d,
        m,
        m_prime,
        f,
        sin_coeff,
        cos_coeff,
    }
}

/// Periodic terms for the longitude (Σl) and distance (Σr) of the Moon, Meeus table 47.A.
#[rustfmt::skip]
pub const PERIODIC_TERMS: [PeriodicTerm; 60] = [
    term(0,  0,  1,  0, 6288774, -20905355),
    term(2,  0, -1,  0, 1274027,  -3699111),
    term(2,  0,  0,  0,  658314,  -2955968),
    term(0,  0,  2,  0,  213618,   -569925),
    term(0,  1,  0,  0, -185116,     48888),
    term(0,  0,  0,  2, -114332,     -3149),
    term(2,  0, -2,  0,   58793,    246158),
    term(2, -1, -1,  0,   57066,   -152138),
    term(2,  0,  1,  0,   53322,   -170733),
    term(2, -1,  0,  0,   45758,   -204586),
    term(0,  1, -1,  0,  -40923,   -129620),
    term(1,  0,  0,  0,  -34720,    108743),
    term(0,  1,  1,  0,  -30383,    104755),
    term(2,  0,  0, -2,   15327,     10321),
    term(0,  0,  1,  2,  -12528,         0),
    term(0,  0,  1, -2,   10980,     79661),
    term(4,  0, -1,  0,   10675,    -34782),
    term(0,  0,  3,  0,   10034,    -23210),
    term(4,  0, -2,  0,    8548,    -21636),
    term(2,  1, -1,  0,   -7888,     24208),
    term(2,  1,  0,  0,   -6766,     30824),
    term(1,  0, -1,  0,   -5163,     -8379),
    term(1,  1,  0,  0,    4987,    -16675),
    term(2, -1,  1,  0,    4036,    -12831),
    term(2,  0,  2,  0,    3994,    -10445),
    term(4,  0,  0,  0,    3861,    -11650),
    term(2,  0, -3,  0,    3665,     14403),
    term(0,  1, -2,  0,   -2689,     -7003),
    term(2,  0, -1,  2,   -2602,         0),
    term(2, -1, -2,  0,    2390,     10056),
    term(1,  0,  1,  0,   -2348,      6322),
    term(2, -2,  0,  0,    2236,     -9884),
    term(0,  1,  2,  0,   -2120,      5751),
    term(0,  2,  0,  0,   -2069,         0),
    term(2, -2, -1,  0,    2048,     -4950),
    term(2,  0,  1, -2,   -1773,      4130),
    term(2,  0,  0,  2,   -1595,         0),
    term(4, -1, -1,  0,    1215,     -3958),
    term(0,  0,  2,  2,   -1110,         0),
    term(3,  0, -1,  0,    -892,      3258),
    term(2,  1,  1,  0,    -810,      2616),
    term(4, -1, -2,  0,     759,     -1897),
    term(0,  2, -1,  0,    -713,     -2117),
    term(2,  2, -1,  0,    -700,      2354),
    term(2,  1, -2,  0,     691,         0),
    term(2, -1,  0, -2,     596,         0),
    term(4,  0,  1,  0,     549,     -1423),
    term(0,  0,  4,  0,     537,     -1117),
    term(4, -1,  0,  0,     520,     -1571),
    term(1,  0, -2,  0,    -487,     -1739),
    term(2,  1,  0, -2,    -399,         0),
    term(0,  0,  2, -2,    -381,     -4421),
    term(1,  1,  1,  0,     351,         0),
    term(3,  0, -2,  0,    -340,         0),
    term(4,  0, -3,  0,     330,         0),
    term(2, -1,  2,  0,     327,         0),
    term(0,  2,  1,  0,    -323,      1165),
    term(1,  1, -1,  0,     299,         0),
    term(2,  0,  3,  0,     294,         0),
    term(2,  0, -1, -2,       0,      8752),
];

/// Moon's mean longitude `L'`, referred to the mean equinox of date (Meeus 47.1).
pub fn moon_mean_longitude(t: JulianCentury) -> Degree {
    normalize_degrees(
        218.3164477 + 481267.88123421 * t - 0.0015786 * t * t + t * t * t / 538_841.0
            - t * t * t * t / 65_194_000.0,
    )
}

/// Mean elongation of the Moon `D` (Meeus 47.2).
pub fn moon_mean_elongation(t: JulianCentury) -> Degree {
    normalize_degrees(
        297.8501921 + 445267.1114034 * t - 0.0018819 * t * t + t * t * t / 545_868.0
            - t * t * t * t / 113_065_000.0,
    )
}

/// Moon's mean anomaly `M'` (Meeus 47.4).
pub fn moon_mean_anomaly(t: JulianCentury) -> Degree {
    normalize_degrees(
        134.9633964 + 477198.8675055 * t + 0.0087414 * t * t + t * t * t / 69_699.0
            - t * t * t * t / 14_712_000.0,
    )
}

/// Moon's argument of latitude `F`, mean distance from the ascending node (Meeus 47.5).
pub fn moon_argument_of_latitude(t: JulianCentury) -> Degree {
    normalize_degrees(
        93.2720950 + 483202.0175233 * t - 0.0036539 * t * t - t * t * t / 3_526_000.0
            + t * t * t * t / 863_310_000.0,
    )
}

/// Eccentricity correction factor `E = 1 - 0.002516·T - 0.0000074·T²` (Meeus 47.6).
pub fn eccentricity_factor(t: JulianCentury) -> f64 {
    1.0 - 0.002516 * t - 0.0000074 * t * t
}

/// Fundamental arguments of the lunar theory at one instant, in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LunarArguments {
    pub mean_longitude: Degree,
    pub mean_elongation: Degree,
    pub sun_mean_anomaly: Degree,
    pub mean_anomaly: Degree,
    pub argument_of_latitude: Degree,
    pub eccentricity: f64,
}

impl LunarArguments {
    pub fn at(t: JulianCentury) -> Self {
        LunarArguments {
            mean_longitude: moon_mean_longitude(t),
            mean_elongation: moon_mean_elongation(t),
            sun_mean_anomaly: sun_mean_anomaly(t),
            mean_anomaly: moon_mean_anomaly(t),
            argument_of_latitude: moon_argument_of_latitude(t),
            eccentricity: eccentricity_factor(t),
        }
    }

    /// Argument `d·D + m·M + m'·M' + f·F` of one periodic term.
    fn term_argument(&self, term: &PeriodicTerm) -> Degree {
        term.d as f64 * self.mean_elongation
            + term.m as f64 * self.sun_mean_anomaly
            + term.m_prime as f64 * self.mean_anomaly
            + term.f as f64 * self.argument_of_latitude
    }

    /// `E^|m|` weighting of one periodic term.
    fn term_weight(&self, term: &PeriodicTerm) -> f64 {
        integer_power(self.eccentricity, term.m.unsigned_abs() as u32)
    }
}

/// Σl: the periodic longitude terms plus the additive corrections, in 10⁻⁶ degrees.
pub fn sigma_longitude(t: JulianCentury, args: &LunarArguments, trig: TrigMode) -> f64 {
    let periodic: f64 = PERIODIC_TERMS
        .iter()
        .map(|term| {
            term.sin_coeff as f64 * args.term_weight(term) * trig.sin_deg(args.term_argument(term))
        })
        .sum();

    // A1: action of Venus, A2: action of Jupiter, L' - F: flattening of the Earth
    let a1 = 119.75 + 131.849 * t;
    let a2 = 53.09 + 479264.290 * t;
    let additive = 3958.0 * trig.sin_deg(a1)
        + 1962.0 * trig.sin_deg(args.mean_longitude - args.argument_of_latitude)
        + 318.0 * trig.sin_deg(a2);

    periodic + additive
}

/// Σr: the periodic distance terms, in 10⁻³ kilometers.
pub fn sigma_distance(args: &LunarArguments, trig: TrigMode) -> f64 {
    PERIODIC_TERMS
        .iter()
        .map(|term| {
            term.cos_coeff as f64 * args.term_weight(term) * trig.cos_deg(args.term_argument(term))
        })
        .sum()
}

/// Geocentric position of the Moon.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LunarPosition {
    /// Ecliptic longitude λ in `[0, 360)` degrees
    pub longitude: Degree,
    /// Center-to-center Earth–Moon distance Δ
    pub distance_km: Kilometer,
}

impl LunarPosition {
    /// Evaluate the 60-term series at `t` Julian centuries from J2000.0.
    ///
    /// Arguments
    /// ---------
    /// * `t`: Julian centuries since J2000.0
    /// * `trig`: trigonometric backend
    ///
    /// Return
    /// ------
    /// * the ecliptic longitude and the distance of the Moon
    pub fn at(t: JulianCentury, trig: TrigMode) -> Self {
        let args = LunarArguments::at(t);
        let sl = sigma_longitude(t, &args, trig);
        let sr = sigma_distance(&args, trig);
        trace!("lunar series at T={t}: Σl={sl:.3}, Σr={sr:.3}");

        LunarPosition {
            longitude: normalize_degrees(args.mean_longitude + sl / 1_000_000.0),
            distance_km: MOON_MEAN_DISTANCE_KM + sr / 1000.0,
        }
    }

    pub fn distance_miles(&self) -> Mile {
        self.distance_km * KM_TO_MILES
    }

    /// Right ascension in `[0, 360)`, projecting λ through the fixed obliquity
    /// with the ecliptic latitude neglected.
    pub fn right_ascension(&self, trig: TrigMode) -> Degree {
        ecliptic_right_ascension(self.longitude, trig)
    }
}

#[cfg(test)]
mod lunar_test {
    use super::*;
    use approx::assert_abs_diff_eq;

    // Meeus example 47.a: 1992 April 12, 0h TD
    const T_47A: f64 = -0.077221081451;

    #[test]
    fn test_fundamental_arguments() {
        let args = LunarArguments::at(T_47A);
        assert_abs_diff_eq!(args.mean_longitude, 134.290182, epsilon = 1e-6);
        assert_abs_diff_eq!(args.mean_elongation, 113.842304, epsilon = 1e-6);
        assert_abs_diff_eq!(args.sun_mean_anomaly, 97.643514, epsilon = 1e-6);
        assert_abs_diff_eq!(args.mean_anomaly, 5.150833, epsilon = 1e-6);
        assert_abs_diff_eq!(args.argument_of_latitude, 219.889721, epsilon = 1e-6);
        assert_abs_diff_eq!(args.eccentricity, 1.000194, epsilon = 1e-6);
    }

    #[test]
    fn test_periodic_sums() {
        let args = LunarArguments::at(T_47A);
        for trig in [TrigMode::Series, TrigMode::Native] {
            assert_abs_diff_eq!(sigma_longitude(T_47A, &args, trig), -1_127_527.0, epsilon = 1.0);
            assert_abs_diff_eq!(sigma_distance(&args, trig), -16_590_875.0, epsilon = 1.0);
        }
    }

    #[test]
    fn test_lunar_position_reference() {
        for trig in [TrigMode::Series, TrigMode::Native] {
            let pos = LunarPosition::at(T_47A, trig);
            assert_abs_diff_eq!(pos.longitude, 133.162655, epsilon = 1e-5);
            assert_abs_diff_eq!(pos.distance_km, 368409.7, epsilon = 0.1);
            assert_abs_diff_eq!(pos.distance_miles(), 228919.16, epsilon = 0.1);
        }
    }

    #[test]
    fn test_table_alignment() {
        // only the last row is distance-only, a handful are longitude-only
        assert_eq!(PERIODIC_TERMS.len(), 60);
        assert_eq!(PERIODIC_TERMS[0], term(0, 0, 1, 0, 6288774, -20905355));
        assert_eq!(PERIODIC_TERMS[59].sin_coeff, 0);
        assert_eq!(PERIODIC_TERMS[59].cos_coeff, 8752);
        assert_eq!(
            PERIODIC_TERMS.iter().filter(|t| t.sin_coeff == 0).count(),
            1
        );
        assert!(PERIODIC_TERMS.iter().all(|t| t.m.abs() <= 2));
    }

    #[test]
    fn test_eccentricity_weighting() {
        let args = LunarArguments {
            eccentricity: 0.5,
            ..LunarArguments::at(0.0)
        };
        assert_eq!(args.term_weight(&term(0, 0, 1, 0, 1, 1)), 1.0);
        assert_eq!(args.term_weight(&term(2, -1, 0, 0, 1, 1)), 0.5);
        assert_eq!(args.term_weight(&term(0, 2, 0, 0, 1, 1)), 0.25);
    }

    #[test]
    fn test_distance_stays_in_lunar_range() {
        // perigee ~356 500 km, apogee ~406 700 km
        for day in 0..400 {
            let t = day as f64 / 36525.0;
            let pos = LunarPosition::at(t, TrigMode::Series);
            assert!((356_000.0..407_000.0).contains(&pos.distance_km));
            assert!((0.0..360.0).contains(&pos.longitude));
        }
    }

    #[test]
    fn test_moon_right_ascension() {
        let pos = LunarPosition::at(T_47A, TrigMode::Native);
        assert_abs_diff_eq!(pos.right_ascension(TrigMode::Native), 135.628564, epsilon = 1e-5);
        assert_abs_diff_eq!(pos.right_ascension(TrigMode::Series), 135.628564, epsilon = 1e-3);
    }
}
