//! # Numeric kernels
//!
//! Self-contained numerical primitives used by the ephemeris series:
//!
//! - angle normalization into `[0, 360)` degrees or `[0, 2π)` radians,
//! - integer power and factorial,
//! - bounded Maclaurin series for sine and cosine,
//! - a capped Newton–Raphson square root.
//!
//! Every loop has a fixed iteration cap, so each call completes in bounded time
//! and never allocates. The [`TrigMode`] selector chooses between these kernels
//! and the native `f64` intrinsics for the whole engine.
//!
//! ## Accuracy
//!
//! The series kernels fold their argument into `[0, π/2]` before summing, which
//! keeps the 6-term truncation error below `1e-6` over the whole circle. The
//! native backend is exact to `f64` precision; switching backends changes
//! computed angles at the sub-0.01° level and distances at the sub-kilometer level.
use std::{f64::consts::PI, fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{
    constants::{Degree, Radian, DPI, FULL_TURN_DEG},
    luna_errors::LunaError,
};

/// Maximum number of terms summed by the series sine and cosine.
pub const SERIES_MAX_TERMS: u32 = 6;

/// Early-exit tolerance on the last sine term.
pub const SIN_TOLERANCE: f64 = 1e-7;

/// Early-exit tolerance on the last cosine term.
pub const COS_TOLERANCE: f64 = 1e-6;

/// Maximum number of Newton–Raphson steps in [`sqrt_approx`].
pub const SQRT_MAX_STEPS: u32 = 40;

/// Absolute tolerance on `estimate² - x` in [`sqrt_approx`].
pub const SQRT_TOLERANCE: f64 = 0.001;

/// Outcome of a bounded iterative evaluation.
///
/// `converged` is `false` when the iteration cap was reached before the
/// tolerance test passed; `value` is then the best-effort approximation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesEvaluation {
    pub value: f64,
    pub iterations: u32,
    pub converged: bool,
}

/// Reduce `value` into `[0, period)` by truncating division.
///
/// Negative inputs get one extra `period` added after removing the truncated
/// multiple. The quotient can round onto the next integer, leaving the
/// difference a few ulps outside `[0, period)` on either side, so the result is
/// wrapped once in each direction.
fn normalize_period(value: f64, period: f64) -> f64 {
    let multiple = (value / period) as i64;
    let reduced = if value < 0.0 {
        value + period - period * multiple as f64
    } else {
        value - period * multiple as f64
    };
    let reduced = if reduced < 0.0 {
        reduced + period
    } else {
        reduced
    };

    if reduced >= period {
        reduced - period
    } else {
        reduced
    }
}

/// Normalize an angle in degrees into `[0, 360)`.
///
/// Idempotent: normalizing an already normalized angle returns it unchanged.
/// The input is expected to be finite.
pub fn normalize_degrees(d: Degree) -> Degree {
    normalize_period(d, FULL_TURN_DEG)
}

/// Normalize an angle in radians into `[0, 2π)`.
pub fn normalize_radians(r: Radian) -> Radian {
    normalize_period(r, DPI)
}

/// Convert degrees into normalized radians in `[0, 2π)`.
pub fn radians(d: Degree) -> Radian {
    normalize_degrees(d) * DPI / FULL_TURN_DEG
}

/// Convert radians into degrees (no normalization).
pub fn degrees(r: Radian) -> Degree {
    r * FULL_TURN_DEG / DPI
}

/// `base` raised to a non-negative integer power by repeated multiplication.
pub fn integer_power(base: f64, exponent: u32) -> f64 {
    let mut x = 1.0;
    for _ in 0..exponent {
        x *= base;
    }
    x
}

/// `n!` by accumulation. Only used for `n <= 11` by the series kernels.
pub fn integer_factorial(n: u32) -> u64 {
    (1..=n as u64).product()
}

/// Fold a normalized angle into `[0, π/2]`.
///
/// Returns the folded angle, the sign to apply to a sine and the sign to apply
/// to a cosine evaluated at the folded angle.
fn fold_quadrant(r: Radian) -> (Radian, f64, f64) {
    let mut x = normalize_radians(r);
    let mut sin_sign = 1.0;
    let mut cos_sign = 1.0;

    // upper half: sin(x) = -sin(x - π), cos(x) = -cos(x - π)
    if x > PI {
        x -= PI;
        sin_sign = -1.0;
        cos_sign = -1.0;
    }

    // second quadrant: sin(x) = sin(π - x), cos(x) = -cos(π - x)
    if x > PI / 2.0 {
        x = PI - x;
        cos_sign = -cos_sign;
    }

    (x, sin_sign, cos_sign)
}

/// Sum `(-1)^n x^(k(n)) / k(n)!` for `n` in `0..SERIES_MAX_TERMS`, where
/// `k(n) = 2n + offset`, stopping once a term drops below `tolerance`.
fn maclaurin(x: f64, offset: u32, tolerance: f64) -> SeriesEvaluation {
    let mut sum = 0.0;

    for n in 0..SERIES_MAX_TERMS {
        let k = 2 * n + offset;
        let term = integer_power(-1.0, n) * integer_power(x, k) / integer_factorial(k) as f64;
        sum += term;
        if term.abs() < tolerance {
            return SeriesEvaluation {
                value: sum,
                iterations: n + 1,
                converged: true,
            };
        }
    }

    SeriesEvaluation {
        value: sum,
        iterations: SERIES_MAX_TERMS,
        converged: false,
    }
}

/// Series sine with its convergence report.
pub fn series_sin_detailed(r: Radian) -> SeriesEvaluation {
    let (x, sign, _) = fold_quadrant(r);
    let eval = maclaurin(x, 1, SIN_TOLERANCE);
    SeriesEvaluation {
        value: sign * eval.value,
        ..eval
    }
}

/// Series cosine with its convergence report.
pub fn series_cos_detailed(r: Radian) -> SeriesEvaluation {
    let (x, _, sign) = fold_quadrant(r);
    let eval = maclaurin(x, 0, COS_TOLERANCE);
    SeriesEvaluation {
        value: sign * eval.value,
        ..eval
    }
}

/// Sine of an angle in radians from a truncated Maclaurin series.
///
/// At most [`SERIES_MAX_TERMS`] terms are summed; the loop exits early once the
/// last term is below [`SIN_TOLERANCE`].
pub fn series_sin(r: Radian) -> f64 {
    series_sin_detailed(r).value
}

/// Cosine of an angle in radians from a truncated Maclaurin series.
///
/// Same bounds as [`series_sin`], with [`COS_TOLERANCE`] as early-exit threshold.
pub fn series_cos(r: Radian) -> f64 {
    series_cos_detailed(r).value
}

/// Newton–Raphson square root with its convergence report.
pub fn sqrt_approx_detailed(x: f64) -> SeriesEvaluation {
    let mut answer = x;
    let mut steps = 0;

    while answer * answer - x > SQRT_TOLERANCE {
        if steps == SQRT_MAX_STEPS {
            return SeriesEvaluation {
                value: answer,
                iterations: steps,
                converged: false,
            };
        }
        answer = (answer + x / answer) / 2.0;
        steps += 1;
    }

    SeriesEvaluation {
        value: answer,
        iterations: steps,
        converged: true,
    }
}

/// Square root by Newton–Raphson iteration starting from `x` itself.
///
/// Iterates while `estimate² - x` exceeds [`SQRT_TOLERANCE`], at most
/// [`SQRT_MAX_STEPS`] times.
///
/// Preconditions
/// -------------
/// * `x >= 0`. Negative inputs are not checked and give an unspecified value.
/// * For `0 < x < 1` the start point is already below the root, no step is
///   taken and `x` is returned unchanged. Callers only feed values `>= 1` or `0`.
pub fn sqrt_approx(x: f64) -> f64 {
    sqrt_approx_detailed(x).value
}

/// Backend used for every sine, cosine and square root of the engine.
///
/// There is no default: choosing between the bounded-iteration kernels and
/// full `f64` accuracy is a configuration decision.
///
/// ```rust
/// use luna::numeric::TrigMode;
///
/// let mode: TrigMode = "native".parse().unwrap();
/// assert_eq!(mode, TrigMode::Native);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrigMode {
    /// Bounded Maclaurin series and capped Newton–Raphson square root.
    Series,
    /// `f64::sin`, `f64::cos` and `f64::sqrt`.
    Native,
}

impl TrigMode {
    /// Sine of an angle in radians.
    pub fn sin(self, r: Radian) -> f64 {
        match self {
            TrigMode::Series => series_sin(r),
            TrigMode::Native => r.sin(),
        }
    }

    /// Cosine of an angle in radians.
    pub fn cos(self, r: Radian) -> f64 {
        match self {
            TrigMode::Series => series_cos(r),
            TrigMode::Native => r.cos(),
        }
    }

    /// Sine of an angle in degrees, normalized before conversion.
    pub fn sin_deg(self, d: Degree) -> f64 {
        self.sin(radians(d))
    }

    /// Cosine of an angle in degrees, normalized before conversion.
    pub fn cos_deg(self, d: Degree) -> f64 {
        self.cos(radians(d))
    }

    /// Square root; same preconditions as [`sqrt_approx`] in series mode.
    pub fn sqrt(self, x: f64) -> f64 {
        match self {
            TrigMode::Series => sqrt_approx(x),
            TrigMode::Native => x.sqrt(),
        }
    }
}

impl FromStr for TrigMode {
    type Err = LunaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "series" => Ok(TrigMode::Series),
            "native" => Ok(TrigMode::Native),
            _ => Err(LunaError::InvalidTrigMode(s.to_string())),
        }
    }
}

impl fmt::Display for TrigMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrigMode::Series => write!(f, "series"),
            TrigMode::Native => write!(f, "native"),
        }
    }
}
