//! # Constants and type definitions for Luna
//!
//! This module centralizes the **physical constants**, **conversion factors** and **type
//! aliases** used by the ephemeris engine.
//!
//! ## Overview
//!
//! - Angular constants and unit conversions (degrees ↔ radians)
//! - Time epochs (J2000.0 expressed as a Julian Date, days per Julian century)
//! - Lunar and geocentric orbital constants (mean distance, semi-major axis, GM)
//! - Distance unit conversions (kilometers ↔ miles ↔ meters)
//! - Unit-carrying type aliases used across the crate

// -------------------------------------------------------------------------------------------------
// Angular constants and unit conversions
// -------------------------------------------------------------------------------------------------

/// 2π, useful for trigonometric conversions
pub const DPI: f64 = 2. * std::f64::consts::PI;

/// Full turn in degrees
pub const FULL_TURN_DEG: f64 = 360.0;

/// Fixed obliquity of the ecliptic (J2000.0) in degrees
pub const OBLIQUITY_J2000: f64 = 23.4392911;

// -------------------------------------------------------------------------------------------------
// Time
// -------------------------------------------------------------------------------------------------

/// Julian Date of the J2000.0 epoch (2000-01-01 12:00:00)
pub const JD2000: f64 = 2_451_545.0;

/// Number of days in a Julian century
pub const DAYS_PER_CENTURY: f64 = 36_525.0;

/// Number of seconds in a day
pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// Number of seconds in an hour
pub const SECONDS_PER_HOUR: f64 = 3_600.0;

/// Ratio of the sidereal day to the solar day
pub const SIDEREAL_RATE: f64 = 1.00273790935;

// -------------------------------------------------------------------------------------------------
// Lunar orbit
// -------------------------------------------------------------------------------------------------

/// Mean Earth–Moon distance used as the offset of the distance series, in kilometers
pub const MOON_MEAN_DISTANCE_KM: f64 = 385_000.56;

/// Mean semi-major axis of the lunar orbit, in meters
pub const MOON_SEMI_MAJOR_AXIS_M: f64 = 384_400_000.0;

/// Geocentric gravitational parameter GM driving the lunar orbit, in m³/s²
pub const GEOCENTRIC_MU: f64 = 3.986_004_418e14;

// -------------------------------------------------------------------------------------------------
// Distance conversions
// -------------------------------------------------------------------------------------------------

/// Kilometers → statute miles
pub const KM_TO_MILES: f64 = 0.62137119;

/// Statute mile in meters
pub const MILE_IN_METERS: f64 = 1_609.344;

// -------------------------------------------------------------------------------------------------
// Type aliases
// -------------------------------------------------------------------------------------------------

/// Angle in degrees
pub type Degree = f64;
/// Angle in radians
pub type Radian = f64;
/// Distance in kilometers
pub type Kilometer = f64;
/// Distance in statute miles
pub type Mile = f64;
/// Distance in meters
pub type Meter = f64;
/// Speed in statute miles per hour
pub type MilesPerHour = f64;
/// Julian Date (days)
pub type JulianDate = f64;
/// Julian centuries elapsed since J2000.0
pub type JulianCentury = f64;
