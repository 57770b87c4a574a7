use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::{Degree, Mile, MilesPerHour, FULL_TURN_DEG};

/// Output of one refresh tick.
///
/// Every angle is in `[0, 360)`. `moon_range_rate_mph` is `None` until a
/// previous sample exists, that is on the first tick and on the first tick
/// after an observer location update.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EphemerisResult {
    pub moon_hour_angle_deg: Degree,
    pub moon_distance_miles: Mile,
    pub moon_range_rate_mph: Option<MilesPerHour>,
    pub moon_orbital_speed_mph: MilesPerHour,
    pub sun_hour_angle_deg: Degree,
}

impl EphemerisResult {
    /// The Moon's hour angle read as a 24-hour clock.
    pub fn moon_clock(&self) -> MoonClock {
        MoonClock::from_hour_angle(self.moon_hour_angle_deg)
    }
}

impl fmt::Display for EphemerisResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "moon {} (HA {:.3}°) at {:.0} mi, ",
            self.moon_clock(),
            self.moon_hour_angle_deg,
            self.moon_distance_miles
        )?;
        match self.moon_range_rate_mph {
            Some(rate) => write!(f, "range rate {rate:+.1} mph, ")?,
            None => write!(f, "range rate n/a, ")?,
        }
        write!(
            f,
            "orbital speed {:.1} mph, sun HA {:.3}°",
            self.moon_orbital_speed_mph, self.sun_hour_angle_deg
        )
    }
}

/// Lunar time of day: `12:00` at upper transit, `00:00` at lower transit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoonClock {
    pub hours: u8,
    pub minutes: u8,
}

impl MoonClock {
    /// One hour of clock time per 15° of hour angle, shifted by 12 hours.
    /// Minutes are truncated, not rounded.
    pub fn from_hour_angle(hour_angle: Degree) -> Self {
        let value = hour_angle.clamp(0.0, FULL_TURN_DEG) * 24.0 / FULL_TURN_DEG;
        let hours = value.trunc();
        let minutes = (60.0 * (value - hours)).trunc().min(59.0);

        MoonClock {
            hours: ((hours as u8) + 12) % 24,
            minutes: minutes as u8,
        }
    }
}

impl fmt::Display for MoonClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hours, self.minutes)
    }
}
