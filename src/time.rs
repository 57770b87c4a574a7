use std::fmt;

use hifitime::{Epoch, TimeScale};
use serde::{Deserialize, Serialize};

use crate::{
    constants::{JulianCentury, JulianDate, DAYS_PER_CENTURY, JD2000, SECONDS_PER_DAY},
    luna_errors::LunaError,
};

/// UTC calendar timestamp supplied by the caller at each refresh tick.
///
/// Fields are validated at construction so the Julian conversion below can stay
/// total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instant {
    pub year: i32,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
}

fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

fn days_in_month(year: i32, month: u8) -> u8 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        _ => 28,
    }
}

impl Instant {
    /// Build a validated UTC instant.
    ///
    /// Arguments
    /// ---------
    /// * `year`: Gregorian year
    /// * `month`: 1–12
    /// * `day`: 1–length of the month
    /// * `hour`, `minute`: 0–23, 0–59
    /// * `second`: 0–59
    ///
    /// Return
    /// ------
    /// * `Err(LunaError::InvalidInstant)` when a field is out of range
    pub fn new(
        year: i32,
        month: u8,
        day: u8,
        hour: u8,
        minute: u8,
        second: u8,
    ) -> Result<Self, LunaError> {
        if !(1..=12).contains(&month) {
            return Err(LunaError::InvalidInstant(format!("month {month}")));
        }
        if day == 0 || day > days_in_month(year, month) {
            return Err(LunaError::InvalidInstant(format!(
                "day {day} of {year}-{month:02}"
            )));
        }
        if hour > 23 {
            return Err(LunaError::InvalidInstant(format!("hour {hour}")));
        }
        if minute > 59 {
            return Err(LunaError::InvalidInstant(format!("minute {minute}")));
        }
        if second > 59 {
            return Err(LunaError::InvalidInstant(format!("second {second}")));
        }

        Ok(Instant {
            year,
            month,
            day,
            hour,
            minute,
            second,
        })
    }

    /// Calendar fields of an epoch in UTC, truncated to the second.
    ///
    /// A leap second (`:60`) is folded onto `:59`.
    pub fn from_epoch(epoch: Epoch) -> Self {
        let (year, month, day, hour, minute, second, _nanos) = epoch.to_gregorian_utc();
        Instant {
            year,
            month,
            day,
            hour,
            minute,
            second: second.min(59),
        }
    }

    /// The epoch at this UTC calendar instant.
    pub fn to_epoch(&self) -> Epoch {
        Epoch::from_gregorian(
            self.year,
            self.month,
            self.day,
            self.hour,
            self.minute,
            self.second,
            0,
            TimeScale::UTC,
        )
    }

    /// Seconds elapsed since 0h UTC of the same day.
    pub fn seconds_of_day(&self) -> u32 {
        self.hour as u32 * 3600 + self.minute as u32 * 60 + self.second as u32
    }
}

impl fmt::Display for Instant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02}T{:02}:{:02}:{:02} UTC",
            self.year, self.month, self.day, self.hour, self.minute, self.second
        )
    }
}

impl From<Epoch> for Instant {
    fn from(epoch: Epoch) -> Self {
        Instant::from_epoch(epoch)
    }
}

/// Julian Date and Julian centuries since J2000.0 of one instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JulianTime {
    pub jd: JulianDate,
    pub t: JulianCentury,
}

impl JulianTime {
    pub fn from_instant(instant: &Instant) -> Self {
        let jd = to_julian_date(instant);
        JulianTime {
            jd,
            t: to_julian_century(jd),
        }
    }
}

/// Transformation from a UTC calendar instant to Julian Date (JD)
///
/// Meeus, *Astronomical Algorithms*, formula 7.1: January and February count
/// as months 13 and 14 of the previous year, and the Gregorian correction
/// `B = 2 - ⌊Y/100⌋ + ⌊Y/400⌋` is added.
///
/// Argument
/// --------
/// * `instant`: the UTC calendar instant
///
/// Return
/// ------
/// * the Julian Date, fractional day included
pub fn to_julian_date(instant: &Instant) -> JulianDate {
    let (y, m) = if instant.month > 2 {
        (instant.year, instant.month as i32)
    } else {
        (instant.year - 1, instant.month as i32 + 12)
    };

    let d = instant.day as f64
        + instant.hour as f64 / 24.0
        + instant.minute as f64 / 1440.0
        + instant.second as f64 / SECONDS_PER_DAY;
    let b = 2 - y / 100 + y / 400;

    (365.25 * (y + 4716) as f64).trunc() + (30.6001 * (m + 1) as f64).trunc() + d + b as f64
        - 1524.5
}

/// Transformation from Julian Date (JD) to Julian centuries since J2000.0
///
/// Meeus formula 22.1: `T = (JD - 2451545.0) / 36525`.
pub fn to_julian_century(jd: JulianDate) -> JulianCentury {
    (jd - JD2000) / DAYS_PER_CENTURY
}
