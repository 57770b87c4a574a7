use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{constants::Degree, luna_errors::LunaError, numeric::normalize_degrees};

/// Field addressed by a location message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LocationKey {
    Longitude,
    Latitude,
}

impl TryFrom<u32> for LocationKey {
    type Error = LunaError;

    fn try_from(key: u32) -> Result<Self, Self::Error> {
        match key {
            0 => Ok(LocationKey::Longitude),
            1 => Ok(LocationKey::Latitude),
            other => Err(LunaError::UnknownLocationKey(other)),
        }
    }
}

impl From<LocationKey> for u32 {
    fn from(key: LocationKey) -> Self {
        match key {
            LocationKey::Longitude => 0,
            LocationKey::Latitude => 1,
        }
    }
}

/// One out-of-band location update, in whole signed geographic degrees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationMessage {
    pub key: LocationKey,
    pub value: i32,
}

impl LocationMessage {
    pub fn longitude(value: i32) -> Self {
        LocationMessage {
            key: LocationKey::Longitude,
            value,
        }
    }

    pub fn latitude(value: i32) -> Self {
        LocationMessage {
            key: LocationKey::Latitude,
            value,
        }
    }

    /// Decode a raw `(key, value)` pair as delivered by the location sync.
    ///
    /// Return
    /// ------
    /// * `Err(LunaError::UnknownLocationKey)` for any key other than `0` or `1`
    pub fn decode(key: u32, value: i32) -> Result<Self, LunaError> {
        Ok(LocationMessage {
            key: LocationKey::try_from(key)?,
            value,
        })
    }
}

/// Observer position on the Earth.
///
/// The longitude is kept in its stored form: the geographic value negated and
/// brought back into `[0, 360)`, so that hour angles are `GST - longitude - RA`.
/// The latitude is the signed geographic value.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ObserverLocation {
    pub longitude_deg: Degree,
    pub latitude_deg: Degree,
}

impl ObserverLocation {
    /// Observer at a geographic longitude (east positive) and latitude.
    pub fn from_geographic(longitude: Degree, latitude: Degree) -> Self {
        ObserverLocation {
            longitude_deg: stored_longitude(longitude),
            latitude_deg: latitude,
        }
    }

    /// Geographic longitude in `(-180, 180]`, east positive.
    pub fn geographic_longitude(&self) -> Degree {
        let lon = normalize_degrees(-self.longitude_deg);
        if lon > 180.0 {
            lon - 360.0
        } else {
            lon
        }
    }

    /// Apply one location message and return the updated location.
    pub fn updated(self, message: &LocationMessage) -> Self {
        match message.key {
            LocationKey::Longitude => ObserverLocation {
                longitude_deg: stored_longitude(message.value as f64),
                ..self
            },
            LocationKey::Latitude => ObserverLocation {
                latitude_deg: message.value as f64,
                ..self
            },
        }
    }
}

impl fmt::Display for ObserverLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "lon {:.2}° (stored {:.2}°), lat {:.2}°",
            self.geographic_longitude(),
            self.longitude_deg,
            self.latitude_deg
        )
    }
}

/// Negate a geographic longitude and add 360 when the result is negative.
fn stored_longitude(longitude: Degree) -> Degree {
    normalize_degrees(-longitude)
}

#[cfg(test)]
mod observer_test {
    use super::*;

    #[test]
    fn test_location_key_decoding() {
        assert_eq!(LocationKey::try_from(0u32), Ok(LocationKey::Longitude));
        assert_eq!(LocationKey::try_from(1u32), Ok(LocationKey::Latitude));
        assert_eq!(
            LocationKey::try_from(2u32),
            Err(LunaError::UnknownLocationKey(2))
        );
        assert_eq!(u32::from(LocationKey::Latitude), 1);

        assert_eq!(
            LocationMessage::decode(0, -71),
            Ok(LocationMessage::longitude(-71))
        );
        assert!(LocationMessage::decode(7, 0).is_err());
    }

    #[test]
    fn test_longitude_storage() {
        let location = ObserverLocation::default();

        // east longitude becomes 360 - lon
        let east = location.updated(&LocationMessage::longitude(10));
        assert_eq!(east.longitude_deg, 350.0);
        assert_eq!(east.geographic_longitude(), 10.0);

        // west longitude becomes its absolute value
        let west = location.updated(&LocationMessage::longitude(-71));
        assert_eq!(west.longitude_deg, 71.0);
        assert_eq!(west.geographic_longitude(), -71.0);

        let greenwich = location.updated(&LocationMessage::longitude(0));
        assert_eq!(greenwich.longitude_deg, 0.0);
    }

    #[test]
    fn test_latitude_is_stored_unmodified() {
        let location = ObserverLocation::from_geographic(2.0, 0.0)
            .updated(&LocationMessage::latitude(-33));
        assert_eq!(location.latitude_deg, -33.0);
        assert_eq!(location.longitude_deg, 358.0);
    }

    #[test]
    fn test_display() {
        let location = ObserverLocation::from_geographic(-71.0, 42.0);
        assert_eq!(
            location.to_string(),
            "lon -71.00° (stored 71.00°), lat 42.00°"
        );
    }
}
