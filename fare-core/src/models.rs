use std::{fmt, num::ParseIntError, str::FromStr};

use chrono::{DateTime, TimeZone, Utc};

/// A geographic position in floating-point degrees. Out-of-range values are
/// accepted and simply produce large distances.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DriveId(pub i64);

impl fmt::Display for DriveId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for DriveId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(DriveId)
    }
}

/// One geolocated, timestamped record of a drive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub drive_id: DriveId,
    pub coordinate: Coordinate,
    pub timestamp: DateTime<Utc>,
}

impl Sample {
    /// Parses a `drive_id,lat,lon,unix_ts` record. Malformed records yield
    /// `None` and are skipped by callers, never treated as fatal.
    pub fn parse(record: &str) -> Option<Sample> {
        let mut fields = record.split(',').map(str::trim);

        let drive_id = fields.next()?.parse().ok()?;
        let latitude = fields.next()?.parse().ok()?;
        let longitude = fields.next()?.parse().ok()?;
        let seconds: i64 = fields.next()?.parse().ok()?;

        if fields.next().is_some() {
            return None;
        }

        Some(Sample {
            drive_id,
            coordinate: Coordinate {
                latitude,
                longitude,
            },
            timestamp: Utc.timestamp_opt(seconds, 0).single()?,
        })
    }

    /// Parses only the leading drive_id field of a record. The full parse is
    /// deferred to the fare worker.
    pub fn leading_drive_id(record: &str) -> Option<DriveId> {
        record.split(',').next()?.trim().parse().ok()
    }
}

/// The single result emitted for a drive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FareResult {
    pub drive_id: DriveId,
    /// Total fare, rounded to two decimal places.
    pub fare: f64,
}

impl fmt::Display for FareResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.drive_id, self.fare)
    }
}
