use chrono::Timelike;

use crate::{FareResult, Sample, haversine_distance};

pub const DAILY_RATE_PER_KM: f64 = 0.74;
pub const NIGHTLY_RATE_PER_KM: f64 = 1.30;
pub const IDLE_RATE_PER_SECOND: f64 = 11.9 / 3600.0;
/// Fixed charge added once per drive.
pub const BASE_FLAG: f64 = 1.30;
/// Segments implying a speed above this are rejected as outliers.
pub const OUTLIER_SPEED_KMH: f64 = 100.0;
/// Segments at or below this speed bill idle time instead of distance.
pub const IDLE_SPEED_KMH: f64 = 10.0;
/// The nightly rate applies to segments starting before this hour (UTC).
pub const NIGHT_END_HOUR: u32 = 5;

/// Speed implied by two consecutive samples, in km/h. Samples with equal
/// timestamps imply infinite speed, which the caller treats as an outlier.
pub fn velocity_kmh(prev: &Sample, curr: &Sample) -> f64 {
    let elapsed = (curr.timestamp - prev.timestamp).num_seconds().abs();
    if elapsed == 0 {
        return f64::INFINITY;
    }
    3600.0 * haversine_distance(prev.coordinate, curr.coordinate) / elapsed as f64
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SegmentFare {
    /// Incremental fare for a plausible segment.
    Charge(f64),
    /// Implausible speed, the segment contributes nothing.
    Outlier,
}

/// Incremental fare for the segment between two consecutive valid samples of
/// the same drive. Moving segments bill distance at the daily or nightly rate
/// depending on the hour of day of the segment's start, idle segments bill
/// elapsed time.
pub fn segment_fare(prev: &Sample, curr: &Sample) -> SegmentFare {
    let velocity = velocity_kmh(prev, curr);

    if velocity > OUTLIER_SPEED_KMH {
        SegmentFare::Outlier
    } else if velocity > IDLE_SPEED_KMH {
        let distance = haversine_distance(prev.coordinate, curr.coordinate);
        let rate = if prev.timestamp.hour() < NIGHT_END_HOUR {
            NIGHTLY_RATE_PER_KM
        } else {
            DAILY_RATE_PER_KM
        };
        SegmentFare::Charge(rate * distance)
    } else {
        let elapsed = (curr.timestamp - prev.timestamp).num_seconds();
        SegmentFare::Charge(IDLE_RATE_PER_SECOND * elapsed as f64)
    }
}

/// Accumulates the total fare of one drive sample by sample.
///
/// The previous point is an explicit `Option`; on an outlier segment it is
/// retained so the next sample is compared against the same point.
#[derive(Debug)]
pub struct DriveFare {
    prev: Option<Sample>,
    total: f64,
    valid_samples: u64,
}

impl Default for DriveFare {
    fn default() -> Self {
        Self::new()
    }
}

impl DriveFare {
    pub fn new() -> DriveFare {
        DriveFare {
            prev: None,
            total: BASE_FLAG,
            valid_samples: 0,
        }
    }

    pub fn push(&mut self, sample: Sample) {
        self.valid_samples += 1;
        match &self.prev {
            None => self.prev = Some(sample),
            Some(prev) => match segment_fare(prev, &sample) {
                SegmentFare::Charge(fare) => {
                    self.total += fare;
                    self.prev = Some(sample);
                }
                SegmentFare::Outlier => {}
            },
        }
    }

    /// Total fare rounded to two decimals, or `None` for degenerate drives
    /// with fewer than two valid samples.
    pub fn finish(self) -> Option<FareResult> {
        let prev = self.prev?;
        if self.valid_samples < 2 {
            return None;
        }
        Some(FareResult {
            drive_id: prev.drive_id,
            fare: round_to_cents(self.total),
        })
    }
}

// f64::round rounds half away from zero.
fn round_to_cents(fare: f64) -> f64 {
    (fare * 100.0).round() / 100.0
}
