//! The smartwatch health-reading model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Health metrics captured by the watch at a single moment
///
/// One reading per timestamp; readings from different capture sources are
/// combined with [`merge_and_sort`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WatchReading {
    /// Capture time, milliseconds since the Unix epoch
    pub timestamp_ms: i64,
    /// Heart rate in beats per minute
    pub heart_rate: u32,
    /// Blood oxygen saturation, percent
    pub spo2: f32,
    /// Body temperature, degrees Celsius
    pub temperature: f32,
    /// Step count delta since the previous reading
    pub steps: u32,
}

impl WatchReading {
    /// Create a reading
    #[must_use]
    pub fn new(timestamp_ms: i64, heart_rate: u32, spo2: f32, temperature: f32, steps: u32) -> Self {
        Self {
            timestamp_ms,
            heart_rate,
            spo2,
            temperature,
            steps,
        }
    }

    /// Capture time as a UTC datetime, if the timestamp is representable
    #[must_use]
    pub fn captured_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.timestamp_ms)
    }

    /// Sanity-check the metric ranges
    ///
    /// Watch firmware occasionally emits zeroed or out-of-range frames;
    /// callers can filter on this before uploading.
    #[must_use]
    pub fn is_plausible(&self) -> bool {
        (20..=250).contains(&self.heart_rate)
            && (50.0..=100.0).contains(&self.spo2)
            && (30.0..=45.0).contains(&self.temperature)
    }
}

/// Combine two capture sources and order by timestamp ascending
///
/// The sort is stable, so within a timestamp the first source's readings
/// keep their relative order ahead of the second's.
#[must_use]
pub fn merge_and_sort(first: Vec<WatchReading>, second: Vec<WatchReading>) -> Vec<WatchReading> {
    let mut merged = first;
    merged.extend(second);
    merged.sort_by_key(|r| r.timestamp_ms);
    merged
}
