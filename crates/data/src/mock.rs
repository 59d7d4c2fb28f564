//! Mock reading generation for pipeline testing without hardware

use crate::reading::WatchReading;
use chrono::Utc;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Spacing between readings in a generated batch
const BATCH_SPACING_MS: i64 = 60_000;

/// Generates readings in realistic resting ranges
///
/// Used by the CLI `data mock` command and by integration tests that need
/// a populated pipeline with no watch attached.
#[derive(Debug)]
pub struct MockReadingGenerator {
    rng: StdRng,
}

impl Default for MockReadingGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl MockReadingGenerator {
    /// Create a generator with OS entropy
    #[must_use]
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Create a deterministic generator for tests
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Generate one reading stamped with the current time
    pub fn generate(&mut self) -> WatchReading {
        self.generate_at(Utc::now().timestamp_millis())
    }

    /// Generate one reading with an explicit timestamp
    pub fn generate_at(&mut self, timestamp_ms: i64) -> WatchReading {
        WatchReading {
            timestamp_ms,
            heart_rate: self.rng.random_range(70..90),
            spo2: self.rng.random_range(95.0..99.0),
            temperature: self.rng.random_range(36.0..37.0),
            steps: self.rng.random_range(0..200),
        }
    }

    /// Generate a batch spaced one minute apart, newest first
    pub fn generate_batch(&mut self, count: usize) -> Vec<WatchReading> {
        let now = Utc::now().timestamp_millis();
        (0..count)
            .map(|i| self.generate_at(now - i as i64 * BATCH_SPACING_MS))
            .collect()
    }
}
