//! Smartwatch health-reading model for Pulsekit
//!
//! Readings arrive from two capture sources: CSV exports bundled as assets
//! and live captures from the watch bridge. This crate owns the common
//! [`WatchReading`] model, the lenient CSV loader, and a mock generator for
//! exercising the pipeline without hardware.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod csv;
pub mod mock;
pub mod reading;

pub use csv::load_readings_csv;
pub use mock::MockReadingGenerator;
pub use reading::{merge_and_sort, WatchReading};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::csv::load_readings_csv;
    pub use crate::mock::MockReadingGenerator;
    pub use crate::reading::{merge_and_sort, WatchReading};
}
