//! Local snapshot persistence for Pulsekit readings
//!
//! Captured readings are mirrored to a JSON file in the app's data
//! directory so a session survives restarts and offline periods. Reads are
//! lenient: a missing or damaged snapshot yields an empty history rather
//! than an error, matching how the app treats first launch.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod snapshot;

pub use snapshot::{SnapshotStore, SNAPSHOT_FILE};
