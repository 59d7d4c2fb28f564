//! Core utilities shared across the Pulsekit crates
//!
//! This crate provides the functionality every other Pulsekit crate builds on:
//!
//! - **Error handling**: structured errors with codes, context, and recovery suggestions
//! - **Asset access**: a capability trait for reading named bundled resources
//!
//! # Example
//!
//! ```rust,no_run
//! use pulsekit_core::asset::{AssetReader, DirAssetReader};
//!
//! let assets = DirAssetReader::new("assets");
//! let bytes = assets.open("smartwatch_data.csv").expect("asset missing");
//! println!("{} bytes", bytes.len());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod asset;
pub mod error;

pub use error::{Error, ErrorCode, Result, ResultExt};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::asset::{AssetError, AssetReader, DirAssetReader, StaticAssets};
    pub use crate::error::{exit_codes, Error, ErrorCode, Result, ResultExt};
}
