//! Environment-aware remote backend configuration for Pulsekit
//!
//! The app ships one baked-in backend project plus optional per-environment
//! overrides bundled as `google-services-<env>.json` assets. This crate
//! resolves a deployment environment to a validated [`RemoteBackendConfig`]
//! and wraps it in an explicit [`RemoteBackendClient`] value that callers
//! receive by dependency injection rather than from ambient global state.
//!
//! # Example
//!
//! ```rust,no_run
//! use pulsekit_backend::{config_for_environment, Environment, RemoteBackendClient, RemoteBackendConfig};
//! use pulsekit_core::asset::DirAssetReader;
//!
//! let assets = DirAssetReader::new("assets");
//! let default = RemoteBackendConfig::builder()
//!     .project_id("pulsekit-prod")
//!     .api_key("PROD_KEY")
//!     .application_id("1:1:android:prod")
//!     .storage_bucket("pulsekit-prod.appspot.com")
//!     .build()
//!     .unwrap();
//!
//! let config = config_for_environment(Environment::Dev, &assets, &default);
//! let client = RemoteBackendClient::new(config);
//! println!("uploading to {}", client.storage_root());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod client;
pub mod config;
pub mod environment;
pub mod error;

pub use client::{RemoteBackendClient, StorageLocation};
pub use config::{config_for_environment, load_config, RemoteBackendConfig};
pub use environment::{ConfigSource, Environment};
pub use error::{ConfigError, ConfigResult};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::client::{RemoteBackendClient, StorageLocation};
    pub use crate::config::{config_for_environment, load_config, RemoteBackendConfig};
    pub use crate::environment::{ConfigSource, Environment};
    pub use crate::error::{ConfigError, ConfigResult};
}
