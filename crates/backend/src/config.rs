//! Remote backend configuration loading and validation
//!
//! Per-environment overrides ship as `google-services-<env>.json` assets in
//! the shape the backend console exports:
//!
//! ```json
//! {
//!   "project_info": { "project_id": "...", "storage_bucket": "..." },
//!   "client": [
//!     {
//!       "client_info": { "mobilesdk_app_id": "..." },
//!       "api_key": [ { "current_key": "..." } ]
//!     }
//!   ]
//! }
//! ```
//!
//! Only the first `client` and `api_key` entries are read; extra entries are
//! ignored. Loading is a single synchronous read performed once at startup.

use crate::environment::{ConfigSource, Environment};
use crate::error::{ConfigError, ConfigResult};
use pulsekit_core::asset::AssetReader;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

/// A complete, validated remote backend configuration
///
/// Instances are all-or-nothing: every field is non-empty, or the value was
/// never constructed. Immutable after construction and safe to share across
/// threads without synchronization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteBackendConfig {
    project_id: String,
    api_key: String,
    application_id: String,
    storage_bucket: String,
}

/// Production backend project, compiled into the app package
const BAKED_IN_PROJECT_ID: &str = "pulsekit-prod";
const BAKED_IN_API_KEY: &str = "AIzaPulsekitProdPlaceholderKey";
const BAKED_IN_APPLICATION_ID: &str = "1:602481749433:android:pulsekit";
const BAKED_IN_STORAGE_BUCKET: &str = "pulsekit-prod.appspot.com";

impl RemoteBackendConfig {
    /// Start building a configuration
    #[must_use]
    pub fn builder() -> RemoteBackendConfigBuilder {
        RemoteBackendConfigBuilder::default()
    }

    /// The production configuration compiled into the app package
    ///
    /// This is what [`Environment::Default`] resolves to, and what override
    /// environments degrade to when their asset cannot be loaded.
    #[must_use]
    pub fn baked_in() -> Self {
        Self {
            project_id: BAKED_IN_PROJECT_ID.to_string(),
            api_key: BAKED_IN_API_KEY.to_string(),
            application_id: BAKED_IN_APPLICATION_ID.to_string(),
            storage_bucket: BAKED_IN_STORAGE_BUCKET.to_string(),
        }
    }

    /// Backend project identifier
    #[must_use]
    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    /// Client-to-backend credential
    #[must_use]
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Platform-specific app identifier issued by the backend
    #[must_use]
    pub fn application_id(&self) -> &str {
        &self.application_id
    }

    /// Default object-storage container
    #[must_use]
    pub fn storage_bucket(&self) -> &str {
        &self.storage_bucket
    }
}

/// Builder enforcing the all-fields-non-empty invariant
#[derive(Debug, Clone, Default)]
pub struct RemoteBackendConfigBuilder {
    project_id: Option<String>,
    api_key: Option<String>,
    application_id: Option<String>,
    storage_bucket: Option<String>,
}

impl RemoteBackendConfigBuilder {
    /// Set the backend project identifier
    #[must_use]
    pub fn project_id(mut self, value: impl Into<String>) -> Self {
        self.project_id = Some(value.into());
        self
    }

    /// Set the client credential
    #[must_use]
    pub fn api_key(mut self, value: impl Into<String>) -> Self {
        self.api_key = Some(value.into());
        self
    }

    /// Set the app identifier
    #[must_use]
    pub fn application_id(mut self, value: impl Into<String>) -> Self {
        self.application_id = Some(value.into());
        self
    }

    /// Set the object-storage container
    #[must_use]
    pub fn storage_bucket(mut self, value: impl Into<String>) -> Self {
        self.storage_bucket = Some(value.into());
        self
    }

    /// Build the configuration, naming the first absent or empty field
    pub fn build(self) -> Result<RemoteBackendConfig, &'static str> {
        fn require(value: Option<String>, field: &'static str) -> Result<String, &'static str> {
            match value {
                Some(v) if !v.is_empty() => Ok(v),
                _ => Err(field),
            }
        }

        Ok(RemoteBackendConfig {
            project_id: require(self.project_id, "project_id")?,
            api_key: require(self.api_key, "api_key")?,
            application_id: require(self.application_id, "application_id")?,
            storage_bucket: require(self.storage_bucket, "storage_bucket")?,
        })
    }
}

/// Load and validate a backend configuration from a named asset
///
/// # Errors
///
/// - [`ConfigError::NotFound`] when the asset is not bundled
/// - [`ConfigError::Malformed`] when the contents are not valid JSON or a
///   required `client` / `api_key` array is empty
/// - [`ConfigError::Incomplete`] when a required field is absent or empty
pub fn load_config(
    asset_name: &str,
    reader: &dyn AssetReader,
) -> ConfigResult<RemoteBackendConfig> {
    let bytes = reader.open(asset_name).map_err(|e| {
        if e.is_not_found() {
            ConfigError::NotFound(asset_name.to_string())
        } else {
            ConfigError::malformed(asset_name, e.to_string())
        }
    })?;

    let root: Value = serde_json::from_slice(&bytes)
        .map_err(|e| ConfigError::malformed(asset_name, e.to_string()))?;

    let project_info = root
        .get("project_info")
        .ok_or_else(|| ConfigError::malformed(asset_name, "missing project_info object"))?;

    // Documented contract: exactly one client entry and one api_key entry;
    // only index 0 is read. Empty arrays are structural damage, not an
    // incomplete field.
    let client = root
        .get("client")
        .and_then(Value::as_array)
        .and_then(|arr| arr.first())
        .ok_or_else(|| ConfigError::malformed(asset_name, "client array is missing or empty"))?;

    let api_key_entry = client
        .get("api_key")
        .and_then(Value::as_array)
        .and_then(|arr| arr.first())
        .ok_or_else(|| ConfigError::malformed(asset_name, "api_key array is missing or empty"))?;

    let field = |value: &Value, key: &str| -> Option<String> {
        value
            .get(key)
            .and_then(Value::as_str)
            .map(str::to_owned)
    };

    let config = RemoteBackendConfig::builder()
        .project_id(field(project_info, "project_id").unwrap_or_default())
        .storage_bucket(field(project_info, "storage_bucket").unwrap_or_default())
        .application_id(
            client
                .get("client_info")
                .and_then(|ci| field(ci, "mobilesdk_app_id"))
                .unwrap_or_default(),
        )
        .api_key(field(api_key_entry, "current_key").unwrap_or_default())
        .build()
        .map_err(|missing| ConfigError::incomplete(asset_name, missing))?;

    debug!(
        asset = asset_name,
        project_id = config.project_id(),
        storage_bucket = config.storage_bucket(),
        "parsed backend configuration"
    );

    Ok(config)
}

/// Resolve the effective backend configuration for an environment
///
/// [`Environment::Default`] returns `default` without touching the asset
/// bundle. For override environments, any load failure is logged and the
/// default configuration is used instead: startup must never fail because
/// an override asset is missing or damaged.
#[must_use]
pub fn config_for_environment(
    environment: Environment,
    reader: &dyn AssetReader,
    default: &RemoteBackendConfig,
) -> RemoteBackendConfig {
    match environment.config_source() {
        ConfigSource::UseDefault => {
            debug!(%environment, "using built-in backend configuration");
            default.clone()
        }
        ConfigSource::Asset(name) => match load_config(name, reader) {
            Ok(config) => {
                debug!(%environment, asset = name, project_id = config.project_id(),
                    "loaded backend configuration override");
                config
            }
            Err(e) => {
                warn!(%environment, asset = name, kind = e.kind(), error = %e,
                    "falling back to built-in backend configuration");
                default.clone()
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pulsekit_core::asset::{AssetError, StaticAssets};

    const VALID_ASSET: &str = r#"
        {
          "project_info": {
            "project_number": "123456789",
            "project_id": "test-project-id",
            "storage_bucket": "test-project-id.appspot.com"
          },
          "client": [
            {
              "client_info": {
                "mobilesdk_app_id": "1:123456789:android:abcdef",
                "android_client_info": { "package_name": "dev.pulsekit.app" }
              },
              "api_key": [ { "current_key": "TEST_API_KEY" } ]
            }
          ]
        }
    "#;

    fn default_config() -> RemoteBackendConfig {
        RemoteBackendConfig::builder()
            .project_id("pulsekit-prod")
            .api_key("PROD_KEY")
            .application_id("1:999:android:prod")
            .storage_bucket("pulsekit-prod.appspot.com")
            .build()
            .unwrap()
    }

    #[test]
    fn test_load_valid_asset() {
        let assets = StaticAssets::new().with("google-services-dev.json", VALID_ASSET);
        let config = load_config("google-services-dev.json", &assets).unwrap();

        assert_eq!(config.project_id(), "test-project-id");
        assert_eq!(config.api_key(), "TEST_API_KEY");
        assert_eq!(config.application_id(), "1:123456789:android:abcdef");
        assert_eq!(config.storage_bucket(), "test-project-id.appspot.com");
    }

    #[test]
    fn test_missing_asset_is_not_found() {
        let assets = StaticAssets::new();
        let err = load_config("non-existent-file.json", &assets).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_invalid_json_is_malformed() {
        let assets = StaticAssets::new().with("invalid.json", "{ invalid json }");
        let err = load_config("invalid.json", &assets).unwrap_err();
        assert_eq!(err.kind(), "malformed");
    }

    #[test]
    fn test_empty_client_array_is_malformed() {
        let json = r#"{ "project_info": { "project_id": "p", "storage_bucket": "b" }, "client": [] }"#;
        let assets = StaticAssets::new().with("empty-client.json", json);
        let err = load_config("empty-client.json", &assets).unwrap_err();
        assert_eq!(err.kind(), "malformed");
    }

    #[test]
    fn test_empty_api_key_array_is_malformed() {
        let json = r#"
            {
              "project_info": { "project_id": "p", "storage_bucket": "b" },
              "client": [ { "client_info": { "mobilesdk_app_id": "a" }, "api_key": [] } ]
            }
        "#;
        let assets = StaticAssets::new().with("empty-keys.json", json);
        let err = load_config("empty-keys.json", &assets).unwrap_err();
        assert_eq!(err.kind(), "malformed");
    }

    #[test]
    fn test_empty_bucket_is_incomplete() {
        let json = r#"
            {
              "project_info": { "project_id": "p", "storage_bucket": "" },
              "client": [
                { "client_info": { "mobilesdk_app_id": "a" }, "api_key": [ { "current_key": "k" } ] }
              ]
            }
        "#;
        let assets = StaticAssets::new().with("no-bucket.json", json);
        let err = load_config("no-bucket.json", &assets).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Incomplete { field: "storage_bucket", .. }
        ));
    }

    #[test]
    fn test_extra_entries_are_ignored() {
        let json = r#"
            {
              "project_info": { "project_id": "p", "storage_bucket": "b" },
              "client": [
                { "client_info": { "mobilesdk_app_id": "first" },
                  "api_key": [ { "current_key": "k1" }, { "current_key": "k2" } ] },
                { "client_info": { "mobilesdk_app_id": "second" },
                  "api_key": [ { "current_key": "other" } ] }
              ]
            }
        "#;
        let assets = StaticAssets::new().with("multi.json", json);
        let config = load_config("multi.json", &assets).unwrap();
        assert_eq!(config.application_id(), "first");
        assert_eq!(config.api_key(), "k1");
    }

    /// Reader that fails the test if any asset is opened
    struct NoReads;

    impl AssetReader for NoReads {
        fn open(&self, name: &str) -> Result<Vec<u8>, AssetError> {
            panic!("unexpected asset read: {name}");
        }
    }

    #[test]
    fn test_default_environment_reads_no_asset() {
        let config = config_for_environment(Environment::Default, &NoReads, &default_config());
        assert_eq!(config, default_config());
    }

    #[test]
    fn test_missing_override_falls_back_to_default() {
        let assets = StaticAssets::new();
        let config = config_for_environment(Environment::Dev, &assets, &default_config());
        assert_eq!(config, default_config());
    }

    #[test]
    fn test_damaged_override_falls_back_to_default() {
        let assets = StaticAssets::new().with("google-services-staging.json", "{ invalid json }");
        let config = config_for_environment(Environment::Staging, &assets, &default_config());
        assert_eq!(config, default_config());
    }

    #[test]
    fn test_valid_override_replaces_default() {
        let assets = StaticAssets::new().with("google-services-dev.json", VALID_ASSET);
        let config = config_for_environment(Environment::Dev, &assets, &default_config());
        assert_eq!(config.project_id(), "test-project-id");
    }

    #[test]
    fn test_baked_in_config_is_complete() {
        let config = RemoteBackendConfig::baked_in();
        assert!(!config.project_id().is_empty());
        assert!(!config.api_key().is_empty());
        assert!(!config.application_id().is_empty());
        assert!(!config.storage_bucket().is_empty());
    }

    #[test]
    fn test_builder_rejects_empty_fields() {
        let err = RemoteBackendConfig::builder()
            .project_id("p")
            .api_key("")
            .application_id("a")
            .storage_bucket("b")
            .build()
            .unwrap_err();
        assert_eq!(err, "api_key");
    }
}
