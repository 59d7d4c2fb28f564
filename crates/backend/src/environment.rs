//! Deployment environments and their configuration sources

use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;

/// Asset holding the Dev backend project configuration
const DEV_CONFIG_ASSET: &str = "google-services-dev.json";

/// Asset holding the Staging backend project configuration
const STAGING_CONFIG_ASSET: &str = "google-services-staging.json";

/// Deployment environments
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Baked-in backend project, no override asset
    Default,
    /// Development backend project
    Dev,
    /// Staging backend project
    Staging,
}

impl Default for Environment {
    fn default() -> Self {
        Self::Default
    }
}

/// Where an environment's backend configuration comes from
///
/// The absence case is a variant, not a null string, so callers must
/// handle it explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSource {
    /// Use the configuration baked into the app package
    UseDefault,
    /// Parse the named bundled asset
    Asset(&'static str),
}

impl Environment {
    /// Parse from the `PULSEKIT_ENV` environment variable
    ///
    /// Unrecognized or missing values fall back to [`Environment::Default`].
    #[must_use]
    pub fn from_env() -> Self {
        env::var("PULSEKIT_ENV")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_default()
    }

    /// Resolve the configuration source for this environment
    ///
    /// Pure and total: every environment maps to exactly one source, and
    /// the mapping never changes between calls.
    #[must_use]
    pub fn config_source(&self) -> ConfigSource {
        match self {
            Self::Default => ConfigSource::UseDefault,
            Self::Dev => ConfigSource::Asset(DEV_CONFIG_ASSET),
            Self::Staging => ConfigSource::Asset(STAGING_CONFIG_ASSET),
        }
    }

    /// All environments, for CLI listings
    #[must_use]
    pub fn all() -> &'static [Environment] {
        &[Self::Default, Self::Dev, Self::Staging]
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Default => write!(f, "default"),
            Self::Dev => write!(f, "dev"),
            Self::Staging => write!(f, "staging"),
        }
    }
}

impl std::str::FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "default" => Ok(Self::Default),
            "dev" | "development" | "local" => Ok(Self::Dev),
            "staging" | "stage" => Ok(Self::Staging),
            other => Err(format!(
                "unknown environment '{other}' (expected default, dev, or staging)"
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mapping_is_deterministic() {
        for env in Environment::all() {
            assert_eq!(env.config_source(), env.config_source());
        }
    }

    #[test]
    fn test_default_uses_no_asset() {
        assert_eq!(Environment::Default.config_source(), ConfigSource::UseDefault);
    }

    #[test]
    fn test_override_environments_map_to_assets() {
        assert_eq!(
            Environment::Dev.config_source(),
            ConfigSource::Asset("google-services-dev.json")
        );
        assert_eq!(
            Environment::Staging.config_source(),
            ConfigSource::Asset("google-services-staging.json")
        );
    }

    #[test]
    fn test_from_str_aliases() {
        assert_eq!("Dev".parse::<Environment>().unwrap(), Environment::Dev);
        assert_eq!("stage".parse::<Environment>().unwrap(), Environment::Staging);
        assert!("prod".parse::<Environment>().is_err());
    }

    // Only this test touches PULSEKIT_ENV, so the set/remove pairs do not
    // race with other tests in the crate.
    #[test]
    fn test_from_env_reads_process_environment() {
        unsafe { env::set_var("PULSEKIT_ENV", "staging") };
        assert_eq!(Environment::from_env(), Environment::Staging);

        unsafe { env::set_var("PULSEKIT_ENV", "nonsense") };
        assert_eq!(Environment::from_env(), Environment::Default);

        unsafe { env::remove_var("PULSEKIT_ENV") };
        assert_eq!(Environment::from_env(), Environment::Default);
    }
}
