//! Error types for backend configuration loading

use thiserror::Error;

/// Result type alias for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Failures while loading a per-environment configuration asset
///
/// Every variant is recoverable: [`crate::config_for_environment`] degrades
/// to the caller's default configuration instead of propagating these.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The named asset does not exist in the bundle
    #[error("configuration asset not found: {0}")]
    NotFound(String),

    /// The asset exists but is not valid, structurally complete JSON
    #[error("configuration asset {name} is malformed: {reason}")]
    Malformed {
        /// Asset name
        name: String,
        /// What made it unparseable
        reason: String,
    },

    /// The JSON parsed but a required field is absent or empty
    #[error("configuration asset {name} is incomplete: missing {field}")]
    Incomplete {
        /// Asset name
        name: String,
        /// Dotted path of the missing field
        field: &'static str,
    },
}

impl ConfigError {
    /// Create a malformed-asset error
    pub fn malformed(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Malformed {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Create an incomplete-asset error
    pub fn incomplete(name: impl Into<String>, field: &'static str) -> Self {
        Self::Incomplete {
            name: name.into(),
            field,
        }
    }

    /// True when the asset simply isn't bundled
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// Short kind name for logs and exit-code mapping
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "not-found",
            Self::Malformed { .. } => "malformed",
            Self::Incomplete { .. } => "incomplete",
        }
    }
}

impl From<ConfigError> for pulsekit_core::Error {
    fn from(err: ConfigError) -> Self {
        use pulsekit_core::ErrorCode;
        let code = match &err {
            ConfigError::NotFound(_) => ErrorCode::ConfigNotFound,
            ConfigError::Malformed { .. } => ErrorCode::ConfigParseError,
            ConfigError::Incomplete { .. } => ErrorCode::ConfigIncomplete,
        };
        pulsekit_core::Error::new(code, err.to_string()).with_source(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_names() {
        assert_eq!(ConfigError::NotFound("x.json".into()).kind(), "not-found");
        assert_eq!(ConfigError::malformed("x.json", "bad").kind(), "malformed");
        assert_eq!(
            ConfigError::incomplete("x.json", "project_info.project_id").kind(),
            "incomplete"
        );
    }

    #[test]
    fn test_core_error_code_mapping() {
        let core: pulsekit_core::Error = ConfigError::malformed("x.json", "bad").into();
        assert_eq!(core.code, pulsekit_core::ErrorCode::ConfigParseError);
    }
}
