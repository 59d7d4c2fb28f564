//! Explicit backend client value
//!
//! The client is constructed once from a [`RemoteBackendConfig`] at startup
//! and handed to consumers by dependency injection. There is no ambient
//! singleton to fetch it from, so every consumer's backend dependency is
//! visible in its signature.

use crate::config::RemoteBackendConfig;
use std::fmt;
use std::sync::Arc;

/// Collection holding uploaded health readings
const READINGS_COLLECTION: &str = "smartwatch_data";

/// Handle to a configured remote backend project
///
/// Cheap to clone; all clones share one immutable configuration. Network
/// transport is out of scope here: the client owns the configuration and
/// addressing, not the wire protocol.
#[derive(Clone)]
pub struct RemoteBackendClient {
    config: Arc<RemoteBackendConfig>,
}

impl RemoteBackendClient {
    /// Create a client for the given configuration
    #[must_use]
    pub fn new(config: RemoteBackendConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// The configuration this client was built from
    #[must_use]
    pub fn config(&self) -> &RemoteBackendConfig {
        &self.config
    }

    /// Backend project identifier
    #[must_use]
    pub fn project_id(&self) -> &str {
        self.config.project_id()
    }

    /// Root of the project's object-storage container
    #[must_use]
    pub fn storage_root(&self) -> StorageLocation {
        StorageLocation {
            bucket: self.config.storage_bucket().to_string(),
            path: String::new(),
        }
    }

    /// Name of the health-readings collection
    #[must_use]
    pub fn readings_collection(&self) -> &'static str {
        READINGS_COLLECTION
    }
}

impl fmt::Debug for RemoteBackendClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // api_key deliberately omitted
        f.debug_struct("RemoteBackendClient")
            .field("project_id", &self.config.project_id())
            .field("storage_bucket", &self.config.storage_bucket())
            .finish_non_exhaustive()
    }
}

/// A location inside the project's object-storage container
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageLocation {
    bucket: String,
    path: String,
}

impl StorageLocation {
    /// Append a path segment, normalizing separators
    #[must_use]
    pub fn child(&self, segment: &str) -> Self {
        let segment = segment.trim_matches('/');
        let path = if self.path.is_empty() {
            segment.to_string()
        } else if segment.is_empty() {
            self.path.clone()
        } else {
            format!("{}/{}", self.path, segment)
        };
        Self {
            bucket: self.bucket.clone(),
            path,
        }
    }

    /// The container this location lives in
    #[must_use]
    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    /// Path within the container ("" for the root)
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }
}

impl fmt::Display for StorageLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "gs://{}/{}", self.bucket, self.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> RemoteBackendClient {
        let config = RemoteBackendConfig::builder()
            .project_id("test-project-id")
            .api_key("TEST_API_KEY")
            .application_id("1:123456789:android:abcdef")
            .storage_bucket("test-project-id.appspot.com")
            .build()
            .unwrap();
        RemoteBackendClient::new(config)
    }

    #[test]
    fn test_storage_child_paths() {
        let location = client().storage_root().child("exports").child("week-01.csv");
        assert_eq!(location.path(), "exports/week-01.csv");
        assert_eq!(
            location.to_string(),
            "gs://test-project-id.appspot.com/exports/week-01.csv"
        );
    }

    #[test]
    fn test_child_trims_separators() {
        let location = client().storage_root().child("/logs/").child("boot.txt");
        assert_eq!(location.path(), "logs/boot.txt");
    }

    #[test]
    fn test_debug_elides_api_key() {
        let rendered = format!("{:?}", client());
        assert!(!rendered.contains("TEST_API_KEY"));
        assert!(rendered.contains("test-project-id"));
    }

    #[test]
    fn test_clones_share_config() {
        let a = client();
        let b = a.clone();
        assert_eq!(a.project_id(), b.project_id());
        assert_eq!(b.readings_collection(), "smartwatch_data");
    }
}
