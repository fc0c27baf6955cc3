//! Content store configuration.
//!
//! The store is addressed by a project identifier and a dataset name,
//! both environment-provided. Reads always go through the CDN edge; this
//! layer carries no mutation token at all.

use crate::error::ContentError;

/// Environment variable holding the project identifier (required).
pub const PROJECT_ID_VAR: &str = "SANITY_PROJECT_ID";
/// Environment variable holding the dataset name (optional).
pub const DATASET_VAR: &str = "SANITY_DATASET";
/// Environment variable holding the API version date (optional).
pub const API_VERSION_VAR: &str = "SANITY_API_VERSION";

const DEFAULT_DATASET: &str = "production";
const DEFAULT_API_VERSION: &str = "2024-01-01";

/// Connection settings for the content store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentConfig {
    /// Project identifier.
    pub project_id: String,
    /// Dataset name.
    pub dataset: String,
    /// Versioned API date.
    pub api_version: String,
    /// Whether to read through the CDN edge (always true in production).
    pub use_cdn: bool,
}

impl ContentConfig {
    /// Build a config with defaults for everything but the project id.
    pub fn new(project_id: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            dataset: DEFAULT_DATASET.to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
            use_cdn: true,
        }
    }

    /// Set the dataset name.
    pub fn with_dataset(mut self, dataset: impl Into<String>) -> Self {
        self.dataset = dataset.into();
        self
    }

    /// Set the API version date.
    pub fn with_api_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = version.into();
        self
    }

    /// Read configuration from process environment variables.
    ///
    /// Fails fast when the project identifier is absent so a
    /// misconfigured deployment dies at startup, not on first query.
    pub fn from_env() -> Result<Self, ContentError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ContentError> {
        let project_id = lookup(PROJECT_ID_VAR)
            .filter(|v| !v.is_empty())
            .ok_or_else(|| {
                ContentError::Config(format!(
                    "missing required environment variable: {}",
                    PROJECT_ID_VAR
                ))
            })?;

        Ok(Self {
            project_id,
            dataset: lookup(DATASET_VAR)
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| DEFAULT_DATASET.to_string()),
            api_version: lookup(API_VERSION_VAR)
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| DEFAULT_API_VERSION.to_string()),
            use_cdn: true,
        })
    }

    /// The query endpoint URL for this project and dataset.
    pub fn query_endpoint(&self) -> String {
        let host = if self.use_cdn {
            "apicdn.sanity.io"
        } else {
            "api.sanity.io"
        };
        format!(
            "https://{}.{}/v{}/data/query/{}",
            self.project_id, host, self.api_version, self.dataset
        )
    }
}
