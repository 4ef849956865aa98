//! Batch configuration
//!
//! [`WeaveConfig`] bundles the anchor shapes the insertion strategies look
//! for with the output file names. Every field has a default, so an empty
//! TOML file is a valid configuration:
//!
//! ```toml
//! sanitize_input = true
//!
//! [anchors]
//! module_import_prefix = "@modules/"
//! list_name = "modules"
//!
//! [output]
//! router_file_name = "App.tsx"
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use weave_insertion::AnchorConfig;

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Configuration file could not be read
    #[error("failed to read config {path}: {source}")]
    Io {
        /// File that failed
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Configuration text is not valid TOML for [`WeaveConfig`]
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Names of the two patched output files
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// File name of the patched router text
    pub router_file_name: String,
    /// File name of the patched listing text
    pub listing_file_name: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            router_file_name: "App.tsx".into(),
            listing_file_name: "home-index.tsx".into(),
        }
    }
}

/// Top-level configuration of a batch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WeaveConfig {
    /// Anchor shapes for the insertion strategies
    pub anchors: AnchorConfig,
    /// Output file names
    pub output: OutputConfig,
    /// Strip code fences and prose around every input document
    pub sanitize_input: bool,
}

impl Default for WeaveConfig {
    fn default() -> Self {
        Self {
            anchors: AnchorConfig::default(),
            output: OutputConfig::default(),
            sanitize_input: true,
        }
    }
}

impl WeaveConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With anchor configuration
    #[inline]
    #[must_use]
    pub fn with_anchors(mut self, anchors: AnchorConfig) -> Self {
        self.anchors = anchors;
        self
    }

    /// With output file names
    #[inline]
    #[must_use]
    pub fn with_output(mut self, output: OutputConfig) -> Self {
        self.output = output;
        self
    }

    /// With input sanitising switched on or off
    #[inline]
    #[must_use]
    pub fn with_sanitize_input(mut self, sanitize: bool) -> Self {
        self.sanitize_input = sanitize;
        self
    }

    /// Parse configuration from TOML text
    ///
    /// # Errors
    /// Returns `ConfigError::Parse` for malformed TOML or unknown keys.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Load configuration from a TOML file
    ///
    /// # Errors
    /// Returns `ConfigError` if the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&text)?;
        tracing::debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }
}
