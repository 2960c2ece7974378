//! Configuration types for Gnomon document processing.
//!
//! This module provides configuration structures that control how documents
//! are serialized. All types implement [`serde::Deserialize`] for flexible
//! loading from external sources.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level application configuration.
//! - [`SerializationConfig`] - Controls document wire output.
//!
//! # Example
//!
//! ```
//! # use gnomon::config::AppConfig;
//! let config = AppConfig::default();
//! assert!(config.serialization().include_defaults());
//! ```

use serde::Deserialize;

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Serialization configuration section.
    #[serde(default)]
    serialization: SerializationConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] with the specified serialization
    /// configuration.
    pub fn new(serialization: SerializationConfig) -> Self {
        Self { serialization }
    }

    /// Returns the serialization configuration.
    pub fn serialization(&self) -> &SerializationConfig {
        &self.serialization
    }
}

/// Document wire output configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct SerializationConfig {
    /// Render JSON with indentation.
    #[serde(default)]
    pretty: bool,

    /// Emit attribute values equal to their descriptor defaults.
    ///
    /// With `false`, literal and computed defaults are omitted from the
    /// wire and recomputed on load. Defaults to `true`: full documents
    /// round-trip id-exactly, while sparse documents re-allocate companion
    /// instances for omitted instance-valued attributes.
    #[serde(default = "default_include_defaults")]
    include_defaults: bool,
}

impl SerializationConfig {
    /// Creates a new [`SerializationConfig`].
    pub fn new(pretty: bool, include_defaults: bool) -> Self {
        Self {
            pretty,
            include_defaults,
        }
    }

    /// Render JSON with indentation.
    pub fn pretty(&self) -> bool {
        self.pretty
    }

    /// Emit attribute values equal to their descriptor defaults.
    pub fn include_defaults(&self) -> bool {
        self.include_defaults
    }
}

impl Default for SerializationConfig {
    fn default() -> Self {
        Self {
            pretty: false,
            include_defaults: true,
        }
    }
}

fn default_include_defaults() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert!(!config.serialization().pretty());
        assert!(config.serialization().include_defaults());
    }

    #[test]
    fn test_deserialize_partial_section() {
        let config: AppConfig = serde_json::from_str(
            r#"{ "serialization": { "pretty": true } }"#,
        )
        .unwrap();

        assert!(config.serialization().pretty());
        // Unspecified fields fall back to their defaults.
        assert!(config.serialization().include_defaults());
    }

    #[test]
    fn test_deserialize_empty() {
        let config: AppConfig = serde_json::from_str("{}").unwrap();
        assert!(!config.serialization().pretty());
    }
}
