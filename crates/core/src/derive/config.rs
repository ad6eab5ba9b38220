//! Configuration for schema derivation

use serde::{Deserialize, Serialize};

/// Default discriminator tags, scanned in this order when building
/// conditional dependency clauses.
pub const DEFAULT_DISCRIMINATORS: [&str; 7] = [
    "highway", "footway", "service", "barrier", "amenity", "power", "man_made",
];

/// Configuration for schema derivation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeriveConfig {
    /// Discriminator tag names, in scan order. A property whose schema
    /// declares a single-element `enum` for one of these tags contributes a
    /// conditional clause to every other property of the same definition.
    pub discriminators: Vec<String>,

    /// Property renames applied before aggregation, as (from, to) pairs
    pub renames: Vec<(String, String)>,
}

impl Default for DeriveConfig {
    fn default() -> Self {
        Self {
            discriminators: DEFAULT_DISCRIMINATORS.iter().map(|s| s.to_string()).collect(),
            renames: Vec::new(),
        }
    }
}

impl DeriveConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder for custom configuration
    pub fn builder() -> DeriveConfigBuilder {
        DeriveConfigBuilder::default()
    }
}

/// Builder for DeriveConfig
#[derive(Debug, Default)]
pub struct DeriveConfigBuilder {
    config: DeriveConfig,
}

impl DeriveConfigBuilder {
    /// Replace the discriminator tag list (scan order is preserved)
    pub fn discriminators<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.discriminators = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Add a property rename applied before aggregation
    pub fn rename(mut self, from: impl Into<String>, to: impl Into<String>) -> Self {
        self.config.renames.push((from.into(), to.into()));
        self
    }

    /// Build the configuration
    pub fn build(self) -> DeriveConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = DeriveConfig::default();
        assert_eq!(config.discriminators.len(), 7);
        assert_eq!(config.discriminators[0], "highway");
        assert!(config.renames.is_empty());
    }

    #[test]
    fn test_builder() {
        let config = DeriveConfig::builder()
            .discriminators(["kind", "subtype"])
            .rename("_id", "id")
            .build();

        assert_eq!(config.discriminators, vec!["kind", "subtype"]);
        assert_eq!(config.renames, vec![("_id".to_string(), "id".to_string())]);
    }
}
