//! # Station Configuration
//!
//! All balance data lives in one TOML file:
//!
//! ```toml
//! [station]
//! consume_on_fail = true
//! supply_policy = "proceed"
//! seed = 1337
//!
//! [[items]]
//! name = "Honey Wing"
//! class = "winged"
//! stability = 80.0
//! ```
//!
//! Loaded once at startup; nothing here changes while the station runs.

use mutagen_core::{BaseItemConfig, CatalogConfig, ItemCatalog};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{StationError, StationResult};

/// Default seed of the shared pseudorandom source.
pub const DEFAULT_SEED: u64 = 0x4D55_5441_4745_4E21;

/// What a placement does when the inventory cannot supply the full count.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SupplyPolicy {
    /// Remove what is there, stage the requested count, log a warning.
    #[default]
    Proceed,
    /// Reject the placement before touching the inventory.
    Strict,
}

/// The `[station]` table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StationConfig {
    /// Destroy both ingredient stacks on a failed merge (otherwise they are
    /// returned to inventory).
    pub consume_on_fail: bool,
    /// Shortfall handling for placements.
    pub supply_policy: SupplyPolicy,
    /// Seed for the merge roll stream.
    pub seed: u64,
}

impl Default for StationConfig {
    fn default() -> Self {
        Self {
            consume_on_fail: true,
            supply_policy: SupplyPolicy::Proceed,
            seed: DEFAULT_SEED,
        }
    }
}

impl StationConfig {
    /// Sets the failed-merge policy.
    #[must_use]
    pub const fn with_consume_on_fail(mut self, consume_on_fail: bool) -> Self {
        self.consume_on_fail = consume_on_fail;
        self
    }

    /// Sets the shortfall policy.
    #[must_use]
    pub const fn with_supply_policy(mut self, policy: SupplyPolicy) -> Self {
        self.supply_policy = policy;
        self
    }

    /// Sets the roll seed.
    #[must_use]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}

/// A complete fusion config file: station settings plus base items.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FusionConfig {
    /// Station settings.
    #[serde(default)]
    pub station: StationConfig,
    /// Base items, in handle order.
    #[serde(default)]
    pub items: Vec<BaseItemConfig>,
}

impl FusionConfig {
    /// Parses a config from TOML text.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` on malformed TOML.
    pub fn from_toml_str(text: &str) -> StationResult<Self> {
        toml::from_str(text).map_err(|e| StationError::InvalidConfig(e.to_string()))
    }

    /// Reads and parses a config file.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> StationResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| StationError::InvalidConfig(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&text)
    }

    /// Builds the item catalog declared by this config.
    ///
    /// # Errors
    ///
    /// Returns `Catalog` if any base item is invalid.
    pub fn build_catalog(&self) -> StationResult<ItemCatalog> {
        let config = CatalogConfig {
            items: self.items.clone(),
        };
        Ok(ItemCatalog::from_config(&config)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mutagen_core::CatalogError;

    #[test]
    fn test_defaults_when_station_table_missing() {
        let config = FusionConfig::from_toml_str("").unwrap();
        assert_eq!(config.station, StationConfig::default());
        assert!(config.station.consume_on_fail);
        assert_eq!(config.station.supply_policy, SupplyPolicy::Proceed);
        assert!(config.items.is_empty());
    }

    #[test]
    fn test_parse_full_config() {
        let text = r#"
            [station]
            consume_on_fail = false
            supply_policy = "strict"
            seed = 7

            [[items]]
            name = "Honey Wing"
            class = "winged"
            stability = 80.0

            [[items]]
            name = "Mantis Fang"
            class = "predator"
            stability = 60.0
        "#;
        let config = FusionConfig::from_toml_str(text).unwrap();
        assert!(!config.station.consume_on_fail);
        assert_eq!(config.station.supply_policy, SupplyPolicy::Strict);
        assert_eq!(config.station.seed, 7);

        let catalog = config.build_catalog().unwrap();
        assert_eq!(catalog.len(), 2);
    }

    #[test]
    fn test_partial_station_table_keeps_defaults() {
        let config = FusionConfig::from_toml_str("[station]\nseed = 3\n").unwrap();
        assert!(config.station.consume_on_fail);
        assert_eq!(config.station.seed, 3);
    }

    #[test]
    fn test_bad_item_surfaces_catalog_error() {
        let text = r#"
            [[items]]
            name = "Glitch"
            class = "swarm"
            stability = 140.0
        "#;
        let config = FusionConfig::from_toml_str(text).unwrap();
        assert!(matches!(
            config.build_catalog(),
            Err(StationError::Catalog(CatalogError::StabilityOutOfRange { .. }))
        ));
    }

    #[test]
    fn test_unknown_policy_rejected() {
        let result = FusionConfig::from_toml_str("[station]\nsupply_policy = \"lenient\"\n");
        assert!(matches!(result, Err(StationError::InvalidConfig(_))));
    }

    #[test]
    fn test_missing_file() {
        let result = FusionConfig::load("/definitely/not/here/fusion.toml");
        assert!(matches!(result, Err(StationError::InvalidConfig(_))));
    }
}
