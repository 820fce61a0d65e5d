//! Game configuration loader.

use std::path::Path;

use game_core::GameConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for game configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file. Keys missing from the file keep
    /// their defaults.
    pub fn load(path: &Path) -> LoadResult<GameConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<GameConfig> {
        toml::from_str(content).map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_overrides_named_keys_only() {
        let config = ConfigLoader::parse("warrior_max_health = 150\ntown_map_id = \"village\"\n")
            .unwrap();
        assert_eq!(config.warrior_max_health, 150);
        assert_eq!(config.town_map_id, "village");
        assert_eq!(config.warrior_attack_damage, GameConfig::DEFAULT_WARRIOR_ATTACK_DAMAGE);
        assert_eq!(config.world_map_id, GameConfig::WORLD_MAP_ID);
    }

    #[test]
    fn empty_file_is_the_default() {
        assert_eq!(ConfigLoader::parse("").unwrap(), GameConfig::default());
    }

    #[test]
    fn wrong_type_is_rejected() {
        let err = ConfigLoader::parse("tile_size = \"big\"").unwrap_err();
        assert!(err.to_string().contains("config TOML"));
    }
}
