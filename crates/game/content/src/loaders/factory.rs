//! Content factory for building core tables from data files.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use game_core::{Bestiary, GameConfig, LootRegistry, TileMap};

use crate::loaders::{BestiaryLoader, ConfigLoader, LoadResult, LootLoader, MapLoader};

/// Everything a session needs from the data directory.
#[derive(Clone, Debug)]
pub struct GameContent {
    pub config: GameConfig,
    pub bestiary: Bestiary,
    pub loot: LootRegistry,
    pub world: Arc<TileMap>,
    /// Dungeons reachable from the world map whose files were found, plus the
    /// town map when it has a file.
    pub dungeons: HashMap<String, Arc<TileMap>>,
}

/// Content factory that loads all game content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// ├── monsters.ron
/// ├── loot.ron
/// └── maps/
///     ├── world.json
///     ├── town.json
///     └── crypt.json
/// ```
///
/// The three table files are optional; absent files yield the built-in
/// values. Map files are required.
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load game configuration from `config.toml`.
    pub fn load_config(&self) -> LoadResult<GameConfig> {
        let path = self.data_dir.join("config.toml");
        if !path.exists() {
            return Ok(GameConfig::default());
        }
        ConfigLoader::load(&path)
    }

    /// Load monster stats from `monsters.ron`.
    pub fn load_bestiary(&self) -> LoadResult<Bestiary> {
        let path = self.data_dir.join("monsters.ron");
        if !path.exists() {
            return Ok(Bestiary::standard());
        }
        BestiaryLoader::load(&path)
    }

    /// Load loot tables from `loot.ron`.
    pub fn load_loot(&self) -> LoadResult<LootRegistry> {
        let path = self.data_dir.join("loot.ron");
        if !path.exists() {
            return Ok(LootRegistry::standard());
        }
        LootLoader::load(&path)
    }

    /// Load a map from `maps/{map_id}.json`.
    pub fn load_map(&self, map_id: &str) -> LoadResult<TileMap> {
        MapLoader::load(&self.map_path(map_id), map_id)
    }

    /// Whether `maps/{map_id}.json` exists.
    pub fn has_map(&self, map_id: &str) -> bool {
        self.map_path(map_id).exists()
    }

    /// Loads the tables, the world map, every dungeon the world map links to
    /// that has a map file, and the town map. Entrances without a file stay
    /// inert; a missing town file only disables town portals.
    pub fn load_content(&self, world_id: &str) -> LoadResult<GameContent> {
        let config = self.load_config()?;
        let world = self.load_map(world_id)?;

        let linked = world.spawns().dungeons.iter().map(|entrance| entrance.id.as_str());
        let mut dungeons = HashMap::new();
        for id in linked.chain([config.town_map_id.as_str()]) {
            if dungeons.contains_key(id) || !self.has_map(id) {
                continue;
            }
            let dungeon = self.load_map(id)?;
            dungeons.insert(id.to_string(), Arc::new(dungeon));
        }

        Ok(GameContent {
            config,
            bestiary: self.load_bestiary()?,
            loot: self.load_loot()?,
            world: Arc::new(world),
            dungeons,
        })
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    fn map_path(&self, map_id: &str) -> PathBuf {
        self.data_dir.join("maps").join(format!("{}.json", map_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const WORLD: &str = r#"{
        "metadata": { "width": 3, "height": 1 },
        "legend": {
            ".": { "name": "grass", "passable": true, "color": [34, 139, 34] },
            "D": { "name": "dungeon", "passable": true, "color": [60, 20, 20] }
        },
        "tiles": [".DD"],
        "spawn_point": { "x": 0, "y": 0 },
        "entities": { "dungeons": [
            { "id": "crypt", "name": "Old Crypt", "x": 1, "y": 0 },
            { "id": "cave", "name": "Dark Cave", "x": 2, "y": 0 }
        ] }
    }"#;

    const CRYPT: &str = r#"{
        "metadata": { "width": 2, "height": 1 },
        "legend": {
            "=": { "name": "floor", "passable": true, "color": [120, 120, 120] },
            "<": { "name": "exit", "passable": true, "color": [200, 200, 0] }
        },
        "tiles": ["<="],
        "spawn_point": { "x": 1, "y": 0 }
    }"#;

    #[test]
    fn test_factory_paths() {
        let factory = ContentFactory::new("/tmp/data");
        assert_eq!(factory.data_dir(), Path::new("/tmp/data"));
    }

    #[test]
    fn loads_world_and_linked_dungeons_with_default_tables() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("maps")).unwrap();
        fs::write(dir.path().join("maps/world.json"), WORLD).unwrap();
        fs::write(dir.path().join("maps/crypt.json"), CRYPT).unwrap();

        let content = ContentFactory::new(dir.path()).load_content("world").unwrap();
        assert_eq!(content.world.id(), "world");
        assert!(content.dungeons.contains_key("crypt"));
        assert!(!content.dungeons.contains_key("cave"));
        assert_eq!(content.config, GameConfig::default());
        assert_eq!(content.loot, LootRegistry::standard());
    }

    #[test]
    fn town_loads_without_an_entrance() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("maps")).unwrap();
        fs::write(dir.path().join("maps/world.json"), WORLD).unwrap();
        fs::write(dir.path().join("maps/town.json"), CRYPT).unwrap();

        let content = ContentFactory::new(dir.path()).load_content("world").unwrap();
        assert!(content.dungeons.contains_key("town"));
        assert!(!content.dungeons.contains_key("crypt"));
    }

    #[test]
    fn missing_world_map_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = ContentFactory::new(dir.path()).load_content("world").unwrap_err();
        assert!(err.to_string().contains("world.json"));
    }
}
