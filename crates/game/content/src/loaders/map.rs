//! Map data loader.
//!
//! Maps are JSON documents: metadata, a terrain legend, one string per tile
//! row, a spawn point and optional entity placements.
//!
//! ```json
//! {
//!   "metadata": { "name": "Ballyhoura", "width": 16, "height": 12, "tile_size": 50 },
//!   "legend": { ".": { "name": "grass", "passable": true, "color": [34, 139, 34] } },
//!   "tiles": ["................", "..."],
//!   "spawn_point": { "x": 2, "y": 2 },
//!   "entities": {
//!     "monsters": [{ "type": "banshee", "x": 6, "y": 5 }],
//!     "chests": [{ "x": 3, "y": 8 }],
//!     "dungeons": [{ "id": "crypt", "name": "Old Crypt", "x": 12, "y": 4 }],
//!     "shop": { "x": 7, "y": 3 }
//!   }
//! }
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use game_core::{
    DungeonEntrance, MapDimensions, MapSpawns, MonsterSpawn, Position, TerrainLegend, TerrainType,
    TileMap,
};
use serde::Deserialize;

use crate::loaders::{LoadResult, read_file};

#[derive(Debug, Clone, Deserialize)]
struct MapFile {
    metadata: MetadataJson,
    legend: BTreeMap<String, TerrainJson>,
    tiles: Vec<String>,
    spawn_point: PointJson,
    #[serde(default)]
    entities: EntitiesJson,
}

#[derive(Debug, Clone, Deserialize)]
struct MetadataJson {
    #[serde(default)]
    name: Option<String>,
    width: u32,
    height: u32,
}

#[derive(Debug, Clone, Deserialize)]
struct TerrainJson {
    name: String,
    passable: bool,
    #[serde(default)]
    color: [u8; 3],
}

#[derive(Debug, Clone, Copy, Deserialize)]
struct PointJson {
    x: i32,
    y: i32,
}

impl From<PointJson> for Position {
    fn from(point: PointJson) -> Self {
        Position::new(point.x, point.y)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
struct EntitiesJson {
    #[serde(default)]
    monsters: Vec<MonsterJson>,
    #[serde(default)]
    chests: Vec<PointJson>,
    #[serde(default)]
    dungeons: Vec<DungeonJson>,
    #[serde(default)]
    shop: Option<PointJson>,
}

#[derive(Debug, Clone, Deserialize)]
struct MonsterJson {
    #[serde(rename = "type")]
    species: String,
    x: i32,
    y: i32,
}

#[derive(Debug, Clone, Deserialize)]
struct DungeonJson {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    name: Option<String>,
    x: i32,
    y: i32,
}

impl DungeonJson {
    /// Entrances without an id derive one from their name.
    fn into_entrance(self) -> DungeonEntrance {
        let name = self.name.unwrap_or_else(|| "unknown".to_string());
        let id = self
            .id
            .unwrap_or_else(|| name.to_lowercase().replace(' ', "_"));
        DungeonEntrance {
            id,
            name,
            position: Position::new(self.x, self.y),
        }
    }
}

/// Loader for map data from JSON files.
pub struct MapLoader;

impl MapLoader {
    /// Load a map file. `map_id` becomes the map's id in ledgers and saves.
    pub fn load(path: &Path, map_id: &str) -> LoadResult<TileMap> {
        let content = read_file(path)?;
        Self::parse(&content, map_id)
            .map_err(|e| anyhow::anyhow!("Failed to load map {}: {:#}", path.display(), e))
    }

    pub fn parse(content: &str, map_id: &str) -> LoadResult<TileMap> {
        let file: MapFile = serde_json::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse map JSON: {}", e))?;

        let mut legend = TerrainLegend::new();
        for (key, terrain) in file.legend {
            let mut chars = key.chars();
            let (Some(character), None) = (chars.next(), chars.next()) else {
                anyhow::bail!("Legend key '{}' must be a single character", key);
            };
            legend.insert(TerrainType::new(
                character,
                terrain.name,
                terrain.passable,
                terrain.color,
            ));
        }

        let spawns = MapSpawns {
            monsters: file
                .entities
                .monsters
                .into_iter()
                .map(|m| MonsterSpawn {
                    species: m.species,
                    position: Position::new(m.x, m.y),
                })
                .collect(),
            chests: file.entities.chests.into_iter().map(Position::from).collect(),
            dungeons: file
                .entities
                .dungeons
                .into_iter()
                .map(DungeonJson::into_entrance)
                .collect(),
            shop: file.entities.shop.map(Position::from),
        };

        let dimensions = MapDimensions::new(file.metadata.width, file.metadata.height);
        let map = TileMap::new(
            map_id,
            dimensions,
            &file.tiles,
            legend,
            file.spawn_point.into(),
        )?
        .with_spawns(spawns);

        Ok(match file.metadata.name {
            Some(name) => map.with_name(name),
            None => map,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::MapOracle;

    const SMALL_MAP: &str = r##"{
        "metadata": { "name": "Glen", "width": 4, "height": 3, "tile_size": 50 },
        "legend": {
            ".": { "name": "grass", "passable": true, "color": [34, 139, 34] },
            "#": { "name": "wall", "passable": false, "color": [90, 90, 90] },
            "D": { "name": "dungeon", "passable": true, "color": [60, 20, 20] }
        },
        "tiles": ["....", ".#D.", "...."],
        "spawn_point": { "x": 0, "y": 0 },
        "entities": {
            "monsters": [{ "type": "pooka", "x": 3, "y": 2 }],
            "chests": [{ "x": 0, "y": 2 }],
            "dungeons": [{ "name": "Old Crypt", "x": 2, "y": 1 }]
        }
    }"##;

    #[test]
    fn parses_tiles_and_entities() {
        let map = MapLoader::parse(SMALL_MAP, "world").unwrap();
        assert_eq!(map.id(), "world");
        assert_eq!(map.name(), "Glen");
        assert!(!map.is_passable(Position::new(1, 1)));
        assert!(map.is_passable(Position::new(2, 1)));
        assert_eq!(map.spawns().monsters[0].species, "pooka");
        assert_eq!(map.spawns().chests, vec![Position::new(0, 2)]);

        let entrance = map.dungeon_entrance_at(Position::new(2, 1)).unwrap();
        assert_eq!(entrance.id, "old_crypt");
    }

    #[test]
    fn unknown_terrain_character_fails() {
        let bad = SMALL_MAP.replace(".#D.", ".#X.");
        let err = MapLoader::parse(&bad, "world").unwrap_err();
        assert!(format!("{err:#}").contains("Unknown terrain character: 'X'"));
    }

    #[test]
    fn row_width_mismatch_fails() {
        let bad = SMALL_MAP.replace(".#D.", ".#D");
        assert!(MapLoader::parse(&bad, "world").is_err());
    }

    #[test]
    fn entities_are_optional() {
        let json = r#"{
            "metadata": { "width": 2, "height": 1 },
            "legend": { "=": { "name": "floor", "passable": true, "color": [120, 120, 120] } },
            "tiles": ["=="],
            "spawn_point": { "x": 1, "y": 0 }
        }"#;
        let map = MapLoader::parse(json, "cellar").unwrap();
        assert_eq!(map.name(), "cellar");
        assert!(map.spawns().monsters.is_empty());
        assert_eq!(map.spawns().shop, None);
    }

    #[test]
    fn reads_shop_position() {
        let json = SMALL_MAP.replace(
            r#""chests": [{ "x": 0, "y": 2 }],"#,
            r#""chests": [{ "x": 0, "y": 2 }], "shop": { "x": 3, "y": 0 },"#,
        );
        let map = MapLoader::parse(&json, "town").unwrap();
        assert_eq!(map.spawns().shop, Some(Position::new(3, 0)));
    }

    #[test]
    fn multi_character_legend_key_fails() {
        let bad = SMALL_MAP.replace(r#""D": {"#, r#""DD": {"#);
        let err = MapLoader::parse(&bad, "world").unwrap_err();
        assert!(err.to_string().contains("single character"));
    }
}
