#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;

use game_content::GameContent;
use game_core::{
    Bestiary, DungeonEntrance, GameConfig, LootRegistry, MapDimensions, MapSpawns, MonsterSpawn,
    Position, TerrainLegend, TileMap,
};

/// Warrior start on the world map.
pub const WORLD_SPAWN: Position = Position::new(3, 1);
pub const CRYPT_ENTRANCE: Position = Position::new(1, 1);
pub const CHEST: Position = Position::new(4, 1);
pub const CRYPT_SPAWN: Position = Position::new(1, 0);
pub const TOWN_ENTRANCE: Position = Position::new(6, 1);
pub const TOWN_SPAWN: Position = Position::new(1, 1);
pub const SHOP: Position = Position::new(4, 1);

fn monster(species: &str, x: i32, y: i32) -> MonsterSpawn {
    MonsterSpawn {
        species: species.into(),
        position: Position::new(x, y),
    }
}

/// 20x3 world: crypt entrance west of the spawn, a chest east of it, the town
/// gate past the chest, and a clurichaun far enough away to stay idle.
pub fn world_map() -> TileMap {
    let rows = vec![".".repeat(20), ".D".to_string() + &".".repeat(18), ".".repeat(20)];
    TileMap::new(
        "world",
        MapDimensions::new(20, 3),
        &rows,
        TerrainLegend::standard(),
        WORLD_SPAWN,
    )
    .unwrap()
    .with_spawns(MapSpawns {
        monsters: vec![monster("clurichaun", 19, 2)],
        chests: vec![CHEST],
        dungeons: vec![
            DungeonEntrance {
                id: "crypt".into(),
                name: "Old Crypt".into(),
                position: CRYPT_ENTRANCE,
            },
            DungeonEntrance {
                id: "town".into(),
                name: "Town".into(),
                position: TOWN_ENTRANCE,
            },
        ],
        shop: None,
    })
}

/// 6x3 crypt with its exit in the top-left corner.
pub fn crypt_map() -> TileMap {
    let rows = vec!["<=====".to_string(), "======".to_string(), "======".to_string()];
    TileMap::new(
        "crypt",
        MapDimensions::new(6, 3),
        &rows,
        TerrainLegend::standard(),
        CRYPT_SPAWN,
    )
    .unwrap()
    .with_spawns(MapSpawns {
        monsters: vec![monster("clurichaun", 5, 2)],
        ..MapSpawns::default()
    })
}

/// 6x3 town with its exit in the top-left corner and the shop three tiles
/// east of the spawn.
pub fn town_map() -> TileMap {
    let rows = vec!["<.....".to_string(), "......".to_string(), "......".to_string()];
    TileMap::new(
        "town",
        MapDimensions::new(6, 3),
        &rows,
        TerrainLegend::standard(),
        TOWN_SPAWN,
    )
    .unwrap()
    .with_spawns(MapSpawns {
        monsters: vec![monster("pooka", 5, 2)],
        shop: Some(SHOP),
        ..MapSpawns::default()
    })
}

pub fn content() -> GameContent {
    content_with(GameConfig::default(), world_map())
}

pub fn content_with(config: GameConfig, world: TileMap) -> GameContent {
    let mut dungeons = HashMap::new();
    dungeons.insert("crypt".to_string(), Arc::new(crypt_map()));
    dungeons.insert("town".to_string(), Arc::new(town_map()));
    GameContent {
        config,
        bestiary: Bestiary::standard(),
        loot: LootRegistry::new(),
        world: Arc::new(world),
        dungeons,
    }
}

/// A world where a dullahan stands next to a one-hit-point warrior.
pub fn deadly_content() -> GameContent {
    let config = GameConfig {
        warrior_max_health: 1,
        ..GameConfig::default()
    };
    let world = world_map().with_spawns(MapSpawns {
        monsters: vec![monster("dullahan", 3, 2)],
        ..MapSpawns::default()
    });
    content_with(config, world)
}
