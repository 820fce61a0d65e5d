//! Static tile maps and the oracle trait the rules consult for movement.

use crate::error::{ErrorSeverity, GameError};
use crate::grid::{MapDimensions, Position};
use crate::terrain::{TerrainError, TerrainLegend, TerrainType};

/// Static map oracle exposing immutable layout information.
///
/// The world map and every dungeon map satisfy this contract and are
/// interchangeable from the point of view of movement and AI.
pub trait MapOracle: Send + Sync {
    fn dimensions(&self) -> MapDimensions;

    /// Terrain character at `position`, `None` when out of bounds.
    fn tile_char(&self, position: Position) -> Option<char>;

    fn terrain_at(&self, position: Position) -> Option<&TerrainType>;

    fn is_valid_position(&self, position: Position) -> bool {
        self.dimensions().contains(position)
    }

    /// False when out of bounds or when the terrain there is impassable.
    fn is_passable(&self, position: Position) -> bool {
        self.terrain_at(position)
            .is_some_and(|terrain| terrain.passable)
    }
}

/// Monster placement authored in the map file.
///
/// The species stays a raw string: an unrecognised species is not a load error,
/// it resolves to a random species when the level is populated.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MonsterSpawn {
    pub species: String,
    pub position: Position,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DungeonEntrance {
    pub id: String,
    pub name: String,
    pub position: Position,
}

/// Entities a map places when it is (re)entered.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MapSpawns {
    pub monsters: Vec<MonsterSpawn>,
    pub chests: Vec<Position>,
    pub dungeons: Vec<DungeonEntrance>,
    /// Shopkeeper tile, authored on the town map.
    pub shop: Option<Position>,
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum MapError {
    #[error("Tile data height ({actual}) doesn't match metadata height ({expected})")]
    HeightMismatch { expected: u32, actual: usize },

    #[error("Row {row} width ({actual}) doesn't match metadata width ({expected})")]
    WidthMismatch {
        row: usize,
        expected: u32,
        actual: usize,
    },

    #[error("Invalid spawn point: {spawn} (map size: {width}x{height})")]
    InvalidSpawnPoint {
        spawn: Position,
        width: u32,
        height: u32,
    },

    #[error("row {row}: {source}")]
    Terrain {
        row: usize,
        #[source]
        source: TerrainError,
    },
}

impl GameError for MapError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::HeightMismatch { .. } => "MAP_HEIGHT_MISMATCH",
            Self::WidthMismatch { .. } => "MAP_WIDTH_MISMATCH",
            Self::InvalidSpawnPoint { .. } => "MAP_INVALID_SPAWN_POINT",
            Self::Terrain { .. } => "MAP_UNKNOWN_TERRAIN",
        }
    }
}

/// Validated rectangular tile map.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TileMap {
    id: String,
    name: String,
    dimensions: MapDimensions,
    tiles: Vec<Vec<char>>,
    legend: TerrainLegend,
    spawn_point: Position,
    spawns: MapSpawns,
}

impl TileMap {
    /// Builds a map from row strings, rejecting malformed layouts up front so
    /// that later passability queries cannot hit an unknown character.
    pub fn new(
        id: impl Into<String>,
        dimensions: MapDimensions,
        rows: &[impl AsRef<str>],
        legend: TerrainLegend,
        spawn_point: Position,
    ) -> Result<Self, MapError> {
        if rows.len() != dimensions.height as usize {
            return Err(MapError::HeightMismatch {
                expected: dimensions.height,
                actual: rows.len(),
            });
        }

        let mut tiles = Vec::with_capacity(rows.len());
        for (row_idx, row) in rows.iter().enumerate() {
            let row: Vec<char> = row.as_ref().chars().collect();
            if row.len() != dimensions.width as usize {
                return Err(MapError::WidthMismatch {
                    row: row_idx,
                    expected: dimensions.width,
                    actual: row.len(),
                });
            }
            if let Some(&character) = row.iter().find(|c| !legend.contains(**c)) {
                return Err(MapError::Terrain {
                    row: row_idx,
                    source: TerrainError::UnknownTerrain { character },
                });
            }
            tiles.push(row);
        }

        if !dimensions.contains(spawn_point) {
            return Err(MapError::InvalidSpawnPoint {
                spawn: spawn_point,
                width: dimensions.width,
                height: dimensions.height,
            });
        }

        let id = id.into();
        Ok(Self {
            name: id.clone(),
            id,
            dimensions,
            tiles,
            legend,
            spawn_point,
            spawns: MapSpawns::default(),
        })
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_spawns(mut self, spawns: MapSpawns) -> Self {
        self.spawns = spawns;
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn spawn_point(&self) -> Position {
        self.spawn_point
    }

    pub fn spawns(&self) -> &MapSpawns {
        &self.spawns
    }

    pub fn legend(&self) -> &TerrainLegend {
        &self.legend
    }

    /// Dungeon entrance located exactly at `position`, if any.
    pub fn dungeon_entrance_at(&self, position: Position) -> Option<&DungeonEntrance> {
        self.spawns
            .dungeons
            .iter()
            .find(|entrance| entrance.position == position)
    }
}

impl MapOracle for TileMap {
    fn dimensions(&self) -> MapDimensions {
        self.dimensions
    }

    fn tile_char(&self, position: Position) -> Option<char> {
        if !self.dimensions.contains(position) {
            return None;
        }
        self.tiles
            .get(position.y as usize)
            .and_then(|row| row.get(position.x as usize))
            .copied()
    }

    fn terrain_at(&self, position: Position) -> Option<&TerrainType> {
        let character = self.tile_char(position)?;
        self.legend.get_terrain(character).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows() -> [&'static str; 3] {
        ["....", ".#~.", "...<"]
    }

    fn small_map() -> TileMap {
        TileMap::new(
            "test",
            MapDimensions::new(4, 3),
            &rows(),
            TerrainLegend::standard(),
            Position::new(0, 0),
        )
        .expect("valid map")
    }

    #[test]
    fn passability_combines_bounds_and_terrain() {
        let map = small_map();
        assert!(map.is_passable(Position::new(0, 0)));
        assert!(!map.is_passable(Position::new(1, 1)));
        assert!(!map.is_passable(Position::new(2, 1)));
        assert!(!map.is_passable(Position::new(-1, 0)));
        assert!(!map.is_passable(Position::new(4, 0)));
        assert_eq!(map.tile_char(Position::new(3, 2)), Some('<'));
    }

    #[test]
    fn rejects_height_mismatch() {
        let err = TileMap::new(
            "bad",
            MapDimensions::new(4, 4),
            &rows(),
            TerrainLegend::standard(),
            Position::ORIGIN,
        )
        .unwrap_err();
        assert_eq!(err, MapError::HeightMismatch { expected: 4, actual: 3 });
    }

    #[test]
    fn rejects_ragged_rows() {
        let err = TileMap::new(
            "bad",
            MapDimensions::new(4, 2),
            &["....", "..."],
            TerrainLegend::standard(),
            Position::ORIGIN,
        )
        .unwrap_err();
        assert!(matches!(err, MapError::WidthMismatch { row: 1, actual: 3, .. }));
    }

    #[test]
    fn rejects_unknown_terrain() {
        let err = TileMap::new(
            "bad",
            MapDimensions::new(2, 1),
            &[".?"],
            TerrainLegend::standard(),
            Position::ORIGIN,
        )
        .unwrap_err();
        assert_eq!(
            err,
            MapError::Terrain {
                row: 0,
                source: TerrainError::UnknownTerrain { character: '?' },
            }
        );
        assert_eq!(err.error_code(), "MAP_UNKNOWN_TERRAIN");
    }

    #[test]
    fn rejects_spawn_outside_bounds() {
        let err = TileMap::new(
            "bad",
            MapDimensions::new(4, 3),
            &rows(),
            TerrainLegend::standard(),
            Position::new(4, 0),
        )
        .unwrap_err();
        assert!(matches!(err, MapError::InvalidSpawnPoint { .. }));
    }
}
