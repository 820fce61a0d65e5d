//! Terrain legend: tile character to passability and display metadata.

use std::collections::BTreeMap;

use crate::error::{ErrorSeverity, GameError};

/// Immutable description of one terrain kind.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TerrainType {
    pub character: char,
    pub name: String,
    pub passable: bool,
    /// RGB tint for renderers. The rules never read it.
    pub color: [u8; 3],
}

impl TerrainType {
    pub fn new(character: char, name: impl Into<String>, passable: bool, color: [u8; 3]) -> Self {
        Self {
            character,
            name: name.into(),
            passable,
            color,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TerrainError {
    #[error("Unknown terrain character: '{character}'")]
    UnknownTerrain { character: char },
}

impl GameError for TerrainError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownTerrain { .. } => "TERRAIN_UNKNOWN_CHARACTER",
        }
    }
}

/// Character-keyed terrain table loaded alongside each map.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TerrainLegend {
    terrains: BTreeMap<char, TerrainType>,
}

impl TerrainLegend {
    pub const DUNGEON_ENTRANCE: char = 'D';
    pub const DUNGEON_EXIT: char = '<';

    pub fn new() -> Self {
        Self::default()
    }

    /// Built-in legend used by hand-built maps and tests.
    pub fn standard() -> Self {
        [
            TerrainType::new('.', "grass", true, [34, 139, 34]),
            TerrainType::new('=', "floor", true, [120, 110, 100]),
            TerrainType::new('#', "wall", false, [90, 90, 90]),
            TerrainType::new('~', "water", false, [30, 90, 200]),
            TerrainType::new('T', "tree", false, [0, 100, 0]),
            TerrainType::new('D', "dungeon entrance", true, [70, 40, 20]),
            TerrainType::new('<', "dungeon exit", true, [200, 180, 60]),
            TerrainType::new('S', "shop", true, [160, 120, 40]),
            TerrainType::new('+', "door", true, [140, 80, 30]),
        ]
        .into_iter()
        .collect()
    }

    pub fn insert(&mut self, terrain: TerrainType) {
        self.terrains.insert(terrain.character, terrain);
    }

    pub fn get_terrain(&self, character: char) -> Result<&TerrainType, TerrainError> {
        self.terrains
            .get(&character)
            .ok_or(TerrainError::UnknownTerrain { character })
    }

    pub fn is_passable(&self, character: char) -> Result<bool, TerrainError> {
        self.get_terrain(character).map(|terrain| terrain.passable)
    }

    pub fn contains(&self, character: char) -> bool {
        self.terrains.contains_key(&character)
    }

    pub fn iter(&self) -> impl Iterator<Item = &TerrainType> {
        self.terrains.values()
    }
}

impl FromIterator<TerrainType> for TerrainLegend {
    fn from_iter<I: IntoIterator<Item = TerrainType>>(iter: I) -> Self {
        let mut legend = Self::new();
        for terrain in iter {
            legend.insert(terrain);
        }
        legend
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_legend_passability() {
        let legend = TerrainLegend::standard();
        assert_eq!(legend.is_passable('.'), Ok(true));
        assert_eq!(legend.is_passable('#'), Ok(false));
        assert_eq!(legend.get_terrain('~').map(|t| t.name.as_str()), Ok("water"));
    }

    #[test]
    fn unknown_character_is_an_error() {
        let legend = TerrainLegend::standard();
        let err = legend.get_terrain('?').unwrap_err();
        assert_eq!(err, TerrainError::UnknownTerrain { character: '?' });
        assert_eq!(err.to_string(), "Unknown terrain character: '?'");
        assert!(legend.is_passable('?').is_err());
    }
}
