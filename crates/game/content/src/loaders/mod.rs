//! Content loaders for reading game data from files.
//!
//! Each loader converts one file format into core types; [`ContentFactory`]
//! knows the directory layout and assembles a complete [`GameContent`].

pub mod bestiary;
pub mod config;
pub mod factory;
pub mod loot;
pub mod map;

pub use bestiary::BestiaryLoader;
pub use config::ConfigLoader;
pub use factory::{ContentFactory, GameContent};
pub use loot::LootLoader;
pub use map::MapLoader;

use std::path::Path;

use anyhow::Context;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read file {}", path.display()))
}

/// Parses a species id, naming the offending file on failure.
pub(crate) fn parse_species(species: &str, path: &Path) -> LoadResult<game_core::MonsterKind> {
    species
        .parse()
        .map_err(|_| anyhow::anyhow!("Unknown species '{}' in {}", species, path.display()))
}
