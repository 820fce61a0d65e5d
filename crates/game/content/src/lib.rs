//! Data-driven content definitions and loaders.
//!
//! This crate turns the files under a data directory into `game-core` types:
//! - Tile maps with authored spawns (JSON)
//! - Monster stat blocks (RON, layered over the built-in bestiary)
//! - Per-species loot tables (RON, layered over the built-in tables)
//! - Game configuration (TOML, every key optional)
//!
//! Content is read once at startup and never appears in save files.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{
    BestiaryLoader, ConfigLoader, ContentFactory, GameContent, LoadResult, LootLoader, MapLoader,
};
