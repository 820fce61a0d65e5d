//! Monster stat loader.

use std::path::Path;

use game_core::{Bestiary, MonsterStats};
use serde::Deserialize;

use crate::loaders::{LoadResult, parse_species, read_file};

/// One species override as written in RON.
#[derive(Debug, Clone, Deserialize)]
struct BestiaryEntry {
    species: String,
    stats: MonsterStats,
}

/// Loader for monster stat blocks from RON files.
///
/// RON format: `[(species: "banshee", stats: (health: 80, ...)), ...]`.
/// Species not named in the file keep their built-in stats.
pub struct BestiaryLoader;

impl BestiaryLoader {
    pub fn load(path: &Path) -> LoadResult<Bestiary> {
        let content = read_file(path)?;
        let entries: Vec<BestiaryEntry> = ron::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse bestiary RON at {:?}: {}", path, e))?;

        let mut bestiary = Bestiary::standard();
        for entry in entries {
            let kind = parse_species(&entry.species, path)?;
            bestiary.set(kind, entry.stats);
        }
        Ok(bestiary)
    }
}
