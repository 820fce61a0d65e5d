//! Loot table loader.

use std::path::Path;

use game_core::{LootDrop, LootRegistry, LootTable};
use serde::Deserialize;

use crate::loaders::{LoadResult, parse_species, read_file};

#[derive(Debug, Clone, Deserialize)]
struct LootFileEntry {
    species: String,
    entries: LootTable,
}

/// Loader for per-species loot tables from RON files.
///
/// RON format:
/// ```ron
/// [
///     (species: "leprechaun", entries: [
///         (drop: Gold(min: 5, max: 15), chance: 0.9),
///         (drop: Item((name: "Town Portal", item_type: consumable,
///                      description: "Opens a portal to town.", gold_value: 100)), chance: 0.15),
///     ]),
/// ]
/// ```
///
/// A listed species replaces its built-in table; entry order is roll order.
pub struct LootLoader;

impl LootLoader {
    pub fn load(path: &Path) -> LoadResult<LootRegistry> {
        let content = read_file(path)?;
        let tables: Vec<LootFileEntry> = ron::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse loot RON at {:?}: {}", path, e))?;

        let mut registry = LootRegistry::standard();
        for table in tables {
            let kind = parse_species(&table.species, path)?;
            for entry in table.entries.entries() {
                if !(0.0..=1.0).contains(&entry.chance) {
                    anyhow::bail!(
                        "Loot chance {} for '{}' in {} is outside [0, 1]",
                        entry.chance,
                        table.species,
                        path.display()
                    );
                }
                if let LootDrop::Gold { min, max } = &entry.drop {
                    if min > max {
                        anyhow::bail!(
                            "Gold drop for '{}' in {} has min {} above max {}",
                            table.species,
                            path.display(),
                            min,
                            max
                        );
                    }
                }
            }
            registry.set(kind, table.entries);
        }
        Ok(registry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::{FixedRolls, Item, LootDrop, MonsterKind};
    use std::io::Write;

    fn write_temp(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn replaces_listed_tables_in_order() {
        let file = write_temp(
            r#"[
                (species: "leprechaun", entries: [
                    (drop: Gold(min: 5, max: 15), chance: 0.9),
                    (drop: Item((name: "Four-Leaf Clover", item_type: misc,
                                 description: "Brings good fortune")), chance: 0.3),
                ]),
            ]"#,
        );
        let registry = LootLoader::load(file.path()).unwrap();
        let table = registry.table(MonsterKind::Leprechaun).unwrap();
        assert_eq!(table.entries().len(), 2);
        assert_eq!(table.entries()[0].drop, LootDrop::Gold { min: 5, max: 15 });

        let mut rolls = FixedRolls::new([0.95, 0.1]);
        let clover = registry.roll_for(MonsterKind::Leprechaun, &mut rolls).unwrap();
        assert_eq!(clover.name, "Four-Leaf Clover");
        assert_eq!(clover.gold_value, 0);

        let pooka = registry.table(MonsterKind::Pooka).unwrap();
        assert_eq!(
            pooka.entries().last().map(|e| e.drop.clone()),
            Some(LootDrop::Item(Item::town_portal()))
        );
    }

    #[test]
    fn chance_out_of_range_is_rejected() {
        let file = write_temp(r#"[(species: "pooka", entries: [(drop: Gold(min: 1, max: 2), chance: 1.5)])]"#);
        let err = LootLoader::load(file.path()).unwrap_err();
        assert!(err.to_string().contains("outside [0, 1]"));
    }

    #[test]
    fn inverted_gold_range_is_rejected() {
        let file = write_temp(r#"[(species: "pooka", entries: [(drop: Gold(min: 9, max: 2), chance: 0.5)])]"#);
        let err = LootLoader::load(file.path()).unwrap_err();
        assert!(err.to_string().contains("min 9 above max 2"));
    }

    #[test]
    fn full_width_gold_range_loads() {
        let file = write_temp(
            r#"[(species: "pooka", entries: [(drop: Gold(min: 0, max: 4294967295), chance: 1.0)])]"#,
        );
        let registry = LootLoader::load(file.path()).unwrap();
        let mut rolls = FixedRolls::constant(0.5);
        let gold = registry.roll_for(MonsterKind::Pooka, &mut rolls).unwrap();
        assert!(gold.is_gold());
    }
}
