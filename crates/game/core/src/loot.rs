//! Per-species loot tables.
//!
//! A table is an ordered list of `(drop, chance)` entries. Rolling walks the
//! list drawing one sample per entry and returns the first entry whose sample
//! falls under its chance; later entries are not evaluated. Entry order is
//! therefore priority, and a death yields at most one drop.

use std::collections::HashMap;

use crate::items::Item;
use crate::monster::MonsterKind;
use crate::rng::RollSource;

/// What an entry produces when it wins.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LootDrop {
    Item(Item),
    /// Gold pile; the amount is rolled inclusively when the entry wins.
    Gold { min: u32, max: u32 },
}

impl LootDrop {
    fn realize(&self, rolls: &mut dyn RollSource) -> Item {
        match self {
            LootDrop::Item(item) => item.clone(),
            LootDrop::Gold { min, max } => Item::gold(rolls.range(*min, *max)),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LootEntry {
    pub drop: LootDrop,
    /// Probability in `[0, 1]`.
    pub chance: f64,
}

impl LootEntry {
    pub fn new(drop: LootDrop, chance: f64) -> Self {
        Self { drop, chance }
    }

    pub fn item(item: Item, chance: f64) -> Self {
        Self::new(LootDrop::Item(item), chance)
    }

    pub fn gold(min: u32, max: u32, chance: f64) -> Self {
        Self::new(LootDrop::Gold { min, max }, chance)
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct LootTable {
    entries: Vec<LootEntry>,
}

impl LootTable {
    pub fn new(entries: Vec<LootEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[LootEntry] {
        &self.entries
    }

    /// First entry whose sample lands under its chance, if any.
    pub fn roll_loot(&self, rolls: &mut dyn RollSource) -> Option<Item> {
        self.entries
            .iter()
            .find(|entry| rolls.unit() < entry.chance)
            .map(|entry| entry.drop.realize(rolls))
    }
}

/// Loot tables keyed by species. Species without a table drop nothing.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LootRegistry {
    tables: HashMap<MonsterKind, LootTable>,
}

impl LootRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, kind: MonsterKind, table: LootTable) {
        self.tables.insert(kind, table);
    }

    pub fn table(&self, kind: MonsterKind) -> Option<&LootTable> {
        self.tables.get(&kind)
    }

    pub fn roll_for(&self, kind: MonsterKind, rolls: &mut dyn RollSource) -> Option<Item> {
        self.tables.get(&kind)?.roll_loot(rolls)
    }

    /// Built-in drop tables. Every species can drop a town portal as a last
    /// resort entry.
    pub fn standard() -> Self {
        let portal = || LootEntry::item(Item::town_portal(), 0.15);
        let mut registry = Self::new();

        registry.set(
            MonsterKind::Banshee,
            LootTable::new(vec![
                LootEntry::item(common_armor("Spectral Veil", 8), 0.3),
                LootEntry::item(Item::consumable("Tear of Sorrow"), 0.6),
                LootEntry::gold(1, 5, 0.5),
                portal(),
            ]),
        );
        registry.set(
            MonsterKind::Leprechaun,
            LootTable::new(vec![
                LootEntry::item(common_weapon("Lucky Shillelagh", 12), 0.4),
                LootEntry::gold(5, 15, 0.9),
                LootEntry::item(Item::misc("Four-Leaf Clover", "Brings good fortune"), 0.3),
                portal(),
            ]),
        );
        registry.set(
            MonsterKind::Pooka,
            LootTable::new(vec![
                LootEntry::item(common_weapon("Twisted Horn", 15), 0.35),
                LootEntry::item(common_armor("Shadow Pelt", 10), 0.3),
                LootEntry::item(Item::consumable("Dark Berry"), 0.7),
                LootEntry::gold(2, 6, 0.5),
                portal(),
            ]),
        );
        registry.set(
            MonsterKind::Selkie,
            LootTable::new(vec![
                LootEntry::item(common_armor("Seal Skin Cloak", 12), 0.4),
                LootEntry::item(Item::consumable("Ocean Pearl"), 0.6),
                LootEntry::gold(2, 7, 0.5),
                portal(),
            ]),
        );
        registry.set(
            MonsterKind::Dullahan,
            LootTable::new(vec![
                LootEntry::item(common_weapon("Headless Blade", 25), 0.4),
                LootEntry::item(common_armor("Dark Rider's Mail", 15), 0.3),
                LootEntry::gold(5, 12, 0.6),
                portal(),
            ]),
        );
        registry.set(
            MonsterKind::Changeling,
            LootTable::new(vec![
                LootEntry::item(common_weapon("Fae Dagger", 18), 0.35),
                LootEntry::item(Item::consumable("Glamour Essence"), 0.65),
                LootEntry::gold(3, 8, 0.5),
                portal(),
            ]),
        );
        registry.set(
            MonsterKind::Clurichaun,
            LootTable::new(vec![
                LootEntry::item(common_weapon("Drunken Bottle", 14), 0.4),
                LootEntry::item(Item::consumable("Fine Whiskey"), 0.75),
                LootEntry::gold(4, 10, 0.65),
                portal(),
            ]),
        );
        registry.set(
            MonsterKind::Merrow,
            LootTable::new(vec![
                LootEntry::item(common_armor("Coral Crown", 11), 0.35),
                LootEntry::item(common_weapon("Trident Shard", 20), 0.3),
                LootEntry::item(Item::consumable("Sea Kelp"), 0.7),
                LootEntry::gold(3, 9, 0.5),
                portal(),
            ]),
        );
        registry.set(
            MonsterKind::FearGorta,
            LootTable::new(vec![
                LootEntry::item(Item::consumable("Blessed Bread"), 0.7),
                LootEntry::item(common_armor("Tattered Robes", 6), 0.4),
                LootEntry::gold(1, 4, 0.4),
                portal(),
            ]),
        );
        registry.set(
            MonsterKind::CatSi,
            LootTable::new(vec![
                LootEntry::item(common_weapon("Cat's Claw", 16), 0.4),
                LootEntry::item(common_armor("Fur Mantle", 9), 0.35),
                LootEntry::gold(2, 6, 0.5),
                portal(),
            ]),
        );

        registry
    }
}

fn common_weapon(name: &str, attack: u32) -> Item {
    Item::weapon(name, format!("Deals {attack} extra damage"), attack)
}

fn common_armor(name: &str, defense: u32) -> Item {
    Item::armor(name, format!("+{defense} defense"), defense)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::{FixedRolls, RngStream, RollContext};

    fn named(name: &str) -> Item {
        Item::misc(name, "test item")
    }

    #[test]
    fn first_certain_entry_always_wins() {
        let table = LootTable::new(vec![
            LootEntry::item(named("A"), 1.0),
            LootEntry::item(named("B"), 1.0),
        ]);
        for seed in 0..50 {
            let mut stream = RngStream::new(seed, 0, RollContext::Loot);
            assert_eq!(table.roll_loot(&mut stream).map(|i| i.name), Some("A".into()));
            assert_eq!(stream.draws(), 1);
        }
    }

    #[test]
    fn short_circuits_on_first_success() {
        let table = LootTable::new(vec![
            LootEntry::item(named("A"), 0.3),
            LootEntry::item(named("B"), 0.6),
            LootEntry::item(named("C"), 0.9),
        ]);
        let mut rolls = FixedRolls::new([0.5, 0.4, 0.0]);
        assert_eq!(table.roll_loot(&mut rolls).map(|i| i.name), Some("B".into()));
        assert_eq!(rolls.remaining(), 1);
    }

    #[test]
    fn all_misses_drop_nothing() {
        let table = LootTable::new(vec![
            LootEntry::item(named("A"), 0.3),
            LootEntry::item(named("B"), 0.0),
        ]);
        let mut rolls = FixedRolls::constant(0.3);
        assert_eq!(table.roll_loot(&mut rolls), None);
        assert_eq!(LootTable::default().roll_loot(&mut rolls), None);
    }

    #[test]
    fn gold_amount_rolled_on_win() {
        let table = LootTable::new(vec![LootEntry::gold(5, 15, 0.9)]);
        let mut rolls = FixedRolls::new([0.1, 0.0]);
        let gold = table.roll_loot(&mut rolls).unwrap();
        assert!(gold.is_gold());
        assert_eq!(gold.gold_value, 5);
    }

    #[test]
    fn gold_pile_spanning_every_amount_rolls() {
        let table = LootTable::new(vec![LootEntry::gold(0, u32::MAX, 1.0)]);
        let mut stream = RngStream::new(1, 1, RollContext::Loot);
        let gold = table.roll_loot(&mut stream).unwrap();
        assert!(gold.is_gold());
    }

    #[test]
    fn standard_tables_cover_every_species() {
        let registry = LootRegistry::standard();
        for kind in MonsterKind::ALL {
            let table = registry.table(kind).unwrap();
            let last = table.entries().last().unwrap();
            assert_eq!(last.drop, LootDrop::Item(Item::town_portal()));
        }

        let mut rolls = FixedRolls::constant(0.0);
        let claw = registry.roll_for(MonsterKind::CatSi, &mut rolls).unwrap();
        assert_eq!(claw.name, "Cat's Claw");
        assert_eq!(claw.attack_bonus, 16);
        assert_eq!(claw.description, "Deals 16 extra damage");
    }

    #[test]
    fn species_without_table_drop_nothing() {
        let registry = LootRegistry::new();
        let mut rolls = FixedRolls::constant(0.0);
        assert_eq!(registry.roll_for(MonsterKind::Pooka, &mut rolls), None);
    }
}
