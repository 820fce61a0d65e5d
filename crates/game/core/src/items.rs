//! Items, chests and items lying on the ground.

use crate::grid::Position;
use crate::rng::RollSource;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum ItemKind {
    Weapon,
    Armor,
    Consumable,
    Misc,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Item {
    pub name: String,
    #[cfg_attr(feature = "serde", serde(rename = "item_type"))]
    pub kind: ItemKind,
    pub description: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub attack_bonus: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub defense_bonus: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub health_restore: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub gold_value: u32,
}

impl Item {
    pub const HEALTH_POTION: &'static str = "Health Potion";
    pub const TOWN_PORTAL: &'static str = "Town Portal";
    const POTION_HEAL: u32 = 30;

    pub fn new(name: impl Into<String>, kind: ItemKind, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind,
            description: description.into(),
            attack_bonus: 0,
            defense_bonus: 0,
            health_restore: 0,
            gold_value: 10,
        }
    }

    /// Weapon priced at ten gold per point of attack.
    pub fn weapon(name: impl Into<String>, description: impl Into<String>, attack: u32) -> Self {
        Self {
            attack_bonus: attack,
            gold_value: attack * 10,
            ..Self::new(name, ItemKind::Weapon, description)
        }
    }

    /// Armor priced at ten gold per point of defense.
    pub fn armor(name: impl Into<String>, description: impl Into<String>, defense: u32) -> Self {
        Self {
            defense_bonus: defense,
            gold_value: defense * 10,
            ..Self::new(name, ItemKind::Armor, description)
        }
    }

    pub fn consumable(name: impl Into<String>) -> Self {
        Self {
            health_restore: Self::POTION_HEAL,
            gold_value: 30,
            ..Self::new(name, ItemKind::Consumable, "Restores 30 health")
        }
    }

    pub fn misc(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(name, ItemKind::Misc, description)
    }

    pub fn gold(amount: u32) -> Self {
        Self {
            gold_value: amount,
            ..Self::new(format!("{amount} Gold"), ItemKind::Misc, format!("{amount} pieces of gold"))
        }
    }

    pub fn health_potion() -> Self {
        Self::consumable(Self::HEALTH_POTION)
    }

    pub fn town_portal() -> Self {
        Self {
            gold_value: 100,
            ..Self::new(
                Self::TOWN_PORTAL,
                ItemKind::Consumable,
                "Opens a portal to town.",
            )
        }
    }

    pub fn with_gold_value(mut self, gold_value: u32) -> Self {
        self.gold_value = gold_value;
        self
    }

    /// Gold drops are misc items whose name mentions gold; pickup converts them
    /// to the warrior's counter instead of a backpack slot.
    pub fn is_gold(&self) -> bool {
        self.kind == ItemKind::Misc && self.name.contains("Gold")
    }

    pub fn sell_price(&self) -> u32 {
        self.gold_value / 2
    }
}

/// Unopened chest on the current level.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Chest {
    pub position: Position,
    item: Option<Item>,
}

impl Chest {
    pub fn new(position: Position, item: Item) -> Self {
        Self {
            position,
            item: Some(item),
        }
    }

    /// Chest with contents drawn from [`chest_item_pool`].
    pub fn with_random_item(position: Position, rolls: &mut dyn RollSource) -> Self {
        Self::new(position, Self::random_item(rolls))
    }

    pub fn random_item(rolls: &mut dyn RollSource) -> Item {
        let mut pool = chest_item_pool();
        let index = rolls.pick(pool.len());
        pool.swap_remove(index)
    }

    pub fn is_opened(&self) -> bool {
        self.item.is_none()
    }

    pub fn contents(&self) -> Option<&Item> {
        self.item.as_ref()
    }

    /// Yields the item the first time, `None` afterwards.
    pub fn open(&mut self) -> Option<Item> {
        self.item.take()
    }
}

/// Item dropped on a tile, waiting to be picked up.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GroundItem {
    pub item: Item,
    pub position: Position,
}

impl GroundItem {
    pub fn new(item: Item, position: Position) -> Self {
        Self { item, position }
    }
}

/// Everything a chest may contain, picked uniformly.
pub fn chest_item_pool() -> Vec<Item> {
    vec![
        Item::weapon("Iron Sword", "A basic sword", 10),
        Item::weapon("Steel Sword", "A stronger sword", 20),
        Item::weapon("Battle Axe", "A heavy axe", 25),
        Item::weapon("Dagger", "A quick blade", 8),
        Item::weapon("Mace", "A blunt weapon", 15),
        Item::armor("Leather Armor", "Basic protection", 5),
        Item::armor("Chain Mail", "Metal armor", 10),
        Item::armor("Plate Armor", "Heavy armor", 15),
        Item::armor("Shield", "A sturdy shield", 8),
        Item::health_potion(),
        Item::consumable("Minor Health Potion").with_gold_value(25),
        Item::consumable("Greater Health Potion").with_gold_value(50),
        Item::misc("Ancient Key", "Opens something?").with_gold_value(50),
        Item::misc("Magic Scroll", "Mysterious writings").with_gold_value(75),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::FixedRolls;

    #[test]
    fn constructors_price_by_bonus() {
        let sword = Item::weapon("Cat's Claw", "Sharp", 16);
        assert_eq!(sword.gold_value, 160);
        assert_eq!(sword.sell_price(), 80);
        let mail = Item::armor("Chain Mail", "Metal armor", 10);
        assert_eq!(mail.gold_value, 100);
        assert_eq!(Item::misc("Clover", "Lucky").gold_value, 10);
        assert_eq!(Item::town_portal().gold_value, 100);
    }

    #[test]
    fn gold_items_are_recognised() {
        let gold = Item::gold(7);
        assert_eq!(gold.name, "7 Gold");
        assert_eq!(gold.gold_value, 7);
        assert!(gold.is_gold());
        assert!(!Item::weapon("Golden Sword", "Shiny", 5).is_gold());
    }

    #[test]
    fn chest_opens_once() {
        let mut chest = Chest::new(Position::new(2, 2), Item::health_potion());
        assert!(!chest.is_opened());
        assert_eq!(chest.open().map(|i| i.name), Some("Health Potion".to_string()));
        assert!(chest.is_opened());
        assert_eq!(chest.open(), None);
    }

    #[test]
    fn random_chest_uses_roll_index() {
        let first = Chest::random_item(&mut FixedRolls::constant(0.0));
        assert_eq!(first.name, "Iron Sword");
        let last = Chest::random_item(&mut FixedRolls::constant(0.999));
        assert_eq!(last.name, "Magic Scroll");
    }
}
