//! Equipment slots and backpack.

use crate::config::GameConfig;
use crate::items::{Item, ItemKind};

/// Inventory contract the warrior depends on.
pub trait Equipment {
    /// Attack bonus summed over equipped items.
    fn total_attack_bonus(&self) -> u32;

    fn total_defense_bonus(&self) -> u32;

    /// Stores the item, or hands it back untouched when there is no room.
    fn add_item(&mut self, item: Item) -> Result<(), Item>;
}

pub const BACKPACK_CAPACITY: usize = GameConfig::BACKPACK_CAPACITY;

#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display, strum::EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum EquipSlot {
    Weapon,
    Armor,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Inventory {
    pub weapon_slot: Option<Item>,
    pub armor_slot: Option<Item>,
    pub backpack_slots: [Option<Item>; BACKPACK_CAPACITY],
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_space(&self) -> bool {
        self.backpack_slots.iter().any(Option::is_none)
    }

    /// Moves a backpack weapon or armor into its slot, swapping out whatever was
    /// equipped. Other kinds cannot be equipped.
    pub fn equip_from_backpack(&mut self, index: usize) -> bool {
        let Some(slot) = self.backpack_slots.get_mut(index) else {
            return false;
        };
        let equip_slot = match slot.as_ref().map(|item| item.kind) {
            Some(ItemKind::Weapon) => &mut self.weapon_slot,
            Some(ItemKind::Armor) => &mut self.armor_slot,
            _ => return false,
        };
        std::mem::swap(slot, equip_slot);
        true
    }

    pub fn remove_from_backpack(&mut self, index: usize) -> Option<Item> {
        self.backpack_slots.get_mut(index)?.take()
    }

    pub fn unequip_weapon(&mut self) -> Option<Item> {
        self.weapon_slot.take()
    }

    pub fn unequip_armor(&mut self) -> Option<Item> {
        self.armor_slot.take()
    }

    pub fn equipped(&self, slot: EquipSlot) -> Option<&Item> {
        match slot {
            EquipSlot::Weapon => self.weapon_slot.as_ref(),
            EquipSlot::Armor => self.armor_slot.as_ref(),
        }
    }

    /// Puts the item in the first free backpack slot, never into equipment.
    pub fn stash(&mut self, item: Item) -> Result<(), Item> {
        match self.backpack_slots.iter_mut().find(|slot| slot.is_none()) {
            Some(slot) => {
                *slot = Some(item);
                Ok(())
            }
            None => Err(item),
        }
    }

    pub fn backpack(&self) -> impl Iterator<Item = &Item> {
        self.backpack_slots.iter().flatten()
    }

    /// Index of the first backpack item matching `predicate`.
    pub fn find_in_backpack(&self, predicate: impl Fn(&Item) -> bool) -> Option<usize> {
        self.backpack_slots
            .iter()
            .position(|slot| slot.as_ref().is_some_and(&predicate))
    }

    pub fn count_in_backpack(&self, predicate: impl Fn(&Item) -> bool) -> usize {
        self.backpack().filter(|item| predicate(item)).count()
    }
}

impl Equipment for Inventory {
    fn total_attack_bonus(&self) -> u32 {
        [&self.weapon_slot, &self.armor_slot]
            .into_iter()
            .flatten()
            .map(|item| item.attack_bonus)
            .sum()
    }

    fn total_defense_bonus(&self) -> u32 {
        [&self.weapon_slot, &self.armor_slot]
            .into_iter()
            .flatten()
            .map(|item| item.defense_bonus)
            .sum()
    }

    fn add_item(&mut self, item: Item) -> Result<(), Item> {
        match item.kind {
            ItemKind::Weapon if self.weapon_slot.is_none() => {
                self.weapon_slot = Some(item);
                return Ok(());
            }
            ItemKind::Armor if self.armor_slot.is_none() => {
                self.armor_slot = Some(item);
                return Ok(());
            }
            _ => {}
        }
        self.stash(item)
    }
}
