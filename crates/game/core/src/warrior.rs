//! The player character and resolution of its queued action.

use crate::combat::{AttackOutcome, is_in_attack_range};
use crate::config::GameConfig;
use crate::entity::{Combatant, Entity, EntityStats};
use crate::experience::Experience;
use crate::grid::{Direction, Position};
use crate::inventory::{EquipSlot, Equipment, Inventory};
use crate::items::{Item, ItemKind};
use crate::map::MapOracle;
use crate::monster::Monster;

/// Intent recorded by the input layer and consumed by the next turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PlayerAction {
    Move { dx: i32, dy: i32 },
    Attack,
}

impl PlayerAction {
    pub fn step(direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        PlayerAction::Move { dx, dy }
    }
}

/// What the warrior's turn amounted to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WarriorOutcome {
    /// Nothing was queued.
    NoAction,
    Move { success: bool, position: Position },
    Attack(AttackOutcome),
}

impl WarriorOutcome {
    pub fn success(&self) -> bool {
        match self {
            WarriorOutcome::NoAction => false,
            WarriorOutcome::Move { success, .. } => *success,
            WarriorOutcome::Attack(outcome) => outcome.success,
        }
    }

    /// The attack result, when the turn was an attack.
    pub fn attack(&self) -> Option<AttackOutcome> {
        match self {
            WarriorOutcome::Attack(outcome) => Some(*outcome),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Warrior {
    entity: Entity,
    inventory: Inventory,
    pending: Option<PlayerAction>,
    gold: u32,
    experience: Experience,
    hp_per_level: u32,
    potion_heal: u32,
}

impl Warrior {
    pub fn new(position: Position, config: &GameConfig) -> Self {
        Self {
            entity: Entity::new(
                position,
                EntityStats {
                    max_health: config.warrior_max_health,
                    attack_damage: config.warrior_attack_damage,
                    speed: 1,
                    attack_cooldown: config.warrior_attack_cooldown,
                    attack_range: None,
                },
            ),
            inventory: Inventory::new(),
            pending: None,
            gold: 0,
            experience: Experience::new(),
            hp_per_level: config.hp_per_level,
            potion_heal: config.potion_heal,
        }
    }

    /// Short sword, woolen tunic, one health potion and one town portal.
    pub fn equip_starting_kit(&mut self) {
        let kit = [
            Item::weapon("Short Sword", "A basic short sword", 3),
            Item::armor("Woolen Tunic", "A simple woolen tunic", 1),
            Item::health_potion(),
            Item::town_portal(),
        ];
        for item in kit {
            // A fresh inventory always has room for the kit.
            let _ = self.inventory.add_item(item);
        }
    }

    // ===== queued intent =====

    pub fn queue_action(&mut self, action: PlayerAction) {
        self.pending = Some(action);
    }

    pub fn queue_movement(&mut self, dx: i32, dy: i32) {
        self.queue_action(PlayerAction::Move { dx, dy });
    }

    pub fn queue_attack(&mut self) {
        self.queue_action(PlayerAction::Attack);
    }

    pub fn pending_action(&self) -> Option<PlayerAction> {
        self.pending
    }

    /// Consumes the pending action. The action is cleared whether or not it
    /// succeeds. `crit` is forwarded into the outcome of a landed attack.
    pub fn execute_turn(
        &mut self,
        target: Option<&mut Monster>,
        map: &dyn MapOracle,
        crit: bool,
    ) -> WarriorOutcome {
        match self.pending.take() {
            None => WarriorOutcome::NoAction,
            Some(PlayerAction::Move { dx, dy }) => {
                let success = self.try_move_by(dx, dy, map);
                WarriorOutcome::Move {
                    success,
                    position: self.entity.position(),
                }
            }
            Some(PlayerAction::Attack) => {
                WarriorOutcome::Attack(self.attack_target(target, crit))
            }
        }
    }

    fn attack_target(&mut self, target: Option<&mut Monster>, crit: bool) -> AttackOutcome {
        let Some(target) = target else {
            return AttackOutcome::FAILED;
        };
        if !is_in_attack_range(&self.entity, target.entity()) {
            return AttackOutcome::FAILED;
        }
        let damage = self.effective_attack_damage();
        if self.entity.attack_for(target.entity_mut(), damage) {
            AttackOutcome::landed(damage, crit)
        } else {
            AttackOutcome::FAILED
        }
    }

    /// Passability first, then the bounds-checked entity move.
    pub fn try_move_by(&mut self, dx: i32, dy: i32, map: &dyn MapOracle) -> bool {
        let destination = self.entity.position().offset(dx, dy);
        if !map.is_passable(destination) {
            return false;
        }
        self.entity.move_by(dx, dy, map.dimensions())
    }

    pub fn try_move(&mut self, direction: Direction, map: &dyn MapOracle) -> bool {
        let (dx, dy) = direction.delta();
        self.try_move_by(dx, dy, map)
    }

    /// Base damage plus equipment bonus.
    pub fn effective_attack_damage(&self) -> u32 {
        self.entity.attack_damage() + self.inventory.total_attack_bonus()
    }

    /// Equipment defense subtracted from every monster hit.
    pub fn effective_defense(&self) -> u32 {
        self.inventory.total_defense_bonus()
    }

    // ===== inventory and currency =====

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    pub fn inventory_mut(&mut self) -> &mut Inventory {
        &mut self.inventory
    }

    pub fn gold(&self) -> u32 {
        self.gold
    }

    pub fn add_gold(&mut self, amount: u32) {
        self.gold = self.gold.saturating_add(amount);
    }

    pub fn remove_gold(&mut self, amount: u32) -> bool {
        if self.gold < amount {
            return false;
        }
        self.gold -= amount;
        true
    }

    fn is_healing_item(item: &Item) -> bool {
        item.kind == ItemKind::Consumable && item.name != Item::TOWN_PORTAL
    }

    pub fn health_potion_count(&self) -> usize {
        self.inventory.count_in_backpack(Self::is_healing_item)
    }

    pub fn town_portal_count(&self) -> usize {
        self.inventory
            .count_in_backpack(|item| item.name == Item::TOWN_PORTAL)
    }

    /// Consumes the first town portal scroll in the backpack.
    pub fn use_town_portal(&mut self) -> bool {
        let Some(index) = self
            .inventory
            .find_in_backpack(|item| item.name == Item::TOWN_PORTAL)
        else {
            return false;
        };
        self.inventory.remove_from_backpack(index).is_some()
    }

    /// Equips the backpack item at `index`, swapping out what was worn.
    pub fn equip(&mut self, index: usize) -> bool {
        self.inventory.equip_from_backpack(index)
    }

    /// Moves the item worn in `slot` back into the backpack. Fails when the
    /// slot is empty or the backpack is full.
    pub fn unequip(&mut self, slot: EquipSlot) -> bool {
        if !self.inventory.has_space() {
            return false;
        }
        let item = match slot {
            EquipSlot::Weapon => self.inventory.unequip_weapon(),
            EquipSlot::Armor => self.inventory.unequip_armor(),
        };
        match item {
            Some(item) => self.inventory.stash(item).is_ok(),
            None => false,
        }
    }

    /// Drinks the first healing consumable in the backpack. Fails when dead,
    /// already at full health, or out of potions.
    pub fn use_health_potion(&mut self) -> bool {
        if !self.entity.is_alive() || self.entity.health() >= self.entity.max_health() {
            return false;
        }
        let Some(index) = self.inventory.find_in_backpack(Self::is_healing_item) else {
            return false;
        };
        let Some(potion) = self.inventory.remove_from_backpack(index) else {
            return false;
        };
        let amount = if potion.health_restore > 0 {
            potion.health_restore
        } else {
            self.potion_heal
        };
        self.entity.heal(amount);
        true
    }

    // ===== progression =====

    pub fn experience(&self) -> &Experience {
        &self.experience
    }

    /// Awards XP. Each level gained raises max health and the warrior is
    /// restored to full.
    pub fn gain_experience(&mut self, xp: u32) -> bool {
        let old_level = self.experience.level;
        if !self.experience.add_xp(xp) {
            return false;
        }
        let levels = self.experience.level - old_level;
        let max_health = self.entity.max_health() + self.hp_per_level * levels;
        self.entity.set_max_health(max_health);
        self.entity.set_health(max_health);
        true
    }

    // ===== persistence =====

    /// Reapplies persisted state onto a freshly built warrior.
    pub fn restore(
        &mut self,
        position: Position,
        health: u32,
        max_health: u32,
        gold: u32,
        inventory: Inventory,
    ) {
        self.entity.set_position(position);
        self.entity.set_max_health(max_health);
        self.entity.set_health(health);
        self.gold = gold;
        self.inventory = inventory;
        self.pending = None;
    }

    pub fn restore_experience(&mut self, experience: Experience) {
        self.experience = experience;
    }
}

impl Combatant for Warrior {
    fn entity(&self) -> &Entity {
        &self.entity
    }

    fn entity_mut(&mut self) -> &mut Entity {
        &mut self.entity
    }

    fn defense(&self) -> u32 {
        self.effective_defense()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::MapDimensions;
    use crate::map::TileMap;
    use crate::monster::{MonsterKind, MonsterStats};
    use crate::terrain::TerrainLegend;

    fn map() -> TileMap {
        let mut rows: Vec<String> = vec![".".repeat(16); 12];
        rows[5].replace_range(6..7, "#");
        TileMap::new(
            "world",
            MapDimensions::new(16, 12),
            &rows,
            TerrainLegend::standard(),
            Position::ORIGIN,
        )
        .unwrap()
    }

    fn warrior_at(x: i32, y: i32) -> Warrior {
        Warrior::new(Position::new(x, y), &GameConfig::default())
    }

    fn weak_monster(x: i32, y: i32) -> Monster {
        let mut stats = MonsterStats::standard(MonsterKind::Pooka);
        stats.health = 10;
        Monster::new(MonsterKind::Pooka, Position::new(x, y), &stats, 1)
    }

    #[test]
    fn melee_kill() {
        let mut warrior = warrior_at(5, 5);
        let mut monster = weak_monster(6, 5);
        warrior.queue_attack();

        let outcome = warrior.execute_turn(Some(&mut monster), &map(), false);
        assert_eq!(outcome, WarriorOutcome::Attack(AttackOutcome::landed(15, false)));
        assert_eq!(monster.entity().health(), 0);
        assert!(!monster.is_alive());
        assert_eq!(warrior.pending_action(), None);
    }

    #[test]
    fn out_of_range_attack_fails_and_clears_intent() {
        let mut warrior = warrior_at(5, 5);
        let mut monster = weak_monster(8, 8);
        warrior.queue_attack();

        let outcome = warrior.execute_turn(Some(&mut monster), &map(), true);
        assert_eq!(outcome, WarriorOutcome::Attack(AttackOutcome::FAILED));
        assert_eq!(monster.entity().health(), 10);
        assert_eq!(warrior.pending_action(), None);
    }

    #[test]
    fn attack_without_target_fails() {
        let mut warrior = warrior_at(5, 5);
        warrior.queue_attack();
        assert!(!warrior.execute_turn(None, &map(), false).success());
    }

    #[test]
    fn equipment_adds_to_damage_and_crit_is_forwarded() {
        let mut warrior = warrior_at(5, 5);
        warrior.equip_starting_kit();
        assert_eq!(warrior.effective_attack_damage(), 18);

        let mut monster = Monster::new(
            MonsterKind::Dullahan,
            Position::new(5, 6),
            &MonsterStats::standard(MonsterKind::Dullahan),
            1,
        );
        warrior.queue_attack();
        let outcome = warrior.execute_turn(Some(&mut monster), &map(), true);
        assert_eq!(outcome.attack(), Some(AttackOutcome::landed(18, true)));
        assert_eq!(monster.entity().health(), 102);
    }

    #[test]
    fn move_into_wall_is_consumed_silently() {
        let mut warrior = warrior_at(5, 5);
        warrior.queue_movement(1, 0);
        let outcome = warrior.execute_turn(None, &map(), false);
        assert_eq!(
            outcome,
            WarriorOutcome::Move {
                success: false,
                position: Position::new(5, 5),
            }
        );
        assert_eq!(warrior.pending_action(), None);

        warrior.queue_action(PlayerAction::step(Direction::Up));
        assert!(warrior.execute_turn(None, &map(), false).success());
        assert_eq!(warrior.position(), Position::new(5, 4));
    }

    #[test]
    fn move_off_the_map_fails() {
        let mut warrior = warrior_at(0, 0);
        assert!(!warrior.try_move(Direction::Left, &map()));
        assert_eq!(warrior.position(), Position::ORIGIN);
    }

    #[test]
    fn no_pending_action_is_noop() {
        let mut warrior = warrior_at(5, 5);
        assert_eq!(warrior.execute_turn(None, &map(), false), WarriorOutcome::NoAction);
    }

    #[test]
    fn potions_heal_and_are_consumed() {
        let mut warrior = warrior_at(5, 5);
        warrior.equip_starting_kit();
        assert_eq!(warrior.health_potion_count(), 1);
        assert_eq!(warrior.town_portal_count(), 1);
        assert!(!warrior.use_health_potion());

        warrior.entity_mut().take_damage(50);
        assert!(warrior.use_health_potion());
        assert_eq!(warrior.entity().health(), 80);
        assert_eq!(warrior.health_potion_count(), 0);
        assert_eq!(warrior.town_portal_count(), 1);
        assert!(!warrior.use_health_potion());
    }

    #[test]
    fn town_portal_is_consumed_once() {
        let mut warrior = warrior_at(5, 5);
        assert!(!warrior.use_town_portal());

        warrior.equip_starting_kit();
        assert!(warrior.use_town_portal());
        assert_eq!(warrior.town_portal_count(), 0);
        assert_eq!(warrior.health_potion_count(), 1);
        assert!(!warrior.use_town_portal());
    }

    #[test]
    fn unequipping_moves_gear_to_the_backpack() {
        let mut warrior = warrior_at(5, 5);
        warrior.equip_starting_kit();
        assert_eq!(warrior.effective_defense(), 1);

        assert!(warrior.unequip(EquipSlot::Armor));
        assert_eq!(warrior.effective_defense(), 0);
        assert!(!warrior.unequip(EquipSlot::Armor));

        let index = warrior
            .inventory()
            .find_in_backpack(|item| item.name == "Woolen Tunic")
            .unwrap();
        assert!(warrior.equip(index));
        assert_eq!(warrior.effective_defense(), 1);
    }

    #[test]
    fn unequip_needs_backpack_room() {
        let mut warrior = warrior_at(5, 5);
        warrior.equip_starting_kit();
        while warrior.inventory().has_space() {
            warrior
                .inventory_mut()
                .stash(Item::misc("Pebble", "A pebble"))
                .unwrap();
        }
        assert!(!warrior.unequip(EquipSlot::Weapon));
        assert_eq!(warrior.effective_attack_damage(), 18);
    }

    #[test]
    fn gold_counter() {
        let mut warrior = warrior_at(0, 0);
        warrior.add_gold(12);
        assert!(!warrior.remove_gold(13));
        assert!(warrior.remove_gold(12));
        assert_eq!(warrior.gold(), 0);
    }

    #[test]
    fn level_up_raises_and_refills_health() {
        let mut warrior = warrior_at(0, 0);
        warrior.entity_mut().take_damage(40);
        assert!(warrior.gain_experience(250));
        assert_eq!(warrior.experience().level, 3);
        assert_eq!(warrior.entity().max_health(), 140);
        assert_eq!(warrior.entity().health(), 140);
        assert!(!warrior.gain_experience(10));
    }
}
