//! Shared actor state: health, position and attack cooldown.
//!
//! [`Entity`] is embedded by value in both [`Warrior`](crate::warrior::Warrior)
//! and [`Monster`](crate::monster::Monster). Each entity has exactly one owner.

use crate::grid::{MapDimensions, Position};

/// Health, position and cooldown bookkeeping common to every actor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Entity {
    position: Position,
    health: u32,
    max_health: u32,
    attack_damage: u32,
    /// Tiles per turn. Always 1 today; movement ignores it.
    speed: u32,
    attack_cooldown: u32,
    turns_since_last_attack: u32,
    alive: bool,
    /// `None` means the actor uses the global melee range.
    attack_range: Option<u32>,
}

/// Construction parameters for [`Entity`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EntityStats {
    pub max_health: u32,
    pub attack_damage: u32,
    pub speed: u32,
    pub attack_cooldown: u32,
    pub attack_range: Option<u32>,
}

impl Entity {
    /// Spawns at full health with the cooldown already elapsed, so the first
    /// attack is always legal.
    pub fn new(position: Position, stats: EntityStats) -> Self {
        Self {
            position,
            health: stats.max_health,
            max_health: stats.max_health,
            attack_damage: stats.attack_damage,
            speed: stats.speed,
            attack_cooldown: stats.attack_cooldown,
            turns_since_last_attack: stats.attack_cooldown,
            alive: stats.max_health > 0,
            attack_range: stats.attack_range,
        }
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn health(&self) -> u32 {
        self.health
    }

    pub fn max_health(&self) -> u32 {
        self.max_health
    }

    pub fn attack_damage(&self) -> u32 {
        self.attack_damage
    }

    pub fn speed(&self) -> u32 {
        self.speed
    }

    pub fn attack_cooldown(&self) -> u32 {
        self.attack_cooldown
    }

    pub fn turns_since_last_attack(&self) -> u32 {
        self.turns_since_last_attack
    }

    pub fn attack_range(&self) -> Option<u32> {
        self.attack_range
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn can_attack(&self) -> bool {
        self.turns_since_last_attack >= self.attack_cooldown
    }

    /// Attacks with this entity's own damage value. No range check.
    pub fn attack(&mut self, target: &mut Entity) -> bool {
        let damage = self.attack_damage;
        self.attack_for(target, damage)
    }

    /// Attacks with an explicit damage value (base plus equipment, for the
    /// warrior). Does nothing and returns false while on cooldown.
    pub fn attack_for(&mut self, target: &mut Entity, damage: u32) -> bool {
        if !self.can_attack() {
            return false;
        }
        target.take_damage(damage);
        self.turns_since_last_attack = 0;
        true
    }

    pub fn take_damage(&mut self, amount: u32) {
        self.health = self.health.saturating_sub(amount);
        if self.health == 0 {
            self.alive = false;
        }
    }

    /// Restores health up to the maximum. The dead stay dead.
    pub fn heal(&mut self, amount: u32) -> u32 {
        if !self.alive {
            return 0;
        }
        let before = self.health;
        self.health = self.health.saturating_add(amount).min(self.max_health);
        self.health - before
    }

    /// Bounds-checked step. Terrain is the caller's concern.
    pub fn move_by(&mut self, dx: i32, dy: i32, bounds: MapDimensions) -> bool {
        let candidate = self.position.offset(dx, dy);
        if !bounds.contains(candidate) {
            return false;
        }
        self.position = candidate;
        true
    }

    pub fn on_turn_start(&mut self) {
        self.turns_since_last_attack = self.turns_since_last_attack.saturating_add(1);
    }

    pub fn grid_distance_to(&self, other: &Entity) -> u32 {
        self.position.manhattan_distance(other.position)
    }

    pub fn set_position(&mut self, position: Position) {
        self.position = position;
    }

    /// Raises or lowers max health; current health is clamped to the new cap.
    pub fn set_max_health(&mut self, max_health: u32) {
        self.max_health = max_health;
        self.health = self.health.min(max_health);
        if self.health == 0 {
            self.alive = false;
        }
    }

    /// Overwrites current health, clamped to max. Zero kills.
    pub fn set_health(&mut self, health: u32) {
        if !self.alive {
            return;
        }
        self.health = health.min(self.max_health);
        if self.health == 0 {
            self.alive = false;
        }
    }
}

/// Anything that wraps an [`Entity`]: the warrior and every monster.
pub trait Combatant {
    fn entity(&self) -> &Entity;
    fn entity_mut(&mut self) -> &mut Entity;

    fn position(&self) -> Position {
        self.entity().position()
    }

    fn is_alive(&self) -> bool {
        self.entity().is_alive()
    }

    fn grid_distance_to(&self, other: &dyn Combatant) -> u32 {
        self.entity().grid_distance_to(other.entity())
    }

    /// Flat reduction applied to hits this combatant takes.
    fn defense(&self) -> u32 {
        0
    }
}

impl Combatant for Entity {
    fn entity(&self) -> &Entity {
        self
    }

    fn entity_mut(&mut self) -> &mut Entity {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats(max_health: u32, cooldown: u32) -> EntityStats {
        EntityStats {
            max_health,
            attack_damage: 10,
            speed: 1,
            attack_cooldown: cooldown,
            attack_range: None,
        }
    }

    fn bounds() -> MapDimensions {
        MapDimensions::new(16, 12)
    }

    #[test]
    fn first_attack_is_legal() {
        let entity = Entity::new(Position::ORIGIN, stats(50, 3));
        assert!(entity.can_attack());
        assert_eq!(entity.turns_since_last_attack(), 3);
    }

    #[test]
    fn attack_resets_cooldown_and_damages() {
        let mut attacker = Entity::new(Position::ORIGIN, stats(50, 1));
        let mut target = Entity::new(Position::new(1, 0), stats(50, 1));

        assert!(attacker.attack(&mut target));
        assert_eq!(target.health(), 40);
        assert_eq!(attacker.turns_since_last_attack(), 0);
        assert!(!attacker.can_attack());

        attacker.on_turn_start();
        assert!(attacker.can_attack());
    }

    #[test]
    fn attack_on_cooldown_has_no_effect() {
        let mut attacker = Entity::new(Position::ORIGIN, stats(50, 2));
        let mut target = Entity::new(Position::new(1, 0), stats(50, 1));
        assert!(attacker.attack(&mut target));
        attacker.on_turn_start();

        assert!(!attacker.attack(&mut target));
        assert_eq!(target.health(), 40);
        assert_eq!(attacker.turns_since_last_attack(), 1);
    }

    #[test]
    fn zero_cooldown_can_always_attack() {
        let mut attacker = Entity::new(Position::ORIGIN, stats(50, 0));
        let mut target = Entity::new(Position::new(1, 0), stats(50, 1));
        assert!(attacker.attack(&mut target));
        assert!(attacker.can_attack());
    }

    #[test]
    fn damage_clamps_at_zero_and_kills_once() {
        let mut entity = Entity::new(Position::ORIGIN, stats(10, 1));
        entity.take_damage(4);
        assert!(entity.is_alive());
        entity.take_damage(100);
        assert_eq!(entity.health(), 0);
        assert!(!entity.is_alive());

        entity.take_damage(5);
        assert_eq!(entity.health(), 0);
        assert_eq!(entity.heal(20), 0);
        entity.set_health(10);
        assert!(!entity.is_alive());
        assert_eq!(entity.health(), 0);
    }

    #[test]
    fn heal_caps_at_max() {
        let mut entity = Entity::new(Position::ORIGIN, stats(100, 1));
        entity.take_damage(20);
        assert_eq!(entity.heal(30), 20);
        assert_eq!(entity.health(), 100);
    }

    #[test]
    fn move_is_bounds_checked_only() {
        let mut entity = Entity::new(Position::ORIGIN, stats(10, 1));
        assert!(!entity.move_by(-1, 0, bounds()));
        assert_eq!(entity.position(), Position::ORIGIN);
        assert!(entity.move_by(1, 0, bounds()));
        assert_eq!(entity.position(), Position::new(1, 0));
    }

    #[test]
    fn distance_is_manhattan() {
        let a = Entity::new(Position::new(5, 5), stats(10, 1));
        let b = Entity::new(Position::new(8, 8), stats(10, 1));
        assert_eq!(a.grid_distance_to(&b), 6);
        assert_eq!(Combatant::grid_distance_to(&a, &b), 6);
    }
}
