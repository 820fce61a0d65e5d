//! Attack range checks.

use crate::config::GameConfig;
use crate::entity::Entity;

/// Range used by any attacker that does not carry its own.
pub const DEFAULT_MELEE_RANGE: u32 = GameConfig::DEFAULT_MELEE_RANGE;

/// Range the attacker is allowed to strike at.
pub fn effective_attack_range(attacker: &Entity) -> u32 {
    attacker.attack_range().unwrap_or(DEFAULT_MELEE_RANGE)
}

/// True when the defender is within the attacker's effective range.
pub fn is_in_attack_range(attacker: &Entity, defender: &Entity) -> bool {
    attacker.grid_distance_to(defender) <= effective_attack_range(attacker)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::EntityStats;
    use crate::grid::Position;

    fn at(x: i32, y: i32, attack_range: Option<u32>) -> Entity {
        Entity::new(
            Position::new(x, y),
            EntityStats {
                max_health: 10,
                attack_damage: 1,
                speed: 1,
                attack_cooldown: 1,
                attack_range,
            },
        )
    }

    #[test]
    fn melee_fallback_is_one_tile() {
        let attacker = at(5, 5, None);
        assert!(is_in_attack_range(&attacker, &at(6, 5, None)));
        assert!(!is_in_attack_range(&attacker, &at(6, 6, None)));
    }

    #[test]
    fn explicit_range_overrides_fallback() {
        let banshee = at(5, 5, Some(2));
        assert_eq!(effective_attack_range(&banshee), 2);
        assert!(is_in_attack_range(&banshee, &at(6, 6, None)));
        assert!(!is_in_attack_range(&banshee, &at(8, 5, None)));
    }
}
