//! Monster decision procedure.
//!
//! Evaluated once per monster per turn:
//! 1. target beyond `chase_range`: idle
//! 2. target within `attack_range`: attack (cooldown permitting)
//! 3. otherwise: one greedy step toward the target, larger axis gap first,
//!    the other axis if that step is blocked
//!
//! There is no pathfinding. A monster boxed in on both candidate axes stays put.

use crate::combat::mitigated_damage;
use crate::entity::{Combatant, Entity};
use crate::grid::Position;
use crate::map::MapOracle;

use super::{Monster, MonsterKind};

/// What a monster did on its turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MonsterDecision {
    /// Target out of awareness range, or one side already dead.
    Idle,
    /// In range; `landed` is false while the attack is on cooldown.
    Attacked { landed: bool, damage: u32 },
    Moved { from: Position, to: Position },
    /// Wanted to close in but both candidate steps were blocked.
    Stuck,
}

/// Per-species turn strategy.
pub type MonsterBehavior =
    fn(&mut Monster, &mut dyn Combatant, &dyn MapOracle) -> MonsterDecision;

pub fn behavior_for(kind: MonsterKind) -> MonsterBehavior {
    match kind {
        MonsterKind::Banshee
        | MonsterKind::Leprechaun
        | MonsterKind::Pooka
        | MonsterKind::Selkie
        | MonsterKind::Dullahan
        | MonsterKind::Changeling
        | MonsterKind::Clurichaun
        | MonsterKind::Merrow
        | MonsterKind::FearGorta
        | MonsterKind::CatSi => chase_or_attack,
    }
}

/// Shared chase-or-attack procedure.
pub fn chase_or_attack(
    monster: &mut Monster,
    target: &mut dyn Combatant,
    map: &dyn MapOracle,
) -> MonsterDecision {
    if !monster.is_alive() || !target.is_alive() {
        return MonsterDecision::Idle;
    }

    let distance = monster.entity().grid_distance_to(target.entity());
    if distance > monster.chase_range() {
        return MonsterDecision::Idle;
    }

    if distance <= monster.attack_range() {
        let damage = mitigated_damage(monster.entity().attack_damage(), target.defense());
        let landed = monster.entity_mut().attack_for(target.entity_mut(), damage);
        return MonsterDecision::Attacked {
            landed,
            damage: if landed { damage } else { 0 },
        };
    }

    step_toward(monster, target.position(), map)
}

fn step_toward(monster: &mut Monster, goal: Position, map: &dyn MapOracle) -> MonsterDecision {
    let from = monster.position();
    let gap_x = goal.x - from.x;
    let gap_y = goal.y - from.y;
    let horizontal = (gap_x.signum(), 0);
    let vertical = (0, gap_y.signum());

    let attempts = if gap_x.abs() > gap_y.abs() {
        [horizontal, vertical]
    } else {
        [vertical, horizontal]
    };

    for (dx, dy) in attempts {
        if (dx, dy) == (0, 0) {
            continue;
        }
        if try_step(monster.entity_mut(), dx, dy, map) {
            return MonsterDecision::Moved {
                from,
                to: monster.position(),
            };
        }
    }
    MonsterDecision::Stuck
}

/// Terrain gate in front of the bounds-only entity move.
fn try_step(entity: &mut Entity, dx: i32, dy: i32, map: &dyn MapOracle) -> bool {
    if !map.is_passable(entity.position().offset(dx, dy)) {
        return false;
    }
    entity.move_by(dx, dy, map.dimensions())
}
