//! Monsters: one type parameterised by species, plus the AI that drives it.
//!
//! The ten species differ only in their [`MonsterStats`]. Behaviour is chosen
//! per species through [`behavior_for`], which today maps every species to the
//! shared chase-or-attack procedure.

pub mod ai;
pub mod stats;

pub use ai::{MonsterBehavior, MonsterDecision, behavior_for, chase_or_attack};
pub use stats::{Bestiary, MonsterStats};

use crate::entity::{Combatant, Entity, EntityStats};
use crate::grid::Position;

/// Species tag. The snake_case string form is the id used in map files,
/// loot tables and the killed-monster ledger.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::IntoStaticStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum MonsterKind {
    Banshee,
    Leprechaun,
    Pooka,
    Selkie,
    Dullahan,
    Changeling,
    Clurichaun,
    Merrow,
    FearGorta,
    CatSi,
}

impl MonsterKind {
    /// Every species, in the order random picks index into.
    pub const ALL: [MonsterKind; 10] = [
        MonsterKind::Banshee,
        MonsterKind::Leprechaun,
        MonsterKind::Pooka,
        MonsterKind::Selkie,
        MonsterKind::Dullahan,
        MonsterKind::Changeling,
        MonsterKind::Clurichaun,
        MonsterKind::Merrow,
        MonsterKind::FearGorta,
        MonsterKind::CatSi,
    ];

    pub fn as_str(self) -> &'static str {
        self.into()
    }

    /// Display name with underscores replaced, e.g. "fear gorta".
    pub fn display_name(self) -> String {
        self.as_str().replace('_', " ")
    }
}

/// Where a monster came from. Recorded in the killed ledger on death so the
/// same spawn is suppressed when the map is repopulated.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SpawnOrigin {
    /// Species string as authored in the map (may be unrecognised).
    pub tag: String,
    pub position: Position,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Monster {
    kind: MonsterKind,
    entity: Entity,
    chase_range: u32,
    xp_value: u32,
    origin: SpawnOrigin,
}

impl Monster {
    pub fn new(kind: MonsterKind, position: Position, stats: &MonsterStats, attack_cooldown: u32) -> Self {
        let entity = Entity::new(
            position,
            EntityStats {
                max_health: stats.health,
                attack_damage: stats.attack_damage,
                speed: stats.speed,
                attack_cooldown,
                attack_range: Some(stats.attack_range),
            },
        );
        Self {
            kind,
            entity,
            chase_range: stats.chase_range,
            xp_value: stats.xp_value,
            origin: SpawnOrigin {
                tag: kind.to_string(),
                position,
            },
        }
    }

    /// Overrides the authored species string recorded for this spawn.
    pub fn with_spawn_tag(mut self, tag: impl Into<String>) -> Self {
        self.origin.tag = tag.into();
        self
    }

    pub fn kind(&self) -> MonsterKind {
        self.kind
    }

    pub fn chase_range(&self) -> u32 {
        self.chase_range
    }

    pub fn attack_range(&self) -> u32 {
        self.entity
            .attack_range()
            .unwrap_or(crate::combat::DEFAULT_MELEE_RANGE)
    }

    pub fn xp_value(&self) -> u32 {
        self.xp_value
    }

    pub fn origin(&self) -> &SpawnOrigin {
        &self.origin
    }
}

impl Combatant for Monster {
    fn entity(&self) -> &Entity {
        &self.entity
    }

    fn entity_mut(&mut self) -> &mut Entity {
        &mut self.entity
    }
}
