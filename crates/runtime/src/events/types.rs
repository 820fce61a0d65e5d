//! Event payloads.

use game_core::{AttackEffect, Item, MapTransition, MonsterDeath, Pickup, Position};
use serde::{Deserialize, Serialize};

use super::bus::Topic;

/// Something observable that happened during a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A full turn was processed.
    TurnResolved {
        turn: u64,
        position: Position,
        health: u32,
        max_health: u32,
    },

    /// A blow that dealt damage, with its on-screen anchor.
    AttackLanded { effect: AttackEffect },

    ChestOpened { item: Item, position: Position },

    /// Stepping onto a ground item, including a failed pickup into a full
    /// backpack.
    ItemPickedUp { pickup: Pickup, message: String },

    MonsterSlain { death: MonsterDeath },

    LevelUp { level: u32, max_health: u32 },

    MapChanged {
        transition: MapTransition,
        message: String,
    },

    PotionUsed { health: u32 },

    ItemBought { item: Item, price: u32 },

    ItemSold { item: Item, price: u32 },

    WarriorDied { turn: u64 },

    GameSaved { slot: String },

    GameLoaded { slot: String },

    GameRestarted,
}

impl GameEvent {
    pub fn topic(&self) -> Topic {
        match self {
            GameEvent::TurnResolved { .. } | GameEvent::WarriorDied { .. } => Topic::Turn,
            GameEvent::AttackLanded { .. }
            | GameEvent::MonsterSlain { .. }
            | GameEvent::LevelUp { .. } => Topic::Combat,
            GameEvent::ChestOpened { .. }
            | GameEvent::ItemPickedUp { .. }
            | GameEvent::MapChanged { .. }
            | GameEvent::PotionUsed { .. }
            | GameEvent::ItemBought { .. }
            | GameEvent::ItemSold { .. } => Topic::World,
            GameEvent::GameSaved { .. }
            | GameEvent::GameLoaded { .. }
            | GameEvent::GameRestarted => Topic::Persistence,
        }
    }
}
