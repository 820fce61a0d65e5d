//! Turn rules for a grid-based warrior-versus-monsters game.
//!
//! `game-core` owns the deterministic parts of play: tile maps and terrain,
//! entities with cooldown-gated attacks, the shared monster decision
//! procedure, loot tables, level population, the town shop, and the
//! [`turn::TurnProcessor`] that sequences one full turn. It performs no I/O;
//! collaborators such as dungeon transitions plug in through
//! [`turn::TurnHooks`].
pub mod combat;
pub mod config;
pub mod entity;
pub mod error;
pub mod experience;
pub mod grid;
pub mod inventory;
pub mod items;
pub mod ledger;
pub mod level;
pub mod loot;
pub mod map;
pub mod monster;
pub mod rng;
pub mod shop;
pub mod terrain;
pub mod turn;
pub mod warrior;

pub use combat::{
    AttackEffect, AttackOutcome, DEFAULT_MELEE_RANGE, EffectSource, effective_attack_range,
    is_in_attack_range,
};
pub use config::GameConfig;
pub use entity::{Combatant, Entity, EntityStats};
pub use error::{ErrorSeverity, GameError, TransitionError};
pub use experience::{Experience, MAX_LEVEL, XP_REQUIREMENTS};
pub use grid::{Direction, Grid, MapDimensions, Position, adjacent_positions, manhattan_distance};
pub use inventory::{BACKPACK_CAPACITY, EquipSlot, Equipment, Inventory};
pub use items::{Chest, GroundItem, Item, ItemKind, chest_item_pool};
pub use ledger::{KilledMonster, OpenedChest, ResolutionLedger};
pub use level::Level;
pub use loot::{LootDrop, LootEntry, LootRegistry, LootTable};
pub use map::{DungeonEntrance, MapError, MapOracle, MapSpawns, MonsterSpawn, TileMap};
pub use monster::{
    Bestiary, Monster, MonsterBehavior, MonsterDecision, MonsterKind, MonsterStats, SpawnOrigin,
    behavior_for,
};
pub use rng::{FixedRolls, PcgRng, RngOracle, RngStream, RollContext, RollSource, compute_seed};
pub use shop::{SHOP_REACH, Shop, ShopItem, Trade};
pub use terrain::{TerrainError, TerrainLegend, TerrainType};
pub use turn::{
    MapTransition, MonsterDeath, MonsterTurn, NoHooks, Pickup, TurnHooks, TurnPhase,
    TurnProcessor, TurnReport, World,
};
pub use warrior::{PlayerAction, Warrior, WarriorOutcome};
