//! Turn processor.
//!
//! One call to [`TurnProcessor::process_turn`] advances the game by a full
//! turn in a fixed order:
//!
//! 1. warrior cooldown tick
//! 2. nearest living monster chosen as the warrior's target
//! 3. warrior resolves its queued action
//! 4. world-transition check (dungeon entrance or exit)
//! 5. chest under the warrior is opened onto the ground
//! 6. one ground item under the warrior is picked up
//! 7. dead monsters are swept: ledger entry, XP, loot drop
//! 8. every living monster ticks and takes its turn
//! 9. the processor waits for input again
//!
//! Later steps read state committed by earlier ones, so the order is fixed.

use std::fmt;
use std::sync::Arc;

use crate::combat::{AttackEffect, EffectSource};
use crate::config::GameConfig;
use crate::entity::Combatant;
use crate::error::TransitionError;
use crate::grid::{Grid, Position};
use crate::inventory::Equipment;
use crate::items::{GroundItem, Item};
use crate::ledger::{KilledMonster, OpenedChest, ResolutionLedger};
use crate::level::Level;
use crate::loot::LootRegistry;
use crate::map::{MapOracle, TileMap};
use crate::monster::{Bestiary, MonsterDecision, MonsterKind, behavior_for};
use crate::rng::{RngStream, RollContext};
use crate::warrior::{PlayerAction, Warrior, WarriorOutcome};

// ===== world state =====

/// Everything a turn reads and mutates.
#[derive(Clone, Debug)]
pub struct World {
    pub warrior: Warrior,
    pub level: Level,
    pub ledger: ResolutionLedger,
    pub loot: LootRegistry,
    pub bestiary: Bestiary,
    pub config: GameConfig,
    /// Game seed every roll stream derives from.
    pub seed: u64,
    /// Turns processed so far; the per-turn nonce of each roll stream.
    pub nonce: u64,
}

impl World {
    pub fn new(warrior: Warrior, level: Level, config: GameConfig) -> Self {
        Self {
            warrior,
            level,
            ledger: ResolutionLedger::new(),
            loot: LootRegistry::standard(),
            bestiary: Bestiary::standard(),
            config,
            seed: 0,
            nonce: 0,
        }
    }

    /// Fresh game: warrior with the starting kit at the map's spawn point and
    /// the level populated from an empty ledger.
    pub fn start(
        map_id: impl Into<String>,
        map: Arc<TileMap>,
        config: GameConfig,
        bestiary: Bestiary,
        loot: LootRegistry,
        seed: u64,
    ) -> Self {
        let mut warrior = Warrior::new(map.spawn_point(), &config);
        warrior.equip_starting_kit();
        let mut world = Self::new(warrior, Level::empty(map_id, map), config)
            .with_bestiary(bestiary)
            .with_loot(loot)
            .with_seed(seed);
        world.repopulate();
        world
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_loot(mut self, loot: LootRegistry) -> Self {
        self.loot = loot;
        self
    }

    pub fn with_bestiary(mut self, bestiary: Bestiary) -> Self {
        self.bestiary = bestiary;
        self
    }

    pub fn with_ledger(mut self, ledger: ResolutionLedger) -> Self {
        self.ledger = ledger;
        self
    }

    pub fn grid(&self) -> Grid {
        Grid::new(self.config.tile_size, self.level.map.dimensions())
    }

    /// Roll stream for this turn and consumer.
    pub fn rolls(&self, context: RollContext) -> RngStream {
        RngStream::new(self.seed, self.nonce, context)
    }

    /// Moves the warrior onto another map and rebuilds the level from the
    /// ledger. Ground items from the previous map are discarded.
    pub fn change_map(&mut self, map_id: impl Into<String>, map: Arc<TileMap>, position: Position) {
        self.level = Level::empty(map_id, map);
        self.warrior.entity_mut().set_position(position);
        self.repopulate();
    }

    /// Rebuilds monsters and chests of the current map from the ledger.
    pub fn repopulate(&mut self) {
        let mut rolls = self.rolls(RollContext::Population);
        self.level = Level::populate(
            self.level.map_id.clone(),
            Arc::clone(&self.level.map),
            &self.bestiary,
            &self.ledger,
            &self.config,
            &mut rolls,
        );
    }

    fn open_chest_at(&mut self, position: Position) -> Option<Item> {
        let index = self.level.chest_at(position)?;
        let item = self.level.chests[index].open()?;
        self.ledger
            .record_opened(OpenedChest::new(position, &self.level.map_id));
        self.level.drop_item(item.clone(), position);
        Some(item)
    }

    /// Picks up the first ground item on `position`, if any.
    fn pick_up_at(&mut self, position: Position) -> Option<Pickup> {
        let index = self
            .level
            .ground_items
            .iter()
            .position(|ground| ground.position == position)?;

        let GroundItem { item, .. } = self.level.ground_items.remove(index);
        if item.is_gold() {
            self.warrior.add_gold(item.gold_value);
            return Some(Pickup::Gold {
                amount: item.gold_value,
            });
        }

        let name = item.name.clone();
        match self.warrior.inventory_mut().add_item(item) {
            Ok(()) => Some(Pickup::Item { name }),
            Err(item) => {
                self.level
                    .ground_items
                    .insert(index, GroundItem::new(item, position));
                Some(Pickup::InventoryFull { name })
            }
        }
    }

    /// Removes dead monsters, keeping survivors in order.
    fn sweep_dead(&mut self) -> (Vec<MonsterDeath>, bool) {
        let (dead, alive): (Vec<_>, Vec<_>) = std::mem::take(&mut self.level.monsters)
            .into_iter()
            .partition(|monster| !monster.is_alive());
        self.level.monsters = alive;

        let mut rolls = self.rolls(RollContext::Loot);
        let mut leveled_up = false;
        let mut deaths = Vec::with_capacity(dead.len());

        for monster in dead {
            let origin = monster.origin();
            self.ledger.record_kill(KilledMonster::new(
                origin.tag.clone(),
                origin.position,
                &self.level.map_id,
            ));

            let position = monster.position();
            let loot = self.loot.roll_for(monster.kind(), &mut rolls);
            if let Some(item) = &loot {
                self.level.drop_item(item.clone(), position);
            }
            leveled_up |= self.warrior.gain_experience(monster.xp_value());

            deaths.push(MonsterDeath {
                kind: monster.kind(),
                position,
                xp: monster.xp_value(),
                loot,
            });
        }
        (deaths, leveled_up)
    }
}

// ===== outcomes =====

/// A completed map change.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MapTransition {
    pub from_map: String,
    pub to_map: String,
    pub position: Position,
}

/// Result of stepping onto a tile holding a ground item.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Pickup {
    Gold { amount: u32 },
    Item { name: String },
    /// The item stays on the ground.
    InventoryFull { name: String },
}

impl Pickup {
    pub fn picked_up(&self) -> bool {
        !matches!(self, Pickup::InventoryFull { .. })
    }
}

impl fmt::Display for Pickup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pickup::Gold { amount } => write!(f, "Picked up {amount} gold!"),
            Pickup::Item { name } => write!(f, "Picked up {name}!"),
            Pickup::InventoryFull { .. } => f.write_str("Inventory is full!"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MonsterDeath {
    pub kind: MonsterKind,
    pub position: Position,
    pub xp: u32,
    pub loot: Option<Item>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MonsterTurn {
    pub kind: MonsterKind,
    pub decision: MonsterDecision,
}

/// Structured account of one processed turn.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnReport {
    pub turn: u64,
    pub warrior: WarriorOutcome,
    pub transition: Option<MapTransition>,
    pub chest_opened: Option<Item>,
    pub pickup: Option<Pickup>,
    pub deaths: Vec<MonsterDeath>,
    pub monster_turns: Vec<MonsterTurn>,
    pub leveled_up: bool,
    pub warrior_died: bool,
}

impl TurnReport {
    fn new(turn: u64, warrior: WarriorOutcome) -> Self {
        Self {
            turn,
            warrior,
            transition: None,
            chest_opened: None,
            pickup: None,
            deaths: Vec::new(),
            monster_turns: Vec::new(),
            leveled_up: false,
            warrior_died: false,
        }
    }

    /// Total damage monsters landed on the warrior this turn.
    pub fn damage_taken(&self) -> u32 {
        self.monster_turns
            .iter()
            .map(|turn| match turn.decision {
                MonsterDecision::Attacked { landed: true, damage } => damage,
                _ => 0,
            })
            .sum()
    }
}

// ===== collaborator hooks =====

/// Collaborators consulted during a turn. Every method has a no-op default.
pub trait TurnHooks {
    /// Whether a warrior attack about to resolve counts as critical.
    fn critical_hit(&mut self, _warrior: &Warrior) -> bool {
        false
    }

    /// Step 4. May swap the level; must leave the warrior on the new map.
    fn world_transition(
        &mut self,
        _world: &mut World,
    ) -> Result<Option<MapTransition>, TransitionError> {
        Ok(None)
    }

    fn on_attack_effect(&mut self, _effect: AttackEffect) {}

    fn on_chest_opened(&mut self, _item: &Item, _position: Position) {}

    fn on_pickup(&mut self, _pickup: &Pickup) {}

    fn on_monster_death(&mut self, _death: &MonsterDeath) {}
}

/// Hooks that do nothing.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoHooks;

impl TurnHooks for NoHooks {}

// ===== processor =====

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TurnPhase {
    #[default]
    WaitingForInput,
    ResolvingTurn,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TurnProcessor {
    phase: TurnPhase,
}

impl TurnProcessor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    pub fn waiting_for_player_input(&self) -> bool {
        self.phase == TurnPhase::WaitingForInput
    }

    /// Records the action on the warrior and starts resolving. Returns false
    /// without touching anything while a turn is already resolving.
    pub fn queue_player_action(&mut self, warrior: &mut Warrior, action: PlayerAction) -> bool {
        if self.phase == TurnPhase::ResolvingTurn {
            return false;
        }
        warrior.queue_action(action);
        self.phase = TurnPhase::ResolvingTurn;
        true
    }

    /// Runs one full turn. The processor is waiting for input afterwards,
    /// including when the transition hook fails.
    ///
    /// A failed `world_transition` returns early and leaves a partial turn:
    /// the warrior has already acted and the nonce is bumped, but chest
    /// opening, pickup, the dead-monster sweep and monster actions are skipped.
    pub fn process_turn(
        &mut self,
        world: &mut World,
        hooks: &mut dyn TurnHooks,
    ) -> Result<TurnReport, TransitionError> {
        let result = Self::resolve(world, hooks);
        self.phase = TurnPhase::WaitingForInput;
        result
    }

    /// Back to waiting for input unconditionally.
    pub fn reset(&mut self) {
        self.phase = TurnPhase::WaitingForInput;
    }

    fn resolve(world: &mut World, hooks: &mut dyn TurnHooks) -> Result<TurnReport, TransitionError> {
        world.nonce = world.nonce.wrapping_add(1);

        world.warrior.entity_mut().on_turn_start();

        let target = world.level.nearest_alive_monster(world.warrior.position());

        let crit = matches!(world.warrior.pending_action(), Some(PlayerAction::Attack))
            && hooks.critical_hit(&world.warrior);
        let map = Arc::clone(&world.level.map);
        let monsters = &mut world.level.monsters;
        let outcome = world.warrior.execute_turn(
            target.and_then(|index| monsters.get_mut(index)),
            &*map,
            crit,
        );
        if let (Some(attack), Some(index)) = (outcome.attack(), target) {
            if attack.success && attack.damage > 0 {
                let struck = world.level.monsters[index].position();
                hooks.on_attack_effect(AttackEffect {
                    source: EffectSource::Warrior,
                    target: struck,
                    screen_center: world.grid().tile_center(struck),
                    damage: attack.damage,
                    crit: attack.crit,
                });
            }
        }
        let mut report = TurnReport::new(world.nonce, outcome);

        report.transition = hooks.world_transition(world)?;

        let position = world.warrior.position();
        if let Some(item) = world.open_chest_at(position) {
            hooks.on_chest_opened(&item, position);
            report.chest_opened = Some(item);
        }

        if let Some(pickup) = world.pick_up_at(position) {
            hooks.on_pickup(&pickup);
            report.pickup = Some(pickup);
        }

        let (deaths, leveled_up) = world.sweep_dead();
        for death in &deaths {
            hooks.on_monster_death(death);
        }
        report.deaths = deaths;
        report.leveled_up = leveled_up;

        // The transition hook may have swapped the map.
        let map = Arc::clone(&world.level.map);
        let grid = world.grid();
        for monster in world.level.monsters.iter_mut() {
            if !monster.is_alive() {
                continue;
            }
            monster.entity_mut().on_turn_start();
            let behavior = behavior_for(monster.kind());
            let decision = behavior(monster, &mut world.warrior, &*map);
            if let MonsterDecision::Attacked { landed: true, damage } = decision {
                let struck = world.warrior.position();
                hooks.on_attack_effect(AttackEffect {
                    source: EffectSource::Monster(monster.kind()),
                    target: struck,
                    screen_center: grid.tile_center(struck),
                    damage,
                    crit: false,
                });
            }
            report.monster_turns.push(MonsterTurn {
                kind: monster.kind(),
                decision,
            });
        }

        report.warrior_died = !world.warrior.is_alive();
        Ok(report)
    }
}
