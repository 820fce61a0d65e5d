//! One playthrough: world state, dungeon bookkeeping and turn sequencing.

use std::fmt;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use game_content::GameContent;
use game_core::{
    Combatant, EquipSlot, Level, PlayerAction, Position, ResolutionLedger, Shop, ShopItem, Trade,
    TurnPhase, TurnProcessor, TurnReport, Warrior, World,
};

use crate::api::{Result, RuntimeError};
use crate::dungeon::{DungeonGate, DungeonManager, PortalOutcome};
use crate::events::{EventLog, GameEvent};
use crate::repository::{SaveGame, SaveRepository, SavedGroundItem, SavedPlayer};

/// Summary of the warrior and the active map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStatus {
    pub turn: u64,
    pub map_id: String,
    pub position: Position,
    pub health: u32,
    pub max_health: u32,
    pub gold: u32,
    pub level: u32,
    pub xp: u32,
    pub potions: usize,
    pub portals: usize,
    pub monsters_alive: usize,
    pub in_dungeon: bool,
    /// Standing within reach of the town shop.
    pub near_shop: bool,
    pub game_over: bool,
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "turn {} | {} ({}, {}) | HP {}/{} | Lv {} ({} xp) | {} gold | {} potions | {} portals | {} monsters",
            self.turn,
            self.map_id,
            self.position.x,
            self.position.y,
            self.health,
            self.max_health,
            self.level,
            self.xp,
            self.gold,
            self.potions,
            self.portals,
            self.monsters_alive,
        )?;
        if self.near_shop {
            f.write_str(" | shop")?;
        }
        if self.game_over {
            f.write_str(" | GAME OVER")?;
        }
        Ok(())
    }
}

pub struct Session {
    content: GameContent,
    seed: u64,
    world: World,
    dungeons: DungeonManager,
    processor: TurnProcessor,
    events: EventLog,
    shop: Option<Shop>,
}

impl Session {
    /// Starts a new game on the content's world map.
    pub fn new(content: GameContent, seed: u64) -> Self {
        let dungeons = DungeonManager::new(
            content.world.clone(),
            content.dungeons.clone(),
            content.config.town_map_id.clone(),
        );
        let world = Self::fresh_world(&content, seed);
        let shop = Self::town_shop(&content);
        info!(
            seed,
            map = %world.level.map_id,
            dungeons = content.dungeons.len(),
            "session started"
        );

        Self {
            content,
            seed,
            world,
            dungeons,
            processor: TurnProcessor::new(),
            events: EventLog::new(),
            shop,
        }
    }

    /// Fully stocked shop at the position the town map authors, if any.
    fn town_shop(content: &GameContent) -> Option<Shop> {
        let town = content.dungeons.get(&content.config.town_map_id)?;
        town.spawns().shop.map(Shop::standard)
    }

    fn fresh_world(content: &GameContent, seed: u64) -> World {
        World::start(
            content.world.id(),
            content.world.clone(),
            content.config.clone(),
            content.bestiary.clone(),
            content.loot.clone(),
            seed,
        )
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn dungeons(&self) -> &DungeonManager {
        &self.dungeons
    }

    pub fn phase(&self) -> TurnPhase {
        self.processor.phase()
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn is_game_over(&self) -> bool {
        !self.world.warrior.is_alive()
    }

    /// Records the warrior's next action. Rejected while a turn is resolving
    /// and after the warrior has died.
    pub fn queue_action(&mut self, action: PlayerAction) -> bool {
        if self.is_game_over() {
            warn!(?action, "action ignored: the warrior is dead");
            return false;
        }
        let queued = self
            .processor
            .queue_player_action(&mut self.world.warrior, action);
        if !queued {
            warn!(?action, "action ignored: a turn is already resolving");
        }
        queued
    }

    /// Processes a turn when one is queued.
    pub fn tick(&mut self) -> Result<Option<TurnReport>> {
        if self.processor.waiting_for_player_input() {
            return Ok(None);
        }

        let report = {
            let mut gate = DungeonGate::new(&mut self.dungeons, &mut self.events);
            self.processor.process_turn(&mut self.world, &mut gate)?
        };

        let warrior = &self.world.warrior;
        debug!(
            turn = report.turn,
            outcome = ?report.warrior,
            damage_taken = report.damage_taken(),
            deaths = report.deaths.len(),
            "turn resolved"
        );

        if report.leveled_up {
            let level = warrior.experience().level;
            info!(level, max_health = warrior.entity().max_health(), "level up");
            self.events.push(GameEvent::LevelUp {
                level,
                max_health: warrior.entity().max_health(),
            });
        }

        self.events.push(GameEvent::TurnResolved {
            turn: report.turn,
            position: warrior.position(),
            health: warrior.entity().health(),
            max_health: warrior.entity().max_health(),
        });

        if report.warrior_died {
            info!(turn = report.turn, "the warrior has fallen");
            self.events.push(GameEvent::WarriorDied { turn: report.turn });
        }

        Ok(Some(report))
    }

    /// Queues `action` and processes the turn.
    pub fn step(&mut self, action: PlayerAction) -> Result<Option<TurnReport>> {
        if !self.queue_action(action) {
            return Ok(None);
        }
        self.tick()
    }

    /// Drinks a health potion outside the turn order.
    pub fn use_health_potion(&mut self) -> bool {
        if !self.world.warrior.use_health_potion() {
            return false;
        }
        let health = self.world.warrior.entity().health();
        debug!(health, "health potion used");
        self.events.push(GameEvent::PotionUsed { health });
        true
    }

    /// Reads a town portal scroll outside the turn order.
    pub fn use_town_portal(&mut self) -> Result<PortalOutcome> {
        if self.is_game_over() {
            return Ok(PortalOutcome::Unusable {
                portals: self.world.warrior.town_portal_count(),
            });
        }
        let outcome = {
            let mut gate = DungeonGate::new(&mut self.dungeons, &mut self.events);
            gate.use_town_portal(&mut self.world)?
        };
        if outcome.transition().is_none() {
            debug!(%outcome, "town portal refused");
        }
        Ok(outcome)
    }

    /// Steps back through the open portal without waiting for a turn.
    pub fn use_return_portal(&mut self) -> Result<PortalOutcome> {
        if self.is_game_over() {
            return Ok(PortalOutcome::NoReturnPortal);
        }
        let mut gate = DungeonGate::new(&mut self.dungeons, &mut self.events);
        Ok(gate.use_return_portal(&mut self.world)?)
    }

    /// Buys the shop's stock entry at `index`.
    pub fn buy(&mut self, index: usize) -> Trade {
        self.trade(|shop, warrior| shop.buy(index, warrior))
    }

    /// Sells the backpack item at `index` to the shop.
    pub fn sell(&mut self, index: usize) -> Trade {
        self.trade(|shop, warrior| shop.sell(index, warrior))
    }

    fn trade(&mut self, deal: impl FnOnce(&mut Shop, &mut Warrior) -> Trade) -> Trade {
        let open = self.dungeons.is_in_town() && !self.is_game_over();
        let position = self.world.warrior.position();
        let trade = match self.shop.as_mut() {
            Some(shop) if open && shop.is_within_reach(position) => {
                deal(shop, &mut self.world.warrior)
            }
            _ => Trade::OutOfReach,
        };

        match &trade {
            Trade::Bought { item, price } => {
                info!(item = %item.name, price, "item bought");
                self.events.push(GameEvent::ItemBought {
                    item: item.clone(),
                    price: *price,
                });
            }
            Trade::Sold { item, price } => {
                info!(item = %item.name, price, "item sold");
                self.events.push(GameEvent::ItemSold {
                    item: item.clone(),
                    price: *price,
                });
            }
            refusal => debug!(%refusal, "trade refused"),
        }
        trade
    }

    /// Current shop stock; empty when the town has no shop.
    pub fn shop_stock(&self) -> Vec<ShopItem> {
        self.shop
            .as_ref()
            .map(|shop| shop.stock().to_vec())
            .unwrap_or_default()
    }

    pub fn is_near_shop(&self) -> bool {
        self.dungeons.is_in_town()
            && self
                .shop
                .as_ref()
                .is_some_and(|shop| shop.is_within_reach(self.world.warrior.position()))
    }

    /// Wears the backpack item at `index`. Free action.
    pub fn equip(&mut self, index: usize) -> bool {
        !self.is_game_over() && self.world.warrior.equip(index)
    }

    /// Moves the item worn in `slot` to the backpack. Free action.
    pub fn unequip(&mut self, slot: EquipSlot) -> bool {
        !self.is_game_over() && self.world.warrior.unequip(slot)
    }

    /// New warrior on the world map with empty ledgers and a restocked shop.
    pub fn restart(&mut self) {
        self.dungeons.reset();
        self.shop = Self::town_shop(&self.content);
        self.world = Self::fresh_world(&self.content, self.seed);
        self.processor.reset();
        info!(seed = self.seed, "session restarted");
        self.events.push(GameEvent::GameRestarted);
    }

    // ===== persistence =====

    pub fn snapshot(&self) -> SaveGame {
        let warrior = &self.world.warrior;
        let map_id = &self.world.level.map_id;
        SaveGame {
            timestamp: Utc::now(),
            player: SavedPlayer {
                grid_x: warrior.position().x,
                grid_y: warrior.position().y,
                health: warrior.entity().health(),
                max_health: warrior.entity().max_health(),
                gold: warrior.gold(),
                inventory: warrior.inventory().clone(),
                experience: warrior.experience().clone(),
            },
            current_map_id: map_id.clone(),
            return_location: self.dungeons.return_location(),
            portal: self.dungeons.portal().cloned(),
            killed_monsters: self.world.ledger.killed_monsters(),
            opened_chests: self.world.ledger.opened_chests(),
            ground_items: self
                .world
                .level
                .ground_items
                .iter()
                .map(|ground| SavedGroundItem::new(ground, map_id))
                .collect(),
            seed: self.seed,
            turn: self.world.nonce,
        }
    }

    /// Replaces the running game with a saved one. The level is rebuilt from
    /// the saved ledgers; ground items saved for other maps are dropped.
    pub fn restore(&mut self, save: SaveGame) -> Result<()> {
        self.dungeons
            .restore(&save.current_map_id, save.return_location, save.portal)?;

        let config = self.content.config.clone();
        let player = save.player;
        let mut warrior = Warrior::new(player.position(), &config);
        warrior.restore(
            player.position(),
            player.health,
            player.max_health,
            player.gold,
            player.inventory,
        );
        warrior.restore_experience(player.experience);

        let map = self.dungeons.current_map();
        let level = Level::empty(save.current_map_id.clone(), map);
        let mut world = World::new(warrior, level, config)
            .with_bestiary(self.content.bestiary.clone())
            .with_loot(self.content.loot.clone())
            .with_seed(save.seed)
            .with_ledger(ResolutionLedger::from_records(
                save.killed_monsters,
                save.opened_chests,
            ));
        world.nonce = save.turn;
        world.repopulate();
        world.level.ground_items = save
            .ground_items
            .into_iter()
            .filter(|ground| ground.map_id == save.current_map_id)
            .map(SavedGroundItem::into_ground_item)
            .collect();

        self.seed = save.seed;
        self.world = world;
        self.processor.reset();
        Ok(())
    }

    pub fn save(&mut self, repository: &dyn SaveRepository, slot: &str) -> Result<()> {
        repository.save(slot, &self.snapshot())?;
        info!(slot, "game saved");
        self.events.push(GameEvent::GameSaved {
            slot: slot.to_string(),
        });
        Ok(())
    }

    pub fn load(&mut self, repository: &dyn SaveRepository, slot: &str) -> Result<()> {
        let save = repository
            .load(slot)?
            .ok_or_else(|| RuntimeError::SaveNotFound {
                slot: slot.to_string(),
            })?;
        self.restore(save)?;
        info!(slot, map = %self.world.level.map_id, "game loaded");
        self.events.push(GameEvent::GameLoaded {
            slot: slot.to_string(),
        });
        Ok(())
    }

    pub fn status(&self) -> SessionStatus {
        let warrior = &self.world.warrior;
        SessionStatus {
            turn: self.world.nonce,
            map_id: self.world.level.map_id.clone(),
            position: warrior.position(),
            health: warrior.entity().health(),
            max_health: warrior.entity().max_health(),
            gold: warrior.gold(),
            level: warrior.experience().level,
            xp: warrior.experience().xp,
            potions: warrior.health_potion_count(),
            portals: warrior.town_portal_count(),
            monsters_alive: self.world.level.alive_monsters().count(),
            in_dungeon: self.dungeons.is_in_dungeon(),
            near_shop: self.is_near_shop(),
            game_over: self.is_game_over(),
        }
    }

    /// Events recorded since the last drain, oldest first.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.events.drain()
    }
}
