//! World map, dungeon and town bookkeeping.
//!
//! [`DungeonManager`] knows which map is active, where the warrior entered
//! the current dungeon from, and where an open town portal leads back to.
//! [`DungeonGate`] plugs it into the turn processor as the world-transition
//! collaborator and performs portal jumps for the session.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use game_core::{
    AttackEffect, Combatant, DungeonEntrance, Item, MapOracle, MapTransition, MonsterDeath, Pickup,
    Position, TileMap, TransitionError, TurnHooks, World,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::events::{EventLog, GameEvent};

/// Tile character that leads from a dungeon back to the world map.
pub const EXIT_TILE: char = '<';

/// Where an open town portal leads back to.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortalAnchor {
    pub map_id: String,
    pub position: Position,
}

#[derive(Clone, Debug)]
pub struct DungeonManager {
    world: Arc<TileMap>,
    dungeons: HashMap<String, Arc<TileMap>>,
    current: Arc<TileMap>,
    return_location: Option<Position>,
    town_id: String,
    portal: Option<PortalAnchor>,
}

impl DungeonManager {
    /// `town_id` names the dungeon map that town portals lead to.
    pub fn new(
        world: Arc<TileMap>,
        dungeons: HashMap<String, Arc<TileMap>>,
        town_id: impl Into<String>,
    ) -> Self {
        Self {
            current: Arc::clone(&world),
            world,
            dungeons,
            return_location: None,
            town_id: town_id.into(),
            portal: None,
        }
    }

    pub fn world(&self) -> &Arc<TileMap> {
        &self.world
    }

    pub fn world_id(&self) -> &str {
        self.world.id()
    }

    pub fn current_map_id(&self) -> &str {
        self.current.id()
    }

    pub fn current_map(&self) -> Arc<TileMap> {
        Arc::clone(&self.current)
    }

    pub fn is_in_dungeon(&self) -> bool {
        self.current.id() != self.world.id()
    }

    /// Where the warrior stood on the world map before entering the current
    /// dungeon.
    pub fn return_location(&self) -> Option<Position> {
        self.return_location
    }

    pub fn is_loaded(&self, dungeon_id: &str) -> bool {
        self.dungeons.contains_key(dungeon_id)
    }

    pub fn town_id(&self) -> &str {
        &self.town_id
    }

    pub fn is_in_town(&self) -> bool {
        self.current.id() == self.town_id
    }

    pub fn portal(&self) -> Option<&PortalAnchor> {
        self.portal.as_ref()
    }

    /// Tile of the return portal: the town spawn point while a portal is open
    /// and the warrior is in town.
    pub fn return_portal(&self) -> Option<Position> {
        (self.portal.is_some() && self.is_in_town()).then(|| self.current.spawn_point())
    }

    /// Town portals work anywhere but in town, and only when the town map is
    /// loaded.
    pub fn can_open_portal(&self) -> bool {
        self.is_loaded(&self.town_id) && !self.is_in_town()
    }

    /// Switches to town and remembers `from` on the current map as the portal
    /// anchor. Returns the arrival tile, one step east of the town spawn when
    /// that tile is passable. Opening from the world map also records `from`
    /// as the return location for leaving town on foot.
    pub fn open_town_portal(&mut self, from: Position) -> Result<Position, TransitionError> {
        let town = self.map(&self.town_id)?;
        if !self.is_in_dungeon() {
            self.return_location = Some(from);
        }
        self.portal = Some(PortalAnchor {
            map_id: self.current.id().to_string(),
            position: from,
        });
        self.current = town;

        let spawn = self.current.spawn_point();
        let beside = spawn.offset(1, 0);
        Ok(if self.current.is_passable(beside) {
            beside
        } else {
            spawn
        })
    }

    /// Follows the open portal back to its anchor and closes it. `None` when
    /// no portal is open or the warrior is not in town.
    pub fn return_through_portal(&mut self) -> Result<Option<Position>, TransitionError> {
        if !self.is_in_town() {
            return Ok(None);
        }
        let Some(anchor) = self.portal.take() else {
            return Ok(None);
        };
        self.current = self.map(&anchor.map_id)?;
        Ok(Some(anchor.position))
    }

    fn map(&self, map_id: &str) -> Result<Arc<TileMap>, TransitionError> {
        if map_id == self.world.id() {
            return Ok(Arc::clone(&self.world));
        }
        self.dungeons
            .get(map_id)
            .map(Arc::clone)
            .ok_or_else(|| TransitionError::UnknownMap {
                id: map_id.to_string(),
            })
    }

    /// Id of the loaded dungeon whose entrance is at `position`. Only answers
    /// while on the world map.
    pub fn dungeon_at(&self, position: Position) -> Option<&str> {
        self.entrance_at(position).map(|entrance| entrance.id.as_str())
    }

    fn entrance_at(&self, position: Position) -> Option<&DungeonEntrance> {
        if self.is_in_dungeon() {
            return None;
        }
        self.world
            .dungeon_entrance_at(position)
            .filter(|entrance| self.dungeons.contains_key(&entrance.id))
    }

    /// Switches to the dungeon and remembers `from` as the way back. Returns
    /// the dungeon's spawn point.
    pub fn enter_dungeon(
        &mut self,
        dungeon_id: &str,
        from: Position,
    ) -> Result<Position, TransitionError> {
        let dungeon = self
            .dungeons
            .get(dungeon_id)
            .ok_or_else(|| TransitionError::DungeonNotLoaded {
                id: dungeon_id.to_string(),
            })?;
        self.current = Arc::clone(dungeon);
        self.return_location = Some(from);
        Ok(self.current.spawn_point())
    }

    /// Switches back to the world map. Returns where the warrior should stand,
    /// or `None` when already on the world map. Without a recorded return
    /// location the world spawn point is used. Walking out of town closes any
    /// open portal.
    pub fn exit_dungeon(&mut self) -> Option<Position> {
        if !self.is_in_dungeon() {
            return None;
        }
        if self.is_in_town() {
            self.portal = None;
        }
        self.current = Arc::clone(&self.world);
        let position = self
            .return_location
            .take()
            .unwrap_or_else(|| self.world.spawn_point());
        Some(position)
    }

    /// Whether `position` is an exit tile of the current dungeon.
    pub fn is_exit(&self, position: Position) -> bool {
        self.is_in_dungeon() && self.current.tile_char(position) == Some(EXIT_TILE)
    }

    /// Reinstates a persisted map id, return location and portal anchor.
    pub fn restore(
        &mut self,
        map_id: &str,
        return_location: Option<Position>,
        portal: Option<PortalAnchor>,
    ) -> Result<(), TransitionError> {
        if let Some(anchor) = &portal {
            self.map(&anchor.map_id)?;
        }
        self.current = self.map(map_id)?;
        self.return_location = return_location;
        self.portal = portal;
        Ok(())
    }

    /// Back on the world map with no return location and no open portal.
    pub fn reset(&mut self) {
        self.current = Arc::clone(&self.world);
        self.return_location = None;
        self.portal = None;
    }
}

/// Result of reading a town portal scroll or stepping back through one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PortalOutcome {
    Opened(MapTransition),
    Returned(MapTransition),
    NoPortals,
    /// Scrolls are carried but cannot be read here.
    Unusable { portals: usize },
    NoReturnPortal,
}

impl PortalOutcome {
    pub fn transition(&self) -> Option<&MapTransition> {
        match self {
            PortalOutcome::Opened(transition) | PortalOutcome::Returned(transition) => {
                Some(transition)
            }
            _ => None,
        }
    }
}

impl fmt::Display for PortalOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PortalOutcome::Opened(_) => f.write_str(PORTAL_OPENED),
            PortalOutcome::Returned(_) => f.write_str(PORTAL_RETURNED),
            PortalOutcome::NoPortals => f.write_str("No town portals in inventory!"),
            PortalOutcome::Unusable { portals } => write!(
                f,
                "You have {} portal(s) but cannot use them here!",
                portals
            ),
            PortalOutcome::NoReturnPortal => f.write_str("No return portal available!"),
        }
    }
}

const PORTAL_OPENED: &str = "You enter the portal and arrive in town!";
const PORTAL_RETURNED: &str = "You return through the portal!";

// ===== turn collaborator =====

/// Turn hooks for one session turn: map transitions through the dungeon
/// manager, everything else recorded into the event log.
pub struct DungeonGate<'a> {
    pub dungeons: &'a mut DungeonManager,
    pub events: &'a mut EventLog,
}

impl<'a> DungeonGate<'a> {
    pub fn new(dungeons: &'a mut DungeonManager, events: &'a mut EventLog) -> Self {
        Self { dungeons, events }
    }

    fn finish(
        &mut self,
        world: &mut World,
        from_map: String,
        position: Position,
        message: String,
    ) -> MapTransition {
        let map = self.dungeons.current_map();
        let transition = MapTransition {
            from_map,
            to_map: map.id().to_string(),
            position,
        };
        world.change_map(transition.to_map.clone(), map, position);

        info!(
            from = %transition.from_map,
            to = %transition.to_map,
            x = position.x,
            y = position.y,
            "{}",
            message
        );
        self.events.push(GameEvent::MapChanged {
            transition: transition.clone(),
            message,
        });
        transition
    }

    /// Reads one town portal scroll and moves the warrior to town.
    pub fn use_town_portal(&mut self, world: &mut World) -> Result<PortalOutcome, TransitionError> {
        let portals = world.warrior.town_portal_count();
        if portals == 0 {
            return Ok(PortalOutcome::NoPortals);
        }
        if !self.dungeons.can_open_portal() || !world.warrior.use_town_portal() {
            return Ok(PortalOutcome::Unusable { portals });
        }

        let from_map = self.dungeons.current_map_id().to_string();
        let target = self.dungeons.open_town_portal(world.warrior.position())?;
        let transition = self.finish(world, from_map, target, PORTAL_OPENED.to_string());
        Ok(PortalOutcome::Opened(transition))
    }

    /// Steps back through the open portal to where it was opened.
    pub fn use_return_portal(&mut self, world: &mut World) -> Result<PortalOutcome, TransitionError> {
        let from_map = self.dungeons.current_map_id().to_string();
        let Some(target) = self.dungeons.return_through_portal()? else {
            return Ok(PortalOutcome::NoReturnPortal);
        };
        let transition = self.finish(world, from_map, target, PORTAL_RETURNED.to_string());
        Ok(PortalOutcome::Returned(transition))
    }
}

impl TurnHooks for DungeonGate<'_> {
    /// The return portal is checked first, then exit tiles, then entrances.
    fn world_transition(
        &mut self,
        world: &mut World,
    ) -> Result<Option<MapTransition>, TransitionError> {
        let position = world.warrior.position();
        let from_map = self.dungeons.current_map_id().to_string();

        if self.dungeons.return_portal() == Some(position) {
            return Ok(self.use_return_portal(world)?.transition().cloned());
        }

        if self.dungeons.is_exit(position) {
            let leaving_town = self.dungeons.is_in_town();
            let Some(target) = self.dungeons.exit_dungeon() else {
                return Ok(None);
            };
            let message = if leaving_town {
                "You leave the town.".to_string()
            } else {
                "You return to the world map.".to_string()
            };
            return Ok(Some(self.finish(world, from_map, target, message)));
        }

        let Some(entrance) = self.dungeons.entrance_at(position).cloned() else {
            return Ok(None);
        };
        let target = self.dungeons.enter_dungeon(&entrance.id, position)?;
        let message = if entrance.id == self.dungeons.town_id() {
            "You enter the town!".to_string()
        } else {
            format!("You enter the {}!", entrance.name)
        };
        Ok(Some(self.finish(world, from_map, target, message)))
    }

    fn on_attack_effect(&mut self, effect: AttackEffect) {
        debug!(
            damage = effect.damage,
            crit = effect.crit,
            x = effect.target.x,
            y = effect.target.y,
            "attack landed"
        );
        self.events.push(GameEvent::AttackLanded { effect });
    }

    fn on_chest_opened(&mut self, item: &Item, position: Position) {
        self.events.push(GameEvent::ChestOpened {
            item: item.clone(),
            position,
        });
    }

    fn on_pickup(&mut self, pickup: &Pickup) {
        self.events.push(GameEvent::ItemPickedUp {
            pickup: pickup.clone(),
            message: pickup.to_string(),
        });
    }

    fn on_monster_death(&mut self, death: &MonsterDeath) {
        debug!(kind = %death.kind, xp = death.xp, "monster slain");
        self.events.push(GameEvent::MonsterSlain {
            death: death.clone(),
        });
    }
}
