//! Save-game document.
//!
//! Field names follow the JSON save format:
//!
//! ```json
//! {
//!   "timestamp": "2026-03-01T12:00:00Z",
//!   "player": { "grid_x": 3, "grid_y": 4, "health": 80, "max_health": 100, "gold": 12,
//!               "inventory": { "weapon_slot": {..}, "armor_slot": null, "backpack_slots": [..] } },
//!   "current_map_id": "world",
//!   "return_location": null,
//!   "portal": { "map_id": "crypt", "position": { "x": 2, "y": 5 } },
//!   "killed_monsters": [{ "type": "pooka", "x": 6, "y": 5, "map_id": "world" }],
//!   "opened_chests": [{ "x": 3, "y": 8, "map_id": "world" }],
//!   "ground_items": [{ "item": {..}, "grid_x": 6, "grid_y": 5, "map_id": "world" }]
//! }
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use game_core::{Experience, GroundItem, Inventory, Item, KilledMonster, OpenedChest, Position};

use crate::dungeon::PortalAnchor;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedPlayer {
    pub grid_x: i32,
    pub grid_y: i32,
    pub health: u32,
    pub max_health: u32,
    pub gold: u32,
    pub inventory: Inventory,
    #[serde(default)]
    pub experience: Experience,
}

impl SavedPlayer {
    pub fn position(&self) -> Position {
        Position::new(self.grid_x, self.grid_y)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedGroundItem {
    pub item: Item,
    pub grid_x: i32,
    pub grid_y: i32,
    pub map_id: String,
}

impl SavedGroundItem {
    pub fn new(ground: &GroundItem, map_id: &str) -> Self {
        Self {
            item: ground.item.clone(),
            grid_x: ground.position.x,
            grid_y: ground.position.y,
            map_id: map_id.to_string(),
        }
    }

    pub fn into_ground_item(self) -> GroundItem {
        GroundItem::new(self.item, Position::new(self.grid_x, self.grid_y))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveGame {
    pub timestamp: DateTime<Utc>,
    pub player: SavedPlayer,
    pub current_map_id: String,
    pub return_location: Option<Position>,
    /// Anchor of the town portal open at save time.
    #[serde(default)]
    pub portal: Option<PortalAnchor>,
    pub killed_monsters: Vec<KilledMonster>,
    pub opened_chests: Vec<OpenedChest>,
    pub ground_items: Vec<SavedGroundItem>,
    /// Game seed and turn counter; absent in older saves.
    #[serde(default)]
    pub seed: u64,
    #[serde(default)]
    pub turn: u64,
}
