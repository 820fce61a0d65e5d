//! Record of monsters killed and chests opened, per map.
//!
//! Consulted whenever a map is populated so resolved entities stay resolved.
//! Record field names are part of the save-file format.

use std::collections::HashSet;

use crate::grid::Position;

#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KilledMonster {
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub kind: String,
    pub x: i32,
    pub y: i32,
    pub map_id: String,
}

impl KilledMonster {
    pub fn new(kind: impl Into<String>, position: Position, map_id: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            x: position.x,
            y: position.y,
            map_id: map_id.into(),
        }
    }

    pub fn position(&self) -> Position {
        Position::new(self.x, self.y)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OpenedChest {
    pub x: i32,
    pub y: i32,
    pub map_id: String,
}

impl OpenedChest {
    pub fn new(position: Position, map_id: impl Into<String>) -> Self {
        Self {
            x: position.x,
            y: position.y,
            map_id: map_id.into(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ResolutionLedger {
    killed: HashSet<KilledMonster>,
    opened: HashSet<OpenedChest>,
}

impl ResolutionLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_kill(&mut self, entry: KilledMonster) -> bool {
        self.killed.insert(entry)
    }

    pub fn was_killed(&self, entry: &KilledMonster) -> bool {
        self.killed.contains(entry)
    }

    /// Any species killed at this spot. Used for the fallback spawn, whose
    /// species is random and so cannot be part of the key.
    pub fn was_killed_at(&self, position: Position, map_id: &str) -> bool {
        self.killed
            .iter()
            .any(|entry| entry.position() == position && entry.map_id == map_id)
    }

    pub fn record_opened(&mut self, entry: OpenedChest) -> bool {
        self.opened.insert(entry)
    }

    pub fn was_opened(&self, entry: &OpenedChest) -> bool {
        self.opened.contains(entry)
    }

    /// Killed entries sorted for stable output.
    pub fn killed_monsters(&self) -> Vec<KilledMonster> {
        let mut entries: Vec<_> = self.killed.iter().cloned().collect();
        entries.sort();
        entries
    }

    pub fn opened_chests(&self) -> Vec<OpenedChest> {
        let mut entries: Vec<_> = self.opened.iter().cloned().collect();
        entries.sort();
        entries
    }

    pub fn clear(&mut self) {
        self.killed.clear();
        self.opened.clear();
    }
}

impl ResolutionLedger {
    /// Rebuilds a ledger from persisted record lists.
    pub fn from_records(
        killed: impl IntoIterator<Item = KilledMonster>,
        opened: impl IntoIterator<Item = OpenedChest>,
    ) -> Self {
        Self {
            killed: killed.into_iter().collect(),
            opened: opened.into_iter().collect(),
        }
    }
}
