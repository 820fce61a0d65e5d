//! Repository contract for saving and loading games.

use super::error::Result;
use super::types::SaveGame;

/// Named save slots.
///
/// Implementations must be shareable across the runtime's worker task.
pub trait SaveRepository: Send + Sync {
    /// Writes `save` into `slot`, replacing what was there.
    fn save(&self, slot: &str, save: &SaveGame) -> Result<()>;

    /// Reads a slot. An empty slot is `Ok(None)`.
    fn load(&self, slot: &str) -> Result<Option<SaveGame>>;

    /// Removes a slot. Deleting an empty slot is not an error.
    fn delete(&self, slot: &str) -> Result<()>;

    /// Occupied slot names in ascending order.
    fn list_slots(&self) -> Result<Vec<String>>;

    fn exists(&self, slot: &str) -> Result<bool> {
        Ok(self.load(slot)?.is_some())
    }
}
