//! Repository layer for save games.
//!
//! Repositories hold data that CHANGES during play: the warrior, the active
//! map and the resolution ledgers. Static content (maps, bestiary, loot
//! tables) comes from `game-content`, never from a repository.

mod error;
mod file;
mod memory;
mod traits;
mod types;

pub use error::{RepositoryError, Result};
pub use file::FileSaveRepository;
pub use memory::InMemorySaveRepository;
pub use traits::SaveRepository;
pub use types::{SaveGame, SavedGroundItem, SavedPlayer};
