//! Shared types for repository layer.

mod save;

pub use save::{SaveGame, SavedGroundItem, SavedPlayer};
