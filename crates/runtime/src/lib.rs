//! Session runtime for the warrior-versus-monsters game.
//!
//! This crate wires the pure turn rules of `game-core` to dungeon
//! bookkeeping, save repositories and an async worker. Consumers embed
//! [`Runtime`] to drive a game and subscribe to events through
//! [`RuntimeHandle`], or use [`Session`] directly for synchronous play.
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator and builder
//! - [`api`] exposes the types downstream clients interact with
//! - [`session`] owns one playthrough and its lifecycle
//! - [`dungeon`] tracks the active map and performs map and portal transitions
//! - [`events`] provides topic-based event bus for flexible event routing
//! - [`repository`] persists save games
//! - [`workers`] keeps background tasks internal to the crate
pub mod api;
pub mod dungeon;
pub mod events;
pub mod repository;
pub mod runtime;
pub mod session;

mod workers;

pub use api::{Result, RuntimeError, RuntimeHandle};
pub use dungeon::{DungeonGate, DungeonManager, EXIT_TILE, PortalAnchor, PortalOutcome};
pub use events::{EventBus, EventLog, GameEvent, Topic};
pub use repository::{
    FileSaveRepository, InMemorySaveRepository, RepositoryError, SaveGame, SaveRepository,
    SavedGroundItem, SavedPlayer,
};
pub use runtime::{Runtime, RuntimeBuilder, RuntimeConfig};
pub use session::{Session, SessionStatus};
