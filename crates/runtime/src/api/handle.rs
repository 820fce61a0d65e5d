//! Cloneable façade for issuing commands to the runtime.
//!
//! [`RuntimeHandle`] hides channel plumbing and offers async helpers for
//! driving the session or streaming events from specific topics.
use tokio::sync::{broadcast, mpsc, oneshot};

use game_core::{EquipSlot, PlayerAction, ShopItem, Trade, TurnReport};

use super::errors::{Result, RuntimeError};
use crate::dungeon::PortalOutcome;
use crate::events::{EventBus, GameEvent, Topic};
use crate::repository::SaveGame;
use crate::session::SessionStatus;
use crate::workers::Command;

/// Client-facing handle to interact with the runtime
#[derive(Clone)]
pub struct RuntimeHandle {
    command_tx: mpsc::Sender<Command>,
    event_bus: EventBus,
}

impl RuntimeHandle {
    pub(crate) fn new(command_tx: mpsc::Sender<Command>, event_bus: EventBus) -> Self {
        Self {
            command_tx,
            event_bus,
        }
    }

    /// Sends a command built around a fresh reply channel and awaits the
    /// worker's answer.
    async fn request<T>(&self, command: impl FnOnce(oneshot::Sender<T>) -> Command) -> Result<T> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(command(reply_tx))
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    /// Record the warrior's next action. `false` while a turn is resolving
    /// or once the warrior is dead.
    pub async fn queue_action(&self, action: PlayerAction) -> Result<bool> {
        self.request(|reply| Command::QueueAction { action, reply })
            .await
    }

    /// Resolve the queued turn. `None` when nothing was queued.
    pub async fn tick(&self) -> Result<Option<TurnReport>> {
        self.request(|reply| Command::Tick { reply }).await?
    }

    /// Queue `action` and resolve the turn in one round trip.
    pub async fn step(&self, action: PlayerAction) -> Result<Option<TurnReport>> {
        self.request(|reply| Command::Step { action, reply })
            .await?
    }

    pub async fn use_health_potion(&self) -> Result<bool> {
        self.request(|reply| Command::UseHealthPotion { reply })
            .await
    }

    /// Read a town portal scroll. Refusals come back as outcomes, not errors.
    pub async fn use_town_portal(&self) -> Result<PortalOutcome> {
        self.request(|reply| Command::UseTownPortal { reply })
            .await?
    }

    pub async fn use_return_portal(&self) -> Result<PortalOutcome> {
        self.request(|reply| Command::UseReturnPortal { reply })
            .await?
    }

    /// Buy the shop stock entry at `index`.
    pub async fn buy(&self, index: usize) -> Result<Trade> {
        self.request(|reply| Command::Buy { index, reply }).await
    }

    /// Sell the backpack item at `index`.
    pub async fn sell(&self, index: usize) -> Result<Trade> {
        self.request(|reply| Command::Sell { index, reply }).await
    }

    pub async fn equip(&self, index: usize) -> Result<bool> {
        self.request(|reply| Command::Equip { index, reply }).await
    }

    pub async fn unequip(&self, slot: EquipSlot) -> Result<bool> {
        self.request(|reply| Command::Unequip { slot, reply })
            .await
    }

    /// Query the shop's current stock (read-only)
    pub async fn shop_stock(&self) -> Result<Vec<ShopItem>> {
        self.request(|reply| Command::QueryShop { reply }).await
    }

    pub async fn restart(&self) -> Result<()> {
        self.request(|reply| Command::Restart { reply }).await
    }

    pub async fn save(&self, slot: impl Into<String>) -> Result<()> {
        let slot = slot.into();
        self.request(|reply| Command::Save { slot, reply }).await?
    }

    pub async fn load(&self, slot: impl Into<String>) -> Result<()> {
        let slot = slot.into();
        self.request(|reply| Command::Load { slot, reply }).await?
    }

    pub async fn list_saves(&self) -> Result<Vec<String>> {
        self.request(|reply| Command::ListSaves { reply }).await?
    }

    /// Query a one-line summary of the session (read-only)
    pub async fn status(&self) -> Result<SessionStatus> {
        self.request(|reply| Command::QueryStatus { reply }).await
    }

    /// Query the session as a save document without writing it anywhere
    pub async fn snapshot(&self) -> Result<SaveGame> {
        self.request(|reply| Command::QuerySnapshot { reply }).await
    }

    /// Subscribe to events from a specific topic
    ///
    /// # Topics
    ///
    /// - `Topic::Turn` - Turn completion and warrior death
    /// - `Topic::Combat` - Attacks, kills and level-ups
    /// - `Topic::World` - Chests, pickups, potions, trades and map changes
    /// - `Topic::Persistence` - Save, load and restart
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use runtime::Topic;
    ///
    /// let mut combat_rx = handle.subscribe(Topic::Combat);
    /// while let Ok(event) = combat_rx.recv().await {
    ///     // Handle combat events
    /// }
    /// ```
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<GameEvent> {
        self.event_bus.subscribe(topic)
    }

    /// Subscribe to multiple topics at once
    pub fn subscribe_multiple(
        &self,
        topics: &[Topic],
    ) -> Vec<(Topic, broadcast::Receiver<GameEvent>)> {
        self.event_bus.subscribe_multiple(topics)
    }

    /// Get a reference to the event bus for advanced usage
    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }
}
