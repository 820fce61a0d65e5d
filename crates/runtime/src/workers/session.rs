//! Session worker that owns the authoritative [`Session`].
//!
//! Receives commands from [`crate::RuntimeHandle`], applies them to the
//! session, and publishes the events each command produced to the EventBus.

use std::sync::Arc;

use tokio::sync::{mpsc, oneshot};
use tracing::debug;

use game_core::{EquipSlot, PlayerAction, ShopItem, Trade, TurnReport};

use crate::api::Result;
use crate::dungeon::PortalOutcome;
use crate::events::EventBus;
use crate::repository::{SaveGame, SaveRepository};
use crate::session::{Session, SessionStatus};

/// Commands that can be sent to the session worker
pub enum Command {
    /// Record the warrior's next action without resolving it.
    QueueAction {
        action: PlayerAction,
        reply: oneshot::Sender<bool>,
    },
    /// Resolve the queued turn, if any.
    Tick {
        reply: oneshot::Sender<Result<Option<TurnReport>>>,
    },
    /// Queue an action and resolve the turn.
    Step {
        action: PlayerAction,
        reply: oneshot::Sender<Result<Option<TurnReport>>>,
    },
    UseHealthPotion {
        reply: oneshot::Sender<bool>,
    },
    UseTownPortal {
        reply: oneshot::Sender<Result<PortalOutcome>>,
    },
    UseReturnPortal {
        reply: oneshot::Sender<Result<PortalOutcome>>,
    },
    Buy {
        index: usize,
        reply: oneshot::Sender<Trade>,
    },
    Sell {
        index: usize,
        reply: oneshot::Sender<Trade>,
    },
    Equip {
        index: usize,
        reply: oneshot::Sender<bool>,
    },
    Unequip {
        slot: EquipSlot,
        reply: oneshot::Sender<bool>,
    },
    QueryShop {
        reply: oneshot::Sender<Vec<ShopItem>>,
    },
    Restart {
        reply: oneshot::Sender<()>,
    },
    Save {
        slot: String,
        reply: oneshot::Sender<Result<()>>,
    },
    Load {
        slot: String,
        reply: oneshot::Sender<Result<()>>,
    },
    ListSaves {
        reply: oneshot::Sender<Result<Vec<String>>>,
    },
    QueryStatus {
        reply: oneshot::Sender<SessionStatus>,
    },
    QuerySnapshot {
        reply: oneshot::Sender<SaveGame>,
    },
}

/// Background task that processes gameplay commands.
pub struct SessionWorker {
    session: Session,
    repository: Arc<dyn SaveRepository>,
    command_rx: mpsc::Receiver<Command>,
    event_bus: EventBus,
}

impl SessionWorker {
    pub fn new(
        session: Session,
        repository: Arc<dyn SaveRepository>,
        command_rx: mpsc::Receiver<Command>,
        event_bus: EventBus,
    ) -> Self {
        Self {
            session,
            repository,
            command_rx,
            event_bus,
        }
    }

    /// Main worker loop. Ends once every handle has been dropped.
    pub async fn run(mut self) {
        loop {
            tokio::select! {
                Some(cmd) = self.command_rx.recv() => {
                    self.handle_command(cmd);
                }
                else => break,
            }
        }
        debug!("SessionWorker stopped");
    }

    fn handle_command(&mut self, cmd: Command) {
        match cmd {
            Command::QueueAction { action, reply } => {
                let queued = self.session.queue_action(action);
                self.reply(reply, queued, "QueueAction");
            }
            Command::Tick { reply } => {
                let result = self.session.tick();
                self.reply(reply, result, "Tick");
            }
            Command::Step { action, reply } => {
                let result = self.session.step(action);
                self.reply(reply, result, "Step");
            }
            Command::UseHealthPotion { reply } => {
                let used = self.session.use_health_potion();
                self.reply(reply, used, "UseHealthPotion");
            }
            Command::UseTownPortal { reply } => {
                let result = self.session.use_town_portal();
                self.reply(reply, result, "UseTownPortal");
            }
            Command::UseReturnPortal { reply } => {
                let result = self.session.use_return_portal();
                self.reply(reply, result, "UseReturnPortal");
            }
            Command::Buy { index, reply } => {
                let trade = self.session.buy(index);
                self.reply(reply, trade, "Buy");
            }
            Command::Sell { index, reply } => {
                let trade = self.session.sell(index);
                self.reply(reply, trade, "Sell");
            }
            Command::Equip { index, reply } => {
                let equipped = self.session.equip(index);
                self.reply(reply, equipped, "Equip");
            }
            Command::Unequip { slot, reply } => {
                let unequipped = self.session.unequip(slot);
                self.reply(reply, unequipped, "Unequip");
            }
            Command::QueryShop { reply } => {
                let stock = self.session.shop_stock();
                self.reply(reply, stock, "QueryShop");
            }
            Command::Restart { reply } => {
                self.session.restart();
                self.reply(reply, (), "Restart");
            }
            Command::Save { slot, reply } => {
                let result = self.session.save(self.repository.as_ref(), &slot);
                self.reply(reply, result, "Save");
            }
            Command::Load { slot, reply } => {
                let result = self.session.load(self.repository.as_ref(), &slot);
                self.reply(reply, result, "Load");
            }
            Command::ListSaves { reply } => {
                let result = self.repository.list_slots().map_err(Into::into);
                self.reply(reply, result, "ListSaves");
            }
            Command::QueryStatus { reply } => {
                let status = self.session.status();
                self.reply(reply, status, "QueryStatus");
            }
            Command::QuerySnapshot { reply } => {
                let snapshot = self.session.snapshot();
                self.reply(reply, snapshot, "QuerySnapshot");
            }
        }
    }

    /// Events are on the bus before the caller sees the reply.
    fn reply<T>(&mut self, reply: oneshot::Sender<T>, value: T, command: &str) {
        self.publish_events();
        if reply.send(value).is_err() {
            debug!("{} reply channel closed (caller dropped)", command);
        }
    }

    fn publish_events(&mut self) {
        for event in self.session.drain_events() {
            self.event_bus.publish(event);
        }
    }
}
