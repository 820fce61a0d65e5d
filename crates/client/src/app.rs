//! Command loop: reads lines, drives the runtime, prints what happened.

use std::io::Write;

use anyhow::Result;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::broadcast::{self, error::TryRecvError};
use tracing::{debug, warn};

use game_core::{EffectSource, Item, MonsterDecision, ShopItem, TurnReport, WarriorOutcome};
use runtime::{GameEvent, PortalOutcome, RuntimeHandle, Topic};

use crate::commands::{ClientCommand, HELP};

pub struct App<W> {
    handle: RuntimeHandle,
    receivers: Vec<(Topic, broadcast::Receiver<GameEvent>)>,
    out: W,
}

impl<W: Write> App<W> {
    pub fn new(handle: RuntimeHandle, out: W) -> Self {
        let receivers = handle.subscribe_multiple(&[Topic::Combat, Topic::World, Topic::Turn]);
        Self {
            handle,
            receivers,
            out,
        }
    }

    pub fn into_output(self) -> W {
        self.out
    }

    /// Runs until `quit` or end of input.
    pub async fn run<R>(&mut self, input: R) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
    {
        writeln!(self.out, "{}", HELP)?;
        self.print_status().await?;

        let mut lines = input.lines();
        while let Some(line) = lines.next_line().await? {
            let command = match ClientCommand::parse(&line) {
                Ok(Some(command)) => command,
                Ok(None) => continue,
                Err(err) => {
                    writeln!(self.out, "{}", err)?;
                    continue;
                }
            };
            if !self.execute(command).await? {
                break;
            }
        }
        Ok(())
    }

    /// Executes one command. Returns `false` when the loop should stop.
    pub async fn execute(&mut self, command: ClientCommand) -> Result<bool> {
        debug!(?command, "command");
        match command {
            ClientCommand::Act(action) => {
                match self.handle.step(action).await? {
                    Some(report) => self.print_report(&report)?,
                    None => writeln!(self.out, "You cannot act right now.")?,
                }
            }
            ClientCommand::Potion => {
                if !self.handle.use_health_potion().await? {
                    writeln!(self.out, "You cannot drink a potion right now.")?;
                }
            }
            ClientCommand::TownPortal => {
                let outcome = self.handle.use_town_portal().await;
                self.print_portal(outcome)?;
            }
            ClientCommand::ReturnPortal => {
                let outcome = self.handle.use_return_portal().await;
                self.print_portal(outcome)?;
            }
            ClientCommand::Inventory => {
                self.print_inventory().await?;
                return Ok(true);
            }
            ClientCommand::Equip(index) => {
                if !self.handle.equip(index).await? {
                    writeln!(self.out, "You cannot equip that.")?;
                }
            }
            ClientCommand::Unequip(slot) => {
                if !self.handle.unequip(slot).await? {
                    writeln!(self.out, "You cannot take off your {} right now.", slot)?;
                }
            }
            ClientCommand::Shop => {
                let stock = self.handle.shop_stock().await?;
                self.print_stock(&stock)?;
                return Ok(true);
            }
            ClientCommand::Buy(index) => {
                let trade = self.handle.buy(index).await?;
                if !trade.is_success() {
                    writeln!(self.out, "{}", trade)?;
                }
            }
            ClientCommand::Sell(index) => {
                let trade = self.handle.sell(index).await?;
                if !trade.is_success() {
                    writeln!(self.out, "{}", trade)?;
                }
            }
            ClientCommand::Save(slot) => {
                if let Err(err) = self.handle.save(slot.as_str()).await {
                    warn!(%slot, error = %err, "save failed");
                    writeln!(self.out, "Save failed: {}", err)?;
                } else {
                    writeln!(self.out, "Game saved to '{}'.", slot)?;
                }
            }
            ClientCommand::Load(slot) => {
                if let Err(err) = self.handle.load(slot.as_str()).await {
                    warn!(%slot, error = %err, "load failed");
                    writeln!(self.out, "Load failed: {}", err)?;
                } else {
                    writeln!(self.out, "Game loaded from '{}'.", slot)?;
                }
            }
            ClientCommand::Saves => {
                let slots = self.handle.list_saves().await?;
                if slots.is_empty() {
                    writeln!(self.out, "No saves yet.")?;
                } else {
                    writeln!(self.out, "Saves: {}", slots.join(", "))?;
                }
            }
            ClientCommand::Restart => {
                self.handle.restart().await?;
                writeln!(self.out, "A new warrior sets out.")?;
            }
            ClientCommand::Status => {}
            ClientCommand::Help => {
                writeln!(self.out, "{}", HELP)?;
                return Ok(true);
            }
            ClientCommand::Quit => return Ok(false),
        }

        self.print_events()?;
        self.print_status().await?;
        Ok(true)
    }

    /// Successful jumps are announced by their map-change event.
    fn print_portal(&mut self, outcome: runtime::Result<PortalOutcome>) -> Result<()> {
        match outcome {
            Ok(outcome) if outcome.transition().is_none() => writeln!(self.out, "{}", outcome)?,
            Ok(_) => {}
            Err(err) => {
                warn!(error = %err, "portal failed");
                writeln!(self.out, "The portal fizzles: {}", err)?;
            }
        }
        Ok(())
    }

    async fn print_inventory(&mut self) -> Result<()> {
        let inventory = self.handle.snapshot().await?.player.inventory;
        for (label, slot) in [("Weapon", &inventory.weapon_slot), ("Armor", &inventory.armor_slot)] {
            match slot {
                Some(item) => writeln!(self.out, "{}: {}", label, item_label(item))?,
                None => writeln!(self.out, "{}: none", label)?,
            }
        }
        let mut empty = true;
        for (index, slot) in inventory.backpack_slots.iter().enumerate() {
            if let Some(item) = slot {
                writeln!(self.out, "  {}. {}", index + 1, item_label(item))?;
                empty = false;
            }
        }
        if empty {
            writeln!(self.out, "Your backpack is empty.")?;
        }
        Ok(())
    }

    fn print_stock(&mut self, stock: &[ShopItem]) -> Result<()> {
        if stock.is_empty() {
            writeln!(self.out, "There is no shop here.")?;
            return Ok(());
        }
        for (index, entry) in stock.iter().enumerate() {
            let supply = if entry.infinite {
                "plenty".to_string()
            } else if entry.quantity == 0 {
                "sold out".to_string()
            } else {
                format!("{} left", entry.quantity)
            };
            writeln!(
                self.out,
                "  {}. {} for {} gold ({})",
                index + 1,
                item_label(&entry.item),
                entry.price(),
                supply
            )?;
        }
        Ok(())
    }

    fn print_report(&mut self, report: &TurnReport) -> Result<()> {
        match &report.warrior {
            WarriorOutcome::Move { success: false, .. } => {
                writeln!(self.out, "Something blocks your way.")?
            }
            WarriorOutcome::Attack(outcome) if !outcome.success => {
                writeln!(self.out, "Nothing to strike.")?
            }
            _ => {}
        }
        for turn in &report.monster_turns {
            if let MonsterDecision::Attacked { landed: false, .. } = turn.decision {
                writeln!(self.out, "The {} gathers itself.", turn.kind.display_name())?;
            }
        }
        Ok(())
    }

    fn print_events(&mut self) -> Result<()> {
        let mut lines = Vec::new();
        for (topic, receiver) in &mut self.receivers {
            loop {
                match receiver.try_recv() {
                    Ok(event) => lines.extend(describe(&event)),
                    Err(TryRecvError::Lagged(skipped)) => {
                        warn!(?topic, skipped, "event receiver lagged");
                    }
                    Err(TryRecvError::Empty | TryRecvError::Closed) => break,
                }
            }
        }
        for line in lines {
            writeln!(self.out, "{}", line)?;
        }
        Ok(())
    }

    async fn print_status(&mut self) -> Result<()> {
        let status = self.handle.status().await?;
        writeln!(self.out, "{}", status)?;
        Ok(())
    }
}

fn item_label(item: &Item) -> String {
    match (item.attack_bonus, item.defense_bonus) {
        (0, 0) => item.name.clone(),
        (attack, 0) => format!("{} (+{} attack)", item.name, attack),
        (0, defense) => format!("{} (+{} defense)", item.name, defense),
        (attack, defense) => format!("{} (+{} attack, +{} defense)", item.name, attack, defense),
    }
}

/// Player-facing line for an event, if it deserves one.
pub fn describe(event: &GameEvent) -> Option<String> {
    let line = match event {
        GameEvent::AttackLanded { effect } => match effect.source {
            EffectSource::Warrior if effect.crit => {
                format!("Critical hit! You strike for {} damage.", effect.damage)
            }
            EffectSource::Warrior => format!("You strike for {} damage.", effect.damage),
            EffectSource::Monster(kind) => {
                format!("The {} hits you for {} damage.", kind.display_name(), effect.damage)
            }
        },
        GameEvent::ChestOpened { item, .. } => format!("You open a chest: {}.", item.name),
        GameEvent::ItemPickedUp { message, .. } => message.clone(),
        GameEvent::MonsterSlain { death } => match &death.loot {
            Some(item) => format!(
                "The {} is slain! (+{} xp) It dropped {}.",
                death.kind.display_name(),
                death.xp,
                item.name
            ),
            None => format!(
                "The {} is slain! (+{} xp)",
                death.kind.display_name(),
                death.xp
            ),
        },
        GameEvent::LevelUp { level, max_health } => {
            format!("Level up! You are now level {} ({} max HP).", level, max_health)
        }
        GameEvent::MapChanged { message, .. } => message.clone(),
        GameEvent::PotionUsed { health } => {
            format!("You drink a health potion. ({} HP)", health)
        }
        GameEvent::ItemBought { item, price } => {
            format!("Purchased {} for {} gold!", item.name, price)
        }
        GameEvent::ItemSold { item, price } => format!("Sold {} for {} gold!", item.name, price),
        GameEvent::WarriorDied { .. } => {
            "You have fallen. Type 'restart' to play again.".to_string()
        }
        GameEvent::TurnResolved { .. }
        | GameEvent::GameSaved { .. }
        | GameEvent::GameLoaded { .. }
        | GameEvent::GameRestarted => return None,
    };
    Some(line)
}
