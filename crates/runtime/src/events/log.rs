use super::types::GameEvent;

/// Ordered buffer of events produced while handling one command.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Vec<GameEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Takes every buffered event, oldest first.
    pub fn drain(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &GameEvent> {
        self.events.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drain_preserves_order_and_empties() {
        let mut log = EventLog::new();
        log.push(GameEvent::GameRestarted);
        log.push(GameEvent::WarriorDied { turn: 3 });
        assert_eq!(log.len(), 2);

        let drained = log.drain();
        assert_eq!(
            drained,
            vec![GameEvent::GameRestarted, GameEvent::WarriorDied { turn: 3 }]
        );
        assert!(log.is_empty());
    }
}
