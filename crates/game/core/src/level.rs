//! The live contents of the map the warrior is currently on.

use std::str::FromStr;
use std::sync::Arc;

use crate::config::GameConfig;
use crate::entity::Combatant;
use crate::grid::Position;
use crate::items::{Chest, GroundItem, Item};
use crate::ledger::{KilledMonster, OpenedChest, ResolutionLedger};
use crate::map::TileMap;
use crate::monster::{Bestiary, Monster, MonsterKind};
use crate::rng::RollSource;

/// Monsters, chests and dropped items on one map.
///
/// Collection order is significant: it is the order monsters act in and the
/// tie-break for nearest-target selection.
#[derive(Clone, Debug)]
pub struct Level {
    pub map_id: String,
    pub map: Arc<TileMap>,
    pub monsters: Vec<Monster>,
    pub chests: Vec<Chest>,
    pub ground_items: Vec<GroundItem>,
}

impl Level {
    /// A level with nothing on it.
    pub fn empty(map_id: impl Into<String>, map: Arc<TileMap>) -> Self {
        Self {
            map_id: map_id.into(),
            map,
            monsters: Vec::new(),
            chests: Vec::new(),
            ground_items: Vec::new(),
        }
    }

    /// Builds the level from the map's authored spawns, skipping anything the
    /// ledger marks as resolved. Ground items always start empty and the town
    /// map stays empty altogether.
    pub fn populate(
        map_id: impl Into<String>,
        map: Arc<TileMap>,
        bestiary: &Bestiary,
        ledger: &ResolutionLedger,
        config: &GameConfig,
        rolls: &mut dyn RollSource,
    ) -> Self {
        let mut level = Self::empty(map_id, map);
        if level.map_id == config.town_map_id {
            return level;
        }
        level.spawn_monsters(bestiary, ledger, config, rolls);
        level.spawn_chests(ledger, rolls);
        level
    }

    fn spawn_monsters(
        &mut self,
        bestiary: &Bestiary,
        ledger: &ResolutionLedger,
        config: &GameConfig,
        rolls: &mut dyn RollSource,
    ) {
        let spawns = self.map.spawns().monsters.clone();

        for spawn in &spawns {
            let key = KilledMonster::new(&spawn.species, spawn.position, &self.map_id);
            if ledger.was_killed(&key) {
                continue;
            }
            let kind = MonsterKind::from_str(&spawn.species)
                .unwrap_or_else(|_| random_kind(rolls));
            let monster = Monster::new(
                kind,
                spawn.position,
                &bestiary.stats(kind),
                config.monster_attack_cooldown,
            )
            .with_spawn_tag(&spawn.species);
            self.monsters.push(monster);
        }

        if spawns.is_empty() {
            let position = self
                .map
                .spawn_point()
                .offset(GameConfig::FALLBACK_MONSTER_OFFSET, 0);
            if !ledger.was_killed_at(position, &self.map_id) {
                let kind = random_kind(rolls);
                self.monsters.push(Monster::new(
                    kind,
                    position,
                    &bestiary.stats(kind),
                    config.monster_attack_cooldown,
                ));
            }
        }
    }

    fn spawn_chests(&mut self, ledger: &ResolutionLedger, rolls: &mut dyn RollSource) {
        let positions = self.map.spawns().chests.clone();
        for position in positions {
            if ledger.was_opened(&OpenedChest::new(position, &self.map_id)) {
                continue;
            }
            self.chests.push(Chest::with_random_item(position, rolls));
        }
    }

    /// Index of the closest living monster. Ties go to the earlier monster.
    pub fn nearest_alive_monster(&self, from: Position) -> Option<usize> {
        let mut nearest: Option<(usize, u32)> = None;
        for (index, monster) in self.monsters.iter().enumerate() {
            if !monster.is_alive() {
                continue;
            }
            let distance = from.manhattan_distance(monster.position());
            if nearest.is_none_or(|(_, best)| distance < best) {
                nearest = Some((index, distance));
            }
        }
        nearest.map(|(index, _)| index)
    }

    pub fn alive_monsters(&self) -> impl Iterator<Item = &Monster> {
        self.monsters.iter().filter(|monster| monster.is_alive())
    }

    /// Index of the unopened chest at `position`.
    pub fn chest_at(&self, position: Position) -> Option<usize> {
        self.chests
            .iter()
            .position(|chest| chest.position == position && !chest.is_opened())
    }

    pub fn ground_items_at(&self, position: Position) -> impl Iterator<Item = &GroundItem> {
        self.ground_items
            .iter()
            .filter(move |ground| ground.position == position)
    }

    pub fn drop_item(&mut self, item: Item, position: Position) {
        self.ground_items.push(GroundItem::new(item, position));
    }
}

fn random_kind(rolls: &mut dyn RollSource) -> MonsterKind {
    MonsterKind::ALL[rolls.pick(MonsterKind::ALL.len())]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::MapDimensions;
    use crate::map::{MapSpawns, MonsterSpawn};
    use crate::rng::FixedRolls;
    use crate::terrain::TerrainLegend;

    fn map_with(spawns: MapSpawns) -> Arc<TileMap> {
        let rows = vec![".".repeat(16); 12];
        Arc::new(
            TileMap::new(
                "world",
                MapDimensions::new(16, 12),
                &rows,
                TerrainLegend::standard(),
                Position::new(2, 2),
            )
            .unwrap()
            .with_spawns(spawns),
        )
    }

    fn spawn(species: &str, x: i32, y: i32) -> MonsterSpawn {
        MonsterSpawn {
            species: species.into(),
            position: Position::new(x, y),
        }
    }

    fn populate(map: Arc<TileMap>, map_id: &str, ledger: &ResolutionLedger) -> Level {
        Level::populate(
            map_id,
            map,
            &Bestiary::standard(),
            ledger,
            &GameConfig::default(),
            &mut FixedRolls::constant(0.0),
        )
    }

    #[test]
    fn killed_spawns_stay_dead() {
        let map = map_with(MapSpawns {
            monsters: vec![spawn("pooka", 6, 5), spawn("selkie", 9, 9)],
            ..MapSpawns::default()
        });
        let mut ledger = ResolutionLedger::new();
        ledger.record_kill(KilledMonster::new("pooka", Position::new(6, 5), "world"));

        let level = populate(map.clone(), "world", &ledger);
        assert_eq!(level.monsters.len(), 1);
        assert_eq!(level.monsters[0].kind(), MonsterKind::Selkie);

        let elsewhere = populate(map, "cave", &ledger);
        assert_eq!(elsewhere.monsters.len(), 2);
    }

    #[test]
    fn unknown_species_resolves_randomly_but_keeps_tag() {
        let map = map_with(MapSpawns {
            monsters: vec![spawn("goblin", 4, 4)],
            ..MapSpawns::default()
        });
        let level = populate(map, "world", &ResolutionLedger::new());
        assert_eq!(level.monsters[0].kind(), MonsterKind::Banshee);
        assert_eq!(level.monsters[0].origin().tag, "goblin");
    }

    #[test]
    fn empty_map_gets_fallback_monster() {
        let map = map_with(MapSpawns::default());
        let level = populate(map.clone(), "world", &ResolutionLedger::new());
        assert_eq!(level.monsters.len(), 1);
        assert_eq!(level.monsters[0].position(), Position::new(7, 2));

        let mut ledger = ResolutionLedger::new();
        ledger.record_kill(KilledMonster::new("cat_si", Position::new(7, 2), "world"));
        assert!(populate(map, "world", &ledger).monsters.is_empty());
    }

    #[test]
    fn chests_skip_opened_and_town_stays_empty() {
        let map = map_with(MapSpawns {
            monsters: vec![spawn("pooka", 6, 5)],
            chests: vec![Position::new(3, 3), Position::new(4, 4)],
            ..MapSpawns::default()
        });
        let mut ledger = ResolutionLedger::new();
        ledger.record_opened(OpenedChest::new(Position::new(3, 3), "world"));

        let level = populate(map.clone(), "world", &ledger);
        assert_eq!(level.chests.len(), 1);
        assert_eq!(level.chest_at(Position::new(4, 4)), Some(0));
        assert!(level.ground_items.is_empty());

        let town = populate(map, "town", &ResolutionLedger::new());
        assert!(town.chests.is_empty());
        assert!(town.monsters.is_empty());

        let bare_town = populate(map_with(MapSpawns::default()), "town", &ResolutionLedger::new());
        assert!(bare_town.monsters.is_empty());
    }

    #[test]
    fn nearest_prefers_first_on_ties_and_skips_dead() {
        let map = map_with(MapSpawns {
            monsters: vec![
                spawn("pooka", 5, 3),
                spawn("selkie", 3, 5),
                spawn("merrow", 4, 4),
            ],
            ..MapSpawns::default()
        });
        let mut level = populate(map, "world", &ResolutionLedger::new());
        let from = Position::new(4, 4);
        assert_eq!(level.nearest_alive_monster(from), Some(2));

        level.monsters[2].entity_mut().take_damage(1000);
        assert_eq!(level.nearest_alive_monster(from), Some(0));
        assert_eq!(level.alive_monsters().count(), 2);
    }
}
