//! Per-species constants and the table that holds them.

use std::collections::HashMap;

use strum::IntoEnumIterator;

use super::MonsterKind;

/// Constant stat block shared by every monster of one species.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MonsterStats {
    pub health: u32,
    pub attack_damage: u32,
    pub speed: u32,
    /// Awareness radius; beyond it the monster idles.
    pub chase_range: u32,
    pub attack_range: u32,
    /// XP awarded to the warrior for the kill.
    pub xp_value: u32,
    pub description: String,
}

impl MonsterStats {
    /// Built-in stat block for a species. XP defaults to half the health.
    pub fn standard(kind: MonsterKind) -> Self {
        let (health, attack_damage, speed, chase_range, attack_range, description) = match kind {
            MonsterKind::Banshee => (60, 12, 1, 6, 2, "Ghostly spirit - fast, ranged attacks"),
            MonsterKind::Leprechaun => (40, 8, 2, 4, 1, "Mischievous fairy - weak but very fast"),
            MonsterKind::Pooka => (100, 15, 1, 7, 1, "Shape-shifter - high health, relentless pursuit"),
            MonsterKind::Selkie => (70, 10, 1, 5, 1, "Seal-human hybrid - balanced stats"),
            MonsterKind::Dullahan => (120, 20, 1, 8, 1, "Headless rider - very powerful, deadly"),
            MonsterKind::Changeling => (50, 14, 1, 4, 1, "Fairy child - deceptively dangerous"),
            MonsterKind::Clurichaun => (45, 9, 1, 3, 1, "Drunken fairy - weak but unpredictable"),
            MonsterKind::Merrow => (75, 11, 1, 5, 1, "Sea being - moderate threat"),
            MonsterKind::FearGorta => (55, 13, 1, 6, 1, "Hunger spirit - drains vitality"),
            MonsterKind::CatSi => (65, 16, 2, 5, 1, "Fairy cat - fast and deadly"),
        };
        Self {
            health,
            attack_damage,
            speed,
            chase_range,
            attack_range,
            xp_value: health / 2,
            description: description.to_string(),
        }
    }
}

/// Stat blocks for every species. Content files may override entries.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Bestiary {
    stats: HashMap<MonsterKind, MonsterStats>,
}

impl Bestiary {
    pub fn standard() -> Self {
        Self {
            stats: MonsterKind::iter()
                .map(|kind| (kind, MonsterStats::standard(kind)))
                .collect(),
        }
    }

    /// Replaces the stat block for one species.
    pub fn set(&mut self, kind: MonsterKind, stats: MonsterStats) {
        self.stats.insert(kind, stats);
    }

    pub fn stats(&self, kind: MonsterKind) -> MonsterStats {
        self.stats
            .get(&kind)
            .cloned()
            .unwrap_or_else(|| MonsterStats::standard(kind))
    }
}

impl Default for Bestiary {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn banshee_strikes_from_two_tiles() {
        let stats = MonsterStats::standard(MonsterKind::Banshee);
        assert_eq!(stats.health, 60);
        assert_eq!(stats.attack_range, 2);
        assert_eq!(stats.chase_range, 6);
        assert_eq!(stats.xp_value, 30);
    }

    #[test]
    fn every_species_has_an_entry() {
        let bestiary = Bestiary::standard();
        for kind in MonsterKind::iter() {
            let stats = bestiary.stats(kind);
            assert!(stats.health > 0, "{kind} has no health");
            assert!(stats.attack_range <= stats.chase_range);
        }
    }

    #[test]
    fn overrides_replace_single_species() {
        let mut bestiary = Bestiary::standard();
        let mut weak = MonsterStats::standard(MonsterKind::Pooka);
        weak.health = 1;
        bestiary.set(MonsterKind::Pooka, weak);
        assert_eq!(bestiary.stats(MonsterKind::Pooka).health, 1);
        assert_eq!(bestiary.stats(MonsterKind::Selkie).health, 70);
    }
}
