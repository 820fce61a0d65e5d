/// Game configuration constants and tunable parameters.
///
/// Every field has a default, so a content file only needs to name the values it
/// overrides.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    /// Edge length of one tile in pixels. Only grid/pixel conversion reads it.
    pub tile_size: i32,
    pub grid_width: u32,
    pub grid_height: u32,

    pub warrior_max_health: u32,
    pub warrior_attack_damage: u32,
    pub warrior_attack_cooldown: u32,
    /// Max-health gain per level reached.
    pub hp_per_level: u32,
    /// Health restored by one health potion.
    pub potion_heal: u32,

    pub monster_attack_cooldown: u32,

    /// Map id the warrior starts on and returns to when leaving a dungeon.
    pub world_map_id: String,
    /// Map id on which chests never spawn.
    pub town_map_id: String,
}

impl GameConfig {
    // ===== compile-time constants =====
    pub const BACKPACK_CAPACITY: usize = 10;
    pub const DEFAULT_MELEE_RANGE: u32 = 1;
    /// Column offset from the spawn point used when a map authors no monsters.
    pub const FALLBACK_MONSTER_OFFSET: i32 = 5;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_TILE_SIZE: i32 = 50;
    pub const DEFAULT_GRID_WIDTH: u32 = 16;
    pub const DEFAULT_GRID_HEIGHT: u32 = 12;
    pub const DEFAULT_WARRIOR_MAX_HEALTH: u32 = 100;
    pub const DEFAULT_WARRIOR_ATTACK_DAMAGE: u32 = 15;
    pub const DEFAULT_WARRIOR_ATTACK_COOLDOWN: u32 = 1;
    pub const DEFAULT_HP_PER_LEVEL: u32 = 20;
    pub const DEFAULT_POTION_HEAL: u32 = 30;
    pub const DEFAULT_MONSTER_ATTACK_COOLDOWN: u32 = 1;
    pub const WORLD_MAP_ID: &'static str = "world";
    pub const TOWN_MAP_ID: &'static str = "town";

    pub fn new() -> Self {
        Self {
            tile_size: Self::DEFAULT_TILE_SIZE,
            grid_width: Self::DEFAULT_GRID_WIDTH,
            grid_height: Self::DEFAULT_GRID_HEIGHT,
            warrior_max_health: Self::DEFAULT_WARRIOR_MAX_HEALTH,
            warrior_attack_damage: Self::DEFAULT_WARRIOR_ATTACK_DAMAGE,
            warrior_attack_cooldown: Self::DEFAULT_WARRIOR_ATTACK_COOLDOWN,
            hp_per_level: Self::DEFAULT_HP_PER_LEVEL,
            potion_heal: Self::DEFAULT_POTION_HEAL,
            monster_attack_cooldown: Self::DEFAULT_MONSTER_ATTACK_COOLDOWN,
            world_map_id: Self::WORLD_MAP_ID.to_string(),
            town_map_id: Self::TOWN_MAP_ID.to_string(),
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}
