// Experience and progression constants
pub const XP_CURVE_BASE: f64 = 100.0;
pub const XP_CURVE_MULTIPLIER: f64 = 1.5;
pub const LEVEL_STAT_SCALING: f64 = 0.1;

// Base stat growth per level-up
pub const LEVEL_UP_HEALTH_GROWTH: u32 = 10;
pub const LEVEL_UP_ATTACK_GROWTH: u32 = 2;
pub const LEVEL_UP_DEFENSE_GROWTH: u32 = 1;
pub const LEVEL_UP_SPEED_GROWTH: u32 = 1;

// Combat constants
pub const DAMAGE_VARIANCE_MIN: f64 = 0.8;
pub const DAMAGE_VARIANCE_MAX: f64 = 1.2;

// Enemy generation constants
pub const ENEMY_LOOT_TABLE_CHANCE: f64 = 0.3;
pub const ENEMY_LOOT_DROP_CHANCE: f64 = 0.3;

// Offline progression constants
pub const MAX_OFFLINE_SECONDS: f64 = 24.0 * 60.0 * 60.0; // 24 hours
pub const MIN_OFFLINE_SECONDS: f64 = 60.0;
pub const AVERAGE_BATTLE_SECONDS: f64 = 5.0;
pub const MAX_OFFLINE_ENEMIES: u32 = 100;

// Save system constants
pub const AUTOSAVE_INTERVAL_SECONDS: f64 = 30.0;
pub const SAVE_VERSION_MAGIC: u64 = 0x49444C4552504700; // "IDLERPG\0" in hex
pub const SAVE_SCHEMA_VERSION: &str = "1.0";
