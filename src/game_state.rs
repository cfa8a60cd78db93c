use crate::constants::SAVE_SCHEMA_VERSION;
use crate::enemy::Enemy;
use crate::equipment::Equipment;
use crate::player::Player;
use serde::{Deserialize, Serialize};

/// Aggregate game state and the unit of persistence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub player: Player,
    pub current_enemy: Option<Enemy>,
    pub battle_state: BattleState,
    pub inventory: Vec<Equipment>,
    pub game_settings: GameSettings,
    pub last_update_time: i64,
    /// Schema version, for save migration.
    pub version: String,
}

impl GameState {
    pub fn new(current_time: i64) -> Self {
        Self {
            player: Player::new("Hero".to_string(), current_time),
            current_enemy: None,
            battle_state: BattleState::Idle,
            inventory: Vec::new(),
            game_settings: GameSettings::default(),
            last_update_time: current_time,
            version: SAVE_SCHEMA_VERSION.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BattleState {
    Idle,
    Fighting,
    Victory,
    Defeat,
    Paused,
}

/// Player-facing preferences. The engine only reads `battle_speed`; the rest
/// passes through to the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSettings {
    pub sound_enabled: bool,
    pub music_enabled: bool,
    pub notifications_enabled: bool,
    pub auto_battle_enabled: bool,
    pub battle_speed: BattleSpeed,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            sound_enabled: true,
            music_enabled: true,
            notifications_enabled: true,
            auto_battle_enabled: true,
            battle_speed: BattleSpeed::Normal,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BattleSpeed {
    Slow,
    Normal,
    Fast,
}

impl BattleSpeed {
    pub fn multiplier(&self) -> f64 {
        match self {
            BattleSpeed::Slow => 0.5,
            BattleSpeed::Normal => 1.0,
            BattleSpeed::Fast => 2.0,
        }
    }
}
