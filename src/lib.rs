//! Idle RPG - Progression & Combat Simulation Engine
//!
//! The core of an incremental idle RPG: a turn-based battle resolver, the
//! experience/leveling curve, equipment and loot generation, a bounded
//! offline-reward simulator, and the state orchestrator that ties them
//! together. Presentation, audio and networking live elsewhere; this crate
//! only simulates and persists.

pub mod battle;
pub mod constants;
pub mod enemy;
pub mod equipment;
pub mod game_manager;
pub mod game_state;
pub mod offline;
pub mod player;
pub mod progression;
pub mod rng;
pub mod save_manager;
pub mod scheduler;

pub use battle::{execute_turn, BattleEvent, TurnResult};
pub use enemy::{Enemy, EnemyKind, LootEntry};
pub use equipment::{Equipment, EquipmentSlot, Rarity};
pub use game_manager::GameManager;
pub use game_state::{BattleSpeed, BattleState, GameSettings, GameState};
pub use offline::{calculate_offline_rewards, OfflineRewards};
pub use player::Player;
pub use rng::RandomSource;
pub use save_manager::SaveManager;
pub use scheduler::{BattleEnd, BattleScheduler};
