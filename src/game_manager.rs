use crate::battle::BattleEvent;
use crate::constants::AUTOSAVE_INTERVAL_SECONDS;
use crate::enemy::{Enemy, EnemyKind};
use crate::equipment::{Equipment, EquipmentSlot};
use crate::game_state::{BattleState, GameSettings, GameState};
use crate::offline::{calculate_offline_rewards, OfflineRewards};
use crate::player::Player;
use crate::progression;
use crate::rng::RandomSource;
use crate::save_manager::SaveManager;
use crate::scheduler::{BattleEnd, BattleScheduler};
use chrono::Utc;
use uuid::Uuid;

/// Central owner of the game state.
///
/// Every mutation (battle ticks, offline application, equipment changes,
/// settings) goes through this type, so the single `GameState` value is
/// never touched concurrently. The battle scheduler and the autosave timer
/// are both driven from [`GameManager::advance`] on the caller's loop.
pub struct GameManager {
    state: GameState,
    scheduler: BattleScheduler,
    save_manager: SaveManager,
    pending_offline_rewards: Option<OfflineRewards>,
    autosave_timer: f64,
    play_time_accumulator: f64,
}

impl GameManager {
    /// Loads the persisted state, or starts fresh when none exists.
    ///
    /// A malformed save is treated identically to a missing one: it is
    /// logged and replaced with a fresh state. When the loaded state is
    /// idle, offline rewards are computed and staged for confirmation;
    /// they are never applied automatically.
    pub fn new(save_manager: SaveManager, now: i64, rng: &mut impl RandomSource) -> Self {
        let state = match save_manager.load() {
            Ok(state) => state,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => GameState::new(now),
            Err(err) => {
                log::warn!("discarding unreadable save: {}", err);
                GameState::new(now)
            }
        };

        let mut manager = Self {
            state,
            scheduler: BattleScheduler::new(),
            save_manager,
            pending_offline_rewards: None,
            autosave_timer: 0.0,
            play_time_accumulator: 0.0,
        };

        match manager.state.battle_state {
            BattleState::Idle => {
                let rewards = calculate_offline_rewards(
                    &manager.state.player,
                    manager.state.player.last_save_time,
                    now,
                    rng,
                );
                if rewards.is_meaningful() {
                    manager.pending_offline_rewards = Some(rewards);
                }
            }
            // A save taken mid-battle resumes ticking at the saved speed
            BattleState::Fighting => {
                manager
                    .scheduler
                    .start(manager.state.game_settings.battle_speed);
            }
            BattleState::Paused => {
                manager
                    .scheduler
                    .start(manager.state.game_settings.battle_speed);
                manager.scheduler.pause();
            }
            BattleState::Victory | BattleState::Defeat => {}
        }

        manager
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn player(&self) -> &Player {
        &self.state.player
    }

    pub fn battle_log(&self) -> &[BattleEvent] {
        self.scheduler.log()
    }

    pub fn pending_offline_rewards(&self) -> Option<&OfflineRewards> {
        self.pending_offline_rewards.as_ref()
    }

    /// Applies the staged offline rewards and persists. No-op when nothing
    /// is staged.
    pub fn apply_offline_rewards(&mut self) -> bool {
        let Some(rewards) = self.pending_offline_rewards.take() else {
            return false;
        };

        progression::add_experience(&mut self.state.player, rewards.experience_gained);
        self.state.player.gold += rewards.gold_gained;
        self.state.inventory.extend(rewards.loot_obtained);

        self.save();
        true
    }

    /// Generates an enemy and begins auto-battle. No-op unless idle.
    pub fn start_battle(&mut self, rng: &mut impl RandomSource) -> bool {
        if self.state.battle_state != BattleState::Idle {
            return false;
        }

        let enemy = Enemy::create_for_level(self.state.player.level, EnemyKind::Normal, rng);
        self.state.current_enemy = Some(enemy);
        self.state.battle_state = BattleState::Fighting;
        self.scheduler.start(self.state.game_settings.battle_speed);

        self.save();
        true
    }

    pub fn pause_battle(&mut self) -> bool {
        if self.state.battle_state != BattleState::Fighting {
            return false;
        }
        self.scheduler.pause();
        self.state.battle_state = BattleState::Paused;
        true
    }

    pub fn resume_battle(&mut self) -> bool {
        if self.state.battle_state != BattleState::Paused {
            return false;
        }
        self.scheduler.resume();
        self.state.battle_state = BattleState::Fighting;
        true
    }

    /// Cancels any running battle and discards the enemy. Safe to call in
    /// any state, any number of times.
    pub fn stop_battle(&mut self) {
        self.scheduler.stop();
        if matches!(
            self.state.battle_state,
            BattleState::Fighting | BattleState::Paused
        ) {
            self.state.battle_state = BattleState::Idle;
            self.state.current_enemy = None;
        }
    }

    /// Advances the game clock: battle ticks while fighting, play-time
    /// accounting, and the independent autosave timer.
    pub fn advance(&mut self, delta_seconds: f64, rng: &mut impl RandomSource) {
        let mut battle_end = None;
        if self.state.battle_state == BattleState::Fighting {
            let GameState {
                player,
                current_enemy,
                ..
            } = &mut self.state;
            if let Some(enemy) = current_enemy.as_mut() {
                battle_end = self.scheduler.advance(player, enemy, delta_seconds, rng);
            }
        }

        match battle_end {
            Some(BattleEnd::Victory) => self.handle_victory(rng),
            Some(BattleEnd::Defeat) => self.handle_defeat(),
            None => {}
        }

        self.play_time_accumulator += delta_seconds;
        while self.play_time_accumulator >= 1.0 {
            self.play_time_accumulator -= 1.0;
            self.state.player.play_time_seconds += 1;
        }

        self.autosave_timer += delta_seconds;
        if self.autosave_timer >= AUTOSAVE_INTERVAL_SECONDS {
            self.autosave_timer = 0.0;
            self.save();
        }
    }

    /// Applies victory rewards, banks dropped loot, and returns to idle.
    pub fn handle_victory(&mut self, rng: &mut impl RandomSource) {
        let Some(enemy) = self.state.current_enemy.take() else {
            return;
        };

        let events = progression::apply_victory_rewards(&mut self.state.player, &enemy, rng);
        for event in &events {
            if let BattleEvent::LootObtained {
                equipment: Some(equipment),
                ..
            } = event
            {
                self.state.inventory.push(equipment.clone());
            }
        }
        self.scheduler.push_events(events);

        self.state.battle_state = BattleState::Idle;
        self.save();
    }

    /// Records the defeat and applies the half-health penalty.
    pub fn handle_defeat(&mut self) {
        self.state.battle_state = BattleState::Defeat;
        self.state.current_enemy = None;
        self.state.player.current_health = self.state.player.max_health / 2;
        self.save();
    }

    /// Returns from the defeat screen to idle so a new battle can start.
    pub fn acknowledge_defeat(&mut self) -> bool {
        if self.state.battle_state != BattleState::Defeat {
            return false;
        }
        self.state.battle_state = BattleState::Idle;
        true
    }

    /// Equips an inventory item by id, returning any displaced item of the
    /// same slot to the inventory. No-op when the item is not in the
    /// inventory.
    pub fn equip_item(&mut self, item_id: Uuid) -> bool {
        let Some(position) = self
            .state
            .inventory
            .iter()
            .position(|item| item.id == item_id)
        else {
            return false;
        };
        let item = self.state.inventory.remove(position);

        let displaced = match item.slot {
            EquipmentSlot::Weapon => self.state.player.equipped_weapon.take(),
            EquipmentSlot::Armor => self.state.player.equipped_armor.take(),
        };
        if let Some(displaced) = displaced {
            self.state.inventory.push(displaced);
        }

        self.state.player.equip(item);
        self.save();
        true
    }

    /// Moves an equipped item back to the inventory. No-op on an empty slot.
    pub fn unequip_item(&mut self, slot: EquipmentSlot) -> bool {
        let Some(item) = self.state.player.unequip(slot) else {
            return false;
        };
        self.state.inventory.push(item);
        self.save();
        true
    }

    /// Buys an item into the inventory. No-op when gold is short.
    pub fn purchase_equipment(&mut self, equipment: Equipment) -> bool {
        if !progression::purchase_equipment(&mut self.state.player, &equipment) {
            return false;
        }
        self.state.inventory.push(equipment);
        self.save();
        true
    }

    pub fn update_settings(&mut self, settings: GameSettings) {
        self.state.game_settings = settings;
        self.save();
    }

    /// Persists the current state. Failures are logged and the in-memory
    /// state stays authoritative.
    pub fn save(&mut self) {
        let now = Utc::now().timestamp();
        if let Err(err) = self.save_manager.save(&mut self.state, now) {
            log::warn!("save failed, continuing with in-memory state: {}", err);
        }
    }
}
