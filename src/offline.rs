use crate::constants::{
    AVERAGE_BATTLE_SECONDS, MAX_OFFLINE_ENEMIES, MAX_OFFLINE_SECONDS, MIN_OFFLINE_SECONDS,
};
use crate::enemy::{Enemy, EnemyKind};
use crate::equipment::Equipment;
use crate::player::Player;
use crate::rng::RandomSource;

/// Rewards accumulated while the game was closed.
///
/// Transient: computed once at startup, staged for player confirmation, then
/// consumed by the orchestrator and discarded. Never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct OfflineRewards {
    /// True elapsed time in seconds, uncapped, for display.
    pub time_away_seconds: f64,
    pub enemies_defeated: u32,
    pub experience_gained: u64,
    pub gold_gained: u64,
    pub loot_obtained: Vec<Equipment>,
}

impl OfflineRewards {
    fn none(time_away_seconds: f64) -> Self {
        Self {
            time_away_seconds,
            enemies_defeated: 0,
            experience_gained: 0,
            gold_gained: 0,
            loot_obtained: Vec::new(),
        }
    }

    /// Whether there is anything worth showing and applying.
    pub fn is_meaningful(&self) -> bool {
        self.experience_gained > 0 || self.gold_gained > 0 || !self.loot_obtained.is_empty()
    }

    /// "3h 25m" for display, or just "25m" under an hour.
    pub fn formatted_time_away(&self) -> String {
        let total = self.time_away_seconds.max(0.0) as u64;
        let hours = total / 3600;
        let minutes = (total % 3600) / 60;

        if hours > 0 {
            format!("{}h {}m", hours, minutes)
        } else {
            format!("{}m", minutes)
        }
    }
}

/// Bulk-simulates battles for the time elapsed since the last save.
///
/// Elapsed time is capped at 24 hours and converted into a battle count
/// bounded by `MAX_OFFLINE_ENEMIES`; under a minute of absence earns
/// nothing. Each battle generates a fresh enemy from the same player
/// snapshot and resolves to a single win-probability roll instead of a full
/// turn replay; losses simply accrue nothing. Does not mutate the player;
/// applying the result is the orchestrator's job.
pub fn calculate_offline_rewards(
    player: &Player,
    last_save_time: i64,
    now: i64,
    rng: &mut impl RandomSource,
) -> OfflineRewards {
    let time_away = (now - last_save_time) as f64;
    let capped_time = time_away.min(MAX_OFFLINE_SECONDS);

    if capped_time <= MIN_OFFLINE_SECONDS {
        return OfflineRewards::none(time_away);
    }

    let estimated_battles = (capped_time / AVERAGE_BATTLE_SECONDS) as u32;
    let battles_to_process = estimated_battles.min(MAX_OFFLINE_ENEMIES);

    let mut experience_gained = 0u64;
    let mut gold_gained = 0u64;
    let mut loot_obtained = Vec::new();

    for _ in 0..battles_to_process {
        let enemy = Enemy::create_for_level(player.level, EnemyKind::Normal, rng);

        if rng.unit() < win_chance(player, &enemy) {
            experience_gained += enemy.experience_reward;
            gold_gained += enemy.gold_reward;

            for entry in &enemy.loot_table {
                if rng.unit() < entry.drop_chance {
                    if let Some(equipment) = &entry.equipment {
                        loot_obtained.push(equipment.clone());
                    }
                }
            }
        }
    }

    OfflineRewards {
        time_away_seconds: time_away,
        enemies_defeated: battles_to_process,
        experience_gained,
        gold_gained,
        loot_obtained,
    }
}

/// Win probability from relative power; an all-zero matchup is a coin flip.
fn win_chance(player: &Player, enemy: &Enemy) -> f64 {
    let player_power = (player.attack + player.defense + player.max_health / 10) as f64;
    let enemy_power = (enemy.attack + enemy.defense + enemy.max_health / 10) as f64;

    let total_power = player_power + enemy_power;
    if total_power == 0.0 {
        return 0.5;
    }

    player_power / total_power
}
