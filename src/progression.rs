use crate::battle::BattleEvent;
use crate::constants::{
    DAMAGE_VARIANCE_MAX, DAMAGE_VARIANCE_MIN, LEVEL_UP_ATTACK_GROWTH, LEVEL_UP_DEFENSE_GROWTH,
    LEVEL_UP_HEALTH_GROWTH, LEVEL_UP_SPEED_GROWTH, XP_CURVE_BASE, XP_CURVE_MULTIPLIER,
};
use crate::enemy::Enemy;
use crate::equipment::Equipment;
use crate::player::Player;
use crate::rng::RandomSource;

/// Total cumulative experience required to reach `level` from level 1.
///
/// Explicit summation of `floor(100 * 1.5^(lvl-2))` for each level step;
/// every term is floored independently before the sum, so this cannot be
/// replaced by the closed-form geometric series without changing results.
pub fn experience_for_level(level: u32) -> u64 {
    if level <= 1 {
        return 0;
    }

    let mut total = 0u64;
    for lvl in 2..=level {
        total += (XP_CURVE_BASE * XP_CURVE_MULTIPLIER.powi(lvl as i32 - 2)) as u64;
    }
    total
}

/// Adds experience to the player and processes any level-ups.
///
/// The threshold loop can fire several times for a single large grant.
/// Each level-up grows base stats by fixed deltas; if at least one fired,
/// effective stats are recomputed and health is fully restored.
/// Returns whether the player leveled up.
pub fn add_experience(player: &mut Player, amount: u64) -> bool {
    player.experience += amount;

    let mut leveled_up = false;
    while player.experience >= player.experience_to_next_level {
        player.experience -= player.experience_to_next_level;
        player.level += 1;
        player.experience_to_next_level = experience_for_level(player.level + 1);
        leveled_up = true;

        player.base_health += LEVEL_UP_HEALTH_GROWTH;
        player.base_attack += LEVEL_UP_ATTACK_GROWTH;
        player.base_defense += LEVEL_UP_DEFENSE_GROWTH;
        player.base_speed += LEVEL_UP_SPEED_GROWTH;
    }

    if leveled_up {
        player.recalculate_stats();
        player.current_health = player.max_health;
    }

    leveled_up
}

/// Computes the damage of a single attack. Never returns zero.
pub fn calculate_damage(attack: u32, defense: u32, rng: &mut impl RandomSource) -> u32 {
    let mitigated = attack.saturating_sub(defense).max(1);
    let variance = rng.range_f64(DAMAGE_VARIANCE_MIN, DAMAGE_VARIANCE_MAX);
    ((mitigated as f64 * variance) as u32).max(1)
}

/// Which combatant's attack resolves first within a single turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnOrder {
    PlayerFirst,
    EnemyFirst,
}

/// Higher speed acts first; an exact tie is broken by a fair coin flip.
pub fn determine_turn_order(
    player_speed: u32,
    enemy_speed: u32,
    rng: &mut impl RandomSource,
) -> TurnOrder {
    if player_speed > enemy_speed {
        TurnOrder::PlayerFirst
    } else if enemy_speed > player_speed {
        TurnOrder::EnemyFirst
    } else if rng.coin_flip() {
        TurnOrder::PlayerFirst
    } else {
        TurnOrder::EnemyFirst
    }
}

/// Gold for defeating an enemy of the given level.
///
/// Used by systems that compute rewards without a materialized enemy;
/// enemy instances carry their own pre-rolled `gold_reward`.
pub fn gold_reward(enemy_level: u32, rng: &mut impl RandomSource) -> u64 {
    5 + enemy_level as u64 * 3 + rng.range_i32(0, 5) as u64
}

/// Experience for defeating an enemy, with a bonus for fighting above the
/// player's level. See `gold_reward` for when this path applies.
pub fn experience_reward(enemy_level: u32, player_level: u32) -> u64 {
    let difficulty_bonus = (enemy_level as i64 - player_level as i64).max(0) as u64 * 10;
    10 + enemy_level as u64 * 5 + difficulty_bonus
}

/// Applies a defeated enemy's rewards to the player.
///
/// Grants the enemy's pre-rolled experience and gold, then rolls every loot
/// entry independently against its drop chance. Granted equipment is emitted
/// as events; moving it into the inventory is the caller's job.
pub fn apply_victory_rewards(
    player: &mut Player,
    enemy: &Enemy,
    rng: &mut impl RandomSource,
) -> Vec<BattleEvent> {
    let mut events = Vec::new();

    if add_experience(player, enemy.experience_reward) {
        events.push(BattleEvent::PlayerLevelUp {
            new_level: player.level,
        });
    }

    player.gold += enemy.gold_reward;

    for entry in &enemy.loot_table {
        if rng.unit() < entry.drop_chance {
            if let Some(equipment) = &entry.equipment {
                events.push(BattleEvent::LootObtained {
                    equipment: Some(equipment.clone()),
                    gold: 0,
                });
            }
            if entry.gold > 0 {
                player.gold += entry.gold;
                events.push(BattleEvent::LootObtained {
                    equipment: None,
                    gold: entry.gold,
                });
            }
        }
    }

    events
}

pub fn can_afford(player: &Player, equipment: &Equipment) -> bool {
    player.gold >= equipment.gold_cost
}

/// Deducts the purchase price. Returns false (and deducts nothing) when the
/// player cannot afford the item.
pub fn purchase_equipment(player: &mut Player, equipment: &Equipment) -> bool {
    if !can_afford(player, equipment) {
        return false;
    }

    player.gold -= equipment.gold_cost;
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enemy::{EnemyKind, LootEntry};
    use crate::rng::fixed::FixedRandom;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_experience_for_level_values() {
        assert_eq!(experience_for_level(1), 0);
        assert_eq!(experience_for_level(2), 100);
        assert_eq!(experience_for_level(3), 250);
        assert_eq!(experience_for_level(4), 475);
        // 475 + floor(100 * 1.5^3 = 337.5) = 812
        assert_eq!(experience_for_level(5), 812);
    }

    #[test]
    fn test_experience_curve_strictly_increasing() {
        for level in 1..60 {
            assert!(
                experience_for_level(level + 1) > experience_for_level(level),
                "threshold must grow at level {}",
                level
            );
        }
    }

    #[test]
    fn test_add_experience_no_levelup() {
        let mut player = Player::new("Hero".to_string(), 0);
        assert!(!add_experience(&mut player, 50));
        assert_eq!(player.level, 1);
        assert_eq!(player.experience, 50);
    }

    #[test]
    fn test_add_experience_single_levelup() {
        let mut player = Player::new("Hero".to_string(), 0);
        assert!(add_experience(&mut player, 120));

        assert_eq!(player.level, 2);
        assert_eq!(player.experience, 20);
        assert_eq!(player.experience_to_next_level, experience_for_level(3));
        // Base stats grew by the fixed deltas
        assert_eq!(player.base_health, 110);
        assert_eq!(player.base_attack, 12);
        assert_eq!(player.base_defense, 6);
        assert_eq!(player.base_speed, 11);
        // Level-up fully restores health
        assert_eq!(player.current_health, player.max_health);
    }

    #[test]
    fn test_add_experience_multi_level_jump() {
        let mut player = Player::new("Hero".to_string(), 0);
        // 100 consumes level 2, 250 consumes level 3, 30 left over
        assert!(add_experience(&mut player, 380));

        assert_eq!(player.level, 3);
        assert_eq!(player.experience, 30);
        assert_eq!(player.base_health, 120);
    }

    #[test]
    fn test_add_experience_resimulation_is_identical() {
        let mut a = Player::new("Hero".to_string(), 0);
        let mut b = a.clone();

        add_experience(&mut a, 812);
        add_experience(&mut b, 812);

        assert_eq!(a, b);
        assert_eq!(a.level, b.level);
        assert_eq!(a.max_health, b.max_health);
    }

    #[test]
    fn test_calculate_damage_never_zero() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        for (attack, defense) in [(0, 0), (1, 100), (5, 5), (10, 3), (100, 0)] {
            for _ in 0..50 {
                assert!(calculate_damage(attack, defense, &mut rng) >= 1);
            }
        }
    }

    #[test]
    fn test_calculate_damage_pinned_variance() {
        let mut rng = FixedRandom::neutral();
        assert_eq!(calculate_damage(10, 3, &mut rng), 7);
        assert_eq!(calculate_damage(8, 5, &mut rng), 3);
        // Fully mitigated attacks still land for 1
        assert_eq!(calculate_damage(2, 50, &mut rng), 1);
    }

    #[test]
    fn test_calculate_damage_variance_bounds() {
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        for _ in 0..500 {
            let damage = calculate_damage(100, 0, &mut rng);
            assert!((80..=120).contains(&damage));
        }
    }

    #[test]
    fn test_turn_order_by_speed() {
        let mut rng = FixedRandom::neutral();
        assert_eq!(determine_turn_order(10, 5, &mut rng), TurnOrder::PlayerFirst);
        assert_eq!(determine_turn_order(5, 10, &mut rng), TurnOrder::EnemyFirst);
    }

    #[test]
    fn test_turn_order_tie_uses_coin() {
        let mut player_first = FixedRandom::neutral();
        assert_eq!(
            determine_turn_order(7, 7, &mut player_first),
            TurnOrder::PlayerFirst
        );

        let mut enemy_first = FixedRandom {
            coin: false,
            ..FixedRandom::neutral()
        };
        assert_eq!(
            determine_turn_order(7, 7, &mut enemy_first),
            TurnOrder::EnemyFirst
        );
    }

    #[test]
    fn test_gold_reward_formula() {
        let mut rng = FixedRandom {
            int: 4,
            ..FixedRandom::neutral()
        };
        assert_eq!(gold_reward(6, &mut rng), 5 + 18 + 4);
    }

    #[test]
    fn test_experience_reward_formula() {
        // No bonus at or below player level
        assert_eq!(experience_reward(4, 4), 30);
        assert_eq!(experience_reward(3, 10), 25);
        // +10 per level above the player
        assert_eq!(experience_reward(6, 4), 10 + 30 + 20);
    }

    #[test]
    fn test_apply_victory_rewards_grants_xp_and_gold() {
        let mut player = Player::new("Hero".to_string(), 0);
        let mut rng = FixedRandom::neutral();
        let enemy = Enemy::create_for_level(1, EnemyKind::Normal, &mut rng);

        let events = apply_victory_rewards(&mut player, &enemy, &mut rng);

        assert_eq!(player.experience, enemy.experience_reward);
        assert_eq!(player.gold, enemy.gold_reward);
        assert!(events.is_empty());
    }

    #[test]
    fn test_apply_victory_rewards_emits_level_up() {
        let mut player = Player::new("Hero".to_string(), 0);
        player.experience = 99;

        let mut rng = FixedRandom::neutral();
        let enemy = Enemy::create_for_level(1, EnemyKind::Normal, &mut rng);
        let events = apply_victory_rewards(&mut player, &enemy, &mut rng);

        assert!(events
            .iter()
            .any(|e| matches!(e, BattleEvent::PlayerLevelUp { new_level: 2 })));
    }

    #[test]
    fn test_apply_victory_rewards_loot_roll() {
        let mut player = Player::new("Hero".to_string(), 0);
        let mut gen = FixedRandom {
            unit: 0.1,
            ..FixedRandom::neutral()
        };
        let mut enemy = Enemy::create_for_level(5, EnemyKind::Normal, &mut gen);
        enemy.loot_table.push(LootEntry {
            equipment: None,
            gold: 25,
            drop_chance: 0.5,
        });

        // unit 0.1 is under every drop chance: both entries resolve
        let mut rng = FixedRandom {
            unit: 0.1,
            ..FixedRandom::neutral()
        };
        let gold_before = player.gold + enemy.gold_reward;
        let events = apply_victory_rewards(&mut player, &enemy, &mut rng);

        let equipment_drops = events
            .iter()
            .filter(|e| matches!(e, BattleEvent::LootObtained { equipment: Some(_), .. }))
            .count();
        assert_eq!(equipment_drops, 1);
        assert_eq!(player.gold, gold_before + 25);

        // unit 0.9 is over every drop chance: nothing resolves
        let mut player = Player::new("Hero".to_string(), 0);
        let mut rng = FixedRandom {
            unit: 0.9,
            ..FixedRandom::neutral()
        };
        let events = apply_victory_rewards(&mut player, &enemy, &mut rng);
        assert!(events.is_empty());
        assert_eq!(player.gold, enemy.gold_reward);
    }

    #[test]
    fn test_purchase_equipment_gold_gate() {
        let mut rng = FixedRandom {
            unit: 0.01,
            ..FixedRandom::neutral()
        };
        let item = Equipment::random(10, &mut rng);
        assert!(item.gold_cost > 0);

        let mut player = Player::new("Hero".to_string(), 0);
        assert!(!can_afford(&player, &item));
        assert!(!purchase_equipment(&mut player, &item));
        assert_eq!(player.gold, 0);

        player.gold = item.gold_cost;
        assert!(purchase_equipment(&mut player, &item));
        assert_eq!(player.gold, 0);
    }
}
