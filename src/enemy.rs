use crate::constants::{ENEMY_LOOT_DROP_CHANCE, ENEMY_LOOT_TABLE_CHANCE};
use crate::equipment::Equipment;
use crate::rng::RandomSource;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An enemy generated for a single encounter.
///
/// Enemies are ephemeral: created when a battle starts (or inside the
/// offline simulator), discarded at battle end, and only ever persisted
/// embedded in a `GameState` while a battle is in progress. Reward fields
/// are pre-rolled at creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub id: Uuid,
    pub name: String,
    pub level: u32,
    pub max_health: u32,
    pub current_health: u32,
    pub attack: u32,
    pub defense: u32,
    pub speed: u32,
    pub experience_reward: u64,
    pub gold_reward: u64,
    pub loot_table: Vec<LootEntry>,
    pub sprite_name: String,
}

impl Enemy {
    /// Generates an enemy scaled to the player's level.
    ///
    /// The enemy level lands within [-2, +3] of the player's, floored at 1.
    /// `kind` only selects the name and sprite; elite and boss enemies share
    /// the normal stat curve.
    pub fn create_for_level(
        player_level: u32,
        kind: EnemyKind,
        rng: &mut impl RandomSource,
    ) -> Self {
        let level = (player_level as i32 + rng.range_i32(-2, 3)).max(1) as u32;
        let m = level as f64 * 0.5;

        let max_health = (50.0 + m * 20.0) as u32;
        let attack = (5.0 + m * 2.0) as u32;
        let defense = (2.0 + m) as u32;
        let speed = (5.0 + m) as u32;
        let experience_reward = (10.0 + m * 5.0) as u64;
        let gold_reward = (5.0 + m * 3.0) as u64;

        let mut loot_table = Vec::new();
        if rng.unit() < ENEMY_LOOT_TABLE_CHANCE {
            loot_table.push(LootEntry::random_equipment(level, rng));
        }

        Self {
            id: Uuid::new_v4(),
            name: kind.display_name(level),
            level,
            max_health,
            current_health: max_health,
            attack,
            defense,
            speed,
            experience_reward,
            gold_reward,
            loot_table,
            sprite_name: kind.sprite_name().to_string(),
        }
    }

    /// Applies damage and reports whether the enemy was defeated.
    pub fn take_damage(&mut self, amount: u32) -> bool {
        self.current_health = self.current_health.saturating_sub(amount);
        self.current_health == 0
    }

    pub fn is_alive(&self) -> bool {
        self.current_health > 0
    }
}

/// Enemy flavors. Stats are kind-independent; only naming and sprites differ.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnemyKind {
    Normal,
    Elite,
    Boss,
}

impl EnemyKind {
    pub fn display_name(&self, level: u32) -> String {
        match self {
            EnemyKind::Normal => format!("Goblin Lv.{}", level),
            EnemyKind::Elite => format!("Elite Orc Lv.{}", level),
            EnemyKind::Boss => format!("Boss Lv.{}", level),
        }
    }

    pub fn sprite_name(&self) -> &'static str {
        match self {
            EnemyKind::Normal => "enemy_goblin",
            EnemyKind::Elite => "enemy_orc",
            EnemyKind::Boss => "enemy_boss",
        }
    }
}

/// One row of an enemy's loot table: an optional equipment grant and/or a
/// flat gold bonus, each resolved against an independent drop chance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LootEntry {
    pub equipment: Option<Equipment>,
    pub gold: u64,
    pub drop_chance: f64,
}

impl LootEntry {
    pub fn random_equipment(level: u32, rng: &mut impl RandomSource) -> Self {
        Self {
            equipment: Some(Equipment::random(level, rng)),
            gold: 0,
            drop_chance: ENEMY_LOOT_DROP_CHANCE,
        }
    }
}
