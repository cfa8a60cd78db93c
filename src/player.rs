use crate::constants::LEVEL_STAT_SCALING;
use crate::equipment::{Equipment, EquipmentSlot};
use crate::progression;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The player character: level, experience, stats, equipment and currency.
///
/// `max_health`, `attack`, `defense` and `speed` are effective stats, always
/// recomputed from (level, equipped items) via [`Player::recalculate_stats`].
/// The only independently-mutated piece of combat state is `current_health`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: Uuid,
    pub name: String,
    pub level: u32,
    pub experience: u64,
    pub experience_to_next_level: u64,

    // Base stats, grown by fixed deltas on level-up
    pub base_health: u32,
    pub base_attack: u32,
    pub base_defense: u32,
    pub base_speed: u32,

    // Effective stats
    pub current_health: u32,
    pub max_health: u32,
    pub attack: u32,
    pub defense: u32,
    pub speed: u32,

    pub gold: u64,

    pub equipped_weapon: Option<Equipment>,
    pub equipped_armor: Option<Equipment>,

    pub last_save_time: i64,
    pub play_time_seconds: u64,
}

impl Player {
    /// Creates a fresh level-1 character with default base stats.
    pub fn new(name: String, current_time: i64) -> Self {
        let base_health = 100;
        let base_attack = 10;
        let base_defense = 5;
        let base_speed = 10;

        Self {
            id: Uuid::new_v4(),
            name,
            level: 1,
            experience: 0,
            experience_to_next_level: progression::experience_for_level(2),
            base_health,
            base_attack,
            base_defense,
            base_speed,
            current_health: base_health,
            max_health: base_health,
            attack: base_attack,
            defense: base_defense,
            speed: base_speed,
            gold: 0,
            equipped_weapon: None,
            equipped_armor: None,
            last_save_time: current_time,
            play_time_seconds: 0,
        }
    }

    /// Recomputes effective stats from level and equipped items.
    ///
    /// Must be called after any level change or equip/unequip. The weapon
    /// contributes attack and health, the armor defense and health; speed
    /// takes no equipment bonus.
    pub fn recalculate_stats(&mut self) {
        let level_multiplier = 1.0 + (self.level - 1) as f64 * LEVEL_STAT_SCALING;

        let scaled_health = (self.base_health as f64 * level_multiplier) as u32;
        let scaled_attack = (self.base_attack as f64 * level_multiplier) as u32;
        let scaled_defense = (self.base_defense as f64 * level_multiplier) as u32;
        let scaled_speed = (self.base_speed as f64 * level_multiplier) as u32;

        let mut attack_bonus = 0;
        let mut defense_bonus = 0;
        let mut health_bonus = 0;

        if let Some(weapon) = &self.equipped_weapon {
            attack_bonus += weapon.attack_bonus;
            health_bonus += weapon.health_bonus;
        }

        if let Some(armor) = &self.equipped_armor {
            defense_bonus += armor.defense_bonus;
            health_bonus += armor.health_bonus;
        }

        self.max_health = scaled_health + health_bonus;
        self.attack = scaled_attack + attack_bonus;
        self.defense = scaled_defense + defense_bonus;
        self.speed = scaled_speed;

        if self.current_health > self.max_health {
            self.current_health = self.max_health;
        }
    }

    /// Places `item` in the slot matching its type and recomputes stats.
    ///
    /// The caller is responsible for returning any displaced item to the
    /// inventory first; see `GameManager::equip_item`.
    pub fn equip(&mut self, item: Equipment) {
        match item.slot {
            EquipmentSlot::Weapon => self.equipped_weapon = Some(item),
            EquipmentSlot::Armor => self.equipped_armor = Some(item),
        }
        self.recalculate_stats();
    }

    /// Empties the given slot, recomputes stats, and hands back the item so
    /// the caller can restore it to the inventory.
    pub fn unequip(&mut self, slot: EquipmentSlot) -> Option<Equipment> {
        let removed = match slot {
            EquipmentSlot::Weapon => self.equipped_weapon.take(),
            EquipmentSlot::Armor => self.equipped_armor.take(),
        };
        if removed.is_some() {
            self.recalculate_stats();
        }
        removed
    }

    pub fn take_damage(&mut self, amount: u32) {
        self.current_health = self.current_health.saturating_sub(amount);
    }

    pub fn is_alive(&self) -> bool {
        self.current_health > 0
    }
}
