use crate::rng::RandomSource;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EquipmentSlot {
    Weapon,
    Armor,
}

impl EquipmentSlot {
    pub fn display_name(&self) -> &'static str {
        match self {
            EquipmentSlot::Weapon => "Sword",
            EquipmentSlot::Armor => "Armor",
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            EquipmentSlot::Weapon => "weapon",
            EquipmentSlot::Armor => "armor",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Rarity {
    Common = 0,
    Rare = 1,
    Epic = 2,
    Legendary = 3,
}

impl Rarity {
    pub fn display_name(&self) -> &'static str {
        match self {
            Rarity::Common => "Common",
            Rarity::Rare => "Rare",
            Rarity::Epic => "Epic",
            Rarity::Legendary => "Legendary",
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            Rarity::Common => "common",
            Rarity::Rare => "rare",
            Rarity::Epic => "epic",
            Rarity::Legendary => "legendary",
        }
    }

    /// Fixed scalar applied to an item's base stat roll.
    pub fn stat_multiplier(&self) -> f64 {
        match self {
            Rarity::Common => 1.0,
            Rarity::Rare => 1.5,
            Rarity::Epic => 2.0,
            Rarity::Legendary => 3.0,
        }
    }

    pub fn color_hex(&self) -> &'static str {
        match self {
            Rarity::Common => "#FFFFFF",
            Rarity::Rare => "#1E90FF",
            Rarity::Epic => "#9370DB",
            Rarity::Legendary => "#FFD700",
        }
    }
}

/// A weapon or armor piece with flat stat bonuses.
///
/// An item is owned either by the inventory list or by exactly one equip
/// slot, never both; moving it between the two is the orchestrator's job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Equipment {
    pub id: Uuid,
    pub name: String,
    pub slot: EquipmentSlot,
    pub rarity: Rarity,
    pub attack_bonus: u32,
    pub defense_bonus: u32,
    pub health_bonus: u32,
    pub speed_bonus: u32,
    pub gold_cost: u64,
    pub sprite_name: String,
}

impl Equipment {
    /// Generates a random item scaled to `level`.
    ///
    /// Rarity roll: 5% legendary, 15% epic, 30% rare, 50% common. The slot is
    /// a fair coin flip. Weapons roll their bonus into attack, armor into
    /// defense; both carry a health bonus derived from the same base stat.
    pub fn random(level: u32, rng: &mut impl RandomSource) -> Self {
        let rarity_roll = rng.unit();
        let rarity = if rarity_roll < 0.05 {
            Rarity::Legendary
        } else if rarity_roll < 0.20 {
            Rarity::Epic
        } else if rarity_roll < 0.50 {
            Rarity::Rare
        } else {
            Rarity::Common
        };

        let slot = if rng.coin_flip() {
            EquipmentSlot::Weapon
        } else {
            EquipmentSlot::Armor
        };

        let base_stat = (level as f64 * 0.3 * rarity.stat_multiplier()) as u32;
        let name = format!("{} {}", rarity.display_name(), slot.display_name());
        let sprite_name = format!("{}_{}", slot.key(), rarity.key());

        match slot {
            EquipmentSlot::Weapon => Self {
                id: Uuid::new_v4(),
                name,
                slot,
                rarity,
                attack_bonus: base_stat + rng.range_i32(1, 5) as u32,
                defense_bonus: 0,
                health_bonus: base_stat / 2,
                speed_bonus: 0,
                gold_cost: base_stat as u64 * 10,
                sprite_name,
            },
            EquipmentSlot::Armor => Self {
                id: Uuid::new_v4(),
                name,
                slot,
                rarity,
                attack_bonus: 0,
                defense_bonus: base_stat + rng.range_i32(1, 5) as u32,
                health_bonus: base_stat,
                speed_bonus: 0,
                gold_cost: base_stat as u64 * 10,
                sprite_name,
            },
        }
    }
}
