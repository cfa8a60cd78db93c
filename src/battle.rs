use crate::enemy::Enemy;
use crate::equipment::Equipment;
use crate::player::Player;
use crate::progression::{calculate_damage, determine_turn_order, TurnOrder};
use crate::rng::RandomSource;

/// A single observable step in a battle, for logging and display.
#[derive(Debug, Clone, PartialEq)]
pub enum BattleEvent {
    PlayerAttack {
        damage: u32,
        enemy_health: u32,
    },
    EnemyAttack {
        damage: u32,
        player_health: u32,
    },
    PlayerLevelUp {
        new_level: u32,
    },
    LootObtained {
        equipment: Option<Equipment>,
        gold: u64,
    },
}

/// Outcome of a single resolver call.
#[derive(Debug, Clone, PartialEq)]
pub enum TurnResult {
    Ongoing(Vec<BattleEvent>),
    Victory(Vec<BattleEvent>),
    Defeat(Vec<BattleEvent>),
}

impl TurnResult {
    pub fn events(&self) -> &[BattleEvent] {
        match self {
            TurnResult::Ongoing(events)
            | TurnResult::Victory(events)
            | TurnResult::Defeat(events) => events,
        }
    }

    pub fn into_events(self) -> Vec<BattleEvent> {
        match self {
            TurnResult::Ongoing(events)
            | TurnResult::Victory(events)
            | TurnResult::Defeat(events) => events,
        }
    }

    pub fn is_victory(&self) -> bool {
        matches!(self, TurnResult::Victory(_))
    }

    pub fn is_defeat(&self) -> bool {
        matches!(self, TurnResult::Defeat(_))
    }

    pub fn is_terminal(&self) -> bool {
        self.is_victory() || self.is_defeat()
    }
}

/// Executes one discrete combat turn.
///
/// Turn order is decided once per call. A kill by whoever acts first ends
/// the turn immediately: a victorious player takes no counter-attack, and a
/// slain player never swings back. When the enemy acts first, the player's
/// attack resolves only after surviving it. Mutates only the two health
/// pools; every resolved attack appends one event carrying the damage dealt
/// and the defender's resulting health.
pub fn execute_turn(
    player: &mut Player,
    enemy: &mut Enemy,
    rng: &mut impl RandomSource,
) -> TurnResult {
    let order = determine_turn_order(player.speed, enemy.speed, rng);
    let mut events = Vec::new();

    if order == TurnOrder::PlayerFirst && player_attack(player, enemy, &mut events, rng) {
        return TurnResult::Victory(events);
    }

    let damage = calculate_damage(enemy.attack, player.defense, rng);
    player.take_damage(damage);
    events.push(BattleEvent::EnemyAttack {
        damage,
        player_health: player.current_health,
    });

    if !player.is_alive() {
        return TurnResult::Defeat(events);
    }

    if order == TurnOrder::EnemyFirst && player_attack(player, enemy, &mut events, rng) {
        return TurnResult::Victory(events);
    }

    TurnResult::Ongoing(events)
}

fn player_attack(
    player: &Player,
    enemy: &mut Enemy,
    events: &mut Vec<BattleEvent>,
    rng: &mut impl RandomSource,
) -> bool {
    let damage = calculate_damage(player.attack, enemy.defense, rng);
    let defeated = enemy.take_damage(damage);
    events.push(BattleEvent::PlayerAttack {
        damage,
        enemy_health: enemy.current_health,
    });
    defeated
}
