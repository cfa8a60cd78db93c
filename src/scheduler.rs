use crate::battle::{execute_turn, BattleEvent, TurnResult};
use crate::enemy::Enemy;
use crate::game_state::BattleSpeed;
use crate::player::Player;
use crate::rng::RandomSource;

/// Terminal outcome reported by the scheduler when a tick ends the battle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BattleEnd {
    Victory,
    Defeat,
}

/// Drives repeated resolver calls on a fixed cadence.
///
/// The scheduler is an accumulator-driven timer: the host loop feeds it
/// elapsed time via [`BattleScheduler::advance`], and it issues at most one
/// resolver call whenever the accumulated time crosses the tick interval,
/// so ticks can never overlap. A terminal result disarms the timer before
/// it is reported; no tick is ever issued afterwards. `stop` is idempotent.
pub struct BattleScheduler {
    tick_interval: f64,
    tick_timer: f64,
    active: bool,
    log: Vec<BattleEvent>,
}

impl BattleScheduler {
    pub fn new() -> Self {
        Self {
            tick_interval: 1.0 / BattleSpeed::Normal.multiplier(),
            tick_timer: 0.0,
            active: false,
            log: Vec::new(),
        }
    }

    /// Arms the tick timer for a new battle and clears the event log.
    /// Tick interval is `1 / speed multiplier` seconds.
    pub fn start(&mut self, speed: BattleSpeed) {
        self.tick_interval = 1.0 / speed.multiplier();
        self.tick_timer = 0.0;
        self.log.clear();
        self.active = true;
    }

    /// Stops ticking without touching the log or any entity state.
    pub fn pause(&mut self) {
        self.active = false;
    }

    /// Restarts ticking from the current entity health values.
    pub fn resume(&mut self) {
        self.active = true;
    }

    /// Disarms the tick timer. Safe to call any number of times.
    pub fn stop(&mut self) {
        self.active = false;
        self.tick_timer = 0.0;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn log(&self) -> &[BattleEvent] {
        &self.log
    }

    pub(crate) fn push_events(&mut self, events: Vec<BattleEvent>) {
        self.log.extend(events);
    }

    /// Advances the tick timer by `delta_seconds` and, if a tick is due,
    /// executes one battle turn, appending its events to the running log.
    ///
    /// Returns the terminal outcome when that turn ended the battle; the
    /// timer is already disarmed by the time the caller sees it.
    pub fn advance(
        &mut self,
        player: &mut Player,
        enemy: &mut Enemy,
        delta_seconds: f64,
        rng: &mut impl RandomSource,
    ) -> Option<BattleEnd> {
        if !self.active {
            return None;
        }

        self.tick_timer += delta_seconds;
        if self.tick_timer < self.tick_interval {
            return None;
        }
        self.tick_timer = 0.0;

        match execute_turn(player, enemy, rng) {
            TurnResult::Ongoing(events) => {
                self.log.extend(events);
                None
            }
            TurnResult::Victory(events) => {
                self.log.extend(events);
                self.stop();
                Some(BattleEnd::Victory)
            }
            TurnResult::Defeat(events) => {
                self.log.extend(events);
                self.stop();
                Some(BattleEnd::Defeat)
            }
        }
    }
}

impl Default for BattleScheduler {
    fn default() -> Self {
        Self::new()
    }
}
