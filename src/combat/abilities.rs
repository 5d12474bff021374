//! Combat domain: cooldown-gated ability timers for both fighters.
//!
//! All counters are integer ticks, decremented by one while the owning
//! fighter's clock runs and it is not stunned; an ability is usable only at
//! zero. Counters never underflow.

use bevy::prelude::*;

use crate::combat::components::ActionState;
use crate::content::FightTuning;

/// Player-side ability timers.
#[derive(Component, Debug, Default, Clone)]
pub struct PlayerAbilities {
    /// Remaining active duration of a running barrage.
    pub barrage_active: u32,
    pub barrage_cooldown: u32,
    pub star_finger_cooldown: u32,
    pub heavy_punch_cooldown: u32,
}

impl PlayerAbilities {
    /// Per-tick cooldown decrement. The active-duration counter is ticked by
    /// the barrage resolver itself, not here.
    pub fn tick(&mut self) {
        self.barrage_cooldown = self.barrage_cooldown.saturating_sub(1);
        self.star_finger_cooldown = self.star_finger_cooldown.saturating_sub(1);
        self.heavy_punch_cooldown = self.heavy_punch_cooldown.saturating_sub(1);
    }

    pub fn can_barrage(&self, state: ActionState) -> bool {
        self.barrage_cooldown == 0 && state.interruptible()
    }

    pub fn can_star_finger(&self, state: ActionState) -> bool {
        self.star_finger_cooldown == 0 && state.interruptible()
    }

    pub fn can_heavy_punch(&self, state: ActionState) -> bool {
        self.heavy_punch_cooldown == 0 && state.interruptible()
    }

    pub fn start_barrage(&mut self, tuning: &FightTuning) {
        self.barrage_active = tuning.player.barrage_duration;
    }

    pub fn start_star_finger(&mut self, tuning: &FightTuning) {
        self.star_finger_cooldown = tuning.player.star_finger_cooldown;
    }

    pub fn start_heavy_punch(&mut self, tuning: &FightTuning) {
        self.heavy_punch_cooldown = tuning.player.heavy_punch_cooldown;
    }

    /// Called when the active barrage window runs out.
    pub fn finish_barrage(&mut self, tuning: &FightTuning) {
        self.barrage_cooldown = tuning.player.barrage_cooldown;
    }
}

/// Rival-side ability timers.
#[derive(Component, Debug, Default, Clone)]
pub struct RivalAbilities {
    pub time_stop_cooldown: u32,
    pub barrage_cooldown: u32,
}

impl RivalAbilities {
    /// The time-stop opener is held back briefly at match start.
    pub fn at_match_start(tuning: &FightTuning) -> Self {
        Self {
            time_stop_cooldown: tuning.rival.initial_time_stop_cooldown,
            barrage_cooldown: 0,
        }
    }

    pub fn tick(&mut self) {
        self.time_stop_cooldown = self.time_stop_cooldown.saturating_sub(1);
        self.barrage_cooldown = self.barrage_cooldown.saturating_sub(1);
    }

    pub fn time_stop_ready(&self) -> bool {
        self.time_stop_cooldown == 0
    }

    pub fn barrage_ready(&self) -> bool {
        self.barrage_cooldown == 0
    }
}
