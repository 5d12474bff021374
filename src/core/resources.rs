//! Core domain: match configuration and shared simulation resources.

use bevy::prelude::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Match-level configuration fixed before the first tick.
#[derive(Resource, Debug)]
pub struct MatchConfig {
    /// Seed for the deterministic roll stream.
    pub seed: u64,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            seed: rand::rng().random(),
        }
    }
}

/// Deterministic roll source for every probabilistic decision in the
/// simulation (AI action choice, deflect homing, callout jitter).
/// Seeded from [`MatchConfig`], replaceable by tests.
#[derive(Resource)]
pub struct FightRng(pub ChaCha8Rng);

impl FightRng {
    pub fn seeded(seed: u64) -> Self {
        Self(ChaCha8Rng::seed_from_u64(seed))
    }

    /// Uniform roll in `[0, 1)`.
    pub fn roll(&mut self) -> f32 {
        self.0.random()
    }
}

/// Which of the two rival difficulty phases the fight is in.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct FightPhase(pub u8);

impl Default for FightPhase {
    fn default() -> Self {
        Self(1)
    }
}

impl FightPhase {
    pub fn is_second(self) -> bool {
        self.0 == 2
    }
}

/// Countdown timers driving the cinematic phases, all in ticks.
#[derive(Resource, Debug)]
pub struct CinematicTimers {
    pub intro: u32,
    pub pre_fight: u32,
    pub approach: u32,
    pub transition: u32,
}

impl Default for CinematicTimers {
    fn default() -> Self {
        Self {
            intro: 180,
            pre_fight: 300,
            approach: 450,
            transition: 0,
        }
    }
}

/// Request to rebuild the match state for a fresh fight.
#[derive(Debug)]
pub struct MatchResetEvent {
    /// 1 starts with the full cinematic intro; 2 drops straight into the
    /// second fight phase (checkpoint restart).
    pub start_phase: u8,
}

impl bevy::ecs::message::Message for MatchResetEvent {}
