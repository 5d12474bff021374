//! Content domain: gameplay tuning, with an optional RON override file.
//!
//! Every constant the simulation consumes lives in [`FightTuning`]; the
//! `Default` impls carry the canonical values and `assets/data/tuning.ron`
//! may override any subset of them.

mod loader;

pub use loader::{TuningLoadError, load_tuning};

use bevy::prelude::*;
use serde::Deserialize;
use std::path::Path;

/// Arena geometry and shared locomotion constants. Coordinates are Y-up with
/// the ground plane at `ground_y`; fighter transforms are center-anchored.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ArenaTuning {
    pub width: f32,
    pub height: f32,
    pub ground_y: f32,
    /// Downward acceleration per tick squared.
    pub gravity: f32,
    pub move_speed: f32,
    pub jump_velocity: f32,
}

impl Default for ArenaTuning {
    fn default() -> Self {
        Self {
            width: 1200.0,
            height: 600.0,
            ground_y: 0.0,
            gravity: 0.6,
            move_speed: 6.0,
            jump_velocity: 14.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlayerTuning {
    pub width: f32,
    pub height: f32,
    pub max_health: f32,
    pub spawn_x: f32,
    pub barrage_duration: u32,
    pub barrage_cooldown: u32,
    pub barrage_damage: f32,
    pub barrage_range: f32,
    /// Wider band within which mutual barrages clash instead of hitting.
    pub clash_range: f32,
    pub star_finger_cooldown: u32,
    pub star_finger_duration: u32,
    pub star_finger_damage: f32,
    pub star_finger_range: f32,
    pub star_finger_vertical_tolerance: f32,
    pub heavy_punch_cooldown: u32,
    pub heavy_punch_duration: u32,
    pub heavy_punch_damage: f32,
    pub heavy_punch_range: f32,
    pub heavy_punch_stun: u32,
    pub heavy_punch_knockback: f32,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            width: 40.0,
            height: 80.0,
            max_health: 1000.0,
            spawn_x: 200.0,
            barrage_duration: 120,
            barrage_cooldown: 60,
            barrage_damage: 8.0,
            barrage_range: 130.0,
            clash_range: 160.0,
            star_finger_cooldown: 120,
            star_finger_duration: 25,
            star_finger_damage: 180.0,
            star_finger_range: 450.0,
            star_finger_vertical_tolerance: 100.0,
            heavy_punch_cooldown: 480,
            heavy_punch_duration: 30,
            heavy_punch_damage: 250.0,
            heavy_punch_range: 140.0,
            heavy_punch_stun: 60,
            heavy_punch_knockback: 30.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RivalTuning {
    pub width: f32,
    pub height: f32,
    pub max_health: f32,
    /// Phase 2 raises max health to `max_health * phase_two_health_scale`.
    pub phase_two_health_scale: f32,
    pub spawn_x: f32,
    pub walk_speed: f32,
    pub walk_speed_stopped: f32,
    pub phase_two_speed_scale: f32,
    /// Ticks between AI decision rolls while idle.
    pub decision_interval: u32,
    /// Gap the rival closes to before standing its ground.
    pub melee_gap: f32,
    pub barrage_duration: u32,
    pub barrage_duration_stopped: u32,
    pub barrage_damage: f32,
    pub barrage_range: f32,
    pub barrage_cooldown_phase_one: u32,
    pub barrage_cooldown_phase_two: u32,
    pub telegraph_frames: u32,
    pub time_stop_duration: u32,
    pub time_stop_cooldown_phase_one: u32,
    pub time_stop_cooldown_phase_two: u32,
    /// The opener is held back this long at match start.
    pub initial_time_stop_cooldown: u32,
    pub assault_damage: f32,
    /// Horizontal offset of the stopped-time teleport, ahead-of-facing.
    pub assault_offset: f32,
    /// Generic committed-action window before the AI returns to idle.
    pub action_timeout: u32,
}

impl Default for RivalTuning {
    fn default() -> Self {
        Self {
            width: 40.0,
            height: 80.0,
            max_health: 6000.0,
            phase_two_health_scale: 1.5,
            spawn_x: 900.0,
            walk_speed: 8.0,
            walk_speed_stopped: 11.0,
            phase_two_speed_scale: 1.4,
            decision_interval: 20,
            melee_gap: 90.0,
            barrage_duration: 120,
            barrage_duration_stopped: 60,
            barrage_damage: 5.0,
            barrage_range: 110.0,
            barrage_cooldown_phase_one: 150,
            barrage_cooldown_phase_two: 90,
            telegraph_frames: 30,
            time_stop_duration: 300,
            time_stop_cooldown_phase_one: 420,
            time_stop_cooldown_phase_two: 300,
            initial_time_stop_cooldown: 120,
            assault_damage: 150.0,
            assault_offset: 80.0,
            action_timeout: 150,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BladeTuning {
    pub damage: f32,
    /// Deflected homing blades deal `damage * homing_damage_scale`.
    pub homing_damage_scale: f32,
    pub speed: f32,
    pub speed_stopped: f32,
    pub phase_two_speed_scale: f32,
    pub volley_count: u32,
    pub volley_count_stopped: u32,
    pub deflect_radius: f32,
    pub deflect_speed: f32,
    pub homing_chance: f32,
    /// Despawn margin around the arena bounds.
    pub margin: f32,
}

impl Default for BladeTuning {
    fn default() -> Self {
        Self {
            damage: 50.0,
            homing_damage_scale: 1.5,
            speed: 14.0,
            speed_stopped: 22.0,
            phase_two_speed_scale: 1.2,
            volley_count: 6,
            volley_count_stopped: 12,
            deflect_radius: 150.0,
            deflect_speed: 22.0,
            homing_chance: 0.3,
            margin: 300.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HazardTuning {
    pub damage: f32,
    pub warning: u32,
    pub spawn_y: f32,
    pub fall_speed: f32,
    /// Height at which the descent stops and the splash resolves.
    pub impact_y: f32,
    pub splash_radius: f32,
    pub knockback: f32,
    /// Ticks the wreck lingers after impact before despawning.
    pub cleanup: u32,
}

impl Default for HazardTuning {
    fn default() -> Self {
        Self {
            damage: 600.0,
            warning: 45,
            spawn_y: 550.0,
            fall_speed: 28.0,
            impact_y: 55.0,
            splash_radius: 150.0,
            knockback: 60.0,
            cleanup: 72,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SpecialTuning {
    pub combo_threshold: u32,
    pub duration: u32,
    pub strike_interval: u32,
    pub strike_damage: f32,
    /// Fraction of the remaining gap closed per tick.
    pub pull_rate: f32,
    /// Fraction of max health restored during the narrative transition.
    pub transition_heal_fraction: f32,
}

impl Default for SpecialTuning {
    fn default() -> Self {
        Self {
            combo_threshold: 100,
            duration: 180,
            strike_interval: 10,
            strike_damage: 125.0,
            pull_rate: 0.1,
            transition_heal_fraction: 0.4,
        }
    }
}

/// Root tuning resource consumed by every simulation system.
#[derive(Resource, Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FightTuning {
    pub arena: ArenaTuning,
    pub player: PlayerTuning,
    pub rival: RivalTuning,
    pub blade: BladeTuning,
    pub hazard: HazardTuning,
    pub special: SpecialTuning,
}

pub struct ContentPlugin;

impl Plugin for ContentPlugin {
    fn build(&self, app: &mut App) {
        let tuning = match load_tuning(Path::new("assets/data/tuning.ron")) {
            Ok(tuning) => tuning,
            Err(err) => {
                warn!("{err}; using built-in tuning defaults");
                FightTuning::default()
            }
        };
        app.insert_resource(tuning);
    }
}
