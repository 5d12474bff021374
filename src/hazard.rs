//! Hazard domain: the rival's dropped wrecking load.
//!
//! A telegraph hangs over the player's position, then the load descends at
//! constant speed and resolves exactly one splash check at impact height.
//! The wreck lingers for a fixed countdown carried on the entity itself, so
//! the whole match state stays advanceable purely by ticking. At most one
//! hazard exists at a time; the AI refuses to drop a second.

use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;

use crate::combat::components::{Fighter, Health, Player};
use crate::combat::special::{Combo, TimeStop, hazard_clock_runs};
use crate::content::FightTuning;
use crate::core::{GamePhase, TickSet, in_phase};
use crate::fx::{CalloutEvent, ParticleBurstEvent, ShakeEvent};

/// The falling load. Spawned by the rival AI, removed by this module.
#[derive(Component, Debug)]
pub struct FallingHazard {
    /// Telegraph ticks before the descent starts.
    pub warning: u32,
    /// Set once the single splash check has resolved.
    pub impacted: bool,
    /// Ticks the wreck lingers after impact.
    pub cleanup: u32,
}

pub struct HazardPlugin;

impl Plugin for HazardPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            FixedUpdate,
            advance_hazard
                .in_set(TickSet::Hazard)
                .run_if(in_phase(GamePhase::Playing)),
        );
    }
}

/// Drop a hazard above the player's current position. Callers must ensure no
/// other hazard is alive.
pub fn spawn_hazard(commands: &mut Commands, tuning: &FightTuning, player_x: f32) {
    let cfg = &tuning.hazard;
    commands.spawn((
        FallingHazard {
            warning: cfg.warning,
            impacted: false,
            cleanup: cfg.cleanup,
        },
        Transform::from_xyz(player_x, cfg.spawn_y, 3.0),
    ));
}

pub(crate) fn advance_hazard(
    mut commands: Commands,
    tuning: Res<FightTuning>,
    time_stop: Res<TimeStop>,
    mut combo: ResMut<Combo>,
    mut callouts: MessageWriter<CalloutEvent>,
    mut bursts: MessageWriter<ParticleBurstEvent>,
    mut shakes: MessageWriter<ShakeEvent>,
    mut hazards: Query<(Entity, &mut FallingHazard, &mut Transform), Without<Player>>,
    mut player: Query<(&mut Transform, &Fighter, &mut Health), With<Player>>,
) {
    let Ok((mut p_tf, _p_fighter, mut p_health)) = player.single_mut() else {
        return;
    };
    let cfg = &tuning.hazard;
    let clock_runs = hazard_clock_runs(&time_stop);

    for (entity, mut hazard, mut tf) in &mut hazards {
        if hazard.warning > 0 {
            if clock_runs {
                hazard.warning -= 1;
            }
            continue;
        }

        if !hazard.impacted {
            if clock_runs {
                tf.translation.y -= cfg.fall_speed;
            }
            if tf.translation.y <= cfg.impact_y {
                tf.translation.y = cfg.impact_y;
                hazard.impacted = true;

                bursts.write(ParticleBurstEvent {
                    pos: tf.translation.truncate(),
                    color: Color::srgb(0.95, 0.85, 0.21),
                    count: 100,
                });
                callouts.write(CalloutEvent::flavor(
                    tf.translation.truncate(),
                    "HAHAHA!",
                    Color::srgb(0.98, 0.83, 0.14),
                    180.0,
                ));

                let dist = (tf.translation.x - p_tf.translation.x).abs();
                if dist < cfg.splash_radius {
                    p_health.damage(cfg.damage);
                    combo.reset();
                    shakes.write(ShakeEvent {
                        intensity: 30.0,
                        duration: 45,
                    });
                    let away = if p_tf.translation.x > tf.translation.x {
                        1.0
                    } else {
                        -1.0
                    };
                    p_tf.translation.x += away * cfg.knockback;
                } else {
                    shakes.write(ShakeEvent {
                        intensity: 12.0,
                        duration: 22,
                    });
                }
            }
        } else {
            hazard.cleanup = hazard.cleanup.saturating_sub(1);
            if hazard.cleanup == 0 {
                commands.entity(entity).despawn();
            }
        }
    }
}
