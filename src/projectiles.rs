//! Projectile domain: the rival's thrown blades.
//!
//! Blades spawn dormant in a staggered volley, lock a straight-line velocity
//! onto the player once their launch delay elapses, and despawn on their
//! first hit or when they leave the arena margin. A blade the player
//! deflects mid-barrage flips ownership: homing deflects re-aim at the rival
//! for amplified damage, plain deflects arc away harmlessly.

use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;
use std::f32::consts::{FRAC_PI_4, PI};

use crate::combat::components::{Facing, Fighter, Health, Player, Rival, Velocity};
use crate::combat::special::{Combo, TimeStop, blade_clock_runs};
use crate::content::FightTuning;
use crate::core::{FightPhase, GamePhase, TickSet, in_phase};
use crate::fx::{CalloutEvent, ParticleBurstEvent, ShakeEvent};

/// A thrown blade. Flight velocity lives in the shared [`Velocity`]
/// component; a zero velocity with `deflected == false` means the blade has
/// not locked on yet.
#[derive(Component, Debug, Default)]
pub struct Blade {
    /// Ticks until the blade launches; only counts down while the blade
    /// clock runs.
    pub launch_delay: u32,
    /// Sprite rotation, kept in sync with the velocity.
    pub angle: f32,
    /// Set once the player's barrage redirects this blade; a deflected blade
    /// can never hurt the player again.
    pub deflected: bool,
    /// Deflected blades only: re-aimed at the rival for amplified damage.
    pub homing: bool,
}

pub struct BladePlugin;

impl Plugin for BladePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            FixedUpdate,
            advance_blades
                .in_set(TickSet::Blades)
                .run_if(in_phase(GamePhase::Playing)),
        );
    }
}

/// Spawn a staggered volley aimed (eventually) at the player. During
/// time-stop the volley is denser and launches almost immediately.
pub fn spawn_volley(
    commands: &mut Commands,
    tuning: &FightTuning,
    time_stopped: bool,
    rival_pos: Vec2,
    rival_facing: Facing,
) {
    let blade = &tuning.blade;
    let count = if time_stopped {
        blade.volley_count_stopped
    } else {
        blade.volley_count
    };

    for i in 0..count {
        let pos = Vec2::new(
            rival_pos.x + rival_facing.sign() * 50.0,
            rival_pos.y + 50.0 - i as f32 * 20.0,
        );
        let launch_delay = if time_stopped { 5 } else { 40 + i * 8 };
        commands.spawn((
            Blade {
                launch_delay,
                ..default()
            },
            Velocity::default(),
            Transform::from_xyz(pos.x, pos.y, 2.0),
        ));
    }
}

/// Straight-line lock-on velocity, computed once at launch.
pub(crate) fn aim_velocity(from: Vec2, to: Vec2, speed: f32) -> Vec2 {
    (to - from).normalize_or_zero() * speed
}

/// Velocity of a plain (non-homing) deflect: an upward-forward arc with
/// jitter, mirrored by the player's facing.
pub(crate) fn reflect_arc(facing: Facing, jitter: f32, speed: f32) -> Vec2 {
    let base = match facing {
        Facing::Right => FRAC_PI_4,
        Facing::Left => PI - FRAC_PI_4,
    };
    let angle = base + (jitter - 0.5) * 2.5;
    Vec2::new(angle.cos(), angle.sin()) * speed
}

pub(crate) fn advance_blades(
    mut commands: Commands,
    tuning: Res<FightTuning>,
    time_stop: Res<TimeStop>,
    fight_phase: Res<FightPhase>,
    mut combo: ResMut<Combo>,
    mut callouts: MessageWriter<CalloutEvent>,
    mut bursts: MessageWriter<ParticleBurstEvent>,
    mut shakes: MessageWriter<ShakeEvent>,
    mut blades: Query<
        (Entity, &mut Blade, &mut Velocity, &mut Transform),
        (With<Blade>, Without<Player>, Without<Rival>),
    >,
    mut player: Query<
        (&mut Transform, &Fighter, &mut Health),
        (With<Player>, Without<Rival>),
    >,
    mut rival: Query<
        (&mut Transform, &Fighter, &mut Health),
        (With<Rival>, Without<Player>),
    >,
) {
    let Ok((mut p_tf, p_fighter, mut p_health)) = player.single_mut() else {
        return;
    };
    let Ok((mut r_tf, r_fighter, mut r_health)) = rival.single_mut() else {
        return;
    };

    let clock_runs = blade_clock_runs(&time_stop);
    let arena = &tuning.arena;
    let cfg = &tuning.blade;

    for (entity, mut blade, mut vel, mut tf) in &mut blades {
        if blade.launch_delay > 0 {
            if clock_runs {
                blade.launch_delay -= 1;
            }
            continue;
        }

        // One-shot lock-on at the player's current center.
        if vel.0 == Vec2::ZERO && !blade.deflected {
            let base = if time_stop.active {
                cfg.speed_stopped
            } else {
                cfg.speed
            };
            let scale = if fight_phase.is_second() {
                cfg.phase_two_speed_scale
            } else {
                1.0
            };
            let speed = base * scale;
            vel.0 = aim_velocity(tf.translation.truncate(), p_tf.translation.truncate(), speed);
            blade.angle = vel.0.y.atan2(vel.0.x);
        }

        if clock_runs {
            tf.translation.x += vel.0.x;
            tf.translation.y += vel.0.y;
        }

        let pos = tf.translation.truncate();
        if blade.deflected {
            if blade.homing
                && (pos.x - r_tf.translation.x).abs() < r_fighter.width / 2.0
                && (pos.y - r_tf.translation.y).abs() < r_fighter.height / 2.0
            {
                r_health.damage(cfg.damage * cfg.homing_damage_scale);
                combo.add();
                bursts.write(ParticleBurstEvent {
                    pos: r_tf.translation.truncate(),
                    color: Color::srgb(0.94, 0.75, 0.19),
                    count: 15,
                });
                callouts.write(CalloutEvent::flavor(
                    r_tf.translation.truncate(),
                    "RETURNED!",
                    Color::srgb(0.98, 0.83, 0.14),
                    40.0,
                ));
                shakes.write(ShakeEvent {
                    intensity: 10.0,
                    duration: 12,
                });
                r_tf.translation.x += vel.0.x.signum() * 3.0;
                commands.entity(entity).despawn();
                continue;
            }
        } else if (pos.x - p_tf.translation.x).abs() < p_fighter.width / 2.0
            && (pos.y - p_tf.translation.y).abs() < p_fighter.height / 2.0
        {
            p_health.damage(cfg.damage);
            combo.reset();
            bursts.write(ParticleBurstEvent {
                pos: p_tf.translation.truncate(),
                color: Color::srgb(0.85, 0.1, 0.1),
                count: 10,
            });
            shakes.write(ShakeEvent {
                intensity: 8.0,
                duration: 10,
            });
            p_tf.translation.x += vel.0.x.signum() * 2.0;
            commands.entity(entity).despawn();
            continue;
        }

        // Expire well outside the arena; a miss needs no event.
        if pos.x < -cfg.margin
            || pos.x > arena.width + cfg.margin
            || pos.y < arena.ground_y - 200.0
            || pos.y > arena.height + cfg.margin
        {
            commands.entity(entity).despawn();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lock_on_points_at_target_with_requested_speed() {
        let vel = aim_velocity(Vec2::new(0.0, 0.0), Vec2::new(100.0, 0.0), 22.0);
        assert!((vel.x - 22.0).abs() < 1e-4);
        assert!(vel.y.abs() < 1e-4);

        let vel = aim_velocity(Vec2::new(0.0, 0.0), Vec2::new(30.0, 40.0), 10.0);
        assert!((vel.length() - 10.0).abs() < 1e-4);
        assert!((vel.x - 6.0).abs() < 1e-4);
        assert!((vel.y - 8.0).abs() < 1e-4);
    }

    #[test]
    fn reflect_arc_is_up_and_forward_at_center_jitter() {
        let right = reflect_arc(Facing::Right, 0.5, 22.0);
        assert!(right.x > 0.0);
        assert!(right.y > 0.0);

        let left = reflect_arc(Facing::Left, 0.5, 22.0);
        assert!(left.x < 0.0);
        assert!(left.y > 0.0);
    }
}
