//! Combat domain: the player action resolver.
//!
//! One system owns the player's whole slot of the tick, in the order the
//! engine contract fixes: committed attacks continue, new actions start,
//! movement applies, then physics, then the combo threshold check. Nothing
//! here runs for a stunned or time-frozen player.

use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;

use crate::combat::abilities::PlayerAbilities;
use crate::combat::components::{
    ActionState, ActionTrigger, AttackFrame, Facing, Fighter, Health, Player, Rival, Stun,
    Velocity,
};
use crate::combat::special::{Combo, SpecialMoveTimer, TimeStop, player_clock_runs};
use crate::content::FightTuning;
use crate::core::FightRng;
use crate::fx::{CalloutEvent, ParticleBurstEvent, ShakeEvent};
use crate::physics;
use crate::projectiles::{Blade, aim_velocity, reflect_arc};
use crate::input::FightInput;

const PLAYER_COLOR: Color = Color::srgb(0.55, 0.47, 0.78);
const RIVAL_COLOR: Color = Color::srgb(0.98, 0.83, 0.14);

pub(crate) fn resolve_player_action(
    tuning: Res<FightTuning>,
    input: Res<FightInput>,
    time_stop: Res<TimeStop>,
    mut combo: ResMut<Combo>,
    mut special_timer: ResMut<SpecialMoveTimer>,
    mut rng: ResMut<FightRng>,
    mut callouts: MessageWriter<CalloutEvent>,
    mut bursts: MessageWriter<ParticleBurstEvent>,
    mut shakes: MessageWriter<ShakeEvent>,
    mut player: Query<
        (
            &mut Transform,
            &mut Velocity,
            &mut Facing,
            &mut ActionState,
            &mut AttackFrame,
            &mut PlayerAbilities,
            &Stun,
            &Fighter,
        ),
        (With<Player>, Without<Rival>),
    >,
    mut rival: Query<
        (
            &mut Transform,
            &Fighter,
            &mut Health,
            &mut Stun,
            &ActionState,
            &Facing,
        ),
        (With<Rival>, Without<Player>),
    >,
    mut blades: Query<
        (&mut Blade, &mut Velocity, &Transform),
        (With<Blade>, Without<Player>, Without<Rival>),
    >,
) {
    let Ok((
        mut p_tf,
        mut p_vel,
        mut p_facing,
        mut p_state,
        mut p_frame,
        mut p_abilities,
        p_stun,
        p_fighter,
    )) = player.single_mut()
    else {
        return;
    };
    let Ok((mut r_tf, r_fighter, mut r_health, mut r_stun, r_state, r_facing)) =
        rival.single_mut()
    else {
        return;
    };

    // The ultimate is fully scripted elsewhere.
    if *p_state == ActionState::SpecialMove {
        return;
    }
    if p_stun.is_stunned() || !player_clock_runs(&time_stop, *p_state) {
        return;
    }

    let arena = &tuning.arena;
    let pt = &tuning.player;

    // Edge-triggered ability starts, only from an interruptible state.
    if input.star_finger_pressed && p_abilities.can_star_finger(*p_state) {
        p_state.try_transition(ActionTrigger::StartStarFinger);
        p_abilities.start_star_finger(&tuning);
        p_frame.0 = pt.star_finger_duration;
    } else if input.heavy_punch_pressed && p_abilities.can_heavy_punch(*p_state) {
        p_state.try_transition(ActionTrigger::StartHeavyPunch);
        p_abilities.start_heavy_punch(&tuning);
        p_frame.0 = pt.heavy_punch_duration;
    }

    match *p_state {
        ActionState::HeavyPunch => {
            p_vel.0.x = 0.0;
            p_frame.0 = p_frame.0.saturating_sub(1);

            // Single hit check at the mid-animation contact frame.
            if p_frame.0 == pt.heavy_punch_duration / 2 {
                callouts.write(CalloutEvent::flavor(
                    p_tf.translation.truncate(),
                    "CRACK!",
                    PLAYER_COLOR,
                    150.0,
                ));
                let dist = (p_tf.translation.x - r_tf.translation.x).abs();
                let ahead = p_facing.sign() * (r_tf.translation.x - p_tf.translation.x) > 0.0;
                if dist < pt.heavy_punch_range && ahead {
                    r_health.damage(pt.heavy_punch_damage);
                    combo.add();
                    r_stun.frames = pt.heavy_punch_stun;
                    bursts.write(ParticleBurstEvent {
                        pos: r_tf.translation.truncate(),
                        color: PLAYER_COLOR,
                        count: 40,
                    });
                    callouts.write(CalloutEvent::flavor(
                        r_tf.translation.truncate(),
                        "STAGGERED!",
                        Color::WHITE,
                        50.0,
                    ));
                    shakes.write(ShakeEvent {
                        intensity: 15.0,
                        duration: 20,
                    });
                    r_tf.translation.x += p_facing.sign() * pt.heavy_punch_knockback;
                }
            }
            if p_frame.0 == 0 {
                p_state.try_transition(ActionTrigger::FinishAttack);
            }
        }
        ActionState::StarFinger => {
            p_vel.0.x = 0.0;
            p_frame.0 = p_frame.0.saturating_sub(1);

            if p_frame.0 == pt.star_finger_duration - 5 {
                callouts.write(CalloutEvent::flavor(
                    p_tf.translation.truncate(),
                    "PIERCER!",
                    PLAYER_COLOR,
                    70.0,
                ));
                // Directional range window ahead of the player plus a
                // vertical tolerance band; damage lands once per activation.
                let reach_x = p_tf.translation.x + p_facing.sign() * pt.star_finger_range;
                let within = match *p_facing {
                    Facing::Right => {
                        r_tf.translation.x > p_tf.translation.x && r_tf.translation.x < reach_x
                    }
                    Facing::Left => {
                        r_tf.translation.x < p_tf.translation.x && r_tf.translation.x > reach_x
                    }
                };
                let level = (r_tf.translation.y - p_tf.translation.y).abs()
                    < pt.star_finger_vertical_tolerance;
                if within && level {
                    r_health.damage(pt.star_finger_damage);
                    combo.add();
                    bursts.write(ParticleBurstEvent {
                        pos: r_tf.translation.truncate(),
                        color: PLAYER_COLOR,
                        count: 20,
                    });
                    shakes.write(ShakeEvent {
                        intensity: 10.0,
                        duration: 15,
                    });
                    r_tf.translation.x += p_facing.sign() * 10.0;
                }
            }
            if p_frame.0 == 0 {
                p_state.try_transition(ActionTrigger::FinishAttack);
            }
        }
        ActionState::Barrage => {
            p_abilities.barrage_active = p_abilities.barrage_active.saturating_sub(1);
            p_vel.0.x *= 0.8;

            if rng.roll() < 0.45 {
                let size = 50.0 + rng.roll() * 40.0;
                callouts.write(CalloutEvent::flavor(
                    Vec2::new(
                        p_tf.translation.x + p_facing.sign() * 60.0,
                        p_tf.translation.y,
                    ),
                    "RUSH!",
                    PLAYER_COLOR,
                    size,
                ));
            }

            let dist = (p_tf.translation.x - r_tf.translation.x).abs();
            let clashing = *r_state == ActionState::Barrage && dist < pt.clash_range;
            let ahead = p_facing.sign() * (r_tf.translation.x - p_tf.translation.x) > 0.0;
            if !clashing && dist < pt.barrage_range && ahead {
                r_health.damage(pt.barrage_damage);
                combo.add();
                bursts.write(ParticleBurstEvent {
                    pos: r_tf.translation.truncate(),
                    color: RIVAL_COLOR,
                    count: 2,
                });
                shakes.write(ShakeEvent {
                    intensity: 3.0,
                    duration: 5,
                });
                r_tf.translation.x += p_facing.sign() * 0.5;
            } else if clashing {
                // Mutual barrage: no damage either way, both pushed apart.
                if rng.roll() < 0.2 {
                    let mid = (p_tf.translation.truncate() + r_tf.translation.truncate()) / 2.0;
                    callouts.write(CalloutEvent::flavor(mid, "CLASH!", Color::WHITE, 60.0));
                }
                shakes.write(ShakeEvent {
                    intensity: 4.0,
                    duration: 5,
                });
                p_tf.translation.x -= p_facing.sign() * 0.3;
                r_tf.translation.x -= r_facing.sign() * 0.3;
            }

            deflect_blades(
                &tuning,
                &mut rng,
                &p_tf,
                *p_facing,
                &r_tf,
                &mut blades,
                &mut callouts,
                &mut bursts,
            );

            if p_abilities.barrage_active == 0 {
                p_state.try_transition(ActionTrigger::FinishBarrage);
                p_abilities.finish_barrage(&tuning);
            }
        }
        _ => {
            if input.barrage_held && p_abilities.can_barrage(*p_state) {
                p_state.try_transition(ActionTrigger::StartBarrage);
                p_abilities.start_barrage(&tuning);
            } else {
                if input.left {
                    p_vel.0.x = -arena.move_speed;
                    *p_facing = Facing::Left;
                } else if input.right {
                    p_vel.0.x = arena.move_speed;
                    *p_facing = Facing::Right;
                } else {
                    p_vel.0.x = 0.0;
                }
                let trigger = if input.left || input.right {
                    ActionTrigger::Walk
                } else {
                    ActionTrigger::Halt
                };
                p_state.try_transition(trigger);
            }
        }
    }

    // Jump: grounded only, never out of a committed attack.
    if input.jump_pressed
        && physics::on_ground(arena, p_fighter, &p_tf)
        && !p_state.committed_attack()
    {
        p_vel.0.y = arena.jump_velocity;
    }

    physics::integrate(arena, p_fighter, &mut p_tf, &mut p_vel);
    physics::clamp_x(arena, p_fighter, &mut p_tf);
    physics::clamp_x(arena, r_fighter, &mut r_tf);

    // Combo threshold forcibly interrupts into the ultimate. Entering the
    // special clears the combo and every pending attack timer.
    if combo.0 >= tuning.special.combo_threshold
        && p_state.try_transition(ActionTrigger::ForceSpecial)
    {
        special_timer.0 = tuning.special.duration;
        combo.reset();
        p_frame.0 = 0;
        p_abilities.barrage_active = 0;
        callouts.write(CalloutEvent::flavor(
            p_tf.translation.truncate(),
            "FINAL ART: DEAD CALM!",
            PLAYER_COLOR,
            60.0,
        ));
        shakes.write(ShakeEvent {
            intensity: 20.0,
            duration: 20,
        });
    }
}

/// Barrage parry: redirect live, not-yet-deflected blades close to and
/// roughly in front of the player. A homing roll re-aims the blade at the
/// rival; otherwise it arcs away harmlessly.
#[allow(clippy::too_many_arguments)]
fn deflect_blades(
    tuning: &FightTuning,
    rng: &mut FightRng,
    p_tf: &Transform,
    p_facing: Facing,
    r_tf: &Transform,
    blades: &mut Query<
        (&mut Blade, &mut Velocity, &Transform),
        (With<Blade>, Without<Player>, Without<Rival>),
    >,
    callouts: &mut MessageWriter<CalloutEvent>,
    bursts: &mut MessageWriter<ParticleBurstEvent>,
) {
    let cfg = &tuning.blade;
    let p_center = p_tf.translation.truncate();

    for (mut blade, mut vel, b_tf) in blades {
        if blade.deflected || blade.launch_delay > 0 {
            continue;
        }
        let b_pos = b_tf.translation.truncate();
        let to_blade = b_pos - p_center;
        if to_blade.length() >= cfg.deflect_radius || p_facing.sign() * to_blade.x <= -30.0 {
            continue;
        }

        blade.deflected = true;
        blade.homing = rng.roll() < cfg.homing_chance;
        vel.0 = if blade.homing {
            aim_velocity(b_pos, r_tf.translation.truncate(), cfg.deflect_speed)
        } else {
            reflect_arc(p_facing, rng.roll(), cfg.deflect_speed)
        };
        blade.angle = vel.0.y.atan2(vel.0.x);

        bursts.write(ParticleBurstEvent {
            pos: b_pos,
            color: PLAYER_COLOR,
            count: 8,
        });
        let text = if blade.homing { "DEFLECT!" } else { "PARRY!" };
        callouts.write(CalloutEvent::flavor(b_pos, text, PLAYER_COLOR, 30.0));
    }
}
