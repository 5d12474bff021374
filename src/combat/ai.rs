//! Combat domain: the rival's two-level decision state machine.
//!
//! While `Idle` the rival repositions and periodically rolls one weighted
//! choice through a priority cascade of precondition-gated actions; while
//! `Acting` it executes the committed action until its window closes. The
//! cascade itself is a pure function of a single roll so tests can force
//! every branch.

use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;

use crate::combat::abilities::RivalAbilities;
use crate::combat::components::{
    ActionState, ActionTrigger, Facing, Fighter, Health, Player, Rival, Stun, Velocity,
};
use crate::combat::special::{Combo, TimeStop, rival_clock_runs};
use crate::content::FightTuning;
use crate::core::{FightPhase, FightRng};
use crate::fx::{CalloutEvent, ParticleBurstEvent, ShakeEvent};
use crate::hazard::{FallingHazard, spawn_hazard};
use crate::input::FightInput;
use crate::physics;
use crate::projectiles::{Blade, spawn_volley};

const RIVAL_COLOR: Color = Color::srgb(0.98, 0.83, 0.14);
const PLAYER_COLOR: Color = Color::srgb(0.55, 0.47, 0.78);

/// Whether the rival is choosing or executing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AiMode {
    #[default]
    Idle,
    Acting,
}

/// Rival AI bookkeeping; the action timer counts up and is reset on every
/// mode transition.
#[derive(Component, Debug, Default)]
pub struct RivalAi {
    pub mode: AiMode,
    pub action_timer: u32,
}

impl RivalAi {
    pub fn reset(&mut self) {
        self.mode = AiMode::Idle;
        self.action_timer = 0;
    }

    fn commit(&mut self) {
        self.mode = AiMode::Acting;
        self.action_timer = 0;
    }
}

/// One committed choice out of the decision cascade.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    TimeStop,
    Barrage,
    Volley,
    HazardDrop,
    Advance,
    Retreat,
    Hold,
}

/// Inputs to the decision cascade.
#[derive(Debug, Clone, Copy)]
pub struct DecisionContext {
    pub distance: f32,
    pub time_stopped: bool,
    pub time_stop_ready: bool,
    pub barrage_ready: bool,
    pub hazard_active: bool,
}

/// Priority-ordered weighted choice over precondition gates, evaluated
/// against a single uniform roll. Never selects an on-cooldown action and
/// never stacks a second hazard.
pub fn choose_action(ctx: &DecisionContext, roll: f32) -> Decision {
    if roll < 0.4 && ctx.time_stop_ready && !ctx.time_stopped {
        Decision::TimeStop
    } else if ctx.distance < 180.0 && roll < 0.8 && ctx.barrage_ready {
        Decision::Barrage
    } else if ctx.distance > 350.0 && roll < 0.7 {
        Decision::Volley
    } else if roll < 0.15 && !ctx.time_stopped && !ctx.hazard_active {
        Decision::HazardDrop
    } else if ctx.distance > 100.0 {
        Decision::Advance
    } else if roll < 0.1 {
        Decision::Retreat
    } else {
        Decision::Hold
    }
}

#[allow(clippy::too_many_arguments)]
pub(crate) fn update_rival_ai(
    mut commands: Commands,
    tuning: Res<FightTuning>,
    input: Res<FightInput>,
    fight_phase: Res<FightPhase>,
    mut time_stop: ResMut<TimeStop>,
    mut combo: ResMut<Combo>,
    mut rng: ResMut<FightRng>,
    mut callouts: MessageWriter<CalloutEvent>,
    mut bursts: MessageWriter<ParticleBurstEvent>,
    mut shakes: MessageWriter<ShakeEvent>,
    hazards: Query<(), With<FallingHazard>>,
    mut player: Query<
        (&mut Transform, &Fighter, &mut Health, &ActionState, &Facing),
        (With<Player>, Without<Rival>, Without<Blade>),
    >,
    mut rival: Query<
        (
            &mut Transform,
            &mut Velocity,
            &mut Facing,
            &mut ActionState,
            &Stun,
            &Fighter,
            &mut RivalAi,
            &mut RivalAbilities,
        ),
        (With<Rival>, Without<Player>, Without<Blade>),
    >,
) {
    let Ok((mut p_tf, p_fighter, mut p_health, p_state, p_facing)) = player.single_mut() else {
        return;
    };
    let Ok((
        mut r_tf,
        mut r_vel,
        mut r_facing,
        mut r_state,
        r_stun,
        r_fighter,
        mut ai,
        mut abilities,
    )) = rival.single_mut()
    else {
        return;
    };

    if r_stun.is_stunned() || !rival_clock_runs(&time_stop, *p_state) {
        return;
    }

    let rt = &tuning.rival;
    ai.action_timer += 1;
    *r_facing = Facing::toward(r_tf.translation.x, p_tf.translation.x);

    let base_speed = if time_stop.active {
        rt.walk_speed_stopped
    } else {
        rt.walk_speed
    };
    let phase_scale = if fight_phase.is_second() {
        rt.phase_two_speed_scale
    } else {
        1.0
    };
    let walk_speed = base_speed * phase_scale;
    let distance = (p_tf.translation.x - r_tf.translation.x).abs();
    let toward = (p_tf.translation.x - r_tf.translation.x).signum();

    match ai.mode {
        AiMode::Idle => {
            if ai.action_timer > rt.decision_interval {
                let ctx = DecisionContext {
                    distance,
                    time_stopped: time_stop.active,
                    time_stop_ready: abilities.time_stop_ready(),
                    barrage_ready: abilities.barrage_ready(),
                    hazard_active: !hazards.is_empty(),
                };
                match choose_action(&ctx, rng.roll()) {
                    Decision::TimeStop => {
                        r_state.try_transition(ActionTrigger::BeginTimeStopPrep);
                        ai.commit();
                        callouts.write(CalloutEvent::flavor(
                            r_tf.translation.truncate(),
                            "TIME, HALT!",
                            RIVAL_COLOR,
                            80.0,
                        ));
                    }
                    Decision::Barrage => {
                        r_state.try_transition(ActionTrigger::StartBarrage);
                        ai.commit();
                    }
                    Decision::Volley => {
                        r_state.try_transition(ActionTrigger::StartVolley);
                        ai.commit();
                        spawn_volley(
                            &mut commands,
                            &tuning,
                            time_stop.active,
                            r_tf.translation.truncate(),
                            *r_facing,
                        );
                    }
                    Decision::HazardDrop => {
                        spawn_hazard(&mut commands, &tuning, p_tf.translation.x);
                        ai.commit();
                    }
                    Decision::Advance => {
                        r_tf.translation.x += toward * walk_speed;
                    }
                    Decision::Retreat => {
                        r_tf.translation.x -= toward * walk_speed;
                    }
                    Decision::Hold => {}
                }
            } else if distance > rt.melee_gap {
                r_tf.translation.x += toward * walk_speed;
            }
        }
        AiMode::Acting => match *r_state {
            ActionState::PreparingTimeStop => {
                if ai.action_timer > rt.telegraph_frames {
                    if input.counter_held {
                        // Counter window hit: the stop flips to the player.
                        time_stop.begin(rt.time_stop_duration, true);
                        callouts.write(CalloutEvent::flavor(
                            p_tf.translation.truncate(),
                            "NOT THIS TIME!",
                            PLAYER_COLOR,
                            80.0,
                        ));
                        shakes.write(ShakeEvent {
                            intensity: 15.0,
                            duration: 15,
                        });
                    } else {
                        // Stopped-time assault: blink behind the player.
                        r_tf.translation.x =
                            p_tf.translation.x - p_facing.sign() * rt.assault_offset;
                        r_tf.translation.y = p_tf.translation.y;
                        p_health.damage(rt.assault_damage);
                        combo.reset();
                        bursts.write(ParticleBurstEvent {
                            pos: p_tf.translation.truncate(),
                            color: Color::srgb(0.85, 0.1, 0.1),
                            count: 35,
                        });
                        callouts.write(CalloutEvent::flavor(
                            r_tf.translation.truncate(),
                            "TOO SLOW!",
                            RIVAL_COLOR,
                            100.0,
                        ));
                        shakes.write(ShakeEvent {
                            intensity: 15.0,
                            duration: 25,
                        });
                    }
                    r_state.try_transition(ActionTrigger::ResolveTimeStopPrep);
                    ai.reset();
                    abilities.time_stop_cooldown = if fight_phase.is_second() {
                        rt.time_stop_cooldown_phase_two
                    } else {
                        rt.time_stop_cooldown_phase_one
                    };
                }
            }
            ActionState::Barrage => {
                let window = if time_stop.active {
                    rt.barrage_duration_stopped
                } else {
                    rt.barrage_duration
                };
                if ai.action_timer > window {
                    r_state.try_transition(ActionTrigger::FinishBarrage);
                    ai.reset();
                    abilities.barrage_cooldown = if fight_phase.is_second() {
                        rt.barrage_cooldown_phase_two
                    } else {
                        rt.barrage_cooldown_phase_one
                    };
                } else {
                    if rng.roll() < 0.5 {
                        let size = 55.0 + rng.roll() * 40.0;
                        callouts.write(CalloutEvent::flavor(
                            Vec2::new(
                                r_tf.translation.x + r_facing.sign() * 60.0,
                                r_tf.translation.y,
                            ),
                            "FUTILE!",
                            RIVAL_COLOR,
                            size,
                        ));
                    }
                    // Clash suppresses damage; the player-side resolver owns
                    // the mutual pushback.
                    let clashing =
                        *p_state == ActionState::Barrage && distance < tuning.player.clash_range;
                    let ahead =
                        r_facing.sign() * (p_tf.translation.x - r_tf.translation.x) > 0.0;
                    if !clashing && distance < rt.barrage_range && ahead {
                        p_health.damage(rt.barrage_damage);
                        combo.reset();
                        bursts.write(ParticleBurstEvent {
                            pos: p_tf.translation.truncate(),
                            color: PLAYER_COLOR,
                            count: 2,
                        });
                        shakes.write(ShakeEvent {
                            intensity: 2.0,
                            duration: 5,
                        });
                        p_tf.translation.x += r_facing.sign() * 0.5;
                    }
                }
            }
            _ => {
                // Generic committed window (volley, hazard drop).
                if ai.action_timer > rt.action_timeout {
                    r_state.try_transition(ActionTrigger::FinishAttack);
                    ai.reset();
                }
            }
        },
    }

    physics::integrate(&tuning.arena, r_fighter, &mut r_tf, &mut r_vel);
    physics::clamp_x(&tuning.arena, r_fighter, &mut r_tf);
    physics::clamp_x(&tuning.arena, p_fighter, &mut p_tf);
}
