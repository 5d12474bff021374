//! Cinematics domain: scripted countdown timelines around the fight.
//!
//! Pure timer scripts: they place actors and emit narration callouts at
//! fixed frame thresholds, but never touch health, combat state, or
//! cooldowns. The one exception is the mid-fight transition, whose heal and
//! regeneration are part of the match contract.

use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;

use crate::combat::components::{ActionState, Facing, Health, Player, Rival};
use crate::content::FightTuning;
use crate::core::{
    CinematicTimers, FightPhase, FightRng, GamePhase, PhaseState, TickSet, in_phase,
};
use crate::fx::{CalloutEvent, ParticleBurstEvent, ShakeEvent};

/// Length of the narrative transition between the two fight phases.
pub const TRANSITION_TICKS: u32 = 180;

const RIVAL_GOLD: Color = Color::srgb(0.98, 0.83, 0.14);
const PLAYER_VIOLET: Color = Color::srgb(0.55, 0.47, 0.78);
const ALLY_GREEN: Color = Color::srgb(0.2, 0.66, 0.32);
const MENTOR_TAN: Color = Color::srgb(0.75, 0.6, 0.4);
const RUMBLE: Color = Color::srgba(1.0, 1.0, 1.0, 0.2);

pub struct CinematicsPlugin;

impl Plugin for CinematicsPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            FixedUpdate,
            (
                tick_intro.run_if(in_phase(GamePhase::Intro)),
                tick_pre_fight.run_if(in_phase(GamePhase::PreFight)),
                tick_approach.run_if(in_phase(GamePhase::Approach)),
                tick_transition.run_if(in_phase(GamePhase::Transition)),
            )
                .in_set(TickSet::Cinematic),
        );
    }
}

/// Slow zoom onto the waiting rival, with ambient rumble.
pub(crate) fn tick_intro(
    mut timers: ResMut<CinematicTimers>,
    mut state: ResMut<PhaseState>,
    mut rng: ResMut<FightRng>,
    mut callouts: MessageWriter<CalloutEvent>,
    rival: Query<&Transform, With<Rival>>,
) {
    timers.intro = timers.intro.saturating_sub(1);

    if rng.roll() < 0.1 {
        if let Ok(tf) = rival.single() {
            let size = 40.0 + rng.roll() * 40.0;
            callouts.write(CalloutEvent::flavor(
                tf.translation.truncate(),
                "~",
                RUMBLE,
                size,
            ));
        }
    }

    if timers.intro == 0 {
        state.phase = GamePhase::PreFight;
    }
}

/// The fallen-ally scene: fixed narration beats on a 300-tick countdown.
pub(crate) fn tick_pre_fight(
    mut timers: ResMut<CinematicTimers>,
    mut state: ResMut<PhaseState>,
    mut callouts: MessageWriter<CalloutEvent>,
    mut bursts: MessageWriter<ParticleBurstEvent>,
    mut shakes: MessageWriter<ShakeEvent>,
) {
    timers.pre_fight = timers.pre_fight.saturating_sub(1);
    let t = timers.pre_fight;

    match t {
        270 => {
            callouts.write(CalloutEvent::narration(
                Vec2::new(400.0, 150.0),
                "STAND AND FIGHT, TYRANT!",
                ALLY_GREEN,
                50.0,
            ));
        }
        250 => {
            callouts.write(CalloutEvent::narration(
                Vec2::new(400.0, 150.0),
                "CRYSTAL TEMPEST!",
                ALLY_GREEN,
                60.0,
            ));
        }
        180 => {
            callouts.write(CalloutEvent::narration(
                Vec2::new(800.0, 150.0),
                "TIME, HALT!",
                RIVAL_GOLD,
                70.0,
            ));
            shakes.write(ShakeEvent {
                intensity: 10.0,
                duration: 10,
            });
        }
        150 => {
            callouts.write(CalloutEvent::narration(
                Vec2::new(400.0, 150.0),
                "PERISH!",
                RIVAL_GOLD,
                80.0,
            ));
            bursts.write(ParticleBurstEvent {
                pos: Vec2::new(400.0, 80.0),
                color: Color::srgb(0.85, 0.1, 0.1),
                count: 60,
            });
            shakes.write(ShakeEvent {
                intensity: 20.0,
                duration: 20,
            });
        }
        100 => {
            callouts.write(CalloutEvent::narration(
                Vec2::new(300.0, 150.0),
                "NO--! HOLD ON!",
                MENTOR_TAN,
                50.0,
            ));
        }
        50 => {
            callouts.write(CalloutEvent::narration(
                Vec2::new(500.0, 150.0),
                "FUTILE!",
                RIVAL_GOLD,
                60.0,
            ));
            shakes.write(ShakeEvent {
                intensity: 15.0,
                duration: 15,
            });
        }
        _ => {}
    }

    if t > 200 && t < 250 && t % 5 == 0 {
        bursts.write(ParticleBurstEvent {
            pos: Vec2::new(500.0, 100.0),
            color: ALLY_GREEN,
            count: 15,
        });
    }

    if t == 0 {
        state.phase = GamePhase::Approach;
    }
}

/// The walk-in: both fighters close the gap while trading words.
pub(crate) fn tick_approach(
    tuning: Res<FightTuning>,
    mut timers: ResMut<CinematicTimers>,
    mut state: ResMut<PhaseState>,
    mut rng: ResMut<FightRng>,
    mut callouts: MessageWriter<CalloutEvent>,
    mut player: Query<
        (&mut Transform, &mut Facing, &mut ActionState),
        (With<Player>, Without<Rival>),
    >,
    mut rival: Query<
        (&mut Transform, &mut Facing, &mut ActionState),
        (With<Rival>, Without<Player>),
    >,
) {
    timers.approach = timers.approach.saturating_sub(1);
    let t = timers.approach;

    let Ok((mut p_tf, mut p_facing, mut p_state)) = player.single_mut() else {
        return;
    };
    let Ok((mut r_tf, mut r_facing, mut r_state)) = rival.single_mut() else {
        return;
    };

    // First tick of the scene: both fighters back on their marks.
    if t == 449 {
        p_tf.translation.x = tuning.player.spawn_x;
        r_tf.translation.x = tuning.rival.spawn_x;
        *p_facing = Facing::Right;
        *r_facing = Facing::Left;
        *p_state = ActionState::Idle;
        *r_state = ActionState::Idle;
    }

    match t {
        430 => {
            callouts.write(CalloutEvent::narration(
                Vec2::new(900.0, 200.0),
                "So you walked the whole way. Bold.",
                RIVAL_GOLD,
                45.0,
            ));
        }
        350 => {
            callouts.write(CalloutEvent::narration(
                Vec2::new(900.0, 200.0),
                "Running never crossed",
                RIVAL_GOLD,
                40.0,
            ));
            callouts.write(CalloutEvent::narration(
                Vec2::new(900.0, 160.0),
                "your mind?",
                RIVAL_GOLD,
                40.0,
            ));
        }
        250 => {
            callouts.write(CalloutEvent::narration(
                Vec2::new(200.0, 200.0),
                "I can't break your jaw",
                PLAYER_VIOLET,
                40.0,
            ));
            callouts.write(CalloutEvent::narration(
                Vec2::new(200.0, 160.0),
                "from over there.",
                PLAYER_VIOLET,
                40.0,
            ));
        }
        150 => {
            callouts.write(CalloutEvent::narration(
                Vec2::new(900.0, 200.0),
                "Then come. As close as you like.",
                RIVAL_GOLD,
                45.0,
            ));
        }
        _ => {}
    }

    if t < 150 && t > 10 {
        p_tf.translation.x += 1.5;
        r_tf.translation.x -= 1.5;
        *p_state = ActionState::Moving;
        *r_state = ActionState::Moving;
        if t % 20 == 0 {
            let size = 40.0;
            callouts.write(CalloutEvent::flavor(
                Vec2::new(p_tf.translation.x + 50.0, 30.0),
                "~",
                RUMBLE,
                size,
            ));
            callouts.write(CalloutEvent::flavor(
                Vec2::new(r_tf.translation.x - 50.0, 30.0),
                "~",
                RUMBLE,
                size,
            ));
        }
    } else {
        *p_state = ActionState::Idle;
        *r_state = ActionState::Idle;
    }

    // Consume a roll occasionally so long idles on the marks still rumble.
    if t <= 10 && rng.roll() < 0.05 {
        callouts.write(CalloutEvent::flavor(
            Vec2::new(600.0, 300.0),
            "~",
            RUMBLE,
            40.0,
        ));
    }

    if t == 0 {
        state.phase = GamePhase::Playing;
    }
}

/// Mid-fight transition: the player is mended by the fallen ally's parting
/// gift while the rival regenerates into the second, crueler phase.
pub(crate) fn tick_transition(
    tuning: Res<FightTuning>,
    mut timers: ResMut<CinematicTimers>,
    mut state: ResMut<PhaseState>,
    mut fight_phase: ResMut<FightPhase>,
    mut callouts: MessageWriter<CalloutEvent>,
    mut bursts: MessageWriter<ParticleBurstEvent>,
    mut player: Query<(&Transform, &mut Health), (With<Player>, Without<Rival>)>,
    mut rival: Query<&mut Health, (With<Rival>, Without<Player>)>,
) {
    let Ok((p_tf, mut p_health)) = player.single_mut() else {
        return;
    };
    let Ok(mut r_health) = rival.single_mut() else {
        return;
    };

    // Heal lands on the first transition tick.
    if timers.transition == TRANSITION_TICKS {
        p_health.heal(tuning.player.max_health * tuning.special.transition_heal_fraction);
        callouts.write(CalloutEvent::narration(
            Vec2::new(p_tf.translation.x, p_tf.translation.y + 100.0),
            "A PARTING GIFT...",
            ALLY_GREEN,
            60.0,
        ));
        bursts.write(ParticleBurstEvent {
            pos: p_tf.translation.truncate(),
            color: ALLY_GREEN,
            count: 50,
        });
    }

    timers.transition = timers.transition.saturating_sub(1);

    if timers.transition > 0 && timers.transition % 3 == 0 {
        bursts.write(ParticleBurstEvent {
            pos: p_tf.translation.truncate(),
            color: ALLY_GREEN,
            count: 1,
        });
    }

    // Back half of the window: the rival drinks itself back to full.
    let phase_two_max = tuning.rival.max_health * tuning.rival.phase_two_health_scale;
    if timers.transition < 120 {
        let regen = phase_two_max / 120.0;
        r_health.current = (r_health.current + regen).min(phase_two_max);
    }

    if timers.transition == 60 {
        callouts.write(CalloutEvent::narration(
            Vec2::new(600.0, 300.0),
            "THIS POWER... MAGNIFICENT!",
            RIVAL_GOLD,
            60.0,
        ));
    }

    if timers.transition == 0 {
        fight_phase.0 = 2;
        state.checkpoint = 2;
        r_health.max = phase_two_max;
        r_health.current = phase_two_max;
        state.phase = GamePhase::Playing;
        info!("fight phase 2 begins");
    }
}
