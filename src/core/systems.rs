//! Core domain: match flow control, fighter lifecycle, and terminal checks.

use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::prelude::*;

use crate::cinematics::TRANSITION_TICKS;
use crate::combat::abilities::{PlayerAbilities, RivalAbilities};
use crate::combat::ai::RivalAi;
use crate::combat::components::{
    ActionState, ActionTrigger, AttackFrame, Facing, Fighter, Health, Player, Rival, Stun,
    Velocity,
};
use crate::combat::special::{Combo, SpecialMoveTimer, TimeStop};
use crate::content::FightTuning;
use crate::core::resources::{CinematicTimers, FightPhase, MatchConfig, MatchResetEvent};
use crate::core::state::{GamePhase, PhaseState};
use crate::fx::{CameraShake, Callout, Particle};
use crate::hazard::FallingHazard;
use crate::input::FightInput;
use crate::projectiles::Blade;

pub(crate) fn spawn_fighters(
    mut commands: Commands,
    tuning: Res<FightTuning>,
    config: Res<MatchConfig>,
) {
    let arena = &tuning.arena;
    let pt = &tuning.player;
    let rt = &tuning.rival;

    commands.spawn((
        Player,
        Fighter {
            width: pt.width,
            height: pt.height,
        },
        Health::new(pt.max_health),
        Velocity::default(),
        Facing::Right,
        ActionState::default(),
        Stun::default(),
        AttackFrame::default(),
        PlayerAbilities::default(),
        Transform::from_xyz(pt.spawn_x, arena.ground_y + pt.height / 2.0, 1.0),
    ));

    commands.spawn((
        Rival,
        Fighter {
            width: rt.width,
            height: rt.height,
        },
        Health::new(rt.max_health),
        Velocity::default(),
        Facing::Left,
        ActionState::default(),
        Stun::default(),
        AttackFrame::default(),
        RivalAbilities::at_match_start(&tuning),
        RivalAi::default(),
        Transform::from_xyz(rt.spawn_x, arena.ground_y + rt.height / 2.0, 1.0),
    ));

    info!("fighters spawned; match seed {}", config.seed);
}

/// Pause toggling, plus the escape route from the end screens back to menu.
pub(crate) fn handle_pause(input: Res<FightInput>, mut state: ResMut<PhaseState>) {
    if !input.pause_pressed {
        return;
    }
    match state.phase {
        GamePhase::Paused => {
            state.phase = state.paused_from;
        }
        GamePhase::Victory | GamePhase::Defeat => {
            state.phase = GamePhase::Menu;
            state.checkpoint = 1;
        }
        phase if phase.pausable() => {
            state.paused_from = phase;
            state.phase = GamePhase::Paused;
        }
        _ => {}
    }
}

/// Menu start and end-screen restart; restart resumes from the checkpoint.
pub(crate) fn handle_menu_flow(
    input: Res<FightInput>,
    state: Res<PhaseState>,
    mut resets: MessageWriter<MatchResetEvent>,
) {
    match state.phase {
        GamePhase::Menu if input.confirm_pressed => {
            resets.write(MatchResetEvent { start_phase: 1 });
        }
        GamePhase::Victory | GamePhase::Defeat if input.restart_pressed => {
            resets.write(MatchResetEvent {
                start_phase: state.checkpoint,
            });
        }
        _ => {}
    }
}

/// Debug/skip input: abort any cinematic, restore the canonical fight-start
/// snapshot, and drop straight into live play.
pub(crate) fn handle_skip(
    mut commands: Commands,
    input: Res<FightInput>,
    tuning: Res<FightTuning>,
    mut state: ResMut<PhaseState>,
    mut timers: ResMut<CinematicTimers>,
    cleanup: Query<
        Entity,
        Or<(
            With<Blade>,
            With<FallingHazard>,
            With<Particle>,
            With<Callout>,
        )>,
    >,
    mut player: Query<
        (&mut Transform, &mut Velocity, &mut Facing, &mut ActionState, &Fighter),
        (With<Player>, Without<Rival>),
    >,
    mut rival: Query<
        (&mut Transform, &mut Velocity, &mut Facing, &mut ActionState, &Fighter),
        (With<Rival>, Without<Player>),
    >,
) {
    if !input.skip_pressed || !state.phase.skippable() {
        return;
    }

    timers.intro = 0;
    timers.pre_fight = 0;
    timers.approach = 0;
    timers.transition = 0;

    if let Ok((mut tf, mut vel, mut facing, mut action, fighter)) = player.single_mut() {
        tf.translation.x = tuning.player.spawn_x;
        tf.translation.y = tuning.arena.ground_y + fighter.height / 2.0;
        vel.0 = Vec2::ZERO;
        *facing = Facing::Right;
        *action = ActionState::Idle;
    }
    if let Ok((mut tf, mut vel, mut facing, mut action, fighter)) = rival.single_mut() {
        tf.translation.x = tuning.rival.spawn_x;
        tf.translation.y = tuning.arena.ground_y + fighter.height / 2.0;
        vel.0 = Vec2::ZERO;
        *facing = Facing::Left;
        *action = ActionState::Idle;
    }
    for entity in &cleanup {
        commands.entity(entity).despawn();
    }

    state.phase = GamePhase::Playing;
    info!("cinematic skipped");
}

/// Rebuild the whole match state for a fresh fight at the requested phase.
#[allow(clippy::too_many_arguments)]
pub(crate) fn apply_match_reset(
    mut commands: Commands,
    mut resets: MessageReader<MatchResetEvent>,
    tuning: Res<FightTuning>,
    mut state: ResMut<PhaseState>,
    mut fight_phase: ResMut<FightPhase>,
    mut combo: ResMut<Combo>,
    mut time_stop: ResMut<TimeStop>,
    mut special_timer: ResMut<SpecialMoveTimer>,
    mut shake: ResMut<CameraShake>,
    mut timers: ResMut<CinematicTimers>,
    cleanup: Query<
        Entity,
        Or<(
            With<Blade>,
            With<FallingHazard>,
            With<Particle>,
            With<Callout>,
        )>,
    >,
    mut player: Query<
        (
            &mut Transform,
            &mut Velocity,
            &mut Facing,
            &mut ActionState,
            &mut Stun,
            &mut AttackFrame,
            &mut Health,
            &mut PlayerAbilities,
            &Fighter,
        ),
        (With<Player>, Without<Rival>),
    >,
    mut rival: Query<
        (
            &mut Transform,
            &mut Velocity,
            &mut Facing,
            &mut ActionState,
            &mut Stun,
            &mut AttackFrame,
            &mut Health,
            &mut RivalAbilities,
            &mut RivalAi,
            &Fighter,
        ),
        (With<Rival>, Without<Player>),
    >,
) {
    let mut start_phase = None;
    for reset in resets.read() {
        start_phase = Some(reset.start_phase);
    }
    let Some(start_phase) = start_phase else {
        return;
    };

    if start_phase == 1 {
        state.checkpoint = 1;
    }
    fight_phase.0 = start_phase;
    combo.reset();
    time_stop.clear();
    special_timer.0 = 0;
    shake.clear();
    *timers = CinematicTimers::default();

    for entity in &cleanup {
        commands.entity(entity).despawn();
    }

    if let Ok((mut tf, mut vel, mut facing, mut action, mut stun, mut frame, mut health, mut abilities, fighter)) =
        player.single_mut()
    {
        tf.translation.x = tuning.player.spawn_x;
        tf.translation.y = tuning.arena.ground_y + fighter.height / 2.0;
        vel.0 = Vec2::ZERO;
        *facing = Facing::Right;
        *action = ActionState::Idle;
        stun.frames = 0;
        frame.0 = 0;
        *health = Health::new(tuning.player.max_health);
        *abilities = PlayerAbilities::default();
    }

    if let Ok((mut tf, mut vel, mut facing, mut action, mut stun, mut frame, mut health, mut abilities, mut ai, fighter)) =
        rival.single_mut()
    {
        tf.translation.x = tuning.rival.spawn_x;
        tf.translation.y = tuning.arena.ground_y + fighter.height / 2.0;
        vel.0 = Vec2::ZERO;
        *facing = Facing::Left;
        *action = ActionState::Idle;
        stun.frames = 0;
        frame.0 = 0;
        let max = if start_phase == 2 {
            tuning.rival.max_health * tuning.rival.phase_two_health_scale
        } else {
            tuning.rival.max_health
        };
        *health = Health::new(max);
        *abilities = RivalAbilities::at_match_start(&tuning);
        ai.reset();
    }

    state.phase = if start_phase == 1 {
        GamePhase::Intro
    } else {
        GamePhase::Playing
    };
    info!("match reset into fight phase {start_phase}");
}

/// Terminal conditions, evaluated last in the tick so same-tick hits and
/// spawns never reorder around a killing blow.
pub(crate) fn check_terminal(
    mut commands: Commands,
    fight_phase: Res<FightPhase>,
    mut state: ResMut<PhaseState>,
    mut timers: ResMut<CinematicTimers>,
    blades: Query<Entity, With<Blade>>,
    mut player: Query<(&Health, &mut ActionState), (With<Player>, Without<Rival>)>,
    mut rival: Query<
        (&mut Health, &mut ActionState, &mut RivalAi),
        (With<Rival>, Without<Player>),
    >,
) {
    let Ok((p_health, mut p_state)) = player.single_mut() else {
        return;
    };
    if p_health.is_dead() {
        p_state.try_transition(ActionTrigger::Defeat);
        state.phase = GamePhase::Defeat;
        info!("player defeated");
        return;
    }

    let Ok((mut r_health, mut r_state, mut ai)) = rival.single_mut() else {
        return;
    };
    if r_health.is_dead() {
        if fight_phase.0 == 1 {
            // Phase 1 falls into the narrative transition, never victory.
            state.phase = GamePhase::Transition;
            timers.transition = TRANSITION_TICKS;
            r_health.current = 0.0;
            *r_state = ActionState::Idle;
            ai.reset();
            for entity in &blades {
                commands.entity(entity).despawn();
            }
            info!("fight phase 1 over; transition begins");
        } else {
            r_state.try_transition(ActionTrigger::Defeat);
            state.phase = GamePhase::Victory;
            info!("rival defeated");
        }
    }
}

/// Edge flags live for exactly one tick.
pub(crate) fn flush_input_edges(mut input: ResMut<FightInput>) {
    input.clear_edges();
}
