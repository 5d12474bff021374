//! End-to-end scenario tests: a headless app driven one fixed tick at a
//! time, with a seeded roll stream and scripted input snapshots.

use bevy::prelude::*;

use midnight_duel::cinematics::CinematicsPlugin;
use midnight_duel::combat::{
    ActionState, AiMode, AttackFrame, Combo, CombatPlugin, Health, PlayerAbilities, Rival,
    RivalAbilities, RivalAi, SpecialMoveTimer, Stun, TimeStop, Velocity,
};
use midnight_duel::combat::Player;
use midnight_duel::content::ContentPlugin;
use midnight_duel::core::{CorePlugin, FightRng, GamePhase, PhaseState};
use midnight_duel::fx::{CameraShake, FxPlugin};
use midnight_duel::hazard::{FallingHazard, HazardPlugin};
use midnight_duel::input::FightInput;
use midnight_duel::projectiles::{Blade, BladePlugin};

fn sim_app(seed: u64) -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins).add_plugins((
        ContentPlugin,
        CorePlugin,
        CombatPlugin,
        BladePlugin,
        HazardPlugin,
        CinematicsPlugin,
        FxPlugin,
    ));
    app.insert_resource(FightRng::seeded(seed));
    // Run Startup once so the fighters exist, then drive ticks by hand.
    app.update();
    app.world_mut().resource_mut::<PhaseState>().phase = GamePhase::Playing;
    app
}

fn tick(app: &mut App) {
    app.world_mut().run_schedule(FixedUpdate);
}

fn player_id(app: &mut App) -> Entity {
    let world = app.world_mut();
    let mut query = world.query_filtered::<Entity, With<Player>>();
    query.single(world).unwrap()
}

fn rival_id(app: &mut App) -> Entity {
    let world = app.world_mut();
    let mut query = world.query_filtered::<Entity, With<Rival>>();
    query.single(world).unwrap()
}

fn blade_count(app: &mut App) -> usize {
    let world = app.world_mut();
    let mut query = world.query_filtered::<Entity, With<Blade>>();
    query.iter(world).count()
}

#[test]
fn test_phase_one_kill_enters_transition_not_victory() {
    let mut app = sim_app(7);
    let player = player_id(&mut app);
    let rival = rival_id(&mut app);

    app.world_mut().get_mut::<Health>(rival).unwrap().current = 1.0;
    // Rival well inside star-finger range, dead ahead of the player.
    app.world_mut()
        .get_mut::<Transform>(rival)
        .unwrap()
        .translation
        .x = 500.0;
    let _ = player;

    app.world_mut()
        .resource_mut::<FightInput>()
        .star_finger_pressed = true;

    for _ in 0..10 {
        tick(&mut app);
    }

    let state = app.world().resource::<PhaseState>();
    assert_eq!(state.phase, GamePhase::Transition);
    assert!(app.world().get::<Health>(rival).unwrap().current <= 0.0);
    // Any surviving blades were swept up on entry.
    assert_eq!(blade_count(&mut app), 0);
}

#[test]
fn test_combo_threshold_forces_special_move() {
    let mut app = sim_app(11);
    let player = player_id(&mut app);

    app.world_mut().resource_mut::<Combo>().0 = 100;
    // Held movement must not matter.
    app.world_mut().resource_mut::<FightInput>().left = true;

    tick(&mut app);

    assert_eq!(
        *app.world().get::<ActionState>(player).unwrap(),
        ActionState::SpecialMove
    );
    assert_eq!(app.world().resource::<SpecialMoveTimer>().0, 180);

    // Next tick the scripted ultimate asserts the player-exempt stop.
    tick(&mut app);
    let ts = app.world().resource::<TimeStop>();
    assert!(ts.active);
    assert!(ts.countered);
}

#[test]
fn test_barrage_deflects_blades() {
    let mut app = sim_app(3);
    let player = player_id(&mut app);
    let rival = rival_id(&mut app);

    let p_pos = app.world().get::<Transform>(player).unwrap().translation;
    *app.world_mut().get_mut::<ActionState>(player).unwrap() = ActionState::Barrage;
    app.world_mut()
        .get_mut::<PlayerAbilities>(player)
        .unwrap()
        .barrage_active = 120;

    // A live blade just ahead of the player, flying in.
    let blade = app
        .world_mut()
        .spawn((
            Blade::default(),
            Velocity(Vec2::new(-14.0, 0.0)),
            Transform::from_xyz(p_pos.x + 80.0, p_pos.y, 2.0),
        ))
        .id();

    tick(&mut app);

    let deflected = app.world().get::<Blade>(blade).unwrap();
    assert!(deflected.deflected);
    let vel = app.world().get::<Velocity>(blade).unwrap().0;
    assert!((vel.length() - 22.0).abs() < 1e-3);
    if deflected.homing {
        // Re-aimed at the rival's current center.
        let r_pos = app.world().get::<Transform>(rival).unwrap().translation;
        let b_pos = app.world().get::<Transform>(blade).unwrap().translation;
        assert!(vel.dot((r_pos - b_pos).truncate()) > 0.0);
    } else {
        // Reflected arc always carries upward.
        assert!(vel.y > 0.0);
    }
}

#[test]
fn test_homing_blade_deals_amplified_damage_and_builds_combo() {
    let mut app = sim_app(5);
    let rival = rival_id(&mut app);

    let r_pos = app.world().get::<Transform>(rival).unwrap().translation;
    let before = app.world().get::<Health>(rival).unwrap().current;

    app.world_mut().spawn((
        Blade {
            launch_delay: 0,
            angle: 0.0,
            deflected: true,
            homing: true,
        },
        Velocity(Vec2::new(22.0, 0.0)),
        Transform::from_xyz(r_pos.x - 30.0, r_pos.y, 2.0),
    ));

    tick(&mut app);

    let after = app.world().get::<Health>(rival).unwrap().current;
    assert_eq!(before - after, 75.0);
    assert_eq!(app.world().resource::<Combo>().0, 1);
    // One blade, one hit: it is gone and can never land a second.
    assert_eq!(blade_count(&mut app), 0);
}

#[test]
fn test_missed_counter_window_costs_health_and_combo() {
    let mut app = sim_app(13);
    let player = player_id(&mut app);
    let rival = rival_id(&mut app);

    app.world_mut().resource_mut::<Combo>().0 = 37;
    *app.world_mut().get_mut::<ActionState>(rival).unwrap() = ActionState::PreparingTimeStop;
    {
        let mut ai = app.world_mut().get_mut::<RivalAi>(rival).unwrap();
        ai.mode = AiMode::Acting;
        ai.action_timer = 30;
    }

    tick(&mut app);

    let p_health = app.world().get::<Health>(player).unwrap();
    assert_eq!(p_health.current, 850.0);
    assert_eq!(app.world().resource::<Combo>().0, 0);
    assert!(!app.world().resource::<TimeStop>().active);
    // Teleported adjacent, behind the player's facing.
    let p_x = app.world().get::<Transform>(player).unwrap().translation.x;
    let r_x = app.world().get::<Transform>(rival).unwrap().translation.x;
    assert_eq!(r_x, p_x - 80.0);
    assert_eq!(
        *app.world().get::<ActionState>(rival).unwrap(),
        ActionState::Idle
    );
    assert_eq!(
        app.world()
            .get::<RivalAbilities>(rival)
            .unwrap()
            .time_stop_cooldown,
        420
    );
}

#[test]
fn test_countered_time_stop_exempts_the_player() {
    let mut app = sim_app(13);
    let player = player_id(&mut app);
    let rival = rival_id(&mut app);

    *app.world_mut().get_mut::<ActionState>(rival).unwrap() = ActionState::PreparingTimeStop;
    {
        let mut ai = app.world_mut().get_mut::<RivalAi>(rival).unwrap();
        ai.mode = AiMode::Acting;
        ai.action_timer = 30;
    }
    app.world_mut().resource_mut::<FightInput>().counter_held = true;

    tick(&mut app);

    let ts = app.world().resource::<TimeStop>();
    assert!(ts.active);
    assert!(ts.countered);
    assert_eq!(app.world().get::<Health>(player).unwrap().current, 1000.0);
}

#[test]
fn test_hazard_splash_miss_only_shakes() {
    let mut app = sim_app(17);
    let player = player_id(&mut app);

    app.world_mut().resource_mut::<Combo>().0 = 5;
    let p_x = app.world().get::<Transform>(player).unwrap().translation.x;

    // Warning elapsed, one descent step from impact, far from the player.
    let hazard = app
        .world_mut()
        .spawn((
            FallingHazard {
                warning: 0,
                impacted: false,
                cleanup: 72,
            },
            Transform::from_xyz(p_x + 400.0, 60.0, 3.0),
        ))
        .id();

    tick(&mut app);

    assert!(app.world().get::<FallingHazard>(hazard).unwrap().impacted);
    assert_eq!(app.world().get::<Health>(player).unwrap().current, 1000.0);
    assert_eq!(app.world().resource::<Combo>().0, 5);
    // The small shake landed, nothing stronger.
    let shake = app.world().resource::<CameraShake>();
    assert_eq!(shake.intensity, 12.0);
}

#[test]
fn test_uncountered_time_stop_freezes_only_the_player() {
    let mut app = sim_app(23);
    let player = player_id(&mut app);
    let rival = rival_id(&mut app);

    {
        let mut ts = app.world_mut().resource_mut::<TimeStop>();
        ts.begin(300, false);
    }
    // Player frozen mid-air with pending timers.
    app.world_mut()
        .get_mut::<Transform>(player)
        .unwrap()
        .translation
        .y = 300.0;
    app.world_mut().get_mut::<Stun>(player).unwrap().frames = 10;
    app.world_mut()
        .get_mut::<PlayerAbilities>(player)
        .unwrap()
        .star_finger_cooldown = 50;
    app.world_mut().get_mut::<Stun>(rival).unwrap().frames = 2;
    app.world_mut()
        .get_mut::<RivalAbilities>(rival)
        .unwrap()
        .barrage_cooldown = 7;

    for _ in 0..3 {
        tick(&mut app);
    }

    // Non-exempt actor: timers and position untouched.
    assert_eq!(app.world().get::<Stun>(player).unwrap().frames, 10);
    assert_eq!(
        app.world()
            .get::<PlayerAbilities>(player)
            .unwrap()
            .star_finger_cooldown,
        50
    );
    assert_eq!(
        app.world().get::<Transform>(player).unwrap().translation.y,
        300.0
    );
    assert_eq!(app.world().get::<AttackFrame>(player).unwrap().0, 0);

    // The rival's clock keeps running; its cooldowns wait out the stun,
    // then resume.
    assert_eq!(app.world().get::<Stun>(rival).unwrap().frames, 0);
    assert_eq!(
        app.world()
            .get::<RivalAbilities>(rival)
            .unwrap()
            .barrage_cooldown,
        5
    );
    assert_eq!(app.world().resource::<TimeStop>().frames_left, 297);
}

#[test]
fn test_skip_aborts_cinematic_into_canonical_fight_start() {
    let mut app = sim_app(29);
    let player = player_id(&mut app);
    let rival = rival_id(&mut app);

    app.world_mut().resource_mut::<PhaseState>().phase = GamePhase::Approach;
    // Scatter the fighters mid-scene.
    app.world_mut()
        .get_mut::<Transform>(player)
        .unwrap()
        .translation
        .x = 555.0;
    app.world_mut()
        .get_mut::<Transform>(rival)
        .unwrap()
        .translation
        .x = 650.0;
    app.world_mut().resource_mut::<FightInput>().skip_pressed = true;

    tick(&mut app);

    assert_eq!(
        app.world().resource::<PhaseState>().phase,
        GamePhase::Playing
    );
    assert_eq!(
        app.world().get::<Transform>(player).unwrap().translation.x,
        200.0
    );
    // Back on the mark, minus the single AI walk step taken in the same
    // tick once live play resumed.
    assert_eq!(
        app.world().get::<Transform>(rival).unwrap().translation.x,
        892.0
    );
    assert_eq!(
        *app.world().get::<ActionState>(player).unwrap(),
        ActionState::Idle
    );
}
