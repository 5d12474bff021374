//! Combat domain: unit tests for the state table, timers, and AI decisions.

use super::abilities::{PlayerAbilities, RivalAbilities};
use super::ai::{Decision, DecisionContext, choose_action};
use super::components::{ActionState, ActionTrigger, Health};
use super::special::{
    TimeStop, blade_clock_runs, player_clock_runs, rival_clock_runs,
};
use crate::content::FightTuning;

#[test]
fn action_state_is_exactly_one_tag_and_transitions_are_gated() {
    let mut state = ActionState::Idle;

    assert!(state.try_transition(ActionTrigger::StartBarrage));
    assert_eq!(state, ActionState::Barrage);

    // A committed barrage cannot start another ability.
    assert!(!state.try_transition(ActionTrigger::StartStarFinger));
    assert_eq!(state, ActionState::Barrage);

    assert!(state.try_transition(ActionTrigger::FinishBarrage));
    assert_eq!(state, ActionState::Idle);
}

#[test]
fn special_move_is_reachable_from_any_living_state() {
    for from in [
        ActionState::Idle,
        ActionState::Moving,
        ActionState::Barrage,
        ActionState::StarFinger,
        ActionState::HeavyPunch,
        ActionState::Hurt,
    ] {
        assert_eq!(
            from.apply(ActionTrigger::ForceSpecial),
            Some(ActionState::SpecialMove),
            "{from:?} should yield to the forced special"
        );
    }
    assert_eq!(ActionState::Dead.apply(ActionTrigger::ForceSpecial), None);
}

#[test]
fn dead_is_terminal() {
    let mut state = ActionState::Barrage;
    assert!(state.try_transition(ActionTrigger::Defeat));
    assert_eq!(state, ActionState::Dead);
    for trigger in [
        ActionTrigger::Walk,
        ActionTrigger::StartBarrage,
        ActionTrigger::ForceSpecial,
        ActionTrigger::FinishBarrage,
    ] {
        assert!(!state.try_transition(trigger));
    }
}

#[test]
fn cooldown_decrement_is_monotone_and_floored() {
    let mut abilities = PlayerAbilities {
        barrage_active: 0,
        barrage_cooldown: 2,
        star_finger_cooldown: 1,
        heavy_punch_cooldown: 0,
    };

    for _ in 0..5 {
        let before = abilities.clone();
        abilities.tick();
        assert_eq!(
            abilities.barrage_cooldown,
            before.barrage_cooldown.saturating_sub(1)
        );
        assert_eq!(
            abilities.star_finger_cooldown,
            before.star_finger_cooldown.saturating_sub(1)
        );
        assert_eq!(
            abilities.heavy_punch_cooldown,
            before.heavy_punch_cooldown.saturating_sub(1)
        );
    }
    assert_eq!(abilities.heavy_punch_cooldown, 0);
}

#[test]
fn abilities_refuse_to_trigger_on_cooldown_or_mid_action() {
    let mut abilities = PlayerAbilities::default();
    abilities.star_finger_cooldown = 10;

    assert!(!abilities.can_star_finger(ActionState::Idle));
    assert!(abilities.can_heavy_punch(ActionState::Moving));
    assert!(!abilities.can_heavy_punch(ActionState::Barrage));
    assert!(!abilities.can_barrage(ActionState::HeavyPunch));
}

#[test]
fn rival_time_stop_opener_is_held_back() {
    let tuning = FightTuning::default();
    let abilities = RivalAbilities::at_match_start(&tuning);
    assert!(!abilities.time_stop_ready());
    assert!(abilities.barrage_ready());
}

#[test]
fn health_reporting_clamps_but_internal_value_may_go_negative() {
    let mut health = Health::new(100.0);
    health.damage(250.0);
    assert_eq!(health.current, -150.0);
    assert!(health.is_dead());
    assert_eq!(health.display(), 0.0);
    assert_eq!(health.percent(), 0.0);

    health.heal(500.0);
    assert_eq!(health.current, 100.0);
    assert_eq!(health.percent(), 1.0);
}

#[test]
fn decision_cascade_honors_priority_and_gates() {
    let base = DecisionContext {
        distance: 150.0,
        time_stopped: false,
        time_stop_ready: true,
        barrage_ready: true,
        hazard_active: false,
    };

    // Lowest rolls reach the highest-priority gate that is open.
    assert_eq!(choose_action(&base, 0.1), Decision::TimeStop);

    // Time-stop on cooldown falls through to the melee gate.
    let no_stop = DecisionContext {
        time_stop_ready: false,
        ..base
    };
    assert_eq!(choose_action(&no_stop, 0.1), Decision::Barrage);

    // Out of melee range but far enough for a volley.
    let far = DecisionContext {
        distance: 400.0,
        time_stop_ready: false,
        ..base
    };
    assert_eq!(choose_action(&far, 0.5), Decision::Volley);

    // Hazard branch is refused while one is already falling.
    let mid = DecisionContext {
        distance: 250.0,
        time_stop_ready: false,
        ..base
    };
    assert_eq!(choose_action(&mid, 0.12), Decision::HazardDrop);
    let occupied = DecisionContext {
        hazard_active: true,
        ..mid
    };
    assert_eq!(choose_action(&occupied, 0.12), Decision::Advance);

    // High roll outside melee reach: close the gap.
    assert_eq!(choose_action(&no_stop, 0.95), Decision::Advance);

    // Already in melee with everything gated off: back off or stand fast.
    let close = DecisionContext {
        distance: 80.0,
        time_stop_ready: false,
        barrage_ready: false,
        hazard_active: true,
        ..base
    };
    assert_eq!(choose_action(&close, 0.05), Decision::Retreat);
    assert_eq!(choose_action(&close, 0.95), Decision::Hold);
}

#[test]
fn time_stop_predicates_keep_their_asymmetry() {
    let mut ts = TimeStop::default();
    ts.begin(300, false);

    // Uncountered stop: the player freezes, the rival does not.
    assert!(!player_clock_runs(&ts, ActionState::Idle));
    assert!(rival_clock_runs(&ts, ActionState::Idle));
    assert!(!blade_clock_runs(&ts));

    // Countered stop: the player moves again; the rival may still act
    // because the player is not mid-ultimate.
    ts.countered = true;
    assert!(player_clock_runs(&ts, ActionState::Idle));
    assert!(rival_clock_runs(&ts, ActionState::Idle));
    assert!(blade_clock_runs(&ts));

    // The ultimate freezes the rival regardless of the countered flag.
    assert!(!rival_clock_runs(&ts, ActionState::SpecialMove));
    assert!(player_clock_runs(&ts, ActionState::SpecialMove));
}
