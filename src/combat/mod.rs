//! Combat domain: fighters, abilities, the player resolver, the rival AI,
//! and the time-stop/special-move machinery.

pub mod abilities;
pub mod ai;
pub mod components;
mod player;
pub mod special;
#[cfg(test)]
mod tests;

pub use abilities::{PlayerAbilities, RivalAbilities};
pub use ai::{AiMode, Decision, DecisionContext, RivalAi, choose_action};
pub use components::{
    ActionState, ActionTrigger, AttackFrame, Facing, Fighter, Health, Player, Rival, Stun,
    Velocity,
};
pub use special::{
    Combo, SpecialMoveTimer, TimeStop, blade_clock_runs, hazard_clock_runs, player_clock_runs,
    rival_clock_runs,
};

use bevy::prelude::*;

use crate::core::{GamePhase, TickSet, in_phase};

pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<TimeStop>()
            .init_resource::<Combo>()
            .init_resource::<SpecialMoveTimer>()
            .add_systems(
                FixedUpdate,
                (special::tick_time_stop, tick_fighter_timers)
                    .chain()
                    .in_set(TickSet::Timers)
                    .run_if(in_phase(GamePhase::Playing)),
            )
            .add_systems(
                FixedUpdate,
                special::run_special_move
                    .in_set(TickSet::Special)
                    .run_if(in_phase(GamePhase::Playing)),
            )
            .add_systems(
                FixedUpdate,
                player::resolve_player_action
                    .in_set(TickSet::Player)
                    .run_if(in_phase(GamePhase::Playing)),
            )
            .add_systems(
                FixedUpdate,
                ai::update_rival_ai
                    .in_set(TickSet::Rival)
                    .run_if(in_phase(GamePhase::Playing)),
            );
    }
}

/// Per-tick stun and cooldown decrement, gated by each actor's clock: a
/// frozen actor keeps its timers, and a stunned actor's cooldowns wait for
/// the stun to clear.
pub(crate) fn tick_fighter_timers(
    time_stop: Res<TimeStop>,
    mut player_q: Query<
        (&mut Stun, &mut PlayerAbilities, &ActionState),
        (With<Player>, Without<Rival>),
    >,
    mut rival_q: Query<(&mut Stun, &mut RivalAbilities), (With<Rival>, Without<Player>)>,
) {
    let Ok((mut p_stun, mut p_abilities, p_state)) = player_q.single_mut() else {
        return;
    };
    let p_state = *p_state;

    if player_clock_runs(&time_stop, p_state) {
        p_stun.tick();
        if !p_stun.is_stunned() {
            p_abilities.tick();
        }
    }

    if let Ok((mut r_stun, mut r_abilities)) = rival_q.single_mut() {
        if rival_clock_runs(&time_stop, p_state) {
            r_stun.tick();
            if !r_stun.is_stunned() {
                r_abilities.tick();
            }
        }
    }
}
