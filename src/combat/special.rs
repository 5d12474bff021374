//! Combat domain: global time-stop state, combo tracking, and the player's
//! scripted ultimate.

use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;

use crate::combat::abilities::PlayerAbilities;
use crate::combat::ai::RivalAi;
use crate::combat::components::{
    ActionState, ActionTrigger, AttackFrame, Facing, Health, Player, Rival, Stun,
};
use crate::content::FightTuning;
use crate::fx::{CalloutEvent, ParticleBurstEvent, ShakeEvent};

/// Global time-stop gate. Not a pause: each subsystem consults the per-actor
/// clock predicates below to decide whether it may advance this tick.
#[derive(Resource, Debug, Default)]
pub struct TimeStop {
    pub active: bool,
    /// True when the player reacted to the telegraph (or is running the
    /// special move) and is therefore the exempted actor.
    pub countered: bool,
    pub frames_left: u32,
}

impl TimeStop {
    pub fn begin(&mut self, frames: u32, countered: bool) {
        self.active = true;
        self.countered = countered;
        self.frames_left = frames;
    }

    pub fn clear(&mut self) {
        self.active = false;
        self.countered = false;
        self.frames_left = 0;
    }
}

/// Consecutive successful-player-hit counter gating the special move.
#[derive(Resource, Debug, Default)]
pub struct Combo(pub u32);

impl Combo {
    pub fn add(&mut self) {
        self.0 += 1;
    }

    pub fn reset(&mut self) {
        self.0 = 0;
    }
}

/// Remaining ticks of the player's ultimate.
#[derive(Resource, Debug, Default)]
pub struct SpecialMoveTimer(pub u32);

/// Whether the player's clock advances this tick.
pub fn player_clock_runs(ts: &TimeStop, player_state: ActionState) -> bool {
    !ts.active || ts.countered || player_state == ActionState::SpecialMove
}

/// Whether the rival's clock advances this tick. Asymmetric with the player
/// predicate on purpose: the rival keeps acting during a countered stop as
/// long as the player is not mid-ultimate.
pub fn rival_clock_runs(ts: &TimeStop, player_state: ActionState) -> bool {
    !ts.active || player_state != ActionState::SpecialMove
}

/// Whether blade launch delays and flight advance this tick.
pub fn blade_clock_runs(ts: &TimeStop) -> bool {
    !ts.active || ts.countered
}

/// Whether the falling hazard telegraph/descent advances this tick.
pub fn hazard_clock_runs(ts: &TimeStop) -> bool {
    !ts.active || ts.countered
}

/// Ticks the time-stop countdown. The countdown is frozen while the player's
/// ultimate runs; the ultimate re-asserts the stop every tick and releases it
/// itself.
pub(crate) fn tick_time_stop(
    mut time_stop: ResMut<TimeStop>,
    player: Query<&ActionState, With<Player>>,
) {
    let Ok(state) = player.single() else {
        return;
    };
    if !time_stop.active || *state == ActionState::SpecialMove {
        return;
    }
    time_stop.frames_left = time_stop.frames_left.saturating_sub(1);
    if time_stop.frames_left == 0 {
        time_stop.clear();
    }
}

/// The scripted ultimate: forces a player-exempt time-stop, strikes the rival
/// on a fixed cadence, and drags the player toward the rival without ever
/// teleporting.
pub(crate) fn run_special_move(
    tuning: Res<FightTuning>,
    mut time_stop: ResMut<TimeStop>,
    mut combo: ResMut<Combo>,
    mut timer: ResMut<SpecialMoveTimer>,
    mut callouts: MessageWriter<CalloutEvent>,
    mut bursts: MessageWriter<ParticleBurstEvent>,
    mut shakes: MessageWriter<ShakeEvent>,
    mut player: Query<
        (
            &mut Transform,
            &mut ActionState,
            &mut AttackFrame,
            &mut Facing,
            &mut PlayerAbilities,
        ),
        (With<Player>, Without<Rival>),
    >,
    mut rival: Query<
        (
            &Transform,
            &mut Health,
            &mut ActionState,
            &mut Stun,
            &mut RivalAi,
        ),
        (With<Rival>, Without<Player>),
    >,
) {
    let Ok((mut p_tf, mut p_state, mut p_frame, mut p_facing, mut p_abilities)) =
        player.single_mut()
    else {
        return;
    };
    if *p_state != ActionState::SpecialMove {
        return;
    }
    let Ok((r_tf, mut r_health, mut r_state, mut r_stun, mut r_ai)) = rival.single_mut() else {
        return;
    };

    let special = &tuning.special;
    timer.0 = timer.0.saturating_sub(1);
    time_stop.active = true;
    time_stop.countered = true;

    if timer.0 % special.strike_interval == 0 {
        r_health.damage(special.strike_damage);
        callouts.write(CalloutEvent::flavor(
            r_tf.translation.truncate(),
            "RAAH!",
            Color::srgb(0.55, 0.47, 0.78),
            100.0,
        ));
        bursts.write(ParticleBurstEvent {
            pos: r_tf.translation.truncate(),
            color: Color::srgb(0.55, 0.47, 0.78),
            count: 10,
        });
        shakes.write(ShakeEvent {
            intensity: 10.0,
            duration: 5,
        });
    }

    // Closing pull: a fixed fraction of the remaining gap per tick.
    let gap = r_tf.translation.x - p_tf.translation.x;
    p_tf.translation.x += gap * special.pull_rate;
    p_tf.translation.y = r_tf.translation.y;
    *p_facing = Facing::toward(p_tf.translation.x, r_tf.translation.x);

    if timer.0 == 0 {
        p_state.try_transition(ActionTrigger::FinishSpecial);
        p_frame.0 = 0;
        p_abilities.barrage_active = 0;
        if *r_state != ActionState::Dead {
            *r_state = ActionState::Idle;
        }
        r_stun.frames = 0;
        r_ai.reset();
        time_stop.clear();
        combo.reset();
        callouts.write(CalloutEvent::flavor(
            r_tf.translation.truncate(),
            "TIME FLOWS AGAIN!",
            Color::WHITE,
            60.0,
        ));
        shakes.write(ShakeEvent {
            intensity: 20.0,
            duration: 30,
        });
    }
}
