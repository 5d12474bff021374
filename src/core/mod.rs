//! Core domain: match phases, shared resources, and the tick ordering
//! contract.

mod resources;
mod state;
mod systems;

pub use resources::{CinematicTimers, FightPhase, FightRng, MatchConfig, MatchResetEvent};
pub use state::{GamePhase, PhaseState, fx_active, in_phase};

use bevy::prelude::*;

/// Fixed per-tick execution order of the simulation. The chain is a
/// contract: global timers before action resolution, player before rival,
/// actors before projectiles and hazard, effects before terminal checks.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TickSet {
    /// Pause/skip/menu flow and match resets.
    Control,
    /// Cinematic timelines (intro, pre-fight, approach, transition).
    Cinematic,
    /// Global timers: time-stop countdown, stun, ability cooldowns.
    Timers,
    /// The player's scripted ultimate.
    Special,
    /// Player action resolution and integration.
    Player,
    /// Rival AI resolution and integration.
    Rival,
    /// Blade flight and hits.
    Blades,
    /// Falling hazard telegraph, descent, and splash.
    Hazard,
    /// Feedback: particles, callouts, camera shake.
    Fx,
    /// Win/loss/phase-transition checks.
    Terminal,
    /// Input edge flags are dropped at the very end of the tick.
    InputFlush,
}

pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        let config = MatchConfig::default();
        app.insert_resource(FightRng::seeded(config.seed))
            .insert_resource(config)
            .insert_resource(Time::<Fixed>::from_hz(60.0))
            .init_resource::<PhaseState>()
            .init_resource::<FightPhase>()
            .init_resource::<CinematicTimers>()
            .init_resource::<crate::input::FightInput>()
            .add_message::<MatchResetEvent>()
            .configure_sets(
                FixedUpdate,
                (
                    TickSet::Control,
                    TickSet::Cinematic,
                    TickSet::Timers,
                    TickSet::Special,
                    TickSet::Player,
                    TickSet::Rival,
                    TickSet::Blades,
                    TickSet::Hazard,
                    TickSet::Fx,
                    TickSet::Terminal,
                    TickSet::InputFlush,
                )
                    .chain(),
            )
            .add_systems(Startup, systems::spawn_fighters)
            .add_systems(
                FixedUpdate,
                (
                    systems::handle_pause,
                    systems::handle_menu_flow,
                    systems::handle_skip,
                    systems::apply_match_reset,
                )
                    .chain()
                    .in_set(TickSet::Control),
            )
            .add_systems(
                FixedUpdate,
                systems::check_terminal
                    .in_set(TickSet::Terminal)
                    .run_if(in_phase(GamePhase::Playing)),
            )
            .add_systems(
                FixedUpdate,
                systems::flush_input_edges.in_set(TickSet::InputFlush),
            );
    }
}
