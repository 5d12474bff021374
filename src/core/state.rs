//! Core domain: top-level match phase definitions.

use bevy::prelude::*;

/// Top-level phase of the match flow.
///
/// Cinematic phases (`Intro`, `PreFight`, `Approach`, `Transition`) are pure
/// frame-countdown timelines; `Playing` is the live fight loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GamePhase {
    #[default]
    Menu,
    Intro,
    PreFight,
    Approach,
    Playing,
    Transition,
    Victory,
    Defeat,
    Paused,
}

impl GamePhase {
    /// Phases that can be interrupted by pause.
    pub fn pausable(self) -> bool {
        matches!(
            self,
            GamePhase::Intro
                | GamePhase::PreFight
                | GamePhase::Approach
                | GamePhase::Playing
                | GamePhase::Transition
        )
    }

    /// Cinematic phases the skip input can abort.
    pub fn skippable(self) -> bool {
        matches!(
            self,
            GamePhase::Intro | GamePhase::PreFight | GamePhase::Approach
        )
    }
}

/// Resource holding the current phase plus the bookkeeping needed to resume
/// from pause and to restart from the mid-fight checkpoint.
#[derive(Resource, Debug)]
pub struct PhaseState {
    pub phase: GamePhase,
    /// Phase to return to when unpausing.
    pub paused_from: GamePhase,
    /// 1 until the narrative transition completes, then 2; a defeat in
    /// phase 2 restarts the match directly at phase 2.
    pub checkpoint: u8,
}

impl Default for PhaseState {
    fn default() -> Self {
        Self {
            phase: GamePhase::Menu,
            paused_from: GamePhase::Playing,
            checkpoint: 1,
        }
    }
}

/// Run condition: true while the match is in the given phase.
pub fn in_phase(phase: GamePhase) -> impl FnMut(Res<PhaseState>) -> bool + Clone {
    move |state: Res<PhaseState>| state.phase == phase
}

/// Run condition for feedback/effect systems: everything outside the menu,
/// frozen while paused.
pub fn fx_active(state: Res<PhaseState>) -> bool {
    !matches!(state.phase, GamePhase::Menu | GamePhase::Paused)
}
