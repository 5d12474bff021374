//! Debug hotkeys for fast iteration (dev-tools feature).
//!
//! Ctrl+I toggle invincibility, Ctrl+H full heal, Ctrl+2 warp straight into
//! fight phase 2, Ctrl+S log the match seed.

use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;

use crate::combat::components::{Health, Player};
use crate::core::{MatchConfig, MatchResetEvent};

/// Debug toggles.
#[derive(Resource, Debug, Default)]
pub struct DebugState {
    pub invincible: bool,
}

pub struct DebugPlugin;

impl Plugin for DebugPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DebugState>()
            .add_systems(Update, (handle_debug_hotkeys, apply_invincibility).chain());
    }
}

fn handle_debug_hotkeys(
    keyboard: Res<ButtonInput<KeyCode>>,
    config: Res<MatchConfig>,
    mut debug_state: ResMut<DebugState>,
    mut resets: MessageWriter<MatchResetEvent>,
    mut player: Query<&mut Health, With<Player>>,
) {
    let ctrl = keyboard.pressed(KeyCode::ControlLeft) || keyboard.pressed(KeyCode::ControlRight);
    if !ctrl {
        return;
    }

    if keyboard.just_pressed(KeyCode::KeyI) {
        debug_state.invincible = !debug_state.invincible;
        info!("[DEBUG] invincibility {}", if debug_state.invincible { "ON" } else { "OFF" });
    }

    if keyboard.just_pressed(KeyCode::KeyH) {
        if let Ok(mut health) = player.single_mut() {
            health.current = health.max;
            info!("[DEBUG] full heal");
        }
    }

    if keyboard.just_pressed(KeyCode::Digit2) {
        resets.write(MatchResetEvent { start_phase: 2 });
        info!("[DEBUG] warping to fight phase 2");
    }

    if keyboard.just_pressed(KeyCode::KeyS) {
        info!("[DEBUG] match seed: {}", config.seed);
    }
}

fn apply_invincibility(
    debug_state: Res<DebugState>,
    mut player: Query<&mut Health, With<Player>>,
) {
    if !debug_state.invincible {
        return;
    }
    for mut health in &mut player {
        if health.current < health.max {
            health.current = health.max;
        }
    }
}
