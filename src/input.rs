//! Input domain: the abstract per-tick input snapshot and its device-side
//! sampler.
//!
//! The simulation consumes only [`FightInput`]; the sampler system is the
//! sole place that touches keyboard/mouse state. Edge flags are latched on
//! the render schedule and cleared by the simulation at the end of each
//! tick, so a press between two fixed ticks is never lost.

use bevy::prelude::*;

/// Snapshot of held keys and edge-triggered presses for one tick.
#[derive(Resource, Debug, Default, Clone)]
pub struct FightInput {
    // Held.
    pub left: bool,
    pub right: bool,
    pub barrage_held: bool,
    pub counter_held: bool,
    // Edges.
    pub jump_pressed: bool,
    pub star_finger_pressed: bool,
    pub heavy_punch_pressed: bool,
    pub pause_pressed: bool,
    pub skip_pressed: bool,
    pub confirm_pressed: bool,
    pub restart_pressed: bool,
}

impl FightInput {
    pub fn clear_edges(&mut self) {
        self.jump_pressed = false;
        self.star_finger_pressed = false;
        self.heavy_punch_pressed = false;
        self.pause_pressed = false;
        self.skip_pressed = false;
        self.confirm_pressed = false;
        self.restart_pressed = false;
    }
}

/// Device-side collaborator: fills [`FightInput`] from keyboard and mouse.
pub struct InputPlugin;

impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, sample_input);
    }
}

pub(crate) fn sample_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    mouse: Res<ButtonInput<MouseButton>>,
    mut input: ResMut<FightInput>,
) {
    input.left = keyboard.pressed(KeyCode::KeyA) || keyboard.pressed(KeyCode::ArrowLeft);
    input.right = keyboard.pressed(KeyCode::KeyD) || keyboard.pressed(KeyCode::ArrowRight);
    input.barrage_held = mouse.pressed(MouseButton::Left) || keyboard.pressed(KeyCode::KeyJ);
    input.counter_held = keyboard.pressed(KeyCode::KeyQ);

    // Latched until the simulation flushes them at tick end.
    input.jump_pressed |=
        keyboard.just_pressed(KeyCode::KeyW) || keyboard.just_pressed(KeyCode::Space);
    input.star_finger_pressed |= keyboard.just_pressed(KeyCode::KeyC);
    input.heavy_punch_pressed |= keyboard.just_pressed(KeyCode::KeyX);
    input.pause_pressed |= keyboard.just_pressed(KeyCode::Escape);
    input.skip_pressed |= keyboard.just_pressed(KeyCode::KeyX);
    input.confirm_pressed |= keyboard.just_pressed(KeyCode::Enter);
    input.restart_pressed |= keyboard.just_pressed(KeyCode::KeyR);
}
