//! UI domain: presentation collaborators.
//!
//! Everything here only reads simulation projections (health percentages,
//! cooldowns, phase, live entities) and draws; nothing feeds back into the
//! core.

mod hud;
mod visuals;

use bevy::prelude::*;

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, (visuals::setup_camera, hud::spawn_hud))
            .add_systems(
                Update,
                (
                    visuals::dress_fighters,
                    visuals::dress_blades,
                    visuals::dress_hazards,
                    visuals::dress_particles,
                    visuals::mirror_fighter_sprites,
                    visuals::spin_blades,
                    visuals::apply_camera_shake,
                ),
            )
            .add_systems(
                Update,
                (
                    hud::update_health_bars,
                    hud::update_cooldown_readout,
                    hud::update_combo_counter,
                    hud::update_phase_banner,
                ),
            );
    }
}
