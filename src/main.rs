use bevy::prelude::*;

use midnight_duel::cinematics::CinematicsPlugin;
use midnight_duel::combat::CombatPlugin;
use midnight_duel::content::ContentPlugin;
use midnight_duel::core::CorePlugin;
use midnight_duel::fx::FxPlugin;
use midnight_duel::hazard::HazardPlugin;
use midnight_duel::input::InputPlugin;
use midnight_duel::projectiles::BladePlugin;
use midnight_duel::ui::UiPlugin;

fn main() {
    let mut app = App::new();
    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Midnight Duel".to_string(),
            resizable: false,
            ..default()
        }),
        ..default()
    }))
    .add_plugins((
        ContentPlugin,
        CorePlugin,
        CombatPlugin,
        BladePlugin,
        HazardPlugin,
        CinematicsPlugin,
        FxPlugin,
        InputPlugin,
        UiPlugin,
    ));

    #[cfg(feature = "dev-tools")]
    app.add_plugins(midnight_duel::debug::DebugPlugin);

    app.run();
}
