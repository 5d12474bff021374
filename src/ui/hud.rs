//! UI domain: health bars, cooldown readout, combo counter, phase banner.

use bevy::prelude::*;

use crate::combat::abilities::PlayerAbilities;
use crate::combat::components::{Health, Player, Rival};
use crate::combat::special::Combo;
use crate::core::{FightPhase, GamePhase, PhaseState};

const BAR_HEIGHT: f32 = 22.0;
const PADDING: f32 = 16.0;

/// Marker for the player health bar fill.
#[derive(Component)]
pub struct PlayerHealthFill;

/// Marker for the rival health bar fill.
#[derive(Component)]
pub struct RivalHealthFill;

#[derive(Component)]
pub struct CooldownReadout;

#[derive(Component)]
pub struct ComboCounter;

#[derive(Component)]
pub struct PhaseBanner;

pub(crate) fn spawn_hud(mut commands: Commands) {
    // Player bar, top-left.
    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                left: Val::Px(PADDING),
                top: Val::Px(PADDING),
                width: Val::Px(256.0),
                height: Val::Px(BAR_HEIGHT),
                border: UiRect::all(Val::Px(2.0)),
                ..default()
            },
            BackgroundColor(Color::srgba(0.1, 0.1, 0.1, 0.8)),
            BorderColor::all(Color::WHITE),
        ))
        .with_children(|parent| {
            parent.spawn((
                PlayerHealthFill,
                Node {
                    width: Val::Percent(100.0),
                    height: Val::Percent(100.0),
                    ..default()
                },
                BackgroundColor(Color::srgb(0.23, 0.51, 0.96)),
            ));
        });

    // Rival bar, top-right.
    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                right: Val::Px(PADDING),
                top: Val::Px(PADDING),
                width: Val::Px(384.0),
                height: Val::Px(BAR_HEIGHT + 8.0),
                border: UiRect::all(Val::Px(2.0)),
                ..default()
            },
            BackgroundColor(Color::srgba(0.1, 0.1, 0.1, 0.8)),
            BorderColor::all(Color::WHITE),
        ))
        .with_children(|parent| {
            parent.spawn((
                RivalHealthFill,
                Node {
                    width: Val::Percent(100.0),
                    height: Val::Percent(100.0),
                    ..default()
                },
                BackgroundColor(Color::srgb(0.92, 0.73, 0.12)),
            ));
        });

    commands.spawn((
        CooldownReadout,
        Text::new(""),
        TextFont {
            font_size: 13.0,
            ..default()
        },
        TextColor(Color::srgb(0.9, 0.9, 0.9)),
        Node {
            position_type: PositionType::Absolute,
            left: Val::Px(PADDING),
            top: Val::Px(PADDING + BAR_HEIGHT + 10.0),
            ..default()
        },
    ));

    commands.spawn((
        ComboCounter,
        Text::new(""),
        TextFont {
            font_size: 40.0,
            ..default()
        },
        TextColor(Color::srgb(0.98, 0.83, 0.14)),
        Node {
            position_type: PositionType::Absolute,
            left: Val::Percent(47.0),
            top: Val::Px(PADDING),
            ..default()
        },
    ));

    commands.spawn((
        PhaseBanner,
        Text::new(""),
        TextFont {
            font_size: 36.0,
            ..default()
        },
        TextColor(Color::WHITE),
        Node {
            position_type: PositionType::Absolute,
            left: Val::Percent(25.0),
            top: Val::Percent(42.0),
            ..default()
        },
    ));
}

pub(crate) fn update_health_bars(
    player: Query<&Health, With<Player>>,
    rival: Query<&Health, With<Rival>>,
    mut player_fill: Query<&mut Node, (With<PlayerHealthFill>, Without<RivalHealthFill>)>,
    mut rival_fill: Query<
        (&mut Node, &mut BackgroundColor),
        (With<RivalHealthFill>, Without<PlayerHealthFill>),
    >,
    fight_phase: Res<FightPhase>,
) {
    if let (Ok(health), Ok(mut node)) = (player.single(), player_fill.single_mut()) {
        node.width = Val::Percent(health.percent() * 100.0);
    }
    if let (Ok(health), Ok((mut node, mut color))) = (rival.single(), rival_fill.single_mut()) {
        node.width = Val::Percent(health.percent() * 100.0);
        color.0 = if fight_phase.is_second() {
            Color::srgb(0.85, 0.16, 0.16)
        } else {
            Color::srgb(0.92, 0.73, 0.12)
        };
    }
}

pub(crate) fn update_cooldown_readout(
    player: Query<&PlayerAbilities, With<Player>>,
    mut readout: Query<&mut Text, With<CooldownReadout>>,
) {
    let (Ok(abilities), Ok(mut text)) = (player.single(), readout.single_mut()) else {
        return;
    };
    let fmt = |ticks: u32| {
        if ticks == 0 {
            "READY".to_string()
        } else {
            format!("{:.1}s", ticks as f32 / 60.0)
        }
    };
    **text = format!(
        "[LMB] Barrage: {}\n[C] Star Finger: {}\n[X] Heavy Punch: {}",
        fmt(abilities.barrage_cooldown),
        fmt(abilities.star_finger_cooldown),
        fmt(abilities.heavy_punch_cooldown),
    );
}

pub(crate) fn update_combo_counter(
    combo: Res<Combo>,
    mut counter: Query<&mut Text, With<ComboCounter>>,
) {
    let Ok(mut text) = counter.single_mut() else {
        return;
    };
    **text = if combo.0 > 0 {
        format!("{} HITS!", combo.0)
    } else {
        String::new()
    };
}

pub(crate) fn update_phase_banner(
    state: Res<PhaseState>,
    mut banner: Query<&mut Text, With<PhaseBanner>>,
) {
    let Ok(mut text) = banner.single_mut() else {
        return;
    };
    **text = match state.phase {
        GamePhase::Menu => "MIDNIGHT DUEL\n[Enter] fight  [X] skip scenes".to_string(),
        GamePhase::Paused => "PAUSED\n[Esc] resume".to_string(),
        GamePhase::Victory => "RETIRED!\n[R] rematch  [Esc] menu".to_string(),
        GamePhase::Defeat => {
            if state.checkpoint == 2 {
                "DEFEATED\n[R] retry phase 2  [Esc] menu".to_string()
            } else {
                "DEFEATED\n[R] retry  [Esc] menu".to_string()
            }
        }
        _ => String::new(),
    };
}
