//! UI domain: placeholder sprites for simulation entities and camera shake.

use bevy::prelude::*;
use rand::Rng;

use crate::combat::components::{Facing, Fighter, Player, Rival};
use crate::core::FightRng;
use crate::fx::{CameraShake, Particle};
use crate::hazard::FallingHazard;
use crate::projectiles::Blade;

const ARENA_CENTER: Vec3 = Vec3::new(600.0, 220.0, 0.0);

pub(crate) fn setup_camera(mut commands: Commands) {
    commands.spawn((Camera2d, Transform::from_translation(ARENA_CENTER)));
}

pub(crate) fn dress_fighters(
    mut commands: Commands,
    players: Query<(Entity, &Fighter), (Added<Player>, Without<Sprite>)>,
    rivals: Query<(Entity, &Fighter), (Added<Rival>, Without<Sprite>)>,
) {
    for (entity, fighter) in &players {
        commands.entity(entity).insert(Sprite {
            color: Color::srgb(0.16, 0.15, 0.16),
            custom_size: Some(Vec2::new(fighter.width, fighter.height)),
            ..default()
        });
    }
    for (entity, fighter) in &rivals {
        commands.entity(entity).insert(Sprite {
            color: Color::srgb(0.9, 0.65, 0.14),
            custom_size: Some(Vec2::new(fighter.width, fighter.height)),
            ..default()
        });
    }
}

pub(crate) fn dress_blades(
    mut commands: Commands,
    blades: Query<Entity, (Added<Blade>, Without<Sprite>)>,
) {
    for entity in &blades {
        commands.entity(entity).insert(Sprite {
            color: Color::srgb(0.8, 0.8, 0.8),
            custom_size: Some(Vec2::new(30.0, 8.0)),
            ..default()
        });
    }
}

pub(crate) fn dress_hazards(
    mut commands: Commands,
    hazards: Query<Entity, (Added<FallingHazard>, Without<Sprite>)>,
) {
    for entity in &hazards {
        commands.entity(entity).insert(Sprite {
            color: Color::srgb(0.95, 0.85, 0.21),
            custom_size: Some(Vec2::new(200.0, 110.0)),
            ..default()
        });
    }
}

pub(crate) fn dress_particles(
    mut commands: Commands,
    particles: Query<(Entity, &Particle), (Added<Particle>, Without<Sprite>)>,
) {
    for (entity, particle) in &particles {
        commands.entity(entity).insert(Sprite {
            color: particle.color,
            custom_size: Some(Vec2::splat(6.0)),
            ..default()
        });
    }
}

pub(crate) fn mirror_fighter_sprites(mut fighters: Query<(&Facing, &mut Sprite), With<Fighter>>) {
    for (facing, mut sprite) in &mut fighters {
        sprite.flip_x = *facing == Facing::Left;
    }
}

pub(crate) fn spin_blades(mut blades: Query<(&Blade, &mut Transform)>) {
    for (blade, mut tf) in &mut blades {
        tf.rotation = Quat::from_rotation_z(blade.angle);
    }
}

pub(crate) fn apply_camera_shake(
    shake: Res<CameraShake>,
    mut rng: ResMut<FightRng>,
    mut camera: Query<&mut Transform, With<Camera2d>>,
) {
    let Ok(mut tf) = camera.single_mut() else {
        return;
    };
    if shake.duration > 0 {
        let offset = Vec3::new(
            (rng.0.random::<f32>() - 0.5) * shake.intensity,
            (rng.0.random::<f32>() - 0.5) * shake.intensity,
            0.0,
        );
        tf.translation = ARENA_CENTER + offset;
    } else {
        tf.translation = ARENA_CENTER;
    }
}
