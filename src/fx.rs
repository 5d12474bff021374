//! Fx domain: fire-and-forget feedback requested by the simulation.
//!
//! Combat systems emit messages; this plugin turns them into short-lived
//! particle/callout entities and the shared camera-shake value. The core
//! never waits on any of it.

use bevy::ecs::message::MessageReader;
use bevy::prelude::*;
use rand::Rng;

use crate::core::{FightRng, TickSet, fx_active};

/// Floating text callout (strike flavor, narration lines, warnings).
#[derive(Debug)]
pub struct CalloutEvent {
    pub pos: Vec2,
    pub text: String,
    pub color: Color,
    pub size: f32,
    /// Scatter around `pos`; narration lines keep their exact anchor.
    pub jitter: bool,
}

impl CalloutEvent {
    /// Combat flavor text, scattered around the impact point.
    pub fn flavor(pos: Vec2, text: impl Into<String>, color: Color, size: f32) -> Self {
        Self {
            pos,
            text: text.into(),
            color,
            size,
            jitter: true,
        }
    }

    /// Fixed-position narration line.
    pub fn narration(pos: Vec2, text: impl Into<String>, color: Color, size: f32) -> Self {
        Self {
            pos,
            text: text.into(),
            color,
            size,
            jitter: false,
        }
    }
}

impl bevy::ecs::message::Message for CalloutEvent {}

/// Burst of cosmetic particles.
#[derive(Debug)]
pub struct ParticleBurstEvent {
    pub pos: Vec2,
    pub color: Color,
    pub count: u32,
}

impl bevy::ecs::message::Message for ParticleBurstEvent {}

/// Camera shake request; concurrent requests take the max, never stack.
#[derive(Debug)]
pub struct ShakeEvent {
    pub intensity: f32,
    pub duration: u32,
}

impl bevy::ecs::message::Message for ShakeEvent {}

/// Current camera shake, decayed once per tick.
#[derive(Resource, Debug, Default)]
pub struct CameraShake {
    pub intensity: f32,
    pub duration: u32,
}

impl CameraShake {
    pub fn request(&mut self, intensity: f32, duration: u32) {
        self.intensity = self.intensity.max(intensity);
        self.duration = self.duration.max(duration);
    }

    pub fn tick(&mut self) {
        if self.duration > 0 {
            self.duration -= 1;
        } else {
            self.intensity = 0.0;
        }
    }

    pub fn clear(&mut self) {
        self.intensity = 0.0;
        self.duration = 0;
    }
}

/// Drifting cosmetic particle.
#[derive(Component, Debug)]
pub struct Particle {
    pub vel: Vec2,
    pub life: u32,
    pub color: Color,
}

/// Drifting floating-text entity.
#[derive(Component, Debug)]
pub struct Callout {
    pub vel: Vec2,
    pub life: u32,
}

pub struct FxPlugin;

impl Plugin for FxPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CameraShake>()
            .add_message::<CalloutEvent>()
            .add_message::<ParticleBurstEvent>()
            .add_message::<ShakeEvent>()
            .add_systems(
                FixedUpdate,
                // Leftover shake decays with the other global timers, before
                // this tick's requests land.
                decay_shake.in_set(TickSet::Timers).run_if(fx_active),
            )
            .add_systems(
                FixedUpdate,
                (
                    apply_shake_requests,
                    spawn_particle_bursts,
                    spawn_callouts,
                    update_particles,
                    update_callouts,
                )
                    .chain()
                    .in_set(TickSet::Fx)
                    .run_if(fx_active),
            );
    }
}

pub(crate) fn apply_shake_requests(
    mut requests: MessageReader<ShakeEvent>,
    mut shake: ResMut<CameraShake>,
) {
    for request in requests.read() {
        shake.request(request.intensity, request.duration);
    }
}

pub(crate) fn decay_shake(mut shake: ResMut<CameraShake>) {
    shake.tick();
}

pub(crate) fn spawn_particle_bursts(
    mut commands: Commands,
    mut bursts: MessageReader<ParticleBurstEvent>,
    mut rng: ResMut<FightRng>,
) {
    for burst in bursts.read() {
        for _ in 0..burst.count {
            let vel = Vec2::new(
                (rng.0.random::<f32>() - 0.5) * 10.0,
                (rng.0.random::<f32>() - 0.5) * 10.0,
            );
            let life = 25 + rng.0.random_range(0..25);
            commands.spawn((
                Particle {
                    vel,
                    life,
                    color: burst.color,
                },
                Transform::from_xyz(burst.pos.x, burst.pos.y, 5.0),
            ));
        }
    }
}

pub(crate) fn spawn_callouts(
    mut commands: Commands,
    mut events: MessageReader<CalloutEvent>,
    mut rng: ResMut<FightRng>,
) {
    for event in events.read() {
        let pos = if event.jitter {
            event.pos
                + Vec2::new(
                    (rng.0.random::<f32>() - 0.5) * 150.0,
                    (rng.0.random::<f32>() - 0.5) * 150.0,
                )
        } else {
            event.pos
        };
        let vel = Vec2::new(
            (rng.0.random::<f32>() - 0.5) * 4.0,
            4.0 + rng.0.random::<f32>() * 4.0,
        );
        commands.spawn((
            Callout { vel, life: 40 },
            Text2d::new(event.text.clone()),
            TextFont {
                font_size: event.size * 0.6,
                ..default()
            },
            TextColor(event.color),
            Transform::from_xyz(pos.x, pos.y, 10.0),
        ));
    }
}

pub(crate) fn update_particles(
    mut commands: Commands,
    mut particles: Query<(Entity, &mut Particle, &mut Transform)>,
) {
    for (entity, mut particle, mut tf) in &mut particles {
        tf.translation.x += particle.vel.x;
        tf.translation.y += particle.vel.y;
        particle.life = particle.life.saturating_sub(1);
        if particle.life == 0 {
            commands.entity(entity).despawn();
        }
    }
}

pub(crate) fn update_callouts(
    mut commands: Commands,
    mut callouts: Query<(Entity, &mut Callout, &mut Transform)>,
) {
    for (entity, mut callout, mut tf) in &mut callouts {
        tf.translation.x += callout.vel.x;
        tf.translation.y += callout.vel.y;
        callout.life = callout.life.saturating_sub(1);
        if callout.life == 0 {
            commands.entity(entity).despawn();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn concurrent_shake_requests_take_the_max() {
        let mut shake = CameraShake::default();
        shake.request(10.0, 20);
        shake.request(4.0, 45);
        shake.request(8.0, 5);

        assert_eq!(shake.intensity, 10.0);
        assert_eq!(shake.duration, 45);
    }

    #[test]
    fn shake_decays_then_drops_to_zero() {
        let mut shake = CameraShake::default();
        shake.request(6.0, 2);

        shake.tick();
        shake.tick();
        assert_eq!(shake.duration, 0);
        assert_eq!(shake.intensity, 6.0);

        shake.tick();
        assert_eq!(shake.intensity, 0.0);
    }
}
