//! Deterministic per-tick kinematics for fighters.
//!
//! Each actor's resolver integrates its own motion inside its slot of the
//! tick; motion simply does not happen for an actor whose clock is frozen.

use bevy::prelude::*;

use crate::combat::components::{Fighter, Velocity};
use crate::content::ArenaTuning;

/// Gravity plus position integration, then ground snap. Transforms are
/// center-anchored, so the feet sit at `translation.y - height / 2`.
pub fn integrate(arena: &ArenaTuning, fighter: &Fighter, tf: &mut Transform, vel: &mut Velocity) {
    vel.0.y -= arena.gravity;
    tf.translation.x += vel.0.x;
    tf.translation.y += vel.0.y;

    let stand_y = arena.ground_y + fighter.height / 2.0;
    if tf.translation.y < stand_y {
        tf.translation.y = stand_y;
        vel.0.y = 0.0;
    }
}

/// Clamp a fighter's center into the arena.
pub fn clamp_x(arena: &ArenaTuning, fighter: &Fighter, tf: &mut Transform) {
    let half = fighter.width / 2.0;
    tf.translation.x = tf.translation.x.clamp(half, arena.width - half);
}

/// Feet-within-epsilon ground test.
pub fn on_ground(arena: &ArenaTuning, fighter: &Fighter, tf: &Transform) -> bool {
    let stand_y = arena.ground_y + fighter.height / 2.0;
    (tf.translation.y - stand_y).abs() < 1.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fighter() -> Fighter {
        Fighter {
            width: 40.0,
            height: 80.0,
        }
    }

    #[test]
    fn gravity_pulls_airborne_fighter_down() {
        let arena = ArenaTuning::default();
        let mut tf = Transform::from_xyz(100.0, 300.0, 0.0);
        let mut vel = Velocity(Vec2::ZERO);

        integrate(&arena, &fighter(), &mut tf, &mut vel);

        assert!(vel.0.y < 0.0);
        assert!(tf.translation.y < 300.0);
    }

    #[test]
    fn ground_snap_zeroes_vertical_velocity() {
        let arena = ArenaTuning::default();
        let mut tf = Transform::from_xyz(100.0, 41.0, 0.0);
        let mut vel = Velocity(Vec2::new(0.0, -20.0));

        integrate(&arena, &fighter(), &mut tf, &mut vel);

        assert_eq!(tf.translation.y, 40.0);
        assert_eq!(vel.0.y, 0.0);
        assert!(on_ground(&arena, &fighter(), &tf));
    }

    #[test]
    fn horizontal_clamp_respects_fighter_width() {
        let arena = ArenaTuning::default();
        let mut tf = Transform::from_xyz(-50.0, 40.0, 0.0);
        clamp_x(&arena, &fighter(), &mut tf);
        assert_eq!(tf.translation.x, 20.0);

        tf.translation.x = 5000.0;
        clamp_x(&arena, &fighter(), &mut tf);
        assert_eq!(tf.translation.x, arena.width - 20.0);
    }
}
