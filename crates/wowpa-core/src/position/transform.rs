//! Game-to-host coordinate conversion.
//!
//! ```text
//! Host  | Game
//! ------+------
//! X     | -Y
//! Y     |  Z
//! Z     |  X
//! ```
//!
//! The game only exposes a horizontal heading for the player, so front
//! vectors are derived from it and always lie in the host's XZ plane.

use crate::position::{Pose, Vec3};
use crate::sample::RawSample;

/// Avatar top vector. The player cannot tilt their head in this game.
pub const AVATAR_TOP: Vec3 = Vec3::new(0.0, 0.0, -1.0);

/// Permute a game-space vector into the host's basis.
pub fn to_host_axes(v: Vec3) -> Vec3 {
    Vec3::new(-v.y, v.z, v.x)
}

/// Unit front vector for a heading in radians. No wrap-around is applied.
pub fn heading_to_front(heading: f32) -> Vec3 {
    Vec3::new(-heading.sin(), 0.0, heading.cos())
}

/// Derive the avatar and camera poses from one raw sample.
///
/// The camera reuses the avatar position and heading; the raw camera
/// position and front samples are ignored. Only the camera top vector is
/// taken from the camera fields.
pub fn transform(raw: &RawSample) -> (Pose, Pose) {
    let position = to_host_axes(raw.avatar_position);
    let front = heading_to_front(raw.avatar_heading);

    let avatar = Pose {
        position,
        front,
        top: AVATAR_TOP,
    };
    let camera = Pose {
        position,
        front,
        top: to_host_axes(raw.camera_top),
    };

    (avatar, camera)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, PI};

    const EPSILON: f32 = 1e-5;

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a.x - b.x).abs() < EPSILON && (a.y - b.y).abs() < EPSILON && (a.z - b.z).abs() < EPSILON
    }

    fn sample() -> RawSample {
        RawSample {
            state: 1,
            avatar_position: Vec3::new(-8913.2, 554.6, 93.1),
            avatar_heading: FRAC_PI_2,
            camera_position: Vec3::new(1.0, 2.0, 3.0),
            camera_front: Vec3::new(0.5, 0.5, 0.5),
            camera_top: Vec3::new(0.1, 0.2, 0.9),
            player_name: b"Arthas\0".to_vec(),
            map_id: 0,
        }
    }

    #[test]
    fn test_axis_permutation() {
        assert_eq!(
            to_host_axes(Vec3::new(1.0, 2.0, 3.0)),
            Vec3::new(-2.0, 3.0, 1.0)
        );
        assert_eq!(
            to_host_axes(Vec3::new(-4.5, -0.25, 0.0)),
            Vec3::new(0.25, 0.0, -4.5)
        );
    }

    #[test]
    fn test_axis_permutation_of_zero() {
        let out = to_host_axes(Vec3::ZERO);
        assert_eq!(out.x.abs(), 0.0);
        assert_eq!(out.y, 0.0);
        assert_eq!(out.z, 0.0);
    }

    #[test]
    fn test_heading_front_cardinal_directions() {
        assert!(approx(heading_to_front(0.0), Vec3::new(0.0, 0.0, 1.0)));
        assert!(approx(heading_to_front(FRAC_PI_2), Vec3::new(-1.0, 0.0, 0.0)));
        assert!(approx(heading_to_front(PI), Vec3::new(0.0, 0.0, -1.0)));
    }

    #[test]
    fn test_heading_front_is_horizontal_unit_vector() {
        for step in -40..=40 {
            let heading = step as f32 * 0.37;
            let front = heading_to_front(heading);
            assert_eq!(front.y, 0.0);
            assert!((front.length() - 1.0).abs() < EPSILON, "heading {heading}");
        }
    }

    #[test]
    fn test_heading_outside_full_turn() {
        assert!(approx(heading_to_front(2.0 * PI + 0.5), heading_to_front(0.5)));
        assert!(approx(heading_to_front(-0.5), heading_to_front(2.0 * PI - 0.5)));
    }

    #[test]
    fn test_transform_uses_avatar_data_for_camera() {
        let raw = sample();
        let (avatar, camera) = transform(&raw);

        assert_eq!(avatar.position, Vec3::new(-554.6, 93.1, -8913.2));
        assert_eq!(camera.position, avatar.position);
        assert_eq!(camera.front, avatar.front);
        assert!(approx(avatar.front, Vec3::new(-1.0, 0.0, 0.0)));
    }

    #[test]
    fn test_transform_tops() {
        let (avatar, camera) = transform(&sample());

        assert_eq!(avatar.top, AVATAR_TOP);
        assert_eq!(camera.top, Vec3::new(-0.2, 0.9, 0.1));
    }
}
