//! Matrix helpers for orbiting, spinning and scaling bodies
//!
//! All angles are in degrees. Orbits and spins happen about the +Y axis.
//! A body's world matrix is composed as
//!
//! ```text
//! scene_translation · parent_orbit · orbit · spin · scene_rotation · scale
//! ```
//!
//! so the body is scaled in its own frame, rotated about its own centre, then
//! carried out along its orbit (and along its parent's orbit for moons).

use glam::{Mat4, Vec3};

/// Rotate about +Y by `angle_deg`, then push out along +X by `radius`
///
/// Negative radii start the body on the -X side.
pub fn orbit_matrix(angle_deg: f32, radius: f32) -> Mat4 {
    Mat4::from_rotation_y(angle_deg.to_radians())
        * Mat4::from_translation(Vec3::new(radius, 0.0, 0.0))
}

/// Rotation about the body's own +Y axis
pub fn spin_matrix(angle_deg: f32) -> Mat4 {
    Mat4::from_rotation_y(angle_deg.to_radians())
}

/// Rotation about an arbitrary axis; the axis does not need to be unit length
///
/// A zero axis falls back to +Y.
pub fn rotation_about(angle_deg: f32, axis: Vec3) -> Mat4 {
    let axis = axis.try_normalize().unwrap_or(Vec3::Y);
    Mat4::from_axis_angle(axis, angle_deg.to_radians())
}

/// Uniform scale
pub fn scale_matrix(scale: f32) -> Mat4 {
    Mat4::from_scale(Vec3::splat(scale))
}

/// The factors that make up one body's world matrix
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BodyTransform {
    pub scene_translation: Mat4,
    pub parent_orbit: Mat4,
    pub orbit: Mat4,
    pub spin: Mat4,
    pub scene_rotation: Mat4,
    pub scale: Mat4,
}

impl Default for BodyTransform {
    fn default() -> Self {
        Self {
            scene_translation: Mat4::IDENTITY,
            parent_orbit: Mat4::IDENTITY,
            orbit: Mat4::IDENTITY,
            spin: Mat4::IDENTITY,
            scene_rotation: Mat4::IDENTITY,
            scale: Mat4::IDENTITY,
        }
    }
}

impl BodyTransform {
    /// Compose the world matrix
    pub fn world_matrix(&self) -> Mat4 {
        self.scene_translation
            * self.parent_orbit
            * self.orbit
            * self.spin
            * self.scene_rotation
            * self.scale
    }

    /// Orbit matrix that satellites of this body inherit
    ///
    /// Satellites follow the parent's path but not its spin or scale.
    pub fn orbit_chain(&self) -> Mat4 {
        self.parent_orbit * self.orbit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-4;

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < EPSILON
    }

    #[test]
    fn test_orbit_at_zero_angle() {
        let m = orbit_matrix(0.0, 7.8);
        assert!(approx(m.transform_point3(Vec3::ZERO), Vec3::new(7.8, 0.0, 0.0)));
    }

    #[test]
    fn test_orbit_quarter_turn() {
        // +90 degrees about Y takes +X to -Z
        let m = orbit_matrix(90.0, 10.0);
        assert!(approx(m.transform_point3(Vec3::ZERO), Vec3::new(0.0, 0.0, -10.0)));
    }

    #[test]
    fn test_negative_radius_starts_opposite() {
        let m = orbit_matrix(0.0, -25.0);
        assert!(approx(m.transform_point3(Vec3::ZERO), Vec3::new(-25.0, 0.0, 0.0)));
    }

    #[test]
    fn test_spin_keeps_centre() {
        let t = BodyTransform {
            orbit: orbit_matrix(30.0, 5.0),
            spin: spin_matrix(123.0),
            ..Default::default()
        };
        let centre = t.world_matrix().transform_point3(Vec3::ZERO);
        let without_spin = orbit_matrix(30.0, 5.0).transform_point3(Vec3::ZERO);
        assert!(approx(centre, without_spin));
    }

    #[test]
    fn test_scale_applied_in_body_frame() {
        let t = BodyTransform {
            orbit: orbit_matrix(0.0, 10.0),
            scale: scale_matrix(2.0),
            ..Default::default()
        };
        // A surface point at +Y lands 2 units above the orbit position, not 2x further out
        let p = t.world_matrix().transform_point3(Vec3::Y);
        assert!(approx(p, Vec3::new(10.0, 2.0, 0.0)));
    }

    #[test]
    fn test_moon_follows_parent_orbit() {
        let parent = BodyTransform {
            orbit: orbit_matrix(90.0, -25.0),
            spin: spin_matrix(45.0),
            scale: scale_matrix(3.0),
            ..Default::default()
        };
        let moon = BodyTransform {
            parent_orbit: parent.orbit_chain(),
            orbit: orbit_matrix(0.0, 3.0),
            ..Default::default()
        };
        let parent_centre = parent.world_matrix().transform_point3(Vec3::ZERO);
        let moon_centre = moon.world_matrix().transform_point3(Vec3::ZERO);
        // Parent spin and scale must not leak into the moon's distance
        assert!(((moon_centre - parent_centre).length() - 3.0).abs() < EPSILON);
    }

    #[test]
    fn test_rotation_about_non_unit_axis() {
        let a = rotation_about(90.0, Vec3::new(0.0, 5.0, 0.0));
        let b = Mat4::from_rotation_y(90f32.to_radians());
        assert!(a.abs_diff_eq(b, EPSILON));
    }

    #[test]
    fn test_rotation_about_zero_axis_falls_back() {
        let m = rotation_about(45.0, Vec3::ZERO);
        assert!(m.abs_diff_eq(Mat4::from_rotation_y(45f32.to_radians()), EPSILON));
    }

    #[test]
    fn test_scene_translation_moves_everything() {
        let t = BodyTransform {
            scene_translation: Mat4::from_translation(Vec3::new(0.0, -4.0, 0.0)),
            orbit: orbit_matrix(0.0, 1.0),
            ..Default::default()
        };
        assert!(approx(t.world_matrix().transform_point3(Vec3::ZERO), Vec3::new(1.0, -4.0, 0.0)));
    }
}
