//! Global transform applied on top of every body
//!
//! The whole system can be shifted, spun and resized as one. Rotation
//! accumulates across calls, translation and scale are set outright.

use glam::{Mat4, Vec3};

use crate::transform::rotation_about;

/// Global translate/rotate/scale for the whole system
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneTransform {
    translation: Vec3,
    rotation_deg: f32,
    rotation_axis: Vec3,
    scale: Vec3,
}

impl Default for SceneTransform {
    fn default() -> Self {
        Self::identity()
    }
}

impl SceneTransform {
    pub fn identity() -> Self {
        Self {
            translation: Vec3::ZERO,
            rotation_deg: 0.0,
            rotation_axis: Vec3::Y,
            scale: Vec3::ONE,
        }
    }

    /// Set the global translation
    pub fn translate(&mut self, x: f32, y: f32, z: f32) {
        self.translation = Vec3::new(x, y, z);
    }

    /// Add `degrees` to the accumulated rotation and use `axis` from now on
    pub fn rotate(&mut self, degrees: f32, axis: Vec3) {
        self.rotation_deg = (self.rotation_deg + degrees).rem_euclid(360.0);
        self.rotation_axis = axis;
    }

    /// Set the global scale
    pub fn scale(&mut self, x: f32, y: f32, z: f32) {
        self.scale = Vec3::new(x, y, z);
    }

    /// Back to identity
    pub fn reset(&mut self) {
        *self = Self::identity();
    }

    pub fn rotation_degrees(&self) -> f32 {
        self.rotation_deg
    }

    pub fn translation_matrix(&self) -> Mat4 {
        Mat4::from_translation(self.translation)
    }

    pub fn rotation_matrix(&self) -> Mat4 {
        rotation_about(self.rotation_deg, self.rotation_axis)
    }

    pub fn scale_matrix(&self) -> Mat4 {
        Mat4::from_scale(self.scale)
    }

    /// True when applying this transform changes nothing
    pub fn is_identity(&self) -> bool {
        self.translation == Vec3::ZERO && self.rotation_deg == 0.0 && self.scale == Vec3::ONE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_identity() {
        let t = SceneTransform::default();
        assert!(t.is_identity());
        assert_eq!(t.translation_matrix(), Mat4::IDENTITY);
        assert_eq!(t.scale_matrix(), Mat4::IDENTITY);
        assert!(t.rotation_matrix().abs_diff_eq(Mat4::IDENTITY, 1e-6));
    }

    #[test]
    fn test_rotation_accumulates() {
        let mut t = SceneTransform::identity();
        t.rotate(30.0, Vec3::Y);
        t.rotate(45.0, Vec3::Y);
        assert_eq!(t.rotation_degrees(), 75.0);
    }

    #[test]
    fn test_rotation_wraps() {
        let mut t = SceneTransform::identity();
        t.rotate(350.0, Vec3::Y);
        t.rotate(20.0, Vec3::Y);
        assert!((t.rotation_degrees() - 10.0).abs() < 1e-4);
        t.rotate(-30.0, Vec3::Y);
        assert!((t.rotation_degrees() - 340.0).abs() < 1e-4);
    }

    #[test]
    fn test_translate_and_scale_replace() {
        let mut t = SceneTransform::identity();
        t.translate(1.0, 2.0, 3.0);
        t.translate(4.0, 5.0, 6.0);
        t.scale(2.0, 2.0, 2.0);
        assert_eq!(
            t.translation_matrix().transform_point3(Vec3::ZERO),
            Vec3::new(4.0, 5.0, 6.0)
        );
        assert_eq!(t.scale_matrix().transform_point3(Vec3::ONE), Vec3::splat(2.0));
    }

    #[test]
    fn test_reset() {
        let mut t = SceneTransform::identity();
        t.translate(1.0, 0.0, 0.0);
        t.rotate(90.0, Vec3::X);
        t.scale(3.0, 3.0, 3.0);
        assert!(!t.is_identity());
        t.reset();
        assert!(t.is_identity());
    }
}
