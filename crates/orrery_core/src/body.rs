//! Celestial bodies
//!
//! A [`BodyDesc`] is the fixed, compile-time description of a body.
//! A [`Body`] pairs a description with the angles that change every frame
//! and the matrices derived from them.

use glam::Mat4;

use crate::sphere::SphereDetail;
use crate::transform::{self, BodyTransform};

/// Broad class of a body
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BodyKind {
    Star,
    Planet,
    DwarfPlanet,
    Moon,
}

/// Static description of a body
///
/// Speeds are in degrees per reference frame (one tick of a 60 Hz loop).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BodyDesc {
    pub name: &'static str,
    pub kind: BodyKind,
    /// Body whose orbit this one rides on (`None` orbits the origin)
    pub parent: Option<&'static str>,
    /// Distance from the orbit centre along the rotated +X axis
    pub orbit_radius: f32,
    pub orbit_speed: f32,
    pub spin_speed: f32,
    pub scale: f32,
    pub detail: SphereDetail,
    /// Texture file name, relative to the texture directory
    pub texture: &'static str,
    /// Colour used when the texture cannot be loaded
    pub fallback_color: [u8; 4],
}

/// A body and its current orbital state
#[derive(Clone, Debug)]
pub struct Body {
    desc: BodyDesc,
    orbit_angle: f32,
    spin_angle: f32,
    transform: BodyTransform,
}

impl Body {
    pub fn new(desc: BodyDesc) -> Self {
        Self {
            desc,
            orbit_angle: 0.0,
            spin_angle: 0.0,
            transform: BodyTransform::default(),
        }
    }

    #[inline]
    pub fn desc(&self) -> &BodyDesc {
        &self.desc
    }

    #[inline]
    pub fn name(&self) -> &'static str {
        self.desc.name
    }

    /// Current orbit angle in degrees, always in `[0, 360)`
    #[inline]
    pub fn orbit_angle(&self) -> f32 {
        self.orbit_angle
    }

    /// Current spin angle in degrees, always in `[0, 360)`
    #[inline]
    pub fn spin_angle(&self) -> f32 {
        self.spin_angle
    }

    /// Advance both angles by `frames` reference frames
    pub fn advance(&mut self, frames: f32) {
        self.orbit_angle = wrap_degrees(self.orbit_angle + self.desc.orbit_speed * frames);
        self.spin_angle = wrap_degrees(self.spin_angle + self.desc.spin_speed * frames);
    }

    /// Zero both angles
    pub fn reset(&mut self) {
        self.orbit_angle = 0.0;
        self.spin_angle = 0.0;
    }

    /// Rebuild the cached matrices from the current angles
    pub(crate) fn update_transform(
        &mut self,
        parent_orbit: Mat4,
        scene_translation: Mat4,
        scene_rotation: Mat4,
        scene_scale: Mat4,
    ) {
        self.transform = BodyTransform {
            scene_translation,
            parent_orbit,
            orbit: transform::orbit_matrix(self.orbit_angle, self.desc.orbit_radius),
            spin: transform::spin_matrix(self.spin_angle),
            scene_rotation,
            scale: scene_scale * transform::scale_matrix(self.desc.scale),
        };
    }

    #[inline]
    pub fn transform(&self) -> &BodyTransform {
        &self.transform
    }

    /// World matrix as of the last update
    pub fn world_matrix(&self) -> Mat4 {
        self.transform.world_matrix()
    }

    /// Orbit matrix passed down to this body's satellites
    pub fn orbit_chain(&self) -> Mat4 {
        self.transform.orbit_chain()
    }
}

fn wrap_degrees(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}
