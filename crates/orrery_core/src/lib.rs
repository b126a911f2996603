//! Core types for the orrery
//!
//! This crate holds everything that can be computed without a GPU:
//!
//! - [`SphereMesh`] - Latitude/longitude sphere tessellated as one triangle strip
//! - [`BodyDesc`] / [`Body`] - Static description and per-frame state of a celestial body
//! - [`SolarSystem`] - Arena of bodies in draw order, advanced once per frame
//! - [`SceneTransform`] - Global translate/rotate/scale applied to the whole system
//! - [`transform`] - Orbit, spin and scale matrix helpers

mod body;
mod catalog;
mod scene_transform;
mod sphere;
mod system;
pub mod transform;

pub use body::{Body, BodyDesc, BodyKind};
pub use catalog::STANDARD_CATALOG;
pub use scene_transform::SceneTransform;
pub use sphere::{
    SphereDetail, SphereMesh, SphereVertex, HIGH_DETAIL_SEGMENTS, LOW_DETAIL_SEGMENTS,
};
pub use system::{BodyKey, CatalogError, SolarSystem};

// Re-export the math types that appear in the public API
pub use glam::{Mat4, Vec3};
