//! Orrery rendering library
//!
//! This crate provides the wgpu-based pipeline for drawing textured spheres.
//!
//! ## Key Components
//!
//! - [`context::RenderContext`] - WGPU device, queue, and surface management
//! - [`camera::Camera`] / [`camera::Projection`] - Look-at view and perspective projection
//! - [`texture::BodyTexture`] - Image loading with a sentinel fallback
//! - [`mesh::GpuMesh`] - Sphere strip uploaded to vertex/index buffers
//! - [`pipeline::BodyPipeline`] - Textured sphere pipeline with depth testing

pub mod camera;
pub mod context;
pub mod mesh;
pub mod pipeline;
pub mod texture;

pub use camera::{Camera, Projection};
pub use context::{ContextError, RenderContext};
pub use mesh::{GpuMesh, SphereMeshes};
pub use pipeline::{BodyPipeline, CameraUniforms, DrawCall, ModelBinding, ModelUniforms, Vertex};
pub use texture::{BodyTexture, TextureError};
