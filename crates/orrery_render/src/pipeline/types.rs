//! GPU-compatible data types for the sphere pipeline
//!
//! These types are designed to match the shader layouts exactly.
//! All types derive Pod and Zeroable for safe GPU buffer operations.

use bytemuck::{Pod, Zeroable};
use glam::Mat4;
use orrery_core::SphereVertex;

/// A sphere vertex as uploaded to the GPU
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

impl From<SphereVertex> for Vertex {
    fn from(v: SphereVertex) -> Self {
        Self {
            position: v.position,
            normal: v.normal,
            uv: v.uv,
        }
    }
}

/// Camera uniforms, bound once per frame at group 0
/// Layout: 128 bytes (must match body.wgsl CameraUniforms)
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct CameraUniforms {
    pub view: [[f32; 4]; 4],
    pub projection: [[f32; 4]; 4],
}

impl Default for CameraUniforms {
    fn default() -> Self {
        Self::new(Mat4::IDENTITY, Mat4::IDENTITY)
    }
}

impl CameraUniforms {
    pub fn new(view: Mat4, projection: Mat4) -> Self {
        Self {
            view: view.to_cols_array_2d(),
            projection: projection.to_cols_array_2d(),
        }
    }
}

/// Per-body model matrix at group 1
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct ModelUniforms {
    pub model: [[f32; 4]; 4],
}

impl Default for ModelUniforms {
    fn default() -> Self {
        Self::new(Mat4::IDENTITY)
    }
}

impl ModelUniforms {
    pub fn new(model: Mat4) -> Self {
        Self {
            model: model.to_cols_array_2d(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::mem::size_of;

    #[test]
    fn test_vertex_size() {
        // 3 floats position + 3 floats normal + 2 floats uv = 32 bytes
        assert_eq!(size_of::<Vertex>(), 32);
    }

    #[test]
    fn test_camera_uniforms_size() {
        assert_eq!(size_of::<CameraUniforms>(), 128);
    }

    #[test]
    fn test_model_uniforms_size() {
        assert_eq!(size_of::<ModelUniforms>(), 64);
    }

    #[test]
    fn test_alignment() {
        assert_eq!(std::mem::align_of::<Vertex>(), 4);
        assert_eq!(std::mem::align_of::<CameraUniforms>(), 4);
        assert_eq!(std::mem::align_of::<ModelUniforms>(), 4);
    }

    #[test]
    fn test_column_major_translation() {
        let m = Mat4::from_translation(glam::Vec3::new(1.0, 2.0, 3.0));
        let uniforms = ModelUniforms::new(m);
        assert_eq!(uniforms.model[3], [1.0, 2.0, 3.0, 1.0]);
    }

    #[test]
    fn test_from_sphere_vertex() {
        let v = SphereVertex {
            position: [1.0, 0.0, 0.0],
            normal: [1.0, 0.0, 0.0],
            uv: [0.25, 0.5],
        };
        let gpu: Vertex = v.into();
        assert_eq!(gpu.uv, [0.25, 0.5]);
        assert_eq!(gpu.position, [1.0, 0.0, 0.0]);
    }
}
