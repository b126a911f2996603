//! Rendering pipeline components
//!
//! GPU data layouts and the textured sphere pipeline.

pub mod body_pipeline;
pub mod types;

// Re-export types
pub use types::{CameraUniforms, ModelUniforms, Vertex};

// Re-export pipeline
pub use body_pipeline::{
    load_shader_source, BodyPipeline, DrawCall, ModelBinding, BODY_SHADER_SOURCE,
};
