//! GPU rendering system
//!
//! Manages GPU rendering including:
//! - Render context and surface
//! - Shared sphere meshes and per-body uniforms/textures
//! - Frame rendering

use std::sync::Arc;

use slotmap::SecondaryMap;
use winit::window::Window;

use orrery_core::{BodyKey, SolarSystem};
use orrery_render::{
    context::{ContextError, RenderContext},
    mesh::SphereMeshes,
    pipeline::{
        load_shader_source, BodyPipeline, CameraUniforms, DrawCall, ModelBinding, ModelUniforms,
    },
    texture::BodyTexture,
    Camera, Projection,
};

use crate::config::{AssetsConfig, CameraConfig, RenderingConfig};

/// Render error types
#[derive(Debug)]
pub enum RenderError {
    /// GPU setup failed
    Init(ContextError),
    /// Surface was lost or outdated (window resized, minimized, etc.)
    SurfaceLost,
    /// GPU out of memory
    OutOfMemory,
    /// Other surface error
    Other(String),
}

impl std::fmt::Display for RenderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RenderError::Init(e) => write!(f, "Render init failed: {}", e),
            RenderError::SurfaceLost => write!(f, "Surface lost"),
            RenderError::OutOfMemory => write!(f, "Out of memory"),
            RenderError::Other(msg) => write!(f, "Render error: {}", msg),
        }
    }
}

impl std::error::Error for RenderError {}

impl From<ContextError> for RenderError {
    fn from(e: ContextError) -> Self {
        RenderError::Init(e)
    }
}

/// GPU resources owned by one body
struct BodyResources {
    model: ModelBinding,
    texture: BodyTexture,
}

/// Manages GPU rendering
pub struct RenderSystem {
    context: RenderContext,
    pipeline: BodyPipeline,
    meshes: SphereMeshes,
    bodies: SecondaryMap<BodyKey, BodyResources>,
    projection: Projection,
    clear_color: wgpu::Color,
}

impl RenderSystem {
    /// Create the render system and every GPU resource the scene needs
    pub fn new(
        window: Arc<Window>,
        render_config: &RenderingConfig,
        camera_config: &CameraConfig,
        assets: &AssetsConfig,
        vsync: bool,
        system: &SolarSystem,
    ) -> Result<Self, RenderError> {
        let context = pollster::block_on(RenderContext::with_vsync(window, vsync))?;

        let shader_source = load_shader_source(render_config.shader_path.as_deref());
        let mut pipeline =
            BodyPipeline::with_shader(&context.device, context.config.format, &shader_source);
        if !pipeline.is_valid() {
            log::error!("Body pipeline failed validation; frames may not draw");
        }

        pipeline.ensure_depth_texture(
            &context.device,
            context.config.width,
            context.config.height,
        );

        let meshes = SphereMeshes::new(
            &context.device,
            render_config.high_detail_segments,
            render_config.low_detail_segments,
        );

        let mut bodies = SecondaryMap::new();
        for (key, body) in system.bodies() {
            let desc = body.desc();
            let model = pipeline.create_model_binding(&context.device, desc.name);
            let texture = BodyTexture::load(
                &context.device,
                &context.queue,
                pipeline.texture_layout(),
                pipeline.sampler(),
                &assets.texture_dir.join(desc.texture),
                desc.fallback_color,
            );
            bodies.insert(key, BodyResources { model, texture });
        }

        let fallbacks = bodies.values().filter(|r| r.texture.is_fallback()).count();
        if fallbacks > 0 {
            log::warn!(
                "{} of {} textures missing from {}; using solid colours",
                fallbacks,
                bodies.len(),
                assets.texture_dir.display()
            );
        }

        let projection = Projection::new(
            camera_config.fov,
            context.config.width,
            context.config.height,
            camera_config.near,
            camera_config.far,
        );

        let bg = render_config.background_color;
        let clear_color = wgpu::Color {
            r: bg[0] as f64,
            g: bg[1] as f64,
            b: bg[2] as f64,
            a: bg[3] as f64,
        };

        Ok(Self {
            context,
            pipeline,
            meshes,
            bodies,
            projection,
            clear_color,
        })
    }

    /// Handle window resize
    pub fn resize(&mut self, width: u32, height: u32) {
        self.context.resize(winit::dpi::PhysicalSize::new(width, height));
        self.pipeline.ensure_depth_texture(
            &self.context.device,
            self.context.config.width,
            self.context.config.height,
        );
        self.projection.resize(width, height);
    }

    /// Reconfigure the surface after it was lost
    pub fn reconfigure(&mut self) {
        self.context.reconfigure();
    }

    /// Render a single frame
    pub fn render_frame(
        &mut self,
        camera: &Camera,
        system: &SolarSystem,
    ) -> Result<(), RenderError> {
        let queue = &self.context.queue;

        self.pipeline.update_camera(
            queue,
            &CameraUniforms::new(camera.view_matrix(), self.projection.matrix()),
        );

        for (key, body) in system.bodies() {
            if let Some(resources) = self.bodies.get(key) {
                resources.model.update(queue, &ModelUniforms::new(body.world_matrix()));
            }
        }

        // Get surface texture
        let output = match self.context.surface.get_current_texture() {
            Ok(output) => output,
            Err(wgpu::SurfaceError::Lost) | Err(wgpu::SurfaceError::Outdated) => {
                return Err(RenderError::SurfaceLost)
            }
            Err(wgpu::SurfaceError::OutOfMemory) => return Err(RenderError::OutOfMemory),
            Err(e) => return Err(RenderError::Other(format!("{:?}", e))),
        };

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .context
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        let draws = system.bodies().filter_map(|(key, body)| {
            self.bodies.get(key).map(|resources| DrawCall {
                mesh: self.meshes.get(body.desc().detail),
                model: &resources.model.bind_group,
                texture: &resources.texture.bind_group,
            })
        });
        self.pipeline.render(&mut encoder, &view, self.clear_color, draws);

        self.context.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }

    /// Current projection (aspect tracks the surface)
    pub fn projection(&self) -> &Projection {
        &self.projection
    }

    /// Get current surface size
    pub fn size(&self) -> (u32, u32) {
        (self.context.config.width, self.context.config.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_error_display() {
        assert_eq!(format!("{}", RenderError::SurfaceLost), "Surface lost");
        assert_eq!(format!("{}", RenderError::OutOfMemory), "Out of memory");
        assert_eq!(
            format!("{}", RenderError::Other("test".to_string())),
            "Render error: test"
        );
        assert_eq!(
            format!("{}", RenderError::Init(ContextError::NoAdapter)),
            "Render init failed: No compatible GPU adapter found"
        );
    }
}
