//! Render pipeline for textured spheres
//!
//! Every body is one indexed triangle strip drawn with its own model matrix
//! and texture. Camera uniforms are shared by all draws in a frame.

use std::borrow::Cow;
use std::path::Path;

use wgpu::util::DeviceExt;

use super::types::{CameraUniforms, ModelUniforms, Vertex};
use crate::mesh::GpuMesh;
use crate::texture;

/// Shader compiled into the binary
pub const BODY_SHADER_SOURCE: &str = include_str!("../shaders/body.wgsl");

const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

/// Uniform buffer and bind group holding one body's model matrix
pub struct ModelBinding {
    pub buffer: wgpu::Buffer,
    pub bind_group: wgpu::BindGroup,
}

impl ModelBinding {
    pub fn update(&self, queue: &wgpu::Queue, uniforms: &ModelUniforms) {
        queue.write_buffer(&self.buffer, 0, bytemuck::bytes_of(uniforms));
    }
}

/// Everything needed to draw one body
pub struct DrawCall<'a> {
    pub mesh: &'a GpuMesh,
    pub model: &'a wgpu::BindGroup,
    pub texture: &'a wgpu::BindGroup,
}

/// Textured sphere pipeline
pub struct BodyPipeline {
    pipeline: wgpu::RenderPipeline,
    model_layout: wgpu::BindGroupLayout,
    texture_layout: wgpu::BindGroupLayout,
    sampler: wgpu::Sampler,
    camera_buffer: wgpu::Buffer,
    camera_bind_group: wgpu::BindGroup,
    depth_texture: Option<wgpu::TextureView>,
    depth_size: (u32, u32),
    valid: bool,
}

impl BodyPipeline {
    /// Create the pipeline from the built-in shader
    pub fn new(device: &wgpu::Device, surface_format: wgpu::TextureFormat) -> Self {
        Self::with_shader(device, surface_format, BODY_SHADER_SOURCE)
    }

    /// Create the pipeline from custom WGSL
    ///
    /// If the custom shader fails validation the built-in one is used instead.
    /// The outcome is available through [`is_valid`](Self::is_valid).
    pub fn with_shader(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
        shader_source: &str,
    ) -> Self {
        let camera_layout = uniform_layout(device, "Camera Bind Group Layout");
        let model_layout = uniform_layout(device, "Model Bind Group Layout");
        let texture_layout = texture::bind_group_layout(device);

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Body Pipeline Layout"),
            bind_group_layouts: &[&camera_layout, &model_layout, &texture_layout],
            push_constant_ranges: &[],
        });

        let (mut pipeline, mut valid) =
            build_pipeline(device, &pipeline_layout, surface_format, shader_source);
        if !valid && shader_source != BODY_SHADER_SOURCE {
            log::warn!("Custom shader rejected, falling back to built-in shader");
            (pipeline, valid) =
                build_pipeline(device, &pipeline_layout, surface_format, BODY_SHADER_SOURCE);
        }

        let camera_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Camera Uniform Buffer"),
            contents: bytemuck::bytes_of(&CameraUniforms::default()),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let camera_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Camera Bind Group"),
            layout: &camera_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: camera_buffer.as_entire_binding(),
            }],
        });

        let sampler = texture::create_sampler(device);

        Self {
            pipeline,
            model_layout,
            texture_layout,
            sampler,
            camera_buffer,
            camera_bind_group,
            depth_texture: None,
            depth_size: (0, 0),
            valid,
        }
    }

    /// Whether the shader compiled and the pipeline passed validation
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Get the vertex buffer layout for [`Vertex`]
    pub fn vertex_buffer_layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                // position: vec3<f32>
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x3,
                    offset: 0,
                    shader_location: 0,
                },
                // normal: vec3<f32>
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x3,
                    offset: 12,
                    shader_location: 1,
                },
                // uv: vec2<f32>
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x2,
                    offset: 24,
                    shader_location: 2,
                },
            ],
        }
    }

    /// Layout that body textures must be created against
    pub fn texture_layout(&self) -> &wgpu::BindGroupLayout {
        &self.texture_layout
    }

    /// Shared repeat/linear sampler
    pub fn sampler(&self) -> &wgpu::Sampler {
        &self.sampler
    }

    /// Allocate a model uniform buffer and bind group for one body
    pub fn create_model_binding(&self, device: &wgpu::Device, label: &str) -> ModelBinding {
        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::bytes_of(&ModelUniforms::default()),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(label),
            layout: &self.model_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer.as_entire_binding(),
            }],
        });

        ModelBinding { buffer, bind_group }
    }

    /// Update camera uniforms
    pub fn update_camera(&self, queue: &wgpu::Queue, uniforms: &CameraUniforms) {
        queue.write_buffer(&self.camera_buffer, 0, bytemuck::bytes_of(uniforms));
    }

    /// Ensure depth texture exists and is the right size
    pub fn ensure_depth_texture(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        let (width, height) = (width.max(1), height.max(1));
        if self.depth_texture.is_none() || self.depth_size != (width, height) {
            let depth_texture = device.create_texture(&wgpu::TextureDescriptor {
                label: Some("Depth Texture"),
                size: wgpu::Extent3d {
                    width,
                    height,
                    depth_or_array_layers: 1,
                },
                mip_level_count: 1,
                sample_count: 1,
                dimension: wgpu::TextureDimension::D2,
                format: DEPTH_FORMAT,
                usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
                view_formats: &[],
            });

            self.depth_texture =
                Some(depth_texture.create_view(&wgpu::TextureViewDescriptor::default()));
            self.depth_size = (width, height);
        }
    }

    /// Clear colour and depth, then draw each body's full strip
    ///
    /// Does nothing until [`ensure_depth_texture`](Self::ensure_depth_texture) has run.
    pub fn render<'a>(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        view: &wgpu::TextureView,
        clear_color: wgpu::Color,
        draws: impl IntoIterator<Item = DrawCall<'a>>,
    ) {
        let Some(depth_view) = self.depth_texture.as_ref() else {
            log::warn!("Depth texture not created; skipping frame");
            return;
        };

        let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Body Render Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(clear_color),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: depth_view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            timestamp_writes: None,
            occlusion_query_set: None,
        });

        render_pass.set_pipeline(&self.pipeline);
        render_pass.set_bind_group(0, &self.camera_bind_group, &[]);

        for draw in draws {
            render_pass.set_bind_group(1, draw.model, &[]);
            render_pass.set_bind_group(2, draw.texture, &[]);
            draw.mesh.draw(&mut render_pass);
        }
    }
}

/// Read WGSL from `path`, or return the built-in shader if it cannot be read
pub fn load_shader_source(path: Option<&Path>) -> Cow<'static, str> {
    let Some(path) = path else {
        return Cow::Borrowed(BODY_SHADER_SOURCE);
    };
    match std::fs::read_to_string(path) {
        Ok(source) => {
            log::info!("Loaded shader from {}", path.display());
            Cow::Owned(source)
        }
        Err(e) => {
            log::warn!("Error reading shader source {}: {}", path.display(), e);
            Cow::Borrowed(BODY_SHADER_SOURCE)
        }
    }
}

fn uniform_layout(device: &wgpu::Device, label: &str) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some(label),
        entries: &[wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility: wgpu::ShaderStages::VERTEX,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        }],
    })
}

/// Compile the shader and link the pipeline inside a validation error scope
///
/// Returns the pipeline together with whether validation passed. Failures
/// are logged, never propagated.
fn build_pipeline(
    device: &wgpu::Device,
    layout: &wgpu::PipelineLayout,
    surface_format: wgpu::TextureFormat,
    shader_source: &str,
) -> (wgpu::RenderPipeline, bool) {
    device.push_error_scope(wgpu::ErrorFilter::Validation);

    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("Body Shader"),
        source: wgpu::ShaderSource::Wgsl(Cow::Borrowed(shader_source)),
    });

    let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("Body Pipeline"),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: Some("vs_main"),
            buffers: &[BodyPipeline::vertex_buffer_layout()],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: &shader,
            entry_point: Some("fs_main"),
            targets: &[Some(wgpu::ColorTargetState {
                format: surface_format,
                blend: Some(wgpu::BlendState::REPLACE),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        }),
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleStrip,
            strip_index_format: Some(wgpu::IndexFormat::Uint32),
            front_face: wgpu::FrontFace::Ccw,
            // Alternate strip rows flip winding
            cull_mode: None,
            unclipped_depth: false,
            polygon_mode: wgpu::PolygonMode::Fill,
            conservative: false,
        },
        depth_stencil: Some(wgpu::DepthStencilState {
            format: DEPTH_FORMAT,
            depth_write_enabled: true,
            depth_compare: wgpu::CompareFunction::Less,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        }),
        multisample: wgpu::MultisampleState {
            count: 1,
            mask: !0,
            alpha_to_coverage_enabled: false,
        },
        multiview: None,
        cache: None,
    });

    match pollster::block_on(device.pop_error_scope()) {
        None => {
            log::info!("Body pipeline linked");
            (pipeline, true)
        }
        Some(error) => {
            log::error!("Linking body pipeline failed: {}", error);
            (pipeline, false)
        }
    }
}
