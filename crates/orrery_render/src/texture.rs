//! Body surface textures
//!
//! Images are decoded with the `image` crate, converted to RGBA8 and uploaded
//! as sRGB textures with a full mip chain built on the CPU. A texture that
//! cannot be read or decoded is replaced by a 1x1 texture in the body's
//! fallback colour, so a missing file never stops the scene from drawing.

use std::fmt;
use std::path::{Path, PathBuf};

use image::{imageops::FilterType, RgbaImage};

const TEXTURE_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8UnormSrgb;

/// Errors reading or decoding a texture image
#[derive(Debug)]
pub enum TextureError {
    Io { path: PathBuf, source: std::io::Error },
    Decode { path: PathBuf, source: image::ImageError },
    ZeroDimensions { width: u32, height: u32 },
}

impl fmt::Display for TextureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TextureError::Io { path, source } => {
                write!(f, "Failed to read texture {}: {}", path.display(), source)
            }
            TextureError::Decode { path, source } => {
                write!(f, "Failed to decode texture {}: {}", path.display(), source)
            }
            TextureError::ZeroDimensions { width, height } => {
                write!(f, "Texture dimensions must be non-zero, got {}x{}", width, height)
            }
        }
    }
}

impl std::error::Error for TextureError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TextureError::Io { source, .. } => Some(source),
            TextureError::Decode { source, .. } => Some(source),
            TextureError::ZeroDimensions { .. } => None,
        }
    }
}

/// Number of mip levels for a full chain down to 1x1
pub fn mip_level_count(width: u32, height: u32) -> u32 {
    32 - width.max(height).max(1).leading_zeros()
}

/// Read and decode an image file into RGBA8
pub fn decode_file(path: &Path) -> Result<RgbaImage, TextureError> {
    let bytes = std::fs::read(path).map_err(|source| TextureError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let image = image::load_from_memory(&bytes).map_err(|source| TextureError::Decode {
        path: path.to_path_buf(),
        source,
    })?;
    let rgba = image.to_rgba8();
    if rgba.width() == 0 || rgba.height() == 0 {
        return Err(TextureError::ZeroDimensions {
            width: rgba.width(),
            height: rgba.height(),
        });
    }
    Ok(rgba)
}

/// Shrink an image so neither side exceeds `max_dimension`, keeping aspect
pub fn fit_to_limit(image: RgbaImage, max_dimension: u32) -> RgbaImage {
    let (width, height) = image.dimensions();
    let largest = width.max(height);
    if largest <= max_dimension {
        return image;
    }
    let scale = max_dimension as f64 / largest as f64;
    let new_width = ((width as f64 * scale).round() as u32).clamp(1, max_dimension);
    let new_height = ((height as f64 * scale).round() as u32).clamp(1, max_dimension);
    log::info!(
        "Downscaling {}x{} texture to {}x{} to fit device limits",
        width,
        height,
        new_width,
        new_height
    );
    image::imageops::resize(&image, new_width, new_height, FilterType::Triangle)
}

/// Base image followed by every smaller mip level down to 1x1
pub fn generate_mip_chain(base: RgbaImage) -> Vec<RgbaImage> {
    let levels = mip_level_count(base.width(), base.height());
    let mut chain = Vec::with_capacity(levels as usize);
    chain.push(base);
    for _ in 1..levels {
        let prev = &chain[chain.len() - 1];
        let width = (prev.width() / 2).max(1);
        let height = (prev.height() / 2).max(1);
        let next = image::imageops::resize(prev, width, height, FilterType::Triangle);
        chain.push(next);
    }
    chain
}

/// Bind group layout for a texture and its sampler
pub fn bind_group_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("Texture Bind Group Layout"),
        entries: &[
            wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Texture {
                    sample_type: wgpu::TextureSampleType::Float { filterable: true },
                    view_dimension: wgpu::TextureViewDimension::D2,
                    multisampled: false,
                },
                count: None,
            },
            wgpu::BindGroupLayoutEntry {
                binding: 1,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                count: None,
            },
        ],
    })
}

/// Repeat-wrapped trilinear sampler
pub fn create_sampler(device: &wgpu::Device) -> wgpu::Sampler {
    device.create_sampler(&wgpu::SamplerDescriptor {
        label: Some("Body Sampler"),
        address_mode_u: wgpu::AddressMode::Repeat,
        address_mode_v: wgpu::AddressMode::Repeat,
        address_mode_w: wgpu::AddressMode::Repeat,
        mag_filter: wgpu::FilterMode::Linear,
        min_filter: wgpu::FilterMode::Linear,
        mipmap_filter: wgpu::FilterMode::Linear,
        ..Default::default()
    })
}

/// A body's texture, ready to bind
pub struct BodyTexture {
    pub texture: wgpu::Texture,
    pub view: wgpu::TextureView,
    pub bind_group: wgpu::BindGroup,
    pub dimensions: (u32, u32),
    pub mip_level_count: u32,
    fallback: bool,
}

impl BodyTexture {
    /// Load a texture file, substituting a solid-colour sentinel on failure
    pub fn load(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        layout: &wgpu::BindGroupLayout,
        sampler: &wgpu::Sampler,
        path: &Path,
        fallback_color: [u8; 4],
    ) -> Self {
        match decode_file(path) {
            Ok(image) => {
                let image = fit_to_limit(image, device.limits().max_texture_dimension_2d);
                let label = path.display().to_string();
                let texture = Self::from_image(device, queue, layout, sampler, image, &label);
                log::info!(
                    "Loaded texture {} ({}x{}, {} mips)",
                    label,
                    texture.dimensions.0,
                    texture.dimensions.1,
                    texture.mip_level_count
                );
                texture
            }
            Err(e) => {
                log::warn!("Failed to load texture: {}", e);
                let mut texture = Self::solid(device, queue, layout, sampler, fallback_color);
                texture.fallback = true;
                texture
            }
        }
    }

    /// Upload an RGBA image with a generated mip chain
    pub fn from_image(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        layout: &wgpu::BindGroupLayout,
        sampler: &wgpu::Sampler,
        image: RgbaImage,
        label: &str,
    ) -> Self {
        let dimensions = image.dimensions();
        let chain = generate_mip_chain(image);
        let mip_level_count = chain.len() as u32;

        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size: wgpu::Extent3d {
                width: dimensions.0,
                height: dimensions.1,
                depth_or_array_layers: 1,
            },
            mip_level_count,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: TEXTURE_FORMAT,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        for (level, mip) in chain.iter().enumerate() {
            let (width, height) = mip.dimensions();
            queue.write_texture(
                wgpu::TexelCopyTextureInfo {
                    texture: &texture,
                    mip_level: level as u32,
                    origin: wgpu::Origin3d::ZERO,
                    aspect: wgpu::TextureAspect::All,
                },
                mip.as_raw(),
                wgpu::TexelCopyBufferLayout {
                    offset: 0,
                    bytes_per_row: Some(4 * width),
                    rows_per_image: Some(height),
                },
                wgpu::Extent3d {
                    width,
                    height,
                    depth_or_array_layers: 1,
                },
            );
        }

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(label),
            layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(sampler),
                },
            ],
        });

        Self {
            texture,
            view,
            bind_group,
            dimensions,
            mip_level_count,
            fallback: false,
        }
    }

    /// 1x1 texture of a single colour
    pub fn solid(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        layout: &wgpu::BindGroupLayout,
        sampler: &wgpu::Sampler,
        color: [u8; 4],
    ) -> Self {
        let image = RgbaImage::from_pixel(1, 1, image::Rgba(color));
        Self::from_image(device, queue, layout, sampler, image, "Sentinel Texture")
    }

    /// True when this is the stand-in for a texture that failed to load
    pub fn is_fallback(&self) -> bool {
        self.fallback
    }
}
