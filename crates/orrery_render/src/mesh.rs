//! Sphere meshes uploaded to the GPU
//!
//! Each detail level is uploaded once and shared by every body drawn at
//! that level.

use orrery_core::{SphereDetail, SphereMesh};
use wgpu::util::DeviceExt;

use crate::pipeline::Vertex;

/// Vertex and index buffers for one sphere strip
pub struct GpuMesh {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
    detail: SphereDetail,
}

impl GpuMesh {
    /// Upload a tessellated sphere
    pub fn upload(device: &wgpu::Device, mesh: &SphereMesh, detail: SphereDetail) -> Self {
        let vertices: Vec<Vertex> = mesh.vertices().iter().copied().map(Vertex::from).collect();

        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Sphere Vertex Buffer"),
            contents: bytemuck::cast_slice(&vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Sphere Index Buffer"),
            contents: bytemuck::cast_slice(mesh.indices()),
            usage: wgpu::BufferUsages::INDEX,
        });

        log::info!(
            "Uploaded {:?} sphere: {} vertices, {} indices",
            detail,
            mesh.vertex_count(),
            mesh.index_count()
        );

        Self {
            vertex_buffer,
            index_buffer,
            index_count: mesh.index_count() as u32,
            detail,
        }
    }

    pub fn detail(&self) -> SphereDetail {
        self.detail
    }

    pub fn index_count(&self) -> u32 {
        self.index_count
    }

    /// Bind buffers and draw the whole strip
    pub fn draw(&self, pass: &mut wgpu::RenderPass<'_>) {
        pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        pass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        pass.draw_indexed(0..self.index_count, 0, 0..1);
    }
}

/// The two shared sphere meshes
pub struct SphereMeshes {
    high: GpuMesh,
    low: GpuMesh,
}

impl SphereMeshes {
    /// Tessellate and upload both detail levels
    pub fn new(device: &wgpu::Device, high_segments: u32, low_segments: u32) -> Self {
        let high_mesh = SphereMesh::for_detail(SphereDetail::High, Some(high_segments));
        let low_mesh = SphereMesh::for_detail(SphereDetail::Low, Some(low_segments));
        Self {
            high: GpuMesh::upload(device, &high_mesh, SphereDetail::High),
            low: GpuMesh::upload(device, &low_mesh, SphereDetail::Low),
        }
    }

    pub fn get(&self, detail: SphereDetail) -> &GpuMesh {
        match detail {
            SphereDetail::High => &self.high,
            SphereDetail::Low => &self.low,
        }
    }
}
