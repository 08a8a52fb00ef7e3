//! Vertex and index buffers for [`orrery_mesh::Mesh`] uploads.

use orrery_mesh::{Mesh, Vertex};
use wgpu::util::DeviceExt;

/// A mesh uploaded to the GPU, ready for indexed drawing.
pub struct MeshBuffer {
    pub vertex_buffer: wgpu::Buffer,
    pub index_buffer: wgpu::Buffer,
    pub index_count: u32,
}

impl MeshBuffer {
    /// Bind vertex and index buffers to a render pass.
    pub fn bind(&self, render_pass: &mut wgpu::RenderPass<'_>) {
        render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        render_pass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
    }

    /// Draw the entire mesh using indexed rendering.
    pub fn draw(&self, render_pass: &mut wgpu::RenderPass<'_>) {
        render_pass.draw_indexed(0..self.index_count, 0, 0..1);
    }
}

/// Creates GPU buffers on one device.
pub struct BufferAllocator<'a> {
    device: &'a wgpu::Device,
}

impl<'a> BufferAllocator<'a> {
    pub fn new(device: &'a wgpu::Device) -> Self {
        Self { device }
    }

    /// Upload a mesh as `<label>-vertices` and `<label>-indices`.
    pub fn upload_mesh(&self, label: &str, mesh: &Mesh) -> MeshBuffer {
        debug_assert!(mesh.is_well_formed(), "mesh `{label}` has dangling indices");

        let vertex_buffer = self.create_vertex_buffer(&format!("{label}-vertices"), mesh);
        let index_buffer = self.create_index_buffer(&format!("{label}-indices"), &mesh.indices);
        log::debug!(
            "Uploaded mesh {label}: {} vertices, {} indices",
            mesh.vertex_count(),
            mesh.index_count()
        );

        MeshBuffer {
            vertex_buffer,
            index_buffer,
            index_count: mesh.index_count() as u32,
        }
    }

    pub fn create_vertex_buffer(&self, label: &str, mesh: &Mesh) -> wgpu::Buffer {
        self.device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(label),
                contents: mesh.vertex_bytes(),
                usage: wgpu::BufferUsages::VERTEX,
            })
    }

    pub fn create_index_buffer(&self, label: &str, indices: &[u32]) -> wgpu::Buffer {
        self.device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(label),
                contents: bytemuck::cast_slice(indices),
                usage: wgpu::BufferUsages::INDEX,
            })
    }

    /// A uniform buffer initialised with `contents`, writable every frame.
    pub fn create_uniform_buffer(&self, label: &str, contents: &[u8]) -> wgpu::Buffer {
        self.device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(label),
                contents,
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            })
    }
}

const VERTEX_ATTRIBUTES: [wgpu::VertexAttribute; 2] =
    wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3];

/// Buffer layout for [`Vertex`]: position at location 0, color at location 1.
pub fn vertex_layout() -> wgpu::VertexBufferLayout<'static> {
    wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &VERTEX_ATTRIBUTES,
    }
}
