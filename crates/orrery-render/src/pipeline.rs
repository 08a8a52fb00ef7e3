//! Unlit per-vertex-color pipeline.
//!
//! Group 0 holds the camera (view and projection, shared by every draw),
//! group 1 the model matrix of a single drawable. Depth testing is standard
//! `Less` against a depth buffer cleared to 1.0; counter-clockwise faces are
//! front faces and back faces are culled.

use std::num::NonZeroU64;

use bytemuck::{Pod, Zeroable};
use glam::Mat4;

use crate::buffer::{BufferAllocator, MeshBuffer, vertex_layout};
use crate::depth::DepthBuffer;

/// View and projection matrices, column-major.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct CameraUniform {
    pub view: [[f32; 4]; 4],
    pub projection: [[f32; 4]; 4],
}

impl CameraUniform {
    pub fn new(view: Mat4, projection: Mat4) -> Self {
        Self {
            view: view.to_cols_array_2d(),
            projection: projection.to_cols_array_2d(),
        }
    }
}

/// Object-to-world matrix of one drawable.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct ModelUniform {
    pub model: [[f32; 4]; 4],
}

impl From<Mat4> for ModelUniform {
    fn from(model: Mat4) -> Self {
        Self {
            model: model.to_cols_array_2d(),
        }
    }
}

fn uniform_layout_entry(size: u64) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding: 0,
        visibility: wgpu::ShaderStages::VERTEX,
        ty: wgpu::BindingType::Buffer {
            ty: wgpu::BufferBindingType::Uniform,
            has_dynamic_offset: false,
            min_binding_size: NonZeroU64::new(size),
        },
        count: None,
    }
}

/// The render pipeline and the two bind group layouts it was built with.
pub struct UnlitPipeline {
    pub pipeline: wgpu::RenderPipeline,
    pub camera_bind_group_layout: wgpu::BindGroupLayout,
    pub model_bind_group_layout: wgpu::BindGroupLayout,
}

impl UnlitPipeline {
    /// Compile [`UNLIT_SHADER_SOURCE`] and build the pipeline for the given
    /// color target and optional depth format.
    pub fn new(
        device: &wgpu::Device,
        color_format: wgpu::TextureFormat,
        depth_format: Option<wgpu::TextureFormat>,
    ) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("unlit-shader"),
            source: wgpu::ShaderSource::Wgsl(UNLIT_SHADER_SOURCE.into()),
        });

        let camera_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("camera-bind-group-layout"),
                entries: &[uniform_layout_entry(
                    std::mem::size_of::<CameraUniform>() as u64,
                )],
            });

        let model_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("model-bind-group-layout"),
                entries: &[uniform_layout_entry(
                    std::mem::size_of::<ModelUniform>() as u64,
                )],
            });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("unlit-pipeline-layout"),
            bind_group_layouts: &[&camera_bind_group_layout, &model_bind_group_layout],
            immediate_size: 0,
        });

        let depth_stencil = depth_format.map(|format| wgpu::DepthStencilState {
            format,
            depth_write_enabled: true,
            depth_compare: DepthBuffer::COMPARE_FUNCTION,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("unlit-pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[vertex_layout()],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: Some(wgpu::Face::Back),
                unclipped_depth: false,
                polygon_mode: wgpu::PolygonMode::Fill,
                conservative: false,
            },
            depth_stencil,
            multisample: wgpu::MultisampleState::default(),
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: color_format,
                    blend: None,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            multiview_mask: None,
            cache: None,
        });

        Self {
            pipeline,
            camera_bind_group_layout,
            model_bind_group_layout,
        }
    }

    /// Create the camera uniform buffer and its bind group.
    pub fn create_camera_binding(
        &self,
        device: &wgpu::Device,
    ) -> (wgpu::Buffer, wgpu::BindGroup) {
        let buffer = BufferAllocator::new(device).create_uniform_buffer(
            "camera-uniform",
            bytemuck::bytes_of(&CameraUniform::new(Mat4::IDENTITY, Mat4::IDENTITY)),
        );
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("camera-bind-group"),
            layout: &self.camera_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer.as_entire_binding(),
            }],
        });
        (buffer, bind_group)
    }
}

/// Per-drawable model uniform buffer and bind group.
pub struct ModelBinding {
    pub buffer: wgpu::Buffer,
    pub bind_group: wgpu::BindGroup,
}

impl ModelBinding {
    pub fn new(device: &wgpu::Device, pipeline: &UnlitPipeline, label: &str) -> Self {
        let buffer = BufferAllocator::new(device).create_uniform_buffer(
            &format!("{label}-model"),
            bytemuck::bytes_of(&ModelUniform::from(Mat4::IDENTITY)),
        );
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(&format!("{label}-model-bind-group")),
            layout: &pipeline.model_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer.as_entire_binding(),
            }],
        });
        Self { buffer, bind_group }
    }

    /// Queue a new model matrix; takes effect at the next submit.
    pub fn write(&self, queue: &wgpu::Queue, model: Mat4) {
        queue.write_buffer(&self.buffer, 0, bytemuck::bytes_of(&ModelUniform::from(model)));
    }
}

/// Draw one mesh with its model binding.
pub fn draw_unlit(
    render_pass: &mut wgpu::RenderPass<'_>,
    pipeline: &UnlitPipeline,
    camera_bind_group: &wgpu::BindGroup,
    model: &ModelBinding,
    mesh: &MeshBuffer,
) {
    render_pass.set_pipeline(&pipeline.pipeline);
    render_pass.set_bind_group(0, camera_bind_group, &[]);
    render_pass.set_bind_group(1, &model.bind_group, &[]);
    mesh.bind(render_pass);
    mesh.draw(render_pass);
}

/// WGSL source for the unlit pipeline.
pub const UNLIT_SHADER_SOURCE: &str = r#"
struct CameraUniform {
    view: mat4x4<f32>,
    projection: mat4x4<f32>,
};

struct ModelUniform {
    model: mat4x4<f32>,
};

@group(0) @binding(0)
var<uniform> camera: CameraUniform;

@group(1) @binding(0)
var<uniform> drawable: ModelUniform;

struct VertexInput {
    @location(0) position: vec3<f32>,
    @location(1) color: vec3<f32>,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) color: vec3<f32>,
};

@vertex
fn vs_main(in: VertexInput) -> VertexOutput {
    var out: VertexOutput;
    out.clip_position = camera.projection * camera.view * drawable.model * vec4<f32>(in.position, 1.0);
    out.color = in.color;
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    return vec4<f32>(in.color, 1.0);
}
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_device::create_test_device;

    #[test]
    fn test_uniform_sizes() {
        assert_eq!(std::mem::size_of::<CameraUniform>(), 128);
        assert_eq!(std::mem::size_of::<ModelUniform>(), 64);
    }

    #[test]
    fn test_model_uniform_is_column_major() {
        let m = Mat4::from_translation(glam::Vec3::new(20.0, 20.0, 0.0));
        let uniform = ModelUniform::from(m);
        assert_eq!(uniform.model[3], [20.0, 20.0, 0.0, 1.0]);
    }

    #[test]
    fn test_shader_entry_points_and_bindings() {
        assert!(UNLIT_SHADER_SOURCE.contains("fn vs_main"));
        assert!(UNLIT_SHADER_SOURCE.contains("fn fs_main"));
        assert!(UNLIT_SHADER_SOURCE.contains("@group(1) @binding(0)"));
    }

    #[test]
    fn test_pipeline_creation_succeeds() {
        let Some((device, _queue)) = create_test_device() else {
            return;
        };
        let _pipeline = UnlitPipeline::new(
            &device,
            wgpu::TextureFormat::Bgra8Unorm,
            Some(wgpu::TextureFormat::Depth32Float),
        );
    }

    #[test]
    fn test_pipeline_without_depth() {
        let Some((device, _queue)) = create_test_device() else {
            return;
        };
        let _pipeline = UnlitPipeline::new(&device, wgpu::TextureFormat::Rgba8Unorm, None);
    }

    #[test]
    fn test_bindings_match_layouts() {
        let Some((device, queue)) = create_test_device() else {
            return;
        };
        let pipeline = UnlitPipeline::new(&device, wgpu::TextureFormat::Rgba8Unorm, None);
        let (camera_buffer, _camera_bg) = pipeline.create_camera_binding(&device);
        assert_eq!(camera_buffer.size(), 128);

        let model = ModelBinding::new(&device, &pipeline, "earth");
        assert_eq!(model.buffer.size(), 64);
        model.write(&queue, Mat4::IDENTITY);
    }
}
