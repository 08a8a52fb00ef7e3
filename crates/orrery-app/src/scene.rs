//! GPU-side scene: the four drawables, the unlit pipeline and the camera.

use glam::Mat4;
use orrery_config::Config;
use orrery_mesh::{Mesh, generate_octahedron, generate_sphere};
use orrery_render::{
    BufferAllocator, LookAtCamera, MeshBuffer, ModelBinding, UnlitPipeline, draw_unlit,
};
use orrery_space::{BodyTransforms, CAMERA_UP, FrameState};
use tracing::debug;

/// Draw order of the scene's bodies.
pub const DRAWABLE_NAMES: [&str; 4] = ["sun", "earth", "moon", "marker"];

/// Generate the four meshes in [`DRAWABLE_NAMES`] order.
pub fn build_meshes(config: &Config) -> [Mesh; 4] {
    let scene = &config.scene;
    [
        generate_octahedron(scene.sun_size),
        generate_octahedron(scene.earth_size),
        generate_octahedron(scene.moon_size),
        generate_sphere(
            scene.marker_radius,
            scene.marker_sectors,
            scene.marker_stacks,
        ),
    ]
}

/// Single-precision model matrices in [`DRAWABLE_NAMES`] order.
pub fn model_matrices(transforms: &BodyTransforms) -> [Mat4; 4] {
    [
        transforms.sun.as_mat4(),
        transforms.earth.as_mat4(),
        transforms.moon.as_mat4(),
        transforms.marker.as_mat4(),
    ]
}

/// Camera for the given config, looking at `state`'s target.
pub fn camera_for(config: &Config, state: &FrameState) -> LookAtCamera {
    let [x, y, z] = config.camera.eye;
    let mut camera = LookAtCamera::new(
        glam::DVec3::new(x, y, z).as_vec3(),
        config.render.fov_y_degrees,
        config.render.aspect_ratio,
        config.render.near,
        config.render.far,
    );
    camera.up = CAMERA_UP.as_vec3();
    camera.target = state.camera_target().as_vec3();
    camera
}

struct Drawable {
    mesh: MeshBuffer,
    model: ModelBinding,
}

pub struct Scene {
    pipeline: UnlitPipeline,
    camera: LookAtCamera,
    camera_buffer: wgpu::Buffer,
    camera_bind_group: wgpu::BindGroup,
    drawables: Vec<Drawable>,
}

impl Scene {
    /// Compile the pipeline and upload every mesh. Runs once at startup.
    pub fn new(
        device: &wgpu::Device,
        color_format: wgpu::TextureFormat,
        depth_format: wgpu::TextureFormat,
        config: &Config,
        state: &FrameState,
    ) -> Self {
        let pipeline = UnlitPipeline::new(device, color_format, Some(depth_format));
        let (camera_buffer, camera_bind_group) = pipeline.create_camera_binding(device);
        let allocator = BufferAllocator::new(device);

        let drawables = DRAWABLE_NAMES
            .into_iter()
            .zip(build_meshes(config))
            .map(|(name, mesh)| {
                debug!(
                    "{name}: {} vertices, {} indices",
                    mesh.vertex_count(),
                    mesh.index_count()
                );
                Drawable {
                    mesh: allocator.upload_mesh(name, &mesh),
                    model: ModelBinding::new(device, &pipeline, name),
                }
            })
            .collect();

        Self {
            pipeline,
            camera: camera_for(config, state),
            camera_buffer,
            camera_bind_group,
            drawables,
        }
    }

    /// Write this frame's camera and model uniforms.
    pub fn update(&mut self, queue: &wgpu::Queue, state: &FrameState) {
        self.camera.target = state.camera_target().as_vec3();
        queue.write_buffer(
            &self.camera_buffer,
            0,
            bytemuck::bytes_of(&self.camera.to_uniform()),
        );

        for (drawable, model) in self
            .drawables
            .iter()
            .zip(model_matrices(&state.transforms()))
        {
            drawable.model.write(queue, model);
        }
    }

    pub fn draw(&self, render_pass: &mut wgpu::RenderPass<'_>) {
        for drawable in &self.drawables {
            draw_unlit(
                render_pass,
                &self.pipeline,
                &self.camera_bind_group,
                &drawable.model,
                &drawable.mesh,
            );
        }
    }
}
