//! wgpu rendering for the orrery: device and surface setup, mesh upload, the
//! unlit per-vertex-color pipeline, depth buffer, frame encoding and frame
//! capture to PPM.

pub mod buffer;
pub mod camera;
pub mod capture;
pub mod depth;
pub mod gpu;
pub mod pass;
pub mod pipeline;

#[cfg(test)]
mod test_device;

pub use buffer::{BufferAllocator, MeshBuffer, vertex_layout};
pub use camera::LookAtCamera;
pub use capture::{
    CaptureError, PendingCapture, ReadbackLayout, RowOrder, Snapshot, capture_path,
};
pub use depth::DepthBuffer;
pub use gpu::{
    RenderContext, RenderContextError, SurfaceError, init_render_context_blocking,
    select_surface_format,
};
pub use pass::{FrameEncoder, RenderPassBuilder};
pub use pipeline::{
    CameraUniform, ModelBinding, ModelUniform, UNLIT_SHADER_SOURCE, UnlitPipeline, draw_unlit,
};
