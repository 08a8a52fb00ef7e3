//! Render pass configuration and per-frame command encoding.
//!
//! [`RenderPassBuilder`] describes how the color and depth attachments are
//! cleared. [`FrameEncoder`] owns the command encoder for one frame and the
//! texture it renders into: a swapchain image, presented on submit, or an
//! offscreen texture.

use crate::capture::{PendingCapture, ReadbackLayout};
use crate::depth::DepthBuffer;

/// Builder for the single color + depth pass the orrery draws each frame.
#[derive(Debug)]
pub struct RenderPassBuilder {
    clear_color: wgpu::Color,
    depth_view: Option<wgpu::TextureView>,
    label: Option<&'static str>,
}

impl Default for RenderPassBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderPassBuilder {
    /// A pass clearing to opaque black with no depth attachment.
    pub fn new() -> Self {
        Self {
            clear_color: wgpu::Color::BLACK,
            depth_view: None,
            label: None,
        }
    }

    /// Set the clear color from an RGB triple; alpha is 1.
    pub fn clear_rgb(mut self, [r, g, b]: [f64; 3]) -> Self {
        self.clear_color = wgpu::Color { r, g, b, a: 1.0 };
        self
    }

    /// Attach a depth buffer, cleared to [`DepthBuffer::CLEAR_VALUE`].
    pub fn depth(mut self, depth: &DepthBuffer) -> Self {
        self.depth_view = Some(depth.view.clone());
        self
    }

    pub fn label(mut self, label: &'static str) -> Self {
        self.label = Some(label);
        self
    }

    fn create_render_pass<'encoder>(
        &self,
        encoder: &'encoder mut wgpu::CommandEncoder,
        color_view: &'encoder wgpu::TextureView,
    ) -> wgpu::RenderPass<'encoder> {
        let color_attachment = wgpu::RenderPassColorAttachment {
            view: color_view,
            resolve_target: None,
            ops: wgpu::Operations {
                load: wgpu::LoadOp::Clear(self.clear_color),
                store: wgpu::StoreOp::Store,
            },
            depth_slice: None,
        };

        let depth_stencil_attachment =
            self.depth_view
                .as_ref()
                .map(|view| wgpu::RenderPassDepthStencilAttachment {
                    view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(DepthBuffer::CLEAR_VALUE),
                        store: wgpu::StoreOp::Discard,
                    }),
                    stencil_ops: None,
                });

        encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: self.label,
            color_attachments: &[Some(color_attachment)],
            depth_stencil_attachment,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        })
    }
}

enum FrameTarget {
    Surface(wgpu::SurfaceTexture),
    Offscreen(wgpu::Texture),
}

impl FrameTarget {
    fn texture(&self) -> &wgpu::Texture {
        match self {
            FrameTarget::Surface(surface_texture) => &surface_texture.texture,
            FrameTarget::Offscreen(texture) => texture,
        }
    }
}

/// One frame's command encoder and render target.
///
/// Call [`submit`](Self::submit) when done; dropping an unsubmitted frame
/// submits it with a warning.
pub struct FrameEncoder {
    encoder: Option<wgpu::CommandEncoder>,
    queue: wgpu::Queue,
    target: Option<FrameTarget>,
    view: wgpu::TextureView,
}

impl FrameEncoder {
    /// Encode a frame into the swapchain image.
    pub fn new(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        surface_texture: wgpu::SurfaceTexture,
    ) -> Self {
        Self::with_target(device, queue, FrameTarget::Surface(surface_texture))
    }

    /// Encode a frame into an offscreen texture. It must have been created
    /// with `RENDER_ATTACHMENT` usage, plus `COPY_SRC` to be captured.
    pub fn offscreen(device: &wgpu::Device, queue: &wgpu::Queue, texture: wgpu::Texture) -> Self {
        Self::with_target(device, queue, FrameTarget::Offscreen(texture))
    }

    fn with_target(device: &wgpu::Device, queue: &wgpu::Queue, target: FrameTarget) -> Self {
        let encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("frame-encoder"),
        });
        let view = target
            .texture()
            .create_view(&wgpu::TextureViewDescriptor::default());

        Self {
            encoder: Some(encoder),
            queue: queue.clone(),
            target: Some(target),
            view,
        }
    }

    /// Begin a render pass into this frame's target. `None` once submitted.
    pub fn begin_render_pass<'a>(
        &'a mut self,
        builder: &RenderPassBuilder,
    ) -> Option<wgpu::RenderPass<'a>> {
        let encoder = self.encoder.as_mut()?;
        Some(builder.create_render_pass(encoder, &self.view))
    }

    /// Queue a copy of the target texture into a mappable buffer.
    ///
    /// Must be called after the render passes and before
    /// [`submit`](Self::submit); the returned capture becomes readable once
    /// the frame is submitted.
    pub fn copy_target_to_buffer(&mut self, device: &wgpu::Device) -> Option<PendingCapture> {
        let texture = self.target.as_ref()?.texture();
        let layout = ReadbackLayout::new(texture.width(), texture.height());

        let buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("capture-readback"),
            size: layout.buffer_size(),
            usage: wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::MAP_READ,
            mapped_at_creation: false,
        });

        let encoder = self.encoder.as_mut()?;
        encoder.copy_texture_to_buffer(
            wgpu::TexelCopyTextureInfo {
                texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            wgpu::TexelCopyBufferInfo {
                buffer: &buffer,
                layout: wgpu::TexelCopyBufferLayout {
                    offset: 0,
                    bytes_per_row: Some(layout.padded_bytes_per_row),
                    rows_per_image: Some(layout.height),
                },
            },
            wgpu::Extent3d {
                width: layout.width,
                height: layout.height,
                depth_or_array_layers: 1,
            },
        );

        Some(PendingCapture::new(buffer, layout, texture.format()))
    }

    /// Submit the recorded commands and present a swapchain target.
    pub fn submit(mut self) {
        self.finish();
    }

    fn finish(&mut self) {
        let Some(encoder) = self.encoder.take() else {
            return;
        };
        self.queue.submit([encoder.finish()]);
        if let Some(FrameTarget::Surface(surface_texture)) = self.target.take() {
            surface_texture.present();
        }
    }
}

impl Drop for FrameEncoder {
    fn drop(&mut self) {
        if self.encoder.is_some() {
            log::warn!("FrameEncoder dropped without explicit submit() - auto-submitting");
            self.finish();
        }
    }
}
