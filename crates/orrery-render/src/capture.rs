//! Frame capture: GPU readback of the rendered target and plain-text PPM
//! output.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::mpsc;

use image::ImageEncoder;
use image::codecs::pnm::{PnmEncoder, PnmSubtype, SampleEncoding};

#[derive(Debug, thiserror::Error)]
pub enum CaptureError {
    #[error("failed to write capture: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to encode capture: {0}")]
    Encode(#[from] image::ImageError),
    #[error("failed to map readback buffer: {0}")]
    Map(#[from] wgpu::BufferAsyncError),
    #[error("failed to wait for the GPU: {0}")]
    Poll(#[from] wgpu::PollError),
    #[error("texture format {0:?} cannot be captured")]
    UnsupportedFormat(wgpu::TextureFormat),
    #[error("readback holds {actual} bytes, expected at least {expected}")]
    SizeMismatch { expected: usize, actual: usize },
    #[error("readback callback was dropped before completing")]
    ChannelClosed,
}

/// Shape of a texture copied into a buffer: rows are padded to
/// [`wgpu::COPY_BYTES_PER_ROW_ALIGNMENT`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReadbackLayout {
    pub width: u32,
    pub height: u32,
    pub padded_bytes_per_row: u32,
}

impl ReadbackLayout {
    const BYTES_PER_PIXEL: u32 = 4;

    pub fn new(width: u32, height: u32) -> Self {
        let unpadded = width * Self::BYTES_PER_PIXEL;
        let align = wgpu::COPY_BYTES_PER_ROW_ALIGNMENT;
        let padded_bytes_per_row = unpadded.div_ceil(align) * align;
        Self {
            width,
            height,
            padded_bytes_per_row,
        }
    }

    pub fn unpadded_bytes_per_row(&self) -> u32 {
        self.width * Self::BYTES_PER_PIXEL
    }

    pub fn buffer_size(&self) -> u64 {
        self.padded_bytes_per_row as u64 * self.height as u64
    }
}

/// Vertical order of the rows stored in a [`Snapshot`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RowOrder {
    /// First row is the top of the image. wgpu readbacks are in this order.
    TopDown,
    /// First row is the bottom of the image.
    BottomUp,
}

/// A captured frame as tightly packed 8-bit RGB.
#[derive(Clone, Debug, PartialEq)]
pub struct Snapshot {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
    pub row_order: RowOrder,
}

impl Snapshot {
    /// Strip row padding and alpha from a mapped readback, converting BGRA
    /// targets to RGB.
    pub fn from_padded_readback(
        data: &[u8],
        layout: ReadbackLayout,
        format: wgpu::TextureFormat,
        row_order: RowOrder,
    ) -> Result<Self, CaptureError> {
        use wgpu::TextureFormat as F;

        let swap_red_blue = match format {
            F::Bgra8Unorm | F::Bgra8UnormSrgb => true,
            F::Rgba8Unorm | F::Rgba8UnormSrgb => false,
            other => return Err(CaptureError::UnsupportedFormat(other)),
        };

        let expected = layout.buffer_size() as usize;
        if data.len() < expected {
            return Err(CaptureError::SizeMismatch {
                expected,
                actual: data.len(),
            });
        }

        let row_bytes = layout.unpadded_bytes_per_row() as usize;
        let mut pixels = Vec::with_capacity(layout.width as usize * layout.height as usize * 3);
        for row in data
            .chunks_exact(layout.padded_bytes_per_row as usize)
            .take(layout.height as usize)
        {
            for texel in row[..row_bytes].chunks_exact(4) {
                if swap_red_blue {
                    pixels.extend_from_slice(&[texel[2], texel[1], texel[0]]);
                } else {
                    pixels.extend_from_slice(&texel[..3]);
                }
            }
        }

        Ok(Self {
            width: layout.width,
            height: layout.height,
            pixels,
            row_order,
        })
    }

    /// RGB value at `(x, y)` with `y = 0` at the top of the image.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 3]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let row = match self.row_order {
            RowOrder::TopDown => y,
            RowOrder::BottomUp => self.height - 1 - y,
        };
        let start = (row as usize * self.width as usize + x as usize) * 3;
        let rgb = self.pixels.get(start..start + 3)?;
        Some([rgb[0], rgb[1], rgb[2]])
    }

    /// Pixel rows ordered top to bottom.
    pub fn top_down_rows(&self) -> Vec<&[u8]> {
        let stride = self.width as usize * 3;
        if stride == 0 {
            return Vec::new();
        }
        let mut rows: Vec<&[u8]> = self.pixels.chunks_exact(stride).collect();
        if self.row_order == RowOrder::BottomUp {
            rows.reverse();
        }
        rows
    }

    /// Reorder the pixel rows in place so the snapshot is top-down.
    pub fn flip_to_top_down(&mut self) {
        if self.row_order == RowOrder::TopDown {
            return;
        }
        self.pixels = self.top_down_rows().concat();
        self.row_order = RowOrder::TopDown;
    }

    /// Encode as an ASCII (`P3`) PPM, top row first.
    pub fn encode_ppm<W: Write>(&self, writer: W) -> Result<(), CaptureError> {
        let pixels = self.top_down_rows().concat();
        PnmEncoder::new(writer)
            .with_subtype(PnmSubtype::Pixmap(SampleEncoding::Ascii))
            .write_image(
                &pixels,
                self.width,
                self.height,
                image::ExtendedColorType::Rgb8,
            )?;
        Ok(())
    }

    /// Write a PPM file, creating the parent directory if needed.
    pub fn write_ppm(&self, path: &Path) -> Result<(), CaptureError> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        let file = std::fs::File::create(path)?;
        let mut writer = std::io::BufWriter::new(file);
        self.encode_ppm(&mut writer)?;
        writer.flush()?;
        log::info!(
            "Captured {}x{} frame to {}",
            self.width,
            self.height,
            path.display()
        );
        Ok(())
    }
}

/// `<prefix>_<camera>_<frame>.ppm` inside `directory`.
pub fn capture_path(directory: &Path, prefix: &str, camera: &str, frame: u64) -> PathBuf {
    directory.join(format!("{prefix}_{camera}_{frame:06}.ppm"))
}

/// A submitted texture-to-buffer copy awaiting readback.
pub struct PendingCapture {
    buffer: wgpu::Buffer,
    layout: ReadbackLayout,
    format: wgpu::TextureFormat,
}

impl PendingCapture {
    pub(crate) fn new(
        buffer: wgpu::Buffer,
        layout: ReadbackLayout,
        format: wgpu::TextureFormat,
    ) -> Self {
        Self {
            buffer,
            layout,
            format,
        }
    }

    pub fn layout(&self) -> ReadbackLayout {
        self.layout
    }

    /// Block until the copy has landed and convert it to a [`Snapshot`].
    ///
    /// The frame that recorded the copy must already be submitted.
    pub fn wait(self, device: &wgpu::Device) -> Result<Snapshot, CaptureError> {
        let slice = self.buffer.slice(..);
        let (sender, receiver) = mpsc::channel();
        slice.map_async(wgpu::MapMode::Read, move |result| {
            let _ = sender.send(result);
        });

        device.poll(wgpu::PollType::Wait {
            submission_index: None,
            timeout: None,
        })?;
        receiver.recv().map_err(|_| CaptureError::ChannelClosed)??;

        let snapshot = {
            let data = slice.get_mapped_range();
            Snapshot::from_padded_readback(&data, self.layout, self.format, RowOrder::TopDown)
        };
        self.buffer.unmap();
        snapshot
    }
}
