use crate::foundation::core::{Canvas, CropRect};

/// Straight-alpha RGBA8 frame the sampler composites into.
///
/// Allocated once per run and cleared, not reallocated, before every composite.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameBuffer {
    pub(crate) width: u32,
    pub(crate) height: u32,
    pub(crate) stride: usize,
    pub(crate) data: Vec<u8>,
    pub(crate) disc_mode: bool,
    pub(crate) crop: Option<CropRect>,
}

impl FrameBuffer {
    /// Allocate a transparent frame for `canvas`.
    pub fn new(canvas: Canvas, disc_mode: bool) -> Self {
        let stride = canvas.width as usize * 4;
        Self {
            width: canvas.width,
            height: canvas.height,
            stride,
            data: vec![0; stride * canvas.height as usize],
            disc_mode,
            crop: None,
        }
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Bytes per row.
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Whether disc-player quantization is applied while blending.
    pub fn disc_mode(&self) -> bool {
        self.disc_mode
    }

    /// Raw RGBA8 rows.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Bounding box of the last composite, `None` when it was fully transparent.
    pub fn crop(&self) -> Option<CropRect> {
        self.crop
    }

    /// RGBA of the pixel at `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let c = y as usize * self.stride + x as usize * 4;
        [
            self.data[c],
            self.data[c + 1],
            self.data[c + 2],
            self.data[c + 3],
        ]
    }

    /// Clear every channel and forget the crop.
    pub fn reset(&mut self) {
        self.data.fill(0);
        self.crop = None;
    }

    /// Copy the pixels inside `crop` into a tightly packed RGBA8 buffer.
    pub fn region_rgba8(&self, crop: CropRect) -> Vec<u8> {
        let row_bytes = crop.width() as usize * 4;
        let mut out = Vec::with_capacity(row_bytes * crop.height() as usize);
        for y in crop.y1..=crop.y2 {
            let start = y as usize * self.stride + crop.x1 as usize * 4;
            out.extend_from_slice(&self.data[start..start + row_bytes]);
        }
        out
    }
}
