//! Rasterizer boundary.
//!
//! A rasterizer turns a subtitle track plus a timestamp into coverage layers. The frame sampler
//! only sees this trait; the built-in implementation lives in [`svg`].

use crate::foundation::error::BdnResult;

/// ASS/SSA event parsing.
pub mod ass;
/// SubRip parsing.
pub mod srt;
/// Built-in text rasterizer backed by `usvg`/`resvg`.
pub mod svg;
/// Timed cues and format detection.
pub mod track;

/// One 8-bit coverage bitmap tinted with a single color.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Layer {
    /// Left edge in frame coordinates.
    pub x: i32,
    /// Top edge in frame coordinates.
    pub y: i32,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Bytes per coverage row.
    pub stride: usize,
    /// Coverage, `stride * height` bytes.
    pub coverage: Vec<u8>,
    /// Packed `0xRRGGBBAA`, where `AA` is transparency (`0` is fully opaque).
    pub color: u32,
}

impl Layer {
    /// Build a layer whose rows are tightly packed.
    pub fn packed(x: i32, y: i32, width: u32, height: u32, coverage: Vec<u8>, color: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
            stride: width as usize,
            coverage,
            color,
        }
    }

    /// Coverage row `row`.
    pub fn row(&self, row: u32) -> &[u8] {
        let start = row as usize * self.stride;
        let end = (start + self.width as usize).min(self.coverage.len());
        self.coverage.get(start..end).unwrap_or(&[])
    }
}

/// Result of querying a rasterizer at one timestamp.
#[derive(Clone, Copy, Debug)]
pub struct Sample<'a> {
    /// Layers visible at the queried time, possibly overlapping. Empty means nothing to draw.
    pub layers: &'a [Layer],
    /// `true` when the output differs from the previous query.
    pub changed: bool,
}

impl Sample<'_> {
    /// Return `true` when the rasterizer produced no layers.
    pub fn is_absent(&self) -> bool {
        self.layers.is_empty()
    }
}

/// Source of rasterized subtitle layers.
///
/// Implementations are opened by their own constructors (failing with
/// [`crate::BdnError::Load`] or [`crate::BdnError::Init`]) and release their resources on drop.
/// Calls are made from a single thread in strictly increasing time order.
pub trait Rasterizer {
    /// Render the track at `time_ms`.
    fn sample(&mut self, time_ms: i64) -> BdnResult<Sample<'_>>;

    /// Milliseconds from `time_ms` until the rendered output can next change; `0` when it never
    /// will.
    fn next_change_offset(&self, time_ms: i64) -> i64;
}

impl<R: Rasterizer + ?Sized> Rasterizer for Box<R> {
    fn sample(&mut self, time_ms: i64) -> BdnResult<Sample<'_>> {
        (**self).sample(time_ms)
    }

    fn next_change_offset(&self, time_ms: i64) -> i64 {
        (**self).next_change_offset(time_ms)
    }
}
