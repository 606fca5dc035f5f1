use crate::foundation::core::CropRect;
use crate::raster::Layer;
use crate::render::frame::FrameBuffer;

/// Disc-mode threshold for pixels with no existing coverage.
const DISC_BINARIZE_THRESHOLD: u32 = 164;
/// Disc-mode opacity band width for pixels drawn over existing coverage.
const DISC_BAND: u32 = 127;

/// Merge `layers` into a freshly cleared `frame` and compute its crop.
///
/// Layers are blended in order. The result is a pure function of the layers and the frame's
/// disc-mode flag.
pub fn composite(frame: &mut FrameBuffer, layers: &[Layer]) -> Option<CropRect> {
    frame.reset();
    for layer in layers {
        blend_layer(frame, layer);
    }
    frame.crop = scan_crop(frame);
    frame.crop
}

/// Blend one tinted coverage layer over `frame`, clipping to the frame bounds.
pub fn blend_layer(frame: &mut FrameBuffer, layer: &Layer) {
    let [r, g, b, transparency] = layer.color.to_be_bytes();
    let opacity = 255 - u32::from(transparency);
    let src_rgb = [u32::from(r), u32::from(g), u32::from(b)];

    for ly in 0..layer.height {
        let fy = i64::from(layer.y) + i64::from(ly);
        if fy < 0 || fy >= i64::from(frame.height) {
            continue;
        }
        let row = layer.row(ly);
        let row_start = fy as usize * frame.stride;

        for (lx, &cov) in row.iter().enumerate() {
            let fx = i64::from(layer.x) + lx as i64;
            if fx < 0 || fx >= i64::from(frame.width) {
                continue;
            }
            let c = row_start + fx as usize * 4;
            let px = &mut frame.data[c..c + 4];

            let dst_a = u32::from(px[3]);
            let mut k = u32::from(cov) * opacity / 255;
            if frame.disc_mode {
                k = quantize_disc(k, dst_a != 0);
            }
            if k == 0 {
                continue;
            }

            let out_a = (k * 255 + dst_a * (255 - k)) / 255;
            if out_a == 0 {
                continue;
            }
            for (dst, src) in px[..3].iter_mut().zip(src_rgb) {
                *dst = blend_channel(k, src, dst_a, u32::from(*dst), out_a) as u8;
            }
            px[3] = out_a as u8;
        }
    }
}

/// Straight-alpha source-over for one channel, truncating at each division.
fn blend_channel(src_a: u32, src: u32, dst_a: u32, dst: u32, out_a: u32) -> u32 {
    ((src_a * 255 * src + dst * dst_a * (255 - src_a)) / out_a) / 255
}

/// Restrict `k` to the few opacity levels disc players render reliably.
pub fn quantize_disc(k: u32, dst_covered: bool) -> u32 {
    if dst_covered {
        let boosted = (255.0 * (f64::from(k) / 255.0).powf(1.0 / 0.75) * 1.2) as u32;
        (boosted.min(255) / DISC_BAND) * DISC_BAND
    } else if k > DISC_BINARIZE_THRESHOLD {
        255
    } else {
        0
    }
}

fn scan_crop(frame: &FrameBuffer) -> Option<CropRect> {
    let mut crop: Option<CropRect> = None;
    if frame.stride == 0 {
        return crop;
    }
    for (y, row) in frame.data.chunks_exact(frame.stride).enumerate() {
        let y = y as u32;
        for (x, px) in row.chunks_exact(4).enumerate() {
            if px[3] == 0 {
                continue;
            }
            let x = x as u32;
            let (ex, ey) = (x - x % 2, y - y % 2);
            crop = Some(match crop {
                None => CropRect {
                    x1: ex,
                    y1: ey,
                    x2: x,
                    y2: y,
                },
                Some(c) => CropRect {
                    x1: c.x1.min(ex),
                    y1: c.y1.min(ey),
                    x2: c.x2.max(x),
                    y2: c.y2.max(y),
                },
            });
        }
    }
    crop
}

#[cfg(test)]
#[path = "../../tests/unit/render/composite.rs"]
mod tests;
