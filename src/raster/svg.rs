use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use resvg::tiny_skia::{Color, Pixmap, Transform};

use crate::foundation::core::Canvas;
use crate::foundation::error::{BdnError, BdnResult};
use crate::foundation::xml::escape_xml;
use crate::raster::track::SubtitleTrack;
use crate::raster::{Layer, Rasterizer, Sample};

/// Text appearance for the built-in rasterizer.
#[derive(Clone, Debug, PartialEq)]
pub struct TextStyle {
    /// CSS font family list.
    pub font_family: String,
    /// Font size in pixels. `None` uses 5% of the canvas height.
    pub font_size: Option<f32>,
    /// Glyph body color, `0xRRGGBBAA` with `AA` as transparency.
    pub primary_color: u32,
    /// Outline color, same packing.
    pub outline_color: u32,
    /// Outline thickness in pixels outside the glyph edge.
    pub outline_width: f32,
    /// Distance between the lowest line and the bottom edge. `None` uses 6% of the height.
    pub margin_bottom: Option<f32>,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font_family: "sans-serif".to_owned(),
            font_size: None,
            primary_color: 0xFFFF_FF00,
            outline_color: 0x0000_0000,
            outline_width: 3.0,
            margin_bottom: None,
        }
    }
}

/// Options for [`SvgRasterizer`].
#[derive(Clone, Debug)]
pub struct SvgRasterizerOpts {
    /// Text appearance.
    pub style: TextStyle,
    /// Extra directory scanned for `.ttf`/`.otf`/`.ttc` files.
    pub font_dir: Option<PathBuf>,
    /// Load the fonts installed on the system.
    pub system_fonts: bool,
}

impl Default for SvgRasterizerOpts {
    fn default() -> Self {
        Self {
            style: TextStyle::default(),
            font_dir: None,
            system_fonts: true,
        }
    }
}

/// Renders the active cues of a [`SubtitleTrack`] as an outline layer plus a body layer.
///
/// Layers are re-rendered only when the set of active cues changes.
pub struct SvgRasterizer {
    track: SubtitleTrack,
    canvas: Canvas,
    style: TextStyle,
    usvg_opts: usvg::Options<'static>,
    pixmap: Pixmap,

    active: Vec<usize>,
    scratch: Vec<usize>,
    layers: Vec<Layer>,
}

impl SvgRasterizer {
    /// Read a SubRip or ASS/SSA file and build a rasterizer for it.
    pub fn open(path: &Path, canvas: Canvas, opts: SvgRasterizerOpts) -> BdnResult<Self> {
        let track = SubtitleTrack::from_path(path)?;
        Self::new(track, canvas, opts)
    }

    /// Build a rasterizer for an already parsed track.
    pub fn new(track: SubtitleTrack, canvas: Canvas, opts: SvgRasterizerOpts) -> BdnResult<Self> {
        if canvas.width == 0 || canvas.height == 0 {
            return Err(BdnError::init("rasterizer canvas must be non-empty"));
        }
        let pixmap = Pixmap::new(canvas.width, canvas.height).ok_or_else(|| {
            BdnError::init(format!(
                "failed to allocate {}x{} raster surface",
                canvas.width, canvas.height
            ))
        })?;

        let fontdb = build_fontdb(opts.system_fonts, opts.font_dir.as_deref());
        if fontdb.is_empty() {
            tracing::warn!("no fonts available; subtitle text will render transparent");
        } else {
            tracing::debug!(faces = fontdb.len(), "font database ready");
        }

        let usvg_opts = usvg::Options {
            font_family: opts.style.font_family.clone(),
            fontdb,
            ..Default::default()
        };

        Ok(Self {
            track,
            canvas,
            style: opts.style,
            usvg_opts,
            pixmap,
            active: Vec::new(),
            scratch: Vec::new(),
            layers: Vec::new(),
        })
    }

    /// The track being rendered.
    pub fn track(&self) -> &SubtitleTrack {
        &self.track
    }

    fn font_size(&self) -> f32 {
        self.style
            .font_size
            .unwrap_or(self.canvas.height as f32 * 0.05)
    }

    /// Render passes in paint order: the widened outline stroke first, then the glyph body.
    fn passes(&self) -> Vec<(Option<f32>, u32)> {
        let mut passes = Vec::with_capacity(2);
        let outline = self.style.outline_width;
        if outline > 0.0 {
            passes.push((Some(outline * 2.0), self.style.outline_color));
        }
        passes.push((None, self.style.primary_color));
        passes
    }

    fn render_layers(&mut self) -> BdnResult<()> {
        self.layers.clear();
        if self.active.is_empty() {
            return Ok(());
        }

        for (stroke, color) in self.passes() {
            let svg = self.build_svg(stroke);
            if let Some(layer) = self.rasterize(&svg, color)? {
                self.layers.push(layer);
            }
        }
        Ok(())
    }

    fn build_svg(&self, stroke_width: Option<f32>) -> String {
        let Canvas { width, height } = self.canvas;
        let size = self.font_size();
        let line_height = size * 1.2;
        let margin = self
            .style
            .margin_bottom
            .unwrap_or(height as f32 * 0.06);

        let mut svg = String::new();
        let _ = write!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}">"#
        );
        let _ = write!(
            svg,
            r#"<g font-family="{}" font-size="{size}" text-anchor="middle" fill="black""#,
            escape_xml(&self.style.font_family)
        );
        if let Some(w) = stroke_width {
            let _ = write!(
                svg,
                r#" stroke="black" stroke-width="{w}" stroke-linejoin="round""#
            );
        }
        svg.push('>');

        // Lines are placed bottom-up; later cues stack above earlier ones.
        let x = width as f32 / 2.0;
        let mut baseline = height as f32 - margin;
        for &cue_idx in &self.active {
            for line in self.track.cues[cue_idx].lines.iter().rev() {
                let _ = write!(
                    svg,
                    r#"<text x="{x}" y="{baseline}">{}</text>"#,
                    escape_xml(line)
                );
                baseline -= line_height;
            }
        }

        svg.push_str("</g></svg>");
        svg
    }

    fn rasterize(&mut self, svg: &str, color: u32) -> BdnResult<Option<Layer>> {
        let tree = usvg::Tree::from_str(svg, &self.usvg_opts)
            .map_err(|e| BdnError::Other(anyhow::anyhow!("parse cue svg: {e}")))?;

        self.pixmap.fill(Color::TRANSPARENT);
        resvg::render(&tree, Transform::identity(), &mut self.pixmap.as_mut());

        Ok(coverage_layer(self.pixmap.data(), self.canvas.width, color))
    }
}

impl Rasterizer for SvgRasterizer {
    fn sample(&mut self, time_ms: i64) -> BdnResult<Sample<'_>> {
        self.scratch.clear();
        self.scratch.extend(
            self.track
                .cues
                .iter()
                .enumerate()
                .filter(|(_, c)| c.is_active(time_ms))
                .map(|(i, _)| i),
        );

        let changed = self.scratch != self.active;
        if changed {
            std::mem::swap(&mut self.active, &mut self.scratch);
            self.render_layers()?;
        }

        Ok(Sample {
            layers: &self.layers,
            changed,
        })
    }

    fn next_change_offset(&self, time_ms: i64) -> i64 {
        self.track
            .cues
            .iter()
            .flat_map(|c| [c.start_ms, c.end_ms])
            .filter(|&t| t > time_ms)
            .min()
            .map_or(0, |t| t - time_ms)
    }
}

/// Cut the alpha channel of an RGBA8 surface down to its visible extent.
pub(crate) fn coverage_layer(rgba: &[u8], width: u32, color: u32) -> Option<Layer> {
    let w = width as usize;
    let mut bounds: Option<(usize, usize, usize, usize)> = None;
    for (i, px) in rgba.chunks_exact(4).enumerate() {
        if px[3] == 0 {
            continue;
        }
        let (x, y) = (i % w, i / w);
        bounds = Some(match bounds {
            None => (x, y, x, y),
            Some((x0, y0, x1, y1)) => (x0.min(x), y0.min(y), x1.max(x), y1.max(y)),
        });
    }
    let (x0, y0, x1, y1) = bounds?;

    let lw = x1 - x0 + 1;
    let lh = y1 - y0 + 1;
    let mut coverage = Vec::with_capacity(lw * lh);
    for y in y0..=y1 {
        let row = &rgba[(y * w + x0) * 4..(y * w + x1 + 1) * 4];
        coverage.extend(row.chunks_exact(4).map(|px| px[3]));
    }

    Some(Layer::packed(
        x0 as i32,
        y0 as i32,
        lw as u32,
        lh as u32,
        coverage,
        color,
    ))
}

fn build_fontdb(system_fonts: bool, font_dir: Option<&Path>) -> Arc<usvg::fontdb::Database> {
    let mut db = usvg::fontdb::Database::new();
    if system_fonts {
        db.load_system_fonts();
    }
    if let Some(dir) = font_dir {
        load_fonts_from_dir(&mut db, dir);
    }
    Arc::new(db)
}

fn load_fonts_from_dir(db: &mut usvg::fontdb::Database, dir: &Path) {
    let Ok(rd) = std::fs::read_dir(dir) else {
        tracing::warn!(dir = %dir.display(), "font directory is not readable");
        return;
    };

    for entry in rd.flatten() {
        let path = entry.path();
        let Some(ext) = path.extension().and_then(|s| s.to_str()) else {
            continue;
        };
        let ext = ext.to_ascii_lowercase();
        if ext != "ttf" && ext != "otf" && ext != "ttc" {
            continue;
        }
        if let Err(e) = db.load_font_file(&path) {
            tracing::warn!(path = %path.display(), "skipping font: {e}");
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/raster/svg.rs"]
mod tests;
