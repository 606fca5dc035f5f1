use std::path::Path;

use anyhow::Context as _;

use crate::encode::sink::image_file_name;
use crate::foundation::core::{Canvas, FrameRate, VideoFormat};
use crate::foundation::error::{BdnError, BdnResult};
use crate::foundation::timecode::timecode_string;
use crate::session::timeline::SubtitleEvent;

/// Track-level metadata written into the manifest.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ManifestMeta {
    /// Track title.
    pub track_name: String,
    /// Language code, for example `eng` or `und`.
    pub language: String,
    /// Output geometry.
    pub video_format: VideoFormat,
    /// Timecode base.
    pub frame_rate: FrameRate,
}

impl Default for ManifestMeta {
    fn default() -> Self {
        Self {
            track_name: "Undefined".to_owned(),
            language: "und".to_owned(),
            video_format: VideoFormat::P1080,
            frame_rate: FrameRate::Fps23_976,
        }
    }
}

/// One timecoded event image.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct ManifestEvent {
    /// Timeline index.
    pub index: usize,
    /// Image file name relative to the output directory.
    pub file_name: String,
    /// In timecode.
    pub in_tc: String,
    /// Out timecode.
    pub out_tc: String,
    /// Left edge of the image on the canvas.
    pub x: u32,
    /// Top edge of the image on the canvas.
    pub y: u32,
    /// Image width.
    pub width: u32,
    /// Image height.
    pub height: u32,
}

/// Everything the BDN XML document needs, with timecodes already formatted.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct Manifest {
    /// Track title.
    pub track_name: String,
    /// Language code.
    pub language: String,
    /// Output geometry name.
    pub video_format: VideoFormat,
    /// Frame-rate name.
    pub frame_rate: FrameRate,
    /// Canvas size of `video_format`.
    pub canvas: Canvas,
    /// Timecode of sample 0.
    pub content_in_tc: String,
    /// In timecode of the first event, `content_in_tc` when there are none.
    pub first_in_tc: String,
    /// Out timecode of the last event, `content_in_tc` when there are none.
    pub last_out_tc: String,
    /// Events in index order.
    pub events: Vec<ManifestEvent>,
}

impl Manifest {
    /// Convert timeline events into timecoded manifest entries.
    ///
    /// Fails with [`BdnError::TimecodeOverflow`] when any time needs more than 99 hours.
    pub fn build(events: &[SubtitleEvent], meta: ManifestMeta) -> BdnResult<Self> {
        let rate = meta.frame_rate;
        let tc = |ms: i64| timecode_string(rate.frame_index(ms), rate.nominal());

        let entries = events
            .iter()
            .map(|ev| {
                Ok(ManifestEvent {
                    index: ev.index,
                    file_name: image_file_name(ev.index),
                    in_tc: tc(ev.start_ms)?,
                    out_tc: tc(ev.end_ms)?,
                    x: ev.crop.x1,
                    y: ev.crop.y1,
                    width: ev.crop.width(),
                    height: ev.crop.height(),
                })
            })
            .collect::<BdnResult<Vec<_>>>()?;

        let content_in_tc = timecode_string(0, rate.nominal())?;
        let first_in_tc = entries
            .first()
            .map_or_else(|| content_in_tc.clone(), |e| e.in_tc.clone());
        let last_out_tc = entries
            .last()
            .map_or_else(|| content_in_tc.clone(), |e| e.out_tc.clone());

        Ok(Self {
            track_name: meta.track_name,
            language: meta.language,
            video_format: meta.video_format,
            frame_rate: rate,
            canvas: meta.video_format.canvas(),
            content_in_tc,
            first_in_tc,
            last_out_tc,
            events: entries,
        })
    }

    /// Number of events.
    pub fn event_count(&self) -> usize {
        self.events.len()
    }

    /// Pretty-printed JSON form.
    pub fn to_json_pretty(&self) -> BdnResult<String> {
        serde_json::to_string_pretty(self)
            .context("serialize manifest")
            .map_err(BdnError::from)
    }

    /// Write the JSON form to `path`.
    pub fn write_json(&self, path: &Path) -> BdnResult<()> {
        let json = self.to_json_pretty()?;
        std::fs::write(path, json)
            .with_context(|| format!("write manifest json '{}'", path.display()))
            .map_err(|e| BdnError::output_open(format!("{e:#}")))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/manifest.rs"]
mod tests;
