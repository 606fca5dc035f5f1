use std::path::Path;

use anyhow::Context as _;

use crate::foundation::error::{BdnError, BdnResult};
use crate::raster::ass::parse_ass;
use crate::raster::srt::parse_srt;

/// One timed block of subtitle text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cue {
    /// Inclusive start in milliseconds.
    pub start_ms: i64,
    /// Exclusive end in milliseconds.
    pub end_ms: i64,
    /// Display lines with markup removed.
    pub lines: Vec<String>,
}

impl Cue {
    /// Return `true` when the cue is on screen at `time_ms`.
    pub fn is_active(&self, time_ms: i64) -> bool {
        self.start_ms <= time_ms && time_ms < self.end_ms
    }
}

/// Supported subtitle file formats.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubtitleFormat {
    /// SubRip (`.srt`).
    SubRip,
    /// Advanced SubStation Alpha / SubStation Alpha (`.ass`, `.ssa`).
    Ass,
}

impl SubtitleFormat {
    /// Format implied by the file extension, if it is a known one.
    pub fn from_extension(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "srt" => Some(Self::SubRip),
            "ass" | "ssa" => Some(Self::Ass),
            _ => None,
        }
    }

    /// Guess the format from file contents: a leading `[Script Info]` section means ASS/SSA.
    pub fn sniff(text: &str) -> Self {
        let head = text.trim_start_matches('\u{feff}').trim_start();
        let is_ass = head
            .get(..13)
            .is_some_and(|h| h.eq_ignore_ascii_case("[script info]"));
        if is_ass { Self::Ass } else { Self::SubRip }
    }
}

/// A parsed subtitle track, cues in file order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SubtitleTrack {
    /// All non-empty cues.
    pub cues: Vec<Cue>,
}

impl SubtitleTrack {
    /// Read and parse a subtitle file.
    ///
    /// The format comes from the extension, falling back to the file contents.
    pub fn from_path(path: &Path) -> BdnResult<Self> {
        let bytes = std::fs::read(path)
            .with_context(|| format!("read subtitle track '{}'", path.display()))
            .map_err(|e| BdnError::load(format!("{e:#}")))?;
        let text = String::from_utf8_lossy(&bytes);
        let format = SubtitleFormat::from_extension(path).unwrap_or_else(|| SubtitleFormat::sniff(&text));
        tracing::debug!(path = %path.display(), ?format, "loading subtitle track");
        Self::parse(&text, format)
    }

    /// Parse `text` as `format`.
    pub fn parse(text: &str, format: SubtitleFormat) -> BdnResult<Self> {
        match format {
            SubtitleFormat::SubRip => parse_srt(text),
            SubtitleFormat::Ass => parse_ass(text),
        }
    }

    /// Return `true` when the track has no cues.
    pub fn is_empty(&self) -> bool {
        self.cues.is_empty()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/raster/track.rs"]
mod tests;
