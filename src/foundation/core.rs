use std::fmt;
use std::str::FromStr;

use crate::foundation::error::{BdnError, BdnResult};

/// Output canvas dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

/// Disc frame rates accepted by BDN authoring tools.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum FrameRate {
    /// 24000/1001
    #[serde(rename = "23.976")]
    Fps23_976,
    /// 24/1
    #[serde(rename = "24")]
    Fps24,
    /// 25/1
    #[serde(rename = "25")]
    Fps25,
    /// 30000/1001
    #[serde(rename = "29.97")]
    Fps29_97,
    /// 50/1
    #[serde(rename = "50")]
    Fps50,
    /// 60000/1001
    #[serde(rename = "59.94")]
    Fps59_94,
}

impl FrameRate {
    /// Every supported rate, in table order.
    pub const ALL: [FrameRate; 6] = [
        FrameRate::Fps23_976,
        FrameRate::Fps24,
        FrameRate::Fps25,
        FrameRate::Fps29_97,
        FrameRate::Fps50,
        FrameRate::Fps59_94,
    ];

    /// Name used on the command line and in the BDN `FrameRate` attribute.
    pub fn name(self) -> &'static str {
        match self {
            FrameRate::Fps23_976 => "23.976",
            FrameRate::Fps24 => "24",
            FrameRate::Fps25 => "25",
            FrameRate::Fps29_97 => "29.97",
            FrameRate::Fps50 => "50",
            FrameRate::Fps59_94 => "59.94",
        }
    }

    /// Exact rate as `num/den` frames per second.
    pub fn as_ratio(self) -> (u32, u32) {
        match self {
            FrameRate::Fps23_976 => (24_000, 1001),
            FrameRate::Fps24 => (24, 1),
            FrameRate::Fps25 => (25, 1),
            FrameRate::Fps29_97 => (30_000, 1001),
            FrameRate::Fps50 => (50, 1),
            FrameRate::Fps59_94 => (60_000, 1001),
        }
    }

    /// Integer frame count per timecode second (non-drop).
    pub fn nominal(self) -> u32 {
        match self {
            FrameRate::Fps23_976 | FrameRate::Fps24 => 24,
            FrameRate::Fps25 => 25,
            FrameRate::Fps29_97 => 30,
            FrameRate::Fps50 => 50,
            FrameRate::Fps59_94 => 60,
        }
    }

    /// Exact duration of one frame in milliseconds.
    pub fn frame_duration_ms(self) -> f64 {
        let (num, den) = self.as_ratio();
        1000.0 * f64::from(den) / f64::from(num)
    }

    /// Sampling step in whole milliseconds (the frame duration rounded to nearest).
    pub fn frame_step_ms(self) -> i64 {
        self.frame_duration_ms().round() as i64
    }

    /// Zero-based frame index containing `time_ms` (floor; negative times map to 0).
    pub fn frame_index(self, time_ms: i64) -> u64 {
        (time_ms as f64 / self.frame_duration_ms()).max(0.0) as u64
    }
}

impl fmt::Display for FrameRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FrameRate {
    type Err = BdnError;

    fn from_str(s: &str) -> BdnResult<Self> {
        Self::ALL
            .into_iter()
            .find(|r| r.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| BdnError::validation(format!("invalid frame rate '{s}'")))
    }
}

/// Disc video formats and their raster geometry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum VideoFormat {
    /// 1920x1080 progressive.
    #[serde(rename = "1080p")]
    P1080,
    /// 1920x1080 interlaced.
    #[serde(rename = "1080i")]
    I1080,
    /// 1280x720 progressive.
    #[serde(rename = "720p")]
    P720,
    /// 720x576 interlaced.
    #[serde(rename = "576i")]
    I576,
    /// 720x480 progressive.
    #[serde(rename = "480p")]
    P480,
    /// 720x480 interlaced.
    #[serde(rename = "480i")]
    I480,
}

impl VideoFormat {
    /// Every supported format, in table order.
    pub const ALL: [VideoFormat; 6] = [
        VideoFormat::P1080,
        VideoFormat::I1080,
        VideoFormat::P720,
        VideoFormat::I576,
        VideoFormat::P480,
        VideoFormat::I480,
    ];

    /// Name used on the command line and in the BDN `VideoFormat` attribute.
    pub fn name(self) -> &'static str {
        match self {
            VideoFormat::P1080 => "1080p",
            VideoFormat::I1080 => "1080i",
            VideoFormat::P720 => "720p",
            VideoFormat::I576 => "576i",
            VideoFormat::P480 => "480p",
            VideoFormat::I480 => "480i",
        }
    }

    /// Frame geometry.
    pub fn canvas(self) -> Canvas {
        let (width, height) = match self {
            VideoFormat::P1080 | VideoFormat::I1080 => (1920, 1080),
            VideoFormat::P720 => (1280, 720),
            VideoFormat::I576 => (720, 576),
            VideoFormat::P480 | VideoFormat::I480 => (720, 480),
        };
        Canvas { width, height }
    }
}

impl fmt::Display for VideoFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for VideoFormat {
    type Err = BdnError;

    fn from_str(s: &str) -> BdnResult<Self> {
        Self::ALL
            .into_iter()
            .find(|v| v.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| BdnError::validation(format!("invalid video format '{s}'")))
    }
}

/// Bounding box of visible pixels, inclusive on both edges.
///
/// `x1`/`y1` are always even: some disc players misrender or crash on odd object offsets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct CropRect {
    /// Left edge, floored to even.
    pub x1: u32,
    /// Top edge, floored to even.
    pub y1: u32,
    /// Right edge (inclusive).
    pub x2: u32,
    /// Bottom edge (inclusive).
    pub y2: u32,
}

impl CropRect {
    /// Width in pixels.
    pub fn width(self) -> u32 {
        self.x2 - self.x1 + 1
    }

    /// Height in pixels.
    pub fn height(self) -> u32 {
        self.y2 - self.y1 + 1
    }

    /// Return `true` when `(x, y)` lies inside the rectangle.
    pub fn contains(self, x: u32, y: u32) -> bool {
        self.x1 <= x && x <= self.x2 && self.y1 <= y && y <= self.y2
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
