//! SMPTE non-drop timecodes.

use std::fmt;
use std::str::FromStr;

use crate::foundation::error::{BdnError, BdnResult};

/// A `HH:MM:SS:FF` non-drop timecode.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Timecode {
    /// Hours, `0..=99`.
    pub hours: u8,
    /// Minutes, `0..60`.
    pub minutes: u8,
    /// Seconds, `0..60`.
    pub seconds: u8,
    /// Frames, `0..rate`.
    pub frames: u8,
}

impl Timecode {
    /// Encode a zero-based sample index.
    ///
    /// The stored value is `index + 1`: authoring tools address the frame *after* the sample.
    pub fn from_sample_index(index: u64, rate: u32) -> BdnResult<Self> {
        if rate == 0 || rate > 255 {
            return Err(BdnError::validation("timecode rate must be in 1..=255"));
        }
        let rate = u64::from(rate);
        let mut tc = index.saturating_add(1);

        let frames = tc % rate;
        tc /= rate;
        let seconds = tc % 60;
        tc /= 60;
        let minutes = tc % 60;
        let hours = tc / 60;

        if hours > 99 {
            return Err(BdnError::TimecodeOverflow {
                hours,
                minutes,
                seconds,
                frames,
            });
        }

        Ok(Self {
            hours: hours as u8,
            minutes: minutes as u8,
            seconds: seconds as u8,
            frames: frames as u8,
        })
    }

    /// Total frame count represented by this timecode at `rate`.
    pub fn to_frames(self, rate: u32) -> u64 {
        let secs = u64::from(self.hours) * 3600
            + u64::from(self.minutes) * 60
            + u64::from(self.seconds);
        secs * u64::from(rate) + u64::from(self.frames)
    }
}

/// Encode `index` as a timecode string, see [`Timecode::from_sample_index`].
pub fn timecode_string(index: u64, rate: u32) -> BdnResult<String> {
    Ok(Timecode::from_sample_index(index, rate)?.to_string())
}

impl fmt::Display for Timecode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02}:{:02}:{:02}",
            self.hours, self.minutes, self.seconds, self.frames
        )
    }
}

impl FromStr for Timecode {
    type Err = BdnError;

    fn from_str(s: &str) -> BdnResult<Self> {
        let bad = || BdnError::validation(format!("malformed timecode '{s}'"));

        let mut fields = [0u8; 4];
        let mut parts = s.split(':');
        for field in &mut fields {
            let part = parts.next().ok_or_else(bad)?;
            if part.len() != 2 || !part.bytes().all(|b| b.is_ascii_digit()) {
                return Err(bad());
            }
            *field = part.parse().map_err(|_| bad())?;
        }
        if parts.next().is_some() || fields[1] >= 60 || fields[2] >= 60 {
            return Err(bad());
        }

        Ok(Self {
            hours: fields[0],
            minutes: fields[1],
            seconds: fields[2],
            frames: fields[3],
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/timecode.rs"]
mod tests;
