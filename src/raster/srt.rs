use crate::foundation::error::{BdnError, BdnResult};
use crate::raster::track::{Cue, SubtitleTrack};

/// Parse SubRip text.
///
/// Numeric counters are optional, `,` and `.` are both accepted as the millisecond separator, and
/// simple markup (`<i>`, `<font ...>`, `{\an8}`) is stripped. Zero-length cues are dropped.
pub fn parse_srt(text: &str) -> BdnResult<SubtitleTrack> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut cues = Vec::new();
    let mut lines = text.lines().map(|l| l.trim_end_matches('\r')).enumerate().peekable();

    while let Some((line_no, line)) = lines.next() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let timing = if line.contains("-->") {
            (line_no, line)
        } else if line.bytes().all(|b| b.is_ascii_digit()) {
            match lines.next() {
                Some((n, l)) => (n, l.trim()),
                None => break,
            }
        } else {
            return Err(BdnError::load(format!(
                "line {}: expected cue counter or timing, found '{line}'",
                line_no + 1
            )));
        };

        let (start_ms, end_ms) = parse_timing(timing.1)
            .ok_or_else(|| BdnError::load(format!("line {}: malformed cue timing", timing.0 + 1)))?;
        if end_ms < start_ms {
            return Err(BdnError::load(format!(
                "line {}: cue ends before it starts",
                timing.0 + 1
            )));
        }

        let mut body = Vec::new();
        while let Some((_, l)) = lines.peek() {
            if l.trim().is_empty() {
                break;
            }
            body.push(strip_markup(l.trim()));
            lines.next();
        }
        body.retain(|l| !l.is_empty());

        if end_ms > start_ms && !body.is_empty() {
            cues.push(Cue {
                start_ms,
                end_ms,
                lines: body,
            });
        }
    }

    Ok(SubtitleTrack { cues })
}

fn parse_timing(line: &str) -> Option<(i64, i64)> {
    let (start, rest) = line.split_once("-->")?;
    // Trailing position hints (`X1:... Y1:...`) follow the end time.
    let end = rest.split_whitespace().next()?;
    Some((parse_clock(start.trim())?, parse_clock(end)?))
}

/// Parse `H:MM:SS,mmm` (or `.`) into milliseconds; `None` on malformed or out-of-range fields.
pub(crate) fn parse_clock(s: &str) -> Option<i64> {
    let (hms, frac) = s.split_once([',', '.'])?;
    let mut parts = hms.split(':');
    let h = parse_unsigned(parts.next()?)?;
    let m = parse_unsigned(parts.next()?)?;
    let sec = parse_unsigned(parts.next()?)?;
    if parts.next().is_some() || m >= 60 || sec >= 60 || frac.is_empty() || frac.len() > 3 {
        return None;
    }
    let ms = parse_unsigned(frac)? * 10u64.pow(3 - frac.len() as u32);

    let total = h
        .checked_mul(60)?
        .checked_add(m)?
        .checked_mul(60)?
        .checked_add(sec)?
        .checked_mul(1000)?
        .checked_add(ms)?;
    i64::try_from(total).ok()
}

fn parse_unsigned(field: &str) -> Option<u64> {
    if field.is_empty() || !field.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    field.parse().ok()
}

fn strip_markup(line: &str) -> String {
    let mut out = String::with_capacity(line.len());
    let mut close = None;
    for c in line.chars() {
        match (close, c) {
            (None, '<') => close = Some('>'),
            (None, '{') => close = Some('}'),
            (Some(end), c) if c == end => close = None,
            (Some(_), _) => {}
            (None, c) => out.push(c),
        }
    }
    out.trim().to_owned()
}

#[cfg(test)]
#[path = "../../tests/unit/raster/srt.rs"]
mod tests;
