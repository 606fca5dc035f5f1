use crate::foundation::error::{BdnError, BdnResult};
use crate::raster::srt::parse_clock;
use crate::raster::track::{Cue, SubtitleTrack};

/// Column positions of the fields the reader needs.
struct EventColumns {
    count: usize,
    start: usize,
    end: usize,
    text: usize,
}

impl EventColumns {
    /// `Layer, Start, End, Style, Name, MarginL, MarginR, MarginV, Effect, Text`, assumed when an
    /// `[Events]` section has no `Format:` line.
    fn ass_default() -> Self {
        Self {
            count: 10,
            start: 1,
            end: 2,
            text: 9,
        }
    }

    fn from_names<'a>(names: impl IntoIterator<Item = &'a str>) -> Option<Self> {
        let names: Vec<String> = names.into_iter().map(|n| n.trim().to_ascii_lowercase()).collect();
        let find = |want: &str| names.iter().position(|n| n == want);
        Some(Self {
            count: names.len(),
            start: find("start")?,
            end: find("end")?,
            text: find("text")?,
        })
    }
}

/// Parse ASS/SSA text.
///
/// Only `Dialogue:` lines of the `[Events]` section are read, using the column order of its
/// `Format:` line. Styles and positioning are ignored; `\N` and `\n` break lines, `\h` is a space
/// and `{...}` override blocks are stripped. Zero-length and empty events are dropped.
pub fn parse_ass(text: &str) -> BdnResult<SubtitleTrack> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut cues = Vec::new();
    let mut in_events = false;
    let mut columns: Option<EventColumns> = None;

    for (line_no, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.starts_with('[') && line.ends_with(']') {
            in_events = line.eq_ignore_ascii_case("[events]");
            continue;
        }
        if !in_events {
            continue;
        }
        let Some((key, rest)) = line.split_once(':') else {
            continue;
        };

        match key.trim().to_ascii_lowercase().as_str() {
            "format" => {
                columns = Some(EventColumns::from_names(rest.split(',')).ok_or_else(|| {
                    BdnError::load(format!(
                        "line {}: event format needs Start, End and Text columns",
                        line_no + 1
                    ))
                })?);
            }
            "dialogue" => {
                let cols = columns.get_or_insert_with(EventColumns::ass_default);
                if let Some(cue) = parse_dialogue(rest, cols, line_no + 1)? {
                    cues.push(cue);
                }
            }
            _ => {}
        }
    }

    Ok(SubtitleTrack { cues })
}

fn parse_dialogue(rest: &str, cols: &EventColumns, line_no: usize) -> BdnResult<Option<Cue>> {
    // Text is the last column and may itself contain commas.
    let fields: Vec<&str> = rest.splitn(cols.count, ',').collect();
    if fields.len() < cols.count {
        return Err(BdnError::load(format!(
            "line {line_no}: dialogue has {} of {} fields",
            fields.len(),
            cols.count
        )));
    }

    let clock = |i: usize| {
        parse_clock(fields[i].trim())
            .ok_or_else(|| BdnError::load(format!("line {line_no}: malformed event time")))
    };
    let start_ms = clock(cols.start)?;
    let end_ms = clock(cols.end)?;
    if end_ms < start_ms {
        return Err(BdnError::load(format!(
            "line {line_no}: event ends before it starts"
        )));
    }

    let lines = dialogue_lines(fields[cols.text]);
    if end_ms == start_ms || lines.is_empty() {
        return Ok(None);
    }
    Ok(Some(Cue {
        start_ms,
        end_ms,
        lines,
    }))
}

fn dialogue_lines(text: &str) -> Vec<String> {
    let mut plain = String::with_capacity(text.len());
    let mut in_override = false;
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '{' => in_override = true,
            '}' if in_override => in_override = false,
            _ if in_override => {}
            '\\' => match chars.peek() {
                Some('N' | 'n') => {
                    chars.next();
                    plain.push('\n');
                }
                Some('h') => {
                    chars.next();
                    plain.push(' ');
                }
                _ => plain.push('\\'),
            },
            c => plain.push(c),
        }
    }

    plain
        .split('\n')
        .map(|l| l.trim().to_owned())
        .filter(|l| !l.is_empty())
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/raster/ass.rs"]
mod tests;
