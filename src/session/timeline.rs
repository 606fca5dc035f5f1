use crate::foundation::core::CropRect;
use crate::foundation::error::{BdnError, BdnResult};

/// Slots reserved whenever the timeline runs out of capacity.
pub const TIMELINE_CHUNK: usize = 200;

/// One emitted image and the span it stays on screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SubtitleEvent {
    /// Position in the timeline, also the image file number.
    pub index: usize,
    /// Visible extent of the image.
    pub crop: CropRect,
    /// First millisecond on screen.
    pub start_ms: i64,
    /// First millisecond after the event.
    pub end_ms: i64,
}

/// Index-addressed event list with contiguous indices starting at 0.
#[derive(Clone, Debug, Default)]
pub struct EventTimeline {
    events: Vec<SubtitleEvent>,
}

impl EventTimeline {
    /// Create an empty timeline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Write the event at `index`.
    ///
    /// Existing entries are updated in place; `index == len()` appends. Anything past the end
    /// would leave a gap and is rejected.
    pub fn set(&mut self, index: usize, crop: CropRect, start_ms: i64, end_ms: i64) -> BdnResult<()> {
        let event = SubtitleEvent {
            index,
            crop,
            start_ms,
            end_ms,
        };

        match index.cmp(&self.events.len()) {
            std::cmp::Ordering::Less => {
                self.events[index] = event;
            }
            std::cmp::Ordering::Equal => {
                if self.events.len() == self.events.capacity() {
                    self.events.reserve_exact(TIMELINE_CHUNK);
                }
                self.events.push(event);
            }
            std::cmp::Ordering::Greater => {
                return Err(BdnError::validation(format!(
                    "timeline index {index} would leave a gap after {} events",
                    self.events.len()
                )));
            }
        }
        Ok(())
    }

    /// Move the end of event `index` to `end_ms`, keeping its crop and start.
    pub fn extend(&mut self, index: usize, end_ms: i64) -> BdnResult<()> {
        let ev = self.get(index).ok_or_else(|| {
            BdnError::validation(format!("timeline has no event at index {index}"))
        })?;
        self.set(index, ev.crop, ev.start_ms, end_ms)
    }

    /// Event at `index`, if written.
    pub fn get(&self, index: usize) -> Option<SubtitleEvent> {
        self.events.get(index).copied()
    }

    /// Number of valid events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Return `true` when no event was written.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Allocated slots.
    pub fn capacity(&self) -> usize {
        self.events.capacity()
    }

    /// Consume the timeline, yielding events in index (and therefore time) order.
    pub fn finalize(self) -> Vec<SubtitleEvent> {
        self.events
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/timeline.rs"]
mod tests;
