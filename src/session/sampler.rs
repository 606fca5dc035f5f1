use crate::encode::sink::ImageSink;
use crate::foundation::core::{Canvas, CropRect};
use crate::foundation::error::{BdnError, BdnResult};
use crate::raster::Rasterizer;
use crate::render::composite::composite;
use crate::render::frame::FrameBuffer;
use crate::session::timeline::EventTimeline;

/// How one rasterizer sample was interpreted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SampleClass {
    /// Nothing rendered and nothing changed; the sampler seeks to the next change.
    UnsampledNoOp,
    /// Unchanged output while no event is open.
    StableEmptyRun,
    /// Unchanged output continuing the open event.
    StableVisibleRun,
    /// Output changed to nothing visible.
    NewEmpty,
    /// Output changed to visible content; a new event was started.
    NewVisible,
}

/// What the rasterizer reported, with the crop of a fresh visible composite.
enum Tick {
    Silent,
    Cleared,
    Unchanged,
    Visible(CropRect),
}

/// Sampler position relative to the event being accumulated.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SamplerState {
    /// No open event; looking for content or the end of the track.
    Seek,
    /// Accumulating a stable visible run for timeline entry `event`.
    Visible {
        /// Index of the open event.
        event: usize,
    },
    /// Output changed to empty; waiting for the next change.
    Empty,
}

/// Counters for one sampling run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct SampleStats {
    /// Rasterizer queries.
    pub samples: u64,
    /// Forward seeks over silent spans.
    pub seeks: u64,
    /// Frames composited.
    pub composites: u64,
    /// Events started.
    pub events: u64,
    /// Event images that failed to encode.
    pub encode_failures: u64,
}

/// Frame-cadence state machine that turns rasterizer output into timeline events.
pub struct FrameSampler {
    frame: FrameBuffer,
    step_ms: i64,
    time_ms: i64,
    state: SamplerState,
    finished: bool,
    stats: SampleStats,
}

impl FrameSampler {
    /// Create a sampler at time 0.
    ///
    /// `step_ms` is the sampling cadence (one frame, rounded to whole milliseconds).
    pub fn new(canvas: Canvas, disc_mode: bool, step_ms: i64) -> BdnResult<Self> {
        if canvas.width == 0 || canvas.height == 0 {
            return Err(BdnError::validation("sampler canvas must be non-empty"));
        }
        if step_ms <= 0 {
            return Err(BdnError::validation("sampler frame step must be positive"));
        }
        Ok(Self {
            frame: FrameBuffer::new(canvas, disc_mode),
            step_ms,
            time_ms: 0,
            state: SamplerState::Seek,
            finished: false,
            stats: SampleStats::default(),
        })
    }

    /// Time of the next sample.
    pub fn time_ms(&self) -> i64 {
        self.time_ms
    }

    /// Current state.
    pub fn state(&self) -> SamplerState {
        self.state
    }

    /// Counters so far.
    pub fn stats(&self) -> SampleStats {
        self.stats
    }

    /// The frame buffer holding the last composite.
    pub fn frame(&self) -> &FrameBuffer {
        &self.frame
    }

    /// Return `true` once the rasterizer reported that nothing will change anymore.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Sample until the track ends.
    pub fn run<R: Rasterizer + ?Sized>(
        &mut self,
        rasterizer: &mut R,
        timeline: &mut EventTimeline,
        sink: &mut dyn ImageSink,
    ) -> BdnResult<SampleStats> {
        while self.step(rasterizer, timeline, sink)?.is_some() {}
        Ok(self.stats)
    }

    /// Take one sample and advance time. Returns `None` once finished.
    pub fn step<R: Rasterizer + ?Sized>(
        &mut self,
        rasterizer: &mut R,
        timeline: &mut EventTimeline,
        sink: &mut dyn ImageSink,
    ) -> BdnResult<Option<SampleClass>> {
        if self.finished {
            return Ok(None);
        }

        let t = self.time_ms;
        let next = t + self.step_ms;

        let sample = rasterizer.sample(t)?;
        self.stats.samples += 1;

        let tick = if sample.is_absent() {
            if sample.changed { Tick::Cleared } else { Tick::Silent }
        } else if !sample.changed {
            Tick::Unchanged
        } else {
            self.stats.composites += 1;
            match composite(&mut self.frame, sample.layers) {
                Some(crop) => Tick::Visible(crop),
                None => Tick::Cleared,
            }
        };

        let class = match tick {
            Tick::Silent => {
                self.state = SamplerState::Seek;
                self.stats.seeks += 1;
                let offset = rasterizer.next_change_offset(t);
                if offset <= 0 {
                    tracing::debug!(time_ms = t, "no further changes, sampling done");
                    self.finished = true;
                } else {
                    self.time_ms = t + offset;
                }
                SampleClass::UnsampledNoOp
            }
            Tick::Cleared => {
                self.state = SamplerState::Empty;
                self.time_ms = next;
                SampleClass::NewEmpty
            }
            Tick::Unchanged => {
                self.time_ms = next;
                match self.state {
                    SamplerState::Visible { event } => {
                        timeline.extend(event, next)?;
                        SampleClass::StableVisibleRun
                    }
                    _ => SampleClass::StableEmptyRun,
                }
            }
            Tick::Visible(crop) => {
                let index = timeline.len();
                timeline.set(index, crop, t, next)?;
                self.emit_image(index, crop, sink)?;
                self.state = SamplerState::Visible { event: index };
                self.stats.events += 1;
                self.time_ms = next;
                SampleClass::NewVisible
            }
        };

        Ok(Some(class))
    }

    fn emit_image(&mut self, index: usize, crop: CropRect, sink: &mut dyn ImageSink) -> BdnResult<()> {
        tracing::debug!(
            index,
            time_ms = self.time_ms,
            x = crop.x1,
            y = crop.y1,
            width = crop.width(),
            height = crop.height(),
            "new subtitle event"
        );
        match sink.write_event(index, &self.frame, crop) {
            Ok(()) => Ok(()),
            Err(e) if e.is_recoverable() => {
                tracing::warn!(index, "event image not written: {e}");
                self.stats.encode_failures += 1;
                Ok(())
            }
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/sampler.rs"]
mod tests;
