use crate::encode::sink::ImageSink;
use crate::foundation::core::{Canvas, FrameRate, VideoFormat};
use crate::foundation::error::BdnResult;
use crate::raster::Rasterizer;
use crate::session::sampler::{FrameSampler, SampleStats};
use crate::session::timeline::{EventTimeline, SubtitleEvent};

/// Options controlling a [`RenderSession`] run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RenderSessionOpts {
    /// Output geometry.
    pub video_format: VideoFormat,
    /// Sampling cadence and timecode base.
    pub frame_rate: FrameRate,
    /// Quantize alpha for disc players that only handle a few transparency levels.
    pub disc_mode: bool,
}

impl Default for RenderSessionOpts {
    fn default() -> Self {
        Self {
            video_format: VideoFormat::P1080,
            frame_rate: FrameRate::Fps23_976,
            disc_mode: false,
        }
    }
}

/// Result of a completed run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderOutput {
    /// Events in index order.
    pub events: Vec<SubtitleEvent>,
    /// Sampler counters.
    pub stats: SampleStats,
    /// Options the run used.
    pub opts: RenderSessionOpts,
}

/// Owns a rasterizer for the duration of one render run.
///
/// The rasterizer is dropped when the session is, whether `run` returns normally or with an
/// error.
pub struct RenderSession<R: Rasterizer> {
    rasterizer: R,
    opts: RenderSessionOpts,
}

impl<R: Rasterizer> RenderSession<R> {
    /// Wrap an opened rasterizer.
    pub fn new(rasterizer: R, opts: RenderSessionOpts) -> Self {
        Self { rasterizer, opts }
    }

    /// Options in effect.
    pub fn opts(&self) -> RenderSessionOpts {
        self.opts
    }

    /// Frame geometry for this session.
    pub fn canvas(&self) -> Canvas {
        self.opts.video_format.canvas()
    }

    /// Borrow the rasterizer.
    pub fn rasterizer(&self) -> &R {
        &self.rasterizer
    }

    /// Sample the whole track, writing one image per event into `sink`.
    #[tracing::instrument(
        skip_all,
        fields(format = %self.opts.video_format, fps = %self.opts.frame_rate, disc = self.opts.disc_mode)
    )]
    pub fn run(mut self, sink: &mut dyn ImageSink) -> BdnResult<RenderOutput> {
        let step_ms = self.opts.frame_rate.frame_step_ms();
        let mut sampler = FrameSampler::new(self.canvas(), self.opts.disc_mode, step_ms)?;
        let mut timeline = EventTimeline::new();

        let stats = sampler.run(&mut self.rasterizer, &mut timeline, sink)?;
        let events = timeline.finalize();

        tracing::info!(
            events = events.len(),
            samples = stats.samples,
            seeks = stats.seeks,
            encode_failures = stats.encode_failures,
            "render finished"
        );

        Ok(RenderOutput {
            events,
            stats,
            opts: self.opts,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/render_session.rs"]
mod tests;
