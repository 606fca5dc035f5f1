//! bdnsub renders timed subtitle tracks into cropped PNG event images and a Blu-ray BDN XML
//! manifest.
//!
//! The pipeline is session-oriented:
//!
//! - Open a [`Rasterizer`] (the built-in [`SvgRasterizer`] reads SubRip and ASS/SSA files)
//! - Create a [`RenderSession`] and run it into an [`ImageSink`]
//! - Build a [`Manifest`] from the resulting events and write it with [`write_bdn_xml_file`]
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

/// Image sinks, manifest and BDN XML output.
pub mod encode;
/// Rasterizer boundary and the built-in text rasterizer.
pub mod raster;
/// Layer compositing.
pub mod render;
/// Frame sampling and the render session.
pub mod session;

pub use crate::foundation::core::{Canvas, CropRect, FrameRate, VideoFormat};
pub use crate::foundation::error::{BdnError, BdnResult};
pub use crate::foundation::timecode::{Timecode, timecode_string};

pub use crate::encode::bdn::{BDN_FILE_NAME, write_bdn_xml, write_bdn_xml_file};
pub use crate::encode::manifest::{Manifest, ManifestEvent, ManifestMeta};
pub use crate::encode::png::PngDirSink;
pub use crate::encode::sink::{CapturedImage, ImageSink, InMemoryImageSink, image_file_name};
pub use crate::raster::ass::parse_ass;
pub use crate::raster::srt::parse_srt;
pub use crate::raster::svg::{SvgRasterizer, SvgRasterizerOpts, TextStyle};
pub use crate::raster::track::{Cue, SubtitleFormat, SubtitleTrack};
pub use crate::raster::{Layer, Rasterizer, Sample};
pub use crate::render::frame::FrameBuffer;
pub use crate::session::render_session::{RenderOutput, RenderSession, RenderSessionOpts};
pub use crate::session::sampler::{FrameSampler, SampleClass, SampleStats, SamplerState};
pub use crate::session::timeline::{EventTimeline, SubtitleEvent};
