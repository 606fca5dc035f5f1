//! Output side of a run.
//!
//! Image sinks receive event regions as the sampler finds them; the manifest and BDN XML writer
//! describe the finished timeline.

/// BDN XML manifest writer.
pub mod bdn;
/// Timecoded manifest built from timeline events.
pub mod manifest;
/// PNG directory sink.
pub mod png;
/// Image sink trait and the in-memory sink.
pub mod sink;
