//! Session-oriented rendering: sampling a rasterizer at frame cadence into an event timeline.

/// Run driver owning the rasterizer.
pub mod render_session;
/// Frame-cadence state machine.
pub mod sampler;
/// Index-addressed event storage.
pub mod timeline;
