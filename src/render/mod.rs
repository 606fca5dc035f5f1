//! Layer compositing into the reusable frame buffer.

/// Blending, disc-mode quantization and crop computation.
pub mod composite;
/// The RGBA frame buffer.
pub mod frame;
