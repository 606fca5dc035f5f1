pub mod core;
pub mod error;
pub mod timecode;
pub(crate) mod xml;
