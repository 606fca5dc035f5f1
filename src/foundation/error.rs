/// Convenience result type used across bdnsub.
pub type BdnResult<T> = Result<T, BdnError>;

/// Top-level error taxonomy.
///
/// Everything except [`BdnError::Encode`] aborts a run. Encode failures are reported by the
/// sampler and the run continues with the remaining events.
#[derive(thiserror::Error, Debug)]
pub enum BdnError {
    /// Rasterizer or engine setup failed.
    #[error("init error: {0}")]
    Init(String),

    /// Subtitle track could not be read or parsed.
    #[error("load error: {0}")]
    Load(String),

    /// A timecode would need more than two hour digits.
    #[error(
        "timecodes above 99:59:59 are not supported: {hours}:{minutes:02}:{seconds:02}:{frames:02}"
    )]
    TimecodeOverflow {
        /// Hour field that overflowed.
        hours: u64,
        /// Minute field.
        minutes: u64,
        /// Second field.
        seconds: u64,
        /// Frame field.
        frames: u64,
    },

    /// A single event image could not be written.
    #[error("encode error: {0}")]
    Encode(String),

    /// The manifest output could not be created.
    #[error("output error: {0}")]
    OutputOpen(String),

    /// Invalid user-provided values.
    #[error("validation error: {0}")]
    Validation(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl BdnError {
    /// Build a [`BdnError::Init`] value.
    pub fn init(msg: impl Into<String>) -> Self {
        Self::Init(msg.into())
    }

    /// Build a [`BdnError::Load`] value.
    pub fn load(msg: impl Into<String>) -> Self {
        Self::Load(msg.into())
    }

    /// Build a [`BdnError::Encode`] value.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// Build a [`BdnError::OutputOpen`] value.
    pub fn output_open(msg: impl Into<String>) -> Self {
        Self::OutputOpen(msg.into())
    }

    /// Build a [`BdnError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Return `true` for errors that must not abort a run.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::Encode(_))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
