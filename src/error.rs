//! Error types for the encoder front-end
//!
//! Every failure is surfaced synchronously to the caller; nothing is retried
//! internally. The one exception to fallibility is `Encoder::close`, which is
//! designed to be safe to call unconditionally during failure unwinding.

use thiserror::Error;

/// Main error type for the encoder front-end
#[derive(Debug, Error)]
pub enum EncoderError {
    /// The engine rejected an open or configuration request, or reported a
    /// configuration this crate cannot represent
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    /// Operation invalid for the encoder's current lifecycle state
    #[error("State error: {0}")]
    State(#[from] StateError),

    /// Caller-supplied data violates a documented precondition
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Resource acquisition failures
    #[error("Resource error: {0}")]
    Resource(#[from] ResourceError),
}

/// Engine-side configuration rejections and unrepresentable settings
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigurationError {
    /// The engine refused to open for this sample rate / channel pair
    #[error("engine rejected sample rate {sample_rate} Hz with {channels} channel(s)")]
    OpenRejected { sample_rate: u32, channels: u32 },

    /// The engine reported the supplied configuration invalid. The engine may
    /// have applied part of it; re-fetch the configuration to observe that.
    #[error("engine rejected the supplied configuration")]
    Rejected,

    /// The engine's current input format has no defined sample size
    #[error("unsupported input format: {0}")]
    UnsupportedInputFormat(u32),

    /// A raw engine value does not correspond to any known enum constant
    #[error("unknown {field} value: {value}")]
    UnknownFieldValue { field: &'static str, value: u32 },
}

/// Lifecycle state violations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StateError {
    /// New PCM was submitted after flushing began
    #[error("cannot accept audio data once flushing has started")]
    Flushing,

    /// The encoder has been closed; only close itself remains legal
    #[error("encoder is closed")]
    Closed,
}

/// Caller input validation failures
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// More samples were supplied than fit in one frame
    #[error("too many input samples: {given} > {max}")]
    TooManySamples { given: usize, max: usize },
}

/// Resource acquisition failures
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ResourceError {
    /// The reusable output buffer could not be allocated
    #[error("cannot allocate a {bytes}-byte output buffer for encoded data")]
    OutputBufferAllocation { bytes: usize },
}

/// Crate-wide result alias
pub type Result<T> = std::result::Result<T, EncoderError>;
