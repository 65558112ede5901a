//! # aacenc
//!
//! An AAC encoder front-end: lifecycle management, configuration translation
//! and PCM framing over a pluggable encoding engine. The engine — the piece
//! that does the actual AAC encoding — sits behind the [`AacEngine`] trait;
//! this crate supplies the stateful [`Encoder`] controller on top of it and a
//! deterministic software engine, [`SoftEngine`], for tests and benchmarks.
//!
//! ```
//! use aacenc::{Encoder, SoftEngine};
//!
//! let mut encoder = Encoder::<SoftEngine>::open(44_100, 2)?;
//! let frame = vec![0u8; encoder.number_of_samples_per_frame() * encoder.input_sample_size()];
//! let encoded = encoder.encode(&frame)?;
//! assert!(encoded.len() <= encoder.max_output_bytes());
//! let tail = encoder.flush()?;
//! encoder.close();
//! # let _ = (encoded, tail);
//! # Ok::<(), aacenc::EncoderError>(())
//! ```

pub mod config;
pub mod encoder;
pub mod engine;
pub mod error;
pub mod pcm;
pub mod soft;

pub use config::{
    EncoderConfiguration, InputFormat, MpegVersion, ObjectType, OutputFormat, ShortBlockControl,
};
pub use encoder::Encoder;
pub use engine::{AacEngine, FrameLayout, RawConfiguration, MAX_CHANNELS};
pub use error::{
    ConfigurationError, EncoderError, ResourceError, Result, StateError, ValidationError,
};
pub use soft::SoftEngine;
