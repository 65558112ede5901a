//! The encoder lifecycle controller
//!
//! [`Encoder`] owns one engine instance and enforces the
//! configure → encode* → flush → closed state machine on top of it. It
//! stores the engine-reported frame geometry verbatim, allocates the output
//! buffer once and reuses it for every pass, and keeps the input sample size
//! in step with the engine's configured input format.
//!
//! An encoder is single-threaded, synchronous state: one controller per
//! stream. Dropping it runs the same idempotent close logic as
//! [`Encoder::close`], so resources are released on every exit path.

use log::{debug, trace, warn};

use crate::config::{EncoderConfiguration, InputFormat};
use crate::engine::{AacEngine, FrameLayout};
use crate::error::{ConfigurationError, ResourceError, Result, StateError, ValidationError};
use crate::pcm;

/// A stateful AAC encoder bound to one engine instance
pub struct Encoder<E: AacEngine> {
    /// `None` once closed; the handle is released exactly once
    engine: Option<E>,
    sample_rate: u32,
    number_of_channels: u32,
    input_sample_size: usize,
    layout: FrameLayout,
    /// Allocated once at open; overwritten by every encode and flush pass
    output_buffer: Vec<u8>,
    /// One-way latch set by the first flush
    flushing: bool,
}

fn derived_sample_size<E: AacEngine>(engine: &E) -> Result<usize> {
    let raw = engine.current_configuration();
    let format = InputFormat::from_raw(raw.input_format)?;
    Ok(format.sample_size())
}

impl<E: AacEngine> Encoder<E> {
    /// Open a new engine instance for the given sample rate and channel
    /// count.
    ///
    /// The engine reports the frame sample count and the maximum output size
    /// of one pass; both are fixed for the encoder's lifetime. The output
    /// buffer of that maximum size is allocated here, once. The input sample
    /// size is derived from the engine's default input format.
    pub fn open(sample_rate: u32, number_of_channels: u32) -> Result<Self> {
        let (engine, layout) =
            E::open(sample_rate, number_of_channels).ok_or(ConfigurationError::OpenRejected {
                sample_rate,
                channels: number_of_channels,
            })?;

        let mut output_buffer = Vec::new();
        output_buffer
            .try_reserve_exact(layout.max_output_bytes)
            .map_err(|_| ResourceError::OutputBufferAllocation {
                bytes: layout.max_output_bytes,
            })?;
        output_buffer.resize(layout.max_output_bytes, 0);

        let input_sample_size = derived_sample_size(&engine)?;
        debug!(
            "opened encoder: {sample_rate} Hz, {number_of_channels} channel(s), \
             {} samples/frame, {} max output bytes",
            layout.samples_per_frame, layout.max_output_bytes
        );

        Ok(Self {
            engine: Some(engine),
            sample_rate,
            number_of_channels,
            input_sample_size,
            layout,
            output_buffer,
            flushing: false,
        })
    }

    /// Sample rate fixed at open time, in Hz
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Channel count fixed at open time
    pub fn number_of_channels(&self) -> u32 {
        self.number_of_channels
    }

    /// Size of a single input sample in bytes, per the current input format
    pub fn input_sample_size(&self) -> usize {
        self.input_sample_size
    }

    /// Exact count of interleaved samples one encode call expects.
    ///
    /// One frame lasts `number_of_samples_per_frame / (number_of_channels *
    /// sample_rate)` seconds.
    pub fn number_of_samples_per_frame(&self) -> usize {
        self.layout.samples_per_frame
    }

    /// Engine-reported upper bound on one frame's compressed output
    pub fn max_output_bytes(&self) -> usize {
        self.layout.max_output_bytes
    }

    /// Whether flushing has started; once true, no further PCM is accepted
    pub fn is_flushing(&self) -> bool {
        self.flushing
    }

    /// Whether the engine handle has been released
    pub fn is_closed(&self) -> bool {
        self.engine.is_none()
    }

    /// Snapshot of the engine's current configuration, including the full
    /// channel map. Pure read; no side effects.
    pub fn configuration(&self) -> Result<EncoderConfiguration> {
        let engine = self.engine.as_ref().ok_or(StateError::Closed)?;
        Ok(EncoderConfiguration::from_raw(&engine.current_configuration())?)
    }

    /// Apply a configuration to the engine.
    ///
    /// The channel map is truncated to the engine's slot count before the
    /// write. If the engine rejects the configuration, nothing is considered
    /// applied from the caller's perspective; re-fetch the configuration to
    /// observe any partial application the engine itself performed. On
    /// success the input sample size is re-derived from the possibly changed
    /// input format, and a format without a defined sample size is an error
    /// even though the engine accepted it.
    pub fn set_configuration(&mut self, config: &EncoderConfiguration) -> Result<()> {
        let engine = self.engine.as_mut().ok_or(StateError::Closed)?;
        if !engine.apply_configuration(&config.to_raw()) {
            return Err(ConfigurationError::Rejected.into());
        }
        self.input_sample_size = derived_sample_size(engine)?;
        debug!(
            "configuration applied: input format {:?}, {} byte(s) per sample",
            config.input_format, self.input_sample_size
        );
        Ok(())
    }

    /// Apply a raw engine configuration without typed translation.
    ///
    /// For callers holding an engine-native struct, e.g. a binding passing a
    /// configuration through unchanged. Unlike
    /// [`set_configuration`](Self::set_configuration) this can carry values
    /// the typed configuration cannot express; if the engine accepts such a
    /// configuration but its input format has no defined sample size, this
    /// is still a configuration error and the previous sample size is kept.
    pub fn set_raw_configuration(&mut self, raw: &crate::engine::RawConfiguration) -> Result<()> {
        let engine = self.engine.as_mut().ok_or(StateError::Closed)?;
        if !engine.apply_configuration(raw) {
            return Err(ConfigurationError::Rejected.into());
        }
        self.input_sample_size = derived_sample_size(engine)?;
        debug!("raw configuration applied: {} byte(s) per sample", self.input_sample_size);
        Ok(())
    }

    /// Encode up to one frame of interleaved PCM.
    ///
    /// The sample count is `pcm.len() / input_sample_size`, truncating: tail
    /// bytes shorter than one sample are dropped (and logged). The count
    /// must not exceed
    /// [`number_of_samples_per_frame`](Self::number_of_samples_per_frame).
    /// An empty `pcm` encodes exactly one silent sample-set (one zero sample
    /// per channel), not a full silent frame.
    ///
    /// Returns an owned copy of the bytes the engine wrote; an empty result
    /// is normal while the engine is still priming its pipeline.
    pub fn encode(&mut self, pcm: &[u8]) -> Result<Vec<u8>> {
        let engine = self.engine.as_mut().ok_or(StateError::Closed)?;
        if self.flushing {
            return Err(StateError::Flushing.into());
        }

        let silence;
        let data = if pcm.is_empty() {
            silence = pcm::silence_sample_set(self.input_sample_size, self.number_of_channels as usize);
            silence.as_slice()
        } else {
            pcm
        };

        let samples = pcm::sample_count(data.len(), self.input_sample_size);
        let tail = data.len() % self.input_sample_size;
        if tail != 0 {
            warn!("dropping {tail} tail byte(s): not a whole {}-byte sample", self.input_sample_size);
        }
        if samples > self.layout.samples_per_frame {
            return Err(ValidationError::TooManySamples {
                given: samples,
                max: self.layout.samples_per_frame,
            }
            .into());
        }

        let written = engine.encode(Some(data), samples, &mut self.output_buffer);
        trace!("encode pass: {samples} samples in, {written} bytes out");
        Ok(self.output_buffer[..written].to_vec())
    }

    /// Drain internally buffered frames with no new input.
    ///
    /// Permanently latches the flushing state. Callable repeatedly; a call
    /// that returns no bytes means the engine is exhausted.
    pub fn flush(&mut self) -> Result<Vec<u8>> {
        let engine = self.engine.as_mut().ok_or(StateError::Closed)?;
        let written = engine.encode(None, 0, &mut self.output_buffer);
        self.flushing = true;
        trace!("flush pass: {written} bytes out");
        Ok(self.output_buffer[..written].to_vec())
    }

    /// Release the output buffer and the engine handle.
    ///
    /// Idempotent: closing an already closed encoder is a no-op, never an
    /// error. Dropping the encoder calls this automatically.
    pub fn close(&mut self) {
        if let Some(mut engine) = self.engine.take() {
            engine.close();
            self.output_buffer = Vec::new();
            debug!("encoder closed");
        }
    }
}

impl<E: AacEngine> Drop for Encoder<E> {
    fn drop(&mut self) {
        self.close();
    }
}
