//! Deterministic in-process engine
//!
//! [`SoftEngine`] reproduces the observable contract of a native encoding
//! engine without performing real AAC encoding: frame geometry reporting,
//! configuration validation, the priming delay during which encode passes
//! produce no output, and flush-driven draining of the internal frame queue.
//! It backs the crate's tests and benchmarks, and serves as the reference
//! for what a native-backed [`AacEngine`] implementation must do.

use log::trace;

use crate::engine::{AacEngine, FrameLayout, RawConfiguration, MAX_CHANNELS};

/// Interleaved samples per frame, per channel
pub const SAMPLES_PER_FRAME_PER_CHANNEL: usize = 1024;

/// Output bound per channel, in bytes
pub const OUTPUT_BYTES_PER_CHANNEL: usize = 768;

/// Encode passes the engine buffers before producing any output
pub const PRIMING_FRAMES: usize = 3;

const MIN_SAMPLE_RATE: u32 = 8_000;
const MAX_SAMPLE_RATE: u32 = 96_000;
const MIN_BIT_RATE: u32 = 8_000;
const MIN_QUANT_QUALITY: u32 = 10;
const MAX_QUANT_QUALITY: u32 = 500;

/// A software stand-in for the native encoding engine
#[derive(Debug)]
pub struct SoftEngine {
    sample_rate: u32,
    channels: u32,
    config: RawConfiguration,
    layout: FrameLayout,
    input_passes: usize,
    buffered_frames: usize,
    emitted_frames: u64,
    closed: bool,
}

impl SoftEngine {
    /// Highest per-channel bit rate the engine accepts for a sample rate
    pub fn max_bit_rate(sample_rate: u32) -> u32 {
        6144 * sample_rate / SAMPLES_PER_FRAME_PER_CHANNEL as u32 / 8
    }

    fn emit_frame(&mut self, samples: usize, output: &mut [u8]) -> usize {
        let len = (samples / 4 + 25).min(output.len());
        for (offset, byte) in output[..len].iter_mut().enumerate() {
            *byte = (self.emitted_frames as usize).wrapping_add(offset) as u8;
        }
        // ADTS streams start every frame with the sync word; the third byte
        // stands in for the header's channel configuration
        if self.config.output_format == crate::config::OutputFormat::Adts.raw() && len >= 3 {
            output[0] = 0xFF;
            output[1] = 0xF1;
            output[2] = self.channels as u8;
        }
        self.emitted_frames += 1;
        trace!("soft engine emitted frame {} ({len} bytes)", self.emitted_frames);
        len
    }

    fn configuration_is_valid(&self, config: &RawConfiguration) -> bool {
        if config.mpeg_version > 1 {
            return false;
        }
        // SSR is defined but not implemented by the engine
        if !matches!(config.object_type, 1 | 2 | 4) {
            return false;
        }
        if config.output_format > 1 {
            return false;
        }
        // 24-bit input (2) passes engine validation; the controller is the
        // one that cannot size its samples
        if !(1..=4).contains(&config.input_format) {
            return false;
        }
        if config.short_block_control > 2 {
            return false;
        }
        if !(MIN_QUANT_QUALITY..=MAX_QUANT_QUALITY).contains(&config.quant_quality) {
            return false;
        }
        if config.bit_rate != 0
            && !(MIN_BIT_RATE..=Self::max_bit_rate(self.sample_rate)).contains(&config.bit_rate)
        {
            return false;
        }
        if config.bandwidth != 0 && config.bandwidth > self.sample_rate / 2 {
            return false;
        }
        true
    }
}

impl AacEngine for SoftEngine {
    fn open(sample_rate: u32, channels: u32) -> Option<(Self, FrameLayout)> {
        if channels == 0 || channels as usize > MAX_CHANNELS {
            return None;
        }
        if !(MIN_SAMPLE_RATE..=MAX_SAMPLE_RATE).contains(&sample_rate) {
            return None;
        }
        let layout = FrameLayout {
            samples_per_frame: SAMPLES_PER_FRAME_PER_CHANNEL * channels as usize,
            max_output_bytes: OUTPUT_BYTES_PER_CHANNEL * channels as usize,
        };
        let engine = Self {
            sample_rate,
            channels,
            config: RawConfiguration::default(),
            layout,
            input_passes: 0,
            buffered_frames: 0,
            emitted_frames: 0,
            closed: false,
        };
        Some((engine, layout))
    }

    fn current_configuration(&self) -> RawConfiguration {
        self.config
    }

    fn apply_configuration(&mut self, config: &RawConfiguration) -> bool {
        if !self.configuration_is_valid(config) {
            return false;
        }
        self.config = *config;
        true
    }

    fn encode(&mut self, input: Option<&[u8]>, samples: usize, output: &mut [u8]) -> usize {
        if self.closed {
            return 0;
        }
        match input {
            Some(_) => {
                self.input_passes += 1;
                if self.input_passes <= PRIMING_FRAMES {
                    self.buffered_frames += 1;
                    0
                } else {
                    self.emit_frame(samples, output)
                }
            }
            None => {
                if self.buffered_frames == 0 {
                    return 0;
                }
                self.buffered_frames -= 1;
                let samples = self.layout.samples_per_frame;
                self.emit_frame(samples, output)
            }
        }
    }

    fn close(&mut self) {
        self.closed = true;
        self.buffered_frames = 0;
    }
}
