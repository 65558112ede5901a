//! Typed encoder configuration
//!
//! [`EncoderConfiguration`] is a value object mirroring the engine's tunable
//! parameters. Each logical group of engine constants is an enumeration that
//! carries the exact integer value the engine expects at the boundary, so
//! converting to and from [`RawConfiguration`] is lossless for every
//! supported setting.
//!
//! A configuration has no back-reference to any encoder: it is copied out by
//! [`Encoder::configuration`](crate::encoder::Encoder::configuration), may be
//! mutated field by field, and the encoder keeps its own internal copy once
//! it is applied.

use crate::engine::{RawConfiguration, MAX_CHANNELS};
use crate::error::ConfigurationError;

/// MPEG version of the produced bitstream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MpegVersion {
    /// MPEG-4
    Mpeg4 = 0,
    /// MPEG-2
    Mpeg2 = 1,
}

/// AAC object type (profile)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectType {
    /// Main profile
    Main = 1,
    /// Low Complexity
    Low = 2,
    /// Scalable Sample Rate
    Ssr = 3,
    /// Long Term Prediction
    Ltp = 4,
}

/// Bitstream output framing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Raw AAC access units
    Raw = 0,
    /// ADTS-framed stream
    Adts = 1,
}

/// PCM format of the input data
///
/// Raw value 2 (24-bit packed PCM) exists at the engine boundary but has no
/// defined sample size here; encountering it is a configuration error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    /// 16-bit signed PCM
    Pcm16 = 1,
    /// 32-bit signed PCM
    Pcm32 = 3,
    /// 32-bit float PCM
    Float32 = 4,
}

/// Block type enforcement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortBlockControl {
    /// Let the engine switch block types freely
    Normal = 0,
    /// Never use short blocks
    NoShort = 1,
    /// Never use long blocks
    NoLong = 2,
}

impl MpegVersion {
    /// The integer value the engine expects
    pub fn raw(self) -> u32 {
        self as u32
    }

    /// Decode an engine value
    pub fn from_raw(value: u32) -> Result<Self, ConfigurationError> {
        match value {
            0 => Ok(Self::Mpeg4),
            1 => Ok(Self::Mpeg2),
            _ => Err(ConfigurationError::UnknownFieldValue {
                field: "mpeg_version",
                value,
            }),
        }
    }
}

impl ObjectType {
    /// The integer value the engine expects
    pub fn raw(self) -> u32 {
        self as u32
    }

    /// Decode an engine value
    pub fn from_raw(value: u32) -> Result<Self, ConfigurationError> {
        match value {
            1 => Ok(Self::Main),
            2 => Ok(Self::Low),
            3 => Ok(Self::Ssr),
            4 => Ok(Self::Ltp),
            _ => Err(ConfigurationError::UnknownFieldValue {
                field: "object_type",
                value,
            }),
        }
    }
}

impl OutputFormat {
    /// The integer value the engine expects
    pub fn raw(self) -> u32 {
        self as u32
    }

    /// Decode an engine value
    pub fn from_raw(value: u32) -> Result<Self, ConfigurationError> {
        match value {
            0 => Ok(Self::Raw),
            1 => Ok(Self::Adts),
            _ => Err(ConfigurationError::UnknownFieldValue {
                field: "output_format",
                value,
            }),
        }
    }
}

impl InputFormat {
    /// The integer value the engine expects
    pub fn raw(self) -> u32 {
        self as u32
    }

    /// Decode an engine value; unsized formats are rejected even when the
    /// engine itself accepts them
    pub fn from_raw(value: u32) -> Result<Self, ConfigurationError> {
        match value {
            1 => Ok(Self::Pcm16),
            3 => Ok(Self::Pcm32),
            4 => Ok(Self::Float32),
            _ => Err(ConfigurationError::UnsupportedInputFormat(value)),
        }
    }

    /// Size of a single input sample in bytes
    pub fn sample_size(self) -> usize {
        match self {
            Self::Pcm16 => 2,
            Self::Pcm32 | Self::Float32 => 4,
        }
    }
}

impl ShortBlockControl {
    /// The integer value the engine expects
    pub fn raw(self) -> u32 {
        self as u32
    }

    /// Decode an engine value
    pub fn from_raw(value: u32) -> Result<Self, ConfigurationError> {
        match value {
            0 => Ok(Self::Normal),
            1 => Ok(Self::NoShort),
            2 => Ok(Self::NoLong),
            _ => Err(ConfigurationError::UnknownFieldValue {
                field: "short_block_control",
                value,
            }),
        }
    }
}

/// A value snapshot of an encoder's tunable parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncoderConfiguration {
    /// MPEG version of the produced bitstream
    pub mpeg_version: MpegVersion,
    /// AAC object type
    pub object_type: ObjectType,
    /// Allow mid/side coding
    pub allow_midside: bool,
    /// Treat one of the channels as an LFE channel
    pub use_lfe: bool,
    /// Use Temporal Noise Shaping
    pub use_tns: bool,
    /// Bit rate per channel in bits per second; 0 leaves rate control to
    /// `quant_quality`
    pub bit_rate: u32,
    /// Frequency bandwidth in Hz; 0 lets the engine estimate
    pub bandwidth: u32,
    /// Quantizer quality
    pub quant_quality: u32,
    /// Bitstream output framing
    pub output_format: OutputFormat,
    /// PCM format of the input data
    pub input_format: InputFormat,
    /// Block type enforcement
    pub short_block_control: ShortBlockControl,
    /// Channel reassignment table, e.g. identity `[0, 1, 2, ...]` or WAVE 4.0
    /// `[2, 0, 1, 3, ...]`. Applied truncated to [`MAX_CHANNELS`] slots;
    /// reads back at full length with engine entries beyond the stream's
    /// channel count round-tripped unchanged.
    pub channel_map: Vec<u32>,
}

impl EncoderConfiguration {
    /// Decode a raw engine configuration.
    ///
    /// Fails if any field carries a value outside the supported constants,
    /// including an input format with no defined sample size.
    pub fn from_raw(raw: &RawConfiguration) -> Result<Self, ConfigurationError> {
        Ok(Self {
            mpeg_version: MpegVersion::from_raw(raw.mpeg_version)?,
            object_type: ObjectType::from_raw(raw.object_type)?,
            allow_midside: raw.allow_midside != 0,
            use_lfe: raw.use_lfe != 0,
            use_tns: raw.use_tns != 0,
            bit_rate: raw.bit_rate,
            bandwidth: raw.bandwidth,
            quant_quality: raw.quant_quality,
            output_format: OutputFormat::from_raw(raw.output_format)?,
            input_format: InputFormat::from_raw(raw.input_format)?,
            short_block_control: ShortBlockControl::from_raw(raw.short_block_control)?,
            channel_map: raw.channel_map.to_vec(),
        })
    }

    /// Encode into the raw engine form.
    ///
    /// The channel map is truncated, never overread: at most [`MAX_CHANNELS`]
    /// entries are copied, and slots the caller did not supply keep the
    /// identity mapping.
    pub fn to_raw(&self) -> RawConfiguration {
        let mut raw = RawConfiguration {
            mpeg_version: self.mpeg_version.raw(),
            object_type: self.object_type.raw(),
            allow_midside: self.allow_midside as u32,
            use_lfe: self.use_lfe as u32,
            use_tns: self.use_tns as u32,
            bit_rate: self.bit_rate,
            bandwidth: self.bandwidth,
            quant_quality: self.quant_quality,
            output_format: self.output_format.raw(),
            input_format: self.input_format.raw(),
            short_block_control: self.short_block_control.raw(),
            ..RawConfiguration::default()
        };
        let copied = self.channel_map.len().min(MAX_CHANNELS);
        raw.channel_map[..copied].copy_from_slice(&self.channel_map[..copied]);
        raw
    }
}

impl Default for EncoderConfiguration {
    fn default() -> Self {
        // Decoding the raw defaults cannot fail: they only use supported
        // constants, which the engine tests pin down.
        Self::from_raw(&RawConfiguration::default())
            .unwrap_or_else(|_| unreachable!("raw defaults are representable"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enum_raw_values_match_engine_constants() {
        assert_eq!(MpegVersion::Mpeg4.raw(), 0);
        assert_eq!(MpegVersion::Mpeg2.raw(), 1);
        assert_eq!(ObjectType::Main.raw(), 1);
        assert_eq!(ObjectType::Low.raw(), 2);
        assert_eq!(ObjectType::Ssr.raw(), 3);
        assert_eq!(ObjectType::Ltp.raw(), 4);
        assert_eq!(OutputFormat::Raw.raw(), 0);
        assert_eq!(OutputFormat::Adts.raw(), 1);
        assert_eq!(InputFormat::Pcm16.raw(), 1);
        assert_eq!(InputFormat::Pcm32.raw(), 3);
        assert_eq!(InputFormat::Float32.raw(), 4);
        assert_eq!(ShortBlockControl::Normal.raw(), 0);
        assert_eq!(ShortBlockControl::NoShort.raw(), 1);
        assert_eq!(ShortBlockControl::NoLong.raw(), 2);
    }

    #[test]
    fn sample_sizes() {
        assert_eq!(InputFormat::Pcm16.sample_size(), 2);
        assert_eq!(InputFormat::Pcm32.sample_size(), 4);
        assert_eq!(InputFormat::Float32.sample_size(), 4);
    }

    #[test]
    fn input_format_24bit_is_unsupported() {
        assert_eq!(
            InputFormat::from_raw(2),
            Err(ConfigurationError::UnsupportedInputFormat(2))
        );
    }

    #[test]
    fn unknown_object_type_is_rejected() {
        assert_eq!(
            ObjectType::from_raw(7),
            Err(ConfigurationError::UnknownFieldValue {
                field: "object_type",
                value: 7,
            })
        );
    }

    #[test]
    fn raw_round_trip_preserves_scalars() {
        let config = EncoderConfiguration {
            mpeg_version: MpegVersion::Mpeg2,
            object_type: ObjectType::Ltp,
            allow_midside: false,
            use_lfe: true,
            use_tns: true,
            bit_rate: 96_000,
            bandwidth: 18_000,
            quant_quality: 120,
            output_format: OutputFormat::Raw,
            input_format: InputFormat::Float32,
            short_block_control: ShortBlockControl::NoLong,
            channel_map: vec![1, 0],
        };
        let decoded = EncoderConfiguration::from_raw(&config.to_raw()).unwrap();
        assert_eq!(decoded.mpeg_version, config.mpeg_version);
        assert_eq!(decoded.object_type, config.object_type);
        assert_eq!(decoded.allow_midside, config.allow_midside);
        assert_eq!(decoded.use_lfe, config.use_lfe);
        assert_eq!(decoded.use_tns, config.use_tns);
        assert_eq!(decoded.bit_rate, config.bit_rate);
        assert_eq!(decoded.bandwidth, config.bandwidth);
        assert_eq!(decoded.quant_quality, config.quant_quality);
        assert_eq!(decoded.output_format, config.output_format);
        assert_eq!(decoded.input_format, config.input_format);
        assert_eq!(decoded.short_block_control, config.short_block_control);
    }

    #[test]
    fn short_channel_map_leaves_identity_tail() {
        let config = EncoderConfiguration {
            channel_map: vec![2, 0, 1],
            ..EncoderConfiguration::default()
        };
        let raw = config.to_raw();
        assert_eq!(&raw.channel_map[..3], &[2, 0, 1]);
        for slot in 3..MAX_CHANNELS {
            assert_eq!(raw.channel_map[slot], slot as u32);
        }
    }

    #[test]
    fn oversize_channel_map_is_truncated_not_overread() {
        let config = EncoderConfiguration {
            channel_map: (0..100).rev().collect(),
            ..EncoderConfiguration::default()
        };
        let raw = config.to_raw();
        assert_eq!(raw.channel_map.len(), MAX_CHANNELS);
        assert_eq!(raw.channel_map[0], 99);
        assert_eq!(raw.channel_map[MAX_CHANNELS - 1], 99 - (MAX_CHANNELS as u32 - 1));
    }

    #[test]
    fn default_configuration_is_representable() {
        let config = EncoderConfiguration::default();
        assert_eq!(config.input_format, InputFormat::Pcm16);
        assert_eq!(config.output_format, OutputFormat::Adts);
        assert_eq!(config.channel_map.len(), MAX_CHANNELS);
    }
}
