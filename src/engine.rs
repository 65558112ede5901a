//! The seam between the lifecycle controller and the encoding engine
//!
//! The engine is a black box: it owns the actual AAC encoding algorithm and
//! reports the frame geometry the controller must honor. The trait mirrors
//! the five operations a native encoding library exposes, with raw unsigned
//! integer fields at the boundary so a binding can pass the struct through
//! unchanged.

/// Maximum number of channel slots in an engine channel map
pub const MAX_CHANNELS: usize = 64;

/// Frame geometry reported by the engine at open time
///
/// Both values are stored verbatim by the controller: `samples_per_frame` is
/// the exact count of interleaved samples one encode pass expects, and
/// `max_output_bytes` bounds the compressed output of any single pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameLayout {
    /// Interleaved samples (across all channels) consumed per encode pass
    pub samples_per_frame: usize,
    /// Upper bound on one pass's compressed output, in bytes
    pub max_output_bytes: usize,
}

/// The engine's tunable parameters in raw wire form
///
/// Field values are the exact integers the native engine expects; the typed
/// [`EncoderConfiguration`](crate::config::EncoderConfiguration) converts to
/// and from this struct at the boundary. The channel map is always full
/// length: entries beyond the stream's channel count are carried unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawConfiguration {
    pub mpeg_version: u32,
    pub object_type: u32,
    pub allow_midside: u32,
    pub use_lfe: u32,
    pub use_tns: u32,
    /// Bit rate per channel, in bits per second; 0 leaves rate control to the
    /// quantizer quality setting
    pub bit_rate: u32,
    /// Frequency bandwidth in Hz; 0 lets the engine estimate
    pub bandwidth: u32,
    pub quant_quality: u32,
    pub output_format: u32,
    pub input_format: u32,
    pub short_block_control: u32,
    pub channel_map: [u32; MAX_CHANNELS],
}

impl Default for RawConfiguration {
    fn default() -> Self {
        let mut channel_map = [0u32; MAX_CHANNELS];
        for (slot, entry) in channel_map.iter_mut().enumerate() {
            *entry = slot as u32;
        }
        Self {
            mpeg_version: crate::config::MpegVersion::Mpeg4.raw(),
            object_type: crate::config::ObjectType::Low.raw(),
            allow_midside: 1,
            use_lfe: 0,
            use_tns: 0,
            bit_rate: 0,
            bandwidth: 0,
            quant_quality: 100,
            output_format: crate::config::OutputFormat::Adts.raw(),
            input_format: crate::config::InputFormat::Pcm16.raw(),
            short_block_control: crate::config::ShortBlockControl::Normal.raw(),
            channel_map,
        }
    }
}

/// An AAC encoding engine
///
/// Implementations own all encoding state behind an opaque handle. Every
/// method is a direct, blocking call; an engine instance is exclusively owned
/// by one [`Encoder`](crate::encoder::Encoder) and is never shared.
pub trait AacEngine: Sized {
    /// Open an engine instance for the given sample rate and channel count.
    ///
    /// Returns `None` if the engine rejects the combination. On success the
    /// reported [`FrameLayout`] is fixed for the lifetime of the instance.
    fn open(sample_rate: u32, channels: u32) -> Option<(Self, FrameLayout)>;

    /// Snapshot of the engine's current configuration
    fn current_configuration(&self) -> RawConfiguration;

    /// Apply a configuration atomically.
    ///
    /// Returns `false` if the engine considers the configuration invalid; in
    /// that case the engine decides for itself how much, if any, of the
    /// configuration took effect.
    fn apply_configuration(&mut self, config: &RawConfiguration) -> bool;

    /// Run one encode pass.
    ///
    /// `input` carries `samples` interleaved samples of PCM, or `None` to
    /// drain internally buffered frames. Returns the number of bytes written
    /// to `output`; zero means the engine buffered the input and produced no
    /// output yet, or had nothing left to drain.
    fn encode(&mut self, input: Option<&[u8]>, samples: usize, output: &mut [u8]) -> usize;

    /// Release the engine's resources. Called exactly once by the controller.
    fn close(&mut self);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_channel_map_is_identity() {
        let raw = RawConfiguration::default();
        for (slot, &entry) in raw.channel_map.iter().enumerate() {
            assert_eq!(entry, slot as u32);
        }
    }

    #[test]
    fn default_scalars_match_engine_defaults() {
        let raw = RawConfiguration::default();
        assert_eq!(raw.mpeg_version, 0);
        assert_eq!(raw.object_type, 2);
        assert_eq!(raw.input_format, 1);
        assert_eq!(raw.output_format, 1);
        assert_eq!(raw.quant_quality, 100);
    }
}
