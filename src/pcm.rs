//! PCM framing helpers
//!
//! Sample accounting for caller-supplied byte buffers, and the silence
//! substitution used for empty encode calls.

/// Number of whole samples in `byte_len` bytes of PCM.
///
/// Integer division: a ragged tail shorter than one sample is not counted.
/// The engine consumes whole samples only, so tail bytes never reach it.
pub fn sample_count(byte_len: usize, sample_size: usize) -> usize {
    byte_len / sample_size
}

/// One interleaved sample-set of silence: a single zero sample per channel.
///
/// This is deliberately not a full frame of silence. Submitting an empty
/// chunk encodes exactly one silent sample across all channels, which keeps
/// the engine's internal pipeline moving without padding out a whole frame.
pub fn silence_sample_set(sample_size: usize, channels: usize) -> Vec<u8> {
    vec![0u8; sample_size * channels]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whole_buffers_count_samples() {
        assert_eq!(sample_count(0, 2), 0);
        assert_eq!(sample_count(8, 2), 4);
        assert_eq!(sample_count(8, 4), 2);
    }

    #[test]
    fn ragged_buffers_truncate_to_whole_samples() {
        assert_eq!(sample_count(5, 2), 2);
        assert_eq!(sample_count(7, 2), 3);
        assert_eq!(sample_count(10, 4), 2);
        assert_eq!(sample_count(3, 4), 0);
    }

    #[test]
    fn silence_is_one_sample_per_channel() {
        let silence = silence_sample_set(2, 2);
        assert_eq!(silence.len(), 4);
        assert!(silence.iter().all(|&byte| byte == 0));

        let silence = silence_sample_set(4, 6);
        assert_eq!(silence.len(), 24);
    }
}
