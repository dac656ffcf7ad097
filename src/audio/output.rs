// Audio output - backend-agnostic audio sink contract
//
// The core never opens an audio device itself. A host binary owns the real
// audio stream (cpal, SDL, whatever fits its platform) and implements
// `AudioOutput` as a thin adapter that feeds resampled samples into it.

/// Audio output configuration
#[derive(Clone)]
pub struct AudioConfig {
    /// Sample rate in Hz (44100 or 48000)
    pub sample_rate: u32,

    /// Number of channels (1 = mono, 2 = stereo)
    pub channels: u16,

    /// Buffer size in milliseconds (affects latency)
    pub buffer_duration_ms: u32,
}

impl AudioConfig {
    /// Create default audio configuration
    ///
    /// - Sample rate: 48 kHz
    /// - Channels: 1 (mono)
    /// - Buffer duration: 50 ms
    pub fn new() -> Self {
        Self {
            sample_rate: 48000,
            channels: 1,
            buffer_duration_ms: 50,
        }
    }

    /// Set the sample rate
    pub fn with_sample_rate(mut self, sample_rate: u32) -> Self {
        self.sample_rate = sample_rate;
        self
    }

    /// Set the number of channels (1 = mono, 2 = stereo)
    pub fn with_channels(mut self, channels: u16) -> Self {
        self.channels = channels;
        self
    }

    /// Set the buffer duration in milliseconds
    pub fn with_buffer_duration(mut self, duration_ms: u32) -> Self {
        self.buffer_duration_ms = duration_ms;
        self
    }
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// A sink for resampled audio, implemented by whatever is driving real
/// playback hardware.
///
/// `AudioSystem` calls `push_samples` with batches of already-mixed,
/// already-resampled `f32` samples in `[0.0, 1.0]`; it never talks to an
/// audio device directly.
pub trait AudioOutput {
    /// Accept a batch of samples. Implementations decide how to handle a
    /// full buffer (drop, block, grow) - the core only needs delivery
    /// attempted.
    fn push_samples(&mut self, samples: &[f32]);

    /// The sample rate this output expects samples at.
    fn sample_rate(&self) -> u32;
}
