// Audio module - NES APU audio output and mixing
//
// This module provides:
// - Sample rate conversion (NES ~1.79 MHz to 44.1/48 kHz) of the samples
//   `Apu::mixer_sample` already mixes with the NES's non-linear formula
// - A ring buffer that decouples APU sample production from a collaborator's
//   playback cadence
// - A backend-agnostic `AudioOutput` sink trait (see `output`)
//
// # Usage
//
// ```no_run
// use nes_core::audio::{AudioSystem, AudioConfig, AudioOutput};
// use nes_core::apu::Apu;
//
// struct MyOutput;
// impl AudioOutput for MyOutput {
//     fn push_samples(&mut self, samples: &[f32]) { /* forward to real device */ }
//     fn sample_rate(&self) -> u32 { 48000 }
// }
//
// let audio_config = AudioConfig::new().with_sample_rate(48000);
// let mut audio_system = AudioSystem::new(audio_config, MyOutput);
//
// let mut apu = Apu::new();
// // ... clock the APU ...
// audio_system.process_samples(&apu.take_samples());
// audio_system.flush();
// ```

pub mod mixer;
pub mod output;
pub mod resampler;

pub use mixer::Mixer;
pub use output::{AudioConfig, AudioOutput};
pub use resampler::{sample_rates, AudioBuffer, Resampler};

/// Complete audio pipeline for NES emulation: mixing, resampling, buffering,
/// and delivery to a collaborator-supplied [`AudioOutput`].
pub struct AudioSystem<O: AudioOutput> {
    /// APU mixer
    mixer: Mixer,

    /// Sample rate resampler
    resampler: Resampler,

    /// Ring buffer holding resampled output awaiting delivery
    buffer: AudioBuffer,

    /// Collaborator-owned playback sink
    output: O,

    /// Statistics
    samples_processed: u64,
    samples_output: u64,
}

impl<O: AudioOutput> AudioSystem<O> {
    /// Create a new audio system feeding the given output sink.
    pub fn new(config: AudioConfig, output: O) -> Self {
        let resampler = if config.sample_rate == 44100 {
            Resampler::new_44_1_khz()
        } else if config.sample_rate == 48000 {
            Resampler::new_48_khz()
        } else {
            Resampler::new(sample_rates::NES_CPU_CLOCK, config.sample_rate as f64)
        };

        let buffer_capacity =
            ((config.buffer_duration_ms as f64 / 1000.0) * config.sample_rate as f64) as usize;

        Self {
            mixer: Mixer::new(),
            resampler,
            buffer: AudioBuffer::new(buffer_capacity.max(1)),
            output,
            samples_processed: 0,
            samples_output: 0,
        }
    }

    /// Process a batch of already-mixed APU samples, as drained from
    /// [`crate::apu::Apu::take_samples`].
    ///
    /// Applies master volume, feeds the downsampling resampler, and parks
    /// any ready output samples in the ring buffer for [`AudioSystem::flush`]
    /// to deliver.
    pub fn process_samples(&mut self, raw_samples: &[f32]) {
        for &raw_sample in raw_samples {
            let mixed_sample = self.mixer.apply(raw_sample);
            self.resampler.add_input_sample(mixed_sample);
            self.samples_processed += 1;

            while let Some(output_sample) = self.resampler.get_output_sample() {
                self.buffer.push(output_sample);
                self.samples_output += 1;
            }
        }
    }

    /// Drain the ring buffer and hand its contents to the output sink.
    ///
    /// Call this periodically (e.g. once per emulated video frame) rather
    /// than per-sample, so the collaborator's sink sees batched delivery.
    pub fn flush(&mut self) {
        let mut drained = Vec::with_capacity(self.buffer.len());
        while let Some(sample) = self.buffer.pop() {
            drained.push(sample);
        }
        if !drained.is_empty() {
            self.output.push_samples(&drained);
        }
    }

    /// Set the master volume
    ///
    /// # Arguments
    ///
    /// * `volume` - Volume level (0.0 = mute, 1.0 = full volume)
    pub fn set_volume(&mut self, volume: f32) {
        self.mixer.set_volume(volume);
    }

    /// Get the current volume
    pub fn volume(&self) -> f32 {
        self.mixer.volume()
    }

    /// Get the number of samples currently buffered, awaiting flush
    pub fn buffer_len(&self) -> usize {
        self.buffer.len()
    }

    /// Get the ring buffer capacity
    pub fn buffer_capacity(&self) -> usize {
        self.buffer.capacity()
    }

    /// Check if the buffer is nearly full (> 90% capacity)
    pub fn is_buffer_nearly_full(&self) -> bool {
        self.buffer.len() > (self.buffer.capacity() * 9 / 10)
    }

    /// Clear the audio buffer
    pub fn clear_buffer(&mut self) {
        self.buffer.clear();
    }

    /// Get audio statistics
    pub fn stats(&self) -> AudioStats {
        AudioStats {
            samples_processed: self.samples_processed,
            samples_output: self.samples_output,
            buffer_len: self.buffer.len(),
            buffer_capacity: self.buffer.capacity(),
        }
    }

    /// Reset statistics
    pub fn reset_stats(&mut self) {
        self.samples_processed = 0;
        self.samples_output = 0;
    }
}

/// Audio statistics
#[derive(Debug, Clone, Copy)]
pub struct AudioStats {
    /// Total APU samples processed
    pub samples_processed: u64,

    /// Total audio samples output
    pub samples_output: u64,

    /// Current buffer length
    pub buffer_len: usize,

    /// Buffer capacity
    pub buffer_capacity: usize,
}

impl AudioStats {
    /// Get buffer fullness as a percentage (0.0 - 1.0)
    pub fn buffer_fullness(&self) -> f32 {
        if self.buffer_capacity == 0 {
            0.0
        } else {
            self.buffer_len as f32 / self.buffer_capacity as f32
        }
    }

    /// Get the resampling ratio (output / input)
    pub fn resampling_ratio(&self) -> f64 {
        if self.samples_processed == 0 {
            0.0
        } else {
            self.samples_output as f64 / self.samples_processed as f64
        }
    }
}
