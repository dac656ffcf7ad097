// Audio mixer - applies master volume to the APU's mixed output
//
// The non-linear NES mixing formula itself lives on `Apu::mixer_sample`,
// which is the single authority for turning raw channel outputs into one
// analog sample. This mixer only scales that already-mixed sample by the
// collaborator-controlled master volume.

/// Applies master volume control to samples already mixed by
/// [`crate::apu::Apu::mixer_sample`].
pub struct Mixer {
    /// Volume control (0.0 = mute, 1.0 = full volume)
    volume: f32,
}

impl Mixer {
    /// Create a new mixer with full volume
    pub fn new() -> Self {
        Self { volume: 1.0 }
    }

    /// Create a new mixer with specified volume
    ///
    /// # Arguments
    ///
    /// * `volume` - Volume level (0.0 = mute, 1.0 = full volume)
    pub fn with_volume(volume: f32) -> Self {
        Self {
            volume: volume.clamp(0.0, 1.0),
        }
    }

    /// Set the master volume
    ///
    /// # Arguments
    ///
    /// * `volume` - Volume level (0.0 = mute, 1.0 = full volume)
    pub fn set_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 1.0);
    }

    /// Get the current volume
    pub fn volume(&self) -> f32 {
        self.volume
    }

    /// Apply master volume to an already-mixed sample.
    ///
    /// # Arguments
    ///
    /// * `sample` - A mixed sample from [`crate::apu::Apu::mixer_sample`],
    ///   in range roughly `[0.0, 1.0)`.
    ///
    /// # Returns
    ///
    /// The volume-scaled sample, clamped to `[0.0, 1.0]`.
    pub fn apply(&self, sample: f32) -> f32 {
        (sample * self.volume).clamp(0.0, 1.0)
    }
}

impl Default for Mixer {
    fn default() -> Self {
        Self::new()
    }
}
