//! Playback gains and timing.

/// Output levels for each ambient source, plus how long a synthesized
/// fallback is held before the caller moves on
#[derive(Debug, Clone)]
pub struct PlaybackConfig {
    /// Gain for synthesized ambience (linear, 0-1)
    pub synth_gain: f32,

    /// Gain for the scene's recorded asset (linear, 0-1)
    pub asset_gain: f32,

    /// Gain for user-supplied audio (linear, 0-1)
    pub custom_gain: f32,

    /// How long a synthesized fallback is considered "playing" (seconds)
    /// Longer than the default buffer so the scene does not feel cut short
    pub fallback_hold_s: f32,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            synth_gain: 0.5,
            asset_gain: 0.6,
            custom_gain: 0.5,
            fallback_hold_s: 8.0,
        }
    }
}
