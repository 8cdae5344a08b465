//! Synthesis configuration.

use crate::error::{AmbienceError, Result};

/// Post-mix policy that keeps every sample inside [-1, 1].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Limiter {
    /// Hard clamp each sample to [-1, 1] after the master gain
    #[default]
    Clamp,

    /// Scale the whole buffer down so its peak sits at `ceiling`
    /// (never scales up; samples are still clamped afterwards)
    Normalize { ceiling: f32 },
}

impl Limiter {
    /// Apply the policy to freshly rendered channels in place
    pub fn apply(&self, channels: &mut [Vec<f32>]) {
        if let Limiter::Normalize { ceiling } = *self {
            let peak = channels
                .iter()
                .flat_map(|ch| ch.iter())
                .fold(0.0f32, |acc, s| acc.max(s.abs()));
            if peak > ceiling && peak > 0.0 {
                let scale = ceiling / peak;
                for sample in channels.iter_mut().flat_map(|ch| ch.iter_mut()) {
                    *sample *= scale;
                }
            }
        }

        for sample in channels.iter_mut().flat_map(|ch| ch.iter_mut()) {
            *sample = sample.clamp(-1.0, 1.0);
        }
    }
}

/// Ambience synthesis parameters
#[derive(Debug, Clone)]
pub struct SynthConfig {
    /// Output sample rate (Hz)
    /// Replaced by the audio context's rate when rendering for playback
    pub sample_rate_hz: u32,

    /// Buffer length used when the caller does not ask for one (seconds)
    pub default_duration_s: f32,

    /// Number of output channels (each rendered independently)
    pub channels: usize,

    /// Longest buffer a single request may allocate (seconds)
    pub max_duration_s: f32,

    /// Clipping policy applied after the category master gain
    pub limiter: Limiter,

    /// Fixed RNG seed for reproducible renders (None = fresh entropy per call)
    pub seed: Option<u64>,
}

impl Default for SynthConfig {
    fn default() -> Self {
        Self {
            sample_rate_hz: 44100,
            default_duration_s: 5.0,
            channels: 2,
            max_duration_s: 600.0,
            limiter: Limiter::Clamp,
            seed: None,
        }
    }
}

impl SynthConfig {
    /// Validate configuration (non-zero rate, sane durations, limiter ceiling in range)
    pub fn validate(&self) -> Result<()> {
        if self.sample_rate_hz == 0 {
            return Err(AmbienceError::InvalidConfig("Sample rate must be > 0".to_string()));
        }
        if self.channels == 0 {
            return Err(AmbienceError::InvalidConfig(
                "At least one channel is required".to_string(),
            ));
        }
        if !(self.default_duration_s.is_finite() && self.default_duration_s > 0.0) {
            return Err(AmbienceError::InvalidConfig(format!(
                "Default duration must be positive, got {}",
                self.default_duration_s
            )));
        }
        if self.default_duration_s > self.max_duration_s {
            return Err(AmbienceError::InvalidConfig(format!(
                "Default duration {}s exceeds max {}s",
                self.default_duration_s, self.max_duration_s
            )));
        }
        if let Limiter::Normalize { ceiling } = self.limiter {
            if !(ceiling > 0.0 && ceiling <= 1.0) {
                return Err(AmbienceError::InvalidConfig(format!(
                    "Normalize ceiling must be in (0, 1], got {}",
                    ceiling
                )));
            }
        }
        Ok(())
    }
}
