//! Procedural ambience synthesis.
//!
//! Six nature ambiences built from additive sine oscillators, modulated
//! noise and envelope shaping. No recorded samples are involved: every
//! buffer is rendered fresh from the category's layer table.
//!
//! ```no_run
//! use ambisynth::params::SynthConfig;
//! use ambisynth::synth::{AmbienceCategory, Synthesizer};
//!
//! let synth = Synthesizer::new(SynthConfig::default())?;
//! let ocean = synth.generate(AmbienceCategory::Ocean, 5.0)?;
//! assert_eq!(ocean.frames(), 5 * 44100);
//! # Ok::<(), ambisynth::error::AmbienceError>(())
//! ```

pub mod birds;
mod category;
pub mod forest;
pub mod night;
pub mod ocean;
mod recipe;
pub mod snow;
pub mod stream;

pub use category::AmbienceCategory;
pub use recipe::{Layer, LayerFn, Recipe};

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::debug;

use crate::buffer::AudioBuffer;
use crate::error::{AmbienceError, Result};
use crate::params::SynthConfig;

/// Renders ambience buffers at a fixed sample rate
#[derive(Debug, Clone)]
pub struct Synthesizer {
    config: SynthConfig,
}

impl Synthesizer {
    /// Create a synthesizer; fails if the configuration is invalid
    pub fn new(config: SynthConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &SynthConfig {
        &self.config
    }

    pub fn sample_rate(&self) -> u32 {
        self.config.sample_rate_hz
    }

    /// Render `duration_s` seconds of the category's full mix
    pub fn generate(&self, category: AmbienceCategory, duration_s: f32) -> Result<AudioBuffer> {
        let recipe = category.recipe();
        debug!(
            "Generating {} ({} layers, gain {}) for {}s",
            category,
            recipe.layers.len(),
            recipe.master_gain,
            duration_s
        );
        self.render_with(duration_s, |t, rng| recipe.sample(t, rng))
    }

    /// Render the default duration from the configuration
    pub fn generate_default(&self, category: AmbienceCategory) -> Result<AudioBuffer> {
        self.generate(category, self.config.default_duration_s)
    }

    /// Render one layer alone, without the category master gain
    pub fn render_layer(
        &self,
        category: AmbienceCategory,
        layer: &str,
        duration_s: f32,
    ) -> Result<AudioBuffer> {
        let recipe = category.recipe();
        let render = recipe
            .layer(layer)
            .map(|l| l.render)
            .ok_or_else(|| AmbienceError::UnknownLayer {
                category: category.to_string(),
                layer: layer.to_string(),
            })?;
        self.render_with(duration_s, render)
    }

    /// Number of frames for a duration, or a generation failure if the
    /// duration is unusable
    pub fn frame_count(&self, duration_s: f32) -> Result<usize> {
        if !duration_s.is_finite() || duration_s <= 0.0 {
            return Err(AmbienceError::GenerationFailure(format!(
                "duration must be a positive number of seconds, got {}",
                duration_s
            )));
        }
        if duration_s > self.config.max_duration_s {
            return Err(AmbienceError::GenerationFailure(format!(
                "duration {}s exceeds the {}s limit",
                duration_s, self.config.max_duration_s
            )));
        }
        let frames = (duration_s as f64 * self.config.sample_rate_hz as f64).round() as usize;
        if frames == 0 {
            return Err(AmbienceError::GenerationFailure(format!(
                "duration {}s is shorter than one sample",
                duration_s
            )));
        }
        Ok(frames)
    }

    /// Shared time-domain loop: each channel computed independently from
    /// `t = frame / sample_rate`, then limited
    fn render_with<F>(&self, duration_s: f32, mut sample: F) -> Result<AudioBuffer>
    where
        F: FnMut(f64, &mut StdRng) -> f64,
    {
        let frames = self.frame_count(duration_s)?;
        let sample_rate = self.config.sample_rate_hz as f64;
        let mut rng = self.rng();

        let mut channels = Vec::with_capacity(self.config.channels);
        for _ in 0..self.config.channels {
            let mut data: Vec<f32> = Vec::new();
            data.try_reserve_exact(frames).map_err(|e| {
                AmbienceError::GenerationFailure(format!(
                    "cannot allocate {} frames: {}",
                    frames, e
                ))
            })?;
            data.extend((0..frames).map(|i| sample(i as f64 / sample_rate, &mut rng) as f32));
            channels.push(data);
        }

        self.config.limiter.apply(&mut channels);
        AudioBuffer::from_channels(self.config.sample_rate_hz, channels)
    }

    fn rng(&self) -> StdRng {
        match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }
}
