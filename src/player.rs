//! Ambience player: the boundary where errors become "no sound this time".
//!
//! Scene playback runs an explicit fallback chain:
//! custom upload -> recorded asset -> synthesized ambience -> nothing.
//! Each step returns a `Result`; failures are logged and the next step runs.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use tracing::{info, warn};

use crate::asset;
use crate::audio::{AudioContext, PlaybackHandle};
use crate::buffer::AudioBuffer;
use crate::error::{AmbienceError, Result};
use crate::params::{PlaybackConfig, SynthConfig};
use crate::synth::{AmbienceCategory, Synthesizer};

/// Where a scene's sound came from
#[derive(Debug, Clone, PartialEq)]
pub enum AmbientSource {
    Custom(PathBuf),
    Recorded(PathBuf),
    Synthesized(AmbienceCategory),
}

impl fmt::Display for AmbientSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AmbientSource::Custom(path) => write!(f, "custom audio {}", path.display()),
            AmbientSource::Recorded(path) => write!(f, "recorded asset {}", path.display()),
            AmbientSource::Synthesized(category) => write!(f, "synthesized {}", category),
        }
    }
}

/// A playing scene sound
#[derive(Debug)]
pub struct ActivePlayback {
    pub source: AmbientSource,
    pub handle: PlaybackHandle,
    /// How long the caller should treat this sound as playing
    pub hold: Duration,
}

impl ActivePlayback {
    /// Block until the sound finishes or `limit` elapses, whichever is first
    pub fn wait(&self, limit: Duration) {
        let deadline = Instant::now() + limit;
        while !self.handle.is_finished() && Instant::now() < deadline {
            thread::sleep(Duration::from_millis(50));
        }
    }

    pub fn stop(&mut self) {
        self.handle.stop();
    }
}

/// Owns the audio context and turns categories and scenes into sound
pub struct AmbiencePlayer {
    context: Option<AudioContext>,
    synth_config: SynthConfig,
    playback: PlaybackConfig,
}

impl AmbiencePlayer {
    /// `context` is `None` when the platform has no usable audio output
    pub fn new(
        context: Option<AudioContext>,
        synth_config: SynthConfig,
        playback: PlaybackConfig,
    ) -> Self {
        Self {
            context,
            synth_config,
            playback,
        }
    }

    /// Open the default output device, degrading to a silent player on failure
    pub fn with_default_output(synth_config: SynthConfig, playback: PlaybackConfig) -> Self {
        let context = match AudioContext::open_default() {
            Ok(context) => Some(context),
            Err(e) => {
                warn!("{}; ambient sound disabled", e);
                None
            }
        };
        Self::new(context, synth_config, playback)
    }

    pub fn context(&self) -> Option<&AudioContext> {
        self.context.as_ref()
    }

    pub fn context_mut(&mut self) -> Option<&mut AudioContext> {
        self.context.as_mut()
    }

    pub fn playback_config(&self) -> &PlaybackConfig {
        &self.playback
    }

    fn context_or_err(&mut self) -> Result<&mut AudioContext> {
        self.context.as_mut().ok_or_else(|| {
            AmbienceError::PlatformUnavailable("no audio context".to_string())
        })
    }

    /// Synthesizer rendering at the context's output rate
    fn synthesizer(&self) -> Result<Synthesizer> {
        let context = self.context.as_ref().ok_or_else(|| {
            AmbienceError::PlatformUnavailable("no audio context".to_string())
        })?;
        Synthesizer::new(SynthConfig {
            sample_rate_hz: context.sample_rate(),
            ..self.synth_config.clone()
        })
    }

    /// Render an ambience for the current output
    pub fn try_generate(&self, category: AmbienceCategory, duration_s: f32) -> Result<AudioBuffer> {
        self.synthesizer()?.generate(category, duration_s)
    }

    /// Render an ambience, or `None` (logged) if that is not possible
    pub fn generate(&self, category: AmbienceCategory, duration_s: f32) -> Option<AudioBuffer> {
        match self.try_generate(category, duration_s) {
            Ok(buffer) => Some(buffer),
            Err(e) => {
                warn!("Error generating {} sound: {}", category, e);
                None
            }
        }
    }

    /// Like [`generate`](Self::generate) for a raw tag; unknown tags render forest
    pub fn generate_named(&self, tag: &str, duration_s: f32) -> Option<AudioBuffer> {
        self.generate(AmbienceCategory::from_tag(tag), duration_s)
    }

    /// Play an already rendered buffer once at `gain`
    pub fn try_play_buffer(&mut self, buffer: AudioBuffer, gain: f32) -> Result<PlaybackHandle> {
        self.context_or_err()?.play_buffer(Arc::new(buffer), gain)
    }

    /// Synthesize the default duration and play it at the synth gain
    pub fn try_play(&mut self, category: AmbienceCategory) -> Result<PlaybackHandle> {
        let buffer = self.try_generate(category, self.synth_config.default_duration_s)?;
        let gain = self.playback.synth_gain;
        self.try_play_buffer(buffer, gain)
    }

    /// Synthesize and play; `None` (logged) when audio is unavailable
    pub fn play(&mut self, category: AmbienceCategory) -> Option<PlaybackHandle> {
        match self.try_play(category) {
            Ok(handle) => Some(handle),
            Err(e) => {
                warn!("Error playing {} sound: {}", category, e);
                None
            }
        }
    }

    fn start_source(&mut self, source: &AmbientSource) -> Result<(PlaybackHandle, Duration)> {
        match source {
            AmbientSource::Custom(path) => {
                let gain = self.playback.custom_gain;
                self.play_asset(path, gain)
            }
            AmbientSource::Recorded(path) => {
                let gain = self.playback.asset_gain;
                self.play_asset(path, gain)
            }
            AmbientSource::Synthesized(category) => {
                let handle = self.try_play(*category)?;
                let hold = Duration::try_from_secs_f32(self.playback.fallback_hold_s)
                    .unwrap_or_default();
                Ok((handle, hold))
            }
        }
    }

    fn play_asset(&mut self, path: &Path, gain: f32) -> Result<(PlaybackHandle, Duration)> {
        let rate = self.context_or_err()?.sample_rate();
        let buffer = asset::load_wav(path, rate)?;
        let hold = Duration::try_from_secs_f32(buffer.duration()).unwrap_or_default();
        let handle = self.try_play_buffer(buffer, gain)?;
        Ok((handle, hold))
    }

    /// Play a scene's sound through the fallback chain.
    ///
    /// Does not stop earlier playback; callers stop the previous handle first.
    pub fn play_scene(
        &mut self,
        category: AmbienceCategory,
        asset: Option<&Path>,
        custom: Option<&Path>,
    ) -> Option<ActivePlayback> {
        let chain = custom
            .map(|p| AmbientSource::Custom(p.to_path_buf()))
            .into_iter()
            .chain(asset.map(|p| AmbientSource::Recorded(p.to_path_buf())))
            .chain(std::iter::once(AmbientSource::Synthesized(category)));

        for source in chain {
            match self.start_source(&source) {
                Ok((handle, hold)) => {
                    info!("Playing {}", source);
                    return Some(ActivePlayback {
                        source,
                        handle,
                        hold,
                    });
                }
                Err(e) => warn!("{} failed, falling back: {}", source, e),
            }
        }

        info!("No ambient sound for {}", category);
        None
    }
}

impl fmt::Debug for AmbiencePlayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AmbiencePlayer")
            .field("context", &self.context)
            .field("synth_config", &self.synth_config)
            .field("playback", &self.playback)
            .finish()
    }
}
