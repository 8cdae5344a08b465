//! Ambisynth library - procedural nature ambiences
//!
//! Six ambience categories are synthesized from layered oscillators and
//! noise, played once through an explicitly owned audio context, and
//! backed by recorded assets when they are available.

pub mod asset;
pub mod audio;
pub mod buffer;
pub mod catalog;
pub mod cli;
pub mod error;
pub mod params;
pub mod player;
pub mod synth;

pub use buffer::AudioBuffer;
pub use error::{AmbienceError, Result};
pub use player::{ActivePlayback, AmbiencePlayer, AmbientSource};
pub use synth::{AmbienceCategory, Synthesizer};
