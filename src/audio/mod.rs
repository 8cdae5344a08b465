//! Audio output and analysis.
//!
//! An explicitly owned [`AudioContext`] wraps a platform [`OutputBackend`]
//! (cpal by default). Buffers are played once through a
//! source -> gain -> destination graph and tracked by a [`PlaybackHandle`].

mod backend;
mod context;
mod fft;
mod playback;
mod system;

// Re-export public types
pub use backend::{OutputBackend, Voice, VoiceGraph, VoiceProgress};
pub use context::{AudioContext, ContextState};
pub use fft::{hann_window, AudioBands, Spectrum};
pub use playback::PlaybackHandle;
pub use system::{CpalBackend, CpalVoice};
