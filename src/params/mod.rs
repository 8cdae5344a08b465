//! Parameter definitions with physical units and documented semantics.
//!
//! All tunable numbers outside the per-category recipes live here with:
//! - Physical units (seconds, Hz, linear gain)
//! - Documented ranges and meanings
//! - Validation where a bad value would otherwise surface deep in playback

mod analysis;
mod playback;
mod synth;

// Re-export all types
pub use analysis::AnalysisConfig;
pub use playback::PlaybackConfig;
pub use synth::{Limiter, SynthConfig};
