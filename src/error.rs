//! Error taxonomy shared by generation, playback and asset loading.

use std::path::PathBuf;

use thiserror::Error;

/// Everything that can go wrong between picking an ambience and hearing it.
///
/// None of these are fatal to a caller: the player boundary logs them and
/// degrades to "no ambient sound this time".
#[derive(Error, Debug)]
pub enum AmbienceError {
    #[error("Audio output unavailable: {0}")]
    PlatformUnavailable(String),

    #[error("Ambience generation failed: {0}")]
    GenerationFailure(String),

    #[error("Playback failed: {0}")]
    PlaybackFailure(String),

    #[error("Audio context is closed")]
    ContextClosed,

    #[error("Unknown ambience category '{0}'")]
    UnknownCategory(String),

    #[error("Category '{category}' has no layer named '{layer}'")]
    UnknownLayer { category: String, layer: String },

    #[error("Unknown scene id {0}")]
    UnknownScene(u32),

    #[error("Invalid audio buffer: {0}")]
    InvalidBuffer(String),

    #[error("Audio asset not found: {}", .0.display())]
    AssetMissing(PathBuf),

    #[error("Failed to decode audio asset {}: {source}", path.display())]
    AssetDecode {
        path: PathBuf,
        #[source]
        source: hound::Error,
    },

    #[error("Failed to write {}: {source}", path.display())]
    Export {
        path: PathBuf,
        #[source]
        source: hound::Error,
    },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, AmbienceError>;
