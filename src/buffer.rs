//! Owned multi-channel sample buffer.

use crate::error::{AmbienceError, Result};

/// Immutable audio buffer (f32 samples, one vector per channel)
///
/// Every channel holds the same number of frames. Buffers are built once
/// and never mutated afterwards; playback shares them behind an `Arc`.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioBuffer {
    sample_rate: u32,
    channels: Vec<Vec<f32>>,
}

impl AudioBuffer {
    /// Build a buffer from per-channel sample vectors
    pub fn from_channels(sample_rate: u32, channels: Vec<Vec<f32>>) -> Result<Self> {
        if sample_rate == 0 {
            return Err(AmbienceError::InvalidBuffer(
                "sample rate must be > 0".to_string(),
            ));
        }
        let Some(first) = channels.first() else {
            return Err(AmbienceError::InvalidBuffer(
                "at least one channel is required".to_string(),
            ));
        };
        let frames = first.len();
        if let Some(bad) = channels.iter().position(|ch| ch.len() != frames) {
            return Err(AmbienceError::InvalidBuffer(format!(
                "channel {} has {} frames, expected {}",
                bad,
                channels[bad].len(),
                frames
            )));
        }
        Ok(Self {
            sample_rate,
            channels,
        })
    }

    /// Sample rate in Hz
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Number of channels
    pub fn num_channels(&self) -> usize {
        self.channels.len()
    }

    /// Number of frames (samples per channel)
    pub fn frames(&self) -> usize {
        self.channels[0].len()
    }

    /// Check if buffer holds no frames
    pub fn is_empty(&self) -> bool {
        self.frames() == 0
    }

    /// Duration in seconds
    pub fn duration(&self) -> f32 {
        self.frames() as f32 / self.sample_rate as f32
    }

    /// Samples of one channel
    pub fn channel(&self, index: usize) -> Option<&[f32]> {
        self.channels.get(index).map(Vec::as_slice)
    }

    /// Iterate over all channels
    pub fn channels(&self) -> impl Iterator<Item = &[f32]> {
        self.channels.iter().map(Vec::as_slice)
    }

    /// Single sample, or silence when out of range
    pub fn sample(&self, channel: usize, frame: usize) -> f32 {
        self.channels
            .get(channel)
            .and_then(|ch| ch.get(frame))
            .copied()
            .unwrap_or(0.0)
    }

    /// Largest absolute sample across all channels
    pub fn peak(&self) -> f32 {
        self.channels()
            .flat_map(|ch| ch.iter())
            .fold(0.0f32, |acc, s| acc.max(s.abs()))
    }

    /// Interleave channels (L, R, L, R, ...) for export or device output
    pub fn interleaved(&self) -> Vec<f32> {
        let mut out = Vec::with_capacity(self.frames() * self.num_channels());
        for frame in 0..self.frames() {
            for ch in &self.channels {
                out.push(ch[frame]);
            }
        }
        out
    }
}
