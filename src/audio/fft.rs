//! Spectral analysis of rendered buffers.

use rustfft::{num_complex::Complex, FftPlanner};
use std::f32::consts::PI;

use crate::params::AnalysisConfig;

/// Audio frequency band energies
#[derive(Clone, Copy, Debug, Default)]
pub struct AudioBands {
    pub low: f32,
    pub mid: f32,
    pub high: f32,
}

/// Magnitude spectrum (DC up to Nyquist) of a Hann-windowed block
#[derive(Debug, Clone)]
pub struct Spectrum {
    bin_hz: f32,
    magnitudes: Vec<f32>,
}

impl Spectrum {
    /// Analyze the whole of `samples` in one FFT
    pub fn analyze(samples: &[f32], sample_rate: u32) -> Self {
        let size = samples.len();
        if size == 0 {
            return Self {
                bin_hz: 0.0,
                magnitudes: Vec::new(),
            };
        }

        let mut planner = FftPlanner::new();
        let fft = planner.plan_fft_forward(size);

        // Apply Hann window
        let mut bins: Vec<Complex<f32>> = samples
            .iter()
            .enumerate()
            .map(|(i, &s)| Complex::new(s * hann_window(i, size), 0.0))
            .collect();
        fft.process(&mut bins);

        // Hann window halves the coherent gain; x2 restores sine amplitude
        let scale = 4.0 / size as f32;
        let magnitudes = bins[..size / 2 + 1]
            .iter()
            .map(|c| c.norm() * scale)
            .collect();

        Self {
            bin_hz: sample_rate as f32 / size as f32,
            magnitudes,
        }
    }

    /// Frequency resolution (Hz per bin)
    pub fn bin_hz(&self) -> f32 {
        self.bin_hz
    }

    pub fn magnitudes(&self) -> &[f32] {
        &self.magnitudes
    }

    /// Convert frequency (Hz) to FFT bin index
    pub fn hz_to_bin(&self, hz: f32) -> usize {
        if self.bin_hz == 0.0 {
            return 0;
        }
        ((hz / self.bin_hz).round() as usize).min(self.magnitudes.len().saturating_sub(1))
    }

    /// Strongest non-DC component
    pub fn peak_frequency(&self) -> Option<f32> {
        self.magnitudes
            .iter()
            .enumerate()
            .skip(1)
            .max_by(|a, b| a.1.total_cmp(b.1))
            .map(|(bin, _)| bin as f32 * self.bin_hz)
    }

    /// Approximate sine amplitude at `hz`
    pub fn magnitude_at(&self, hz: f32) -> f32 {
        self.magnitudes
            .get(self.hz_to_bin(hz))
            .copied()
            .unwrap_or(0.0)
    }

    /// Mean magnitude across bins in `range_hz`
    pub fn band_energy(&self, range_hz: (f32, f32)) -> f32 {
        let start = self.hz_to_bin(range_hz.0);
        let end = self.hz_to_bin(range_hz.1).max(start + 1).min(self.magnitudes.len());
        if start >= end {
            return 0.0;
        }
        self.magnitudes[start..end].iter().sum::<f32>() / (end - start) as f32
    }

    /// Summarize into bass/mid/high bands
    pub fn bands(&self, config: &AnalysisConfig) -> AudioBands {
        AudioBands {
            low: self.band_energy(config.bass_range_hz),
            mid: self.band_energy(config.mid_range_hz),
            high: self.band_energy(config.high_range_hz),
        }
    }
}

/// Hann window function for FFT analysis
pub fn hann_window(index: usize, size: usize) -> f32 {
    if size <= 1 {
        return 1.0;
    }
    0.5 * (1.0 - ((2.0 * PI * index as f32) / (size as f32 - 1.0)).cos())
}
