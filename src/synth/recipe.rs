//! Layer tables and the shared component shapes they are built from.
//!
//! A category is a weighted sum of named layers. Each layer is a plain
//! function of time (seconds) and the per-render RNG, so any layer can be
//! rendered alone for inspection.

use std::f64::consts::TAU;

use rand::rngs::StdRng;
use rand::Rng;

/// Per-sample layer function: `(t_seconds, rng) -> sample`
pub type LayerFn = fn(f64, &mut StdRng) -> f64;

/// One named additive component of a category
#[derive(Clone, Copy)]
pub struct Layer {
    pub name: &'static str,
    pub render: LayerFn,
    /// Largest magnitude this layer can reach (analytic, before master gain)
    pub peak: f64,
}

impl Layer {
    pub fn new(name: &'static str, render: LayerFn, peak: f64) -> Self {
        Self { name, render, peak }
    }
}

impl std::fmt::Debug for Layer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Layer")
            .field("name", &self.name)
            .field("peak", &self.peak)
            .finish()
    }
}

/// Master gain plus the ordered layers of one category
#[derive(Debug, Clone)]
pub struct Recipe {
    pub master_gain: f64,
    pub layers: Vec<Layer>,
}

impl Recipe {
    pub fn new(master_gain: f64, layers: Vec<Layer>) -> Self {
        Self {
            master_gain,
            layers,
        }
    }

    /// Mixed sample at time `t`, master gain applied, not yet limited
    pub fn sample(&self, t: f64, rng: &mut StdRng) -> f64 {
        let sum: f64 = self.layers.iter().map(|layer| (layer.render)(t, rng)).sum();
        sum * self.master_gain
    }

    pub fn layer(&self, name: &str) -> Option<&Layer> {
        self.layers.iter().find(|layer| layer.name == name)
    }

    pub fn layer_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.layers.iter().map(|layer| layer.name)
    }

    /// Upper bound on |sample| for the mixed output
    pub fn peak_bound(&self) -> f64 {
        self.master_gain * self.layers.iter().map(|layer| layer.peak).sum::<f64>()
    }
}

/// Uniform noise in [-0.5, 0.5)
#[inline]
pub fn noise(rng: &mut StdRng) -> f64 {
    rng.random::<f64>() - 0.5
}

/// True with the given per-sample probability
#[inline]
pub fn sparse_trigger(rng: &mut StdRng, probability: f64) -> bool {
    rng.random::<f64>() < probability
}

/// Sine at `freq_hz`, evaluated directly at time `t`
#[inline]
pub fn tone(freq_hz: f64, t: f64) -> f64 {
    (TAU * freq_hz * t).sin()
}

/// Sine at `freq_hz` with an extra phase term
#[inline]
pub fn tone_with_phase(freq_hz: f64, t: f64, phase: f64) -> f64 {
    (TAU * freq_hz * t + phase).sin()
}

/// Slow amplitude swell `1 + depth·sin(rate·t)`
#[inline]
pub fn gust(t: f64, depth: f64, rate: f64) -> f64 {
    1.0 + depth * (rate * t).sin()
}

/// Bell-shaped window centred in each period: `exp(-k·(t mod p - p/2)²)`
#[inline]
pub fn periodic_window(t: f64, period: f64, sharpness: f64) -> f64 {
    let x = t.rem_euclid(period) - period / 2.0;
    (-x * x * sharpness).exp()
}

/// Broadband noise: `Σ_j noise·(amplitude/j)·sin(j·rate·t + sin(wobble·t))`
///
/// One fresh noise draw per harmonic per sample.
pub fn noise_harmonics(
    rng: &mut StdRng,
    t: f64,
    harmonics: u32,
    amplitude: f64,
    rate: f64,
    wobble: f64,
) -> f64 {
    let drift = (t * wobble).sin();
    (1..=harmonics)
        .map(|j| {
            let j = j as f64;
            noise(rng) * (amplitude / j) * (t * j * rate + drift).sin()
        })
        .sum()
}

/// Peak of [`noise_harmonics`]: `0.5·amplitude·H(harmonics)`
pub fn noise_harmonics_peak(harmonics: u32, amplitude: f64) -> f64 {
    0.5 * amplitude * harmonic_number(harmonics)
}

/// `H(n) = 1 + 1/2 + ... + 1/n`
pub fn harmonic_number(n: u32) -> f64 {
    (1..=n).map(|j| 1.0 / j as f64).sum()
}
