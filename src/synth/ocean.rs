//! Ocean: three slow swells, a crash burst every 6 s, foam hiss and sea wind.

use rand::rngs::StdRng;

use super::recipe::{gust, noise, noise_harmonics, noise_harmonics_peak, Layer, Recipe};
use std::f64::consts::TAU;

/// Crash bursts recur every 6 s ...
pub const CRASH_PERIOD_S: f64 = 6.0;
/// ... and are audible only during the first 1.5 s of each cycle
pub const CRASH_WINDOW_S: f64 = 1.5;

pub fn recipe() -> Recipe {
    Recipe::new(
        0.7,
        vec![
            Layer::new("swell_low", swell_low, 0.35 * 1.2),
            Layer::new("swell_mid", swell_mid, 0.25 * 1.3),
            Layer::new("swell_high", swell_high, 0.18 * 1.4),
            Layer::new("crash", crash, 0.5 * 0.3),
            Layer::new("foam", foam, noise_harmonics_peak(6, 0.015) * 1.5),
            Layer::new("sea_wind", sea_wind, noise_harmonics_peak(4, 0.02) * 1.3),
        ],
    )
}

/// Crash intensity at `t`; exactly zero outside the crash window
pub fn crash_envelope(t: f64) -> f64 {
    let cycle = t.rem_euclid(CRASH_PERIOD_S);
    if cycle < CRASH_WINDOW_S {
        (-cycle * 2.0).exp() * (1.0 - cycle / CRASH_WINDOW_S)
    } else {
        0.0
    }
}

fn swell(t: f64, freq_hz: f64, phase: f64, amplitude: f64, depth: f64, rate: f64) -> f64 {
    (TAU * freq_hz * t + phase).sin() * amplitude * gust(t, depth, rate)
}

fn swell_low(t: f64, _rng: &mut StdRng) -> f64 {
    swell(t, 0.06, 0.0, 0.35, 0.2, 0.08)
}

fn swell_mid(t: f64, _rng: &mut StdRng) -> f64 {
    swell(t, 0.11, 1.2, 0.25, 0.3, 0.15)
}

fn swell_high(t: f64, _rng: &mut StdRng) -> f64 {
    swell(t, 0.18, 2.4, 0.18, 0.4, 0.25)
}

fn crash(t: f64, rng: &mut StdRng) -> f64 {
    let envelope = crash_envelope(t);
    if envelope == 0.0 {
        return 0.0;
    }
    noise(rng) * 0.3 * envelope
}

fn foam(t: f64, rng: &mut StdRng) -> f64 {
    noise_harmonics(rng, t, 6, 0.015, 8.0, 0.3) * gust(t, 0.5, 0.2)
}

fn sea_wind(t: f64, rng: &mut StdRng) -> f64 {
    noise_harmonics(rng, t, 4, 0.02, 0.3, 0.0) * gust(t, 0.3, 0.07)
}
