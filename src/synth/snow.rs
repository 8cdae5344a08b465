//! Snow: near-silent snowfall, low mountain wind, rare branch taps and a
//! deep 15 Hz bed.

use rand::rngs::StdRng;

use super::recipe::{
    gust, harmonic_number, noise, noise_harmonics, noise_harmonics_peak, sparse_trigger, tone,
    tone_with_phase, Layer, Recipe,
};

/// Per-sample chance of snow dropping off a branch
pub const BRANCH_PROBABILITY: f64 = 0.005;

const BRANCH_GRID_S: f64 = 0.2;

/// Sub-bass bed frequency and level
pub const DEEP_SILENCE_HZ: f64 = 15.0;
pub const DEEP_SILENCE_AMPLITUDE: f64 = 0.002;

const WIND_PARTIALS: u32 = 6;
const WIND_AMPLITUDE: f64 = 0.015;

pub fn recipe() -> Recipe {
    let wind_peak = WIND_AMPLITUDE * harmonic_number(WIND_PARTIALS) * 1.3;
    Recipe::new(
        0.6,
        vec![
            Layer::new("snowfall", snowfall, noise_harmonics_peak(12, 0.003) * 1.2),
            Layer::new("mountain_wind", mountain_wind, wind_peak),
            Layer::new("branch_taps", branch_taps, 0.5 * 0.01),
            Layer::new("deep_silence", deep_silence, DEEP_SILENCE_AMPLITUDE * 1.1),
            Layer::new("echo", echo, wind_peak * 0.05),
        ],
    )
}

/// Low partials at 55, 70, ... 130 Hz, shared with the echo
pub fn wind_tone(t: f64) -> f64 {
    let swell = gust(t, 0.3, 0.05);
    (1..=WIND_PARTIALS)
        .map(|j| {
            let j = j as f64;
            tone_with_phase(40.0 + j * 15.0, t, (t * j * 0.1).sin()) * (WIND_AMPLITUDE / j) * swell
        })
        .sum()
}

fn snowfall(t: f64, rng: &mut StdRng) -> f64 {
    noise_harmonics(rng, t, 12, 0.003, 2.0, 0.02) * gust(t, 0.2, 0.01)
}

fn mountain_wind(t: f64, _rng: &mut StdRng) -> f64 {
    wind_tone(t)
}

fn branch_taps(t: f64, rng: &mut StdRng) -> f64 {
    if !sparse_trigger(rng, BRANCH_PROBABILITY) {
        return 0.0;
    }
    let since_grid = t.rem_euclid(BRANCH_GRID_S);
    noise(rng) * 0.01 * (-since_grid * 10.0).exp()
}

fn deep_silence(t: f64, _rng: &mut StdRng) -> f64 {
    tone(DEEP_SILENCE_HZ, t) * DEEP_SILENCE_AMPLITUDE * gust(t, 0.1, 0.003)
}

fn echo(t: f64, _rng: &mut StdRng) -> f64 {
    wind_tone(t) * 0.05 * (t * 0.008).sin()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_deep_silence_is_quiet_and_deterministic() {
        let mut a = StdRng::seed_from_u64(1);
        let mut b = StdRng::seed_from_u64(2);
        for i in 0..10_000 {
            let t = i as f64 / 1000.0;
            let sa = deep_silence(t, &mut a);
            assert_eq!(sa, deep_silence(t, &mut b));
            assert!(sa.abs() <= DEEP_SILENCE_AMPLITUDE * 1.1);
        }
    }

    #[test]
    fn test_branch_taps_are_rare() {
        let mut rng = StdRng::seed_from_u64(4);
        let active = (0..100_000)
            .filter(|&i| branch_taps(i as f64 / 44_100.0, &mut rng) != 0.0)
            .count();
        assert!(active < 1_000, "branch taps too frequent: {}", active);
    }
}
