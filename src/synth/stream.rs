//! Stream: an 8-partial flow tone with sparse droplets, bubbling and
//! turbulence, plus a faint echo of the flow.

use rand::rngs::StdRng;
use rand::Rng;

use super::recipe::{
    gust, harmonic_number, noise_harmonics, noise_harmonics_peak, sparse_trigger, tone,
    tone_with_phase, Layer, Recipe,
};

/// Per-sample chance of a droplet
pub const DROPLET_PROBABILITY: f64 = 0.02;

/// Droplet decay restarts on this grid (seconds)
const DROPLET_GRID_S: f64 = 0.1;

const FLOW_PARTIALS: u32 = 8;
const FLOW_AMPLITUDE: f64 = 0.12;

pub fn recipe() -> Recipe {
    let flow_peak = FLOW_AMPLITUDE * harmonic_number(FLOW_PARTIALS) * 1.3;
    Recipe::new(
        0.8,
        vec![
            Layer::new("water_flow", water_flow, flow_peak),
            Layer::new("droplets", droplets, 0.08),
            Layer::new("bubbles", bubbles, noise_harmonics_peak(5, 0.02) * 1.4),
            Layer::new("turbulence", turbulence, noise_harmonics_peak(4, 0.03) * 1.2),
            Layer::new("echo", echo, flow_peak * 0.1),
        ],
    )
}

/// Continuous flow tone, shared by the flow layer and its echo
pub fn flow_tone(t: f64) -> f64 {
    let swell = gust(t, 0.3, 0.2);
    (1..=FLOW_PARTIALS)
        .map(|j| {
            let j = j as f64;
            tone_with_phase(150.0 + j * 80.0, t, (t * j * 0.5).sin()) * (FLOW_AMPLITUDE / j) * swell
        })
        .sum()
}

fn water_flow(t: f64, _rng: &mut StdRng) -> f64 {
    flow_tone(t)
}

fn droplets(t: f64, rng: &mut StdRng) -> f64 {
    if !sparse_trigger(rng, DROPLET_PROBABILITY) {
        return 0.0;
    }
    let since_grid = t.rem_euclid(DROPLET_GRID_S);
    let freq = 1000.0 + 500.0 * rng.random::<f64>();
    tone(freq, t) * 0.08 * (-since_grid * 30.0).exp()
}

fn bubbles(t: f64, rng: &mut StdRng) -> f64 {
    noise_harmonics(rng, t, 5, 0.02, 15.0, 0.8) * gust(t, 0.4, 0.3)
}

fn turbulence(t: f64, rng: &mut StdRng) -> f64 {
    noise_harmonics(rng, t, 4, 0.03, 6.0, 0.4) * gust(t, 0.2, 0.15)
}

fn echo(t: f64, _rng: &mut StdRng) -> f64 {
    flow_tone(t) * 0.1 * (t * 0.05).sin()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_droplets_are_sparse() {
        let mut rng = StdRng::seed_from_u64(9);
        let total = 44_100;
        let active = (0..total)
            .filter(|&i| droplets(i as f64 / 44_100.0, &mut rng) != 0.0)
            .count();
        assert!(active > 0, "expected at least one droplet in a second");
        assert!(active < total / 20, "droplets too dense: {}", active);
    }

    #[test]
    fn test_flow_tone_within_peak() {
        let bound = FLOW_AMPLITUDE * harmonic_number(FLOW_PARTIALS) * 1.3;
        for i in 0..20_000 {
            assert!(flow_tone(i as f64 / 4000.0).abs() <= bound);
        }
    }
}
