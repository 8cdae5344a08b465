//! Birds: three chirping species, one distant bird, grass rustle and a
//! steady breeze.

use rand::rngs::StdRng;

use super::recipe::{noise, periodic_window, tone, Layer, Recipe};
use std::f64::consts::TAU;

pub fn recipe() -> Recipe {
    Recipe::new(
        1.0,
        vec![
            Layer::new("robin", robin, 0.12),
            Layer::new("sparrow", sparrow, 0.08),
            Layer::new("finch", finch, 0.06),
            Layer::new("distant_bird", distant_bird, 0.04),
            Layer::new("grass_rustle", grass_rustle, 0.5 * 0.02),
            Layer::new("breeze", breeze, 0.03),
        ],
    )
}

/// Sine whose instantaneous pitch wobbles `base ± depth` at `rate` rad/s
fn warble(t: f64, base_hz: f64, depth_hz: f64, rate: f64) -> f64 {
    (TAU * (base_hz + depth_hz * (t * rate).sin()) * t).sin()
}

fn robin(t: f64, _rng: &mut StdRng) -> f64 {
    warble(t, 800.0, 200.0, 8.0) * periodic_window(t, 2.0, 1.0) * 0.12
}

fn sparrow(t: f64, _rng: &mut StdRng) -> f64 {
    warble(t, 1400.0, 300.0, 12.0) * periodic_window(t, 1.2, 3.0) * 0.08
}

fn finch(t: f64, _rng: &mut StdRng) -> f64 {
    warble(t, 2200.0, 400.0, 15.0) * periodic_window(t, 0.8, 5.0) * 0.06
}

fn distant_bird(t: f64, _rng: &mut StdRng) -> f64 {
    warble(t, 600.0, 150.0, 3.0) * periodic_window(t, 4.0, 0.5) * 0.04
}

fn grass_rustle(t: f64, rng: &mut StdRng) -> f64 {
    noise(rng) * 0.02 * (t * 8.0).sin()
}

fn breeze(t: f64, _rng: &mut StdRng) -> f64 {
    tone(0.5, t) * 0.03
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_robin_swells_mid_cycle() {
        let mut rng = StdRng::seed_from_u64(0);
        let loudest_near = |centre: f64, rng: &mut StdRng| {
            (0..400)
                .map(|i| robin(centre - 0.01 + i as f64 * 0.00005, rng).abs())
                .fold(0.0f64, f64::max)
        };
        // Window peaks at t mod 2 == 1, is ~e^-1 at the cycle edge
        assert!(loudest_near(1.0, &mut rng) > loudest_near(2.0, &mut rng));
    }

    #[test]
    fn test_breeze_is_pure_half_hertz() {
        let mut rng = StdRng::seed_from_u64(0);
        assert!(breeze(0.0, &mut rng).abs() < 1e-12);
        assert!((breeze(0.5, &mut rng) - 0.03).abs() < 1e-12);
    }
}
