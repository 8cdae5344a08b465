//! Forest: two intermittent chirp patterns over gusting wind, leaf rustle
//! and a distant low hum.

use rand::rngs::StdRng;

use super::recipe::{gust, noise, noise_harmonics, noise_harmonics_peak, tone, Layer, Recipe};

/// First chirp pattern recurs every 4 s and sings for 0.3 s
pub const CHIRP_A_PERIOD_S: f64 = 4.0;
pub const CHIRP_A_WINDOW_S: f64 = 0.3;

/// Second pattern is offset by 1.5 s on a 5 s cycle, 0.4 s long
pub const CHIRP_B_PERIOD_S: f64 = 5.0;
pub const CHIRP_B_WINDOW_S: f64 = 0.4;
pub const CHIRP_B_OFFSET_S: f64 = 1.5;

pub fn recipe() -> Recipe {
    Recipe::new(
        1.0,
        vec![
            Layer::new("birdsong", birdsong, 0.15 + 0.1 + 0.08),
            Layer::new("wind", wind, noise_harmonics_peak(8, 0.02) * 1.3),
            Layer::new("leaf_rustle", leaf_rustle, 0.5 * 0.015 * 2.0),
            Layer::new("ambient_hum", ambient_hum, 0.008 * 1.2),
        ],
    )
}

/// Is either chirp pattern active at `t`?
pub fn chirp_active(t: f64) -> bool {
    t.rem_euclid(CHIRP_A_PERIOD_S) < CHIRP_A_WINDOW_S
        || (t + CHIRP_B_OFFSET_S).rem_euclid(CHIRP_B_PERIOD_S) < CHIRP_B_WINDOW_S
}

fn birdsong(t: f64, _rng: &mut StdRng) -> f64 {
    let mut out = 0.0;

    let cycle = t.rem_euclid(CHIRP_A_PERIOD_S);
    if cycle < CHIRP_A_WINDOW_S {
        let c = cycle / CHIRP_A_WINDOW_S;
        let f1 = 1200.0 + 800.0 * (c * 20.0).sin() * (-c * 8.0).exp();
        let f2 = 800.0 + 400.0 * (c * 15.0).sin() * (-c * 6.0).exp();
        out = (tone(f1, t) * 0.15 + tone(f2, t) * 0.1) * (-c * 5.0).exp();
    }

    let cycle = (t + CHIRP_B_OFFSET_S).rem_euclid(CHIRP_B_PERIOD_S);
    if cycle < CHIRP_B_WINDOW_S {
        let c = cycle / CHIRP_B_WINDOW_S;
        let f = 1500.0 + 600.0 * (c * 12.0).sin() * (-c * 4.0).exp();
        out += tone(f, t) * 0.08 * (-c * 3.0).exp();
    }

    out
}

fn wind(t: f64, rng: &mut StdRng) -> f64 {
    noise_harmonics(rng, t, 8, 0.02, 0.5, 0.0) * gust(t, 0.3, 0.1)
}

fn leaf_rustle(t: f64, rng: &mut StdRng) -> f64 {
    noise(rng) * 0.015 * (1.0 + (t * 3.0).sin()) * (t * 25.0 + (t * 5.0).sin()).sin()
}

fn ambient_hum(t: f64, _rng: &mut StdRng) -> f64 {
    tone(40.0, t) * 0.008 * gust(t, 0.2, 0.05)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_birdsong_silent_between_chirps() {
        let mut rng = StdRng::seed_from_u64(1);
        for i in 0..80_000 {
            let t = i as f64 / 8000.0;
            if !chirp_active(t) {
                assert_eq!(birdsong(t, &mut rng), 0.0, "chirp leaked at t={}", t);
            }
        }
    }

    #[test]
    fn test_chirp_windows() {
        assert!(chirp_active(0.1));
        assert!(chirp_active(4.2));
        assert!(!chirp_active(1.0));
        // (3.6 + 1.5) mod 5 = 0.1 -> second pattern
        assert!(chirp_active(3.6));
    }
}
