//! Night: three gated cricket voices, night wind, an owl every 8 s, a low
//! "mystical" drone and occasional leaf rustle.

use rand::rngs::StdRng;

use super::recipe::{noise, periodic_window, tone, Layer, Recipe};

/// A cricket chirps while `sin(gate_rate·t + gate_phase)` exceeds `threshold`
#[derive(Debug, Clone, Copy)]
pub struct Cricket {
    pub carrier_hz: f64,
    pub gate_rate: f64,
    pub gate_phase: f64,
    pub threshold: f64,
    pub amplitude: f64,
    pub swell_rate: f64,
}

impl Cricket {
    pub fn gate_open(&self, t: f64) -> bool {
        (t * self.gate_rate + self.gate_phase).sin() > self.threshold
    }

    pub fn sample(&self, t: f64) -> f64 {
        if !self.gate_open(t) {
            return 0.0;
        }
        tone(self.carrier_hz, t) * self.amplitude * (t * self.swell_rate).sin()
    }
}

pub const CRICKET_1: Cricket = Cricket {
    carrier_hz: 4200.0,
    gate_rate: 25.0,
    gate_phase: 0.0,
    threshold: 0.7,
    amplitude: 0.08,
    swell_rate: 0.3,
};

pub const CRICKET_2: Cricket = Cricket {
    carrier_hz: 3800.0,
    gate_rate: 22.0,
    gate_phase: 1.0,
    threshold: 0.6,
    amplitude: 0.06,
    swell_rate: 0.4,
};

pub const CRICKET_3: Cricket = Cricket {
    carrier_hz: 4600.0,
    gate_rate: 28.0,
    gate_phase: 2.0,
    threshold: 0.8,
    amplitude: 0.04,
    swell_rate: 0.2,
};

pub fn recipe() -> Recipe {
    Recipe::new(
        1.0,
        vec![
            Layer::new("cricket_1", cricket_1, CRICKET_1.amplitude),
            Layer::new("cricket_2", cricket_2, CRICKET_2.amplitude),
            Layer::new("cricket_3", cricket_3, CRICKET_3.amplitude),
            Layer::new("night_wind", night_wind, 0.5 * 0.025),
            Layer::new("owl", owl, 0.03),
            Layer::new("mystical", mystical, 0.01),
            Layer::new("leaf_rustle", leaf_rustle, 0.5 * 0.015),
        ],
    )
}

fn cricket_1(t: f64, _rng: &mut StdRng) -> f64 {
    CRICKET_1.sample(t)
}

fn cricket_2(t: f64, _rng: &mut StdRng) -> f64 {
    CRICKET_2.sample(t)
}

fn cricket_3(t: f64, _rng: &mut StdRng) -> f64 {
    CRICKET_3.sample(t)
}

fn night_wind(t: f64, rng: &mut StdRng) -> f64 {
    noise(rng) * 0.025 * (t * 0.6).sin()
}

fn owl(t: f64, _rng: &mut StdRng) -> f64 {
    tone(180.0, t) * periodic_window(t, 8.0, 1.0 / 8.0) * 0.03
}

fn mystical(t: f64, _rng: &mut StdRng) -> f64 {
    tone(80.0, t) * 0.01 * (t * 0.1).sin()
}

fn leaf_rustle(t: f64, rng: &mut StdRng) -> f64 {
    noise(rng) * 0.015 * periodic_window(t, 6.0, 1.0)
}
