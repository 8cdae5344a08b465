//! Spectral analysis configuration.

use crate::error::{AmbienceError, Result};

/// Frequency band mapping used when summarizing a spectrum
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    /// Bass frequency range (Hz)
    /// Covers the sub-bass beds (15 Hz snow, 40 Hz forest hum, 80 Hz night)
    pub bass_range_hz: (f32, f32),

    /// Mid frequency range (Hz)
    /// Stream flow partials and owl calls live here
    pub mid_range_hz: (f32, f32),

    /// High frequency range (Hz)
    /// Bird chirps and crickets
    pub high_range_hz: (f32, f32),
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            bass_range_hz: (10.0, 200.0),
            mid_range_hz: (200.0, 1000.0),
            high_range_hz: (1000.0, 5000.0),
        }
    }
}

impl AnalysisConfig {
    /// Validate configuration (each band must be non-empty and non-negative)
    pub fn validate(&self) -> Result<()> {
        for (name, (lo, hi)) in [
            ("bass", self.bass_range_hz),
            ("mid", self.mid_range_hz),
            ("high", self.high_range_hz),
        ] {
            if lo < 0.0 || hi <= lo {
                return Err(AmbienceError::InvalidConfig(format!(
                    "{} band must satisfy 0 <= lo < hi, got {}..{}",
                    name, lo, hi
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_bands_are_valid() {
        assert!(AnalysisConfig::default().validate().is_ok());
    }

    #[test]
    fn test_inverted_band_rejected() {
        let config = AnalysisConfig {
            mid_range_hz: (1000.0, 200.0),
            ..AnalysisConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(AmbienceError::InvalidConfig(_))
        ));
    }
}
