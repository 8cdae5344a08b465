//! Command-line argument parsing.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::params::SynthConfig;
use crate::synth::AmbienceCategory;

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "ambisynth")]
#[command(about = "Procedural nature ambiences with recorded-asset fallback", long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play one ambience through the default output device
    Play {
        /// forest, ocean, stream, snow, birds or night (unknown tags play forest)
        category: String,

        /// Length of the synthesized fallback (seconds)
        #[arg(long, value_name = "SECONDS", default_value = "5")]
        duration: f32,

        /// Recorded WAV to try before synthesizing
        #[arg(long, value_name = "PATH")]
        asset: Option<PathBuf>,

        /// User-supplied WAV to try first
        #[arg(long, value_name = "PATH")]
        custom: Option<PathBuf>,
    },

    /// Render an ambience (or one of its layers) to a WAV file
    Render {
        category: String,

        /// Output WAV path
        #[arg(short, long, value_name = "PATH")]
        output: PathBuf,

        #[arg(long, value_name = "SECONDS", default_value = "5")]
        duration: f32,

        /// Render a single layer without the category gain
        #[arg(long, value_name = "NAME")]
        layer: Option<String>,

        /// Fixed RNG seed for a reproducible render
        #[arg(long, value_name = "N")]
        seed: Option<u64>,

        #[arg(long, value_name = "HZ", default_value = "44100")]
        sample_rate: u32,
    },

    /// Print the spectral summary of an ambience (or one layer)
    Analyze {
        category: String,

        #[arg(long, value_name = "SECONDS", default_value = "5")]
        duration: f32,

        #[arg(long, value_name = "NAME")]
        layer: Option<String>,

        #[arg(long, value_name = "N")]
        seed: Option<u64>,

        #[arg(long, value_name = "HZ", default_value = "44100")]
        sample_rate: u32,
    },

    /// Step through every scene, playing each one's sound
    Tour {
        /// Time spent on each scene (seconds)
        #[arg(long, value_name = "SECONDS", default_value = "8")]
        dwell: f32,

        /// Directory holding audio/<category>.wav recordings
        #[arg(long, value_name = "DIR", default_value = ".")]
        assets: PathBuf,
    },

    /// List categories and their layers
    List,
}

impl Args {
    /// Parse category tag, falling back to forest for unknown tags
    pub fn parse_category(tag: &str) -> AmbienceCategory {
        AmbienceCategory::from_tag(tag)
    }

    /// Synthesis configuration for offline renders
    pub fn offline_synth_config(seed: Option<u64>, sample_rate: u32) -> SynthConfig {
        SynthConfig {
            sample_rate_hz: sample_rate,
            seed,
            ..SynthConfig::default()
        }
    }
}
