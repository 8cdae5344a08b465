//! Ambisynth - procedural nature ambiences from the command line
//!
//! Plays, renders and inspects the six synthesized categories, and tours
//! the scene catalog with recorded-asset fallback.

use std::time::Duration;

use clap::Parser;

use ambisynth::asset;
use ambisynth::audio::Spectrum;
use ambisynth::catalog::SceneCatalog;
use ambisynth::cli::{Args, Command};
use ambisynth::params::{AnalysisConfig, PlaybackConfig, SynthConfig};
use ambisynth::{
    ActivePlayback, AmbienceCategory, AmbienceError, AmbiencePlayer, AudioBuffer, Synthesizer,
};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    if let Err(e) = run(args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), AmbienceError> {
    match args.command {
        Command::Play {
            category,
            duration,
            asset,
            custom,
        } => {
            let category = Args::parse_category(&category);
            let synth_config = SynthConfig {
                default_duration_s: duration,
                ..SynthConfig::default()
            };
            synth_config.validate()?;

            let mut player =
                AmbiencePlayer::with_default_output(synth_config, PlaybackConfig::default());
            match player.play_scene(category, asset.as_deref(), custom.as_deref()) {
                Some(active) => {
                    println!("Playing {}", active.source);
                    active.wait(active.hold);
                }
                None => println!("No audio output; nothing played"),
            }
        }

        Command::Render {
            category,
            output,
            duration,
            layer,
            seed,
            sample_rate,
        } => {
            let category = Args::parse_category(&category);
            let buffer = render(category, layer.as_deref(), duration, seed, sample_rate)?;
            asset::write_wav(&buffer, &output)?;
            println!(
                "Wrote {} ({} frames, {} channels, peak {:.3})",
                output.display(),
                buffer.frames(),
                buffer.num_channels(),
                buffer.peak()
            );
        }

        Command::Analyze {
            category,
            duration,
            layer,
            seed,
            sample_rate,
        } => {
            let category = Args::parse_category(&category);
            let buffer = render(category, layer.as_deref(), duration, seed, sample_rate)?;
            let config = AnalysisConfig::default();
            config.validate()?;

            println!("{} ({}s @ {}Hz)", category, buffer.duration(), sample_rate);
            println!("  peak amplitude: {:.4}", buffer.peak());
            for (index, samples) in buffer.channels().enumerate() {
                let spectrum = Spectrum::analyze(samples, buffer.sample_rate());
                let bands = spectrum.bands(&config);
                let peak_hz = spectrum
                    .peak_frequency()
                    .map(|hz| format!("{:.1} Hz", hz))
                    .unwrap_or_else(|| "-".to_string());
                println!(
                    "  ch{}: peak {}  bass {:.4}  mid {:.4}  high {:.4}",
                    index, peak_hz, bands.low, bands.mid, bands.high
                );
            }
        }

        Command::Tour { dwell, assets } => {
            let dwell = Duration::try_from_secs_f32(dwell).map_err(|_| {
                AmbienceError::InvalidConfig(format!("dwell must be >= 0, got {}", dwell))
            })?;
            let catalog = SceneCatalog::default().with_asset_root(&assets);
            let mut player = AmbiencePlayer::with_default_output(
                SynthConfig::default(),
                PlaybackConfig::default(),
            );

            let mut previous: Option<ActivePlayback> = None;
            for scene in catalog.scenes() {
                // Starting a scene never stops the last one by itself
                if let Some(mut active) = previous.take() {
                    active.stop();
                }
                println!("[{}] {} - {}", scene.id, scene.title, scene.audio_description);
                let custom = catalog.custom_audio(scene.id);
                previous = player.play_scene(scene.category, scene.asset.as_deref(), custom);
                match &previous {
                    Some(active) => active.wait(dwell),
                    None => std::thread::sleep(dwell),
                }
            }
        }

        Command::List => {
            for category in AmbienceCategory::ALL {
                let recipe = category.recipe();
                let layers: Vec<_> = recipe.layer_names().collect();
                println!(
                    "{:<7} gain {:.1}  layers: {}",
                    category.tag(),
                    recipe.master_gain,
                    layers.join(", ")
                );
            }
        }
    }
    Ok(())
}

/// Offline render of a category mix or one of its layers
fn render(
    category: AmbienceCategory,
    layer: Option<&str>,
    duration: f32,
    seed: Option<u64>,
    sample_rate: u32,
) -> Result<AudioBuffer, AmbienceError> {
    let synth = Synthesizer::new(Args::offline_synth_config(seed, sample_rate))?;
    match layer {
        Some(name) => synth.render_layer(category, name, duration),
        None => synth.generate(category, duration),
    }
}
