//! Recorded audio assets: WAV decode for playback, WAV export for renders.

use std::path::Path;

use tracing::debug;

use crate::buffer::AudioBuffer;
use crate::error::{AmbienceError, Result};

/// Decode a WAV file into a stereo buffer at `target_rate`.
///
/// Mono files are duplicated to both channels; other rates are converted
/// by linear interpolation.
pub fn load_wav(path: &Path, target_rate: u32) -> Result<AudioBuffer> {
    if !path.is_file() {
        return Err(AmbienceError::AssetMissing(path.to_path_buf()));
    }

    let decode_err = |source| AmbienceError::AssetDecode {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = hound::WavReader::open(path).map_err(decode_err)?;
    let spec = reader.spec();

    let interleaved: Vec<f32> = match spec.sample_format {
        hound::SampleFormat::Float => reader
            .samples::<f32>()
            .collect::<std::result::Result<_, _>>()
            .map_err(decode_err)?,
        hound::SampleFormat::Int => {
            let scale = 1.0 / (1i64 << (spec.bits_per_sample.saturating_sub(1))) as f32;
            reader
                .samples::<i32>()
                .map(|s| s.map(|v| v as f32 * scale))
                .collect::<std::result::Result<_, _>>()
                .map_err(decode_err)?
        }
    };

    let source_channels = spec.channels.max(1) as usize;
    let mut channels =
        vec![Vec::with_capacity(interleaved.len() / source_channels); source_channels];
    for frame in interleaved.chunks_exact(source_channels) {
        for (ch, &sample) in channels.iter_mut().zip(frame) {
            ch.push(sample);
        }
    }
    if channels[0].is_empty() {
        return Err(AmbienceError::InvalidBuffer(format!(
            "{} has no audio frames",
            path.display()
        )));
    }
    if channels.len() == 1 {
        channels.push(channels[0].clone());
    }

    if spec.sample_rate != target_rate {
        debug!(
            "Resampling {} from {}Hz to {}Hz",
            path.display(),
            spec.sample_rate,
            target_rate
        );
        for ch in channels.iter_mut() {
            *ch = resample_linear(ch, spec.sample_rate, target_rate);
        }
    }

    debug!(
        "Loaded {}: {} channels, {} frames",
        path.display(),
        channels.len(),
        channels[0].len()
    );
    AudioBuffer::from_channels(target_rate, channels)
}

/// Write a buffer as 32-bit float WAV
pub fn write_wav(buffer: &AudioBuffer, path: &Path) -> Result<()> {
    let export_err = |source| AmbienceError::Export {
        path: path.to_path_buf(),
        source,
    };

    let spec = hound::WavSpec {
        channels: buffer.num_channels() as u16,
        sample_rate: buffer.sample_rate(),
        bits_per_sample: 32,
        sample_format: hound::SampleFormat::Float,
    };
    let mut writer = hound::WavWriter::create(path, spec).map_err(export_err)?;
    for sample in buffer.interleaved() {
        writer.write_sample(sample).map_err(export_err)?;
    }
    writer.finalize().map_err(export_err)
}

/// Linear-interpolation rate conversion
fn resample_linear(samples: &[f32], from_rate: u32, to_rate: u32) -> Vec<f32> {
    if samples.is_empty() || from_rate == to_rate || from_rate == 0 {
        return samples.to_vec();
    }
    let ratio = from_rate as f64 / to_rate as f64;
    let out_len = ((samples.len() as f64) / ratio).round().max(1.0) as usize;
    let last = samples.len() - 1;

    (0..out_len)
        .map(|i| {
            let pos = i as f64 * ratio;
            let idx = (pos.floor() as usize).min(last);
            let next = (idx + 1).min(last);
            let frac = (pos - idx as f64) as f32;
            samples[idx] + (samples[next] - samples[idx]) * frac
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("ambisynth-{}-{}", std::process::id(), name))
    }

    #[test]
    fn test_missing_asset() {
        let path = temp_path("does-not-exist.wav");
        assert!(matches!(
            load_wav(&path, 44100),
            Err(AmbienceError::AssetMissing(_))
        ));
    }

    #[test]
    fn test_write_then_load_float() {
        let path = temp_path("float.wav");
        let buffer =
            AudioBuffer::from_channels(8000, vec![vec![0.5, -0.25, 0.0], vec![0.1, 0.2, 0.3]])
                .unwrap();
        write_wav(&buffer, &path).unwrap();
        let loaded = load_wav(&path, 8000).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(loaded, buffer);
    }

    #[test]
    fn test_mono_int_asset_becomes_stereo() {
        let path = temp_path("mono16.wav");
        let spec = hound::WavSpec {
            channels: 1,
            sample_rate: 8000,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut writer = hound::WavWriter::create(&path, spec).unwrap();
        for v in [16384i16, -16384, 0, 32767] {
            writer.write_sample(v).unwrap();
        }
        writer.finalize().unwrap();

        let loaded = load_wav(&path, 8000).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(loaded.num_channels(), 2);
        assert_eq!(loaded.channel(0), loaded.channel(1));
        assert!((loaded.sample(0, 0) - 0.5).abs() < 1e-4);
        assert!((loaded.sample(0, 1) + 0.5).abs() < 1e-4);
    }

    #[test]
    fn test_garbage_file_is_decode_error() {
        let path = temp_path("garbage.wav");
        std::fs::write(&path, b"definitely not a riff header").unwrap();
        let result = load_wav(&path, 8000);
        std::fs::remove_file(&path).ok();
        assert!(matches!(result, Err(AmbienceError::AssetDecode { .. })));
    }

    #[test]
    fn test_resample_linear_doubles_length() {
        let out = resample_linear(&[0.0, 1.0, 0.0, -1.0], 4000, 8000);
        assert_eq!(out.len(), 8);
        assert!((out[1] - 0.5).abs() < 1e-6);
        assert_eq!(out[2], 1.0);
    }
}
