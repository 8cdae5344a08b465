//! cpal-backed output: one output stream per playing voice.

use std::cell::Cell;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{FromSample, SizedSample};
use tracing::{debug, error, info};

use super::backend::{OutputBackend, Voice, VoiceGraph, VoiceProgress};
use crate::error::{AmbienceError, Result};

/// Scratch space for one block of device samples before sample conversion
const SCRATCH_SAMPLES: usize = 4096;

/// Scratch length holding whole frames so interleaving never splits
fn block_len(channels: usize) -> usize {
    let channels = channels.max(1);
    (SCRATCH_SAMPLES / channels).max(1) * channels
}

/// Fill one device callback buffer through `scratch`, a block at a time
fn fill_device_buffer<T>(
    progress: &VoiceProgress,
    graph: &VoiceGraph,
    scratch: &mut [f32],
    channels: usize,
    data: &mut [T],
) where
    T: SizedSample + FromSample<f32>,
{
    for chunk in data.chunks_mut(scratch.len().max(1)) {
        let block = &mut scratch[..chunk.len()];
        progress.pull(graph, block, channels);
        for (out, &sample) in chunk.iter_mut().zip(block.iter()) {
            *out = T::from_sample(sample);
        }
    }
}

/// Default host output device
pub struct CpalBackend {
    device: cpal::Device,
    config: cpal::SupportedStreamConfig,
    name: String,
    /// Set while suspended; every live voice reads it from its callback
    paused: Arc<AtomicBool>,
}

impl CpalBackend {
    /// Open the default output device of the default host
    pub fn new() -> Result<Self> {
        let host = cpal::default_host();
        let device = host.default_output_device().ok_or_else(|| {
            AmbienceError::PlatformUnavailable("No audio output device found".to_string())
        })?;

        let config = device.default_output_config().map_err(|e| {
            AmbienceError::PlatformUnavailable(format!("Failed to get audio config: {}", e))
        })?;

        let name = device.name().unwrap_or_else(|_| "Unknown".to_string());
        info!(
            "Audio: {} @ {}Hz, {} channels",
            name,
            config.sample_rate().0,
            config.channels()
        );

        Ok(Self {
            device,
            config,
            name,
            paused: Arc::new(AtomicBool::new(true)),
        })
    }

    fn build_voice<T>(&self, graph: VoiceGraph) -> Result<CpalVoice>
    where
        T: SizedSample + FromSample<f32>,
    {
        let stream_config: cpal::StreamConfig = self.config.clone().into();
        let channels = stream_config.channels as usize;
        let progress = VoiceProgress::with_pause_flag(Arc::clone(&self.paused));
        let callback_progress = Arc::clone(&progress);
        let mut scratch = vec![0.0f32; block_len(channels)];

        let stream = self
            .device
            .build_output_stream(
                &stream_config,
                move |data: &mut [T], _: &cpal::OutputCallbackInfo| {
                    fill_device_buffer(&callback_progress, &graph, &mut scratch, channels, data);
                },
                |err| error!("Audio stream error: {}", err),
                None,
            )
            .map_err(|e| {
                AmbienceError::PlaybackFailure(format!("Failed to build audio stream: {}", e))
            })?;

        Ok(CpalVoice {
            stream,
            progress,
            released: Cell::new(false),
        })
    }
}

impl OutputBackend for CpalBackend {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn sample_rate(&self) -> u32 {
        self.config.sample_rate().0
    }

    fn resume(&mut self) -> Result<()> {
        self.paused.store(false, Ordering::Release);
        Ok(())
    }

    /// Silences every live voice in place; they continue on resume
    fn suspend(&mut self) -> Result<()> {
        self.paused.store(true, Ordering::Release);
        Ok(())
    }

    fn connect(&mut self, graph: VoiceGraph) -> Result<Box<dyn Voice>> {
        if self.paused.load(Ordering::Acquire) {
            return Err(AmbienceError::PlaybackFailure("output is suspended".to_string()));
        }

        let voice = match self.config.sample_format() {
            cpal::SampleFormat::F32 => self.build_voice::<f32>(graph)?,
            cpal::SampleFormat::I16 => self.build_voice::<i16>(graph)?,
            cpal::SampleFormat::U16 => self.build_voice::<u16>(graph)?,
            other => {
                return Err(AmbienceError::PlaybackFailure(format!(
                    "Unsupported sample format: {:?}",
                    other
                )));
            }
        };
        Ok(Box::new(voice))
    }
}

/// A single cpal stream playing one buffer
///
/// The stream is paused as soon as the voice is seen finished (stopped or
/// run out) and closed when the voice is dropped.
pub struct CpalVoice {
    stream: cpal::Stream,
    progress: Arc<VoiceProgress>,
    released: Cell<bool>,
}

impl CpalVoice {
    /// Pause the device stream once; later calls are no-ops
    fn release(&self) {
        if self.released.replace(true) {
            return;
        }
        if let Err(e) = self.stream.pause() {
            debug!("Audio stream pause rejected: {}", e);
        }
    }
}

impl Voice for CpalVoice {
    fn start(&mut self) -> Result<()> {
        self.stream.play().map_err(|e| {
            AmbienceError::PlaybackFailure(format!("Failed to start audio stream: {}", e))
        })?;
        debug!("Audio stream started");
        Ok(())
    }

    fn stop(&mut self) {
        self.progress.stop();
        self.release();
    }

    fn is_finished(&self) -> bool {
        let finished = self.progress.is_finished();
        if finished {
            self.release();
        }
        finished
    }
}
