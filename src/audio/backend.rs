//! Output capability seam: what a platform must provide to play a buffer.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use crate::buffer::AudioBuffer;
use crate::error::Result;

/// Platform audio output (device + stream factory)
pub trait OutputBackend {
    /// Human-readable device name
    fn name(&self) -> String;

    /// Rate buffers should be rendered at (Hz)
    fn sample_rate(&self) -> u32;

    /// Allow output to start; may be rejected (e.g. pending user activation)
    fn resume(&mut self) -> Result<()>;

    /// Stop accepting new output
    fn suspend(&mut self) -> Result<()>;

    /// Build the source -> gain -> destination graph for one buffer.
    /// The returned voice is not yet started.
    fn connect(&mut self, graph: VoiceGraph) -> Result<Box<dyn Voice>>;
}

/// One connected buffer on a backend
pub trait Voice {
    /// Begin output. Called exactly once per voice.
    fn start(&mut self) -> Result<()>;

    /// Best-effort stop; safe to call repeatedly
    fn stop(&mut self);

    /// True once the buffer ran out or the voice was stopped.
    /// Implementations may release their device output the first time
    /// this reports true.
    fn is_finished(&self) -> bool;
}

/// Source buffer plus fixed output gain
#[derive(Debug, Clone)]
pub struct VoiceGraph {
    buffer: Arc<AudioBuffer>,
    gain: f32,
}

impl VoiceGraph {
    pub fn new(buffer: Arc<AudioBuffer>, gain: f32) -> Self {
        Self { buffer, gain }
    }

    pub fn buffer(&self) -> &AudioBuffer {
        &self.buffer
    }

    pub fn gain(&self) -> f32 {
        self.gain
    }

    /// Write interleaved frames starting at `cursor` into `out`.
    ///
    /// Device channels beyond the buffer's channel count repeat the last
    /// buffer channel. Frames past the end of the buffer are silence.
    /// Returns the number of buffer frames consumed.
    pub fn render(&self, cursor: usize, out: &mut [f32], device_channels: usize) -> usize {
        let device_channels = device_channels.max(1);
        let last_channel = self.buffer.num_channels().saturating_sub(1);
        let available = self.buffer.frames().saturating_sub(cursor);
        let requested = out.len() / device_channels;
        let written = requested.min(available);

        for (i, frame) in out.chunks_mut(device_channels).enumerate() {
            if i < written {
                for (c, sample) in frame.iter_mut().enumerate() {
                    *sample = self.buffer.sample(c.min(last_channel), cursor + i) * self.gain;
                }
            } else {
                frame.fill(0.0);
            }
        }

        written
    }
}

/// Playback position and flags shared between a voice and its output thread
#[derive(Debug, Default)]
pub struct VoiceProgress {
    cursor: AtomicUsize,
    stopped: AtomicBool,
    finished: AtomicBool,
    /// Backend-wide suspend flag, shared by every voice on that backend
    paused: Arc<AtomicBool>,
}

impl VoiceProgress {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Progress that goes silent (without advancing) while `paused` is set
    pub fn with_pause_flag(paused: Arc<AtomicBool>) -> Arc<Self> {
        Arc::new(Self {
            paused,
            ..Self::default()
        })
    }

    /// Pull the next block of output through `graph`, advancing the cursor
    pub fn pull(&self, graph: &VoiceGraph, out: &mut [f32], device_channels: usize) -> usize {
        if self.stopped.load(Ordering::Acquire)
            || self.finished.load(Ordering::Acquire)
            || self.paused.load(Ordering::Acquire)
        {
            out.fill(0.0);
            return 0;
        }

        let cursor = self.cursor.load(Ordering::Relaxed);
        let written = graph.render(cursor, out, device_channels);
        self.cursor.store(cursor + written, Ordering::Relaxed);

        if cursor + written >= graph.buffer().frames() {
            self.finished.store(true, Ordering::Release);
        }
        written
    }

    pub fn is_paused(&self) -> bool {
        self.paused.load(Ordering::Acquire)
    }

    pub fn position(&self) -> usize {
        self.cursor.load(Ordering::Relaxed)
    }

    pub fn stop(&self) {
        self.stopped.store(true, Ordering::Release);
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::Acquire)
    }

    pub fn is_finished(&self) -> bool {
        self.is_stopped() || self.finished.load(Ordering::Acquire)
    }
}
