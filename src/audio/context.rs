//! Explicitly owned audio context: created once, resumed on demand.

use std::sync::Arc;

use tracing::{debug, info, warn};

use super::backend::{OutputBackend, VoiceGraph};
use super::playback::PlaybackHandle;
use super::system::CpalBackend;
use crate::buffer::AudioBuffer;
use crate::error::{AmbienceError, Result};

/// Lifecycle of the output context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextState {
    /// Created but not yet allowed to make sound
    Suspended,
    Running,
    /// Closed for good; never recreated implicitly
    Closed,
}

/// Owner of the platform output for the whole session
pub struct AudioContext {
    backend: Box<dyn OutputBackend>,
    state: ContextState,
}

impl AudioContext {
    /// Wrap a backend. The context starts suspended.
    pub fn new(backend: Box<dyn OutputBackend>) -> Self {
        Self {
            backend,
            state: ContextState::Suspended,
        }
    }

    /// Open the default cpal output device
    pub fn open_default() -> Result<Self> {
        Ok(Self::new(Box::new(CpalBackend::new()?)))
    }

    pub fn state(&self) -> ContextState {
        self.state
    }

    pub fn sample_rate(&self) -> u32 {
        self.backend.sample_rate()
    }

    pub fn device_name(&self) -> String {
        self.backend.name()
    }

    /// Move to `Running`, asking the backend for permission if suspended
    pub fn resume(&mut self) -> Result<()> {
        match self.state {
            ContextState::Running => Ok(()),
            ContextState::Closed => Err(AmbienceError::ContextClosed),
            ContextState::Suspended => {
                self.backend.resume()?;
                self.state = ContextState::Running;
                debug!("Audio context resumed");
                Ok(())
            }
        }
    }

    pub fn suspend(&mut self) -> Result<()> {
        match self.state {
            ContextState::Closed => Err(AmbienceError::ContextClosed),
            ContextState::Suspended => Ok(()),
            ContextState::Running => {
                self.backend.suspend()?;
                self.state = ContextState::Suspended;
                debug!("Audio context suspended");
                Ok(())
            }
        }
    }

    pub fn close(&mut self) {
        if self.state == ContextState::Running {
            if let Err(e) = self.backend.suspend() {
                warn!("Suspending output on close failed: {}", e);
            }
        }
        self.state = ContextState::Closed;
        info!("Audio context closed");
    }

    /// Play `buffer` once at `gain`, resuming the context first if needed
    pub fn play_buffer(&mut self, buffer: Arc<AudioBuffer>, gain: f32) -> Result<PlaybackHandle> {
        self.resume()?;

        if buffer.sample_rate() != self.sample_rate() {
            warn!(
                "Buffer rate {}Hz differs from output rate {}Hz; pitch will shift",
                buffer.sample_rate(),
                self.sample_rate()
            );
        }

        let frames = buffer.frames();
        let mut voice = self.backend.connect(VoiceGraph::new(buffer, gain))?;
        voice.start()?;
        debug!("Voice started: {} frames at gain {}", frames, gain);
        Ok(PlaybackHandle::new(voice))
    }
}

impl std::fmt::Debug for AudioContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AudioContext")
            .field("device", &self.backend.name())
            .field("sample_rate", &self.backend.sample_rate())
            .field("state", &self.state)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::backend::Voice;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Default)]
    struct Log {
        resumes: usize,
        suspends: usize,
        gains: Vec<f32>,
        deny_resume: bool,
    }

    struct MockBackend(Rc<RefCell<Log>>);

    struct MockVoice {
        stopped: bool,
    }

    impl Voice for MockVoice {
        fn start(&mut self) -> Result<()> {
            Ok(())
        }

        fn stop(&mut self) {
            self.stopped = true;
        }

        fn is_finished(&self) -> bool {
            self.stopped
        }
    }

    impl OutputBackend for MockBackend {
        fn name(&self) -> String {
            "mock".to_string()
        }

        fn sample_rate(&self) -> u32 {
            8000
        }

        fn resume(&mut self) -> Result<()> {
            let mut log = self.0.borrow_mut();
            if log.deny_resume {
                return Err(AmbienceError::PlaybackFailure("not allowed".to_string()));
            }
            log.resumes += 1;
            Ok(())
        }

        fn suspend(&mut self) -> Result<()> {
            self.0.borrow_mut().suspends += 1;
            Ok(())
        }

        fn connect(&mut self, graph: VoiceGraph) -> Result<Box<dyn Voice>> {
            self.0.borrow_mut().gains.push(graph.gain());
            Ok(Box::new(MockVoice { stopped: false }))
        }
    }

    fn context() -> (AudioContext, Rc<RefCell<Log>>) {
        let log = Rc::new(RefCell::new(Log::default()));
        (AudioContext::new(Box::new(MockBackend(log.clone()))), log)
    }

    fn buffer() -> Arc<AudioBuffer> {
        Arc::new(AudioBuffer::from_channels(8000, vec![vec![0.1; 16], vec![0.1; 16]]).unwrap())
    }

    #[test]
    fn test_context_starts_suspended() {
        let (ctx, log) = context();
        assert_eq!(ctx.state(), ContextState::Suspended);
        assert_eq!(ctx.sample_rate(), 8000);
        assert_eq!(log.borrow().resumes, 0);
    }

    #[test]
    fn test_play_buffer_resumes_once() {
        let (mut ctx, log) = context();
        let _a = ctx.play_buffer(buffer(), 0.5).unwrap();
        let _b = ctx.play_buffer(buffer(), 0.6).unwrap();
        assert_eq!(ctx.state(), ContextState::Running);
        assert_eq!(log.borrow().resumes, 1);
        assert_eq!(log.borrow().gains, vec![0.5, 0.6]);
    }

    #[test]
    fn test_denied_resume_stays_suspended() {
        let (mut ctx, log) = context();
        log.borrow_mut().deny_resume = true;
        assert!(ctx.play_buffer(buffer(), 0.5).is_err());
        assert_eq!(ctx.state(), ContextState::Suspended);
        assert!(log.borrow().gains.is_empty());
    }

    #[test]
    fn test_suspend_and_resume_transitions() {
        let (mut ctx, log) = context();
        ctx.suspend().unwrap();
        assert_eq!(log.borrow().suspends, 0);
        ctx.resume().unwrap();
        ctx.suspend().unwrap();
        assert_eq!(ctx.state(), ContextState::Suspended);
        assert_eq!(log.borrow().suspends, 1);
    }

    #[test]
    fn test_closed_context_rejects_playback() {
        let (mut ctx, log) = context();
        ctx.resume().unwrap();
        ctx.close();
        assert_eq!(ctx.state(), ContextState::Closed);
        assert_eq!(log.borrow().suspends, 1);
        assert!(matches!(ctx.resume(), Err(AmbienceError::ContextClosed)));
        assert!(matches!(
            ctx.play_buffer(buffer(), 0.5),
            Err(AmbienceError::ContextClosed)
        ));
    }

    #[test]
    fn test_suspend_and_close_reach_backend_with_live_voice() {
        let (mut ctx, log) = context();
        let handle = ctx.play_buffer(buffer(), 0.5).unwrap();
        ctx.suspend().unwrap();
        assert_eq!(log.borrow().suspends, 1);
        ctx.resume().unwrap();
        ctx.close();
        assert_eq!(log.borrow().suspends, 2);
        assert_eq!(ctx.state(), ContextState::Closed);
        drop(handle);
    }
}
