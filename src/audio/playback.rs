//! Caller-owned handle to one playing buffer.

use tracing::debug;

use super::backend::Voice;

/// Handle returned when a buffer starts playing
///
/// Finishes on its own when the buffer runs out; the voice releases its
/// output the first time the handle sees it finished. Stopping is best
/// effort and idempotent, and dropping the handle stops the voice.
pub struct PlaybackHandle {
    voice: Box<dyn Voice>,
    stopped: bool,
}

impl PlaybackHandle {
    /// Wrap a voice that has already been started
    pub(crate) fn new(voice: Box<dyn Voice>) -> Self {
        Self {
            voice,
            stopped: false,
        }
    }

    pub fn stop(&mut self) {
        if !self.stopped {
            self.voice.stop();
            self.stopped = true;
            debug!("Playback stopped");
        }
    }

    pub fn is_finished(&self) -> bool {
        self.stopped || self.voice.is_finished()
    }
}

impl Drop for PlaybackHandle {
    fn drop(&mut self) {
        self.stop();
    }
}

impl std::fmt::Debug for PlaybackHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlaybackHandle")
            .field("stopped", &self.stopped)
            .field("finished", &self.is_finished())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Result;
    use std::cell::Cell;
    use std::rc::Rc;

    /// Counts stops; finishes when `done` is set from outside
    struct CountingVoice {
        stops: Rc<Cell<usize>>,
        done: Rc<Cell<bool>>,
    }

    impl Voice for CountingVoice {
        fn start(&mut self) -> Result<()> {
            Ok(())
        }

        fn stop(&mut self) {
            self.stops.set(self.stops.get() + 1);
        }

        fn is_finished(&self) -> bool {
            self.done.get()
        }
    }

    fn handle() -> (PlaybackHandle, Rc<Cell<usize>>, Rc<Cell<bool>>) {
        let stops = Rc::new(Cell::new(0));
        let done = Rc::new(Cell::new(false));
        let voice = CountingVoice {
            stops: Rc::clone(&stops),
            done: Rc::clone(&done),
        };
        (PlaybackHandle::new(Box::new(voice)), stops, done)
    }

    #[test]
    fn test_natural_end_is_reported() {
        let (handle, stops, done) = handle();
        assert!(!handle.is_finished());
        done.set(true);
        assert!(handle.is_finished());
        assert_eq!(stops.get(), 0);
    }

    #[test]
    fn test_stop_reaches_voice_once() {
        let (mut handle, stops, _) = handle();
        handle.stop();
        handle.stop();
        drop(handle);
        assert_eq!(stops.get(), 1);
    }

    #[test]
    fn test_drop_stops_voice() {
        let (handle, stops, _) = handle();
        drop(handle);
        assert_eq!(stops.get(), 1);
    }
}
