//! Player fallback chain against a scripted output backend.

use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

use ambisynth::asset;
use ambisynth::audio::{AudioContext, ContextState, OutputBackend, Voice, VoiceGraph};
use ambisynth::params::{PlaybackConfig, SynthConfig};
use ambisynth::{AmbienceCategory, AmbienceError, AmbiencePlayer, AmbientSource, AudioBuffer};

#[derive(Default)]
struct Record {
    /// (gain, frames) per connected voice
    voices: Vec<(f32, usize)>,
    fail_start: bool,
}

struct ScriptedBackend(Rc<RefCell<Record>>);

struct ScriptedVoice {
    fail_start: bool,
    done: bool,
}

impl Voice for ScriptedVoice {
    fn start(&mut self) -> ambisynth::Result<()> {
        if self.fail_start {
            Err(AmbienceError::PlaybackFailure("device lost".to_string()))
        } else {
            Ok(())
        }
    }

    fn stop(&mut self) {
        self.done = true;
    }

    fn is_finished(&self) -> bool {
        self.done
    }
}

impl OutputBackend for ScriptedBackend {
    fn name(&self) -> String {
        "scripted".to_string()
    }

    fn sample_rate(&self) -> u32 {
        8000
    }

    fn resume(&mut self) -> ambisynth::Result<()> {
        Ok(())
    }

    fn suspend(&mut self) -> ambisynth::Result<()> {
        Ok(())
    }

    fn connect(&mut self, graph: VoiceGraph) -> ambisynth::Result<Box<dyn Voice>> {
        let mut record = self.0.borrow_mut();
        record.voices.push((graph.gain(), graph.buffer().frames()));
        Ok(Box::new(ScriptedVoice {
            fail_start: record.fail_start,
            done: false,
        }))
    }
}

fn seeded() -> SynthConfig {
    SynthConfig {
        default_duration_s: 0.25,
        seed: Some(11),
        ..SynthConfig::default()
    }
}

fn player() -> (AmbiencePlayer, Rc<RefCell<Record>>) {
    let record = Rc::new(RefCell::new(Record::default()));
    let context = AudioContext::new(Box::new(ScriptedBackend(record.clone())));
    (
        AmbiencePlayer::new(Some(context), seeded(), PlaybackConfig::default()),
        record,
    )
}

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("ambisynth-it-{}-{}", std::process::id(), name))
}

#[test]
fn test_play_uses_context_rate_and_synth_gain() {
    let (mut player, record) = player();
    let handle = player.play(AmbienceCategory::Ocean);
    assert!(handle.is_some());
    assert_eq!(record.borrow().voices, vec![(0.5, 2000)]);
    assert_eq!(player.context().unwrap().state(), ContextState::Running);
}

#[test]
fn test_no_context_means_no_sound() {
    let mut player = AmbiencePlayer::new(None, seeded(), PlaybackConfig::default());
    assert!(player.generate(AmbienceCategory::Night, 0.1).is_none());
    assert!(player.play(AmbienceCategory::Night).is_none());
    assert!(player
        .play_scene(AmbienceCategory::Night, None, None)
        .is_none());
}

#[test]
fn test_unknown_tag_generates_forest() {
    let (player, _) = player();
    let named = player.generate_named("volcano", 0.1).unwrap();
    let forest = player.generate(AmbienceCategory::Forest, 0.1).unwrap();
    assert_eq!(named, forest);
    assert_eq!(named.sample_rate(), 8000);
}

#[test]
fn test_invalid_duration_is_none() {
    let (player, _) = player();
    assert!(player.generate(AmbienceCategory::Snow, 0.0).is_none());
    assert!(player.generate(AmbienceCategory::Snow, f32::NAN).is_none());
}

#[test]
fn test_missing_files_fall_through_to_synthesis() {
    let (mut player, record) = player();
    let custom = temp_path("missing-custom.wav");
    let recorded = temp_path("missing-recorded.wav");
    let active = player
        .play_scene(AmbienceCategory::Stream, Some(&recorded), Some(&custom))
        .unwrap();
    assert_eq!(active.source, AmbientSource::Synthesized(AmbienceCategory::Stream));
    assert_eq!(record.borrow().voices.len(), 1);
    assert_eq!(record.borrow().voices[0].0, 0.5);
}

#[test]
fn test_recorded_asset_wins_over_synthesis() {
    let (mut player, record) = player();
    let path = temp_path("recorded.wav");
    let buffer = AudioBuffer::from_channels(8000, vec![vec![0.2; 400], vec![-0.2; 400]]).unwrap();
    asset::write_wav(&buffer, &path).unwrap();

    let active = player
        .play_scene(AmbienceCategory::Snow, Some(&path), None)
        .unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(active.source, AmbientSource::Recorded(path.clone()));
    assert_eq!(record.borrow().voices, vec![(0.6, 400)]);
    assert!((active.hold.as_secs_f32() - 0.05).abs() < 1e-4);
}

#[test]
fn test_custom_audio_wins_over_recorded() {
    let (mut player, record) = player();
    let custom = temp_path("custom.wav");
    let buffer = AudioBuffer::from_channels(8000, vec![vec![0.1; 80]]).unwrap();
    asset::write_wav(&buffer, &custom).unwrap();

    let active = player
        .play_scene(AmbienceCategory::Birds, Some(&temp_path("nope.wav")), Some(&custom))
        .unwrap();
    std::fs::remove_file(&custom).ok();

    assert_eq!(active.source, AmbientSource::Custom(custom.clone()));
    assert_eq!(record.borrow().voices, vec![(0.5, 80)]);
}

#[test]
fn test_failed_start_exhausts_chain() {
    let (mut player, record) = player();
    record.borrow_mut().fail_start = true;
    assert!(player
        .play_scene(AmbienceCategory::Forest, None, None)
        .is_none());
    assert!(player.play(AmbienceCategory::Forest).is_none());
}

#[test]
fn test_stop_is_idempotent() {
    let (mut player, _) = player();
    let mut active = player
        .play_scene(AmbienceCategory::Night, None, None)
        .unwrap();
    assert!(!active.handle.is_finished());
    active.stop();
    active.stop();
    assert!(active.handle.is_finished());
}
