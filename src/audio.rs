//! Audio cues and dispatch
//!
//! The simulation only queues cues; a `CueSink` decides how (or whether) they
//! become sound. The sink never reports back, so playback failures cannot
//! affect gameplay.

use serde::{Deserialize, Serialize};

/// Sound cue emitted by the simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AudioCue {
    /// Player spawned with spawn protection
    SpawnInvincible,
    /// Player took a hit (played even when the hit is fatal)
    HitDamage,
    /// Player died
    Death,
    /// Spiders stomped; `streak` is the combo after this kill event
    Kill { count: u32, streak: u32 },
    /// A single kill event scored big
    BigMultikill,
    /// Level is about to start
    LevelStart(u32),
    /// Final level cleared
    Win,
}

/// What a backend should play for a cue
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Sound {
    /// Pre-recorded sample under the `sound/` directory
    Sample(String),
    /// Short synthesized beep (440 Hz scaled by `pitch`)
    Tone { pitch: f32 },
}

impl AudioCue {
    /// Map a cue to the sound the original asset set uses for it
    pub fn sound(&self) -> Option<Sound> {
        let sample = |name: &str| Some(Sound::Sample(name.to_string()));
        match *self {
            AudioCue::SpawnInvincible => None,
            AudioCue::HitDamage => sample("ouch.mp3"),
            AudioCue::Death => sample("gameover.mp3"),
            AudioCue::Kill { count: 2, .. } => sample("doublekill.mp3"),
            AudioCue::Kill { count: 3, .. } => sample("triplekills.mp3"),
            AudioCue::Kill { count, .. } if count >= 4 => sample("monsterkill.mp3"),
            AudioCue::Kill { streak, .. } => Some(Sound::Tone {
                pitch: 1.0 + streak.saturating_sub(1) as f32 * 0.2,
            }),
            AudioCue::BigMultikill => Some(Sound::Tone { pitch: 1.5 }),
            AudioCue::LevelStart(level) => Some(Sound::Sample(format!("level{level}.mp3"))),
            AudioCue::Win => sample("youwin.mp3"),
        }
    }
}

/// Playback backend
pub trait CueSink {
    /// Play `sound` for `cue` at `volume` (0.0 - 1.0)
    fn play(&mut self, cue: AudioCue, sound: &Sound, volume: f32);
}

/// Sink that only logs cues; used by the headless runner
#[derive(Debug, Default)]
pub struct LogSink;

impl CueSink for LogSink {
    fn play(&mut self, cue: AudioCue, sound: &Sound, volume: f32) {
        log::debug!("cue {:?} -> {:?} @ {:.2}", cue, sound, volume);
    }
}

/// Routes cues to a sink with volume and mute applied
pub struct AudioDispatcher {
    sink: Box<dyn CueSink>,
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
}

impl Default for AudioDispatcher {
    fn default() -> Self {
        Self::new(Box::new(LogSink))
    }
}

impl AudioDispatcher {
    pub fn new(sink: Box<dyn CueSink>) -> Self {
        Self {
            sink,
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }

    /// Build a dispatcher honouring the player's settings
    pub fn with_settings(sink: Box<dyn CueSink>, settings: &crate::Settings) -> Self {
        let mut audio = Self::new(sink);
        audio.set_master_volume(settings.master_volume);
        audio.set_sfx_volume(settings.sfx_volume);
        audio.set_muted(settings.muted);
        audio
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Play one cue
    pub fn dispatch(&mut self, cue: AudioCue) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }
        if let Some(sound) = cue.sound() {
            self.sink.play(cue, &sound, vol);
        }
    }

    /// Play every queued cue in order
    pub fn dispatch_all(&mut self, cues: impl IntoIterator<Item = AudioCue>) {
        for cue in cues {
            self.dispatch(cue);
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Sink that records what it was asked to play
    #[derive(Clone, Default)]
    pub(crate) struct RecordingSink {
        pub played: Rc<RefCell<Vec<(AudioCue, Sound, f32)>>>,
    }

    impl CueSink for RecordingSink {
        fn play(&mut self, cue: AudioCue, sound: &Sound, volume: f32) {
            self.played.borrow_mut().push((cue, sound.clone(), volume));
        }
    }

    #[test]
    fn test_kill_sounds() {
        let sound = |count, streak| AudioCue::Kill { count, streak }.sound();
        assert_eq!(sound(2, 2), Some(Sound::Sample("doublekill.mp3".into())));
        assert_eq!(sound(3, 5), Some(Sound::Sample("triplekills.mp3".into())));
        assert_eq!(sound(6, 6), Some(Sound::Sample("monsterkill.mp3".into())));
        assert_eq!(sound(1, 1), Some(Sound::Tone { pitch: 1.0 }));
        match sound(1, 3) {
            Some(Sound::Tone { pitch }) => assert!((pitch - 1.4).abs() < 1e-5),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_level_sample_name() {
        assert_eq!(
            AudioCue::LevelStart(7).sound(),
            Some(Sound::Sample("level7.mp3".into()))
        );
        assert_eq!(AudioCue::SpawnInvincible.sound(), None);
    }

    #[test]
    fn test_dispatch_applies_volume() {
        let sink = RecordingSink::default();
        let played = sink.played.clone();
        let mut audio = AudioDispatcher::new(Box::new(sink));
        audio.set_master_volume(0.5);
        audio.set_sfx_volume(0.5);
        audio.dispatch_all([AudioCue::HitDamage, AudioCue::SpawnInvincible]);

        let played = played.borrow();
        assert_eq!(played.len(), 1);
        assert_eq!(played[0].0, AudioCue::HitDamage);
        assert!((played[0].2 - 0.25).abs() < 1e-6);
    }

    #[test]
    fn test_muted_plays_nothing() {
        let sink = RecordingSink::default();
        let played = sink.played.clone();
        let mut audio = AudioDispatcher::new(Box::new(sink));
        audio.set_muted(true);
        audio.dispatch(AudioCue::Win);
        assert!(played.borrow().is_empty());
    }
}
