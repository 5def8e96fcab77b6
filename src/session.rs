//! Fixed-timestep session driver
//!
//! Owns the game state together with its RNG, high score store and audio
//! backend. Front ends feed it frame deltas and input; it runs whole ticks.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::audio::AudioDispatcher;
use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS, SIM_DT};
use crate::highscores::HighScoreTracker;
use crate::persistence::ScoreStore;
use crate::settings::Settings;
use crate::sim::{GameState, Snapshot, TickInput, tick};
use crate::tuning::Tuning;

pub struct Session {
    state: GameState,
    rng: Pcg32,
    high_scores: HighScoreTracker,
    audio: AudioDispatcher,
    accumulator: f32,
}

impl Session {
    /// Start a run at level 1 with the stored high score.
    ///
    /// Tuning that fails validation is replaced by the defaults.
    pub fn new(tuning: Tuning, seed: u64, store: Box<dyn ScoreStore>, audio: AudioDispatcher) -> Self {
        let tuning = match tuning.validate() {
            Ok(()) => tuning,
            Err(e) => {
                log::error!("Rejected tuning: {} - using defaults", e);
                Tuning::default()
            }
        };
        let high_scores = HighScoreTracker::load(store);
        let mut rng = Pcg32::seed_from_u64(seed);
        let state = GameState::new(tuning, high_scores.best(), &mut rng);
        log::info!(
            "Session started (seed {}, high score {})",
            seed,
            high_scores.best()
        );

        let mut session = Self {
            state,
            rng,
            high_scores,
            audio,
            accumulator: 0.0,
        };
        session.flush_cues();
        session
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn high_score(&self) -> u64 {
        self.high_scores.best()
    }

    pub fn audio_mut(&mut self) -> &mut AudioDispatcher {
        &mut self.audio
    }

    /// Run exactly one simulation tick
    pub fn step(&mut self, input: &TickInput) {
        tick(&mut self.state, input, &mut self.rng);
        self.flush_cues();
        if self.high_scores.submit(self.state.high_score) {
            log::info!("New high score: {}", self.state.high_score);
        }
    }

    /// Accumulate a frame delta and run as many ticks as it covers.
    ///
    /// One-shot inputs (`restart`) are cleared after the first tick consumes
    /// them. Returns the number of ticks run.
    pub fn advance(&mut self, frame_dt: f32, input: &mut TickInput) -> u32 {
        self.accumulator += frame_dt.clamp(0.0, MAX_FRAME_DT);

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            self.step(input);
            self.accumulator -= SIM_DT;
            substeps += 1;

            // Clear one-shot inputs after processing
            input.restart = false;
        }
        substeps
    }

    /// Snapshot for the presentation layer
    pub fn snapshot(&self, blink: bool) -> Snapshot {
        Snapshot::capture(&self.state, blink)
    }

    /// Snapshot with the player's visual preferences applied
    pub fn snapshot_for(&self, settings: &Settings) -> Snapshot {
        let mut snapshot = self.snapshot(settings.effective_blink());
        if !settings.popups {
            snapshot.popups.clear();
        }
        snapshot
    }

    fn flush_cues(&mut self) {
        let cues = self.state.drain_cues();
        self.audio.dispatch_all(cues);
    }
}
