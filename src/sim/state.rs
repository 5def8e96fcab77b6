//! Game state and core simulation types
//!
//! Everything the tick mutates lives in `GameState`. Randomness is injected
//! by the caller, so the state itself stays plain serializable data.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::player::Player;
use super::spider::{self, Spider};
use crate::audio::AudioCue;
use crate::tuning::Tuning;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Pause between levels; the next level is built when it runs out
    LevelTransition { ticks_left: u32 },
    /// Run ended; only a restart leaves this phase
    GameOver { won: bool },
}

/// Floating score text
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Popup {
    pub text: String,
    pub pos: Vec2,
    pub ttl_ticks: u32,
    /// Vertical movement per tick
    pub drift: f32,
}

impl Popup {
    pub fn bonus(points: u64, pos: Vec2, tuning: &Tuning) -> Self {
        Self {
            text: format!("+{points}"),
            pos,
            ttl_ticks: tuning.popup_ticks(),
            drift: tuning.popup_drift,
        }
    }
}

/// Age popups by one tick and drop expired ones
pub fn decay_popups(popups: &mut Vec<Popup>) {
    for popup in popups.iter_mut() {
        popup.pos.y += popup.drift;
        popup.ttl_ticks = popup.ttl_ticks.saturating_sub(1);
    }
    popups.retain(|p| p.ttl_ticks > 0);
}

/// Complete session state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub tuning: Tuning,
    /// Current level (1-based)
    pub level: u32,
    pub score: u64,
    /// Best score ever seen, including previous sessions
    pub high_score: u64,
    /// Longest kill streak this session
    pub best_combo: u32,
    pub spiders_defeated_this_level: u32,
    pub total_spiders_defeated: u32,
    pub phase: GamePhase,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// `None` once the player has died
    pub player: Option<Player>,
    /// Live spiders, ordered by id
    pub spiders: Vec<Spider>,
    /// Ticks left before an idle combo resets (only with a combo timeout)
    pub combo_timer_ticks: u32,
    #[serde(skip)]
    pub popups: Vec<Popup>,
    /// Cues raised since the last drain
    #[serde(skip)]
    pub cues: Vec<AudioCue>,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Start a session at level 1
    pub fn new<R: Rng>(tuning: Tuning, high_score: u64, rng: &mut R) -> Self {
        let mut state = Self {
            tuning,
            level: 1,
            score: 0,
            high_score,
            best_combo: 0,
            spiders_defeated_this_level: 0,
            total_spiders_defeated: 0,
            phase: GamePhase::Playing,
            time_ticks: 0,
            player: None,
            spiders: Vec::new(),
            combo_timer_ticks: 0,
            popups: Vec::new(),
            cues: Vec::new(),
            next_id: 1,
        };
        state.restart(rng);
        state
    }

    /// Discard the run and start again from level 1. The high score survives.
    pub fn restart<R: Rng>(&mut self, rng: &mut R) {
        self.level = 1;
        self.score = 0;
        self.best_combo = 0;
        self.total_spiders_defeated = 0;
        self.popups.clear();
        self.player = None;
        self.phase = GamePhase::Playing;
        self.cues.push(AudioCue::LevelStart(self.level));
        self.setup_level(rng);
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Build the entities for the current level.
    ///
    /// The player is recreated but keeps the lives carried over from the
    /// previous level (start lives on a fresh run).
    pub fn setup_level<R: Rng>(&mut self, rng: &mut R) {
        let lives = self
            .player
            .as_ref()
            .map_or(self.tuning.start_lives, |p| p.lives);
        let mut player = Player::new(&self.tuning, lives);
        player.start_invincibility(&self.tuning);
        self.player = Some(player);

        let first_id = self.next_id;
        self.spiders = spider::spawn_level(rng, self.level, first_id, &self.tuning);
        self.next_id = first_id + self.spiders.len() as u32;

        self.spiders_defeated_this_level = 0;
        self.combo_timer_ticks = 0;
        self.cues.push(AudioCue::SpawnInvincible);
        log::info!(
            "Level {} ready: {} spiders, {} lives",
            self.level,
            self.spiders.len(),
            lives
        );
    }

    /// Move on to the next level after a transition pause
    pub fn begin_transition(&mut self) {
        self.level += 1;
        self.spiders.clear();
        self.phase = GamePhase::LevelTransition {
            ticks_left: self.tuning.transition_ticks().max(1),
        };
        self.cues.push(AudioCue::LevelStart(self.level));
        log::info!("Level {} cleared, starting level {}", self.level - 1, self.level);
    }

    /// End the run
    pub fn finish(&mut self, won: bool) {
        self.record_high_score();
        self.phase = GamePhase::GameOver { won };
        if won {
            self.cues.push(AudioCue::Win);
        }
        log::info!(
            "Game over ({}): score {}, high score {}, {} spiders",
            if won { "won" } else { "lost" },
            self.score,
            self.high_score,
            self.total_spiders_defeated
        );
    }

    /// Raise the high score to the current score if it was beaten
    pub fn record_high_score(&mut self) -> bool {
        if self.score > self.high_score {
            self.high_score = self.score;
            true
        } else {
            false
        }
    }

    pub fn is_playing(&self) -> bool {
        self.phase == GamePhase::Playing
    }

    pub fn is_transition_active(&self) -> bool {
        matches!(self.phase, GamePhase::LevelTransition { .. })
    }

    pub fn is_game_over(&self) -> bool {
        matches!(self.phase, GamePhase::GameOver { .. })
    }

    pub fn won(&self) -> bool {
        matches!(self.phase, GamePhase::GameOver { won: true })
    }

    /// Current combo of the player (0 once dead)
    pub fn consecutive_kills(&self) -> u32 {
        self.player.as_ref().map_or(0, |p| p.consecutive_kills)
    }

    /// Take the cues raised since the last call
    pub fn drain_cues(&mut self) -> Vec<AudioCue> {
        std::mem::take(&mut self.cues)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_new_session() {
        let mut rng = Pcg32::seed_from_u64(1);
        let state = GameState::new(Tuning::default(), 450, &mut rng);
        assert_eq!(state.level, 1);
        assert_eq!(state.score, 0);
        assert_eq!(state.high_score, 450);
        assert!(state.is_playing());
        assert_eq!(state.spiders.len(), 10);
        let player = state.player.as_ref().unwrap();
        assert_eq!(player.lives, 2);
        assert!(player.is_invincible());
        assert_eq!(
            state.cues,
            vec![AudioCue::LevelStart(1), AudioCue::SpawnInvincible]
        );
    }

    #[test]
    fn test_spider_ids_unique_across_levels() {
        let mut rng = Pcg32::seed_from_u64(2);
        let mut state = GameState::new(Tuning::default(), 0, &mut rng);
        let first: Vec<u32> = state.spiders.iter().map(|s| s.id).collect();
        state.setup_level(&mut rng);
        let second: Vec<u32> = state.spiders.iter().map(|s| s.id).collect();
        assert!(first.iter().all(|id| !second.contains(id)));
    }

    #[test]
    fn test_setup_level_carries_lives() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut state = GameState::new(Tuning::default(), 0, &mut rng);
        let tuning = state.tuning.clone();
        state.player.as_mut().unwrap().add_life(&tuning);
        state.setup_level(&mut rng);
        assert_eq!(state.player.as_ref().unwrap().lives, 3);
    }

    #[test]
    fn test_decay_popups() {
        let tuning = Tuning::default();
        let mut popups = vec![Popup::bonus(100, Vec2::new(10.0, 50.0), &tuning)];
        assert_eq!(popups[0].text, "+100");
        decay_popups(&mut popups);
        assert_eq!(popups[0].pos.y, 49.0);
        assert_eq!(popups[0].ttl_ticks, 29);
        for _ in 0..29 {
            decay_popups(&mut popups);
        }
        assert!(popups.is_empty());
    }

    #[test]
    fn test_record_high_score_monotonic() {
        let mut rng = Pcg32::seed_from_u64(4);
        let mut state = GameState::new(Tuning::default(), 500, &mut rng);
        state.score = 300;
        assert!(!state.record_high_score());
        assert_eq!(state.high_score, 500);
        state.score = 800;
        assert!(state.record_high_score());
        assert_eq!(state.high_score, 800);
    }
}
