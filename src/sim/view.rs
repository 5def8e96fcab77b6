//! Read-only snapshot for rendering and HUD
//!
//! Built after the tick completes; the presentation layer never touches
//! `GameState` directly.

use glam::Vec2;
use serde::Serialize;

use super::player::PlayerStatus;
use super::scoring::combo_multiplier;
use super::state::{GamePhase, GameState};
use crate::ticks_to_secs;

/// Invincibility blink period in ticks (roughly 12 Hz at 60 Hz)
const BLINK_TICKS: u64 = 5;

#[derive(Debug, Clone, Serialize)]
pub struct PlayerView {
    pub pos: Vec2,
    pub size: Vec2,
    pub size_tier: u8,
    pub status: PlayerStatus,
    pub invincible: bool,
    /// False on the "off" half of the invincibility blink
    pub visible: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct SpiderView {
    pub id: u32,
    pub pos: Vec2,
    pub size: Vec2,
}

#[derive(Debug, Clone, Serialize)]
pub struct PopupView {
    pub text: String,
    pub pos: Vec2,
    /// 1.0 when fresh, fading to 0.0
    pub fade: f32,
}

#[derive(Debug, Clone, Serialize)]
pub struct Hud {
    pub score: u64,
    pub high_score: u64,
    pub level: u32,
    pub lives: u8,
    pub combo: u32,
    /// Combo multiplier for the current streak, `1 + bonus * (combo - 1)`;
    /// `None` without a streak
    pub combo_multiplier: Option<f64>,
    pub best_combo: u32,
    pub total_spiders_defeated: u32,
}

/// Which full-screen overlay to draw
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Overlay {
    None,
    LevelIntro { level: u32, remaining_secs: f32 },
    Victory { score: u64, total_spiders: u32 },
    Defeat { score: u64 },
}

#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub player: Option<PlayerView>,
    pub spiders: Vec<SpiderView>,
    pub popups: Vec<PopupView>,
    pub hud: Hud,
    pub overlay: Overlay,
}

impl Snapshot {
    /// Capture the state; `blink` enables the invincibility flicker
    pub fn capture(state: &GameState, blink: bool) -> Self {
        let blink_on = (state.time_ticks / BLINK_TICKS) % 2 == 0;

        let player = state.player.as_ref().map(|p| PlayerView {
            pos: p.body.pos,
            size: p.body.size,
            size_tier: p.size_tier(),
            status: p.status(),
            invincible: p.is_invincible(),
            visible: !(blink && p.is_invincible()) || blink_on,
        });

        let spiders = state
            .spiders
            .iter()
            .map(|s| SpiderView {
                id: s.id,
                pos: s.body.pos,
                size: s.body.size,
            })
            .collect();

        let popup_ticks = state.tuning.popup_ticks().max(1) as f32;
        let popups = state
            .popups
            .iter()
            .map(|p| PopupView {
                text: p.text.clone(),
                pos: p.pos,
                fade: (p.ttl_ticks as f32 / popup_ticks).min(1.0),
            })
            .collect();

        let combo = state.consecutive_kills();
        let hud = Hud {
            score: state.score,
            high_score: state.high_score,
            level: state.level,
            lives: state.player.as_ref().map_or(0, |p| p.lives),
            combo,
            combo_multiplier: (combo > 0).then(|| combo_multiplier(combo - 1, &state.tuning)),
            best_combo: state.best_combo,
            total_spiders_defeated: state.total_spiders_defeated,
        };

        let overlay = match state.phase {
            GamePhase::Playing => Overlay::None,
            GamePhase::LevelTransition { ticks_left } => Overlay::LevelIntro {
                level: state.level,
                remaining_secs: ticks_to_secs(ticks_left),
            },
            GamePhase::GameOver { won: true } => Overlay::Victory {
                score: state.score,
                total_spiders: state.total_spiders_defeated,
            },
            GamePhase::GameOver { won: false } => Overlay::Defeat { score: state.score },
        };

        Self {
            player,
            spiders,
            popups,
            hud,
            overlay,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::Tuning;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn state() -> GameState {
        let mut rng = Pcg32::seed_from_u64(8);
        GameState::new(Tuning::default(), 1200, &mut rng)
    }

    #[test]
    fn test_snapshot_playing() {
        let state = state();
        let snap = Snapshot::capture(&state, true);
        assert_eq!(snap.overlay, Overlay::None);
        assert_eq!(snap.spiders.len(), 10);
        assert_eq!(snap.hud.high_score, 1200);
        assert_eq!(snap.hud.lives, 2);
        assert_eq!(snap.hud.combo_multiplier, None);
        let player = snap.player.unwrap();
        assert_eq!(player.size_tier, 2);
        assert!(player.invincible);
    }

    #[test]
    fn test_blink_hides_on_odd_windows() {
        let mut state = state();
        state.time_ticks = 5;
        let snap = Snapshot::capture(&state, true);
        assert!(!snap.player.unwrap().visible);
        let snap = Snapshot::capture(&state, false);
        assert!(snap.player.unwrap().visible);
    }

    #[test]
    fn test_combo_multiplier_shown() {
        let mut state = state();
        state.player.as_mut().unwrap().consecutive_kills = 3;
        let snap = Snapshot::capture(&state, true);
        let mult = snap.hud.combo_multiplier.unwrap();
        assert!((mult - 1.2).abs() < 1e-9);

        state.player.as_mut().unwrap().consecutive_kills = 1;
        let snap = Snapshot::capture(&state, true);
        assert_eq!(snap.hud.combo_multiplier, Some(1.0));
    }

    #[test]
    fn test_overlays() {
        let mut state = state();
        state.level = 3;
        state.phase = GamePhase::LevelTransition { ticks_left: 45 };
        match Snapshot::capture(&state, true).overlay {
            Overlay::LevelIntro {
                level,
                remaining_secs,
            } => {
                assert_eq!(level, 3);
                assert!((remaining_secs - 0.75).abs() < 1e-4);
            }
            other => panic!("unexpected overlay {other:?}"),
        }

        state.total_spiders_defeated = 100;
        state.score = 5000;
        state.phase = GamePhase::GameOver { won: true };
        assert_eq!(
            Snapshot::capture(&state, true).overlay,
            Overlay::Victory {
                score: 5000,
                total_spiders: 100
            }
        );

        state.player = None;
        state.phase = GamePhase::GameOver { won: false };
        let snap = Snapshot::capture(&state, true);
        assert_eq!(snap.overlay, Overlay::Defeat { score: 5000 });
        assert!(snap.player.is_none());
        assert_eq!(snap.hud.lives, 0);
    }

    #[test]
    fn test_snapshot_serializes() {
        let json = serde_json::to_string(&Snapshot::capture(&state(), true)).unwrap();
        assert!(json.contains("\"high_score\":1200"));
    }
}
