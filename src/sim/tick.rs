//! Fixed timestep simulation tick
//!
//! Core game loop that advances the session deterministically.

use glam::Vec2;
use rand::Rng;

use super::autopilot;
use super::collision::{Contact, classify_contacts};
use super::player::LifeLoss;
use super::scoring::score_kills;
use super::state::{GamePhase, GameState, Popup, decay_popups};
use crate::audio::AudioCue;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
    /// Start a new run (only honoured after game over)
    pub restart: bool,
    /// Idle/demo mode - AI plays the game
    pub idle_mode: bool,
}

/// Advance the game state by one fixed timestep
pub fn tick<R: Rng>(state: &mut GameState, input: &TickInput, rng: &mut R) {
    state.time_ticks += 1;

    let driven;
    let input = if input.idle_mode {
        driven = autopilot::drive(state, input);
        &driven
    } else {
        input
    };

    match state.phase {
        GamePhase::GameOver { .. } => {
            if input.restart {
                log::info!("Restarting run");
                state.restart(rng);
            }
        }

        GamePhase::LevelTransition { ticks_left } => {
            let ticks_left = ticks_left.saturating_sub(1);
            if ticks_left == 0 {
                state.phase = GamePhase::Playing;
                state.setup_level(rng);
            } else {
                state.phase = GamePhase::LevelTransition { ticks_left };
            }
        }

        GamePhase::Playing => {
            let width = state.tuning.screen_width;
            for spider in &mut state.spiders {
                spider.update(width);
            }
            if let Some(player) = state.player.as_mut() {
                player.update(input, &state.tuning);
            }

            update_combo_timer(state);
            decay_popups(&mut state.popups);
            resolve_contacts(state);
        }
    }
}

/// Optional time-based combo reset
fn update_combo_timer(state: &mut GameState) {
    if state.tuning.combo_timeout_ticks().is_none() || state.combo_timer_ticks == 0 {
        return;
    }
    state.combo_timer_ticks -= 1;
    if state.combo_timer_ticks == 0 {
        if let Some(player) = state.player.as_mut() {
            player.consecutive_kills = 0;
        }
    }
}

/// Check the player against every spider and apply the outcome
fn resolve_contacts(state: &mut GameState) {
    let Some(player) = state.player.as_ref() else {
        return;
    };
    // Post-hit recovery window
    if player.is_ground_locked() {
        return;
    }

    match classify_contacts(player, &state.spiders, state.tuning.stomp_tolerance) {
        Contact::None => {}
        Contact::Damage => apply_damage(state),
        Contact::Stomp(ids) => apply_stomp(state, &ids),
    }
}

fn apply_damage(state: &mut GameState) {
    let outcome = {
        let Some(player) = state.player.as_mut() else {
            return;
        };
        if player.is_invincible() {
            return;
        }
        state.cues.push(AudioCue::HitDamage);

        let outcome = player.lose_life(&state.tuning);
        if outcome == LifeLoss::Survived {
            player.start_invincibility(&state.tuning);
            log::debug!("Hit! {} lives left", player.lives);
        }
        outcome
    };

    if outcome == LifeLoss::Fatal {
        state.player = None;
        state.cues.push(AudioCue::Death);
        state.finish(false);
    }
}

fn apply_stomp(state: &mut GameState, ids: &[u32]) {
    let Some(player) = state.player.as_mut() else {
        return;
    };
    let kills = ids.len() as u32;

    let centers: Vec<Vec2> = state
        .spiders
        .iter()
        .filter(|s| ids.contains(&s.id))
        .map(|s| s.body.center())
        .collect();
    let popup_pos = centers.iter().copied().sum::<Vec2>() / centers.len().max(1) as f32;
    state.spiders.retain(|s| !ids.contains(&s.id));
    state.spiders_defeated_this_level += kills;
    state.total_spiders_defeated += kills;

    // Multiplier uses the streak from before this kill event
    let award = score_kills(kills, player.consecutive_kills, &state.tuning);
    player.consecutive_kills += kills;
    player.bounce(kills, &state.tuning);
    let streak = player.consecutive_kills;

    state.score += award.total;
    state.best_combo = state.best_combo.max(streak);
    state.record_high_score();
    if let Some(timeout) = state.tuning.combo_timeout_ticks() {
        state.combo_timer_ticks = timeout;
    }

    if award.bonus > 0 {
        state
            .popups
            .push(Popup::bonus(award.bonus, popup_pos, &state.tuning));
    }
    state.cues.push(AudioCue::Kill {
        count: kills,
        streak,
    });
    if award.total >= state.tuning.big_multikill_points {
        state.cues.push(AudioCue::BigMultikill);
    }
    log::debug!(
        "Stomped {} (streak {}): +{} points, score {}",
        kills,
        streak,
        award.total,
        state.score
    );

    check_level_complete(state);
}

fn check_level_complete(state: &mut GameState) {
    if state.spiders_defeated_this_level < state.tuning.kills_per_level {
        return;
    }

    if state.level >= state.tuning.max_level {
        state.finish(true);
    } else {
        if let Some(player) = state.player.as_mut() {
            player.add_life(&state.tuning);
        }
        state.begin_transition();
    }
}
