//! Stomp scoring: combo and multikill multipliers
//!
//! Points are computed in integer arithmetic (percent and half steps) so the
//! floor of `base * consec_mult * multikill_mult` is exact.

use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

/// Points awarded for one kill event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KillAward {
    pub kills: u32,
    pub base: u64,
    pub total: u64,
    /// `total - base`; drives the floating popup
    pub bonus: u64,
}

/// Multikill multiplier in half steps: 1.0, 1.5, 2.0, then 3.0 for four or more
fn multikill_halves(kills: u32) -> u64 {
    match kills {
        0 | 1 => 2,
        2 => 3,
        3 => 4,
        _ => 6,
    }
}

/// Multiplier for killing `kills` spiders in the same tick
pub fn multikill_multiplier(kills: u32) -> f64 {
    multikill_halves(kills) as f64 / 2.0
}

/// Multiplier from the streak built before this kill event
pub fn combo_multiplier(streak_before: u32, tuning: &Tuning) -> f64 {
    1.0 + (tuning.combo_bonus_percent * u64::from(streak_before)) as f64 / 100.0
}

/// Score a kill event of `kills` spiders with `streak_before` kills already in the air
pub fn score_kills(kills: u32, streak_before: u32, tuning: &Tuning) -> KillAward {
    let base = tuning.base_points * u64::from(kills);
    let combo_percent = 100 + tuning.combo_bonus_percent * u64::from(streak_before);
    let total = base * combo_percent * multikill_halves(kills) / 200;
    KillAward {
        kills,
        base,
        total,
        bonus: total - base,
    }
}
