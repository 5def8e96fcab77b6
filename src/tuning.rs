//! Data-driven game balance
//!
//! Every rule number the simulation uses lives here. Durations are given in
//! seconds and converted to ticks at the fixed simulation rate, so all timers
//! share one time base.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::secs_to_ticks;

/// Errors raised while loading a tuning file
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to read tuning file: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed tuning JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid tuning value: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Playfield ===
    pub screen_width: f32,
    pub screen_height: f32,
    /// Height of the ground strip at the bottom of the screen
    pub ground_height: f32,

    // === Player ===
    pub player_width: f32,
    /// Height of one life block; the player is `lives` blocks tall
    pub life_block_height: f32,
    pub player_start_x: f32,
    /// Horizontal displacement per tick while a direction is held
    pub player_speed: f32,
    pub gravity: f32,
    /// Vertical velocity applied on jump (negative is up)
    pub jump_velocity: f32,
    /// Vertical velocity per spider killed in one stomp
    pub bounce_velocity: f32,
    pub start_lives: u8,
    pub max_lives: u8,
    pub invincibility_secs: f32,
    pub ground_lock_secs: f32,

    // === Spiders ===
    pub spider_width: f32,
    pub spider_height: f32,
    pub spiders_per_level: u32,
    /// Whole-pixel base speed range, drawn as an integer
    pub spider_speed_min: u32,
    pub spider_speed_max: u32,
    /// Added to spider speed for every level past the first
    pub spider_speed_per_level: f32,
    /// Spawn x is sampled within this distance of either screen edge
    pub spawn_margin: f32,
    pub spawn_min_separation: f32,
    pub spawn_attempts: u32,

    // === Scoring ===
    /// How far below a spider's centre the player's feet may be and still stomp
    pub stomp_tolerance: f32,
    pub base_points: u64,
    /// Combo bonus per kill already in the streak, in percent
    pub combo_bonus_percent: u64,
    /// A single kill event worth at least this many points triggers the bonus cue
    pub big_multikill_points: u64,
    /// Reset the combo after this long without a kill (disabled when `None`)
    pub combo_timeout_secs: Option<f32>,
    pub popup_secs: f32,
    /// Vertical popup drift per tick (negative is up)
    pub popup_drift: f32,

    // === Levels ===
    pub kills_per_level: u32,
    pub max_level: u32,
    pub transition_secs: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            screen_width: 800.0,
            screen_height: 600.0,
            ground_height: 60.0,

            player_width: 30.0,
            life_block_height: 20.0,
            player_start_x: 100.0,
            player_speed: 5.0,
            gravity: 0.8,
            jump_velocity: -18.0,
            bounce_velocity: -9.0,
            start_lives: 2,
            max_lives: 3,
            invincibility_secs: 3.0,
            ground_lock_secs: 0.25,

            spider_width: 25.0,
            spider_height: 20.0,
            spiders_per_level: 10,
            spider_speed_min: 1,
            spider_speed_max: 3,
            spider_speed_per_level: 0.5,
            spawn_margin: 50.0,
            spawn_min_separation: 50.0,
            spawn_attempts: 20,

            stomp_tolerance: 10.0,
            base_points: 100,
            combo_bonus_percent: 10,
            big_multikill_points: 300,
            combo_timeout_secs: None,
            popup_secs: 0.5,
            popup_drift: -1.0,

            kills_per_level: 10,
            max_level: 10,
            transition_secs: 1.5,
        }
    }
}

impl Tuning {
    /// Parse tuning from JSON; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load and validate a tuning file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), TuningError> {
        let invalid = |msg: &str| Err(TuningError::Invalid(msg.to_string()));

        if self.start_lives == 0 || self.start_lives > self.max_lives {
            return invalid("start_lives must be in 1..=max_lives");
        }
        if self.max_level == 0 {
            return invalid("max_level must be at least 1");
        }
        if self.kills_per_level == 0 || self.kills_per_level > self.spiders_per_level {
            return invalid("kills_per_level must be in 1..=spiders_per_level");
        }
        if self.spider_speed_min > self.spider_speed_max {
            return invalid("spider speed range is empty");
        }
        if self.spawn_margin * 2.0 + self.spider_width > self.screen_width {
            return invalid("spawn margins leave no room for spiders");
        }
        if self.player_width >= self.screen_width {
            return invalid("player is wider than the screen");
        }
        if self.ground_y() <= f32::from(self.max_lives) * self.life_block_height {
            return invalid("ground line leaves no headroom for the player");
        }
        Ok(())
    }

    /// Y coordinate of the ground line (top of the ground strip)
    #[inline]
    pub fn ground_y(&self) -> f32 {
        self.screen_height - self.ground_height
    }

    pub fn invincibility_ticks(&self) -> u32 {
        secs_to_ticks(self.invincibility_secs)
    }

    pub fn ground_lock_ticks(&self) -> u32 {
        secs_to_ticks(self.ground_lock_secs)
    }

    pub fn transition_ticks(&self) -> u32 {
        secs_to_ticks(self.transition_secs)
    }

    pub fn popup_ticks(&self) -> u32 {
        secs_to_ticks(self.popup_secs)
    }

    pub fn combo_timeout_ticks(&self) -> Option<u32> {
        self.combo_timeout_secs.map(secs_to_ticks)
    }
}
