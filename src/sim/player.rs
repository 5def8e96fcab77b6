//! Zach: jump physics, lives and post-hit recovery

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::Body;
use super::tick::TickInput;
use crate::tuning::Tuning;

/// Post-hit recovery. Takes precedence over normal physics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Recovery {
    /// Normal physics
    #[default]
    Free,
    /// Pinned to the ground; collisions are not processed
    GroundLocked { ticks_left: u32 },
    /// One tick pinned to the ground after the lock runs out
    Grace,
}

/// Combined status for presentation and queries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerStatus {
    Normal,
    Invincible,
    GroundLocked,
    RecoveryGrace,
}

/// Result of taking a hit
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifeLoss {
    Survived,
    Fatal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub body: Body,
    pub lives: u8,
    pub on_ground: bool,
    /// Kills since the player last touched the ground
    pub consecutive_kills: u32,
    pub invincible_ticks: u32,
    pub recovery: Recovery,
}

impl Player {
    /// Spawn on the ground at the start position
    pub fn new(tuning: &Tuning, lives: u8) -> Self {
        let lives = lives.clamp(1, tuning.max_lives);
        Self {
            body: Body::on_ground(
                tuning.player_start_x,
                tuning.ground_y(),
                Self::size_for(tuning, lives),
            ),
            lives,
            on_ground: true,
            consecutive_kills: 0,
            invincible_ticks: 0,
            recovery: Recovery::Free,
        }
    }

    fn size_for(tuning: &Tuning, lives: u8) -> Vec2 {
        Vec2::new(tuning.player_width, f32::from(lives) * tuning.life_block_height)
    }

    /// Visual size tier (one block per life)
    pub fn size_tier(&self) -> u8 {
        self.lives
    }

    pub fn is_invincible(&self) -> bool {
        self.invincible_ticks > 0
    }

    pub fn is_ground_locked(&self) -> bool {
        matches!(self.recovery, Recovery::GroundLocked { .. })
    }

    pub fn ground_lock_ticks(&self) -> u32 {
        match self.recovery {
            Recovery::GroundLocked { ticks_left } => ticks_left,
            _ => 0,
        }
    }

    pub fn is_falling(&self) -> bool {
        self.body.vel.y > 0.0
    }

    pub fn status(&self) -> PlayerStatus {
        match self.recovery {
            Recovery::GroundLocked { .. } => PlayerStatus::GroundLocked,
            Recovery::Grace => PlayerStatus::RecoveryGrace,
            Recovery::Free if self.is_invincible() => PlayerStatus::Invincible,
            Recovery::Free => PlayerStatus::Normal,
        }
    }

    /// Advance one tick
    pub fn update(&mut self, input: &TickInput, tuning: &Tuning) {
        self.invincible_ticks = self.invincible_ticks.saturating_sub(1);

        match self.recovery {
            Recovery::GroundLocked { ticks_left } => {
                self.recovery = if ticks_left > 1 {
                    Recovery::GroundLocked {
                        ticks_left: ticks_left - 1,
                    }
                } else {
                    Recovery::Grace
                };
                self.pin_to_ground(tuning);
                self.walk(input, tuning);
                return;
            }
            Recovery::Grace => {
                self.recovery = Recovery::Free;
                self.pin_to_ground(tuning);
                return;
            }
            Recovery::Free => {}
        }

        self.walk(input, tuning);

        if input.jump && self.on_ground {
            self.body.vel.y = tuning.jump_velocity;
            self.on_ground = false;
        }

        self.body.vel.y += tuning.gravity;
        self.body.pos.y += self.body.vel.y;

        let ground = tuning.ground_y();
        if self.body.bottom() >= ground {
            self.body.set_bottom(ground);
            self.body.vel.y = 0.0;
            self.land();
        }
    }

    fn walk(&mut self, input: &TickInput, tuning: &Tuning) {
        if input.left {
            self.body.pos.x -= tuning.player_speed;
        }
        if input.right {
            self.body.pos.x += tuning.player_speed;
        }
        self.body.clamp_x(tuning.screen_width);
    }

    /// Touching down from the air ends the combo
    fn land(&mut self) {
        if !self.on_ground {
            self.consecutive_kills = 0;
        }
        self.on_ground = true;
    }

    fn pin_to_ground(&mut self, tuning: &Tuning) {
        self.body.set_bottom(tuning.ground_y());
        self.body.vel.y = 0.0;
        self.land();
    }

    /// Take a hit. At one life the hit is fatal and nothing changes.
    pub fn lose_life(&mut self, tuning: &Tuning) -> LifeLoss {
        if self.lives <= 1 {
            return LifeLoss::Fatal;
        }

        self.lives -= 1;
        self.body
            .resize_keep_bottom(Self::size_for(tuning, self.lives));
        self.pin_to_ground(tuning);

        let lock = tuning.ground_lock_ticks();
        self.recovery = if lock > 0 {
            Recovery::GroundLocked { ticks_left: lock }
        } else {
            Recovery::Grace
        };
        LifeLoss::Survived
    }

    /// Grow by one block, up to the maximum
    pub fn add_life(&mut self, tuning: &Tuning) {
        if self.lives < tuning.max_lives {
            self.lives += 1;
            self.body
                .resize_keep_bottom(Self::size_for(tuning, self.lives));
        }
    }

    pub fn start_invincibility(&mut self, tuning: &Tuning) {
        self.invincible_ticks = tuning.invincibility_ticks();
    }

    /// Bounce off stomped spiders; more kills, more airtime
    pub fn bounce(&mut self, kills: u32, tuning: &Tuning) {
        self.body.vel.y = tuning.bounce_velocity * kills as f32;
        self.on_ground = false;
    }
}
