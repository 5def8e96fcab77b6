//! Spiders: ground patrol and level spawning

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::entity::Body;
use crate::tuning::Tuning;

/// Patrol direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    #[inline]
    pub fn sign(self) -> f32 {
        match self {
            Direction::Left => -1.0,
            Direction::Right => 1.0,
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Spider {
    pub id: u32,
    pub body: Body,
    /// Pixels per tick, fixed at spawn
    pub speed: f32,
    pub direction: Direction,
}

impl Spider {
    /// A spider standing on the ground with its left edge at `x`
    pub fn new(id: u32, x: f32, speed: f32, direction: Direction, tuning: &Tuning) -> Self {
        Self {
            id,
            body: Body::on_ground(
                x,
                tuning.ground_y(),
                Vec2::new(tuning.spider_width, tuning.spider_height),
            ),
            speed,
            direction,
        }
    }

    /// Walk one tick, turning around at the screen edges
    pub fn update(&mut self, screen_width: f32) {
        self.body.pos.x += self.speed * self.direction.sign();

        if self.body.left() <= 0.0 {
            self.body.set_left(0.0);
            self.direction = self.direction.flipped();
        } else if self.body.right() >= screen_width {
            self.body.set_right(screen_width);
            self.direction = self.direction.flipped();
        }
    }
}

/// Speed for a spider spawned on `level`: an integer base plus the level bonus
pub fn sample_speed<R: Rng>(rng: &mut R, level: u32, tuning: &Tuning) -> f32 {
    let base = rng.random_range(tuning.spider_speed_min..=tuning.spider_speed_max);
    base as f32 + level.saturating_sub(1) as f32 * tuning.spider_speed_per_level
}

/// Pick spawn x positions spread across the floor.
///
/// Candidates too close to an already placed spider are rejected; once the
/// attempts run out the last candidate is taken anyway.
pub fn place_spiders<R: Rng>(rng: &mut R, count: u32, tuning: &Tuning) -> Vec<f32> {
    let lo = tuning.spawn_margin;
    let hi = (tuning.screen_width - tuning.spawn_margin).max(lo);
    let attempts = tuning.spawn_attempts.max(1);

    let mut placed: Vec<f32> = Vec::with_capacity(count as usize);
    for _ in 0..count {
        let mut x = rng.random_range(lo..=hi);
        for _ in 1..attempts {
            let crowded = placed
                .iter()
                .any(|&other| (x - other).abs() < tuning.spawn_min_separation);
            if !crowded {
                break;
            }
            x = rng.random_range(lo..=hi);
        }
        placed.push(x);
    }
    placed
}

/// Build the spider set for a level; ids start at `first_id`
pub fn spawn_level<R: Rng>(
    rng: &mut R,
    level: u32,
    first_id: u32,
    tuning: &Tuning,
) -> Vec<Spider> {
    place_spiders(rng, tuning.spiders_per_level, tuning)
        .into_iter()
        .zip(first_id..)
        .map(|(x, id)| {
            let speed = sample_speed(rng, level, tuning);
            let direction = if rng.random_bool(0.5) {
                Direction::Right
            } else {
                Direction::Left
            };
            Spider::new(id, x, speed, direction, tuning)
        })
        .collect()
}
