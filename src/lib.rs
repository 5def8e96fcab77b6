//! Zach's Spider Adventure - a 2D arcade platformer
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, scoring, level flow)
//! - `session`: Fixed-timestep driver tying the sim to storage and audio
//! - `audio`: Cue events and the dispatcher that routes them to a sound backend
//! - `persistence`: High score stores (text file on native, LocalStorage on web)
//! - `tuning`: Data-driven game balance

pub mod audio;
pub mod highscores;
pub mod persistence;
pub mod session;
pub mod settings;
pub mod sim;
pub mod tuning;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use highscores::HighScoreTracker;
pub use session::Session;
pub use settings::Settings;
pub use tuning::{Tuning, TuningError};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation rate
    pub const SIM_HZ: u32 = 60;
    /// Fixed simulation timestep
    pub const SIM_DT: f32 = 1.0 / SIM_HZ as f32;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame delta the driver will accumulate
    pub const MAX_FRAME_DT: f32 = 0.1;
}

/// Convert a duration in seconds to whole simulation ticks
#[inline]
pub fn secs_to_ticks(secs: f32) -> u32 {
    (secs.max(0.0) * consts::SIM_HZ as f32).round() as u32
}

/// Convert a tick count back to seconds
#[inline]
pub fn ticks_to_secs(ticks: u32) -> f32 {
    ticks as f32 * consts::SIM_DT
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secs_to_ticks() {
        assert_eq!(secs_to_ticks(0.25), 15);
        assert_eq!(secs_to_ticks(3.0), 180);
        assert_eq!(secs_to_ticks(1.5), 90);
        assert_eq!(secs_to_ticks(-1.0), 0);
    }

    #[test]
    fn test_ticks_to_secs() {
        assert!((ticks_to_secs(90) - 1.5).abs() < 1e-4);
    }
}
