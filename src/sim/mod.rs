//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Injected, seeded RNG only
//! - Stable iteration order (spiders by entity ID)
//! - No rendering, audio or storage dependencies (cues are queued, not played)

pub mod autopilot;
pub mod collision;
pub mod entity;
pub mod player;
pub mod scoring;
pub mod spider;
pub mod state;
pub mod tick;
pub mod view;

pub use collision::{Contact, classify_contacts};
pub use entity::Body;
pub use player::{LifeLoss, Player, PlayerStatus, Recovery};
pub use scoring::{KillAward, combo_multiplier, multikill_multiplier, score_kills};
pub use spider::{Direction, Spider};
pub use state::{GamePhase, GameState, Popup};
pub use tick::{TickInput, tick};
pub use view::{Overlay, Snapshot};
