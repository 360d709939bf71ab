//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Variable timestep, clamped by the caller
//! - Seeded RNG only
//! - Stable entity order (spawn order, oldest first)
//! - No rendering or platform dependencies

pub mod background;
pub mod collision;
pub mod spawn;
pub mod state;
pub mod tick;

pub use background::{Backdrop, Cloud, Star};
pub use collision::circles_overlap;
pub use spawn::Spawner;
pub use state::{
    Ball, Coin, EndReason, Enemy, GameMode, RunSummary, World, difficulty_at, home_position,
    sanitize_player_name,
};
pub use tick::update;
