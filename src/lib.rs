//! Skydrift - a flappy-style distance runner
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, spawning, collisions, session state)
//! - `render`: Canvas-2D draw step (wasm only)
//! - `api`: Score submission and leaderboard client
//! - `score`: Best-distance record in browser storage

pub mod api;
pub mod score;
pub mod sim;

#[cfg(target_arch = "wasm32")]
pub mod render;

pub use score::BestDistance;
pub use sim::{GameMode, World};

/// Game configuration constants
pub mod consts {
    /// Largest step fed to the integrator; frame hitches clamp to this
    pub const MAX_FRAME_DT: f32 = 0.033;

    /// Downward acceleration on the ball (units/s²)
    pub const GRAVITY: f32 = 1800.0;
    /// Flap strength: vertical velocity is set to -FLAP_SPEED, not added to
    pub const FLAP_SPEED: f32 = 520.0;
    /// Player ball radius
    pub const BALL_RADIUS: f32 = 14.0;
    /// Where a run seats the ball: fraction of the surface, with a left floor
    pub const BALL_HOME_X_FRACTION: f32 = 0.25;
    pub const BALL_HOME_MIN_X: f32 = 120.0;
    pub const BALL_HOME_Y_FRACTION: f32 = 0.4;

    /// Distance gained per second of play
    pub const DISTANCE_RATE: f32 = 10.0;
    /// Distance over which difficulty climbs one full step
    pub const DIFFICULTY_RAMP: f32 = 250.0;
    /// Cap on the difficulty bonus (difficulty tops out at 1 + this)
    pub const DIFFICULTY_BONUS_CAP: f32 = 1.6;

    /// Coin defaults - scroll speed scales with difficulty
    pub const COIN_SCROLL_SPEED: f32 = 260.0;
    pub const COIN_RADIUS: f32 = 10.0;
    pub const COIN_WOBBLE_RATE: f32 = 6.0;
    pub const COIN_WOBBLE_AMPLITUDE: f32 = 1.3;

    /// Enemy defaults - radius and speed get a random spread on spawn
    pub const ENEMY_MIN_RADIUS: f32 = 14.0;
    pub const ENEMY_RADIUS_SPREAD: f32 = 10.0;
    pub const ENEMY_MIN_SPEED: f32 = 240.0;
    pub const ENEMY_SPEED_SPREAD: f32 = 160.0;
    pub const ENEMY_WOBBLE_RATE: f32 = 5.0;
    pub const ENEMY_WOBBLE_AMPLITUDE: f32 = 2.0;

    /// Spawn cadence (seconds, divided by difficulty when a timer rearms)
    pub const COIN_INTERVAL_BASE: f32 = 1.1;
    pub const COIN_INTERVAL_SPREAD: f32 = 0.7;
    pub const ENEMY_INTERVAL_BASE: f32 = 1.15;
    pub const ENEMY_INTERVAL_SPREAD: f32 = 0.85;
    /// First spawns are staggered so a coin always leads
    pub const FIRST_COIN_DELAY: f32 = 0.8;
    pub const FIRST_ENEMY_DELAY: f32 = 1.2;

    /// How far entities spawn past the right edge
    pub const COIN_SPAWN_LEAD: f32 = 60.0;
    pub const ENEMY_SPAWN_LEAD: f32 = 80.0;
    /// Vertical band entities are clamped into on spawn
    pub const SPAWN_EDGE_MARGIN: f32 = 90.0;

    /// Off-screen slack before a head entity is dropped
    pub const COIN_PRUNE_MARGIN: f32 = 80.0;
    pub const ENEMY_PRUNE_MARGIN: f32 = 120.0;

    /// Player name rules shared by the session and the score service
    pub const PLAYER_NAME_MAX: usize = 24;
    pub const DEFAULT_PLAYER_NAME: &str = "Guest";
}
