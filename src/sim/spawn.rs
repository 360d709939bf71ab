//! Procedural coin and enemy spawning
//!
//! Two countdown timers drive spawning. Each time one fires, the entity rolls
//! its position (and for enemies, size and speed) from the session RNG, and
//! the timer rearms with a randomized interval divided by the current
//! difficulty, so the field compresses as a run goes on.

use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;

use super::state::{Coin, Enemy};
use crate::consts::{
    COIN_INTERVAL_BASE, COIN_INTERVAL_SPREAD, COIN_RADIUS, COIN_SPAWN_LEAD, ENEMY_INTERVAL_BASE,
    ENEMY_INTERVAL_SPREAD, ENEMY_MIN_RADIUS, ENEMY_MIN_SPEED, ENEMY_RADIUS_SPREAD,
    ENEMY_SPAWN_LEAD, ENEMY_SPEED_SPREAD, FIRST_COIN_DELAY, FIRST_ENEMY_DELAY, SPAWN_EDGE_MARGIN,
};

/// Countdown timers for the two entity kinds
#[derive(Debug, Clone)]
pub struct Spawner {
    pub coin_timer: f32,
    pub enemy_timer: f32,
}

impl Spawner {
    /// Timers for a fresh run, staggered so a coin leads the first enemy.
    pub fn staggered() -> Self {
        Self {
            coin_timer: FIRST_COIN_DELAY,
            enemy_timer: FIRST_ENEMY_DELAY,
        }
    }
}

/// Clamp a rolled spawn height into the playable band. The lower bound is
/// applied last so it wins on surfaces too short to hold the band.
fn clamp_spawn_y(height: f32, raw: f32) -> f32 {
    raw.min(height - SPAWN_EDGE_MARGIN).max(SPAWN_EDGE_MARGIN)
}

/// Roll a fresh coin just past the right edge.
pub fn coin<R: Rng>(width: f32, height: f32, rng: &mut R) -> Coin {
    let y = clamp_spawn_y(height, 120.0 + rng.random_range(0.0..1.0) * (height - 240.0));
    Coin {
        pos: Vec2::new(width + COIN_SPAWN_LEAD, y),
        radius: COIN_RADIUS,
        wobble: rng.random_range(0.0..TAU),
        collected: false,
    }
}

/// Roll a fresh enemy just past the right edge, with randomized size and
/// base speed.
pub fn enemy<R: Rng>(width: f32, height: f32, rng: &mut R) -> Enemy {
    let y = clamp_spawn_y(height, 100.0 + rng.random_range(0.0..1.0) * (height - 200.0));
    Enemy {
        pos: Vec2::new(width + ENEMY_SPAWN_LEAD, y),
        radius: ENEMY_MIN_RADIUS + rng.random_range(0.0..1.0) * ENEMY_RADIUS_SPREAD,
        wobble: rng.random_range(0.0..TAU),
        speed: ENEMY_MIN_SPEED + rng.random_range(0.0..1.0) * ENEMY_SPEED_SPREAD,
    }
}

/// Next coin spawn interval at the given difficulty.
pub fn coin_interval<R: Rng>(difficulty: f32, rng: &mut R) -> f32 {
    (COIN_INTERVAL_BASE + rng.random_range(0.0..1.0) * COIN_INTERVAL_SPREAD) / difficulty
}

/// Next enemy spawn interval at the given difficulty.
pub fn enemy_interval<R: Rng>(difficulty: f32, rng: &mut R) -> f32 {
    (ENEMY_INTERVAL_BASE + rng.random_range(0.0..1.0) * ENEMY_INTERVAL_SPREAD) / difficulty
}
