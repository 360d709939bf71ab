//! Collision detection
//!
//! Everything that can touch the player ball (coins, enemies) is a circle,
//! so the only geometry the game needs is a circle overlap test.

use glam::Vec2;

/// Check whether two circles overlap
///
/// Compares squared center distance against the squared radius sum, so no
/// square root is taken. Exact touching (distance equal to the radius sum)
/// counts as a hit.
#[inline]
pub fn circles_overlap(a_pos: Vec2, a_radius: f32, b_pos: Vec2, b_radius: f32) -> bool {
    let reach = a_radius + b_radius;
    a_pos.distance_squared(b_pos) <= reach * reach
}
