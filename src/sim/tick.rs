//! Per-frame simulation step
//!
//! Advances one clamped, variable timestep of play. The order inside a tick
//! is load-bearing: distance, physics, the fatal floor check, spawning,
//! entity motion and collisions, pruning, then the backdrop.

use super::collision::circles_overlap;
use super::spawn;
use super::state::{EndReason, GameMode, World, difficulty_at};
use crate::consts::*;

/// Advance the world by `dt` seconds of play.
///
/// Callers clamp `dt` to [`MAX_FRAME_DT`] so a backgrounded tab cannot feed
/// one giant step into the integrator. Outside [`GameMode::Play`] the call is
/// a no-op.
pub fn update(world: &mut World, dt: f32) {
    if world.mode != GameMode::Play {
        return;
    }

    world.distance += dt * DISTANCE_RATE;

    // Ball physics: gravity into velocity, velocity into position
    world.ball.vy += GRAVITY * dt;
    world.ball.pos.y += world.ball.vy * dt;

    // Ceiling: clamp and stop, never fatal
    if world.ball.pos.y - world.ball.radius < 0.0 {
        world.ball.pos.y = world.ball.radius;
        world.ball.vy = 0.0;
    }

    // Floor: fatal, and it wins any tie this tick. Nothing below runs.
    if world.ball.pos.y + world.ball.radius > world.height {
        world.game_over(EndReason::Fell);
        return;
    }

    let difficulty = difficulty_at(world.distance);
    let scroll_speed = COIN_SCROLL_SPEED * difficulty;

    // Rearm-and-spawn timers; intervals shrink as difficulty climbs
    world.spawner.coin_timer -= dt;
    if world.spawner.coin_timer <= 0.0 {
        let coin = spawn::coin(world.width, world.height, &mut world.rng);
        world.coins.push_back(coin);
        world.spawner.coin_timer = spawn::coin_interval(difficulty, &mut world.rng);
    }

    world.spawner.enemy_timer -= dt;
    if world.spawner.enemy_timer <= 0.0 {
        let enemy = spawn::enemy(world.width, world.height, &mut world.rng);
        world.enemies.push_back(enemy);
        world.spawner.enemy_timer = spawn::enemy_interval(difficulty, &mut world.rng);
    }

    let ball_pos = world.ball.pos;
    let ball_radius = world.ball.radius;

    // Coins: scroll, wobble, collect. Collected coins keep their queue slot
    // until the head prune reaches them.
    for coin in &mut world.coins {
        coin.pos.x -= scroll_speed * dt;
        coin.wobble += dt * COIN_WOBBLE_RATE;
        if !coin.collected
            && circles_overlap(ball_pos, ball_radius, coin.hit_center(), coin.radius)
        {
            coin.collected = true;
            world.coins_collected += 1;
        }
    }

    // Enemies: scroll at their own difficulty-scaled speed. Any touch ends
    // the run on the spot; enemies behind the hit one stay where they were.
    for i in 0..world.enemies.len() {
        let enemy = &mut world.enemies[i];
        enemy.pos.x -= enemy.speed * difficulty * dt;
        enemy.wobble += dt * ENEMY_WOBBLE_RATE;
        let hit = circles_overlap(ball_pos, ball_radius, enemy.hit_center(), enemy.radius);
        if hit {
            world.game_over(EndReason::HitEnemy);
            return;
        }
    }

    // Head-only prune: pop while the oldest entry is spent. A spent coin
    // parked behind a live one waits for its turn at the front.
    while world
        .coins
        .front()
        .is_some_and(|c| c.collected || c.pos.x + c.radius < -COIN_PRUNE_MARGIN)
    {
        world.coins.pop_front();
    }
    while world
        .enemies
        .front()
        .is_some_and(|e| e.pos.x + e.radius < -ENEMY_PRUNE_MARGIN)
    {
        world.enemies.pop_front();
    }

    let (width, height) = (world.width, world.height);
    world.backdrop.advance(dt, width, height, &mut world.rng);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Coin, Enemy};
    use glam::Vec2;
    use proptest::prelude::*;

    const DT: f32 = 1.0 / 60.0;

    /// A surface tall enough that gravity cannot reach the floor within a
    /// short test run.
    fn tall_world() -> World {
        let mut world = World::new(800.0, 100_000.0, 0, 42);
        world.primary_action();
        world
    }

    fn parked_coin(x: f32) -> Coin {
        Coin {
            pos: Vec2::new(x, 300.0),
            radius: 10.0,
            wobble: 0.0,
            collected: false,
        }
    }

    fn parked_enemy(x: f32) -> Enemy {
        Enemy {
            pos: Vec2::new(x, 300.0),
            radius: 14.0,
            wobble: 0.0,
            speed: 300.0,
        }
    }

    #[test]
    fn test_update_is_noop_outside_play() {
        let mut world = World::new(800.0, 600.0, 0, 1);
        update(&mut world, DT);
        assert_eq!(world.mode, GameMode::Menu);
        assert_eq!(world.distance, 0.0);
        assert_eq!(world.ball.vy, 0.0);

        world.primary_action();
        world.toggle_pause();
        let frozen_y = world.ball.pos.y;
        update(&mut world, DT);
        assert_eq!(world.ball.pos.y, frozen_y);
        assert_eq!(world.distance, 0.0);
    }

    #[test]
    fn test_distance_accrues_at_fixed_rate() {
        let mut world = tall_world();
        for _ in 0..60 {
            update(&mut world, DT);
        }
        assert!((world.distance - 10.0).abs() < 0.01);
    }

    #[test]
    fn test_gravity_pulls_ball_down() {
        let mut world = tall_world();
        let start_y = world.ball.pos.y;
        update(&mut world, DT);
        assert!(world.ball.vy > 0.0);
        assert!(world.ball.pos.y > start_y);
    }

    proptest! {
        /// With no flaps and no clamp engaged, velocity integrates exactly
        /// linearly: vy after the steps equals the sum of gravity * dt.
        #[test]
        fn prop_gravity_integrates_linearly(dts in prop::collection::vec(0.001f32..=0.033, 1..20)) {
            let mut world = tall_world();
            let mut expected_vy = 0.0f32;
            for &dt in &dts {
                update(&mut world, dt);
                expected_vy += GRAVITY * dt;
            }
            prop_assert!((world.ball.vy - expected_vy).abs() < 1e-3);
        }
    }

    #[test]
    fn test_ceiling_clamps_without_ending_run() {
        let mut world = tall_world();
        world.ball.pos.y = 15.0;
        world.ball.vy = -520.0;
        update(&mut world, DT);
        assert_eq!(world.mode, GameMode::Play);
        assert_eq!(world.ball.pos.y, world.ball.radius);
        assert_eq!(world.ball.vy, 0.0);
    }

    #[test]
    fn test_floor_ends_run_and_aborts_tick() {
        let mut world = World::new(800.0, 600.0, 0, 1);
        world.primary_action();
        world.ball.pos.y = 595.0;
        world.ball.vy = 300.0;
        let coin_timer = world.spawner.coin_timer;

        update(&mut world, DT);
        assert_eq!(world.mode, GameMode::Over);
        assert_eq!(world.last_run().unwrap().reason, EndReason::Fell);
        // The tick stopped at the floor check: the spawn timer never moved
        assert_eq!(world.spawner.coin_timer, coin_timer);
    }

    #[test]
    fn test_fall_beats_enemy_hit_in_same_tick() {
        let mut world = World::new(800.0, 600.0, 0, 1);
        world.primary_action();
        world.ball.pos.y = 595.0;
        world.ball.vy = 300.0;
        // An enemy dead on the ball would also hit this tick
        let mut enemy = parked_enemy(world.ball.pos.x);
        enemy.pos.y = world.ball.pos.y;
        world.enemies.push_back(enemy);

        update(&mut world, DT);
        assert_eq!(world.last_run().unwrap().reason, EndReason::Fell);
    }

    #[test]
    fn test_first_spawns_follow_staggered_timers() {
        let mut world = tall_world();
        let mut elapsed = 0.0;
        while world.coins.is_empty() {
            update(&mut world, 0.025);
            elapsed += 0.025;
            assert!(elapsed < 1.0, "first coin never spawned");
        }
        assert!((0.75..=0.9).contains(&elapsed));
        assert!(world.enemies.is_empty());

        while world.enemies.is_empty() {
            update(&mut world, 0.025);
            elapsed += 0.025;
            assert!(elapsed < 1.5, "first enemy never spawned");
        }
        assert!((1.15..=1.3).contains(&elapsed));
    }

    #[test]
    fn test_coin_collection_counts_once() {
        let mut world = tall_world();
        world.spawner.coin_timer = 99.0;
        world.spawner.enemy_timer = 99.0;
        let mut coin = parked_coin(world.ball.pos.x);
        coin.pos.y = world.ball.pos.y;
        world.coins.push_back(coin);
        // A second coin far ahead stays untouched
        world.coins.push_back(parked_coin(90_000.0));

        update(&mut world, DT);
        assert_eq!(world.coins_collected, 1);
        assert_eq!(world.mode, GameMode::Play);

        // The collected coin was at the head, so the prune dropped it
        assert_eq!(world.coins.len(), 1);
        assert!(!world.coins[0].collected);

        update(&mut world, DT);
        assert_eq!(world.coins_collected, 1);
    }

    #[test]
    fn test_collected_coin_waits_behind_live_head() {
        let mut world = tall_world();
        world.spawner.coin_timer = 99.0;
        world.spawner.enemy_timer = 99.0;
        // Head coin is live and far away; the second one gets collected
        world.coins.push_back(parked_coin(90_000.0));
        let mut near = parked_coin(world.ball.pos.x);
        near.pos.y = world.ball.pos.y;
        world.coins.push_back(near);

        update(&mut world, DT);
        assert_eq!(world.coins_collected, 1);
        // Both remain queued: the prune never looks past the head
        assert_eq!(world.coins.len(), 2);
        assert!(world.coins[1].collected);
    }

    #[test]
    fn test_enemy_touch_ends_run_immediately() {
        let mut world = tall_world();
        world.spawner.coin_timer = 99.0;
        world.spawner.enemy_timer = 99.0;
        let mut first = parked_enemy(world.ball.pos.x + 1.0);
        first.pos.y = world.ball.pos.y;
        world.enemies.push_back(first);
        let second = parked_enemy(90_000.0);
        let second_x = second.pos.x;
        world.enemies.push_back(second);

        update(&mut world, DT);
        assert_eq!(world.mode, GameMode::Over);
        assert_eq!(world.last_run().unwrap().reason, EndReason::HitEnemy);
        // The tick aborted mid-loop: the enemy behind the hit never moved
        assert_eq!(world.enemies[1].pos.x, second_x);
    }

    #[test]
    fn test_head_prune_margins() {
        let mut world = tall_world();
        world.spawner.coin_timer = 99.0;
        world.spawner.enemy_timer = 99.0;
        // Coin well past its margin, enemy just short of its own
        world.coins.push_back(parked_coin(-200.0));
        world.enemies.push_back(parked_enemy(-100.0));

        update(&mut world, DT);
        assert!(world.coins.is_empty());
        assert_eq!(world.enemies.len(), 1);

        // Push the enemy past its margin and it goes too
        world.enemies[0].pos.x = -140.0;
        update(&mut world, DT);
        assert!(world.enemies.is_empty());
    }

    #[test]
    fn test_wobble_never_moves_stored_position() {
        let mut world = tall_world();
        world.spawner.coin_timer = 99.0;
        world.spawner.enemy_timer = 99.0;
        world.coins.push_back(parked_coin(90_000.0));
        let base_y = world.coins[0].pos.y;

        for _ in 0..120 {
            update(&mut world, DT);
        }
        assert_eq!(world.coins[0].pos.y, base_y);
        // The wobble phase itself does advance
        assert!(world.coins[0].wobble > 0.0);
        assert_ne!(world.coins[0].hit_center().y, base_y);
    }

    #[test]
    fn test_spawn_intervals_compress_at_distance() {
        // At max difficulty the rearmed interval must fit under the base band
        let mut world = tall_world();
        world.distance = 1000.0;
        world.spawner.coin_timer = 0.0;
        world.spawner.enemy_timer = 99.0;
        update(&mut world, DT);
        assert!(world.spawner.coin_timer > 0.0);
        assert!(world.spawner.coin_timer <= 1.8 / 2.6);
    }
}
