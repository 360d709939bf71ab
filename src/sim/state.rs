//! Session state and the game state machine
//!
//! Everything one play-through owns lives in [`World`]: the player ball, the
//! coin and enemy deques, spawn timers, score counters and the backdrop.
//! Tests drive it headless with a seeded RNG.

use std::collections::VecDeque;

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::background::Backdrop;
use super::spawn::Spawner;
use crate::consts::*;

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameMode {
    /// Title screen, waiting for the first start
    Menu,
    /// Active gameplay
    Play,
    /// Frozen mid-run; only reachable from Play and only returns there
    Pause,
    /// Run ended, summary on screen
    Over,
}

/// How a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndReason {
    /// Ball dropped through the floor
    Fell,
    /// Ball touched an enemy
    HitEnemy,
}

impl EndReason {
    /// Short label for the run summary
    pub fn describe(self) -> &'static str {
        match self {
            EndReason::Fell => "Fell down",
            EndReason::HitEnemy => "Hit enemy",
        }
    }
}

/// Snapshot of a finished run, kept for the summary and score submission
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// Distance floored to whole units
    pub distance: u32,
    pub coins: u32,
    pub reason: EndReason,
}

/// The player ball
#[derive(Debug, Clone)]
pub struct Ball {
    pub pos: Vec2,
    pub radius: f32,
    /// Vertical velocity, positive down. Gravity accumulates into it; a flap
    /// overwrites it outright.
    pub vy: f32,
}

impl Ball {
    /// The flap impulse: velocity is assigned, not added, so mashing can
    /// never stack upward speed.
    pub fn flap(&mut self) {
        self.vy = -FLAP_SPEED;
    }
}

/// A collectible coin scrolling in from the right
#[derive(Debug, Clone)]
pub struct Coin {
    pub pos: Vec2,
    pub radius: f32,
    /// Wobble phase. The sinusoidal offset is applied at collision and draw
    /// time only, never folded into `pos`.
    pub wobble: f32,
    /// Collected coins stop interacting but stay queued until the head
    /// prune reaches them
    pub collected: bool,
}

impl Coin {
    /// Effective center once the vertical wobble is applied
    pub fn hit_center(&self) -> Vec2 {
        Vec2::new(
            self.pos.x,
            self.pos.y + self.wobble.sin() * COIN_WOBBLE_AMPLITUDE,
        )
    }
}

/// A hostile orb scrolling in from the right
#[derive(Debug, Clone)]
pub struct Enemy {
    pub pos: Vec2,
    pub radius: f32,
    /// Wobble phase, same contract as [`Coin::wobble`]
    pub wobble: f32,
    /// Base leftward speed; the tick scales it by difficulty
    pub speed: f32,
}

impl Enemy {
    /// Effective center once the vertical wobble is applied
    pub fn hit_center(&self) -> Vec2 {
        Vec2::new(
            self.pos.x,
            self.pos.y + self.wobble.sin() * ENEMY_WOBBLE_AMPLITUDE,
        )
    }
}

/// Difficulty for a given distance: starts at 1.0, climbs one step per
/// [`DIFFICULTY_RAMP`] units and saturates at the bonus cap.
#[inline]
pub fn difficulty_at(distance: f32) -> f32 {
    1.0 + (distance / DIFFICULTY_RAMP).min(DIFFICULTY_BONUS_CAP)
}

/// Where a run seats the ball on a surface of the given size.
#[inline]
pub fn home_position(width: f32, height: f32) -> Vec2 {
    Vec2::new(
        (width * BALL_HOME_X_FRACTION).floor().max(BALL_HOME_MIN_X),
        (height * BALL_HOME_Y_FRACTION).floor(),
    )
}

/// Trim the raw name, cap its length, fall back to the guest name when
/// nothing printable is left.
pub fn sanitize_player_name(raw: &str) -> String {
    let trimmed: String = raw.trim().chars().take(PLAYER_NAME_MAX).collect();
    if trimmed.is_empty() {
        DEFAULT_PLAYER_NAME.to_string()
    } else {
        trimmed
    }
}

/// One full game session plus the surface it plays on
#[derive(Debug, Clone)]
pub struct World {
    pub mode: GameMode,
    /// Logical surface size in CSS pixels
    pub width: f32,
    pub height: f32,

    pub ball: Ball,
    /// Active coins in spawn order, oldest at the front
    pub coins: VecDeque<Coin>,
    /// Active enemies in spawn order, oldest at the front
    pub enemies: VecDeque<Enemy>,
    pub spawner: Spawner,
    pub backdrop: Backdrop,

    /// Distance flown this run; display and scoring floor it
    pub distance: f32,
    pub coins_collected: u32,
    /// Best floored distance across sessions, updated the moment a run ends
    /// with a record
    pub best_distance: u32,
    pub player_name: String,

    /// Summary of the last finished run
    last_run: Option<RunSummary>,
    /// Whether the last finished run has been handed out for submission
    submitted: bool,

    pub(crate) rng: Pcg32,
}

impl World {
    /// Fresh world in menu mode. `best_distance` comes from local storage;
    /// the seed fixes every spawn and backdrop roll of the session.
    pub fn new(width: f32, height: f32, best_distance: u32, seed: u64) -> Self {
        let width = width.max(1.0);
        let height = height.max(1.0);
        let mut rng = Pcg32::seed_from_u64(seed);
        let mut backdrop = Backdrop::default();
        backdrop.regenerate(width, height, &mut rng);

        Self {
            mode: GameMode::Menu,
            width,
            height,
            ball: Ball {
                pos: home_position(width, height),
                radius: BALL_RADIUS,
                vy: 0.0,
            },
            coins: VecDeque::new(),
            enemies: VecDeque::new(),
            spawner: Spawner::staggered(),
            backdrop,
            distance: 0.0,
            coins_collected: 0,
            best_distance,
            player_name: DEFAULT_PLAYER_NAME.to_string(),
            last_run: None,
            submitted: false,
            rng,
        }
    }

    /// Difficulty at the current distance
    pub fn difficulty(&self) -> f32 {
        difficulty_at(self.distance)
    }

    /// Set (and sanitize) the name submitted with future runs.
    pub fn set_player_name(&mut self, raw: &str) {
        self.player_name = sanitize_player_name(raw);
    }

    /// The one player control: start from menu or the summary screen, flap
    /// during play. Deliberately inert while paused, so an unpause can never
    /// double as a flap.
    pub fn primary_action(&mut self) {
        match self.mode {
            GameMode::Menu | GameMode::Over => self.reset_session(),
            GameMode::Play => self.ball.flap(),
            GameMode::Pause => {}
        }
    }

    /// Toggle between play and pause; ignored in any other mode.
    pub fn toggle_pause(&mut self) {
        match self.mode {
            GameMode::Play => self.mode = GameMode::Pause,
            GameMode::Pause => self.mode = GameMode::Play,
            GameMode::Menu | GameMode::Over => {}
        }
    }

    /// Drop whatever run is in flight and begin a fresh one.
    pub fn hard_restart(&mut self) {
        self.reset_session();
    }

    /// Start a fresh run: reseat the ball, clear the field, rearm the spawn
    /// timers and counters, then enter play.
    pub fn reset_session(&mut self) {
        self.ball.pos = home_position(self.width, self.height);
        self.ball.vy = 0.0;
        self.coins.clear();
        self.enemies.clear();
        self.spawner = Spawner::staggered();
        self.distance = 0.0;
        self.coins_collected = 0;
        self.last_run = None;
        self.submitted = false;
        self.mode = GameMode::Play;
    }

    /// Terminal transition into [`GameMode::Over`]. Idempotent: once a run is
    /// over, later calls in the same tick (or any other) change nothing, so
    /// the first reason always stands.
    pub fn game_over(&mut self, reason: EndReason) {
        if self.mode == GameMode::Over {
            return;
        }
        self.mode = GameMode::Over;

        let distance = self.distance as u32;
        if distance > self.best_distance {
            self.best_distance = distance;
        }
        self.last_run = Some(RunSummary {
            distance,
            coins: self.coins_collected,
            reason,
        });
    }

    /// Summary of the most recently finished run, if any.
    pub fn last_run(&self) -> Option<RunSummary> {
        self.last_run
    }

    /// Hand out the finished run for score submission, at most once per run.
    /// Returns `None` while a run is live, before any run has finished, or
    /// once the summary has already been claimed.
    pub fn take_pending_submission(&mut self) -> Option<RunSummary> {
        if self.mode != GameMode::Over || self.submitted {
            return None;
        }
        let run = self.last_run?;
        self.submitted = true;
        Some(run)
    }

    /// Adopt a new logical surface size. Zero or negative sizes are layout
    /// noise and ignored outright. Otherwise the backdrop is rebuilt and the
    /// ball pulled back into view, mid-run state untouched.
    pub fn resize(&mut self, width: f32, height: f32) {
        if width <= 0.0 || height <= 0.0 {
            return;
        }
        self.width = width;
        self.height = height;
        self.backdrop.regenerate(width, height, &mut self.rng);
        self.ball.pos.x = (width * BALL_HOME_X_FRACTION).floor().max(BALL_HOME_MIN_X);
        self.ball.pos.y = self
            .ball
            .pos
            .y
            .max(self.ball.radius + 10.0)
            .min(height - self.ball.radius - 10.0);
    }
}
