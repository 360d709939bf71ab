//! Cosmetic backdrop: drifting clouds and twinkling stars
//!
//! Pure decoration. Rebuilt whenever the drawing surface changes size,
//! advanced once per tick, never consulted by gameplay.

use glam::Vec2;
use rand::Rng;

/// Seconds between star alpha updates
const TWINKLE_PERIOD: f32 = 0.05;
/// Clouds wrap back to the right once fully past this margin
const CLOUD_WRAP_MARGIN: f32 = 220.0;

/// A cloud puff drifting leftward across the upper sky
#[derive(Debug, Clone)]
pub struct Cloud {
    pub pos: Vec2,
    pub size: f32,
    pub speed: f32,
}

/// A single star with its own twinkle strength
#[derive(Debug, Clone)]
pub struct Star {
    pub pos: Vec2,
    pub size: f32,
    pub alpha: f32,
    pub twinkle: f32,
}

/// All backdrop decorations plus the twinkle cadence accumulator
#[derive(Debug, Clone, Default)]
pub struct Backdrop {
    pub clouds: Vec<Cloud>,
    pub stars: Vec<Star>,
    twinkle_timer: f32,
}

impl Backdrop {
    /// Rebuild every decoration for a surface of the given size.
    ///
    /// Counts scale with the surface area so a big window doesn't look empty:
    /// at least 6 clouds and 80 stars, more on wide or tall surfaces.
    pub fn regenerate<R: Rng>(&mut self, width: f32, height: f32, rng: &mut R) {
        self.clouds.clear();
        self.stars.clear();
        self.twinkle_timer = 0.0;

        let cloud_count = ((width / 220.0) as usize).max(6);
        for _ in 0..cloud_count {
            self.clouds.push(Cloud {
                pos: Vec2::new(
                    rng.random_range(0.0..1.0) * width,
                    50.0 + rng.random_range(0.0..1.0) * height * 0.35,
                ),
                size: 50.0 + rng.random_range(0.0..1.0) * 60.0,
                speed: 10.0 + rng.random_range(0.0..1.0) * 22.0,
            });
        }

        let star_count = ((width * height / 14_000.0) as usize).max(80);
        for _ in 0..star_count {
            self.stars.push(Star {
                pos: Vec2::new(
                    rng.random_range(0.0..1.0) * width,
                    rng.random_range(0.0..1.0) * height,
                ),
                size: 0.7 + rng.random_range(0.0..1.0) * 1.8,
                alpha: 0.12 + rng.random_range(0.0..1.0) * 0.65,
                twinkle: 0.4 + rng.random_range(0.0..1.0) * 1.0,
            });
        }
    }

    /// Drift clouds and advance the twinkle cadence by one tick.
    pub fn advance<R: Rng>(&mut self, dt: f32, width: f32, height: f32, rng: &mut R) {
        for cloud in &mut self.clouds {
            cloud.pos.x -= cloud.speed * dt;
            if cloud.pos.x < -CLOUD_WRAP_MARGIN {
                cloud.pos.x = width + CLOUD_WRAP_MARGIN;
                cloud.pos.y = 50.0 + rng.random_range(0.0..1.0) * height * 0.35;
            }
        }

        // Stars only re-roll on a coarse cadence, otherwise the twinkle
        // strobes at frame rate.
        self.twinkle_timer += dt;
        if self.twinkle_timer > TWINKLE_PERIOD {
            self.twinkle_timer = 0.0;
            for star in &mut self.stars {
                let drift = (rng.random_range(0.0..1.0) - 0.5) * 0.08 * star.twinkle;
                star.alpha = (star.alpha + drift).clamp(0.06, 0.9);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn rng() -> Pcg32 {
        Pcg32::seed_from_u64(42)
    }

    #[test]
    fn test_regenerate_counts_small_surface() {
        let mut backdrop = Backdrop::default();
        backdrop.regenerate(800.0, 600.0, &mut rng());
        // 800/220 rounds down to 3, floor of 6 applies; 480000/14000 is 34,
        // floor of 80 applies
        assert_eq!(backdrop.clouds.len(), 6);
        assert_eq!(backdrop.stars.len(), 80);
    }

    #[test]
    fn test_regenerate_counts_large_surface() {
        let mut backdrop = Backdrop::default();
        backdrop.regenerate(3000.0, 1000.0, &mut rng());
        assert_eq!(backdrop.clouds.len(), 13);
        assert_eq!(backdrop.stars.len(), 214);
    }

    #[test]
    fn test_regenerate_places_everything_on_surface() {
        let mut backdrop = Backdrop::default();
        backdrop.regenerate(1200.0, 700.0, &mut rng());
        for cloud in &backdrop.clouds {
            assert!(cloud.pos.x >= 0.0 && cloud.pos.x <= 1200.0);
            assert!(cloud.pos.y >= 50.0 && cloud.pos.y <= 50.0 + 700.0 * 0.35);
        }
        for star in &backdrop.stars {
            assert!(star.pos.x >= 0.0 && star.pos.x <= 1200.0);
            assert!(star.pos.y >= 0.0 && star.pos.y <= 700.0);
        }
    }

    #[test]
    fn test_cloud_wraps_to_right_edge() {
        let mut backdrop = Backdrop::default();
        let mut rng = rng();
        backdrop.regenerate(800.0, 600.0, &mut rng);
        backdrop.clouds[0].pos.x = -CLOUD_WRAP_MARGIN - 1.0;
        backdrop.advance(0.016, 800.0, 600.0, &mut rng);
        let wrapped = &backdrop.clouds[0];
        assert_eq!(wrapped.pos.x, 800.0 + CLOUD_WRAP_MARGIN);
        assert!(wrapped.pos.y >= 50.0 && wrapped.pos.y <= 50.0 + 600.0 * 0.35);
    }

    #[test]
    fn test_twinkle_waits_for_cadence() {
        let mut backdrop = Backdrop::default();
        let mut rng = rng();
        backdrop.regenerate(800.0, 600.0, &mut rng);
        let before: Vec<f32> = backdrop.stars.iter().map(|s| s.alpha).collect();

        // One short tick: below the cadence, no alpha changes
        backdrop.advance(0.01, 800.0, 600.0, &mut rng);
        let after: Vec<f32> = backdrop.stars.iter().map(|s| s.alpha).collect();
        assert_eq!(before, after);

        // Pushing past the cadence re-rolls at least some alphas
        backdrop.advance(0.05, 800.0, 600.0, &mut rng);
        let rerolled: Vec<f32> = backdrop.stars.iter().map(|s| s.alpha).collect();
        assert_ne!(before, rerolled);
    }

    #[test]
    fn test_twinkle_stays_in_alpha_band() {
        let mut backdrop = Backdrop::default();
        let mut rng = rng();
        backdrop.regenerate(800.0, 600.0, &mut rng);
        for _ in 0..500 {
            backdrop.advance(0.06, 800.0, 600.0, &mut rng);
        }
        for star in &backdrop.stars {
            assert!(star.alpha >= 0.06 && star.alpha <= 0.9);
        }
    }
}
