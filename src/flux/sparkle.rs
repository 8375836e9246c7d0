//! Random twinkling pixels.
//!
//! Two generators share one seed: the first lights pixels, the second
//! replays the same sequence some frames later to turn them off again, so
//! every pixel stays on for roughly the same time.

use embassy_time::Duration;
use rand::{Rng, SeedableRng, rngs::SmallRng};

use crate::{
    color::{BLACK, Rgb, wheel_color, white},
    scheduler::{Animation, StepResult},
    strip::LedStrip,
};

/// One lit pixel per this many strip pixels at steady state
pub const DEFAULT_DENSITY: usize = 10;

#[derive(Debug, Clone)]
struct Twinkle {
    on: SmallRng,
    off: SmallRng,
    lit: usize,
    density: usize,
}

impl Twinkle {
    fn new(seed: u64) -> Self {
        Self {
            on: SmallRng::seed_from_u64(seed),
            off: SmallRng::seed_from_u64(seed),
            lit: 0,
            density: DEFAULT_DENSITY,
        }
    }

    /// Even steps light a pixel, odd steps turn the oldest one off once the
    /// target population is reached.
    fn step(&mut self, strip: &mut dyn LedStrip, step: u32, color: Rgb) {
        let size = strip.size();
        if size == 0 {
            return;
        }
        if step % 2 == 0 {
            strip.set_pixel(self.on.gen_range(0..size), color);
        } else if self.lit >= size / self.density.max(1) {
            strip.set_pixel(self.off.gen_range(0..size), BLACK);
        } else {
            self.lit += 1;
        }
    }
}

/// White sparkles.
#[derive(Debug, Clone)]
pub struct SparkleWhite {
    twinkle: Twinkle,
    speed: Duration,
}

impl SparkleWhite {
    pub fn new(seed: u64) -> Self {
        Self {
            twinkle: Twinkle::new(seed),
            speed: Duration::from_micros(100),
        }
    }

    #[must_use]
    pub fn with_density(mut self, density: usize) -> Self {
        self.twinkle.density = density;
        self
    }

    #[must_use]
    pub fn with_speed(mut self, speed: Duration) -> Self {
        self.speed = speed;
        self
    }
}

impl Animation for SparkleWhite {
    fn step(&mut self, strip: &mut dyn LedStrip, step: u32) -> StepResult {
        let color = white(strip.intensity());
        self.twinkle.step(strip, step, color);
        StepResult::Next(self.speed)
    }
}

/// Sparkles in random wheel colors.
#[derive(Debug, Clone)]
pub struct SparkleRgb {
    twinkle: Twinkle,
    hues: SmallRng,
    speed: Duration,
}

impl SparkleRgb {
    pub fn new(seed: u64) -> Self {
        Self {
            twinkle: Twinkle::new(seed),
            hues: SmallRng::seed_from_u64(seed.rotate_left(17) ^ 0x5bd1_e995),
            speed: Duration::from_micros(100),
        }
    }

    #[must_use]
    pub fn with_density(mut self, density: usize) -> Self {
        self.twinkle.density = density;
        self
    }

    #[must_use]
    pub fn with_speed(mut self, speed: Duration) -> Self {
        self.speed = speed;
        self
    }
}

impl Animation for SparkleRgb {
    fn step(&mut self, strip: &mut dyn LedStrip, step: u32) -> StepResult {
        let color = wheel_color(self.hues.r#gen(), strip.intensity());
        self.twinkle.step(strip, step, color);
        StepResult::Next(self.speed)
    }
}
