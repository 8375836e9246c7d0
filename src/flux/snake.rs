//! Colored snakes bouncing between the strip ends.

use alloc::vec::Vec;

use embassy_time::Duration;
use rand::{Rng, SeedableRng, rngs::SmallRng};

use crate::{
    color::hue_color,
    scheduler::{Animation, StepResult},
    strip::LedStrip,
};

/// Snakes alive at the same time at most
pub const DEFAULT_MAX_SNAKES: usize = 40;

/// A new snake hatches every this many steps
const HATCH_EVERY: u32 = 8;

#[derive(Debug, Clone, Copy)]
struct Snake {
    speed: f32,
    start: i64,
    length: u8,
    hue: u8,
}

#[derive(Debug, Clone)]
pub struct KnightSnakes {
    rng: SmallRng,
    snakes: Vec<Snake>,
    max_snakes: usize,
    speed: Duration,
}

impl KnightSnakes {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
            snakes: Vec::new(),
            max_snakes: DEFAULT_MAX_SNAKES,
            speed: Duration::from_millis(25),
        }
    }

    #[must_use]
    pub fn with_max_snakes(mut self, max_snakes: usize) -> Self {
        self.max_snakes = max_snakes;
        self
    }

    #[must_use]
    pub fn with_speed(mut self, speed: Duration) -> Self {
        self.speed = speed;
        self
    }

    pub fn snakes(&self) -> usize {
        self.snakes.len()
    }
}

impl Animation for KnightSnakes {
    #[allow(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_possible_wrap,
        clippy::cast_sign_loss
    )]
    fn step(&mut self, strip: &mut dyn LedStrip, step: u32) -> StepResult {
        let size = strip.size();
        if size == 0 {
            return StepResult::Next(self.speed);
        }

        if step % HATCH_EVERY == 0 && self.snakes.len() < self.max_snakes {
            let speed = 0.5 + f32::from(self.rng.gen_range(0..32u8)) / 16.0;
            let head = (step as f32 * speed) as i64;
            self.snakes.push(Snake {
                speed,
                start: head + self.rng.gen_range(0..size) as i64,
                length: 8 + self.rng.gen_range(0..32),
                hue: self.rng.r#gen(),
            });
        }

        strip.clear();
        let level = u32::from(strip.intensity());
        let lap = 2 * size as i64;
        for snake in &self.snakes {
            let head = (step as f32 * snake.speed) as i64 - snake.start;
            let length = u32::from(snake.length);
            for j in 0..length {
                // brightest at the head, fading towards the tail
                let value = (level * j / length) as u8;
                let x = (head + i64::from(j)).rem_euclid(lap) as usize;
                let x = if x < size { x } else { 2 * size - 1 - x };
                strip.add_pixel(x, hue_color(snake.hue, value));
            }
        }
        StepResult::Next(self.speed)
    }
}
