//! Colored particles sprayed along the strip.

use alloc::vec::Vec;

use embassy_time::Duration;
use rand::{Rng, SeedableRng, rngs::SmallRng};

use crate::{
    color::{Rgb, wheel_color},
    scheduler::{Animation, StepResult},
    strip::LedStrip,
};

/// One particle per this many pixels at most
pub const DEFAULT_DENSITY_RATIO: usize = 6;

/// Where new particles enter the strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SprayOrigin {
    /// Near pixel 0, flying up
    Start,
    /// Near the last pixel, flying down
    End,
}

#[derive(Debug, Clone, Copy)]
struct Particle {
    position: f32,
    speed: f32,
    hue: u32,
    intensity: u8,
    color: Rgb,
}

/// Random in `0..limit`, 0 for an empty range
fn below(rng: &mut SmallRng, limit: usize) -> usize {
    if limit == 0 { 0 } else { rng.gen_range(0..limit) }
}

#[derive(Debug, Clone)]
pub struct SprayColor {
    rng: SmallRng,
    particles: Vec<Particle>,
    origin: SprayOrigin,
    density_ratio: usize,
    speed: Duration,
}

impl SprayColor {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
            particles: Vec::new(),
            origin: SprayOrigin::Start,
            density_ratio: DEFAULT_DENSITY_RATIO,
            speed: Duration::from_millis(30),
        }
    }

    #[must_use]
    pub fn with_origin(mut self, origin: SprayOrigin) -> Self {
        self.origin = origin;
        self
    }

    /// Particles currently in flight
    pub fn particles(&self) -> usize {
        self.particles.len()
    }

    #[allow(clippy::cast_precision_loss)]
    fn spawn(&mut self, size: usize, intensity: u8) -> Particle {
        let spread = below(&mut self.rng, size / 4) as f32 - size as f32 / 8.0;
        let speed = 1.0 + below(&mut self.rng, 10) as f32 / 10.0;
        let (position, speed) = match self.origin {
            SprayOrigin::Start => (spread.max(0.0), speed),
            SprayOrigin::End => ((size as f32 - 1.0 - spread).min(size as f32 - 1.0), -speed),
        };
        let hue = self.rng.r#gen::<u32>() & 0xFF;
        Particle {
            position,
            speed,
            hue,
            intensity,
            color: wheel_color(hue, intensity),
        }
    }
}

impl Animation for SprayColor {
    #[allow(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    fn step(&mut self, strip: &mut dyn LedStrip, _step: u32) -> StepResult {
        let size = strip.size();
        let capacity = size / self.density_ratio.max(1);
        let level = strip.intensity();

        if below(&mut self.rng, self.density_ratio) <= 2 && self.particles.len() < capacity {
            let particle = self.spawn(size, level);
            self.particles.push(particle);
        }

        strip.clear();
        let mut i = 0;
        while i < self.particles.len() {
            let particle = &mut self.particles[i];
            if particle.intensity != level {
                particle.intensity = level;
                particle.color = wheel_color(particle.hue, level);
            }
            strip.add_pixel(particle.position as usize, particle.color);

            particle.position += particle.speed;
            if particle.position < 0.0 || particle.position >= size as f32 {
                self.particles.swap_remove(i);
            } else {
                i += 1;
            }
        }
        StepResult::Next(self.speed)
    }
}
