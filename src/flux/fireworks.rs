//! Rockets bursting into cracks that fly out and fall back.

use alloc::vec::Vec;

use core::f32::consts::PI;

use embassy_time::Duration;
use rand::{Rng, SeedableRng, rngs::SmallRng};

use crate::{
    color::{Rgb, wheel_color},
    scheduler::{Animation, StepResult},
    strip::LedStrip,
};

/// Cracks per rocket
pub const CRACKS: usize = 16;

/// Pixels per concurrently burning rocket
const PIXELS_PER_ROCKET: usize = CRACKS * 10;

const FRAME: Duration = Duration::from_micros(50);

#[derive(Debug, Clone, Copy)]
struct Rocket {
    position: f32,
    speeds: [f32; CRACKS],
    tick: u32,
    lifetime: u32,
    hue: u32,
    intensity: u8,
    color: Rgb,
}

/// Standard normal sample through the Box-Muller transform.
fn normal(rng: &mut SmallRng) -> f32 {
    // 1 - [0, 1) keeps the logarithm finite
    let u1 = 1.0 - rng.r#gen::<f32>();
    let u2 = rng.r#gen::<f32>();
    libm::sqrtf(-2.0 * libm::logf(u1)) * libm::cosf(2.0 * PI * u2)
}

#[derive(Debug, Clone)]
pub struct Fireworks {
    rng: SmallRng,
    rockets: Vec<Option<Rocket>>,
}

impl Fireworks {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
            rockets: Vec::new(),
        }
    }

    /// Rockets currently burning
    pub fn burning(&self) -> usize {
        self.rockets.iter().filter(|rocket| rocket.is_some()).count()
    }

    #[allow(clippy::cast_precision_loss)]
    fn launch(&mut self, size: usize, intensity: u8) -> Rocket {
        let position = self.rng.gen_range(0..size) as f32;
        let scale = 10.0 + self.rng.gen_range(0..10_000u32) as f32 / 1000.0;
        let mut speeds = [0.0; CRACKS];
        for speed in &mut speeds {
            *speed = normal(&mut self.rng) * scale;
        }
        let hue = self.rng.r#gen::<u32>() & 0xFF;
        Rocket {
            position,
            speeds,
            tick: 0,
            lifetime: 40 + self.rng.gen_range(0..120),
            hue,
            intensity,
            color: wheel_color(hue, intensity),
        }
    }
}

impl Animation for Fireworks {
    #[allow(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    fn step(&mut self, strip: &mut dyn LedStrip, _step: u32) -> StepResult {
        let size = strip.size();
        if size == 0 {
            return StepResult::Next(FRAME);
        }
        let slots = (size / PIXELS_PER_ROCKET).max(1);
        if self.rockets.len() != slots {
            self.rockets.resize(slots, None);
        }
        let level = strip.intensity();

        if self.rng.gen_range(0..12) < 4
            && let Some(free) = self.rockets.iter().position(Option::is_none)
        {
            let rocket = self.launch(size, level);
            self.rockets[free] = Some(rocket);
        }

        strip.clear();
        for slot in &mut self.rockets {
            let Some(rocket) = slot else { continue };
            if rocket.intensity != level {
                rocket.intensity = level;
                rocket.color = wheel_color(rocket.hue, level);
            }

            let phase = libm::sinf(rocket.tick as f32 * PI / rocket.lifetime as f32);
            for speed in rocket.speeds {
                let x = rocket.position + speed * phase;
                if x >= 0.0 && x < size as f32 {
                    strip.or_pixel(x as usize, rocket.color);
                }
            }

            rocket.tick += 1;
            if rocket.tick >= rocket.lifetime {
                *slot = None;
            }
        }
        StepResult::Next(FRAME)
    }
}
