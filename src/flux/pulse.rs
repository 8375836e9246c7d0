//! Short soft pulses of color popping up all over the strip.

use alloc::vec::Vec;

use core::f32::consts::PI;

use embassy_time::Duration;
use rand::{Rng, SeedableRng, rngs::SmallRng};

use crate::{
    color::hue_color,
    scheduler::{Animation, StepResult},
    strip::LedStrip,
};

/// One pulse per this many pixels
pub const DEFAULT_PULSE_RATIO: usize = 6;

const FRAME: Duration = Duration::from_micros(10);

#[derive(Debug, Clone, Copy)]
struct Pulse {
    center: f32,
    width: f32,
    tick: u32,
    lifetime: u32,
    hue: u8,
}

#[derive(Debug, Clone)]
pub struct PulseColor {
    rng: SmallRng,
    pulses: Vec<Pulse>,
    ratio: usize,
}

impl PulseColor {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
            pulses: Vec::new(),
            ratio: DEFAULT_PULSE_RATIO,
        }
    }

    #[must_use]
    pub fn with_ratio(mut self, ratio: usize) -> Self {
        self.ratio = ratio;
        self
    }

    /// Pulses currently glowing
    pub fn pulses(&self) -> usize {
        self.pulses.len()
    }

    #[allow(clippy::cast_precision_loss)]
    fn spawn(&mut self, size: usize) -> Pulse {
        Pulse {
            center: self.rng.gen_range(0..size) as f32,
            width: 1.0 + self.rng.gen_range(0..20_000u32) as f32 / 1000.0,
            tick: 0,
            lifetime: 1 + self.rng.gen_range(0..10),
            hue: self.rng.r#gen(),
        }
    }
}

impl Animation for PulseColor {
    #[allow(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    fn step(&mut self, strip: &mut dyn LedStrip, _step: u32) -> StepResult {
        let size = strip.size();
        let capacity = size / self.ratio.max(1);
        while self.pulses.len() < capacity {
            let pulse = self.spawn(size);
            self.pulses.push(pulse);
        }

        strip.clear();
        let level = f32::from(strip.intensity());
        for pulse in &mut self.pulses {
            let envelope = libm::sinf(pulse.tick as f32 * PI / pulse.lifetime as f32);
            let left = pulse.center - pulse.width / 2.0;
            let mut k = 0.0;
            while k < pulse.width {
                let x = left + k;
                if x >= 0.0 && x < size as f32 {
                    let value = level * envelope * libm::sinf(k * PI / pulse.width);
                    strip.or_pixel(x as usize, hue_color(pulse.hue, value as u8));
                }
                k += 1.0;
            }
            pulse.tick += 1;
        }
        self.pulses.retain(|pulse| pulse.tick < pulse.lifetime);
        StepResult::Next(FRAME)
    }
}
