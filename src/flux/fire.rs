//! One-dimensional fire simulation.
//!
//! Every cell carries a heat value. Each frame all cells cool down a bit,
//! heat drifts up the strip, and new sparks randomly ignite near the base.
//! [`FireIce`] runs a second, cold map from the other end and lets the
//! stronger of the two win per pixel.

use alloc::vec;
use alloc::vec::Vec;

use embassy_time::Duration;
use rand::{Rng, SeedableRng, rngs::SmallRng};

use crate::{
    color::Rgb,
    math8::dim8,
    scheduler::{Animation, StepResult},
    strip::LedStrip,
};

/// How much the air cools as it rises
pub const DEFAULT_COOLING: usize = 20;

/// Chance (out of 255) of a new spark each frame
pub const DEFAULT_SPARKING: u8 = 160;

/// Sparks ignite within this many cells of the base
const SPARK_ZONE: usize = 7;

const FRAME: Duration = Duration::from_millis(10);

#[derive(Debug, Clone)]
struct HeatMap {
    cells: Vec<u8>,
    cooling: usize,
    sparking: u8,
}

impl HeatMap {
    fn new() -> Self {
        Self {
            cells: Vec::new(),
            cooling: DEFAULT_COOLING,
            sparking: DEFAULT_SPARKING,
        }
    }

    #[allow(clippy::cast_possible_truncation)]
    fn update(&mut self, rng: &mut SmallRng, size: usize) {
        if self.cells.len() != size {
            self.cells = vec![0; size];
        }
        if size == 0 {
            return;
        }

        let limit = self.cooling * 10 / size + 2;
        for heat in &mut self.cells {
            let cooldown = rng.gen_range(0..limit).min(255) as u8;
            *heat = heat.saturating_sub(cooldown);
        }

        for k in (2..size).rev() {
            let below = u16::from(self.cells[k - 1]) + 2 * u16::from(self.cells[k - 2]);
            self.cells[k] = (below / 3) as u8;
        }

        if rng.gen_range(0..255u8) < self.sparking {
            let y = rng.gen_range(0..SPARK_ZONE.min(size));
            let spark = rng.gen_range(160..=255u8);
            self.cells[y] = self.cells[y].saturating_add(spark);
        }
    }
}

/// Position of `temperature` on a 0..=191 ramp and its brightness within
/// the current third.
fn heat_ramp(temperature: u8) -> (u8, u8) {
    let t192 = u8::try_from((u32::from(temperature) * 191 + 127) / 255).unwrap_or(191);
    (t192, (t192 & 0x3F) << 2)
}

/// Black to red to yellow to white.
pub fn heat_color(temperature: u8, intensity: u8) -> Rgb {
    let (t192, ramp) = heat_ramp(temperature);
    let ramp = u32::from(ramp);
    let (r, g, b) = if t192 > 0x80 {
        (255, 255, ramp)
    } else if t192 > 0x40 {
        (255, ramp, 0)
    } else {
        (ramp, 0, 0)
    };
    Rgb {
        r: dim8(r, intensity),
        g: dim8(g, intensity),
        b: dim8(b, intensity),
    }
}

/// Blend of a heat and a cold value, each on its own ramp.
pub fn fire_ice_color(heat: u8, cold: u8, intensity: u8) -> Rgb {
    let (mut r, mut g, mut b) = (0u32, 0u32, 0u32);

    let (t192, ramp) = heat_ramp(heat);
    let ramp = u32::from(ramp);
    if t192 > 0x80 {
        (r, g, b) = (255, 255, ramp);
    } else if t192 > 0x40 {
        (r, g) = (255, ramp);
    } else {
        r = ramp;
    }

    let (c192, ramp) = heat_ramp(cold);
    let ramp = u32::from(ramp);
    if c192 > 0x80 {
        r += ramp;
        g = 255;
        b = 255;
    } else if c192 > 0x40 {
        b += 255;
        g += ramp;
    } else {
        b += ramp;
    }

    Rgb {
        r: dim8(r.min(255), intensity),
        g: dim8(g.min(255), intensity),
        b: dim8(b.min(255), intensity),
    }
}

/// Flames rising from pixel 0.
#[derive(Debug, Clone)]
pub struct Fire {
    rng: SmallRng,
    heat: HeatMap,
}

impl Fire {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
            heat: HeatMap::new(),
        }
    }

    #[must_use]
    pub fn with_cooling(mut self, cooling: usize) -> Self {
        self.heat.cooling = cooling;
        self
    }

    #[must_use]
    pub fn with_sparking(mut self, sparking: u8) -> Self {
        self.heat.sparking = sparking;
        self
    }
}

impl Animation for Fire {
    fn step(&mut self, strip: &mut dyn LedStrip, _step: u32) -> StepResult {
        let size = strip.size();
        self.heat.update(&mut self.rng, size);

        let level = strip.intensity();
        for (i, &heat) in self.heat.cells.iter().enumerate() {
            strip.set_pixel(i, heat_color(heat, level));
        }
        StepResult::Next(FRAME)
    }
}

/// Fire from pixel 0 against ice from the far end.
#[derive(Debug, Clone)]
pub struct FireIce {
    rng: SmallRng,
    heat: HeatMap,
    cold: HeatMap,
}

impl FireIce {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
            heat: HeatMap::new(),
            cold: HeatMap::new(),
        }
    }
}

impl Animation for FireIce {
    fn step(&mut self, strip: &mut dyn LedStrip, _step: u32) -> StepResult {
        let size = strip.size();
        self.heat.update(&mut self.rng, size);
        self.cold.update(&mut self.rng, size);

        let level = strip.intensity();
        for j in 0..size {
            let pixel = size - j - 1;
            let mut heat = self.heat.cells[pixel];
            let mut cold = self.cold.cells[j];
            if heat > cold {
                cold = 0;
            } else {
                heat = 0;
            }
            strip.set_pixel(pixel, fire_ice_color(heat, cold, level));
        }
        StepResult::Next(FRAME)
    }
}
