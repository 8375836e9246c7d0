//! Full-strip color patterns that move with the step counter.

use embassy_time::Duration;

use crate::{
    color::{Rgb, hue_color, wheel_color, white},
    scheduler::{Animation, StepResult},
    strip::LedStrip,
};

/// Pixels that share one hue band of [`HsvColorWheel`]
const HUE_BAND: u32 = 300;

/// Red, green, blue and white chasing each other in groups of four.
#[derive(Debug, Clone)]
pub struct ColorWipe {
    speed: Duration,
}

impl Default for ColorWipe {
    fn default() -> Self {
        Self {
            speed: Duration::from_millis(200),
        }
    }
}

impl ColorWipe {
    #[must_use]
    pub fn with_speed(mut self, speed: Duration) -> Self {
        self.speed = speed;
        self
    }
}

impl Animation for ColorWipe {
    fn step(&mut self, strip: &mut dyn LedStrip, step: u32) -> StepResult {
        let size = strip.size();
        if size == 0 {
            return StepResult::Next(self.speed);
        }
        let level = strip.intensity();
        let colors = [
            Rgb { r: level, g: 0, b: 0 },
            Rgb { r: 0, g: level, b: 0 },
            Rgb { r: 0, g: 0, b: level },
            white(level),
        ];

        let shift = step as usize % size;
        for i in (0..size).step_by(colors.len()) {
            for (k, &color) in colors.iter().enumerate() {
                strip.set_pixel((shift + i + k) % size, color);
            }
        }
        StepResult::Next(self.speed)
    }
}

/// Two interleaved colors sliding back and forth on a sine drift.
#[derive(Debug, Clone)]
pub struct TwoSineWipe {
    offset: f32,
    speed: Duration,
}

impl Default for TwoSineWipe {
    fn default() -> Self {
        Self {
            offset: 0.0,
            speed: Duration::from_millis(100),
        }
    }
}

impl TwoSineWipe {
    const PERIOD: usize = 6;

    #[allow(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_possible_wrap,
        clippy::cast_sign_loss
    )]
    fn shift(&self, size: usize) -> usize {
        (libm::floorf(self.offset) as i64).rem_euclid(size as i64) as usize
    }
}

impl Animation for TwoSineWipe {
    #[allow(clippy::cast_precision_loss)]
    fn step(&mut self, strip: &mut dyn LedStrip, step: u32) -> StepResult {
        if step == 0 {
            self.offset = 0.0;
        }
        self.offset += 0.2 + 3.5 * libm::sinf(step as f32 / core::f32::consts::PI / 16.0);

        let size = strip.size();
        if size == 0 {
            return StepResult::Next(self.speed);
        }
        let level = strip.intensity();
        let first = Rgb { r: 0, g: 0, b: level };
        let second = Rgb { r: 0, g: level, b: 0 };

        let shift = self.shift(size);
        for i in (0..size).step_by(Self::PERIOD) {
            for k in 0..Self::PERIOD {
                let color = if k < Self::PERIOD / 2 { first } else { second };
                strip.set_pixel((shift + i + k) % size, color);
            }
        }
        StepResult::Next(self.speed)
    }
}

/// Static color wheel across the strip, handy for checking wiring and order.
#[derive(Debug, Clone)]
pub struct WheelColorTest {
    speed: Duration,
}

impl Default for WheelColorTest {
    fn default() -> Self {
        Self {
            speed: Duration::from_millis(20),
        }
    }
}

impl Animation for WheelColorTest {
    #[allow(clippy::cast_possible_truncation)]
    fn step(&mut self, strip: &mut dyn LedStrip, _step: u32) -> StepResult {
        let level = strip.intensity();
        for i in 0..strip.size() {
            strip.set_pixel(i, wheel_color(i as u32, level));
        }
        StepResult::Next(self.speed)
    }
}

/// Whole strip cycling through the hue circle, long strips in bands.
#[derive(Debug, Clone)]
pub struct HsvColorWheel {
    speed: Duration,
}

impl Default for HsvColorWheel {
    fn default() -> Self {
        Self {
            speed: Duration::from_micros(200),
        }
    }
}

impl HsvColorWheel {
    #[must_use]
    pub fn with_speed(mut self, speed: Duration) -> Self {
        self.speed = speed;
        self
    }
}

impl Animation for HsvColorWheel {
    #[allow(clippy::cast_possible_truncation)]
    fn step(&mut self, strip: &mut dyn LedStrip, step: u32) -> StepResult {
        let level = strip.intensity();
        for i in 0..strip.size() {
            let band = i as u32 / HUE_BAND;
            let hue = step.wrapping_add(band * 256 / 5) % 256;
            strip.set_pixel(i, hue_color(hue as u8, level));
        }
        StepResult::Next(self.speed)
    }
}
