//! Frame pacing for observed arrays.
//!
//! The driver turns the access stream of an [`ItemArray`](crate::ItemArray)
//! into flashes on a strip. Every paced access lights its pixel in the
//! "high" state and later settles it to the "low" state. With a frame drop
//! factor above zero the settling is deferred and done in batches, so the
//! strip is committed once per batch instead of once per access.

use embassy_time::{Duration, Instant};
use heapless::Vec;

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::{
    array::AccessObserver,
    clock::Clock,
    color::{BLACK, Rgb, highlight, hue_color, white},
    hooks::Hooks,
    item::{Access, Item, Value},
    math8::dim8,
    strip::LedStrip,
};

/// Capacity of the deferred-settle ring
pub const MAX_FRAME_DROP: usize = 128;

/// Per-access pacing configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pacing {
    /// Number of paced accesses absorbed per strip commit; 0 settles every
    /// access right away
    pub frame_drop: usize,
    /// Sleep per commit
    pub delay: Duration,
}

impl Pacing {
    /// One flash, one commit and one `delay` per access
    pub const fn per_event(delay: Duration) -> Self {
        Self {
            frame_drop: 0,
            delay,
        }
    }

    /// Settle in batches of `frame_drop` accesses without sleeping
    pub const fn batched(frame_drop: usize) -> Self {
        let frame_drop = if frame_drop > MAX_FRAME_DROP {
            MAX_FRAME_DROP
        } else {
            frame_drop
        };
        Self {
            frame_drop,
            delay: Duration::from_ticks(0),
        }
    }

    /// Decode the signed shorthand used by the algorithm catalogue:
    /// a negative value selects batching by `|delay_time|`, anything else
    /// is the per-access delay in microseconds.
    pub const fn from_delay_time(delay_time: i32) -> Self {
        if delay_time < 0 {
            Self::batched(delay_time.unsigned_abs() as usize)
        } else {
            Self::per_event(Duration::from_micros(delay_time.unsigned_abs() as u64))
        }
    }
}

impl Default for Pacing {
    fn default() -> Self {
        Self::from_delay_time(1000)
    }
}

/// Brightness caps of the two flash states, scaled by the strip intensity
/// at draw time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlashIntensity {
    pub high: u8,
    pub low: u8,
}

impl FlashIntensity {
    pub const DEFAULT: Self = Self { high: 255, low: 64 };
}

impl Default for FlashIntensity {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Value-to-color mapping of a driver.
pub trait FlashPalette {
    /// Resting color of `slot` holding `value`
    fn low(&self, slot: usize, value: Value, len: usize, intensity: u8) -> Rgb;

    /// Highlighted color of `slot` holding `value`
    fn high(&self, slot: usize, value: Value, len: usize, intensity: u8) -> Rgb {
        self.low(slot, value, len, intensity)
    }
}

/// Hue proportional to the value; empty slots are off at rest and white
/// when flashed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HuePalette {
    pub flash: FlashIntensity,
}

impl HuePalette {
    pub const fn new(flash: FlashIntensity) -> Self {
        Self { flash }
    }

    #[allow(clippy::cast_possible_truncation)]
    fn hue(value: Value, len: usize) -> u8 {
        (usize::from(value) * 256 / len.max(1)) as u8
    }
}

impl FlashPalette for HuePalette {
    fn low(&self, _slot: usize, value: Value, len: usize, intensity: u8) -> Rgb {
        if value == crate::item::BLACK {
            return BLACK;
        }
        hue_color(Self::hue(value, len), dim8(u32::from(self.flash.low), intensity))
    }

    fn high(&self, _slot: usize, value: Value, len: usize, intensity: u8) -> Rgb {
        let level = dim8(u32::from(self.flash.high), intensity);
        if value == crate::item::BLACK {
            return white(level);
        }
        highlight(hue_color(Self::hue(value, len), level), intensity)
    }
}

/// Palette of the SAT search layout: the first `variables` slots hold
/// variable assignments, the rest clause satisfaction counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SatPalette {
    pub variables: usize,
    pub flash: FlashIntensity,
}

/// Variable cells at or above this magnitude are negative literals
pub const NEGATIVE_LITERAL: Value = 0x8000;

impl SatPalette {
    pub const fn new(variables: usize) -> Self {
        Self {
            variables,
            flash: FlashIntensity::DEFAULT,
        }
    }
}

impl FlashPalette for SatPalette {
    fn low(&self, slot: usize, value: Value, _len: usize, intensity: u8) -> Rgb {
        if value == crate::item::BLACK {
            return BLACK;
        }
        if slot < self.variables {
            if value >= NEGATIVE_LITERAL {
                BLACK
            } else {
                white(dim8(u32::from(self.flash.low), intensity))
            }
        } else if value == 0 {
            Rgb {
                r: dim8(255, intensity),
                g: 0,
                b: 0,
            }
        } else {
            Rgb {
                r: 0,
                g: dim8(32, intensity),
                b: 0,
            }
        }
    }
}

/// Renders array accesses onto a strip.
///
/// Install the driver as the observer of an
/// [`ItemArray`](crate::ItemArray); call [`AnimationDriver::pflush`] once
/// the algorithm returns.
pub struct AnimationDriver<S: LedStrip, P: FlashPalette, C: Clock, H: Hooks> {
    strip: S,
    palette: P,
    clock: C,
    hooks: H,
    pacing: Pacing,
    ring: Vec<Option<usize>, MAX_FRAME_DROP>,
    cursor: usize,
}

impl<S: LedStrip, P: FlashPalette, C: Clock, H: Hooks> AnimationDriver<S, P, C, H> {
    pub fn new(strip: S, palette: P, clock: C, hooks: H, pacing: Pacing) -> Self {
        let frame_drop = pacing.frame_drop.min(MAX_FRAME_DROP);
        let mut ring = Vec::new();
        // capacity is MAX_FRAME_DROP, resize cannot fail
        let _ = ring.resize(frame_drop, None);

        #[cfg(feature = "esp32-log")]
        println!(
            "[driver] frame_drop={} delay={}us",
            frame_drop,
            pacing.delay.as_micros()
        );

        Self {
            strip,
            palette,
            clock,
            hooks,
            pacing: Pacing {
                frame_drop,
                delay: pacing.delay,
            },
            ring,
            cursor: frame_drop.saturating_sub(1),
        }
    }

    pub fn pacing(&self) -> Pacing {
        self.pacing
    }

    pub fn strip(&self) -> &S {
        &self.strip
    }

    pub fn strip_mut(&mut self) -> &mut S {
        &mut self.strip
    }

    pub fn hooks(&self) -> &H {
        &self.hooks
    }

    pub fn hooks_mut(&mut self) -> &mut H {
        &mut self.hooks
    }

    pub fn into_parts(self) -> (S, H) {
        (self.strip, self.hooks)
    }

    fn flash_low(&mut self, cells: &[Item], index: usize) {
        let intensity = self.strip.intensity();
        let color = self
            .palette
            .low(index, cells[index].value(), cells.len(), intensity);
        self.strip.set_pixel(index, color);
    }

    fn flash_high(&mut self, cells: &[Item], index: usize) {
        let intensity = self.strip.intensity();
        let color = self
            .palette
            .high(index, cells[index].value(), cells.len(), intensity);
        self.strip.set_pixel(index, color);
    }

    fn show_if_idle(&mut self) {
        if !self.strip.busy() {
            self.strip.show();
        }
    }

    fn yield_delay(&mut self) {
        if self.hooks.is_interrupted() {
            return;
        }
        let delay = self.hooks.scale_delay(self.pacing.delay);
        self.clock.delay(delay);
        self.hooks.on_delay(&mut self.strip);
    }

    fn settle_ring(&mut self, cells: &[Item]) {
        for entry in 0..self.ring.len() {
            if let Some(index) = self.ring[entry]
                && index < cells.len()
            {
                self.flash_low(cells, index);
            }
        }
    }

    /// Draw one access of `cells[index]`.
    pub fn flash(&mut self, cells: &[Item], index: usize, paced: bool) {
        if index >= cells.len() || self.hooks.is_interrupted() {
            return;
        }
        if !paced {
            self.flash_low(cells, index);
            return;
        }

        if self.pacing.frame_drop == 0 {
            self.flash_high(cells, index);
            self.show_if_idle();
            self.yield_delay();
            self.flash_low(cells, index);
            return;
        }

        self.flash_high(cells, index);
        self.ring[self.cursor] = Some(index);

        if self.cursor == 0 {
            self.show_if_idle();
            self.settle_ring(cells);
            self.cursor = self.pacing.frame_drop - 1;
            self.yield_delay();
        } else {
            self.cursor -= 1;
        }
    }

    /// Settle every pending flash and commit a final frame.
    pub fn pflush(&mut self, cells: &[Item]) {
        self.settle_ring(cells);
        self.ring.iter_mut().for_each(|entry| *entry = None);
        self.cursor = self.pacing.frame_drop.saturating_sub(1);
        self.yield_delay();
        self.strip.show();
    }
}

impl<S: LedStrip, P: FlashPalette, C: Clock, H: Hooks> AccessObserver
    for AnimationDriver<S, P, C, H>
{
    fn on_access(&mut self, cells: &[Item], access: Access) {
        self.hooks.on_sound_access(access.value);
        if let Some(slot) = access.slot {
            self.flash(cells, slot, access.paced);
        }
    }

    fn on_comparison(&mut self, count: usize) {
        self.hooks.on_comparison_count(count);
    }

    fn on_pause(&mut self, duration: Duration) {
        if self.hooks.is_interrupted() {
            return;
        }
        self.clock.delay(self.hooks.scale_delay(duration));
        self.hooks.on_delay(&mut self.strip);
    }

    fn is_interrupted(&self) -> bool {
        self.hooks.is_interrupted()
    }

    fn now(&self) -> Option<Instant> {
        Some(self.clock.now())
    }
}
