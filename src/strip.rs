//! Strip collaborators.
//!
//! [`LedStrip`] is everything the animation core needs from a display:
//! addressable pixels, a commit, a busy poll and a global brightness cap.
//! [`FrameBuffer`] is a ready-made in-memory strip that commits to any
//! [`OutputDriver`].

use crate::color::{BLACK, Rgb, add_colors, or_colors};

/// Brightness ceiling of a freshly created [`FrameBuffer`]
pub const DEFAULT_INTENSITY: u8 = 96;

/// Abstract LED driver trait
///
/// Implement this trait to support different hardware platforms.
pub trait OutputDriver {
    /// Write colors to the LED strip
    fn write(&mut self, colors: &[Rgb]);

    /// Returns true while a previous write is still being transmitted
    fn busy(&self) -> bool {
        false
    }
}

/// Pixel-addressable LED strip.
///
/// Writes outside `0..size()` are ignored by every implementation in this
/// crate; animations are allowed to rely on that.
pub trait LedStrip {
    /// Number of addressable pixels
    fn size(&self) -> usize;

    /// Currently buffered color of a pixel
    fn pixel(&self, index: usize) -> Rgb;

    /// Overwrite a pixel
    fn set_pixel(&mut self, index: usize, color: Rgb);

    /// Bitwise-OR blend into a pixel
    fn or_pixel(&mut self, index: usize, color: Rgb) {
        let current = self.pixel(index);
        self.set_pixel(index, or_colors(current, color));
    }

    /// Saturating-add blend into a pixel
    fn add_pixel(&mut self, index: usize, color: Rgb) {
        let current = self.pixel(index);
        self.set_pixel(index, add_colors(current, color));
    }

    /// Commit buffered pixels to the hardware (may be asynchronous)
    fn show(&mut self);

    /// True while a prior `show` is still in flight
    fn busy(&self) -> bool {
        false
    }

    /// Global brightness ceiling
    fn intensity(&self) -> u8;

    fn set_intensity(&mut self, intensity: u8);

    /// Turn every pixel off (does not commit)
    fn clear(&mut self) {
        for i in 0..self.size() {
            self.set_pixel(i, BLACK);
        }
    }
}

impl<T: LedStrip + ?Sized> LedStrip for &mut T {
    fn size(&self) -> usize {
        (**self).size()
    }

    fn pixel(&self, index: usize) -> Rgb {
        (**self).pixel(index)
    }

    fn set_pixel(&mut self, index: usize, color: Rgb) {
        (**self).set_pixel(index, color);
    }

    fn or_pixel(&mut self, index: usize, color: Rgb) {
        (**self).or_pixel(index, color);
    }

    fn add_pixel(&mut self, index: usize, color: Rgb) {
        (**self).add_pixel(index, color);
    }

    fn show(&mut self) {
        (**self).show();
    }

    fn busy(&self) -> bool {
        (**self).busy()
    }

    fn intensity(&self) -> u8 {
        (**self).intensity()
    }

    fn set_intensity(&mut self, intensity: u8) {
        (**self).set_intensity(intensity);
    }

    fn clear(&mut self) {
        (**self).clear();
    }
}

/// In-memory strip of up to `MAX_LEDS` pixels.
pub struct FrameBuffer<D: OutputDriver, const MAX_LEDS: usize> {
    driver: D,
    pixels: [Rgb; MAX_LEDS],
    len: usize,
    intensity: u8,
    shows: usize,
}

impl<D: OutputDriver, const MAX_LEDS: usize> FrameBuffer<D, MAX_LEDS> {
    /// Create a strip with `len` active pixels (capped at `MAX_LEDS`)
    pub fn new(driver: D, len: usize) -> Self {
        Self {
            driver,
            pixels: [BLACK; MAX_LEDS],
            len: len.min(MAX_LEDS),
            intensity: DEFAULT_INTENSITY,
            shows: 0,
        }
    }

    /// Set the starting brightness ceiling
    #[must_use]
    pub fn with_intensity(mut self, intensity: u8) -> Self {
        self.intensity = intensity;
        self
    }

    /// Active pixels
    pub fn pixels(&self) -> &[Rgb] {
        &self.pixels[..self.len]
    }

    /// Number of frames committed so far
    pub fn shows(&self) -> usize {
        self.shows
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }

    pub fn driver_mut(&mut self) -> &mut D {
        &mut self.driver
    }
}

impl<D: OutputDriver, const MAX_LEDS: usize> LedStrip for FrameBuffer<D, MAX_LEDS> {
    fn size(&self) -> usize {
        self.len
    }

    fn pixel(&self, index: usize) -> Rgb {
        self.pixels().get(index).copied().unwrap_or(BLACK)
    }

    fn set_pixel(&mut self, index: usize, color: Rgb) {
        if index < self.len {
            self.pixels[index] = color;
        }
    }

    fn show(&mut self) {
        self.shows += 1;
        self.driver.write(&self.pixels[..self.len]);
    }

    fn busy(&self) -> bool {
        self.driver.busy()
    }

    fn intensity(&self) -> u8 {
        self.intensity
    }

    fn set_intensity(&mut self, intensity: u8) {
        self.intensity = intensity;
    }
}
