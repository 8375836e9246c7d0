//! Runtime control of running animations.
//!
//! Input handlers (a keyboard thread, a button interrupt) push
//! [`ControlIntent`]s into a [`ControlChannel`]. The animation loop owns a
//! [`ControlProcessor`] that drains the channel at every pacing point.

use embassy_time::Duration;
use heapless::String;

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::{
    channel::{Channel, Receiver, Sender},
    clock::Clock,
    hooks::Hooks,
    strip::LedStrip,
};

/// Neutral delay factor, in per-mille
pub const DEFAULT_DELAY_FACTOR: u32 = 1000;
pub const MIN_DELAY_FACTOR: u32 = 10;
pub const MAX_DELAY_FACTOR: u32 = 100_000;

/// Poll interval while paused
pub const PAUSE_POLL: Duration = Duration::from_millis(10);

const ALGORITHM_NAME_LEN: usize = 32;

/// Requests accepted by a running animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlIntent {
    /// Unwind the current animation
    Interrupt,
    /// Shorten pacing delays by about 10%
    SpeedUp,
    /// Lengthen pacing delays by about 10%
    SlowDown,
    /// Set the strip brightness ceiling
    SetIntensity(u8),
    Pause,
    Resume,
}

pub type ControlChannel<const SIZE: usize> = Channel<ControlIntent, SIZE>;
pub type ControlSender<'a, const SIZE: usize> = Sender<'a, ControlIntent, SIZE>;
pub type ControlReceiver<'a, const SIZE: usize> = Receiver<'a, ControlIntent, SIZE>;

/// [`Hooks`] implementation driven by a [`ControlChannel`].
pub struct ControlProcessor<'a, C: Clock, const SIZE: usize> {
    intents: ControlReceiver<'a, SIZE>,
    clock: C,
    delay_factor: u32,
    intensity: Option<u8>,
    interrupted: bool,
    paused: bool,
    algorithm: String<ALGORITHM_NAME_LEN>,
    comparisons: usize,
}

impl<'a, C: Clock, const SIZE: usize> ControlProcessor<'a, C, SIZE> {
    pub fn new(intents: ControlReceiver<'a, SIZE>, clock: C) -> Self {
        Self {
            intents,
            clock,
            delay_factor: DEFAULT_DELAY_FACTOR,
            intensity: None,
            interrupted: false,
            paused: false,
            algorithm: String::new(),
            comparisons: 0,
        }
    }

    /// Current delay factor in per-mille
    pub fn delay_factor(&self) -> u32 {
        self.delay_factor
    }

    /// Last requested intensity, if any
    pub fn intensity(&self) -> Option<u8> {
        self.intensity
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Name of the running algorithm, truncated to fit
    pub fn algorithm(&self) -> &str {
        &self.algorithm
    }

    /// Last reported comparison count
    pub fn comparisons(&self) -> usize {
        self.comparisons
    }

    /// Clear the interruption flag before the next animation starts.
    pub fn rearm(&mut self) {
        self.interrupted = false;
        self.paused = false;
    }

    /// Apply every queued intent.
    pub fn process_intents(&mut self) {
        while let Ok(intent) = self.intents.try_receive() {
            self.apply(intent);
        }
    }

    fn apply(&mut self, intent: ControlIntent) {
        match intent {
            ControlIntent::Interrupt => {
                #[cfg(feature = "esp32-log")]
                println!("[control] interrupt");
                self.interrupted = true;
            }
            ControlIntent::SpeedUp => {
                self.delay_factor = scale_factor(self.delay_factor, 1000, 1100);
            }
            ControlIntent::SlowDown => {
                self.delay_factor = scale_factor(self.delay_factor, 1000, 900);
            }
            ControlIntent::SetIntensity(intensity) => self.intensity = Some(intensity),
            ControlIntent::Pause => self.paused = true,
            ControlIntent::Resume => self.paused = false,
        }
    }

    fn apply_intensity(&self, strip: &mut dyn LedStrip) {
        if let Some(intensity) = self.intensity
            && strip.intensity() != intensity
        {
            strip.set_intensity(intensity);
        }
    }
}

#[allow(clippy::cast_possible_truncation)]
fn scale_factor(factor: u32, num: u64, den: u64) -> u32 {
    let scaled = u64::from(factor) * num / den;
    scaled.clamp(u64::from(MIN_DELAY_FACTOR), u64::from(MAX_DELAY_FACTOR)) as u32
}

impl<C: Clock, const SIZE: usize> Hooks for ControlProcessor<'_, C, SIZE> {
    fn on_algorithm(&mut self, name: &str) {
        self.algorithm.clear();
        for ch in name.chars() {
            if self.algorithm.push(ch).is_err() {
                break;
            }
        }
        self.comparisons = 0;
    }

    fn on_comparison_count(&mut self, count: usize) {
        self.comparisons = count;
    }

    fn on_delay(&mut self, strip: &mut dyn LedStrip) {
        self.process_intents();
        self.apply_intensity(strip);

        while self.paused && !self.interrupted {
            self.clock.delay(PAUSE_POLL);
            self.process_intents();
            self.apply_intensity(strip);
        }
    }

    fn is_interrupted(&self) -> bool {
        self.interrupted
    }

    fn scale_delay(&self, delay: Duration) -> Duration {
        let micros = delay.as_micros() * u64::from(self.delay_factor) / 1000;
        Duration::from_micros(micros)
    }
}
