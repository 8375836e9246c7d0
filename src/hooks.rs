//! Host-side hooks invoked from inside running animations.

use embassy_time::Duration;

use crate::item::Value;
use crate::strip::LedStrip;

/// Callbacks from the animation core to whatever hosts it.
///
/// Every method has a no-op default and `()` implements the trait, so a
/// headless run needs no setup at all.
pub trait Hooks {
    /// A new algorithm run starts
    fn on_algorithm(&mut self, _name: &str) {}

    /// Running comparison count of the current algorithm
    fn on_comparison_count(&mut self, _count: usize) {}

    /// Called at every pacing point, including from inside tight algorithm
    /// loops. This is the place to poll input.
    fn on_delay(&mut self, _strip: &mut dyn LedStrip) {}

    /// Magnitude of an accessed cell, for audio feedback
    fn on_sound_access(&mut self, _value: Value) {}

    /// True once the current animation should unwind
    fn is_interrupted(&self) -> bool {
        false
    }

    /// Adjust a pacing delay before it is slept
    fn scale_delay(&self, delay: Duration) -> Duration {
        delay
    }
}

impl Hooks for () {}

impl<H: Hooks + ?Sized> Hooks for &mut H {
    fn on_algorithm(&mut self, name: &str) {
        (**self).on_algorithm(name);
    }

    fn on_comparison_count(&mut self, count: usize) {
        (**self).on_comparison_count(count);
    }

    fn on_delay(&mut self, strip: &mut dyn LedStrip) {
        (**self).on_delay(strip);
    }

    fn on_sound_access(&mut self, value: Value) {
        (**self).on_sound_access(value);
    }

    fn is_interrupted(&self) -> bool {
        (**self).is_interrupted()
    }

    fn scale_delay(&self, delay: Duration) -> Duration {
        (**self).scale_delay(delay)
    }
}
