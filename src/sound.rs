//! Access events for audio feedback.
//!
//! The animation loop appends the magnitude of every accessed cell, an
//! audio callback running in another context drains them and turns each
//! into a short tone. Nothing in here synthesizes sound.

use core::cell::Cell;

use critical_section::Mutex;
use embassy_time::Duration;

use crate::{channel::Channel, hooks::Hooks, item::Value, strip::LedStrip};

/// Bounded queue of accessed values shared with an audio context.
pub struct AccessQueue<const SIZE: usize> {
    events: Channel<Value, SIZE>,
    enabled: Mutex<Cell<bool>>,
    dropped: Mutex<Cell<usize>>,
}

impl<const SIZE: usize> AccessQueue<SIZE> {
    pub const fn new() -> Self {
        Self {
            events: Channel::new(),
            enabled: Mutex::new(Cell::new(true)),
            dropped: Mutex::new(Cell::new(0)),
        }
    }

    pub fn set_enabled(&self, enabled: bool) {
        critical_section::with(|cs| self.enabled.borrow(cs).set(enabled));
        if !enabled {
            self.events.clear();
        }
    }

    pub fn is_enabled(&self) -> bool {
        critical_section::with(|cs| self.enabled.borrow(cs).get())
    }

    /// Append an accessed value. A full queue drops the event.
    pub fn record(&self, value: Value) {
        if !self.is_enabled() {
            return;
        }
        if self.events.try_send(value).is_err() {
            critical_section::with(|cs| {
                let dropped = self.dropped.borrow(cs);
                dropped.set(dropped.get() + 1);
            });
        }
    }

    /// Hand every queued value to `f`, oldest first.
    pub fn drain(&self, f: impl FnMut(Value)) -> usize {
        self.events.drain(f)
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Events lost to a full queue since creation
    pub fn dropped(&self) -> usize {
        critical_section::with(|cs| self.dropped.borrow(cs).get())
    }
}

impl<const SIZE: usize> Default for AccessQueue<SIZE> {
    fn default() -> Self {
        Self::new()
    }
}

/// Wraps any [`Hooks`] and also feeds an [`AccessQueue`].
pub struct SoundHooks<'a, H: Hooks, const SIZE: usize> {
    inner: H,
    queue: &'a AccessQueue<SIZE>,
}

impl<'a, H: Hooks, const SIZE: usize> SoundHooks<'a, H, SIZE> {
    pub fn new(inner: H, queue: &'a AccessQueue<SIZE>) -> Self {
        Self { inner, queue }
    }

    pub fn inner(&self) -> &H {
        &self.inner
    }

    pub fn inner_mut(&mut self) -> &mut H {
        &mut self.inner
    }
}

impl<H: Hooks, const SIZE: usize> Hooks for SoundHooks<'_, H, SIZE> {
    fn on_algorithm(&mut self, name: &str) {
        self.inner.on_algorithm(name);
    }

    fn on_comparison_count(&mut self, count: usize) {
        self.inner.on_comparison_count(count);
    }

    fn on_delay(&mut self, strip: &mut dyn LedStrip) {
        self.inner.on_delay(strip);
    }

    fn on_sound_access(&mut self, value: Value) {
        self.queue.record(value);
        self.inner.on_sound_access(value);
    }

    fn is_interrupted(&self) -> bool {
        self.inner.is_interrupted()
    }

    fn scale_delay(&self, delay: Duration) -> Duration {
        self.inner.scale_delay(delay)
    }
}
