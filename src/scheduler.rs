//! Cooperative scheduling of step-based animations.
//!
//! Any number of (animation, strip) tracks share one thread of control.
//! Each track has its own due time; a tick advances only the tracks that
//! are due, commits every dirty strip that is not busy and then sleeps
//! until the nearest due time.

use embassy_time::{Duration, Instant};

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::{clock::Clock, hooks::Hooks, strip::LedStrip};

/// What an animation asks for after a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepResult {
    /// Commit the frame and step again after the delay
    Next(Duration),
    /// Nothing changed, do not commit
    NoUpdate,
    /// The animation is finished
    End,
}

/// Result of a runner or scheduler call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// The algorithm ran to completion
    Completed,
    /// Every animation signaled [`StepResult::End`]
    Ended,
    /// The wall-clock budget elapsed first
    TimeLimit,
    /// The hooks requested an interruption
    Interrupted,
}

/// A frame generator driven by the scheduler.
pub trait Animation {
    /// Render one step into `strip`. `step` counts up from zero.
    fn step(&mut self, strip: &mut dyn LedStrip, step: u32) -> StepResult;
}

/// One animation bound to the strip it draws on.
pub struct Track<'a> {
    animation: &'a mut dyn Animation,
    strip: &'a mut dyn LedStrip,
    step: u32,
    due: Instant,
    ended: bool,
    dirty: bool,
}

impl<'a> Track<'a> {
    pub fn new(animation: &'a mut dyn Animation, strip: &'a mut dyn LedStrip) -> Self {
        Self {
            animation,
            strip,
            step: 0,
            due: Instant::from_ticks(0),
            ended: false,
            dirty: false,
        }
    }

    /// Steps taken so far
    pub fn steps(&self) -> u32 {
        self.step
    }

    pub fn is_ended(&self) -> bool {
        self.ended
    }

    fn advance(&mut self, now: Instant) {
        let result = self.animation.step(self.strip, self.step);
        self.step = self.step.wrapping_add(1);

        match result {
            StepResult::End => self.ended = true,
            StepResult::NoUpdate => {}
            StepResult::Next(delay) => {
                // after a long stall restart from now instead of bursting
                if now > self.due + delay + delay {
                    self.due = now;
                }
                self.due += delay;
                self.dirty = true;
            }
        }
    }

    fn commit(&mut self) {
        if self.dirty && !self.strip.busy() {
            self.strip.show();
            self.dirty = false;
        }
    }
}

/// Run a single animation until it ends, `time_limit` elapses or the
/// hooks report an interruption.
pub fn run_animation(
    animation: &mut dyn Animation,
    strip: &mut dyn LedStrip,
    clock: &impl Clock,
    hooks: &mut impl Hooks,
    time_limit: Duration,
) -> RunOutcome {
    let mut track = Track::new(animation, strip);
    run_animations(core::slice::from_mut(&mut track), clock, hooks, time_limit)
}

/// Interleave any number of tracks on one thread.
///
/// Finishes with [`RunOutcome::Ended`] only once every track has ended.
pub fn run_animations(
    tracks: &mut [Track<'_>],
    clock: &impl Clock,
    hooks: &mut impl Hooks,
    time_limit: Duration,
) -> RunOutcome {
    let start = clock.now();
    let deadline = start.checked_add(time_limit);
    for track in tracks.iter_mut() {
        track.due = start;
    }

    let outcome = loop {
        let now = clock.now();
        if deadline.is_some_and(|deadline| now >= deadline) {
            break RunOutcome::TimeLimit;
        }

        for track in tracks.iter_mut() {
            if !track.ended && track.due <= now {
                track.advance(now);
            }
        }
        for track in tracks.iter_mut() {
            track.commit();
        }

        if tracks.iter().all(|track| track.ended) {
            break RunOutcome::Ended;
        }

        let next_due = tracks
            .iter()
            .filter(|track| !track.ended)
            .map(|track| track.due)
            .min();
        if let Some(mut wake) = next_due {
            if let Some(deadline) = deadline {
                wake = wake.min(deadline);
            }
            if wake > now {
                clock.delay(wake - now);
            }
        }

        for track in tracks.iter_mut() {
            hooks.on_delay(track.strip);
        }
        if hooks.is_interrupted() {
            break RunOutcome::Interrupted;
        }
    };

    #[cfg(feature = "esp32-log")]
    println!("[scheduler] finished: {:?}", outcome);

    outcome
}
