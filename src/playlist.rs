//! Endless shows.
//!
//! [`FluxPlaylist`] picks decorative animations at random and gives each a
//! fixed time slot. [`AlgorithmPlaylist`] walks the algorithm catalogue in
//! order. Both stop early with [`RunOutcome::Interrupted`] and leave it to
//! the caller to re-arm its hooks before playing on.

use embassy_time::Duration;
use rand::{Rng, SeedableRng, rngs::SmallRng};

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::{
    algorithm::{AlgorithmId, run_algorithm},
    array::TooManyItems,
    clock::Clock,
    flux::{
        ColorWipe, Fire, FireIce, Fireworks, FluxSlot, HsvColorWheel, KnightSnakes, PulseColor,
        SparkleRgb, SparkleWhite, SprayColor, SprayOrigin, TwoSineWipe, WheelColorTest,
    },
    hooks::Hooks,
    scheduler::{RunOutcome, run_animation},
    strip::LedStrip,
};

/// Time each flux animation gets on the strip
pub const FLUX_TIME_LIMIT: Duration = Duration::from_secs(20);

/// Number of entries in the flux line-up
pub const FLUX_LINEUP: usize = 15;

const FAST_SPARKLE: Duration = Duration::from_millis(2);
const DENSE_SPARKLE: usize = 5;

/// Build entry `index` of the flux line-up.
///
/// Sparkles and spray appear twice, in a second variant, so they come up
/// more often. Out of range indices wrap around.
pub fn flux_lineup(index: usize, seed: u64) -> FluxSlot {
    match index % FLUX_LINEUP {
        0 => FluxSlot::ColorWipe(ColorWipe::default()),
        1 => FluxSlot::TwoSineWipe(TwoSineWipe::default()),
        2 => FluxSlot::WheelColorTest(WheelColorTest::default()),
        3 => FluxSlot::HsvColorWheel(HsvColorWheel::default()),
        4 => FluxSlot::SparkleWhite(SparkleWhite::new(seed)),
        5 => FluxSlot::SparkleWhite(
            SparkleWhite::new(seed)
                .with_speed(FAST_SPARKLE)
                .with_density(DENSE_SPARKLE),
        ),
        6 => FluxSlot::SparkleRgb(SparkleRgb::new(seed)),
        7 => FluxSlot::SparkleRgb(
            SparkleRgb::new(seed)
                .with_speed(FAST_SPARKLE)
                .with_density(DENSE_SPARKLE),
        ),
        8 => FluxSlot::Fire(Fire::new(seed)),
        9 => FluxSlot::FireIce(FireIce::new(seed)),
        10 => FluxSlot::SprayColor(SprayColor::new(seed)),
        11 => FluxSlot::SprayColor(SprayColor::new(seed).with_origin(SprayOrigin::End)),
        12 => FluxSlot::Fireworks(Fireworks::new(seed)),
        13 => FluxSlot::KnightSnakes(KnightSnakes::new(seed)),
        _ => FluxSlot::PulseColor(PulseColor::new(seed)),
    }
}

/// Random flux animations, one time slot each.
#[derive(Debug, Clone)]
pub struct FluxPlaylist {
    rng: SmallRng,
    time_limit: Duration,
}

impl FluxPlaylist {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
            time_limit: FLUX_TIME_LIMIT,
        }
    }

    #[must_use]
    pub fn with_time_limit(mut self, time_limit: Duration) -> Self {
        self.time_limit = time_limit;
        self
    }

    /// Draw the next animation from the line-up
    pub fn next_slot(&mut self) -> FluxSlot {
        let index = self.rng.gen_range(0..FLUX_LINEUP);
        flux_lineup(index, self.rng.r#gen())
    }

    /// Blank the strip and run one random animation for its time slot.
    pub fn play_next(
        &mut self,
        strip: &mut dyn LedStrip,
        clock: &impl Clock,
        hooks: &mut impl Hooks,
    ) -> RunOutcome {
        let mut slot = self.next_slot();
        #[cfg(feature = "esp32-log")]
        println!("[playlist] flux {}", slot.id().as_str());

        strip.clear();
        run_animation(&mut slot, strip, clock, hooks, self.time_limit)
    }

    /// Play `count` animations back to back.
    pub fn play(
        &mut self,
        strip: &mut dyn LedStrip,
        clock: &impl Clock,
        hooks: &mut impl Hooks,
        count: usize,
    ) -> RunOutcome {
        for _ in 0..count {
            if self.play_next(strip, clock, hooks) == RunOutcome::Interrupted {
                return RunOutcome::Interrupted;
            }
        }
        RunOutcome::Completed
    }
}

/// The algorithm catalogue in order, wrapping around at the end.
#[derive(Debug, Clone)]
pub struct AlgorithmPlaylist {
    next: AlgorithmId,
    rng: SmallRng,
}

impl AlgorithmPlaylist {
    pub fn new(seed: u64) -> Self {
        Self {
            next: AlgorithmId::ALL[0],
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    #[must_use]
    pub fn with_start(mut self, id: AlgorithmId) -> Self {
        self.next = id;
        self
    }

    /// Algorithm the next call to [`play_next`](Self::play_next) runs
    pub fn upcoming(&self) -> AlgorithmId {
        self.next
    }

    /// Blank the strip and run the upcoming algorithm with its tuned pacing.
    ///
    /// The playlist moves on even when the run is interrupted.
    pub fn play_next<S, C, H>(
        &mut self,
        mut strip: S,
        clock: C,
        hooks: H,
    ) -> Result<RunOutcome, TooManyItems>
    where
        S: LedStrip,
        C: Clock,
        H: Hooks,
    {
        let id = self.next;
        self.next = id.next();
        #[cfg(feature = "esp32-log")]
        println!("[playlist] algorithm {}", id.as_str());

        strip.clear();
        run_algorithm(id, strip, clock, hooks, self.rng.r#gen())
    }

    /// Play `count` algorithms back to back.
    pub fn play<S, C, H>(
        &mut self,
        strip: &mut S,
        clock: &C,
        hooks: &mut H,
        count: usize,
    ) -> Result<RunOutcome, TooManyItems>
    where
        S: LedStrip,
        C: Clock,
        H: Hooks,
    {
        for _ in 0..count {
            let outcome = self.play_next(&mut *strip, clock, &mut *hooks)?;
            if outcome == RunOutcome::Interrupted {
                return Ok(RunOutcome::Interrupted);
            }
        }
        Ok(RunOutcome::Completed)
    }
}
